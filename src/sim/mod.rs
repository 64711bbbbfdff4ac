//! Deterministic tank combat simulation
//!
//! Everything here advances only through [`tick::tick`], in fixed
//! logical increments. No wall-clock time, no platform input, no
//! rendering; the driver layer owns all of that.

pub mod ai;
pub mod arena;
pub mod geom;
pub mod state;
pub mod tick;

pub use geom::Rect;
pub use state::{Actor, Facing, MatchState, Obstacle, Particle, Projectile, Role, World};
pub use tick::tick;
