//! Tank Arena - a tile-bounded top-down combat simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collision, arena, AI, tick)
//! - `input`: Snapshot of logical control signals fed by the host
//! - `driver`: Frame cadence control and read-only telemetry
//! - `config`: Data-driven match rules
//!
//! Rendering, input devices, and the hosting shell are external
//! collaborators; this crate only owns the simulation.

pub mod config;
pub mod driver;
pub mod input;
pub mod sim;

pub use config::SimConfig;
pub use driver::FrameDriver;
pub use input::InputSnapshot;

/// Fixed rules of the game. Per-tick deltas, never scaled by elapsed time.
pub mod consts {
    /// Side length of one grid tile in pixels (also the actor footprint)
    pub const TILE_SIZE: f32 = 40.0;

    /// Player movement in pixels per tick
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Hostile movement in pixels per tick
    pub const HOSTILE_SPEED: f32 = 2.0;
    /// Projectile travel in pixels per tick
    pub const BULLET_SPEED: f32 = 8.0;
    /// Projectile footprint (square side)
    pub const BULLET_SIZE: f32 = TILE_SIZE / 4.0;
    /// Minimum ticks between successive shots from one actor
    pub const FIRE_DELAY_TICKS: u32 = 20;
    /// Hostiles spawned in a fresh arena unless configured otherwise
    pub const DEFAULT_HOSTILE_COUNT: usize = 3;

    /// Animation-progress gain per tick (clamped at 1.0, cosmetic only)
    pub const ANIM_STEP: f32 = 0.3;
    /// Trailing positions kept per projectile (newest first)
    pub const TRAIL_LENGTH: usize = 5;

    /// Particle lifetime in ticks
    pub const PARTICLE_LIFETIME_TICKS: u32 = 30;
    /// Per-tick velocity damping applied to particles
    pub const PARTICLE_DRAG: f32 = 0.95;
    /// Burst size when a projectile strikes an obstacle
    pub const BURST_SMALL: usize = 10;
    /// Burst size when a projectile strikes an actor
    pub const BURST_LARGE: usize = 15;

    /// Chance per tick that a hostile re-evaluates pursuit
    pub const AI_PURSUE_CHANCE: f32 = 0.02;
    /// Chance per tick that a hostile picks a random facing (anti-stuck)
    pub const AI_WANDER_CHANCE: f32 = 0.01;
    /// Fire chance per tick while roughly lined up with the player
    pub const AI_FIRE_CHANCE_AIMED: f32 = 0.05;
    /// Baseline fire chance per tick
    pub const AI_FIRE_CHANCE_IDLE: f32 = 0.01;

    /// Analog intents below this magnitude are treated as zero
    pub const INTENT_DEAD_ZONE: f32 = 0.2;

    /// Packed RGB colors handed to the presentation layer via particles
    pub const PLAYER_COLOR: u32 = 0x34c759;
    pub const HOSTILE_COLOR: u32 = 0xff3b30;
    pub const BULLET_COLOR: u32 = 0xffffff;
    pub const OBSTACLE_COLOR: u32 = 0x8e8e93;
}
