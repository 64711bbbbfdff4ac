//! Entity model and world aggregate
//!
//! All mutable match state lives in [`World`]; there are no ambient globals.
//! Entities are separate homogeneous collections per kind, with [`Rect`]
//! as the shared collision seam.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::arena;
use super::geom::Rect;
use crate::config::SimConfig;
use crate::consts::*;

/// One of the four cardinal facings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Up,
    Down,
    Left,
    Right,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::Up, Facing::Down, Facing::Left, Facing::Right];

    /// Unit step in screen coordinates (y grows downward)
    pub fn delta(self) -> Vec2 {
        match self {
            Facing::Up => Vec2::new(0.0, -1.0),
            Facing::Down => Vec2::new(0.0, 1.0),
            Facing::Left => Vec2::new(-1.0, 0.0),
            Facing::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// Which side an actor (or its projectile) fights for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Player,
    Hostile,
}

impl Role {
    /// Packed RGB for the presentation layer
    pub fn color(self) -> u32 {
        match self {
            Role::Player => PLAYER_COLOR,
            Role::Hostile => HOSTILE_COLOR,
        }
    }
}

/// A movable combat vehicle with a one-tile square footprint
#[derive(Debug, Clone)]
pub struct Actor {
    pub pos: Vec2,
    /// Position before the last committed move, for interpolation
    pub last_pos: Vec2,
    pub facing: Facing,
    pub speed: f32,
    pub role: Role,
    /// Ticks remaining before the next shot is allowed
    pub fire_cooldown: u32,
    /// Ticks a shot sets the cooldown to
    pub fire_delay: u32,
    /// Move-smoothing progress, advances toward 1.0 each tick
    pub anim_progress: f32,
}

impl Actor {
    pub fn new(pos: Vec2, role: Role, speed: f32, fire_delay: u32) -> Self {
        Self {
            pos,
            last_pos: pos,
            facing: Facing::Up,
            speed,
            role,
            fire_cooldown: 0,
            fire_delay,
            anim_progress: 1.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::square_at(self.pos, TILE_SIZE)
    }

    fn rect_at(&self, pos: Vec2) -> Rect {
        Rect::square_at(pos, TILE_SIZE)
    }

    /// Try to move by `delta`. The candidate position is rejected, with no
    /// state change, if it would leave `bounds` or overlap any blocker
    /// rect. On success the move is committed and the animation counter
    /// resets. Collision is a pre-condition check, never a correction.
    pub fn attempt_move(&mut self, delta: Vec2, bounds: Vec2, blockers: &[Rect]) -> bool {
        if delta == Vec2::ZERO {
            return false;
        }

        let candidate = self.pos + delta;
        let footprint = self.rect_at(candidate);

        if !footprint.within(bounds) {
            return false;
        }
        if blockers.iter().any(|b| footprint.overlaps(b)) {
            return false;
        }

        self.last_pos = self.pos;
        self.pos = candidate;
        self.anim_progress = 0.0;
        true
    }

    /// Fire a projectile along the current facing. Returns `None` while
    /// on cooldown; that is a normal no-op, not an error.
    pub fn fire(&mut self, bullet_speed: f32) -> Option<Projectile> {
        if self.fire_cooldown > 0 {
            return None;
        }

        // Centered on the barrel, nudged past the hull in the facing direction
        let mut muzzle = self.pos + Vec2::splat(TILE_SIZE / 2.0 - BULLET_SIZE / 2.0);
        match self.facing {
            Facing::Up => muzzle.y = self.pos.y - TILE_SIZE / 4.0,
            Facing::Down => muzzle.y = self.pos.y + TILE_SIZE,
            Facing::Left => muzzle.x = self.pos.x - TILE_SIZE / 4.0,
            Facing::Right => muzzle.x = self.pos.x + TILE_SIZE,
        }

        self.fire_cooldown = self.fire_delay;
        Some(Projectile::new(
            muzzle,
            self.facing.delta() * bullet_speed,
            self.role,
        ))
    }

    /// Per-tick upkeep: cooldown countdown and animation smoothing
    pub fn tick(&mut self) {
        self.fire_cooldown = self.fire_cooldown.saturating_sub(1);
        self.anim_progress = (self.anim_progress + ANIM_STEP).min(1.0);
    }
}

/// An indestructible tile-aligned wall block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub rect: Rect,
}

impl Obstacle {
    /// Obstacle filling the tile at grid coordinates (col, row)
    pub fn at_tile(col: u32, row: u32) -> Self {
        Self {
            rect: Rect::new(
                col as f32 * TILE_SIZE,
                row as f32 * TILE_SIZE,
                TILE_SIZE,
                TILE_SIZE,
            ),
        }
    }
}

/// A bullet in flight
#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Side that fired it; immutable, filters impacts and attributes kills
    pub owner: Role,
    /// Recent positions, newest first, for the visual trail
    pub trail: Vec<Vec2>,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2, owner: Role) -> Self {
        Self {
            pos,
            vel,
            owner,
            trail: Vec::with_capacity(TRAIL_LENGTH),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::square_at(self.pos, BULLET_SIZE)
    }

    /// Record the current position to the trail and advance by velocity
    pub fn advance(&mut self) {
        self.trail.insert(0, self.pos);
        self.trail.truncate(TRAIL_LENGTH);
        self.pos += self.vel;
    }
}

/// A cosmetic spark; never affects collision or game flow
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: u32,
    /// Ticks remaining
    pub life: u32,
}

impl Particle {
    /// A randomly scattered burst particle
    fn scatter(rng: &mut Pcg32, pos: Vec2, color: u32) -> Self {
        Self {
            pos,
            vel: Vec2::new(rng.random_range(-3.0..3.0), rng.random_range(-3.0..3.0)),
            size: rng.random_range(2.0..5.0),
            color,
            life: PARTICLE_LIFETIME_TICKS,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel *= PARTICLE_DRAG;
        self.life = self.life.saturating_sub(1);
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }
}

/// High-level game-flow phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    Playing,
    Paused,
    /// Player destroyed; terminal until restart
    GameOver,
    /// All hostiles destroyed; terminal until restart
    Victory,
}

impl MatchState {
    pub fn is_terminal(self) -> bool {
        matches!(self, MatchState::GameOver | MatchState::Victory)
    }
}

/// The complete match state, owned by the frame driver
#[derive(Debug)]
pub struct World {
    pub seed: u64,
    /// Arena pixel bounds
    pub bounds: Vec2,
    /// Tile grid derived from the surface dimensions
    pub cols: u32,
    pub rows: u32,
    pub rules: SimConfig,
    pub state: MatchState,
    pub player: Actor,
    pub hostiles: Vec<Actor>,
    pub obstacles: Vec<Obstacle>,
    pub projectiles: Vec<Projectile>,
    pub particles: Vec<Particle>,
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
}

impl World {
    /// Build a fresh world for a surface of the given pixel dimensions.
    /// The tile grid is recomputed from the surface size and the arena
    /// layout is generated procedurally from `seed`. Surfaces below the
    /// minimum playable grid are clamped up, widening the bounds to
    /// keep every tile inside them.
    pub fn new(width: f32, height: f32, rules: SimConfig, seed: u64) -> Self {
        let raw_cols = (width / TILE_SIZE).floor() as u32;
        let raw_rows = (height / TILE_SIZE).floor() as u32;
        let cols = raw_cols.max(arena::MIN_COLS);
        let rows = raw_rows.max(arena::MIN_ROWS);
        if cols != raw_cols || rows != raw_rows {
            log::warn!(
                "Surface {width}x{height} below the minimum grid; clamped to {cols}x{rows} tiles"
            );
        }
        let bounds = Vec2::new(
            width.max(cols as f32 * TILE_SIZE),
            height.max(rows as f32 * TILE_SIZE),
        );
        let mut rng = Pcg32::seed_from_u64(seed);

        let layout = arena::generate(cols, rows, &rules, &mut rng);
        log::info!(
            "World created: {}x{} tiles, {} hostiles, {} obstacles (seed {})",
            cols,
            rows,
            layout.hostile_spawns.len(),
            layout.obstacles.len(),
            seed
        );

        let player = Actor::new(layout.player_spawn, Role::Player, rules.player_speed, rules.fire_delay);
        let hostiles = layout
            .hostile_spawns
            .iter()
            .map(|&pos| Actor::new(pos, Role::Hostile, rules.hostile_speed, rules.fire_delay))
            .collect();

        Self {
            seed,
            bounds,
            cols,
            rows,
            rules,
            state: MatchState::Playing,
            player,
            hostiles,
            obstacles: layout.obstacles,
            projectiles: Vec::new(),
            particles: Vec::new(),
            time_ticks: 0,
            rng,
        }
    }

    /// Live hostile count, the externally displayed number
    pub fn hostile_count(&self) -> usize {
        self.hostiles.len()
    }

    /// Spawn a burst of scatter particles centered at `pos`
    pub fn spawn_burst(&mut self, pos: Vec2, color: u32, count: usize) {
        for _ in 0..count {
            let p = Particle::scatter(&mut self.rng, pos, color);
            self.particles.push(p);
        }
    }

    /// Flip between `Playing` and `Paused`; no-op in terminal states
    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            MatchState::Playing => MatchState::Paused,
            MatchState::Paused => MatchState::Playing,
            terminal => terminal,
        };
    }
}
