//! Frame driver
//!
//! Bridges a host frame loop onto the fixed-increment simulation: one
//! host frame is one tick. The driver owns the world, the buffered
//! input snapshot, and an optional render hook; the host only calls
//! [`FrameDriver::frame`] with its clock and forwards raw input events.

use glam::Vec2;

use crate::config::SimConfig;
use crate::consts::INTENT_DEAD_ZONE;
use crate::input::InputSnapshot;
use crate::sim::{self, MatchState, World};

/// Called after each simulated tick with the freshly advanced world
pub type RenderHook = Box<dyn FnMut(&World)>;

/// Owns the lifecycle of a match: initialize, start, per-frame tick,
/// stop, restart. All operations before `initialize` are no-ops.
pub struct FrameDriver {
    config: SimConfig,
    world: Option<World>,
    input: InputSnapshot,
    running: bool,
    render_hook: Option<RenderHook>,
    surface: Vec2,
    next_seed: u64,
    // Informational frame-rate window; never feeds back into the sim
    window_start_ms: f64,
    window_frames: u32,
    tick_rate: f32,
}

impl FrameDriver {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            world: None,
            input: InputSnapshot::new(),
            running: false,
            render_hook: None,
            surface: Vec2::ZERO,
            next_seed: 0,
            window_start_ms: 0.0,
            window_frames: 0,
            tick_rate: 0.0,
        }
    }

    /// Build a fresh world for the given surface size, discarding any
    /// previous match. Buffered input is cleared so no stale press
    /// leaks into the new match. Each call uses the next seed in
    /// sequence so consecutive matches get distinct arenas.
    pub fn initialize(&mut self, width: f32, height: f32) {
        let seed = self.next_seed;
        self.next_seed = self.next_seed.wrapping_add(1);
        self.initialize_seeded(width, height, seed);
    }

    /// Like [`initialize`](Self::initialize) with an explicit seed, for
    /// reproducible matches.
    pub fn initialize_seeded(&mut self, width: f32, height: f32, seed: u64) {
        self.surface = Vec2::new(width, height);
        self.input.clear();
        self.world = Some(World::new(width, height, self.config.clone(), seed));
        log::info!(
            "Initialized {}x{} match with seed {seed}",
            width as u32,
            height as u32
        );
    }

    /// Begin ticking. Idempotent; a no-op before `initialize`.
    pub fn start(&mut self) {
        if self.world.is_some() {
            self.running = true;
        }
    }

    /// Halt ticking and detach the render hook. Idempotent. After this
    /// returns, no further ticks or hook calls happen until `start`.
    pub fn stop(&mut self) {
        self.running = false;
        self.render_hook = None;
    }

    /// Rebuild the world on the current surface and resume. Not a
    /// literal `stop` + `start` pair: `stop` detaches the render hook,
    /// while restart keeps it attached so the presentation layer
    /// survives match resets. Only an explicit `stop` detaches it.
    pub fn restart(&mut self) {
        if self.world.is_none() {
            return;
        }
        self.running = false;
        let surface = self.surface;
        self.initialize(surface.x, surface.y);
        self.running = true;
    }

    /// Attach the per-tick render callback, replacing any previous one
    pub fn set_render_hook(&mut self, hook: RenderHook) {
        self.render_hook = Some(hook);
    }

    /// Advance one frame: tick the world once, invoke the render hook,
    /// and fold `now_ms` into the frame-rate window. Does nothing while
    /// stopped or uninitialized.
    pub fn frame(&mut self, now_ms: f64) {
        if !self.running {
            return;
        }
        let Some(world) = self.world.as_mut() else {
            return;
        };

        sim::tick(world, &self.input);

        if let Some(hook) = self.render_hook.as_mut() {
            hook(world);
        }

        self.window_frames += 1;
        let elapsed = now_ms - self.window_start_ms;
        if elapsed >= 1000.0 {
            self.tick_rate = (self.window_frames as f64 * 1000.0 / elapsed) as f32;
            self.window_start_ms = now_ms;
            self.window_frames = 0;
        }
    }

    /// Ticks per second over the last completed window; informational
    /// only, never fed back into the simulation
    pub fn current_tick_rate(&self) -> f32 {
        self.tick_rate
    }

    pub fn live_hostile_count(&self) -> usize {
        self.world.as_ref().map_or(0, |w| w.hostile_count())
    }

    pub fn match_state(&self) -> Option<MatchState> {
        self.world.as_ref().map(|w| w.state)
    }

    pub fn toggle_pause(&mut self) {
        if let Some(world) = self.world.as_mut() {
            world.toggle_pause();
        }
    }

    /// Forward a raw key event into the buffered snapshot; returns
    /// whether the key mapped to a logical signal
    pub fn handle_key(&mut self, key: &str, pressed: bool) -> bool {
        self.input.set_key(key, pressed)
    }

    /// Forward an analog move intent, applying the configured dead zone
    pub fn set_move_intent(&mut self, axis_x: f32, axis_y: f32) {
        let dead_zone = if self.config.dead_zone > 0.0 {
            self.config.dead_zone
        } else {
            INTENT_DEAD_ZONE
        };
        self.input.set_move_intent(axis_x, axis_y, dead_zone);
    }

    pub fn set_fire_intent(&mut self, fire: bool) {
        self.input.set_fire_intent(fire);
    }

    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn driver() -> FrameDriver {
        FrameDriver::new(SimConfig::default())
    }

    #[test]
    fn test_operations_before_initialize_are_noops() {
        let mut d = driver();
        d.start();
        d.frame(16.0);
        d.toggle_pause();
        d.restart();
        assert!(d.world().is_none());
        assert_eq!(d.live_hostile_count(), 0);
        assert_eq!(d.match_state(), None);
    }

    #[test]
    fn test_start_stop_idempotent() {
        let mut d = driver();
        d.initialize(800.0, 600.0);
        d.start();
        d.start();
        let t0 = d.world().map(|w| w.time_ticks);
        d.frame(16.0);
        assert_eq!(d.world().map(|w| w.time_ticks), t0.map(|t| t + 1));

        d.stop();
        d.stop();
        let t1 = d.world().map(|w| w.time_ticks);
        d.frame(33.0);
        d.frame(50.0);
        assert_eq!(d.world().map(|w| w.time_ticks), t1);
    }

    #[test]
    fn test_frame_ticks_and_invokes_hook() {
        let mut d = driver();
        d.initialize(800.0, 600.0);
        let calls = Rc::new(Cell::new(0u32));
        let seen = Rc::clone(&calls);
        d.set_render_hook(Box::new(move |world| {
            assert!(world.time_ticks > 0);
            seen.set(seen.get() + 1);
        }));
        d.start();
        for i in 0..5 {
            d.frame(i as f64 * 16.67);
        }
        assert_eq!(calls.get(), 5);
    }

    #[test]
    fn test_stop_detaches_render_hook() {
        let mut d = driver();
        d.initialize(800.0, 600.0);
        let calls = Rc::new(Cell::new(0u32));
        let seen = Rc::clone(&calls);
        d.set_render_hook(Box::new(move |_| seen.set(seen.get() + 1)));
        d.start();
        d.frame(16.0);
        d.stop();
        d.start();
        d.frame(33.0);
        // The tick still ran but the detached hook stayed silent
        assert_eq!(calls.get(), 1);
        assert_eq!(d.world().map(|w| w.time_ticks), Some(2));
    }

    #[test]
    fn test_restart_resets_match() {
        let mut d = driver();
        d.initialize(800.0, 600.0);
        d.start();
        d.set_fire_intent(true);
        for i in 0..60 {
            d.frame(i as f64 * 16.67);
        }
        assert!(d.world().is_some_and(|w| !w.projectiles.is_empty()));

        d.restart();
        let world = d.world().unwrap();
        assert_eq!(world.time_ticks, 0);
        assert_eq!(world.state, MatchState::Playing);
        assert!(world.projectiles.is_empty());
        assert!(world.particles.is_empty());
        assert_eq!(world.hostile_count(), SimConfig::default().hostile_count);
        // Stale fire intent must not leak into the fresh match
        d.frame(0.0);
        assert!(d.world().unwrap().projectiles.iter().all(|p| p.owner != crate::sim::Role::Player));
    }

    #[test]
    fn test_consecutive_matches_use_distinct_seeds() {
        let mut d = driver();
        d.initialize(800.0, 600.0);
        let first = d.world().unwrap().seed;
        d.restart();
        assert_ne!(d.world().unwrap().seed, first);
    }

    #[test]
    fn test_tick_rate_window() {
        let mut d = driver();
        d.initialize(800.0, 600.0);
        d.start();
        let mut now = 0.0;
        // 61 frames at ~16.67ms crosses the 1000ms window once
        for _ in 0..61 {
            d.frame(now);
            now += 16.67;
        }
        let rate = d.current_tick_rate();
        assert!((55.0..=65.0).contains(&rate), "tick rate {rate} out of range");
    }
}
