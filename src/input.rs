//! Logical control signals
//!
//! The host's key/touch handlers write this snapshot asynchronously; the
//! simulation only reads it at tick start. Plain booleans are enough for
//! last-write-wins semantics, so there is no locking here.

/// Pressed/unpressed state of the five logical signals
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a raw key name onto a logical signal, case-insensitively.
    /// Arrows, WASD, and space are recognized; returns whether the key
    /// mapped to anything.
    pub fn set_key(&mut self, key: &str, pressed: bool) -> bool {
        match key.to_ascii_lowercase().as_str() {
            "arrowup" | "w" => self.up = pressed,
            "arrowdown" | "s" => self.down = pressed,
            "arrowleft" | "a" => self.left = pressed,
            "arrowright" | "d" => self.right = pressed,
            " " | "space" | "spacebar" => self.fire = pressed,
            _ => return false,
        }
        true
    }

    /// Analog-style move intent with each axis in [-1, 1] (screen
    /// coordinates, negative y is up). Magnitudes under `dead_zone` are
    /// treated as zero on that axis. Overwrites the four direction
    /// signals.
    pub fn set_move_intent(&mut self, axis_x: f32, axis_y: f32, dead_zone: f32) {
        let x = if axis_x.abs() < dead_zone { 0.0 } else { axis_x };
        let y = if axis_y.abs() < dead_zone { 0.0 } else { axis_y };
        self.left = x < 0.0;
        self.right = x > 0.0;
        self.up = y < 0.0;
        self.down = y > 0.0;
    }

    pub fn set_fire_intent(&mut self, fire: bool) {
        self.fire = fire;
    }

    /// Release every signal (used on initialize so no stale press leaks
    /// into a fresh match)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn any_direction(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}
