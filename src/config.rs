//! Match rules configuration
//!
//! Tunable knobs for a match, separate from the fixed `consts` that define
//! the game itself. Loaded from JSON when the host provides a file, with
//! silent fall-back to defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable rules for one match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Hostiles placed at arena generation
    pub hostile_count: usize,
    /// Player movement in pixels per tick
    pub player_speed: f32,
    /// Hostile movement in pixels per tick
    pub hostile_speed: f32,
    /// Projectile travel in pixels per tick
    pub bullet_speed: f32,
    /// Minimum ticks between shots
    pub fire_delay: u32,
    /// Analog move intents below this magnitude count as zero
    pub dead_zone: f32,
    /// Random single obstacles attempted by the generator
    pub scatter_obstacles: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            hostile_count: DEFAULT_HOSTILE_COUNT,
            player_speed: PLAYER_SPEED,
            hostile_speed: HOSTILE_SPEED,
            bullet_speed: BULLET_SPEED,
            fire_delay: FIRE_DELAY_TICKS,
            dead_zone: INTENT_DEAD_ZONE,
            scatter_obstacles: 5,
        }
    }
}

impl SimConfig {
    /// Load config from a JSON file, falling back to defaults on any error
    pub fn load(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("Bad config {}: {} (using defaults)", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No config at {} (using defaults)", path.display());
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let cfg = SimConfig::default();
        assert_eq!(cfg.hostile_count, 3);
        assert_eq!(cfg.fire_delay, 20);
        assert_eq!(cfg.player_speed, 5.0);
    }

    #[test]
    fn test_json_round_trip() {
        let mut cfg = SimConfig::default();
        cfg.hostile_count = 7;
        cfg.bullet_speed = 12.0;
        let json = cfg.to_json().unwrap();
        let back: SimConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.hostile_count, 7);
        assert_eq!(back.bullet_speed, 12.0);
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let cfg = SimConfig::load(std::path::Path::new("/nonexistent/rules.json"));
        assert_eq!(cfg.hostile_count, SimConfig::default().hostile_count);
    }
}
