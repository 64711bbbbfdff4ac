//! Headless demo runner
//!
//! Drives a full match with a scripted auto-player so the simulation
//! can be exercised and profiled without any rendering host. Pass a
//! JSON config path as the first argument to override the default
//! rules.

use std::path::Path;

use tank_arena::{FrameDriver, InputSnapshot, SimConfig};

const SURFACE_WIDTH: f32 = 800.0;
const SURFACE_HEIGHT: f32 = 600.0;
const FRAME_MS: f64 = 1000.0 / 60.0;
const MAX_FRAMES: u64 = 60 * 60 * 2; // two simulated minutes

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => SimConfig::load(Path::new(&path)),
        None => SimConfig::default(),
    };

    let mut driver = FrameDriver::new(config);
    driver.initialize(SURFACE_WIDTH, SURFACE_HEIGHT);
    driver.start();

    let mut now_ms = 0.0;
    for frame in 0..MAX_FRAMES {
        let input = scripted_input(frame);
        driver.set_move_intent(
            input.right as i32 as f32 - input.left as i32 as f32,
            input.down as i32 as f32 - input.up as i32 as f32,
        );
        driver.set_fire_intent(input.fire);

        driver.frame(now_ms);
        now_ms += FRAME_MS;

        if frame % 300 == 299 {
            log::info!(
                "tick {}: {:.1} tps, {} hostiles, {:?}",
                frame + 1,
                driver.current_tick_rate(),
                driver.live_hostile_count(),
                driver.match_state()
            );
        }

        if driver.match_state().is_some_and(|s| s.is_terminal()) {
            break;
        }
    }

    match driver.match_state() {
        Some(state) if state.is_terminal() => log::info!("Match ended: {state:?}"),
        _ => log::info!("Match still running after {MAX_FRAMES} frames"),
    }
    driver.stop();
}

/// Scripted auto-player: hold fire and sweep through the cardinal
/// directions on a fixed cadence, with a longer dwell on Up to push
/// into the hostiles' half
fn scripted_input(frame: u64) -> InputSnapshot {
    let mut input = InputSnapshot::new();
    input.set_fire_intent(true);
    match (frame / 45) % 4 {
        0 | 2 => input.up = true,
        1 => input.left = true,
        _ => input.right = true,
    }
    input
}
