//! Procedural arena layout
//!
//! Places the perimeter border, obstacle clusters, random scatter, and
//! spawn points. Obstacles are laid down first so hostile spawn
//! validation can see the final wall set; each hostile actor position is
//! constructed once, after validation.

use std::collections::HashSet;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::geom::Rect;
use super::state::{Facing, Obstacle};
use crate::config::SimConfig;
use crate::consts::TILE_SIZE;

/// Smallest grid the layout rules support; smaller requests are clamped
pub const MIN_COLS: u32 = 8;
pub const MIN_ROWS: u32 = 8;

/// Random spawn re-rolls per hostile before falling back to a scan
const SPAWN_ATTEMPTS: u32 = 64;

/// Output of arena generation
#[derive(Debug)]
pub struct ArenaLayout {
    pub player_spawn: Vec2,
    pub hostile_spawns: Vec<Vec2>,
    pub obstacles: Vec<Obstacle>,
}

/// Generate a fresh arena layout for a `cols` x `rows` tile grid.
///
/// Post-condition: from the player spawn at least one cardinal move is
/// unobstructed. A violation is a logic defect in the layout rules, not
/// a runtime condition; it trips a debug assertion and logs loudly.
pub fn generate(cols: u32, rows: u32, rules: &SimConfig, rng: &mut Pcg32) -> ArenaLayout {
    let cols = cols.max(MIN_COLS);
    let rows = rows.max(MIN_ROWS);
    let center_col = (cols / 2) as i32;
    let bottom_row = rows as i32 - 2;

    // Player sits on the center column, one tile above the bottom border
    let player_spawn = Vec2::new(
        (cols / 2) as f32 * TILE_SIZE,
        (rows - 3) as f32 * TILE_SIZE,
    );

    let mut occupied: HashSet<(u32, u32)> = HashSet::new();
    let mut obstacles = Vec::new();
    let mut place = |occupied: &mut HashSet<(u32, u32)>, obstacles: &mut Vec<Obstacle>, col: u32, row: u32| {
        if occupied.insert((col, row)) {
            obstacles.push(Obstacle::at_tile(col, row));
        }
    };

    // Perimeter border with gaps: every third tile is skipped, and the
    // corridor around the player's spawn column stays clear
    for i in 0..cols {
        let off_center = (i as i32 - center_col).abs();
        if i % 3 != 0 && off_center > 1 {
            place(&mut occupied, &mut obstacles, i, 1);
            if off_center > 2 {
                place(&mut occupied, &mut obstacles, i, rows - 2);
            }
        }
    }
    for j in 1..rows.saturating_sub(1) {
        if j % 3 != 0 && (j as i32) < bottom_row - 2 {
            place(&mut occupied, &mut obstacles, 1, j);
            place(&mut occupied, &mut obstacles, cols - 2, j);
        }
    }

    // Symmetric clusters plus two mid-field singles, all vetted against
    // the player spawn corridor
    let clusters: [(i32, i32); 8] = [
        (4, 4),
        (5, 4),
        (4, 5),
        (cols as i32 - 5, 4),
        (cols as i32 - 6, 4),
        (cols as i32 - 5, 5),
        (center_col - 3, (rows / 2) as i32),
        (center_col + 3, (rows / 2) as i32),
    ];
    for (x, y) in clusters {
        if x < 0 || y < 0 || x >= cols as i32 || y >= rows as i32 {
            continue;
        }
        if (x - center_col).abs() > 2 || (y - bottom_row).abs() > 2 {
            place(&mut occupied, &mut obstacles, x as u32, y as u32);
        }
    }

    // Bounded random scatter, kept a minimum distance from the player spawn
    if cols > 4 && rows / 2 > 2 {
        for _ in 0..rules.scatter_obstacles {
            let x = rng.random_range(2..cols - 2) as i32;
            let y = rng.random_range(2..rows / 2) as i32;
            if (x - center_col).abs() > 3 && y < bottom_row - 3 {
                place(&mut occupied, &mut obstacles, x as u32, y as u32);
            }
        }
    }

    log::debug!("Placed {} obstacles", obstacles.len());

    // Hostile spawns: upper half, re-rolled until clear of the player,
    // every obstacle, and previously placed hostiles. Re-rolls are
    // bounded; a crowded upper half falls back to a deterministic scan,
    // and an exhausted one places fewer hostiles than configured.
    let player_rect = Rect::square_at(player_spawn, TILE_SIZE);
    let mut hostile_spawns: Vec<Vec2> = Vec::with_capacity(rules.hostile_count);
    for _ in 0..rules.hostile_count {
        let mut pos = None;
        for _ in 0..SPAWN_ATTEMPTS {
            let col = rng.random_range(0..cols);
            let row = rng.random_range(0..(rows / 2).max(1));
            let candidate = Vec2::new(col as f32 * TILE_SIZE, row as f32 * TILE_SIZE);
            if spawn_is_clear(candidate, &player_rect, &obstacles, &hostile_spawns) {
                pos = Some(candidate);
                break;
            }
        }
        let pos =
            pos.or_else(|| first_clear_upper_tile(cols, rows, &player_rect, &obstacles, &hostile_spawns));
        match pos {
            Some(p) => hostile_spawns.push(p),
            None => {
                log::warn!(
                    "Upper half exhausted after {} of {} hostile spawns",
                    hostile_spawns.len(),
                    rules.hostile_count
                );
                break;
            }
        }
    }

    let bounds = Vec2::new(cols as f32 * TILE_SIZE, rows as f32 * TILE_SIZE);
    if !spawn_has_exit(player_spawn, rules.player_speed, bounds, &obstacles) {
        log::error!("Arena generation boxed in the player spawn (seeded layout defect)");
        debug_assert!(false, "player spawn has no unobstructed cardinal move");
    }

    ArenaLayout {
        player_spawn,
        hostile_spawns,
        obstacles,
    }
}

fn spawn_is_clear(
    candidate: Vec2,
    player_rect: &Rect,
    obstacles: &[Obstacle],
    taken: &[Vec2],
) -> bool {
    let rect = Rect::square_at(candidate, TILE_SIZE);
    !rect.overlaps(player_rect)
        && !obstacles.iter().any(|o| rect.overlaps(&o.rect))
        && !taken
            .iter()
            .any(|&t| rect.overlaps(&Rect::square_at(t, TILE_SIZE)))
}

/// Deterministic fallback when random spawn rolls keep landing on
/// occupied tiles: the first clear upper-half tile in scan order
fn first_clear_upper_tile(
    cols: u32,
    rows: u32,
    player_rect: &Rect,
    obstacles: &[Obstacle],
    taken: &[Vec2],
) -> Option<Vec2> {
    for row in 0..(rows / 2).max(1) {
        for col in 0..cols {
            let candidate = Vec2::new(col as f32 * TILE_SIZE, row as f32 * TILE_SIZE);
            if spawn_is_clear(candidate, player_rect, obstacles, taken) {
                return Some(candidate);
            }
        }
    }
    None
}

/// Reachability probe: can a one-step move in some cardinal direction
/// succeed from `spawn`?
pub fn spawn_has_exit(spawn: Vec2, step: f32, bounds: Vec2, obstacles: &[Obstacle]) -> bool {
    Facing::ALL.iter().any(|facing| {
        let candidate = Rect::square_at(spawn + facing.delta() * step, TILE_SIZE);
        candidate.within(bounds) && !obstacles.iter().any(|o| candidate.overlaps(&o.rect))
    })
}
