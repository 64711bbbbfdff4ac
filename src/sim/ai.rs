//! Hostile decision procedure
//!
//! Runs once per tick per live hostile. All behavior is a set of
//! independent fixed-probability rolls; no state beyond what lives on
//! the actor itself.

use glam::Vec2;

use rand::Rng;

use super::geom::Rect;
use super::state::{Actor, Facing, Projectile, World};
use crate::consts::*;

/// Drive every live hostile for one tick: pursue, wander, fire.
/// Projectiles fired this tick are appended to the world's list.
pub fn drive_hostiles(world: &mut World) {
    let player_pos = world.player.pos;
    let player_rect = world.player.rect();
    let bounds = world.bounds;
    let bullet_speed = world.rules.bullet_speed;
    let mut fired: Vec<Projectile> = Vec::new();

    for i in 0..world.hostiles.len() {
        // Draw all rolls up front so the rng borrow ends before the
        // mutable hostile borrow begins
        let pursue_roll: f32 = world.rng.random();
        let wander_roll: f32 = world.rng.random();
        let fire_roll: f32 = world.rng.random();
        let wander_pick: usize = world.rng.random_range(0..Facing::ALL.len());

        // Movement blockers: every obstacle, the player, and every other hostile
        let mut blockers: Vec<Rect> =
            Vec::with_capacity(world.obstacles.len() + world.hostiles.len());
        blockers.extend(world.obstacles.iter().map(|o| o.rect));
        blockers.push(player_rect);
        for (j, other) in world.hostiles.iter().enumerate() {
            if j != i {
                blockers.push(other.rect());
            }
        }

        let hostile = &mut world.hostiles[i];

        if pursue_roll < AI_PURSUE_CHANCE {
            pursue_step(hostile, player_pos, bounds, &blockers);
        }

        // Independent anti-stuck wander: re-face without necessarily moving
        if wander_roll < AI_WANDER_CHANCE {
            hostile.facing = Facing::ALL[wander_pick];
        }

        let chance = if in_line_of_fire(hostile, player_pos) {
            AI_FIRE_CHANCE_AIMED
        } else {
            AI_FIRE_CHANCE_IDLE
        };
        if fire_roll < chance {
            if let Some(shot) = hostile.fire(bullet_speed) {
                fired.push(shot);
            }
        }
    }

    world.projectiles.extend(fired);
}

/// One pursuit step: face and move along the dominant displacement axis
/// toward the player
pub(crate) fn pursue_step(hostile: &mut Actor, player_pos: Vec2, bounds: Vec2, blockers: &[Rect]) {
    let diff = player_pos - hostile.pos;
    let facing = if diff.x.abs() > diff.y.abs() {
        if diff.x > 0.0 { Facing::Right } else { Facing::Left }
    } else if diff.y > 0.0 {
        Facing::Down
    } else {
        Facing::Up
    };
    hostile.facing = facing;
    hostile.attempt_move(facing.delta() * hostile.speed, bounds, blockers);
}

/// Lead-free straight-line aim check: the hostile faces the player along
/// one axis and the cross-axis displacement is under one tile width
pub(crate) fn in_line_of_fire(hostile: &Actor, player_pos: Vec2) -> bool {
    let vertical = (hostile.pos.x - player_pos.x).abs() < TILE_SIZE
        && hostile.facing
            == if hostile.pos.y > player_pos.y {
                Facing::Up
            } else {
                Facing::Down
            };
    let horizontal = (hostile.pos.y - player_pos.y).abs() < TILE_SIZE
        && hostile.facing
            == if hostile.pos.x > player_pos.x {
                Facing::Left
            } else {
                Facing::Right
            };
    vertical || horizontal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::sim::state::Role;

    fn hostile_at(x: f32, y: f32) -> Actor {
        Actor::new(Vec2::new(x, y), Role::Hostile, HOSTILE_SPEED, FIRE_DELAY_TICKS)
    }

    #[test]
    fn test_pursue_moves_along_dominant_axis() {
        let bounds = Vec2::new(800.0, 600.0);
        // Player far to the right, slightly below
        let mut h = hostile_at(100.0, 100.0);
        pursue_step(&mut h, Vec2::new(500.0, 140.0), bounds, &[]);
        assert_eq!(h.facing, Facing::Right);
        assert_eq!(h.pos, Vec2::new(100.0 + HOSTILE_SPEED, 100.0));

        // Player far above
        let mut h = hostile_at(100.0, 400.0);
        pursue_step(&mut h, Vec2::new(120.0, 100.0), bounds, &[]);
        assert_eq!(h.facing, Facing::Up);
        assert_eq!(h.pos, Vec2::new(100.0, 400.0 - HOSTILE_SPEED));
    }

    #[test]
    fn test_pursue_turns_even_when_blocked() {
        let bounds = Vec2::new(800.0, 600.0);
        let wall = Rect::new(140.0, 100.0, 40.0, 40.0);
        let mut h = hostile_at(100.0, 100.0);
        pursue_step(&mut h, Vec2::new(500.0, 100.0), bounds, &[wall]);
        // Move is rejected but the facing still tracks the player
        assert_eq!(h.facing, Facing::Right);
        assert_eq!(h.pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_in_line_of_fire_vertical() {
        let mut h = hostile_at(200.0, 100.0);
        let player = Vec2::new(210.0, 400.0);
        h.facing = Facing::Down;
        assert!(in_line_of_fire(&h, player));
        h.facing = Facing::Up;
        assert!(!in_line_of_fire(&h, player));
        // Cross-axis displacement of a full tile breaks the line
        assert!(!in_line_of_fire(&hostile_at(200.0 + TILE_SIZE, 100.0), player));
    }

    #[test]
    fn test_in_line_of_fire_horizontal() {
        let mut h = hostile_at(500.0, 200.0);
        let player = Vec2::new(100.0, 230.0);
        h.facing = Facing::Left;
        assert!(in_line_of_fire(&h, player));
        h.facing = Facing::Right;
        assert!(!in_line_of_fire(&h, player));
    }

    #[test]
    fn test_driven_hostiles_eventually_act() {
        let mut world = World::new(800.0, 600.0, SimConfig::default(), 11);
        let initial: Vec<Vec2> = world.hostiles.iter().map(|h| h.pos).collect();

        for _ in 0..1000 {
            for h in world.hostiles.iter_mut() {
                h.tick();
            }
            drive_hostiles(&mut world);
        }

        let moved = world
            .hostiles
            .iter()
            .zip(&initial)
            .any(|(h, &start)| h.pos != start);
        assert!(moved, "no hostile moved in 1000 ticks");
        assert!(
            !world.projectiles.is_empty(),
            "no hostile fired in 1000 ticks"
        );
        assert!(world.projectiles.iter().all(|p| p.owner == Role::Hostile));
    }
}
