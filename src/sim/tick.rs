//! One simulation tick
//!
//! Advances the whole world by a fixed logical increment. Runs only in
//! `Playing`; terminal states freeze every entity until an explicit
//! restart rebuilds the world.

use super::ai;
use super::geom::Rect;
use super::state::{Facing, MatchState, Role, World};
use crate::consts::*;
use crate::input::InputSnapshot;

/// Advance the world by one tick, reading `input` for the player.
///
/// Order: player input, hostile AI and movement, projectile travel and
/// impact resolution, win/loss transition, particle upkeep.
pub fn tick(world: &mut World, input: &InputSnapshot) {
    if world.state != MatchState::Playing {
        return;
    }

    world.time_ticks += 1;

    apply_player_input(world, input);
    world.player.tick();

    for hostile in world.hostiles.iter_mut() {
        hostile.tick();
    }
    ai::drive_hostiles(world);

    let player_struck = resolve_projectiles(world);

    if player_struck {
        world.state = MatchState::GameOver;
        log::info!("Player destroyed after {} ticks", world.time_ticks);
    } else if world.hostiles.is_empty() {
        world.state = MatchState::Victory;
        log::info!("All hostiles destroyed after {} ticks", world.time_ticks);
    }

    for particle in world.particles.iter_mut() {
        particle.update();
    }
    world.particles.retain(|p| p.is_alive());
}

/// Apply the buffered input snapshot to the player's movement and fire
/// intent. Each pressed direction is tried in a fixed order; blocked
/// moves are silent no-ops.
fn apply_player_input(world: &mut World, input: &InputSnapshot) {
    let bounds = world.bounds;
    let bullet_speed = world.rules.bullet_speed;

    let mut blockers: Vec<Rect> = Vec::with_capacity(world.obstacles.len() + world.hostiles.len());
    blockers.extend(world.obstacles.iter().map(|o| o.rect));
    blockers.extend(world.hostiles.iter().map(|h| h.rect()));

    let tries = [
        (input.up, Facing::Up),
        (input.down, Facing::Down),
        (input.left, Facing::Left),
        (input.right, Facing::Right),
    ];
    for (pressed, facing) in tries {
        if pressed {
            world.player.facing = facing;
            let step = facing.delta() * world.player.speed;
            world.player.attempt_move(step, bounds, &blockers);
        }
    }

    if input.fire {
        if let Some(shot) = world.player.fire(bullet_speed) {
            world.projectiles.push(shot);
        }
    }
}

/// Advance every projectile and resolve impacts in order: out of
/// bounds, obstacle, then role-filtered actor. Returns whether the
/// player was struck.
fn resolve_projectiles(world: &mut World) -> bool {
    let mut player_struck = false;
    let mut i = 0;

    while i < world.projectiles.len() {
        world.projectiles[i].advance();
        let pos = world.projectiles[i].pos;
        let rect = world.projectiles[i].rect();
        let owner = world.projectiles[i].owner;

        if pos.x < 0.0 || pos.x > world.bounds.x || pos.y < 0.0 || pos.y > world.bounds.y {
            world.projectiles.swap_remove(i);
            continue;
        }

        // Obstacles absorb the shot but are indestructible
        if world.obstacles.iter().any(|o| rect.overlaps(&o.rect)) {
            log::debug!("Projectile hit obstacle at ({:.1}, {:.1})", pos.x, pos.y);
            world.spawn_burst(pos, OBSTACLE_COLOR, BURST_SMALL);
            world.projectiles.swap_remove(i);
            continue;
        }

        // Actor impact, filtered by owner role: a side's shots can only
        // harm the other side
        match owner {
            Role::Player => {
                if let Some(j) = world
                    .hostiles
                    .iter()
                    .position(|h| rect.overlaps(&h.rect()))
                {
                    let center = world.hostiles[j].rect().center();
                    let color = world.hostiles[j].role.color();
                    world.hostiles.swap_remove(j);
                    world.spawn_burst(center, color, BURST_LARGE);
                    log::debug!("Hostile destroyed, {} remaining", world.hostiles.len());
                    world.projectiles.swap_remove(i);
                    continue;
                }
            }
            Role::Hostile => {
                if rect.overlaps(&world.player.rect()) {
                    let center = world.player.rect().center();
                    let color = world.player.role.color();
                    world.spawn_burst(center, color, BURST_LARGE);
                    world.projectiles.swap_remove(i);
                    player_struck = true;
                    continue;
                }
            }
        }

        i += 1;
    }

    player_struck
}
