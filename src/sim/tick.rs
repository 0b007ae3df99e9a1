//! Per-frame simulation step
//!
//! Order is fixed every frame:
//! 1. Shrink the storm (clamped to its floor)
//! 2. Autonomous agents wander and occasionally fire; every alive agent spins
//! 3. Projectiles advance along their heading
//! 4. Projectiles outside the arena are dropped

use std::f32::consts::TAU;

use rand::Rng;

use super::config::RoundConfig;
use super::state::{EliminationCause, GameEvent, WorldState};
use crate::consts::FACING_SPIN;

/// Advance the world by one frame (movement only, no collisions)
pub fn advance(world: &mut WorldState, config: &RoundConfig, events: &mut Vec<GameEvent>) {
    let WorldState {
        arena,
        agents,
        projectiles,
        storm,
        rng,
        ..
    } = world;

    storm.shrink();

    for agent in agents.iter_mut() {
        if !agent.alive {
            continue;
        }

        if !agent.is_human() {
            let heading = rng.random_range(0.0..TAU);
            agent.wander(heading, config.wander_speed_factor, *arena);

            // Wandering skips the storm check unless configured otherwise
            if config.hazard_hits_autonomous && agent.apply_storm(storm) {
                events.push(GameEvent::Eliminated {
                    id: agent.id,
                    cause: EliminationCause::Storm,
                });
            }

            let fire_roll = rng.random_bool(config.fire_chance());
            if fire_roll && let Some(shot) = agent.shoot() {
                events.push(GameEvent::ShotFired { owner: agent.id });
                projectiles.push(shot);
            }
        }

        agent.spin(FACING_SPIN);
    }

    for shot in projectiles.iter_mut() {
        shot.advance();
    }

    projectiles.retain(|shot| shot.in_bounds(*arena));
}
