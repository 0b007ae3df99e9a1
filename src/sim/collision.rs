//! Collision and interaction resolution, run once per frame after the step
//!
//! Three passes in order: agent contacts, pickup claims, projectile hits.
//! Spent projectiles are marked during the hit pass and compacted afterwards,
//! so every projectile is evaluated exactly once per frame.

use super::config::RoundConfig;
use super::entity::Body;
use super::state::{EliminationCause, GameEvent, WorldState};

/// Run all interaction passes
pub fn resolve(world: &mut WorldState, config: &RoundConfig, events: &mut Vec<GameEvent>) {
    resolve_agent_contacts(world, config.contact_damage, events);
    resolve_pickups(world, events);
    resolve_projectile_hits(world, config.projectile_damage, events);
}

/// For each overlapping pair (i < j) of alive agents, agent j takes damage.
/// Damage is one-sided: the earlier agent in id order is never hurt by the pair.
pub fn resolve_agent_contacts(world: &mut WorldState, damage: u8, events: &mut Vec<GameEvent>) {
    let agents = &mut world.agents;
    for i in 0..agents.len() {
        for j in (i + 1)..agents.len() {
            let touching = {
                let (a, b) = (&agents[i], &agents[j]);
                a.alive && b.alive && a.overlaps(b)
            };
            if touching && agents[j].take_damage(damage) {
                let with = agents[i].id;
                let id = agents[j].id;
                log::debug!("Agent {} eliminated by contact with {}", id, with);
                events.push(GameEvent::Eliminated {
                    id,
                    cause: EliminationCause::Contact { with },
                });
            }
        }
    }
}

/// The human agent claims every unclaimed pickup it overlaps
pub fn resolve_pickups(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    let WorldState { agents, pickups, .. } = world;
    let Some(human) = agents.iter_mut().find(|a| a.is_human()) else {
        return;
    };
    if !human.alive {
        return;
    }

    for pickup in pickups.iter_mut() {
        if pickup.claimed || !human.overlaps(&*pickup) {
            continue;
        }
        if let Some(weapon) = pickup.claim() {
            human.weapon = Some(weapon);
            log::debug!("Agent {} picked up {}", human.id, weapon.label());
            events.push(GameEvent::WeaponClaimed {
                id: human.id,
                weapon,
            });
        }
    }
}

/// Projectiles damage every overlapping alive agent except their owner,
/// then are removed. A projectile may hit several agents in the same pass.
pub fn resolve_projectile_hits(world: &mut WorldState, damage: u8, events: &mut Vec<GameEvent>) {
    let WorldState {
        agents,
        projectiles,
        ..
    } = world;

    let mut spent = vec![false; projectiles.len()];

    for (shot, spent) in projectiles.iter().zip(spent.iter_mut()) {
        for agent in agents.iter_mut() {
            if !agent.alive || agent.id == shot.owner || !agent.overlaps(shot) {
                continue;
            }
            *spent = true;
            if agent.take_damage(damage) {
                log::debug!("Agent {} eliminated by agent {}", agent.id, shot.owner);
                events.push(GameEvent::Eliminated {
                    id: agent.id,
                    cause: EliminationCause::Projectile {
                        shooter: shot.owner,
                    },
                });
            }
        }
    }

    let mut flags = spent.into_iter();
    projectiles.retain(|_| !flags.next().unwrap_or(false));
}
