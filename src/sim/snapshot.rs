//! Per-frame exports for the presentation and UI layers

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Sprite};
use super::state::{RoundPhase, WorldState};
use crate::consts::AGENT_MAX_HEALTH;

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub arena: Vec2,
    pub storm_center: Vec2,
    pub storm_radius: f32,
    /// Drawable entities in draw order: agents, pickups, projectiles
    pub sprites: Vec<Sprite>,
    pub phase: RoundPhase,
}

impl FrameSnapshot {
    pub fn capture(world: &WorldState, phase: RoundPhase) -> Self {
        let sprites = world
            .agents
            .iter()
            .filter_map(Body::sprite)
            .chain(world.pickups.iter().filter_map(Body::sprite))
            .chain(world.projectiles.iter().filter_map(Body::sprite))
            .collect();

        Self {
            arena: world.arena,
            storm_center: world.storm.center,
            storm_radius: world.storm.radius,
            sprites,
            phase,
        }
    }
}

/// HUD values, recomputed once per frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReadout {
    pub alive: usize,
    /// Storm radius, floored
    pub storm_radius: u32,
    pub weapon: String,
    pub health: u8,
    pub phase: RoundPhase,
}

impl StatusReadout {
    pub fn capture(world: &WorldState, phase: RoundPhase) -> Self {
        let human = world.human();
        Self {
            alive: world.alive_count(),
            storm_radius: world.storm.radius.floor() as u32,
            weapon: human
                .and_then(|h| h.weapon)
                .map_or("None", |w| w.label())
                .to_string(),
            health: human.map_or(AGENT_MAX_HEALTH, |h| h.health),
            phase,
        }
    }

    /// End-of-round banner text, if the round is over
    pub fn banner(&self) -> Option<String> {
        match self.phase {
            RoundPhase::Ended { winner: Some(id) } => Some(format!("Player {} Wins!", id)),
            RoundPhase::Ended { winner: None } => Some("No survivors".to_string()),
            _ => None,
        }
    }
}
