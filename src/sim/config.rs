//! Round tunables
//!
//! Everything a round is built from. `Default` uses the fixed values in
//! [`crate::consts`]; tests build smaller or harsher rounds by overriding fields.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundConfig {
    pub arena_width: f32,
    pub arena_height: f32,
    pub agent_count: usize,
    pub pickup_count: usize,
    pub spawn_margin: f32,

    pub agent_radius: f32,
    pub agent_speed: f32,
    pub wander_speed_factor: f32,
    pub autonomous_fire_chance: f64,

    pub hazard_start_radius: f32,
    pub hazard_min_radius: f32,
    pub hazard_shrink_rate: f32,
    pub hazard_damage: u8,
    /// Autonomous agents take storm damage while wandering.
    /// Off: only the human's directional moves are checked against the storm.
    #[serde(default)]
    pub hazard_hits_autonomous: bool,

    pub contact_damage: u8,
    pub projectile_damage: u8,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            agent_count: AGENT_COUNT,
            pickup_count: PICKUP_COUNT,
            spawn_margin: SPAWN_MARGIN,

            agent_radius: AGENT_RADIUS,
            agent_speed: AGENT_SPEED,
            wander_speed_factor: WANDER_SPEED_FACTOR,
            autonomous_fire_chance: AUTONOMOUS_FIRE_CHANCE,

            hazard_start_radius: HAZARD_START_RADIUS,
            hazard_min_radius: HAZARD_MIN_RADIUS,
            hazard_shrink_rate: HAZARD_SHRINK_RATE,
            hazard_damage: HAZARD_DAMAGE,
            hazard_hits_autonomous: false,

            contact_damage: CONTACT_DAMAGE,
            projectile_damage: PROJECTILE_DAMAGE,
        }
    }
}

impl RoundConfig {
    pub fn arena_size(&self) -> Vec2 {
        Vec2::new(self.arena_width, self.arena_height)
    }

    pub fn arena_center(&self) -> Vec2 {
        self.arena_size() / 2.0
    }

    /// Per-frame fire probability, clamped to [0, 1]; non-finite values disable firing
    pub fn fire_chance(&self) -> f64 {
        if self.autonomous_fire_chance.is_finite() {
            self.autonomous_fire_chance.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_chance_is_a_valid_probability() {
        let with = |chance| RoundConfig {
            autonomous_fire_chance: chance,
            ..Default::default()
        };
        assert_eq!(with(0.01).fire_chance(), 0.01);
        assert_eq!(with(3.0).fire_chance(), 1.0);
        assert_eq!(with(-1.0).fire_chance(), 0.0);
        assert_eq!(with(f64::NAN).fire_chance(), 0.0);
        assert_eq!(with(f64::INFINITY).fire_chance(), 0.0);
    }

    #[test]
    fn test_defaults_match_constants() {
        let config = RoundConfig::default();
        assert_eq!(config.agent_count, 10);
        assert_eq!(config.pickup_count, 5);
        assert_eq!(config.hazard_start_radius, 500.0);
        assert_eq!(config.arena_center(), Vec2::new(400.0, 300.0));
        assert!(!config.hazard_hits_autonomous);
    }

    #[test]
    fn test_missing_flag_deserializes_off() {
        let mut json = serde_json::to_value(RoundConfig::default()).unwrap();
        json.as_object_mut().unwrap().remove("hazard_hits_autonomous");
        let config: RoundConfig = serde_json::from_value(json).unwrap();
        assert!(!config.hazard_hits_autonomous);
    }
}
