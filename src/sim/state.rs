//! World state and round phases
//!
//! The world is rebuilt from scratch on every start/reset, never repaired.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::config::RoundConfig;
use super::entity::{Agent, Pickup, Projectile, WeaponKind};
use crate::consts::{HAZARD_SHRINK_RATE, HUMAN_ID};

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Before the first start; nothing spawned
    Lobby,
    /// Frame cycle running
    Running,
    /// At most one agent left; `winner` is the sole survivor if any
    Ended { winner: Option<u32> },
}

impl RoundPhase {
    pub fn is_running(&self) -> bool {
        matches!(self, RoundPhase::Running)
    }
}

/// What took an agent out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EliminationCause {
    Storm,
    /// Overlap with another agent
    Contact { with: u32 },
    Projectile { shooter: u32 },
}

/// Notable things that happened during a frame (for logging and the UI)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Eliminated { id: u32, cause: EliminationCause },
    WeaponClaimed { id: u32, weapon: WeaponKind },
    ShotFired { owner: u32 },
}

/// The shrinking safe circle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Storm {
    pub center: Vec2,
    pub radius: f32,
    /// Radius never shrinks below this
    pub min_radius: f32,
    /// Current shrink per frame (0 while toggled off)
    pub shrink_rate: f32,
    /// Rate restored when toggled back on
    pub default_rate: f32,
    /// Health lost per check outside the circle
    pub damage: u8,
}

impl Storm {
    pub fn new(center: Vec2, radius: f32, min_radius: f32, shrink_rate: f32, damage: u8) -> Self {
        Self {
            center,
            radius: radius.max(min_radius),
            min_radius,
            shrink_rate,
            // A storm that starts stopped still toggles on at the standard rate
            default_rate: if shrink_rate > 0.0 {
                shrink_rate
            } else {
                HAZARD_SHRINK_RATE
            },
            damage,
        }
    }

    pub fn from_config(config: &RoundConfig) -> Self {
        Self::new(
            config.arena_center(),
            config.hazard_start_radius,
            config.hazard_min_radius,
            config.hazard_shrink_rate,
            config.hazard_damage,
        )
    }

    /// Inside or exactly on the edge of the safe circle
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.distance(self.center) <= self.radius
    }

    pub fn shrink(&mut self) {
        self.radius = (self.radius - self.shrink_rate).max(self.min_radius);
    }

    pub fn is_shrinking(&self) -> bool {
        self.shrink_rate > 0.0
    }

    /// Flip between stopped and the default rate; returns whether it now shrinks
    pub fn toggle(&mut self) -> bool {
        self.shrink_rate = if self.is_shrinking() {
            0.0
        } else {
            self.default_rate
        };
        self.is_shrinking()
    }
}

/// Everything that changes during a round
#[derive(Debug, Clone)]
pub struct WorldState {
    pub arena: Vec2,
    /// Fixed for the round, ordered by id (index == id)
    pub agents: Vec<Agent>,
    pub pickups: Vec<Pickup>,
    pub projectiles: Vec<Projectile>,
    pub storm: Storm,
    spawn_margin: f32,
    pub(super) rng: Pcg32,
}

impl WorldState {
    /// An unpopulated world (lobby)
    pub fn empty(config: &RoundConfig, seed: u64) -> Self {
        Self {
            arena: config.arena_size(),
            agents: Vec::new(),
            pickups: Vec::new(),
            projectiles: Vec::new(),
            storm: Storm::from_config(config),
            spawn_margin: config.spawn_margin,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Build a fresh round: agents and pickups at random spawn points
    pub fn new(config: &RoundConfig, seed: u64) -> Self {
        let mut world = Self::empty(config, seed);

        for id in 0..config.agent_count as u32 {
            let pos = world.random_spawn_point();
            world.agents.push(Agent {
                radius: config.agent_radius,
                speed: config.agent_speed,
                ..Agent::new(id, pos)
            });
        }
        for _ in 0..config.pickup_count {
            world.spawn_pickup();
        }

        world
    }

    /// Uniform point inside the arena, `spawn_margin` away from every edge
    pub fn random_spawn_point(&mut self) -> Vec2 {
        let x = spawn_coordinate(&mut self.rng, self.spawn_margin, self.arena.x);
        let y = spawn_coordinate(&mut self.rng, self.spawn_margin, self.arena.y);
        Vec2::new(x, y)
    }

    /// Add one unclaimed pickup at a random spawn point
    pub fn spawn_pickup(&mut self) -> Vec2 {
        let pos = self.random_spawn_point();
        self.pickups.push(Pickup::new(pos));
        pos
    }

    pub fn human(&self) -> Option<&Agent> {
        self.agents.get(HUMAN_ID as usize)
    }

    pub fn human_mut(&mut self) -> Option<&mut Agent> {
        self.agents.get_mut(HUMAN_ID as usize)
    }

    pub fn alive_count(&self) -> usize {
        self.agents.iter().filter(|a| a.alive).count()
    }

    /// First alive agent in id order
    pub fn first_survivor(&self) -> Option<&Agent> {
        self.agents.iter().find(|a| a.alive)
    }
}

/// One spawn axis; an extent too small for both margins pins to its center
fn spawn_coordinate(rng: &mut Pcg32, margin: f32, extent: f32) -> f32 {
    let high = extent - margin;
    if high > margin {
        rng.random_range(margin..high)
    } else {
        extent / 2.0
    }
}
