//! Entity models: agents, weapon pickups, and projectiles
//!
//! Every entity is a circle in arena space. Shared behavior (overlap tests,
//! render-state export) goes through the [`Body`] trait; the drawable side is
//! the closed [`Sprite`] set.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Storm;
use crate::consts::*;
use crate::{clamp_to_arena, heading_vector, in_arena};

/// Discrete movement commands for the human agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit displacement in screen space (y down)
    pub fn delta(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::NEG_Y,
            Direction::Down => Vec2::Y,
            Direction::Left => Vec2::NEG_X,
            Direction::Right => Vec2::X,
        }
    }

    /// Facing change caused by moving this way
    pub fn facing_turn(self) -> f32 {
        match self {
            Direction::Left => -FACING_TURN,
            Direction::Right => FACING_TURN,
            Direction::Up | Direction::Down => 0.0,
        }
    }
}

/// Weapon types granted by pickups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeaponKind {
    #[default]
    Rifle,
}

impl WeaponKind {
    pub fn label(&self) -> &'static str {
        match self {
            WeaponKind::Rifle => "Rifle",
        }
    }
}

/// Drawable state of one entity, handed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Sprite {
    Agent {
        id: u32,
        pos: Vec2,
        radius: f32,
        facing: f32,
        health: u8,
        human: bool,
    },
    Pickup {
        pos: Vec2,
        radius: f32,
        weapon: WeaponKind,
    },
    Projectile {
        pos: Vec2,
        radius: f32,
        owner: u32,
    },
}

/// A circular body in the arena
pub trait Body {
    fn pos(&self) -> Vec2;
    fn radius(&self) -> f32;

    /// Current drawable state, `None` when the entity is not drawn
    fn sprite(&self) -> Option<Sprite>;

    /// Strict circle overlap (touching circles do not overlap)
    fn overlaps(&self, other: &impl Body) -> bool
    where
        Self: Sized,
    {
        self.pos().distance(other.pos()) < self.radius() + other.radius()
    }
}

/// One combatant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    /// Facing angle in radians, never normalized
    pub facing: f32,
    pub alive: bool,
    pub health: u8,
    pub weapon: Option<WeaponKind>,
}

impl Agent {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            radius: AGENT_RADIUS,
            speed: AGENT_SPEED,
            facing: 0.0,
            alive: true,
            health: AGENT_MAX_HEALTH,
            weapon: None,
        }
    }

    pub fn is_human(&self) -> bool {
        self.id == HUMAN_ID
    }

    /// Subtract health; returns true if this call eliminated the agent
    pub fn take_damage(&mut self, amount: u8) -> bool {
        if !self.alive {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.alive = false;
            return true;
        }
        false
    }

    /// Directional move followed by the storm check on the new position.
    /// Returns true if the storm eliminated the agent.
    pub fn move_in(&mut self, direction: Direction, arena: Vec2, storm: &Storm) -> bool {
        if !self.alive {
            return false;
        }
        self.pos += direction.delta() * self.speed;
        self.facing += direction.facing_turn();
        self.pos = clamp_to_arena(self.pos, self.radius, arena);
        self.apply_storm(storm)
    }

    /// Random-walk displacement along `heading` at a fraction of full speed
    pub fn wander(&mut self, heading: f32, speed_factor: f32, arena: Vec2) {
        if !self.alive {
            return;
        }
        self.pos += heading_vector(heading) * self.speed * speed_factor;
        self.pos = clamp_to_arena(self.pos, self.radius, arena);
    }

    /// Storm damage if outside the safe radius; true if it eliminated the agent
    pub fn apply_storm(&mut self, storm: &Storm) -> bool {
        if self.alive && !storm.contains(self.pos) {
            return self.take_damage(storm.damage);
        }
        false
    }

    /// Idle facing rotation
    pub fn spin(&mut self, amount: f32) {
        if self.alive {
            self.facing += amount;
        }
    }

    /// Fire one shot along the facing angle if alive and armed
    pub fn shoot(&self) -> Option<Projectile> {
        if !self.alive || self.weapon.is_none() {
            return None;
        }
        Some(Projectile::new(self.pos, self.facing, self.id))
    }
}

impl Body for Agent {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn sprite(&self) -> Option<Sprite> {
        self.alive.then(|| Sprite::Agent {
            id: self.id,
            pos: self.pos,
            radius: self.radius,
            facing: self.facing,
            health: self.health,
            human: self.is_human(),
        })
    }
}

/// A weapon spawn point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub pos: Vec2,
    pub radius: f32,
    pub weapon: WeaponKind,
    pub claimed: bool,
}

impl Pickup {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: PICKUP_RADIUS,
            weapon: WeaponKind::Rifle,
            claimed: false,
        }
    }

    /// Mark claimed and hand out the weapon; `None` if already taken
    pub fn claim(&mut self) -> Option<WeaponKind> {
        if self.claimed {
            return None;
        }
        self.claimed = true;
        Some(self.weapon)
    }
}

impl Body for Pickup {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn sprite(&self) -> Option<Sprite> {
        (!self.claimed).then(|| Sprite::Pickup {
            pos: self.pos,
            radius: self.radius,
            weapon: self.weapon,
        })
    }
}

/// A fired shot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub heading: f32,
    pub speed: f32,
    pub owner: u32,
    pub radius: f32,
}

impl Projectile {
    pub fn new(pos: Vec2, heading: f32, owner: u32) -> Self {
        Self {
            pos,
            heading,
            speed: PROJECTILE_SPEED,
            owner,
            radius: PROJECTILE_RADIUS,
        }
    }

    pub fn advance(&mut self) {
        self.pos += heading_vector(self.heading) * self.speed;
    }

    /// Still inside the arena rectangle (edges count as inside)
    pub fn in_bounds(&self, arena: Vec2) -> bool {
        in_arena(self.pos, arena)
    }
}

impl Body for Projectile {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn sprite(&self) -> Option<Sprite> {
        Some(Sprite::Projectile {
            pos: self.pos,
            radius: self.radius,
            owner: self.owner,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARENA: Vec2 = Vec2::new(ARENA_WIDTH, ARENA_HEIGHT);

    fn calm_storm() -> Storm {
        Storm::new(ARENA / 2.0, HAZARD_START_RADIUS, HAZARD_MIN_RADIUS, HAZARD_SHRINK_RATE, HAZARD_DAMAGE)
    }

    #[test]
    fn test_move_clamps_to_arena() {
        let mut agent = Agent::new(0, Vec2::new(12.0, 300.0));
        agent.move_in(Direction::Left, ARENA, &calm_storm());
        assert_eq!(agent.pos, Vec2::new(AGENT_RADIUS, 300.0));
        assert!((agent.facing + FACING_TURN).abs() < 1e-6);
    }

    #[test]
    fn test_move_inside_storm_is_free() {
        let mut agent = Agent::new(0, Vec2::new(400.0, 300.0));
        agent.move_in(Direction::Up, ARENA, &calm_storm());
        assert_eq!(agent.pos, Vec2::new(400.0, 296.0));
        assert_eq!(agent.health, AGENT_MAX_HEALTH);
        assert_eq!(agent.facing, 0.0);
    }

    #[test]
    fn test_move_outside_storm_costs_health() {
        let storm = Storm::new(ARENA / 2.0, 100.0, HAZARD_MIN_RADIUS, 0.0, HAZARD_DAMAGE);
        let mut agent = Agent::new(0, Vec2::new(20.0, 20.0));
        agent.move_in(Direction::Right, ARENA, &storm);
        assert_eq!(agent.health, AGENT_MAX_HEALTH - 1);
        assert!(agent.alive);
    }

    #[test]
    fn test_storm_eliminates_at_zero() {
        let storm = Storm::new(ARENA / 2.0, 100.0, HAZARD_MIN_RADIUS, 0.0, HAZARD_DAMAGE);
        let mut agent = Agent::new(0, Vec2::new(20.0, 20.0));
        agent.health = 1;
        assert!(agent.move_in(Direction::Down, ARENA, &storm));
        assert!(!agent.alive);
        assert_eq!(agent.health, 0);

        // Dead agents no longer move
        let pos = agent.pos;
        agent.move_in(Direction::Down, ARENA, &storm);
        assert_eq!(agent.pos, pos);
    }

    #[test]
    fn test_damage_saturates() {
        let mut agent = Agent::new(3, Vec2::ZERO);
        agent.health = 5;
        assert!(agent.take_damage(PROJECTILE_DAMAGE));
        assert_eq!(agent.health, 0);
        assert!(!agent.take_damage(PROJECTILE_DAMAGE));
    }

    #[test]
    fn test_shoot_requires_weapon_and_life() {
        let mut agent = Agent::new(2, Vec2::new(100.0, 100.0));
        assert!(agent.shoot().is_none());

        agent.weapon = Some(WeaponKind::Rifle);
        agent.facing = 1.0;
        let shot = agent.shoot().unwrap();
        assert_eq!(shot.owner, 2);
        assert_eq!(shot.pos, agent.pos);
        assert_eq!(shot.heading, 1.0);

        agent.alive = false;
        assert!(agent.shoot().is_none());
    }

    #[test]
    fn test_pickup_claims_once() {
        let mut pickup = Pickup::new(Vec2::new(50.0, 50.0));
        assert!(pickup.sprite().is_some());
        assert_eq!(pickup.claim(), Some(WeaponKind::Rifle));
        assert_eq!(pickup.claim(), None);
        assert!(pickup.claimed);
        assert!(pickup.sprite().is_none());
    }

    #[test]
    fn test_projectile_advance() {
        let mut shot = Projectile::new(Vec2::new(100.0, 100.0), 0.0, 1);
        shot.advance();
        assert!((shot.pos - Vec2::new(110.0, 100.0)).length() < 1e-4);
    }

    #[test]
    fn test_overlap_is_strict() {
        let a = Agent::new(0, Vec2::new(100.0, 100.0));
        let b = Agent::new(1, Vec2::new(120.0, 100.0));
        assert!(!a.overlaps(&b));
        let c = Agent::new(2, Vec2::new(119.0, 100.0));
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_dead_agent_has_no_sprite() {
        let mut agent = Agent::new(1, Vec2::new(10.0, 10.0));
        assert!(matches!(agent.sprite(), Some(Sprite::Agent { human: false, .. })));
        agent.alive = false;
        assert!(agent.sprite().is_none());
    }
}
