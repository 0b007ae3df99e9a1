//! Storm Royale - A shrinking-storm arena survival game
//!
//! Core modules:
//! - `sim`: Simulation core (agents, pickups, projectiles, storm, round control)
//! - `renderer`: WebGPU rendering of frame snapshots
//! - `platform`: Browser DOM helpers and setup errors
//! - `settings`: Player presentation preferences

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use platform::PlatformError;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (pixels, origin top-left, y down)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Round population
    pub const AGENT_COUNT: usize = 10;
    pub const PICKUP_COUNT: usize = 5;
    /// Id of the human-controlled agent
    pub const HUMAN_ID: u32 = 0;
    /// Spawned entities keep this far from the arena edges
    pub const SPAWN_MARGIN: f32 = 20.0;

    /// Agent defaults
    pub const AGENT_RADIUS: f32 = 10.0;
    pub const AGENT_SPEED: f32 = 4.0;
    pub const AGENT_MAX_HEALTH: u8 = 100;
    /// Autonomous agents wander at this fraction of their speed
    pub const WANDER_SPEED_FACTOR: f32 = 0.5;
    /// Per-frame chance that an armed autonomous agent fires
    pub const AUTONOMOUS_FIRE_CHANCE: f64 = 0.01;
    /// Facing change per horizontal move (radians)
    pub const FACING_TURN: f32 = 0.1;
    /// Facing spin applied every frame to alive agents (radians)
    pub const FACING_SPIN: f32 = 0.05;

    /// Pickup defaults
    pub const PICKUP_RADIUS: f32 = 5.0;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f32 = 3.0;
    pub const PROJECTILE_SPEED: f32 = 10.0;

    /// Damage amounts
    pub const HAZARD_DAMAGE: u8 = 1;
    pub const CONTACT_DAMAGE: u8 = 10;
    pub const PROJECTILE_DAMAGE: u8 = 20;

    /// Storm (hazard zone)
    pub const HAZARD_START_RADIUS: f32 = 500.0;
    pub const HAZARD_MIN_RADIUS: f32 = 50.0;
    pub const HAZARD_SHRINK_RATE: f32 = 0.5;
}

/// Unit vector for a heading angle (radians, y down)
#[inline]
pub fn heading_vector(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Clamp a circle's center so the whole circle stays inside a `size` rectangle
#[inline]
pub fn clamp_to_arena(pos: Vec2, radius: f32, size: Vec2) -> Vec2 {
    Vec2::new(
        pos.x.max(radius).min(size.x - radius),
        pos.y.max(radius).min(size.y - radius),
    )
}

/// Whether a point lies inside the `size` rectangle (edges inclusive)
#[inline]
pub fn in_arena(pos: Vec2, size: Vec2) -> bool {
    pos.x >= 0.0 && pos.x <= size.x && pos.y >= 0.0 && pos.y <= size.y
}
