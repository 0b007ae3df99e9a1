//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - One explicit frame step, driven by the host
//! - Seeded RNG only
//! - Stable iteration order (agents by id)

pub mod collision;
pub mod config;
pub mod entity;
pub mod round;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use config::RoundConfig;
pub use entity::{Agent, Body, Direction, Pickup, Projectile, Sprite, WeaponKind};
pub use round::{Command, FrameReport, RoundController};
pub use snapshot::{FrameSnapshot, StatusReadout};
pub use state::{EliminationCause, GameEvent, RoundPhase, Storm, WorldState};
