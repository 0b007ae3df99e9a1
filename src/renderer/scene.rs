//! Frame tessellation
//!
//! Turns a [`FrameSnapshot`] into a triangle list in arena pixel coordinates
//! (origin top-left, y down). The pipeline maps pixels to clip space.

use glam::Vec2;

use super::shapes::{circle, rect, ring, rotated_rect};
use super::vertex::{Vertex, colors};
use crate::settings::Settings;
use crate::sim::{FrameSnapshot, Sprite};

/// Minimap edge length in pixels
pub const MINIMAP_SIZE: f32 = 100.0;
/// Gap between the minimap and the arena's top-right corner
pub const MINIMAP_MARGIN: f32 = 10.0;

const STORM_LINE_WIDTH: f32 = 2.0;
const GLOW_WIDTH: f32 = 4.0;
const MINIMAP_DOT_RADIUS: f32 = 2.0;

/// Health bar geometry relative to the agent center, before rotation
const HEALTH_BAR_OFFSET: Vec2 = Vec2::new(-15.0, -20.0);
const HEALTH_BAR_HEIGHT: f32 = 5.0;
/// Pixels of bar per point of health
const HEALTH_BAR_SCALE: f32 = 1.0 / 3.33;
const HEALTH_GOOD_ABOVE: u8 = 50;

/// Storm ring alpha at `time_ms`
pub fn storm_alpha(settings: &Settings, time_ms: f64) -> f32 {
    if settings.effective_hazard_pulse() {
        0.3 + 0.2 * (time_ms * 0.001).sin() as f32
    } else {
        colors::STORM_RING[3]
    }
}

pub fn health_color(health: u8) -> [f32; 4] {
    if health > HEALTH_GOOD_ABOVE {
        colors::HEALTH_GOOD
    } else {
        colors::HEALTH_LOW
    }
}

/// Build all vertices for one frame
pub fn build(frame: &FrameSnapshot, settings: &Settings, time_ms: f64) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(4096);

    let mut storm_color = colors::STORM_RING;
    storm_color[3] = storm_alpha(settings, time_ms);
    vertices.extend(ring(
        frame.storm_center,
        (frame.storm_radius - STORM_LINE_WIDTH / 2.0).max(0.0),
        frame.storm_radius + STORM_LINE_WIDTH / 2.0,
        storm_color,
        96,
    ));

    for sprite in &frame.sprites {
        match *sprite {
            Sprite::Agent {
                pos,
                radius,
                facing,
                health,
                ..
            } => {
                vertices.extend(ring(
                    pos,
                    radius,
                    radius + GLOW_WIDTH,
                    colors::AGENT_GLOW,
                    24,
                ));
                vertices.extend(circle(pos, radius, colors::AGENT, 24));
                if settings.health_bars {
                    let angle = if settings.reduced_motion { 0.0 } else { facing };
                    vertices.extend(rotated_rect(
                        pos,
                        HEALTH_BAR_OFFSET,
                        Vec2::new(health as f32 * HEALTH_BAR_SCALE, HEALTH_BAR_HEIGHT),
                        angle,
                        health_color(health),
                    ));
                }
            }
            Sprite::Pickup { pos, radius, .. } => {
                vertices.extend(circle(pos, radius, colors::PICKUP, 12));
            }
            Sprite::Projectile { pos, radius, .. } => {
                vertices.extend(circle(pos, radius, colors::PROJECTILE, 8));
            }
        }
    }

    if settings.show_minimap {
        minimap(frame, &mut vertices);
    }

    vertices
}

/// Top-left corner of the minimap inset
pub fn minimap_origin(arena: Vec2) -> Vec2 {
    Vec2::new(arena.x - MINIMAP_SIZE - MINIMAP_MARGIN, MINIMAP_MARGIN)
}

/// Arena position → minimap position, centered on the arena center
pub fn to_minimap(arena: Vec2, pos: Vec2) -> Vec2 {
    let scale = MINIMAP_SIZE / arena.max_element();
    let center = minimap_origin(arena) + Vec2::splat(MINIMAP_SIZE / 2.0);
    center + (pos - arena / 2.0) * scale
}

fn minimap(frame: &FrameSnapshot, vertices: &mut Vec<Vertex>) {
    let origin = minimap_origin(frame.arena);
    let scale = MINIMAP_SIZE / frame.arena.max_element();

    vertices.extend(rect(origin, Vec2::splat(MINIMAP_SIZE), colors::MINIMAP_BG));

    for sprite in &frame.sprites {
        if let Sprite::Agent { pos, human, .. } = *sprite {
            let color = if human {
                colors::MINIMAP_HUMAN
            } else {
                colors::MINIMAP_AGENT
            };
            vertices.extend(circle(
                to_minimap(frame.arena, pos),
                MINIMAP_DOT_RADIUS,
                color,
                8,
            ));
        }
    }

    // No clipping in the inset, so the outline is capped at its edge
    let radius = (frame.storm_radius * scale).min(MINIMAP_SIZE / 2.0);
    vertices.extend(ring(
        to_minimap(frame.arena, frame.storm_center),
        (radius - 0.5).max(0.0),
        radius + 0.5,
        colors::MINIMAP_STORM,
        48,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{RoundConfig, RoundPhase, WeaponKind};

    fn frame(sprites: Vec<Sprite>) -> FrameSnapshot {
        FrameSnapshot {
            arena: Vec2::new(800.0, 600.0),
            storm_center: Vec2::new(400.0, 300.0),
            storm_radius: 500.0,
            sprites,
            phase: RoundPhase::Running,
        }
    }

    fn bare() -> Settings {
        Settings {
            show_minimap: false,
            health_bars: false,
            hazard_pulse: false,
            reduced_motion: false,
        }
    }

    #[test]
    fn test_empty_frame_draws_only_storm() {
        let verts = build(&frame(vec![]), &bare(), 0.0);
        assert_eq!(verts.len(), 96 * 6);
    }

    #[test]
    fn test_sprites_add_geometry() {
        let sprites = vec![
            Sprite::Pickup {
                pos: Vec2::new(50.0, 50.0),
                radius: 5.0,
                weapon: WeaponKind::Rifle,
            },
            Sprite::Projectile {
                pos: Vec2::new(60.0, 60.0),
                radius: 3.0,
                owner: 0,
            },
        ];
        let verts = build(&frame(sprites), &bare(), 0.0);
        assert_eq!(verts.len(), 96 * 6 + 12 * 3 + 8 * 3);
        assert!(verts.iter().any(|v| v.color == colors::PICKUP));
        assert!(verts.iter().any(|v| v.color == colors::PROJECTILE));
    }

    #[test]
    fn test_health_bar_color_threshold() {
        assert_eq!(health_color(51), colors::HEALTH_GOOD);
        assert_eq!(health_color(50), colors::HEALTH_LOW);
        assert_eq!(health_color(0), colors::HEALTH_LOW);
    }

    #[test]
    fn test_health_bar_width_tracks_health() {
        let settings = Settings {
            health_bars: true,
            ..bare()
        };
        let agent = Sprite::Agent {
            id: 0,
            pos: Vec2::new(100.0, 100.0),
            radius: 10.0,
            facing: 0.0,
            health: 100,
            human: true,
        };
        let verts = build(&frame(vec![agent]), &settings, 0.0);
        let bar: Vec<_> = verts
            .iter()
            .filter(|v| v.color == colors::HEALTH_GOOD)
            .collect();
        assert_eq!(bar.len(), 6);
        let min_x = bar.iter().map(|v| v.position[0]).fold(f32::MAX, f32::min);
        let max_x = bar.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        assert!((min_x - 85.0).abs() < 1e-3);
        assert!((max_x - min_x - 100.0 / 3.33).abs() < 1e-3);
    }

    #[test]
    fn test_storm_pulse() {
        let pulsing = Settings {
            hazard_pulse: true,
            ..bare()
        };
        assert_eq!(storm_alpha(&bare(), 1234.0), 0.3);
        assert!((storm_alpha(&pulsing, 0.0) - 0.3).abs() < 1e-6);
        let peak = std::f64::consts::FRAC_PI_2 * 1000.0;
        assert!((storm_alpha(&pulsing, peak) - 0.5).abs() < 1e-4);

        let calm = Settings {
            reduced_motion: true,
            ..pulsing
        };
        assert_eq!(storm_alpha(&calm, peak), 0.3);
    }

    #[test]
    fn test_minimap_mapping() {
        let arena = Vec2::new(800.0, 600.0);
        let origin = minimap_origin(arena);
        assert_eq!(origin, Vec2::new(690.0, 10.0));
        assert_eq!(to_minimap(arena, Vec2::new(400.0, 300.0)), Vec2::new(740.0, 60.0));
        // Scale is 100 / 800 on both axes
        assert_eq!(to_minimap(arena, Vec2::new(800.0, 300.0)), Vec2::new(790.0, 60.0));
        assert_eq!(to_minimap(arena, Vec2::new(400.0, 0.0)), Vec2::new(740.0, 22.5));
    }

    #[test]
    fn test_minimap_marks_human() {
        let settings = Settings {
            show_minimap: true,
            ..bare()
        };
        let config = RoundConfig::default();
        let world = crate::sim::WorldState::new(&config, 5);
        let snapshot = FrameSnapshot::capture(&world, RoundPhase::Running);
        let verts = build(&snapshot, &settings, 0.0);
        let human_dots = verts
            .iter()
            .filter(|v| v.color == colors::MINIMAP_HUMAN)
            .count();
        assert_eq!(human_dots, 8 * 3);
        assert!(verts.iter().any(|v| v.color == colors::MINIMAP_BG));
    }
}
