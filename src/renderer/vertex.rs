//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const AGENT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const AGENT_GLOW: [f32; 4] = [1.0, 1.0, 1.0, 0.25];
    pub const HEALTH_GOOD: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const HEALTH_LOW: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const PICKUP: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const PROJECTILE: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const STORM_RING: [f32; 4] = [1.0, 1.0, 1.0, 0.3];
    pub const MINIMAP_BG: [f32; 4] = [1.0, 1.0, 1.0, 0.1];
    pub const MINIMAP_HUMAN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const MINIMAP_AGENT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const MINIMAP_STORM: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}
