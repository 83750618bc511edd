// Procedural particle cloud for a single firework burst
use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, MeshVertexAttribute, PrimitiveTopology};
use bevy::render::render_resource::VertexFormat;
use rand::Rng;
use std::f32::consts::PI;
use crate::constants::SHELL_JITTER;
use crate::math_utils::spherical_to_cartesian;

/// Per-particle size multiplier, [0, 1)
pub const ATTRIBUTE_PARTICLE_SIZE: MeshVertexAttribute =
    MeshVertexAttribute::new("Firework_ParticleSize", 988_540_917, VertexFormat::Float32);

/// Per-particle time multiplier, [1, 2). Desynchronizes each sprite's fade against the shared progress.
pub const ATTRIBUTE_TIME_MULTIPLIER: MeshVertexAttribute =
    MeshVertexAttribute::new("Firework_TimeMultiplier", 988_540_918, VertexFormat::Float32);

// Sprite corners as UVs, top-left origin (no vertical flip)
const QUAD_CORNERS: [[f32; 2]; 4] = [
    [0.0, 1.0],
    [1.0, 1.0],
    [1.0, 0.0],
    [0.0, 0.0],
];

/// Three parallel per-particle buffers, all `count` long.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleCloud {
    pub positions: Vec<Vec3>,
    pub sizes: Vec<f32>,
    pub time_multipliers: Vec<f32>,
}

impl ParticleCloud {
    /// Samples `count` particles on a spherical shell around the local origin.
    ///
    /// Shell radius is jittered to `radius * [0.75, 1.0)`; polar and azimuth angles are
    /// drawn uniformly, which clusters particles slightly towards the poles.
    pub fn generate(count: usize, radius: f32, rng: &mut impl Rng) -> Self {
        let mut positions = Vec::with_capacity(count);
        let mut sizes = Vec::with_capacity(count);
        let mut time_multipliers = Vec::with_capacity(count);

        for _ in 0..count {
            let shell_radius = radius * ((1.0 - SHELL_JITTER) + rng.gen::<f32>() * SHELL_JITTER);
            let phi = PI * rng.gen::<f32>();
            let theta = 2.0 * PI * rng.gen::<f32>();
            positions.push(spherical_to_cartesian(shell_radius, phi, theta));

            sizes.push(rng.gen::<f32>());
            time_multipliers.push(1.0 + rng.gen::<f32>());
        }

        Self { positions, sizes, time_multipliers }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Expands every particle into a camera-facing quad. All four corners share the
    /// particle centre; the vertex shader spreads them out in clip space.
    pub fn to_mesh(&self) -> Mesh {
        let vertex_count = self.len() * QUAD_CORNERS.len();
        let mut positions = Vec::with_capacity(vertex_count);
        let mut uvs = Vec::with_capacity(vertex_count);
        let mut sizes = Vec::with_capacity(vertex_count);
        let mut time_multipliers = Vec::with_capacity(vertex_count);
        let mut indices = Vec::with_capacity(self.len() * 6);

        for i in 0..self.len() {
            for corner in QUAD_CORNERS {
                positions.push(self.positions[i].to_array());
                uvs.push(corner);
                sizes.push(self.sizes[i]);
                time_multipliers.push(self.time_multipliers[i]);
            }

            let base = (i * QUAD_CORNERS.len()) as u32;
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::RENDER_WORLD)
            .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
            .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
            .with_inserted_attribute(ATTRIBUTE_PARTICLE_SIZE, sizes)
            .with_inserted_attribute(ATTRIBUTE_TIME_MULTIPLIER, time_multipliers)
            .with_inserted_indices(Indices::U32(indices))
    }
}
