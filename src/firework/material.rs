// Point-sprite material shared by every firework burst
use bevy::pbr::{MaterialPipeline, MaterialPipelineKey};
use bevy::prelude::*;
use bevy::render::mesh::MeshVertexBufferLayoutRef;
use bevy::render::render_resource::{
    AsBindGroup, BlendComponent, BlendFactor, BlendOperation, BlendState, RenderPipelineDescriptor,
    ShaderRef, SpecializedMeshPipelineError,
};
use super::particles::{ATTRIBUTE_PARTICLE_SIZE, ATTRIBUTE_TIME_MULTIPLIER};

/// Additive, depth-non-writing sprite material.
/// `progress` drives the burst, fall, shrink and twinkle animation in the vertex shader.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct FireworkMaterial {
    #[uniform(0)]
    pub color: LinearRgba,
    #[uniform(0)]
    pub resolution: Vec2,         // Render resolution in physical pixels
    #[uniform(0)]
    pub size: f32,                // Base sprite size
    #[uniform(0)]
    pub progress: f32,            // 0 at spawn, 1 at despawn

    #[texture(1)]
    #[sampler(2)]
    pub texture: Handle<Image>,
}

impl FireworkMaterial {
    pub fn new(color: Color, size: f32, resolution: Vec2, texture: Handle<Image>) -> Self {
        Self {
            color: color.to_linear(),
            resolution,
            size,
            progress: 0.0,
            texture,
        }
    }
}

impl Material for FireworkMaterial {
    fn vertex_shader() -> ShaderRef {
        "shaders/firework.wgsl".into()
    }

    fn fragment_shader() -> ShaderRef {
        "shaders/firework.wgsl".into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Add
    }

    fn opaque_render_method(&self) -> bevy::pbr::OpaqueRendererMethod {
        bevy::pbr::OpaqueRendererMethod::Forward
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        let vertex_layout = layout.0.get_layout(&[
            Mesh::ATTRIBUTE_POSITION.at_shader_location(0),
            Mesh::ATTRIBUTE_UV_0.at_shader_location(1),
            ATTRIBUTE_PARTICLE_SIZE.at_shader_location(2),
            ATTRIBUTE_TIME_MULTIPLIER.at_shader_location(3),
        ])?;
        descriptor.vertex.buffers = vec![vertex_layout];
        descriptor.primitive.cull_mode = None;

        // Overlapping sprites brighten instead of occluding: src * src.a + dst
        if let Some(ref mut fragment) = descriptor.fragment {
            for target in fragment.targets.iter_mut().flatten() {
                target.blend = Some(BlendState {
                    color: BlendComponent {
                        src_factor: BlendFactor::SrcAlpha,
                        dst_factor: BlendFactor::One,
                        operation: BlendOperation::Add,
                    },
                    alpha: BlendComponent {
                        src_factor: BlendFactor::One,
                        dst_factor: BlendFactor::One,
                        operation: BlendOperation::Add,
                    },
                });
            }
        }
        if let Some(depth_stencil) = descriptor.depth_stencil.as_mut() {
            depth_stencil.depth_write_enabled = false;
        }
        Ok(())
    }
}
