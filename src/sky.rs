// Analytic sky dome (Preetham-style daylight scattering)
use bevy::pbr::{MaterialPipeline, MaterialPipelineKey, MaterialPlugin, NotShadowCaster, NotShadowReceiver};
use bevy::prelude::*;
use bevy::render::mesh::MeshVertexBufferLayoutRef;
use bevy::render::render_resource::{
    AsBindGroup, RenderPipelineDescriptor, ShaderRef, SpecializedMeshPipelineError,
};
use bevy::render::view::NoFrustumCulling;
use bevy::window::RequestRedraw;
use crate::constants::*;
use crate::math_utils::spherical_to_cartesian;

// Scattering model constants
const TOTAL_RAYLEIGH: Vec3 = Vec3::new(5.804_542_996_261_093e-6, 1.356_291_141_984_563_5e-5, 3.026_590_246_882_487_6e-5);
const MIE_CONST: Vec3 = Vec3::new(1.839_991_851_443_397_8e14, 2.779_802_391_966_052_8e14, 4.079_047_954_386_109_4e14);
const CUTOFF_ANGLE: f32 = 1.611_073_155_687_073_4;
const STEEPNESS: f32 = 1.5;
const SUN_ENERGY: f32 = 1000.0;

pub struct SkyPlugin;

impl Plugin for SkyPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<SkyMaterial> {
            prepass_enabled: false,
            shadows_enabled: false,
            ..default()
        });
        add_sky_systems(app);
    }
}

/// Parameters and systems without the GPU material registration
pub fn add_sky_systems(app: &mut App) {
    app.init_resource::<SkyParameters>()
        .add_systems(Startup, setup_sky)
        .add_systems(Update, apply_sky_parameters.run_if(resource_changed::<SkyParameters>));
}

/// Sky controls edited from the debug panel. Angles are in degrees.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SkyParameters {
    pub turbidity: f32,
    pub rayleigh: f32,
    pub mie_coefficient: f32,
    pub mie_directional_g: f32,
    pub elevation: f32,
    pub azimuth: f32,
    pub exposure: f32,
}

impl Default for SkyParameters {
    fn default() -> Self {
        Self {
            turbidity: SKY_DEFAULT_TURBIDITY,
            rayleigh: SKY_DEFAULT_RAYLEIGH,
            mie_coefficient: SKY_DEFAULT_MIE_COEFFICIENT,
            mie_directional_g: SKY_DEFAULT_MIE_DIRECTIONAL_G,
            elevation: SKY_DEFAULT_ELEVATION,
            azimuth: SKY_DEFAULT_AZIMUTH,
            exposure: SKY_DEFAULT_EXPOSURE,
        }
    }
}

impl SkyParameters {
    /// Unit vector towards the sun. Elevation is measured up from the horizon,
    /// so the polar angle is `90° - elevation`.
    pub fn sun_direction(&self) -> Vec3 {
        let phi = (90.0 - self.elevation).to_radians();
        let theta = self.azimuth.to_radians();
        spherical_to_cartesian(1.0, phi, theta)
    }
}

/// Marker for the sky dome entity
#[derive(Component)]
pub struct SkyDome;

/// Sky dome material. The per-vertex terms of the scattering model only depend on
/// the parameters, so they are computed on the CPU and uploaded as uniforms.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone, PartialEq)]
pub struct SkyMaterial {
    #[uniform(0)]
    pub sun_direction: Vec3,
    #[uniform(0)]
    pub sun_intensity: f32,
    #[uniform(0)]
    pub beta_rayleigh: Vec3,
    #[uniform(0)]
    pub sun_fade: f32,
    #[uniform(0)]
    pub beta_mie: Vec3,
    #[uniform(0)]
    pub mie_directional_g: f32,
    #[uniform(0)]
    pub exposure: f32,
}

impl SkyMaterial {
    pub fn from_parameters(params: &SkyParameters) -> Self {
        let sun_direction = params.sun_direction();
        let sun_fade = 1.0 - (1.0 - (sun_direction.y / SKY_SCALE).exp()).clamp(0.0, 1.0);
        let rayleigh_coefficient = params.rayleigh - (1.0 - sun_fade);

        Self {
            sun_direction,
            sun_intensity: sun_intensity(sun_direction.dot(Vec3::Y)),
            beta_rayleigh: TOTAL_RAYLEIGH * rayleigh_coefficient,
            sun_fade,
            beta_mie: total_mie(params.turbidity) * params.mie_coefficient,
            mie_directional_g: params.mie_directional_g,
            exposure: params.exposure,
        }
    }
}

/// Sun energy reaching the atmosphere; falls to zero once the sun is past the cutoff below the horizon.
fn sun_intensity(zenith_angle_cos: f32) -> f32 {
    let zenith_angle = zenith_angle_cos.clamp(-1.0, 1.0).acos();
    SUN_ENERGY * (1.0 - (-(CUTOFF_ANGLE - zenith_angle) / STEEPNESS).exp()).max(0.0)
}

fn total_mie(turbidity: f32) -> Vec3 {
    let concentration = 0.2 * turbidity * 10e-18;
    0.434 * concentration * MIE_CONST
}

impl Material for SkyMaterial {
    fn vertex_shader() -> ShaderRef {
        "shaders/sky.wgsl".into()
    }

    fn fragment_shader() -> ShaderRef {
        "shaders/sky.wgsl".into()
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
        let vertex_layout = layout.0.get_layout(&[Mesh::ATTRIBUTE_POSITION.at_shader_location(0)])?;
        descriptor.vertex.buffers = vec![vertex_layout];

        // Viewed from inside; the shader pins every fragment to the far plane
        descriptor.primitive.cull_mode = None;
        if let Some(depth_stencil) = descriptor.depth_stencil.as_mut() {
            depth_stencil.depth_write_enabled = false;
        }
        Ok(())
    }
}

fn setup_sky(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut sky_materials: ResMut<Assets<SkyMaterial>>,
    params: Res<SkyParameters>,
) {
    let material = sky_materials.add(SkyMaterial::from_parameters(&params));

    commands.spawn((
        Mesh3d(meshes.add(Cuboid::default())),
        MeshMaterial3d(material),
        Transform::from_scale(Vec3::splat(SKY_SCALE)),
        NotShadowCaster,
        NotShadowReceiver,
        NoFrustumCulling,
        SkyDome,
        Name::new("SkyDome"),
    ));

    info!("🌅 Sky dome spawned (sun direction {:?})", params.sun_direction());
}

/// Pushes the current parameters into the sky material and asks for a redraw,
/// so edits show up even when the window is not redrawing continuously.
pub fn apply_sky_parameters(
    params: Res<SkyParameters>,
    sky_query: Query<&MeshMaterial3d<SkyMaterial>, With<SkyDome>>,
    mut sky_materials: ResMut<Assets<SkyMaterial>>,
    mut redraw: EventWriter<RequestRedraw>,
) {
    let updated = SkyMaterial::from_parameters(&params);
    for handle in sky_query.iter() {
        if let Some(material) = sky_materials.get_mut(&handle.0) {
            *material = updated.clone();
        }
    }

    debug!("🌅 Sky parameters applied: {:?}", *params);
    redraw.write(RequestRedraw);
}
