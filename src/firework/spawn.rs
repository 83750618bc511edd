// Firework factory and random spawn parameters
use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;
use rand::Rng;
use crate::constants::*;
use crate::textures::TextureBank;
use crate::types::SceneRng;
use crate::viewport::Viewport;
use super::lifecycle::Firework;
use super::material::FireworkMaterial;
use super::particles::ParticleCloud;

/// Everything needed to build one firework burst.
#[derive(Debug, Clone)]
pub struct FireworkSpawn {
    pub count: usize,
    pub position: Vec3,
    pub size: f32,
    pub texture: Handle<Image>,
    pub radius: f32,
    pub color: Color,
}

impl FireworkSpawn {
    /// Fresh random parameters, as fired by a click.
    pub fn random(rng: &mut impl Rng, bank: &TextureBank) -> Self {
        let count = rng.gen_range(SPAWN_COUNT_MIN..=SPAWN_COUNT_MAX) as usize;
        let position = Vec3::new(
            rng.gen_range(-SPAWN_BOX_HALF_X..SPAWN_BOX_HALF_X),
            rng.gen_range(0.0..SPAWN_BOX_HEIGHT),
            rng.gen_range(-SPAWN_BOX_HALF_Z..SPAWN_BOX_HALF_Z),
        );
        let size = rng.gen_range(SPAWN_SIZE_MIN..SPAWN_SIZE_MAX);
        let texture = bank.pick_random(rng);
        let radius = rng.gen_range(SPAWN_RADIUS_MIN..SPAWN_RADIUS_MAX);
        let hue = rng.gen::<f32>() * 360.0;
        let color = Color::hsl(hue, FIREWORK_SATURATION, FIREWORK_LIGHTNESS);

        Self { count, position, size, texture, radius, color }
    }
}

/// Request to spawn a firework; consumed in `FireworkSet::Spawn`.
#[derive(Event, Debug, Clone)]
pub struct SpawnFirework(pub FireworkSpawn);

/// Builds the particle buffers and material for one burst and inserts it into the scene.
/// The firework then runs on its own until its tween completes.
pub fn spawn_firework(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<FireworkMaterial>,
    viewport: &Viewport,
    spawn: FireworkSpawn,
    rng: &mut impl Rng,
) {
    let cloud = ParticleCloud::generate(spawn.count, spawn.radius, rng);
    let mesh = meshes.add(cloud.to_mesh());
    let material = materials.add(FireworkMaterial::new(
        spawn.color,
        spawn.size,
        viewport.resolution,
        spawn.texture,
    ));

    let entity = commands.spawn((
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::from_translation(spawn.position),
        Firework::new(cloud.len(), FIREWORK_DURATION),
        NotShadowCaster,
        NoFrustumCulling,  // Sprites are expanded in the vertex shader, outside the mesh AABB
        Name::new("Firework"),
    )).id();

    debug!("🎆 Spawned firework {:?}: {} particles at {:?} (radius {:.2}, size {:.2})",
           entity, spawn.count, spawn.position, spawn.radius, spawn.size);
}

/// Turns queued spawn requests into fireworks.
pub fn spawn_requested_fireworks(
    mut commands: Commands,
    mut requests: EventReader<SpawnFirework>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<FireworkMaterial>>,
    viewport: Res<Viewport>,
    mut rng: ResMut<SceneRng>,
) {
    for SpawnFirework(spawn) in requests.read() {
        spawn_firework(
            &mut commands,
            &mut meshes,
            &mut materials,
            &viewport,
            spawn.clone(),
            &mut rng.0,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bank() -> TextureBank {
        TextureBank::from_handles(
            (0..PARTICLE_TEXTURE_COUNT as u128)
                .map(Handle::<Image>::weak_from_u128)
                .collect(),
        )
    }

    #[test]
    fn test_random_spawn_ranges() {
        let bank = bank();
        let mut rng = StdRng::seed_from_u64(21);

        for _ in 0..2000 {
            let spawn = FireworkSpawn::random(&mut rng, &bank);
            assert!((400..=2400).contains(&spawn.count));
            assert!(spawn.position.x >= -1.5 && spawn.position.x < 1.5);
            assert!(spawn.position.y >= 0.0 && spawn.position.y < 1.0);
            assert!(spawn.position.z >= -1.0 && spawn.position.z < 1.0);
            assert!(spawn.size >= 0.2 && spawn.size < 0.3);
            assert!(spawn.radius >= 0.6 && spawn.radius < 1.6);
            assert!(bank.handles().contains(&spawn.texture));

            let Color::Hsla(hsla) = spawn.color else {
                panic!("expected an HSL color, got {:?}", spawn.color);
            };
            assert!(hsla.hue >= 0.0 && hsla.hue < 360.0);
            assert_eq!(hsla.saturation, 1.0);
            assert_eq!(hsla.lightness, 0.8);
        }
    }

    #[test]
    fn test_random_spawn_is_reproducible_for_a_seed() {
        let bank = bank();
        let a = FireworkSpawn::random(&mut StdRng::seed_from_u64(5), &bank);
        let b = FireworkSpawn::random(&mut StdRng::seed_from_u64(5), &bank);
        assert_eq!(a.count, b.count);
        assert_eq!(a.position, b.position);
        assert_eq!(a.texture, b.texture);
        assert_eq!(a.color, b.color);
    }
}
