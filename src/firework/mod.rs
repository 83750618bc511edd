// Firework module - click-spawned particle bursts
//
// Submodules:
// - particles: shell sampling and quad mesh building
// - material: additive point-sprite material
// - lifecycle: tween + Spawned/Animating/Destroyed state machine
// - spawn: factory, random parameters and spawn requests

mod lifecycle;
mod material;
mod particles;
mod spawn;

use bevy::pbr::MaterialPlugin;
use bevy::prelude::*;

use lifecycle::animate_fireworks;
use spawn::spawn_requested_fireworks;

pub use lifecycle::Firework;
pub use material::FireworkMaterial;
pub use spawn::{FireworkSpawn, SpawnFirework};

/// Spawning always happens before animation within a frame
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FireworkSet {
    Spawn,
    Animate,
}

pub struct FireworkPlugin;

impl Plugin for FireworkPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<FireworkMaterial> {
            prepass_enabled: false,
            shadows_enabled: false,
            ..default()
        });
        add_firework_systems(app);
    }
}

/// Everything except GPU registration, so the lifecycle also runs in headless apps
pub fn add_firework_systems(app: &mut App) {
    app.add_event::<SpawnFirework>()
        .configure_sets(Update, (FireworkSet::Spawn, FireworkSet::Animate).chain())
        .add_systems(Update, (
            spawn_requested_fireworks.in_set(FireworkSet::Spawn),
            animate_fireworks.in_set(FireworkSet::Animate),
        ));
}
