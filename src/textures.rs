// Particle sprite texture bank
use bevy::asset::LoadState;
use bevy::image::ImageLoaderSettings;
use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use crate::constants::PARTICLE_TEXTURE_COUNT;

/// Fixed set of sprite textures shared read-only by every firework.
/// Textures live for the whole session and are never released by a firework.
#[derive(Resource)]
pub struct TextureBank {
    textures: Vec<Handle<Image>>,
}

impl TextureBank {
    pub fn from_handles(textures: Vec<Handle<Image>>) -> Self {
        Self { textures }
    }

    /// Uniform random pick. An empty bank yields the default (missing) handle.
    pub fn pick_random(&self, rng: &mut impl Rng) -> Handle<Image> {
        self.textures.choose(rng).cloned().unwrap_or_default()
    }

    pub fn handles(&self) -> &[Handle<Image>] {
        &self.textures
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }
}

pub fn particle_texture_path(index: usize) -> String {
    format!("particles/{}.png", index + 1)
}

/// Sprites are coverage masks sampled as alpha, not colors: keep the stored values as-is.
pub fn linear_sprite_settings(settings: &mut ImageLoaderSettings) {
    settings.is_srgb = false;
}

pub fn setup_texture_bank(mut commands: Commands, asset_server: Res<AssetServer>) {
    let textures = (0..PARTICLE_TEXTURE_COUNT)
        .map(|i| asset_server.load_with_settings(particle_texture_path(i), linear_sprite_settings))
        .collect();

    commands.insert_resource(TextureBank::from_handles(textures));
    info!("🎨 Queued {} particle textures for loading", PARTICLE_TEXTURE_COUNT);
}

/// Logs each texture that failed to load, once.
/// Fireworks using a failed texture still spawn; they just render without a sprite.
pub fn report_texture_failures(
    asset_server: Res<AssetServer>,
    bank: Option<Res<TextureBank>>,
    mut reported: Local<HashSet<AssetId<Image>>>,
) {
    let Some(bank) = bank else { return };
    if reported.len() == bank.len() {
        return;
    }

    for handle in bank.handles() {
        if reported.contains(&handle.id()) {
            continue;
        }
        if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle.id()) {
            warn!("⚠️ Particle texture failed to load: {}", err);
            reported.insert(handle.id());
        }
    }
}
