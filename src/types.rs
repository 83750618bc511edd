use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use crate::constants::SEED_ENV_VAR;

/// Shared random source for particle placement, spawn parameters and colors.
/// Seed it to get reproducible fireworks.
#[derive(Resource)]
pub struct SceneRng(pub StdRng);

impl SceneRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    /// Reads `FIREWORKS_SEED`; falls back to entropy when unset or unparsable.
    pub fn from_env() -> Self {
        match std::env::var(SEED_ENV_VAR) {
            Ok(raw) => match parse_seed(&raw) {
                Some(seed) => {
                    info!("🎲 Using fixed RNG seed {} from {}", seed, SEED_ENV_VAR);
                    Self::seeded(seed)
                }
                None => {
                    warn!("⚠️ Ignoring {}={:?}: not an unsigned integer", SEED_ENV_VAR, raw);
                    Self::from_entropy()
                }
            },
            Err(_) => Self::from_entropy(),
        }
    }
}

fn parse_seed(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}

/// Marker for the main orbiting camera
#[derive(Component)]
pub struct MainCamera;

/// HUD text showing FPS and the number of live fireworks
#[derive(Component)]
pub struct HudText;
