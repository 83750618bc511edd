// Viewport size tracking and resolution propagation
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};
use crate::constants::MAX_PIXEL_RATIO;
use crate::firework::FireworkMaterial;

/// Window size in logical pixels plus the resolution sprites are sized against.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
    pub resolution: Vec2,
}

impl Viewport {
    pub fn new(width: f32, height: f32, scale_factor: f32) -> Self {
        let pixel_ratio = scale_factor.min(MAX_PIXEL_RATIO);
        Self {
            width,
            height,
            pixel_ratio,
            resolution: Vec2::new(width * pixel_ratio, height * pixel_ratio),
        }
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 { self.width / self.height } else { 1.0 }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0, 1.0)
    }
}

pub fn init_viewport(
    mut viewport: ResMut<Viewport>,
    window_query: Query<&Window, With<PrimaryWindow>>,
) {
    let Ok(window) = window_query.single() else { return };
    *viewport = Viewport::new(window.width(), window.height(), window.scale_factor());
    info!("🖥️ Viewport {}x{} @{}x -> resolution {:?}",
          viewport.width, viewport.height, viewport.pixel_ratio, viewport.resolution);
}

/// Recomputes the viewport on resize and pushes the new resolution into every live
/// firework material, so in-flight bursts pick it up on the next draw.
/// Camera aspect and surface size are kept in sync by Bevy itself.
pub fn handle_window_resize(
    mut resize_events: EventReader<WindowResized>,
    window_query: Query<&Window>,
    mut viewport: ResMut<Viewport>,
    mut materials: ResMut<Assets<FireworkMaterial>>,
) {
    let Some(resize) = resize_events.read().last() else { return };

    let scale_factor = window_query
        .get(resize.window)
        .map(|window| window.scale_factor())
        .unwrap_or(viewport.pixel_ratio);
    *viewport = Viewport::new(resize.width, resize.height, scale_factor);

    for (_, material) in materials.iter_mut() {
        material.resolution = viewport.resolution;
    }

    debug!("🖥️ Resized to {}x{} (aspect {:.3}), resolution {:?}",
           viewport.width, viewport.height, viewport.aspect(), viewport.resolution);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_scales_with_pixel_ratio() {
        let viewport = Viewport::new(800.0, 600.0, 1.5);
        assert_eq!(viewport.pixel_ratio, 1.5);
        assert_eq!(viewport.resolution, Vec2::new(1200.0, 900.0));
    }

    #[test]
    fn test_pixel_ratio_is_capped() {
        let viewport = Viewport::new(1000.0, 500.0, 3.0);
        assert_eq!(viewport.pixel_ratio, 2.0);
        assert_eq!(viewport.resolution, Vec2::new(2000.0, 1000.0));
        assert_eq!(viewport.aspect(), 2.0);
    }

    #[test]
    fn test_zero_height_aspect() {
        assert_eq!(Viewport::new(100.0, 0.0, 1.0).aspect(), 1.0);
    }
}
