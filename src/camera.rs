// Damped orbit camera
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use std::f32::consts::PI;
use crate::constants::*;
use crate::debug_panel::PanelPointer;
use crate::math_utils::{cartesian_to_spherical, spherical_to_cartesian};
use crate::types::MainCamera;

/// Orbit around `target` in spherical coordinates.
/// Input accumulates into pending deltas; each frame applies a fraction of them,
/// so the camera keeps gliding after the mouse stops.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    pub phi: f32,           // Polar angle from +Y
    pub theta: f32,         // Azimuth from +Z towards +X
    pub pending_phi: f32,
    pub pending_theta: f32,
}

impl OrbitCamera {
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let (distance, phi, theta) = cartesian_to_spherical(position - target);
        Self {
            target,
            distance,
            phi,
            theta,
            pending_phi: 0.0,
            pending_theta: 0.0,
        }
    }

    /// Drag delta in pixels. Dragging right swings the camera left around the target.
    pub fn rotate(&mut self, drag: Vec2) {
        self.pending_theta -= drag.x * CAMERA_ROTATION_SPEED;
        self.pending_phi -= drag.y * CAMERA_ROTATION_SPEED;
    }

    /// Positive `lines` dolly in. Applied immediately.
    pub fn zoom(&mut self, lines: f32) {
        self.distance = (self.distance * (1.0 - CAMERA_ZOOM_SPEED).powf(lines))
            .clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
    }

    /// One damping step.
    pub fn update(&mut self) {
        self.theta += self.pending_theta * CAMERA_DAMPING;
        self.phi = (self.phi + self.pending_phi * CAMERA_DAMPING)
            .clamp(CAMERA_POLAR_EPSILON, PI - CAMERA_POLAR_EPSILON);

        self.pending_theta *= 1.0 - CAMERA_DAMPING;
        self.pending_phi *= 1.0 - CAMERA_DAMPING;
    }

    pub fn position(&self) -> Vec3 {
        self.target + spherical_to_cartesian(self.distance, self.phi, self.theta)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position()).looking_at(self.target, Vec3::Y)
    }
}

pub fn spawn_camera(mut commands: Commands) {
    let orbit = OrbitCamera::looking_at(CAMERA_START, Vec3::ZERO);

    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        Tonemapping::None,
        orbit.transform(),
        orbit,
        MainCamera,
    ));

    info!("📷 Orbit camera at {:?}", CAMERA_START);
}

/// Collects drag and scroll input. Ignored while the pointer is over the debug panel.
pub fn orbit_camera_input(
    mouse_button_input: Res<ButtonInput<MouseButton>>,
    mut mouse_motion_events: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    panel_pointer: Res<PanelPointer>,
    mut camera_query: Query<&mut OrbitCamera, With<MainCamera>>,
) {
    let pointer_on_panel = panel_pointer.over_panel;

    let Ok(mut orbit) = camera_query.single_mut() else {
        mouse_motion_events.clear();
        scroll_events.clear();
        return;
    };

    if mouse_button_input.pressed(MouseButton::Left) && !pointer_on_panel {
        for motion in mouse_motion_events.read() {
            orbit.rotate(motion.delta);
        }
    } else {
        // Drop motion that happened without a drag so it doesn't pile up
        mouse_motion_events.clear();
    }

    for scroll in scroll_events.read() {
        if pointer_on_panel {
            continue;
        }
        let lines = match scroll.unit {
            MouseScrollUnit::Line => scroll.y,
            MouseScrollUnit::Pixel => scroll.y * 0.01,
        };
        orbit.zoom(lines);
    }
}

/// Runs every frame before rendering, even without input, so damping can settle.
pub fn update_orbit_camera(mut camera_query: Query<(&mut Transform, &mut OrbitCamera)>) {
    for (mut transform, mut orbit) in camera_query.iter_mut() {
        orbit.update();
        *transform = orbit.transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_configured_position() {
        let orbit = OrbitCamera::looking_at(CAMERA_START, Vec3::ZERO);
        assert!(orbit.position().abs_diff_eq(CAMERA_START, 1e-4));
        assert!((orbit.phi - PI / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_damping_applies_a_fraction_per_frame() {
        let mut orbit = OrbitCamera::looking_at(CAMERA_START, Vec3::ZERO);
        let theta0 = orbit.theta;
        orbit.rotate(Vec2::new(-100.0, 0.0));
        let total = 100.0 * CAMERA_ROTATION_SPEED;

        orbit.update();
        assert!((orbit.theta - theta0 - total * CAMERA_DAMPING).abs() < 1e-6);
        assert!((orbit.pending_theta - total * (1.0 - CAMERA_DAMPING)).abs() < 1e-6);

        // Converges to the full rotation
        for _ in 0..500 {
            orbit.update();
        }
        assert!((orbit.theta - theta0 - total).abs() < 1e-4);
        assert!(orbit.pending_theta.abs() < 1e-6);
    }

    #[test]
    fn test_polar_angle_stays_off_the_poles() {
        let mut orbit = OrbitCamera::looking_at(CAMERA_START, Vec3::ZERO);
        orbit.rotate(Vec2::new(0.0, 100_000.0));
        for _ in 0..200 {
            orbit.update();
        }
        assert!(orbit.phi >= CAMERA_POLAR_EPSILON);
        assert!(orbit.position().is_finite());
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut orbit = OrbitCamera::looking_at(CAMERA_START, Vec3::ZERO);
        let start = orbit.distance;
        orbit.zoom(1.0);
        assert!(orbit.distance < start);
        orbit.zoom(1000.0);
        assert_eq!(orbit.distance, CAMERA_MIN_DISTANCE);
        orbit.zoom(-1000.0);
        assert_eq!(orbit.distance, CAMERA_MAX_DISTANCE);
    }

    #[test]
    fn test_transform_looks_at_target() {
        let orbit = OrbitCamera::looking_at(CAMERA_START, Vec3::ZERO);
        let transform = orbit.transform();
        let forward = transform.forward();
        assert!(forward.as_vec3().abs_diff_eq(-CAMERA_START.normalize(), 1e-4));
    }
}
