use bevy::prelude::*;

/// Spherical to Cartesian conversion, Y-up.
/// `phi` is the polar angle measured from +Y, `theta` the azimuth measured from +Z towards +X.
pub fn spherical_to_cartesian(radius: f32, phi: f32, theta: f32) -> Vec3 {
    let sin_phi_radius = phi.sin() * radius;
    Vec3::new(
        sin_phi_radius * theta.sin(),
        phi.cos() * radius,
        sin_phi_radius * theta.cos(),
    )
}

/// Inverse of [`spherical_to_cartesian`]. Returns (radius, phi, theta).
pub fn cartesian_to_spherical(v: Vec3) -> (f32, f32, f32) {
    let radius = v.length();
    if radius == 0.0 {
        return (0.0, 0.0, 0.0);
    }
    let phi = (v.y / radius).clamp(-1.0, 1.0).acos();
    let theta = v.x.atan2(v.z);
    (radius, phi, theta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_axes() {
        assert!(spherical_to_cartesian(1.0, 0.0, 0.0).abs_diff_eq(Vec3::Y, 1e-6));
        assert!(spherical_to_cartesian(1.0, FRAC_PI_2, 0.0).abs_diff_eq(Vec3::Z, 1e-6));
        assert!(spherical_to_cartesian(1.0, FRAC_PI_2, FRAC_PI_2).abs_diff_eq(Vec3::X, 1e-6));
        assert!(spherical_to_cartesian(2.0, PI, 0.0).abs_diff_eq(Vec3::new(0.0, -2.0, 0.0), 1e-5));
    }

    #[test]
    fn test_round_trip_camera_start() {
        let start = Vec3::new(1.5, 0.0, 6.0);
        let (r, phi, theta) = cartesian_to_spherical(start);
        assert!(spherical_to_cartesian(r, phi, theta).abs_diff_eq(start, 1e-5));
    }

    #[test]
    fn test_zero_vector() {
        assert_eq!(cartesian_to_spherical(Vec3::ZERO), (0.0, 0.0, 0.0));
    }
}
