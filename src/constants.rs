// Firework settings
pub const FIREWORK_DURATION: f32 = 3.0;          // Seconds from burst to despawn
pub const SHELL_JITTER: f32 = 0.25;              // Radial jitter as a fraction of shell radius

// Random spawn ranges (click-driven fireworks)
pub const SPAWN_COUNT_MIN: u32 = 400;
pub const SPAWN_COUNT_MAX: u32 = 2400;
pub const SPAWN_BOX_HALF_X: f32 = 1.5;
pub const SPAWN_BOX_HEIGHT: f32 = 1.0;
pub const SPAWN_BOX_HALF_Z: f32 = 1.0;
pub const SPAWN_SIZE_MIN: f32 = 0.2;
pub const SPAWN_SIZE_MAX: f32 = 0.3;
pub const SPAWN_RADIUS_MIN: f32 = 0.6;
pub const SPAWN_RADIUS_MAX: f32 = 1.6;
pub const FIREWORK_SATURATION: f32 = 1.0;
pub const FIREWORK_LIGHTNESS: f32 = 0.8;
pub const CLICK_DRAG_THRESHOLD: f32 = 6.0;       // Pixels of travel before a click becomes an orbit drag

// Texture bank
pub const PARTICLE_TEXTURE_COUNT: usize = 8;

// Viewport
pub const MAX_PIXEL_RATIO: f32 = 2.0;

// Orbit camera settings
pub const CAMERA_FOV_DEGREES: f32 = 25.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const CAMERA_START: bevy::math::Vec3 = bevy::math::Vec3::new(1.5, 0.0, 6.0);
pub const CAMERA_DAMPING: f32 = 0.05;            // Fraction of pending motion applied per frame
pub const CAMERA_ROTATION_SPEED: f32 = 0.01;     // Radians per pixel of drag
pub const CAMERA_ZOOM_SPEED: f32 = 0.1;          // Fractional dolly per scroll line
pub const CAMERA_MIN_DISTANCE: f32 = 1.0;
pub const CAMERA_MAX_DISTANCE: f32 = 50.0;
pub const CAMERA_POLAR_EPSILON: f32 = 0.001;     // Keeps the orbit off the poles

// Sky settings
pub const SKY_SCALE: f32 = 450_000.0;
pub const SKY_DEFAULT_TURBIDITY: f32 = 20.0;
pub const SKY_DEFAULT_RAYLEIGH: f32 = 3.0;
pub const SKY_DEFAULT_MIE_COEFFICIENT: f32 = 0.021;
pub const SKY_DEFAULT_MIE_DIRECTIONAL_G: f32 = 1.0;
pub const SKY_DEFAULT_ELEVATION: f32 = 0.0;
pub const SKY_DEFAULT_AZIMUTH: f32 = 180.0;
pub const SKY_DEFAULT_EXPOSURE: f32 = 1.0;

// Debug panel
pub const DEBUG_PANEL_WIDTH: f32 = 340.0;

// Environment variable used to seed the shared RNG
pub const SEED_ENV_VAR: &str = "FIREWORKS_SEED";
