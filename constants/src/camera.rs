use bevy::math::Vec3;

/// Overview position used at startup, when leaving free flight, and when
/// entering solar-system-only mode.
pub const CANONICAL_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 2000.0, 4000.0);

/// Point the overview pose looks at and the orbit target it resets to.
pub const CANONICAL_CAMERA_TARGET: Vec3 = Vec3::ZERO;

pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.001;
pub const CAMERA_FAR: f32 = 1_000_000.0;

pub const ORBIT_DAMPING_FACTOR: f32 = 0.05;
pub const ORBIT_MIN_DISTANCE: f32 = 1.0;
pub const ORBIT_MAX_DISTANCE: f32 = 100_000.0;
/// Zoom ratio applied per scroll line.
pub const ORBIT_ZOOM_STEP: f32 = 0.95;

pub const FLY_BASE_SPEED: f32 = 50.0;
pub const FLY_BOOSTED_SPEED: f32 = 100.0;
/// Radians of look rotation per pixel of pointer motion.
pub const FLY_LOOK_RATE: f32 = 0.002;
/// Radians of yaw per frame while a yaw key is held.
pub const FLY_YAW_STEP: f32 = 0.03;

pub const SENSITIVITY_DEFAULT: f32 = 1.0;
pub const SENSITIVITY_MIN: f32 = 0.1;
pub const SENSITIVITY_MAX: f32 = 5.0;
pub const SENSITIVITY_STEP: f32 = 0.1;
