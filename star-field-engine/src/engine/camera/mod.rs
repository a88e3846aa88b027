//! Viewer camera for star-field navigation.
//!
//! A two-state controller: a damped Orbit camera around a target point and a
//! first-person FreeFly camera driven by held keys and pointer look. The
//! controller resource owns the pose; systems feed it input and write the
//! pose to the camera entity once per frame.

/// Camera mode state machine and the authoritative pose.
pub mod controller;

/// First-person movement, look and sensitivity.
pub mod free_fly;

/// Damped orbit around a target with rotate, pan and zoom.
pub mod orbit;

/// Camera spawning, keyboard/pointer input and per-frame integration.
pub mod systems;

pub use controller::{CameraController, CameraMode};
pub use systems::StarFieldCamera;
