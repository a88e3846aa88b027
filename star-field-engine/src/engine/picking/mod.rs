//! Pointer picking against the rendered scene.
//!
//! A pointer position becomes a ray from the viewer camera; the ray is tested
//! against solar-system bodies and the star field, and the outcome is folded
//! into the current [`Selection`].

/// Ray construction from the camera and ray/point, ray/sphere tests.
pub mod ray;

/// Selected star or body and the precedence rules for updating it.
pub mod selection;

/// Pointer queueing and the per-frame pick system.
pub mod systems;

/// Trailing rate limit for pointer-move picks.
pub mod throttle;

pub use selection::Selection;
pub use throttle::PickThrottle;
