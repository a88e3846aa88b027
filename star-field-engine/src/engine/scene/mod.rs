//! Scene graph construction and reconciliation.
//!
//! Builds the star-field point cloud, constellation line figures and the
//! solar-system group from the filter result, and keeps the world in step
//! with it. The scene manager is the only writer of scene entities.

/// Constellation line meshes and the per-code figure cache.
pub mod constellation_lines;

/// Scene build failures.
pub mod error;

/// Static ambient and directional lighting.
pub mod lighting;

/// Reconciliation of the world against the latest filter result.
///
/// Builds every new node first and only then swaps it in, so a failed
/// build never leaves a half-disposed scene.
pub mod manager;

/// Reference body, orbiters and orbit rings.
pub mod solar_system;

/// Star point-cloud mesh and its additive billboard material.
pub mod star_field;

pub use error::SceneBuildError;
pub use manager::{SceneNodes, reconcile_scene};
pub use solar_system::CelestialBody;
pub use star_field::StarFieldMaterial;
