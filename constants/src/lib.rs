//! Fixed tables and tuning values shared by the star field engine.
//!
//! Everything here is plain data: the engine turns these tables into its own
//! typed records at startup and never mutates them.

/// Canonical camera pose, projection, and navigation tuning.
pub mod camera;

/// Spectral class table: temperatures and colour palette per class letter.
pub mod class;

/// Built-in constellation line figures keyed by constellation code.
pub mod constellation;

/// Star sizing, world scale, line colours, and picking thresholds.
pub mod render_settings;

/// Reference solar-system table and its display scale factors.
pub mod solar_system;
