//! Core application setup and state management.
//!
//! Handles the viewer plugin, host settings, window configuration and the
//! loading-to-running transition for both native and WASM targets.

/// The viewer plugin and the ready-made app around it.
///
/// Registers resources, frame stages and the RPC bridge.
pub mod app_setup;

/// Loading and running states.
pub mod app_state;

/// Host-tunable settings with JSON overrides.
pub mod settings;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and tracks the viewport size.
pub mod window_config;
