//! Runtime systems of the viewer frame loop.
//!
//! The loop is a chain of `Update` system sets: input, recompute, camera
//! integration, animation. Rendering follows in Bevy's own schedules.

/// Orbital animation clock and constellation line sync.
pub mod animation;

/// UI commands and the input-stage system that applies them.
///
/// Every external action arrives as a [`commands::ViewerCommand`] event and is
/// applied between frames, never mid-render.
pub mod commands;

/// Frame stages, cancellation and teardown.
pub mod frame_loop;

/// Native text overlay with the camera label and selection details.
pub mod overlay;

pub use commands::{CommandError, ViewerCommand};
pub use frame_loop::{FrameLoop, FrameStage};
