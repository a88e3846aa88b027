//! Interactive star field viewer engine.
//!
//! Renders a navigable 3D star field with optional constellation figures and a
//! scaled solar system, resolves pointer picks against both, and narrows the
//! visible set through composable filters and view modes. The engine is a Bevy
//! plugin; a host embeds it through [`StarFieldPlugin`] or runs the ready-made
//! app from [`create_app`].

pub mod engine;
pub mod rpc;

pub use engine::core::app_setup::{StarFieldPlugin, create_app};
