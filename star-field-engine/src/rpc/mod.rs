//! JSON-RPC 2.0 bridge between the viewer and its host UI.
//!
//! In the browser the viewer runs inside an iframe and talks to the parent
//! window over `postMessage`. Native hosts use the same protocol through
//! [`web_rpc::WebRpcInterface::inject`].
//!
//! ## Message Flow
//!
//! ```text
//! UI (Parent Window)  <──postMessage──>  Viewer (iframe)
//!        │                                     │
//!        ├─ Request (with ID) ───────────────> │
//!        │                                     ├─ ViewerCommand event
//!        │ <──────────────── Response (with ID)┤
//!        │                                     │
//!        │ <─────────── Notification (no ID) ──┤
//! ```
//!
//! Requests are parsed during the input stage and turned into
//! `ViewerCommand` events, so every change lands between frames.
//! Requests without an id are dispatched but not answered.
//!
//! ## Methods
//!
//! - `set_filter {key, value}`: `magnitude`, `magnitudeType`, `minTemp`,
//!   `maxDistance`, `orbitalSpeed`
//! - `toggle_mode {mode}`: `closest`, `brightest`, `hottest`, `largest`,
//!   `constellations`, `solarSystem`
//! - `set_search_query {text}`
//! - `toggle_camera`
//! - `resize {width, height}`
//! - `teardown`
//! - `get_state`: filters, modes, search, camera, selection, loading error
//!
//! ## Notifications
//!
//! - `selection_changed {star, object}`
//! - `camera_mode_changed {mode, label}`
//! - `loading_error {message}`
//!
//! ## Error Codes
//!
//! - `-32600`: Invalid request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params

/// Message types, the bridge plugin and the `postMessage` listener.
pub mod web_rpc;
