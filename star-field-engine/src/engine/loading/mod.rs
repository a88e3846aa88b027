//! Star catalog loading.
//!
//! Resolves the catalog source (a JSON asset or records supplied by the host),
//! hands valid records to the live catalog, and turns load failures into a
//! user-visible error with an empty scene.

/// Catalog source selection, asset polling and error reporting.
///
/// A failed load is a data error, not a crash: the viewer runs with no stars
/// and surfaces the message.
pub mod catalog_loader;

/// Loading progress tracking resource for state transitions.
pub mod progress;

pub use catalog_loader::{CatalogSource, LoadingError};
pub use progress::LoadingProgress;
