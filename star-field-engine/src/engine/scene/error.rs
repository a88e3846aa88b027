use thiserror::Error;

/// Failure to build a scene node. Aborts the reconciliation that hit it and
/// leaves the previous scene in place.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneBuildError {
    #[error("non-finite geometry in {node}")]
    NonFiniteGeometry { node: String },

    #[error("degenerate geometry in {node}")]
    DegenerateGeometry { node: String },
}
