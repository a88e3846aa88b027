use bevy::prelude::*;

/// Loading milestones read by the state transition out of `Loading`.
#[derive(Resource, Debug, Default)]
pub struct LoadingProgress {
    /// The catalog source resolved, successfully or not.
    pub catalog_loaded: bool,
    pub star_count: usize,
}
