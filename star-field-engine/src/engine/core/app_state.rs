use bevy::prelude::*;

use crate::engine::loading::progress::LoadingProgress;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

/// Leave `Loading` once the catalog source resolved, whether or not it
/// produced any stars.
pub fn transition_to_running(
    progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if progress.catalog_loaded {
        info!(
            "→ Catalog resolved ({} stars), transitioning to Running state",
            progress.star_count
        );
        next_state.set(AppState::Running);
    }
}
