//! Star filter pipeline.
//!
//! Turns the loaded catalog plus the user's filters, view modes, search text
//! and selected constellation into the list of stars the scene draws. The
//! result is memoised on that input tuple so unrelated state changes never
//! trigger a scene rebuild.

/// Numeric filter configuration and `setFilter` command parsing.
pub mod config;

/// View-mode tags and the ranking selectors behind them.
pub mod modes;

/// The pure filter function and its query resources.
pub mod pipeline;

pub use config::{FilterConfig, FilterUpdate, FilterUpdateError, MagnitudeType};
pub use modes::{ActiveModes, StarSelector, ViewMode};
pub use pipeline::{SearchQuery, SelectedConstellation, filter_stars};

use crate::engine::catalog::{Catalog, ConstellationGraph, Star};
use bevy::prelude::*;

/// Everything the filter result depends on.
#[derive(Debug, Clone, PartialEq)]
struct FilterInputs {
    catalog_generation: u64,
    filters: FilterConfig,
    modes: ActiveModes,
    search_query: String,
    constellation: Option<String>,
}

impl FilterInputs {
    fn same_result_as(&self, other: &Self) -> bool {
        self.catalog_generation == other.catalog_generation
            && self.filters.star_filters_eq(&other.filters)
            && self.modes == other.modes
            && self.search_query == other.search_query
            && self.constellation == other.constellation
    }
}

/// Memoised filter output. `revision` increases on every real recompute and
/// is the scene manager's dirty signal.
#[derive(Resource, Debug, Default)]
pub struct FilteredStars {
    stars: Vec<Star>,
    inputs: Option<FilterInputs>,
    revision: u64,
}

impl FilteredStars {
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Recompute unless the inputs match the previous call. Returns whether
    /// a recompute happened.
    pub fn refresh(
        &mut self,
        catalog: &Catalog,
        graph: &ConstellationGraph,
        filters: &FilterConfig,
        modes: &ActiveModes,
        search_query: &str,
        constellation: Option<&str>,
    ) -> bool {
        let inputs = FilterInputs {
            catalog_generation: catalog.generation(),
            filters: filters.clone(),
            modes: modes.clone(),
            search_query: search_query.to_string(),
            constellation: constellation.map(str::to_string),
        };
        if self
            .inputs
            .as_ref()
            .is_some_and(|previous| previous.same_result_as(&inputs))
        {
            return false;
        }

        self.stars = filter_stars(
            catalog.stars(),
            graph,
            filters,
            modes,
            search_query,
            constellation,
        );
        self.inputs = Some(inputs);
        self.revision += 1;
        true
    }
}

/// Recompute stage system.
pub fn recompute_filtered_stars(
    catalog: Res<Catalog>,
    graph: Res<ConstellationGraph>,
    filters: Res<FilterConfig>,
    modes: Res<ActiveModes>,
    search_query: Res<SearchQuery>,
    constellation: Res<SelectedConstellation>,
    mut filtered: ResMut<FilteredStars>,
) {
    let recomputed = filtered.bypass_change_detection().refresh(
        &catalog,
        &graph,
        &filters,
        &modes,
        &search_query.0,
        constellation.0.as_deref(),
    );
    if recomputed {
        filtered.set_changed();
        debug!(
            "Filter recompute #{}: {} stars",
            filtered.revision(),
            filtered.stars().len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::default();
        catalog.replace(vec![
            Star::new(1, [0.0; 3], 2.0, 1.0),
            Star::new(2, [0.0; 3], 10.0, 1.0),
            Star::new(3, [0.0; 3], 4.0, 1.0),
        ]);
        catalog
    }

    #[test]
    fn identical_inputs_do_not_recompute() {
        let catalog = catalog();
        let graph = ConstellationGraph::builtin();
        let filters = FilterConfig::default();
        let modes = ActiveModes::default();
        let mut filtered = FilteredStars::default();

        assert!(filtered.refresh(&catalog, &graph, &filters, &modes, "", None));
        assert!(!filtered.refresh(&catalog, &graph, &filters, &modes, "", None));
        assert_eq!(filtered.revision(), 1);
        assert_eq!(filtered.stars().len(), 2);
    }

    #[test]
    fn orbital_speed_changes_are_not_a_recompute_trigger() {
        let catalog = catalog();
        let graph = ConstellationGraph::builtin();
        let mut filters = FilterConfig::default();
        let modes = ActiveModes::default();
        let mut filtered = FilteredStars::default();

        filtered.refresh(&catalog, &graph, &filters, &modes, "", None);
        filters.apply(FilterUpdate::OrbitalSpeedFactor(4.0));
        assert!(!filtered.refresh(&catalog, &graph, &filters, &modes, "", None));
    }

    #[test]
    fn catalog_reload_and_mode_changes_recompute() {
        let mut catalog = catalog();
        let graph = ConstellationGraph::builtin();
        let filters = FilterConfig::default();
        let mut modes = ActiveModes::default();
        let mut filtered = FilteredStars::default();

        filtered.refresh(&catalog, &graph, &filters, &modes, "", None);
        modes.toggle(ViewMode::SolarSystem);
        assert!(filtered.refresh(&catalog, &graph, &filters, &modes, "", None));
        catalog.replace(Vec::new());
        assert!(filtered.refresh(&catalog, &graph, &filters, &modes, "", None));
        assert!(filtered.stars().is_empty());
        assert_eq!(filtered.revision(), 3);
    }

    #[test]
    fn system_marks_resource_changed_only_on_recompute() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(catalog())
            .insert_resource(ConstellationGraph::builtin())
            .init_resource::<FilterConfig>()
            .init_resource::<ActiveModes>()
            .init_resource::<SearchQuery>()
            .init_resource::<SelectedConstellation>()
            .init_resource::<FilteredStars>()
            .add_systems(Update, recompute_filtered_stars);

        app.update();
        app.update();
        assert_eq!(app.world().resource::<FilteredStars>().revision(), 1);

        app.world_mut().resource_mut::<SearchQuery>().0 = "x".to_string();
        app.update();
        let filtered = app.world().resource::<FilteredStars>();
        assert_eq!(filtered.revision(), 2);
        assert!(filtered.stars().is_empty());
    }
}
