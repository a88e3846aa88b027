use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::engine::camera::CameraController;
use crate::engine::camera::systems::{
    camera_integrate, camera_keyboard_input, camera_pointer_input, spawn_camera,
};
use crate::engine::catalog::{Catalog, ConstellationGraph, SolarSystemTable, StarCatalog};
use crate::engine::core::app_state::{AppState, transition_to_running};
use crate::engine::core::settings::StarFieldSettings;
use crate::engine::core::window_config::{ViewportSize, create_window_config, track_window_resize};
use crate::engine::filter::{
    ActiveModes, FilterConfig, FilteredStars, SearchQuery, SelectedConstellation,
    recompute_filtered_stars,
};
use crate::engine::loading::catalog_loader::{
    CatalogLoader, CatalogSource, check_catalog_load, start_loading,
};
use crate::engine::loading::{LoadingError, LoadingProgress};
use crate::engine::picking::systems::{queue_pointer_picks, run_picking};
use crate::engine::picking::{PickThrottle, Selection};
use crate::engine::scene::lighting::spawn_lighting;
use crate::engine::scene::{SceneNodes, StarFieldMaterial, reconcile_scene};
use crate::engine::systems::animation::{
    OrbitClock, animate_orbits, sync_constellation_lines, tick_orbit_clock,
};
use crate::engine::systems::commands::apply_viewer_commands;
use crate::engine::systems::frame_loop::{advance_frame, configure_frame_stages, teardown_viewer};
use crate::engine::systems::{FrameLoop, FrameStage, ViewerCommand};
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::overlay::{spawn_overlay, update_overlay_text};

/// The viewer as a plugin. Needs the default plugin set (or an equivalent
/// with rendering and assets). A host may insert [`StarFieldSettings`] or a
/// [`CatalogSource`] before adding it; both fall back to defaults.
pub struct StarFieldPlugin;

impl Plugin for StarFieldPlugin {
    fn build(&self, app: &mut App) {
        let settings = app
            .world()
            .get_resource::<StarFieldSettings>()
            .cloned()
            .unwrap_or_default();
        if !app.world().contains_resource::<CatalogSource>() {
            app.insert_resource(CatalogSource::from_settings(&settings));
        }

        app.add_plugins(JsonAssetPlugin::<StarCatalog>::new(&["json"]))
            .add_plugins(MaterialPlugin::<StarFieldMaterial>::default())
            .add_plugins(WebRpcPlugin)
            .init_state::<AppState>()
            .add_event::<ViewerCommand>();

        // Initialise resources early
        app.insert_resource(CameraController::from_settings(&settings))
            .insert_resource(PickThrottle::new(settings.pick_debounce_secs))
            .insert_resource(ConstellationGraph::builtin())
            .insert_resource(settings)
            .init_resource::<CatalogLoader>()
            .init_resource::<Catalog>()
            .init_resource::<LoadingError>()
            .init_resource::<LoadingProgress>()
            .init_resource::<SolarSystemTable>()
            .init_resource::<FilterConfig>()
            .init_resource::<ActiveModes>()
            .init_resource::<SearchQuery>()
            .init_resource::<SelectedConstellation>()
            .init_resource::<FilteredStars>()
            .init_resource::<SceneNodes>()
            .init_resource::<ViewportSize>()
            .init_resource::<Selection>()
            .init_resource::<OrbitClock>()
            .init_resource::<FrameLoop>();

        configure_frame_stages(app);
        for stage in [
            FrameStage::Input,
            FrameStage::Recompute,
            FrameStage::Integrate,
            FrameStage::Animate,
        ] {
            app.configure_sets(Update, stage.run_if(in_state(AppState::Running)));
        }

        app.add_systems(Startup, (spawn_camera, spawn_lighting, start_loading))
            .add_systems(
                Update,
                (check_catalog_load, transition_to_running)
                    .chain()
                    .run_if(in_state(AppState::Loading)),
            )
            .add_systems(
                Update,
                (
                    advance_frame,
                    apply_viewer_commands,
                    track_window_resize,
                    camera_keyboard_input,
                    camera_pointer_input,
                    queue_pointer_picks,
                    run_picking,
                )
                    .chain()
                    .in_set(FrameStage::Input),
            )
            .add_systems(
                Update,
                (recompute_filtered_stars, reconcile_scene)
                    .chain()
                    .in_set(FrameStage::Recompute),
            )
            .add_systems(Update, camera_integrate.in_set(FrameStage::Integrate))
            .add_systems(
                Update,
                (tick_orbit_clock, animate_orbits, sync_constellation_lines)
                    .chain()
                    .in_set(FrameStage::Animate),
            )
            // Outside the stages so it still runs once the loop is cancelled.
            .add_systems(Update, teardown_viewer.after(FrameStage::Input));

        #[cfg(not(target_arch = "wasm32"))]
        {
            app.add_systems(Startup, spawn_overlay)
                .add_systems(Update, update_overlay_text.after(FrameStage::Animate));
        }
    }
}

pub fn create_app() -> App {
    let mut app = App::new();
    app.add_plugins(create_default_plugins())
        .add_plugins(StarFieldPlugin);
    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
