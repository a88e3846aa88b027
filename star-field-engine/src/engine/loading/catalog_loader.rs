use bevy::asset::{AssetLoadError, LoadState};
use bevy::prelude::*;

use crate::engine::catalog::{Catalog, CatalogError, CatalogLoad, Star, StarCatalog, ingest};
use crate::engine::core::settings::StarFieldSettings;
use crate::engine::loading::progress::LoadingProgress;

/// Where the star records come from.
#[derive(Resource, Debug, Clone)]
pub enum CatalogSource {
    /// JSON catalog asset, path relative to the asset root.
    Asset(String),
    /// Records handed over by the host application.
    Preloaded(Vec<Star>),
}

impl CatalogSource {
    pub fn from_settings(settings: &StarFieldSettings) -> Self {
        Self::Asset(settings.catalog_path.clone())
    }
}

#[derive(Resource, Default)]
pub struct CatalogLoader {
    handle: Option<Handle<StarCatalog>>,
    path: String,
}

/// User-visible data error, `None` while the catalog is fine.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadingError(pub Option<String>);

pub fn start_loading(
    source: Res<CatalogSource>,
    asset_server: Res<AssetServer>,
    mut loader: ResMut<CatalogLoader>,
) {
    if let CatalogSource::Asset(path) = source.as_ref() {
        info!("Loading star catalog from {path}");
        loader.handle = Some(asset_server.load(path.as_str()));
        loader.path = path.clone();
    }
}

/// Fold a finished load into the live catalog. A failure leaves an empty
/// catalog and a surfaced error; it is never fatal.
pub fn apply_catalog_load(
    load: CatalogLoad,
    catalog: &mut Catalog,
    error: &mut LoadingError,
    progress: &mut LoadingProgress,
) {
    match load {
        Ok(stars) => {
            let stars = ingest(stars);
            info!("✓ Star catalog loaded: {} stars", stars.len());
            progress.star_count = stars.len();
            catalog.replace(stars);
            error.0 = None;
        }
        Err(err) => {
            error!("Star catalog unavailable: {err:?}");
            progress.star_count = 0;
            catalog.replace(Vec::new());
            error.0 = Some(err.to_string());
        }
    }
    progress.catalog_loaded = true;
}

fn load_failure(path: &str, err: &AssetLoadError) -> CatalogError {
    match err {
        AssetLoadError::AssetLoaderError(inner) => CatalogError::Parse(inner.to_string()),
        other => CatalogError::LoadFailed {
            path: path.to_string(),
            reason: other.to_string(),
        },
    }
}

/// Loading stage: wait for the catalog source to resolve.
pub fn check_catalog_load(
    source: Res<CatalogSource>,
    loader: Res<CatalogLoader>,
    asset_server: Res<AssetServer>,
    catalogs: Res<Assets<StarCatalog>>,
    mut catalog: ResMut<Catalog>,
    mut error: ResMut<LoadingError>,
    mut progress: ResMut<LoadingProgress>,
) {
    if progress.catalog_loaded {
        return;
    }

    let load = match source.as_ref() {
        CatalogSource::Preloaded(stars) => Ok(stars.clone()),
        CatalogSource::Asset(_) => {
            let Some(handle) = loader.handle.as_ref() else {
                return;
            };
            if let Some(asset) = catalogs.get(handle) {
                Ok(asset.stars.clone())
            } else if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle) {
                Err(load_failure(&loader.path, &err))
            } else {
                return;
            }
        }
    };

    apply_catalog_load(load, &mut catalog, &mut error, &mut progress);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stars() -> Vec<Star> {
        vec![
            Star::new(1, [0.0, 1.0, 2.0], 1.0, 1.0),
            Star::new(2, [f32::NAN, 0.0, 0.0], 1.0, 1.0),
        ]
    }

    #[test]
    fn successful_load_fills_the_catalog() {
        let mut catalog = Catalog::default();
        let mut error = LoadingError(Some("old".to_string()));
        let mut progress = LoadingProgress::default();

        apply_catalog_load(Ok(stars()), &mut catalog, &mut error, &mut progress);

        assert_eq!(catalog.stars().len(), 1);
        assert_eq!(error.0, None);
        assert!(progress.catalog_loaded);
        assert_eq!(progress.star_count, 1);
    }

    #[test]
    fn failed_load_is_an_empty_scene_with_a_message() {
        let mut catalog = Catalog::default();
        let mut error = LoadingError::default();
        let mut progress = LoadingProgress::default();

        let failure = CatalogError::Parse("expected value at line 1".to_string());
        apply_catalog_load(Err(failure), &mut catalog, &mut error, &mut progress);

        assert!(catalog.stars().is_empty());
        assert_eq!(catalog.generation(), 1);
        assert_eq!(error.0.as_deref(), Some("Failed to parse star data"));
        assert!(progress.catalog_loaded);
    }

    fn loading_app(source: CatalogSource) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<StarCatalog>()
            .insert_resource(source)
            .init_resource::<CatalogLoader>()
            .init_resource::<Catalog>()
            .init_resource::<LoadingError>()
            .init_resource::<LoadingProgress>()
            .add_systems(Update, check_catalog_load);
        app
    }

    #[test]
    fn preloaded_records_are_taken_as_is() {
        let mut app = loading_app(CatalogSource::Preloaded(stars()));
        app.update();
        app.update();

        let catalog = app.world().resource::<Catalog>();
        assert_eq!(catalog.stars().len(), 1);
        assert_eq!(catalog.generation(), 1);
    }

    #[test]
    fn asset_catalog_is_read_once_available() {
        let mut app = loading_app(CatalogSource::Asset("stars.json".to_string()));
        app.update();
        assert!(!app.world().resource::<LoadingProgress>().catalog_loaded);

        let handle = app
            .world_mut()
            .resource_mut::<Assets<StarCatalog>>()
            .add(StarCatalog { stars: stars() });
        app.world_mut().resource_mut::<CatalogLoader>().handle = Some(handle);
        app.update();

        assert!(app.world().resource::<LoadingProgress>().catalog_loaded);
        assert_eq!(app.world().resource::<Catalog>().stars().len(), 1);
    }
}
