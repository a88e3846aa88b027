use super::star::Star;
use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

/// Catalog file as delivered by the ingestion side, loaded as a JSON asset.
#[derive(Asset, TypePath, Debug, Clone, Deserialize)]
pub struct StarCatalog {
    pub stars: Vec<Star>,
}

/// Data errors. The `Display` text is what the viewer shows the user.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Failed to load star data")]
    LoadFailed { path: String, reason: String },

    #[error("Failed to parse star data")]
    Parse(String),
}

/// Outcome of a catalog load: the star list or the reason there is none.
pub type CatalogLoad = Result<Vec<Star>, CatalogError>;

/// Star records currently available to the engine.
///
/// `generation` increases every time the record set is replaced so that
/// memoised consumers can tell a reload from an unchanged catalog.
#[derive(Resource, Debug, Default)]
pub struct Catalog {
    stars: Vec<Star>,
    generation: u64,
}

impl Catalog {
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn replace(&mut self, stars: Vec<Star>) {
        self.stars = stars;
        self.generation += 1;
    }
}

/// Drop records whose position is not finite.
pub fn ingest(stars: Vec<Star>) -> Vec<Star> {
    let total = stars.len();
    let valid: Vec<Star> = stars
        .into_iter()
        .filter(Star::has_finite_position)
        .collect();
    if valid.len() < total {
        warn!(
            "Dropped {} star records with non-finite positions",
            total - valid.len()
        );
    }
    valid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingest_drops_non_finite_positions() {
        let stars = vec![
            Star::new(1, [0.0, 1.0, 2.0], 1.0, 1.0),
            Star::new(2, [f32::NAN, 1.0, 2.0], 1.0, 1.0),
            Star::new(3, [0.0, f32::INFINITY, 2.0], 1.0, 1.0),
        ];
        let ids: Vec<u32> = ingest(stars).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn replacing_bumps_generation() {
        let mut catalog = Catalog::default();
        assert_eq!(catalog.generation(), 0);
        catalog.replace(Vec::new());
        catalog.replace(vec![Star::new(1, [0.0; 3], 1.0, 1.0)]);
        assert_eq!(catalog.generation(), 2);
        assert_eq!(catalog.stars().len(), 1);
    }

    #[test]
    fn catalog_errors_read_as_user_messages() {
        let err = CatalogError::LoadFailed {
            path: "data/stars.json".to_string(),
            reason: "not found".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to load star data");
    }
}
