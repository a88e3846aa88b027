//! Catalog records and static reference tables.
//!
//! Star records arrive from the ingestion side and are immutable once
//! accepted; the solar-system table and constellation figures are built from
//! the `constants` crate.

/// Solar-system body records and the reference table resource.
pub mod celestial;

/// Constellation code to catalog-id edge graph.
pub mod constellation;

/// Star record type and its derived quantities.
pub mod star;

/// Catalog asset, the live catalog resource, and data errors.
pub mod star_catalog;

pub use celestial::{CelestialObject, CelestialObjectType, SolarSystemTable};
pub use constellation::ConstellationGraph;
pub use star::Star;
pub use star_catalog::{Catalog, CatalogError, CatalogLoad, StarCatalog, ingest};
