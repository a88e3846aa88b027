use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use constants::render_settings::{
    CONSTELLATION_LINE_COLOUR, CONSTELLATION_LINE_OPACITY, CONSTELLATION_SELECTED_LINE_COLOUR,
    hex_to_rgb,
};
use std::collections::{BTreeMap, HashMap};

use super::error::SceneBuildError;
use crate::engine::catalog::{ConstellationGraph, Star};

/// Tags the line entity of one constellation figure.
#[derive(Component, Debug, Clone)]
pub struct ConstellationLines {
    pub code: String,
}

/// Edges of one figure that resolved against the current stars.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFigure {
    /// Catalog-id pairs, in graph order.
    pub edges: Vec<(u32, u32)>,
    pub segments: Vec<[Vec3; 2]>,
}

/// World-space segments of a figure whose two endpoints are both among
/// `stars`. `None` when the code is unknown or no edge resolves.
pub fn constellation_segments(
    stars: &[Star],
    graph: &ConstellationGraph,
    code: &str,
) -> Option<ResolvedFigure> {
    let edges = graph.edges(code)?;
    let positions: HashMap<u32, Vec3> = stars
        .iter()
        .filter_map(|s| s.catalog_id.map(|id| (id, s.world_position())))
        .collect();

    let (edges, segments): (Vec<(u32, u32)>, Vec<[Vec3; 2]>) = edges
        .iter()
        .filter_map(|&(a, b)| Some(((a, b), [*positions.get(&a)?, *positions.get(&b)?])))
        .unzip();

    (!segments.is_empty()).then_some(ResolvedFigure { edges, segments })
}

pub fn build_constellation_mesh(
    code: &str,
    segments: &[[Vec3; 2]],
) -> Result<Mesh, SceneBuildError> {
    if segments.iter().flatten().any(|p| !p.is_finite()) {
        return Err(SceneBuildError::NonFiniteGeometry {
            node: format!("constellation {code}"),
        });
    }

    let vertices: Vec<[f32; 3]> = segments.iter().flatten().map(|p| p.to_array()).collect();
    let indices: Vec<u32> = (0..vertices.len() as u32).collect();

    let mut mesh = Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, vertices);
    mesh.insert_indices(Indices::U32(indices));
    Ok(mesh)
}

pub fn line_colour(selected: bool) -> Color {
    let hex = if selected {
        CONSTELLATION_SELECTED_LINE_COLOUR
    } else {
        CONSTELLATION_LINE_COLOUR
    };
    let [r, g, b] = hex_to_rgb(hex);
    Color::srgba(r, g, b, CONSTELLATION_LINE_OPACITY)
}

pub fn line_material(selected: bool) -> StandardMaterial {
    StandardMaterial {
        base_color: line_colour(selected),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    }
}

/// One cached figure and the GPU handles it owns.
#[derive(Debug, Clone)]
pub struct CachedConstellation {
    pub entity: Entity,
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
    /// Edges the mesh was built from; a different set means a rebuild.
    pub edges: Vec<(u32, u32)>,
    /// Present in the latest filter result.
    pub active: bool,
    /// Material currently shows the selected colour.
    pub highlighted: bool,
}

/// Arena of constellation line nodes keyed by code.
///
/// Entries outlive recomputes; an entry whose constellation drops out of the
/// filter result is only deactivated, so bringing it back is free. An entry
/// is replaced when the filter changes which of its edges resolve.
#[derive(Debug, Default)]
pub struct ConstellationCache {
    entries: BTreeMap<String, CachedConstellation>,
}

impl ConstellationCache {
    #[cfg(test)]
    pub fn get(&self, code: &str) -> Option<&CachedConstellation> {
        self.entries.get(code)
    }

    /// Cached entry for `code` if it was built from exactly `edges`.
    pub fn reusable(&self, code: &str, edges: &[(u32, u32)]) -> Option<&CachedConstellation> {
        self.entries.get(code).filter(|entry| entry.edges == edges)
    }

    pub fn remove(&mut self, code: &str) -> Option<CachedConstellation> {
        self.entries.remove(code)
    }

    pub fn insert(&mut self, code: String, entry: CachedConstellation) {
        self.entries.insert(code, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut CachedConstellation)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    /// Mark exactly the codes in `active` as active.
    pub fn set_active<'a>(&mut self, active: impl IntoIterator<Item = &'a str>) {
        let active: Vec<&str> = active.into_iter().collect();
        for (code, entry) in self.entries.iter_mut() {
            entry.active = active.contains(&code.as_str());
        }
    }

    /// Remove every entry, returning them for disposal.
    pub fn drain(&mut self) -> Vec<CachedConstellation> {
        std::mem::take(&mut self.entries).into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star(id: u32, catalog_id: u32) -> Star {
        let mut star = Star::new(id, [id as f32, 0.0, 0.0], 1.0, 1.0);
        star.catalog_id = Some(catalog_id);
        star
    }

    #[test]
    fn segments_skip_missing_endpoints() {
        let graph = ConstellationGraph::builtin();
        // Cas: 15-32-40-43; 40 is absent.
        let stars = [star(1, 15), star(2, 32), star(3, 43)];
        let figure = constellation_segments(&stars, &graph, "Cas").unwrap();
        assert_eq!(figure.edges, vec![(15, 32)]);
        assert_eq!(
            figure.segments[0],
            [Vec3::new(100.0, 0.0, 0.0), Vec3::new(200.0, 0.0, 0.0)]
        );
    }

    #[test]
    fn no_resolved_edge_is_no_renderable() {
        let graph = ConstellationGraph::builtin();
        let stars = [star(1, 15), star(3, 43)];
        assert!(constellation_segments(&stars, &graph, "Cas").is_none());
        assert!(constellation_segments(&stars, &graph, "Ori").is_none());
    }

    #[test]
    fn mesh_is_a_line_list() {
        let mesh = build_constellation_mesh("Cas", &[[Vec3::ZERO, Vec3::X], [Vec3::X, Vec3::Y]])
            .unwrap();
        assert_eq!(mesh.primitive_topology(), PrimitiveTopology::LineList);
        assert_eq!(mesh.count_vertices(), 4);
    }

    #[test]
    fn cache_activation_is_exact() {
        let mut cache = ConstellationCache::default();
        for (i, code) in ["And", "Cas"].into_iter().enumerate() {
            cache.insert(
                code.to_string(),
                CachedConstellation {
                    entity: Entity::from_raw(i as u32),
                    mesh: Handle::default(),
                    material: Handle::default(),
                    edges: vec![(15, 32)],
                    active: true,
                    highlighted: false,
                },
            );
        }
        cache.set_active(["Cas"]);
        assert!(!cache.get("And").unwrap().active);
        assert!(cache.get("Cas").unwrap().active);
        assert!(cache.reusable("Cas", &[(15, 32)]).is_some());
        assert!(cache.reusable("Cas", &[(15, 32), (32, 40)]).is_none());
        assert_eq!(cache.drain().len(), 2);
        assert!(cache.is_empty());
    }
}
