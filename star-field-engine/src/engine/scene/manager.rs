use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;

use super::constellation_lines::{
    CachedConstellation, ConstellationCache, ConstellationLines, build_constellation_mesh,
    constellation_segments, line_material,
};
use super::error::SceneBuildError;
use super::solar_system::{
    SolarSystemBlueprint, SolarSystemNode, build_solar_system, dispose_solar_system,
    spawn_solar_system,
};
use super::star_field::{StarFieldMaterial, build_star_field_mesh};
use crate::engine::camera::CameraController;
use crate::engine::catalog::{Catalog, ConstellationGraph, SolarSystemTable, Star};
use crate::engine::filter::{ActiveModes, FilteredStars, SelectedConstellation, ViewMode};
use crate::engine::picking::Selection;

/// Tags the star-field point cloud entity.
#[derive(Component)]
pub struct StarFieldNode;

#[derive(Debug)]
struct StarFieldEntity {
    entity: Entity,
    mesh: Handle<Mesh>,
}

/// Everything the scene manager has put into the world.
#[derive(Resource, Debug, Default)]
pub struct SceneNodes {
    star_field: Option<StarFieldEntity>,
    star_material: Option<Handle<StarFieldMaterial>>,
    rendered: Vec<Star>,
    pub constellations: ConstellationCache,
    solar_system: Option<SolarSystemNode>,
    last_modes: ActiveModes,
    reconciled_revision: Option<u64>,
    catalog_generation: u64,
}

impl SceneNodes {
    /// Stars drawn by the current star field.
    pub fn rendered_stars(&self) -> &[Star] {
        &self.rendered
    }

    pub fn has_solar_system(&self) -> bool {
        self.solar_system.is_some()
    }

    pub fn star_field_entity(&self) -> Option<Entity> {
        self.star_field.as_ref().map(|node| node.entity)
    }

    fn needs_reconcile(&self, revision: u64) -> bool {
        self.reconciled_revision != Some(revision)
    }
}

pub enum SolarSystemAction {
    Keep,
    Build(SolarSystemBlueprint),
    Dispose,
}

/// New geometry for one reconciliation, built before anything in the world
/// is touched.
pub struct ReconcilePlan {
    /// `None` when no star survives the filter.
    pub star_field: Option<Mesh>,
    /// Figures that are not cached yet, or whose resolved edges changed.
    pub new_constellations: Vec<NewConstellation>,
    /// Codes whose lines should be shown after the commit.
    pub active_codes: Vec<String>,
    pub solar_system: Option<SolarSystemAction>,
    pub reset_camera: bool,
}

/// A figure mesh to spawn, replacing any cached entry for the same code.
pub struct NewConstellation {
    pub code: String,
    pub edges: Vec<(u32, u32)>,
    pub mesh: Mesh,
}

/// Distinct constellation codes among `stars`, in first-seen order.
pub fn constellation_codes(stars: &[Star]) -> Vec<String> {
    let mut codes: Vec<String> = Vec::new();
    for code in stars.iter().filter_map(|s| s.constellation_code.as_deref()) {
        if !codes.iter().any(|c| c == code) {
            codes.push(code.to_string());
        }
    }
    codes
}

/// Build every node the scene needs for `stars` under `modes`.
///
/// `cache` holds the figures that can be reused; a cached code is rebuilt
/// only when its resolved edges differ. Fails without side effects.
#[allow(clippy::too_many_arguments)]
pub fn plan_reconcile(
    stars: &[Star],
    graph: &ConstellationGraph,
    table: &SolarSystemTable,
    modes: &ActiveModes,
    last_modes: &ActiveModes,
    highlight: Option<&str>,
    cache: &ConstellationCache,
    solar_present: bool,
) -> Result<ReconcilePlan, SceneBuildError> {
    let star_field = if stars.is_empty() {
        None
    } else {
        Some(build_star_field_mesh(stars, highlight)?)
    };

    let mut new_constellations = Vec::new();
    let mut active_codes = Vec::new();
    if modes.contains(ViewMode::Constellations) {
        for code in constellation_codes(stars) {
            let Some(figure) = constellation_segments(stars, graph, &code) else {
                continue;
            };
            if cache.reusable(&code, &figure.edges).is_none() {
                let mesh = build_constellation_mesh(&code, &figure.segments)?;
                new_constellations.push(NewConstellation {
                    code: code.clone(),
                    edges: figure.edges,
                    mesh,
                });
            }
            active_codes.push(code);
        }
    }

    let solar_system = match (modes.contains(ViewMode::SolarSystem), solar_present) {
        (true, true) => Some(SolarSystemAction::Keep),
        (true, false) => Some(SolarSystemAction::Build(build_solar_system(table)?)),
        (false, true) => Some(SolarSystemAction::Dispose),
        (false, false) => None,
    };

    let reset_camera =
        modes.is_only(ViewMode::SolarSystem) && !last_modes.contains(ViewMode::SolarSystem);

    Ok(ReconcilePlan {
        star_field,
        new_constellations,
        active_codes,
        solar_system,
        reset_camera,
    })
}

fn dispose_constellation(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    entry: CachedConstellation,
) {
    meshes.remove(&entry.mesh);
    materials.remove(&entry.material);
    commands.entity(entry.entity).despawn();
}

/// Recompute stage: bring the world in line with the latest filter result.
///
/// Runs only when the filter revision moved. A build failure is logged and
/// leaves the previous scene untouched.
#[allow(clippy::too_many_arguments)]
pub fn reconcile_scene(
    mut commands: Commands,
    filtered: Res<FilteredStars>,
    catalog: Res<Catalog>,
    graph: Res<ConstellationGraph>,
    table: Res<SolarSystemTable>,
    modes: Res<ActiveModes>,
    selected: Res<SelectedConstellation>,
    mut nodes: ResMut<SceneNodes>,
    mut camera: ResMut<CameraController>,
    mut selection: ResMut<Selection>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut star_materials: ResMut<Assets<StarFieldMaterial>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !nodes.needs_reconcile(filtered.revision()) {
        return;
    }
    let nodes = nodes.as_mut();

    // A reloaded catalog invalidates every cached figure.
    let reloaded = nodes.catalog_generation != catalog.generation();
    let empty_cache = ConstellationCache::default();
    let reusable = if reloaded {
        &empty_cache
    } else {
        &nodes.constellations
    };

    let plan = match plan_reconcile(
        filtered.stars(),
        &graph,
        &table,
        &modes,
        &nodes.last_modes,
        selected.0.as_deref(),
        reusable,
        nodes.solar_system.is_some(),
    ) {
        Ok(plan) => plan,
        Err(err) => {
            error!("Scene reconciliation aborted: {err}");
            nodes.reconciled_revision = Some(filtered.revision());
            return;
        }
    };

    if reloaded {
        for entry in nodes.constellations.drain() {
            dispose_constellation(&mut commands, &mut meshes, &mut materials, entry);
        }
        nodes.catalog_generation = catalog.generation();
    }

    if let Some(old) = nodes.star_field.take() {
        meshes.remove(&old.mesh);
        commands.entity(old.entity).despawn();
    }
    if let Some(mesh) = plan.star_field {
        let material = nodes
            .star_material
            .get_or_insert_with(|| star_materials.add(StarFieldMaterial::default()))
            .clone();
        let mesh = meshes.add(mesh);
        let entity = commands
            .spawn((
                Mesh3d(mesh.clone()),
                MeshMaterial3d(material),
                Transform::IDENTITY,
                NoFrustumCulling,
                StarFieldNode,
            ))
            .id();
        nodes.star_field = Some(StarFieldEntity { entity, mesh });
    }
    nodes.rendered = filtered.stars().to_vec();

    for NewConstellation { code, edges, mesh } in plan.new_constellations {
        if let Some(stale) = nodes.constellations.remove(&code) {
            dispose_constellation(&mut commands, &mut meshes, &mut materials, stale);
        }
        let mesh = meshes.add(mesh);
        let material = materials.add(line_material(false));
        let entity = commands
            .spawn((
                Mesh3d(mesh.clone()),
                MeshMaterial3d(material.clone()),
                Transform::IDENTITY,
                Visibility::Hidden,
                ConstellationLines { code: code.clone() },
            ))
            .id();
        debug!("Cached constellation lines for {code}");
        nodes.constellations.insert(
            code,
            CachedConstellation {
                entity,
                mesh,
                material,
                edges,
                active: false,
                highlighted: false,
            },
        );
    }
    nodes
        .constellations
        .set_active(plan.active_codes.iter().map(String::as_str));

    match plan.solar_system {
        Some(SolarSystemAction::Build(blueprint)) => {
            nodes.solar_system = Some(spawn_solar_system(
                &mut commands,
                &mut meshes,
                &mut materials,
                blueprint,
            ));
        }
        Some(SolarSystemAction::Dispose) => {
            if let Some(node) = nodes.solar_system.take() {
                dispose_solar_system(&mut commands, &mut meshes, &mut materials, node);
            }
            // The selected body left the scene with its group.
            if selection.object().is_some() {
                selection.clear_object();
            }
        }
        Some(SolarSystemAction::Keep) | None => {}
    }

    if plan.reset_camera {
        info!("Entering solar-system view, resetting camera");
        camera.reset_to_overview();
    }

    nodes.last_modes = modes.clone();
    nodes.reconciled_revision = Some(filtered.revision());
    debug!(
        "Scene reconciled at revision {}: {} stars, {} cached figures",
        filtered.revision(),
        nodes.rendered.len(),
        nodes.constellations.len()
    );
}

/// Release every node, for teardown.
pub fn clear_scene(
    commands: &mut Commands,
    nodes: &mut SceneNodes,
    meshes: &mut Assets<Mesh>,
    star_materials: &mut Assets<StarFieldMaterial>,
    materials: &mut Assets<StandardMaterial>,
) {
    if let Some(old) = nodes.star_field.take() {
        meshes.remove(&old.mesh);
        commands.entity(old.entity).despawn();
    }
    if let Some(material) = nodes.star_material.take() {
        star_materials.remove(&material);
    }
    for entry in nodes.constellations.drain() {
        dispose_constellation(commands, meshes, materials, entry);
    }
    if let Some(node) = nodes.solar_system.take() {
        dispose_solar_system(commands, meshes, materials, node);
    }
    nodes.rendered.clear();
}
