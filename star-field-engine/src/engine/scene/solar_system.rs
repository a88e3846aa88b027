use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use constants::render_settings::{
    ORBIT_RING_COLOUR, ORBIT_RING_OPACITY, ORBIT_RING_SEGMENTS, hex_to_rgb,
};
use constants::solar_system::{
    ORBITER_RADIUS_BOOST, REFERENCE_RADIUS_BOOST, SECONDS_PER_ORBITAL_DAY, SOLAR_SYSTEM_SCALE,
};
use std::f32::consts::TAU;

use super::error::SceneBuildError;
use crate::engine::catalog::{CelestialObject, SolarSystemTable};

const SPHERE_SECTORS: u32 = 32;
const SPHERE_STACKS: u32 = 32;

/// A pickable solar-system body and its orbit parameters.
#[derive(Component, Debug, Clone)]
pub struct CelestialBody {
    pub record: CelestialObject,
    /// Rendered sphere radius in world units.
    pub render_radius: f32,
    pub orbit_radius: f32,
    /// Radians per second at orbital speed factor 1; 0 for the reference body.
    pub angular_speed: f32,
}

#[derive(Component, Debug)]
pub struct OrbitRing;

/// Angular speed for an orbital period in days.
pub fn base_angular_speed(period_days: Option<f32>) -> f32 {
    match period_days {
        Some(days) if days > 0.0 => TAU / (days * SECONDS_PER_ORBITAL_DAY),
        _ => 0.0,
    }
}

/// Everything needed to spawn one body.
pub struct BodyBlueprint {
    pub body: CelestialBody,
    pub mesh: Mesh,
    pub colour: Color,
    pub unlit: bool,
    pub translation: Vec3,
}

/// The full solar-system group, built but not yet in the world.
pub struct SolarSystemBlueprint {
    pub bodies: Vec<BodyBlueprint>,
    pub rings: Vec<Mesh>,
}

pub fn build_solar_system(table: &SolarSystemTable) -> Result<SolarSystemBlueprint, SceneBuildError> {
    let mut bodies = Vec::with_capacity(table.bodies.len());
    let mut rings = Vec::new();

    for record in &table.bodies {
        let boost = if record.is_reference() {
            REFERENCE_RADIUS_BOOST
        } else {
            ORBITER_RADIUS_BOOST
        };
        let render_radius = record.radius * SOLAR_SYSTEM_SCALE * boost;
        let orbit_radius = record.distance_from_reference * SOLAR_SYSTEM_SCALE;
        if !render_radius.is_finite() || !orbit_radius.is_finite() {
            return Err(SceneBuildError::NonFiniteGeometry {
                node: record.name.clone(),
            });
        }
        if render_radius <= 0.0 {
            return Err(SceneBuildError::DegenerateGeometry {
                node: record.name.clone(),
            });
        }

        if !record.is_reference() {
            rings.push(build_orbit_ring(orbit_radius, ORBIT_RING_SEGMENTS)?);
        }

        let [r, g, b] = hex_to_rgb(record.color);
        bodies.push(BodyBlueprint {
            mesh: Sphere::new(render_radius)
                .mesh()
                .uv(SPHERE_SECTORS, SPHERE_STACKS),
            colour: Color::srgb(r, g, b),
            unlit: record.is_reference(),
            translation: Vec3::new(orbit_radius, 0.0, 0.0),
            body: CelestialBody {
                record: record.clone(),
                render_radius,
                orbit_radius,
                angular_speed: base_angular_speed(record.orbital_period),
            },
        });
    }

    Ok(SolarSystemBlueprint { bodies, rings })
}

/// Closed circle in the XZ plane as a line list.
pub fn build_orbit_ring(radius: f32, segments: usize) -> Result<Mesh, SceneBuildError> {
    if segments < 3 {
        return Err(SceneBuildError::DegenerateGeometry {
            node: "orbit ring".to_string(),
        });
    }
    let vertices: Vec<[f32; 3]> = (0..segments)
        .map(|i| {
            let angle = TAU * i as f32 / segments as f32;
            [radius * angle.cos(), 0.0, radius * angle.sin()]
        })
        .collect();
    let indices: Vec<u32> = (0..segments as u32)
        .flat_map(|i| [i, (i + 1) % segments as u32])
        .collect();

    let mut mesh = Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, vertices);
    mesh.insert_indices(Indices::U32(indices));
    Ok(mesh)
}

/// Spawned group: the entities and the GPU handles they own.
#[derive(Debug, Default)]
pub struct SolarSystemNode {
    pub entities: Vec<Entity>,
    pub meshes: Vec<Handle<Mesh>>,
    pub materials: Vec<Handle<StandardMaterial>>,
}

pub fn spawn_solar_system(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    blueprint: SolarSystemBlueprint,
) -> SolarSystemNode {
    let mut node = SolarSystemNode::default();

    for body in blueprint.bodies {
        let mesh = meshes.add(body.mesh);
        let material = materials.add(StandardMaterial {
            base_color: body.colour,
            unlit: body.unlit,
            ..default()
        });
        let entity = commands
            .spawn((
                Mesh3d(mesh.clone()),
                MeshMaterial3d(material.clone()),
                Transform::from_translation(body.translation),
                body.body,
            ))
            .id();
        node.entities.push(entity);
        node.meshes.push(mesh);
        node.materials.push(material);
    }

    if !blueprint.rings.is_empty() {
        let [r, g, b] = hex_to_rgb(ORBIT_RING_COLOUR);
        let ring_material = materials.add(StandardMaterial {
            base_color: Color::srgba(r, g, b, ORBIT_RING_OPACITY),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        });
        for ring in blueprint.rings {
            let mesh = meshes.add(ring);
            let entity = commands
                .spawn((
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(ring_material.clone()),
                    Transform::IDENTITY,
                    OrbitRing,
                ))
                .id();
            node.entities.push(entity);
            node.meshes.push(mesh);
        }
        node.materials.push(ring_material);
    }

    info!("Solar system group created ({} entities)", node.entities.len());
    node
}

/// Release the group's geometry and materials, then remove its entities.
pub fn dispose_solar_system(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    node: SolarSystemNode,
) {
    for mesh in &node.meshes {
        meshes.remove(mesh);
    }
    for material in &node.materials {
        materials.remove(material);
    }
    for entity in node.entities {
        commands.entity(entity).despawn();
    }
    info!("Solar system group disposed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_group_has_one_ring_per_orbiter() {
        let blueprint = build_solar_system(&SolarSystemTable::builtin()).unwrap();
        assert_eq!(blueprint.bodies.len(), 9);
        assert_eq!(blueprint.rings.len(), 8);
        let sun = &blueprint.bodies[0];
        assert!(sun.unlit);
        assert_eq!(sun.translation, Vec3::ZERO);
        assert_eq!(sun.body.angular_speed, 0.0);
    }

    #[test]
    fn earth_scales_and_speed() {
        let blueprint = build_solar_system(&SolarSystemTable::builtin()).unwrap();
        let earth = blueprint
            .bodies
            .iter()
            .find(|b| b.body.record.name == "Earth")
            .unwrap();
        assert!((earth.body.orbit_radius - 299.2).abs() < 0.01);
        assert!((earth.body.render_radius - 25.484).abs() < 0.01);
        let expected = TAU / (365.0 * 60.0);
        assert!((earth.body.angular_speed - expected).abs() < 1e-9);
    }

    #[test]
    fn ring_is_closed() {
        let ring = build_orbit_ring(10.0, 64).unwrap();
        let Some(Indices::U32(indices)) = ring.indices() else {
            panic!("indices missing");
        };
        assert_eq!(indices.len(), 128);
        assert_eq!(indices[127], 0);
        assert!(build_orbit_ring(10.0, 2).is_err());
    }

    #[test]
    fn zero_radius_body_is_rejected() {
        let mut table = SolarSystemTable::builtin();
        table.bodies[3].radius = 0.0;
        assert!(matches!(
            build_solar_system(&table),
            Err(SceneBuildError::DegenerateGeometry { .. })
        ));
    }
}
