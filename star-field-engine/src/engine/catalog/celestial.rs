use bevy::prelude::*;
use constants::solar_system::{BodyInfo, ORBITERS, REFERENCE_BODY};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CelestialObjectType {
    /// The body everything else orbits.
    Reference,
    Orbiter,
}

/// A body of the solar-system model. Distances and radii are in kilometres.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CelestialObject {
    pub name: String,
    pub radius: f32,
    pub distance_from_reference: f32,
    pub color: u32,
    pub temperature: f32,
    pub mass: f32,
    pub orbital_period: Option<f32>,
    pub moon_count: u32,
    pub object_type: CelestialObjectType,
    pub spectral_type: Option<String>,
}

impl CelestialObject {
    fn from_info(info: &BodyInfo, object_type: CelestialObjectType) -> Self {
        Self {
            name: info.name.to_string(),
            radius: info.radius,
            distance_from_reference: info.distance,
            color: info.colour,
            temperature: info.temperature,
            mass: info.mass,
            orbital_period: info.orbital_period,
            moon_count: info.moons,
            object_type,
            spectral_type: info.spectral_type.map(str::to_string),
        }
    }

    pub fn is_reference(&self) -> bool {
        self.object_type == CelestialObjectType::Reference
    }
}

/// Read-only solar-system reference table: the reference body first, then
/// orbiters in order of distance.
#[derive(Resource, Debug, Clone)]
pub struct SolarSystemTable {
    pub bodies: Vec<CelestialObject>,
}

impl SolarSystemTable {
    pub fn builtin() -> Self {
        let mut bodies = vec![CelestialObject::from_info(
            &REFERENCE_BODY,
            CelestialObjectType::Reference,
        )];
        bodies.extend(
            ORBITERS
                .iter()
                .map(|info| CelestialObject::from_info(info, CelestialObjectType::Orbiter)),
        );
        Self { bodies }
    }

    #[cfg(test)]
    pub fn reference(&self) -> Option<&CelestialObject> {
        self.bodies.iter().find(|b| b.is_reference())
    }

    #[cfg(test)]
    pub fn orbiters(&self) -> impl Iterator<Item = &CelestialObject> {
        self.bodies.iter().filter(|b| !b.is_reference())
    }
}

impl Default for SolarSystemTable {
    fn default() -> Self {
        Self::builtin()
    }
}
