use bevy::prelude::*;
use constants::class::{DEFAULT_TEMPERATURE, UNRANKED_TEMPERATURE, spectral_class};
use constants::render_settings::WORLD_SCALE;
use serde::{Deserialize, Serialize};

/// One catalog star. Positions and distances are in parsecs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Star {
    pub id: u32,
    /// External catalog key (HIP) used to resolve constellation membership.
    #[serde(default)]
    pub catalog_id: Option<u32>,
    pub position: [f32; 3],
    pub apparent_magnitude: f32,
    #[serde(default)]
    pub absolute_magnitude: Option<f32>,
    pub distance: f32,
    #[serde(default)]
    pub spectral_type: Option<String>,
    #[serde(default)]
    pub proper_name: Option<String>,
    #[serde(default)]
    pub constellation_code: Option<String>,
    /// Relative to the reference star.
    #[serde(default)]
    pub luminosity: Option<f32>,
}

impl Star {
    /// Minimal record; optional fields start empty.
    pub fn new(id: u32, position: [f32; 3], apparent_magnitude: f32, distance: f32) -> Self {
        Self {
            id,
            catalog_id: None,
            position,
            apparent_magnitude,
            absolute_magnitude: None,
            distance,
            spectral_type: None,
            proper_name: None,
            constellation_code: None,
            luminosity: None,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    /// Position in scene units.
    pub fn world_position(&self) -> Vec3 {
        self.position() * WORLD_SCALE
    }

    pub fn has_finite_position(&self) -> bool {
        self.position.iter().all(|c| c.is_finite())
    }

    /// First character of the spectral type, which names its class.
    pub fn spectral_letter(&self) -> Option<char> {
        self.spectral_type.as_deref().and_then(|s| s.chars().next())
    }

    /// Class temperature, or `None` when the class is unknown or absent.
    pub fn class_temperature(&self) -> Option<f32> {
        self.spectral_letter()
            .and_then(spectral_class)
            .map(|c| c.temperature)
    }

    /// Temperature used by the numeric filters.
    pub fn temperature(&self) -> f32 {
        self.class_temperature().unwrap_or(DEFAULT_TEMPERATURE)
    }

    /// Temperature used by the `hottest` ranking, where unknown classes sink.
    pub fn ranking_temperature(&self) -> f32 {
        self.class_temperature().unwrap_or(UNRANKED_TEMPERATURE)
    }

    pub fn display_name(&self) -> String {
        match &self.proper_name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("Star {}", self.id),
        }
    }

    pub fn in_constellation(&self, code: &str) -> bool {
        self.constellation_code.as_deref() == Some(code)
    }
}
