use bevy::prelude::*;
use constants::solar_system::ORBITAL_SPEED_FACTOR_MAX;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MagnitudeType {
    Apparent,
    Absolute,
}

/// Numeric filters applied after mode selection.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterConfig {
    pub magnitude: f32,
    pub magnitude_type: MagnitudeType,
    pub min_temperature: f32,
    pub max_distance: f32,
    /// 0 pauses orbital animation; 1 is the base rate.
    pub orbital_speed_factor: f32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            magnitude: 6.0,
            magnitude_type: MagnitudeType::Apparent,
            min_temperature: 0.0,
            max_distance: 1000.0,
            orbital_speed_factor: 1.0,
        }
    }
}

/// A single `setFilter(key, value)` command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterUpdate {
    Magnitude(f32),
    MagnitudeType(MagnitudeType),
    MinTemperature(f32),
    MaxDistance(f32),
    OrbitalSpeedFactor(f32),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterUpdateError {
    #[error("unknown filter key: {0}")]
    UnknownKey(String),

    #[error("invalid value for filter {key}: {value}")]
    InvalidValue { key: String, value: String },
}

impl FilterUpdate {
    /// Parse a key/value pair as sent by the UI.
    pub fn parse(key: &str, value: &serde_json::Value) -> Result<Self, FilterUpdateError> {
        let invalid = || FilterUpdateError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        let number = || {
            value
                .as_f64()
                .map(|v| v as f32)
                .filter(|v| v.is_finite())
                .ok_or_else(invalid)
        };

        match key {
            "magnitude" => number().map(Self::Magnitude),
            "magnitudeType" => serde_json::from_value::<MagnitudeType>(value.clone())
                .map(Self::MagnitudeType)
                .map_err(|_| invalid()),
            "minTemp" | "minTemperature" => number().map(Self::MinTemperature),
            "maxDistance" => number().map(Self::MaxDistance),
            "orbitalSpeed" | "orbitalSpeedFactor" => number().map(Self::OrbitalSpeedFactor),
            _ => Err(FilterUpdateError::UnknownKey(key.to_string())),
        }
    }
}

impl FilterConfig {
    pub fn apply(&mut self, update: FilterUpdate) {
        match update {
            FilterUpdate::Magnitude(v) => self.magnitude = v,
            FilterUpdate::MagnitudeType(t) => self.magnitude_type = t,
            FilterUpdate::MinTemperature(v) => self.min_temperature = v,
            FilterUpdate::MaxDistance(v) => self.max_distance = v,
            FilterUpdate::OrbitalSpeedFactor(v) => {
                self.orbital_speed_factor = v.clamp(0.0, ORBITAL_SPEED_FACTOR_MAX)
            }
        }
    }

    /// Everything except the orbital speed, which only drives animation and
    /// must not trigger a star recompute.
    pub fn star_filters_eq(&self, other: &Self) -> bool {
        self.magnitude == other.magnitude
            && self.magnitude_type == other.magnitude_type
            && self.min_temperature == other.min_temperature
            && self.max_distance == other.max_distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_ui_keys() {
        assert_eq!(
            FilterUpdate::parse("magnitude", &json!(4.5)),
            Ok(FilterUpdate::Magnitude(4.5))
        );
        assert_eq!(
            FilterUpdate::parse("magnitudeType", &json!("absolute")),
            Ok(FilterUpdate::MagnitudeType(MagnitudeType::Absolute))
        );
        assert_eq!(
            FilterUpdate::parse("minTemp", &json!(3000)),
            Ok(FilterUpdate::MinTemperature(3000.0))
        );
    }

    #[test]
    fn rejects_unknown_keys_and_bad_values() {
        assert!(matches!(
            FilterUpdate::parse("colour", &json!(1)),
            Err(FilterUpdateError::UnknownKey(_))
        ));
        assert!(matches!(
            FilterUpdate::parse("magnitude", &json!("bright")),
            Err(FilterUpdateError::InvalidValue { .. })
        ));
        assert!(matches!(
            FilterUpdate::parse("magnitudeType", &json!("relative")),
            Err(FilterUpdateError::InvalidValue { .. })
        ));
    }

    #[test]
    fn orbital_speed_is_clamped() {
        let mut config = FilterConfig::default();
        config.apply(FilterUpdate::OrbitalSpeedFactor(42.0));
        assert_eq!(config.orbital_speed_factor, 10.0);
        config.apply(FilterUpdate::OrbitalSpeedFactor(-1.0));
        assert_eq!(config.orbital_speed_factor, 0.0);
    }

    #[test]
    fn orbital_speed_does_not_affect_star_filter_equality() {
        let base = FilterConfig::default();
        let mut other = base.clone();
        other.apply(FilterUpdate::OrbitalSpeedFactor(3.0));
        assert!(base.star_filters_eq(&other));
        other.apply(FilterUpdate::MaxDistance(10.0));
        assert!(!base.star_filters_eq(&other));
    }
}
