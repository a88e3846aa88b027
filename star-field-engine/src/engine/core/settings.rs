use bevy::prelude::*;
use constants::camera::*;
use constants::render_settings::{PICK_DEBOUNCE_SECS, STAR_PICK_THRESHOLD_PX};
use serde::{Deserialize, Serialize};

const DEFAULT_CATALOG_PATH: &str = "data/stars.catalog.json";

/// Host-tunable engine settings. Every field has a default, so a partial JSON
/// object overrides only what it names.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StarFieldSettings {
    pub catalog_path: String,
    pub pick_threshold_px: f32,
    pub pick_debounce_secs: f32,
    pub fly_base_speed: f32,
    pub fly_boosted_speed: f32,
    pub sensitivity_min: f32,
    pub sensitivity_max: f32,
    pub sensitivity_step: f32,
    pub orbit_damping: f32,
    pub orbit_min_distance: f32,
    pub orbit_max_distance: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for StarFieldSettings {
    fn default() -> Self {
        Self {
            catalog_path: DEFAULT_CATALOG_PATH.to_string(),
            pick_threshold_px: STAR_PICK_THRESHOLD_PX,
            pick_debounce_secs: PICK_DEBOUNCE_SECS,
            fly_base_speed: FLY_BASE_SPEED,
            fly_boosted_speed: FLY_BOOSTED_SPEED,
            sensitivity_min: SENSITIVITY_MIN,
            sensitivity_max: SENSITIVITY_MAX,
            sensitivity_step: SENSITIVITY_STEP,
            orbit_damping: ORBIT_DAMPING_FACTOR,
            orbit_min_distance: ORBIT_MIN_DISTANCE,
            orbit_max_distance: ORBIT_MAX_DISTANCE,
            fov_degrees: CAMERA_FOV_DEGREES,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        }
    }
}

impl StarFieldSettings {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
