use super::free_fly::FreeFlyState;
use super::orbit::OrbitState;
use crate::engine::core::settings::StarFieldSettings;
use bevy::prelude::*;
use constants::camera::{
    CANONICAL_CAMERA_POSITION, CANONICAL_CAMERA_TARGET, ORBIT_ZOOM_STEP, SENSITIVITY_DEFAULT,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CameraMode {
    #[default]
    Orbit,
    FreeFly,
}

impl CameraMode {
    /// Text shown next to the camera toggle.
    pub fn label(self) -> &'static str {
        match self {
            Self::Orbit => "Orbit Camera",
            Self::FreeFly => "Free Camera",
        }
    }
}

/// Camera state machine. The only transition is [`CameraController::toggle`].
///
/// `pose` is authoritative; the camera entity's `Transform` is written from
/// it once per frame during integration.
#[derive(Resource, Debug, Clone)]
pub struct CameraController {
    mode: CameraMode,
    pub pose: Transform,
    pub orbit: OrbitState,
    pub fly: FreeFlyState,
    keyboard_listening: bool,
    pub fov_y: f32,
}

impl CameraController {
    pub fn from_settings(settings: &StarFieldSettings) -> Self {
        Self {
            mode: CameraMode::Orbit,
            pose: overview_pose(),
            orbit: OrbitState::new(
                settings.orbit_damping,
                settings.orbit_min_distance,
                settings.orbit_max_distance,
                ORBIT_ZOOM_STEP,
            ),
            fly: FreeFlyState::new(
                settings.fly_base_speed,
                settings.fly_boosted_speed,
                SENSITIVITY_DEFAULT,
                (settings.sensitivity_min, settings.sensitivity_max),
                settings.sensitivity_step,
            ),
            keyboard_listening: false,
            fov_y: settings.fov_degrees.to_radians(),
        }
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    /// Whether keyboard movement input is currently accepted.
    pub fn is_listening(&self) -> bool {
        self.keyboard_listening
    }

    /// Switch between Orbit and FreeFly and return the new mode.
    ///
    /// Leaving FreeFly always lands on the overview pose, not on the pose
    /// held before FreeFly was entered.
    pub fn toggle(&mut self) -> CameraMode {
        match self.mode {
            CameraMode::Orbit => {
                self.orbit.enabled = false;
                self.orbit.clear_motion();
                self.keyboard_listening = true;
                self.mode = CameraMode::FreeFly;
            }
            CameraMode::FreeFly => {
                self.stop_listening();
                self.orbit.enabled = true;
                self.reset_to_overview();
                self.mode = CameraMode::Orbit;
            }
        }
        info!("Camera mode: {:?}", self.mode);
        self.mode
    }

    /// Unregister keyboard input and release held keys.
    pub fn stop_listening(&mut self) {
        self.keyboard_listening = false;
        self.fly.clear_input();
    }

    pub fn reset_to_overview(&mut self) {
        self.pose = overview_pose();
        self.orbit.target = CANONICAL_CAMERA_TARGET;
        self.orbit.clear_motion();
    }

    pub fn look(&mut self, delta_px: Vec2) {
        if self.mode == CameraMode::FreeFly {
            self.fly.look(&mut self.pose, delta_px);
        }
    }

    /// One frame of movement for the active mode.
    pub fn integrate(&mut self) {
        match self.mode {
            CameraMode::Orbit => self.orbit.update(&mut self.pose),
            CameraMode::FreeFly => self.fly.step(&mut self.pose),
        }
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::from_settings(&StarFieldSettings::default())
    }
}

pub fn overview_pose() -> Transform {
    Transform::from_translation(CANONICAL_CAMERA_POSITION)
        .looking_at(CANONICAL_CAMERA_TARGET, Vec3::Y)
}
