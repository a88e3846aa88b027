use bevy::prelude::*;
use std::f32::consts::{PI, TAU};

const POLAR_EPSILON: f32 = 1e-6;

/// Damped target-centred orbit control.
///
/// Pointer input accumulates into pending spherical/pan deltas; each
/// `update` applies a `damping` share of them and decays the rest, so motion
/// eases out over the following frames.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitState {
    pub target: Vec3,
    pub enabled: bool,
    pub damping: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    zoom_step: f32,
    /// Pending (azimuth, polar) change in radians.
    spherical_delta: Vec2,
    pan_offset: Vec3,
    scale: f32,
}

impl OrbitState {
    pub fn new(damping: f32, min_distance: f32, max_distance: f32, zoom_step: f32) -> Self {
        Self {
            target: Vec3::ZERO,
            enabled: true,
            damping,
            min_distance,
            max_distance,
            zoom_step,
            spherical_delta: Vec2::ZERO,
            pan_offset: Vec3::ZERO,
            scale: 1.0,
        }
    }

    /// Drop any pending motion.
    pub fn clear_motion(&mut self) {
        self.spherical_delta = Vec2::ZERO;
        self.pan_offset = Vec3::ZERO;
        self.scale = 1.0;
    }

    #[cfg(test)]
    pub fn is_settled(&self) -> bool {
        self.spherical_delta.length_squared() < 1e-12
            && self.pan_offset.length_squared() < 1e-12
            && self.scale == 1.0
    }

    /// Drag by `delta_px`; a full viewport height sweeps a full turn.
    pub fn rotate(&mut self, delta_px: Vec2, viewport_height: f32) {
        if !self.enabled || viewport_height <= 0.0 {
            return;
        }
        self.spherical_delta -= TAU * delta_px / viewport_height;
    }

    /// Positive `steps` zoom in.
    pub fn zoom(&mut self, steps: f32) {
        if !self.enabled || steps == 0.0 {
            return;
        }
        self.scale *= self.zoom_step.powf(steps);
    }

    /// Drag the target in the view plane so the point under the pointer
    /// follows it.
    pub fn pan(&mut self, delta_px: Vec2, pose: &Transform, fov_y: f32, viewport_height: f32) {
        if !self.enabled || viewport_height <= 0.0 {
            return;
        }
        let distance = (pose.translation - self.target).length();
        let units_per_px = 2.0 * distance * (fov_y * 0.5).tan() / viewport_height;
        let right = pose.rotation * Vec3::X;
        let up = pose.rotation * Vec3::Y;
        self.pan_offset += (-right * delta_px.x + up * delta_px.y) * units_per_px;
    }

    /// Advance one frame, writing the resulting pose.
    pub fn update(&mut self, pose: &mut Transform) {
        if !self.enabled {
            return;
        }

        let offset = pose.translation - self.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return;
        }
        let mut azimuth = offset.x.atan2(offset.z);
        let mut polar = (offset.y / radius).clamp(-1.0, 1.0).acos();

        azimuth += self.spherical_delta.x * self.damping;
        polar = (polar + self.spherical_delta.y * self.damping)
            .clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        let radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);
        self.target += self.pan_offset * self.damping;

        let offset = Vec3::new(
            radius * polar.sin() * azimuth.sin(),
            radius * polar.cos(),
            radius * polar.sin() * azimuth.cos(),
        );
        pose.translation = self.target + offset;
        pose.look_at(self.target, Vec3::Y);

        self.spherical_delta *= 1.0 - self.damping;
        self.pan_offset *= 1.0 - self.damping;
        self.scale = 1.0;
    }
}
