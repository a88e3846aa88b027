use bevy::prelude::*;
use constants::camera::{FLY_LOOK_RATE, FLY_YAW_STEP};

/// Held movement keys. Each set flag moves or turns the camera once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementFlags {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub yaw_left: bool,
    pub yaw_right: bool,
}

impl MovementFlags {
    pub fn any(&self) -> bool {
        *self != Self::default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FreeFlyState {
    pub flags: MovementFlags,
    pub boosted: bool,
    sensitivity: f32,
    base_speed: f32,
    boosted_speed: f32,
    sensitivity_range: (f32, f32),
    sensitivity_step: f32,
}

impl FreeFlyState {
    pub fn new(
        base_speed: f32,
        boosted_speed: f32,
        sensitivity: f32,
        sensitivity_range: (f32, f32),
        sensitivity_step: f32,
    ) -> Self {
        Self {
            flags: MovementFlags::default(),
            boosted: false,
            sensitivity: sensitivity.clamp(sensitivity_range.0, sensitivity_range.1),
            base_speed,
            boosted_speed,
            sensitivity_range,
            sensitivity_step,
        }
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    pub fn set_sensitivity(&mut self, value: f32) {
        let (min, max) = self.sensitivity_range;
        self.sensitivity = value.clamp(min, max);
    }

    pub fn increase_sensitivity(&mut self) {
        self.set_sensitivity(self.sensitivity + self.sensitivity_step);
    }

    pub fn decrease_sensitivity(&mut self) {
        self.set_sensitivity(self.sensitivity - self.sensitivity_step);
    }

    /// Units moved per frame for each held movement key.
    pub fn speed(&self) -> f32 {
        let base = if self.boosted {
            self.boosted_speed
        } else {
            self.base_speed
        };
        base * self.sensitivity
    }

    /// Release every key.
    pub fn clear_input(&mut self) {
        self.flags = MovementFlags::default();
        self.boosted = false;
    }

    /// Yaw about world up and pitch about the camera's right axis from a
    /// relative pointer motion in pixels.
    pub fn look(&self, pose: &mut Transform, delta_px: Vec2) {
        let rate = FLY_LOOK_RATE * self.sensitivity;
        let right = pose.rotation * Vec3::X;
        let vertical = Quat::from_axis_angle(right, -delta_px.y * rate);
        let horizontal = Quat::from_axis_angle(Vec3::Y, -delta_px.x * rate);
        pose.rotation = (horizontal * (vertical * pose.rotation)).normalize();
    }

    /// Apply held keys for one frame.
    pub fn step(&self, pose: &mut Transform) {
        let speed = self.speed();
        let forward = *pose.forward();
        let side = forward.cross(Vec3::Y).normalize_or_zero();
        let flags = self.flags;

        if flags.forward {
            pose.translation += forward * speed;
        }
        if flags.backward {
            pose.translation -= forward * speed;
        }
        if flags.left {
            pose.translation -= side * speed;
        }
        if flags.right {
            pose.translation += side * speed;
        }
        if flags.up {
            pose.translation.y += speed;
        }
        if flags.down {
            pose.translation.y -= speed;
        }
        if flags.yaw_left {
            pose.rotation = Quat::from_rotation_y(FLY_YAW_STEP) * pose.rotation;
        }
        if flags.yaw_right {
            pose.rotation = Quat::from_rotation_y(-FLY_YAW_STEP) * pose.rotation;
        }
        pose.rotation = pose.rotation.normalize();
    }
}
