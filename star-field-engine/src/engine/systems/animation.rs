use crate::engine::filter::{ActiveModes, FilterConfig, SelectedConstellation, ViewMode};
use crate::engine::scene::CelestialBody;
use crate::engine::scene::constellation_lines::{ConstellationLines, line_colour};
use crate::engine::scene::manager::SceneNodes;
use bevy::prelude::*;
use constants::solar_system::SELF_ROTATION_RATIO;

/// Simulated orbital time. Advances by frame time scaled with the orbital
/// speed factor, so a factor of 0 freezes the orbits in place.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct OrbitClock {
    elapsed: f32,
}

impl OrbitClock {
    pub fn advance(&mut self, delta_secs: f32, speed_factor: f32) {
        self.elapsed += delta_secs * speed_factor.max(0.0);
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

/// Position on a circular orbit in the XZ plane.
pub fn orbit_position(radius: f32, angle: f32) -> Vec3 {
    Vec3::new(radius * angle.cos(), 0.0, radius * angle.sin())
}

pub fn tick_orbit_clock(
    time: Res<Time>,
    filters: Res<FilterConfig>,
    mut clock: ResMut<OrbitClock>,
) {
    clock.advance(time.delta_secs(), filters.orbital_speed_factor);
}

/// Move each orbiter along its ring and spin it about its own axis.
pub fn animate_orbits(clock: Res<OrbitClock>, mut bodies: Query<(&mut Transform, &CelestialBody)>) {
    for (mut transform, body) in &mut bodies {
        if body.angular_speed == 0.0 {
            continue;
        }
        let angle = clock.elapsed() * body.angular_speed;
        let translation = orbit_position(body.orbit_radius, angle);
        let rotation = Quat::from_rotation_y(angle * SELF_ROTATION_RATIO);
        if transform.translation != translation || transform.rotation != rotation {
            transform.translation = translation;
            transform.rotation = rotation;
        }
    }
}

/// Show cached figures that are active while constellation mode is on, and
/// recolour the selected one. Components and materials are only written
/// when their value actually changes.
pub fn sync_constellation_lines(
    modes: Res<ActiveModes>,
    selected: Res<SelectedConstellation>,
    mut nodes: ResMut<SceneNodes>,
    mut lines: Query<&mut Visibility, With<ConstellationLines>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mode_on = modes.contains(ViewMode::Constellations);
    let selected = selected.0.as_deref();

    for (code, entry) in nodes.bypass_change_detection().constellations.iter_mut() {
        let wanted = if mode_on && entry.active {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        if let Ok(mut visibility) = lines.get_mut(entry.entity) {
            visibility.set_if_neq(wanted);
        }

        let highlighted = selected == Some(code);
        if entry.highlighted != highlighted {
            if let Some(material) = materials.get_mut(&entry.material) {
                material.base_color = line_colour(highlighted);
            }
            entry.highlighted = highlighted;
        }
    }
}
