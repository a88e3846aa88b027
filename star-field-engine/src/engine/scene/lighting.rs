use bevy::prelude::*;
use constants::render_settings::{AMBIENT_LIGHT_COLOUR, hex_to_rgb};

/// Marks the directional light lighting the orbiters.
#[derive(Component)]
pub struct SceneLight;

pub fn ambient_light() -> AmbientLight {
    let [r, g, b] = hex_to_rgb(AMBIENT_LIGHT_COLOUR);
    AmbientLight {
        color: Color::srgb(r, g, b),
        brightness: 400.0,
        ..default()
    }
}

/// Ambient light plus one directional light shining from (1, 1, 1).
pub fn spawn_lighting(mut commands: Commands) {
    commands.insert_resource(ambient_light());
    commands.spawn((
        DirectionalLight::default(),
        Transform::from_xyz(1.0, 1.0, 1.0).looking_at(Vec3::ZERO, Vec3::Y),
        SceneLight,
    ));
}
