use crate::engine::camera::CameraController;
use crate::engine::loading::LoadingError;
use crate::engine::picking::Selection;
use bevy::prelude::*;

#[derive(Component)]
pub struct CameraModeText;

#[derive(Component)]
pub struct SelectionText;

/// One-line description of the current selection, or the loading error
/// when there is one.
pub fn selection_summary(selection: &Selection, loading_error: &LoadingError) -> String {
    if let Some(message) = &loading_error.0 {
        return message.clone();
    }
    if let Some(star) = selection.star() {
        let spectral = star.spectral_type.as_deref().unwrap_or("Unknown");
        let luminosity = star
            .luminosity
            .map(|l| format!("{l:.2}"))
            .unwrap_or_else(|| "Unknown".to_string());
        return format!(
            "{} | {:.2} pc | mag {:.2} | {} | L {}",
            star.display_name(),
            star.distance,
            star.apparent_magnitude,
            spectral,
            luminosity
        );
    }
    if let Some(object) = selection.object() {
        let period = object
            .orbital_period
            .map(|p| format!("{p} days"))
            .unwrap_or_else(|| "-".to_string());
        return format!(
            "{} | {} K | mass {} | period {} | moons {}",
            object.name, object.temperature, object.mass, period, object.moon_count
        );
    }
    String::new()
}

/// Native text overlay: camera label bottom-left, selection top-left.
pub fn spawn_overlay(mut commands: Commands, camera: Res<CameraController>) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(camera.mode().label()),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    left: Val::Px(12.0),
                    ..default()
                },
                CameraModeText,
            ));
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 1.0)),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(12.0),
                    left: Val::Px(12.0),
                    ..default()
                },
                SelectionText,
            ));
        });
}

pub fn update_overlay_text(
    camera: Res<CameraController>,
    selection: Res<Selection>,
    loading_error: Res<LoadingError>,
    mut camera_text: Query<&mut Text, (With<CameraModeText>, Without<SelectionText>)>,
    mut selection_text: Query<&mut Text, With<SelectionText>>,
) {
    if camera.is_changed() {
        let label = camera.mode().label();
        for mut text in &mut camera_text {
            if text.0 != label {
                text.0 = label.to_string();
            }
        }
    }
    if selection.is_changed() || loading_error.is_changed() {
        let summary = selection_summary(&selection, &loading_error);
        for mut text in &mut selection_text {
            text.0.clone_from(&summary);
        }
    }
}
