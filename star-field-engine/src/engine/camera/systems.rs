use super::controller::{CameraController, CameraMode};
use super::free_fly::FreeFlyState;
use crate::engine::core::settings::StarFieldSettings;
use crate::engine::core::window_config::ViewportSize;
use bevy::input::ButtonState;
use bevy::input::keyboard::KeyboardInput;
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

/// Marks the single viewer camera entity.
#[derive(Component)]
pub struct StarFieldCamera;

/// Pixel scroll is scaled down to roughly match one wheel notch.
const PIXEL_SCROLL_SCALE: f32 = 0.02;

pub fn spawn_camera(
    mut commands: Commands,
    settings: Res<StarFieldSettings>,
    camera: Res<CameraController>,
) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: settings.fov_degrees.to_radians(),
            near: settings.near,
            far: settings.far,
            ..default()
        }),
        camera.pose,
        StarFieldCamera,
    ));
}

/// Update held-key state from one physical key transition.
pub fn apply_key(fly: &mut FreeFlyState, key: KeyCode, pressed: bool) {
    match key {
        KeyCode::KeyW => fly.flags.forward = pressed,
        KeyCode::KeyS => fly.flags.backward = pressed,
        KeyCode::KeyA => fly.flags.left = pressed,
        KeyCode::KeyD => fly.flags.right = pressed,
        KeyCode::ArrowUp => fly.flags.up = pressed,
        KeyCode::ArrowDown => fly.flags.down = pressed,
        KeyCode::ArrowLeft => fly.flags.yaw_left = pressed,
        KeyCode::ArrowRight => fly.flags.yaw_right = pressed,
        KeyCode::ShiftLeft | KeyCode::ShiftRight => fly.boosted = pressed,
        KeyCode::Equal | KeyCode::NumpadAdd if pressed => fly.increase_sensitivity(),
        KeyCode::Minus | KeyCode::NumpadSubtract if pressed => fly.decrease_sensitivity(),
        _ => {}
    }
}

/// Keyboard events only reach the controller while FreeFly is listening.
pub fn camera_keyboard_input(
    mut keys: EventReader<KeyboardInput>,
    mut camera: ResMut<CameraController>,
) {
    if !camera.is_listening() {
        keys.clear();
        return;
    }
    for event in keys.read() {
        let pressed = event.state == ButtonState::Pressed;
        apply_key(&mut camera.fly, event.key_code, pressed);
    }
}

/// Pointer drag and wheel input. Orbit: left rotates, right pans, wheel
/// zooms. FreeFly: any held button turns relative motion into look.
pub fn camera_pointer_input(
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut wheel: EventReader<MouseWheel>,
    viewport: Res<ViewportSize>,
    mut camera: ResMut<CameraController>,
) {
    let delta: Vec2 = motion.read().map(|m| m.delta).sum();
    let scroll: f32 = wheel
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * PIXEL_SCROLL_SCALE,
        })
        .sum();

    match camera.mode() {
        CameraMode::FreeFly => {
            if delta != Vec2::ZERO && buttons.get_pressed().next().is_some() {
                camera.look(delta);
            }
        }
        CameraMode::Orbit => {
            let height = viewport.height;
            if delta != Vec2::ZERO {
                if buttons.pressed(MouseButton::Left) {
                    camera.orbit.rotate(delta, height);
                } else if buttons.pressed(MouseButton::Right) {
                    let pose = camera.pose;
                    let fov = camera.fov_y;
                    camera.orbit.pan(delta, &pose, fov, height);
                }
            }
            if scroll != 0.0 {
                camera.orbit.zoom(scroll);
            }
        }
    }
}

/// Integrate stage: advance the controller and write the pose back.
pub fn camera_integrate(
    mut camera: ResMut<CameraController>,
    mut query: Query<&mut Transform, With<StarFieldCamera>>,
) {
    camera.integrate();
    for mut transform in &mut query {
        if *transform != camera.pose {
            *transform = camera.pose;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_mapping_sets_and_releases_flags() {
        let mut camera = CameraController::default();
        apply_key(&mut camera.fly, KeyCode::KeyW, true);
        apply_key(&mut camera.fly, KeyCode::ShiftLeft, true);
        assert!(camera.fly.flags.forward);
        assert!(camera.fly.boosted);
        apply_key(&mut camera.fly, KeyCode::KeyW, false);
        apply_key(&mut camera.fly, KeyCode::ShiftLeft, false);
        assert!(!camera.fly.flags.any());
        assert!(!camera.fly.boosted);
    }

    #[test]
    fn sensitivity_keys_act_on_press_only() {
        let mut camera = CameraController::default();
        apply_key(&mut camera.fly, KeyCode::Equal, true);
        apply_key(&mut camera.fly, KeyCode::Equal, false);
        assert!((camera.fly.sensitivity() - 1.1).abs() < 1e-6);
        apply_key(&mut camera.fly, KeyCode::NumpadSubtract, true);
        assert!((camera.fly.sensitivity() - 1.0).abs() < 1e-6);
    }

    fn camera_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<KeyboardInput>()
            .init_resource::<CameraController>()
            .add_systems(Update, (camera_keyboard_input, camera_integrate).chain());
        app.world_mut()
            .spawn((Transform::default(), StarFieldCamera));
        app
    }

    fn press(app: &mut App, key_code: KeyCode) {
        let window = app.world_mut().spawn_empty().id();
        app.world_mut().send_event(KeyboardInput {
            key_code,
            logical_key: bevy::input::keyboard::Key::Unidentified(
                bevy::input::keyboard::NativeKey::Unidentified,
            ),
            state: ButtonState::Pressed,
            text: None,
            repeat: false,
            window,
        });
    }

    #[test]
    fn keys_are_ignored_outside_free_fly() {
        let mut app = camera_app();
        press(&mut app, KeyCode::KeyW);
        app.update();
        let camera = app.world().resource::<CameraController>();
        assert_eq!(camera.mode(), CameraMode::Orbit);
        assert!(!camera.fly.flags.forward);
    }

    #[test]
    fn free_fly_movement_reaches_the_camera_entity() {
        let mut app = camera_app();
        app.world_mut().resource_mut::<CameraController>().toggle();
        press(&mut app, KeyCode::ArrowUp);
        app.update();

        let mut query = app
            .world_mut()
            .query_filtered::<&Transform, With<StarFieldCamera>>();
        let transform = *query.single(app.world()).unwrap();
        assert!((transform.translation.y - 2050.0).abs() < 1e-3);
    }
}
