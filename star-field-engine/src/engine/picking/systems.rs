use super::ray::{PickCamera, cursor_to_ndc, ray_point_distance, ray_sphere_hit_t};
use super::selection::{PickHits, Selection};
use super::throttle::PickThrottle;
use crate::engine::camera::CameraController;
use crate::engine::catalog::{CelestialObject, Star};
use crate::engine::core::settings::StarFieldSettings;
use crate::engine::core::window_config::ViewportSize;
use crate::engine::filter::SelectedConstellation;
use crate::engine::scene::{CelestialBody, SceneNodes};
use bevy::prelude::*;

/// Nearest star whose screen-space distance to the ray is within
/// `threshold_px`.
pub fn pick_star<'a>(
    camera: &PickCamera,
    ray: &Ray3d,
    stars: &'a [Star],
    threshold_px: f32,
) -> Option<&'a Star> {
    stars
        .iter()
        .filter_map(|star| {
            let (t, perp) = ray_point_distance(ray, star.world_position())?;
            (perp <= threshold_px * camera.units_per_pixel(t)).then_some((t, star))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, star)| star)
}

/// Nearest body sphere the ray enters.
pub fn pick_body<'a>(
    ray: &Ray3d,
    bodies: impl IntoIterator<Item = (Vec3, f32, &'a CelestialObject)>,
) -> Option<&'a CelestialObject> {
    bodies
        .into_iter()
        .filter_map(|(centre, radius, record)| {
            ray_sphere_hit_t(ray, centre, radius).map(|t| (t, record))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, record)| record)
}

/// Feed cursor moves into the throttle.
pub fn queue_pointer_picks(
    mut moved: EventReader<CursorMoved>,
    mut throttle: ResMut<PickThrottle>,
) {
    if let Some(last) = moved.read().last() {
        throttle.record_move(last.position);
    }
}

/// Pick at the throttled cursor position and fold the result into the
/// selection. The selected constellation follows a newly picked star.
#[allow(clippy::too_many_arguments)]
pub fn run_picking(
    time: Res<Time>,
    settings: Res<StarFieldSettings>,
    camera: Res<CameraController>,
    viewport: Res<ViewportSize>,
    buttons: Res<ButtonInput<MouseButton>>,
    nodes: Res<SceneNodes>,
    bodies: Query<(&Transform, &CelestialBody)>,
    mut throttle: ResMut<PickThrottle>,
    mut selection: ResMut<Selection>,
    mut constellation: ResMut<SelectedConstellation>,
) {
    let Some(cursor) = throttle.poll(time.elapsed_secs()) else {
        return;
    };
    let pick_camera = PickCamera {
        pose: camera.pose,
        fov_y: camera.fov_y,
        viewport: viewport.as_vec2(),
    };
    let Some(ray) = cursor_to_ndc(cursor, pick_camera.viewport)
        .and_then(|ndc| pick_camera.ray_from_ndc(ndc))
    else {
        return;
    };

    let solar_tested = nodes.has_solar_system();
    let object = if solar_tested {
        pick_body(
            &ray,
            bodies
                .iter()
                .map(|(transform, body)| (transform.translation, body.render_radius, &body.record)),
        )
    } else {
        None
    };
    let star = pick_star(
        &pick_camera,
        &ray,
        nodes.rendered_stars(),
        settings.pick_threshold_px,
    );
    let hits = PickHits {
        star,
        object,
        solar_tested,
    };

    let pointer_held = buttons.get_pressed().next().is_some();
    let mut next = selection.clone();
    let code = next.apply_pick(hits, pointer_held);
    if next != *selection {
        debug!(
            "Selection: star {:?}, object {:?}",
            next.star().map(|s| s.id),
            next.object().map(|o| o.name.as_str())
        );
        *selection = next;
    }
    if let Some(code) = code {
        if constellation.0.as_deref() != Some(code.as_str()) {
            constellation.0 = Some(code);
        }
    }
}
