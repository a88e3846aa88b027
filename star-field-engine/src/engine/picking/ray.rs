use bevy::prelude::*;

/// Camera parameters needed to cast a pick ray.
#[derive(Debug, Clone, Copy)]
pub struct PickCamera {
    pub pose: Transform,
    pub fov_y: f32,
    pub viewport: Vec2,
}

impl PickCamera {
    fn aspect(&self) -> f32 {
        if self.viewport.y > 0.0 {
            self.viewport.x / self.viewport.y
        } else {
            1.0
        }
    }

    /// Ray from the eye through a point in normalised device coordinates,
    /// x right and y up in [-1, 1].
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Option<Ray3d> {
        let half_height = (self.fov_y * 0.5).tan();
        let local = Vec3::new(ndc.x * half_height * self.aspect(), ndc.y * half_height, -1.0);
        let direction = Dir3::new(self.pose.rotation * local).ok()?;
        Some(Ray3d::new(self.pose.translation, direction))
    }

    /// World units covered by one pixel at `depth` along the view axis.
    pub fn units_per_pixel(&self, depth: f32) -> f32 {
        if self.viewport.y <= 0.0 {
            return 0.0;
        }
        2.0 * depth * (self.fov_y * 0.5).tan() / self.viewport.y
    }
}

/// Cursor position in window pixels (origin top-left) to NDC.
pub fn cursor_to_ndc(cursor: Vec2, viewport: Vec2) -> Option<Vec2> {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        cursor.x / viewport.x * 2.0 - 1.0,
        -(cursor.y / viewport.y * 2.0 - 1.0),
    ))
}

/// Distance along the ray to the closest approach of `point`, and the
/// perpendicular distance there. `None` when the point is behind the origin.
pub fn ray_point_distance(ray: &Ray3d, point: Vec3) -> Option<(f32, f32)> {
    let to_point = point - ray.origin;
    let t = to_point.dot(*ray.direction);
    if t < 0.0 {
        return None;
    }
    let closest = ray.origin + *ray.direction * t;
    Some((t, closest.distance(point)))
}

// Geometric ray-sphere intersection, returns the nearest non-negative t.
pub fn ray_sphere_hit_t(ray: &Ray3d, centre: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - centre;
    let b = oc.dot(*ray.direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    let (near, far) = (-b - root, -b + root);
    if far < 0.0 {
        return None;
    }
    Some(if near >= 0.0 { near } else { far })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PickCamera {
        PickCamera {
            pose: Transform::from_xyz(0.0, 0.0, 100.0).looking_at(Vec3::ZERO, Vec3::Y),
            fov_y: 75f32.to_radians(),
            viewport: Vec2::new(800.0, 600.0),
        }
    }

    #[test]
    fn centre_ray_follows_view_direction() {
        let ray = camera().ray_from_ndc(Vec2::ZERO).unwrap();
        assert!(ray.direction.distance(Vec3::NEG_Z) < 1e-5);
        assert_eq!(ray.origin, Vec3::new(0.0, 0.0, 100.0));
    }

    #[test]
    fn cursor_corners_map_to_ndc_corners() {
        let viewport = Vec2::new(800.0, 600.0);
        assert_eq!(cursor_to_ndc(Vec2::ZERO, viewport), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(cursor_to_ndc(viewport, viewport), Some(Vec2::new(1.0, -1.0)));
        assert_eq!(cursor_to_ndc(Vec2::ZERO, Vec2::ZERO), None);
    }

    #[test]
    fn edge_ray_reaches_frustum_edge() {
        let cam = camera();
        let ray = cam.ray_from_ndc(Vec2::new(0.0, 1.0)).unwrap();
        let at_origin_plane = ray.origin + *ray.direction * (100.0 / -ray.direction.z);
        let expected = 100.0 * (cam.fov_y * 0.5).tan();
        assert!((at_origin_plane.y - expected).abs() < 1e-3);
    }

    #[test]
    fn point_distance_ignores_points_behind() {
        let ray = camera().ray_from_ndc(Vec2::ZERO).unwrap();
        let (t, d) = ray_point_distance(&ray, Vec3::new(3.0, 0.0, 0.0)).unwrap();
        assert!((t - 100.0).abs() < 1e-4);
        assert!((d - 3.0).abs() < 1e-4);
        assert!(ray_point_distance(&ray, Vec3::new(0.0, 0.0, 200.0)).is_none());
    }

    #[test]
    fn sphere_hits_front_face_and_misses_aside() {
        let ray = camera().ray_from_ndc(Vec2::ZERO).unwrap();
        let t = ray_sphere_hit_t(&ray, Vec3::ZERO, 10.0).unwrap();
        assert!((t - 90.0).abs() < 1e-4);
        assert!(ray_sphere_hit_t(&ray, Vec3::new(50.0, 0.0, 0.0), 10.0).is_none());
    }
}
