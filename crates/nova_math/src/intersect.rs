//! Ray intersection tests

use crate::bounds::AABB;
use crate::ray::Ray;

/// Parametric interval where a ray is inside a box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlabHit {
    /// Entry distance, clamped to 0 when the origin is inside the box
    pub t_min: f32,
    /// Exit distance, clamped to the far limit
    pub t_max: f32,
}

/// Ray-AABB intersection using the slab method.
///
/// The interval starts as `[0, t_far]` and is narrowed axis by axis. A zero
/// direction component yields an infinite reciprocal; if the origin also lies
/// exactly on that slab's boundary the product is NaN, and NaN never wins a
/// comparison below, so the axis is effectively ignored rather than panicking.
pub fn ray_aabb_slab(ray: &Ray, aabb: &AABB, t_far: f32) -> Option<SlabHit> {
    let inv_dir = ray.inverse_direction();
    let mut t_min = 0.0f32;
    let mut t_max = t_far;

    for axis in 0..3 {
        let inv = inv_dir[axis];
        let mut t0 = (aabb.min[axis] - ray.origin[axis]) * inv;
        let mut t1 = (aabb.max[axis] - ray.origin[axis]) * inv;

        if inv < 0.0 {
            core::mem::swap(&mut t0, &mut t1);
        }

        if t0 > t_min {
            t_min = t0;
        }
        if t1 < t_max {
            t_max = t1;
        }

        if t_max < t_min {
            return None;
        }
    }

    Some(SlabHit { t_min, t_max })
}

/// Distance to the first point of the box along the ray (0 if the origin is inside)
#[inline]
pub fn ray_aabb(ray: &Ray, aabb: &AABB) -> Option<f32> {
    ray_aabb_slab(ray, aabb, f32::INFINITY).map(|hit| hit.t_min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vec3;
    use approx::assert_relative_eq;

    fn unit_box() -> AABB {
        AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0))
    }

    #[test]
    fn test_ray_hits_box_from_above() {
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y);
        let hit = ray_aabb_slab(&ray, &unit_box(), 1_000_000.0).unwrap();
        assert_relative_eq!(hit.t_min, 4.0);
        assert_relative_eq!(hit.t_max, 6.0);
        assert_eq!(ray.at(hit.t_min), Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_ray_misses_box() {
        let ray = Ray::new(Vec3::new(3.0, 5.0, 0.0), Vec3::NEG_Y);
        assert!(ray_aabb(&ray, &unit_box()).is_none());
    }

    #[test]
    fn test_box_behind_ray() {
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::Y);
        assert!(ray_aabb(&ray, &unit_box()).is_none());
    }

    #[test]
    fn test_origin_inside_box() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert_eq!(ray_aabb(&ray, &unit_box()), Some(0.0));
    }

    #[test]
    fn test_far_limit_clips() {
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y);
        assert!(ray_aabb_slab(&ray, &unit_box(), 3.0).is_none());
    }

    #[test]
    fn test_origin_on_slab_boundary_with_zero_component() {
        // x component is zero and origin.x == min.x: 0 * inf = NaN on that axis
        let ray = Ray::new(Vec3::new(-1.0, 5.0, 0.0), Vec3::NEG_Y);
        let hit = ray_aabb_slab(&ray, &unit_box(), 1_000_000.0).unwrap();
        assert_relative_eq!(hit.t_min, 4.0);
    }

    #[test]
    fn test_zero_direction_does_not_panic() {
        let inside = Ray::new(Vec3::ZERO, Vec3::ZERO);
        assert_eq!(ray_aabb(&inside, &unit_box()), Some(0.0));

        let outside = Ray::new(Vec3::splat(4.0), Vec3::ZERO);
        assert!(ray_aabb(&outside, &unit_box()).is_none());
    }
}
