//! Collider shapes and world bounds

use nova_math::{Transform, Vec3, AABB};

/// Collision shape in local space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    /// Box with half-extents
    Box { half_extents: Vec3 },
    Sphere { radius: f32 },
    /// Capsule aligned along Y; `height` is the total height including caps
    Capsule { radius: f32, height: f32 },
    /// Triangle mesh, represented by its precomputed local bounds
    Mesh { half_extents: Vec3 },
}

impl Default for ColliderShape {
    fn default() -> Self {
        Self::Box {
            half_extents: Vec3::splat(0.5),
        }
    }
}

impl ColliderShape {
    pub fn cuboid(hx: f32, hy: f32, hz: f32) -> Self {
        Self::Box {
            half_extents: Vec3::new(hx, hy, hz),
        }
    }

    /// Box from full size
    pub fn from_size(size: Vec3) -> Self {
        Self::Box {
            half_extents: size * 0.5,
        }
    }

    pub fn sphere(radius: f32) -> Self {
        Self::Sphere { radius }
    }

    pub fn capsule(radius: f32, height: f32) -> Self {
        Self::Capsule { radius, height }
    }

    /// World half-extents of the shape's axis-aligned bounds under `scale`.
    ///
    /// Spheres scale by the largest axis so the bounds still enclose the
    /// resulting ellipsoid. Rotation is not taken into account.
    pub fn scaled_half_extents(&self, scale: Vec3) -> Vec3 {
        let scale = scale.abs();
        match *self {
            Self::Box { half_extents } | Self::Mesh { half_extents } => half_extents.mul_elem(scale),
            Self::Sphere { radius } => Vec3::splat(radius * scale.max_element()),
            Self::Capsule { radius, height } => {
                let half_height = (height * 0.5).max(radius);
                Vec3::new(radius, half_height, radius).mul_elem(scale)
            }
        }
    }
}

/// Collider attached to an entity
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Collider {
    pub shape: ColliderShape,
    /// Offset from the transform position, in local (scaled) space
    pub center: Vec3,
    /// Detection-only collider. Carried into hits and events; resolution
    /// treats it like any other collider.
    pub is_trigger: bool,
}

impl Collider {
    pub fn new(shape: ColliderShape) -> Self {
        Self {
            shape,
            ..Default::default()
        }
    }

    pub fn cuboid(hx: f32, hy: f32, hz: f32) -> Self {
        Self::new(ColliderShape::cuboid(hx, hy, hz))
    }

    pub fn sphere(radius: f32) -> Self {
        Self::new(ColliderShape::sphere(radius))
    }

    pub fn capsule(radius: f32, height: f32) -> Self {
        Self::new(ColliderShape::capsule(radius, height))
    }

    pub fn trigger(shape: ColliderShape) -> Self {
        Self {
            shape,
            is_trigger: true,
            ..Default::default()
        }
    }

    pub fn with_center(mut self, center: Vec3) -> Self {
        self.center = center;
        self
    }

    /// World-space bounds: centered at `position + center * scale`
    pub fn world_aabb(&self, transform: &Transform) -> AABB {
        AABB::from_center_half_extents(
            transform.scaled_offset(self.center),
            self.shape.scaled_half_extents(transform.scale),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_aabb_uses_scale_and_center() {
        let collider = Collider::cuboid(0.5, 0.5, 0.5).with_center(Vec3::new(0.0, 1.0, 0.0));
        let transform = Transform::from_position(Vec3::new(2.0, 0.0, 0.0)).with_scale(Vec3::new(2.0, 2.0, 2.0));
        let aabb = collider.world_aabb(&transform);
        assert_eq!(aabb.center(), Vec3::new(2.0, 2.0, 0.0));
        assert_eq!(aabb.size(), Vec3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn test_sphere_aabb_uses_radius() {
        let collider = Collider::sphere(0.25);
        let aabb = collider.world_aabb(&Transform::IDENTITY);
        assert_eq!(aabb.min, Vec3::splat(-0.25));
        assert_eq!(aabb.max, Vec3::splat(0.25));

        let stretched = Transform::IDENTITY.with_scale(Vec3::new(1.0, 4.0, 1.0));
        assert_eq!(collider.world_aabb(&stretched).half_extents(), Vec3::splat(1.0));
    }

    #[test]
    fn test_capsule_aabb() {
        let half = ColliderShape::capsule(0.5, 2.0).scaled_half_extents(Vec3::ONE);
        assert_eq!(half, Vec3::new(0.5, 1.0, 0.5));

        // Height shorter than the caps still covers both hemispheres
        let squat = ColliderShape::capsule(0.5, 0.4).scaled_half_extents(Vec3::ONE);
        assert_eq!(squat, Vec3::splat(0.5));
    }

    #[test]
    fn test_negative_scale_keeps_bounds_valid() {
        let collider = Collider::cuboid(1.0, 1.0, 1.0);
        let mirrored = Transform::IDENTITY.with_scale(Vec3::new(-1.0, 1.0, 1.0));
        assert!(!collider.world_aabb(&mirrored).is_empty());
    }
}
