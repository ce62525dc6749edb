//! # nova_math - Geometry primitives for Nova physics
//!
//! Vectors, bounding volumes and rays, plus the slab-based ray/box test used
//! by the physics query layer.

pub mod bounds;
pub mod intersect;
pub mod ray;
pub mod transform;
pub mod vector;

pub use bounds::*;
pub use intersect::*;
pub use ray::*;
pub use transform::*;
pub use vector::*;

/// Common math constants
pub mod consts {
    pub const PI: f32 = core::f32::consts::PI;
    pub const DEG_TO_RAD: f32 = PI / 180.0;
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
    pub const EPSILON: f32 = 1e-6;
}

/// Convert degrees to radians
#[inline]
pub fn radians(degrees: f32) -> f32 {
    degrees * consts::DEG_TO_RAD
}

/// Convert radians to degrees
#[inline]
pub fn degrees(radians: f32) -> f32 {
    radians * consts::RAD_TO_DEG
}

pub mod prelude {
    pub use crate::bounds::{Sphere, AABB};
    pub use crate::intersect::{ray_aabb, ray_aabb_slab, SlabHit};
    pub use crate::ray::Ray;
    pub use crate::transform::Transform;
    pub use crate::vector::Vec3;
    pub use crate::{degrees, radians};
}
