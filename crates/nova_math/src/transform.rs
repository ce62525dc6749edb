//! Spatial transform with Euler rotation

use crate::vector::Vec3;

/// Position, rotation (Euler angles in degrees) and scale of an entity
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in degrees, applied Y then X then Z by the renderer
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    #[inline]
    pub const fn new(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self { position, rotation, scale }
    }

    #[inline]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    #[inline]
    pub fn with_rotation(mut self, degrees: Vec3) -> Self {
        self.rotation = degrees;
        self
    }

    #[inline]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Rotation converted to radians
    #[inline]
    pub fn rotation_radians(&self) -> Vec3 {
        Vec3::new(
            crate::radians(self.rotation.x),
            crate::radians(self.rotation.y),
            crate::radians(self.rotation.z),
        )
    }

    /// Map a local-space offset to world space, ignoring rotation
    #[inline]
    pub fn scaled_offset(&self, local: Vec3) -> Vec3 {
        self.position + local.mul_elem(self.scale)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_scaled_offset() {
        let t = Transform::from_position(Vec3::new(1.0, 2.0, 3.0)).with_scale(Vec3::new(2.0, 1.0, 0.5));
        assert_eq!(t.scaled_offset(Vec3::ONE), Vec3::new(3.0, 3.0, 3.5));
    }

    #[test]
    fn test_rotation_radians() {
        let t = Transform::IDENTITY.with_rotation(Vec3::new(180.0, 90.0, 0.0));
        let r = t.rotation_radians();
        assert_relative_eq!(r.x, core::f32::consts::PI);
        assert_relative_eq!(r.y, core::f32::consts::FRAC_PI_2);
    }
}
