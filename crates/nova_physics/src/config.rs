//! Physics configuration

use nova_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{PhysicsError, Result};

/// Physics world configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity vector (default: -9.81 in Y)
    pub gravity: [f32; 3],

    /// Resolve bodies against the infinite horizontal ground plane
    pub ground_enabled: bool,

    /// Height of the ground plane
    pub ground_height: f32,

    /// Distance each body of an overlapping pair is pushed apart per step
    pub contact_bias: f32,

    /// Vertical speed below which a grounded body stops bouncing
    pub settle_vertical_speed: f32,

    /// Horizontal speed below which a settled body is brought to rest
    pub settle_horizontal_speed: f32,

    /// Far limit of the ray slab test
    pub max_ray_distance: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, -9.81, 0.0],
            ground_enabled: true,
            ground_height: 0.0,
            contact_bias: 0.01,
            settle_vertical_speed: 0.05,
            settle_horizontal_speed: 0.1,
            max_ray_distance: 1_000_000.0,
        }
    }
}

impl PhysicsConfig {
    /// Floating bodies: no gravity, no ground plane
    pub fn zero_gravity() -> Self {
        Self {
            gravity: [0.0, 0.0, 0.0],
            ground_enabled: false,
            ..Default::default()
        }
    }

    /// Load a configuration from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_gravity(mut self, x: f32, y: f32, z: f32) -> Self {
        self.gravity = [x, y, z];
        self
    }

    /// Enable the ground plane at the given height
    pub fn with_ground(mut self, height: f32) -> Self {
        self.ground_enabled = true;
        self.ground_height = height;
        self
    }

    pub fn without_ground(mut self) -> Self {
        self.ground_enabled = false;
        self
    }

    pub fn with_contact_bias(mut self, bias: f32) -> Self {
        self.contact_bias = bias;
        self
    }

    pub fn gravity_vec(&self) -> Vec3 {
        Vec3::from_array(self.gravity)
    }

    /// Reject values the step cannot work with
    pub fn validate(&self) -> Result<()> {
        if !self.gravity_vec().is_finite() {
            return Err(PhysicsError::InvalidConfig(format!(
                "gravity must be finite, got {:?}",
                self.gravity
            )));
        }
        if !self.ground_height.is_finite() {
            return Err(PhysicsError::InvalidConfig(format!(
                "ground_height must be finite, got {}",
                self.ground_height
            )));
        }

        let non_negative = [
            ("contact_bias", self.contact_bias),
            ("settle_vertical_speed", self.settle_vertical_speed),
            ("settle_horizontal_speed", self.settle_horizontal_speed),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(PhysicsError::InvalidConfig(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }

        if !(self.max_ray_distance > 0.0) {
            return Err(PhysicsError::InvalidConfig(format!(
                "max_ray_distance must be positive, got {}",
                self.max_ray_distance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PhysicsConfig::default();
        assert_eq!(config.gravity, [0.0, -9.81, 0.0]);
        assert!(config.ground_enabled);
        assert_eq!(config.ground_height, 0.0);
        assert_eq!(config.contact_bias, 0.01);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = PhysicsConfig::from_json_str(r#"{ "gravity": [0.0, -1.62, 0.0], "ground_height": 2.5 }"#)
            .unwrap();
        assert_eq!(config.gravity, [0.0, -1.62, 0.0]);
        assert_eq!(config.ground_height, 2.5);
        assert_eq!(config.contact_bias, 0.01);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = PhysicsConfig::from_json_str("{ gravity: ").unwrap_err();
        assert!(matches!(err, PhysicsError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_negative_bias() {
        let err = PhysicsConfig::default().with_contact_bias(-0.5).validate().unwrap_err();
        assert!(matches!(err, PhysicsError::InvalidConfig(_)));
        assert!(err.to_string().contains("contact_bias"));
    }

    #[test]
    fn test_validate_rejects_nan_gravity() {
        let config = PhysicsConfig::default().with_gravity(f32::NAN, 0.0, 0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_gravity_preset() {
        let config = PhysicsConfig::zero_gravity();
        assert_eq!(config.gravity_vec(), Vec3::ZERO);
        assert!(!config.ground_enabled);
    }
}
