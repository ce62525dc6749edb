//! Surface material coefficients carried by each rigid body

use serde::{Deserialize, Serialize};

/// Restitution and friction coefficients, each in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsMaterial {
    /// Bounciness (0 = no bounce, 1 = perfectly elastic)
    pub restitution: f32,
    /// Friction resisting the start of sliding
    pub static_friction: f32,
    /// Fraction of horizontal speed lost per ground impact
    pub dynamic_friction: f32,
}

impl Default for PhysicsMaterial {
    fn default() -> Self {
        Self {
            restitution: 0.5,
            static_friction: 0.6,
            dynamic_friction: 0.6,
        }
    }
}

impl PhysicsMaterial {
    /// Coefficients are clamped to `[0, 1]`
    pub fn new(restitution: f32, static_friction: f32, dynamic_friction: f32) -> Self {
        Self {
            restitution: restitution.clamp(0.0, 1.0),
            static_friction: static_friction.clamp(0.0, 1.0),
            dynamic_friction: dynamic_friction.clamp(0.0, 1.0),
        }
    }

    /// Frictionless ice-like material
    pub fn ice() -> Self {
        Self {
            restitution: 0.05,
            static_friction: 0.1,
            dynamic_friction: 0.02,
        }
    }

    /// Bouncy rubber-like material
    pub fn rubber() -> Self {
        Self {
            restitution: 0.8,
            static_friction: 0.9,
            dynamic_friction: 0.8,
        }
    }

    pub fn metal() -> Self {
        Self {
            restitution: 0.2,
            static_friction: 0.4,
            dynamic_friction: 0.3,
        }
    }

    pub fn wood() -> Self {
        Self {
            restitution: 0.3,
            static_friction: 0.5,
            dynamic_friction: 0.4,
        }
    }

    pub fn stone() -> Self {
        Self {
            restitution: 0.1,
            static_friction: 0.7,
            dynamic_friction: 0.6,
        }
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution.clamp(0.0, 1.0);
        self
    }

    pub fn with_friction(mut self, static_friction: f32, dynamic_friction: f32) -> Self {
        self.static_friction = static_friction.clamp(0.0, 1.0);
        self.dynamic_friction = dynamic_friction.clamp(0.0, 1.0);
        self
    }

    /// Effective restitution of a contact between two materials
    pub fn combine_restitution(&self, other: &PhysicsMaterial, rule: CombineRule) -> f32 {
        rule.combine(self.restitution, other.restitution)
    }

    /// Effective dynamic friction of a contact between two materials
    pub fn combine_friction(&self, other: &PhysicsMaterial, rule: CombineRule) -> f32 {
        rule.combine(self.dynamic_friction, other.dynamic_friction)
    }
}

/// Rule for combining material properties of a contact pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CombineRule {
    #[default]
    Average,
    Min,
    Max,
    Multiply,
}

impl CombineRule {
    pub fn combine(self, a: f32, b: f32) -> f32 {
        match self {
            Self::Average => (a + b) * 0.5,
            Self::Min => a.min(b),
            Self::Max => a.max(b),
            Self::Multiply => a * b,
        }
    }
}
