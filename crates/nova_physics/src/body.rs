//! Rigid body state

use nova_math::Vec3;

use crate::material::PhysicsMaterial;

/// Mutable per-object physical state, owned by the entity system.
///
/// `inverse_mass` is kept consistent with `mass` by [`RigidBody::set_mass`]:
/// a non-positive mass means infinite mass and an inverse of zero.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    mass: f32,
    inverse_mass: f32,
    pub velocity: Vec3,
    /// Force accumulator, cleared after every integration step
    pub force: Vec3,
    /// Degrees per second around each Euler axis
    pub angular_velocity: Vec3,
    /// Torque accumulator, cleared after every integration step
    pub torque: Vec3,
    pub material: PhysicsMaterial,
    /// Fraction of linear velocity removed per step
    pub linear_damping: f32,
    /// Fraction of angular velocity removed per step
    pub angular_damping: f32,
    pub use_gravity: bool,
    /// Moved externally; ignores accumulated forces
    pub is_kinematic: bool,
    /// Never moved by the simulation
    pub is_static: bool,
}

impl RigidBody {
    /// A fully simulated body
    pub fn dynamic(mass: f32) -> Self {
        let mut body = Self {
            mass: 0.0,
            inverse_mass: 0.0,
            velocity: Vec3::ZERO,
            force: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            torque: Vec3::ZERO,
            material: PhysicsMaterial::default(),
            linear_damping: 0.01,
            angular_damping: 0.05,
            use_gravity: true,
            is_kinematic: false,
            is_static: false,
        };
        body.set_mass(mass);
        body
    }

    /// An immovable body with infinite mass
    pub fn fixed() -> Self {
        Self {
            use_gravity: false,
            is_static: true,
            ..Self::dynamic(0.0)
        }
    }

    /// A body driven by its velocity only
    pub fn kinematic() -> Self {
        Self {
            use_gravity: false,
            is_kinematic: true,
            ..Self::dynamic(1.0)
        }
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    #[inline]
    pub fn inverse_mass(&self) -> f32 {
        self.inverse_mass
    }

    /// Set the mass; non-positive (or NaN) values mean infinite mass
    pub fn set_mass(&mut self, mass: f32) {
        self.mass = mass;
        self.inverse_mass = if mass > 0.0 { 1.0 / mass } else { 0.0 };
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.set_mass(mass);
        self
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_angular_velocity(mut self, degrees_per_second: Vec3) -> Self {
        self.angular_velocity = degrees_per_second;
        self
    }

    pub fn with_material(mut self, material: PhysicsMaterial) -> Self {
        self.material = material;
        self
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.material = self.material.with_restitution(restitution);
        self
    }

    pub fn with_damping(mut self, linear: f32, angular: f32) -> Self {
        self.linear_damping = linear.clamp(0.0, 1.0);
        self.angular_damping = angular.clamp(0.0, 1.0);
        self
    }

    pub fn with_gravity(mut self, use_gravity: bool) -> Self {
        self.use_gravity = use_gravity;
        self
    }

    /// Accumulate a force for the next integration step
    #[inline]
    pub fn add_force(&mut self, force: Vec3) {
        self.force += force;
    }

    #[inline]
    pub fn add_torque(&mut self, torque: Vec3) {
        self.torque += torque;
    }

    /// Instantaneous change of momentum
    #[inline]
    pub fn apply_impulse(&mut self, impulse: Vec3) {
        self.velocity += impulse * self.inverse_mass;
    }

    #[inline]
    pub fn clear_accumulators(&mut self) {
        self.force = Vec3::ZERO;
        self.torque = Vec3::ZERO;
    }

    /// Whether accumulated forces can change this body's velocity
    #[inline]
    pub fn responds_to_forces(&self) -> bool {
        !self.is_static && !self.is_kinematic
    }
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::dynamic(1.0)
    }
}
