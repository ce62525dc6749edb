//! Fixed step pipeline
//!
//! A step is an ordered list of stages, each a plain function over a
//! [`StepContext`]. The order is data, so a stage can be run on its own.

use nova_math::Vec3;

use crate::config::PhysicsConfig;
use crate::events::EventCollector;
use crate::registry::DynamicEntry;
use crate::stores::PhysicsStores;
use crate::{contacts, ground, integrator};

/// Everything a stage may read or mutate during one step
pub struct StepContext<'a> {
    pub config: &'a PhysicsConfig,
    pub gravity: Vec3,
    pub dynamic: &'a [DynamicEntry],
    pub stores: &'a mut PhysicsStores,
    pub dt: f32,
    pub events: &'a mut EventCollector,
    /// Entries with a handle that no longer resolves, counted once per step
    pub stale: usize,
}

impl<'a> StepContext<'a> {
    pub fn new(
        config: &'a PhysicsConfig,
        gravity: Vec3,
        dynamic: &'a [DynamicEntry],
        stores: &'a mut PhysicsStores,
        dt: f32,
        events: &'a mut EventCollector,
    ) -> Self {
        let stale = dynamic.iter().filter(|e| !stores.body_is_live(&e.handles())).count();
        Self {
            config,
            gravity,
            dynamic,
            stores,
            dt,
            events,
            stale,
        }
    }
}

/// Stage entry point
pub type StageFn = fn(&mut StepContext<'_>);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Accumulate gravity into each body's force
    ApplyForces,
    /// Velocities from forces, then positions and rotations from velocities
    Integrate,
    /// Resolve bodies against the ground plane
    Ground,
    /// Resolve overlapping pairs of dynamic bodies
    Contacts,
}

impl Stage {
    /// Stages of one step, in execution order
    pub const PIPELINE: [Stage; 4] = [Stage::ApplyForces, Stage::Integrate, Stage::Ground, Stage::Contacts];

    pub fn name(self) -> &'static str {
        match self {
            Stage::ApplyForces => "apply_forces",
            Stage::Integrate => "integrate",
            Stage::Ground => "ground",
            Stage::Contacts => "contacts",
        }
    }

    pub fn function(self) -> StageFn {
        match self {
            Stage::ApplyForces => integrator::apply_forces,
            Stage::Integrate => integrator::integrate,
            Stage::Ground => ground::resolve_ground,
            Stage::Contacts => contacts::resolve_contacts,
        }
    }

    /// Run this stage over the context
    pub fn run(self, ctx: &mut StepContext<'_>) {
        (self.function())(ctx);
    }
}
