//! Physics world - registry, step pipeline and queries

use nova_core::{EntityId, FrameTime, Handle};
use nova_math::{Ray, Vec3, AABB};

use crate::body::RigidBody;
use crate::config::PhysicsConfig;
use crate::error::{PhysicsError, Result};
use crate::events::{ContactEvent, EventCollector};
use crate::pipeline::{Stage, StepContext};
use crate::query::{self, PhysicsQuery, RaycastHit, RaycastOptions};
use crate::registry::{BodyRegistry, DynamicEntry, StaticEntry};
use crate::stores::{BodyHandles, PhysicsStores, StaticHandles};

/// The simulation: which entities take part, and how a step runs.
///
/// Component data stays in the caller's [`PhysicsStores`]; the world only
/// holds handles and borrows the stores for each step or query.
#[derive(Debug)]
pub struct PhysicsWorld {
    config: PhysicsConfig,
    gravity: Vec3,
    registry: BodyRegistry,
    events: EventCollector,
    steps: u64,
}

impl PhysicsWorld {
    pub fn new(config: PhysicsConfig) -> Self {
        log::info!(
            "Physics world created (gravity {:?}, ground {})",
            config.gravity,
            if config.ground_enabled { "enabled" } else { "disabled" }
        );
        Self {
            gravity: config.gravity_vec(),
            config,
            registry: BodyRegistry::new(),
            events: EventCollector::new(),
            steps: 0,
        }
    }

    /// Create a world after validating the configuration
    pub fn try_new(config: PhysicsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Get the physics configuration
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = gravity;
    }

    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    /// Steps run since creation
    pub fn step_count(&self) -> u64 {
        self.steps
    }

    // ==================== Registration ====================

    /// Add a simulated body. All three handles must be live.
    pub fn register_rigidbody(&mut self, stores: &PhysicsStores, entity: EntityId, handles: BodyHandles) -> Result<()> {
        check_live(stores.bodies.contains(handles.body), entity, "rigid body")?;
        check_live(stores.colliders.contains(handles.collider), entity, "collider")?;
        check_live(stores.transforms.contains(handles.transform), entity, "transform")?;

        self.registry.register_rigidbody(DynamicEntry::new(entity, handles));
        log::debug!("Registered rigid body for entity {}", entity);
        Ok(())
    }

    /// Add immovable geometry, seen by ray queries only
    pub fn register_static_collider(
        &mut self,
        stores: &PhysicsStores,
        entity: EntityId,
        handles: StaticHandles,
    ) -> Result<()> {
        check_live(stores.colliders.contains(handles.collider), entity, "collider")?;
        check_live(stores.transforms.contains(handles.transform), entity, "transform")?;

        self.registry.register_static_collider(StaticEntry::new(entity, handles));
        log::debug!("Registered static collider for entity {}", entity);
        Ok(())
    }

    /// Unregister every entry of `entity`, returning how many were removed
    pub fn remove_entity(&mut self, entity: EntityId) -> Result<usize> {
        match self.registry.remove_entity(entity) {
            0 => Err(PhysicsError::ColliderNotFound(entity)),
            removed => {
                log::debug!("Removed {} physics entries for entity {}", removed, entity);
                Ok(removed)
            }
        }
    }

    /// Handle of the rigid body registered for `entity`
    pub fn body_handle(&self, entity: EntityId) -> Result<Handle<RigidBody>> {
        self.registry
            .find_dynamic(entity)
            .map(|entry| entry.body)
            .ok_or(PhysicsError::BodyNotFound(entity))
    }

    /// Forget every registered entity. Component data is untouched.
    pub fn clear(&mut self) {
        log::info!("Clearing physics world ({} entries)", self.registry.len());
        self.registry.clear();
        self.events.clear();
    }

    pub fn body_count(&self) -> usize {
        self.registry.dynamic_entries().len()
    }

    pub fn static_count(&self) -> usize {
        self.registry.static_entries().len()
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    // ==================== Simulation ====================

    /// Advance one frame using the scaled delta of `time`
    pub fn update(&mut self, stores: &mut PhysicsStores, time: &FrameTime) {
        self.step(stores, time.scaled_delta());
    }

    /// Advance by `dt` seconds, running every stage of [`Stage::PIPELINE`]
    pub fn step(&mut self, stores: &mut PhysicsStores, dt: f32) {
        self.events.clear();
        let stale = self.run_stages(&Stage::PIPELINE, stores, dt);
        self.steps += 1;

        if stale > 0 {
            log::debug!("Step {}: skipped {} stale entries", self.steps, stale);
        }
        log::trace!("Step {}: dt {} with {} contacts", self.steps, dt, self.events.len());
    }

    /// Run a single stage in isolation
    pub fn run_stage(&mut self, stage: Stage, stores: &mut PhysicsStores, dt: f32) {
        self.events.clear();
        self.run_stages(&[stage], stores, dt);
    }

    fn run_stages(&mut self, stages: &[Stage], stores: &mut PhysicsStores, dt: f32) -> usize {
        let mut ctx = StepContext::new(
            &self.config,
            self.gravity,
            self.registry.dynamic_entries(),
            stores,
            dt,
            &mut self.events,
        );
        for stage in stages {
            stage.run(&mut ctx);
        }
        ctx.stale
    }

    /// Contacts found during the last step
    pub fn contact_events(&self) -> &[ContactEvent] {
        self.events.contacts()
    }

    pub fn events(&self) -> &EventCollector {
        &self.events
    }

    // ==================== Queries ====================

    pub fn query<'a>(&'a self, stores: &'a PhysicsStores) -> PhysicsQuery<'a> {
        PhysicsQuery::new(&self.registry, stores, self.config.max_ray_distance)
    }

    /// Closest hit within `max_distance`, dynamic bodies and static colliders alike
    pub fn raycast(&self, stores: &PhysicsStores, ray: &Ray, max_distance: f32) -> Option<RaycastHit> {
        let options = RaycastOptions::default().with_max_distance(max_distance);
        self.query(stores).raycast(ray, &options)
    }

    pub fn raycast_with(&self, stores: &PhysicsStores, ray: &Ray, options: &RaycastOptions) -> Option<RaycastHit> {
        self.query(stores).raycast(ray, options)
    }

    /// Every hit within `max_distance`, nearest first
    pub fn raycast_all(&self, stores: &PhysicsStores, ray: &Ray, max_distance: f32) -> Vec<RaycastHit> {
        let options = RaycastOptions::default().with_max_distance(max_distance);
        self.query(stores).raycast_all(ray, &options)
    }

    /// Whether two boxes overlap, touching faces included
    pub fn check_collision(a: &AABB, b: &AABB) -> bool {
        query::check_collision(a, b)
    }

    pub fn overlap_aabb(&self, stores: &PhysicsStores, aabb: &AABB) -> Vec<EntityId> {
        self.query(stores).overlap_aabb(aabb)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

fn check_live(live: bool, entity: EntityId, kind: &'static str) -> Result<()> {
    if live {
        Ok(())
    } else {
        Err(PhysicsError::StaleHandle { entity, kind })
    }
}
