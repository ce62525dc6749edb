//! Component stores the entity system hands to the physics world
//!
//! The entity system owns these stores; the physics world only keeps handles
//! into them and borrows the stores for the duration of a step or query.

use nova_core::{Handle, Result, Store};
use nova_math::Transform;

use crate::body::RigidBody;
use crate::collider::Collider;

/// Handles of the three components a simulated body is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandles {
    pub body: Handle<RigidBody>,
    pub collider: Handle<Collider>,
    pub transform: Handle<Transform>,
}

/// Handles of an immovable collider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StaticHandles {
    pub collider: Handle<Collider>,
    pub transform: Handle<Transform>,
}

/// One dense store per component kind the physics core reads or writes
#[derive(Debug, Default)]
pub struct PhysicsStores {
    pub transforms: Store<Transform>,
    pub bodies: Store<RigidBody>,
    pub colliders: Store<Collider>,
}

impl PhysicsStores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the components of a simulated body
    pub fn insert_body(&mut self, body: RigidBody, collider: Collider, transform: Transform) -> Result<BodyHandles> {
        Ok(BodyHandles {
            body: self.bodies.insert(body)?,
            collider: self.colliders.insert(collider)?,
            transform: self.transforms.insert(transform)?,
        })
    }

    /// Insert the components of a static collider
    pub fn insert_static(&mut self, collider: Collider, transform: Transform) -> Result<StaticHandles> {
        Ok(StaticHandles {
            collider: self.colliders.insert(collider)?,
            transform: self.transforms.insert(transform)?,
        })
    }

    /// Destroy a body's components. Every registry entry naming them goes stale.
    pub fn remove_body(&mut self, handles: BodyHandles) {
        self.bodies.remove(handles.body);
        self.colliders.remove(handles.collider);
        self.transforms.remove(handles.transform);
    }

    pub fn remove_static(&mut self, handles: StaticHandles) {
        self.colliders.remove(handles.collider);
        self.transforms.remove(handles.transform);
    }

    pub fn body_is_live(&self, handles: &BodyHandles) -> bool {
        self.bodies.contains(handles.body)
            && self.colliders.contains(handles.collider)
            && self.transforms.contains(handles.transform)
    }
}
