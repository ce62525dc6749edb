//! Registry of simulated bodies and static colliders
//!
//! Two append-only lists of handle triples/pairs. Entries never own their
//! components; an entry whose handles were freed is skipped by every stage.

use nova_core::{EntityId, Handle};
use nova_math::Transform;

use crate::body::RigidBody;
use crate::collider::Collider;
use crate::stores::{BodyHandles, StaticHandles};

/// A simulated body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DynamicEntry {
    pub entity: EntityId,
    pub body: Handle<RigidBody>,
    pub collider: Handle<Collider>,
    pub transform: Handle<Transform>,
}

impl DynamicEntry {
    pub fn new(entity: EntityId, handles: BodyHandles) -> Self {
        Self {
            entity,
            body: handles.body,
            collider: handles.collider,
            transform: handles.transform,
        }
    }

    pub fn handles(&self) -> BodyHandles {
        BodyHandles {
            body: self.body,
            collider: self.collider,
            transform: self.transform,
        }
    }
}

/// Immovable geometry: hit by rays, never integrated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticEntry {
    pub entity: EntityId,
    pub collider: Handle<Collider>,
    pub transform: Handle<Transform>,
}

impl StaticEntry {
    pub fn new(entity: EntityId, handles: StaticHandles) -> Self {
        Self {
            entity,
            collider: handles.collider,
            transform: handles.transform,
        }
    }
}

#[derive(Debug, Default)]
pub struct BodyRegistry {
    dynamic: Vec<DynamicEntry>,
    statics: Vec<StaticEntry>,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a dynamic entry. Duplicates are kept.
    pub fn register_rigidbody(&mut self, entry: DynamicEntry) {
        self.dynamic.push(entry);
    }

    pub fn register_static_collider(&mut self, entry: StaticEntry) {
        self.statics.push(entry);
    }

    /// Drop every entry naming `entity`, preserving the order of the rest.
    /// Returns how many entries were removed.
    pub fn remove_entity(&mut self, entity: EntityId) -> usize {
        let before = self.len();
        self.dynamic.retain(|e| e.entity != entity);
        self.statics.retain(|e| e.entity != entity);
        before - self.len()
    }

    pub fn clear(&mut self) {
        self.dynamic.clear();
        self.statics.clear();
    }

    pub fn dynamic_entries(&self) -> &[DynamicEntry] {
        &self.dynamic
    }

    pub fn static_entries(&self) -> &[StaticEntry] {
        &self.statics
    }

    /// First dynamic entry registered for `entity`
    pub fn find_dynamic(&self, entity: EntityId) -> Option<&DynamicEntry> {
        self.dynamic.iter().find(|e| e.entity == entity)
    }

    pub fn len(&self) -> usize {
        self.dynamic.len() + self.statics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
