//! Contact events produced by the pairwise resolver

use nova_core::EntityId;
use nova_math::Vec3;

/// Two dynamic bodies found overlapping during a step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactEvent {
    pub entity_a: EntityId,
    pub entity_b: EntityId,
    /// Approximate normal pointing from B toward A
    pub normal: Vec3,
    /// Impulse magnitude applied along the normal (0 when separating)
    pub impulse: f32,
    /// Either collider is a trigger
    pub is_trigger: bool,
}

impl ContactEvent {
    pub fn involves(&self, entity: EntityId) -> bool {
        self.entity_a == entity || self.entity_b == entity
    }
}

/// Buffer of events from the most recent step
#[derive(Debug, Default)]
pub struct EventCollector {
    contacts: Vec<ContactEvent>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.contacts.clear();
    }

    pub fn push(&mut self, event: ContactEvent) {
        self.contacts.push(event);
    }

    pub fn contacts(&self) -> &[ContactEvent] {
        &self.contacts
    }

    /// Contacts where a trigger collider took part
    pub fn trigger_contacts(&self) -> impl Iterator<Item = &ContactEvent> {
        self.contacts.iter().filter(|e| e.is_trigger)
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_filters_triggers() {
        let mut events = EventCollector::new();
        let a = EntityId::new(0, 0);
        let b = EntityId::new(1, 0);
        events.push(ContactEvent { entity_a: a, entity_b: b, normal: Vec3::Y, impulse: 1.0, is_trigger: false });
        events.push(ContactEvent { entity_a: b, entity_b: a, normal: Vec3::NEG_Y, impulse: 0.0, is_trigger: true });

        assert_eq!(events.len(), 2);
        assert_eq!(events.trigger_contacts().count(), 1);
        assert!(events.contacts()[0].involves(b));

        events.clear();
        assert!(events.is_empty());
    }
}
