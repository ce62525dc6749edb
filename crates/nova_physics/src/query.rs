//! Physics queries (raycasting, overlap tests)

use nova_core::{EntityId, Handle};
use nova_math::{ray_aabb_slab, Ray, Transform, Vec3, AABB};

use crate::collider::Collider;
use crate::registry::BodyRegistry;
use crate::stores::PhysicsStores;

/// Result of a raycast query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// The entity whose collider was hit
    pub entity: EntityId,
    /// Hit point in world space
    pub point: Vec3,
    /// Distance from ray origin
    pub distance: f32,
    /// The hit collider is a trigger
    pub is_trigger: bool,
}

/// Options for raycast queries
#[derive(Debug, Clone)]
pub struct RaycastOptions {
    /// Hits at or beyond this distance are ignored
    pub max_distance: f32,
    /// Report trigger colliders as well as solid ones
    pub include_triggers: bool,
    /// Entities to exclude
    pub exclude: Vec<EntityId>,
}

impl Default for RaycastOptions {
    fn default() -> Self {
        Self {
            max_distance: f32::INFINITY,
            include_triggers: true,
            exclude: Vec::new(),
        }
    }
}

impl RaycastOptions {
    pub fn with_max_distance(mut self, distance: f32) -> Self {
        self.max_distance = distance;
        self
    }

    /// Set whether to hit triggers
    pub fn with_triggers(mut self, include_triggers: bool) -> Self {
        self.include_triggers = include_triggers;
        self
    }

    pub fn exclude(mut self, entity: EntityId) -> Self {
        self.exclude.push(entity);
        self
    }

    fn accepts(&self, entity: EntityId, collider: &Collider) -> bool {
        (self.include_triggers || !collider.is_trigger) && !self.exclude.contains(&entity)
    }
}

/// Whether two boxes overlap, touching faces included
#[inline]
pub fn check_collision(a: &AABB, b: &AABB) -> bool {
    a.intersects(b)
}

/// Read-only view over the registered colliders
pub struct PhysicsQuery<'a> {
    registry: &'a BodyRegistry,
    stores: &'a PhysicsStores,
    /// Far limit of the slab test
    far: f32,
}

impl<'a> PhysicsQuery<'a> {
    pub fn new(registry: &'a BodyRegistry, stores: &'a PhysicsStores, far: f32) -> Self {
        Self { registry, stores, far }
    }

    /// Live colliders in query order: dynamic entries first, then static ones
    fn colliders(&self) -> impl Iterator<Item = (EntityId, &'a Collider, AABB)> + 'a {
        let stores = self.stores;
        let dynamic = self
            .registry
            .dynamic_entries()
            .iter()
            .map(|e| (e.entity, e.collider, e.transform));
        let statics = self
            .registry
            .static_entries()
            .iter()
            .map(|e| (e.entity, e.collider, e.transform));

        dynamic
            .chain(statics)
            .filter_map(move |(entity, collider, transform)| resolve(stores, entity, collider, transform))
    }

    /// Closest hit with a distance in `[0, max_distance)`.
    ///
    /// A ray starting inside a box hits it at distance 0. On equal distances
    /// the earlier entry wins.
    pub fn raycast(&self, ray: &Ray, options: &RaycastOptions) -> Option<RaycastHit> {
        let mut closest: Option<RaycastHit> = None;
        for (entity, collider, bounds) in self.colliders() {
            if !options.accepts(entity, collider) {
                continue;
            }
            let Some(slab) = ray_aabb_slab(ray, &bounds, self.far) else {
                continue;
            };
            let distance = slab.t_min;
            if distance < 0.0 || distance >= options.max_distance {
                continue;
            }
            if closest.map_or(true, |hit| distance < hit.distance) {
                closest = Some(RaycastHit {
                    entity,
                    point: ray.at(distance),
                    distance,
                    is_trigger: collider.is_trigger,
                });
            }
        }
        closest
    }

    /// Every hit along the ray, nearest first
    pub fn raycast_all(&self, ray: &Ray, options: &RaycastOptions) -> Vec<RaycastHit> {
        let mut hits: Vec<RaycastHit> = self
            .colliders()
            .filter(|(entity, collider, _)| options.accepts(*entity, collider))
            .filter_map(|(entity, collider, bounds)| {
                let slab = ray_aabb_slab(ray, &bounds, self.far)?;
                let distance = slab.t_min;
                (distance >= 0.0 && distance < options.max_distance).then(|| RaycastHit {
                    entity,
                    point: ray.at(distance),
                    distance,
                    is_trigger: collider.is_trigger,
                })
            })
            .collect();

        // Stable, so equal distances keep registration order
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    /// Entities whose bounds overlap `aabb`
    pub fn overlap_aabb(&self, aabb: &AABB) -> Vec<EntityId> {
        self.colliders()
            .filter(|(_, _, bounds)| check_collision(bounds, aabb))
            .map(|(entity, _, _)| entity)
            .collect()
    }

    /// First entity whose bounds contain `point`
    pub fn point_inside(&self, point: Vec3) -> Option<EntityId> {
        self.colliders()
            .find(|(_, _, bounds)| bounds.contains_point(point))
            .map(|(entity, _, _)| entity)
    }
}

fn resolve(
    stores: &PhysicsStores,
    entity: EntityId,
    collider: Handle<Collider>,
    transform: Handle<Transform>,
) -> Option<(EntityId, &Collider, AABB)> {
    let collider = stores.colliders.get(collider)?;
    let transform = stores.transforms.get(transform)?;
    Some((entity, collider, collider.world_aabb(transform)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::RigidBody;
    use crate::collider::ColliderShape;
    use crate::registry::{DynamicEntry, StaticEntry};
    use approx::assert_relative_eq;

    fn scene() -> (BodyRegistry, PhysicsStores) {
        (BodyRegistry::new(), PhysicsStores::new())
    }

    fn add_dynamic(registry: &mut BodyRegistry, stores: &mut PhysicsStores, id: u32, collider: Collider, position: Vec3) {
        let handles = stores
            .insert_body(RigidBody::default(), collider, Transform::from_position(position))
            .unwrap();
        registry.register_rigidbody(DynamicEntry::new(EntityId::new(id, 0), handles));
    }

    fn add_static(registry: &mut BodyRegistry, stores: &mut PhysicsStores, id: u32, collider: Collider, position: Vec3) {
        let handles = stores.insert_static(collider, Transform::from_position(position)).unwrap();
        registry.register_static_collider(StaticEntry::new(EntityId::new(id, 0), handles));
    }

    #[test]
    fn test_raycast_down_onto_box() {
        let (mut registry, mut stores) = scene();
        add_dynamic(&mut registry, &mut stores, 1, Collider::cuboid(1.0, 1.0, 1.0), Vec3::ZERO);

        let query = PhysicsQuery::new(&registry, &stores, 1e6);
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y);
        let hit = query.raycast(&ray, &RaycastOptions::default()).unwrap();

        assert_eq!(hit.entity, EntityId::new(1, 0));
        assert_relative_eq!(hit.distance, 4.0);
        assert_relative_eq!(hit.point, Vec3::new(0.0, 1.0, 0.0));
        assert!(!hit.is_trigger);
    }

    #[test]
    fn test_raycast_picks_closest_across_lists() {
        let (mut registry, mut stores) = scene();
        add_dynamic(&mut registry, &mut stores, 1, Collider::cuboid(0.5, 0.5, 0.5), Vec3::new(0.0, 0.0, 10.0));
        add_static(&mut registry, &mut stores, 2, Collider::cuboid(0.5, 0.5, 0.5), Vec3::new(0.0, 0.0, 4.0));

        let query = PhysicsQuery::new(&registry, &stores, 1e6);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let hit = query.raycast(&ray, &RaycastOptions::default()).unwrap();
        assert_eq!(hit.entity, EntityId::new(2, 0));
        assert_relative_eq!(hit.distance, 3.5);

        let all = query.raycast_all(&ray, &RaycastOptions::default());
        let order: Vec<u32> = all.iter().map(|h| h.entity.index()).collect();
        assert_eq!(order, vec![2, 1]);
    }

    #[test]
    fn test_max_distance_is_exclusive() {
        let (mut registry, mut stores) = scene();
        add_dynamic(&mut registry, &mut stores, 1, Collider::cuboid(1.0, 1.0, 1.0), Vec3::ZERO);
        let query = PhysicsQuery::new(&registry, &stores, 1e6);
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y);

        assert!(query.raycast(&ray, &RaycastOptions::default().with_max_distance(4.0)).is_none());
        assert!(query.raycast(&ray, &RaycastOptions::default().with_max_distance(4.5)).is_some());
    }

    #[test]
    fn test_origin_inside_hits_at_zero() {
        let (mut registry, mut stores) = scene();
        add_static(&mut registry, &mut stores, 3, Collider::cuboid(2.0, 2.0, 2.0), Vec3::ZERO);
        let query = PhysicsQuery::new(&registry, &stores, 1e6);
        let hit = query.raycast(&Ray::new(Vec3::ZERO, Vec3::X), &RaycastOptions::default()).unwrap();
        assert_eq!(hit.distance, 0.0);
    }

    #[test]
    fn test_zero_direction_does_not_panic() {
        let (mut registry, mut stores) = scene();
        add_dynamic(&mut registry, &mut stores, 1, Collider::cuboid(1.0, 1.0, 1.0), Vec3::new(0.0, -3.0, 0.0));
        let query = PhysicsQuery::new(&registry, &stores, 1e6);
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO);
        let _ = query.raycast(&ray, &RaycastOptions::default());
        let _ = query.raycast_all(&ray, &RaycastOptions::default());
    }

    #[test]
    fn test_trigger_filter_and_exclude() {
        let (mut registry, mut stores) = scene();
        add_dynamic(&mut registry, &mut stores, 1, Collider::trigger(ColliderShape::sphere(0.5)), Vec3::new(2.0, 0.0, 0.0));
        add_dynamic(&mut registry, &mut stores, 2, Collider::cuboid(0.5, 0.5, 0.5), Vec3::new(5.0, 0.0, 0.0));
        let query = PhysicsQuery::new(&registry, &stores, 1e6);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let hit = query.raycast(&ray, &RaycastOptions::default()).unwrap();
        assert!(hit.is_trigger);

        let solid = query.raycast(&ray, &RaycastOptions::default().with_triggers(false)).unwrap();
        assert_eq!(solid.entity, EntityId::new(2, 0));

        let options = RaycastOptions::default().exclude(EntityId::new(1, 0)).exclude(EntityId::new(2, 0));
        assert!(query.raycast(&ray, &options).is_none());
    }

    #[test]
    fn test_stale_entries_are_invisible() {
        let (mut registry, mut stores) = scene();
        let handles = stores
            .insert_body(RigidBody::default(), Collider::cuboid(1.0, 1.0, 1.0), Transform::IDENTITY)
            .unwrap();
        registry.register_rigidbody(DynamicEntry::new(EntityId::new(1, 0), handles));
        stores.remove_body(handles);

        let query = PhysicsQuery::new(&registry, &stores, 1e6);
        assert!(query.raycast(&Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y), &RaycastOptions::default()).is_none());
        assert!(query.overlap_aabb(&AABB::from_center_size(Vec3::ZERO, Vec3::ONE)).is_empty());
    }

    #[test]
    fn test_overlap_and_point_queries() {
        let (mut registry, mut stores) = scene();
        add_dynamic(&mut registry, &mut stores, 1, Collider::cuboid(0.5, 0.5, 0.5), Vec3::ZERO);
        add_static(&mut registry, &mut stores, 2, Collider::cuboid(0.5, 0.5, 0.5), Vec3::new(3.0, 0.0, 0.0));
        let query = PhysicsQuery::new(&registry, &stores, 1e6);

        let region = AABB::new(Vec3::new(0.5, -1.0, -1.0), Vec3::new(2.4, 1.0, 1.0));
        assert_eq!(query.overlap_aabb(&region), vec![EntityId::new(1, 0)]);
        assert_eq!(query.point_inside(Vec3::new(3.2, 0.0, 0.0)), Some(EntityId::new(2, 0)));
        assert_eq!(query.point_inside(Vec3::new(1.5, 0.0, 0.0)), None);
    }

    #[test]
    fn test_check_collision() {
        let a = AABB::new(Vec3::ZERO, Vec3::ONE);
        assert!(check_collision(&a, &AABB::new(Vec3::splat(0.5), Vec3::splat(1.5))));
        assert!(check_collision(&a, &AABB::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0))));
        assert!(!check_collision(&a, &AABB::new(Vec3::splat(2.0), Vec3::splat(3.0))));
    }
}
