//! Ground plane resolution
//!
//! Bodies whose bounds dip below the horizontal ground plane are lifted back
//! onto it, bounce according to their restitution, and are brought to rest
//! once their speed falls under the settle thresholds.

use nova_math::Vec3;

use crate::pipeline::StepContext;

pub fn resolve_ground(ctx: &mut StepContext<'_>) {
    let config = ctx.config;
    if !config.ground_enabled {
        return;
    }
    let ground = config.ground_height;

    for entry in ctx.dynamic {
        let stores = &mut *ctx.stores;
        let (Some(body), Some(collider), Some(transform)) = (
            stores.bodies.get_mut(entry.body),
            stores.colliders.get(entry.collider),
            stores.transforms.get_mut(entry.transform),
        ) else {
            continue;
        };
        if body.is_static {
            continue;
        }

        let bottom = collider.world_aabb(transform).min.y;
        if bottom > ground {
            continue;
        }

        // Keep the offset between origin and bottom so rounding can't leave
        // the body a hair under the plane
        let offset = transform.position.y - bottom;
        transform.position.y = ground + offset;

        if body.velocity.y < 0.0 {
            body.velocity.y = -body.velocity.y * body.material.restitution;
            let keep = 1.0 - body.material.dynamic_friction;
            body.velocity.x *= keep;
            body.velocity.z *= keep;
        }

        if body.velocity.y.abs() < config.settle_vertical_speed {
            body.velocity.y = 0.0;
            let horizontal = (body.velocity.x * body.velocity.x + body.velocity.z * body.velocity.z).sqrt();
            if horizontal < config.settle_horizontal_speed {
                body.velocity = Vec3::ZERO;
                log::trace!("Entity {} settled on ground", entry.entity);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::RigidBody;
    use crate::collider::Collider;
    use crate::config::PhysicsConfig;
    use crate::events::EventCollector;
    use crate::registry::DynamicEntry;
    use crate::stores::PhysicsStores;
    use approx::assert_relative_eq;
    use nova_core::EntityId;
    use nova_math::Transform;

    fn resolve(config: &PhysicsConfig, body: RigidBody, transform: Transform) -> (RigidBody, Transform) {
        let mut stores = PhysicsStores::new();
        let handles = stores.insert_body(body, Collider::cuboid(0.5, 0.5, 0.5), transform).unwrap();
        let entries = [DynamicEntry::new(EntityId::new(0, 0), handles)];
        let mut events = EventCollector::new();
        let mut ctx = StepContext::new(config, config.gravity_vec(), &entries, &mut stores, 0.016, &mut events);
        resolve_ground(&mut ctx);
        (
            stores.bodies.get(handles.body).unwrap().clone(),
            *stores.transforms.get(handles.transform).unwrap(),
        )
    }

    #[test]
    fn test_bounce_with_restitution_and_friction() {
        let body = RigidBody::dynamic(1.0)
            .with_velocity(Vec3::new(2.0, -4.0, 0.0))
            .with_restitution(0.5);
        let (body, transform) = resolve(&PhysicsConfig::default(), body, Transform::from_position(Vec3::new(0.0, 0.3, 0.0)));

        assert_relative_eq!(transform.position.y, 0.5);
        assert_relative_eq!(body.velocity.y, 2.0);
        assert_relative_eq!(body.velocity.x, 2.0 * (1.0 - 0.6), epsilon = 1e-5);
    }

    #[test]
    fn test_scaled_box_snaps_to_half_height() {
        let transform = Transform::from_position(Vec3::new(0.0, -1.0, 0.0)).with_scale(Vec3::new(1.0, 3.0, 1.0));
        let (_, transform) = resolve(&PhysicsConfig::default(), RigidBody::default(), transform);
        assert_relative_eq!(transform.position.y, 1.5);
    }

    #[test]
    fn test_small_bounce_settles() {
        let body = RigidBody::dynamic(1.0)
            .with_velocity(Vec3::new(0.05, -0.08, 0.0))
            .with_restitution(0.5);
        let (body, _) = resolve(&PhysicsConfig::default(), body, Transform::from_position(Vec3::new(0.0, 0.4, 0.0)));
        assert_eq!(body.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_sliding_body_keeps_horizontal_speed() {
        let body = RigidBody::dynamic(1.0).with_velocity(Vec3::new(3.0, 0.0, 0.0));
        let (body, _) = resolve(&PhysicsConfig::default(), body, Transform::from_position(Vec3::new(0.0, 0.5, 0.0)));
        assert_eq!(body.velocity, Vec3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn test_airborne_body_untouched() {
        let body = RigidBody::dynamic(1.0).with_velocity(Vec3::new(0.0, -1.0, 0.0));
        let start = Transform::from_position(Vec3::new(0.0, 2.0, 0.0));
        let (body, transform) = resolve(&PhysicsConfig::default(), body, start);
        assert_eq!(transform, start);
        assert_eq!(body.velocity.y, -1.0);
    }

    #[test]
    fn test_raised_and_disabled_ground() {
        let start = Transform::from_position(Vec3::new(0.0, 1.0, 0.0));
        let raised = PhysicsConfig::default().with_ground(2.0);
        let (_, transform) = resolve(&raised, RigidBody::default(), start);
        assert_relative_eq!(transform.position.y, 2.5);

        let disabled = PhysicsConfig::default().without_ground();
        let (_, transform) = resolve(&disabled, RigidBody::default(), Transform::from_position(Vec3::new(0.0, -5.0, 0.0)));
        assert_eq!(transform.position.y, -5.0);
    }
}
