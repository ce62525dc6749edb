//! Semi-implicit Euler integration
//!
//! Velocities are updated from the accumulated forces first, and positions
//! then advance with the updated velocities. Rotation is integrated as Euler
//! angles in degrees, without coupling between axes.

use crate::pipeline::StepContext;

/// Add gravity to the force accumulator of every body that responds to it
pub fn apply_forces(ctx: &mut StepContext<'_>) {
    let gravity = ctx.gravity;
    for entry in ctx.dynamic {
        let Some(body) = ctx.stores.bodies.get_mut(entry.body) else {
            continue;
        };
        // Infinite mass: gravity * mass would be meaningless
        if body.responds_to_forces() && body.use_gravity && body.inverse_mass() > 0.0 {
            let weight = gravity * body.mass();
            body.add_force(weight);
        }
    }
}

/// Update velocities from forces, then positions and rotations from velocities
pub fn integrate(ctx: &mut StepContext<'_>) {
    let dt = ctx.dt;

    for entry in ctx.dynamic {
        let Some(body) = ctx.stores.bodies.get_mut(entry.body) else {
            continue;
        };

        if !body.is_static {
            let inverse_mass = body.inverse_mass();
            if !body.is_kinematic && inverse_mass > 0.0 {
                body.velocity += body.force * (inverse_mass * dt);
                body.angular_velocity += body.torque * (inverse_mass * dt);
            }
            body.velocity *= 1.0 - body.linear_damping;
        }
        body.clear_accumulators();
    }

    for entry in ctx.dynamic {
        let stores = &mut *ctx.stores;
        let (Some(body), Some(transform)) = (
            stores.bodies.get_mut(entry.body),
            stores.transforms.get_mut(entry.transform),
        ) else {
            continue;
        };
        if body.is_static {
            continue;
        }

        transform.position += body.velocity * dt;

        if body.angular_velocity.length() > 0.0 {
            transform.rotation += body.angular_velocity * dt;
            body.angular_velocity *= 1.0 - body.angular_damping;
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
    use crate::pipeline::StageFn;
    use crate::registry::DynamicEntry;
    use crate::stores::PhysicsStores;
    use approx::assert_relative_eq;
    use nova_core::EntityId;
    use nova_math::{Transform, Vec3};

    fn single(body: RigidBody) -> (PhysicsStores, Vec<DynamicEntry>) {
        let mut stores = PhysicsStores::new();
        let handles = stores
            .insert_body(body, Collider::default(), Transform::from_position(Vec3::new(0.0, 10.0, 0.0)))
            .unwrap();
        (stores, vec![DynamicEntry::new(EntityId::new(0, 0), handles)])
    }

    fn run(stores: &mut PhysicsStores, entries: &[DynamicEntry], stages: &[StageFn], dt: f32) {
        let config = PhysicsConfig::default();
        let mut events = EventCollector::new();
        let mut ctx = StepContext::new(&config, config.gravity_vec(), entries, stores, dt, &mut events);
        for stage in stages {
            stage(&mut ctx);
        }
    }

    #[test]
    fn test_gravity_step() {
        let (mut stores, entries) = single(RigidBody::dynamic(2.0));
        run(&mut stores, &entries, &[apply_forces, integrate], 1.0);

        let body = stores.bodies.get(entries[0].body).unwrap();
        assert_relative_eq!(body.velocity.y, -9.81 * (1.0 - 0.01), epsilon = 1e-4);
        assert_eq!(body.force, Vec3::ZERO);

        let transform = stores.transforms.get(entries[0].transform).unwrap();
        assert_relative_eq!(transform.position.y, 10.0 + body.velocity.y, epsilon = 1e-4);
    }

    #[test]
    fn test_infinite_mass_ignores_force() {
        for mass in [0.0, -1.0] {
            let (mut stores, entries) = single(RigidBody::dynamic(mass));
            stores
                .bodies
                .get_mut(entries[0].body)
                .unwrap()
                .add_force(Vec3::new(1000.0, 0.0, 0.0));
            run(&mut stores, &entries, &[apply_forces, integrate], 0.1);
            assert_eq!(stores.bodies.get(entries[0].body).unwrap().velocity, Vec3::ZERO);
        }
    }

    #[test]
    fn test_static_body_never_moves() {
        let (mut stores, entries) = single(RigidBody::fixed().with_velocity(Vec3::X));
        run(&mut stores, &entries, &[apply_forces, integrate], 1.0);
        let transform = stores.transforms.get(entries[0].transform).unwrap();
        assert_eq!(transform.position, Vec3::new(0.0, 10.0, 0.0));
    }

    #[test]
    fn test_kinematic_ignores_forces_but_moves() {
        let body = RigidBody::kinematic().with_velocity(Vec3::X).with_damping(0.0, 0.0);
        let (mut stores, entries) = single(body);
        stores.bodies.get_mut(entries[0].body).unwrap().add_force(Vec3::Y * 100.0);
        run(&mut stores, &entries, &[apply_forces, integrate], 0.5);

        let body = stores.bodies.get(entries[0].body).unwrap();
        assert_eq!(body.velocity, Vec3::X);
        assert_eq!(body.force, Vec3::ZERO);
        let transform = stores.transforms.get(entries[0].transform).unwrap();
        assert_relative_eq!(transform.position.x, 0.5);
    }

    #[test]
    fn test_rotation_in_degrees_with_damping() {
        let body = RigidBody::dynamic(1.0)
            .with_gravity(false)
            .with_angular_velocity(Vec3::new(0.0, 90.0, 0.0));
        let (mut stores, entries) = single(body);
        run(&mut stores, &entries, &[integrate], 1.0);

        let transform = stores.transforms.get(entries[0].transform).unwrap();
        assert_relative_eq!(transform.rotation.y, 90.0);
        let body = stores.bodies.get(entries[0].body).unwrap();
        assert_relative_eq!(body.angular_velocity.y, 90.0 * 0.95, epsilon = 1e-4);
    }

    #[test]
    fn test_torque_drives_rotation() {
        let body = RigidBody::dynamic(2.0).with_gravity(false).with_damping(0.0, 0.0);
        let (mut stores, entries) = single(body);
        stores.bodies.get_mut(entries[0].body).unwrap().add_torque(Vec3::new(0.0, 10.0, 0.0));
        run(&mut stores, &entries, &[apply_forces, integrate], 0.5);

        // 10 * (1 / 2) * 0.5
        let body = stores.bodies.get(entries[0].body).unwrap();
        assert_relative_eq!(body.angular_velocity, Vec3::new(0.0, 2.5, 0.0), epsilon = 1e-5);
        assert_eq!(body.torque, Vec3::ZERO);
        let transform = stores.transforms.get(entries[0].transform).unwrap();
        assert_relative_eq!(transform.rotation.y, 1.25, epsilon = 1e-5);
    }

    #[test]
    fn test_infinite_mass_ignores_torque() {
        let (mut stores, entries) = single(RigidBody::dynamic(0.0).with_gravity(false));
        stores.bodies.get_mut(entries[0].body).unwrap().add_torque(Vec3::new(50.0, 0.0, 0.0));
        run(&mut stores, &entries, &[apply_forces, integrate], 1.0);

        let body = stores.bodies.get(entries[0].body).unwrap();
        assert_eq!(body.angular_velocity, Vec3::ZERO);
        assert_eq!(body.torque, Vec3::ZERO);
        assert_eq!(stores.transforms.get(entries[0].transform).unwrap().rotation, Vec3::ZERO);
    }

    #[test]
    fn test_stale_entry_is_skipped() {
        let (mut stores, entries) = single(RigidBody::default());
        let body = entries[0].body;
        stores.bodies.remove(body);
        run(&mut stores, &entries, &[apply_forces, integrate], 1.0);
        let transform = stores.transforms.get(entries[0].transform).unwrap();
        assert_eq!(transform.position, Vec3::new(0.0, 10.0, 0.0));
    }
}
