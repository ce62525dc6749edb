//! Falling crates demo
//!
//! Drops a column of crates and a few spheres onto the ground plane, lets the
//! pile settle, then fires rays down through it and reports what they hit.
//!
//! Run with: cargo run -p falling_crates [-- path/to/physics.json]

use std::path::Path;

use nova_core::{EntityId, EntityIdGenerator, FrameTime};
use nova_math::{Ray, Transform, Vec3};
use nova_physics::prelude::*;

const FRAMES: u32 = 600;
const FRAME_DELTA: f32 = 1.0 / 60.0;

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

fn load_config() -> Result<PhysicsConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(Path::new(&path))
                .map_err(|e| PhysicsError::InvalidConfig(format!("cannot read {}: {}", path, e)))?;
            log::info!("Loaded physics config from {}", path);
            PhysicsConfig::from_json_str(&json)
        }
        None => Ok(PhysicsConfig::default()),
    }
}

fn run() -> Result<()> {
    let config = load_config()?;
    let mut world = PhysicsWorld::try_new(config)?;
    let mut stores = PhysicsStores::new();
    let mut ids = EntityIdGenerator::new();
    let mut tracked: Vec<(EntityId, BodyHandles)> = Vec::new();

    // A column of crates, slightly offset so the pile topples
    for i in 0..5 {
        let position = Vec3::new(0.15 * i as f32, 1.0 + 1.2 * i as f32, 0.0);
        let handles = stores.insert_body(
            RigidBody::dynamic(1.0 + i as f32).with_material(PhysicsMaterial::wood()),
            Collider::cuboid(0.5, 0.5, 0.5),
            Transform::from_position(position),
        )?;
        let entity = ids.next_id();
        world.register_rigidbody(&stores, entity, handles)?;
        tracked.push((entity, handles));
    }

    // Bouncy spheres dropped beside the column
    for i in 0..3 {
        let position = Vec3::new(3.0, 4.0 + 2.0 * i as f32, 0.5 * i as f32);
        let handles = stores.insert_body(
            RigidBody::dynamic(0.5)
                .with_material(PhysicsMaterial::rubber())
                .with_angular_velocity(Vec3::new(0.0, 45.0, 0.0)),
            Collider::sphere(0.4),
            Transform::from_position(position),
        )?;
        let entity = ids.next_id();
        world.register_rigidbody(&stores, entity, handles)?;
        tracked.push((entity, handles));
    }

    // A ledge only rays can see
    let ledge = stores.insert_static(
        Collider::cuboid(1.0, 0.1, 1.0),
        Transform::from_position(Vec3::new(-3.0, 2.0, 0.0)),
    )?;
    let ledge_entity = ids.next_id();
    world.register_static_collider(&stores, ledge_entity, ledge)?;

    log::info!(
        "Simulating {} bodies and {} static colliders for {} frames",
        world.body_count(),
        world.static_count(),
        FRAMES
    );

    let mut time = FrameTime::new();
    let mut contacts = 0usize;
    for _ in 0..FRAMES {
        time.advance(FRAME_DELTA);
        world.update(&mut stores, &time);
        contacts += world.contact_events().len();

        if time.frame % 120 == 0 {
            log::info!("t = {:.1}s, {} contacts this frame", time.total, world.contact_events().len());
        }
    }
    log::info!("Resolved {} contacts in total", contacts);

    for (entity, handles) in &tracked {
        if let (Some(body), Some(transform)) = (stores.bodies.get(handles.body), stores.transforms.get(handles.transform)) {
            log::info!(
                "Entity {}: position ({:.2}, {:.2}, {:.2}), speed {:.3}",
                entity,
                transform.position.x,
                transform.position.y,
                transform.position.z,
                body.velocity.length()
            );
        }
    }

    for x in [-3.0, 0.0, 3.0, 6.0] {
        let ray = Ray::new(Vec3::new(x, 20.0, 0.0), Vec3::NEG_Y);
        match world.raycast(&stores, &ray, 100.0) {
            Some(hit) => log::info!(
                "Ray at x = {}: hit entity {} at height {:.2} (distance {:.2})",
                x,
                hit.entity,
                hit.point.y,
                hit.distance
            ),
            None => log::info!("Ray at x = {}: no hit", x),
        }
    }

    Ok(())
}
