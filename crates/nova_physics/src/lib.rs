//! Nova Physics - lightweight rigid body simulation
//!
//! A small fixed-step simulation over component data owned by the entity
//! system. Bodies are boxes, spheres, capsules or meshes, all approximated by
//! their world-space AABB.
//!
//! # Features
//!
//! - Semi-implicit Euler integration with damping and gravity
//! - Ground plane bouncing with restitution, friction and settling
//! - Pairwise AABB contacts with restitution impulses
//! - Raycasting against dynamic bodies and static colliders
//! - Contact events, including trigger contacts
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                  PhysicsWorld                    │
//! │  ┌──────────────┐  ┌──────────┐  ┌────────────┐  │
//! │  │ BodyRegistry │  │  Events  │  │  Queries   │  │
//! │  └──────────────┘  └──────────┘  └────────────┘  │
//! │  ┌────────────────────────────────────────────┐  │
//! │  │ Stage::PIPELINE                            │  │
//! │  │ apply_forces → integrate → ground →        │  │
//! │  │ contacts                                   │  │
//! │  └────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────┘
//!                        │ handles
//!         ┌──────────────┼──────────────┐
//!         ▼              ▼              ▼
//!    ┌─────────┐   ┌──────────┐   ┌───────────┐
//!    │RigidBody│   │ Collider │   │ Transform │
//!    │  Store  │   │  Store   │   │   Store   │
//!    └─────────┘   └──────────┘   └───────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use nova_physics::prelude::*;
//!
//! let mut stores = PhysicsStores::new();
//! let mut physics = PhysicsWorld::new(PhysicsConfig::default());
//!
//! let crate_box = stores.insert_body(
//!     RigidBody::dynamic(1.0),
//!     Collider::cuboid(0.5, 0.5, 0.5),
//!     Transform::from_position(Vec3::new(0.0, 10.0, 0.0)),
//! )?;
//! physics.register_rigidbody(&stores, entity, crate_box)?;
//!
//! physics.update(&mut stores, &FrameTime::from_delta(1.0 / 60.0));
//! ```

pub mod body;
pub mod collider;
pub mod config;
pub mod contacts;
pub mod error;
pub mod events;
pub mod ground;
pub mod integrator;
pub mod material;
pub mod pipeline;
pub mod query;
pub mod registry;
pub mod stores;
pub mod world;

pub mod prelude {
    //! Common imports for physics functionality
    pub use crate::body::RigidBody;
    pub use crate::collider::{Collider, ColliderShape};
    pub use crate::config::PhysicsConfig;
    pub use crate::error::{PhysicsError, Result};
    pub use crate::events::{ContactEvent, EventCollector};
    pub use crate::material::{CombineRule, PhysicsMaterial};
    pub use crate::pipeline::{Stage, StageFn, StepContext};
    pub use crate::query::{check_collision, PhysicsQuery, RaycastHit, RaycastOptions};
    pub use crate::registry::{BodyRegistry, DynamicEntry, StaticEntry};
    pub use crate::stores::{BodyHandles, PhysicsStores, StaticHandles};
    pub use crate::world::PhysicsWorld;
}

pub use prelude::*;
