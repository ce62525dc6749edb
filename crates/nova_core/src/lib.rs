//! # nova_core - Nova Engine Core
//!
//! Foundational primitives shared by the engine subsystems:
//! - **Handles**: generational indices into dense component stores, so
//!   subsystems hold indices instead of pointers into entity data
//! - **Entities**: opaque identifiers reported back by queries and events
//! - **Frame time**: an explicit time context passed into per-frame updates

pub mod entity;
pub mod error;
pub mod handle;
pub mod time;

pub use entity::*;
pub use error::*;
pub use handle::*;
pub use time::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::entity::{EntityId, EntityIdGenerator};
    pub use crate::error::{Error, Result};
    pub use crate::handle::{Handle, HandleAllocator, Store};
    pub use crate::time::FrameTime;
}
