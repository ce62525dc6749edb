//! Error types for the physics system
//!
//! The simulation step and ray queries never fail; these errors come only from
//! the management surface (registration, lookups, configuration).

use nova_core::EntityId;
use thiserror::Error;

/// Physics system errors
#[derive(Debug, Error)]
pub enum PhysicsError {
    /// No dynamic entry is registered for the entity
    #[error("Rigid body not registered for entity {0}")]
    BodyNotFound(EntityId),

    /// No entry of either kind is registered for the entity
    #[error("Collider not registered for entity {0}")]
    ColliderNotFound(EntityId),

    /// A registration named a handle that is not live in its store
    #[error("Stale {kind} handle for entity {entity}")]
    StaleHandle {
        entity: EntityId,
        kind: &'static str,
    },

    /// Invalid configuration
    #[error("Invalid physics configuration: {0}")]
    InvalidConfig(String),

    /// Configuration could not be parsed
    #[error("Failed to parse physics configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A component store ran out of handles
    #[error(transparent)]
    Store(#[from] nova_core::Error),
}

/// Result type for physics operations
pub type Result<T> = std::result::Result<T, PhysicsError>;
