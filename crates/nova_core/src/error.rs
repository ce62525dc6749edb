//! Error types for the core library

use thiserror::Error;

/// The core error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Every index a handle can encode is in use
    #[error("Handle space exhausted for store of {type_name} ({capacity} slots)")]
    StoreExhausted {
        type_name: &'static str,
        capacity: usize,
    },
}

/// Result type alias
pub type Result<T> = core::result::Result<T, Error>;
