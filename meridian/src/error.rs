//! Error types used by the crate.

use thiserror::Error;

/// Meridian error type.
#[derive(Debug, Error)]
pub enum MeridianError {
    /// Item not found.
    #[error("item not found")]
    NotFound,
    /// Generic error - details are inside.
    #[error("{0}")]
    Generic(String),
}
