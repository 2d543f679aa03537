//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`, so `?` works across crate seams.

use thiserror::Error;

use crate::HumanId;

/// Errors raised by the core primitives.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("human {0} not found")]
    HumanNotFound(HumanId),

    /// A distribution was asked for with parameters it cannot sample from.
    #[error("random draw failed: {0}")]
    Random(String),
}

/// Shorthand result type for all `pfsi-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
