//! Patch-layer error type.

use thiserror::Error;

use pfsi_core::PatchId;

/// Errors produced while validating patch-level parameters.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("{what} has {got} entries, expected {expected}")]
    Dimension {
        what:     &'static str,
        expected: usize,
        got:      usize,
    },

    #[error("movement row {patch} sums to {sum}, expected 1")]
    NotStochastic { patch: PatchId, sum: f64 },

    #[error("{what} entry ({row}, {col}) = {value} must be finite and non-negative")]
    BadEntry {
        what:  &'static str,
        row:   usize,
        col:   usize,
        value: f64,
    },

    #[error("{what} index ({row}, {col}) outside a {n}x{n} matrix")]
    OutOfRange {
        what: &'static str,
        row:  usize,
        col:  usize,
        n:    usize,
    },

    #[error("patch {patch}: {reason}")]
    InvalidPatch { patch: PatchId, reason: String },
}

pub type PatchResult<T> = Result<T, PatchError>;
