//! Dense human movement matrix.
//!
//! Row `i` is the destination distribution for a trip leaving patch `i`.
//! Rows are validated once at construction: every entry finite and
//! non-negative, every row summing to 1 within [`ROW_SUM_TOLERANCE`].  The
//! diagonal may be zero (no trips to one's own patch).

use pfsi_core::PatchId;

use crate::{PatchError, PatchResult};

/// Allowed deviation of a row sum from 1.
pub const ROW_SUM_TOLERANCE: f64 = 1e-6;

#[derive(Clone, Debug, PartialEq)]
pub struct MovementMatrix {
    n:    usize,
    /// Row-major, `n * n` entries.
    data: Vec<f64>,
}

impl MovementMatrix {
    /// Validate and store a square row-major matrix.
    pub fn new(rows: Vec<Vec<f64>>) -> PatchResult<Self> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(PatchError::Dimension { what: "movement row", expected: n, got: row.len() });
            }
            let mut sum = 0.0;
            for (j, &v) in row.iter().enumerate() {
                if !v.is_finite() || v < 0.0 {
                    return Err(PatchError::BadEntry { what: "movement", row: i, col: j, value: v });
                }
                sum += v;
            }
            if (sum - 1.0).abs() > ROW_SUM_TOLERANCE {
                return Err(PatchError::NotStochastic { patch: PatchId(i as u32), sum });
            }
            data.extend(row);
        }
        Ok(Self { n, data })
    }

    /// Every patch stays put: the identity matrix.
    pub fn stay_home(n: usize) -> Self {
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            data[i * n + i] = 1.0;
        }
        Self { n, data }
    }

    pub fn dim(&self) -> usize {
        self.n
    }

    /// Destination probabilities for trips leaving `patch`.
    #[inline]
    pub fn row(&self, patch: PatchId) -> &[f64] {
        let start = patch.index() * self.n;
        &self.data[start..start + self.n]
    }
}
