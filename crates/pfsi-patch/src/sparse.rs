//! Sparse diffusion operator in Compressed Sparse Row form.
//!
//! # Data layout
//!
//! Row `i` of the matrix occupies
//!
//! ```text
//! col_idx[ row_start[i] .. row_start[i+1] ]
//! values [ row_start[i] .. row_start[i+1] ]
//! ```
//!
//! so the daily mat-vec product `out = Ψ x` is one contiguous scan per row.
//! Entry `Ψ[i][j]` is the fraction of mosquitoes in patch `j` that end the
//! day in patch `i`.  The operator is not required to be stochastic; when
//! every column sums to 1 the total population is conserved.

use crate::{PatchError, PatchResult};

/// An `n × n` sparse matrix with non-negative entries.
#[derive(Clone, Debug, PartialEq)]
pub struct SparseMatrix {
    n:         usize,
    /// CSR row pointer.  Length = `n + 1`.
    row_start: Vec<u32>,
    col_idx:   Vec<u32>,
    values:    Vec<f64>,
}

impl SparseMatrix {
    /// The identity operator: no movement between patches.
    pub fn identity(n: usize) -> Self {
        Self {
            n,
            row_start: (0..=n as u32).collect(),
            col_idx:   (0..n as u32).collect(),
            values:    vec![1.0; n],
        }
    }

    /// Build from `(row, col, value)` triplets.
    ///
    /// Duplicate coordinates are summed.  Zero values are dropped.  Entries
    /// must be finite and non-negative.
    pub fn from_triplets(n: usize, triplets: &[(usize, usize, f64)]) -> PatchResult<Self> {
        let mut entries: Vec<(usize, usize, f64)> = Vec::with_capacity(triplets.len());
        for &(row, col, value) in triplets {
            if row >= n || col >= n {
                return Err(PatchError::OutOfRange { what: "diffusion", row, col, n });
            }
            if !value.is_finite() || value < 0.0 {
                return Err(PatchError::BadEntry { what: "diffusion", row, col, value });
            }
            if value > 0.0 {
                entries.push((row, col, value));
            }
        }
        entries.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

        let mut row_start = vec![0u32; n + 1];
        let mut col_idx: Vec<u32> = Vec::with_capacity(entries.len());
        let mut values: Vec<f64> = Vec::with_capacity(entries.len());
        let mut last: Option<(usize, usize)> = None;

        for (row, col, value) in entries {
            if last == Some((row, col)) {
                if let Some(v) = values.last_mut() {
                    *v += value;
                }
                continue;
            }
            col_idx.push(col as u32);
            values.push(value);
            row_start[row + 1] += 1;
            last = Some((row, col));
        }
        for i in 0..n {
            row_start[i + 1] += row_start[i];
        }

        Ok(Self { n, row_start, col_idx, values })
    }

    /// Build from a dense row-major matrix, keeping only non-zero entries.
    pub fn from_dense(rows: &[Vec<f64>]) -> PatchResult<Self> {
        let n = rows.len();
        let mut triplets = Vec::new();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(PatchError::Dimension { what: "diffusion row", expected: n, got: row.len() });
            }
            for (j, &v) in row.iter().enumerate() {
                if v != 0.0 {
                    triplets.push((i, j, v));
                }
            }
        }
        Self::from_triplets(n, &triplets)
    }

    /// Matrix dimension.
    pub fn dim(&self) -> usize {
        self.n
    }

    /// Number of stored non-zero entries.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Value at `(row, col)`, zero if not stored.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.row(row)
            .find(|&(c, _)| c == col)
            .map_or(0.0, |(_, v)| v)
    }

    /// Iterator over the stored `(col, value)` pairs of `row`.
    #[inline]
    pub fn row(&self, row: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let start = self.row_start[row] as usize;
        let end   = self.row_start[row + 1] as usize;
        (start..end).map(move |k| (self.col_idx[k] as usize, self.values[k]))
    }

    /// Sum of each column.  A column summing to 1 loses no mosquitoes.
    pub fn column_sums(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.n];
        for (&c, &v) in self.col_idx.iter().zip(&self.values) {
            sums[c as usize] += v;
        }
        sums
    }

    /// `out = Ψ x`.
    ///
    /// # Panics
    /// Panics if `x` or `out` is not of length `dim()`.
    pub fn mul_vec(&self, x: &[f64], out: &mut [f64]) {
        assert_eq!(x.len(), self.n);
        assert_eq!(out.len(), self.n);
        for (i, o) in out.iter_mut().enumerate() {
            *o = self.row(i).map(|(j, v)| v * x[j]).sum();
        }
    }

    /// `Ψ x` with the patches flagged in `held` taken out of the exchange:
    /// their values are copied through unchanged and nothing flows into or
    /// out of them.
    pub fn mul_vec_holding(&self, x: &[f64], held: &[bool]) -> Vec<f64> {
        assert_eq!(held.len(), self.n);
        let mut out = vec![0.0; self.n];
        for (i, o) in out.iter_mut().enumerate() {
            if held[i] {
                *o = x[i];
                continue;
            }
            *o = self
                .row(i)
                .filter(|&(j, _)| !held[j])
                .map(|(j, v)| v * x[j])
                .sum();
        }
        out
    }
}
