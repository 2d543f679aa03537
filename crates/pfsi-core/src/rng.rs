//! The RNG service: deterministic per-human and run-level random streams.
//!
//! # Determinism strategy
//!
//! Each human gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR ((human_id + 1) * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive ids uniformly across the seed space.  The `+ 1`
//! keeps human 0 off the bare global seed, which [`SimRng::new`] uses.  Because
//! every draw a human's events make comes from that human's own stream, the
//! trajectory of one human does not depend on how many draws another human
//! made, and a run is reproducible from `(parameters, seed)` alone.
//!
//! Model code never touches `rand` directly; it asks a [`RandomSource`] for
//! uniform, exponential, Poisson, Negative-Binomial or normal draws.  Invalid
//! distribution parameters are reported as [`CoreError::Random`], which the
//! simulator treats as fatal.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp, Gamma, Normal, Poisson};

use crate::{CoreError, CoreResult, HumanId};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── RandomSource ──────────────────────────────────────────────────────────────

/// The random draws the simulator consumes.
pub trait RandomSource {
    /// Uniform on `[0, 1)`.
    fn uniform(&mut self) -> f64;

    /// Exponential waiting time with the given `rate` (mean `1 / rate`).
    fn exponential(&mut self, rate: f64) -> CoreResult<f64>;

    /// Poisson count with the given mean.  A mean of zero yields zero.
    fn poisson(&mut self, mean: f64) -> CoreResult<u64>;

    /// Negative-Binomial count parameterized by mean and size (dispersion).
    ///
    /// Drawn as a Gamma–Poisson mixture: `λ ~ Gamma(size, mean / size)`,
    /// `k ~ Poisson(λ)`, so the variance is `mean + mean² / size`.
    fn negative_binomial(&mut self, mean: f64, size: f64) -> CoreResult<u64>;

    /// Normal draw.
    fn normal(&mut self, mean: f64, sd: f64) -> CoreResult<f64>;

    /// `true` with probability `p` (clamped to `[0, 1]`).
    #[inline]
    fn bernoulli(&mut self, p: f64) -> bool {
        self.uniform() < p.clamp(0.0, 1.0)
    }

    /// Index drawn proportionally to `weights`.  `None` if no weight is
    /// positive.
    fn categorical(&mut self, weights: &[f64]) -> Option<usize> {
        let total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
        if total <= 0.0 {
            return None;
        }
        let mut target = self.uniform() * total;
        let mut last = None;
        for (i, &w) in weights.iter().enumerate() {
            if w <= 0.0 {
                continue;
            }
            if target < w {
                return Some(i);
            }
            target -= w;
            last = Some(i);
        }
        // Rounding left a sliver past the final bucket.
        last
    }
}

fn random_err(what: &str, e: impl std::fmt::Display) -> CoreError {
    CoreError::Random(format!("{what}: {e}"))
}

/// Implement [`RandomSource`] for a newtype around `SmallRng`.
macro_rules! impl_random_source {
    ($name:ident) => {
        impl RandomSource for $name {
            #[inline]
            fn uniform(&mut self) -> f64 {
                self.0.r#gen::<f64>()
            }

            fn exponential(&mut self, rate: f64) -> CoreResult<f64> {
                if !(rate.is_finite() && rate > 0.0) {
                    return Err(CoreError::Random(format!("exponential rate {rate} must be positive")));
                }
                let dist = Exp::new(rate).map_err(|e| random_err("exponential", e))?;
                Ok(dist.sample(&mut self.0))
            }

            fn poisson(&mut self, mean: f64) -> CoreResult<u64> {
                if mean == 0.0 {
                    return Ok(0);
                }
                if !(mean.is_finite() && mean > 0.0) {
                    return Err(CoreError::Random(format!("poisson mean {mean} must be non-negative")));
                }
                let dist = Poisson::new(mean).map_err(|e| random_err("poisson", e))?;
                let k: f64 = dist.sample(&mut self.0);
                Ok(k as u64)
            }

            fn negative_binomial(&mut self, mean: f64, size: f64) -> CoreResult<u64> {
                if !(size.is_finite() && size > 0.0) {
                    return Err(CoreError::Random(format!("negative binomial size {size} must be positive")));
                }
                if mean == 0.0 {
                    return Ok(0);
                }
                if !(mean.is_finite() && mean > 0.0) {
                    return Err(CoreError::Random(format!("negative binomial mean {mean} must be non-negative")));
                }
                let gamma = Gamma::new(size, mean / size).map_err(|e| random_err("gamma", e))?;
                let lambda: f64 = gamma.sample(&mut self.0);
                self.poisson(lambda)
            }

            fn normal(&mut self, mean: f64, sd: f64) -> CoreResult<f64> {
                let dist = Normal::new(mean, sd).map_err(|e| random_err("normal", e))?;
                Ok(dist.sample(&mut self.0))
            }
        }
    };
}

// ── HumanRng ──────────────────────────────────────────────────────────────────

/// Per-human deterministic RNG.
///
/// Created once per human at population build time and stored in a parallel
/// `Vec<HumanRng>` beside the human records.
pub struct HumanRng(SmallRng);

impl HumanRng {
    /// Seed deterministically from the run's global seed and a human id.
    pub fn new(global_seed: u64, human: HumanId) -> Self {
        let seed = global_seed ^ (human.0 as u64 + 1).wrapping_mul(MIXING_CONSTANT);
        HumanRng(SmallRng::seed_from_u64(seed))
    }
}

impl_random_source!(HumanRng);

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Run-level RNG for draws that belong to no single human (initial state
/// assignment, scenario construction, ensemble seeding).
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset, used to seed
    /// independent ensemble members from one root seed.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    /// A fresh 64-bit seed.
    #[inline]
    pub fn next_seed(&mut self) -> u64 {
        self.0.r#gen()
    }
}

impl_random_source!(SimRng);
