//! `pfsi-mosquito` — patch-structured Ross–Macdonald mosquito model.
//!
//! # Daily update (one call to [`MosquitoPopulation::tick`])
//!
//! ```text
//! ① Aging      — exposed cohorts whose age reached today's EIP become
//!                infectious (Y → Z).
//! ② Survival   — every compartment × p × (1 − f·toxic share); recruit
//!                lambda[day][patch] new susceptibles.
//! ③ Seeding    — yesterday's infected feeds on humans move M → newest Y
//!                cohort (capped at M).
//! ④ Diffusion  — Ψ·x for M, each Y cohort, and Z; reservoir patches held.
//! ```
//!
//! All compartments are real-valued.  Randomness lives at the human
//! interface only; this crate is deterministic.

pub mod error;
pub mod params;
pub mod population;

#[cfg(test)]
mod tests;

pub use error::{MosquitoError, MosquitoResult};
pub use params::MosquitoParams;
pub use population::{Cohort, Compartment, MosquitoPopulation};
