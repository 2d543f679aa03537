//! `pfsi-core` — foundational types for the PfSI patch simulator.
//!
//! This crate is a dependency of every other `pfsi-*` crate.  It has no
//! `pfsi-*` dependencies and few external ones (`rand`, `rand_distr`,
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `HumanId`, `PatchId`                                  |
//! | [`time`]        | `Time`, `Day`, `SimClock`, `SimConfig`                |
//! | [`rng`]         | `RandomSource`, `HumanRng` (per-human), `SimRng`      |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{HumanId, PatchId};
pub use rng::{HumanRng, RandomSource, SimRng};
pub use time::{Day, SimClock, SimConfig, Time};
