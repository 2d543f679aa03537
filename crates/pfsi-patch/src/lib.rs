//! `pfsi-patch` — the static patch layer.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`sparse`]    | `SparseMatrix` (CSR) — the mosquito diffusion operator     |
//! | [`movement`]  | `MovementMatrix` — dense row-stochastic human movement     |
//! | [`layer`]     | `PatchParams`, `PatchLayer`, `MosquitoDensity`, `ForceOfInfection` |
//! | [`error`]     | `PatchError`, `PatchResult<T>`                             |
//!
//! Everything here is read-only once built.  The mosquito and human models
//! query it through [`PatchLayer::movement_row`] and
//! [`PatchLayer::force_of_infection`].

pub mod error;
pub mod layer;
pub mod movement;
pub mod sparse;


pub use error::{PatchError, PatchResult};
pub use layer::{ForceOfInfection, MosquitoDensity, PatchLayer, PatchParams};
pub use movement::MovementMatrix;
pub use sparse::SparseMatrix;
