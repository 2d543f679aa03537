//! `pfsi-human` — the individual-based human model.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`params`]     | `PfsiParams`, `HumanParams`, `BitingDistribution`         |
//! | [`human`]      | `PfsiState`, `Human`, `VaccineEffects`                    |
//! | [`event`]      | `HumanEvent`, `EventCategory`, `VaccineKind`              |
//! | [`intent`]     | `Intent`, effects a handler asks the simulator to apply   |
//! | [`model`]      | `PfsiModel`, the state machine                            |
//! | [`population`] | `HumanPopulation` (flat arena), `HumanRngs`               |
//! | [`builder`]    | `PopulationBuilder` (validated construction)              |
//! | [`error`]      | `HumanError`, `HumanResult<T>`                            |
//!
//! # State machine (summary)
//!
//! ```text
//!   S ──infectious bite, latent period──▶ I ──clearance──▶ S
//!                                         │
//!                          fever → treatment, or treat=true vaccination
//!                                         ▼
//!                                         P ──prophylaxis ends──▶ S
//! ```
//!
//! Handlers never touch the event queue or other humans.  They mutate the
//! one human they were given and return [`Intent`]s, which the simulator
//! applies in ascending `HumanId` order.

pub mod builder;
pub mod error;
pub mod event;
pub mod human;
pub mod intent;
pub mod model;
pub mod params;
pub mod population;

#[cfg(test)]
mod tests;

pub use builder::PopulationBuilder;
pub use error::{HumanError, HumanResult};
pub use event::{EventCategory, HumanEvent, VaccineKind};
pub use human::{Human, PfsiState, VaccineEffects};
pub use intent::Intent;
pub use model::PfsiModel;
pub use params::{BitingDistribution, HumanParams, PfsiParams};
pub use population::{HumanPopulation, HumanRngs};
