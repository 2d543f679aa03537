//! `pfsi-sim` — the event loop of the PfSI patch simulator.
//!
//! # Event loop
//!
//! ```text
//! until the next event time reaches tmax:
//!   pick the earlier of  (queue head, vaccination feed head); ties go to the queue
//!   MosquitoTick(d)   → advance all patches one day, snapshot exposure,
//!                       observer.on_day, queue tick d + 1
//!   Human{id, ev, e}  → skip if epoch e is stale, else call PfsiModel and
//!                       apply the returned intents:
//!                         Schedule          → push into the queue
//!                         TravelTo          → move the human
//!                         InfectMosquitoes  → record feeds for tomorrow's tick
//!                         Incidence         → observer.on_incidence
//!   vaccinations at t → PfsiModel::on_vaccination for each, in feed order,
//!                       then observer.on_vaccinations with per-patch counts
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use pfsi_human::{PfsiModel, PopulationBuilder};
//! use pfsi_sim::{NoopObserver, SimBuilder};
//!
//! let (humans, rngs) = PopulationBuilder::new(human_params, n_patches, config.seed).build()?;
//! let mut sim = SimBuilder::new(config, patches, mosquitoes, humans, rngs, PfsiModel::new(pfsi)?)
//!     .vaccinations(feed)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod exposure;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use exposure::ExposureSnapshot;
pub use observer::{NoopObserver, SimObserver};
pub use sim::{RunSummary, Sim};
