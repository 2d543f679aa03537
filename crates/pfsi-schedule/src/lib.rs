//! `pfsi-schedule` — the global event queue and the vaccination feed.
//!
//! # Crate layout
//!
//! | Module          | Contents                                               |
//! |-----------------|--------------------------------------------------------|
//! | [`event_queue`] | `EventQueue` (min-heap), `ScheduledEvent`              |
//! | [`vaccination`] | `VaccinationEvent`, `VaccinationFeed`                  |
//! | [`loader`]      | `load_vaccinations_csv`, `load_vaccinations_reader`    |
//! | [`error`]       | `ScheduleError`, `ScheduleResult<T>`                   |
//!
//! # Ordering (summary)
//!
//! Events sharing an instant are processed as:
//!
//! ```text
//! mosquito tick  <  human events (ascending HumanId, then event kind)  <  vaccinations
//! ```
//!
//! The queue enforces the first two; the simulator drains the feed only
//! after every queued event at that instant, which gives the third.

pub mod error;
pub mod event_queue;
pub mod loader;
pub mod vaccination;


pub use error::{ScheduleError, ScheduleResult};
pub use event_queue::{EventQueue, ScheduledEvent};
pub use loader::{load_vaccinations_csv, load_vaccinations_reader};
pub use vaccination::{VaccinationEvent, VaccinationFeed};
