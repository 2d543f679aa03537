//! `pfsi-output` — log streams for the PfSI simulator.
//!
//! Three streams are understood, each bound to one sink by a
//! [`StreamDescriptor`] opened before the run:
//!
//! | Key           | Cadence            | Row layout                                   |
//! |---------------|--------------------|----------------------------------------------|
//! | `pfsi`        | daily, per patch   | `time, patch`, 9 S/I/P counts, 2 incidence   |
//! | `mosquito`    | daily, per compartment | `time, state`, one count per patch       |
//! | `vaccination` | per instant, per patch | `time, patch, count`                     |
//!
//! The header text is supplied by the caller; only its column count is
//! checked against the stream's layout.
//!
//! [`LoggingAggregator`] implements `pfsi_sim::SimObserver`, buffers
//! [`LogRecord`]s per stream, and writes them to a [`LogSink`] every
//! `flush_every` records and at the end of the run.
//!
//! # Usage
//!
//! ```rust,ignore
//! use pfsi_output::{LoggingAggregator, StreamDescriptor, StreamKey};
//!
//! let streams = vec![
//!     StreamDescriptor::new(dir.join("pfsi.csv"), StreamKey::Pfsi, PFSI_HEADER),
//!     StreamDescriptor::new(dir.join("mosy.csv"), StreamKey::Mosquito, &mosy_header),
//! ];
//! let mut log = LoggingAggregator::open(&streams, n_patches, config.flush_every)?;
//! sim.run(&mut log)?;
//! log.finish()?;
//! ```

pub mod aggregator;
pub mod csv_sink;
pub mod error;
pub mod record;
pub mod sink;
pub mod stream;


pub use aggregator::LoggingAggregator;
pub use csv_sink::CsvSink;
pub use error::{OutputError, OutputResult};
pub use record::LogRecord;
pub use sink::LogSink;
pub use stream::{StreamDescriptor, StreamKey};
