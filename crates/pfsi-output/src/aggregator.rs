//! `LoggingAggregator` — bridges `SimObserver` to buffered log streams.

use log::{debug, warn};
use rustc_hash::FxHashMap;

use pfsi_core::{Day, PatchId, Time};
use pfsi_human::HumanPopulation;
use pfsi_mosquito::{Compartment, MosquitoPopulation};
use pfsi_sim::{RunSummary, SimObserver};

use crate::{CsvSink, LogRecord, LogSink, OutputError, OutputResult, StreamDescriptor, StreamKey};

/// PfSI count columns: visitor, resident at home, resident away; each S/I/P.
const VISITOR: usize = 0;
const RESIDENT_HOME: usize = 3;
const RESIDENT_AWAY: usize = 6;

// ── Stream ────────────────────────────────────────────────────────────────────

/// One open stream: its sink plus records not yet written.
struct Stream {
    key:     StreamKey,
    columns: usize,
    buffer:  Vec<LogRecord>,
    sink:    Box<dyn LogSink>,
}

impl Stream {
    fn push(&mut self, record: LogRecord, flush_every: usize) -> OutputResult<()> {
        if record.width() != self.columns {
            return Err(OutputError::Width { key: self.key, expected: self.columns, got: record.width() });
        }
        self.buffer.push(record);
        if self.buffer.len() >= flush_every {
            self.flush()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> OutputResult<()> {
        if !self.buffer.is_empty() {
            self.sink.write_batch(&self.buffer)?;
            self.buffer.clear();
        }
        Ok(())
    }
}

// ── LoggingAggregator ─────────────────────────────────────────────────────────

/// A [`SimObserver`] that turns simulation state into log records.
///
/// Errors are stored internally because `SimObserver` methods have no return
/// value.  [`failed`](SimObserver::failed) reports a stored error, which makes
/// the simulator abort the run; retrieve it with
/// [`take_error`][Self::take_error] or [`finish`][Self::finish].
pub struct LoggingAggregator {
    streams:     FxHashMap<StreamKey, Stream>,
    n_patches:   usize,
    flush_every: usize,
    /// `[resident, traveller]` onsets per home patch since the last PfSI row.
    incidence:   Vec<[u64; 2]>,
    last_error:  Option<OutputError>,
    finished:    bool,
}

impl LoggingAggregator {
    /// Validate every descriptor, create its CSV file, and write its header.
    pub fn open(descriptors: &[StreamDescriptor], n_patches: usize, flush_every: usize) -> OutputResult<Self> {
        let mut sinks: Vec<(StreamDescriptor, Box<dyn LogSink>)> = Vec::with_capacity(descriptors.len());
        for d in descriptors {
            d.validate(n_patches)?;
            let sink: Box<dyn LogSink> = Box::new(CsvSink::create(&d.sink)?);
            sinks.push((d.clone(), sink));
        }
        Self::with_sinks(sinks, n_patches, flush_every)
    }

    /// Like [`open`](Self::open) but with caller-supplied sinks.  The
    /// descriptors' `sink` paths are ignored.
    pub fn with_sinks(
        sinks:       Vec<(StreamDescriptor, Box<dyn LogSink>)>,
        n_patches:   usize,
        flush_every: usize,
    ) -> OutputResult<Self> {
        let mut streams = FxHashMap::default();
        for (d, mut sink) in sinks {
            d.validate(n_patches)?;
            if streams.contains_key(&d.key) {
                return Err(OutputError::DuplicateStream(d.key));
            }
            sink.write_header(&d.header)?;
            debug!("opened {} stream at {}", d.key, d.sink.display());
            streams.insert(d.key, Stream {
                key: d.key,
                columns: d.key.columns(n_patches),
                buffer: Vec::new(),
                sink,
            });
        }
        Ok(Self {
            streams,
            n_patches,
            flush_every: flush_every.max(1),
            incidence: vec![[0; 2]; n_patches],
            last_error: None,
            finished: false,
        })
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush every stream and report the first error of the run.
    pub fn finish(&mut self) -> OutputResult<()> {
        self.flush_all();
        match self.last_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn has(&self, key: StreamKey) -> bool {
        self.streams.contains_key(&key)
    }

    fn push(&mut self, key: StreamKey, record: LogRecord) {
        let result = match self.streams.get_mut(&key) {
            Some(stream) => stream.push(record, self.flush_every),
            None => Ok(()),
        };
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!("log stream failure: {e}");
                self.last_error = Some(e);
            }
        }
    }

    fn flush_all(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        let mut results = Vec::with_capacity(self.streams.len());
        for stream in self.streams.values_mut() {
            results.push(stream.flush().and_then(|_| stream.sink.finish()));
        }
        for r in results {
            self.store_err(r);
        }
    }

    // ── Row builders ──────────────────────────────────────────────────────

    /// Nine S/I/P counts per patch.  Visitors count at the patch they are
    /// in; residents count at their home, split by whether they are there.
    fn pfsi_counts(&self, humans: &HumanPopulation) -> Vec<[u64; 9]> {
        let mut counts = vec![[0u64; 9]; self.n_patches];
        for h in humans.iter() {
            let s = h.state.index();
            if h.is_home() {
                counts[h.home.index()][RESIDENT_HOME + s] += 1;
            } else {
                counts[h.location.index()][VISITOR + s] += 1;
                counts[h.home.index()][RESIDENT_AWAY + s] += 1;
            }
        }
        counts
    }

    fn log_pfsi(&mut self, day: Day, humans: &HumanPopulation) {
        let counts = self.pfsi_counts(humans);
        let incidence = std::mem::replace(&mut self.incidence, vec![[0; 2]; self.n_patches]);
        for (i, (c, inc)) in counts.iter().zip(incidence).enumerate() {
            let mut values: Vec<f64> = c.iter().map(|&x| x as f64).collect();
            values.extend(inc.iter().map(|&x| x as f64));
            self.push(StreamKey::Pfsi, LogRecord::new(day.0 as f64, i.to_string(), values));
        }
    }

    fn log_mosquitoes(&mut self, day: Day, mosquitoes: &MosquitoPopulation) {
        for c in Compartment::ALL {
            let record = LogRecord::new(day.0 as f64, c.label(), mosquitoes.compartment(c));
            self.push(StreamKey::Mosquito, record);
        }
    }
}

impl SimObserver for LoggingAggregator {
    fn on_day(&mut self, day: Day, humans: &HumanPopulation, mosquitoes: &MosquitoPopulation) {
        if self.has(StreamKey::Pfsi) {
            self.log_pfsi(day, humans);
        }
        if self.has(StreamKey::Mosquito) {
            self.log_mosquitoes(day, mosquitoes);
        }
    }

    fn on_incidence(&mut self, _time: Time, home: PatchId, traveller: bool) {
        if let Some(slot) = self.incidence.get_mut(home.index()) {
            slot[traveller as usize] += 1;
        }
    }

    fn on_vaccinations(&mut self, time: Time, per_patch: &[u32]) {
        for (i, &n) in per_patch.iter().enumerate().filter(|(_, n)| **n > 0) {
            self.push(StreamKey::Vaccination, LogRecord::new(time.0, i.to_string(), vec![n as f64]));
        }
    }

    fn failed(&self) -> bool {
        self.last_error.is_some()
    }

    fn on_sim_end(&mut self, summary: &RunSummary) {
        debug!("closing log streams after {} days", summary.days);
        self.flush_all();
    }
}
