//! Simulation observer trait for progress reporting and data collection.

use pfsi_core::{Day, PatchId, Time};
use pfsi_human::HumanPopulation;
use pfsi_mosquito::MosquitoPopulation;

use crate::RunSummary;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  Observers see state read-only.
pub trait SimObserver {
    /// Called at every daily tick, after the mosquito update.
    fn on_day(&mut self, _day: Day, _humans: &HumanPopulation, _mosquitoes: &MosquitoPopulation) {}

    /// A human whose home is `home` began a blood-stage infection.
    fn on_incidence(&mut self, _time: Time, _home: PatchId, _traveller: bool) {}

    /// Vaccinations applied at `time`.  `per_patch[i]` counts those given to
    /// humans located in patch `i`.
    fn on_vaccinations(&mut self, _time: Time, _per_patch: &[u32]) {}

    /// Polled after every daily tick; returning `true` aborts the run with
    /// [`SimError::ObserverFailed`][crate::SimError::ObserverFailed].
    fn failed(&self) -> bool {
        false
    }

    /// Called once after the last event before the horizon.
    fn on_sim_end(&mut self, _summary: &RunSummary) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
