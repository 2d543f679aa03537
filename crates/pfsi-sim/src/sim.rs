//! The `Sim` struct and its event loop.

use log::{debug, info, warn};

use pfsi_core::{CoreError, Day, HumanId, SimClock, SimConfig, Time};
use pfsi_human::{HumanEvent, HumanPopulation, HumanRngs, Intent, PfsiModel};
use pfsi_mosquito::MosquitoPopulation;
use pfsi_patch::PatchLayer;
use pfsi_schedule::{EventQueue, ScheduledEvent, VaccinationFeed};

use crate::{ExposureSnapshot, SimError, SimObserver, SimResult};

/// Days between verbose progress messages.
const PROGRESS_INTERVAL: u32 = 100;

// ── RunSummary ────────────────────────────────────────────────────────────────

/// Counters accumulated over a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub days:         u32,
    /// Human events handled (stale ones excluded).
    pub human_events: u64,
    /// Popped events dropped because their epoch was superseded.
    pub stale_events: u64,
    pub infections:   u64,
    pub treatments:   u64,
    pub vaccinations: u64,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Owns every piece of state of one run; nothing is shared between runs, so
/// an ensemble is simply many `Sim`s built from independent seeds.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    pub config: SimConfig,

    /// Instant of the event being processed.
    pub clock: SimClock,

    pub patches: PatchLayer,

    pub mosquitoes: MosquitoPopulation,

    /// Flat arena indexed by `HumanId`.
    pub humans: HumanPopulation,

    /// Per-human RNGs, separated for the split-borrow pattern.
    pub rngs: HumanRngs,

    pub model: PfsiModel,

    pub queue: EventQueue,

    pub vaccinations: VaccinationFeed,

    /// Exposure fixed at the last daily tick.
    pub exposure: ExposureSnapshot,

    pub summary: RunSummary,
}

/// Where the next event comes from.
enum Next {
    Queue(Time),
    Vaccination(Time),
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until the next event is at or past `config.tmax`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        if self.config.verbose {
            info!(
                "starting run: {} humans, {} patches, {} days, seed {}",
                self.humans.len(),
                self.patches.len(),
                self.config.tmax,
                self.config.seed,
            );
        }

        while let Some(next) = self.next_source() {
            match next {
                Next::Queue(t) | Next::Vaccination(t) if self.clock.is_past_horizon(t) => break,
                Next::Queue(t) => {
                    self.clock.advance_to(t);
                    if let Some((time, event)) = self.queue.pop() {
                        self.dispatch(time, event, observer)?;
                    }
                }
                Next::Vaccination(t) => {
                    self.clock.advance_to(t);
                    self.apply_vaccinations(t, observer)?;
                }
            }
        }

        if self.config.verbose {
            info!(
                "run finished after {} days: {} infections, {} treatments, {} vaccinations",
                self.summary.days, self.summary.infections, self.summary.treatments, self.summary.vaccinations,
            );
        }
        observer.on_sim_end(&self.summary);
        Ok(())
    }

    // ── Core event processing ─────────────────────────────────────────────

    /// Queue events win ties with the vaccination feed.
    fn next_source(&self) -> Option<Next> {
        match (self.queue.peek_time(), self.vaccinations.peek_time()) {
            (None, None) => None,
            (Some(q), None) => Some(Next::Queue(q)),
            (None, Some(v)) => Some(Next::Vaccination(v)),
            (Some(q), Some(v)) => {
                if v < q {
                    Some(Next::Vaccination(v))
                } else {
                    Some(Next::Queue(q))
                }
            }
        }
    }

    fn dispatch<O: SimObserver>(&mut self, now: Time, event: ScheduledEvent, observer: &mut O) -> SimResult<()> {
        match event {
            ScheduledEvent::MosquitoTick(day) => self.daily_tick(day, observer),
            ScheduledEvent::Human { id, event, epoch } => self.human_event(id, event, epoch, now, observer),
        }
    }

    fn daily_tick<O: SimObserver>(&mut self, day: Day, observer: &mut O) -> SimResult<()> {
        self.exposure.refresh_weights(&self.humans);
        self.mosquitoes.tick(day, &self.patches, self.exposure.human_weight())?;
        self.exposure.refresh_foi(&self.patches, &self.mosquitoes);

        observer.on_day(day, &self.humans, &self.mosquitoes);
        if observer.failed() {
            return Err(SimError::ObserverFailed { day });
        }
        self.summary.days += 1;

        if self.config.verbose && day.0 % PROGRESS_INTERVAL == 0 {
            info!(
                "day {}: S={} I={} P={}",
                day.0,
                self.humans.count_state(pfsi_human::PfsiState::Susceptible),
                self.humans.count_state(pfsi_human::PfsiState::Infected),
                self.humans.count_state(pfsi_human::PfsiState::Prophylactic),
            );
        }

        let next = day.next();
        if next.0 < self.config.tmax {
            self.queue.push_tick(next)?;
        }
        Ok(())
    }

    fn human_event<O: SimObserver>(
        &mut self,
        id:       HumanId,
        event:    HumanEvent,
        epoch:    u32,
        now:      Time,
        observer: &mut O,
    ) -> SimResult<()> {
        let human = self.humans.get_mut(id).ok_or(CoreError::HumanNotFound(id))?;
        if !human.is_live(event, epoch) {
            self.summary.stale_events += 1;
            return Ok(());
        }
        self.summary.human_events += 1;

        let rng = self.rngs.get_mut(id);
        let intents = match event {
            HumanEvent::Bite => {
                let foi = self.exposure.foi(human.location);
                self.model.on_bite(human, foi, now, rng)?
            }
            other => self.model.on_event(human, other, now, &self.patches, rng)?,
        };
        self.apply_intents(id, intents, now, observer)
    }

    fn apply_vaccinations<O: SimObserver>(&mut self, now: Time, observer: &mut O) -> SimResult<()> {
        let mut per_patch = vec![0u32; self.patches.len()];
        for vax in self.vaccinations.pop_due(now) {
            let human = self.humans.get_mut(vax.id).ok_or(CoreError::HumanNotFound(vax.id))?;
            let rng = self.rngs.get_mut(vax.id);
            let intents = self.model.on_vaccination(human, vax.kind, vax.treat, now, rng)?;
            per_patch[human.location.index()] += 1;
            debug!("{} vaccinated ({}, treat={}) at {now} in {}", vax.id, vax.kind.tag(), vax.treat, human.location);

            self.summary.vaccinations += 1;
            self.apply_intents(vax.id, intents, now, observer)?;
        }
        observer.on_vaccinations(now, &per_patch);
        Ok(())
    }

    /// Apply one human's intents in the order the model returned them.
    fn apply_intents<O: SimObserver>(
        &mut self,
        id:       HumanId,
        intents:  Vec<Intent>,
        now:      Time,
        observer: &mut O,
    ) -> SimResult<()> {
        for intent in intents {
            match intent {
                Intent::Schedule { at, event, epoch } => {
                    if at < now {
                        warn!("{id}: {event} scheduled in the past ({at} < {now}); running it now");
                    }
                    let at = if at < now { now } else { at };
                    // Events at or past the horizon would never run.
                    if !self.clock.is_past_horizon(at) {
                        self.queue.push_human(at, id, event, epoch)?;
                    }
                }

                Intent::TravelTo { destination } => {
                    let human = self.humans.get_mut(id).ok_or(CoreError::HumanNotFound(id))?;
                    human.location = destination;
                }

                Intent::InfectMosquitoes { patch, feeds } => {
                    self.mosquitoes.record_infected_feeds(patch, feeds);
                }

                Intent::Incidence { home, traveller } => {
                    self.summary.infections += 1;
                    observer.on_incidence(now, home, traveller);
                }

                Intent::Treated => {
                    self.summary.treatments += 1;
                    debug!("{id} treated at {now}");
                }
            }
        }
        Ok(())
    }
}
