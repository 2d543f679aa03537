//! Fluent builder for constructing a [`Sim`].

use log::debug;

use pfsi_core::{Day, HumanId, SimConfig, Time};
use pfsi_human::{HumanPopulation, HumanRngs, Intent, PfsiModel};
use pfsi_mosquito::MosquitoPopulation;
use pfsi_patch::PatchLayer;
use pfsi_schedule::{EventQueue, VaccinationFeed};

use crate::{ExposureSnapshot, RunSummary, Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`]: horizon, seed, verbosity
/// - [`PatchLayer`]: movement, reservoirs, zoophily, diffusion
/// - [`MosquitoPopulation`]: built for the same number of patches
/// - [`HumanPopulation`] + [`HumanRngs`]: from [`pfsi_human::PopulationBuilder`]
/// - [`PfsiModel`]
///
/// # Optional inputs
///
/// | Method             | Default                |
/// |--------------------|------------------------|
/// | `.vaccinations(f)` | `VaccinationFeed::empty()` |
///
/// Every cross-structure check happens in [`build`](Self::build), so a
/// misconfigured run fails before any event is processed.
pub struct SimBuilder {
    config:       SimConfig,
    patches:      PatchLayer,
    mosquitoes:   MosquitoPopulation,
    humans:       HumanPopulation,
    rngs:         HumanRngs,
    model:        PfsiModel,
    vaccinations: Option<VaccinationFeed>,
}

impl SimBuilder {
    pub fn new(
        config:     SimConfig,
        patches:    PatchLayer,
        mosquitoes: MosquitoPopulation,
        humans:     HumanPopulation,
        rngs:       HumanRngs,
        model:      PfsiModel,
    ) -> Self {
        Self { config, patches, mosquitoes, humans, rngs, model, vaccinations: None }
    }

    pub fn vaccinations(mut self, feed: VaccinationFeed) -> Self {
        self.vaccinations = Some(feed);
        self
    }

    /// Validate inputs, queue every initial event, and return a ready-to-run
    /// [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        let n = self.patches.len();
        if n == 0 {
            return Err(SimError::Config("at least one patch is required".into()));
        }

        // ── Cross-structure dimensions ────────────────────────────────────
        if self.mosquitoes.patch_count() != n {
            return Err(SimError::Dimension {
                what:     "mosquito population",
                expected: n,
                got:      self.mosquitoes.patch_count(),
            });
        }
        if self.rngs.len() != self.humans.len() {
            return Err(SimError::Dimension {
                what:     "human RNG streams",
                expected: self.humans.len(),
                got:      self.rngs.len(),
            });
        }
        for h in self.humans.iter() {
            if h.home.index() >= n || h.location.index() >= n || h.trip_duration.len() != n {
                return Err(SimError::Config(format!("{} does not fit a {n}-patch layer", h.id)));
            }
        }

        let vaccinations = self.vaccinations.unwrap_or_else(VaccinationFeed::empty);
        if let Some(v) = vaccinations.iter().find(|v| v.id.index() >= self.humans.len()) {
            return Err(SimError::Config(format!(
                "vaccination at {} targets {}, but only {} humans exist",
                v.time, v.id, self.humans.len()
            )));
        }

        let mut sim = Sim {
            clock:        self.config.make_clock(),
            config:       self.config,
            exposure:     ExposureSnapshot::empty(n),
            patches:      self.patches,
            mosquitoes:   self.mosquitoes,
            humans:       self.humans,
            rngs:         self.rngs,
            model:        self.model,
            queue:        EventQueue::new(),
            vaccinations,
            summary:      RunSummary::default(),
        };
        seed_events(&mut sim)?;
        debug!("queued {} initial events", sim.queue.len());
        Ok(sim)
    }
}

/// The first mosquito tick plus each human's initial events, in id order.
fn seed_events(sim: &mut Sim) -> SimResult<()> {
    if sim.config.tmax == 0 {
        return Ok(());
    }
    sim.queue.push_tick(Day::ZERO)?;

    let horizon = sim.config.horizon();
    for i in 0..sim.humans.len() {
        let id = HumanId(i as u32);
        let Some(human) = sim.humans.get_mut(id) else { continue };
        let intents = sim.model.initial_events(human, sim.rngs.get_mut(id))?;
        for intent in intents {
            if let Intent::Schedule { at, event, epoch } = intent {
                if at < horizon && at >= Time::ZERO {
                    sim.queue.push_human(at, id, event, epoch)?;
                }
            }
        }
    }
    Ok(())
}
