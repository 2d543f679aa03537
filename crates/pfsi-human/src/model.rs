//! `PfsiModel` — the per-human state machine.
//!
//! Every handler takes one `&mut Human`, that human's own RNG, and the
//! current instant, and returns the [`Intent`]s the simulator must apply.
//! Stale events (epoch mismatch) are filtered by the simulator before a
//! handler is called.

use log::trace;
use pfsi_core::{PatchId, RandomSource, Time};
use pfsi_patch::{ForceOfInfection, PatchLayer};

use crate::{
    BitingDistribution, EventCategory, Human, HumanError, HumanEvent, HumanResult, Intent, PfsiParams,
    PfsiState, VaccineKind,
};

/// Days between successive biting draws.
const BITE_INTERVAL: f64 = 1.0;

pub struct PfsiModel {
    params: PfsiParams,
}

impl PfsiModel {
    pub fn new(params: PfsiParams) -> HumanResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &PfsiParams {
        &self.params
    }

    // ── Scheduling helpers ────────────────────────────────────────────────

    fn schedule(human: &mut Human, at: Time, event: HumanEvent, out: &mut Vec<Intent>) {
        let epoch = human.arm(event.category());
        out.push(Intent::Schedule { at, event, epoch });
    }

    fn schedule_departure<R: RandomSource>(
        human: &mut Human,
        now:   Time,
        rng:   &mut R,
        out:   &mut Vec<Intent>,
    ) -> HumanResult<()> {
        if human.trip_frequency > 0.0 {
            let wait = rng.exponential(human.trip_frequency)?;
            Self::schedule(human, now + wait, HumanEvent::Depart, out);
        }
        Ok(())
    }

    /// Start a blood-stage infection: clearance timer plus the fever chain.
    fn begin_infection<R: RandomSource>(
        &self,
        human: &mut Human,
        now:   Time,
        rng:   &mut R,
        out:   &mut Vec<Intent>,
    ) -> HumanResult<()> {
        human.state = PfsiState::Infected;
        let duration = rng.exponential(1.0 / self.params.mean_infection_duration)?;
        Self::schedule(human, now + duration, HumanEvent::Clearance, out);
        if rng.bernoulli(self.params.fever_probability) {
            let delay = rng.exponential(1.0 / self.params.mean_time_to_fever)?;
            Self::schedule(human, now + delay, HumanEvent::Fever, out);
        }
        Ok(())
    }

    /// Clear any infection and start (or renew) prophylaxis.
    fn treat(&self, human: &mut Human, now: Time, out: &mut Vec<Intent>) {
        human.disarm(EventCategory::Clearance);
        human.disarm(EventCategory::Fever);
        human.disarm(EventCategory::Treatment);
        human.disarm(EventCategory::InfectionOnset);
        human.pending_onset = None;
        human.state = PfsiState::Prophylactic;
        Self::schedule(human, now + self.params.prophylaxis_duration, HumanEvent::EndProphylaxis, out);
        out.push(Intent::Treated);
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Events every human needs at time zero: the first biting draw, the
    /// first trip, and the timers implied by its initial state.
    pub fn initial_events<R: RandomSource>(
        &self,
        human: &mut Human,
        rng:   &mut R,
    ) -> HumanResult<Vec<Intent>> {
        let now = Time::ZERO;
        let mut out = Vec::with_capacity(4);
        Self::schedule(human, now, HumanEvent::Bite, &mut out);
        Self::schedule_departure(human, now, rng, &mut out)?;
        match human.state {
            PfsiState::Susceptible => {}
            PfsiState::Infected => self.begin_infection(human, now, rng, &mut out)?,
            PfsiState::Prophylactic => {
                Self::schedule(human, now + self.params.prophylaxis_duration, HumanEvent::EndProphylaxis, &mut out);
            }
        }
        Ok(out)
    }

    /// Daily biting draw at the human's current location.
    ///
    /// `foi` is the exposure of the patch the human stands in today.  Each
    /// realised bite is independently classified as coming from an
    /// infectious or a susceptible mosquito; the first may inoculate the
    /// human and the second may pick up parasites from an infected human.
    pub fn on_bite<R: RandomSource>(
        &self,
        human: &mut Human,
        foi:   ForceOfInfection,
        now:   Time,
        rng:   &mut R,
    ) -> HumanResult<Vec<Intent>> {
        let mut out = Vec::new();
        let mean = foi.expected_bites(human.bite_weight);
        let bites = match human.biting {
            BitingDistribution::Poisson => rng.poisson(mean)?,
            BitingDistribution::NegativeBinomial { size } => rng.negative_binomial(mean, size)?,
        };

        let patch = human.location;
        let mut infected_feeds = 0.0;
        for _ in 0..bites {
            let (from_infectious, from_susceptible) = match foi {
                ForceOfInfection::Reservoir { .. } => (true, false),
                ForceOfInfection::Local { infectious_fraction, susceptible_fraction, .. } => {
                    let u = rng.uniform();
                    (u < infectious_fraction, u >= infectious_fraction && u < infectious_fraction + susceptible_fraction)
                }
            };

            if from_infectious {
                self.inoculate(human, patch, now, rng, &mut out)?;
            } else if from_susceptible && human.state == PfsiState::Infected {
                let blocked = human.vaccine.transmission_blocking && rng.bernoulli(self.params.tb_block);
                if !blocked && rng.bernoulli(self.params.human_to_mosquito) {
                    infected_feeds += 1.0;
                }
            }
        }

        if infected_feeds > 0.0 {
            out.push(Intent::InfectMosquitoes { patch, feeds: infected_feeds });
        }
        if bites > 0 {
            trace!("{} at {patch}: {bites} bites, {infected_feeds} infected feeds", human.id);
        }
        Self::schedule(human, now + BITE_INTERVAL, HumanEvent::Bite, &mut out);
        Ok(out)
    }

    /// One infectious bite.  Only a susceptible human without a pending
    /// liver-stage infection can be inoculated.
    fn inoculate<R: RandomSource>(
        &self,
        human: &mut Human,
        patch: PatchId,
        now:   Time,
        rng:   &mut R,
        out:   &mut Vec<Intent>,
    ) -> HumanResult<()> {
        if human.state != PfsiState::Susceptible || human.pending_onset.is_some() {
            return Ok(());
        }
        if human.vaccine.pre_erythrocytic && rng.bernoulli(self.params.pe_block) {
            return Ok(());
        }
        if rng.bernoulli(self.params.mosquito_to_human) {
            human.pending_onset = Some(patch);
            Self::schedule(human, now + self.params.latent_period, HumanEvent::InfectionOnset, out);
        }
        Ok(())
    }

    /// Handle any non-bite human event.  `Bite` is rejected with
    /// [`HumanError::Misrouted`]; it goes through [`on_bite`](Self::on_bite).
    pub fn on_event<R: RandomSource>(
        &self,
        human:   &mut Human,
        event:   HumanEvent,
        now:     Time,
        patches: &PatchLayer,
        rng:     &mut R,
    ) -> HumanResult<Vec<Intent>> {
        let mut out = Vec::new();
        match event {
            // Bites need the patch exposure.
            HumanEvent::Bite => return Err(HumanError::Misrouted(event)),

            HumanEvent::Depart => {
                let home = human.home;
                let destination = rng.categorical(patches.movement_row(home)).map(|i| PatchId(i as u32));
                match destination {
                    Some(dest) if dest != home && human.trip_duration[dest.index()] > 0.0 => {
                        let mean = human.trip_duration[dest.index()];
                        let stay = rng.exponential(1.0 / mean)?;
                        out.push(Intent::TravelTo { destination: dest });
                        Self::schedule(human, now + stay, HumanEvent::Return, &mut out);
                    }
                    // No usable destination: stay home and try again later.
                    _ => Self::schedule_departure(human, now, rng, &mut out)?,
                }
            }

            HumanEvent::Return => {
                out.push(Intent::TravelTo { destination: human.home });
                Self::schedule_departure(human, now, rng, &mut out)?;
            }

            HumanEvent::InfectionOnset => {
                if let Some(acquired) = human.pending_onset.take() {
                    if human.state == PfsiState::Susceptible {
                        self.begin_infection(human, now, rng, &mut out)?;
                        out.push(Intent::Incidence { home: human.home, traveller: acquired != human.home });
                    }
                }
            }

            HumanEvent::Clearance => {
                if human.state == PfsiState::Infected {
                    human.state = PfsiState::Susceptible;
                    human.disarm(EventCategory::Fever);
                    human.disarm(EventCategory::Treatment);
                }
            }

            HumanEvent::Fever => {
                if human.state == PfsiState::Infected && rng.bernoulli(self.params.treatment_probability) {
                    let delay = rng.exponential(1.0 / self.params.mean_time_to_treatment)?;
                    Self::schedule(human, now + delay, HumanEvent::Treatment, &mut out);
                }
            }

            HumanEvent::Treatment => {
                if human.state == PfsiState::Infected {
                    self.treat(human, now, &mut out);
                }
            }

            HumanEvent::EndProphylaxis => {
                if human.state == PfsiState::Prophylactic {
                    human.state = PfsiState::Susceptible;
                }
            }

            HumanEvent::PeWane => human.vaccine.pre_erythrocytic = false,
            HumanEvent::TbWane => human.vaccine.transmission_blocking = false,
        }
        Ok(out)
    }

    /// Apply one vaccination.
    ///
    /// The vaccine's protection starts now and wanes after a normally
    /// distributed duration (clamped at zero).  With `treat` set an infected
    /// human moves to P, a prophylactic human has its protection renewed,
    /// and a susceptible human stays S with any latent infection cleared.
    pub fn on_vaccination<R: RandomSource>(
        &self,
        human: &mut Human,
        kind:  VaccineKind,
        treat: bool,
        now:   Time,
        rng:   &mut R,
    ) -> HumanResult<Vec<Intent>> {
        let mut out = Vec::new();
        let p = &self.params;
        let (mean, sd, wane) = match kind {
            VaccineKind::PreErythrocytic => {
                human.vaccine.pre_erythrocytic = true;
                (p.pe_mean_duration, p.pe_sd_duration, HumanEvent::PeWane)
            }
            VaccineKind::TransmissionBlocking => {
                human.vaccine.transmission_blocking = true;
                (p.tb_mean_duration, p.tb_sd_duration, HumanEvent::TbWane)
            }
        };
        let duration = rng.normal(mean, sd)?.max(0.0);
        Self::schedule(human, now + duration, wane, &mut out);

        if treat {
            match human.state {
                PfsiState::Infected | PfsiState::Prophylactic => self.treat(human, now, &mut out),
                PfsiState::Susceptible => {
                    human.disarm(EventCategory::InfectionOnset);
                    human.pending_onset = None;
                }
            }
        }
        Ok(out)
    }
}
