//! `MosquitoPopulation` — per-patch compartments and the daily tick.

use std::collections::VecDeque;
use std::fmt;

use log::trace;

use pfsi_core::{Day, PatchId};
use pfsi_patch::{MosquitoDensity, PatchLayer};

use crate::{MosquitoError, MosquitoParams, MosquitoResult};

// ── Compartment ───────────────────────────────────────────────────────────────

/// Adult mosquito compartments, in log order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Compartment {
    /// Susceptible.
    M,
    /// Exposed, incubating.
    Y,
    /// Infectious.
    Z,
}

impl Compartment {
    pub const ALL: [Compartment; 3] = [Compartment::M, Compartment::Y, Compartment::Z];

    pub fn label(self) -> &'static str {
        match self {
            Compartment::M => "M",
            Compartment::Y => "Y",
            Compartment::Z => "Z",
        }
    }
}

impl fmt::Display for Compartment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Cohort ────────────────────────────────────────────────────────────────────

/// Mosquitoes that became infected on the same day.
#[derive(Clone, Debug, PartialEq)]
pub struct Cohort {
    pub entered: Day,
    /// Count per patch.
    pub counts:  Vec<f64>,
}

impl Cohort {
    fn total(&self) -> f64 {
        self.counts.iter().sum()
    }
}

// ── MosquitoPopulation ────────────────────────────────────────────────────────

/// Mosquito state for every patch.
#[derive(Debug)]
pub struct MosquitoPopulation {
    params:  MosquitoParams,
    m:       Vec<f64>,
    /// Exposed cohorts, oldest first.
    cohorts: VecDeque<Cohort>,
    z:       Vec<f64>,
    /// Infected blood meals on humans since the last tick, per patch.
    infected_feeds: Vec<f64>,
    last_tick: Option<Day>,
}

impl MosquitoPopulation {
    /// Validate `params` against `n` patches and set the initial state.
    pub fn new(params: MosquitoParams, n: usize) -> MosquitoResult<Self> {
        params.validate(n)?;

        let mut cohorts = VecDeque::with_capacity(params.max_eip() as usize + 1);
        if params.initial_y.iter().any(|&y| y > 0.0) {
            cohorts.push_back(Cohort { entered: Day::ZERO, counts: params.initial_y.clone() });
        }

        Ok(Self {
            m: params.initial_m.clone(),
            z: params.initial_z.clone(),
            cohorts,
            infected_feeds: vec![0.0; n],
            last_tick: None,
            params,
        })
    }

    pub fn params(&self) -> &MosquitoParams {
        &self.params
    }

    pub fn patch_count(&self) -> usize {
        self.m.len()
    }

    pub fn susceptible(&self) -> &[f64] {
        &self.m
    }

    pub fn infectious(&self) -> &[f64] {
        &self.z
    }

    /// Total exposed per patch, summed over cohorts.
    pub fn exposed(&self) -> Vec<f64> {
        let mut y = vec![0.0; self.m.len()];
        for cohort in &self.cohorts {
            for (acc, c) in y.iter_mut().zip(&cohort.counts) {
                *acc += c;
            }
        }
        y
    }

    pub fn cohorts(&self) -> impl Iterator<Item = &Cohort> {
        self.cohorts.iter()
    }

    /// Per-patch values of one compartment, in patch order.
    pub fn compartment(&self, c: Compartment) -> Vec<f64> {
        match c {
            Compartment::M => self.m.clone(),
            Compartment::Y => self.exposed(),
            Compartment::Z => self.z.clone(),
        }
    }

    /// Adults of every compartment in every patch.
    pub fn total(&self) -> f64 {
        self.m.iter().sum::<f64>()
            + self.cohorts.iter().map(Cohort::total).sum::<f64>()
            + self.z.iter().sum::<f64>()
    }

    /// What humans in `patch` are exposed to right now.
    pub fn density(&self, patch: PatchId) -> MosquitoDensity {
        let i = patch.index();
        let exposed: f64 = self.cohorts.iter().map(|c| c.counts[i]).sum();
        let total = self.m[i] + exposed + self.z[i];
        MosquitoDensity {
            feeds_per_day: self.params.feeding_rate * total,
            susceptible:   self.m[i],
            exposed,
            infectious:    self.z[i],
        }
    }

    /// Record `count` blood meals in `patch` that infected the mosquito.
    /// Applied at the next tick.
    pub fn record_infected_feeds(&mut self, patch: PatchId, count: f64) {
        self.infected_feeds[patch.index()] += count;
    }

    /// Infected feeds waiting for the next tick.
    pub fn pending_infected_feeds(&self) -> &[f64] {
        &self.infected_feeds
    }

    /// Advance every patch by one day.
    ///
    /// `human_weight[i]` is the summed biting weight of humans in patch `i`,
    /// used to split blood meals between humans and toxic animal hosts.
    pub fn tick(
        &mut self,
        day:          Day,
        patches:      &PatchLayer,
        human_weight: &[f64],
    ) -> MosquitoResult<()> {
        let n = self.m.len();
        if human_weight.len() != n {
            return Err(MosquitoError::Dimension { what: "human weight", expected: n, got: human_weight.len() });
        }
        if let Some(last) = self.last_tick {
            if day <= last {
                return Err(MosquitoError::OutOfOrderTick { day, last });
            }
        }

        // ① Aging: the oldest cohorts are the first to finish incubating.
        let eip = self.params.eip[day.period_index(self.params.eip_period())];
        while self.cohorts.front().is_some_and(|c| day.since(c.entered) >= eip) {
            if let Some(done) = self.cohorts.pop_front() {
                for (z, y) in self.z.iter_mut().zip(done.counts) {
                    *z += y;
                }
            }
        }

        // ② Survival and emergence.
        let p = self.params.survival;
        let f = self.params.feeding_rate;
        let survival: Vec<f64> = (0..n)
            .map(|i| {
                let toxic = patches.toxic_feed_fraction(PatchId(i as u32), human_weight[i]);
                (p * (1.0 - (f * toxic).min(1.0))).max(0.0)
            })
            .collect();
        let lambda = &self.params.lambda[day.period_index(self.params.lambda_period())];
        for i in 0..n {
            self.m[i] = self.m[i] * survival[i] + lambda[i];
            self.z[i] *= survival[i];
        }
        for cohort in self.cohorts.iter_mut() {
            for (y, s) in cohort.counts.iter_mut().zip(&survival) {
                *y *= s;
            }
        }

        // ③ Seeding from infected feeds.
        let mut newly_exposed = vec![0.0; n];
        for i in 0..n {
            let infected = self.infected_feeds[i].min(self.m[i]);
            self.m[i] -= infected;
            newly_exposed[i] = infected;
        }
        self.infected_feeds.iter_mut().for_each(|x| *x = 0.0);
        if newly_exposed.iter().any(|&y| y > 0.0) {
            self.cohorts.push_back(Cohort { entered: day, counts: newly_exposed });
        }

        // ④ Diffusion.
        let held = patches.reservoir_mask();
        let psi = patches.diffusion();
        self.m = psi.mul_vec_holding(&self.m, &held);
        self.z = psi.mul_vec_holding(&self.z, &held);
        for cohort in self.cohorts.iter_mut() {
            cohort.counts = psi.mul_vec_holding(&cohort.counts, &held);
        }

        self.check(day)?;
        self.last_tick = Some(day);
        trace!(
            "mosquito tick {day}: M={:.2} Y={:.2} Z={:.2}",
            self.m.iter().sum::<f64>(),
            self.exposed().iter().sum::<f64>(),
            self.z.iter().sum::<f64>(),
        );
        Ok(())
    }

    fn check(&self, day: Day) -> MosquitoResult<()> {
        let bad = |compartment: &'static str, values: &[f64]| {
            values
                .iter()
                .position(|v| !v.is_finite() || *v < 0.0)
                .map(|i| MosquitoError::InvalidPopulation {
                    day,
                    patch: PatchId(i as u32),
                    compartment,
                    value: values[i],
                })
        };
        if let Some(e) = bad("M", &self.m) {
            return Err(e);
        }
        if let Some(e) = bad("Z", &self.z) {
            return Err(e);
        }
        for cohort in &self.cohorts {
            if let Some(e) = bad("Y", &cohort.counts) {
                return Err(e);
            }
        }
        Ok(())
    }
}
