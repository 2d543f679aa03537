//! Flat arena of humans plus the parallel per-human RNG streams.
//!
//! Humans reference patches (and each other) only by id.  `HumanId(i)` is
//! always the record at index `i`; the population is closed, so indices
//! never shift during a run.

use pfsi_core::{HumanId, HumanRng};

use crate::{Human, PfsiState};

// ── HumanRngs ─────────────────────────────────────────────────────────────────

/// One deterministic RNG per human, stored apart from the records so a
/// handler can hold `&mut Human` and `&mut HumanRng` at once.
pub struct HumanRngs {
    inner: Vec<HumanRng>,
}

impl HumanRngs {
    pub fn new(count: usize, seed: u64) -> Self {
        Self {
            inner: (0..count).map(|i| HumanRng::new(seed, HumanId(i as u32))).collect(),
        }
    }

    #[inline]
    pub fn get_mut(&mut self, human: HumanId) -> &mut HumanRng {
        &mut self.inner[human.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── HumanPopulation ───────────────────────────────────────────────────────────

pub struct HumanPopulation {
    humans: Vec<Human>,
}

impl HumanPopulation {
    pub(crate) fn new(humans: Vec<Human>) -> Self {
        Self { humans }
    }

    pub fn len(&self) -> usize {
        self.humans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.humans.is_empty()
    }

    #[inline]
    pub fn get(&self, id: HumanId) -> Option<&Human> {
        self.humans.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: HumanId) -> Option<&mut Human> {
        self.humans.get_mut(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Human> + '_ {
        self.humans.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = HumanId> + '_ {
        (0..self.humans.len() as u32).map(HumanId)
    }

    /// Summed biting weight of the humans currently in each patch.
    pub fn weight_by_location(&self, n_patches: usize) -> Vec<f64> {
        let mut w = vec![0.0; n_patches];
        for h in &self.humans {
            w[h.location.index()] += h.bite_weight;
        }
        w
    }

    /// Humans in `state` anywhere.
    pub fn count_state(&self, state: PfsiState) -> usize {
        self.humans.iter().filter(|h| h.state == state).count()
    }
}
