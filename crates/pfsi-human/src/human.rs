//! The per-human record stored in the population arena.

use std::fmt;

use pfsi_core::{HumanId, PatchId};

use crate::{BitingDistribution, EventCategory, HumanEvent, HumanParams};

// ── PfsiState ─────────────────────────────────────────────────────────────────

/// Course-of-infection state.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PfsiState {
    Susceptible,
    Infected,
    /// Drug-protected after treatment.
    Prophylactic,
}

impl PfsiState {
    pub const ALL: [PfsiState; 3] = [PfsiState::Susceptible, PfsiState::Infected, PfsiState::Prophylactic];

    /// Position in `ALL`; used as a column offset by the log aggregator.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            PfsiState::Susceptible => 0,
            PfsiState::Infected => 1,
            PfsiState::Prophylactic => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PfsiState::Susceptible => "S",
            PfsiState::Infected => "I",
            PfsiState::Prophylactic => "P",
        }
    }
}

impl fmt::Display for PfsiState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── VaccineEffects ────────────────────────────────────────────────────────────

/// Vaccine protection currently in force.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct VaccineEffects {
    pub pre_erythrocytic:      bool,
    pub transmission_blocking: bool,
}

// ── Human ─────────────────────────────────────────────────────────────────────

/// One person.
///
/// Patches are referenced by id only.  `epochs` holds one counter per
/// [`EventCategory`]; a queued event is live only while the epoch it was
/// stamped with still matches.
#[derive(Clone, Debug)]
pub struct Human {
    pub id:             HumanId,
    pub home:           PatchId,
    pub location:       PatchId,
    pub state:          PfsiState,
    pub age:            f64,
    pub bite_weight:    f64,
    pub trip_duration:  Vec<f64>,
    pub trip_frequency: f64,
    pub biting:         BitingDistribution,
    pub vaccine:        VaccineEffects,
    /// Patch where the pending (latent) infection was acquired.
    pub pending_onset:  Option<PatchId>,
    epochs:             [u32; EventCategory::COUNT],
}

impl Human {
    pub fn from_params(p: HumanParams) -> Self {
        Self {
            id:             p.id,
            home:           p.home,
            location:       p.home,
            state:          p.state,
            age:            p.age,
            bite_weight:    p.bite_weight,
            trip_duration:  p.trip_duration,
            trip_frequency: p.trip_frequency,
            biting:         p.biting,
            vaccine:        VaccineEffects::default(),
            pending_onset:  None,
            epochs:         [0; EventCategory::COUNT],
        }
    }

    #[inline]
    pub fn is_home(&self) -> bool {
        self.location == self.home
    }

    /// Claim the slot for `category`, invalidating anything pending there.
    /// Returns the epoch to stamp on the new event.
    pub fn arm(&mut self, category: EventCategory) -> u32 {
        let e = &mut self.epochs[category.index()];
        *e = e.wrapping_add(1);
        *e
    }

    /// Invalidate anything pending in `category` without scheduling.
    pub fn disarm(&mut self, category: EventCategory) {
        self.arm(category);
    }

    /// `true` if an event stamped with `epoch` is still the live one.
    #[inline]
    pub fn is_live(&self, event: HumanEvent, epoch: u32) -> bool {
        self.epochs[event.category().index()] == epoch
    }
}
