//! Per-patch exposure fixed at each daily mosquito tick.

use pfsi_core::PatchId;
use pfsi_human::HumanPopulation;
use pfsi_mosquito::MosquitoPopulation;
use pfsi_patch::{ForceOfInfection, PatchLayer};

/// Human biting weight and force of infection per patch, as of the most
/// recent tick.
///
/// Every biting draw on a given day reads the same snapshot, so travel
/// during the day shifts exposure from the next tick onwards.
#[derive(Clone, Debug)]
pub struct ExposureSnapshot {
    human_weight: Vec<f64>,
    foi:          Vec<ForceOfInfection>,
}

impl ExposureSnapshot {
    /// A snapshot with no biting anywhere, used before the first tick.
    pub fn empty(n_patches: usize) -> Self {
        let none = ForceOfInfection::Local {
            bites_per_weight:     0.0,
            infectious_fraction:  0.0,
            susceptible_fraction: 0.0,
        };
        Self { human_weight: vec![0.0; n_patches], foi: vec![none; n_patches] }
    }

    /// Recompute human weights from current locations.
    pub fn refresh_weights(&mut self, humans: &HumanPopulation) {
        self.human_weight = humans.weight_by_location(self.human_weight.len());
    }

    /// Recompute every patch's force of infection from today's mosquitoes.
    pub fn refresh_foi(&mut self, patches: &PatchLayer, mosquitoes: &MosquitoPopulation) {
        for (i, foi) in self.foi.iter_mut().enumerate() {
            let patch = PatchId(i as u32);
            *foi = patches.force_of_infection(patch, mosquitoes.density(patch), self.human_weight[i]);
        }
    }

    pub fn human_weight(&self) -> &[f64] {
        &self.human_weight
    }

    #[inline]
    pub fn foi(&self, patch: PatchId) -> ForceOfInfection {
        self.foi[patch.index()]
    }
}
