//! The reference five-patch scenario, optionally overridden from JSON.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use pfsi_core::{HumanId, PatchId, RandomSource, SimRng};
use pfsi_human::{BitingDistribution, HumanParams, PfsiParams, PfsiState};
use pfsi_mosquito::{MosquitoParams, MosquitoPopulation};
use pfsi_patch::{MovementMatrix, PatchLayer, PatchParams, SparseMatrix};

/// Everything that defines a run apart from its horizon and seed.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub n_patches:           usize,
    pub residents_per_patch: u32,
    /// Initial parasite prevalence in every patch.
    pub pfpr:                f64,
    pub trip_frequency:      f64,
    pub trip_duration:       f64,
    pub bite_weight:         f64,
    /// Integer selector: 0 = Poisson, 1 = negative binomial.
    pub biting_code:         i64,
    pub biting_size:         f64,
    pub patch:               PatchParams,
    pub mosquito:            MosquitoSettings,
    pub pfsi:                PfsiParams,
}

/// Per-patch mosquito settings, identical in every patch.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MosquitoSettings {
    pub survival:     f64,
    pub feeding_rate: f64,
    pub lambda:       f64,
    pub eip:          u32,
    pub initial_m:    f64,
    pub initial_y:    f64,
    pub initial_z:    f64,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            n_patches:           5,
            residents_per_patch: 1_000,
            pfpr:                0.5,
            trip_frequency:      1.0 / 30.0,
            trip_duration:       3.0,
            bite_weight:         1.0,
            biting_code:         0,
            biting_size:         1.0,
            patch:               PatchParams::human_only(),
            mosquito: MosquitoSettings {
                survival:     0.9,
                feeding_rate: 0.3,
                lambda:       80.0,
                eip:          11,
                initial_m:    700.0,
                initial_y:    0.0,
                initial_z:    50.0,
            },
            pfsi: PfsiParams {
                mosquito_to_human:       0.55,
                human_to_mosquito:       0.15,
                latent_period:           10.0,
                mean_infection_duration: 200.0,
                fever_probability:       0.3,
                mean_time_to_fever:      1.0,
                treatment_probability:   0.5,
                mean_time_to_treatment:  2.0,
                prophylaxis_duration:    20.0,
                pe_block:                0.9,
                pe_mean_duration:        180.0,
                pe_sd_duration:          30.0,
                tb_block:                0.9,
                tb_mean_duration:        180.0,
                tb_sd_duration:          30.0,
            },
        }
    }
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
        serde_json::from_reader(file).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn human_count(&self) -> usize {
        self.n_patches * self.residents_per_patch as usize
    }

    /// Uniform travel to every other patch, no mosquito movement.
    pub fn patch_layer(&self) -> Result<PatchLayer> {
        let n = self.n_patches;
        let rows = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| match (n, i == j) {
                        (1, _) => 1.0,
                        (_, true) => 0.0,
                        _ => 1.0 / (n - 1) as f64,
                    })
                    .collect()
            })
            .collect();
        let layer = PatchLayer::new(vec![self.patch.clone(); n], MovementMatrix::new(rows)?, SparseMatrix::identity(n))?;
        Ok(layer)
    }

    pub fn mosquitoes(&self) -> Result<MosquitoPopulation> {
        let n = self.n_patches;
        let m = &self.mosquito;
        let params = MosquitoParams::constant(
            m.survival,
            m.feeding_rate,
            vec![m.lambda; n],
            m.eip,
            (vec![m.initial_m; n], vec![m.initial_y; n], vec![m.initial_z; n]),
        );
        Ok(MosquitoPopulation::new(params, n)?)
    }

    /// Residents numbered patch by patch; each starts infected with
    /// probability `pfpr`.
    pub fn humans(&self, seed: u64) -> Result<Vec<HumanParams>> {
        let biting = BitingDistribution::from_code(self.biting_code, self.biting_size)?;
        let mut rng = SimRng::new(seed);
        let mut out = Vec::with_capacity(self.human_count());
        for p in 0..self.n_patches {
            for _ in 0..self.residents_per_patch {
                let id = HumanId(out.len() as u32);
                let state = if rng.bernoulli(self.pfpr) { PfsiState::Infected } else { PfsiState::Susceptible };
                let mut h = HumanParams::stay_at_home(id, PatchId(p as u32), self.n_patches, state);
                h.trip_frequency = self.trip_frequency;
                h.trip_duration = vec![self.trip_duration; self.n_patches];
                h.trip_duration[p] = 0.0;
                h.bite_weight = self.bite_weight;
                h.biting = biting;
                out.push(h);
            }
        }
        Ok(out)
    }
}
