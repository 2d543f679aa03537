//! Model-wide PfSI parameters and per-human parameters.

use pfsi_core::{HumanId, PatchId};

use crate::{HumanError, HumanResult, PfsiState};

// ── PfsiParams ────────────────────────────────────────────────────────────────

/// Natural history, treatment seeking, and vaccine parameters shared by every
/// human.  All durations are in days.
///
/// There is no `Default`: every rate, including background treatment
/// seeking, must be stated by the caller.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PfsiParams {
    /// Probability an infectious bite infects a susceptible human (`b`).
    pub mosquito_to_human: f64,
    /// Probability a bite on an infected human infects the mosquito (`c`).
    pub human_to_mosquito: f64,

    /// Liver-stage delay between inoculation and blood-stage infection.
    pub latent_period: f64,
    /// Mean of the exponential untreated infection duration.
    pub mean_infection_duration: f64,

    /// Probability a new infection produces a fever.
    pub fever_probability: f64,
    /// Mean exponential delay from infection onset to fever.
    pub mean_time_to_fever: f64,
    /// Probability a fever leads to treatment.
    pub treatment_probability: f64,
    /// Mean exponential delay from fever to treatment.
    pub mean_time_to_treatment: f64,
    /// Fixed protection after treatment.
    pub prophylaxis_duration: f64,

    /// Probability an active pre-erythrocytic vaccine blocks an inoculation.
    pub pe_block: f64,
    pub pe_mean_duration: f64,
    pub pe_sd_duration: f64,

    /// Probability an active transmission-blocking vaccine blocks
    /// human-to-mosquito infection.
    pub tb_block: f64,
    pub tb_mean_duration: f64,
    pub tb_sd_duration: f64,
}

impl PfsiParams {
    pub fn validate(&self) -> HumanResult<()> {
        let probabilities = [
            ("mosquito_to_human", self.mosquito_to_human),
            ("human_to_mosquito", self.human_to_mosquito),
            ("fever_probability", self.fever_probability),
            ("treatment_probability", self.treatment_probability),
            ("pe_block", self.pe_block),
            ("tb_block", self.tb_block),
        ];
        for (name, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return Err(HumanError::Params(format!("{name} = {p} outside [0, 1]")));
            }
        }

        let means = [
            ("mean_infection_duration", self.mean_infection_duration),
            ("mean_time_to_fever", self.mean_time_to_fever),
            ("mean_time_to_treatment", self.mean_time_to_treatment),
        ];
        for (name, m) in means {
            if !(m.is_finite() && m > 0.0) {
                return Err(HumanError::Params(format!("{name} = {m} must be positive")));
            }
        }

        let non_negative = [
            ("latent_period", self.latent_period),
            ("prophylaxis_duration", self.prophylaxis_duration),
            ("pe_mean_duration", self.pe_mean_duration),
            ("pe_sd_duration", self.pe_sd_duration),
            ("tb_mean_duration", self.tb_mean_duration),
            ("tb_sd_duration", self.tb_sd_duration),
        ];
        for (name, v) in non_negative {
            if !(v.is_finite() && v >= 0.0) {
                return Err(HumanError::Params(format!("{name} = {v} must be non-negative")));
            }
        }
        Ok(())
    }
}

// ── BitingDistribution ────────────────────────────────────────────────────────

/// Family of the daily bite-count distribution.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BitingDistribution {
    Poisson,
    /// Overdispersed bites; variance `mean + mean² / size`.
    NegativeBinomial { size: f64 },
}

impl BitingDistribution {
    /// Decode the integer selector used by parameter tables:
    /// `0` = Poisson, `1` = negative binomial with dispersion `size`.
    pub fn from_code(code: i64, size: f64) -> HumanResult<Self> {
        match code {
            0 => Ok(BitingDistribution::Poisson),
            1 => Ok(BitingDistribution::NegativeBinomial { size }),
            other => Err(HumanError::UnknownBitingDistribution(other)),
        }
    }
}

// ── HumanParams ───────────────────────────────────────────────────────────────

/// Everything needed to create one human at the start of a run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HumanParams {
    pub id:             HumanId,
    pub home:           PatchId,
    /// Mean trip length to each destination patch, indexed by `PatchId`.
    pub trip_duration:  Vec<f64>,
    /// Trips started per day while at home.
    pub trip_frequency: f64,
    /// Relative attractiveness to mosquitoes.
    pub bite_weight:    f64,
    pub age:            f64,
    pub state:          PfsiState,
    pub biting:         BitingDistribution,
}

impl HumanParams {
    /// A resident of `home` who never travels.
    pub fn stay_at_home(id: HumanId, home: PatchId, n_patches: usize, state: PfsiState) -> Self {
        Self {
            id,
            home,
            trip_duration: vec![0.0; n_patches],
            trip_frequency: 0.0,
            bite_weight: 1.0,
            age: 20.0,
            state,
            biting: BitingDistribution::Poisson,
        }
    }

    pub(crate) fn validate(&self, n_patches: usize) -> HumanResult<()> {
        let invalid = |reason: String| HumanError::InvalidHuman { id: self.id, reason };

        if self.home.index() >= n_patches {
            return Err(invalid(format!("home {} outside {n_patches} patches", self.home)));
        }
        if self.trip_duration.len() != n_patches {
            return Err(invalid(format!(
                "trip_duration has {} entries, expected {n_patches}",
                self.trip_duration.len()
            )));
        }
        if let Some(d) = self.trip_duration.iter().find(|d| !d.is_finite() || **d < 0.0) {
            return Err(invalid(format!("trip duration {d} must be finite and non-negative")));
        }
        let scalars = [
            ("trip_frequency", self.trip_frequency),
            ("bite_weight", self.bite_weight),
            ("age", self.age),
        ];
        for (name, v) in scalars {
            if !v.is_finite() || v < 0.0 {
                return Err(invalid(format!("{name} = {v} must be finite and non-negative")));
            }
        }
        if let BitingDistribution::NegativeBinomial { size } = self.biting {
            if !(size.is_finite() && size > 0.0) {
                return Err(invalid(format!("negative binomial size {size} must be positive")));
            }
        }
        Ok(())
    }
}
