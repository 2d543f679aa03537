//! Per-patch attributes and the force-of-infection query.

use pfsi_core::PatchId;

use crate::{MovementMatrix, PatchError, PatchResult, SparseMatrix};

// ── PatchParams ───────────────────────────────────────────────────────────────

/// Static attributes of one patch.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatchParams {
    /// Reservoir patches impose `reservoir_eir` on everyone present and
    /// ignore their own mosquitoes.
    pub reservoir: bool,

    /// Infectious bites per unit biting weight per day.  Only read when
    /// `reservoir` is set.
    pub reservoir_eir: f64,

    /// Biting weight of non-human hosts.  Bites on them are lost to humans.
    pub zoo_weight: f64,

    /// Biting weight of toxic non-human hosts.  Bites on them are lost to
    /// humans and kill the mosquito.
    pub zootox_weight: f64,
}

impl PatchParams {
    /// An ordinary patch with no animal hosts.
    pub fn human_only() -> Self {
        Self { reservoir: false, reservoir_eir: 0.0, zoo_weight: 0.0, zootox_weight: 0.0 }
    }

    /// A reservoir patch with a fixed EIR.
    pub fn reservoir(eir: f64) -> Self {
        Self { reservoir: true, reservoir_eir: eir, ..Self::human_only() }
    }

    fn validate(&self, patch: PatchId) -> PatchResult<()> {
        let checks = [
            ("reservoir_eir", self.reservoir_eir),
            ("zoo_weight", self.zoo_weight),
            ("zootox_weight", self.zootox_weight),
        ];
        for (name, v) in checks {
            if !v.is_finite() || v < 0.0 {
                return Err(PatchError::InvalidPatch {
                    patch,
                    reason: format!("{name} = {v} must be finite and non-negative"),
                });
            }
        }
        Ok(())
    }
}

// ── Biting pressure ───────────────────────────────────────────────────────────

/// Local mosquito numbers as seen by the human interface on a given day.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MosquitoDensity {
    /// Blood meals taken per day by all adults in the patch (`f × N`).
    pub feeds_per_day: f64,
    pub susceptible:   f64,
    pub exposed:       f64,
    pub infectious:    f64,
}

impl MosquitoDensity {
    pub fn total(&self) -> f64 {
        self.susceptible + self.exposed + self.infectious
    }
}

/// What a human standing in a patch is exposed to.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ForceOfInfection {
    /// Externally fixed EIR per unit biting weight; every bite is infectious
    /// and no parasites flow back to mosquitoes.
    Reservoir { eir: f64 },

    /// Exposure derived from the patch's own mosquitoes.
    Local {
        /// Expected bites per day per unit of human biting weight.
        bites_per_weight:     f64,
        /// Probability a bite comes from an infectious mosquito.
        infectious_fraction:  f64,
        /// Probability a bite comes from a susceptible mosquito.
        susceptible_fraction: f64,
    },
}

impl ForceOfInfection {
    /// Expected bites per day on a human with biting weight `weight`.
    #[inline]
    pub fn expected_bites(&self, weight: f64) -> f64 {
        match *self {
            ForceOfInfection::Reservoir { eir } => eir * weight,
            ForceOfInfection::Local { bites_per_weight, .. } => bites_per_weight * weight,
        }
    }

    /// Expected infectious bites per day (the individual EIR).
    #[inline]
    pub fn infectious_bites(&self, weight: f64) -> f64 {
        match *self {
            ForceOfInfection::Reservoir { eir } => eir * weight,
            ForceOfInfection::Local { bites_per_weight, infectious_fraction, .. } => {
                bites_per_weight * infectious_fraction * weight
            }
        }
    }
}

// ── PatchLayer ────────────────────────────────────────────────────────────────

/// All patch-level static data for one run.
#[derive(Clone, Debug)]
pub struct PatchLayer {
    patches:   Vec<PatchParams>,
    movement:  MovementMatrix,
    diffusion: SparseMatrix,
}

impl PatchLayer {
    /// Validate dimensions and per-patch values.
    pub fn new(
        patches:   Vec<PatchParams>,
        movement:  MovementMatrix,
        diffusion: SparseMatrix,
    ) -> PatchResult<Self> {
        let n = patches.len();
        if movement.dim() != n {
            return Err(PatchError::Dimension { what: "movement matrix", expected: n, got: movement.dim() });
        }
        if diffusion.dim() != n {
            return Err(PatchError::Dimension { what: "diffusion operator", expected: n, got: diffusion.dim() });
        }
        for (i, p) in patches.iter().enumerate() {
            p.validate(PatchId(i as u32))?;
        }
        Ok(Self { patches, movement, diffusion })
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    pub fn params(&self, patch: PatchId) -> &PatchParams {
        &self.patches[patch.index()]
    }

    #[inline]
    pub fn is_reservoir(&self, patch: PatchId) -> bool {
        self.patches[patch.index()].reservoir
    }

    /// Per-patch reservoir flags, in patch order.
    pub fn reservoir_mask(&self) -> Vec<bool> {
        self.patches.iter().map(|p| p.reservoir).collect()
    }

    pub fn diffusion(&self) -> &SparseMatrix {
        &self.diffusion
    }

    /// Destination distribution for trips leaving `patch`.
    #[inline]
    pub fn movement_row(&self, patch: PatchId) -> &[f64] {
        self.movement.row(patch)
    }

    /// Total biting weight of every host in `patch`.
    #[inline]
    pub fn host_weight(&self, patch: PatchId, human_weight: f64) -> f64 {
        let p = &self.patches[patch.index()];
        human_weight + p.zoo_weight + p.zootox_weight
    }

    /// Fraction of blood meals in `patch` taken on toxic hosts.
    pub fn toxic_feed_fraction(&self, patch: PatchId, human_weight: f64) -> f64 {
        let total = self.host_weight(patch, human_weight);
        if total <= 0.0 {
            return 0.0;
        }
        self.patches[patch.index()].zootox_weight / total
    }

    /// Exposure of a human standing in `patch`.
    ///
    /// `human_weight` is the summed biting weight of the humans currently in
    /// the patch.  A reservoir patch short-circuits to its fixed EIR and
    /// never looks at `density`.
    pub fn force_of_infection(
        &self,
        patch:        PatchId,
        density:      MosquitoDensity,
        human_weight: f64,
    ) -> ForceOfInfection {
        let p = &self.patches[patch.index()];
        if p.reservoir {
            return ForceOfInfection::Reservoir { eir: p.reservoir_eir };
        }

        let hosts = self.host_weight(patch, human_weight);
        let total = density.total();
        if hosts <= 0.0 || total <= 0.0 {
            return ForceOfInfection::Local {
                bites_per_weight:     0.0,
                infectious_fraction:  0.0,
                susceptible_fraction: 0.0,
            };
        }
        ForceOfInfection::Local {
            bites_per_weight:     density.feeds_per_day / hosts,
            infectious_fraction:  density.infectious / total,
            susceptible_fraction: density.susceptible / total,
        }
    }
}
