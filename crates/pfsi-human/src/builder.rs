//! Validated construction of [`HumanPopulation`] + [`HumanRngs`].
//!
//! # Usage
//!
//! ```rust
//! use pfsi_core::{HumanId, PatchId};
//! use pfsi_human::{HumanParams, PfsiState, PopulationBuilder};
//!
//! let params = (0..4)
//!     .map(|i| HumanParams::stay_at_home(HumanId(i), PatchId(i % 2), 2, PfsiState::Susceptible))
//!     .collect();
//!
//! let (humans, rngs) = PopulationBuilder::new(params, /*n_patches=*/ 2, /*seed=*/ 42)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(humans.len(), 4);
//! assert_eq!(rngs.len(), 4);
//! ```

use pfsi_core::HumanId;

use crate::{Human, HumanError, HumanParams, HumanPopulation, HumanResult, HumanRngs};

pub struct PopulationBuilder {
    params:    Vec<HumanParams>,
    n_patches: usize,
    seed:      u64,
}

impl PopulationBuilder {
    /// `params` must list humans with ids `0..len` in order.
    pub fn new(params: Vec<HumanParams>, n_patches: usize, seed: u64) -> Self {
        Self { params, n_patches, seed }
    }

    /// Validate every record, then build the arena and its RNG streams.
    /// Nothing is constructed if any record is rejected.
    pub fn build(self) -> HumanResult<(HumanPopulation, HumanRngs)> {
        for (i, p) in self.params.iter().enumerate() {
            let expected = HumanId(i as u32);
            if p.id != expected {
                return Err(HumanError::InvalidHuman {
                    id:     p.id,
                    reason: format!("ids must be sequential from 0; expected {expected} at position {i}"),
                });
            }
            p.validate(self.n_patches)?;
        }

        let count = self.params.len();
        let humans = self.params.into_iter().map(Human::from_params).collect();
        Ok((HumanPopulation::new(humans), HumanRngs::new(count, self.seed)))
    }
}
