use pfsi_core::{CoreError, HumanId};
use thiserror::Error;

use crate::HumanEvent;

#[derive(Debug, Error)]
pub enum HumanError {
    #[error("PfSI parameter error: {0}")]
    Params(String),

    #[error("human {id}: {reason}")]
    InvalidHuman { id: HumanId, reason: String },

    #[error("unknown biting distribution selector {0} (expected 0 = Poisson, 1 = negative binomial)")]
    UnknownBitingDistribution(i64),

    #[error("unknown vaccine type {0:?} (expected \"pe\" or \"tb\")")]
    UnknownVaccine(String),

    #[error("{0} events must be handled by on_bite")]
    Misrouted(HumanEvent),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type HumanResult<T> = Result<T, HumanError>;
