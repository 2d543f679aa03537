use pfsi_core::{Day, PatchId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MosquitoError {
    #[error("mosquito configuration error: {0}")]
    Config(String),

    #[error("{what} has {got} entries, expected {expected}")]
    Dimension {
        what:     &'static str,
        expected: usize,
        got:      usize,
    },

    #[error("{compartment} in {patch} became {value} on {day}")]
    InvalidPopulation {
        day:         Day,
        patch:       PatchId,
        compartment: &'static str,
        value:       f64,
    },

    #[error("tick for {day} after {last}: days must advance one at a time")]
    OutOfOrderTick { day: Day, last: Day },
}

pub type MosquitoResult<T> = Result<T, MosquitoError>;
