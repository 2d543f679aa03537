use pfsi_core::{CoreError, Day};
use pfsi_human::HumanError;
use pfsi_mosquito::MosquitoError;
use pfsi_patch::PatchError;
use pfsi_schedule::ScheduleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} has {got} entries, expected {expected}")]
    Dimension {
        what:     &'static str,
        expected: usize,
        got:      usize,
    },

    #[error("observer reported a failure; run aborted at {day}")]
    ObserverFailed { day: Day },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("patch error: {0}")]
    Patch(#[from] PatchError),

    #[error("mosquito error: {0}")]
    Mosquito(#[from] MosquitoError),

    #[error("human error: {0}")]
    Human(#[from] HumanError),

    #[error("schedule error: {0}")]
    Schedule(#[from] ScheduleError),
}

pub type SimResult<T> = Result<T, SimError>;
