use pfsi_core::Time;
use pfsi_human::HumanError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("vaccination parse error: {0}")]
    Parse(String),

    #[error("vaccination feed not sorted: entry {index} at {time} follows {previous}")]
    Unsorted { index: usize, time: Time, previous: Time },

    #[error("cannot schedule at {0}: time must be finite and non-negative")]
    InvalidTime(Time),

    #[error(transparent)]
    Human(#[from] HumanError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
