//! One-shot vaccination events and the sorted feed that releases them.

use std::collections::VecDeque;

use pfsi_core::{HumanId, Time};
use pfsi_human::VaccineKind;

use crate::{ScheduleError, ScheduleResult};

/// A vaccination of one human at a fixed time.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VaccinationEvent {
    pub id:    HumanId,
    pub time:  Time,
    /// Also give clinical treatment.
    pub treat: bool,
    pub kind:  VaccineKind,
}

/// Vaccinations in ascending time order, each consumed exactly once.
#[derive(Debug, Default)]
pub struct VaccinationFeed {
    pending: VecDeque<VaccinationEvent>,
}

impl VaccinationFeed {
    /// Accepts events already sorted by time (ties keep their given order).
    /// Unsorted input is a configuration error.
    pub fn new(events: Vec<VaccinationEvent>) -> ScheduleResult<Self> {
        for (i, ev) in events.iter().enumerate() {
            if !ev.time.is_valid() {
                return Err(ScheduleError::InvalidTime(ev.time));
            }
            if i > 0 && ev.time < events[i - 1].time {
                return Err(ScheduleError::Unsorted { index: i, time: ev.time, previous: events[i - 1].time });
            }
        }
        Ok(Self { pending: events.into() })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Time of the next unconsumed vaccination.
    pub fn peek_time(&self) -> Option<Time> {
        self.pending.front().map(|v| v.time)
    }

    /// Remove every vaccination due at or before `now`, in feed order.
    pub fn pop_due(&mut self, now: Time) -> Vec<VaccinationEvent> {
        let mut due = Vec::new();
        while self.pending.front().is_some_and(|v| v.time <= now) {
            if let Some(v) = self.pending.pop_front() {
                due.push(v);
            }
        }
        due
    }

    pub fn iter(&self) -> impl Iterator<Item = &VaccinationEvent> + '_ {
        self.pending.iter()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
