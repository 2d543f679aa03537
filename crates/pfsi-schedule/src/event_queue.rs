//! `EventQueue` — the single time-ordered queue of pending occurrences.
//!
//! # Ordering
//!
//! Entries pop in increasing order of:
//!
//! 1. time (`f64`, total order),
//! 2. class: the daily mosquito tick before any human event,
//! 3. `HumanId`,
//! 4. `HumanEvent` variant order,
//! 5. insertion sequence.
//!
//! The last key makes the order total, so a run is reproducible from its seed
//! no matter how the heap happens to break ties internally.
//!
//! # Cancellation
//!
//! Nothing is ever removed early.  Each human event carries the epoch its
//! category had when it was scheduled; the simulator drops popped events
//! whose epoch is no longer current.  Insert and pop are both O(log n).

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use pfsi_core::{Day, HumanId, Time};
use pfsi_human::HumanEvent;

use crate::{ScheduleError, ScheduleResult};

/// What a queue entry asks the simulator to do.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ScheduledEvent {
    /// Advance every patch's mosquitoes by one day, then log.
    MosquitoTick(Day),
    Human {
        id:    HumanId,
        event: HumanEvent,
        epoch: u32,
    },
}

impl ScheduledEvent {
    fn class(&self) -> u8 {
        match self {
            ScheduledEvent::MosquitoTick(_) => 0,
            ScheduledEvent::Human { .. } => 1,
        }
    }

    fn human_key(&self) -> (HumanId, Option<HumanEvent>) {
        match *self {
            ScheduledEvent::MosquitoTick(_) => (HumanId(0), None),
            ScheduledEvent::Human { id, event, .. } => (id, Some(event)),
        }
    }
}

#[derive(Debug)]
struct Entry {
    time:  Time,
    seq:   u64,
    event: ScheduledEvent,
}

impl Entry {
    /// Ascending order of execution.
    fn execution_order(&self, other: &Self) -> Ordering {
        self.time
            .total_cmp(&other.time)
            .then_with(|| self.event.class().cmp(&other.event.class()))
            .then_with(|| self.event.human_key().cmp(&other.event.human_key()))
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.execution_order(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Reversed so `BinaryHeap` (a max-heap) pops the earliest entry.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.execution_order(other).reverse()
    }
}

/// Min-heap of pending events.
#[derive(Default)]
pub struct EventQueue {
    heap: BinaryHeap<Entry>,
    seq:  u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `event` at `time`.  Rejects NaN, infinite, and negative times.
    pub fn push(&mut self, time: Time, event: ScheduledEvent) -> ScheduleResult<()> {
        if !time.is_valid() {
            return Err(ScheduleError::InvalidTime(time));
        }
        self.heap.push(Entry { time, seq: self.seq, event });
        self.seq += 1;
        Ok(())
    }

    /// Queue the mosquito tick for `day` at the day's start.
    pub fn push_tick(&mut self, day: Day) -> ScheduleResult<()> {
        self.push(day.start(), ScheduledEvent::MosquitoTick(day))
    }

    pub fn push_human(&mut self, time: Time, id: HumanId, event: HumanEvent, epoch: u32) -> ScheduleResult<()> {
        self.push(time, ScheduledEvent::Human { id, event, epoch })
    }

    /// Remove and return the earliest event.
    pub fn pop(&mut self) -> Option<(Time, ScheduledEvent)> {
        self.heap.pop().map(|e| (e.time, e.event))
    }

    /// Time of the earliest event, without removing it.
    pub fn peek_time(&self) -> Option<Time> {
        self.heap.peek().map(|e| e.time)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
