//! Simulation time model.
//!
//! # Design
//!
//! Human events happen in continuous time, so the canonical instant is
//! [`Time`], a count of simulated days stored as `f64`.  Mosquito ticks,
//! logging, and the periodic parameter tables (emergence, EIP) are indexed by
//! whole [`Day`]s.  `Day(d)` starts at `Time(d as f64)`.
//!
//! `Time` is totally ordered through [`Time::total_cmp`] so it can key the
//! event heap; NaN times are rejected where events are scheduled.

use std::cmp::Ordering;
use std::fmt;

// ── Time ──────────────────────────────────────────────────────────────────────

/// An instant in simulated days since the start of the run.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Time(pub f64);

impl Time {
    pub const ZERO: Time = Time(0.0);

    /// Total order usable as a heap key.
    #[inline]
    pub fn total_cmp(&self, other: &Time) -> Ordering {
        self.0.total_cmp(&other.0)
    }

    /// The calendar day containing this instant.
    #[inline]
    pub fn day(self) -> Day {
        Day(self.0.max(0.0).floor() as u32)
    }

    /// `true` for finite, non-negative instants.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.0.is_finite() && self.0 >= 0.0
    }
}

impl std::ops::Add<f64> for Time {
    type Output = Time;
    #[inline]
    fn add(self, rhs: f64) -> Time {
        Time(self.0 + rhs)
    }
}

impl std::ops::Sub for Time {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: Time) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{:.4}", self.0)
    }
}

// ── Day ───────────────────────────────────────────────────────────────────────

/// A whole simulated day.  Day `d` covers `[d, d + 1)`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Day(pub u32);

impl Day {
    pub const ZERO: Day = Day(0);

    /// The instant this day begins.
    #[inline]
    pub fn start(self) -> Time {
        Time(self.0 as f64)
    }

    #[inline]
    pub fn next(self) -> Day {
        Day(self.0 + 1)
    }

    /// Row of a periodic table (`lambda`, EIP) that applies on this day.
    ///
    /// # Panics
    /// Panics if `period` is zero; parameter validation rejects empty tables.
    #[inline]
    pub fn period_index(self, period: usize) -> usize {
        self.0 as usize % period
    }

    /// Whole days elapsed from `earlier` to `self` (saturating at zero).
    #[inline]
    pub fn since(self, earlier: Day) -> u32 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the instant of the event currently being processed.
#[derive(Clone, Debug)]
pub struct SimClock {
    /// Time of the most recently popped event.
    pub now: Time,
    /// Exclusive end of the run.
    pub horizon: Time,
}

impl SimClock {
    pub fn new(horizon: Time) -> Self {
        Self { now: Time::ZERO, horizon }
    }

    /// Move the clock forward to `t`.  Time never runs backwards.
    #[inline]
    pub fn advance_to(&mut self, t: Time) {
        if t > self.now {
            self.now = t;
        }
    }

    /// `true` once `t` is at or past the horizon.
    #[inline]
    pub fn is_past_horizon(&self, t: Time) -> bool {
        t >= self.horizon
    }

    #[inline]
    pub fn today(&self) -> Day {
        self.now.day()
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (day {} of {})", self.now, self.today().0, self.horizon.0)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Run-level configuration.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// the simulation builder.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Number of simulated days.  The run processes every event with
    /// `time < tmax`.
    pub tmax: u32,

    /// Master RNG seed.  The same seed always produces identical logs.
    pub seed: u64,

    /// Emit progress messages at `info` level while running.
    pub verbose: bool,

    /// Buffered log records per stream before they are written to the sink.
    pub flush_every: usize,
}

impl SimConfig {
    /// A config for `tmax` days with the given seed and default buffering.
    pub fn new(tmax: u32, seed: u64) -> Self {
        Self { tmax, seed, verbose: false, flush_every: 4_096 }
    }

    /// The instant at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn horizon(&self) -> Time {
        Time(self.tmax as f64)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.horizon())
    }
}
