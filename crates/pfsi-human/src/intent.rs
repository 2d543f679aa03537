//! Intents: what a handled human event asks the simulator to do.

use pfsi_core::{PatchId, Time};

use crate::HumanEvent;

/// An effect the simulator must apply after a human handler returns.
///
/// Handlers return these in the order they should be applied.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Queue `event` at `at`, stamped with `epoch` from [`Human::arm`].
    ///
    /// [`Human::arm`]: crate::Human::arm
    Schedule {
        at:    Time,
        event: HumanEvent,
        epoch: u32,
    },

    /// Move the human to `destination`.  The simulator updates patch
    /// occupancy and `Human::location`.
    TravelTo { destination: PatchId },

    /// Blood meals in `patch` that infected the feeding mosquito.
    InfectMosquitoes { patch: PatchId, feeds: f64 },

    /// A new blood-stage infection began.  `traveller` is set when it was
    /// acquired away from `home`.
    Incidence { home: PatchId, traveller: bool },

    /// Clinical treatment was given.
    Treated,
}
