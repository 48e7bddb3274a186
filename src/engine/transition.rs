//! Transition results: what happened, and what the host must do about it.
//!
//! The engine never touches a clock. When a transition needs a timer
//! started, stopped or cancelled it says so with an `Effect`, and whoever
//! drives the engine applies it.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::ReversalTicket;
use crate::deck::PairKey;

/// Side effect requested by a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Deliver `ticket` back to `resolve_reversal` after `delay_ms`.
    ScheduleReversal { ticket: ReversalTicket, delay_ms: u64 },
    /// Drop the pending reversal for `ticket` without firing it.
    CancelReversal { ticket: ReversalTicket },
    /// Halt the round timer. Sent once, when the board is cleared.
    StopClock,
    /// Stop, zero and restart the round timer.
    RestartClock,
}

/// Why an input was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// The round is over.
    Cleared,
    /// A mismatch is on display.
    Locked,
    /// No card with that ID in the live deck.
    UnknownCard,
    /// The card is already part of a found pair.
    AlreadyMatched,
    /// The card is already the one selected this turn.
    AlreadySelected,
    /// The reversal was cancelled or belongs to a replaced deck.
    StaleReversal,
}

/// What a transition did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Input was ignored; state is unchanged.
    Ignored(IgnoreReason),
    /// First card of a turn turned face-up.
    Revealed,
    /// Second card completed a pair.
    Matched { pair_key: PairKey },
    /// Second card completed the last pair.
    Cleared,
    /// Second card did not match; both stay up until the reversal fires.
    Mismatched,
    /// A mismatched pair turned back face-down.
    Reverted,
    /// A new round was dealt.
    Reset,
}

impl Outcome {
    /// Did the transition change state?
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Outcome::Ignored(_))
    }
}

/// Result of one engine operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub outcome: Outcome,

    /// Effects to apply, in order.
    pub effects: SmallVec<[Effect; 2]>,
}

impl Transition {
    /// Transition with no effects.
    #[must_use]
    pub fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            effects: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn ignored(reason: IgnoreReason) -> Self {
        Self::new(Outcome::Ignored(reason))
    }

    /// Append an effect.
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.outcome.is_accepted()
    }
}
