//! Game state: the dealt deck plus the turn phase.
//!
//! ## Phase
//!
//! The turn is an explicit state machine:
//!
//! - `Idle`: nothing selected, input accepted
//! - `OneSelected`: one card face-up, waiting for the second
//! - `Resolving`: a mismatched pair is on display, input locked until the
//!   reversal ticket fires
//! - `Cleared`: every pair found, terminal
//!
//! `selection()` and `is_locked()` are derived from the phase rather than
//! stored alongside it, so they cannot disagree.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::entity::CardId;
use crate::deck::Deck;

/// Identifies one scheduled mismatch reversal.
///
/// `generation` ties the ticket to the deck it was issued for; `serial`
/// distinguishes reversals within a generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReversalTicket {
    pub generation: u64,
    pub serial: u64,
}

/// Turn phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Idle,
    OneSelected(CardId),
    Resolving {
        first: CardId,
        second: CardId,
        ticket: ReversalTicket,
    },
    Cleared,
}

impl Phase {
    /// Cards currently selected this turn (zero, one or two).
    #[must_use]
    pub fn selection(&self) -> SmallVec<[CardId; 2]> {
        match *self {
            Phase::Idle | Phase::Cleared => SmallVec::new(),
            Phase::OneSelected(id) => SmallVec::from_slice(&[id]),
            Phase::Resolving { first, second, .. } => SmallVec::from_slice(&[first, second]),
        }
    }

    /// Input is blocked while a mismatch is on display.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        matches!(self, Phase::Resolving { .. })
    }

    #[must_use]
    pub fn is_cleared(&self) -> bool {
        matches!(self, Phase::Cleared)
    }

    /// Ticket of the pending reversal, if any.
    #[must_use]
    pub fn pending_reversal(&self) -> Option<ReversalTicket> {
        match *self {
            Phase::Resolving { ticket, .. } => Some(ticket),
            _ => None,
        }
    }
}

/// State of one round.
///
/// Replaced wholesale on reset.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Cards in display order.
    pub deck: Deck,

    /// Turn phase.
    pub phase: Phase,

    /// Completed two-card turns.
    pub moves: u32,

    /// Pairs not yet found. Zero means cleared.
    pub unmatched_pairs: u32,

    /// Number of resets before this round.
    pub generation: u64,
}

impl GameState {
    /// Fresh state for a newly dealt deck.
    #[must_use]
    pub fn new(deck: Deck, generation: u64) -> Self {
        let unmatched_pairs = (deck.len() / 2) as u32;
        Self {
            deck,
            phase: Phase::Idle,
            moves: 0,
            unmatched_pairs,
            generation,
        }
    }

    /// Cards currently selected this turn.
    #[must_use]
    pub fn selection(&self) -> SmallVec<[CardId; 2]> {
        self.phase.selection()
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.phase.is_locked()
    }

    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.phase.is_cleared()
    }
}
