//! Read-only view of a session for the rendering layer.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::CardId;
use crate::deck::{Card, CardFace};

/// Board state after a transition.
///
/// Cheap to produce: the deck is a persistent vector shared with the engine
/// until the engine next writes to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Cards in display order.
    pub deck: Vector<Card>,

    /// Completed two-card turns.
    pub moves: u32,

    /// Seconds on the round timer.
    pub elapsed_seconds: u64,

    /// Every pair found.
    pub cleared: bool,

    /// A mismatch is on display and clicks are ignored.
    pub locked: bool,

    /// Number of resets so far.
    pub generation: u64,
}

/// Final score of a cleared round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub moves: u32,
    pub elapsed_seconds: u64,
}

impl Snapshot {
    /// Score to show once the round is cleared.
    #[must_use]
    pub fn summary(&self) -> Option<RoundSummary> {
        self.cleared.then_some(RoundSummary {
            moves: self.moves,
            elapsed_seconds: self.elapsed_seconds,
        })
    }

    /// Faces in display order.
    #[must_use]
    pub fn faces(&self) -> Vec<CardFace> {
        self.deck.iter().map(Card::face).collect()
    }

    /// Look up a card by ID.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.deck.iter().find(|card| card.id == id)
    }

    /// IDs of the cards carrying `pair_key`, in display order.
    #[must_use]
    pub fn ids_with_key(&self, pair_key: u32) -> Vec<CardId> {
        self.deck
            .iter()
            .filter(|card| card.pair_key == pair_key)
            .map(|card| card.id)
            .collect()
    }
}
