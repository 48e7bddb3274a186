//! Card instances: runtime state of one card on the board.
//!
//! A card only moves forward: face-down, face-up, matched. The one backward
//! step is a mismatched card turning face-down again, and `flip_down`
//! refuses to do that to a matched card.

use serde::{Deserialize, Serialize};

use crate::core::CardId;

/// Pair key shared by exactly two cards in a deck.
pub type PairKey = u32;

/// A card on the board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Unique ID for this instance.
    pub id: CardId,

    /// Match criterion. Two cards match when their keys are equal.
    pub pair_key: PairKey,

    /// Is the face showing?
    pub is_flipped: bool,

    /// Resolved as part of a found pair. Never reverts.
    pub is_matched: bool,
}

/// What a renderer shows for a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFace {
    /// Back side.
    Hidden,
    /// Front side, showing the pair key.
    Revealed(PairKey),
}

impl std::fmt::Display for CardFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardFace::Hidden => f.write_str("?"),
            CardFace::Revealed(key) => write!(f, "{key}"),
        }
    }
}

impl Card {
    /// Create a face-down, unmatched card.
    #[must_use]
    pub fn new(id: CardId, pair_key: PairKey) -> Self {
        Self {
            id,
            pair_key,
            is_flipped: false,
            is_matched: false,
        }
    }

    /// Turn the card face-up.
    pub fn flip_up(&mut self) {
        self.is_flipped = true;
    }

    /// Turn the card face-down unless it is matched.
    ///
    /// Returns true if the card was turned.
    pub fn flip_down(&mut self) -> bool {
        if self.is_matched {
            return false;
        }
        self.is_flipped = false;
        true
    }

    /// Resolve the card as part of a found pair.
    pub fn mark_matched(&mut self) {
        self.is_flipped = true;
        self.is_matched = true;
    }

    /// Check if this card matches another by pair key.
    #[must_use]
    pub fn pairs_with(&self, other: &Card) -> bool {
        self.pair_key == other.pair_key
    }

    /// Which side of the card is showing.
    #[must_use]
    pub fn face(&self) -> CardFace {
        if self.is_flipped || self.is_matched {
            CardFace::Revealed(self.pair_key)
        } else {
            CardFace::Hidden
        }
    }
}
