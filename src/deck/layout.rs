//! The dealt deck in display order.
//!
//! Cards live in an `im::Vector` so handing a copy of the board to the
//! rendering layer is O(1). An id index makes lookups O(1) as well.

use im::Vector;
use rustc_hash::FxHashMap;

use super::card::Card;
use crate::core::CardId;

/// Ordered sequence of cards.
#[derive(Clone, Debug, Default)]
pub struct Deck {
    cards: Vector<Card>,
    index: FxHashMap<CardId, usize>,
}

impl Deck {
    /// Build a deck from cards in display order.
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        let index = cards
            .iter()
            .enumerate()
            .map(|(pos, card)| (card.id, pos))
            .collect();

        Self {
            cards: cards.into_iter().collect(),
            index,
        }
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the deck is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Look up a card by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        let pos = *self.index.get(&id)?;
        self.cards.get(pos)
    }

    /// Look up a card by ID for mutation.
    pub fn get_mut(&mut self, id: CardId) -> Option<&mut Card> {
        let pos = *self.index.get(&id)?;
        self.cards.get_mut(pos)
    }

    /// Iterate cards in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Card IDs in display order.
    #[must_use]
    pub fn ids(&self) -> Vec<CardId> {
        self.cards.iter().map(|card| card.id).collect()
    }

    /// Check if every card is matched (full scan).
    #[must_use]
    pub fn all_matched(&self) -> bool {
        self.cards.iter().all(|card| card.is_matched)
    }

    /// Cheap copy of the cards for a snapshot.
    #[must_use]
    pub fn cards(&self) -> Vector<Card> {
        self.cards.clone()
    }
}
