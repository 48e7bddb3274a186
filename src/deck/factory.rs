//! Deck construction and shuffling.
//!
//! `new_game_deck` is the entry point for starting or resetting a round:
//! build the pairs in factory order, then shuffle a copy. `deal` is the same
//! thing for callers that already hold a validated pair count.

use std::num::NonZeroU32;

use super::card::Card;
use super::layout::Deck;
use crate::core::{ConfigError, IdAllocator, RandomSource};

/// Build `2 * pairs` face-down cards in factory order.
///
/// Pair keys run from 1 to `pairs`; both copies of a key are adjacent.
pub fn create_deck(pairs: u32, ids: &mut IdAllocator) -> Result<Vec<Card>, ConfigError> {
    let pairs = NonZeroU32::new(pairs).ok_or(ConfigError::NoPairs)?;
    Ok(build_pairs(pairs, ids))
}

fn build_pairs(pairs: NonZeroU32, ids: &mut IdAllocator) -> Vec<Card> {
    let mut cards = Vec::with_capacity(pairs.get() as usize * 2);
    for pair_key in 1..=pairs.get() {
        for _ in 0..2 {
            cards.push(Card::new(ids.alloc(), pair_key));
        }
    }
    cards
}

/// Fisher-Yates shuffle in place.
///
/// Walks from the last index down to 1, swapping each slot with a partner
/// drawn uniformly from `[0, i]`.
pub fn shuffle_in_place<T, R: RandomSource + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.index_inclusive(i);
        items.swap(i, j);
    }
}

/// Shuffled copy of `items`. The input is left untouched.
#[must_use]
pub fn shuffle<T: Clone, R: RandomSource + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    shuffle_in_place(&mut shuffled, rng);
    shuffled
}

/// Build and shuffle a deck for a new round.
pub fn new_game_deck<R: RandomSource + ?Sized>(
    pairs: u32,
    ids: &mut IdAllocator,
    rng: &mut R,
) -> Result<Deck, ConfigError> {
    let pairs = NonZeroU32::new(pairs).ok_or(ConfigError::NoPairs)?;
    Ok(deal(pairs, ids, rng))
}

/// Build and shuffle a deck for an already validated pair count.
pub fn deal<R: RandomSource + ?Sized>(
    pairs: NonZeroU32,
    ids: &mut IdAllocator,
    rng: &mut R,
) -> Deck {
    let base = build_pairs(pairs, ids);
    Deck::from_cards(shuffle(&base, rng))
}
