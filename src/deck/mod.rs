//! Cards, the dealt deck, and the deck factory.
//!
//! A deck for `pairs` pairs always holds `2 * pairs` cards with every pair
//! key in `[1, pairs]` exactly twice. Order is display order only.

pub mod card;
pub mod layout;
pub mod factory;

pub use card::{Card, CardFace, PairKey};
pub use layout::Deck;
pub use factory::{create_deck, deal, new_game_deck, shuffle, shuffle_in_place};
