//! Core types: card IDs, configuration, errors, randomness, game state.
//!
//! Everything the deck factory and the match engine share lives here.

pub mod entity;
pub mod config;
pub mod error;
pub mod rng;
pub mod state;

pub use entity::{CardId, IdAllocator};
pub use config::{GameConfig, DEFAULT_PAIRS, DEFAULT_REVERSAL_DELAY_MS, DEFAULT_TICK_INTERVAL_MS};
pub use error::ConfigError;
pub use rng::{GameRng, NoShuffle, RandomSource};
pub use state::{GameState, Phase, ReversalTicket};
