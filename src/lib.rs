//! # memory-pairs
//!
//! A memory-matching ("pairs") card game engine.
//!
//! A deck of paired cards is shuffled and dealt face-down. Each turn the
//! player reveals two cards: a match stays face-up for good, a mismatch is
//! shown briefly and turned back. The round is cleared when every pair is
//! found.
//!
//! ## Design Principles
//!
//! 1. **Explicit State Machine**: The turn phase is a tagged enum
//!    (`Idle`, `OneSelected`, `Resolving`, `Cleared`), not a set of flags.
//!
//! 2. **Effects, Not Timers**: Engine operations return a `Transition`
//!    listing the timers to schedule or cancel. The engine itself never
//!    waits, so every rule is testable without a wall clock.
//!
//! 3. **Owned Timers**: Every scheduled callback is a `TimerHandle` with a
//!    single owner. Reversal tickets carry the deck generation, so a
//!    reversal can never touch a deck dealt after it was scheduled.
//!
//! 4. **Injectable Randomness**: Shuffling draws through `RandomSource`.
//!    `GameRng` is seedable; `NoShuffle` keeps a known layout for fixtures.
//!
//! ## Modules
//!
//! - `core`: Card IDs, configuration, errors, RNG, game state
//! - `deck`: Cards, the dealt deck, deck factory and shuffle
//! - `engine`: The match engine and its transitions
//! - `timer`: Virtual clock and round timer
//! - `session`: Event surface for a renderer

pub mod core;
pub mod deck;
pub mod engine;
pub mod timer;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    CardId, IdAllocator,
    GameConfig, ConfigError,
    GameRng, NoShuffle, RandomSource,
    GameState, Phase, ReversalTicket,
};

pub use crate::deck::{Card, CardFace, Deck, PairKey, create_deck, new_game_deck, shuffle};

pub use crate::engine::{Effect, IgnoreReason, MatchEngine, Outcome, Transition};

pub use crate::timer::{RoundTimer, TimerHandle, TimerId, VirtualClock};

pub use crate::session::{GameSession, GameSessionBuilder, RoundSummary, Snapshot};
