//! Match engine: the state machine behind a round of pairs.
//!
//! The engine owns the deck and the turn phase. It decides what a click
//! means and asks for timers through `Effect`s; it never waits on anything.

pub mod transition;
pub mod match_engine;

pub use transition::{Effect, IgnoreReason, Outcome, Transition};
pub use match_engine::MatchEngine;
