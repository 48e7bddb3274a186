//! Game sessions: engine, round timer and clock wired together.
//!
//! This is the surface a renderer uses:
//! - `on_card_click(id)` and `on_reset_requested()` for input
//! - `advance(ms)` to let time pass
//! - `snapshot()` or a listener for the board state

pub mod game;
pub mod snapshot;

pub use game::{GameSession, GameSessionBuilder, Listener, TimerEvent};
pub use snapshot::{RoundSummary, Snapshot};
