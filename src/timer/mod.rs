//! Timers: the virtual clock and the round timer.
//!
//! Both scheduled callbacks in a game (the one-second tick and the mismatch
//! reversal) are owned `TimerHandle`s on a `VirtualClock`.

pub mod clock;
pub mod round;

pub use clock::{TimerHandle, TimerId, VirtualClock};
pub use round::RoundTimer;
