//! Round timer: elapsed seconds since the round started.
//!
//! The timer owns its repeating tick. `start` acquires it, `stop` cancels
//! and releases it, so calling either twice is harmless.

use tracing::debug;

use super::clock::{TimerHandle, VirtualClock};

/// Elapsed-time counter driven by a repeating clock tick.
#[derive(Debug)]
pub struct RoundTimer {
    elapsed_seconds: u64,
    interval_ms: u64,
    tick: Option<TimerHandle>,
}

impl RoundTimer {
    /// Create a stopped timer that ticks every `interval_ms` once started.
    #[must_use]
    pub fn new(interval_ms: u64) -> Self {
        Self {
            elapsed_seconds: 0,
            interval_ms,
            tick: None,
        }
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.tick.is_some()
    }

    /// Start ticking. No effect if already running.
    pub fn start<E: Clone>(&mut self, clock: &mut VirtualClock<E>, payload: E) {
        if self.tick.is_some() {
            return;
        }
        self.tick = Some(clock.schedule_repeating(self.interval_ms, payload));
        debug!(elapsed = self.elapsed_seconds, "round timer started");
    }

    /// Stop ticking. No effect if already stopped.
    pub fn stop<E: Clone>(&mut self, clock: &mut VirtualClock<E>) {
        if let Some(handle) = self.tick.take() {
            clock.cancel(handle);
            debug!(elapsed = self.elapsed_seconds, "round timer stopped");
        }
    }

    /// Stop, zero, and start again.
    pub fn reset<E: Clone>(&mut self, clock: &mut VirtualClock<E>, payload: E) {
        self.stop(clock);
        self.elapsed_seconds = 0;
        self.start(clock, payload);
    }

    /// Count one second. Ignored while stopped.
    pub fn tick(&mut self) {
        if self.is_running() {
            self.elapsed_seconds += 1;
        }
    }
}
