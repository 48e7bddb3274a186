//! Deterministic virtual clock.
//!
//! Stands in for the host's `setTimeout`/`setInterval`. Time only moves when
//! the driver asks it to, and due timers are handed out one at a time so the
//! driver can run each callback to completion before looking at the next.
//!
//! ## Ownership
//!
//! Scheduling returns a `TimerHandle`. Handles are not `Clone`, and
//! cancelling consumes one, so every timer has exactly one owner and is
//! either cancelled or fired, never both.
//!
//! ```
//! use memory_pairs::timer::VirtualClock;
//!
//! let mut clock = VirtualClock::new();
//! let _tick = clock.schedule_repeating(1000, "tick");
//! let flip = clock.schedule_once(800, "flip");
//!
//! assert!(clock.cancel(flip));
//!
//! let fired = clock.pop_due(1000).map(|(_, payload)| payload);
//! assert_eq!(fired, Some("tick"));
//! assert_eq!(clock.now_ms(), 1000);
//! ```

use rustc_hash::FxHashMap;
use tracing::trace;

/// Identifier of a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Owning handle to a scheduled timer.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping a handle leaves the timer running with no way to cancel it"]
pub struct TimerHandle(TimerId);

impl TimerHandle {
    #[must_use]
    pub fn id(&self) -> TimerId {
        self.0
    }
}

#[derive(Debug)]
struct Entry<E> {
    due_ms: u64,
    period_ms: Option<u64>,
    payload: E,
}

/// Single-threaded timer queue over virtual milliseconds.
#[derive(Debug)]
pub struct VirtualClock<E> {
    now_ms: u64,
    next_id: u64,
    entries: FxHashMap<TimerId, Entry<E>>,
}

impl<E> Default for VirtualClock<E> {
    fn default() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            entries: FxHashMap::default(),
        }
    }
}

impl<E: Clone> VirtualClock<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of live timers.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Fire `payload` once, `delay_ms` from now. Due times saturate at `u64::MAX`.
    pub fn schedule_once(&mut self, delay_ms: u64, payload: E) -> TimerHandle {
        self.insert(delay_ms, None, payload)
    }

    /// Fire `payload` every `period_ms`, starting one period from now.
    ///
    /// A zero period is treated as 1ms.
    pub fn schedule_repeating(&mut self, period_ms: u64, payload: E) -> TimerHandle {
        let period_ms = period_ms.max(1);
        self.insert(period_ms, Some(period_ms), payload)
    }

    fn insert(&mut self, delay_ms: u64, period_ms: Option<u64>, payload: E) -> TimerHandle {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.insert(
            id,
            Entry {
                due_ms: self.now_ms.saturating_add(delay_ms),
                period_ms,
                payload,
            },
        );
        TimerHandle(id)
    }

    /// Cancel a timer. Returns false if it had already fired.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.entries.remove(&handle.0).is_some()
    }

    /// Pop the earliest timer due at or before `until_ms`.
    ///
    /// Time advances to the timer's due time. Ties go to the timer scheduled
    /// first. One-shot timers are removed; repeating timers are rearmed one
    /// period later.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(TimerId, E)> {
        let (&id, entry) = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.due_ms <= until_ms)
            .min_by_key(|(id, entry)| (entry.due_ms, **id))?;

        let (due_ms, period_ms) = (entry.due_ms, entry.period_ms);
        self.now_ms = self.now_ms.max(due_ms);
        trace!(timer = id.0, due_ms, "timer fired");

        let payload = match period_ms {
            Some(period_ms) => match due_ms.checked_add(period_ms) {
                Some(next_ms) => {
                    let entry = self.entries.get_mut(&id)?;
                    entry.due_ms = next_ms;
                    entry.payload.clone()
                }
                // Next firing is past the end of time
                None => self.entries.remove(&id)?.payload,
            },
            None => self.entries.remove(&id)?.payload,
        };
        Some((id, payload))
    }

    /// Move time forward to `until_ms` without firing anything.
    ///
    /// Call after draining `pop_due(until_ms)`.
    pub fn settle(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}
