//! Game session: the event surface the rendering layer talks to.
//!
//! A session owns one `MatchEngine`, one `RoundTimer` and the
//! `VirtualClock` both timers live on. Clicks and resets go in, the
//! engine's effects are applied to the clock, and `advance` moves time
//! forward, firing due timers one at a time.
//!
//! ## Timer ownership
//!
//! - The one-second tick belongs to the `RoundTimer`.
//! - The mismatch reversal belongs to the session. Scheduling a new one
//!   cancels the old one first, so at most one is ever outstanding.
//!
//! ## Example
//!
//! ```
//! use memory_pairs::core::NoShuffle;
//! use memory_pairs::session::GameSession;
//!
//! let mut session = GameSession::builder().pairs(2).build_with_source(NoShuffle).unwrap();
//! let snap = session.snapshot();
//! let pair = snap.ids_with_key(1);
//!
//! session.on_card_click(pair[0]);
//! session.on_card_click(pair[1]);
//! session.advance(2_000);
//!
//! let snap = session.snapshot();
//! assert_eq!(snap.moves, 1);
//! assert_eq!(snap.elapsed_seconds, 2);
//! ```

use tracing::debug;

use super::snapshot::Snapshot;
use crate::core::{CardId, ConfigError, GameConfig, GameRng, RandomSource, ReversalTicket};
use crate::engine::{Effect, MatchEngine, Outcome, Transition};
use crate::timer::{RoundTimer, TimerHandle, TimerId, VirtualClock};

/// Payload of a timer on the session clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerEvent {
    /// Round timer tick.
    Tick,
    /// Mismatch reversal for a ticket.
    Reversal(ReversalTicket),
}

/// Callback invoked with a fresh snapshot after every state change.
pub type Listener = Box<dyn FnMut(&Snapshot)>;

/// One table of pairs with its timers.
pub struct GameSession<R: RandomSource = GameRng> {
    engine: MatchEngine<R>,
    round: RoundTimer,
    clock: VirtualClock<TimerEvent>,
    reversal: Option<TimerHandle>,
    listener: Option<Listener>,
}

impl GameSession<GameRng> {
    /// Create a session, seeding from `config.seed` or from entropy.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_engine(MatchEngine::new(config)?))
    }

    #[must_use]
    pub fn builder() -> GameSessionBuilder {
        GameSessionBuilder::new()
    }
}

impl<R: RandomSource> GameSession<R> {
    /// Create a session with a custom random source.
    pub fn with_source(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        Ok(Self::from_engine(MatchEngine::with_source(config, rng)?))
    }

    /// Wrap an engine, arming the timers its current phase needs.
    ///
    /// The round timer starts unless the round is already cleared. An engine
    /// caught mid-mismatch gets a fresh reversal a full delay from now.
    #[must_use]
    pub fn from_engine(engine: MatchEngine<R>) -> Self {
        let mut clock = VirtualClock::new();
        let mut round = RoundTimer::new(engine.config().tick_interval_ms);
        if !engine.is_cleared() {
            round.start(&mut clock, TimerEvent::Tick);
        }

        let reversal = engine.phase().pending_reversal().map(|ticket| {
            clock.schedule_once(
                engine.config().reversal_delay_ms,
                TimerEvent::Reversal(ticket),
            )
        });

        Self {
            engine,
            round,
            clock,
            reversal,
            listener: None,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn engine(&self) -> &MatchEngine<R> {
        &self.engine
    }

    #[must_use]
    pub fn round_timer(&self) -> &RoundTimer {
        &self.round
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Number of timers currently scheduled.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.clock.pending()
    }

    /// ID of the outstanding reversal timer, if any.
    #[must_use]
    pub fn pending_reversal(&self) -> Option<TimerId> {
        self.reversal.as_ref().map(TimerHandle::id)
    }

    /// Current board state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let state = self.engine.state();
        Snapshot {
            deck: state.deck.cards(),
            moves: state.moves,
            elapsed_seconds: self.round.elapsed_seconds(),
            cleared: state.is_cleared(),
            locked: state.is_locked(),
            generation: state.generation,
        }
    }

    /// Register the callback that receives snapshots. Replaces any previous one.
    pub fn set_listener(&mut self, listener: impl FnMut(&Snapshot) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    // === Events ===

    /// A card was clicked.
    pub fn on_card_click(&mut self, card_id: CardId) -> Outcome {
        let transition = self.engine.select_card(card_id);
        self.apply(transition)
    }

    /// The player asked for a new round.
    pub fn on_reset_requested(&mut self) -> Outcome {
        let transition = self.engine.reset();
        self.apply(transition)
    }

    /// Start a new round with a different pair count.
    pub fn reset_with_pairs(&mut self, pairs: u32) -> Result<Outcome, ConfigError> {
        let transition = self.engine.reset_with_pairs(pairs)?;
        Ok(self.apply(transition))
    }

    /// Move virtual time forward by `ms`, firing every timer that comes due.
    ///
    /// Virtual time saturates at `u64::MAX`.
    ///
    /// Timers fire in due order and each one is handled to completion before
    /// the next is looked up, so a reset inside the window cancels timers
    /// that would otherwise have fired later in it.
    pub fn advance(&mut self, ms: u64) {
        let until_ms = self.clock.now_ms().saturating_add(ms);
        while let Some((id, event)) = self.clock.pop_due(until_ms) {
            self.dispatch(id, event);
        }
        self.clock.settle(until_ms);
    }

    fn dispatch(&mut self, id: TimerId, event: TimerEvent) {
        match event {
            TimerEvent::Tick => {
                self.round.tick();
                self.notify();
            }
            TimerEvent::Reversal(ticket) => {
                // One-shot timers are gone once fired; release the handle
                if self.pending_reversal() == Some(id) {
                    self.reversal = None;
                }
                let transition = self.engine.resolve_reversal(ticket);
                self.apply(transition);
            }
        }
    }

    fn apply(&mut self, transition: Transition) -> Outcome {
        for effect in &transition.effects {
            match *effect {
                Effect::ScheduleReversal { ticket, delay_ms } => {
                    self.cancel_reversal();
                    let handle = self
                        .clock
                        .schedule_once(delay_ms, TimerEvent::Reversal(ticket));
                    debug!(timer = handle.id().raw(), delay_ms, "reversal scheduled");
                    self.reversal = Some(handle);
                }
                Effect::CancelReversal { .. } => self.cancel_reversal(),
                Effect::StopClock => self.round.stop(&mut self.clock),
                Effect::RestartClock => self.round.reset(&mut self.clock, TimerEvent::Tick),
            }
        }

        if transition.is_accepted() {
            self.notify();
        }
        transition.outcome
    }

    fn cancel_reversal(&mut self) {
        if let Some(handle) = self.reversal.take() {
            let id = handle.id().raw();
            if self.clock.cancel(handle) {
                debug!(timer = id, "reversal cancelled");
            }
        }
    }

    fn notify(&mut self) {
        if self.listener.is_none() {
            return;
        }
        let snapshot = self.snapshot();
        if let Some(listener) = self.listener.as_mut() {
            listener(&snapshot);
        }
    }
}

/// Builder for creating a `GameSession`.
#[derive(Clone, Debug, Default)]
pub struct GameSessionBuilder {
    config: GameConfig,
}

impl GameSessionBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    #[must_use]
    pub fn from_config(config: GameConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn pairs(mut self, pairs: u32) -> Self {
        self.config.pairs = pairs;
        self
    }

    #[must_use]
    pub fn reversal_delay_ms(mut self, delay_ms: u64) -> Self {
        self.config.reversal_delay_ms = delay_ms;
        self
    }

    #[must_use]
    pub fn tick_interval_ms(mut self, interval_ms: u64) -> Self {
        self.config.tick_interval_ms = interval_ms;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Build with the seeded (or entropy-seeded) `GameRng`.
    pub fn build(self) -> Result<GameSession, ConfigError> {
        GameSession::new(self.config)
    }

    /// Build with a custom random source. `seed` is ignored.
    pub fn build_with_source<R: RandomSource>(self, rng: R) -> Result<GameSession<R>, ConfigError> {
        GameSession::with_source(self.config, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NoShuffle;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn session() -> GameSession<NoShuffle> {
        GameSession::builder().pairs(2).build_with_source(NoShuffle).unwrap()
    }

    #[test]
    fn test_new_session_starts_timer() {
        let session = session();

        assert!(session.round_timer().is_running());
        assert_eq!(session.pending_timers(), 1);
        assert_eq!(session.pending_reversal(), None);
        assert_eq!(session.now_ms(), 0);
    }

    #[test]
    fn test_builder_rejects_bad_config() {
        assert!(matches!(
            GameSession::builder().pairs(0).build(),
            Err(ConfigError::NoPairs)
        ));
        assert!(matches!(
            GameSession::builder().tick_interval_ms(0).build_with_source(NoShuffle),
            Err(ConfigError::ZeroTickInterval)
        ));
    }

    #[test]
    fn test_builder_from_config() {
        let config = GameConfig::new(3).with_reversal_delay_ms(100);
        let session = GameSessionBuilder::from_config(config.clone())
            .build_with_source(NoShuffle)
            .unwrap();

        assert_eq!(session.engine().config(), &config);
        assert_eq!(session.snapshot().deck.len(), 6);
    }

    #[test]
    fn test_mismatch_schedules_one_reversal() {
        let mut session = session();
        session.on_card_click(CardId(0));
        session.on_card_click(CardId(2));

        assert!(session.pending_reversal().is_some());
        assert_eq!(session.pending_timers(), 2);

        session.advance(800);

        assert_eq!(session.pending_reversal(), None);
        assert_eq!(session.pending_timers(), 1);
        assert!(!session.snapshot().locked);
    }

    #[test]
    fn test_reset_cancels_reversal_timer() {
        let mut session = session();
        session.on_card_click(CardId(0));
        session.on_card_click(CardId(2));

        session.on_reset_requested();

        assert_eq!(session.pending_reversal(), None);
        assert_eq!(session.pending_timers(), 1);
    }

    #[test]
    fn test_listener_sees_accepted_transitions_and_ticks() {
        let mut session = session();
        let seen: Rc<RefCell<Vec<Snapshot>>> = Rc::default();
        let sink = Rc::clone(&seen);
        session.set_listener(move |snap| sink.borrow_mut().push(snap.clone()));

        session.on_card_click(CardId(0));
        session.on_card_click(CardId(0)); // ignored
        session.on_card_click(CardId(1));
        session.advance(1_000);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].moves, 0);
        assert_eq!(seen[1].moves, 1);
        assert_eq!(seen[2].elapsed_seconds, 1);
    }

    #[test]
    fn test_clear_listener() {
        let mut session = session();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        session.set_listener(move |_| *sink.borrow_mut() += 1);

        session.on_card_click(CardId(0));
        session.clear_listener();
        session.on_card_click(CardId(1));

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_from_engine_rearms_pending_reversal() {
        let mut engine = MatchEngine::with_source(GameConfig::new(2), NoShuffle).unwrap();
        engine.select_card(CardId(0));
        engine.select_card(CardId(2));

        let mut session = GameSession::from_engine(engine);

        assert!(session.pending_reversal().is_some());
        assert_eq!(session.pending_timers(), 2);

        session.advance(800);

        let snap = session.snapshot();
        assert!(!snap.locked);
        assert!(snap.deck.iter().all(|c| !c.is_flipped));
        assert_eq!(session.pending_reversal(), None);
    }

    #[test]
    fn test_from_cleared_engine_leaves_timer_stopped() {
        let mut engine = MatchEngine::with_source(GameConfig::new(2), NoShuffle).unwrap();
        for id in 0..4 {
            engine.select_card(CardId(id));
        }
        assert!(engine.is_cleared());

        let mut session = GameSession::from_engine(engine);
        session.advance(5_000);

        assert!(!session.round_timer().is_running());
        assert_eq!(session.pending_timers(), 0);
        assert_eq!(session.snapshot().elapsed_seconds, 0);
    }

    #[test]
    fn test_new_reversal_replaces_outstanding_one() {
        let mut session = session();
        let ticket = |serial| ReversalTicket { generation: 0, serial };
        let transition = Transition::new(Outcome::Mismatched)
            .with_effect(Effect::ScheduleReversal { ticket: ticket(0), delay_ms: 800 })
            .with_effect(Effect::ScheduleReversal { ticket: ticket(1), delay_ms: 800 });

        session.apply(transition);

        assert_eq!(session.pending_timers(), 2);
        assert!(session.pending_reversal().is_some());
    }

    #[test]
    fn test_huge_reversal_delay_does_not_overflow() {
        let mut session = GameSession::builder()
            .pairs(2)
            .reversal_delay_ms(u64::MAX)
            .build_with_source(NoShuffle)
            .unwrap();
        session.advance(1);
        session.on_card_click(CardId(0));
        session.on_card_click(CardId(2));

        session.advance(5_000);

        assert!(session.snapshot().locked);
        assert!(session.pending_reversal().is_some());
        assert_eq!(session.snapshot().elapsed_seconds, 5);
    }

    #[test]
    fn test_advance_saturates_at_end_of_time() {
        let mut session = GameSession::builder()
            .pairs(1)
            .build_with_source(NoShuffle)
            .unwrap();
        session.on_card_click(CardId(0));
        session.on_card_click(CardId(1));
        session.advance(10);

        session.advance(u64::MAX);
        session.advance(u64::MAX);

        assert_eq!(session.now_ms(), u64::MAX);
        assert!(session.snapshot().cleared);
    }

    #[test]
    fn test_reset_with_pairs() {
        let mut session = session();

        assert_eq!(session.reset_with_pairs(0), Err(ConfigError::NoPairs));
        assert_eq!(session.reset_with_pairs(4), Ok(Outcome::Reset));
        assert_eq!(session.snapshot().deck.len(), 8);
        assert_eq!(session.snapshot().generation, 1);
    }
}
