//! The match engine: selection, match resolution, locking, win detection.
//!
//! ## Turn flow
//!
//! ```text
//! Idle --click--> OneSelected --click (match)----> Idle | Cleared
//!                             --click (mismatch)-> Resolving --ticket--> Idle
//! ```
//!
//! Every operation returns a `Transition`. Timers are requested as effects
//! and come back as `resolve_reversal(ticket)` calls, so the whole machine is
//! testable without waiting on a clock.
//!
//! ## Example
//!
//! ```
//! use memory_pairs::core::{CardId, GameConfig, NoShuffle};
//! use memory_pairs::engine::{MatchEngine, Outcome};
//!
//! // NoShuffle keeps factory order: cards 0 and 1 share pair key 1
//! let mut engine = MatchEngine::with_source(GameConfig::new(2), NoShuffle).unwrap();
//!
//! assert_eq!(engine.select_card(CardId(0)).outcome, Outcome::Revealed);
//! assert_eq!(engine.select_card(CardId(1)).outcome, Outcome::Matched { pair_key: 1 });
//! assert_eq!(engine.moves(), 1);
//! ```

use std::num::NonZeroU32;

use tracing::{debug, info, trace};

use super::transition::{Effect, IgnoreReason, Outcome, Transition};
use crate::core::{
    CardId, ConfigError, GameConfig, GameRng, GameState, IdAllocator, Phase, RandomSource,
    ReversalTicket,
};
use crate::deck::{deal, Deck};

/// State machine for one table of pairs.
#[derive(Debug)]
pub struct MatchEngine<R: RandomSource = GameRng> {
    config: GameConfig,
    pairs: NonZeroU32,
    rng: R,
    ids: IdAllocator,
    state: GameState,
    next_serial: u64,
}

impl MatchEngine<GameRng> {
    /// Create an engine, seeding from `config.seed` or from entropy.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        debug!(seed = rng.seed(), "seeded shuffle source");
        Self::with_source(config, rng)
    }
}

impl<R: RandomSource> MatchEngine<R> {
    /// Create an engine with a custom random source and deal the first round.
    pub fn with_source(config: GameConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let pairs = NonZeroU32::new(config.pairs).ok_or(ConfigError::NoPairs)?;

        let mut ids = IdAllocator::new();
        let deck = deal(pairs, &mut ids, &mut rng);
        debug!(pairs = pairs.get(), generation = 0, "round dealt");

        Ok(Self {
            config,
            pairs,
            rng,
            ids,
            state: GameState::new(deck, 0),
            next_serial: 0,
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.state.deck
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    #[must_use]
    pub fn moves(&self) -> u32 {
        self.state.moves
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.state.generation
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.state.is_locked()
    }

    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.state.is_cleared()
    }

    // === Transitions ===

    /// Handle a click on a card.
    ///
    /// Ignored when the round is cleared, while locked, for unknown or
    /// matched cards, and for the card already selected this turn.
    pub fn select_card(&mut self, card_id: CardId) -> Transition {
        let first = match self.state.phase {
            Phase::Cleared => return ignored(card_id, IgnoreReason::Cleared),
            Phase::Resolving { .. } => return ignored(card_id, IgnoreReason::Locked),
            Phase::Idle => None,
            Phase::OneSelected(first) => Some(first),
        };

        let Some(card) = self.state.deck.get(card_id) else {
            return ignored(card_id, IgnoreReason::UnknownCard);
        };
        if card.is_matched {
            return ignored(card_id, IgnoreReason::AlreadyMatched);
        }
        if first == Some(card_id) {
            return ignored(card_id, IgnoreReason::AlreadySelected);
        }
        debug!(card = %card_id, pair_key = card.pair_key, "card selected");

        match first {
            None => {
                self.flip_up(card_id);
                self.state.phase = Phase::OneSelected(card_id);
                Transition::new(Outcome::Revealed)
            }
            Some(first) => self.complete_turn(first, card_id),
        }
    }

    /// Second click of a turn: count the move, then match or lock.
    fn complete_turn(&mut self, first: CardId, second: CardId) -> Transition {
        self.state.moves += 1;
        self.flip_up(second);

        let deck = &self.state.deck;
        let pair_key = match (deck.get(first), deck.get(second)) {
            (Some(a), Some(b)) if a.pairs_with(b) => Some(a.pair_key),
            _ => None,
        };

        match pair_key {
            Some(pair_key) => self.resolve_match(first, second, pair_key),
            None => {
                let ticket = self.issue_ticket();
                self.state.phase = Phase::Resolving {
                    first,
                    second,
                    ticket,
                };
                debug!(%first, %second, serial = ticket.serial, "mismatch, input locked");

                Transition::new(Outcome::Mismatched).with_effect(Effect::ScheduleReversal {
                    ticket,
                    delay_ms: self.config.reversal_delay_ms,
                })
            }
        }
    }

    fn resolve_match(&mut self, first: CardId, second: CardId, pair_key: u32) -> Transition {
        for id in [first, second] {
            if let Some(card) = self.state.deck.get_mut(id) {
                card.mark_matched();
            }
        }
        self.state.unmatched_pairs = self.state.unmatched_pairs.saturating_sub(1);
        debug_assert_eq!(
            self.state.unmatched_pairs == 0,
            self.state.deck.all_matched(),
            "unmatched pair counter disagrees with the deck"
        );

        if self.state.unmatched_pairs > 0 {
            self.state.phase = Phase::Idle;
            debug!(pair_key, moves = self.state.moves, "pair matched");
            return Transition::new(Outcome::Matched { pair_key });
        }

        self.state.phase = Phase::Cleared;
        info!(
            moves = self.state.moves,
            generation = self.state.generation,
            "board cleared"
        );
        Transition::new(Outcome::Cleared).with_effect(Effect::StopClock)
    }

    /// Turn a mismatched pair back face-down.
    ///
    /// Only the ticket held by the current `Resolving` phase is honored.
    /// Matched cards are left alone; the check happens now, not when the
    /// reversal was scheduled.
    pub fn resolve_reversal(&mut self, ticket: ReversalTicket) -> Transition {
        let (first, second) = match self.state.phase {
            Phase::Resolving {
                first,
                second,
                ticket: pending,
            } if pending == ticket => (first, second),
            _ => {
                trace!(?ticket, reason = ?IgnoreReason::StaleReversal, "reversal ignored");
                return Transition::ignored(IgnoreReason::StaleReversal);
            }
        };

        for id in [first, second] {
            if let Some(card) = self.state.deck.get_mut(id) {
                card.flip_down();
            }
        }
        self.state.phase = Phase::Idle;
        debug!(%first, %second, "mismatch reverted");

        Transition::new(Outcome::Reverted)
    }

    /// Deal a fresh round with the configured pair count.
    ///
    /// Cancels any pending reversal and restarts the round timer.
    pub fn reset(&mut self) -> Transition {
        let mut transition = Transition::new(Outcome::Reset);
        if let Some(ticket) = self.state.phase.pending_reversal() {
            transition = transition.with_effect(Effect::CancelReversal { ticket });
        }

        let generation = self.state.generation + 1;
        let deck = deal(self.pairs, &mut self.ids, &mut self.rng);
        self.state = GameState::new(deck, generation);
        debug!(pairs = self.pairs.get(), generation, "round dealt");

        transition.with_effect(Effect::RestartClock)
    }

    /// Change the pair count, then reset.
    pub fn reset_with_pairs(&mut self, pairs: u32) -> Result<Transition, ConfigError> {
        self.pairs = NonZeroU32::new(pairs).ok_or(ConfigError::NoPairs)?;
        self.config.pairs = pairs;
        Ok(self.reset())
    }

    // === Helpers ===

    fn flip_up(&mut self, id: CardId) {
        if let Some(card) = self.state.deck.get_mut(id) {
            card.flip_up();
        }
    }

    fn issue_ticket(&mut self) -> ReversalTicket {
        let serial = self.next_serial;
        self.next_serial += 1;
        ReversalTicket {
            generation: self.state.generation,
            serial,
        }
    }
}

fn ignored(card_id: CardId, reason: IgnoreReason) -> Transition {
    trace!(card = %card_id, ?reason, "click ignored");
    Transition::ignored(reason)
}
