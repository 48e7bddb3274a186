//! Randomized session tests.
//!
//! Arbitrary sequences of clicks, time steps and resets must never break
//! the card invariants:
//! - a matched card is face-up
//! - a matched card stays matched until the deck is replaced
//! - at most two unmatched cards are face-up, and only during a turn
//! - moves never decrease within a round

use proptest::prelude::*;

use memory_pairs::core::{CardId, GameConfig, GameRng};
use memory_pairs::engine::Outcome;
use memory_pairs::session::{GameSession, Snapshot};

#[derive(Clone, Debug)]
enum Step {
    /// Click the card at this display position (modulo deck size).
    Click(usize),
    /// Click an ID that was never dealt.
    ClickUnknown,
    Advance(u64),
    Reset,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        8 => (0usize..64).prop_map(Step::Click),
        1 => Just(Step::ClickUnknown),
        3 => (0u64..2_000).prop_map(Step::Advance),
        1 => Just(Step::Reset),
    ]
}

fn check_card_invariants(snap: &Snapshot) -> Result<(), TestCaseError> {
    for card in &snap.deck {
        prop_assert!(!card.is_matched || card.is_flipped, "matched card face-down: {card:?}");
    }

    let open = snap.deck.iter().filter(|c| c.is_flipped && !c.is_matched).count();
    prop_assert!(open <= 2, "{open} unmatched cards face-up");
    if snap.locked {
        prop_assert_eq!(open, 2);
    }
    if snap.cleared {
        prop_assert!(snap.deck.iter().all(|c| c.is_matched));
        prop_assert!(!snap.locked);
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_invariants_hold(
        pairs in 1u32..6,
        seed in any::<u64>(),
        steps in prop::collection::vec(step(), 1..120),
    ) {
        let config = GameConfig::new(pairs).with_reversal_delay_ms(300);
        let mut session = GameSession::with_source(config, GameRng::new(seed)).unwrap();
        let mut prev = session.snapshot();

        for step in steps {
            let outcome = match step {
                Step::Click(pos) => {
                    let id = prev.deck[pos % prev.deck.len()].id;
                    Some(session.on_card_click(id))
                }
                Step::ClickUnknown => Some(session.on_card_click(CardId(u32::MAX))),
                Step::Advance(ms) => {
                    session.advance(ms);
                    None
                }
                Step::Reset => Some(session.on_reset_requested()),
            };

            let snap = session.snapshot();
            check_card_invariants(&snap)?;

            if snap.generation == prev.generation {
                prop_assert!(snap.moves >= prev.moves);
                prop_assert!(snap.moves <= prev.moves + 1);
                prop_assert!(snap.elapsed_seconds >= prev.elapsed_seconds);
                for card in prev.deck.iter().filter(|c| c.is_matched) {
                    prop_assert!(snap.card(card.id).is_some_and(|c| c.is_matched));
                }
                if prev.cleared {
                    prop_assert_eq!(snap.elapsed_seconds, prev.elapsed_seconds);
                }
            } else {
                prop_assert_eq!(outcome, Some(Outcome::Reset));
                prop_assert_eq!(snap.moves, 0);
                prop_assert!(!snap.locked);
            }

            if outcome.is_some_and(|o| !o.is_accepted()) {
                prop_assert_eq!(&snap.deck, &prev.deck);
                prop_assert_eq!(snap.moves, prev.moves);
            }

            prev = snap;
        }
    }

    /// Finding pairs in any order takes exactly one move per pair.
    #[test]
    fn prop_perfect_play_clears(pairs in 1u32..10, seed in any::<u64>()) {
        let mut session = GameSession::with_source(GameConfig::new(pairs), GameRng::new(seed)).unwrap();

        for key in 1..=pairs {
            let ids = session.snapshot().ids_with_key(key);
            prop_assert_eq!(session.on_card_click(ids[0]), Outcome::Revealed);
            let last = session.on_card_click(ids[1]);
            if key == pairs {
                prop_assert_eq!(last, Outcome::Cleared);
            } else {
                prop_assert_eq!(last, Outcome::Matched { pair_key: key });
            }
        }

        let snap = session.snapshot();
        prop_assert!(snap.cleared);
        prop_assert_eq!(snap.moves, pairs);
    }
}
