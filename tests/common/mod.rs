//! Shared helpers for integration tests.

#![allow(dead_code)]

use memory_pairs::core::{CardId, NoShuffle};
use memory_pairs::session::GameSession;

/// Install a test-writer subscriber once. Honors `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Session with a known layout: pair key `k` sits at ids `2k-2` and `2k-1`.
pub fn unshuffled(pairs: u32) -> GameSession<NoShuffle> {
    init_tracing();
    GameSession::builder()
        .pairs(pairs)
        .build_with_source(NoShuffle)
        .expect("valid config")
}

/// Both card IDs carrying `pair_key` in the live deck.
pub fn pair(session: &GameSession<NoShuffle>, pair_key: u32) -> (CardId, CardId) {
    let ids = session.snapshot().ids_with_key(pair_key);
    assert_eq!(ids.len(), 2, "pair key {pair_key} should appear twice");
    (ids[0], ids[1])
}
