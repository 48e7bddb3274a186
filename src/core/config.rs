//! Game configuration.
//!
//! `GameConfig` is plain data: build it in code with the `with_*` methods or
//! deserialize it. Every field has a default, so a partial document such as
//! `{"pairs": 4}` is valid.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Pair count used when none is configured.
pub const DEFAULT_PAIRS: u32 = 8;

/// How long a mismatched pair stays face-up.
pub const DEFAULT_REVERSAL_DELAY_MS: u64 = 800;

/// Round timer resolution.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of pairs in a deck (deck size is twice this).
    pub pairs: u32,

    /// Delay before a mismatched pair is turned back face-down.
    pub reversal_delay_ms: u64,

    /// Period of the round timer tick. Each tick adds one second.
    pub tick_interval_ms: u64,

    /// Shuffle seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pairs: DEFAULT_PAIRS,
            reversal_delay_ms: DEFAULT_REVERSAL_DELAY_MS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a configuration with the given pair count and default timings.
    #[must_use]
    pub fn new(pairs: u32) -> Self {
        Self {
            pairs,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_pairs(mut self, pairs: u32) -> Self {
        self.pairs = pairs;
        self
    }

    #[must_use]
    pub fn with_reversal_delay_ms(mut self, delay_ms: u64) -> Self {
        self.reversal_delay_ms = delay_ms;
        self
    }

    #[must_use]
    pub fn with_tick_interval_ms(mut self, interval_ms: u64) -> Self {
        self.tick_interval_ms = interval_ms;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the configuration before a game is built from it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pairs == 0 {
            return Err(ConfigError::NoPairs);
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }
}
