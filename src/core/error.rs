//! Configuration errors.
//!
//! Player input never fails: stale or invalid clicks come back as
//! `Outcome::Ignored`. The only loud failures are configuration bugs.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A deck needs at least one pair.
    #[error("pair count must be at least 1")]
    NoPairs,

    /// The round timer would never advance.
    #[error("tick interval must be at least 1ms")]
    ZeroTickInterval,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(ConfigError::NoPairs.to_string(), "pair count must be at least 1");
        assert_eq!(
            ConfigError::ZeroTickInterval.to_string(),
            "tick interval must be at least 1ms"
        );
    }
}
