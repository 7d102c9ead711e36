//! Batch admission limits.
//!
//! The on-chain registry rejects batches above a gas-bounded size. The same
//! ceiling is enforced here so an oversized batch fails before any tree is
//! built or signed. Override via environment variable or explicit
//! construction.

use thiserror::Error;

/// Default entry ceiling per batch.
pub const DEFAULT_MAX_BATCH_ENTRIES: usize = 1000;

/// Environment variable overriding [`DEFAULT_MAX_BATCH_ENTRIES`].
pub const MAX_BATCH_ENTRIES_ENV: &str = "FRAUDREG_MAX_BATCH_ENTRIES";

/// Admission limits applied by `StandardMerkleTree::build`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchLimits {
    /// Maximum number of entries accepted in one batch.
    pub max_entries: usize,
}

impl BatchLimits {
    /// Limits with an explicit entry ceiling. Zero is rejected.
    pub fn new(max_entries: usize) -> Result<Self, ConfigError> {
        if max_entries == 0 {
            return Err(ConfigError::ZeroMaxEntries);
        }
        Ok(Self { max_entries })
    }

    /// Load limits from the environment.
    ///
    /// Variables:
    /// - `FRAUDREG_MAX_BATCH_ENTRIES` (default: 1000, must be > 0)
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(MAX_BATCH_ENTRIES_ENV) {
            Ok(raw) => Self::parse_max_entries(&raw),
            Err(_) => Ok(Self::default()),
        }
    }

    fn parse_max_entries(raw: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            var: MAX_BATCH_ENTRIES_ENV,
            value: raw.to_string(),
        };
        let max_entries: usize = raw.trim().parse().map_err(|_| invalid())?;
        Self::new(max_entries).map_err(|_| invalid())
    }
}

impl Default for BatchLimits {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_BATCH_ENTRIES,
        }
    }
}

/// Errors loading batch configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable is set but not a positive integer.
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidValue {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
    },

    /// An explicit ceiling of zero would reject every batch.
    #[error("max entries must be at least 1")]
    ZeroMaxEntries,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limit() {
        assert_eq!(BatchLimits::default().max_entries, DEFAULT_MAX_BATCH_ENTRIES);
    }

    #[test]
    fn test_parse_valid() {
        assert_eq!(BatchLimits::parse_max_entries(" 250 ").unwrap().max_entries, 250);
    }

    #[test]
    fn test_parse_rejects_zero_and_garbage() {
        assert!(BatchLimits::parse_max_entries("0").is_err());
        assert!(BatchLimits::parse_max_entries("-3").is_err());
        assert!(BatchLimits::parse_max_entries("many").is_err());
    }

    #[test]
    fn test_explicit_zero_rejected() {
        assert!(matches!(BatchLimits::new(0), Err(ConfigError::ZeroMaxEntries)));
        assert_eq!(BatchLimits::new(1).unwrap().max_entries, 1);
    }
}
