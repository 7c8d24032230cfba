//! # Trie Commitment Configuration
//!
//! Construction-time parameters. There is no runtime reconfiguration.

use crate::domain::{ConfigError, DEFAULT_COMMIT_INTERVAL, DEFAULT_TIP_BUFFER_SIZE};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::warn;

/// Trie commitment configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrieCommitConfig {
    /// Bounded-memory mode. When false every inserted root is committed
    /// (archive mode).
    pub pruning_enabled: bool,

    /// Number of accepted roots kept live in memory.
    pub tip_buffer_size: usize,

    /// Commit every N-th accepted root to disk.
    pub commit_interval: u64,
}

impl Default for TrieCommitConfig {
    fn default() -> Self {
        Self {
            pruning_enabled: true,
            tip_buffer_size: DEFAULT_TIP_BUFFER_SIZE,
            commit_interval: DEFAULT_COMMIT_INTERVAL,
        }
    }
}

impl TrieCommitConfig {
    /// Archive node: full history, every root committed on insert.
    pub fn archive() -> Self {
        Self {
            pruning_enabled: false,
            ..Self::default()
        }
    }

    /// Create a config for testing (smaller values).
    pub fn for_testing() -> Self {
        Self {
            pruning_enabled: true,
            tip_buffer_size: 2,
            commit_interval: 3,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `QC_PRUNING`: Enable pruning (default: true)
    /// - `QC_TIP_BUFFER_SIZE`: Live accepted roots (default: 32)
    /// - `QC_COMMIT_INTERVAL`: Checkpoint cadence in accepted blocks (default: 4096)
    ///
    /// Unparsable values are ignored. The result is not validated; the
    /// manager validates at construction.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(value) = env::var("QC_PRUNING") {
            match parse_bool(&value) {
                Some(enabled) => config.pruning_enabled = enabled,
                None => warn!("[qc-04] Ignoring QC_PRUNING={:?}: expected true/false", value),
            }
        }
        if let Ok(value) = env::var("QC_TIP_BUFFER_SIZE") {
            match value.parse() {
                Ok(size) => config.tip_buffer_size = size,
                Err(_) => warn!("[qc-04] Ignoring QC_TIP_BUFFER_SIZE={:?}", value),
            }
        }
        if let Ok(value) = env::var("QC_COMMIT_INTERVAL") {
            match value.parse() {
                Ok(interval) => config.commit_interval = interval,
                Err(_) => warn!("[qc-04] Ignoring QC_COMMIT_INTERVAL={:?}", value),
            }
        }

        config
    }

    /// Reject parameters the manager cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tip_buffer_size == 0 {
            return Err(ConfigError::ZeroTipBufferSize);
        }
        if self.commit_interval == 0 {
            return Err(ConfigError::ZeroCommitInterval);
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
