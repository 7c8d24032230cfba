//! # Trie Commitment Metrics
//!
//! Prometheus metrics for liveness holds, checkpoints and the retention window.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! qc-04-trie-commitment = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `qc04_trie_references_total` - Counter of liveness holds taken on insert
//! - `qc04_trie_dereferences_total` - Counter of holds released (eviction or reject)
//! - `qc04_trie_commits_total` - Counter of durable commits, labeled by trigger
//! - `qc04_trie_rejected_total` - Counter of rejected block tries
//! - `qc04_trie_retention_window_len` - Gauge of live accepted roots

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{
    register_gauge, register_int_counter, register_int_counter_vec, Gauge, IntCounter,
    IntCounterVec,
};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Liveness holds taken
    pub static ref REFERENCES: IntCounter = register_int_counter!(
        "qc04_trie_references_total",
        "Total number of trie roots referenced on insert"
    )
    .expect("Failed to create REFERENCES metric");

    /// Liveness holds released
    pub static ref DEREFERENCES: IntCounter = register_int_counter!(
        "qc04_trie_dereferences_total",
        "Total number of trie roots dereferenced"
    )
    .expect("Failed to create DEREFERENCES metric");

    /// Durable commits, labeled by trigger (checkpoint, archive, shutdown)
    pub static ref COMMITS: IntCounterVec = register_int_counter_vec!(
        "qc04_trie_commits_total",
        "Total number of trie roots committed to disk",
        &["trigger"]
    )
    .expect("Failed to create COMMITS metric");

    /// Rejected block tries
    pub static ref REJECTED: IntCounter = register_int_counter!(
        "qc04_trie_rejected_total",
        "Total number of rejected block tries"
    )
    .expect("Failed to create REJECTED metric");

    /// Live accepted roots
    pub static ref RETENTION_WINDOW_LEN: Gauge = register_gauge!(
        "qc04_trie_retention_window_len",
        "Number of accepted roots held live in memory"
    )
    .expect("Failed to create RETENTION_WINDOW_LEN metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

#[cfg(feature = "metrics")]
pub fn record_reference() {
    REFERENCES.inc();
}

#[cfg(feature = "metrics")]
pub fn record_dereference() {
    DEREFERENCES.inc();
}

/// Record a commit with its trigger
#[cfg(feature = "metrics")]
pub fn record_commit(trigger: &str) {
    COMMITS.with_label_values(&[trigger]).inc();
}

#[cfg(feature = "metrics")]
pub fn record_rejected() {
    REJECTED.inc();
}

#[cfg(feature = "metrics")]
pub fn set_retention_window_len(len: usize) {
    RETENTION_WINDOW_LEN.set(len as f64);
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_reference() {}

#[cfg(not(feature = "metrics"))]
pub fn record_dereference() {}

#[cfg(not(feature = "metrics"))]
pub fn record_commit(_trigger: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_rejected() {}

#[cfg(not(feature = "metrics"))]
pub fn set_retention_window_len(_len: usize) {}
