//! # qc-04-trie-commitment
//!
//! Trie Commitment Manager for the execution layer's state tries.
//!
//! ## Role in System
//!
//! For every block the consensus pipeline produces, decides whether its
//! post-execution state trie stays in memory, is flushed to disk, or is
//! released:
//!
//! - **Accepted** state becomes durably recoverable, losing at most
//!   `commit_interval` blocks on a crash
//! - **Rejected** state is reclaimed immediately
//! - **Memory** stays bounded by `tip_buffer_size` live roots
//! - **Archive mode** commits every block's state unconditionally
//!
//! ## Block Lifecycle
//!
//! ```text
//! [Execution] ──insert_trie──→ [Trie Commitment] ──reference / commit──→ [Trie Store]
//!                                     ↑
//! [Consensus] ──accept_trie / reject_trie
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use qc_04_trie_commitment::{InMemoryTrieStore, TrieCommitConfig, TrieCommitmentManager};
//! use qc_04_trie_commitment::ports::TrieCommitmentApi;
//!
//! let store = Arc::new(InMemoryTrieStore::new());
//! let mut manager = TrieCommitmentManager::new(TrieCommitConfig::default(), store)?;
//!
//! manager.insert_trie(&block)?;
//! manager.accept_trie(&block)?;
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod metrics;
pub mod ports;
pub mod service;

pub use adapters::{InMemoryTrieStore, StoreCall};
pub use config::TrieCommitConfig;
pub use domain::{
    BlockAction, ConfigError, ProtocolViolation, RetainedRoot, RetentionWindow, StoreError,
    StoreOperation, TrieCommitError, TrieCommitResult, DEFAULT_COMMIT_INTERVAL,
    DEFAULT_TIP_BUFFER_SIZE,
};
pub use ports::{TrieCommitmentApi, TrieStore};
pub use service::{CommitMode, TrieCommitmentManager};
