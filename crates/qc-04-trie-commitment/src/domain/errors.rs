//! # Domain Errors
//!
//! Every error is returned synchronously by the call that detects it.
//! Nothing here is retried.

use shared_types::Hash;
use std::fmt;
use thiserror::Error;

/// Failure reported by a `TrieStore` implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Underlying disk or database write failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// The store is closed or otherwise not accepting calls.
    #[error("Trie store unavailable")]
    Unavailable,
}

/// Which store call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    Reference,
    Dereference,
    Commit,
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreOperation::Reference => write!(f, "reference"),
            StoreOperation::Dereference => write!(f, "dereference"),
            StoreOperation::Commit => write!(f, "commit"),
        }
    }
}

/// Lifecycle action attempted on a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockAction {
    Accept,
    Reject,
}

impl fmt::Display for BlockAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockAction::Accept => write!(f, "accept"),
            BlockAction::Reject => write!(f, "reject"),
        }
    }
}

/// The driving pipeline called the manager out of protocol.
///
/// These are programming defects in the caller, not runtime conditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolViolation {
    /// Insert called for a block that is already pending.
    #[error("Block {block_hash:?} at height {height} inserted twice")]
    DuplicateInsert { block_hash: Hash, height: u64 },

    /// Insert at or below the height of the last accepted block.
    #[error(
        "Block {block_hash:?} at height {height} inserted at or below accepted height {last_accepted_height}"
    )]
    InsertBelowAccepted {
        block_hash: Hash,
        height: u64,
        last_accepted_height: u64,
    },

    /// Insert called for a block that was already accepted or rejected.
    #[error("Block {block_hash:?} at height {height} already decided")]
    AlreadyDecided { block_hash: Hash, height: u64 },

    /// Accept or reject called for a block with no pending insert
    /// (never inserted, or already accepted/rejected).
    #[error("Cannot {action} block {block_hash:?} at height {height}: not pending")]
    NotPending {
        block_hash: Hash,
        height: u64,
        action: BlockAction,
    },

    /// Any call after `shutdown`.
    #[error("Trie commitment manager is shut down")]
    ShutDown,
}

/// Invalid construction parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("tip_buffer_size must be at least 1")]
    ZeroTipBufferSize,

    #[error("commit_interval must be at least 1")]
    ZeroCommitInterval,
}

/// Trie commitment subsystem errors.
#[derive(Debug, Error)]
pub enum TrieCommitError {
    /// A store call failed. Block processing must halt.
    #[error("Storage failure during {operation} of root {root:?}: {source}")]
    StorageFailure {
        operation: StoreOperation,
        root: Hash,
        #[source]
        source: StoreError,
    },

    /// Caller protocol violation.
    #[error("Protocol violation: {0}")]
    ProtocolViolation(#[from] ProtocolViolation),

    /// Rejected configuration. Only returned from construction.
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigError),
}

impl TrieCommitError {
    pub(crate) fn storage(operation: StoreOperation, root: Hash, source: StoreError) -> Self {
        TrieCommitError::StorageFailure {
            operation,
            root,
            source,
        }
    }

    /// Whether the pipeline must stop processing blocks.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            TrieCommitError::StorageFailure { .. } | TrieCommitError::ProtocolViolation(_)
        )
    }
}

/// Result type for trie commitment operations
pub type TrieCommitResult<T> = Result<T, TrieCommitError>;
