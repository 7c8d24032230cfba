//! Trie Commitment Service - Core business logic
//!
//! ## Pruning mode
//!
//! ```text
//! insert ──→ reference(root, parent_root)
//! accept ──→ window.push(height, root) ──overflow──→ dereference(oldest)
//!        └─→ every commit_interval-th accept ──→ commit(root)
//! reject ──→ dereference(root)
//! ```
//!
//! ## Archive mode
//!
//! Every inserted root is committed immediately; accept and reject make no
//! store calls.

use crate::config::TrieCommitConfig;
use crate::domain::{
    BlockAction, LifecycleTracker, ProtocolViolation, RetainedRoot, RetentionWindow,
    StoreError, StoreOperation, TrieCommitError, TrieCommitResult,
};
use crate::metrics;
use crate::ports::{TrieCommitmentApi, TrieStore};
use shared_types::{short_hash, Hash, SealedBlock};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Active commitment policy, fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitMode {
    /// Bounded memory: retention window plus periodic checkpoints.
    Pruning,
    /// Full history: every root committed on insert.
    Archive,
}

impl fmt::Display for CommitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitMode::Pruning => write!(f, "pruning"),
            CommitMode::Archive => write!(f, "archive"),
        }
    }
}

/// Decides reference, dereference and commit actions for each block state
/// transition.
///
/// One instance per chain, owned by the block lifecycle driver. Not safe for
/// concurrent use; every entry point takes `&mut self`.
pub struct TrieCommitmentManager<S: TrieStore> {
    config: TrieCommitConfig,
    mode: CommitMode,
    store: Arc<S>,
    lifecycle: LifecycleTracker,
    window: RetentionWindow,
    /// Accept calls so far. Drives the checkpoint cadence.
    accepted_count: u64,
    last_checkpoint: Option<RetainedRoot>,
    shut_down: bool,
}

impl<S: TrieStore> TrieCommitmentManager<S> {
    /// Create a manager, rejecting invalid configuration.
    pub fn new(config: TrieCommitConfig, store: Arc<S>) -> TrieCommitResult<Self> {
        config.validate()?;

        let mode = if config.pruning_enabled {
            CommitMode::Pruning
        } else {
            CommitMode::Archive
        };
        info!(
            "[qc-04] Trie commitment manager created: mode={}, tip_buffer_size={}, commit_interval={}",
            mode, config.tip_buffer_size, config.commit_interval
        );

        Ok(Self {
            window: RetentionWindow::new(config.tip_buffer_size),
            config,
            mode,
            store,
            lifecycle: LifecycleTracker::new(),
            accepted_count: 0,
            last_checkpoint: None,
            shut_down: false,
        })
    }

    pub fn config(&self) -> &TrieCommitConfig {
        &self.config
    }

    pub fn mode(&self) -> CommitMode {
        self.mode
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Accepted roots still held live. Always empty in archive mode.
    pub fn retention_window(&self) -> &RetentionWindow {
        &self.window
    }

    pub fn accepted_count(&self) -> u64 {
        self.accepted_count
    }

    /// Blocks inserted but not yet accepted or rejected.
    pub fn pending_count(&self) -> usize {
        self.lifecycle.pending_count()
    }

    /// Most recent accepted root committed at a checkpoint or on shutdown.
    pub fn last_checkpoint(&self) -> Option<RetainedRoot> {
        self.last_checkpoint
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    fn ensure_running(&self) -> TrieCommitResult<()> {
        if self.shut_down {
            return Err(violation(ProtocolViolation::ShutDown));
        }
        Ok(())
    }

    fn reference(&self, root: Hash, parent: Hash) -> TrieCommitResult<()> {
        self.store
            .reference(root, parent)
            .map_err(|e| storage_failure(StoreOperation::Reference, root, e))?;
        metrics::record_reference();
        Ok(())
    }

    fn dereference(&self, root: Hash) -> TrieCommitResult<()> {
        self.store
            .dereference(root)
            .map_err(|e| storage_failure(StoreOperation::Dereference, root, e))?;
        metrics::record_dereference();
        Ok(())
    }

    fn commit(&self, root: Hash, trigger: &str) -> TrieCommitResult<()> {
        self.store
            .commit(root, true, None)
            .map_err(|e| storage_failure(StoreOperation::Commit, root, e))?;
        metrics::record_commit(trigger);
        Ok(())
    }

    fn accept_pruning(&mut self, block: &SealedBlock) -> TrieCommitResult<()> {
        let height = block.height();
        let root = block.root();

        // Roots at least tip_buffer_size accepts old are released; committed
        // ones only leave memory.
        if let Some(evicted) = self.window.push(height, root) {
            debug!(
                "[qc-04] Evicting root {} (height {}) from retention window",
                short_hash(&evicted.root),
                evicted.height
            );
            self.dereference(evicted.root)?;
        }
        metrics::set_retention_window_len(self.window.len());

        if self.accepted_count % self.config.commit_interval == 0 {
            self.commit(root, "checkpoint")?;
            self.last_checkpoint = Some(RetainedRoot { height, root });
            info!(
                "[qc-04] Checkpoint committed: root {} at height {} (accepted #{})",
                short_hash(&root),
                height,
                self.accepted_count
            );
        }
        Ok(())
    }
}

impl<S: TrieStore> TrieCommitmentApi for TrieCommitmentManager<S> {
    fn insert_trie(&mut self, block: &SealedBlock) -> TrieCommitResult<()> {
        self.ensure_running()?;
        self.lifecycle.check_insert(block).map_err(violation)?;

        let root = block.root();
        match self.mode {
            CommitMode::Pruning => self.reference(root, block.parent_root())?,
            CommitMode::Archive => self.commit(root, "archive")?,
        }
        self.lifecycle.record_insert(block);

        debug!(
            "[qc-04] Inserted trie {} at height {} ({})",
            short_hash(&root),
            block.height(),
            self.mode
        );
        Ok(())
    }

    fn accept_trie(&mut self, block: &SealedBlock) -> TrieCommitResult<()> {
        self.ensure_running()?;
        self.lifecycle
            .check_decide(block, BlockAction::Accept)
            .map_err(violation)?;
        self.lifecycle.record_decided(block, BlockAction::Accept);
        self.accepted_count += 1;

        debug!(
            "[qc-04] Accepting trie {} at height {}",
            short_hash(&block.root()),
            block.height()
        );
        match self.mode {
            CommitMode::Pruning => self.accept_pruning(block),
            CommitMode::Archive => Ok(()),
        }
    }

    fn reject_trie(&mut self, block: &SealedBlock) -> TrieCommitResult<()> {
        self.ensure_running()?;
        self.lifecycle
            .check_decide(block, BlockAction::Reject)
            .map_err(violation)?;
        self.lifecycle.record_decided(block, BlockAction::Reject);
        metrics::record_rejected();

        debug!(
            "[qc-04] Rejecting trie {} at height {}",
            short_hash(&block.root()),
            block.height()
        );
        match self.mode {
            CommitMode::Pruning => self.dereference(block.root()),
            CommitMode::Archive => Ok(()),
        }
    }

    fn shutdown(&mut self) -> TrieCommitResult<()> {
        self.ensure_running()?;

        let pending = self.lifecycle.pending_count();
        if pending > 0 {
            warn!("[qc-04] Shutting down with {} undecided block tries", pending);
        }

        // Last accepted root, unless it is already the checkpoint. A failed
        // commit leaves the manager running so shutdown can be retried.
        if self.mode == CommitMode::Pruning {
            match self.window.newest().copied() {
                Some(newest) if self.last_checkpoint != Some(newest) => {
                    self.commit(newest.root, "shutdown")?;
                    self.last_checkpoint = Some(newest);
                    info!(
                        "[qc-04] Committed last accepted root {} at height {} on shutdown",
                        short_hash(&newest.root),
                        newest.height
                    );
                }
                Some(_) => debug!("[qc-04] Last accepted root already checkpointed"),
                None => debug!("[qc-04] No accepted roots to commit on shutdown"),
            }
        }

        self.shut_down = true;
        Ok(())
    }
}

fn storage_failure(operation: StoreOperation, root: Hash, source: StoreError) -> TrieCommitError {
    error!(
        "[qc-04] Trie store {} failed for root {}: {}",
        operation,
        short_hash(&root),
        source
    );
    TrieCommitError::storage(operation, root, source)
}

fn violation(violation: ProtocolViolation) -> TrieCommitError {
    warn!("[qc-04] Protocol violation: {}", violation);
    violation.into()
}
