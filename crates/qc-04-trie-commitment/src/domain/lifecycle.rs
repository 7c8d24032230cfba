//! # Block Lifecycle Tracking
//!
//! Mirrors `Unknown → Inserted → {Accepted | Rejected}` for each block.
//!
//! Pending blocks are remembered by hash. Once a block is accepted, nothing
//! at or below its height may be inserted again, so decided blocks only need
//! remembering while they sit above the last accepted height. Memory stays
//! bounded by the undecided frontier.

use super::errors::{BlockAction, ProtocolViolation};
use shared_types::{Hash, SealedBlock};
use std::collections::{HashMap, HashSet};

/// Pending blocks awaiting accept or reject.
#[derive(Debug, Default)]
pub struct LifecycleTracker {
    pending: HashSet<Hash>,
    /// Blocks decided above `last_accepted_height`, with their heights.
    decided: HashMap<Hash, u64>,
    last_accepted_height: Option<u64>,
}

impl LifecycleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails if the block is pending, already decided, or at or below the
    /// last accepted height. Does not record anything; call `record_insert`
    /// once the insert has succeeded.
    pub fn check_insert(&self, block: &SealedBlock) -> Result<(), ProtocolViolation> {
        let block_hash = block.hash();
        let height = block.height();

        if self.pending.contains(&block_hash) {
            return Err(ProtocolViolation::DuplicateInsert { block_hash, height });
        }
        if let Some(last_accepted_height) = self.last_accepted_height {
            if height <= last_accepted_height {
                return Err(ProtocolViolation::InsertBelowAccepted {
                    block_hash,
                    height,
                    last_accepted_height,
                });
            }
        }
        if self.decided.contains_key(&block_hash) {
            return Err(ProtocolViolation::AlreadyDecided { block_hash, height });
        }
        Ok(())
    }

    pub fn record_insert(&mut self, block: &SealedBlock) {
        self.pending.insert(block.hash());
    }

    /// Fails if the block is not pending.
    pub fn check_decide(
        &self,
        block: &SealedBlock,
        action: BlockAction,
    ) -> Result<(), ProtocolViolation> {
        if !self.pending.contains(&block.hash()) {
            return Err(ProtocolViolation::NotPending {
                block_hash: block.hash(),
                height: block.height(),
                action,
            });
        }
        Ok(())
    }

    /// Moves the block to its terminal state.
    ///
    /// An accept raises the accepted height and drops decided entries it
    /// now covers.
    pub fn record_decided(&mut self, block: &SealedBlock, action: BlockAction) {
        let block_hash = block.hash();
        let height = block.height();
        self.pending.remove(&block_hash);

        match action {
            BlockAction::Accept => {
                let last = self.last_accepted_height.map_or(height, |h| h.max(height));
                self.last_accepted_height = Some(last);
                self.decided.retain(|_, decided_height| *decided_height > last);
            }
            BlockAction::Reject => {
                if self.last_accepted_height.map_or(true, |h| height > h) {
                    self.decided.insert(block_hash, height);
                }
            }
        }
    }

    pub fn is_pending(&self, block_hash: &Hash) -> bool {
        self.pending.contains(block_hash)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Decided blocks still remembered above the accepted height.
    pub fn decided_count(&self) -> usize {
        self.decided.len()
    }

    pub fn last_accepted_height(&self) -> Option<u64> {
        self.last_accepted_height
    }
}
