//! Driving Ports (API - Inbound)

use crate::domain::TrieCommitResult;
use shared_types::SealedBlock;

/// Entry points called by the block lifecycle driver.
///
/// Calls must be strictly sequential: insert exactly once per produced
/// block, then exactly one of accept/reject for that block. Both pruning and
/// archive managers share this shape so the driver never needs to know
/// which mode is active.
pub trait TrieCommitmentApi {
    /// A block's state trie was produced by execution.
    fn insert_trie(&mut self, block: &SealedBlock) -> TrieCommitResult<()>;

    /// The block became final.
    fn accept_trie(&mut self, block: &SealedBlock) -> TrieCommitResult<()>;

    /// The block was discarded.
    fn reject_trie(&mut self, block: &SealedBlock) -> TrieCommitResult<()>;

    /// Persist what is needed for a fast restart. No calls are accepted
    /// afterwards.
    fn shutdown(&mut self) -> TrieCommitResult<()>;
}
