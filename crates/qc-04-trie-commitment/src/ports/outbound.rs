//! Driven Ports (SPI - Outbound Dependencies)

use crate::domain::StoreError;
use shared_types::{Hash, StorageSize};

/// Merkleized key/value store with reference-counted liveness tracking.
///
/// Node encoding and on-disk layout belong to the implementation. The
/// manager only drives liveness holds and durable flushes through this
/// trait; `size` and `cap` are exposed for a higher-level memory controller.
pub trait TrieStore: Send + Sync {
    /// Mark `child`'s nodes reachable, anchored at `parent`. Idempotent.
    ///
    /// `parent` is an opaque anchor and is never validated by callers.
    fn reference(&self, child: Hash, parent: Hash) -> Result<(), StoreError>;

    /// Release one liveness hold on `root`. Nodes shared with other live
    /// roots survive; uniquely held nodes become collectible. Releasing a
    /// committed root only drops it from memory.
    fn dereference(&self, root: Hash) -> Result<(), StoreError>;

    /// Durably persist every not-yet-persisted node reachable from `root`.
    ///
    /// `on_node` is invoked with the hash of each node written.
    fn commit(
        &self,
        root: Hash,
        report: bool,
        on_node: Option<&mut dyn FnMut(&Hash)>,
    ) -> Result<(), StoreError>;

    /// Memory held by (dirty trie nodes, preimages).
    fn size(&self) -> (StorageSize, StorageSize);

    /// Flush dirty nodes until memory is at or below `limit`.
    fn cap(&self, limit: StorageSize) -> Result<(), StoreError>;
}
