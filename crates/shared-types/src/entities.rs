//! # Core Domain Entities
//!
//! Defines the chain entities consumed by the state commitment pipeline.
//!
//! ## Clusters
//!
//! - **Chain**: `BlockHeader`, `SealedBlock`
//! - **State & Storage**: `Hash`, `StorageSize`

use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use std::fmt;

// =============================================================================
// CLUSTER A: THE CHAIN
// =============================================================================

/// A 32-byte hash (Keccak-256).
pub type Hash = [u8; 32];

/// The all-zero hash, used as the parent of genesis.
pub const ZERO_HASH: Hash = [0u8; 32];

/// The header of a block, as far as state commitment is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BlockHeader {
    /// Block height in the chain.
    pub height: u64,
    /// Hash of the parent block (creates the chain linkage).
    pub parent_hash: Hash,
    /// Root hash of the state trie after applying this block.
    pub state_root: Hash,
    /// Root hash of the parent block's state trie.
    pub parent_state_root: Hash,
    /// Unix timestamp when the block was proposed.
    pub timestamp: u64,
}

impl BlockHeader {
    /// Keccak-256 over the big-endian encoding of every header field.
    pub fn compute_hash(&self) -> Hash {
        let mut hasher = Keccak256::new();
        hasher.update(self.height.to_be_bytes());
        hasher.update(self.parent_hash);
        hasher.update(self.state_root);
        hasher.update(self.parent_state_root);
        hasher.update(self.timestamp.to_be_bytes());
        hasher.finalize().into()
    }
}

/// A header paired with its hash.
///
/// The hash is computed once at sealing time and is the identity of the
/// block everywhere downstream. Sibling blocks with the same state root
/// still have different hashes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedBlock {
    hash: Hash,
    header: BlockHeader,
}

impl SealedBlock {
    /// Seal a header, computing its hash.
    pub fn seal(header: BlockHeader) -> Self {
        Self {
            hash: header.compute_hash(),
            header,
        }
    }

    pub fn hash(&self) -> Hash {
        self.hash
    }

    pub fn header(&self) -> &BlockHeader {
        &self.header
    }

    pub fn height(&self) -> u64 {
        self.header.height
    }

    /// State root after executing this block.
    pub fn root(&self) -> Hash {
        self.header.state_root
    }

    /// State root of the parent block.
    pub fn parent_root(&self) -> Hash {
        self.header.parent_state_root
    }
}

/// Abbreviated hex form of a hash for log lines (`0x1a2b3c4d…`).
pub fn short_hash(hash: &Hash) -> String {
    format!("0x{}…", hex::encode(&hash[..4]))
}

// =============================================================================
// CLUSTER B: STATE & STORAGE
// =============================================================================

/// A byte count reported by a storage backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct StorageSize(pub u64);

impl StorageSize {
    pub const KIB: u64 = 1024;
    pub const MIB: u64 = 1024 * 1024;
    pub const GIB: u64 = 1024 * 1024 * 1024;

    pub fn bytes(self) -> u64 {
        self.0
    }
}

impl fmt::Display for StorageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.0 as f64;
        if self.0 >= Self::GIB {
            write!(f, "{:.2} GiB", bytes / Self::GIB as f64)
        } else if self.0 >= Self::MIB {
            write!(f, "{:.2} MiB", bytes / Self::MIB as f64)
        } else if self.0 >= Self::KIB {
            write!(f, "{:.2} KiB", bytes / Self::KIB as f64)
        } else {
            write!(f, "{:.2} B", bytes)
        }
    }
}
