//! # Block Lifecycle Driver
//!
//! Minimal stand-in for the consensus/execution pipeline. Each round
//! produces one or more sibling candidates on top of the last accepted
//! block, inserts all of them, accepts the first and rejects the rest.

use anyhow::{Context, Result};
use qc_04_trie_commitment::{TrieCommitmentApi, TrieCommitmentManager, TrieStore};
use rand::Rng;
use shared_types::{BlockHeader, Hash, SealedBlock, ZERO_HASH};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Install a test subscriber once; later calls are ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Genesis block; its state is assumed already on disk.
pub fn genesis() -> SealedBlock {
    SealedBlock::seal(BlockHeader {
        height: 0,
        parent_hash: ZERO_HASH,
        state_root: [0x01; 32],
        parent_state_root: ZERO_HASH,
        timestamp: 0,
    })
}

/// Outcome of one driver round.
#[derive(Debug, Clone)]
pub struct Round {
    pub accepted: SealedBlock,
    pub rejected: Vec<SealedBlock>,
}

pub struct ChainDriver<S: TrieStore> {
    manager: TrieCommitmentManager<S>,
    tip: SealedBlock,
}

impl<S: TrieStore> ChainDriver<S> {
    pub fn new(manager: TrieCommitmentManager<S>) -> Self {
        Self {
            manager,
            tip: genesis(),
        }
    }

    pub fn manager(&self) -> &TrieCommitmentManager<S> {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut TrieCommitmentManager<S> {
        &mut self.manager
    }

    /// Last accepted block.
    pub fn tip(&self) -> &SealedBlock {
        &self.tip
    }

    /// A child of the current tip with a random state root.
    pub fn produce(&self) -> SealedBlock {
        let state_root: Hash = rand::thread_rng().gen();
        SealedBlock::seal(BlockHeader {
            height: self.tip.height() + 1,
            parent_hash: self.tip.hash(),
            state_root,
            parent_state_root: self.tip.root(),
            timestamp: self.tip.header().timestamp + 1,
        })
    }

    /// Insert `candidates` siblings, accept the first, reject the others.
    pub fn advance(&mut self, candidates: usize) -> Result<Round> {
        let blocks: Vec<SealedBlock> = (0..candidates.max(1)).map(|_| self.produce()).collect();
        for block in &blocks {
            self.manager
                .insert_trie(block)
                .with_context(|| format!("insert block at height {}", block.height()))?;
        }

        let mut blocks = blocks.into_iter();
        let accepted = blocks.next().context("no candidate produced")?;
        self.manager
            .accept_trie(&accepted)
            .with_context(|| format!("accept block at height {}", accepted.height()))?;

        let rejected: Vec<SealedBlock> = blocks.collect();
        for block in &rejected {
            self.manager
                .reject_trie(block)
                .with_context(|| format!("reject block at height {}", block.height()))?;
        }

        self.tip = accepted.clone();
        Ok(Round { accepted, rejected })
    }

    /// Run `rounds` rounds with the same candidate count.
    pub fn run(&mut self, rounds: usize, candidates: usize) -> Result<Vec<Round>> {
        let rounds = (0..rounds)
            .map(|_| self.advance(candidates))
            .collect::<Result<Vec<_>>>()?;
        info!(
            "Driver advanced {} rounds to height {} ({} mode)",
            rounds.len(),
            self.tip.height(),
            self.manager.mode()
        );
        Ok(rounds)
    }
}
