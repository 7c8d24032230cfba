//! Ports module for the Trie Commitment subsystem

pub mod inbound;
pub mod outbound;

pub use inbound::TrieCommitmentApi;
pub use outbound::TrieStore;
