//! # Integration Flows
//!
//! Drives `TrieCommitmentManager` the way the block lifecycle driver does:
//! every produced block is inserted, then exactly one of accept/reject.

pub mod driver;
