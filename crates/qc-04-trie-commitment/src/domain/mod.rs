//! Domain module for the Trie Commitment subsystem
//!
//! ## Core Modules
//! - window: Bounded FIFO of live accepted roots
//! - lifecycle: Per-block insert/accept/reject protocol tracking
//! - errors: Store, protocol and configuration failures

pub mod errors;
pub mod lifecycle;
pub mod window;

pub use errors::*;
pub use lifecycle::LifecycleTracker;
pub use window::{RetainedRoot, RetentionWindow};

/// Accepted roots kept live at the tip.
pub const DEFAULT_TIP_BUFFER_SIZE: usize = 32;

/// Accepted blocks between durable checkpoints.
pub const DEFAULT_COMMIT_INTERVAL: u64 = 4096;
