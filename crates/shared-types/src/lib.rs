//! # Shared Types Crate
//!
//! Primitives shared by every crate in the workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Hash`, `StorageSize` and the block types are
//!   defined here and nowhere else.
//! - **Read-only blocks**: A `SealedBlock` is produced by the execution
//!   pipeline and never mutated afterwards; consumers only read its roots.

pub mod entities;

pub use entities::*;
