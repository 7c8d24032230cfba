//! # Retention Window
//!
//! FIFO of the most recently accepted `(height, root)` pairs whose tries are
//! still held live in the store, so queries at the tip can be served from
//! memory. Pushing past capacity evicts the oldest entry; the caller is
//! responsible for releasing its liveness hold.

use shared_types::Hash;
use std::collections::VecDeque;

/// A retained accepted root.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetainedRoot {
    pub height: u64,
    pub root: Hash,
}

/// Bounded queue of accepted roots.
#[derive(Clone, Debug)]
pub struct RetentionWindow {
    entries: VecDeque<RetainedRoot>,
    capacity: usize,
}

impl RetentionWindow {
    /// Capacity is clamped to at least one entry.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append an accepted root, returning the evicted oldest entry if the
    /// window overflowed.
    pub fn push(&mut self, height: u64, root: Hash) -> Option<RetainedRoot> {
        self.entries.push_back(RetainedRoot { height, root });
        if self.entries.len() > self.capacity {
            self.entries.pop_front()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recently accepted entry.
    pub fn newest(&self) -> Option<&RetainedRoot> {
        self.entries.back()
    }

    /// Next entry to be evicted.
    pub fn oldest(&self) -> Option<&RetainedRoot> {
        self.entries.front()
    }

    pub fn contains_root(&self, root: &Hash) -> bool {
        self.entries.iter().any(|entry| &entry.root == root)
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &RetainedRoot> {
        self.entries.iter()
    }
}
