use crate::domain::StoreError;
use crate::ports::TrieStore;
use parking_lot::RwLock;
use shared_types::{Hash, StorageSize};
use std::collections::{HashMap, HashSet};

/// Bytes accounted per dirty root when no size is given.
const DEFAULT_NODE_SIZE: u64 = 1024;

/// A single call observed by `InMemoryTrieStore`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreCall {
    Reference { child: Hash, parent: Hash },
    Dereference { root: Hash },
    Commit { root: Hash, report: bool },
    Cap { limit: StorageSize },
}

#[derive(Default)]
struct StoreState {
    /// Live roots and the parents they were anchored against.
    holds: HashMap<Hash, Vec<Hash>>,
    /// Roots with unpersisted nodes, oldest first.
    dirty: Vec<Hash>,
    committed: HashSet<Hash>,
    calls: Vec<StoreCall>,
    fail_commits: bool,
    fail_references: bool,
}

impl StoreState {
    fn mark_dirty(&mut self, root: Hash) {
        if !self.committed.contains(&root) && !self.dirty.contains(&root) {
            self.dirty.push(root);
        }
    }

    /// Returns true if the root had unpersisted nodes.
    fn persist(&mut self, root: Hash) -> bool {
        let was_dirty = match self.dirty.iter().position(|r| *r == root) {
            Some(index) => {
                self.dirty.remove(index);
                true
            }
            None => false,
        };
        self.committed.insert(root) || was_dirty
    }
}

/// In-memory implementation of TrieStore for testing
///
/// Tracks liveness holds per root, a committed set and a journal of every
/// call, and can be told to fail commits or references.
pub struct InMemoryTrieStore {
    node_size: u64,
    state: RwLock<StoreState>,
}

impl InMemoryTrieStore {
    pub fn new() -> Self {
        Self::with_node_size(DEFAULT_NODE_SIZE)
    }

    /// Account `node_size` bytes for every dirty root.
    pub fn with_node_size(node_size: u64) -> Self {
        Self {
            node_size,
            state: RwLock::new(StoreState::default()),
        }
    }

    pub fn fail_commits(&self, fail: bool) {
        self.state.write().fail_commits = fail;
    }

    pub fn fail_references(&self, fail: bool) {
        self.state.write().fail_references = fail;
    }

    /// Number of liveness holds on `root`.
    pub fn refcount(&self, root: &Hash) -> usize {
        self.state.read().holds.get(root).map_or(0, Vec::len)
    }

    pub fn is_live(&self, root: &Hash) -> bool {
        self.refcount(root) > 0
    }

    pub fn is_committed(&self, root: &Hash) -> bool {
        self.state.read().committed.contains(root)
    }

    pub fn is_dirty(&self, root: &Hash) -> bool {
        self.state.read().dirty.contains(root)
    }

    pub fn live_roots(&self) -> usize {
        self.state.read().holds.len()
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.state.read().calls.clone()
    }

    /// Drain the journal.
    pub fn take_calls(&self) -> Vec<StoreCall> {
        std::mem::take(&mut self.state.write().calls)
    }

    pub fn references_of(&self, root: &Hash) -> usize {
        self.count_calls(|call| matches!(call, StoreCall::Reference { child, .. } if child == root))
    }

    pub fn dereferences_of(&self, root: &Hash) -> usize {
        self.count_calls(|call| matches!(call, StoreCall::Dereference { root: r } if r == root))
    }

    pub fn commits_of(&self, root: &Hash) -> usize {
        self.count_calls(|call| matches!(call, StoreCall::Commit { root: r, .. } if r == root))
    }

    pub fn commit_count(&self) -> usize {
        self.count_calls(|call| matches!(call, StoreCall::Commit { .. }))
    }

    fn count_calls(&self, predicate: impl Fn(&StoreCall) -> bool) -> usize {
        self.state.read().calls.iter().filter(|call| predicate(call)).count()
    }
}

impl Default for InMemoryTrieStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TrieStore for InMemoryTrieStore {
    fn reference(&self, child: Hash, parent: Hash) -> Result<(), StoreError> {
        let mut state = self.state.write();
        state.calls.push(StoreCall::Reference { child, parent });
        if state.fail_references {
            return Err(StoreError::Unavailable);
        }

        let anchors = state.holds.entry(child).or_default();
        if !anchors.contains(&parent) {
            anchors.push(parent);
        }
        state.mark_dirty(child);
        Ok(())
    }

    fn dereference(&self, root: Hash) -> Result<(), StoreError> {
        let mut state = self.state.write();
        state.calls.push(StoreCall::Dereference { root });
        if state.fail_references {
            return Err(StoreError::Unavailable);
        }

        let released = match state.holds.get_mut(&root) {
            Some(anchors) => {
                anchors.pop();
                anchors.is_empty()
            }
            None => false,
        };
        if released {
            state.holds.remove(&root);
            // Uncommitted nodes with no holders are collected.
            state.dirty.retain(|r| *r != root);
        }
        Ok(())
    }

    fn commit(
        &self,
        root: Hash,
        report: bool,
        on_node: Option<&mut dyn FnMut(&Hash)>,
    ) -> Result<(), StoreError> {
        let mut state = self.state.write();
        state.calls.push(StoreCall::Commit { root, report });
        if state.fail_commits {
            return Err(StoreError::Io("injected commit failure".to_string()));
        }

        if state.persist(root) {
            if let Some(callback) = on_node {
                callback(&root);
            }
        }
        Ok(())
    }

    fn size(&self) -> (StorageSize, StorageSize) {
        let state = self.state.read();
        (StorageSize(state.dirty.len() as u64 * self.node_size), StorageSize(0))
    }

    fn cap(&self, limit: StorageSize) -> Result<(), StoreError> {
        let mut state = self.state.write();
        state.calls.push(StoreCall::Cap { limit });
        if state.fail_commits {
            return Err(StoreError::Io("injected commit failure".to_string()));
        }

        while state.dirty.len() as u64 * self.node_size > limit.bytes() {
            let oldest = state.dirty.remove(0);
            state.committed.insert(oldest);
        }
        Ok(())
    }
}
