use std::collections::VecDeque;

use crate::model::Task;

/// Depth used when the config doesn't say otherwise
pub const DEFAULT_UNDO_DEPTH: usize = 50;

/// Bounded stack of master-list snapshots. Pushing past capacity evicts the
/// oldest entry; popping is single-level with no redo.
#[derive(Debug, Clone)]
pub struct UndoHistory {
    entries: VecDeque<Vec<Task>>,
    capacity: usize,
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_DEPTH)
    }
}

impl UndoHistory {
    /// A capacity of 0 is bumped to 1 so the most recent action stays undoable.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        UndoHistory {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a snapshot taken just before a mutation.
    pub fn push(&mut self, snapshot: Vec<Task>) {
        self.entries.push_back(snapshot);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Pop the most recent snapshot
    pub fn pop(&mut self) -> Option<Vec<Task>> {
        self.entries.pop_back()
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

    /// Oldest-first iteration, mainly for tests
    pub fn iter(&self) -> impl Iterator<Item = &Vec<Task>> {
        self.entries.iter()
    }
}
