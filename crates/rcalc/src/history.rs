//! Undo/redo history of committed stack versions.
//!
//! Entries are [`Snapshot`]s, which share structure with each other and with
//! the live stack, so keeping many of them is cheap.

use std::collections::VecDeque;

use crate::stack::Snapshot;

/// Bounded undo/redo history.
#[derive(Clone, Debug)]
pub struct History {
    /// Versions before the current one (oldest first).
    undo: VecDeque<Snapshot>,
    /// Versions undone since the last commit (most recently undone last).
    redo: Vec<Snapshot>,
    /// Maximum number of undo entries to keep.
    max_entries: usize,
}

impl History {
    /// Create a new history keeping at most `max_entries` undo steps.
    pub fn new(max_entries: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            max_entries,
        }
    }

    /// Record the version that a new commit replaces.
    ///
    /// Clears the redo list.
    pub fn record(&mut self, previous: Snapshot) {
        self.redo.clear();
        if self.max_entries == 0 {
            return;
        }
        self.undo.push_back(previous);
        while self.undo.len() > self.max_entries {
            self.undo.pop_front();
        }
    }

    /// Step back: returns the version to restore, remembering `current` for redo.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let previous = self.undo.pop_back()?;
        self.redo.push(current);
        Some(previous)
    }

    /// Step forward: returns the version to restore, remembering `current` for undo.
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.redo.pop()?;
        self.undo.push_back(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Number of undo steps available.
    pub fn len(&self) -> usize {
        self.undo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo.is_empty()
    }
}
