//! Undo history for edited cuts

use crate::cut::Cut;
use std::collections::VecDeque;

/// Manages the undo stack of full cut-list snapshots
///
/// Each snapshot is an owned copy of the cuts taken before a change, so later
/// edits never alter recorded history.
#[derive(Debug, Clone, PartialEq)]
pub struct CutHistory {
    undo_stack: VecDeque<Vec<Cut>>,
    max_depth: usize,
}

impl CutHistory {
    /// Create a new history with default depth (100)
    pub fn new() -> Self {
        Self::with_depth(100)
    }

    /// Create with custom maximum undo depth
    pub fn with_depth(max_depth: usize) -> Self {
        let max_depth = max_depth.max(1);
        Self {
            undo_stack: VecDeque::with_capacity(max_depth.min(64)),
            max_depth,
        }
    }

    /// Record the cuts as they were before a change
    pub fn record(&mut self, snapshot: Vec<Cut>) {
        self.undo_stack.push_back(snapshot);

        // Drop the oldest past max depth
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.pop_front();
        }
    }

    /// Take the most recent snapshot
    pub fn undo(&mut self) -> Option<Vec<Cut>> {
        self.undo_stack.pop_back()
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
    }

    /// Get number of undo operations available
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for CutHistory {
    fn default() -> Self {
        Self::new()
    }
}
