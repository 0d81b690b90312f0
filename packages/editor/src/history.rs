//! # History Log
//!
//! Linear undo/redo over whole-tree snapshots.
//!
//! The snapshot at `index` always equals the live tree. Recording while
//! undone truncates the redo tail first; redo history is discarded on a
//! fresh edit, never merged.

use pagegrid_content::ContentTree;

#[derive(Debug, Clone)]
pub struct HistoryLog {
    snapshots: Vec<ContentTree>,
    index: usize,
    /// 0 = unlimited
    max_entries: usize,
}

impl HistoryLog {
    /// Unbounded history: undoing n times from the nth edit always
    /// reaches the initial snapshot
    pub fn new(initial: ContentTree) -> Self {
        Self::with_max_entries(initial, 0)
    }

    /// History capped at `max_entries` snapshots, dropping the oldest
    /// past the cap; 0 means unlimited
    pub fn with_max_entries(initial: ContentTree, max_entries: usize) -> Self {
        Self {
            snapshots: vec![initial],
            index: 0,
            max_entries,
        }
    }

    /// Append a post-mutation snapshot, discarding any redo tail
    pub fn record(&mut self, tree: ContentTree) {
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(tree);
        self.index += 1;

        if self.max_entries > 0 && self.snapshots.len() > self.max_entries {
            self.snapshots.remove(0);
            self.index -= 1;
        }
    }

    /// Step back one snapshot; at the start this is a no-op
    pub fn undo(&mut self) -> &ContentTree {
        if self.index > 0 {
            self.index -= 1;
        }
        &self.snapshots[self.index]
    }

    /// Step forward one snapshot; at the end this is a no-op
    pub fn redo(&mut self) -> &ContentTree {
        if self.index + 1 < self.snapshots.len() {
            self.index += 1;
        }
        &self.snapshots[self.index]
    }

    pub fn current(&self) -> &ContentTree {
        &self.snapshots[self.index]
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    /// Discard all history and restart from a single entry
    pub fn reset(&mut self, initial: ContentTree) {
        self.snapshots = vec![initial];
        self.index = 0;
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }
}
