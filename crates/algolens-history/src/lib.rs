//! Generic immutable-snapshot undo/redo container.
//!
//! Classic linear history: an ordered sequence of snapshots plus a cursor.
//! Pushing a new state after an undo discards everything past the cursor;
//! there is no branching redo tree. Snapshots are shared behind [`Arc`] so
//! holding an old snapshot costs a pointer, not a deep copy, and prior
//! snapshots remain observably unmodified while new state is produced.

use std::sync::Arc;

/// Linear undo/redo history over any snapshot type.
///
/// The cursor is always a valid index into the snapshot sequence, which is
/// never empty.
#[derive(Debug, Clone)]
pub struct History<T> {
    snapshots: Vec<Arc<T>>,
    cursor: usize,
}

impl<T: PartialEq> History<T> {
    /// Starts a history with its initial snapshot.
    pub fn new(initial: T) -> Self {
        Self {
            snapshots: vec![Arc::new(initial)],
            cursor: 0,
        }
    }

    /// The snapshot at the cursor.
    pub fn state(&self) -> &T {
        &self.snapshots[self.cursor]
    }

    /// A shared handle to the snapshot at the cursor.
    pub fn state_arc(&self) -> Arc<T> {
        Arc::clone(&self.snapshots[self.cursor])
    }

    /// True if the cursor can move back.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// True if the cursor can move forward.
    pub fn can_redo(&self) -> bool {
        self.cursor < self.snapshots.len() - 1
    }

    /// Records a new state.
    ///
    /// A state structurally equal to the current one is ignored. Otherwise
    /// any redo tail past the cursor is discarded, the snapshot is appended
    /// and the cursor advances to it.
    pub fn set(&mut self, state: T) {
        if *self.state() == state {
            return;
        }
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(Arc::new(state));
        self.cursor = self.snapshots.len() - 1;
    }

    /// Moves the cursor back one snapshot. Returns whether it moved.
    pub fn undo(&mut self) -> bool {
        if self.can_undo() {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Moves the cursor forward one snapshot. Returns whether it moved.
    pub fn redo(&mut self) -> bool {
        if self.can_redo() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Discards all history and restarts from `state`.
    pub fn reset(&mut self, state: T) {
        self.snapshots = vec![Arc::new(state)];
        self.cursor = 0;
    }

    /// Number of snapshots currently retained.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false: a history holds at least its initial snapshot.
    pub fn is_empty(&self) -> bool {
        false
    }
}
