//! Undo/redo stacks over a [`HistoryStore`].

use super::store::{HistorySnapshot, HistoryStore};
use tracing::debug;

/// Two LIFO stacks of history snapshots.
///
/// Callers must invoke [`UndoRedo::before_mutation`] right before every
/// forward edit of the history. Starting a new edit discards anything that
/// was undone, so redo only replays the branch that was undone most recently.
#[derive(Debug, Default)]
pub struct UndoRedo {
    undo_stack: Vec<HistorySnapshot>,
    redo_stack: Vec<HistorySnapshot>,
}

impl UndoRedo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the state `history` is about to leave.
    pub fn before_mutation(&mut self, history: &HistoryStore) {
        self.undo_stack.push(history.snapshot());
        self.redo_stack.clear();
    }

    /// Step back one edit. Returns false when there is nothing to undo.
    pub fn undo(&mut self, history: &mut HistoryStore) -> bool {
        let Some(snapshot) = self.undo_stack.pop() else {
            return false;
        };
        self.redo_stack.push(history.snapshot());
        history.restore(&snapshot);
        debug!(rows = history.len(), undo_depth = self.undo_stack.len(), "undo");
        true
    }

    /// Replay the most recently undone edit. Returns false when there is
    /// nothing to redo.
    pub fn redo(&mut self, history: &mut HistoryStore) -> bool {
        let Some(snapshot) = self.redo_stack.pop() else {
            return false;
        };
        self.undo_stack.push(history.snapshot());
        history.restore(&snapshot);
        debug!(rows = history.len(), redo_depth = self.redo_stack.len(), "redo");
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HistoryEntry;

    fn row(n: f64) -> HistoryEntry {
        HistoryEntry {
            operation: "add".to_string(),
            a: n,
            b: 0.0,
            result: n,
        }
    }

    fn push(undo: &mut UndoRedo, history: &mut HistoryStore, n: f64) {
        undo.before_mutation(history);
        history.add(row(n));
    }

    #[test]
    fn test_empty_stacks() {
        let mut undo = UndoRedo::new();
        let mut history = HistoryStore::new();
        assert!(!undo.undo(&mut history));
        assert!(!undo.redo(&mut history));
        assert!(history.is_empty());
    }

    #[test]
    fn test_undo_then_redo() {
        let mut undo = UndoRedo::new();
        let mut history = HistoryStore::new();
        push(&mut undo, &mut history, 1.0);
        push(&mut undo, &mut history, 2.0);

        assert!(undo.undo(&mut history));
        assert_eq!(history.len(), 1);
        assert!(undo.undo(&mut history));
        assert!(history.is_empty());
        assert!(!undo.can_undo());

        assert!(undo.redo(&mut history));
        assert_eq!(history.all(), vec![row(1.0)]);
        assert!(undo.redo(&mut history));
        assert_eq!(history.all(), vec![row(1.0), row(2.0)]);
        assert!(!undo.can_redo());
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut undo = UndoRedo::new();
        let mut history = HistoryStore::new();
        push(&mut undo, &mut history, 1.0);
        push(&mut undo, &mut history, 2.0);
        assert!(undo.undo(&mut history));
        assert_eq!(undo.redo_len(), 1);

        push(&mut undo, &mut history, 3.0);
        assert_eq!(undo.redo_len(), 0);
        assert!(!undo.redo(&mut history));
        assert_eq!(history.all(), vec![row(1.0), row(3.0)]);
    }

    #[test]
    fn test_undo_clear() {
        let mut undo = UndoRedo::new();
        let mut history = HistoryStore::new();
        push(&mut undo, &mut history, 1.0);

        undo.before_mutation(&history);
        history.clear();

        assert!(undo.undo(&mut history));
        assert_eq!(history.all(), vec![row(1.0)]);
    }
}
