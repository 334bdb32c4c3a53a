//! Bounded action history: only the two most recent actions are undoable.

use cull_core::{MediaItem, ReviewAction};
use std::collections::VecDeque;
use time::OffsetDateTime;

/// Number of entries retained; pushing beyond this evicts the oldest.
pub const UNDO_CAPACITY: usize = 2;

/// One confirmed action, as recorded for undo.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionLogEntry {
    pub action: ReviewAction,
    pub item: MediaItem,
    /// Cursor position at the time of the action.
    pub cursor: usize,
    pub timestamp: OffsetDateTime,
}

#[derive(Debug, Default)]
pub struct UndoStack {
    entries: VecDeque<ActionLogEntry>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, evicting the oldest when at capacity (FIFO).
    pub fn push(&mut self, entry: ActionLogEntry) {
        if self.entries.len() == UNDO_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Remove and return the most recent entry.
    pub fn pop_last(&mut self) -> Option<ActionLogEntry> {
        self.entries.pop_back()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, cursor: usize) -> ActionLogEntry {
        ActionLogEntry {
            action: ReviewAction::Keep,
            item: MediaItem {
                id: id.to_string(),
                created_at: None,
                favorite: false,
                location: None,
            },
            cursor,
            timestamp: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn third_push_evicts_the_first() {
        let mut stack = UndoStack::new();
        stack.push(entry("A", 0));
        stack.push(entry("B", 1));
        stack.push(entry("C", 2));

        assert_eq!(stack.len(), 2);
        assert_eq!(stack.pop_last().unwrap().item.id, "C");
        assert_eq!(stack.pop_last().unwrap().item.id, "B");
        assert_eq!(stack.pop_last(), None);
    }

    #[test]
    fn never_exceeds_capacity() {
        let mut stack = UndoStack::new();
        for n in 0..10 {
            stack.push(entry(&format!("p{n}"), n));
            assert!(stack.len() <= UNDO_CAPACITY);
        }
        assert_eq!(stack.pop_last().unwrap().item.id, "p9");
        assert_eq!(stack.pop_last().unwrap().item.id, "p8");
        assert!(stack.is_empty());
    }

    #[test]
    fn pop_on_empty_signals_none() {
        let mut stack = UndoStack::new();
        assert!(stack.is_empty());
        assert_eq!(stack.pop_last(), None);
    }
}
