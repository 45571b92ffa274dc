// Undo/redo stacks for the map editor.

use std::collections::VecDeque;
use tracing::{debug, trace};

use crate::{ActionGroupId, HistoryConfig, HistoryEntry};

/// The two history stacks plus the current action-group marker.
///
/// The live map is never stored here, only states the user can step back or
/// forward to.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    history: VecDeque<HistoryEntry>,
    redo: Vec<HistoryEntry>,
    max_history: usize,
    current_group: Option<ActionGroupId>,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(&HistoryConfig::default())
    }
}

impl HistoryManager {
    pub fn new(config: &HistoryConfig) -> Self {
        let max_history = config.max_history.max(1);
        Self {
            history: VecDeque::with_capacity(max_history),
            redo: Vec::new(),
            max_history,
            current_group: None,
        }
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }

    /// Pick the group id for a new entry and remember it as current.
    pub fn next_group(&mut self, group_with_previous: bool) -> ActionGroupId {
        let group = match (group_with_previous, self.current_group) {
            (true, Some(group)) => group,
            _ => ActionGroupId::new(),
        };
        self.current_group = Some(group);
        group
    }

    pub fn current_group(&self) -> Option<ActionGroupId> {
        self.current_group
    }

    /// Push onto the undo stack, evicting the oldest entry when full.
    /// Returns the evicted entry, if any.
    pub fn push_history(&mut self, entry: HistoryEntry) -> Option<HistoryEntry> {
        let evicted = if self.history.len() >= self.max_history {
            self.history.pop_front()
        } else {
            None
        };
        if let Some(old) = &evicted {
            debug!(description = %old.description, "history full, evicted oldest entry");
        }
        trace!(description = %entry.description, group = %entry.action_group, "push history");
        self.history.push_back(entry);
        evicted
    }

    /// Put an entry that was just popped back on top, bypassing eviction.
    pub(crate) fn return_to_history(&mut self, entry: HistoryEntry) {
        self.history.push_back(entry);
    }

    pub fn pop_history(&mut self) -> Option<HistoryEntry> {
        self.history.pop_back()
    }

    pub fn push_redo(&mut self, entry: HistoryEntry) {
        trace!(description = %entry.description, "push redo");
        self.redo.push(entry);
    }

    pub fn pop_redo(&mut self) -> Option<HistoryEntry> {
        self.redo.pop()
    }

    pub fn clear_redo(&mut self) {
        if !self.redo.is_empty() {
            debug!(dropped = self.redo.len(), "new action invalidates redo stack");
            self.redo.clear();
        }
    }

    /// Drop both stacks and the group marker.
    pub fn clear(&mut self) {
        self.history.clear();
        self.redo.clear();
        self.current_group = None;
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn peek_history(&self) -> Option<&HistoryEntry> {
        self.history.back()
    }

    pub fn peek_redo(&self) -> Option<&HistoryEntry> {
        self.redo.last()
    }

    /// Undo stack, oldest first.
    pub fn history_entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    /// Redo stack, next-to-redo last.
    pub fn redo_entries(&self) -> impl DoubleEndedIterator<Item = &HistoryEntry> {
        self.redo.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ActionMeta;
    use galaxy_core::Document;

    fn entry(description: &str, group: ActionGroupId) -> HistoryEntry {
        HistoryEntry::new(description, group, Document::new(), ActionMeta::structural())
    }

    #[test]
    fn test_eviction_is_fifo() {
        let mut stack = HistoryManager::new(&HistoryConfig { max_history: 3 });
        for i in 0..5 {
            let group = stack.next_group(false);
            stack.push_history(entry(&format!("step {i}"), group));
        }

        let descriptions: Vec<_> = stack
            .history_entries()
            .map(|e| e.description.as_str())
            .collect();
        assert_eq!(descriptions, vec!["step 2", "step 3", "step 4"]);
    }

    #[test]
    fn test_grouped_reuses_marker() {
        let mut stack = HistoryManager::default();
        let first = stack.next_group(false);
        assert_eq!(stack.next_group(true), first);
        assert_ne!(stack.next_group(false), first);
    }

    #[test]
    fn test_grouped_without_marker_mints_one() {
        let mut stack = HistoryManager::default();
        let group = stack.next_group(true);
        assert_eq!(stack.current_group(), Some(group));
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut stack = HistoryManager::default();
        let group = stack.next_group(false);
        stack.push_history(entry("a", group));
        stack.push_redo(entry("b", group));
        stack.clear();

        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
        assert_eq!(stack.current_group(), None);
    }
}
