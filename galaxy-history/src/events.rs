//! Change notifications for views bound to a `MapEditor`.

use crate::ActionGroupId;

/// What changed. Fired after the editor is back in a consistent state.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    StateSaved {
        description: String,
        action_group: ActionGroupId,
        can_undo: bool,
        can_redo: bool,
    },
    Undone {
        description: String,
        can_undo: bool,
        can_redo: bool,
    },
    Redone {
        description: String,
        can_undo: bool,
        can_redo: bool,
    },
    SelectionChanged {
        selected: usize,
    },
    RegionsChanged {
        regions: usize,
    },
    /// Hover, drag and linking state was dropped.
    InteractionReset,
    Cleared,
}

/// Receives editor events (button state, history panel, redraw requests).
pub trait EditorObserver {
    fn notify(&mut self, event: &EditorEvent);
}

impl<F> EditorObserver for F
where
    F: FnMut(&EditorEvent),
{
    fn notify(&mut self, event: &EditorEvent) {
        self(event)
    }
}
