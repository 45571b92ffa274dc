//! History entries and the per-action metadata they carry.

use galaxy_core::{Document, SystemKey};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Tags entries that undo as one logical step (e.g. every step of one drag).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionGroupId(pub Uuid);

impl ActionGroupId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ActionGroupId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActionGroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What kind of edit an entry records, and the selections needed to invert it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionMeta {
    /// Anything that changes the map. `selected_keys` is the selection to
    /// restore when this entry is applied, if one was recorded.
    Structural {
        #[serde(default)]
        selected_keys: Option<Vec<SystemKey>>,
    },
    /// Only the selection changed; the map stays untouched on undo/redo.
    SelectionChange {
        prev_keys: Vec<SystemKey>,
        new_keys: Vec<SystemKey>,
    },
    /// Systems were moved. Undo restores `prev_keys`, redo restores `selected_keys`.
    Drag {
        prev_keys: Vec<SystemKey>,
        selected_keys: Vec<SystemKey>,
    },
}

impl Default for ActionMeta {
    fn default() -> Self {
        Self::structural()
    }
}

impl ActionMeta {
    pub fn structural() -> Self {
        ActionMeta::Structural {
            selected_keys: None,
        }
    }

    pub fn structural_with(selected: &[SystemKey]) -> Self {
        ActionMeta::Structural {
            selected_keys: Some(selected.to_vec()),
        }
    }

    pub fn is_selection_only(&self) -> bool {
        matches!(self, ActionMeta::SelectionChange { .. })
    }

    /// Selection to restore when this entry is undone. `None` keeps the current one.
    pub fn undo_selection(&self) -> Option<&[SystemKey]> {
        match self {
            ActionMeta::Structural { selected_keys } => selected_keys.as_deref(),
            ActionMeta::SelectionChange { prev_keys, .. } => Some(prev_keys),
            ActionMeta::Drag { prev_keys, .. } => Some(prev_keys),
        }
    }

    /// Selection to restore when this entry is redone. `None` keeps the current one.
    pub fn redo_selection(&self) -> Option<&[SystemKey]> {
        match self {
            ActionMeta::Structural { selected_keys } => selected_keys.as_deref(),
            ActionMeta::SelectionChange { new_keys, .. } => Some(new_keys),
            ActionMeta::Drag { selected_keys, .. } => Some(selected_keys),
        }
    }

    /// Metadata for the redo entry pushed while undoing this one.
    /// `current` is the selection just before the undo.
    pub fn for_redo(&self, current: Vec<SystemKey>) -> Self {
        match self {
            ActionMeta::Structural { .. } => ActionMeta::Structural {
                selected_keys: Some(current),
            },
            ActionMeta::SelectionChange { prev_keys, .. } => ActionMeta::SelectionChange {
                prev_keys: prev_keys.clone(),
                new_keys: current,
            },
            ActionMeta::Drag { prev_keys, .. } => ActionMeta::Drag {
                prev_keys: prev_keys.clone(),
                selected_keys: current,
            },
        }
    }

    /// Metadata for the history entry pushed while redoing this one.
    /// `current` is the selection just before the redo.
    pub fn for_undo(&self, current: Vec<SystemKey>) -> Self {
        match self {
            ActionMeta::Structural { .. } => ActionMeta::Structural {
                selected_keys: Some(current),
            },
            ActionMeta::SelectionChange { new_keys, .. } => ActionMeta::SelectionChange {
                prev_keys: current,
                new_keys: new_keys.clone(),
            },
            ActionMeta::Drag { selected_keys, .. } => ActionMeta::Drag {
                prev_keys: current,
                selected_keys: selected_keys.clone(),
            },
        }
    }
}

/// One undoable step. Never mutated after it is pushed onto a stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub description: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub action_group: ActionGroupId,
    pub state: Document,
    pub meta: ActionMeta,
}

impl HistoryEntry {
    pub fn new(
        description: impl Into<String>,
        action_group: ActionGroupId,
        state: Document,
        meta: ActionMeta,
    ) -> Self {
        Self {
            description: description.into(),
            timestamp: now_millis(),
            action_group,
            state,
            meta,
        }
    }

    /// Same label, timestamp and group, holding a different state.
    pub fn relabel(&self, state: Document, meta: ActionMeta) -> Self {
        Self {
            description: self.description.clone(),
            timestamp: self.timestamp,
            action_group: self.action_group,
            state,
            meta,
        }
    }
}

pub(crate) fn now_millis() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}
