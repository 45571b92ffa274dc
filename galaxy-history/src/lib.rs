//! galaxy-history: snapshot-based undo/redo for the galaxy map editor.
//!
//! Design rules:
//! - One `MapEditor` owns the live map, its lookup index and the selection. No globals.
//! - Every history entry stores a full deep copy of the map. No diffing.
//! - Selection-only entries undo and redo without touching the map.
//! - The editor never calls into rendering code; it emits `EditorEvent`s instead.

use anyhow::Context;
use galaxy_core::{CoreError, SystemKey};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub mod editor;
pub mod entry;
pub mod events;
pub mod interaction;
pub mod ops;
pub mod selection;
pub mod stack;

pub use editor::MapEditor;
pub use entry::{ActionGroupId, ActionMeta, HistoryEntry};
pub use events::{EditorEvent, EditorObserver};
pub use interaction::{DragState, InteractionState, ViewTransform};
pub use selection::Selection;
pub use stack::HistoryManager;

/// Default number of undoable steps kept before the oldest is evicted.
pub const MAX_HISTORY: usize = 50;

fn default_max_history() -> usize {
    MAX_HISTORY
}

/// History stack settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_max_history")]
    pub max_history: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_history: MAX_HISTORY,
        }
    }
}

impl HistoryConfig {
    pub fn validate(&self) -> Result<(), HistoryError> {
        if self.max_history == 0 {
            tracing::error!("max_history must be at least 1");
            return Err(HistoryError::InvalidConfig {
                reason: "max_history must be at least 1".into(),
            });
        }
        Ok(())
    }
}

/// Editor-wide settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default)]
    pub history: HistoryConfig,

    /// View transform restored by `clear_map_data`.
    #[serde(default)]
    pub view: ViewTransform,
}

impl EditorConfig {
    pub fn validate(&self) -> Result<(), HistoryError> {
        self.history.validate()?;
        if !(self.view.scale.is_finite() && self.view.scale > 0.0) {
            tracing::error!(scale = self.view.scale, "view scale must be positive");
            return Err(HistoryError::InvalidConfig {
                reason: format!("view scale {} must be positive", self.view.scale),
            });
        }
        Ok(())
    }
}

/// Load editor settings from a JSON file. Missing fields fall back to defaults.
pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<EditorConfig> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config file: {}", path.display()))?;
    let config: EditorConfig = serde_json::from_str(&data).context("parse config json")?;
    config
        .validate()
        .with_context(|| format!("validate config file: {}", path.display()))?;
    Ok(config)
}

/// Errors surfaced by history and edit operations. None of them leave the map
/// in a partially updated state.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("could not capture map state: {0}")]
    CaptureFailed(#[source] CoreError),

    #[error("undo failed: entry '{description}' holds a corrupt snapshot")]
    CorruptSnapshot {
        description: String,
        #[source]
        source: CoreError,
    },

    #[error("invalid map: {0}")]
    InvalidMap(#[source] CoreError),

    #[error("unknown system: {key}")]
    UnknownSystem { key: SystemKey },

    #[error("duplicate system key: {key}")]
    DuplicateKey { key: SystemKey },

    #[error("no drag in progress")]
    NoDragInProgress,

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },
}
