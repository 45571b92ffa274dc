//! Edit scripts: a JSON list of editor actions replayed against a `MapEditor`.

use anyhow::Context;
use galaxy_core::{StarSystem, SystemKey};
use galaxy_history::MapEditor;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One scripted editor action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptStep {
    Select { keys: Vec<SystemKey> },
    Toggle { key: SystemKey },
    DeselectAll,
    Add { system: StarSystem },
    RemoveSelected,
    Rename { key: SystemKey, name: String },
    Link { a: SystemKey, b: SystemKey },
    /// A whole drag gesture: one grouped history step per delta.
    Drag { anchor: SystemKey, deltas: Vec<[f64; 2]> },
    Copy,
    Paste { dx: f64, dy: f64 },
    DefineRegion { name: String, color: [f32; 3] },
    RemoveRegion { name: String },
    Undo,
    Redo,
    UndoGroup,
    RedoGroup,
    Clear,
}

pub fn load_script(path: impl AsRef<Path>) -> anyhow::Result<Vec<ScriptStep>> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)
        .with_context(|| format!("read script file: {}", path.display()))?;
    let steps: Vec<ScriptStep> = serde_json::from_str(&data).context("parse script json")?;
    Ok(steps)
}

/// Apply every step in order, stopping at the first failure.
pub fn run_script(editor: &mut MapEditor, steps: &[ScriptStep]) -> anyhow::Result<()> {
    for (index, step) in steps.iter().enumerate() {
        tracing::debug!(index, step = ?step, "applying script step");
        apply(editor, step).with_context(|| format!("script step {index} ({step:?})"))?;
    }
    Ok(())
}

fn apply(editor: &mut MapEditor, step: &ScriptStep) -> anyhow::Result<()> {
    match step {
        ScriptStep::Select { keys } => {
            editor.select(keys)?;
        }
        ScriptStep::Toggle { key } => {
            editor.toggle_select(key)?;
        }
        ScriptStep::DeselectAll => {
            editor.deselect_all()?;
        }
        ScriptStep::Add { system } => editor.add_system(system.clone())?,
        ScriptStep::RemoveSelected => {
            editor.remove_selected()?;
        }
        ScriptStep::Rename { key, name } => editor.rename_system(key, name.clone())?,
        ScriptStep::Link { a, b } => {
            editor.link_systems(a, b)?;
        }
        ScriptStep::Drag { anchor, deltas } => {
            editor.begin_drag(anchor)?;
            for [dx, dy] in deltas {
                editor.drag_selected(*dx, *dy)?;
            }
            editor.end_drag();
        }
        ScriptStep::Copy => {
            editor.copy_selection();
        }
        ScriptStep::Paste { dx, dy } => {
            editor.paste(*dx, *dy)?;
        }
        ScriptStep::DefineRegion { name, color } => {
            editor.define_region(name.clone(), *color);
        }
        ScriptStep::RemoveRegion { name } => {
            editor.remove_region(name);
        }
        ScriptStep::Undo => {
            if !editor.undo()? {
                tracing::warn!("nothing to undo");
            }
        }
        ScriptStep::Redo => {
            if !editor.redo()? {
                tracing::warn!("nothing to redo");
            }
        }
        ScriptStep::UndoGroup => {
            editor.undo_action_group()?;
        }
        ScriptStep::RedoGroup => {
            editor.redo_action_group()?;
        }
        ScriptStep::Clear => editor.clear_map_data(),
    }
    Ok(())
}
