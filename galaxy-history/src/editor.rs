//! The map editor's document controller.
//!
//! `MapEditor` is the sole owner and writer of the live map. Every public
//! operation leaves the map, its lookup index and the selection consistent with
//! each other before any observer is notified.

use galaxy_core::{
    validate_snapshot, CloneSnapshotter, Document, LookupIndex, MapFile, Region, Snapshotter,
    StarSystem, SystemKey,
};
use tracing::{debug, error, info, warn};

use crate::{
    ActionMeta, EditorConfig, EditorEvent, EditorObserver, HistoryEntry, HistoryError,
    HistoryManager, InteractionState, Selection, ViewTransform,
};

pub struct MapEditor {
    pub(crate) document: Document,
    pub(crate) lookup: LookupIndex,
    pub(crate) selection: Selection,
    pub(crate) regions: Vec<Region>,
    /// Regions dropped when undo reached the initial state; redo brings them back.
    collapsed_regions: Vec<Region>,
    pub(crate) history: HistoryManager,
    pub(crate) interaction: InteractionState,
    pub(crate) view: ViewTransform,
    default_view: ViewTransform,
    pub(crate) clipboard: Vec<StarSystem>,
    filename: Option<String>,
    pub(crate) modified: bool,
    snapshotter: Box<dyn Snapshotter>,
    observers: Vec<Box<dyn EditorObserver>>,
}

impl Default for MapEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl MapEditor {
    /// Build an editor from already-checked settings. A `max_history` of 0 is
    /// treated as 1; use [`MapEditor::try_new`] to reject bad settings instead.
    pub fn new(config: EditorConfig) -> Self {
        debug!(
            max_history = config.history.max_history,
            "creating map editor"
        );
        Self {
            document: Document::new(),
            lookup: LookupIndex::default(),
            selection: Selection::default(),
            regions: Vec::new(),
            collapsed_regions: Vec::new(),
            history: HistoryManager::new(&config.history),
            interaction: InteractionState::default(),
            view: config.view,
            default_view: config.view,
            clipboard: Vec::new(),
            filename: None,
            modified: false,
            snapshotter: Box::new(CloneSnapshotter),
            observers: Vec::new(),
        }
    }

    /// Validate `config` and build an editor from it.
    pub fn try_new(config: EditorConfig) -> Result<Self, HistoryError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Use a different deep-copy strategy for snapshots.
    pub fn with_snapshotter(mut self, snapshotter: Box<dyn Snapshotter>) -> Self {
        debug!(snapshotter = snapshotter.name(), "snapshotter configured");
        self.snapshotter = snapshotter;
        self
    }

    pub fn subscribe(&mut self, observer: Box<dyn EditorObserver>) {
        self.observers.push(observer);
    }

    pub(crate) fn emit(&mut self, event: EditorEvent) {
        for observer in self.observers.iter_mut() {
            observer.notify(&event);
        }
    }

    // --- read access ---

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn lookup(&self) -> &LookupIndex {
        &self.lookup
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_systems(&self) -> Vec<&StarSystem> {
        self.selection.systems(&self.document, &self.lookup)
    }

    pub fn system(&self, key: &SystemKey) -> Option<&StarSystem> {
        self.lookup.resolve(&self.document, key)
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn view(&self) -> ViewTransform {
        self.view
    }

    pub fn clipboard(&self) -> &[StarSystem] {
        &self.clipboard
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Current map plus regions, ready to be written to disk.
    pub fn to_map_file(&self) -> MapFile {
        MapFile {
            systems: self.document.clone(),
            regions: self.regions.clone(),
        }
    }

    // --- history ---

    /// Record the current map as an undoable step.
    ///
    /// Call before mutating the map. Returns `Ok(false)` without recording when
    /// the map is empty and `force_empty` is false. Nothing changes when the
    /// snapshot cannot be taken.
    pub fn save_state(
        &mut self,
        description: impl Into<String>,
        group_with_previous: bool,
        force_empty: bool,
        meta: ActionMeta,
    ) -> Result<bool, HistoryError> {
        let description = description.into();

        if self.document.is_empty() && !force_empty {
            debug!(description = %description, "map is empty, not recording history");
            return Ok(false);
        }

        let state = self.snapshotter.copy(&self.document).map_err(|e| {
            error!(description = %description, error = %e, "failed to capture map state");
            HistoryError::CaptureFailed(e)
        })?;

        if !group_with_previous {
            self.history.clear_redo();
            self.collapsed_regions.clear();
        }
        let action_group = self.history.next_group(group_with_previous);
        self.history.push_history(HistoryEntry::new(
            description.clone(),
            action_group,
            state,
            meta,
        ));
        self.modified = true;

        debug!(
            description = %description,
            group = %action_group,
            grouped = group_with_previous,
            depth = self.history.history_len(),
            "state saved"
        );

        let event = EditorEvent::StateSaved {
            description,
            action_group,
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        };
        self.emit(event);
        Ok(true)
    }

    /// Step back one entry. Returns `Ok(false)` when there is nothing to undo.
    pub fn undo(&mut self) -> Result<bool, HistoryError> {
        let Some(entry) = self.history.pop_history() else {
            debug!("nothing to undo");
            return Ok(false);
        };

        let current_keys = self.selection.keys().to_vec();
        let current = match self.snapshotter.copy(&self.document) {
            Ok(copy) => copy,
            Err(e) => {
                error!(description = %entry.description, error = %e, "undo aborted, could not capture current map");
                self.history.return_to_history(entry);
                return Err(HistoryError::CaptureFailed(e));
            }
        };

        if !entry.meta.is_selection_only() {
            if let Err(source) = validate_snapshot(&entry.state) {
                error!(description = %entry.description, error = %source, "undo aborted, corrupt snapshot");
                let description = entry.description.clone();
                self.history.return_to_history(entry);
                return Err(HistoryError::CorruptSnapshot {
                    description,
                    source,
                });
            }
        }

        let redo_meta = entry.meta.for_redo(current_keys.clone());
        self.history.push_redo(entry.relabel(current, redo_meta));

        let HistoryEntry {
            description,
            state,
            meta,
            ..
        } = entry;

        if let ActionMeta::SelectionChange { prev_keys, .. } = &meta {
            self.selection.restore(prev_keys, &self.lookup);
            info!(description = %description, selected = self.selection.len(), "undo selection");
            self.emit_selection_changed();
            self.emit_undone(description);
            return Ok(true);
        }

        let interaction_reset = self.restore_document(state);
        let keys = meta.undo_selection().unwrap_or(current_keys.as_slice());
        self.selection.restore(keys, &self.lookup);

        let collapsed = !self.history.can_undo();
        if collapsed {
            info!("reached initial state");
            self.reset_to_initial_state();
        }
        self.modified = true;

        info!(
            description = %description,
            systems = self.document.len(),
            selected = self.selection.len(),
            "undo"
        );
        if interaction_reset {
            self.emit(EditorEvent::InteractionReset);
        }
        if collapsed && !self.collapsed_regions.is_empty() {
            self.emit_regions_changed();
        }
        self.emit_selection_changed();
        self.emit_undone(description);
        Ok(true)
    }

    /// Step forward one entry. Returns `Ok(false)` when there is nothing to redo.
    pub fn redo(&mut self) -> Result<bool, HistoryError> {
        let Some(entry) = self.history.pop_redo() else {
            debug!("nothing to redo");
            return Ok(false);
        };

        let current_keys = self.selection.keys().to_vec();
        let current = match self.snapshotter.copy(&self.document) {
            Ok(copy) => copy,
            Err(e) => {
                error!(description = %entry.description, error = %e, "redo aborted, could not capture current map");
                self.history.push_redo(entry);
                return Err(HistoryError::CaptureFailed(e));
            }
        };

        // Checked before touching the undo stack so a bad entry can't evict a good one.
        if !entry.meta.is_selection_only() {
            if let Err(source) = validate_snapshot(&entry.state) {
                error!(description = %entry.description, error = %source, "redo aborted, corrupt snapshot");
                let description = entry.description.clone();
                self.history.push_redo(entry);
                return Err(HistoryError::CorruptSnapshot {
                    description,
                    source,
                });
            }
        }

        let leaving_initial = !self.history.can_undo();
        let undo_meta = entry.meta.for_undo(current_keys.clone());
        self.history.push_history(entry.relabel(current, undo_meta));

        let HistoryEntry {
            description,
            state,
            meta,
            ..
        } = entry;

        if let ActionMeta::SelectionChange { new_keys, .. } = &meta {
            self.selection.restore(new_keys, &self.lookup);
            info!(description = %description, selected = self.selection.len(), "redo selection");
            self.emit_selection_changed();
            self.emit_redone(description);
            return Ok(true);
        }

        let interaction_reset = self.restore_document(state);
        let keys = meta.redo_selection().unwrap_or(current_keys.as_slice());
        self.selection.restore(keys, &self.lookup);
        let regions_restored = leaving_initial && self.restore_collapsed_regions();
        self.modified = true;

        info!(
            description = %description,
            systems = self.document.len(),
            selected = self.selection.len(),
            "redo"
        );
        if interaction_reset {
            self.emit(EditorEvent::InteractionReset);
        }
        if regions_restored {
            self.emit_regions_changed();
        }
        self.emit_selection_changed();
        self.emit_redone(description);
        Ok(true)
    }

    /// Undo every entry on top of the stack that shares one action group.
    /// Returns how many entries were undone.
    pub fn undo_action_group(&mut self) -> Result<usize, HistoryError> {
        let Some(group) = self.history.peek_history().map(|e| e.action_group) else {
            return Ok(0);
        };
        let mut steps = 0;
        while self.history.peek_history().map(|e| e.action_group) == Some(group) {
            if !self.undo()? {
                break;
            }
            steps += 1;
        }
        debug!(group = %group, steps, "undid action group");
        Ok(steps)
    }

    /// Redo every entry on top of the redo stack that shares one action group.
    pub fn redo_action_group(&mut self) -> Result<usize, HistoryError> {
        let Some(group) = self.history.peek_redo().map(|e| e.action_group) else {
            return Ok(0);
        };
        let mut steps = 0;
        while self.history.peek_redo().map(|e| e.action_group) == Some(group) {
            if !self.redo()? {
                break;
            }
            steps += 1;
        }
        debug!(group = %group, steps, "redid action group");
        Ok(steps)
    }

    /// Reset everything: map, index, selection, regions, both stacks, group
    /// marker, filename, modified flag, clipboard, pointer state and view.
    pub fn clear_map_data(&mut self) {
        self.document.clear();
        self.lookup.clear();
        self.selection.clear();
        self.regions.clear();
        self.collapsed_regions.clear();
        self.history.clear();
        self.clipboard.clear();
        self.interaction.reset();
        self.view = self.default_view;
        self.filename = None;
        self.modified = false;

        info!("map data cleared");
        self.emit(EditorEvent::Cleared);
    }

    /// Replace the current map with a freshly loaded one and record it as the
    /// base history entry.
    pub fn load_map(&mut self, map: MapFile, filename: Option<String>) -> Result<(), HistoryError> {
        validate_snapshot(&map.systems).map_err(|e| {
            warn!(error = %e, "refusing to load invalid map");
            HistoryError::InvalidMap(e)
        })?;

        self.clear_map_data();
        self.document.replace_contents(map.systems);
        self.regions = map.regions;
        self.lookup = LookupIndex::rebuild(&self.document);
        self.save_state("Load map", false, true, ActionMeta::structural())?;
        self.filename = filename;
        self.modified = false;

        info!(
            filename = self.filename.as_deref().unwrap_or("<untitled>"),
            systems = self.document.len(),
            regions = self.regions.len(),
            "map loaded into editor"
        );
        Ok(())
    }

    /// Mark the current map as written to `filename`.
    pub fn mark_saved(&mut self, filename: impl Into<String>) {
        self.filename = Some(filename.into());
        self.modified = false;
    }

    // --- internals ---

    /// Swap the live map for `state` in place and rebuild everything derived from it.
    /// Returns true when pointer state had to be dropped.
    fn restore_document(&mut self, state: Document) -> bool {
        self.document.replace_contents(state);
        self.lookup = LookupIndex::rebuild(&self.document);
        if self.interaction.is_idle() {
            return false;
        }
        self.interaction.reset();
        true
    }

    pub(crate) fn rebuild_lookup(&mut self) {
        self.lookup = LookupIndex::rebuild(&self.document);
    }

    fn reset_to_initial_state(&mut self) {
        self.document.clear();
        self.lookup.clear();
        self.selection.clear();
        self.collapsed_regions = std::mem::take(&mut self.regions);
    }

    /// Reinstate regions dropped by the last collapse. Regions defined since
    /// then win on a name clash.
    fn restore_collapsed_regions(&mut self) -> bool {
        if self.collapsed_regions.is_empty() {
            return false;
        }
        for region in std::mem::take(&mut self.collapsed_regions) {
            if !self.regions.iter().any(|r| r.name == region.name) {
                self.regions.push(region);
            }
        }
        debug!(regions = self.regions.len(), "regions restored");
        true
    }

    pub(crate) fn emit_regions_changed(&mut self) {
        let regions = self.regions.len();
        self.emit(EditorEvent::RegionsChanged { regions });
    }

    pub(crate) fn emit_selection_changed(&mut self) {
        let selected = self.selection.len();
        self.emit(EditorEvent::SelectionChanged { selected });
    }

    fn emit_undone(&mut self, description: String) {
        let event = EditorEvent::Undone {
            description,
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        };
        self.emit(event);
    }

    fn emit_redone(&mut self, description: String) {
        let event = EditorEvent::Redone {
            description,
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        };
        self.emit(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HistoryConfig;
    use galaxy_core::{CoreError, JsonSnapshotter};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn system(key: &str, x: f64) -> StarSystem {
        StarSystem::new(key, key.to_uppercase(), x, 0.0)
    }

    fn loaded(keys: &[&str]) -> MapEditor {
        let mut editor = MapEditor::default();
        let systems = keys
            .iter()
            .enumerate()
            .map(|(i, k)| system(k, i as f64))
            .collect();
        editor
            .load_map(
                MapFile {
                    systems: Document::from_systems(systems),
                    regions: vec![],
                },
                Some("test.galaxy.json".into()),
            )
            .unwrap();
        editor
    }

    struct FailingSnapshotter;

    impl Snapshotter for FailingSnapshotter {
        fn copy(&self, _doc: &Document) -> Result<Document, CoreError> {
            Err(CoreError::CopyFailed("out of memory".into()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[test]
    fn test_save_on_empty_map_is_noop() {
        let mut editor = MapEditor::default();
        assert!(!editor
            .save_state("nothing", false, false, ActionMeta::structural())
            .unwrap());
        assert!(!editor.can_undo());
        assert!(!editor.is_modified());
    }

    #[test]
    fn test_force_empty_records() {
        let mut editor = MapEditor::default();
        assert!(editor
            .save_state("blank", false, true, ActionMeta::structural())
            .unwrap());
        assert_eq!(editor.history().history_len(), 1);
        assert!(editor.is_modified());
    }

    #[test]
    fn test_load_map_records_base_entry() {
        let editor = loaded(&["a", "b"]);
        assert_eq!(editor.history().history_len(), 1);
        assert_eq!(editor.history().peek_history().unwrap().description, "Load map");
        assert!(!editor.is_modified());
        assert_eq!(editor.filename(), Some("test.galaxy.json"));
    }

    #[test]
    fn test_capture_failure_leaves_stacks_untouched() {
        let mut editor = loaded(&["a"]);
        editor.save_state("edit", false, false, ActionMeta::structural()).unwrap();
        editor.undo().unwrap();
        let redo_before = editor.history().redo_len();
        let history_before = editor.history().history_len();
        let group_before = editor.history().current_group();

        let mut editor = editor.with_snapshotter(Box::new(FailingSnapshotter));
        let err = editor
            .save_state("fails", false, false, ActionMeta::structural())
            .unwrap_err();

        assert!(matches!(err, HistoryError::CaptureFailed(_)));
        assert_eq!(editor.history().redo_len(), redo_before);
        assert_eq!(editor.history().history_len(), history_before);
        assert_eq!(editor.history().current_group(), group_before);
    }

    #[test]
    fn test_undo_capture_failure_keeps_entry() {
        let editor = loaded(&["a"]);
        let mut editor = editor.with_snapshotter(Box::new(FailingSnapshotter));

        assert!(editor.undo().is_err());
        assert_eq!(editor.history().history_len(), 1);
        assert_eq!(editor.history().redo_len(), 0);
        assert_eq!(editor.document().len(), 1);
    }

    #[test]
    fn test_json_snapshotter_rejects_nan_positions() {
        let mut editor = loaded(&["a"]).with_snapshotter(Box::new(JsonSnapshotter));
        editor.document.get_mut(0).unwrap().x = f64::NAN;

        assert!(editor
            .save_state("bad", false, false, ActionMeta::structural())
            .is_err());
        assert_eq!(editor.history().history_len(), 1);
    }

    #[test]
    fn test_corrupt_snapshot_restores_stacks() {
        let mut editor = loaded(&["a", "b"]);
        editor.save_state("edit", false, false, ActionMeta::structural()).unwrap();

        // Smuggle a duplicate key into the stored snapshot.
        let mut entry = editor.history.pop_history().unwrap();
        entry.state.push(system("a", 9.0));
        editor.history.push_history(entry);

        let err = editor.undo().unwrap_err();
        assert!(matches!(err, HistoryError::CorruptSnapshot { .. }));
        assert_eq!(editor.history().history_len(), 2);
        assert_eq!(editor.history().redo_len(), 0);
        assert_eq!(editor.document().len(), 2);
        assert!(editor.lookup().is_consistent_with(editor.document()));
    }

    #[test]
    fn test_undo_past_bottom_collapses_to_empty() {
        let mut editor = loaded(&["a", "b"]);
        editor.regions.push(Region {
            name: "core".into(),
            color: [1.0, 0.0, 0.0],
            systems: vec!["a".into()],
        });

        assert!(editor.undo().unwrap());
        assert!(editor.document().is_empty());
        assert!(editor.lookup().is_empty());
        assert!(editor.regions().is_empty());
        assert_eq!(editor.history().redo_len(), 1);

        // Redo brings the loaded map back.
        assert!(editor.redo().unwrap());
        assert_eq!(editor.document().len(), 2);
        assert!(editor.lookup().is_consistent_with(editor.document()));
    }

    #[test]
    fn test_empty_stacks_are_noops() {
        let mut editor = MapEditor::default();
        assert!(!editor.undo().unwrap());
        assert!(!editor.redo().unwrap());
    }

    #[test]
    fn test_undo_resets_interaction() {
        let mut editor = loaded(&["a", "b"]);
        editor.save_state("edit", false, false, ActionMeta::structural()).unwrap();
        editor.interaction.hovered = Some("a".into());
        editor.interaction.is_panning = true;

        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        editor.subscribe(Box::new(move |e: &EditorEvent| sink.borrow_mut().push(e.clone())));

        editor.undo().unwrap();

        assert!(editor.interaction().is_idle());
        assert!(events.borrow().contains(&EditorEvent::InteractionReset));
    }

    #[test]
    fn test_events_report_button_state() {
        let mut editor = loaded(&["a"]);
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        editor.subscribe(Box::new(move |e: &EditorEvent| sink.borrow_mut().push(e.clone())));

        editor.save_state("edit", false, false, ActionMeta::structural()).unwrap();
        editor.undo().unwrap();

        let events = events.borrow();
        assert!(matches!(
            events.first(),
            Some(EditorEvent::StateSaved { can_undo: true, can_redo: false, .. })
        ));
        assert!(matches!(
            events.last(),
            Some(EditorEvent::Undone { can_undo: true, can_redo: true, .. })
        ));
    }

    #[test]
    fn test_clear_map_data_resets_everything() {
        let mut editor = loaded(&["a", "b"]);
        editor.save_state("edit", false, false, ActionMeta::structural()).unwrap();
        editor.undo().unwrap();
        editor.view.scale = 3.0;
        editor.clipboard.push(system("c", 0.0));

        editor.clear_map_data();

        assert!(editor.document().is_empty());
        assert!(editor.lookup().is_empty());
        assert!(editor.selection().is_empty());
        assert!(!editor.can_undo());
        assert!(!editor.can_redo());
        assert_eq!(editor.history().current_group(), None);
        assert_eq!(editor.view(), ViewTransform::default());
        assert!(editor.clipboard().is_empty());
        assert_eq!(editor.filename(), None);
        assert!(!editor.is_modified());
    }

    #[test]
    fn test_load_invalid_map_keeps_current() {
        let mut editor = loaded(&["a"]);
        let bad = MapFile {
            systems: Document::from_systems(vec![system("x", 0.0), system("x", 1.0)]),
            regions: vec![],
        };

        assert!(matches!(
            editor.load_map(bad, None),
            Err(HistoryError::InvalidMap(_))
        ));
        assert_eq!(editor.document().len(), 1);
        assert_eq!(editor.history().history_len(), 1);
    }

    #[test]
    fn test_redo_after_collapse_brings_regions_back() {
        let mut editor = MapEditor::default();
        let map = MapFile {
            systems: Document::from_systems(vec![system("a", 0.0), system("b", 1.0)]),
            regions: vec![Region {
                name: "core".into(),
                color: [1.0, 0.0, 0.0],
                systems: vec!["a".into()],
            }],
        };
        editor.load_map(map.clone(), None).unwrap();

        editor.undo().unwrap();
        assert!(editor.regions().is_empty());

        editor.redo().unwrap();
        assert_eq!(editor.regions(), map.regions.as_slice());
        assert_eq!(editor.document(), &map.systems);
    }

    #[test]
    fn test_new_edit_after_collapse_forgets_regions() {
        let mut editor = loaded(&["a"]);
        editor.regions.push(Region {
            name: "core".into(),
            color: [1.0, 0.0, 0.0],
            systems: vec!["a".into()],
        });
        editor.undo().unwrap();

        editor.add_system(system("z", 0.0)).unwrap();
        assert!(!editor.can_redo());
        assert!(editor.regions().is_empty());
    }

    #[test]
    fn test_corrupt_redo_entry_at_capacity_keeps_stacks() {
        let mut editor = MapEditor::new(EditorConfig {
            history: HistoryConfig { max_history: 3 },
            ..Default::default()
        });
        editor
            .load_map(
                MapFile {
                    systems: Document::from_systems(vec![system("a", 0.0), system("b", 1.0)]),
                    regions: vec![],
                },
                None,
            )
            .unwrap();
        for i in 0..3 {
            editor
                .save_state(format!("edit {i}"), false, false, ActionMeta::structural())
                .unwrap();
        }
        editor.undo().unwrap();
        // Grouped saves keep the redo stack, filling history back to capacity.
        editor.save_state("more", true, false, ActionMeta::structural()).unwrap();
        assert_eq!(editor.history().history_len(), 3);
        assert_eq!(editor.history().redo_len(), 1);

        let mut entry = editor.history.pop_redo().unwrap();
        entry.state.push(system("a", 9.0));
        editor.history.push_redo(entry);
        let doc = editor.document().clone();

        let err = editor.redo().unwrap_err();
        assert!(matches!(err, HistoryError::CorruptSnapshot { .. }));
        assert_eq!(editor.history().history_len(), 3);
        assert_eq!(editor.history().redo_len(), 1);
        assert_eq!(
            editor.history().history_entries().next().unwrap().description,
            "edit 0"
        );
        assert_eq!(editor.document(), &doc);
        assert!(editor.lookup().is_consistent_with(editor.document()));
    }

    #[test]
    fn test_try_new_rejects_bad_config() {
        let zero_history = EditorConfig {
            history: HistoryConfig { max_history: 0 },
            ..Default::default()
        };
        assert!(matches!(
            MapEditor::try_new(zero_history),
            Err(HistoryError::InvalidConfig { .. })
        ));

        let mut flat_view = EditorConfig::default();
        flat_view.view.scale = 0.0;
        assert!(MapEditor::try_new(flat_view).is_err());

        assert!(MapEditor::try_new(EditorConfig::default()).is_ok());
    }
}
