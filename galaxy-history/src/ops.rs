// Map edits that record history the way the editor's input handlers do.
//
// Each edit saves state *before* mutating, so undo returns to the pre-edit map.

use galaxy_core::{CoreError, Region, StarSystem, SystemKey};
use tracing::{debug, info, trace, warn};

use crate::{ActionMeta, DragState, HistoryError, MapEditor, ViewTransform};

impl MapEditor {
    fn require_known(&self, key: &SystemKey) -> Result<(), HistoryError> {
        if self.lookup.contains(key) {
            Ok(())
        } else {
            Err(HistoryError::UnknownSystem { key: key.clone() })
        }
    }

    fn describe(&self, keys: &[SystemKey]) -> String {
        keys.iter()
            .map(|k| {
                self.system(k)
                    .map(|s| s.name.clone())
                    .unwrap_or_else(|| k.to_string())
            })
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Record a selection-only change and apply it.
    fn change_selection(
        &mut self,
        new_keys: Vec<SystemKey>,
        description: String,
    ) -> Result<bool, HistoryError> {
        let prev_keys = self.selection.keys().to_vec();
        if prev_keys == new_keys {
            trace!("selection unchanged");
            return Ok(false);
        }
        self.save_state(
            description,
            false,
            false,
            ActionMeta::SelectionChange {
                prev_keys,
                new_keys: new_keys.clone(),
            },
        )?;
        self.selection.restore(&new_keys, &self.lookup);
        self.emit_selection_changed();
        Ok(true)
    }

    // --- selection ---

    /// Replace the selection. Unknown keys are ignored.
    pub fn select(&mut self, keys: &[SystemKey]) -> Result<bool, HistoryError> {
        let new_keys = self.lookup.retain_known(keys);
        if new_keys.is_empty() {
            return self.deselect_all();
        }
        let description = format!("Selected {}", self.describe(&new_keys));
        self.change_selection(new_keys, description)
    }

    /// Ctrl+click: add or remove one system from the selection.
    pub fn toggle_select(&mut self, key: &SystemKey) -> Result<bool, HistoryError> {
        self.require_known(key)?;
        let mut selection = self.selection.clone();
        let name = self.describe(std::slice::from_ref(key));
        let description = if selection.toggle(key.clone()) {
            format!("Selected {name}")
        } else {
            format!("Deselected {name}")
        };
        self.change_selection(selection.keys().to_vec(), description)
    }

    pub fn deselect_all(&mut self) -> Result<bool, HistoryError> {
        self.change_selection(Vec::new(), "Deselected all".to_string())
    }

    // --- structural edits ---

    pub fn add_system(&mut self, system: StarSystem) -> Result<(), HistoryError> {
        if system.key.is_empty() {
            return Err(HistoryError::InvalidMap(CoreError::EmptyKey {
                index: self.document.len(),
            }));
        }
        if self.lookup.contains(&system.key) {
            return Err(HistoryError::DuplicateKey { key: system.key });
        }
        if !system.has_finite_position() {
            return Err(HistoryError::InvalidMap(CoreError::NonFiniteCoordinate {
                key: system.key,
            }));
        }

        let selected = self.selection.keys().to_vec();
        self.save_state(
            format!("Added {}", system.name),
            false,
            true,
            ActionMeta::structural_with(&selected),
        )?;

        info!(key = %system.key, x = system.x, y = system.y, "system added");
        self.document.push(system);
        self.rebuild_lookup();
        Ok(())
    }

    /// Delete every selected system, its lanes and its region memberships.
    pub fn remove_selected(&mut self) -> Result<usize, HistoryError> {
        let keys = self.selection.keys().to_vec();
        if keys.is_empty() {
            return Ok(0);
        }

        let noun = if keys.len() == 1 { "system" } else { "systems" };
        self.save_state(
            format!("Deleted {} {noun}", keys.len()),
            false,
            false,
            ActionMeta::structural_with(&keys),
        )?;

        let removed = self.document.remove_keys(&keys);
        for region in self.regions.iter_mut() {
            region.systems.retain(|k| !keys.contains(k));
        }
        self.rebuild_lookup();
        self.selection.clear();

        info!(removed, "systems deleted");
        self.emit_selection_changed();
        Ok(removed)
    }

    pub fn rename_system(
        &mut self,
        key: &SystemKey,
        name: impl Into<String>,
    ) -> Result<(), HistoryError> {
        self.require_known(key)?;
        let name = name.into();
        let old = self.describe(std::slice::from_ref(key));
        let selected = self.selection.keys().to_vec();
        self.save_state(
            format!("Renamed {old} to {name}"),
            false,
            false,
            ActionMeta::structural_with(&selected),
        )?;

        if let Some(system) = self.lookup.resolve_mut(&mut self.document, key) {
            system.name = name;
        }
        Ok(())
    }

    /// Add a lane between two systems. Returns false when they are already linked.
    pub fn link_systems(&mut self, a: &SystemKey, b: &SystemKey) -> Result<bool, HistoryError> {
        self.require_known(a)?;
        self.require_known(b)?;
        if a == b || self.system(a).is_some_and(|s| s.is_linked_to(b)) {
            return Ok(false);
        }

        let selected = self.selection.keys().to_vec();
        let description = format!(
            "Linked {} to {}",
            self.describe(std::slice::from_ref(a)),
            self.describe(std::slice::from_ref(b))
        );
        self.save_state(
            description,
            false,
            false,
            ActionMeta::structural_with(&selected),
        )?;

        for (from, to) in [(a, b), (b, a)] {
            if let Some(system) = self.lookup.resolve_mut(&mut self.document, from) {
                if !system.is_linked_to(to) {
                    system.links.push(to.clone());
                }
            }
        }
        self.interaction.is_linking = false;
        self.interaction.link_source = None;
        Ok(true)
    }

    // --- dragging ---

    /// Start dragging from `anchor`. An unselected anchor becomes the only selection.
    pub fn begin_drag(&mut self, anchor: &SystemKey) -> Result<(), HistoryError> {
        self.require_known(anchor)?;
        let prev_keys = self.selection.keys().to_vec();
        if !self.selection.contains(anchor) {
            self.selection.restore(std::slice::from_ref(anchor), &self.lookup);
            self.emit_selection_changed();
        }
        self.interaction.drag = Some(DragState {
            anchor: anchor.clone(),
            prev_keys,
            steps: 0,
        });
        debug!(anchor = %anchor, "drag started");
        Ok(())
    }

    /// Move the selection by (dx, dy). Every step after the first is grouped
    /// with it so the whole drag undoes as one action group.
    pub fn drag_selected(&mut self, dx: f64, dy: f64) -> Result<(), HistoryError> {
        let (prev_keys, steps) = match &self.interaction.drag {
            Some(drag) => (drag.prev_keys.clone(), drag.steps),
            None => return Err(HistoryError::NoDragInProgress),
        };

        let selected = self.selection.keys().to_vec();
        for key in &selected {
            let Some(system) = self.system(key) else {
                continue;
            };
            if !((system.x + dx).is_finite() && (system.y + dy).is_finite()) {
                warn!(key = %key, dx, dy, "drag would leave a non-finite position");
                return Err(HistoryError::InvalidMap(CoreError::NonFiniteCoordinate {
                    key: key.clone(),
                }));
            }
        }

        let noun = if selected.len() == 1 { "system" } else { "systems" };
        self.save_state(
            format!("Moved {} {noun}", selected.len()),
            steps > 0,
            false,
            ActionMeta::Drag {
                prev_keys,
                selected_keys: selected.clone(),
            },
        )?;

        for key in &selected {
            if let Some(system) = self.lookup.resolve_mut(&mut self.document, key) {
                system.x += dx;
                system.y += dy;
            }
        }
        if let Some(drag) = self.interaction.drag.as_mut() {
            drag.steps += 1;
        }
        trace!(dx, dy, step = steps + 1, "drag step");
        Ok(())
    }

    /// Finish the drag. Returns the number of recorded steps.
    pub fn end_drag(&mut self) -> usize {
        let steps = self.interaction.drag.take().map_or(0, |d| d.steps);
        debug!(steps, "drag finished");
        steps
    }

    // --- clipboard ---

    /// Copy the selected systems. Returns how many were copied.
    pub fn copy_selection(&mut self) -> usize {
        self.clipboard = self.selected_systems().into_iter().cloned().collect();
        debug!(copied = self.clipboard.len(), "selection copied");
        self.clipboard.len()
    }

    /// Paste the clipboard shifted by (dx, dy). Pasted systems get fresh keys,
    /// keep lanes among themselves, and become the selection.
    pub fn paste(&mut self, dx: f64, dy: f64) -> Result<Vec<SystemKey>, HistoryError> {
        if self.clipboard.is_empty() {
            return Ok(Vec::new());
        }

        let mut renamed: Vec<(SystemKey, SystemKey)> = Vec::with_capacity(self.clipboard.len());
        for system in &self.clipboard {
            let fresh = self.fresh_key(&system.key, &renamed);
            renamed.push((system.key.clone(), fresh));
        }
        let map_key = |k: &SystemKey| {
            renamed
                .iter()
                .find(|(old, _)| old == k)
                .map(|(_, new)| new.clone())
        };

        let pasted: Vec<StarSystem> = self
            .clipboard
            .iter()
            .map(|s| {
                let mut copy = s.clone();
                copy.key = map_key(&s.key).unwrap_or_else(|| s.key.clone());
                copy.links = s.links.iter().filter_map(|k| map_key(k)).collect();
                copy.x += dx;
                copy.y += dy;
                copy
            })
            .collect();
        if let Some(bad) = pasted.iter().find(|s| !s.has_finite_position()) {
            warn!(key = %bad.key, dx, dy, "paste would leave a non-finite position");
            return Err(HistoryError::InvalidMap(CoreError::NonFiniteCoordinate {
                key: bad.key.clone(),
            }));
        }

        let selected = self.selection.keys().to_vec();
        let noun = if pasted.len() == 1 { "system" } else { "systems" };
        self.save_state(
            format!("Pasted {} {noun}", pasted.len()),
            false,
            true,
            ActionMeta::structural_with(&selected),
        )?;

        let keys: Vec<SystemKey> = pasted.iter().map(|s| s.key.clone()).collect();
        for system in pasted {
            self.document.push(system);
        }
        self.rebuild_lookup();
        self.selection.restore(&keys, &self.lookup);

        info!(pasted = keys.len(), "clipboard pasted");
        self.emit_selection_changed();
        Ok(keys)
    }

    fn fresh_key(&self, base: &SystemKey, taken: &[(SystemKey, SystemKey)]) -> SystemKey {
        let is_free =
            |k: &SystemKey| !self.lookup.contains(k) && !taken.iter().any(|(_, new)| new == k);
        let mut candidate = SystemKey::new(format!("{base}-copy"));
        let mut n = 2;
        while !is_free(&candidate) {
            candidate = SystemKey::new(format!("{base}-copy{n}"));
            n += 1;
        }
        candidate
    }

    // --- regions ---

    /// Group the selected systems into a named region, replacing any region
    /// with the same name. Regions sit beside the map and are not snapshotted.
    pub fn define_region(&mut self, name: impl Into<String>, color: [f32; 3]) -> usize {
        let name = name.into();
        let systems = self.selection.keys().to_vec();
        let count = systems.len();
        self.regions.retain(|r| r.name != name);
        info!(region = %name, systems = count, "region defined");
        self.regions.push(Region {
            name,
            color,
            systems,
        });
        self.modified = true;
        self.emit_regions_changed();
        count
    }

    pub fn remove_region(&mut self, name: &str) -> bool {
        let before = self.regions.len();
        self.regions.retain(|r| r.name != name);
        let removed = self.regions.len() != before;
        if removed {
            info!(region = %name, "region removed");
            self.modified = true;
            self.emit_regions_changed();
        }
        removed
    }

    // --- transient pointer state ---

    pub fn set_view(&mut self, view: ViewTransform) {
        self.view = view;
    }

    pub fn set_hover(&mut self, key: Option<SystemKey>) {
        self.interaction.hovered = key.filter(|k| self.lookup.contains(k));
    }

    pub fn start_linking(&mut self, source: &SystemKey) -> Result<(), HistoryError> {
        self.require_known(source)?;
        self.interaction.is_linking = true;
        self.interaction.link_source = Some(source.clone());
        Ok(())
    }

    pub fn set_panning(&mut self, panning: bool) {
        self.interaction.is_panning = panning;
    }
}
