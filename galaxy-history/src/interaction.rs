// Transient pointer state and the view transform.

use galaxy_core::SystemKey;
use serde::{Deserialize, Serialize};

/// Pan/zoom of the map view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

/// A drag that is in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub anchor: SystemKey,
    /// Selection before the drag started.
    pub prev_keys: Vec<SystemKey>,
    /// Steps recorded so far; all but the first are grouped with it.
    pub steps: usize,
}

/// Pointer state that may name systems. Reset whenever the map is swapped,
/// since those keys may no longer exist.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionState {
    pub hovered: Option<SystemKey>,
    pub drag: Option<DragState>,
    pub link_source: Option<SystemKey>,
    pub is_panning: bool,
    pub is_linking: bool,
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        *self == InteractionState::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn reset(&mut self) {
        *self = InteractionState::default();
    }
}
