use std::collections::HashMap;

use crate::model::ControlPoint;

/// Scratch state spanning one continuous drag gesture. `start`/`end` are
/// the last-known endpoints of the dragged run; `target` caches a
/// sub-threshold split candidate so later moves of the same gesture
/// compose against the original unsplit geometry.
#[derive(Clone, Debug)]
pub struct SessionState {
    pub drag_from: Option<String>,
    pub start: ControlPoint,
    pub end: ControlPoint,
    pub target: Option<(ControlPoint, ControlPoint)>,
}

/// Per-gesture cache records keyed by the caller-supplied drag id. Entries
/// are overwritten on every resolved event; nothing clears them on
/// pointer-up and callers must not rely on that.
#[derive(Debug, Default)]
pub struct SessionStore {
    slots: HashMap<String, SessionState>,
}

impl SessionStore {
    pub fn get(&self, drag_id: &str) -> Option<&SessionState> {
        self.slots.get(drag_id)
    }

    pub fn put(&mut self, drag_id: &str, state: SessionState) {
        self.slots.insert(drag_id.to_owned(), state);
    }

    /// Optional pointer-up cleanup for hosts that want it.
    pub fn end(&mut self, drag_id: &str) -> Option<SessionState> {
        self.slots.remove(drag_id)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
