//! Which backend actions the current filters permit.
//!
//! Both rules depend on the filters alone, never on fetched data, so the
//! front-end can recompute them on every filter change.

use serde::Serialize;

use crate::query::FilterCriteria;

/// Side-effecting backend operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Process,
    Send,
}

enum_display!(ActionKind, {
    Process => "process",
    Send => "send",
});

/// Processing needs a concrete version
pub fn can_process(filters: &FilterCriteria) -> bool {
    !filters.version.is_all()
}

/// Dispatch needs a concrete version and type
pub fn can_send(filters: &FilterCriteria) -> bool {
    !filters.version.is_all() && !filters.alert_type.is_all()
}

/// Enablement of both actions for one filter state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ActionAvailability {
    pub can_process: bool,
    pub can_send: bool,
}

impl ActionAvailability {
    pub fn for_filters(filters: &FilterCriteria) -> Self {
        Self {
            can_process: can_process(filters),
            can_send: can_send(filters),
        }
    }

    pub fn allows(&self, action: ActionKind) -> bool {
        match action {
            ActionKind::Process => self.can_process,
            ActionKind::Send => self.can_send,
        }
    }
}
