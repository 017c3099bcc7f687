//! View model for the alert list
//!
//! Separates what is shown (AlertListViewModel) from the state it is derived
//! from (AlertListState), so rendering can be tested without a terminal.

use std::time::Instant;

use serde::Serialize;

use crate::actions::ActionAvailability;
use crate::notify::NotificationLevel;
use crate::query::SortState;
use crate::types::Alert;

use super::state::AlertListState;

/// Everything the front-end renders for one frame
#[derive(Debug, Clone, Serialize)]
pub struct AlertListViewModel {
    /// Rows on the current page, in display order
    pub rows: Vec<Alert>,
    pub filters: FilterSummary,
    pub sort: SortState,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// Page numbers for the navigation strip
    pub pages: Vec<usize>,
    pub loading: bool,
    pub actions: ActionAvailability,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<NotificationView>,
}

/// Filters as labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSummary {
    pub version: String,
    #[serde(rename = "type")]
    pub alert_type: String,
    pub sended: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationView {
    pub message: String,
    pub level: NotificationLevel,
}

impl AlertListViewModel {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Derive the view model from state as of `now`
pub fn compute_view_model(state: &AlertListState, now: Instant) -> AlertListViewModel {
    let total_items = state.total_items();

    AlertListViewModel {
        rows: state.visible_alerts(),
        filters: FilterSummary {
            version: state.filters.version.to_string(),
            alert_type: state.filters.alert_type.to_string(),
            sended: state.filters.sended.to_string(),
        },
        sort: state.sort,
        current_page: state.pagination.current_page(),
        total_pages: state.total_pages(),
        total_items,
        pages: state.page_window(),
        loading: state.is_loading(),
        actions: state.availability(),
        notification: state
            .notification
            .visible_at(now)
            .map(|n| NotificationView {
                message: n.message.clone(),
                level: n.level,
            }),
    }
}
