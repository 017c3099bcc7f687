//! List state and its transitions.
//!
//! Everything the alert list shows is derived from [`AlertListState`]. All
//! transitions are synchronous; the only suspension point is the gateway
//! round trip between [`AlertListState::begin_fetch`] and
//! [`AlertListState::finish_fetch`].

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::actions::ActionAvailability;
use crate::config::Config;
use crate::error::{AlertDeskError, Result};
use crate::notify::{DEFAULT_NOTIFICATION_TTL, NotificationSlot};
use crate::query::pagination::DEFAULT_MAX_PAGE_BUTTONS;
use crate::query::{
    AlertQuery, FilterChange, FilterCriteria, Pagination, SortColumn, SortState, total_pages,
};
use crate::types::Alert;

/// An issued search. Only the most recently issued ticket may update the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    query: AlertQuery,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &AlertQuery {
        &self.query
    }
}

/// What [`AlertListState::finish_fetch`] did with a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The snapshot was replaced
    Applied {
        total_items: usize,
        /// The current page fell out of range and went back to 1
        page_reset: bool,
    },
    /// A newer fetch was issued after this one; the response was dropped
    Stale,
}

#[derive(Debug, Clone)]
pub struct AlertListState {
    pub filters: FilterCriteria,
    pub sort: SortState,
    pub pagination: Pagination,
    pub notification: NotificationSlot,
    pub max_page_buttons: usize,
    alerts: Vec<Alert>,
    loading: bool,
    last_issued: u64,
}

impl Default for AlertListState {
    fn default() -> Self {
        Self::new(Pagination::default(), DEFAULT_MAX_PAGE_BUTTONS, DEFAULT_NOTIFICATION_TTL)
    }
}

impl AlertListState {
    pub fn new(pagination: Pagination, max_page_buttons: usize, notification_ttl: Duration) -> Self {
        Self {
            filters: FilterCriteria::default(),
            sort: SortState::default(),
            pagination,
            notification: NotificationSlot::new(notification_ttl),
            max_page_buttons,
            alerts: Vec::new(),
            loading: false,
            last_issued: 0,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Pagination::new(config.page_size),
            config.max_page_buttons,
            config.notification_ttl(),
        )
    }

    /// Current snapshot, in fetch order
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn total_items(&self) -> usize {
        self.alerts.len()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.alerts.len(), self.pagination.page_size())
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn availability(&self) -> ActionAvailability {
        ActionAvailability::for_filters(&self.filters)
    }

    /// Returns true when the filters actually changed
    pub fn apply_filter(&mut self, change: FilterChange) -> bool {
        self.filters.apply(change)
    }

    /// Mark a search as in flight and hand out its ticket
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.last_issued += 1;
        self.loading = true;
        let ticket = FetchTicket {
            seq: self.last_issued,
            query: self.filters.to_query(),
        };
        debug!(seq = ticket.seq, query = ?ticket.query, "search issued");
        ticket
    }

    pub fn is_latest(&self, ticket: &FetchTicket) -> bool {
        ticket.seq == self.last_issued
    }

    /// Settle a search.
    ///
    /// Responses for anything but the latest ticket are dropped and leave
    /// `loading` alone. A failed latest search clears `loading`, keeps the
    /// previous snapshot and comes back as [`AlertDeskError::FetchFailed`].
    pub fn finish_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Alert>>,
    ) -> Result<FetchOutcome> {
        if !self.is_latest(&ticket) {
            debug!(
                seq = ticket.seq,
                latest = self.last_issued,
                "discarding stale search response"
            );
            return Ok(FetchOutcome::Stale);
        }

        self.loading = false;
        match result {
            Ok(alerts) => {
                let total_items = alerts.len();
                self.alerts = alerts;
                let page_reset = self.pagination.reconcile(total_items);
                debug!(seq = ticket.seq, total_items, page_reset, "snapshot replaced");
                Ok(FetchOutcome::Applied {
                    total_items,
                    page_reset,
                })
            }
            Err(e) => {
                warn!(seq = ticket.seq, error = %e, "alert search failed");
                Err(AlertDeskError::FetchFailed(Box::new(e)))
            }
        }
    }

    pub fn sort_by(&mut self, column: SortColumn) {
        self.sort.sort_by(column);
    }

    pub fn set_page(&mut self, page: usize) {
        self.pagination.set_page(page, self.alerts.len());
    }

    /// Whole snapshot in display order
    pub fn sorted_alerts(&self) -> Vec<Alert> {
        self.sort.apply(&self.alerts)
    }

    /// Rows on the current page
    pub fn visible_alerts(&self) -> Vec<Alert> {
        let sorted = self.sorted_alerts();
        self.pagination.slice(&sorted).to_vec()
    }

    pub fn page_window(&self) -> Vec<usize> {
        self.pagination
            .window(self.alerts.len(), self.max_page_buttons)
    }

    pub fn dismiss_notification(&mut self) {
        self.notification.dismiss();
    }

    /// Drop the notification if it has outlived its ttl
    pub fn tick(&mut self, now: Instant) -> bool {
        self.notification.expire(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SortDirection;
    use crate::types::{AlertType, Selection, Version};

    fn alerts(count: u64) -> Vec<Alert> {
        (1..=count)
            .map(|id| Alert {
                id: Some(id),
                datetime: format!("2024-01-01 00:00:{:02}", id % 60),
                value: (id * 37 % 1000) as f64,
                version: Version::V1,
                alert_type: Some(AlertType::Low),
                sended: false,
            })
            .collect()
    }

    #[test]
    fn test_begin_fetch_marks_loading_and_captures_query() {
        let mut state = AlertListState::default();
        let ticket = state.begin_fetch();
        assert!(state.is_loading());
        assert_eq!(ticket.seq(), 1);
        assert_eq!(ticket.query(), &FilterCriteria::default().to_query());
    }

    #[test]
    fn test_successful_fetch_replaces_snapshot() {
        let mut state = AlertListState::default();
        let ticket = state.begin_fetch();
        let outcome = state.finish_fetch(ticket, Ok(alerts(23))).unwrap();

        assert_eq!(
            outcome,
            FetchOutcome::Applied {
                total_items: 23,
                page_reset: false
            }
        );
        assert!(!state.is_loading());
        assert_eq!(state.total_items(), 23);
        assert_eq!(state.total_pages(), 3);
    }

    #[test]
    fn test_failed_fetch_keeps_previous_snapshot() {
        let mut state = AlertListState::default();
        let ticket = state.begin_fetch();
        state.finish_fetch(ticket, Ok(alerts(5))).unwrap();

        let ticket = state.begin_fetch();
        let err = state
            .finish_fetch(ticket, Err(AlertDeskError::Config("boom".into())))
            .unwrap_err();

        assert!(matches!(err, AlertDeskError::FetchFailed(_)));
        assert!(!state.is_loading());
        assert_eq!(state.total_items(), 5);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut state = AlertListState::default();
        let first = state.begin_fetch();
        let second = state.begin_fetch();

        state.finish_fetch(second, Ok(alerts(3))).unwrap();
        let outcome = state.finish_fetch(first, Ok(alerts(40))).unwrap();

        assert_eq!(outcome, FetchOutcome::Stale);
        assert_eq!(state.total_items(), 3);
        assert!(!state.is_loading());
    }

    #[test]
    fn test_stale_response_does_not_clear_loading() {
        let mut state = AlertListState::default();
        let first = state.begin_fetch();
        let _second = state.begin_fetch();

        let outcome = state
            .finish_fetch(first, Err(AlertDeskError::Config("late".into())))
            .unwrap();
        assert_eq!(outcome, FetchOutcome::Stale);
        assert!(state.is_loading());
    }

    #[test]
    fn test_shrinking_snapshot_resets_page() {
        let mut state = AlertListState::default();
        let ticket = state.begin_fetch();
        state.finish_fetch(ticket, Ok(alerts(45))).unwrap();
        state.set_page(5);
        assert_eq!(state.pagination.current_page(), 5);

        let ticket = state.begin_fetch();
        let outcome = state.finish_fetch(ticket, Ok(alerts(12))).unwrap();
        assert_eq!(
            outcome,
            FetchOutcome::Applied {
                total_items: 12,
                page_reset: true
            }
        );
        assert_eq!(state.pagination.current_page(), 1);
    }

    #[test]
    fn test_visible_alerts_follow_sort_and_page() {
        let mut state = AlertListState::default();
        let ticket = state.begin_fetch();
        state.finish_fetch(ticket, Ok(alerts(15))).unwrap();

        state.sort_by(SortColumn::Value);
        state.sort_by(SortColumn::Value);
        assert_eq!(state.sort.direction, SortDirection::Descending);

        let sorted = state.sorted_alerts();
        state.set_page(2);
        let visible = state.visible_alerts();
        assert_eq!(visible.len(), 5);
        assert_eq!(visible, sorted[10..15].to_vec());
        assert!(visible.windows(2).all(|w| w[0].value >= w[1].value));
    }

    #[test]
    fn test_set_page_clamps_to_snapshot() {
        let mut state = AlertListState::default();
        state.set_page(3);
        assert_eq!(state.pagination.current_page(), 1);
        assert!(state.page_window().is_empty());
    }

    #[test]
    fn test_availability_tracks_filters() {
        let mut state = AlertListState::default();
        assert!(state.availability().can_process);
        assert!(!state.availability().can_send);

        state.apply_filter(FilterChange::Type(Selection::Only(AlertType::High)));
        assert!(state.availability().can_send);

        state.apply_filter(FilterChange::Version(Selection::All));
        assert!(!state.availability().can_process);
        assert!(!state.availability().can_send);
    }

    #[test]
    fn test_notification_lifecycle() {
        let mut state = AlertListState::new(Pagination::default(), 10, Duration::from_millis(100));
        let now = Instant::now();
        state
            .notification
            .show_at("done", crate::notify::NotificationLevel::Success, now);
        assert!(!state.tick(now + Duration::from_millis(50)));
        assert!(state.tick(now + Duration::from_millis(100)));

        state.notification.success("again");
        state.dismiss_notification();
        assert!(state.notification.visible_at(Instant::now()).is_none());
    }
}
