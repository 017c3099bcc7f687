//! The alert list engine.
//!
//! [`AlertDesk`] sequences gateway calls against an [`AlertListState`]:
//! filter edits trigger a search, actions are gated by the current filters
//! and report their outcome through the notification slot.

pub mod model;
pub mod state;

use std::time::Instant;

use tracing::{info, warn};

use crate::actions::ActionKind;
use crate::config::Config;
use crate::error::{AlertDeskError, Result};
use crate::query::{FilterChange, SortColumn};
use crate::remote::AlertGateway;
use crate::types::{Alert, TimeWindow};

pub use model::{AlertListViewModel, FilterSummary, NotificationView, compute_view_model};
pub use state::{AlertListState, FetchOutcome, FetchTicket};

pub const SEND_SUCCESS_MESSAGE: &str = "Selected alerts were sent successfully";

pub fn process_success_message(window: TimeWindow) -> String {
    format!("Alerts from the last {window} were processed successfully")
}

pub struct AlertDesk<G> {
    gateway: G,
    state: AlertListState,
    process_window: TimeWindow,
    notify_failures: bool,
}

impl<G: AlertGateway> AlertDesk<G> {
    pub fn new(gateway: G) -> Self {
        Self::with_config(gateway, &Config::default())
    }

    pub fn with_config(gateway: G, config: &Config) -> Self {
        Self {
            gateway,
            state: AlertListState::from_config(config),
            process_window: config.process_window,
            notify_failures: config.notify_failures,
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn state(&self) -> &AlertListState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AlertListState {
        &mut self.state
    }

    pub fn view_model(&self) -> AlertListViewModel {
        compute_view_model(&self.state, Instant::now())
    }

    /// Re-run the search for the current filters
    pub async fn refresh(&mut self) -> Result<FetchOutcome> {
        let ticket = self.state.begin_fetch();
        let result = self.gateway.search(ticket.query()).await;
        self.state.finish_fetch(ticket, result)
    }

    /// Apply a filter edit and refetch if it changed anything.
    ///
    /// Returns `None` when the edit was a no-op and no search was issued.
    pub async fn update_filters(&mut self, change: FilterChange) -> Result<Option<FetchOutcome>> {
        if !self.state.apply_filter(change) {
            return Ok(None);
        }
        self.refresh().await.map(Some)
    }

    /// Issue a search without waiting for it; pair with [`Self::fetch`] and
    /// [`Self::finish_fetch`] to let several searches overlap
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.state.begin_fetch()
    }

    pub async fn fetch(&self, ticket: &FetchTicket) -> Result<Vec<Alert>> {
        self.gateway.search(ticket.query()).await
    }

    pub fn finish_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Alert>>,
    ) -> Result<FetchOutcome> {
        self.state.finish_fetch(ticket, result)
    }

    pub fn sort_by(&mut self, column: SortColumn) {
        self.state.sort_by(column);
    }

    pub fn set_page(&mut self, page: usize) {
        self.state.set_page(page);
    }

    pub fn dismiss_notification(&mut self) {
        self.state.dismiss_notification();
    }

    /// Reprocess the configured window for the selected version
    pub async fn process(&mut self) -> Result<()> {
        self.process_with_window(self.process_window).await
    }

    pub async fn process_with_window(&mut self, window: TimeWindow) -> Result<()> {
        self.ensure_enabled(ActionKind::Process)?;
        let window = window.ensure_sync()?;

        let version = self.state.filters.version.value();
        let result = self.gateway.process(version, window).await;
        self.settle(ActionKind::Process, result, process_success_message(window))
    }

    /// Dispatch alerts for the selected version and type
    pub async fn send(&mut self) -> Result<()> {
        self.ensure_enabled(ActionKind::Send)?;

        let filters = self.state.filters;
        let result = self
            .gateway
            .send(filters.version.value(), filters.alert_type.value())
            .await;
        self.settle(ActionKind::Send, result, SEND_SUCCESS_MESSAGE.to_string())
    }

    fn ensure_enabled(&self, action: ActionKind) -> Result<()> {
        if self.state.availability().allows(action) {
            Ok(())
        } else {
            Err(AlertDeskError::ActionDisabled(action))
        }
    }

    fn settle(&mut self, action: ActionKind, result: Result<()>, success: String) -> Result<()> {
        match result {
            Ok(()) => {
                info!(%action, "action succeeded");
                self.state.notification.success(success);
                Ok(())
            }
            Err(e) => {
                warn!(%action, error = %e, "action failed");
                let error = AlertDeskError::ActionFailed {
                    action,
                    source: Box::new(e),
                };
                if self.notify_failures {
                    self.state.notification.error(error.to_string());
                }
                Err(error)
            }
        }
    }
}
