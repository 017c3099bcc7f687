#[macro_use]
mod macros;

pub mod actions;
pub mod cli;
pub mod commands;
pub mod config;
pub mod desk;
pub mod display;
pub mod error;
pub mod notify;
pub mod query;
pub mod remote;
pub mod types;

pub use actions::{ActionAvailability, ActionKind, can_process, can_send};
pub use config::Config;
pub use desk::{
    AlertDesk, AlertListState, AlertListViewModel, FetchOutcome, FetchTicket, compute_view_model,
};
pub use error::{AlertDeskError, Result};
pub use notify::{Notification, NotificationLevel, NotificationSlot};
pub use query::{
    AlertQuery, FilterChange, FilterCriteria, Pagination, SortColumn, SortDirection, SortState,
    page_window, sort_alerts, visible_slice,
};
pub use remote::{AlertGateway, HttpGateway, JobStatus, ScheduledJob};
pub use types::{Alert, AlertType, Selection, SendedFilter, TimeWindow, Version};
