//! Gateway to the remote alert store.
//!
//! The store exposes three endpoints the list engine depends on (search,
//! process, send) plus a pair for scheduling long reprocessing runs. Every
//! call is a single round trip; failures are returned to the caller as-is
//! and never retried here.

pub mod error;
pub mod http;

use std::fmt;
use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::{AlertDeskError, Result};
use crate::query::AlertQuery;
use crate::types::{Alert, AlertType, TimeWindow, Version};

pub use error::ApiError;
pub use http::HttpGateway;

pub const SEARCH_ENDPOINT: &str = "challenge/search";
pub const PROCESS_ENDPOINT: &str = "challenge/process";
pub const SEND_ENDPOINT: &str = "challenge/send";
pub const PROCESS_ASYNC_ENDPOINT: &str = "challenge/process_async";
pub const JOB_STATUS_ENDPOINT: &str = "challenge/process_async/exec_status";

/// Body of `POST /challenge/process`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcessRequest {
    pub version: Option<Version>,
    #[serde(rename = "timeSearch")]
    pub time_search: TimeWindow,
}

/// Body of `POST /challenge/send`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SendRequest {
    pub version: Option<Version>,
    #[serde(rename = "type")]
    pub alert_type: Option<AlertType>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct JobStatusRequest<'a> {
    pub job_id: &'a str,
}

/// Handle returned when the backend schedules a reprocessing run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScheduledJob {
    pub job_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Executed,
}

enum_display_fromstr!(
    JobStatus,
    AlertDeskError::invalid_job_status,
    {
        Pending => "pending",
        Executed => "executed",
    }
);

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct JobStatusResponse {
    pub job_status: JobStatus,
}

impl fmt::Display for ScheduledJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.job_id)
    }
}

/// The three calls the list engine makes against the alert store
pub trait AlertGateway: Send + Sync {
    /// Fetch every alert matching `query`, in backend order
    fn search(&self, query: &AlertQuery) -> impl Future<Output = Result<Vec<Alert>>> + Send;

    /// Reprocess the last `window` of measurements for `version`
    fn process(
        &self,
        version: Option<Version>,
        window: TimeWindow,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Dispatch pending alerts of `version` and `alert_type`
    fn send(
        &self,
        version: Option<Version>,
        alert_type: Option<AlertType>,
    ) -> impl Future<Output = Result<()>> + Send;
}
