use thiserror::Error;

use crate::actions::ActionKind;

#[derive(Error, Debug)]
pub enum AlertDeskError {
    #[error("invalid version '{0}', expected 1, 2 or all")]
    InvalidVersion(String),

    #[error("invalid alert type '{0}', expected alta, media, baja or all")]
    InvalidAlertType(String),

    #[error("invalid sended filter '{0}', expected si, no or todos")]
    InvalidSendedFilter(String),

    #[error("invalid sort column '{0}'")]
    InvalidSortColumn(String),

    #[error("invalid sort direction '{0}'")]
    InvalidSortDirection(String),

    #[error("invalid time window '{0}': {1}")]
    InvalidTimeWindow(String, String),

    #[error("invalid job status '{0}'")]
    InvalidJobStatus(String),

    // Engine errors
    #[error("{0} is disabled for the current filters")]
    ActionDisabled(ActionKind),

    #[error("alert search failed: {0}")]
    FetchFailed(#[source] Box<AlertDeskError>),

    #[error("{action} failed: {source}")]
    ActionFailed {
        action: ActionKind,
        #[source]
        source: Box<AlertDeskError>,
    },

    // Gateway errors
    #[error("{endpoint} returned HTTP {status}: {message}")]
    Api {
        endpoint: &'static str,
        status: u16,
        message: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid backend URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AlertDeskError {
    pub fn invalid_version(s: String) -> Self {
        AlertDeskError::InvalidVersion(s)
    }

    pub fn invalid_alert_type(s: String) -> Self {
        AlertDeskError::InvalidAlertType(s)
    }

    pub fn invalid_sended_filter(s: String) -> Self {
        AlertDeskError::InvalidSendedFilter(s)
    }

    pub fn invalid_sort_column(s: String) -> Self {
        AlertDeskError::InvalidSortColumn(s)
    }

    pub fn invalid_sort_direction(s: String) -> Self {
        AlertDeskError::InvalidSortDirection(s)
    }

    pub fn invalid_job_status(s: String) -> Self {
        AlertDeskError::InvalidJobStatus(s)
    }
}

pub type Result<T> = std::result::Result<T, AlertDeskError>;
