//! Error responses from the alert store.
//!
//! The backend answers failed calls with a JSON body of the form
//! `{"status": "<reason>"}`: 422 for rejected parameters, 500 for anything
//! that blew up while handling the request.

use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::AlertDeskError;

/// Non-success HTTP response from one endpoint
#[derive(Debug)]
pub struct ApiError {
    /// Endpoint path the request went to
    pub endpoint: &'static str,
    pub status: StatusCode,
    /// Backend-provided reason, or the canonical status text
    pub message: String,
}

#[derive(Deserialize)]
struct StatusBody {
    status: String,
}

impl ApiError {
    pub fn new(endpoint: &'static str, status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            endpoint,
            status,
            message: message.into(),
        }
    }

    /// Build from a response body, preferring the backend's `status` field
    pub fn from_body(endpoint: &'static str, status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<StatusBody>(body)
            .map(|b| b.status)
            .ok()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    status.canonical_reason().unwrap_or("Unknown").to_string()
                } else {
                    trimmed.to_string()
                }
            });

        Self::new(endpoint, status, message)
    }

    pub async fn from_response(endpoint: &'static str, response: reqwest::Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Self::from_body(endpoint, status, &body)
    }

    /// The backend rejected the parameters (HTTP 422)
    pub fn is_validation_error(&self) -> bool {
        self.status == StatusCode::UNPROCESSABLE_ENTITY
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} returned HTTP {}: {}",
            self.endpoint,
            self.status.as_u16(),
            self.message
        )
    }
}

impl From<ApiError> for AlertDeskError {
    fn from(error: ApiError) -> Self {
        AlertDeskError::Api {
            endpoint: error.endpoint,
            status: error.status.as_u16(),
            message: error.message,
        }
    }
}
