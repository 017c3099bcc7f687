//! HTTP/JSON implementation of [`AlertGateway`].

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::{
    AlertGateway, ApiError, JOB_STATUS_ENDPOINT, JobStatus, JobStatusRequest, JobStatusResponse,
    PROCESS_ASYNC_ENDPOINT, PROCESS_ENDPOINT, ProcessRequest, SEARCH_ENDPOINT, SEND_ENDPOINT,
    ScheduledJob, SendRequest,
};
use crate::config::Config;
use crate::error::Result;
use crate::query::AlertQuery;
use crate::types::{Alert, AlertType, TimeWindow, Version};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Talks to the alert store over HTTP
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: Url,
}

impl HttpGateway {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_timeout(&config.base_url, config.timeout())
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(MAX_CONNECT_TIMEOUT))
            .build()?;

        Ok(Self {
            client,
            base_url: normalize_base(base_url)?,
        })
    }

    fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        Ok(self.base_url.join(endpoint)?)
    }

    /// POST a JSON body, turning any non-2xx answer into an [`ApiError`]
    async fn post<B>(&self, endpoint: &'static str, body: &B) -> Result<reqwest::Response>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint_url(endpoint)?;
        debug!(%url, "POST {endpoint}");

        let response = self.client.post(url).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::from_response(endpoint, response).await.into());
        }

        debug!(status = status.as_u16(), "{endpoint} answered");
        Ok(response)
    }

    async fn post_json<B, T>(&self, endpoint: &'static str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.post(endpoint, body).await?;
        Ok(response.json::<T>().await?)
    }

    /// Schedule reprocessing in the background. Any well-formed window is accepted.
    pub async fn process_async(
        &self,
        version: Option<Version>,
        window: TimeWindow,
    ) -> Result<ScheduledJob> {
        let request = ProcessRequest {
            version,
            time_search: window,
        };
        self.post_json(PROCESS_ASYNC_ENDPOINT, &request).await
    }

    pub async fn job_status(&self, job_id: &str) -> Result<JobStatus> {
        let response: JobStatusResponse = self
            .post_json(JOB_STATUS_ENDPOINT, &JobStatusRequest { job_id })
            .await?;
        Ok(response.job_status)
    }
}

/// `Url::join` drops the last path segment unless it ends in a slash
fn normalize_base(base_url: &str) -> Result<Url> {
    let mut url = Url::parse(base_url.trim())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

impl AlertGateway for HttpGateway {
    async fn search(&self, query: &AlertQuery) -> Result<Vec<Alert>> {
        self.post_json(SEARCH_ENDPOINT, query).await
    }

    async fn process(&self, version: Option<Version>, window: TimeWindow) -> Result<()> {
        let request = ProcessRequest {
            version,
            time_search: window.ensure_sync()?,
        };
        self.post(PROCESS_ENDPOINT, &request).await?;
        Ok(())
    }

    async fn send(&self, version: Option<Version>, alert_type: Option<AlertType>) -> Result<()> {
        let request = SendRequest {
            version,
            alert_type,
        };
        self.post(SEND_ENDPOINT, &request).await?;
        Ok(())
    }
}
