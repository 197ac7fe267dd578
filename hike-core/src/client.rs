use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::model::{ForecastRequest, ForecastResponse};

/// Failures observed while submitting a forecast request.
///
/// Every variant is recoverable at the view layer; none of them should
/// take the process down.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The service answered with a non-2xx status. `message` is the
    /// server-provided `error` text when the body carried one, otherwise
    /// the generic `HTTP error! Status: <code>` fallback.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request never completed (connection refused, DNS, timeout).
    #[error("Network request failed: {0}")]
    Transport(String),

    /// The service answered 2xx but the body was not a valid forecast.
    #[error("Could not decode forecast response: {0}")]
    Decode(String),

    /// Form state that cannot be turned into a request.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Optional body the service sends alongside a non-2xx status.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
}

/// Seam between the view layer and the forecast service, so the CLI can be
/// driven by a fake in tests.
#[async_trait]
pub trait ForecastApi: Send + Sync {
    async fn fetch(&self, request: &ForecastRequest) -> Result<ForecastResponse, ForecastError>;
}

/// HTTP implementation talking to the hike forecast endpoint.
#[derive(Debug, Clone)]
pub struct HttpForecastClient {
    http: Client,
    endpoint: String,
}

impl HttpForecastClient {
    pub fn new(endpoint: String) -> Self {
        Self { http: Client::new(), endpoint }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ForecastApi for HttpForecastClient {
    #[instrument(skip(self, request), fields(location = %request.location))]
    async fn fetch(&self, request: &ForecastRequest) -> Result<ForecastResponse, ForecastError> {
        debug!(endpoint = %self.endpoint, "Submitting forecast request");

        let res = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| ForecastError::Transport(e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| ForecastError::Transport(e.to_string()))?;

        if !status.is_success() {
            // Prefer the backend's own error text; a body that is not JSON
            // (or carries no `error` field) falls back to the status line.
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|parsed| parsed.error)
                .unwrap_or_else(|| format!("HTTP error! Status: {}", status.as_u16()));

            debug!(status = status.as_u16(), "Forecast request rejected");
            return Err(ForecastError::Api { status: status.as_u16(), message });
        }

        let response: ForecastResponse =
            serde_json::from_str(&body).map_err(|e| ForecastError::Decode(e.to_string()))?;

        debug!(days = response.daily_summary.len(), "Forecast received");
        Ok(response)
    }
}
