//! HTTP client for the lead webhook.
//!
//! This module provides a synchronous client that performs exactly one POST per
//! call. Async callers go through [`AsyncWebhookClient`], which moves the
//! blocking request onto `tokio::task::spawn_blocking`.

mod async_wrapper;
pub use async_wrapper::{AsyncWebhookClient, SubmissionClient};

use crate::config::Config;
use crate::error::{SubmissionError, SubmissionResult};
use crate::metrics::Metrics;
use crate::models::SubmissionPayload;
use std::error::Error as _;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Blocking client that posts lead payloads to a fixed webhook URL.
///
/// No retries: a failed call is reported once and the caller decides
/// what to do next.
#[derive(Clone)]
pub struct WebhookClient {
    /// Full webhook URL
    url: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl WebhookClient {
    /// Create a new WebhookClient from configuration.
    pub fn new(config: &Config) -> Self {
        Self::build(
            config.webhook_url.clone(),
            Duration::from_secs(config.request_timeout),
        )
    }

    /// Create a WebhookClient for an arbitrary URL (useful for testing).
    #[doc(hidden)]
    pub fn with_url(url: String) -> Self {
        Self::build(url, Duration::from_secs(10))
    }

    /// Like [`Self::with_url`] with a custom request timeout.
    #[doc(hidden)]
    pub fn with_url_and_timeout(url: String, timeout: Duration) -> Self {
        Self::build(url, timeout)
    }

    fn build(url: String, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Self {
            url,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Share an existing metrics collector instead of the client's own.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// The endpoint this client posts to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST the payload as JSON.
    ///
    /// Succeeds only for a 2xx response. Any other status, a transport error,
    /// or a timeout is returned as a [`SubmissionError`].
    pub fn submit(&self, payload: &SubmissionPayload) -> SubmissionResult<()> {
        let start = Instant::now();
        let body = serde_json::to_value(payload)?;

        tracing::debug!("POST {}", self.url);
        tracing::debug!(
            "Request body: {}",
            serde_json::to_string_pretty(&body).unwrap_or_else(|_| "<invalid json>".to_string())
        );

        let result = self
            .agent
            .post(&self.url)
            .set("Content-Type", "application/json")
            .send_json(body)
            .map_err(|e| self.map_error(e))
            .and_then(|response| {
                let status = response.status();
                if (200..300).contains(&status) {
                    Ok(status)
                } else {
                    Err(SubmissionError::ApiError {
                        status,
                        message: response.status_text().to_string(),
                    })
                }
            });

        let duration = start.elapsed();
        self.metrics.record_http_request(duration);
        match result {
            Ok(status) => {
                tracing::debug!("POST {} - Success (status: {})", self.url, status);
                Ok(())
            }
            Err(e) => {
                tracing::error!("POST {} - Error: {:?}", self.url, e);
                self.metrics.record_http_error();
                Err(e)
            }
        }
    }

    /// True when the transport failure wraps a socket timeout.
    fn is_timeout(transport: &ureq::Transport) -> bool {
        transport
            .source()
            .and_then(|source| source.downcast_ref::<io::Error>())
            .is_some_and(|err| {
                matches!(err.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
            })
    }

    /// Map a ureq error to a SubmissionError.
    fn map_error(&self, error: ureq::Error) -> SubmissionError {
        match error {
            ureq::Error::Status(status, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());
                SubmissionError::ApiError { status, message }
            }
            ureq::Error::Transport(transport) => match transport.kind() {
                ureq::ErrorKind::ConnectionFailed => {
                    SubmissionError::HttpError("Connection failed".to_string())
                }
                ureq::ErrorKind::Io if Self::is_timeout(&transport) => SubmissionError::Timeout,
                _ => SubmissionError::HttpError(transport.to_string()),
            },
        }
    }
}
