//! Async wrapper around the synchronous WebhookClient.
//!
//! The form session only depends on [`SubmissionClient`], so tests and other
//! transports can stand in for the real webhook.

use crate::client::WebhookClient;
use crate::error::{SubmissionError, SubmissionResult};
use crate::models::SubmissionPayload;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// One outbound delivery of a lead payload.
///
/// Implementations make a single attempt per call and resolve to `Ok(())`
/// only when the remote side accepted the payload.
#[async_trait]
pub trait SubmissionClient: Send + Sync {
    async fn submit(&self, payload: &SubmissionPayload) -> SubmissionResult<()>;

    /// Whether a request is still running.
    ///
    /// Stays `true` after the `submit` future is dropped if the request itself
    /// cannot be cancelled and is still on the wire.
    fn in_flight(&self) -> bool {
        false
    }
}

/// Decrements the in-flight count when the blocking request ends.
struct InFlightGuard(Arc<AtomicUsize>);

impl InFlightGuard {
    fn enter(count: &Arc<AtomicUsize>) -> Self {
        count.fetch_add(1, Ordering::SeqCst);
        Self(count.clone())
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Async wrapper around synchronous WebhookClient.
///
/// Uses `tokio::task::spawn_blocking` so the blocking `ureq` call does not
/// stall the runtime thread driving the form. A blocking task keeps running
/// when its future is dropped, so the wrapper counts requests until the
/// blocking call itself returns.
#[derive(Clone)]
pub struct AsyncWebhookClient {
    client: Arc<WebhookClient>,
    in_flight: Arc<AtomicUsize>,
}

impl AsyncWebhookClient {
    pub fn new(client: WebhookClient) -> Self {
        Self {
            client: Arc::new(client),
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// The wrapped blocking client.
    pub fn inner(&self) -> &WebhookClient {
        &self.client
    }
}

#[async_trait]
impl SubmissionClient for AsyncWebhookClient {
    async fn submit(&self, payload: &SubmissionPayload) -> SubmissionResult<()> {
        let client = self.client.clone();
        let payload = payload.clone();
        let guard = InFlightGuard::enter(&self.in_flight);

        tokio::task::spawn_blocking(move || {
            let _guard = guard;
            client.submit(&payload)
        })
        .await
        .map_err(|e| SubmissionError::HttpError(format!("Task join error: {}", e)))?
    }

    fn in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }
}
