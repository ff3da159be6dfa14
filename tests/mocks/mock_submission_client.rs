use async_trait::async_trait;
use join_me_leads::client::SubmissionClient;
use join_me_leads::error::{SubmissionError, SubmissionResult};
use join_me_leads::models::SubmissionPayload;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// How the mock answers one call.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy)]
pub enum MockResponse {
    Accept,
    Status(u16),
    Timeout,
}

/// Mock submission client for testing.
///
/// Answers calls from a scripted queue (accepting once the queue is empty),
/// optionally after a delay, and records every payload it receives.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockSubmissionClient {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    payloads: Arc<Mutex<Vec<SubmissionPayload>>>,
    delay: Option<Duration>,
    detached: bool,
    in_flight: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl MockSubmissionClient {
    /// Create a mock that accepts every payload immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that answers with the given responses in order.
    pub fn scripted(responses: Vec<MockResponse>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into())),
            ..Self::default()
        }
    }

    /// Wait this long (on the tokio clock) before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Run the delay on a spawned task that outlives a dropped `submit`
    /// future, like a blocking HTTP call on the blocking pool.
    pub fn detached(mut self) -> Self {
        self.detached = true;
        self
    }

    /// Number of calls received so far.
    pub fn call_count(&self) -> usize {
        self.payloads.lock().unwrap().len()
    }

    /// Payloads received so far, oldest first.
    pub fn payloads(&self) -> Vec<SubmissionPayload> {
        self.payloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionClient for MockSubmissionClient {
    async fn submit(&self, payload: &SubmissionPayload) -> SubmissionResult<()> {
        self.payloads.lock().unwrap().push(payload.clone());

        if let Some(delay) = self.delay {
            if self.detached {
                self.in_flight.fetch_add(1, Ordering::SeqCst);
                let in_flight = self.in_flight.clone();
                let request = tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                });
                let _ = request.await;
            } else {
                tokio::time::sleep(delay).await;
            }
        }

        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(MockResponse::Accept);

        match response {
            MockResponse::Accept => Ok(()),
            MockResponse::Status(status) => Err(SubmissionError::ApiError {
                status,
                message: "mock rejection".to_string(),
            }),
            MockResponse::Timeout => Err(SubmissionError::Timeout),
        }
    }

    fn in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }
}
