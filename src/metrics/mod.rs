//! Basic metrics instrumentation for the lead form.
//!
//! Counts webhook requests and how each submit action ended.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Metrics collector shared between the webhook client and the form session.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Total number of HTTP requests made
    http_requests_total: Arc<AtomicU64>,

    /// Total number of HTTP errors
    http_errors_total: Arc<AtomicU64>,

    /// Total duration of all HTTP requests in milliseconds
    http_duration_total_ms: Arc<AtomicU64>,

    /// Submissions that reached the webhook client
    submissions_attempted_total: Arc<AtomicU64>,

    /// Submissions the webhook accepted
    submissions_succeeded_total: Arc<AtomicU64>,

    /// Submissions that failed for any reason
    submissions_failed_total: Arc<AtomicU64>,

    /// Submit actions stopped by phone validation
    validation_rejections_total: Arc<AtomicU64>,

    /// Submit actions ignored because the form was loading or already sent
    suppressed_submits_total: Arc<AtomicU64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            http_requests_total: Arc::new(AtomicU64::new(0)),
            http_errors_total: Arc::new(AtomicU64::new(0)),
            http_duration_total_ms: Arc::new(AtomicU64::new(0)),
            submissions_attempted_total: Arc::new(AtomicU64::new(0)),
            submissions_succeeded_total: Arc::new(AtomicU64::new(0)),
            submissions_failed_total: Arc::new(AtomicU64::new(0)),
            validation_rejections_total: Arc::new(AtomicU64::new(0)),
            suppressed_submits_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record an HTTP request with duration.
    pub fn record_http_request(&self, duration: Duration) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record an HTTP error.
    pub fn record_http_error(&self) {
        self.http_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_submission_attempt(&self) {
        self.submissions_attempted_total
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_submission_success(&self) {
        self.submissions_succeeded_total
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_submission_failure(&self) {
        self.submissions_failed_total
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_validation_rejection(&self) {
        self.validation_rejections_total
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_suppressed_submit(&self) {
        self.suppressed_submits_total
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Get total HTTP requests.
    pub fn http_requests_total(&self) -> u64 {
        self.http_requests_total.load(Ordering::Relaxed)
    }

    /// Get total HTTP errors.
    pub fn http_errors_total(&self) -> u64 {
        self.http_errors_total.load(Ordering::Relaxed)
    }

    /// Get average HTTP request duration in milliseconds.
    pub fn http_duration_avg_ms(&self) -> f64 {
        let total = self.http_duration_total_ms.load(Ordering::Relaxed);
        let count = self.http_requests_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            http_requests_total: self.http_requests_total(),
            http_errors_total: self.http_errors_total(),
            http_duration_avg_ms: self.http_duration_avg_ms(),
            submissions_attempted_total: self.submissions_attempted_total.load(Ordering::Relaxed),
            submissions_succeeded_total: self.submissions_succeeded_total.load(Ordering::Relaxed),
            submissions_failed_total: self.submissions_failed_total.load(Ordering::Relaxed),
            validation_rejections_total: self.validation_rejections_total.load(Ordering::Relaxed),
            suppressed_submits_total: self.suppressed_submits_total.load(Ordering::Relaxed),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_duration_avg_ms: f64,
    pub submissions_attempted_total: u64,
    pub submissions_succeeded_total: u64,
    pub submissions_failed_total: u64,
    pub validation_rejections_total: u64,
    pub suppressed_submits_total: u64,
}
