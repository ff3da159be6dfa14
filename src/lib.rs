//! Join Me Leads - the lead-capture core behind the portfolio's "Join Me" page.
//!
//! Validates the visitor's phone number, composes the webhook payload, posts it
//! once, and tracks the `idle -> loading -> success|error -> idle` status that
//! the page renders.
//!
//! # Architecture
//!
//! - **domain**: Phone validation and the country dialing-code table
//! - **models**: The contact form and the outbound payload
//! - **client**: Webhook client and the async `SubmissionClient` seam
//! - **form**: Status, state machine, and the async form session
//! - **config**: Configuration from environment variables
//! - **error**: Error types for submission and configuration
//! - **metrics**: Request and submission counters

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod form;
pub mod metrics;
pub mod models;

pub use client::{AsyncWebhookClient, SubmissionClient, WebhookClient};
pub use config::Config;
pub use domain::{CountryCode, ValidationError};
pub use error::{ConfigError, SubmissionError};
pub use form::{FormSession, FormStateMachine, SubmissionStatus, SubmitOutcome};
pub use metrics::{Metrics, MetricsSummary};
pub use models::{ContactForm, FormField, SubmissionPayload};
