//! Async driver that connects the state machine to a submission client and
//! the auto-revert timer.

use super::machine::{FormStateMachine, ResetTicket, SubmitOutcome};
use super::status::SubmissionStatus;
use crate::client::SubmissionClient;
use crate::domain::{CountryCode, ValidationError};
use crate::metrics::Metrics;
use crate::models::{ContactForm, FormField};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy)]
struct PendingReset {
    ticket: ResetTicket,
    deadline: Instant,
}

/// One user's form session.
///
/// `submit` takes `&mut self` for the whole webhook call, so no second
/// submission can be issued until the first resolves. At most one
/// auto-revert is pending at a time; it is replaced whenever a new one is
/// scheduled and discarded when a new submission starts.
pub struct FormSession<C> {
    machine: FormStateMachine,
    client: C,
    pending_reset: Option<PendingReset>,
    metrics: Metrics,
}

impl<C: SubmissionClient> FormSession<C> {
    /// Session with the default five second auto-revert.
    pub fn new(client: C) -> Self {
        Self::with_machine(client, FormStateMachine::default())
    }

    pub fn with_reset_delay(client: C, reset_delay: Duration) -> Self {
        Self::with_machine(client, FormStateMachine::new(reset_delay))
    }

    fn with_machine(client: C, machine: FormStateMachine) -> Self {
        Self {
            machine,
            client,
            pending_reset: None,
            metrics: Metrics::new(),
        }
    }

    /// Record into a shared collector instead of the session's own.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn machine(&self) -> &FormStateMachine {
        &self.machine
    }

    /// Current status, counting a revert whose deadline has already passed.
    pub fn status(&self) -> SubmissionStatus {
        if self.reset_due() {
            SubmissionStatus::Idle
        } else {
            self.machine.status()
        }
    }

    pub fn form(&self) -> &ContactForm {
        self.machine.form()
    }

    pub fn phone_error(&self) -> Option<ValidationError> {
        self.machine.phone_error()
    }

    /// When the pending auto-revert fires, if one is scheduled and not yet due.
    pub fn reset_deadline(&self) -> Option<Instant> {
        self.pending_reset
            .filter(|p| Instant::now() < p.deadline)
            .map(|p| p.deadline)
    }

    /// A revert is pending, its deadline has passed, and its ticket is current.
    fn reset_due(&self) -> bool {
        self.pending_reset.is_some_and(|p| {
            Instant::now() >= p.deadline && self.machine.is_current(&p.ticket)
        })
    }

    pub fn edit(&mut self, field: FormField, value: impl Into<String>) -> bool {
        self.poll_reset();
        self.machine.edit(field, value)
    }

    pub fn select_country(&mut self, country: CountryCode) -> bool {
        self.poll_reset();
        self.machine.select_country(country)
    }

    /// Run one submit action to completion and return the resulting status.
    ///
    /// At most one request is made. Validation failures and suppressed
    /// actions return immediately without touching the client.
    pub async fn submit(&mut self) -> SubmissionStatus {
        self.poll_reset();

        let payload = match self.machine.begin_submit() {
            SubmitOutcome::Suppressed(_) => {
                self.metrics.record_suppressed_submit();
                return self.status();
            }
            SubmitOutcome::Rejected(_) => {
                self.metrics.record_validation_rejection();
                return self.status();
            }
            SubmitOutcome::Dispatched(payload) => payload,
        };

        // a new Loading phase supersedes any earlier timer
        self.pending_reset = None;
        self.metrics.record_submission_attempt();

        let result = self.client.submit(&payload).await;
        match &result {
            Ok(()) => {
                info!("Lead submitted");
                self.metrics.record_submission_success();
            }
            Err(e) => {
                error!("Submission error: {}", e);
                self.metrics.record_submission_failure();
            }
        }

        if let Some(ticket) = self.machine.resolve(&result) {
            self.pending_reset = Some(PendingReset {
                ticket,
                deadline: Instant::now() + ticket.delay(),
            });
        }
        self.status()
    }

    /// Apply the pending auto-revert if its deadline has passed.
    pub fn poll_reset(&mut self) -> bool {
        let due = self
            .pending_reset
            .is_some_and(|p| Instant::now() >= p.deadline);
        if !due {
            return false;
        }
        match self.pending_reset.take() {
            Some(pending) => self.machine.expire(pending.ticket),
            None => false,
        }
    }

    /// Sleep until the pending auto-revert is due, then apply it.
    ///
    /// Returns `false` immediately when nothing is scheduled.
    pub async fn wait_for_reset(&mut self) -> bool {
        let Some(pending) = self.pending_reset else {
            return false;
        };
        tokio::time::sleep_until(pending.deadline).await;
        self.poll_reset()
    }

    /// Return a session stuck in `Loading` to `Idle`.
    ///
    /// Used when a `submit` future was dropped before the client resolved.
    /// Refused while the client still reports the request in flight, so a
    /// new submit can never overlap it. The form keeps its contents.
    pub fn abandon_in_flight(&mut self) -> bool {
        if self.client.in_flight() {
            warn!("Cannot abandon submission; request still in flight");
            return false;
        }
        self.machine.abandon()
    }
}
