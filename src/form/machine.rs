//! The lead form state machine.
//!
//! All transitions are synchronous `&mut self` calls with no I/O. The caller
//! performs the webhook request between [`FormStateMachine::begin_submit`] and
//! [`FormStateMachine::resolve`], and schedules the auto-revert described by
//! the returned [`ResetTicket`].

use super::status::SubmissionStatus;
use crate::domain::{validate_phone, CountryCode, ValidationError};
use crate::error::SubmissionResult;
use crate::models::{compose, ContactForm, FormField, SubmissionPayload};
use std::time::Duration;
use tracing::{info, warn};

/// Default delay before `Success`/`Error` reverts to `Idle`.
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_secs(5);

/// What a submit action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Ignored because a submission is in flight or was just accepted.
    Suppressed(SubmissionStatus),

    /// Phone validation failed; status is unchanged and nothing was sent.
    Rejected(ValidationError),

    /// Status is now `Loading`; the payload must be delivered exactly once.
    Dispatched(SubmissionPayload),
}

/// Permission to revert a settled status to `Idle`.
///
/// A ticket is bound to the transition that issued it. Any later transition
/// makes it stale, and [`FormStateMachine::expire`] ignores stale tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetTicket {
    generation: u64,
    delay: Duration,
}

impl ResetTicket {
    /// How long after issue the ticket should be applied.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Owned state of one form session.
#[derive(Debug, Clone)]
pub struct FormStateMachine {
    form: ContactForm,
    country: CountryCode,
    status: SubmissionStatus,
    phone_error: Option<ValidationError>,
    // bumped on every status change
    generation: u64,
    reset_delay: Duration,
}

impl Default for FormStateMachine {
    fn default() -> Self {
        Self::new(DEFAULT_RESET_DELAY)
    }
}

impl FormStateMachine {
    /// Empty form, `+1` selected, status `Idle`.
    pub fn new(reset_delay: Duration) -> Self {
        Self {
            form: ContactForm::default(),
            country: CountryCode::default(),
            status: SubmissionStatus::Idle,
            phone_error: None,
            generation: 0,
            reset_delay,
        }
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn country(&self) -> CountryCode {
        self.country
    }

    /// Message to show under the phone field, if any.
    pub fn phone_error(&self) -> Option<ValidationError> {
        self.phone_error
    }

    pub fn reset_delay(&self) -> Duration {
        self.reset_delay
    }

    /// Replace one field's text.
    ///
    /// Editing the phone field always clears the phone error. Returns `false`
    /// and leaves the form untouched while a submission is in flight.
    pub fn edit(&mut self, field: FormField, value: impl Into<String>) -> bool {
        if field == FormField::Phone {
            self.phone_error = None;
        }
        if !self.status.inputs_enabled() {
            return false;
        }
        *self.form.field_mut(field) = value.into();
        true
    }

    /// Change the selected dialing code. Rejected while `Loading`.
    pub fn select_country(&mut self, country: CountryCode) -> bool {
        if !self.status.inputs_enabled() {
            return false;
        }
        self.country = country;
        true
    }

    /// Handle a submit action.
    ///
    /// Only `Idle` and `Error` accept a submission. On success the machine is
    /// in `Loading` and the caller owns the returned payload.
    pub fn begin_submit(&mut self) -> SubmitOutcome {
        if !self.status.submit_enabled() {
            warn!("Submit ignored while status is {}", self.status);
            return SubmitOutcome::Suppressed(self.status);
        }

        if let Some(err) = validate_phone(&self.form.phone) {
            warn!("Phone validation failed: {}", err);
            self.phone_error = Some(err);
            return SubmitOutcome::Rejected(err);
        }

        self.phone_error = None;
        let payload = compose(&self.form, &self.country);
        self.transition(SubmissionStatus::Loading);
        SubmitOutcome::Dispatched(payload)
    }

    /// Apply the webhook result to the in-flight submission.
    ///
    /// On success the form is cleared; on failure it is kept for a retry.
    /// Returns the ticket for the auto-revert, or `None` when no submission
    /// was in flight (the result arrived after [`Self::abandon`]).
    pub fn resolve(&mut self, result: &SubmissionResult<()>) -> Option<ResetTicket> {
        if self.status != SubmissionStatus::Loading {
            warn!("Dropping submission result; status is {}", self.status);
            return None;
        }

        match result {
            Ok(()) => {
                self.form.clear();
                self.transition(SubmissionStatus::Success);
            }
            Err(_) => self.transition(SubmissionStatus::Error),
        }

        Some(ResetTicket {
            generation: self.generation,
            delay: self.reset_delay,
        })
    }

    /// Whether applying the ticket now would revert to `Idle`.
    pub fn is_current(&self, ticket: &ResetTicket) -> bool {
        ticket.generation == self.generation && self.status.is_settled()
    }

    /// Revert to `Idle` if the ticket is still current.
    pub fn expire(&mut self, ticket: ResetTicket) -> bool {
        if !self.is_current(&ticket) {
            return false;
        }
        self.transition(SubmissionStatus::Idle);
        true
    }

    /// Give up on an in-flight submission without touching the form.
    pub fn abandon(&mut self) -> bool {
        if self.status != SubmissionStatus::Loading {
            return false;
        }
        self.transition(SubmissionStatus::Idle);
        true
    }

    fn transition(&mut self, next: SubmissionStatus) {
        info!("Form status {} -> {}", self.status, next);
        self.status = next;
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SubmissionError;

    fn filled(phone: &str) -> FormStateMachine {
        let mut machine = FormStateMachine::default();
        machine.edit(FormField::Name, "Grace Hopper");
        machine.edit(FormField::Email, "grace@example.com");
        machine.edit(FormField::Birthday, "1906-12-09");
        machine.edit(FormField::Phone, phone);
        machine
    }

    fn failure() -> SubmissionResult<()> {
        Err(SubmissionError::Timeout)
    }

    #[test]
    fn test_initial_state() {
        let machine = FormStateMachine::default();
        assert_eq!(machine.status(), SubmissionStatus::Idle);
        assert!(machine.form().is_empty());
        assert_eq!(machine.country().code, "+1");
        assert_eq!(machine.phone_error(), None);
        assert_eq!(machine.reset_delay(), Duration::from_secs(5));
    }

    #[test]
    fn test_submit_dispatches_composed_payload() {
        let mut machine = filled("555-0000");

        let payload = match machine.begin_submit() {
            SubmitOutcome::Dispatched(payload) => payload,
            other => panic!("expected dispatch, got {:?}", other),
        };
        assert_eq!(payload.phone, "+15550000");
        assert_eq!(payload.name, "Grace Hopper");
        assert_eq!(machine.status(), SubmissionStatus::Loading);
    }

    #[test]
    fn test_invalid_phone_keeps_status() {
        let mut machine = filled("abc1234");

        assert_eq!(
            machine.begin_submit(),
            SubmitOutcome::Rejected(ValidationError::NonDigit)
        );
        assert_eq!(machine.status(), SubmissionStatus::Idle);
        assert_eq!(machine.phone_error(), Some(ValidationError::NonDigit));
    }

    #[test]
    fn test_short_phone_reports_length() {
        let mut machine = filled("123456");
        assert_eq!(
            machine.begin_submit(),
            SubmitOutcome::Rejected(ValidationError::InvalidLength)
        );
    }

    #[test]
    fn test_rejection_from_error_status_stays_error() {
        let mut machine = filled("555-0000");
        machine.begin_submit();
        machine.resolve(&failure());
        assert_eq!(machine.status(), SubmissionStatus::Error);

        machine.edit(FormField::Phone, "12");
        assert!(matches!(machine.begin_submit(), SubmitOutcome::Rejected(_)));
        assert_eq!(machine.status(), SubmissionStatus::Error);
    }

    #[test]
    fn test_second_submit_while_loading_is_suppressed() {
        let mut machine = filled("555-0000");
        assert!(matches!(machine.begin_submit(), SubmitOutcome::Dispatched(_)));
        assert_eq!(
            machine.begin_submit(),
            SubmitOutcome::Suppressed(SubmissionStatus::Loading)
        );
    }

    #[test]
    fn test_success_clears_form_and_blocks_resubmit() {
        let mut machine = filled("555-0000");
        machine.select_country(CountryCode::by_code("+44").unwrap());
        machine.begin_submit();

        let ticket = machine.resolve(&Ok(()));
        assert!(ticket.is_some());
        assert_eq!(machine.status(), SubmissionStatus::Success);
        assert!(machine.form().is_empty());
        assert_eq!(machine.country().code, "+44");

        assert_eq!(
            machine.begin_submit(),
            SubmitOutcome::Suppressed(SubmissionStatus::Success)
        );
    }

    #[test]
    fn test_failure_keeps_form() {
        let mut machine = filled("555-0000");
        let before = machine.form().clone();
        machine.begin_submit();

        let ticket = machine.resolve(&failure()).unwrap();
        assert_eq!(machine.status(), SubmissionStatus::Error);
        assert_eq!(machine.form(), &before);

        assert!(machine.expire(ticket));
        assert_eq!(machine.status(), SubmissionStatus::Idle);
    }

    #[test]
    fn test_stale_ticket_is_ignored() {
        let mut machine = filled("555-0000");
        machine.begin_submit();
        let stale = machine.resolve(&failure()).unwrap();

        // retry from Error supersedes the first timer
        assert!(matches!(machine.begin_submit(), SubmitOutcome::Dispatched(_)));
        assert!(!machine.expire(stale));
        assert_eq!(machine.status(), SubmissionStatus::Loading);

        let fresh = machine.resolve(&Ok(())).unwrap();
        assert!(!machine.is_current(&stale));
        assert!(machine.is_current(&fresh));
        assert!(!machine.expire(stale));
        assert_eq!(machine.status(), SubmissionStatus::Success);
        assert!(machine.expire(fresh));
        assert!(!machine.expire(fresh));
    }

    #[test]
    fn test_edits_blocked_while_loading() {
        let mut machine = filled("555-0000");
        machine.begin_submit();

        assert!(!machine.edit(FormField::Name, "Someone Else"));
        assert!(!machine.select_country(CountryCode::by_code("+7").unwrap()));
        assert_eq!(machine.form().name, "Grace Hopper");
        assert_eq!(machine.country().code, "+1");
    }

    #[test]
    fn test_phone_edit_clears_error() {
        let mut machine = filled("abc");
        machine.begin_submit();
        assert!(machine.phone_error().is_some());

        machine.edit(FormField::Name, "Still Grace");
        assert!(machine.phone_error().is_some());

        machine.edit(FormField::Phone, "abcd");
        assert_eq!(machine.phone_error(), None);
    }

    #[test]
    fn test_edits_allowed_after_success() {
        let mut machine = filled("555-0000");
        machine.begin_submit();
        machine.resolve(&Ok(()));

        assert!(machine.edit(FormField::Name, "Next Lead"));
        assert_eq!(machine.form().name, "Next Lead");
    }

    #[test]
    fn test_resolve_without_inflight_is_ignored() {
        let mut machine = filled("555-0000");
        assert!(machine.resolve(&Ok(())).is_none());
        assert_eq!(machine.status(), SubmissionStatus::Idle);
        assert!(!machine.form().is_empty());
    }

    #[test]
    fn test_abandon_returns_to_idle_and_ignores_late_result() {
        let mut machine = filled("555-0000");
        machine.begin_submit();

        assert!(machine.abandon());
        assert_eq!(machine.status(), SubmissionStatus::Idle);
        assert!(machine.resolve(&Ok(())).is_none());
        assert!(!machine.form().is_empty());
        assert!(!machine.abandon());
    }
}
