//! Submission status and the affordances a view derives from it.

use serde::Serialize;
use std::fmt;

/// Message shown under the button while the status is `Error`.
pub const ERROR_BANNER: &str = "Something went wrong. Please try again later.";

/// Lifecycle of one submit action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl SubmissionStatus {
    /// `Success` or `Error`: a resolved submission waiting to revert to `Idle`.
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }

    /// Whether a submit action may start from this status.
    pub fn submit_enabled(self) -> bool {
        matches!(self, Self::Idle | Self::Error)
    }

    /// Whether field edits and country selection are accepted.
    pub fn inputs_enabled(self) -> bool {
        self != Self::Loading
    }

    /// Text for the submit button.
    pub fn button_label(self) -> &'static str {
        match self {
            Self::Idle => "Submit",
            Self::Loading => "Sending...",
            Self::Success => "Message Sent",
            Self::Error => "Try Again",
        }
    }

    /// Form-level message, if the status has one.
    pub fn banner(self) -> Option<&'static str> {
        match self {
            Self::Error => Some(ERROR_BANNER),
            _ => None,
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success => "success",
            Self::Error => "error",
        };
        write!(f, "{}", name)
    }
}
