//! Lead form lifecycle: status, pure state machine, and the async session
//! that performs the submission and the timed revert to idle.

pub mod machine;
pub mod session;
pub mod status;

pub use machine::{FormStateMachine, ResetTicket, SubmitOutcome, DEFAULT_RESET_DELAY};
pub use session::FormSession;
pub use status::{SubmissionStatus, ERROR_BANNER};
