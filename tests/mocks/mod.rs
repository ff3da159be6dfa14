pub mod mock_submission_client;

pub use mock_submission_client::{MockResponse, MockSubmissionClient};
