//! Sign-in and sign-up submission tasks

mod simulated;
mod traits;

pub use simulated::SimulatedSubmission;
pub use traits::{SubmissionError, SubmissionTask};

#[cfg(test)]
pub use traits::MockSubmissionTask;
