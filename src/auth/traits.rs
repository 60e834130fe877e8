//! Trait abstraction for submission tasks to enable swapping in a real backend

use async_trait::async_trait;
use thiserror::Error;

/// Failure reported by a submission task
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("{0}")]
    Rejected(String),
}

/// Asynchronous unit of work that attempts a sign-in or sign-up with validated values
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionTask<V: Send + Sync + 'static>: Send + Sync {
    async fn run(&self, data: V) -> Result<(), SubmissionError>;
}
