//! Placeholder submission task used until the authentication service exists

use super::traits::{SubmissionError, SubmissionTask};
use async_trait::async_trait;
use std::fmt::Debug;
use std::time::Duration;
use tracing::info;

/// Waits a fixed delay, logs the attempt and always succeeds
#[derive(Debug, Clone)]
pub struct SimulatedSubmission {
    /// Attempt kind used in the log line ("Login", "Register")
    kind: &'static str,
    delay: Duration,
}

impl SimulatedSubmission {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            delay: Self::DEFAULT_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl<V> SubmissionTask<V> for SimulatedSubmission
where
    V: Debug + Send + Sync + 'static,
{
    async fn run(&self, data: V) -> Result<(), SubmissionError> {
        tokio::time::sleep(self.delay).await;
        info!(kind = self.kind, ?data, "{} attempt", self.kind);
        Ok(())
    }
}
