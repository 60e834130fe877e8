//! Trait abstraction for the consultation client to enable mocking in tests

use super::client::{ConsultationError, ConsultationResponse};
use async_trait::async_trait;
use serde_json::Value;

/// Trait for consultation service operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConsultationApi: Send + Sync {
    /// Submit a complaint with attached file data and return the service's suggestion
    async fn fetch_consultation(
        &self,
        complaint: &str,
        attachments: Vec<Value>,
    ) -> Result<ConsultationResponse, ConsultationError>;
}
