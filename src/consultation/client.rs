//! HTTP client for the consultation service
//!
//! A single `POST` of `{ "keluhan": ..., "file": [...] }` answered by
//! `{ "saran": ... }`. The endpoint is resolved on every call, and failures are
//! handed back to the caller as they come from the transport: no retry, no
//! timeout, no authentication.

use super::traits::ConsultationApi;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Environment variable holding the consultation endpoint URL
pub const ENDPOINT_ENV: &str = "BACKEND_API_URL";

/// Request body sent to the consultation service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultationRequest {
    #[serde(rename = "keluhan")]
    pub complaint: String,
    #[serde(rename = "file")]
    pub attachments: Vec<Value>,
}

/// Response body returned by the consultation service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultationResponse {
    #[serde(rename = "saran")]
    pub suggestion: String,
}

#[derive(Debug, Error)]
pub enum ConsultationError {
    #[error("consultation endpoint is not configured (set {0})")]
    NotConfigured(&'static str),

    #[error("consultation request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Where the endpoint URL comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Read from the environment at call time, with an optional configured fallback
    Env {
        var: &'static str,
        fallback: Option<String>,
    },
    Fixed(String),
}

impl Endpoint {
    /// Endpoint backed by `BACKEND_API_URL`
    pub fn from_env(fallback: Option<String>) -> Self {
        Endpoint::Env {
            var: ENDPOINT_ENV,
            fallback,
        }
    }

    /// Current URL; an empty variable counts as unset, empty when nothing is configured
    pub fn resolve(&self) -> String {
        match self {
            Endpoint::Env { var, fallback } => std::env::var(var)
                .ok()
                .filter(|url| !url.is_empty())
                .or_else(|| fallback.clone())
                .unwrap_or_default(),
            Endpoint::Fixed(url) => url.clone(),
        }
    }

    fn source(&self) -> &'static str {
        match self {
            Endpoint::Env { var, .. } => var,
            Endpoint::Fixed(_) => "a fixed endpoint",
        }
    }
}

/// Client for communicating with the consultation service
pub struct ConsultationClient {
    http: Client,
    endpoint: Endpoint,
}

impl ConsultationClient {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            http: Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl ConsultationApi for ConsultationClient {
    async fn fetch_consultation(
        &self,
        complaint: &str,
        attachments: Vec<Value>,
    ) -> Result<ConsultationResponse, ConsultationError> {
        let url = self.endpoint.resolve();
        if url.is_empty() {
            return Err(ConsultationError::NotConfigured(self.endpoint.source()));
        }

        let body = ConsultationRequest {
            complaint: complaint.to_string(),
            attachments,
        };
        debug!(%url, attachments = body.attachments.len(), "Sending consultation request");

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<ConsultationResponse>().await?)
    }
}
