//! Generative Text Client
//!
//! The estimation stage talks to an external text-completion service through
//! the `TextCompletion` trait, so tests can substitute a deterministic fake.
//! `OllamaClient` is the production implementation, targeting the Ollama
//! `/api/generate` endpoint with a bounded timeout and a single attempt per
//! request (no retries).

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::EstimatorConfig;

/// Failures of the completion call. All of them are non-fatal for the
/// surrounding prediction: the caller degrades to store data only.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Completion request failed: {0}")]
    Network(String),

    #[error("Completion request timed out after {0}s")]
    Timeout(u64),

    #[error("Completion service returned HTTP {0}: {1}")]
    Status(u16, String),

    #[error("Malformed completion reply: {0}")]
    Protocol(String),
}

/// Capability interface over an opaque text-completion service
#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Submit a prompt and return the raw completion text
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateReply {
    response: String,
}

/// Client for the Ollama text-generation API
pub struct OllamaClient {
    http: reqwest::Client,
    url: String,
    model: String,
    timeout_secs: u64,
}

impl OllamaClient {
    /// Create a new client with a bounded request timeout
    pub fn new(
        url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CompletionError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        Ok(Self {
            http,
            url: url.into(),
            model: model.into(),
            timeout_secs: timeout.as_secs(),
        })
    }

    /// Create a client from estimator configuration
    pub fn from_config(config: &EstimatorConfig) -> Result<Self, CompletionError> {
        Self::new(
            &config.url,
            &config.model,
            Duration::from_secs(config.timeout_secs),
        )
    }
}

#[async_trait]
impl TextCompletion for OllamaClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let reply = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout(self.timeout_secs)
                } else {
                    CompletionError::Network(e.to_string())
                }
            })?;

        let status = reply.status();
        if !status.is_success() {
            let body = reply.text().await.unwrap_or_default();
            return Err(CompletionError::Status(status.as_u16(), body));
        }

        let parsed: GenerateReply = reply
            .json()
            .await
            .map_err(|e| CompletionError::Protocol(e.to_string()))?;

        Ok(parsed.response)
    }
}
