//! Reasoning provider port
//!
//! Defines the interface reasoning-backed agents use to talk to a language
//! model. Adapters live in the infrastructure layer.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while asking a provider for a completion
#[derive(Error, Debug)]
pub enum ReasoningError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// A single completion request
#[derive(Debug, Clone, PartialEq)]
pub struct ReasoningRequest {
    pub system_prompt: String,
    pub prompt: String,
}

impl ReasoningRequest {
    pub fn new(system_prompt: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            prompt: prompt.into(),
        }
    }
}

/// Completion text plus what it cost
#[derive(Debug, Clone, PartialEq)]
pub struct ReasoningResponse {
    pub text: String,
    /// Estimated spend in USD (0.0 when the provider is not metered)
    pub cost_usd: f64,
}

impl ReasoningResponse {
    pub fn new(text: impl Into<String>, cost_usd: f64) -> Self {
        Self {
            text: text.into(),
            cost_usd,
        }
    }
}

/// Gateway to a reasoning backend
#[async_trait]
pub trait ReasoningProvider: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    /// Ask for one completion
    async fn complete(&self, request: &ReasoningRequest)
    -> Result<ReasoningResponse, ReasoningError>;
}
