//! LLM Oracle Boundary
//!
//! The triage engine treats the external model as a pluggable oracle
//! with one operation: `generate(prompt, options) -> text`. The real
//! implementation talks to the Gemini API over HTTP; tests use a
//! canned oracle so the correction logic stays deterministic.

mod canned;
mod gemini;

pub use canned::CannedOracle;
pub use gemini::{GeminiClient, GeminiConfig};

use async_trait::async_trait;
use thiserror::Error;

/// Errors from a single oracle invocation
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
    #[error("empty response from model")]
    EmptyResponse,
}

/// Options for a single generation call
#[derive(Debug, Clone, Copy)]
pub struct GenerateOptions {
    /// Sampling temperature; 0.0 for deterministic output
    pub temperature: f64,
    /// Hard cap on completion length
    pub max_output_tokens: u32,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            max_output_tokens: 100,
        }
    }
}

/// Pluggable generative-text capability.
///
/// One attempt per call, no internal retry: callers that can fall
/// back to deterministic logic should do so instead of re-asking.
#[async_trait]
pub trait Oracle: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<String, OracleError>;
}
