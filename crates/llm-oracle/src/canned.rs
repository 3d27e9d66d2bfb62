//! Canned Oracle for Tests

use crate::{GenerateOptions, Oracle, OracleError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Oracle that replays a fixed response or a fixed failure.
///
/// Keeps a call counter so tests can assert the short-circuit paths
/// never reach the oracle at all.
pub struct CannedOracle {
    response: Option<String>,
    calls: AtomicUsize,
}

impl CannedOracle {
    /// Oracle that always answers with the given text
    pub fn with_response(text: impl Into<String>) -> Self {
        Self {
            response: Some(text.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Oracle that always fails with a transport-level API error
    pub fn failing() -> Self {
        Self {
            response: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of generate calls made so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Oracle for CannedOracle {
    async fn generate(
        &self,
        _prompt: &str,
        _options: &GenerateOptions,
    ) -> Result<String, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Some(text) => Ok(text.clone()),
            None => Err(OracleError::Api {
                status: 503,
                message: "canned failure".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_canned_response() {
        let oracle = CannedOracle::with_response("ok");
        let reply = oracle
            .generate("prompt", &GenerateOptions::default())
            .await
            .unwrap();
        assert_eq!(reply, "ok");
        assert_eq!(oracle.call_count(), 1);
    }

    #[tokio::test]
    async fn test_canned_failure() {
        let oracle = CannedOracle::failing();
        let err = oracle
            .generate("prompt", &GenerateOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, OracleError::Api { status: 503, .. }));
    }
}
