//! Service Settings
//!
//! Loaded from an optional `Triage.toml` plus `TRIAGE_`-prefixed
//! environment variables. A missing API key is not an error: the
//! service runs with keyword-only classification.

use classifier::{Classifier, ClassifierConfig};
use config::{Config, ConfigError, Environment, File};
use llm_oracle::{GeminiClient, GeminiConfig, Oracle};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Service settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Listen address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Gemini API key; absent means keyword-only classification
    #[serde(default)]
    pub google_api_key: Option<String>,
    /// Model identifier for the oracle
    #[serde(default = "default_model")]
    pub model: String,
    /// Oracle request timeout in seconds
    #[serde(default = "default_oracle_timeout_secs")]
    pub oracle_timeout_secs: u64,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_oracle_timeout_secs() -> u64 {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            google_api_key: None,
            model: default_model(),
            oracle_timeout_secs: default_oracle_timeout_secs(),
        }
    }
}

impl Settings {
    /// Load settings from file and environment
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("Triage").required(false))
            .add_source(Environment::with_prefix("TRIAGE"))
            .build()?
            .try_deserialize()
    }

    /// Build the classification engine from these settings.
    ///
    /// No key, a blank key, or a client construction failure all
    /// degrade to keyword-only classification.
    pub fn build_classifier(&self) -> Classifier {
        let oracle: Option<Arc<dyn Oracle>> = match self.google_api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => {
                let mut gemini = GeminiConfig::new(key);
                gemini.model = self.model.clone();
                gemini.request_timeout = Duration::from_secs(self.oracle_timeout_secs);
                match GeminiClient::new(gemini) {
                    Ok(client) => {
                        info!(model = %self.model, "oracle configured");
                        Some(Arc::new(client))
                    }
                    Err(error) => {
                        warn!(%error, "oracle client build failed, running keyword-only");
                        None
                    }
                }
            }
            _ => {
                info!("no API key configured, running keyword-only");
                None
            }
        };
        Classifier::new(oracle, ClassifierConfig::default())
    }
}
