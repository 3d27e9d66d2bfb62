//! Classification Orchestrator

use crate::parse::parse_reply;
use crate::prompt::CLASSIFY_PROMPT;
use keyword_rules::{
    classify_by_keywords, looks_account, looks_billing, looks_outage_or_down,
    looks_technical, suggest_priority,
};
use llm_oracle::{GenerateOptions, Oracle};
use std::sync::Arc;
use taxonomy::{Category, Classification, Priority};
use tracing::{debug, warn};

/// Classifier configuration
#[derive(Debug, Clone, Copy)]
pub struct ClassifierConfig {
    /// Sampling temperature for the oracle call
    pub temperature: f64,
    /// Completion length cap for the oracle call
    pub max_output_tokens: u32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            max_output_tokens: 100,
        }
    }
}

/// Hybrid classifier over ticket descriptions.
///
/// Stateless per call; safe to share across handlers. With no oracle
/// configured the output is a pure function of the text. With an
/// oracle, the correction layer is deterministic for a fixed reply,
/// but the reply itself may vary across model versions, so callers
/// must not assume cacheable results on this path.
pub struct Classifier {
    oracle: Option<Arc<dyn Oracle>>,
    options: GenerateOptions,
}

impl Classifier {
    /// Create a classifier; `None` means no oracle is configured and
    /// every call resolves through the keyword rules alone.
    pub fn new(oracle: Option<Arc<dyn Oracle>>, config: ClassifierConfig) -> Self {
        Self {
            oracle,
            options: GenerateOptions {
                temperature: config.temperature,
                max_output_tokens: config.max_output_tokens,
            },
        }
    }

    /// Create a keyword-only classifier
    pub fn keyword_only() -> Self {
        Self::new(None, ClassifierConfig::default())
    }

    /// Whether an oracle is configured
    pub fn has_oracle(&self) -> bool {
        self.oracle.is_some()
    }

    /// Classify a ticket description.
    ///
    /// Returns `None` only for blank input. Every oracle fault is
    /// absorbed here and resolved via the keyword fallback.
    pub async fn classify(&self, description: &str) -> Option<Classification> {
        let trimmed = description.trim();
        if trimmed.is_empty() {
            return None;
        }

        // Outage wording dominates everything, including a configured
        // oracle: false negatives here are the costly case.
        if looks_outage_or_down(description) {
            return Some(Classification::new(Category::Technical, Priority::Critical));
        }

        let Some(oracle) = &self.oracle else {
            return Some(classify_by_keywords(description));
        };

        let prompt = format!("{}{}", CLASSIFY_PROMPT, trimmed);
        match oracle.generate(&prompt, &self.options).await {
            Ok(reply) => match parse_reply(&reply) {
                Some(suggestion) => Some(correct(description, suggestion)),
                None => {
                    debug!("oracle reply unusable, falling back to keyword rules");
                    Some(classify_by_keywords(description))
                }
            },
            Err(error) => {
                warn!(%error, "oracle call failed, falling back to keyword rules");
                Some(classify_by_keywords(description))
            }
        }
    }
}

/// Apply the keyword correction layer to an oracle suggestion.
fn correct(description: &str, suggestion: Classification) -> Classification {
    let mut category = suggestion.category;
    let mut priority = suggestion.priority;

    // The oracle over-reports "technical" and under-reports the rest;
    // prefer account/billing when the text matches those vocabularies
    // and has no technical wording of its own.
    if category == Category::Technical {
        if looks_account(description) && !looks_technical(description) {
            category = Category::Account;
        } else if looks_billing(description) && !looks_technical(description) {
            category = Category::Billing;
        }
    } else if category == Category::General && looks_technical(description) {
        category = Category::Technical;
    }

    // Second outage pass: "can't log in because the platform is down"
    // must resolve technical even after the account correction above.
    if looks_outage_or_down(description) {
        category = Category::Technical;
    }

    // "medium" is the oracle's cop-out default; trust the keyword
    // tiers when they have an opinion.
    if priority == Priority::Medium {
        let keyword_priority = suggest_priority(description);
        if keyword_priority != Priority::Medium {
            priority = keyword_priority;
        }
    }

    if looks_outage_or_down(description) {
        priority = Priority::Critical;
    }

    Classification::new(category, priority)
}
