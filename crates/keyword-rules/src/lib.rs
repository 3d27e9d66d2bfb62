//! Keyword Rule Set
//!
//! Deterministic keyword heuristics over ticket descriptions. These
//! back the triage engine whenever the LLM is unavailable, fails, or
//! disagrees with what the text plainly says.

mod rules;

pub use rules::{
    classify_by_keywords, looks_account, looks_billing, looks_outage_or_down,
    looks_technical, suggest_priority,
};
