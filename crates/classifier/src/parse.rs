//! Oracle Reply Parsing
//!
//! The model is asked for exactly one JSON object, optionally wrapped
//! in a fenced code block. Anything else, and anything with values
//! outside the fixed vocabularies, is treated as "no oracle answer".

use regex::Regex;
use std::sync::LazyLock;
use taxonomy::{Category, Classification, Priority};

static FENCED_JSON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").unwrap());

/// Parse an oracle reply into a classification, or `None` when the
/// reply is empty, malformed, or outside the enumerations.
pub(crate) fn parse_reply(reply: &str) -> Option<Classification> {
    let mut text = reply.trim();
    if text.is_empty() {
        return None;
    }

    if text.contains("```") {
        if let Some(captures) = FENCED_JSON.captures(text) {
            text = captures.get(1).map_or(text, |m| m.as_str());
        }
    }

    let value: serde_json::Value = serde_json::from_str(text).ok()?;
    let category = value
        .get("category")?
        .as_str()?
        .to_lowercase()
        .parse::<Category>()
        .ok()?;
    let priority = value
        .get("priority")?
        .as_str()?
        .to_lowercase()
        .parse::<Priority>()
        .ok()?;

    Some(Classification::new(category, priority))
}
