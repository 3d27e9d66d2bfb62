//! Ticket Classification Engine
//!
//! Combines an LLM oracle with the deterministic keyword rule set
//! under a strict precedence order: outage wording short-circuits
//! everything, keyword rules correct the oracle where it is known to
//! be unreliable, and every oracle fault resolves to the keyword-only
//! fallback instead of surfacing to the caller.

mod engine;
mod parse;
mod prompt;

pub use engine::{Classifier, ClassifierConfig};
pub use prompt::CLASSIFY_PROMPT;
