//! Keyword Pattern Groups
//!
//! Each group is a precompiled case-insensitive pattern over whole
//! words or whitespace-tolerant phrases. The lists below are the
//! authoritative precedence order: category resolves account >
//! billing > technical > general, priority resolves critical > high >
//! low > medium.

use regex::Regex;
use std::sync::LazyLock;
use taxonomy::{Category, Classification, Priority};

/// Technical vocabulary: APIs, server errors, integration failures
static TECHNICAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(api|webhook|endpoint|500|502|503|server\s*error|integration|bug|crash|timeout|logs)\b",
    )
    .unwrap()
});

/// Account vocabulary: login, password, and access problems
static ACCOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(login|log\s*in|password|reset\s*password|unlock|account|permission|profile|access|locked\s*out)\b",
    )
    .unwrap()
});

/// Billing vocabulary: charges, refunds, invoices, subscriptions
static BILLING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(charge|charged|refund|invoice|payment|subscription|billed|billing|duplicate\s*charge)\b",
    )
    .unwrap()
});

/// Outage vocabulary. These phrases force (technical, critical) no
/// matter what else matches, so account wording like "can't log in
/// because the platform is down" still resolves to an outage.
static OUTAGE_OR_DOWN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(outage|system\s*down|platform\s*down|been\s+down|is\s+down|full\s+outage|data\s*loss|breach)\b",
    )
    .unwrap()
});

/// Critical-priority tier
static CRITICAL_PRIORITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(outage|down\s*for|system\s*down|platform\s*down|been\s+down|full\s+outage|data\s*loss|breach|security\s*incident|urgent|restore|backup)\b",
    )
    .unwrap()
});

/// High-priority tier
static HIGH_PRIORITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(no\s*workaround|blocking|deadline|can't\s*access|cannot\s*access|as\s*soon\s*as\s*possible|critical\s*deadline)\b",
    )
    .unwrap()
});

/// Low-priority tier
static LOW_PRIORITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(minor|cosmetic|not\s*urgent|feature\s*request|would\s*be\s*nice|small\s*issue)\b",
    )
    .unwrap()
});

/// "not urgent" belongs to the low tier and must not trip the bare
/// "urgent" critical term; masked out before the critical check.
static NOT_URGENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bnot\s*urgent\b").unwrap());

/// Whether the description matches the technical vocabulary
pub fn looks_technical(description: &str) -> bool {
    TECHNICAL.is_match(description)
}

/// Whether the description matches the account vocabulary
pub fn looks_account(description: &str) -> bool {
    ACCOUNT.is_match(description)
}

/// Whether the description matches the billing vocabulary
pub fn looks_billing(description: &str) -> bool {
    BILLING.is_match(description)
}

/// Whether the description reads like an outage or downtime report
pub fn looks_outage_or_down(description: &str) -> bool {
    OUTAGE_OR_DOWN.is_match(description)
}

/// Suggest a priority tier from the description alone.
///
/// Critical terms are checked first, then high, then low; anything
/// else is medium. Total and deterministic.
pub fn suggest_priority(description: &str) -> Priority {
    let masked = NOT_URGENT.replace_all(description, " ");
    if CRITICAL_PRIORITY.is_match(&masked) {
        Priority::Critical
    } else if HIGH_PRIORITY.is_match(description) {
        Priority::High
    } else if LOW_PRIORITY.is_match(description) {
        Priority::Low
    } else {
        Priority::Medium
    }
}

/// Classify a description from keywords alone.
///
/// This is the full fallback path: outage wording short-circuits to
/// (technical, critical); otherwise the first matching category group
/// wins in the order account > billing > technical > general, paired
/// with the suggested priority tier.
pub fn classify_by_keywords(description: &str) -> Classification {
    if looks_outage_or_down(description) {
        return Classification::new(Category::Technical, Priority::Critical);
    }

    let priority = suggest_priority(description);

    let category = if looks_account(description) {
        Category::Account
    } else if looks_billing(description) {
        Category::Billing
    } else if looks_technical(description) {
        Category::Technical
    } else {
        Category::General
    };

    Classification::new(category, priority)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_technical_keywords() {
        assert!(looks_technical("the API returns a 500 error"));
        assert!(looks_technical("webhook timeout in the logs"));
        assert!(!looks_technical("please refund my payment"));
        assert!(!looks_technical(""));
    }

    #[test]
    fn test_account_keywords() {
        assert!(looks_account("I can't log in"));
        assert!(looks_account("reset password link broken"));
        assert!(looks_account("I am locked out of my profile"));
        assert!(!looks_account("invoice is wrong"));
    }

    #[test]
    fn test_billing_keywords() {
        assert!(looks_billing("duplicate charge on my card"));
        assert!(looks_billing("cancel my subscription"));
        assert!(!looks_billing("the endpoint crashed"));
    }

    #[test]
    fn test_outage_keywords() {
        assert!(looks_outage_or_down("the system down since 9am"));
        assert!(looks_outage_or_down("the platform is down"));
        assert!(looks_outage_or_down("we suffered data loss"));
        assert!(looks_outage_or_down("possible security breach"));
        assert!(!looks_outage_or_down("slow dashboard"));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert!(looks_technical("API Timeout"));
        assert!(looks_outage_or_down("FULL OUTAGE"));
        assert_eq!(suggest_priority("URGENT"), Priority::Critical);
    }

    #[test]
    fn test_priority_tiers() {
        assert_eq!(suggest_priority("urgent, please restore"), Priority::Critical);
        assert_eq!(suggest_priority("this is blocking our release"), Priority::High);
        assert_eq!(
            suggest_priority("need this as soon as possible"),
            Priority::High
        );
        assert_eq!(suggest_priority("minor cosmetic issue"), Priority::Low);
        assert_eq!(suggest_priority("the button is misaligned"), Priority::Medium);
        assert_eq!(suggest_priority(""), Priority::Medium);
    }

    #[test]
    fn test_not_urgent_is_low_not_critical() {
        assert_eq!(suggest_priority("small tweak, not urgent"), Priority::Low);
        assert_eq!(suggest_priority("this is urgent"), Priority::Critical);
    }

    #[test]
    fn test_critical_beats_high_and_low() {
        // "urgent" (critical) and "blocking" (high) in the same text
        assert_eq!(
            suggest_priority("urgent and blocking, minor detail aside"),
            Priority::Critical
        );
    }

    #[test]
    fn test_keyword_classification_precedence() {
        // account wins over billing when both match
        let c = classify_by_keywords("charged twice and now locked out of my account");
        assert_eq!(c.category, Category::Account);

        // billing wins over technical
        let c = classify_by_keywords("the invoice API double billed me");
        assert_eq!(c.category, Category::Billing);

        let c = classify_by_keywords("nothing matches here");
        assert_eq!(c.category, Category::General);
        assert_eq!(c.priority, Priority::Medium);
    }

    #[test]
    fn test_outage_short_circuits_keyword_classification() {
        let c = classify_by_keywords("can't log in because the platform is down");
        assert_eq!(c.category, Category::Technical);
        assert_eq!(c.priority, Priority::Critical);
    }

    #[test]
    fn test_word_boundaries() {
        // "apiary" must not trip the "api" keyword
        assert!(!looks_technical("we keep bees in an apiary"));
        // "accountant" contains "account" but not on a word boundary
        assert!(!looks_account("my accountant said hello"));
    }

    proptest! {
        #[test]
        fn prop_suggest_priority_is_total(s in ".*") {
            // never panics, always lands in the enumeration
            let p = suggest_priority(&s);
            prop_assert!(Priority::ALL.contains(&p));
        }

        #[test]
        fn prop_outage_always_technical_critical(prefix in "[a-z ]{0,20}", suffix in "[a-z ]{0,20}") {
            let text = format!("{} full outage {}", prefix, suffix);
            let c = classify_by_keywords(&text);
            prop_assert_eq!(c.category, Category::Technical);
            prop_assert_eq!(c.priority, Priority::Critical);
        }

        #[test]
        fn prop_classification_is_deterministic(s in ".*") {
            prop_assert_eq!(classify_by_keywords(&s), classify_by_keywords(&s));
        }
    }
}
