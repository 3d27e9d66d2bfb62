//! Classification Prompt
//!
//! Kept in source so the exact instructions sent to the model are
//! reviewable and versioned with the correction logic they pair with.
//! The trimmed ticket description is appended directly after this
//! block.

pub const CLASSIFY_PROMPT: &str = r#"You are a support ticket classifier. Output ONLY valid JSON.

Rules (apply in order):
- If the ticket is about LOGIN, PASSWORD, RESET PASSWORD, UNLOCK ACCOUNT, or account access -> category MUST be "account".
- If the ticket is about PAYMENT, REFUND, INVOICE, CHARGE, SUBSCRIPTION, or billing -> category MUST be "billing".
- If the ticket is about API, webhook, endpoint, 500 error, server error, integration, or logs -> category MUST be "technical".
- Otherwise use "general".

Priority rules:
- critical: outage, system down, data loss, breach, security incident, "urgent" or "restore"
- high: "no workaround", "blocking", "deadline", "can't access", "as soon as possible"
- low: "minor", "cosmetic", "not urgent", "feature request", "would be nice"
- medium: everything else

1. category: one of billing, technical, account, general
2. priority: one of low, medium, high, critical

Output format (no other text):
{"category": "billing|technical|account|general", "priority": "low|medium|high|critical"}

Ticket description:
"#;
