//! Sensitive keyword scan
//!
//! Presence-based: each keyword counts once no matter how often it appears.

/// Context keywords that raise text sensitivity
pub const SENSITIVE_KEYWORDS: &[&str] = &[
    "password",
    "ssn",
    "social security",
    "credit card",
    "bank account",
    "routing number",
    "passport",
    "license",
    "medical",
    "diagnosis",
    "therapy",
    "salary",
    "income",
    "address",
    "home",
    "live at",
];

/// Number of distinct keywords present in the text (case-insensitive)
pub fn sensitive_keyword_count(text: &str) -> usize {
    let lower = text.to_lowercase();
    SENSITIVE_KEYWORDS
        .iter()
        .filter(|keyword| lower.contains(*keyword))
        .count()
}
