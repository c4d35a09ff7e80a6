//! Pattern table for the primary recognizer
//!
//! Each entry couples a compiled regex with a base confidence and the
//! context words that can boost it. Order matters: earlier entries win
//! span overlaps, so the most specific formats come first.

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::labels;

// ============================================================================
// COMPILED REGEXES
// ============================================================================

// A pattern that fails to compile stays None and is skipped at runtime
macro_rules! pii_regex {
    ($name:ident, $pattern:expr) => {
        pub static $name: Lazy<Option<Regex>> = Lazy::new(|| Regex::new($pattern).ok());
    };
}

pii_regex!(EMAIL_RE, r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b");
pii_regex!(SSN_RE, r"\b\d{3}-\d{2}-\d{4}\b");
pii_regex!(CREDIT_CARD_RE, r"\b(?:\d{4}[ -]?){3}\d{3,4}\b");
pii_regex!(IBAN_RE, r"\b[A-Z]{2}\d{2}[A-Z0-9]{11,30}\b");
pii_regex!(INTL_PHONE_RE, r"\+\d{1,3}[ -]?\d{4,5}[ -]?\d{4,6}\b");
pii_regex!(
    US_PHONE_RE,
    r"(?:\+1[-. ]?)?(?:\(\d{3}\)[-. ]?|\b\d{3}[-. ]?)\d{3}[-. ]?\d{4}\b"
);
pii_regex!(GROUPED_PHONE_RE, r"\b\d{5}[ -]\d{5}\b");
pii_regex!(LOCAL_PHONE_RE, r"\b\d{3}[-.]\d{4}\b");
pii_regex!(IP_RE, r"\b(?:\d{1,3}\.){3}\d{1,3}\b");
pii_regex!(URL_RE, r#"https?://[^\s<>"]+|\bwww\.[^\s<>"]+"#);
pii_regex!(NUMERIC_DATE_RE, r"\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b");
pii_regex!(MEDICAL_LICENSE_RE, r"\b[A-Z]{2}\d{7}\b");

// ============================================================================
// PATTERN TABLE
// ============================================================================

/// One recognizer pattern
pub struct PiiPattern {
    pub label: &'static str,
    pub regex: &'static Lazy<Option<Regex>>,
    pub base_confidence: f32,
    /// Nearby words that raise confidence by CONTEXT_BOOST
    pub context_words: &'static [&'static str],
}

/// Confidence added when a context word appears near the match
pub const CONTEXT_BOOST: f32 = 0.35;

/// Window in bytes around a match scanned for context words
pub const CONTEXT_WINDOW: usize = 40;

static PATTERNS: [PiiPattern; 12] = [
    PiiPattern {
        label: labels::EMAIL_ADDRESS,
        regex: &EMAIL_RE,
        base_confidence: 0.95,
        context_words: &["email", "mail", "contact", "reach", "write"],
    },
    PiiPattern {
        label: labels::US_SSN,
        regex: &SSN_RE,
        base_confidence: 0.85,
        context_words: &["ssn", "social security", "social"],
    },
    PiiPattern {
        label: labels::CREDIT_CARD,
        regex: &CREDIT_CARD_RE,
        base_confidence: 0.9,
        context_words: &["card", "credit", "visa", "mastercard", "payment"],
    },
    PiiPattern {
        label: labels::IBAN_CODE,
        regex: &IBAN_RE,
        base_confidence: 0.8,
        context_words: &["iban", "bank", "account", "transfer"],
    },
    PiiPattern {
        label: labels::PHONE_NUMBER,
        regex: &INTL_PHONE_RE,
        base_confidence: 0.75,
        context_words: &["call", "phone", "cell", "mobile", "text", "reach", "dial"],
    },
    PiiPattern {
        label: labels::PHONE_NUMBER,
        regex: &US_PHONE_RE,
        base_confidence: 0.75,
        context_words: &["call", "phone", "cell", "mobile", "text", "reach", "dial"],
    },
    PiiPattern {
        label: labels::PHONE_NUMBER,
        regex: &GROUPED_PHONE_RE,
        base_confidence: 0.65,
        context_words: &["call", "phone", "cell", "mobile", "text", "reach", "dial"],
    },
    PiiPattern {
        label: labels::PHONE_NUMBER,
        regex: &LOCAL_PHONE_RE,
        base_confidence: 0.5,
        context_words: &["call", "phone", "cell", "mobile", "text", "reach", "dial"],
    },
    PiiPattern {
        label: labels::IP_ADDRESS,
        regex: &IP_RE,
        base_confidence: 0.6,
        context_words: &["ip", "server", "host"],
    },
    PiiPattern {
        label: labels::URL,
        regex: &URL_RE,
        base_confidence: 0.55,
        context_words: &[],
    },
    PiiPattern {
        label: labels::DATE,
        regex: &NUMERIC_DATE_RE,
        base_confidence: 0.6,
        context_words: &["born", "birthday", "dob", "date"],
    },
    PiiPattern {
        label: labels::MEDICAL_LICENSE,
        regex: &MEDICAL_LICENSE_RE,
        base_confidence: 0.4,
        context_words: &["dea", "license", "medical", "prescriber"],
    },
];

/// Patterns in priority order
pub fn all_patterns() -> &'static [PiiPattern] {
    &PATTERNS
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_patterns_compile() {
        for pattern in all_patterns() {
            assert!(
                pattern.regex.is_some(),
                "pattern for {} failed to compile",
                pattern.label
            );
        }
    }

    #[test]
    fn test_confidences_in_range() {
        for pattern in all_patterns() {
            assert!(pattern.base_confidence > 0.0 && pattern.base_confidence <= 1.0);
            assert!(pattern.base_confidence + CONTEXT_BOOST <= 1.0 + CONTEXT_BOOST);
        }
    }

    #[test]
    fn test_email_regex() {
        let re = EMAIL_RE.as_ref().unwrap();
        assert!(re.is_match("john.doe@company.com"));
        assert!(re.is_match("a+tag@sub.domain.org"));
        assert!(!re.is_match("not-an-email"));
    }

    #[test]
    fn test_ssn_regex() {
        let re = SSN_RE.as_ref().unwrap();
        assert!(re.is_match("123-45-6789"));
        assert!(!re.is_match("123-456-789"));
    }

    #[test]
    fn test_phone_variants() {
        assert!(US_PHONE_RE.as_ref().unwrap().is_match("555-123-4567"));
        assert!(US_PHONE_RE.as_ref().unwrap().is_match("(555) 123-4567"));
        assert!(US_PHONE_RE.as_ref().unwrap().is_match("9876543210"));
        assert!(LOCAL_PHONE_RE.as_ref().unwrap().is_match("555-1234"));
        assert!(INTL_PHONE_RE.as_ref().unwrap().is_match("+91 98765 43210"));
        assert!(GROUPED_PHONE_RE.as_ref().unwrap().is_match("98765-43210"));
    }

    #[test]
    fn test_numeric_date_regex() {
        let re = NUMERIC_DATE_RE.as_ref().unwrap();
        assert!(re.is_match("04/12/2015"));
        assert!(re.is_match("3-15-16"));
        assert!(!re.is_match("2024"));
    }

    #[test]
    fn test_email_first_in_priority() {
        assert_eq!(all_patterns()[0].label, labels::EMAIL_ADDRESS);
    }
}
