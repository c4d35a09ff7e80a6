//! Shared types for the detection pipeline

use serde::{Deserialize, Serialize};

// ============================================================================
// ENTITY LABELS
// ============================================================================

/// Recognizer label strings, kept in one place
pub mod labels {
    pub const EMAIL_ADDRESS: &str = "EMAIL_ADDRESS";
    pub const PHONE_NUMBER: &str = "PHONE_NUMBER";
    pub const US_SSN: &str = "US_SSN";
    pub const CREDIT_CARD: &str = "CREDIT_CARD";
    pub const IBAN_CODE: &str = "IBAN_CODE";
    pub const IP_ADDRESS: &str = "IP_ADDRESS";
    pub const URL: &str = "URL";
    pub const DATE: &str = "DATE";
    pub const MEDICAL_LICENSE: &str = "MEDICAL_LICENSE";
    pub const PERSON: &str = "PERSON";
    pub const GPE: &str = "GPE";
    pub const LOC: &str = "LOC";
    pub const ORG: &str = "ORG";
}

/// Labels accepted from the supplementary recognizer; everything else it
/// emits is dropped during aggregation
pub const SUPPLEMENTARY_ALLOWED: [&str; 5] = [
    labels::PERSON,
    labels::GPE,
    labels::LOC,
    labels::ORG,
    labels::DATE,
];

/// Fixed confidence assigned to supplementary results (the lexical backend
/// has no calibrated scores of its own)
pub const SUPPLEMENTARY_CONFIDENCE: f32 = 0.85;

// ============================================================================
// PII ENTITY
// ============================================================================

/// One detected piece of PII, as surfaced to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiiEntity {
    /// Recognizer label, e.g. EMAIL_ADDRESS or PERSON
    #[serde(rename = "type")]
    pub entity_type: String,
    /// The matched slice of the input
    pub text: String,
    /// Byte offset where the match starts
    pub start: usize,
    /// Byte offset one past the match end
    pub end: usize,
    /// Detection confidence in [0, 1]
    pub confidence: f32,
}

impl PiiEntity {
    pub fn span(&self) -> (usize, usize) {
        (self.start, self.end)
    }
}

// ============================================================================
// ENTITY COUNTS
// ============================================================================

/// Entities grouped into the fixed feature buckets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityCounts {
    pub emails: usize,
    pub phones: usize,
    pub locations: usize,
    pub persons: usize,
    pub organizations: usize,
    pub dates: usize,
    /// Recognized but outside any named bucket
    pub other: usize,
}

impl EntityCounts {
    /// Entities that landed in a named bucket; `other` is excluded
    pub fn identified(&self) -> usize {
        self.emails + self.phones + self.locations + self.persons + self.organizations + self.dates
    }

    pub fn total(&self) -> usize {
        self.identified() + self.other
    }
}

// ============================================================================
// RECOGNIZER SEAM
// ============================================================================

/// Raw span from a backend, before aggregation resolves labels and text
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedSpan {
    pub label: String,
    pub start: usize,
    pub end: usize,
    pub confidence: f32,
}

/// Backend failure. The aggregator logs it and degrades; it never
/// propagates past detection.
#[derive(Debug, Clone)]
pub struct RecognizerError(pub String);

impl std::fmt::Display for RecognizerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Recognizer error: {}", self.0)
    }
}

impl std::error::Error for RecognizerError {}

/// One detection backend
pub trait Recognizer: Send + Sync {
    fn name(&self) -> &'static str;
    fn recognize(&self, text: &str) -> Result<Vec<RecognizedSpan>, RecognizerError>;
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_identified_excludes_other() {
        let counts = EntityCounts {
            emails: 1,
            phones: 2,
            locations: 0,
            persons: 1,
            organizations: 0,
            dates: 1,
            other: 3,
        };
        assert_eq!(counts.identified(), 5);
        assert_eq!(counts.total(), 8);
    }

    #[test]
    fn test_entity_serializes_with_type_key() {
        let entity = PiiEntity {
            entity_type: labels::EMAIL_ADDRESS.to_string(),
            text: "a@b.com".to_string(),
            start: 0,
            end: 7,
            confidence: 0.95,
        };
        let json = serde_json::to_value(&entity).unwrap();
        assert_eq!(json["type"], "EMAIL_ADDRESS");
        assert!(json.get("entity_type").is_none());
    }

    #[test]
    fn test_supplementary_allow_list() {
        assert!(SUPPLEMENTARY_ALLOWED.contains(&"PERSON"));
        assert!(SUPPLEMENTARY_ALLOWED.contains(&"GPE"));
        assert!(!SUPPLEMENTARY_ALLOWED.contains(&"EMAIL_ADDRESS"));
    }
}
