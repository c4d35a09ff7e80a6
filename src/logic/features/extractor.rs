//! Feature Extraction from Detected Entities
//!
//! Folds entity counts and text shape into the fixed feature vector the
//! scorers consume. All nine slots are filled on every call, so a text
//! with no PII still yields a valid vector.

use crate::logic::entities::{sensitive_keyword_count, EntityCounts};

use super::vector::{FeatureVector, FeatureVectorBuilder};

/// Build the feature vector for one analyzed text.
///
/// `text_length` counts characters, not bytes, so multi-byte scripts do
/// not inflate the length signal. Density only counts identified entity
/// classes; spans bucketed as "other" carry no density weight.
pub fn extract_features(text: &str, counts: &EntityCounts) -> FeatureVector {
    let text_length = text.chars().count();
    let identified = counts.identified();

    let entity_density = if text_length > 0 {
        identified as f32 / text_length as f32
    } else {
        0.0
    };

    FeatureVectorBuilder::new()
        .num_emails(counts.emails as f32)
        .num_phones(counts.phones as f32)
        .num_locations(counts.locations as f32)
        .num_persons(counts.persons as f32)
        .num_organizations(counts.organizations as f32)
        .num_dates(counts.dates as f32)
        .text_length(text_length as f32)
        .entity_density(entity_density)
        .sensitive_keywords_count(sensitive_keyword_count(text) as f32)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_features() {
        let counts = EntityCounts::default();
        let features = extract_features("The weather today is sunny and pleasant outside.", &counts);

        assert_eq!(features.get_by_name("text_length"), Some(48.0));
        assert_eq!(features.get_by_name("entity_density"), Some(0.0));
        assert_eq!(features.get_by_name("sensitive_keywords_count"), Some(0.0));
        assert_eq!(features.get_by_name("num_emails"), Some(0.0));
    }

    #[test]
    fn test_counts_fill_their_slots() {
        let counts = EntityCounts {
            emails: 2,
            phones: 1,
            locations: 3,
            persons: 1,
            organizations: 1,
            dates: 2,
            other: 4,
        };
        let features = extract_features("some text with pii in it here", &counts);

        assert_eq!(features.get_by_name("num_emails"), Some(2.0));
        assert_eq!(features.get_by_name("num_phones"), Some(1.0));
        assert_eq!(features.get_by_name("num_locations"), Some(3.0));
        assert_eq!(features.get_by_name("num_persons"), Some(1.0));
        assert_eq!(features.get_by_name("num_organizations"), Some(1.0));
        assert_eq!(features.get_by_name("num_dates"), Some(2.0));
    }

    #[test]
    fn test_density_excludes_other_bucket() {
        let counts = EntityCounts { other: 5, ..Default::default() };
        // 10 characters, zero identified entities
        let features = extract_features("0123456789", &counts);
        assert_eq!(features.get_by_name("entity_density"), Some(0.0));

        let counts = EntityCounts { persons: 1, other: 5, ..Default::default() };
        let features = extract_features("0123456789", &counts);
        assert_eq!(features.get_by_name("entity_density"), Some(0.1));
    }

    #[test]
    fn test_length_in_chars_not_bytes() {
        let counts = EntityCounts { persons: 1, ..Default::default() };
        // 4 characters, 12 bytes
        let features = extract_features("日本語で", &counts);
        assert_eq!(features.get_by_name("text_length"), Some(4.0));
        assert_eq!(features.get_by_name("entity_density"), Some(0.25));
    }

    #[test]
    fn test_keywords_counted_from_text() {
        let counts = EntityCounts::default();
        let features = extract_features("my password and my salary are private", &counts);
        assert_eq!(features.get_by_name("sensitive_keywords_count"), Some(2.0));
    }

    #[test]
    fn test_empty_text_density_guard() {
        let counts = EntityCounts { emails: 1, ..Default::default() };
        let features = extract_features("", &counts);
        assert_eq!(features.get_by_name("text_length"), Some(0.0));
        assert_eq!(features.get_by_name("entity_density"), Some(0.0));
    }
}
