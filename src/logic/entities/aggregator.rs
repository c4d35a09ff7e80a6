//! Entity aggregation across recognizer backends
//!
//! The pattern backend is authoritative. The lexical NER backend only
//! adds entity classes patterns cannot express (people, places,
//! organizations), filtered through an allow-list and pinned to a fixed
//! confidence. A failing backend degrades to zero findings, it never
//! fails the analysis.

use std::collections::HashSet;

use log::warn;

use super::ner_backend::LexicalNerRecognizer;
use super::pattern_backend::PatternRecognizer;
use super::types::{
    EntityCounts, PiiEntity, RecognizedSpan, Recognizer, SUPPLEMENTARY_ALLOWED,
    SUPPLEMENTARY_CONFIDENCE,
};

// ============================================================================
// AGGREGATOR
// ============================================================================

pub struct EntityAggregator {
    primary: Box<dyn Recognizer>,
    supplementary: Box<dyn Recognizer>,
}

impl EntityAggregator {
    pub fn new(primary: Box<dyn Recognizer>, supplementary: Box<dyn Recognizer>) -> Self {
        Self { primary, supplementary }
    }

    pub fn with_default_backends() -> Self {
        Self::new(
            Box::new(PatternRecognizer::new()),
            Box::new(LexicalNerRecognizer::new()),
        )
    }

    /// Run both backends and merge their findings, primary first.
    /// Supplementary spans are dropped when the primary already claimed
    /// the exact same span, or when their label is outside the allow-list.
    pub fn detect(&self, text: &str) -> Vec<PiiEntity> {
        let mut entities = Vec::new();
        let mut seen: HashSet<(usize, usize)> = HashSet::new();

        for span in self.run_backend(&*self.primary, text) {
            seen.insert((span.start, span.end));
            entities.push(entity_from(text, span));
        }

        for mut span in self.run_backend(&*self.supplementary, text) {
            let label = span.label.to_uppercase();
            if !SUPPLEMENTARY_ALLOWED.contains(&label.as_str()) {
                continue;
            }
            if seen.contains(&(span.start, span.end)) {
                continue;
            }
            span.confidence = SUPPLEMENTARY_CONFIDENCE;
            entities.push(entity_from(text, span));
        }

        entities.sort_by_key(|e| e.start);
        entities
    }

    fn run_backend(&self, backend: &dyn Recognizer, text: &str) -> Vec<RecognizedSpan> {
        match backend.recognize(text) {
            Ok(spans) => spans,
            Err(err) => {
                warn!("recognizer '{}' failed, skipping: {}", backend.name(), err);
                Vec::new()
            }
        }
    }
}

fn entity_from(text: &str, span: RecognizedSpan) -> PiiEntity {
    PiiEntity {
        entity_type: span.label,
        text: text.get(span.start..span.end).unwrap_or_default().to_string(),
        start: span.start,
        end: span.end,
        confidence: span.confidence,
    }
}

// ============================================================================
// BUCKETING
// ============================================================================

/// Fold entity labels into the fixed count buckets the feature vector is
/// built from. Substring matching keeps variants like INTL_PHONE and
/// WORK_EMAIL in the right bucket.
pub fn bucket_counts(entities: &[PiiEntity]) -> EntityCounts {
    let mut counts = EntityCounts::default();
    for entity in entities {
        let label = entity.entity_type.to_uppercase();
        if label.contains("EMAIL") {
            counts.emails += 1;
        } else if label.contains("PHONE") {
            counts.phones += 1;
        } else if label == "LOCATION" || label == "GPE" || label == "LOC" {
            counts.locations += 1;
        } else if label == "PERSON" {
            counts.persons += 1;
        } else if label == "ORGANIZATION" || label == "ORG" {
            counts.organizations += 1;
        } else if label == "DATE" {
            counts.dates += 1;
        } else {
            counts.other += 1;
        }
    }
    counts
}

// ============================================================================
// TESTS
// ============================================================================
