//! Entities Module - PII Detection and Aggregation
//!
//! Two recognizer backends behind one aggregator:
//! - `pattern_backend`: regex table for structured identifiers, authoritative
//! - `ner_backend`: lexical heuristics for names, places, organizations
//!
//! ## Usage
//! ```ignore
//! let aggregator = EntityAggregator::with_default_backends();
//! let entities = aggregator.detect(text);
//! let counts = bucket_counts(&entities);
//! ```

pub mod aggregator;
pub mod keywords;
pub mod ner_backend;
pub mod pattern_backend;
pub mod patterns;
pub mod types;


// Re-export common types
pub use aggregator::{bucket_counts, EntityAggregator};
pub use keywords::{sensitive_keyword_count, SENSITIVE_KEYWORDS};
pub use ner_backend::LexicalNerRecognizer;
pub use pattern_backend::PatternRecognizer;
pub use types::{
    labels, EntityCounts, PiiEntity, RecognizedSpan, Recognizer, RecognizerError,
    SUPPLEMENTARY_ALLOWED, SUPPLEMENTARY_CONFIDENCE,
};
