//! Features Module - Feature Extraction Engine
//!
//! Turns detected entities and text shape into the versioned vector both
//! scoring paths consume. The layout is centralized so the trained
//! classifier can reject vectors built against a different schema.

pub mod extractor;
pub mod layout;
pub mod vector;


// Re-export common types
pub use extractor::extract_features;
pub use layout::{
    compute_layout_hash, feature_index, feature_name, is_layout_compatible, layout_hash,
    validate_layout, LayoutInfo, LayoutMismatchError, FEATURE_COUNT, FEATURE_LAYOUT,
    FEATURE_VERSION,
};
pub use vector::{FeatureVector, FeatureVectorBuilder};
