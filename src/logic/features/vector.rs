//! Feature Vector - Core data structure for ML input
//!
//! **Versioned feature vector with layout validation**
//!
//! Uses centralized layout from `layout.rs` for:
//! - Consistent feature ordering
//! - Version tracking
//! - Layout hash for compatibility checks

use serde::{Deserialize, Serialize};
use super::layout::{
    FEATURE_COUNT, FEATURE_VERSION, FEATURE_LAYOUT,
    layout_hash, validate_layout, LayoutMismatchError,
};

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

/// Versioned Feature Vector with layout metadata
///
/// This struct MUST be used for all feature data to ensure compatibility.
/// Never pass raw `Vec<f32>` or `[f32; N]` to the scorer!
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout (for mismatch detection)
    pub layout_hash: u32,
    /// Feature values in order defined by FEATURE_LAYOUT
    pub values: [f32; FEATURE_COUNT],
}

impl FeatureVector {
    /// Create a new zeroed feature vector with current version
    pub fn new() -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values: [0.0; FEATURE_COUNT],
        }
    }

    /// Create from raw values with current version
    pub fn from_values(values: [f32; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    /// Create from a Vec<f32> (truncates or pads if wrong size)
    pub fn from_vec(values: Vec<f32>) -> Self {
        let mut array = [0.0f32; FEATURE_COUNT];
        for (i, v) in values.into_iter().take(FEATURE_COUNT).enumerate() {
            array[i] = v;
        }
        Self::from_values(array)
    }

    /// Get values as array reference
    pub fn as_array(&self) -> &[f32; FEATURE_COUNT] {
        &self.values
    }

    /// Get values as slice
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Get feature by index
    pub fn get(&self, index: usize) -> Option<f32> {
        self.values.get(index).copied()
    }

    /// Get feature by name
    pub fn get_by_name(&self, name: &str) -> Option<f32> {
        super::layout::feature_index(name).and_then(|i| self.get(i))
    }

    /// Set feature by index
    pub fn set(&mut self, index: usize, value: f32) {
        if index < FEATURE_COUNT {
            self.values[index] = value;
        }
    }

    /// Set feature by name
    pub fn set_by_name(&mut self, name: &str, value: f32) -> bool {
        if let Some(index) = super::layout::feature_index(name) {
            self.set(index, value);
            true
        } else {
            false
        }
    }

    /// Validate that this vector is compatible with current layout
    pub fn validate(&self) -> Result<(), LayoutMismatchError> {
        validate_layout(self.version, self.layout_hash)
    }

    /// Check if this vector is compatible with current layout
    pub fn is_compatible(&self) -> bool {
        self.validate().is_ok()
    }

    /// Get feature names for this vector
    pub fn feature_names(&self) -> &'static [&'static str] {
        FEATURE_LAYOUT
    }

    /// Convert to JSON-serializable format for logging and storage
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "values": self.values,
            "named_values": FEATURE_LAYOUT.iter()
                .zip(self.values.iter())
                .map(|(name, value)| (name.to_string(), *value))
                .collect::<std::collections::HashMap<_, _>>(),
        })
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::new()
    }
}

impl From<[f32; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f32; FEATURE_COUNT]) -> Self {
        Self::from_values(values)
    }
}

impl From<Vec<f32>> for FeatureVector {
    fn from(values: Vec<f32>) -> Self {
        Self::from_vec(values)
    }
}

// ============================================================================
// BUILDER PATTERN
// ============================================================================

/// Builder for creating FeatureVector with named setters
pub struct FeatureVectorBuilder {
    vector: FeatureVector,
}

impl FeatureVectorBuilder {
    pub fn new() -> Self {
        Self { vector: FeatureVector::new() }
    }

    // Entity count features
    pub fn num_emails(mut self, value: f32) -> Self {
        self.vector.set_by_name("num_emails", value);
        self
    }

    pub fn num_phones(mut self, value: f32) -> Self {
        self.vector.set_by_name("num_phones", value);
        self
    }

    pub fn num_locations(mut self, value: f32) -> Self {
        self.vector.set_by_name("num_locations", value);
        self
    }

    pub fn num_persons(mut self, value: f32) -> Self {
        self.vector.set_by_name("num_persons", value);
        self
    }

    pub fn num_organizations(mut self, value: f32) -> Self {
        self.vector.set_by_name("num_organizations", value);
        self
    }

    pub fn num_dates(mut self, value: f32) -> Self {
        self.vector.set_by_name("num_dates", value);
        self
    }

    // Text shape features
    pub fn text_length(mut self, value: f32) -> Self {
        self.vector.set_by_name("text_length", value);
        self
    }

    pub fn entity_density(mut self, value: f32) -> Self {
        self.vector.set_by_name("entity_density", value);
        self
    }

    // Vocabulary features
    pub fn sensitive_keywords_count(mut self, value: f32) -> Self {
        self.vector.set_by_name("sensitive_keywords_count", value);
        self
    }

    /// Set feature by name dynamically
    pub fn set(mut self, name: &str, value: f32) -> Self {
        self.vector.set_by_name(name, value);
        self
    }

    pub fn build(self) -> FeatureVector {
        self.vector
    }
}

impl Default for FeatureVectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_vector_new() {
        let vector = FeatureVector::new();
        assert_eq!(vector.version, FEATURE_VERSION);
        assert_eq!(vector.layout_hash, layout_hash());
        assert_eq!(vector.values.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_feature_vector_builder() {
        let vector = FeatureVectorBuilder::new()
            .num_emails(2.0)
            .entity_density(0.04)
            .build();

        assert_eq!(vector.get_by_name("num_emails"), Some(2.0));
        assert_eq!(vector.get_by_name("entity_density"), Some(0.04));
        assert_eq!(vector.get_by_name("num_phones"), Some(0.0));
    }

    #[test]
    fn test_feature_vector_set_by_name() {
        let mut vector = FeatureVector::new();
        assert!(vector.set_by_name("text_length", 420.0));
        assert_eq!(vector.get_by_name("text_length"), Some(420.0));

        assert!(!vector.set_by_name("nonexistent", 0.0));
    }

    #[test]
    fn test_feature_vector_validation() {
        let vector = FeatureVector::new();
        assert!(vector.is_compatible());
        assert!(vector.validate().is_ok());
    }

    #[test]
    fn test_feature_vector_from_array() {
        let array = [1.0; FEATURE_COUNT];
        let vector: FeatureVector = array.into();

        assert_eq!(vector.version, FEATURE_VERSION);
        assert_eq!(vector.values, array);
    }

    #[test]
    fn test_from_vec_pads_and_truncates() {
        let short: FeatureVector = vec![1.0, 2.0].into();
        assert_eq!(short.get(0), Some(1.0));
        assert_eq!(short.get(2), Some(0.0));

        let long: FeatureVector = vec![9.0; FEATURE_COUNT + 5].into();
        assert_eq!(long.values.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_to_log_entry() {
        let vector = FeatureVectorBuilder::new()
            .num_persons(1.0)
            .build();

        let log = vector.to_log_entry();
        assert_eq!(log["feature_version"], FEATURE_VERSION);
        assert!(log["layout_hash"].as_u64().is_some());
        assert_eq!(log["named_values"]["num_persons"], 1.0);
    }
}
