//! Risk Scoring Rules & Thresholds
//!
//! Weights, caps and level boundaries for the rule-based scoring path.
//! NO scoring logic here - only constants and config.

use serde::{Deserialize, Serialize};

// ============================================================================
// LEVEL THRESHOLDS (on the raw weighted sum, 0.0 - 1.0)
// ============================================================================

/// Below this weighted sum = LOW
pub const RISK_LOW_THRESHOLD: f32 = 0.3;

/// Below this weighted sum = MEDIUM, at or above = HIGH
pub const RISK_MEDIUM_THRESHOLD: f32 = 0.6;

// ============================================================================
// WEIGHTS (How much each feature contributes to the weighted sum)
// ============================================================================

/// Weight of email count (15%)
pub const EMAIL_WEIGHT: f32 = 0.15;

/// Weight of phone count (15%)
pub const PHONE_WEIGHT: f32 = 0.15;

/// Weight of location count (10%)
pub const LOCATION_WEIGHT: f32 = 0.10;

/// Weight of person-name count (12%)
pub const PERSON_WEIGHT: f32 = 0.12;

/// Weight of organization count (8%)
pub const ORGANIZATION_WEIGHT: f32 = 0.08;

/// Weight of text length (5%)
pub const TEXT_LENGTH_WEIGHT: f32 = 0.05;

/// Weight of entity density (20%) - the strongest single signal
pub const ENTITY_DENSITY_WEIGHT: f32 = 0.20;

/// Weight of sensitive keyword count (15%)
pub const SENSITIVE_KEYWORD_WEIGHT: f32 = 0.15;

// ============================================================================
// NORMALIZATION CAPS (feature value that saturates its component)
// ============================================================================

/// Email count cap
pub const EMAIL_CAP: f32 = 3.0;

/// Phone count cap
pub const PHONE_CAP: f32 = 2.0;

/// Location count cap
pub const LOCATION_CAP: f32 = 5.0;

/// Person count cap
pub const PERSON_CAP: f32 = 3.0;

/// Organization count cap
pub const ORGANIZATION_CAP: f32 = 3.0;

/// Text length cap (characters)
pub const TEXT_LENGTH_CAP: f32 = 1000.0;

/// Density is entities-per-character; scaled up before clipping to 1.0
pub const DENSITY_MULTIPLIER: f32 = 100.0;

/// Sensitive keyword cap
pub const KEYWORD_CAP: f32 = 5.0;

// ============================================================================
// SCORE SHAPE
// ============================================================================

/// Fixed confidence reported by the rule-based path
pub const RULE_BASED_CONFIDENCE: f32 = 0.75;

/// Score anchors per class for the trained path: the probability vector
/// is blended against these to land LOW near 25, MEDIUM near 60 and
/// HIGH near 100
pub const CLASS_SCORE_BLEND: [f32; 3] = [25.0, 60.0, 100.0];

// ============================================================================
// CONFIGURABLE WEIGHTS
// ============================================================================

/// Per-feature weights. The defaults sum to 1.0 but operators may
/// configure a sum above it; the scorer clamps the reported probability
/// instead of rejecting such tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureWeights {
    pub emails: f32,
    pub phones: f32,
    pub locations: f32,
    pub persons: f32,
    pub organizations: f32,
    pub text_length: f32,
    pub entity_density: f32,
    pub sensitive_keywords: f32,
}

impl Default for FeatureWeights {
    fn default() -> Self {
        Self {
            emails: EMAIL_WEIGHT,
            phones: PHONE_WEIGHT,
            locations: LOCATION_WEIGHT,
            persons: PERSON_WEIGHT,
            organizations: ORGANIZATION_WEIGHT,
            text_length: TEXT_LENGTH_WEIGHT,
            entity_density: ENTITY_DENSITY_WEIGHT,
            sensitive_keywords: SENSITIVE_KEYWORD_WEIGHT,
        }
    }
}

impl FeatureWeights {
    pub fn sum(&self) -> f32 {
        self.emails
            + self.phones
            + self.locations
            + self.persons
            + self.organizations
            + self.text_length
            + self.entity_density
            + self.sensitive_keywords
    }

    /// Weights must be non-negative with a positive total
    pub fn validate(&self) -> Result<(), String> {
        let all = [
            self.emails,
            self.phones,
            self.locations,
            self.persons,
            self.organizations,
            self.text_length,
            self.entity_density,
            self.sensitive_keywords,
        ];
        if all.iter().any(|w| *w < 0.0) {
            return Err("Feature weights must be non-negative".to_string());
        }
        if self.sum() <= 0.0 {
            return Err("Feature weights must not all be zero".to_string());
        }
        Ok(())
    }
}

// ============================================================================
// CONFIGURABLE THRESHOLDS
// ============================================================================

/// Level boundaries on the raw weighted sum (configurable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// Below this = LOW
    pub low: f32,
    /// Below this = MEDIUM, at or above = HIGH
    pub medium: f32,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            low: RISK_LOW_THRESHOLD,
            medium: RISK_MEDIUM_THRESHOLD,
        }
    }
}

impl RiskThresholds {
    /// Strict - flags more text as risky
    pub fn strict() -> Self {
        Self { low: 0.2, medium: 0.45 }
    }

    /// Lenient - reserves MEDIUM/HIGH for dense disclosures
    pub fn lenient() -> Self {
        Self { low: 0.4, medium: 0.75 }
    }

    /// Equal low and medium is legal and collapses MEDIUM to an empty band
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0 < self.low && self.low <= self.medium && self.medium < 1.0) {
            return Err(format!(
                "Thresholds must satisfy 0 < low <= medium < 1, got low={} medium={}",
                self.low, self.medium
            ));
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
