//! Risk Types
//!
//! Core types for risk scoring.
//! NO logic here - only data structures.

use serde::{Deserialize, Serialize};

// ============================================================================
// RISK LEVEL
// ============================================================================

/// Risk classification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    /// Little or no personal information exposed
    Low,
    /// Some identifying details, worth generalizing
    Medium,
    /// Dense or highly sensitive disclosure
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }

    pub fn severity_level(&self) -> u8 {
        match self {
            RiskLevel::Low => 0,
            RiskLevel::Medium => 1,
            RiskLevel::High => 2,
        }
    }

    /// Class index used by the trained classifier's output ordering
    pub fn from_class_index(index: usize) -> Self {
        match index {
            0 => RiskLevel::Low,
            1 => RiskLevel::Medium,
            _ => RiskLevel::High,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::Low => "#10b981",    // Green
            RiskLevel::Medium => "#f59e0b", // Yellow
            RiskLevel::High => "#ef4444",   // Red
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// RISK SCORE
// ============================================================================

/// Result of scoring one text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskScore {
    /// Display score (0.0 - 100.0, two decimals)
    pub score: f32,
    /// Classified level
    pub level: RiskLevel,
    /// Raw model signal: class probability for the trained path, the
    /// weighted sum for the rule-based path
    pub ml_probability: f32,
    /// Confidence of the prediction
    pub confidence: f32,
}

impl Default for RiskScore {
    fn default() -> Self {
        Self {
            score: 0.0,
            level: RiskLevel::Low,
            ml_probability: 0.0,
            confidence: 0.5,
        }
    }
}

// ============================================================================
// SCORE BREAKDOWN
// ============================================================================

/// One feature's contribution to the rule-based weighted sum
#[derive(Debug, Clone, Serialize)]
pub struct ScoreComponent {
    pub feature: &'static str,
    /// Feature value after cap/clip normalization (0.0 - 1.0)
    pub normalized: f32,
    pub weight: f32,
    pub contribution: f32,
}

/// Breakdown of how the rule-based score was calculated
#[derive(Debug, Clone, Serialize, Default)]
pub struct ScoreBreakdown {
    pub components: Vec<ScoreComponent>,
    pub weighted_sum: f32,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering_and_names() {
        assert_eq!(RiskLevel::Low.as_str(), "LOW");
        assert_eq!(RiskLevel::Medium.as_str(), "MEDIUM");
        assert_eq!(RiskLevel::High.as_str(), "HIGH");
        assert!(RiskLevel::Low.severity_level() < RiskLevel::Medium.severity_level());
        assert!(RiskLevel::Medium.severity_level() < RiskLevel::High.severity_level());
    }

    #[test]
    fn test_level_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&RiskLevel::Medium).unwrap(), "\"MEDIUM\"");
        let parsed: RiskLevel = serde_json::from_str("\"HIGH\"").unwrap();
        assert_eq!(parsed, RiskLevel::High);
    }

    #[test]
    fn test_from_class_index() {
        assert_eq!(RiskLevel::from_class_index(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_class_index(1), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_class_index(2), RiskLevel::High);
        assert_eq!(RiskLevel::from_class_index(9), RiskLevel::High);
    }
}
