//! Risk Scorer
//!
//! CORE LOGIC - two scoring paths behind one service.
//!
//! The rule-based path is a deterministic weighted sum and is always
//! available. The trained path runs the ONNX classifier when its
//! artifact pair loaded at startup. Fallback is one-way: if the
//! artifact is missing or rejected, the scorer is pinned to rule-based
//! for the life of the process and never retries per request.

use std::path::Path;

use log::{info, warn};

use crate::logic::config::ScoringConfig;
use crate::logic::features::FeatureVector;
use crate::logic::model::{ArtifactError, TrainedClassifier};

use super::rules::{
    FeatureWeights, RiskThresholds, CLASS_SCORE_BLEND, DENSITY_MULTIPLIER, EMAIL_CAP,
    KEYWORD_CAP, LOCATION_CAP, ORGANIZATION_CAP, PERSON_CAP, PHONE_CAP, RULE_BASED_CONFIDENCE,
    TEXT_LENGTH_CAP,
};
use super::types::{RiskLevel, RiskScore, ScoreBreakdown, ScoreComponent};

// ============================================================================
// SCORING MODE
// ============================================================================

/// Which path this scorer runs. Decided once at construction.
pub enum ScoringMode {
    RuleBased,
    Trained(TrainedClassifier),
}

// ============================================================================
// SCORER
// ============================================================================

pub struct RiskScorer {
    weights: FeatureWeights,
    thresholds: RiskThresholds,
    mode: ScoringMode,
}

impl RiskScorer {
    /// Build the scorer, attempting the trained artifact exactly once
    pub fn from_config(config: &ScoringConfig) -> Self {
        let mode = if Path::new(&config.model_path).exists() {
            match TrainedClassifier::load(&config.model_path, &config.scaler_path) {
                Ok(classifier) => {
                    info!("Risk scorer using trained classifier: {}", config.model_path);
                    ScoringMode::Trained(classifier)
                }
                Err(e) => {
                    warn!(
                        "Trained classifier rejected ({}); rule-based scoring for the life of this process",
                        e
                    );
                    ScoringMode::RuleBased
                }
            }
        } else {
            info!(
                "No trained model at {}, using rule-based scoring",
                config.model_path
            );
            ScoringMode::RuleBased
        };

        Self {
            weights: config.weights.clone(),
            thresholds: config.thresholds.clone(),
            mode,
        }
    }

    /// Rule-based scorer with explicit parameters, no artifact probing
    pub fn rule_based(weights: FeatureWeights, thresholds: RiskThresholds) -> Self {
        Self {
            weights,
            thresholds,
            mode: ScoringMode::RuleBased,
        }
    }

    pub fn is_trained(&self) -> bool {
        matches!(self.mode, ScoringMode::Trained(_))
    }

    pub fn mode_name(&self) -> &'static str {
        match self.mode {
            ScoringMode::RuleBased => "rule_based",
            ScoringMode::Trained(_) => "trained",
        }
    }

    /// Score one feature vector. Only the trained path can fail; a
    /// request-time inference error surfaces instead of silently
    /// switching paths mid-flight.
    pub fn score(&self, features: &FeatureVector) -> Result<RiskScore, ArtifactError> {
        match &self.mode {
            ScoringMode::RuleBased => Ok(self.rule_based_score(features)),
            ScoringMode::Trained(classifier) => self.trained_score(classifier, features),
        }
    }

    /// Deterministic weighted sum over capped feature components
    pub fn rule_based_score(&self, features: &FeatureVector) -> RiskScore {
        let components = normalized_components(features, &self.weights);
        let weighted_sum: f32 = components.iter().map(|c| c.contribution).sum();

        // Display score on 0-100; level thresholds apply to the raw sum
        let score = round2((weighted_sum * 100.0).min(100.0));
        let level = self.level_for_sum(weighted_sum);

        RiskScore {
            score,
            level,
            ml_probability: weighted_sum.clamp(0.0, 1.0),
            confidence: RULE_BASED_CONFIDENCE,
        }
    }

    fn trained_score(
        &self,
        classifier: &TrainedClassifier,
        features: &FeatureVector,
    ) -> Result<RiskScore, ArtifactError> {
        let (class_index, probs) = classifier.predict(features.as_array())?;
        let level = RiskLevel::from_class_index(class_index);

        // Blend the distribution against per-class score anchors so the
        // display score moves smoothly between levels
        let blended: f32 = probs
            .iter()
            .zip(CLASS_SCORE_BLEND.iter())
            .map(|(p, anchor)| p * anchor)
            .sum();

        Ok(RiskScore {
            score: round2(blended.clamp(0.0, 100.0)),
            level,
            ml_probability: probs[class_index],
            confidence: probs[class_index],
        })
    }

    /// Per-component explanation of the rule-based sum. Always computed
    /// from the rule table, even when the trained path scores requests.
    pub fn breakdown(&self, features: &FeatureVector) -> ScoreBreakdown {
        let components = normalized_components(features, &self.weights);
        let weighted_sum = components.iter().map(|c| c.contribution).sum();
        ScoreBreakdown { components, weighted_sum }
    }

    fn level_for_sum(&self, sum: f32) -> RiskLevel {
        if sum < self.thresholds.low {
            RiskLevel::Low
        } else if sum < self.thresholds.medium {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

// ============================================================================
// COMPONENT NORMALIZATION
// ============================================================================

/// Cap each feature into 0.0-1.0 and attach its weight.
/// num_dates (index 5) feeds the trained model only; the rule table
/// gives it no weight.
fn normalized_components(features: &FeatureVector, weights: &FeatureWeights) -> Vec<ScoreComponent> {
    let v = features.as_array();

    let raw = [
        ("num_emails", (v[0] / EMAIL_CAP).min(1.0), weights.emails),
        ("num_phones", (v[1] / PHONE_CAP).min(1.0), weights.phones),
        ("num_locations", (v[2] / LOCATION_CAP).min(1.0), weights.locations),
        ("num_persons", (v[3] / PERSON_CAP).min(1.0), weights.persons),
        ("num_organizations", (v[4] / ORGANIZATION_CAP).min(1.0), weights.organizations),
        ("text_length", (v[6] / TEXT_LENGTH_CAP).min(1.0), weights.text_length),
        ("entity_density", (v[7] * DENSITY_MULTIPLIER).min(1.0), weights.entity_density),
        ("sensitive_keywords_count", (v[8] / KEYWORD_CAP).min(1.0), weights.sensitive_keywords),
    ];

    raw.into_iter()
        .map(|(feature, normalized, weight)| ScoreComponent {
            feature,
            normalized,
            weight,
            contribution: normalized * weight,
        })
        .collect()
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

// ============================================================================
// TESTS
// ============================================================================
