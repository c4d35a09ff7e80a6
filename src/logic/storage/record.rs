//! Stored analysis results and their history projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::TEXT_PREVIEW_CHARS;
use crate::logic::entities::PiiEntity;
use crate::logic::features::FeatureVector;
use crate::logic::risk::{RiskLevel, RiskScore};

/// One completed analysis, wire shape and stored shape alike.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub analysis_id: String,
    pub user_id: Option<String>,
    pub input_text: String,
    pub pii_entities: Vec<PiiEntity>,
    pub features: FeatureVector,
    pub risk_score: RiskScore,
    pub recommendations: Vec<String>,
    pub safe_rewrite: Option<String>,
    /// Wall-clock pipeline time in seconds
    pub processing_time: f64,
    pub timestamp: DateTime<Utc>,
}

impl AnalysisRecord {
    /// Compact summary row for history listings.
    pub fn history_entry(&self) -> HistoryEntry {
        HistoryEntry {
            analysis_id: self.analysis_id.clone(),
            timestamp: self.timestamp,
            risk_level: self.risk_score.level,
            risk_score: self.risk_score.score,
            num_entities: self.pii_entities.len(),
            text_preview: preview(&self.input_text),
        }
    }
}

/// History listing row: id, when, how risky, and a text preview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub analysis_id: String,
    pub timestamp: DateTime<Utc>,
    pub risk_level: RiskLevel,
    pub risk_score: f32,
    pub num_entities: usize,
    pub text_preview: String,
}

/// First `TEXT_PREVIEW_CHARS` characters of the input, no suffix.
fn preview(text: &str) -> String {
    text.chars().take(TEXT_PREVIEW_CHARS).collect()
}
