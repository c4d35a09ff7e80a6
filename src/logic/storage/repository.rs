//! Repository interface shared by the storage backends, plus the
//! aggregate statistics both backends report.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::logic::risk::RiskLevel;
use crate::logic::storage::record::AnalysisRecord;

/// Entity labels listed in `RepositoryStats`, most frequent first.
pub const TOP_ENTITY_LABELS: usize = 10;

// ============================================================================
// ERRORS
// ============================================================================

/// Storage backend failure
#[derive(Debug, Clone)]
pub struct StorageError(pub String);

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StorageError: {}", self.0)
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for AnalysisError {
    fn from(e: StorageError) -> Self {
        AnalysisError::Storage(e.0)
    }
}

// ============================================================================
// REPOSITORY INTERFACE
// ============================================================================

/// Persistence seam for analysis results.
///
/// Both backends store whole `AnalysisRecord`s; all shaping (history rows,
/// statistics) happens on the typed records.
pub trait AnalysisRepository: Send + Sync {
    /// Persist one record.
    fn insert(&self, record: AnalysisRecord) -> Result<(), StorageError>;

    /// Fetch a record by its analysis id.
    fn find_by_id(&self, analysis_id: &str) -> Result<Option<AnalysisRecord>, StorageError>;

    /// Most recent records first, optionally filtered to one user handle.
    fn find_recent(
        &self,
        user_id: Option<&str>,
        limit: usize,
    ) -> Result<Vec<AnalysisRecord>, StorageError>;

    /// Delete a record; returns whether anything was removed.
    fn delete_by_id(&self, analysis_id: &str) -> Result<bool, StorageError>;

    /// Number of stored records.
    fn count(&self) -> Result<usize, StorageError>;

    /// Aggregate statistics over all stored records.
    fn stats(&self) -> Result<RepositoryStats, StorageError>;
}

// ============================================================================
// STATISTICS
// ============================================================================

/// One entity label and how often it was detected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityFrequency {
    pub label: String,
    pub count: usize,
}

/// Aggregates over every stored analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryStats {
    pub total_analyses: usize,
    /// Every risk level appears, zero or not
    pub analyses_by_risk: BTreeMap<String, usize>,
    /// Up to `TOP_ENTITY_LABELS` labels, count descending, ties alphabetical
    pub most_common_entities: Vec<EntityFrequency>,
    /// Mean display score, two decimals
    pub average_risk_score: f64,
    /// Mean pipeline seconds, three decimals
    pub average_processing_time: f64,
}

/// Single fold both backends share: the in-memory backend feeds it its
/// vector, the SQLite backend its deserialized payloads.
pub fn compute_stats<'a, I>(records: I) -> RepositoryStats
where
    I: IntoIterator<Item = &'a AnalysisRecord>,
{
    let mut analyses_by_risk: BTreeMap<String, usize> =
        [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High]
            .iter()
            .map(|level| (level.as_str().to_string(), 0))
            .collect();
    let mut entity_counts: HashMap<String, usize> = HashMap::new();
    let mut total = 0usize;
    let mut score_sum = 0f64;
    let mut time_sum = 0f64;

    for record in records {
        total += 1;
        *analyses_by_risk
            .entry(record.risk_score.level.as_str().to_string())
            .or_insert(0) += 1;
        for entity in &record.pii_entities {
            *entity_counts.entry(entity.entity_type.clone()).or_insert(0) += 1;
        }
        score_sum += record.risk_score.score as f64;
        time_sum += record.processing_time;
    }

    let mut most_common_entities: Vec<EntityFrequency> = entity_counts
        .into_iter()
        .map(|(label, count)| EntityFrequency { label, count })
        .collect();
    most_common_entities.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    most_common_entities.truncate(TOP_ENTITY_LABELS);

    let (average_risk_score, average_processing_time) = if total > 0 {
        (
            round2(score_sum / total as f64),
            round3(time_sum / total as f64),
        )
    } else {
        (0.0, 0.0)
    };

    RepositoryStats {
        total_analyses: total,
        analyses_by_risk,
        most_common_entities,
        average_risk_score,
        average_processing_time,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::logic::entities::PiiEntity;
    use crate::logic::features::FeatureVector;
    use crate::logic::risk::RiskScore;

    fn record(level: RiskLevel, score: f32, time: f64, labels: &[&str]) -> AnalysisRecord {
        AnalysisRecord {
            analysis_id: uuid::Uuid::new_v4().to_string(),
            user_id: None,
            input_text: "sample".to_string(),
            pii_entities: labels
                .iter()
                .map(|label| PiiEntity {
                    entity_type: label.to_string(),
                    text: "x".to_string(),
                    start: 0,
                    end: 1,
                    confidence: 1.0,
                })
                .collect(),
            features: FeatureVector::default(),
            risk_score: RiskScore {
                score,
                level,
                ml_probability: 0.5,
                confidence: 0.75,
            },
            recommendations: vec![],
            safe_rewrite: None,
            processing_time: time,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_stats_empty_set_is_preseeded() {
        let stats = compute_stats(std::iter::empty());
        assert_eq!(stats.total_analyses, 0);
        assert_eq!(stats.analyses_by_risk.len(), 3);
        assert_eq!(stats.analyses_by_risk["LOW"], 0);
        assert_eq!(stats.analyses_by_risk["MEDIUM"], 0);
        assert_eq!(stats.analyses_by_risk["HIGH"], 0);
        assert!(stats.most_common_entities.is_empty());
        assert_eq!(stats.average_risk_score, 0.0);
        assert_eq!(stats.average_processing_time, 0.0);
    }

    #[test]
    fn test_stats_fold_counts_and_averages() {
        let records = vec![
            record(RiskLevel::Low, 20.0, 0.010, &["PERSON"]),
            record(RiskLevel::Medium, 40.0, 0.020, &["PERSON", "EMAIL_ADDRESS"]),
            record(RiskLevel::High, 90.0, 0.033, &["PERSON", "US_SSN"]),
        ];
        let stats = compute_stats(records.iter());

        assert_eq!(stats.total_analyses, 3);
        assert_eq!(stats.analyses_by_risk["LOW"], 1);
        assert_eq!(stats.analyses_by_risk["MEDIUM"], 1);
        assert_eq!(stats.analyses_by_risk["HIGH"], 1);
        assert_eq!(stats.average_risk_score, 50.0);
        assert_eq!(stats.average_processing_time, 0.021);

        assert_eq!(stats.most_common_entities[0].label, "PERSON");
        assert_eq!(stats.most_common_entities[0].count, 3);
    }

    #[test]
    fn test_stats_entity_ties_break_alphabetically() {
        let records = vec![record(
            RiskLevel::Low,
            10.0,
            0.001,
            &["PHONE_NUMBER", "EMAIL_ADDRESS"],
        )];
        let stats = compute_stats(records.iter());
        assert_eq!(stats.most_common_entities[0].label, "EMAIL_ADDRESS");
        assert_eq!(stats.most_common_entities[1].label, "PHONE_NUMBER");
    }

    #[test]
    fn test_stats_caps_entity_labels_at_ten() {
        let labels: Vec<String> = (0..12).map(|i| format!("LABEL_{:02}", i)).collect();
        let label_refs: Vec<&str> = labels.iter().map(|s| s.as_str()).collect();
        let records = vec![record(RiskLevel::Low, 10.0, 0.001, &label_refs)];
        let stats = compute_stats(records.iter());
        assert_eq!(stats.most_common_entities.len(), TOP_ENTITY_LABELS);
    }

    #[test]
    fn test_storage_error_converts_to_analysis_error() {
        let err: AnalysisError = StorageError("disk full".to_string()).into();
        assert!(matches!(err, AnalysisError::Storage(ref m) if m == "disk full"));
    }
}
