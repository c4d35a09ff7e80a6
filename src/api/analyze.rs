//! Analysis engine: the public surface of the crate.
//!
//! One service object owns the detection, scoring, guidance, and storage
//! stages and exposes the operations the runner binary (or any embedding
//! application) calls. Built once at startup, shared by reference.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{DEFAULT_HISTORY_LIMIT, DEFAULT_LOCALE, MAX_TEXT_CHARS, MIN_TEXT_CHARS};
use crate::error::{AnalysisError, EngineResult};
use crate::logic::config::{EngineConfig, StorageConfig};
use crate::logic::entities::{bucket_counts, EntityAggregator, PiiEntity};
use crate::logic::features::{extract_features, FeatureVector};
use crate::logic::guidance::GuidanceOrchestrator;
use crate::logic::risk::{RiskScore, RiskScorer};
use crate::logic::storage::{
    AnalysisRecord, AnalysisRepository, HistoryEntry, MemoryRepository, RepositoryStats,
    SqliteRepository,
};
use crate::logic::training::{
    default_challenge, find_challenge, AttemptScore, TrainingChallenge, TRAINING_CHALLENGES,
};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// One analysis request.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default = "default_include")]
    pub include_recommendations: bool,
    #[serde(default = "default_include")]
    pub include_rewrite: bool,
}

fn default_include() -> bool {
    true
}

impl AnalyzeRequest {
    /// Request with both guidance outputs enabled and no user handle.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            user_id: None,
            include_recommendations: true,
            include_rewrite: true,
        }
    }
}

/// Complete analysis result returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub analysis_id: String,
    pub input_text: String,
    pub pii_entities: Vec<PiiEntity>,
    pub features: FeatureVector,
    pub risk_score: RiskScore,
    pub recommendations: Vec<String>,
    pub safe_rewrite: Option<String>,
    pub processing_time: f64,
    pub timestamp: DateTime<Utc>,
}

impl From<AnalysisRecord> for AnalysisReport {
    fn from(record: AnalysisRecord) -> Self {
        Self {
            analysis_id: record.analysis_id,
            input_text: record.input_text,
            pii_entities: record.pii_entities,
            features: record.features,
            risk_score: record.risk_score,
            recommendations: record.recommendations,
            safe_rewrite: record.safe_rewrite,
            processing_time: record.processing_time,
            timestamp: record.timestamp,
        }
    }
}

/// History listing.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    pub total: usize,
    pub items: Vec<HistoryEntry>,
}

/// Scored training attempt.
#[derive(Debug, Clone, Serialize)]
pub struct AttemptReport {
    pub challenge_id: String,
    pub user_text: String,
    pub original_text: String,
    pub score: AttemptScore,
}

// ============================================================================
// ENGINE
// ============================================================================

/// Owns every pipeline stage. Construct once, wrap in `Arc`, share.
pub struct AnalysisEngine {
    aggregator: EntityAggregator,
    scorer: RiskScorer,
    guidance: GuidanceOrchestrator,
    repository: Arc<dyn AnalysisRepository>,
}

impl AnalysisEngine {
    /// Build the engine from configuration. Fails on invalid config or an
    /// unopenable SQLite database; a missing classifier artifact is not a
    /// failure, the scorer degrades to rule-based mode on its own.
    pub fn from_config(config: &EngineConfig) -> EngineResult<Self> {
        config
            .validate()
            .map_err(|e| AnalysisError::InvalidInput(format!("configuration: {}", e)))?;

        let repository: Arc<dyn AnalysisRepository> = match &config.storage {
            StorageConfig::Memory => Arc::new(MemoryRepository::new()),
            StorageConfig::Sqlite { path } => {
                Arc::new(SqliteRepository::open(std::path::Path::new(path))?)
            }
        };

        let scorer = RiskScorer::from_config(&config.scoring);
        let guidance = GuidanceOrchestrator::from_config(&config.guidance);

        info!("scoring mode: {}", scorer.mode_name());
        info!("repository: {}", config.storage.describe());

        Ok(Self {
            aggregator: EntityAggregator::with_default_backends(),
            scorer,
            guidance,
            repository,
        })
    }

    /// Run the full pipeline on one text and persist the result.
    pub async fn analyze(&self, request: AnalyzeRequest) -> EngineResult<AnalysisReport> {
        let started = Instant::now();
        validate_text(&request.text)?;

        let entities = self.aggregator.detect(&request.text);
        let counts = bucket_counts(&entities);
        let features = extract_features(&request.text, &counts);
        let risk_score = self
            .scorer
            .score(&features)
            .map_err(|e| AnalysisError::Pipeline(e.0))?;

        let recommendations = if request.include_recommendations {
            self.guidance
                .recommendations(&request.text, &entities, risk_score.level)
                .await
        } else {
            Vec::new()
        };

        let safe_rewrite = if request.include_rewrite && !entities.is_empty() {
            Some(self.guidance.rewrite(&request.text, &entities).await)
        } else {
            None
        };

        let record = AnalysisRecord {
            analysis_id: Uuid::new_v4().to_string(),
            user_id: request.user_id,
            input_text: request.text,
            pii_entities: entities,
            features,
            risk_score,
            recommendations,
            safe_rewrite,
            processing_time: started.elapsed().as_secs_f64(),
            timestamp: Utc::now(),
        };

        self.repository.insert(record.clone())?;
        debug!(
            "analysis {}: {} entities, {} {:.2}",
            record.analysis_id,
            record.pii_entities.len(),
            record.risk_score.level,
            record.risk_score.score
        );

        Ok(record.into())
    }

    /// Answer a free-form privacy question.
    pub async fn ask(&self, question: &str, locale: Option<&str>) -> EngineResult<String> {
        if question.trim().is_empty() {
            return Err(AnalysisError::InvalidInput(
                "question must not be empty".to_string(),
            ));
        }
        let locale = locale.unwrap_or(DEFAULT_LOCALE);
        Ok(self.guidance.answer(question, locale).await)
    }

    /// Recent analyses, newest first.
    pub fn history(
        &self,
        user_id: Option<&str>,
        limit: Option<usize>,
    ) -> EngineResult<HistoryResponse> {
        let limit = limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
        let records = self.repository.find_recent(user_id, limit)?;
        let items: Vec<HistoryEntry> = records.iter().map(|r| r.history_entry()).collect();
        Ok(HistoryResponse {
            total: items.len(),
            items,
        })
    }

    /// Full stored report for one analysis id.
    pub fn report(&self, analysis_id: &str) -> EngineResult<AnalysisReport> {
        match self.repository.find_by_id(analysis_id)? {
            Some(record) => Ok(record.into()),
            None => Err(AnalysisError::NotFound(format!(
                "analysis {}",
                analysis_id
            ))),
        }
    }

    /// Delete one stored analysis.
    pub fn delete(&self, analysis_id: &str) -> EngineResult<()> {
        if self.repository.delete_by_id(analysis_id)? {
            info!("deleted analysis {}", analysis_id);
            Ok(())
        } else {
            Err(AnalysisError::NotFound(format!(
                "analysis {}",
                analysis_id
            )))
        }
    }

    /// Aggregate statistics over everything stored.
    pub fn stats(&self) -> EngineResult<RepositoryStats> {
        Ok(self.repository.stats()?)
    }

    /// All training drills, presentation order.
    pub fn challenges(&self) -> &'static [TrainingChallenge] {
        &TRAINING_CHALLENGES
    }

    /// One drill by id, or the default drill when no id is given.
    pub fn challenge(&self, id: Option<&str>) -> &'static TrainingChallenge {
        id.and_then(find_challenge).unwrap_or_else(default_challenge)
    }

    /// Score a rewrite attempt for a drill by re-running detection on both
    /// the risky original and the user's rewrite.
    pub fn score_attempt(&self, challenge_id: &str, user_text: &str) -> EngineResult<AttemptReport> {
        let challenge = find_challenge(challenge_id).ok_or_else(|| {
            AnalysisError::NotFound(format!("challenge {}", challenge_id))
        })?;

        let original_count = self.aggregator.detect(challenge.risky_text).len();
        let user_count = self.aggregator.detect(user_text).len();
        let score = crate::logic::training::score_attempt(
            challenge.risky_text,
            user_text,
            original_count,
            user_count,
        );

        Ok(AttemptReport {
            challenge_id: challenge.id.to_string(),
            user_text: user_text.to_string(),
            original_text: challenge.risky_text.to_string(),
            score,
        })
    }

    /// Whether generative guidance is configured.
    pub fn guidance_enabled(&self) -> bool {
        self.guidance.is_enabled()
    }

    /// Scoring mode name for startup logging.
    pub fn scoring_mode(&self) -> &'static str {
        self.scorer.mode_name()
    }
}

/// Input contract: analyzable text is 10 to 10,000 characters.
fn validate_text(text: &str) -> EngineResult<()> {
    let chars = text.chars().count();
    if chars < MIN_TEXT_CHARS || chars > MAX_TEXT_CHARS {
        return Err(AnalysisError::InvalidInput(format!(
            "text must be between {} and {} characters, got {}",
            MIN_TEXT_CHARS, MAX_TEXT_CHARS, chars
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::risk::RiskLevel;

    fn test_engine() -> AnalysisEngine {
        AnalysisEngine {
            aggregator: EntityAggregator::with_default_backends(),
            scorer: RiskScorer::rule_based(Default::default(), Default::default()),
            guidance: GuidanceOrchestrator::with_providers(vec![]),
            repository: Arc::new(MemoryRepository::new()),
        }
    }

    #[tokio::test]
    async fn test_analyze_full_pipeline_persists_and_reports() {
        let engine = test_engine();
        let report = engine
            .analyze(AnalyzeRequest::new(
                "Hi! I'm Sarah from New York. Call me at 555-1234!",
            ))
            .await
            .unwrap();

        assert_eq!(report.pii_entities.len(), 3);
        assert_eq!(report.risk_score.level, RiskLevel::Medium);
        assert!(!report.recommendations.is_empty());
        assert!(report.safe_rewrite.is_some());
        assert!(report.processing_time >= 0.0);

        // Persisted and retrievable
        let fetched = engine.report(&report.analysis_id).unwrap();
        assert_eq!(fetched.input_text, report.input_text);

        let history = engine.history(None, None).unwrap();
        assert_eq!(history.total, 1);
        assert_eq!(history.items[0].num_entities, 3);

        let stats = engine.stats().unwrap();
        assert_eq!(stats.total_analyses, 1);
        assert_eq!(stats.analyses_by_risk["MEDIUM"], 1);
    }

    #[tokio::test]
    async fn test_analyze_rejects_out_of_bounds_text() {
        let engine = test_engine();

        let short = engine.analyze(AnalyzeRequest::new("too short")).await;
        assert!(matches!(short, Err(AnalysisError::InvalidInput(_))));

        let long = engine.analyze(AnalyzeRequest::new("x".repeat(10_001))).await;
        assert!(matches!(long, Err(AnalysisError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_analyze_respects_include_flags() {
        let engine = test_engine();
        let mut request = AnalyzeRequest::new("Hi! I'm Sarah from New York. Call me at 555-1234!");
        request.include_recommendations = false;
        request.include_rewrite = false;

        let report = engine.analyze(request).await.unwrap();
        assert!(report.recommendations.is_empty());
        assert!(report.safe_rewrite.is_none());
    }

    #[tokio::test]
    async fn test_analyze_clean_text_skips_rewrite() {
        let engine = test_engine();
        let report = engine
            .analyze(AnalyzeRequest::new(
                "The weather is nice today and tomorrow looks fine",
            ))
            .await
            .unwrap();

        assert!(report.pii_entities.is_empty());
        assert!(report.safe_rewrite.is_none());
        assert_eq!(report.risk_score.level, RiskLevel::Low);
    }

    #[tokio::test]
    async fn test_analyze_tracks_user_handle_in_history() {
        let engine = test_engine();
        let mut request = AnalyzeRequest::new("Hi! I'm Sarah from New York. Call me at 555-1234!");
        request.user_id = Some("alice".to_string());
        engine.analyze(request).await.unwrap();

        engine
            .analyze(AnalyzeRequest::new(
                "The weather is nice today and tomorrow looks fine",
            ))
            .await
            .unwrap();

        let alice = engine.history(Some("alice"), None).unwrap();
        assert_eq!(alice.total, 1);

        let all = engine.history(None, None).unwrap();
        assert_eq!(all.total, 2);
    }

    #[tokio::test]
    async fn test_delete_then_not_found() {
        let engine = test_engine();
        let report = engine
            .analyze(AnalyzeRequest::new(
                "Hi! I'm Sarah from New York. Call me at 555-1234!",
            ))
            .await
            .unwrap();

        engine.delete(&report.analysis_id).unwrap();
        assert!(matches!(
            engine.delete(&report.analysis_id),
            Err(AnalysisError::NotFound(_))
        ));
        assert!(matches!(
            engine.report(&report.analysis_id),
            Err(AnalysisError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_ask_without_providers_reports_disabled() {
        let engine = test_engine();
        let answer = engine.ask("Is my name PII?", None).await.unwrap();
        assert!(answer.contains("currently disabled"));

        let empty = engine.ask("   ", None).await;
        assert!(matches!(empty, Err(AnalysisError::InvalidInput(_))));
    }

    #[test]
    fn test_challenge_lookup_and_default() {
        let engine = test_engine();
        assert_eq!(engine.challenges().len(), 10);
        assert_eq!(engine.challenge(Some("3")).id, "3");
        assert_eq!(engine.challenge(Some("nope")).id, "1");
        assert_eq!(engine.challenge(None).id, "1");
    }

    #[test]
    fn test_score_attempt_clean_rewrite_of_first_drill() {
        let engine = test_engine();
        let report = engine
            .score_attempt("1", "Enjoying the city and meeting new people; message me here!")
            .unwrap();

        assert_eq!(report.challenge_id, "1");
        assert_eq!(report.score.pii_reduction_score, 100.0);
        assert_eq!(report.score.total_score, 96.0);
        assert!(report.score.feedback[0].contains("Perfect!"));
    }

    #[test]
    fn test_score_attempt_unknown_challenge() {
        let engine = test_engine();
        assert!(matches!(
            engine.score_attempt("42", "whatever"),
            Err(AnalysisError::NotFound(_))
        ));
    }

    #[test]
    fn test_from_config_defaults_to_rule_based_memory() {
        let engine = AnalysisEngine::from_config(&EngineConfig::default()).unwrap();
        assert_eq!(engine.scoring_mode(), "rule_based");
        assert!(!engine.guidance_enabled());
    }

    #[test]
    fn test_request_deserialization_defaults() {
        let request: AnalyzeRequest =
            serde_json::from_str(r#"{"text": "hello world"}"#).unwrap();
        assert!(request.include_recommendations);
        assert!(request.include_rewrite);
        assert!(request.user_id.is_none());
    }
}
