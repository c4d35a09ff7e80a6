//! In-memory repository, the default backend.

use parking_lot::RwLock;

use crate::logic::storage::record::AnalysisRecord;
use crate::logic::storage::repository::{
    compute_stats, AnalysisRepository, RepositoryStats, StorageError,
};

/// Process-local store backed by a `RwLock<Vec>`. Nothing survives a
/// restart; this backend exists so the engine runs with zero setup.
#[derive(Default)]
pub struct MemoryRepository {
    records: RwLock<Vec<AnalysisRecord>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnalysisRepository for MemoryRepository {
    fn insert(&self, record: AnalysisRecord) -> Result<(), StorageError> {
        self.records.write().push(record);
        Ok(())
    }

    fn find_by_id(&self, analysis_id: &str) -> Result<Option<AnalysisRecord>, StorageError> {
        Ok(self
            .records
            .read()
            .iter()
            .find(|r| r.analysis_id == analysis_id)
            .cloned())
    }

    fn find_recent(
        &self,
        user_id: Option<&str>,
        limit: usize,
    ) -> Result<Vec<AnalysisRecord>, StorageError> {
        let records = self.records.read();
        let mut matches: Vec<&AnalysisRecord> = records
            .iter()
            .filter(|r| match user_id {
                Some(user) => r.user_id.as_deref() == Some(user),
                None => true,
            })
            .collect();
        matches.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(matches.into_iter().take(limit).cloned().collect())
    }

    fn delete_by_id(&self, analysis_id: &str) -> Result<bool, StorageError> {
        let mut records = self.records.write();
        match records.iter().position(|r| r.analysis_id == analysis_id) {
            Some(idx) => {
                records.remove(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn count(&self) -> Result<usize, StorageError> {
        Ok(self.records.read().len())
    }

    fn stats(&self) -> Result<RepositoryStats, StorageError> {
        Ok(compute_stats(self.records.read().iter()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    use crate::logic::features::FeatureVector;
    use crate::logic::risk::{RiskLevel, RiskScore};

    fn record(id: &str, user: Option<&str>, secs_ago: i64) -> AnalysisRecord {
        AnalysisRecord {
            analysis_id: id.to_string(),
            user_id: user.map(|u| u.to_string()),
            input_text: format!("text for {}", id),
            pii_entities: vec![],
            features: FeatureVector::default(),
            risk_score: RiskScore {
                score: 10.0,
                level: RiskLevel::Low,
                ml_probability: 0.1,
                confidence: 0.75,
            },
            recommendations: vec![],
            safe_rewrite: None,
            processing_time: 0.005,
            timestamp: Utc::now() - Duration::seconds(secs_ago),
        }
    }

    #[test]
    fn test_insert_then_find_by_id() {
        let repo = MemoryRepository::new();
        repo.insert(record("a1", None, 0)).unwrap();

        let found = repo.find_by_id("a1").unwrap().unwrap();
        assert_eq!(found.input_text, "text for a1");
        assert!(repo.find_by_id("missing").unwrap().is_none());
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_find_recent_newest_first_with_limit() {
        let repo = MemoryRepository::new();
        repo.insert(record("old", None, 300)).unwrap();
        repo.insert(record("new", None, 10)).unwrap();
        repo.insert(record("mid", None, 100)).unwrap();

        let recent = repo.find_recent(None, 2).unwrap();
        let ids: Vec<&str> = recent.iter().map(|r| r.analysis_id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid"]);
    }

    #[test]
    fn test_find_recent_filters_by_user() {
        let repo = MemoryRepository::new();
        repo.insert(record("a1", Some("alice"), 30)).unwrap();
        repo.insert(record("b1", Some("bob"), 20)).unwrap();
        repo.insert(record("a2", Some("alice"), 10)).unwrap();

        let alice = repo.find_recent(Some("alice"), 10).unwrap();
        let ids: Vec<&str> = alice.iter().map(|r| r.analysis_id.as_str()).collect();
        assert_eq!(ids, vec!["a2", "a1"]);

        // Anonymous records are not swept into a user query.
        repo.insert(record("anon", None, 5)).unwrap();
        assert_eq!(repo.find_recent(Some("alice"), 10).unwrap().len(), 2);
    }

    #[test]
    fn test_delete_reports_presence() {
        let repo = MemoryRepository::new();
        repo.insert(record("a1", None, 0)).unwrap();

        assert!(repo.delete_by_id("a1").unwrap());
        assert!(!repo.delete_by_id("a1").unwrap());
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_stats_reflect_contents() {
        let repo = MemoryRepository::new();
        repo.insert(record("a1", None, 0)).unwrap();
        repo.insert(record("a2", None, 0)).unwrap();

        let stats = repo.stats().unwrap();
        assert_eq!(stats.total_analyses, 2);
        assert_eq!(stats.analyses_by_risk["LOW"], 2);
    }
}
