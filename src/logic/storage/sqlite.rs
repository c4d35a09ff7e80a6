//! SQLite repository, the durable backend.
//!
//! One table, whole records as a JSON payload column, id and timestamp
//! denormalized for lookup and ordering. RFC 3339 timestamps sort
//! chronologically as text.

use std::path::Path;

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};

use crate::logic::storage::record::AnalysisRecord;
use crate::logic::storage::repository::{
    compute_stats, AnalysisRepository, RepositoryStats, StorageError,
};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS analyses (
    analysis_id TEXT PRIMARY KEY,
    user_id     TEXT,
    created_at  TEXT NOT NULL,
    payload     TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_analyses_created_at ON analyses(created_at);";

/// Durable store over a single SQLite connection.
pub struct SqliteRepository {
    conn: Mutex<Connection>,
}

impl SqliteRepository {
    /// Open (or create) the database file and ensure the schema exists.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path)
            .map_err(|e| StorageError(format!("open {}: {}", path.display(), e)))?;
        conn.execute_batch(SCHEMA)
            .map_err(|e| StorageError(format!("schema: {}", e)))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

fn parse_payload(json: &str) -> Result<AnalysisRecord, StorageError> {
    serde_json::from_str(json).map_err(|e| StorageError(format!("corrupt payload: {}", e)))
}

impl AnalysisRepository for SqliteRepository {
    fn insert(&self, record: AnalysisRecord) -> Result<(), StorageError> {
        let payload = serde_json::to_string(&record)
            .map_err(|e| StorageError(format!("serialize record: {}", e)))?;

        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO analyses (analysis_id, user_id, created_at, payload)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                record.analysis_id,
                record.user_id,
                record.timestamp.to_rfc3339(),
                payload
            ],
        )
        .map_err(|e| StorageError(format!("insert: {}", e)))?;
        Ok(())
    }

    fn find_by_id(&self, analysis_id: &str) -> Result<Option<AnalysisRecord>, StorageError> {
        let conn = self.conn.lock();
        let payload: Option<String> = conn
            .query_row(
                "SELECT payload FROM analyses WHERE analysis_id = ?1",
                params![analysis_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| StorageError(format!("find_by_id: {}", e)))?;

        match payload {
            Some(json) => parse_payload(&json).map(Some),
            None => Ok(None),
        }
    }

    fn find_recent(
        &self,
        user_id: Option<&str>,
        limit: usize,
    ) -> Result<Vec<AnalysisRecord>, StorageError> {
        let conn = self.conn.lock();
        let mut payloads: Vec<String> = Vec::new();

        match user_id {
            Some(user) => {
                let mut stmt = conn
                    .prepare(
                        "SELECT payload FROM analyses WHERE user_id = ?1
                         ORDER BY created_at DESC LIMIT ?2",
                    )
                    .map_err(|e| StorageError(format!("find_recent prepare: {}", e)))?;
                let rows = stmt
                    .query_map(params![user, limit as i64], |row| row.get::<_, String>(0))
                    .map_err(|e| StorageError(format!("find_recent query: {}", e)))?;
                for row in rows {
                    payloads.push(row.map_err(|e| StorageError(format!("find_recent row: {}", e)))?);
                }
            }
            None => {
                let mut stmt = conn
                    .prepare("SELECT payload FROM analyses ORDER BY created_at DESC LIMIT ?1")
                    .map_err(|e| StorageError(format!("find_recent prepare: {}", e)))?;
                let rows = stmt
                    .query_map(params![limit as i64], |row| row.get::<_, String>(0))
                    .map_err(|e| StorageError(format!("find_recent query: {}", e)))?;
                for row in rows {
                    payloads.push(row.map_err(|e| StorageError(format!("find_recent row: {}", e)))?);
                }
            }
        }

        payloads.iter().map(|json| parse_payload(json)).collect()
    }

    fn delete_by_id(&self, analysis_id: &str) -> Result<bool, StorageError> {
        let conn = self.conn.lock();
        let changed = conn
            .execute(
                "DELETE FROM analyses WHERE analysis_id = ?1",
                params![analysis_id],
            )
            .map_err(|e| StorageError(format!("delete: {}", e)))?;
        Ok(changed > 0)
    }

    fn count(&self) -> Result<usize, StorageError> {
        let conn = self.conn.lock();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM analyses", [], |row| row.get(0))
            .map_err(|e| StorageError(format!("count: {}", e)))?;
        Ok(count as usize)
    }

    fn stats(&self) -> Result<RepositoryStats, StorageError> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare("SELECT payload FROM analyses")
            .map_err(|e| StorageError(format!("stats prepare: {}", e)))?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| StorageError(format!("stats query: {}", e)))?;

        let mut records = Vec::new();
        for row in rows {
            let json = row.map_err(|e| StorageError(format!("stats row: {}", e)))?;
            records.push(parse_payload(&json)?);
        }
        Ok(compute_stats(records.iter()))
    }
}
