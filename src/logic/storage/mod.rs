//! Storage Module
//!
//! Persistence for analysis results behind one repository trait. The
//! default backend keeps records in process memory; the SQLite backend
//! makes them durable. Both report the same aggregate statistics.
//!
//! ## Structure
//! - `record`: stored record and history projection
//! - `repository`: the `AnalysisRepository` trait, errors, statistics
//! - `memory`: in-memory backend
//! - `sqlite`: durable backend

pub mod memory;
pub mod record;
pub mod repository;
pub mod sqlite;

// Re-export common types
pub use memory::MemoryRepository;
pub use record::{AnalysisRecord, HistoryEntry};
pub use repository::{
    compute_stats, AnalysisRepository, EntityFrequency, RepositoryStats, StorageError,
    TOP_ENTITY_LABELS,
};
pub use sqlite::SqliteRepository;
