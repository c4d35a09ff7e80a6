//! Error taxonomy for the analysis engine
//!
//! Callers only ever see two pipeline outcomes: a rejected input or a
//! non-recoverable pipeline fault. Storage and lookup errors surface from
//! the repository operations.

use thiserror::Error;

pub type EngineResult<T> = Result<T, AnalysisError>;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Input failed validation before the pipeline ran
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A record or challenge id that does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Repository open/read/write failure
    #[error("storage failure: {0}")]
    Storage(String),

    /// The scoring pipeline hit a fault it must not paper over
    #[error("pipeline failure: {0}")]
    Pipeline(String),
}

impl AnalysisError {
    /// True when the caller, not the engine, caused the failure
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::NotFound(_))
    }
}
