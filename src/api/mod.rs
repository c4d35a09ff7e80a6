//! API Module
//!
//! The engine facade any embedding surface (runner binary, HTTP layer,
//! desktop shell) talks to. Everything below `logic/` is reached
//! through `AnalysisEngine`.

pub mod analyze;

// Re-export the public surface
pub use analyze::{AnalysisEngine, AnalysisReport, AnalyzeRequest};
