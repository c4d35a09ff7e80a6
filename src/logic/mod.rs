//! Logic Module - Analysis Pipeline & Engines
//!
//! ## Pipeline order
//! - `entities/` - PII detection (two backends, one aggregator)
//! - `features/` - feature extraction and layout versioning
//! - `model/` - trained classifier artifact loading and inference
//! - `risk/` - rule-based and trained risk scoring
//! - `guidance/` - recommendations, rewrites, Q&A with tiered fallback
//! - `storage/` - analysis history repositories
//! - `training/` - privacy drills and attempt scoring
//! - `config` - typed engine configuration

pub mod config;
pub mod entities;
pub mod features;
pub mod guidance;
pub mod model;
pub mod risk;
pub mod storage;
pub mod training;
