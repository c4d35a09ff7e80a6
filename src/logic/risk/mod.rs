//! Risk Module - Scoring Engine
//!
//! ## Structure
//! - `types`: levels, scores, breakdowns (data only)
//! - `rules`: weights, caps and thresholds (config only)
//! - `scorer`: the scoring service combining both paths
//!
//! ## Usage
//! ```ignore
//! let scorer = RiskScorer::from_config(&config.scoring);
//! let result = scorer.score(&features)?;
//! println!("{} ({})", result.score, result.level);
//! ```

pub mod rules;
pub mod scorer;
pub mod types;

// Re-export common types
pub use rules::{FeatureWeights, RiskThresholds, RULE_BASED_CONFIDENCE};
pub use scorer::{RiskScorer, ScoringMode};
pub use types::{RiskLevel, RiskScore, ScoreBreakdown, ScoreComponent};
