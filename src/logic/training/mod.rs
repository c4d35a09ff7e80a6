//! Training Module
//!
//! Gamified privacy drills: a static challenge set plus generous scoring
//! of rewrite attempts based on what the detector still finds.

pub mod challenges;
pub mod scoring;

// Re-export common types
pub use challenges::{default_challenge, find_challenge, TrainingChallenge, TRAINING_CHALLENGES};
pub use scoring::{score_attempt, AttemptScore};
