//! Model Module - Trained Classifier Inference
//!
//! Loading and running the ONNX risk classifier, kept separate from
//! scoring policy so the artifact can be swapped without touching the
//! scorer.

pub mod artifact;
pub mod classifier;

// Re-export common types
pub use artifact::{load_artifact, ArtifactError, ScalerParams, ScalerSidecar, CLASS_COUNT};
pub use classifier::TrainedClassifier;
