//! Trained Risk Classifier - ONNX Runtime Integration
//!
//! Owns the loaded session and the standardization parameters as one
//! unit, so a classifier instance can never mix a model with the wrong
//! scaler. `run` needs a mutable session, hence the mutex; inference is
//! a single blocking call and the lock is never held across awaits.

use chrono::{DateTime, Utc};
use ndarray::Array2;
use ort::value::Value;
use parking_lot::Mutex;

use crate::logic::features::FEATURE_COUNT;

use super::artifact::{load_artifact, ArtifactError, ScalerParams, CLASS_COUNT};

// ============================================================================
// CLASSIFIER
// ============================================================================

pub struct TrainedClassifier {
    session: Mutex<ort::session::Session>,
    scaler: ScalerParams,
    output_name: String,
    classes: Vec<String>,
    model_path: String,
    loaded_at: DateTime<Utc>,
}

impl TrainedClassifier {
    /// Load the model/scaler pair from disk
    pub fn load(model_path: &str, scaler_path: &str) -> Result<Self, ArtifactError> {
        let artifact = load_artifact(model_path, scaler_path)?;
        Ok(Self {
            session: Mutex::new(artifact.session),
            scaler: artifact.scaler,
            output_name: artifact.output_name,
            classes: artifact.classes,
            model_path: model_path.to_string(),
            loaded_at: Utc::now(),
        })
    }

    /// Run inference and return the per-class probability vector
    pub fn predict_probabilities(
        &self,
        features: &[f32; FEATURE_COUNT],
    ) -> Result<[f32; CLASS_COUNT], ArtifactError> {
        let standardized = self.scaler.standardize(features);

        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), standardized.to_vec())
            .map_err(|e| ArtifactError(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| ArtifactError(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| ArtifactError(format!("Inference failed: {}", e)))?;

        let output = outputs
            .get(&self.output_name)
            .ok_or_else(|| ArtifactError(format!("Output '{}' missing", self.output_name)))?;

        let output_tensor = output
            .try_extract_tensor::<f32>()
            .map_err(|e| ArtifactError(format!("Extract error: {}", e)))?;

        let data = output_tensor.1;
        if data.len() < CLASS_COUNT {
            return Err(ArtifactError(format!(
                "Expected {} class probabilities, model returned {}",
                CLASS_COUNT,
                data.len()
            )));
        }

        let mut probs = [0.0f32; CLASS_COUNT];
        probs.copy_from_slice(&data[..CLASS_COUNT]);
        Ok(probs)
    }

    /// Predict the winning class index alongside the full distribution
    pub fn predict(
        &self,
        features: &[f32; FEATURE_COUNT],
    ) -> Result<(usize, [f32; CLASS_COUNT]), ArtifactError> {
        let probs = self.predict_probabilities(features)?;
        Ok((argmax(&probs), probs))
    }

    pub fn model_path(&self) -> &str {
        &self.model_path
    }

    pub fn class_names(&self) -> &[String] {
        &self.classes
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

/// Index of the largest probability; ties go to the lower class
pub fn argmax(probs: &[f32; CLASS_COUNT]) -> usize {
    let mut best = 0;
    for i in 1..CLASS_COUNT {
        if probs[i] > probs[best] {
            best = i;
        }
    }
    best
}

// ============================================================================
// TESTS
// ============================================================================
