//! Trained Artifact Loading
//!
//! A trained classifier ships as a pair of files: the ONNX graph and a
//! JSON sidecar holding the standardization parameters it was fitted
//! with. The pair is validated before any session is created, so a
//! stale or mismatched artifact is rejected at load time instead of
//! producing silently wrong scores.

use std::fs;
use std::path::Path;

use ort::session::{builder::GraphOptimizationLevel, Session};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::logic::features::{validate_layout, FEATURE_COUNT};

/// The classifier predicts exactly three risk classes
pub const CLASS_COUNT: usize = 3;

/// Preferred output tensor name for probability vectors
const PROBABILITIES_OUTPUT: &str = "probabilities";

/// Scale values this small are treated as a constant training column
const SCALE_EPSILON: f32 = 1e-12;

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, Clone)]
pub struct ArtifactError(pub String);

impl std::fmt::Display for ArtifactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ArtifactError: {}", self.0)
    }
}

impl std::error::Error for ArtifactError {}

// ============================================================================
// SCALER SIDECAR
// ============================================================================

/// Sidecar JSON written next to the model at training time.
/// Only `mean` and `scale` are mandatory; everything else is optional
/// metadata that tightens validation when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerSidecar {
    pub mean: Vec<f32>,
    pub scale: Vec<f32>,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub model_sha256: Option<String>,
    #[serde(default)]
    pub feature_version: Option<u8>,
    #[serde(default)]
    pub feature_layout_hash: Option<u32>,
}

/// Validated standardization parameters with fixed dimensions
#[derive(Debug, Clone)]
pub struct ScalerParams {
    pub mean: [f32; FEATURE_COUNT],
    pub scale: [f32; FEATURE_COUNT],
}

impl ScalerParams {
    pub fn from_sidecar(sidecar: &ScalerSidecar) -> Result<Self, ArtifactError> {
        if sidecar.mean.len() != FEATURE_COUNT || sidecar.scale.len() != FEATURE_COUNT {
            return Err(ArtifactError(format!(
                "Scaler dimensions {}x{} do not match feature count {}",
                sidecar.mean.len(),
                sidecar.scale.len(),
                FEATURE_COUNT
            )));
        }

        let mut params = Self {
            mean: [0.0; FEATURE_COUNT],
            scale: [1.0; FEATURE_COUNT],
        };
        params.mean.copy_from_slice(&sidecar.mean);
        params.scale.copy_from_slice(&sidecar.scale);
        Ok(params)
    }

    /// Standardize a raw feature vector the way the trainer did:
    /// (x - mean) / scale, with near-zero scales treated as 1.0
    pub fn standardize(&self, raw: &[f32; FEATURE_COUNT]) -> [f32; FEATURE_COUNT] {
        let mut out = [0.0f32; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            let scale = if self.scale[i].abs() <= SCALE_EPSILON {
                1.0
            } else {
                self.scale[i]
            };
            out[i] = (raw[i] - self.mean[i]) / scale;
        }
        out
    }
}

// ============================================================================
// ARTIFACT LOADING
// ============================================================================

/// A fully validated model/scaler pair ready for inference
pub struct LoadedArtifact {
    pub session: Session,
    pub scaler: ScalerParams,
    pub output_name: String,
    pub classes: Vec<String>,
}

/// Load and validate the classifier artifact pair.
///
/// Validation order matters: everything that can fail cheaply (sidecar
/// parse, dimensions, layout hash, digest) runs before the ONNX session
/// is built.
pub fn load_artifact(model_path: &str, scaler_path: &str) -> Result<LoadedArtifact, ArtifactError> {
    log::info!("Loading trained classifier: {} + {}", model_path, scaler_path);

    let sidecar = read_sidecar(scaler_path)?;

    // Layout metadata is optional, but when present it must match
    if let (Some(version), Some(hash)) = (sidecar.feature_version, sidecar.feature_layout_hash) {
        validate_layout(version, hash).map_err(|e| ArtifactError(e.to_string()))?;
    }

    let scaler = ScalerParams::from_sidecar(&sidecar)?;
    let classes = resolve_classes(&sidecar)?;

    if !Path::new(model_path).exists() {
        return Err(ArtifactError(format!("Model not found: {}", model_path)));
    }
    let model_bytes = fs::read(model_path)
        .map_err(|e| ArtifactError(format!("Failed to read model {}: {}", model_path, e)))?;

    if let Some(expected) = sidecar.model_sha256.as_deref() {
        let actual = hex::encode(Sha256::digest(&model_bytes));
        if !actual.eq_ignore_ascii_case(expected) {
            return Err(ArtifactError(format!(
                "Model digest mismatch: sidecar expects {}, file is {}",
                expected, actual
            )));
        }
    }

    let session = Session::builder()
        .map_err(|e| ArtifactError(format!("Failed to create session builder: {}", e)))?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .map_err(|e| ArtifactError(format!("Failed to set optimization: {}", e)))?
        .commit_from_memory(&model_bytes)
        .map_err(|e| ArtifactError(format!("Failed to load model: {}", e)))?;

    let output_name = pick_output_name(&session)?;

    log::info!(
        "ONNX model loaded ({} bytes, output '{}')",
        model_bytes.len(),
        output_name
    );

    Ok(LoadedArtifact { session, scaler, output_name, classes })
}

fn read_sidecar(scaler_path: &str) -> Result<ScalerSidecar, ArtifactError> {
    if !Path::new(scaler_path).exists() {
        return Err(ArtifactError(format!("Scaler sidecar not found: {}", scaler_path)));
    }
    let raw = fs::read_to_string(scaler_path)
        .map_err(|e| ArtifactError(format!("Failed to read scaler {}: {}", scaler_path, e)))?;
    serde_json::from_str(&raw)
        .map_err(|e| ArtifactError(format!("Invalid scaler sidecar {}: {}", scaler_path, e)))
}

fn resolve_classes(sidecar: &ScalerSidecar) -> Result<Vec<String>, ArtifactError> {
    if sidecar.classes.is_empty() {
        return Ok(vec!["LOW".to_string(), "MEDIUM".to_string(), "HIGH".to_string()]);
    }
    if sidecar.classes.len() != CLASS_COUNT {
        return Err(ArtifactError(format!(
            "Sidecar lists {} classes, classifier requires {}",
            sidecar.classes.len(),
            CLASS_COUNT
        )));
    }
    Ok(sidecar.classes.clone())
}

/// Prefer the export's named probability output; fall back to the last
/// output, which is where sklearn-style exporters place it
fn pick_output_name(session: &Session) -> Result<String, ArtifactError> {
    let named = session
        .outputs()
        .iter()
        .find(|o| o.name() == PROBABILITIES_OUTPUT)
        .map(|o| o.name().to_string());
    named
        .or_else(|| session.outputs().last().map(|o| o.name().to_string()))
        .ok_or_else(|| ArtifactError("Model defines no outputs".to_string()))
}

// ============================================================================
// TESTS
// ============================================================================
