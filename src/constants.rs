//! Global constants & environment-backed settings
//!
//! Defaults live here as consts; `get_*()` helpers read the environment
//! with those defaults so callers never deal with missing vars.

// ============================================================================
// APP INFO
// ============================================================================

pub const APP_NAME: &str = "AI Privacy Footprint Analyzer";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// INPUT LIMITS
// ============================================================================

/// Minimum analyzable text length (characters)
pub const MIN_TEXT_CHARS: usize = 10;

/// Maximum analyzable text length (characters)
pub const MAX_TEXT_CHARS: usize = 10_000;

/// Characters of input text shown in history previews
pub const TEXT_PREVIEW_CHARS: usize = 100;

/// Characters of input text forwarded inside LLM prompts
pub const PROMPT_TEXT_CHARS: usize = 500;

/// Hard cap on recommendations returned per analysis
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Default number of history entries returned
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

// ============================================================================
// MODEL ARTIFACTS
// ============================================================================

pub const DEFAULT_MODEL_PATH: &str = "./models/risk_classifier.onnx";
pub const DEFAULT_SCALER_PATH: &str = "./models/risk_scaler.json";

/// Path to the ONNX risk classifier (override: ML_MODEL_PATH)
pub fn get_model_path() -> String {
    std::env::var("ML_MODEL_PATH").unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string())
}

/// Path to the scaler sidecar JSON (override: ML_SCALER_PATH)
pub fn get_scaler_path() -> String {
    std::env::var("ML_SCALER_PATH").unwrap_or_else(|_| DEFAULT_SCALER_PATH.to_string())
}

// ============================================================================
// GENERATIVE PROVIDERS
// ============================================================================

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_OPENAI_MAX_TOKENS: u32 = 500;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash-latest";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Per-request timeout for provider HTTP calls (seconds)
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 30;

/// Locale hint for the privacy assistant
pub const DEFAULT_LOCALE: &str = "IN";

/// OPENAI_API_KEY if set and non-empty
pub fn get_openai_api_key() -> Option<String> {
    std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.trim().is_empty())
}

/// GEMINI_API_KEY if set and non-empty
pub fn get_gemini_api_key() -> Option<String> {
    std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.trim().is_empty())
}

pub fn get_openai_model() -> String {
    std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string())
}

pub fn get_openai_base_url() -> String {
    std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string())
}

pub fn get_gemini_model() -> String {
    std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string())
}

pub fn get_gemini_base_url() -> String {
    std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string())
}

pub fn get_llm_timeout_secs() -> u64 {
    std::env::var("LLM_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_LLM_TIMEOUT_SECS)
}

// ============================================================================
// STORAGE
// ============================================================================

/// "memory" (default) or "sqlite"
pub const DEFAULT_STORAGE_BACKEND: &str = "memory";
pub const DEFAULT_DB_PATH: &str = "./privacy_analyses.db";

pub fn get_storage_backend() -> String {
    std::env::var("ANALYSIS_STORE").unwrap_or_else(|_| DEFAULT_STORAGE_BACKEND.to_string())
}

pub fn get_db_path() -> String {
    std::env::var("ANALYSIS_DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_are_sane() {
        assert!(MIN_TEXT_CHARS < MAX_TEXT_CHARS);
        assert!(TEXT_PREVIEW_CHARS < PROMPT_TEXT_CHARS);
        assert!(MAX_RECOMMENDATIONS >= 3);
    }

    #[test]
    fn test_default_paths_non_empty() {
        assert!(!DEFAULT_MODEL_PATH.is_empty());
        assert!(!DEFAULT_SCALER_PATH.is_empty());
        assert!(!DEFAULT_DB_PATH.is_empty());
    }
}
