//! Typed engine configuration
//!
//! One `EngineConfig` value is built at startup (usually from the
//! environment) and handed down through constructors. No globals; every
//! stage owns the slice of config it needs.

use crate::constants::{
    get_db_path, get_gemini_api_key, get_gemini_base_url, get_gemini_model, get_llm_timeout_secs,
    get_model_path, get_openai_api_key, get_openai_base_url, get_openai_model, get_scaler_path,
    get_storage_backend, DEFAULT_DB_PATH, DEFAULT_LLM_TIMEOUT_SECS, DEFAULT_MODEL_PATH,
    DEFAULT_OPENAI_MAX_TOKENS, DEFAULT_OPENAI_TEMPERATURE, DEFAULT_SCALER_PATH,
};
use crate::logic::risk::rules::{FeatureWeights, RiskThresholds};

// ============================================================================
// ENGINE CONFIG
// ============================================================================

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub scoring: ScoringConfig,
    pub guidance: GuidanceConfig,
    pub storage: StorageConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            guidance: GuidanceConfig::default(),
            storage: StorageConfig::Memory,
        }
    }
}

impl EngineConfig {
    /// Read everything from the environment, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            scoring: ScoringConfig::from_env(),
            guidance: GuidanceConfig::from_env(),
            storage: StorageConfig::from_env(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.scoring.validate()?;
        self.guidance.validate()?;
        self.storage.validate()
    }
}

// ============================================================================
// SCORING
// ============================================================================

#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub weights: FeatureWeights,
    pub thresholds: RiskThresholds,
    pub model_path: String,
    pub scaler_path: String,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: FeatureWeights::default(),
            thresholds: RiskThresholds::default(),
            model_path: DEFAULT_MODEL_PATH.to_string(),
            scaler_path: DEFAULT_SCALER_PATH.to_string(),
        }
    }
}

impl ScoringConfig {
    pub fn from_env() -> Self {
        let mut thresholds = RiskThresholds::default();
        thresholds.low = env_f32("RISK_LOW_THRESHOLD", thresholds.low);
        thresholds.medium = env_f32("RISK_MEDIUM_THRESHOLD", thresholds.medium);
        Self {
            weights: FeatureWeights::default(),
            thresholds,
            model_path: get_model_path(),
            scaler_path: get_scaler_path(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.weights.validate()?;
        self.thresholds.validate()?;
        if self.model_path.is_empty() || self.scaler_path.is_empty() {
            return Err("Model and scaler paths must not be empty".to_string());
        }
        Ok(())
    }
}

// ============================================================================
// GUIDANCE
// ============================================================================

#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct GuidanceConfig {
    /// Present only when an API key is configured
    pub openai: Option<OpenAiSettings>,
    pub gemini: Option<GeminiSettings>,
    pub request_timeout_secs: u64,
}

impl Default for GuidanceConfig {
    fn default() -> Self {
        Self {
            openai: None,
            gemini: None,
            request_timeout_secs: DEFAULT_LLM_TIMEOUT_SECS,
        }
    }
}

impl GuidanceConfig {
    pub fn from_env() -> Self {
        let openai = get_openai_api_key().map(|api_key| OpenAiSettings {
            api_key,
            model: get_openai_model(),
            base_url: get_openai_base_url(),
            temperature: env_f32("OPENAI_TEMPERATURE", DEFAULT_OPENAI_TEMPERATURE),
            max_tokens: env_u32("OPENAI_MAX_TOKENS", DEFAULT_OPENAI_MAX_TOKENS),
        });
        let gemini = get_gemini_api_key().map(|api_key| GeminiSettings {
            api_key,
            model: get_gemini_model(),
            base_url: get_gemini_base_url(),
        });
        Self {
            openai,
            gemini,
            request_timeout_secs: get_llm_timeout_secs(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.request_timeout_secs == 0 {
            return Err("LLM request timeout must be at least 1 second".to_string());
        }
        if let Some(openai) = &self.openai {
            if !(0.0..=2.0).contains(&openai.temperature) {
                return Err(format!(
                    "OpenAI temperature {} outside [0, 2]",
                    openai.temperature
                ));
            }
        }
        Ok(())
    }
}

// ============================================================================
// STORAGE
// ============================================================================

#[derive(Debug, Clone)]
pub enum StorageConfig {
    Memory,
    Sqlite { path: String },
}

impl StorageConfig {
    /// Anything other than "sqlite" selects the in-memory store
    pub fn from_env() -> Self {
        match get_storage_backend().to_lowercase().as_str() {
            "sqlite" => StorageConfig::Sqlite { path: get_db_path() },
            _ => StorageConfig::Memory,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        match self {
            StorageConfig::Memory => Ok(()),
            StorageConfig::Sqlite { path } if path.is_empty() => {
                Err("SQLite path must not be empty".to_string())
            }
            StorageConfig::Sqlite { .. } => Ok(()),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            StorageConfig::Memory => "memory".to_string(),
            StorageConfig::Sqlite { path } => format!("sqlite ({})", path),
        }
    }
}

// ============================================================================
// ENV HELPERS
// ============================================================================

fn env_f32(key: &str, default: f32) -> f32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_u32(key: &str, default: u32) -> u32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = EngineConfig::default();
        config.guidance.request_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_sqlite_path_rejected() {
        let config = StorageConfig::Sqlite { path: String::new() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let mut config = EngineConfig::default();
        config.scoring.thresholds.low = 0.8;
        config.scoring.thresholds.medium = 0.4;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_describe_storage() {
        assert_eq!(StorageConfig::Memory.describe(), "memory");
        let sqlite = StorageConfig::Sqlite { path: "a.db".to_string() };
        assert!(sqlite.describe().contains("a.db"));
    }

    #[test]
    fn test_default_db_path_used() {
        assert_eq!(DEFAULT_DB_PATH, "./privacy_analyses.db");
    }
}
