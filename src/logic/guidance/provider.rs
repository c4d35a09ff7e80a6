//! Shared plumbing for the generative guidance providers.
//!
//! Each configured backend turns a (system, user) prompt pair into one
//! completion string. Failures stay per-provider so the orchestrator can
//! walk the chain in order and land on the static tier when every
//! generative attempt fails.

use std::time::Duration;

use crate::logic::guidance::gemini::GeminiProvider;
use crate::logic::guidance::openai::OpenAiProvider;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Maximum characters of an upstream error body kept in a provider error.
const ERROR_BODY_CHARS: usize = 200;

// ============================================================================
// ERRORS
// ============================================================================

/// Errors from a single generative provider attempt
#[derive(Debug, Clone)]
pub enum ProviderError {
    Network(String),
    Api { status: u16, message: String },
    Malformed(String),
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(e) => write!(f, "Network error: {}", e),
            Self::Api { status, message } => write!(f, "API error {}: {}", status, message),
            Self::Malformed(e) => write!(f, "Malformed response: {}", e),
        }
    }
}

impl std::error::Error for ProviderError {}

// ============================================================================
// SHARED HTTP CLIENT
// ============================================================================

/// Build the HTTP client shared by the generative providers.
pub fn http_client(timeout_secs: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .expect("Failed to create HTTP client")
}

/// Trim an upstream error body to a loggable size.
pub fn truncate_message(body: &str) -> String {
    if body.chars().count() <= ERROR_BODY_CHARS {
        body.to_string()
    } else {
        let cut: String = body.chars().take(ERROR_BODY_CHARS).collect();
        format!("{}...", cut)
    }
}

// ============================================================================
// PROVIDER DISPATCH
// ============================================================================

/// A configured generative backend the orchestrator can call
pub enum GenerativeProvider {
    OpenAi(OpenAiProvider),
    Gemini(GeminiProvider),
    #[cfg(test)]
    Scripted(ScriptedProvider),
}

impl GenerativeProvider {
    /// Short provider name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenAi(_) => "openai",
            Self::Gemini(_) => "gemini",
            #[cfg(test)]
            Self::Scripted(scripted) => scripted.name,
        }
    }

    /// Run one completion against this provider
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, ProviderError> {
        match self {
            Self::OpenAi(provider) => provider.complete(system, user).await,
            Self::Gemini(provider) => provider.complete(system, user).await,
            #[cfg(test)]
            Self::Scripted(scripted) => scripted.reply.clone(),
        }
    }
}

/// Canned provider used by orchestrator tests
#[cfg(test)]
pub struct ScriptedProvider {
    pub name: &'static str,
    pub reply: Result<String, ProviderError>,
}
