//! Guidance Module
//!
//! Turns analysis results into user-facing guidance: privacy
//! recommendations, a privacy-safe rewrite, and free-form Q&A. Generative
//! providers are tried in configuration order; a deterministic static tier
//! guarantees output when no provider is available.
//!
//! ## Structure
//! - `orchestrator`: provider chain walking and tier fallback
//! - `provider`: shared dispatch, errors, and HTTP client
//! - `openai` / `gemini`: the two generative backends
//! - `prompts`: prompt templates and completion parsing
//! - `fallback`: the static tier

pub mod fallback;
pub mod gemini;
pub mod openai;
pub mod orchestrator;
pub mod prompts;
pub mod provider;

// Re-export common types
pub use fallback::{
    fallback_recommendations, fallback_rewrite, ANSWER_DISCLAIMER, ASSISTANT_DISABLED_MESSAGE,
};
pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;
pub use orchestrator::GuidanceOrchestrator;
pub use prompts::{entity_summary, parse_recommendations, MAX_RECOMMENDATIONS};
pub use provider::{GenerativeProvider, ProviderError};
