//! Guidance orchestrator.
//!
//! Walks the configured generative providers in order and falls back to
//! the deterministic static tier when every provider fails. The caller
//! always gets an answer; provider trouble only ever costs quality.

use log::{info, warn};

use crate::logic::config::GuidanceConfig;
use crate::logic::entities::PiiEntity;
use crate::logic::guidance::fallback::{
    fallback_recommendations, fallback_rewrite, ANSWER_DISCLAIMER, ASSISTANT_DISABLED_MESSAGE,
    FALLBACK_ANSWER,
};
use crate::logic::guidance::gemini::GeminiProvider;
use crate::logic::guidance::openai::OpenAiProvider;
use crate::logic::guidance::prompts::{
    assistant_user_prompt, entity_summary, parse_recommendations, recommendations_user_prompt,
    rewrite_user_prompt, ASSISTANT_SYSTEM_PROMPT, RECOMMENDATIONS_SYSTEM_PROMPT,
    REWRITE_SYSTEM_PROMPT,
};
use crate::logic::guidance::provider::{http_client, GenerativeProvider};
use crate::logic::risk::RiskLevel;

/// Ordered provider chain plus the static tier.
pub struct GuidanceOrchestrator {
    providers: Vec<GenerativeProvider>,
}

impl GuidanceOrchestrator {
    /// Build the chain from configuration. OpenAI goes first when both
    /// keys are present; with no keys the chain is empty and every call
    /// resolves in the static tier.
    pub fn from_config(config: &GuidanceConfig) -> Self {
        let mut providers = Vec::new();

        if config.openai.is_some() || config.gemini.is_some() {
            let client = http_client(config.request_timeout_secs);

            if let Some(settings) = &config.openai {
                info!("guidance provider configured: openai ({})", settings.model);
                providers.push(GenerativeProvider::OpenAi(OpenAiProvider::new(
                    settings.clone(),
                    client.clone(),
                )));
            }
            if let Some(settings) = &config.gemini {
                info!("guidance provider configured: gemini ({})", settings.model);
                providers.push(GenerativeProvider::Gemini(GeminiProvider::new(
                    settings.clone(),
                    client.clone(),
                )));
            }
        } else {
            info!("no guidance API key configured, static tier only");
        }

        Self { providers }
    }

    #[cfg(test)]
    pub fn with_providers(providers: Vec<GenerativeProvider>) -> Self {
        Self { providers }
    }

    /// Whether at least one generative provider is configured.
    pub fn is_enabled(&self) -> bool {
        !self.providers.is_empty()
    }

    /// First successful completion from the chain, if any.
    async fn first_completion(&self, system: &str, user: &str) -> Option<String> {
        for provider in &self.providers {
            match provider.complete(system, user).await {
                Ok(reply) => return Some(reply),
                Err(e) => warn!("guidance provider '{}' failed: {}", provider.name(), e),
            }
        }
        None
    }

    /// Privacy recommendations for an analyzed text, at most five.
    pub async fn recommendations(
        &self,
        text: &str,
        entities: &[PiiEntity],
        risk_level: RiskLevel,
    ) -> Vec<String> {
        let summary = entity_summary(entities);
        let user = recommendations_user_prompt(risk_level.as_str(), &summary, text);

        if let Some(reply) = self
            .first_completion(RECOMMENDATIONS_SYSTEM_PROMPT, &user)
            .await
        {
            let parsed = parse_recommendations(&reply);
            if !parsed.is_empty() {
                return parsed;
            }
            warn!("completion held no recommendation lines, using static tier");
        }

        fallback_recommendations(entities, risk_level)
    }

    /// Privacy-safe rewrite of the analyzed text.
    pub async fn rewrite(&self, text: &str, entities: &[PiiEntity]) -> String {
        let summary = entity_summary(entities);
        let user = rewrite_user_prompt(&summary, text);

        match self.first_completion(REWRITE_SYSTEM_PROMPT, &user).await {
            Some(reply) => reply,
            None => fallback_rewrite(text, entities),
        }
    }

    /// Answer a free-form privacy question with a locale hint.
    ///
    /// Returns the fixed feature-unavailable message when no provider is
    /// configured; otherwise every answer carries the non-legal-advice
    /// disclaimer.
    pub async fn answer(&self, question: &str, locale: &str) -> String {
        if !self.is_enabled() {
            return ASSISTANT_DISABLED_MESSAGE.to_string();
        }

        let user = assistant_user_prompt(question, locale);
        let answer = match self.first_completion(ASSISTANT_SYSTEM_PROMPT, &user).await {
            Some(reply) => reply,
            None => FALLBACK_ANSWER.to_string(),
        };

        with_disclaimer(answer)
    }
}

/// Append the disclaimer unless the answer already states it.
fn with_disclaimer(answer: String) -> String {
    if answer.to_lowercase().contains("not legal advice") {
        answer
    } else {
        format!("{}\n\n{}", answer, ANSWER_DISCLAIMER)
    }
}
