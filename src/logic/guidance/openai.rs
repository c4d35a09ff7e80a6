//! OpenAI chat-completions backend.

use serde::{Deserialize, Serialize};

use crate::logic::config::OpenAiSettings;
use crate::logic::guidance::provider::{truncate_message, ProviderError};

// Request/Response types

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// OpenAI-compatible chat completions client
pub struct OpenAiProvider {
    settings: OpenAiSettings,
    http_client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(settings: OpenAiSettings, http_client: reqwest::Client) -> Self {
        Self {
            settings,
            http_client,
        }
    }

    /// Run one chat completion and return the assistant message text.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, ProviderError> {
        let url = format!("{}/chat/completions", self.settings.base_url);

        let request = ChatRequest {
            model: self.settings.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.settings.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status,
                message: truncate_message(&error_text),
            });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        let content = body
            .choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(ProviderError::Malformed(
                "completion contained no text".to_string(),
            ));
        }

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_serializes_expected_shape() {
        let request = ChatRequest {
            model: "gpt-3.5-turbo".to_string(),
            messages: vec![ChatMessage {
                role: "system".to_string(),
                content: "be brief".to_string(),
            }],
            temperature: 0.7,
            max_tokens: 500,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], "be brief");
        assert_eq!(json["max_tokens"], 500);
    }

    #[test]
    fn test_chat_response_parses_first_choice() {
        let raw = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "  1. Remove the phone number.  "}}
            ]
        }"#;
        let body: ChatResponse = serde_json::from_str(raw).unwrap();
        let content = body.choices.first().map(|c| c.message.content.trim()).unwrap();
        assert_eq!(content, "1. Remove the phone number.");
    }

    #[test]
    fn test_chat_response_empty_choices() {
        let body: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(body.choices.is_empty());
    }
}
