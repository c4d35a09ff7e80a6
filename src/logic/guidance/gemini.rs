//! Google Gemini generateContent backend.

use serde::{Deserialize, Serialize};

use crate::logic::config::GeminiSettings;
use crate::logic::guidance::provider::{truncate_message, ProviderError};

// Request/Response types

#[derive(Debug, Serialize)]
struct GenerateRequest {
    #[serde(rename = "systemInstruction")]
    system_instruction: InstructionBlock,
    contents: Vec<ContentBlock>,
}

#[derive(Debug, Serialize)]
struct InstructionBlock {
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize)]
struct ContentBlock {
    role: String,
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TextPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<TextPart>,
}

/// Gemini generateContent client
pub struct GeminiProvider {
    settings: GeminiSettings,
    http_client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(settings: GeminiSettings, http_client: reqwest::Client) -> Self {
        Self {
            settings,
            http_client,
        }
    }

    /// Run one generation and return the candidate text.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, ProviderError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.settings.base_url, self.settings.model, self.settings.api_key
        );

        let request = GenerateRequest {
            system_instruction: InstructionBlock {
                parts: vec![TextPart {
                    text: system.to_string(),
                }],
            },
            contents: vec![ContentBlock {
                role: "user".to_string(),
                parts: vec![TextPart {
                    text: user.to_string(),
                }],
            }],
        };

        let response = self
            .http_client
            .post(&url)
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

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        let content = body
            .candidates
            .first()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
            .trim()
            .to_string();

        if content.is_empty() {
            return Err(ProviderError::Malformed(
                "candidate contained no text".to_string(),
            ));
        }

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_uses_camel_case_instruction() {
        let request = GenerateRequest {
            system_instruction: InstructionBlock {
                parts: vec![TextPart {
                    text: "be brief".to_string(),
                }],
            },
            contents: vec![ContentBlock {
                role: "user".to_string(),
                parts: vec![TextPart {
                    text: "hello".to_string(),
                }],
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "be brief");
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
    }

    #[test]
    fn test_generate_response_joins_parts() {
        let raw = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Use general "}, {"text": "locations."}], "role": "model"}}
            ]
        }"#;
        let body: GenerateResponse = serde_json::from_str(raw).unwrap();
        let joined: String = body.candidates[0]
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect();
        assert_eq!(joined, "Use general locations.");
    }

    #[test]
    fn test_generate_response_tolerates_missing_fields() {
        let body: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(body.candidates.is_empty());

        let body: GenerateResponse =
            serde_json::from_str(r#"{"candidates": [{"content": {}}]}"#).unwrap();
        assert!(body.candidates[0].content.parts.is_empty());
    }
}
