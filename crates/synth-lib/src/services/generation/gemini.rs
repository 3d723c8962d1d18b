// Gemini Provider Implementation
//
// Google Gemini generates the website payload via their REST API.
// Requires API key.
// Default endpoint: https://generativelanguage.googleapis.com/v1beta

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::error::{GenerationError, GenerationResult};
use super::{GenerationProvider, TextOptions};
use crate::models::ProviderConfig;

/// Gemini Provider
pub struct GeminiProvider {
    config: ProviderConfig,
    client: Client,
    api_key: String,
}

impl GeminiProvider {
    pub fn new(config: ProviderConfig, api_key: String) -> Self {
        Self {
            config,
            client: Client::new(),
            api_key,
        }
    }

    fn api_url(&self, path: &str) -> String {
        let base = self.config.endpoint.trim_end_matches('/');
        format!("{}{}?key={}", base, path, self.api_key)
    }

    fn content_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }
}

// Gemini API types
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
struct GeminiPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<GeminiThinkingConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    error: Option<GeminiErrorDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    code: Option<u32>,
    message: String,
    status: Option<String>,
}

impl GeminiRequest {
    fn single_turn(prompt: &str, options: &TextOptions) -> Self {
        let generation_config = if options.temperature.is_some()
            || options.max_output_tokens.is_some()
            || options.disable_thinking
        {
            Some(GeminiGenerationConfig {
                temperature: options.temperature,
                max_output_tokens: options.max_output_tokens,
                thinking_config: options
                    .disable_thinking
                    .then_some(GeminiThinkingConfig { thinking_budget: 0 }),
            })
        } else {
            None
        };

        Self {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config,
        }
    }
}

/// Map a Gemini error body to a typed error
fn map_api_error(status: reqwest::StatusCode, body: &str, model: &str) -> GenerationError {
    if let Ok(response) = serde_json::from_str::<GeminiResponse>(body) {
        if let Some(error) = response.error {
            let error_code = error.code.unwrap_or(status.as_u16() as u32);
            let error_status = error.status.as_deref().unwrap_or("");

            if error_code == 401 || error_status == "UNAUTHENTICATED" {
                return GenerationError::AuthFailed(error.message);
            }
            if error_code == 429 || error_status == "RESOURCE_EXHAUSTED" {
                log::warn!("Gemini RESOURCE_EXHAUSTED: {}", error.message);
                return GenerationError::RateLimited;
            }
            if error_status == "NOT_FOUND" || error.message.contains("not found") {
                return GenerationError::ModelNotFound(model.to_string());
            }
            return GenerationError::ApiError(error.message);
        }
    }

    GenerationError::ApiError(format!("Gemini API error ({}): {}", status, body))
}

#[async_trait]
impl GenerationProvider for GeminiProvider {
    fn name(&self) -> &str {
        "Gemini"
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn generate_text(&self, prompt: &str, options: &TextOptions) -> GenerationResult<String> {
        let url = self.api_url(&format!("/models/{}:generateContent", self.config.model));
        let request = GeminiRequest::single_turn(prompt, options);

        log::debug!("Gemini request to model {}", self.config.model);

        let response = self
            .client
            .post(&url)
            .headers(self.content_headers())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(map_api_error(status, &body, &self.config.model));
        }

        let gemini_response: GeminiResponse =
            serde_json::from_str(&body).map_err(|e| GenerationError::ApiError(e.to_string()))?;

        let text: String = gemini_response
            .candidates
            .and_then(|c| c.into_iter().next())
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProviderKind;

    fn create_test_config() -> ProviderConfig {
        ProviderConfig::defaults(ProviderKind::Gemini)
    }

    #[test]
    fn test_provider_name() {
        let provider = GeminiProvider::new(create_test_config(), "test-key".to_string());
        assert_eq!(provider.name(), "Gemini");
    }

    #[test]
    fn test_api_url() {
        let provider = GeminiProvider::new(create_test_config(), "test-key".to_string());
        let url = provider.api_url("/models/gemini-2.5-flash:generateContent");
        assert!(url.contains("key=test-key"));
        assert!(url.contains(":generateContent"));
    }

    #[test]
    fn test_request_carries_generation_config() {
        let request = GeminiRequest::single_turn("hello", &TextOptions::site_generation());
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert!((json["generationConfig"]["temperature"].as_f64().unwrap() - 0.1).abs() < 1e-6);
        assert!(json["generationConfig"].get("thinkingConfig").is_none());
    }

    #[test]
    fn test_enhancement_request_disables_thinking() {
        let request = GeminiRequest::single_turn("hello", &TextOptions::prompt_enhancement());
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["generationConfig"]["maxOutputTokens"], 500);
        assert_eq!(json["generationConfig"]["thinkingConfig"]["thinkingBudget"], 0);
    }

    #[test]
    fn test_map_api_error_auth() {
        let body = r#"{"error":{"code":401,"message":"bad key","status":"UNAUTHENTICATED"}}"#;
        let err = map_api_error(reqwest::StatusCode::UNAUTHORIZED, body, "gemini-2.5-flash");
        assert!(matches!(err, GenerationError::AuthFailed(_)));
    }

    #[test]
    fn test_map_api_error_rate_limit() {
        let body = r#"{"error":{"code":429,"message":"quota","status":"RESOURCE_EXHAUSTED"}}"#;
        let err = map_api_error(
            reqwest::StatusCode::TOO_MANY_REQUESTS,
            body,
            "gemini-2.5-flash",
        );
        assert!(matches!(err, GenerationError::RateLimited));
    }

    #[test]
    fn test_map_api_error_unstructured_body() {
        let err = map_api_error(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            "upstream blew up",
            "gemini-2.5-flash",
        );
        assert!(matches!(err, GenerationError::ApiError(_)));
        assert!(err.to_string().contains("upstream blew up"));
    }
}
