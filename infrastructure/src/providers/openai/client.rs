//! HTTP client for the chat-completions endpoint

use super::types::{ChatMessage, ChatRequest, ChatResponse, ErrorEnvelope, estimate_cost};
use crate::config::FileProviderConfig;
use async_trait::async_trait;
use council_application::{ReasoningError, ReasoningProvider, ReasoningRequest, ReasoningResponse};
use reqwest::{Client, header};
use std::time::Duration;
use tracing::debug;

/// Connection and pricing settings for one endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct OpenAiSettings {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub input_price_per_1k: f64,
    pub output_price_per_1k: f64,
    pub temperature: f64,
    pub max_tokens: u32,
    pub request_timeout: Duration,
}

impl OpenAiSettings {
    /// Build settings from the `[provider]` section, resolving the API key.
    ///
    /// Local endpoints (`localhost`, `127.0.0.1`) may run without a key.
    pub fn from_config(config: &FileProviderConfig) -> Result<Self, ReasoningError> {
        let api_key = config.resolve_api_key();
        if api_key.is_none() && !is_local(&config.base_url) {
            return Err(ReasoningError::MissingCredentials(format!(
                "set {} or provider.api_key",
                config.api_key_env
            )));
        }
        Ok(Self {
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            api_key,
            input_price_per_1k: config.input_price_per_1k,
            output_price_per_1k: config.output_price_per_1k,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            request_timeout: Duration::from_secs(config.request_timeout_secs),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

fn is_local(url: &str) -> bool {
    let rest = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .unwrap_or(url);
    rest.starts_with("localhost") || rest.starts_with("127.0.0.1") || rest.starts_with("[::1]")
}

/// [`ReasoningProvider`] backed by an OpenAI-compatible HTTP endpoint
pub struct OpenAiCompatibleProvider {
    client: Client,
    endpoint: String,
    name: String,
    settings: OpenAiSettings,
}

impl OpenAiCompatibleProvider {
    pub fn new(settings: OpenAiSettings) -> Result<Self, ReasoningError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        if let Some(key) = settings.api_key.as_deref().filter(|k| !k.is_empty()) {
            let auth = header::HeaderValue::from_str(&format!("Bearer {}", key))
                .map_err(|e| ReasoningError::MissingCredentials(format!("invalid API key: {}", e)))?;
            headers.insert(header::AUTHORIZATION, auth);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|e| ReasoningError::Other(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: settings.endpoint(),
            name: format!("openai-compatible:{}", settings.model),
            settings,
        })
    }

    pub fn settings(&self) -> &OpenAiSettings {
        &self.settings
    }
}

#[async_trait]
impl ReasoningProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(
        &self,
        request: &ReasoningRequest,
    ) -> Result<ReasoningResponse, ReasoningError> {
        let body = ChatRequest {
            model: &self.settings.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ReasoningError::Timeout
                } else {
                    ReasoningError::Connection(e.to_string())
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ReasoningError::Connection(e.to_string()))?;

        if !status.is_success() {
            let body = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(ReasoningError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let mut parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| ReasoningError::InvalidResponse(e.to_string()))?;
        let usage = parsed.usage.take().unwrap_or_default();
        let cost_usd = estimate_cost(
            &usage,
            self.settings.input_price_per_1k,
            self.settings.output_price_per_1k,
        );
        debug!(
            provider = %self.name,
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            cost_usd,
            "completion received"
        );

        let content = parsed
            .into_text()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ReasoningError::InvalidResponse("response has no content".to_string()))?;

        Ok(ReasoningResponse::new(content, cost_usd))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings(base_url: String) -> OpenAiSettings {
        OpenAiSettings {
            base_url,
            model: "test-model".to_string(),
            api_key: Some("sk-test".to_string()),
            input_price_per_1k: 0.002,
            output_price_per_1k: 0.004,
            temperature: 0.2,
            max_tokens: 256,
            request_timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn test_complete_returns_text_and_cost() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({"model": "test-model"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "POSITION: SUPPORT"}}],
                "usage": {"prompt_tokens": 1000, "completion_tokens": 500}
            })))
            .mount(&server)
            .await;

        let provider =
            OpenAiCompatibleProvider::new(settings(format!("{}/v1", server.uri()))).unwrap();
        let response = provider
            .complete(&ReasoningRequest::new("system", "prompt"))
            .await
            .unwrap();

        assert_eq!(response.text, "POSITION: SUPPORT");
        assert!((response.cost_usd - 0.004).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_error_status_surfaces_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": {"message": "rate limited"}
            })))
            .mount(&server)
            .await;

        let provider = OpenAiCompatibleProvider::new(settings(server.uri())).unwrap();
        match provider.complete(&ReasoningRequest::new("s", "p")).await {
            Err(ReasoningError::Status { status, body }) => {
                assert_eq!(status, 429);
                assert_eq!(body, "rate limited");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_content_is_invalid() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "  "}}]
            })))
            .mount(&server)
            .await;

        let provider = OpenAiCompatibleProvider::new(settings(server.uri())).unwrap();
        assert!(matches!(
            provider.complete(&ReasoningRequest::new("s", "p")).await,
            Err(ReasoningError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_remote_endpoint_requires_key() {
        let config = FileProviderConfig {
            api_key_env: "COUNCIL_TEST_NO_SUCH_KEY".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            OpenAiSettings::from_config(&config),
            Err(ReasoningError::MissingCredentials(_))
        ));

        let local = FileProviderConfig {
            base_url: "http://localhost:11434/v1".to_string(),
            ..config
        };
        let settings = OpenAiSettings::from_config(&local).unwrap();
        assert!(settings.api_key.is_none());
        assert_eq!(settings.endpoint(), "http://localhost:11434/v1/chat/completions");
    }
}
