//! Wire types for the chat-completions endpoint

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(super) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub temperature: f64,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize)]
pub(super) struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatChoice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct Usage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorBody {
    pub message: String,
}

impl ChatResponse {
    /// Text of the first choice, if any
    pub fn into_text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
    }
}

/// USD for a call given per-1k-token prices
pub(super) fn estimate_cost(usage: &Usage, input_per_1k: f64, output_per_1k: f64) -> f64 {
    (usage.prompt_tokens as f64 / 1000.0) * input_per_1k
        + (usage.completion_tokens as f64 / 1000.0) * output_per_1k
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_cost() {
        let usage = Usage {
            prompt_tokens: 2000,
            completion_tokens: 500,
        };
        let cost = estimate_cost(&usage, 0.01, 0.03);
        assert!((cost - 0.035).abs() < 1e-9);
        assert_eq!(estimate_cost(&Usage::default(), 0.01, 0.03), 0.0);
    }

    #[test]
    fn test_response_without_choices_has_no_text() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(response.into_text().is_none());
    }

    #[test]
    fn test_error_envelope() {
        let envelope: ErrorEnvelope =
            serde_json::from_str(r#"{"error": {"message": "quota exceeded", "type": "x"}}"#)
                .unwrap();
        assert_eq!(envelope.error.message, "quota exceeded");
    }
}
