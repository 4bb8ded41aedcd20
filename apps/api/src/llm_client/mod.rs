/// Generative-text providers: the single point of entry for model calls.
///
/// No other module talks to a model API directly. The guidance layer holds an
/// `Arc<dyn GenerativeTextProvider>` chosen once at startup from `AI_PROVIDER`.
use async_trait::async_trait;
use thiserror::Error;

pub mod anthropic;
pub mod openai;
pub mod prompts;
pub mod repair;

pub use anthropic::AnthropicProvider;
pub use openai::OpenAiProvider;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// A model that turns a prompt into text. One request per call; callers own
/// timeouts and never retry.
#[async_trait]
pub trait GenerativeTextProvider: Send + Sync {
    /// Provider label for logs.
    fn name(&self) -> &'static str;

    async fn generate(&self, prompt: &str, system: &str) -> Result<String, LlmError>;
}

/// Reads an error body, preferring the provider's `{"error": {"message"}}` shape.
pub(crate) fn api_error_message(body: String) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorEnvelope {
        error: ErrorBody,
    }

    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: String,
    }

    serde_json::from_str::<ErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message_prefers_envelope() {
        let body = r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#;
        assert_eq!(api_error_message(body.to_string()), "Overloaded");
    }

    #[test]
    fn test_api_error_message_falls_back_to_raw_body() {
        assert_eq!(api_error_message("bad gateway".to_string()), "bad gateway");
    }
}
