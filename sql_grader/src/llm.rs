use serde_json::json;
use std::time::Duration;
use thiserror::Error;

// Deterministic-leaning sampling with a generous context window.
const TEMPERATURE: f64 = 0.3;
const NUM_CTX: u32 = 4096;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("request to model backend failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("model reply is missing the response field")]
    MissingResponseField,
}

/// Client for a locally hosted Ollama backend. Every call carries the
/// configured timeout; on expiry the caller falls back the same way it does
/// for a malformed reply.
pub struct OllamaClient {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");
        OllamaClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client,
        }
    }

    /// Sends the grading prompt and returns the raw model reply, asking the
    /// backend for JSON-formatted output.
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let body = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&json!({
                "model": self.model,
                "prompt": prompt,
                "stream": false,
                "format": "json",
                "options": {
                    "temperature": TEMPERATURE,
                    "num_ctx": NUM_CTX,
                },
            }))
            .send()
            .await
            .and_then(|response| response.error_for_status())?
            .json::<serde_json::Value>()
            .await?;

        body["response"]
            .as_str()
            .map(str::to_string)
            .ok_or(LlmError::MissingResponseField)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn returns_the_reply_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_partial_json(json!({
                "model": "deepseek-coder",
                "stream": false,
                "format": "json",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "deepseek-coder",
                "response": "{\"score\": 12.5}",
                "done": true,
            })))
            .mount(&server)
            .await;

        let client = OllamaClient::new(&server.uri(), "deepseek-coder", Duration::from_secs(5));
        let reply = client.generate("grade this").await.unwrap();
        assert_eq!(reply, "{\"score\": 12.5}");
    }

    #[tokio::test]
    async fn backend_error_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = OllamaClient::new(&server.uri(), "deepseek-coder", Duration::from_secs(5));
        assert!(matches!(
            client.generate("grade this").await,
            Err(LlmError::Request(_))
        ));
    }

    #[tokio::test]
    async fn reply_without_response_field_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"done": true})))
            .mount(&server)
            .await;

        let client = OllamaClient::new(&server.uri(), "deepseek-coder", Duration::from_secs(5));
        assert!(matches!(
            client.generate("grade this").await,
            Err(LlmError::MissingResponseField)
        ));
    }
}
