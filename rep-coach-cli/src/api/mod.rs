use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use rep_coach::config::DieticianConfig;

mod error;
mod retry;

pub use error::ApiError;
pub use retry::RetryConfig;

/// Sent as a header to keep the key out of request URLs
const API_KEY_HEADER: &str = "x-goog-api-key";

/// generateContent request payload
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// generateContent response; only the fields we read
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GenerateResponse {
    /// Text of the first candidate, parts joined
    fn first_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().map(|p| p.text).collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

/// Text-in/text-out client for the Gemini generateContent endpoint
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
    retry_config: RetryConfig,
}

impl GeminiClient {
    /// Create a new chatbot client
    pub fn new(config: &DieticianConfig, api_key: impl Into<String>) -> Result<Self> {
        Self::with_retry_config(config, api_key, RetryConfig::default())
    }

    /// Create a new chatbot client with custom retry configuration
    pub fn with_retry_config(config: &DieticianConfig, api_key: impl Into<String>, retry_config: RetryConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: api_key.into(),
            retry_config,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    /// Send a prompt and return the model's answer
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let url = self.endpoint();
        tracing::debug!("Asking {} ({} prompt chars)", self.model, prompt.len());

        self.retry_config
            .execute(|| async {
                let request = GenerateRequest {
                    contents: vec![Content {
                        parts: vec![Part { text: prompt }],
                    }],
                };

                let response = self
                    .client
                    .post(&url)
                    .header(API_KEY_HEADER, self.api_key.as_str())
                    .json(&request)
                    .send()
                    .await
                    .map_err(|e| ApiError::NetworkError(e.without_url().to_string()))?;

                let status = response.status();

                if status.is_success() {
                    let body: GenerateResponse = response
                        .json()
                        .await
                        .context("Failed to parse model response")?;

                    body.first_text().ok_or_else(|| ApiError::EmptyResponse.into())
                } else {
                    let error_text = response.text().await.unwrap_or_default();
                    Err(ApiError::from_status(status, error_text).into())
                }
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(server: &mockito::Server) -> DieticianConfig {
        DieticianConfig {
            base_url: server.url(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_generate_returns_first_candidate_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{"contents":[{"parts":[{"text":"hello"}]}]}"#.to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"- Eat "},{"text":"oats"}]}}]}"#)
            .create_async()
            .await;

        let client = GeminiClient::new(&config_for(&server), "test-key").unwrap();
        let answer = client.generate("hello").await.unwrap();

        assert_eq!(answer, "- Eat oats");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_bad_key_is_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", mockito::Matcher::Any)
            .with_status(403)
            .with_body("API key not valid")
            .expect(1)
            .create_async()
            .await;

        let client = GeminiClient::with_retry_config(&config_for(&server), "bad", RetryConfig::immediate(3)).unwrap();
        let err = client.generate("hi").await.unwrap_err();

        assert!(matches!(err.downcast_ref::<ApiError>(), Some(ApiError::Unauthorized(_))));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_errors_are_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", mockito::Matcher::Any)
            .with_status(503)
            .expect(2)
            .create_async()
            .await;

        let client = GeminiClient::with_retry_config(&config_for(&server), "k", RetryConfig::immediate(2)).unwrap();
        let err = client.generate("hi").await.unwrap_err();

        assert!(matches!(err.downcast_ref::<ApiError>(), Some(ApiError::ServerError(_))));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_empty_candidates() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"candidates":[]}"#)
            .create_async()
            .await;

        let client = GeminiClient::new(&config_for(&server), "k").unwrap();
        let err = client.generate("hi").await.unwrap_err();
        assert!(matches!(err.downcast_ref::<ApiError>(), Some(ApiError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_network_error_does_not_leak_key() {
        let config = DieticianConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            model: "m".to_string(),
            timeout_seconds: 2,
            ..Default::default()
        };

        let client = GeminiClient::with_retry_config(&config, "SUPER-SECRET-KEY", RetryConfig::immediate(1)).unwrap();
        let err = client.generate("hi").await.unwrap_err();

        assert!(matches!(err.downcast_ref::<ApiError>(), Some(ApiError::NetworkError(_))));
        let text = format!("{:#}", err);
        assert!(!text.contains("SUPER-SECRET-KEY"), "key leaked: {}", text);
        assert!(!text.contains("generateContent"), "url leaked: {}", text);
    }
}
