use crate::models::OracleErrorKind;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when asking the oracle for a ranking
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("HTTP client setup failed: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unauthorized: invalid or missing API key")]
    Unauthorized,

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response format: {0}")]
    MalformedResponse(String),
}

impl OracleError {
    pub fn kind(&self) -> OracleErrorKind {
        match self {
            OracleError::ClientBuild(_) | OracleError::Transport(_) => OracleErrorKind::Transport,
            OracleError::Unauthorized => OracleErrorKind::Unauthorized,
            OracleError::RateLimited(_) => OracleErrorKind::RateLimited,
            OracleError::Api { .. } => OracleErrorKind::Api,
            OracleError::MalformedResponse(_) => OracleErrorKind::MalformedResponse,
        }
    }
}

/// Anything that can turn a prompt into a ranking
#[async_trait]
pub trait RankingOracle: Send + Sync {
    /// Submit a prompt and return the raw generated text
    async fn rank(&self, prompt: &str) -> Result<String, OracleError>;
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Client for an OpenAI-compatible text completion endpoint
///
/// Each call is a single round trip: no retries and no streaming. The
/// credential lives on the client, never in process-wide state.
pub struct CompletionClient {
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    client: Client,
}

impl CompletionClient {
    /// Create a new completion client
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        max_tokens: u32,
        timeout: Duration,
    ) -> Result<Self, OracleError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(OracleError::ClientBuild)?;

        Ok(Self {
            base_url,
            api_key,
            model,
            max_tokens,
            client,
        })
    }

    /// Create a new completion client from settings
    pub fn from_settings(settings: &crate::config::OracleSettings) -> Result<Self, OracleError> {
        Self::new(
            settings.base_url.clone(),
            settings.api_key.clone(),
            settings.model.clone(),
            settings.max_tokens,
            Duration::from_secs(settings.timeout_secs),
        )
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    fn completions_url(&self) -> String {
        format!("{}/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl RankingOracle for CompletionClient {
    async fn rank(&self, prompt: &str) -> Result<String, OracleError> {
        let body = CompletionRequest {
            model: &self.model,
            prompt,
            max_tokens: self.max_tokens,
        };

        tracing::debug!(
            "Submitting prompt to {} ({} chars, max_tokens {})",
            self.model,
            prompt.len(),
            self.max_tokens
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .map(|b| b.error.message)
                .unwrap_or(text);

            tracing::warn!("Completion request failed: {} - {}", status, message);

            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => OracleError::Unauthorized,
                StatusCode::TOO_MANY_REQUESTS => OracleError::RateLimited(message),
                _ => OracleError::Api {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| OracleError::MalformedResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.text)
            .ok_or_else(|| OracleError::MalformedResponse("Missing choices[0].text".into()))
    }
}
