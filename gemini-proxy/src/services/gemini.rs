//! Gemini `generateContent` client.
//!
//! The client never returns `Err`: every way the call can end is folded into
//! [`UpstreamOutcome`] so the handler matches on a single value.

use crate::config::GeminiSettings;
use crate::models::GenerateContentRequest;
use async_trait::async_trait;
use axum::body::Bytes;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::de::IgnoredAny;
use std::error::Error as StdError;

/// Result of one upstream call.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamOutcome {
    /// 2xx with a body that parses as JSON, kept byte-for-byte.
    Success(Bytes),
    /// The remote answered with a non-2xx status; `body` is its raw text.
    ErrorStatus { status: StatusCode, body: String },
    /// No usable response: connect/IO failure or an unreadable success body.
    Transport(String),
}

/// Anything that can answer a `generateContent` request.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate_content(
        &self,
        api_key: &Secret<String>,
        request: &GenerateContentRequest,
    ) -> UpstreamOutcome;
}

/// HTTP-backed generator talking to the Gemini REST API.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(settings: &GeminiSettings) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            api_base_url: settings.api_base_url.clone(),
            model: settings.model.clone(),
        })
    }

    /// Endpoint without the credential. Safe to log.
    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base_url, self.model)
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    async fn generate_content(
        &self,
        api_key: &Secret<String>,
        request: &GenerateContentRequest,
    ) -> UpstreamOutcome {
        let url = format!("{}?key={}", self.endpoint(), api_key.expose_secret());
        let prompt_len: usize = request
            .contents
            .iter()
            .flat_map(|content| &content.parts)
            .map(|part| part.text.len())
            .sum();

        tracing::debug!(
            model = %self.model,
            prompt_len,
            "Sending request to Gemini API"
        );

        let response = match self.client.post(&url).json(request).send().await {
            Ok(response) => response,
            Err(e) => return UpstreamOutcome::Transport(describe(e)),
        };

        let status = response.status();

        if !status.is_success() {
            return match response.text().await {
                Ok(body) => UpstreamOutcome::ErrorStatus { status, body },
                Err(e) => UpstreamOutcome::Transport(describe(e)),
            };
        }

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => return UpstreamOutcome::Transport(describe(e)),
        };

        match serde_json::from_slice::<IgnoredAny>(&bytes) {
            Ok(_) => UpstreamOutcome::Success(bytes),
            Err(e) => UpstreamOutcome::Transport(format!("Failed to parse response: {}", e)),
        }
    }
}

/// Render a reqwest error with its cause chain, minus the request URL.
///
/// The URL carries the credential in its query string.
fn describe(err: reqwest::Error) -> String {
    let err = err.without_url();
    let mut message = err.to_string();

    let mut source = StdError::source(&err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    message
}
