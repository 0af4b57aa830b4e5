//! The proxy route: validate, inject the server credential, forward, relay.

use crate::error::ProxyError;
use crate::models::{extract_prompt, GenerateContentRequest};
use crate::services::UpstreamOutcome;
use crate::startup::AppState;
use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
};

/// Bodies larger than this are treated as carrying no prompt.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

pub async fn gemini_proxy(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, ProxyError> {
    if request.method() != Method::POST {
        tracing::debug!(method = %request.method(), "Rejected non-POST request");
        return Err(ProxyError::MethodNotAllowed);
    }

    let body = match to_bytes(request.into_body(), MAX_BODY_BYTES).await {
        Ok(body) => body,
        Err(e) => {
            tracing::debug!(error = %e, "Failed to read request body");
            Default::default()
        }
    };

    let Some(prompt) = extract_prompt(&body) else {
        tracing::debug!("Request body has no usable prompt");
        return Err(ProxyError::MissingPrompt);
    };

    let Some(api_key) = state.config.gemini.api_key.as_ref() else {
        tracing::error!("GEMINI_API_KEY is not configured; refusing to call upstream");
        return Err(ProxyError::MissingApiKey);
    };

    let payload = GenerateContentRequest::from_prompt(prompt);

    match state.generator.generate_content(api_key, &payload).await {
        UpstreamOutcome::Success(body) => Ok((
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            Body::from(body),
        )
            .into_response()),
        UpstreamOutcome::ErrorStatus { status, body } => {
            tracing::error!(status = %status, body = %body, "Gemini API error");
            Err(ProxyError::Upstream { status, body })
        }
        UpstreamOutcome::Transport(message) => {
            tracing::error!(error = %message, "Gemini request failed");
            Err(ProxyError::Transport(message))
        }
    }
}
