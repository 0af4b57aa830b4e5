use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Every way a proxy invocation can end without a passthrough body.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Prompt is missing.")]
    MissingPrompt,

    #[error("API key not configured on the server.")]
    MissingApiKey,

    /// The upstream call never produced a response.
    #[error("{0}")]
    Transport(String),

    /// The upstream answered with a non-2xx status.
    #[error("Gemini API error: {body}")]
    Upstream { status: StatusCode, body: String },
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ProxyError::MissingPrompt => StatusCode::BAD_REQUEST,
            ProxyError::MissingApiKey | ProxyError::Transport(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ProxyError::Upstream { status, .. } => *status,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ProxyError::MethodNotAllowed => json!({ "message": self.to_string() }),
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
