//! Wire types for the proxied `generateContent` call.

use serde::Serialize;
use serde_json::Value;

/// Body sent upstream: `{"contents":[{"parts":[{"text": ...}]}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Part {
    pub text: String,
}

impl GenerateContentRequest {
    /// Wrap a single prompt as one user turn with one text part.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.into(),
                }],
            }],
        }
    }
}

/// Pull `prompt` out of a raw request body.
///
/// Accepts only a JSON object whose `prompt` is a string with at least one
/// non-whitespace character. Anything else, including a body that is not JSON,
/// yields `None`. The returned prompt is not trimmed.
pub fn extract_prompt(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;

    value
        .get("prompt")
        .and_then(Value::as_str)
        .filter(|prompt| !prompt.trim().is_empty())
        .map(str::to_owned)
}
