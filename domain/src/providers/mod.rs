//! Model provider identification and response normalization.
//!
//! Providers disagree on where the reply text lives in the response body.
//! [`ProviderKind::extract_text`] hides that behind one call.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// The response body did not have the shape the provider promises.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unexpected API response format: {0}")]
pub struct ResponseFormatError(pub String);

/// Closed set of supported model providers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Mistral,
    OpenAi,
    Anthropic,
    /// Any other endpoint; extraction is best-effort
    Custom,
}

impl ProviderKind {
    /// Parse a provider name. Unrecognized names map to [`ProviderKind::Custom`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "mistral" => ProviderKind::Mistral,
            "openai" => ProviderKind::OpenAi,
            "anthropic" => ProviderKind::Anthropic,
            _ => ProviderKind::Custom,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Mistral => "mistral",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Custom => "custom",
        }
    }

    /// Pull the reply text out of a decoded response body.
    ///
    /// Known providers fail when their documented path is missing. `Custom`
    /// tries `choices[0].message.content`, then a top-level `response`, and
    /// finally returns the whole body serialized, so it never fails.
    pub fn extract_text(&self, body: &Value) -> Result<String, ResponseFormatError> {
        match self {
            ProviderKind::Mistral | ProviderKind::OpenAi => chat_completion_text(body)
                .ok_or_else(|| ResponseFormatError("missing choices[0].message.content".into())),
            ProviderKind::Anthropic => body
                .pointer("/content/0/text")
                .and_then(Value::as_str)
                .map(String::from)
                .ok_or_else(|| ResponseFormatError("missing content[0].text".into())),
            ProviderKind::Custom => Ok(chat_completion_text(body)
                .or_else(|| {
                    body.get("response").map(|response| match response {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                })
                .unwrap_or_else(|| body.to_string())),
        }
    }
}

fn chat_completion_text(body: &Value) -> Option<String> {
    body.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(String::from)
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
