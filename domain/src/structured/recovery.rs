//! Recover JSON values from a free-text model reply.
//!
//! Steps, in order:
//!
//! 1. Trim surrounding whitespace.
//! 2. Drop a leading code fence (with or without a language tag) and a
//!    trailing fence.
//! 3. Replace `\_` with `_`.
//! 4. Dispatch on the first character: `[` parses an array (text after the
//!    last `]` is discarded), `{` parses a single object (text after the
//!    last `}` is discarded) and wraps it in a one-element list.
//!
//! Anything else, or JSON that still fails to parse, is a
//! [`StructuredOutputError`] carrying the raw reply.

use serde_json::Value;
use thiserror::Error;

const FENCE: &str = "```";
const ESCAPED_UNDERSCORE: &str = "\\_";

/// The model's reply could not be turned into JSON.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Structured output parse failure: {reason}\nResponse was: {raw}")]
pub struct StructuredOutputError {
    pub reason: String,
    /// The reply exactly as received
    pub raw: String,
}

impl StructuredOutputError {
    pub fn new(reason: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            raw: raw.into(),
        }
    }
}

/// Apply the textual clean-up steps (1–3) without parsing.
pub fn clean_model_output(raw: &str) -> String {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix(FENCE) {
        // language tag, e.g. ```json
        text = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    }
    if let Some(rest) = text.strip_suffix(FENCE) {
        text = rest;
    }

    text.replace(ESCAPED_UNDERSCORE, "_").trim().to_string()
}

/// Recover an ordered list of JSON values from a model reply.
///
/// Always returns a list, even when the reply held a single object.
pub fn recover_json_values(raw: &str) -> Result<Vec<Value>, StructuredOutputError> {
    let cleaned = clean_model_output(raw);

    match cleaned.chars().next() {
        Some('[') => {
            let candidate = truncate_after_last(&cleaned, ']');
            match parse(candidate, raw)? {
                Value::Array(items) => Ok(items),
                other => Ok(vec![other]),
            }
        }
        Some('{') => {
            let candidate = truncate_after_last(&cleaned, '}');
            Ok(vec![parse(candidate, raw)?])
        }
        _ => Err(StructuredOutputError::new(
            "response neither starts with '[' nor '{'",
            raw,
        )),
    }
}

fn truncate_after_last(text: &str, close: char) -> &str {
    match text.rfind(close) {
        Some(index) => &text[..=index],
        None => text,
    }
}

fn parse(candidate: &str, raw: &str) -> Result<Value, StructuredOutputError> {
    serde_json::from_str(candidate).map_err(|e| {
        StructuredOutputError::new(format!("failed to parse JSON response: {}", e), raw)
    })
}
