//! Response Normalizer — turns the model's raw text into a JSON value.
//!
//! The model is told not to fence its output but sometimes does anyway.
//! At most one leading fence (```` ```json ```` checked before ```` ``` ````) and one
//! trailing ```` ``` ```` are removed; anything else is left for the JSON parser to reject.

use serde_json::Value;
use thiserror::Error;

const JSON_FENCE_OPEN: &str = "```json";
const FENCE: &str = "```";

/// The model's reply was not valid JSON after fence stripping.
#[derive(Debug, Clone, Error)]
#[error("Failed to parse AI response: {message}")]
pub struct ParseFailure {
    pub message: String,
    /// The reply after trimming and fence stripping.
    pub raw_response: String,
}

/// Strips one optional leading fence and one optional trailing fence.
pub fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let text = if let Some(stripped) = text.strip_prefix(JSON_FENCE_OPEN) {
        stripped
    } else if let Some(stripped) = text.strip_prefix(FENCE) {
        stripped
    } else {
        text
    };
    let text = text.strip_suffix(FENCE).unwrap_or(text);
    text.trim()
}

/// Strips fences from `raw` and parses the remainder as JSON.
pub fn normalize_response(raw: &str) -> Result<Value, ParseFailure> {
    let text = strip_code_fences(raw);
    serde_json::from_str(text).map_err(|e| ParseFailure {
        message: e.to_string(),
        raw_response: text.to_string(),
    })
}
