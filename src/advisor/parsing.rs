//! Structured Response Parsing
//!
//! Models asked for JSON routinely wrap it in markdown code fences. The
//! shared rule for every structured feature: strip the fence markers, trim,
//! parse, and convert any mismatch into [`AdvisorError::Parse`] so callers
//! can surface their fixed user-facing error string. No partial-object
//! recovery is attempted.

use serde::de::DeserializeOwned;

use super::AdvisorError;

/// Remove ```json / ``` fence markers and surrounding whitespace.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Strip fences, then parse the remainder as `T`.
pub fn parse_fenced_json<T: DeserializeOwned>(text: &str) -> Result<T, AdvisorError> {
    let cleaned = strip_code_fences(text);
    serde_json::from_str(&cleaned).map_err(|err| AdvisorError::Parse(err.to_string()))
}
