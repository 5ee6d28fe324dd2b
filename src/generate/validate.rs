//! Response validation.
//!
//! Nothing reaches reconciliation unless it deserializes into a complete
//! [`SiteStructure`]: a partial or malformed structure is rejected whole.

use super::GenerationError;
use crate::core::SiteStructure;
use serde::Deserialize;

/// Parse and validate the text returned by the service.
///
/// A surrounding Markdown code fence (```` ```json ... ``` ````) is
/// tolerated. Syntax errors are [`GenerationError::Decode`]; valid JSON of
/// the wrong shape is [`GenerationError::Invalid`].
pub fn parse_structure(text: &str) -> Result<SiteStructure, GenerationError> {
    let json = strip_code_fence(text.trim());
    if json.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }

    let value: serde_json::Value = serde_json::from_str(json).map_err(GenerationError::Decode)?;
    SiteStructure::deserialize(value).map_err(|e| GenerationError::Invalid(e.to_string()))
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // drop the info string (`json`) on the opening line
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}
