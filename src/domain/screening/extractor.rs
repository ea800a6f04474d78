//! Structured output parsing for model responses.
//!
//! Models are asked for JSON but often wrap it in prose or markdown fences.
//! The parser sanitizes the raw text, locates the JSON payload and
//! deserializes it into a typed record, rejecting anything off-schema.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Maximum allowed response length (100KB).
pub const MAX_RESPONSE_LENGTH: usize = 100_000;

/// Maximum length for an individual string field (10KB).
pub const MAX_FIELD_LENGTH: usize = 10_000;

/// Errors that can occur during sanitization.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SanitizationError {
    #[error("Response too long: {actual} bytes exceeds maximum of {max} bytes")]
    TooLong { max: usize, actual: usize },

    #[error("Response is empty")]
    Empty,
}

/// Errors that can occur while turning a response into a typed record.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Sanitization failed: {0}")]
    Sanitization(#[from] SanitizationError),

    #[error("JSON parse error: {0}")]
    ParseError(String),

    #[error("Schema validation failed: {0}")]
    SchemaValidation(String),
}

/// Sanitizes model responses before parsing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseSanitizer;

impl ResponseSanitizer {
    pub fn new() -> Self {
        Self
    }

    /// Validates length, then strips control characters and injection markers.
    pub fn sanitize(&self, response: &str) -> Result<String, SanitizationError> {
        if response.len() > MAX_RESPONSE_LENGTH {
            return Err(SanitizationError::TooLong {
                max: MAX_RESPONSE_LENGTH,
                actual: response.len(),
            });
        }

        let cleaned: String = response
            .chars()
            .filter(|c| !c.is_control() || matches!(c, '\n' | '\t' | '\r'))
            .collect();

        let stripped = self.strip_injection_markers(&cleaned);
        if stripped.trim().is_empty() {
            return Err(SanitizationError::Empty);
        }
        Ok(stripped)
    }

    fn strip_injection_markers(&self, s: &str) -> String {
        let patterns = [
            "```system",
            "```assistant",
            "[INST]",
            "[/INST]",
            "<|system|>",
            "<|assistant|>",
            "<|user|>",
            "<|im_start|>",
            "<|im_end|>",
            "<<SYS>>",
            "<</SYS>>",
        ];

        let mut result = s.to_string();
        for pattern in patterns {
            result = result.replace(pattern, "");
        }
        result
    }
}

/// Parses model responses into typed records.
#[derive(Debug, Clone, Default)]
pub struct StructuredOutputParser {
    sanitizer: ResponseSanitizer,
}

impl StructuredOutputParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sanitizes `response`, extracts its JSON payload and deserializes it.
    ///
    /// String values are kept verbatim apart from truncation to
    /// [`MAX_FIELD_LENGTH`].
    pub fn parse<T: DeserializeOwned>(&self, response: &str) -> Result<T, ExtractionError> {
        let sanitized = self.sanitizer.sanitize(response)?;
        let json_str = extract_json(&sanitized);

        let value: serde_json::Value = serde_json::from_str(&json_str)
            .map_err(|e| ExtractionError::ParseError(e.to_string()))?;

        serde_json::from_value(truncate_json_strings(value))
            .map_err(|e| ExtractionError::SchemaValidation(e.to_string()))
    }
}

/// Locates JSON in a response that may carry fences or surrounding prose.
fn extract_json(response: &str) -> String {
    let trimmed = response.trim();

    if let Some(json) = extract_from_code_block(trimmed) {
        return json;
    }

    let obj_start = trimmed.find('{');
    let arr_start = trimmed.find('[');

    let (start, open, close) = match (obj_start, arr_start) {
        (Some(o), Some(a)) if a < o => (a, '[', ']'),
        (Some(o), _) => (o, '{', '}'),
        (None, Some(a)) => (a, '[', ']'),
        (None, None) => return trimmed.to_string(),
    };

    extract_balanced_json(trimmed, start, open, close).unwrap_or_else(|| trimmed.to_string())
}

fn extract_from_code_block(s: &str) -> Option<String> {
    let patterns = ["```json\n", "```json\r\n", "```\n", "```\r\n"];

    for pattern in patterns {
        if let Some(start) = s.find(pattern) {
            let json_start = start + pattern.len();
            if let Some(end) = s[json_start..].find("```") {
                return Some(s[json_start..json_start + end].trim().to_string());
            }
        }
    }
    None
}

fn extract_balanced_json(s: &str, start: usize, open: char, close: char) -> Option<String> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (offset, c) in s[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            c if c == open => depth += 1,
            c if c == close => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    let end = start + offset + c.len_utf8();
                    return Some(s[start..end].to_string());
                }
            }
            _ => {}
        }
    }
    None
}

fn truncate_json_strings(value: serde_json::Value) -> serde_json::Value {
    use serde_json::Value;

    match value {
        Value::String(s) => Value::String(truncate_field(s)),
        Value::Array(items) => Value::Array(items.into_iter().map(truncate_json_strings).collect()),
        Value::Object(obj) => Value::Object(
            obj.into_iter()
                .map(|(k, v)| (k, truncate_json_strings(v)))
                .collect(),
        ),
        other => other,
    }
}

fn truncate_field(mut s: String) -> String {
    if s.len() > MAX_FIELD_LENGTH {
        let mut cut = MAX_FIELD_LENGTH;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        s.truncate(cut);
    }
    s
}
