use regex::Regex;
use serde_json::Value;
use std::{fmt, sync::OnceLock};

#[derive(Debug)]
pub enum JsonRecoveryError {
    Empty,
    NoJsonObject,
    Malformed(String),
}

impl fmt::Display for JsonRecoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonRecoveryError::Empty => write!(f, "Model returned an empty response"),
            JsonRecoveryError::NoJsonObject => write!(f, "No JSON object found in model output"),
            JsonRecoveryError::Malformed(err) => write!(f, "Malformed JSON in model output: {}", err),
        }
    }
}

impl std::error::Error for JsonRecoveryError {}

fn fence_pattern() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)```[A-Za-z]*\s*(.*?)\s*```").expect("fence pattern is a valid regex")
    })
}

fn parse_object(text: &str) -> Result<Value, JsonRecoveryError> {
    match serde_json::from_str::<Value>(text) {
        Ok(value @ Value::Object(_)) => Ok(value),
        Ok(_) => Err(JsonRecoveryError::NoJsonObject),
        Err(e) => Err(JsonRecoveryError::Malformed(e.to_string())),
    }
}

/// Span from the first `{` to the last `}`.
fn outermost_braces(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Recovers a JSON object from model output.
///
/// Tries a strict parse first, then the body of the first markdown code fence,
/// then the outermost `{...}` span of the text.
pub fn parse_llm_json(raw: &str) -> Result<Value, JsonRecoveryError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(JsonRecoveryError::Empty);
    }

    let strict_error = match parse_object(text) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    if let Some(body) = fence_pattern()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
    {
        if let Ok(value) = parse_object(body) {
            return Ok(value);
        }
    }

    match outermost_braces(text) {
        Some(candidate) => parse_object(candidate),
        None => match strict_error {
            JsonRecoveryError::Malformed(_) => Err(JsonRecoveryError::NoJsonObject),
            other => Err(other),
        },
    }
}
