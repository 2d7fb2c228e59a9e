use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};

static JSON_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)```json[ \t]*\r?\n?(.*?)```").expect("valid json fence pattern")
});

static ANY_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```[^\n`]*\r?\n(.*?)```").expect("valid fence pattern")
});

/// Completion text after normalization
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedContent {
    Structured(Value),
    Raw(String),
}

impl ParsedContent {
    pub fn is_structured(&self) -> bool {
        matches!(self, ParsedContent::Structured(_))
    }

    /// Collapse into a JSON value; raw text becomes `{"content": ..., "format": "text"}`
    pub fn into_value(self) -> Value {
        match self {
            ParsedContent::Structured(value) => value,
            ParsedContent::Raw(content) => json!({
                "content": content,
                "format": "text",
            }),
        }
    }
}

/// Best-effort JSON extraction from a completion.
///
/// Tries, in order: the whole text, the first ```json fenced block, the first
/// fenced block of any kind. Anything else is returned as raw text.
pub fn parse_response(content: &str) -> ParsedContent {
    let trimmed = content.trim();

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return ParsedContent::Structured(value);
    }

    for fence in [&*JSON_FENCE, &*ANY_FENCE] {
        let block = fence
            .captures(trimmed)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim());

        if let Some(block) = block {
            if let Ok(value) = serde_json::from_str::<Value>(block) {
                return ParsedContent::Structured(value);
            }
        }
    }

    ParsedContent::Raw(content.to_string())
}
