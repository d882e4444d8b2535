//! Response decoding.

use serde_json::Value;

/// Body of a successful response: JSON when it parses, raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseResult {
    Json(Value),
    Text(String),
}

impl ResponseResult {
    /// Decode `text` as JSON, falling back to the text itself.
    pub fn decode(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => ResponseResult::Json(value),
            Err(_) => ResponseResult::Text(text),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseResult::Json(value) => Some(value),
            ResponseResult::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseResult::Text(text) => Some(text),
            ResponseResult::Json(_) => None,
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, ResponseResult::Json(_))
    }

    /// Convert into a JSON value; text becomes a JSON string.
    pub fn into_value(self) -> Value {
        match self {
            ResponseResult::Json(value) => value,
            ResponseResult::Text(text) => Value::String(text),
        }
    }
}

impl std::fmt::Display for ResponseResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseResult::Json(value) => write!(f, "{}", value),
            ResponseResult::Text(text) => f.write_str(text),
        }
    }
}
