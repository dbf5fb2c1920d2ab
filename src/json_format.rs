use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use thiserror::Error;

pub const DEFAULT_INDENT: usize = 2;
pub const MAX_INDENT: usize = 10;

#[derive(Debug, Error)]
pub enum JsonFormatError {
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("output is not valid UTF-8")]
    Encoding,
}

/// Pretty-prints `input` with `indent` spaces per level. An indent of zero
/// gives compact output; anything above `MAX_INDENT` is clamped.
pub fn format_json(input: &str, indent: usize, sort_keys: bool) -> Result<String, JsonFormatError> {
    let mut value: Value = serde_json::from_str(input)?;
    if sort_keys {
        value = sort_object_keys(value);
    }

    let indent = indent.min(MAX_INDENT);
    if indent == 0 {
        return Ok(serde_json::to_string(&value)?);
    }

    let indent_str = " ".repeat(indent);
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent_str.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buffer).map_err(|_| JsonFormatError::Encoding)
}

pub fn minify_json(input: &str) -> Result<String, JsonFormatError> {
    let value: Value = serde_json::from_str(input)?;
    Ok(serde_json::to_string(&value)?)
}

fn sort_object_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let sorted: Map<String, Value> = entries
                .into_iter()
                .map(|(key, value)| (key, sort_object_keys(value)))
                .collect();
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_object_keys).collect()),
        other => other,
    }
}
