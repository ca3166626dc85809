//! Conversion between canonical text and [`Value`].

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::{ParseError, SerializeError};
use crate::value::Value;

/// Indentation of canonical text written back into the store
pub const CANONICAL_INDENT: usize = 2;

/// Deepest container nesting `parse` accepts. Deeper text is rejected by
/// serde_json's recursion limit.
pub const MAX_NESTING_DEPTH: usize = 127;

/// Parse canonical text into a document value.
pub fn parse(text: &str) -> Result<Value, ParseError> {
    serde_json::from_str(text).map_err(ParseError::from)
}

/// Pretty-print with two-space indentation.
pub fn to_canonical_text(value: &Value) -> Result<String, SerializeError> {
    to_text_with_indent(value, CANONICAL_INDENT)
}

/// Pretty-print with `indent` spaces per level; `0` produces compact text.
pub fn to_text_with_indent(value: &Value, indent: usize) -> Result<String, SerializeError> {
    if indent == 0 {
        return to_compact_text(value);
    }

    let indent = " ".repeat(indent);
    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(indent.as_bytes()));
    value.serialize(&mut serializer)?;

    String::from_utf8(out).map_err(|e| SerializeError {
        message: e.to_string(),
    })
}

pub fn to_compact_text(value: &Value) -> Result<String, SerializeError> {
    Ok(serde_json::to_string(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_text_uses_two_spaces() {
        let value = Value::from(json!({"user": {"name": "Al"}}));
        let text = to_canonical_text(&value).unwrap();
        assert_eq!(text, "{\n  \"user\": {\n    \"name\": \"Al\"\n  }\n}");
    }

    #[test]
    fn test_custom_indent_and_compact() {
        let value = Value::from(json!({"a": [1]}));
        assert_eq!(to_text_with_indent(&value, 4).unwrap(), "{\n    \"a\": [\n        1\n    ]\n}");
        assert_eq!(to_text_with_indent(&value, 0).unwrap(), r#"{"a":[1]}"#);
    }

    #[test]
    fn test_parse_then_print_keeps_order() {
        let text = r#"{"b":1,"a":{"d":true,"c":null}}"#;
        let value = parse(text).unwrap();
        assert_eq!(to_compact_text(&value).unwrap(), text);
    }

    fn nested_arrays(depth: usize) -> String {
        format!("{}{}", "[".repeat(depth), "]".repeat(depth))
    }

    #[test]
    fn test_nesting_limit() {
        let deepest = parse(&nested_arrays(MAX_NESTING_DEPTH)).unwrap();
        assert_eq!(deepest.depth(), MAX_NESTING_DEPTH);
        assert!(parse(&nested_arrays(MAX_NESTING_DEPTH + 1)).is_err());
    }

    #[test]
    fn test_parse_rejects_invalid_text() {
        assert!(parse("{not json}").is_err());
        assert!(parse("").is_err());
    }
}
