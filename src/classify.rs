//! Value classifier: maps a JSON value to its [`NodeKind`] and renders a
//! short preview string.

use serde_json::Value;

use crate::types::NodeKind;

/// Default cap for graph label previews.
pub const DEFAULT_PREVIEW_MAX_LEN: usize = 80;

/// Ellipsis appended to truncated previews.
pub const ELLIPSIS: char = '…';

/// Classify a value by its runtime shape.
pub fn classify(value: &Value) -> NodeKind {
    match value {
        Value::Null => NodeKind::Null,
        Value::Bool(_) => NodeKind::Boolean,
        Value::Array(_) => NodeKind::Array,
        Value::Object(_) => NodeKind::Object,
        Value::Number(_) => NodeKind::Number,
        Value::String(_) => NodeKind::String,
    }
}

/// Short human-readable preview of a value.
///
/// Scalars render as their JSON literal, except strings which are shown
/// without quotes, with line breaks collapsed to spaces and truncated to
/// `max_len` characters. Containers never expand: arrays render as `[len]`
/// and objects as `{…}`.
pub fn preview(value: &Value, max_len: usize) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => truncate(&s.replace(['\n', '\r'], " "), max_len),
        Value::Array(items) => format!("[{}]", items.len()),
        Value::Object(_) => "{…}".to_string(),
    }
}

/// Truncate to at most `max_len` characters, ending in [`ELLIPSIS`] when cut.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_len.saturating_sub(1)).collect();
    out.push(ELLIPSIS);
    out
}
