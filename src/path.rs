//! Path model: canonical addresses for locations inside a JSON document.
//!
//! The root is the empty path. Object fields append `.key` (no leading dot at
//! the top level) and array elements append `[i]`. Keys that would be
//! ambiguous as bare text are written in quoted bracket form `["a.b"]` using
//! JSON string escaping, so rendering is injective and [`JsonPath::parse`]
//! inverts it exactly.
//!
//! Graph node ids are paths, except that the root uses [`ROOT_ID`] and
//! synthetic value nodes append [`VALUE_MARKER`]. `#` only ever appears inside
//! a quoted segment, so synthetic ids cannot collide with structural paths.

use serde::{Serialize, Serializer};

use crate::error::{JsonScopeError, Result};

/// Node id (and index key) used for the root location.
pub const ROOT_ID: &str = "root";

/// Suffix appended to a leaf's id to form its synthetic value node id.
pub const VALUE_MARKER: &str = "#value";

/// Characters that force a key into quoted bracket form.
const RESERVED: [char; 6] = ['.', '[', ']', '"', '\\', '#'];

// ---------------------------------------------------------------------------
// Segment
// ---------------------------------------------------------------------------

/// One step from a container to a child.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Object field access.
    Key(String),
    /// Array element access.
    Index(usize),
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for Segment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

// ---------------------------------------------------------------------------
// JsonPath
// ---------------------------------------------------------------------------

/// Canonical path to a location in a JSON tree.
///
/// Besides the rendered text, the path remembers its nearest key name and the
/// index suffix after it, so labels can be derived without re-parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct JsonPath {
    text: String,
    key: Option<String>,
    index_suffix: String,
}

impl JsonPath {
    /// The empty (root) path.
    pub fn root() -> Self {
        Self::default()
    }

    /// True for the empty path.
    pub fn is_root(&self) -> bool {
        self.text.is_empty()
    }

    /// Rendered path text (empty for the root).
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Graph node id / index key: the path text, or [`ROOT_ID`] for the root.
    pub fn node_id(&self) -> &str {
        if self.is_root() {
            ROOT_ID
        } else {
            &self.text
        }
    }

    /// Id of the synthetic value node hanging off this location.
    pub fn value_node_id(&self) -> String {
        format!("{}{}", self.node_id(), VALUE_MARKER)
    }

    /// Append one segment.
    pub fn join(&self, segment: impl Into<Segment>) -> Self {
        match segment.into() {
            Segment::Key(key) => self.child_key(&key),
            Segment::Index(index) => self.child_index(index),
        }
    }

    /// Path of an object field below this location.
    pub fn child_key(&self, key: &str) -> Self {
        let mut text = String::with_capacity(self.text.len() + key.len() + 1);
        text.push_str(&self.text);
        if is_bare_key(key, self.is_root()) {
            if !self.is_root() {
                text.push('.');
            }
            text.push_str(key);
        } else {
            text.push('[');
            // Display on a JSON string value is infallible and escapes quotes.
            text.push_str(&serde_json::Value::String(key.to_string()).to_string());
            text.push(']');
        }
        Self {
            text,
            key: Some(key.to_string()),
            index_suffix: String::new(),
        }
    }

    /// Path of an array element below this location.
    pub fn child_index(&self, index: usize) -> Self {
        let rendered = format!("[{index}]");
        Self {
            text: format!("{}{}", self.text, rendered),
            key: self.key.clone(),
            index_suffix: format!("{}{}", self.index_suffix, rendered),
        }
    }

    /// Nearest key name: the final field name with any trailing `[i]` index
    /// suffixes stripped. Empty when the path has no key segment.
    pub fn last_segment(&self) -> &str {
        self.key.as_deref().unwrap_or("")
    }

    /// Short display name for labels: `root` for the root, otherwise the last
    /// key name followed by any trailing indices (`items[0]`, `[3]`).
    pub fn label_segment(&self) -> String {
        if self.is_root() {
            return ROOT_ID.to_string();
        }
        format!("{}{}", self.last_segment(), self.index_suffix)
    }

    /// Decompose into segments.
    pub fn segments(&self) -> Vec<Segment> {
        // Paths built through `child_key`/`child_index` always parse.
        parse_segments(&self.text).unwrap_or_default()
    }

    /// Build a path from segments.
    pub fn from_segments<I>(segments: I) -> Self
    where
        I: IntoIterator<Item = Segment>,
    {
        segments
            .into_iter()
            .fold(Self::root(), |path, segment| path.join(segment))
    }

    /// Parse rendered path text (or a node id) back into a path.
    ///
    /// Accepts the empty string and [`ROOT_ID`] for the root. Rejects text that
    /// is not in canonical form, so `parse(p.as_str()) == p` for every path.
    pub fn parse(text: &str) -> Result<Self> {
        if text.is_empty() || text == ROOT_ID {
            return Ok(Self::root());
        }
        let path = Self::from_segments(parse_segments(text)?);
        if path.text != text {
            return Err(JsonScopeError::invalid_path(
                text,
                format!("not in canonical form (expected {:?})", path.text),
            ));
        }
        Ok(path)
    }
}

impl std::fmt::Display for JsonPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.node_id())
    }
}

impl Serialize for JsonPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.node_id())
    }
}

/// Ids of every structural ancestor of a node id, nearest-to-root first,
/// excluding the root itself and the id.
///
/// Works on the rendered text: cut points are `.`, `[` and `#` outside quoted
/// keys, so `a.b[0]#value` yields `a`, `a.b`, `a.b[0]`.
pub fn ancestor_ids(id: &str) -> Vec<&str> {
    let bytes = id.as_bytes();
    let mut out = Vec::new();
    let mut in_quote = false;
    let mut i = 0;
    while i < bytes.len() {
        if in_quote {
            match bytes[i] {
                b'\\' => i += 1,
                b'"' => in_quote = false,
                _ => {}
            }
        } else {
            match bytes[i] {
                b'"' => in_quote = true,
                b'.' | b'[' | b'#' if i > 0 => out.push(&id[..i]),
                _ => {}
            }
        }
        i += 1;
    }
    out
}

fn is_bare_key(key: &str, at_root: bool) -> bool {
    !key.is_empty() && !key.contains(RESERVED) && !(at_root && key == ROOT_ID)
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

fn parse_segments(text: &str) -> Result<Vec<Segment>> {
    let bytes = text.as_bytes();
    let mut segments = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'[' if bytes.get(i + 1) == Some(&b'"') => {
                let close = closing_quote(bytes, i + 2)
                    .ok_or_else(|| JsonScopeError::invalid_path(text, "unterminated quoted key"))?;
                let key: String = serde_json::from_str(&text[i + 1..=close])
                    .map_err(|e| JsonScopeError::invalid_path(text, format!("bad quoted key: {e}")))?;
                if bytes.get(close + 1) != Some(&b']') {
                    return Err(JsonScopeError::invalid_path(text, "expected ']' after quoted key"));
                }
                segments.push(Segment::Key(key));
                i = close + 2;
            }
            b'[' => {
                let close = text[i..]
                    .find(']')
                    .map(|offset| i + offset)
                    .ok_or_else(|| JsonScopeError::invalid_path(text, "unterminated index"))?;
                let digits = &text[i + 1..close];
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(JsonScopeError::invalid_path(text, "index is not a number"));
                }
                let index = digits
                    .parse()
                    .map_err(|_| JsonScopeError::invalid_path(text, "index out of range"))?;
                segments.push(Segment::Index(index));
                i = close + 1;
            }
            b'.' => {
                if segments.is_empty() {
                    return Err(JsonScopeError::invalid_path(text, "leading '.'"));
                }
                let (key, next) = bare_key(text, i + 1)?;
                segments.push(Segment::Key(key));
                i = next;
            }
            _ => {
                if !segments.is_empty() {
                    return Err(JsonScopeError::invalid_path(text, "missing separator"));
                }
                let (key, next) = bare_key(text, i)?;
                segments.push(Segment::Key(key));
                i = next;
            }
        }
    }

    Ok(segments)
}

/// Read a bare key starting at `start`; returns it and the position after it.
fn bare_key(text: &str, start: usize) -> Result<(String, usize)> {
    let rest = &text[start..];
    let end = rest.find(['.', '[']).unwrap_or(rest.len());
    let key = &rest[..end];
    if key.is_empty() {
        return Err(JsonScopeError::invalid_path(text, "empty key"));
    }
    if key.contains(RESERVED) {
        return Err(JsonScopeError::invalid_path(text, "reserved character in bare key"));
    }
    Ok((key.to_string(), start + end))
}

fn closing_quote(bytes: &[u8], mut i: usize) -> Option<usize> {
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn path(segments: &[Segment]) -> JsonPath {
        JsonPath::from_segments(segments.iter().cloned())
    }

    #[test]
    fn root_renders_empty_with_root_id() {
        let root = JsonPath::root();
        assert!(root.is_root());
        assert_eq!(root.as_str(), "");
        assert_eq!(root.node_id(), "root");
        assert_eq!(root.value_node_id(), "root#value");
        assert_eq!(root.label_segment(), "root");
    }

    #[test]
    fn join_from_root_has_no_leading_separator() {
        assert_eq!(JsonPath::root().join("name").as_str(), "name");
        assert_eq!(JsonPath::root().join(3usize).as_str(), "[3]");
    }

    #[test]
    fn join_nested() {
        let p = JsonPath::root().join("items").join(0usize).join("name");
        assert_eq!(p.as_str(), "items[0].name");
        let q = JsonPath::root().join(1usize).join(2usize);
        assert_eq!(q.as_str(), "[1][2]");
    }

    #[test_case("a.b", r#"["a.b"]"# ; "dot")]
    #[test_case("x[0]", r#"["x[0]"]"# ; "bracket")]
    #[test_case("", r#"[""]"# ; "empty")]
    #[test_case("say \"hi\"", r#"["say \"hi\""]"# ; "quote")]
    #[test_case("__val__#", r##"["__val__#"]"## ; "hash")]
    #[test_case("root", r#"["root"]"# ; "root sentinel at top level")]
    fn reserved_keys_are_quoted(key: &str, expected: &str) {
        assert_eq!(JsonPath::root().child_key(key).as_str(), expected);
    }

    #[test]
    fn root_named_key_is_bare_below_top_level() {
        let p = JsonPath::root().child_key("meta").child_key("root");
        assert_eq!(p.as_str(), "meta.root");
    }

    #[test]
    fn key_with_dot_does_not_collide_with_nested_path() {
        let dotted = JsonPath::root().child_key("a.b");
        let nested = JsonPath::root().child_key("a").child_key("b");
        assert_ne!(dotted.as_str(), nested.as_str());
    }

    #[test_case("a", "a" ; "single key")]
    #[test_case("a.b[0][1]", "b" ; "index suffixes stripped")]
    #[test_case("[0].x", "x" ; "key after index")]
    #[test_case("[0]", "" ; "index only")]
    #[test_case(r#"a["x.y"][2]"#, "x.y" ; "quoted key")]
    fn last_segment_strips_indices(text: &str, expected: &str) {
        assert_eq!(JsonPath::parse(text).unwrap().last_segment(), expected);
    }

    #[test_case("items[0]", "items[0]")]
    #[test_case("[3]", "[3]")]
    #[test_case("matrix[1][2]", "matrix[1][2]")]
    #[test_case("a.b", "b")]
    fn label_segment_keeps_trailing_indices(text: &str, expected: &str) {
        assert_eq!(JsonPath::parse(text).unwrap().label_segment(), expected);
    }

    #[test]
    fn parse_inverts_rendering() {
        let p = path(&[
            Segment::Key("items".into()),
            Segment::Index(12),
            Segment::Key("a.b".into()),
            Segment::Key("plain".into()),
            Segment::Index(0),
        ]);
        assert_eq!(p.as_str(), r#"items[12]["a.b"].plain[0]"#);
        assert_eq!(JsonPath::parse(p.as_str()).unwrap(), p);
        assert_eq!(p.segments().len(), 5);
    }

    #[test]
    fn parse_accepts_root_forms() {
        assert!(JsonPath::parse("").unwrap().is_root());
        assert!(JsonPath::parse("root").unwrap().is_root());
    }

    #[test_case(".a" ; "leading dot")]
    #[test_case("a..b" ; "empty key")]
    #[test_case("a[x]" ; "non numeric index")]
    #[test_case("a[1" ; "unterminated index")]
    #[test_case(r#"a["b"# ; "unterminated quote")]
    #[test_case(r#"["plain"]"# ; "needlessly quoted")]
    #[test_case("a[01]" ; "leading zero")]
    #[test_case("a]b" ; "stray bracket")]
    #[test_case("a#value" ; "value marker")]
    fn parse_rejects_malformed(text: &str) {
        let err = JsonPath::parse(text).unwrap_err();
        assert!(matches!(err, JsonScopeError::InvalidPath { .. }), "{err}");
    }

    #[test_case("a", &[] ; "top level")]
    #[test_case("a.b[0]#value", &["a", "a.b", "a.b[0]"] ; "value node")]
    #[test_case("[1][2]", &["[1]"] ; "root level array")]
    #[test_case(r#"a["x.y[0]"].z"#, &["a", r#"a["x.y[0]"]"#] ; "quoted key with separators")]
    #[test_case(r#"["q\"."].k"#, &[r#"["q\"."]"#] ; "escaped quote")]
    #[test_case("root#value", &["root"] ; "root value node")]
    fn ancestor_ids_cut_outside_quotes(id: &str, expected: &[&str]) {
        assert_eq!(ancestor_ids(id), expected);
    }

    #[test]
    fn serializes_as_node_id() {
        let json = serde_json::to_string(&JsonPath::root()).unwrap();
        assert_eq!(json, "\"root\"");
        let json = serde_json::to_string(&JsonPath::root().join("a")).unwrap();
        assert_eq!(json, "\"a\"");
    }
}
