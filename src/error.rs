//! Error types for jsonscope.
//!
//! The graph, index and search builders are total and never fail. Errors only
//! arise at the edges: parsing path strings, loading configuration, and the
//! host binary reading its input.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum JsonScopeError {
    /// Input text or config was not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config text was not valid YAML.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Reading input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A path string could not be parsed back into segments.
    #[error("invalid path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    /// Configuration values are out of range.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl JsonScopeError {
    pub(crate) fn invalid_path(path: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, JsonScopeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_path_message_names_the_path() {
        let err = JsonScopeError::invalid_path("a[x]", "index is not a number");
        assert_eq!(
            err.to_string(),
            "invalid path \"a[x]\": index is not a number"
        );
    }

    #[test]
    fn json_error_converts_with_question_mark() {
        fn parse(text: &str) -> Result<serde_json::Value> {
            Ok(serde_json::from_str(text)?)
        }
        let err = parse("{not json").unwrap_err();
        assert!(matches!(err, JsonScopeError::Json(_)));
        assert!(err.to_string().starts_with("JSON error:"));
    }
}
