//! Error handling module for CraftTUI
//!
//! Provides centralized error handling with proper error types using thiserror.
//! All errors in the application should use these types for consistency.

use thiserror::Error;

/// Main error type for CraftTUI
#[derive(Error, Debug)]
pub enum CraftTuiError {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Fetch errors (version list, mod lists, downloads)
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Parse errors (version list, group index)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Install errors (target directory, server download)
    #[error("Install error: {0}")]
    Install(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General errors (catch-all for edge cases)
    #[error("{0}")]
    General(String),
}

/// Result type alias for CraftTUI operations
pub type Result<T> = std::result::Result<T, CraftTuiError>;

// Convenient error constructors
impl CraftTuiError {
    /// Create a fetch error
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Create an install error
    pub fn install(msg: impl Into<String>) -> Self {
        Self::Install(msg.into())
    }

    /// Create a general error
    pub fn general(msg: impl Into<String>) -> Self {
        Self::General(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CraftTuiError::fetch("connection refused");
        assert_eq!(err.to_string(), "Fetch error: connection refused");

        let err = CraftTuiError::parse("empty version list");
        assert_eq!(err.to_string(), "Parse error: empty version list");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CraftTuiError = io_err.into();
        assert!(matches!(err, CraftTuiError::Io(_)));
    }

    #[test]
    fn test_error_constructors() {
        let err = CraftTuiError::install("target directory unwritable");
        assert!(matches!(err, CraftTuiError::Install(_)));

        let err = CraftTuiError::terminal("raw mode unavailable");
        assert!(matches!(err, CraftTuiError::Terminal(_)));
    }
}
