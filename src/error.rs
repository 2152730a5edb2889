use std::fmt;
use std::path::PathBuf;

/// Comprehensive error type for the census application
#[derive(Debug)]
pub enum CensusError {
    /// I/O operations failed (file system access, reading files, etc.)
    Io(std::io::Error),

    /// Python source failed to parse
    Parse(String),

    /// Path validation errors (invalid paths, permissions, etc.)
    InvalidPath(PathBuf),

    /// An exclusion pattern failed to compile
    Pattern(regex::Error),

    /// JSON serialization/deserialization errors
    Json(serde_json::Error),

    /// Walk/traversal errors from the ignore crate
    Walk(ignore::Error),

    /// General validation errors
    Validation(String),
}

impl fmt::Display for CensusError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CensusError::Io(err) => write!(f, "IO error: {err}"),
            CensusError::Parse(msg) => write!(f, "Parse error: {msg}"),
            CensusError::InvalidPath(path) => write!(f, "Invalid path: {}", path.display()),
            CensusError::Pattern(err) => write!(f, "Invalid exclusion pattern: {err}"),
            CensusError::Json(err) => write!(f, "JSON error: {err}"),
            CensusError::Walk(err) => write!(f, "Directory traversal error: {err}"),
            CensusError::Validation(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for CensusError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CensusError::Io(err) => Some(err),
            CensusError::Pattern(err) => Some(err),
            CensusError::Json(err) => Some(err),
            CensusError::Walk(err) => Some(err),
            _ => None,
        }
    }
}

// Implement From trait for automatic error conversions
impl From<std::io::Error> for CensusError {
    fn from(err: std::io::Error) -> Self {
        CensusError::Io(err)
    }
}

impl From<regex::Error> for CensusError {
    fn from(err: regex::Error) -> Self {
        CensusError::Pattern(err)
    }
}

impl From<serde_json::Error> for CensusError {
    fn from(err: serde_json::Error) -> Self {
        CensusError::Json(err)
    }
}

impl From<ignore::Error> for CensusError {
    fn from(err: ignore::Error) -> Self {
        CensusError::Walk(err)
    }
}

/// Convenience Result type alias for the census crate
pub type Result<T> = std::result::Result<T, CensusError>;

/// Helper functions for creating common errors
impl CensusError {
    /// Create a parse error with context
    pub fn parse_error<S: Into<String>>(msg: S) -> Self {
        CensusError::Parse(msg.into())
    }

    /// Create an invalid path error
    pub fn invalid_path<P: Into<PathBuf>>(path: P) -> Self {
        CensusError::InvalidPath(path.into())
    }

    /// Create a validation error
    pub fn validation_error<S: Into<String>>(msg: S) -> Self {
        CensusError::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display() {
        let err = CensusError::parse_error("unterminated string literal");
        assert_eq!(err.to_string(), "Parse error: unterminated string literal");

        let err = CensusError::invalid_path("/nonexistent/path");
        assert!(err.to_string().contains("Invalid path"));

        let err = CensusError::validation_error("bad flag");
        assert_eq!(err.to_string(), "Validation error: bad flag");
    }

    #[test]
    fn test_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let census_err: CensusError = io_err.into();

        match census_err {
            CensusError::Io(_) => (), // Expected
            _ => panic!("Expected Io variant"),
        }
    }

    #[test]
    fn test_pattern_conversion() {
        let bad = regex::Regex::new("[unclosed");
        assert!(bad.is_err());
        let census_err: CensusError = bad.unwrap_err().into();
        assert!(census_err.to_string().contains("Invalid exclusion pattern"));
    }

    #[test]
    fn test_result_type_alias() {
        fn test_function() -> Result<String> {
            Ok("success".to_string())
        }

        assert!(test_function().is_ok());
    }
}
