//! Error handling and diagnostics for the Rill language
//!
//! This module provides the error types and diagnostic formatting for the
//! front end: lexical positions, parse errors, and file-level failures.

use std::fmt;

pub mod diagnostic;

pub use diagnostic::Diagnostic;

/// Result type alias for Rill operations
pub type RillResult<T> = Result<T, RillError>;

/// Source location information for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-based)
    pub line: usize,
    /// Column number (reset to zero at each newline)
    pub column: usize,
    /// Optional filename
    pub filename: Option<String>,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize, filename: Option<String>) -> Self {
        Self {
            line,
            column,
            filename,
        }
    }

    /// Create a source location without a filename
    pub fn at(line: usize, column: usize) -> Self {
        Self::new(line, column, None)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref filename) = self.filename {
            write!(f, "{}:{}:{}", filename, self.line, self.column)
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

/// Main error type for the Rill front end
#[derive(Debug, Clone)]
pub enum RillError {
    /// Grammar violation discovered while parsing
    ParseError {
        message: String,
        location: SourceLocation,
    },
    /// Failure reading an input file
    IoError { message: String },
}

impl RillError {
    /// Create a new parse error
    pub fn parse_error(message: impl Into<String>, location: SourceLocation) -> Self {
        Self::ParseError {
            message: message.into(),
            location,
        }
    }

    /// Create a new I/O error
    pub fn io_error(message: impl Into<String>) -> Self {
        Self::IoError {
            message: message.into(),
        }
    }

    /// Get the error kind as a string
    pub fn kind(&self) -> &str {
        match self {
            Self::ParseError { .. } => "Parse Error",
            Self::IoError { .. } => "IO Error",
        }
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        match self {
            Self::ParseError { message, .. } | Self::IoError { message } => message,
        }
    }

    /// Get the source location if available
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            Self::ParseError { location, .. } => Some(location),
            Self::IoError { .. } => None,
        }
    }
}

impl fmt::Display for RillError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParseError { message, location } => {
                write!(f, "[{}:{}] {}", location.line, location.column, message)
            }
            Self::IoError { message } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for RillError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_location_display() {
        let loc = SourceLocation::at(10, 5);
        assert_eq!(loc.to_string(), "10:5");

        let loc_with_file = SourceLocation::new(10, 5, Some("test.rill".to_string()));
        assert_eq!(loc_with_file.to_string(), "test.rill:10:5");
    }

    #[test]
    fn test_error_creation() {
        let loc = SourceLocation::at(1, 1);
        let err = RillError::parse_error("Expected primary expression but got @", loc.clone());

        assert_eq!(err.kind(), "Parse Error");
        assert_eq!(err.message(), "Expected primary expression but got @");
        assert_eq!(err.location(), Some(&loc));
    }

    #[test]
    fn test_parse_error_display() {
        let loc = SourceLocation::at(5, 10);
        let err = RillError::parse_error("Expected token type <SEMICOLON> but got <EOF>", loc);

        assert_eq!(
            err.to_string(),
            "[5:10] Expected token type <SEMICOLON> but got <EOF>"
        );
    }

    #[test]
    fn test_io_error_display() {
        let err = RillError::io_error("Failed to read file 'missing.rill'");
        assert_eq!(err.to_string(), "Failed to read file 'missing.rill'");
        assert_eq!(err.location(), None);
    }
}
