//! Error types for ass-lyrics operations
//!
//! Provides the `CoreError` enum shared by the reader, the line resolver, the
//! layout generator and the writer, plus a coarse `ErrorCategory` for
//! grouping failures. The CLI prints [`CoreError::suggestion`] as a hint.
//!
//! # Examples
//!
//! ```rust
//! use ass_lyrics::utils::errors::{CoreError, ErrorCategory};
//!
//! let err = CoreError::invalid_time("1:23", "missing seconds");
//! assert_eq!(err.category(), ErrorCategory::Format);
//! assert!(err.to_string().contains("1:23"));
//! ```

use core::fmt;
use thiserror::Error;

/// Main error type for ass-lyrics operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Structural problems in the subtitle document
    #[error("Parse error: {0}")]
    Parse(String),

    /// Numeric field could not be parsed
    #[error("Invalid numeric value: {0}")]
    InvalidNumeric(String),

    /// Time field could not be parsed
    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    /// Event references a style the document does not define
    #[error("Unknown style '{name}' referenced on line {line}")]
    UnknownStyle {
        /// Referenced style name
        name: String,
        /// 1-based line number of the event
        line: usize,
    },

    /// Invalid layout or writer configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Error category for filtering and user-facing reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Malformed document structure
    Parsing,
    /// Malformed field values (times, numbers)
    Format,
    /// Dangling references between sections
    Reference,
    /// Bad configuration values
    Configuration,
    /// File system problems
    Io,
}

impl CoreError {
    /// Create parse error from message
    pub fn parse<T: fmt::Display>(message: T) -> Self {
        Self::Parse(message.to_string())
    }

    /// Create numeric error from a value and reason
    pub fn invalid_numeric<T: fmt::Display>(value: T, reason: &str) -> Self {
        Self::InvalidNumeric(format!("'{value}': {reason}"))
    }

    /// Create time error from a value and reason
    pub fn invalid_time<T: fmt::Display>(time: T, reason: &str) -> Self {
        Self::InvalidTime(format!("'{time}': {reason}"))
    }

    /// Create configuration error from message
    pub fn config<T: fmt::Display>(message: T) -> Self {
        Self::Config(message.to_string())
    }

    /// Category of this error
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Parse(_) => ErrorCategory::Parsing,
            Self::InvalidNumeric(_) | Self::InvalidTime(_) => ErrorCategory::Format,
            Self::UnknownStyle { .. } => ErrorCategory::Reference,
            Self::Config(_) => ErrorCategory::Configuration,
            Self::Io(_) => ErrorCategory::Io,
        }
    }

    /// Check if fixing the input document would resolve the error
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::Parse(_)
            | Self::InvalidNumeric(_)
            | Self::InvalidTime(_)
            | Self::UnknownStyle { .. }
            | Self::Config(_) => true,
            Self::Io(_) => false,
        }
    }

    /// Short hint for the most common causes of this error
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InvalidTime(_) => Some("ASS times use the H:MM:SS.CC format"),
            Self::UnknownStyle { .. } => {
                Some("Add the style to [V4+ Styles] or fix the event's Style field")
            }
            Self::Config(_) => Some("Check the layout configuration file"),
            Self::Parse(_) | Self::InvalidNumeric(_) | Self::Io(_) => None,
        }
    }
}

/// Convert from standard I/O errors
impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(format!("{err}"))
    }
}

/// Convert from integer parse errors
impl From<core::num::ParseIntError> for CoreError {
    fn from(err: core::num::ParseIntError) -> Self {
        Self::InvalidNumeric(format!("Integer parse error: {err}"))
    }
}

/// Convert from float parse errors
impl From<core::num::ParseFloatError> for CoreError {
    fn from(err: core::num::ParseFloatError) -> Self {
        Self::InvalidNumeric(format!("Float parse error: {err}"))
    }
}

/// Result type alias for convenience
pub type Result<T> = core::result::Result<T, CoreError>;
