//! Error handling for recase-core

use thiserror::Error;

/// Errors raised while preparing a substitution.
///
/// Substitution itself never fails: the only exceptional outcome is a search pattern
/// that does not compile, and that is reported before any text is touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RecaseError {
    #[error("Invalid regex pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Unknown replace mode: {mode}")]
    UnknownMode { mode: String },

    #[error("Unknown case style: {style}")]
    UnknownCaseStyle { style: String },
}

impl RecaseError {
    /// Create a new invalid pattern error
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create a new unknown mode error
    pub fn unknown_mode(mode: impl Into<String>) -> Self {
        Self::UnknownMode { mode: mode.into() }
    }

    /// Create a new unknown case style error
    pub fn unknown_case_style(style: impl Into<String>) -> Self {
        Self::UnknownCaseStyle {
            style: style.into(),
        }
    }
}

/// Result type alias for convenience
pub type RecaseResult<T> = Result<T, RecaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pattern_message() {
        let err = RecaseError::invalid_pattern("[oops", "unclosed character class");
        assert_eq!(
            err.to_string(),
            "Invalid regex pattern '[oops': unclosed character class"
        );
    }

    #[test]
    fn test_unknown_mode_message() {
        let err = RecaseError::unknown_mode("fuzzy");
        assert_eq!(err.to_string(), "Unknown replace mode: fuzzy");
    }
}
