//! Serializable snapshots of matches, substitutions and errors

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A single capture group within a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureReport {
    /// Group number (1-indexed for capturing groups)
    pub group: usize,
    /// Named group name (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Captured text, `None` when the group did not participate
    pub text: Option<String>,
    /// Start byte position (0-indexed)
    pub start: Option<usize>,
    /// End byte position (exclusive)
    pub end: Option<usize>,
}

/// A single match result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    /// Full matched text
    pub text: String,
    /// Start byte position (0-indexed)
    pub start: usize,
    /// End byte position (exclusive)
    pub end: usize,
    /// Capture groups (empty if no capturing groups)
    pub captures: Vec<CaptureReport>,
}

/// Result of a global substitution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaceReport {
    /// The pattern that was used, as `/source/`
    pub pattern: String,
    /// The replacement template
    pub replacement: String,
    /// Original input
    pub original: String,
    /// Result after replacement
    pub result: String,
    /// Number of replacements made
    pub replacements_made: usize,
}

/// Structured error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Always true for errors
    pub error: bool,
    /// Error code
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Position in pattern or template (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}

impl From<&Error> for ErrorReport {
    fn from(err: &Error) -> Self {
        let (code, position) = match err {
            Error::CompileTemplate(crate::error::CompileTemplateError::UnterminatedGroupName {
                pos,
            }) => (error_codes::INVALID_TEMPLATE, Some(*pos)),
            Error::CompileTemplate(_) => (error_codes::INVALID_TEMPLATE, None),
            Error::UndefinedGroupName { .. } => (error_codes::UNDEFINED_GROUP_NAME, None),
            Error::GroupIndexRange { .. } => (error_codes::INDEX_OUT_OF_RANGE, None),
            Error::Usage(_) => (error_codes::USAGE, None),
            Error::Compile { position, .. } => (error_codes::INVALID_PATTERN, *position),
            Error::UnsupportedFlag(_) => (error_codes::INVALID_PATTERN, None),
            Error::OffsetOutOfRange { pos, .. } | Error::NotCharBoundary { pos } => {
                (error_codes::INVALID_OFFSET, Some(*pos))
            }
            Error::Engine(_) => (error_codes::ENGINE_FAILURE, None),
        };

        Self {
            error: true,
            code: code.to_string(),
            message: err.to_string(),
            position,
        }
    }
}

/// Error codes carried by [`ErrorReport`]
pub mod error_codes {
    pub const INVALID_PATTERN: &str = "INVALID_PATTERN";
    pub const INVALID_TEMPLATE: &str = "INVALID_TEMPLATE";
    pub const UNDEFINED_GROUP_NAME: &str = "UNDEFINED_GROUP_NAME";
    pub const INDEX_OUT_OF_RANGE: &str = "INDEX_OUT_OF_RANGE";
    pub const INVALID_OFFSET: &str = "INVALID_OFFSET";
    pub const USAGE: &str = "USAGE";
    pub const ENGINE_FAILURE: &str = "ENGINE_FAILURE";
    pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
}
