//! Error types shared by every operation in the crate

use thiserror::Error;

/// Errors raised while compiling a replacement template
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileTemplateError {
    #[error("invalid group name reference format at byte {pos}: missing '>'")]
    UnterminatedGroupName { pos: usize },

    #[error("can't convert replacement into String")]
    NotText,
}

/// Errors that can occur while compiling, matching or substituting
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    CompileTemplate(#[from] CompileTemplateError),

    #[error("undefined group name reference: {name}")]
    UndefinedGroupName { name: String },

    #[error("index {index} out of matches (size {len})")]
    GroupIndexRange { index: usize, len: usize },

    #[error("wrong number of arguments: {0}")]
    Usage(String),

    #[error("invalid pattern /{pattern}/: {message}")]
    Compile {
        pattern: String,
        kind: &'static str,
        position: Option<usize>,
        message: String,
    },

    #[error("unsupported flag '{0}'")]
    UnsupportedFlag(char),

    #[error("pos goes over target string ({pos} > {len})")]
    OffsetOutOfRange { pos: usize, len: usize },

    #[error("offset {pos} is not on a character boundary")]
    NotCharBoundary { pos: usize },

    #[error("engine error: {0}")]
    Engine(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
