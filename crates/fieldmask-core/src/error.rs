//! Error types for FieldMask Core

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Decode error at byte {position}: {kind}")]
    Decode {
        position: usize,
        kind: DecodeErrorKind,
    },

    #[error("Nesting depth exceeds limit of {limit}")]
    DepthExceeded { limit: usize },

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration not found")]
    ConfigNotFound,

    #[error("Configuration validation failed: {0}")]
    ConfigValidation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons the legacy text format can fail to decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeErrorKind {
    #[error("unexpected closing '{0}'")]
    UnexpectedClose(char),

    #[error("unclosed '{0}'")]
    Unclosed(char),

    #[error("container opened with '{open}' but closed with '{close}'")]
    MismatchedClose { open: char, close: char },

    #[error("trailing characters after container")]
    TrailingCharacters,

    #[error("object entry is missing '='")]
    MissingEquals,

    #[error("object entry has an empty key")]
    EmptyKey,

    #[error("duplicate object key")]
    DuplicateKey,
}

impl Error {
    pub fn decode(position: usize, kind: DecodeErrorKind) -> Self {
        Error::Decode { position, kind }
    }

    /// Whether this error came from malformed legacy-format input
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode { .. } | Error::DepthExceeded { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
