//! Error types for PURL parsing.
//!
//! Parse failures are recoverable: callers keep the entered text as free text and flag the
//! field invalid. Nothing here is fatal.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input was empty or only whitespace.
    #[error("empty package url")]
    Empty,

    /// No `scheme:` prefix.
    #[error("missing scheme in '{input}'")]
    MissingScheme { input: String },

    /// A scheme other than `pkg`.
    #[error("unsupported scheme '{scheme}', expected 'pkg'")]
    InvalidScheme { scheme: String },

    #[error("missing package type")]
    MissingType,

    /// Type must start with a letter and contain only letters, digits, `.`, `+` or `-`.
    #[error("invalid package type '{value}'")]
    InvalidType { value: String },

    /// A `%` not followed by two hex digits, or bytes that do not decode to UTF-8.
    #[error("malformed percent-encoding in '{component}'")]
    InvalidPercentEncoding { component: String },

    /// A namespace or subpath segment that decodes to something containing `/`.
    #[error("segment '{segment}' decodes to a path separator")]
    InvalidSegment { segment: String },

    /// Qualifier without `=` or with an invalid key.
    #[error("invalid qualifier '{pair}'")]
    InvalidQualifier { pair: String },

    #[error("duplicate qualifier '{key}'")]
    DuplicateQualifier { key: String },
}
