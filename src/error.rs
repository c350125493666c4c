//! Error types for unitext.

/// Errors that can occur while building or deriving text values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A value that cannot be turned into text, or malformed slice notation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A delimited regex pattern was rejected by the regex engine.
    #[error("invalid pattern {pattern:?}: {reason}")]
    PatternInvalid {
        /// The pattern as supplied by the caller.
        pattern: String,
        /// Why the engine rejected it.
        reason: String,
    },

    /// A single-index write or delete that does not land on a valid slot.
    #[error("invalid offset {index} for text of length {length}")]
    OutOfRange {
        /// The index as supplied (possibly negative).
        index: i64,
        /// Code-point length of the text at the time of the call.
        length: usize,
    },

    /// Unknown encoding label, or an encoding with unstable code-point widths.
    #[error("unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// Raw bytes that do not decode under the requested encoding.
    #[error("bytes are not valid {encoding}")]
    MalformedBytes {
        /// Name of the encoding the bytes were checked against.
        encoding: &'static str,
    },
}

/// Result type for unitext operations.
pub type Result<T> = std::result::Result<T, Error>;
