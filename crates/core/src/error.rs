//! Error types for the huffman-text codec.
//!
//! All operations return structured errors rather than panicking.
//! Codec failures are deterministic, so none of them are worth retrying.

use thiserror::Error;

/// Top-level error type for all operations in the system.
///
/// Each variant corresponds to a specific failure domain:
/// - Codec: encode/decode failures produced by the algorithm itself
/// - Algorithm selection: a name that no registered algorithm answers to
/// - JSON: malformed request or response documents
/// - I/O: reading input or writing output
#[derive(Debug, Error)]
pub enum Error {
    /// Codec error (e.g., empty input, unknown code on decode)
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Requested algorithm is not registered in the active configuration
    #[error("unknown algorithm: {name:?}")]
    UnknownAlgorithm { name: String },

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether the failure was caused by the caller's input.
    ///
    /// A transport layer reports these as client errors; everything else
    /// is a failure of the host environment.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Error::Io(_))
    }
}

/// Huffman codec errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Tokenization produced no symbols (cannot build a frequency table)
    #[error("empty input: nothing to encode")]
    EmptyInput,

    /// A transmitted token has no entry in the inverted encoding map
    #[error("no symbol for code {token:?} at token position {position}")]
    DecodeLookupFailure { token: String, position: usize },

    /// Only one distinct symbol and the active policy rejects that case
    #[error("degenerate alphabet: {symbol:?} is the only distinct symbol")]
    DegenerateAlphabet { symbol: String },

    /// A symbol has no entry in the encoding map being applied
    #[error("no code for symbol {symbol:?}")]
    MissingCode { symbol: String },

    /// The supplied encoding map assigns one code to two symbols
    #[error("code {code:?} is assigned to both {first:?} and {second:?}")]
    DuplicateCode {
        code: String,
        first: String,
        second: String,
    },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
