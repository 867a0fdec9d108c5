//! Error types for rowcodec
//!
//! Provides a unified error type for all codec operations.

use thiserror::Error;

/// Result type alias using CodecError
pub type Result<T> = std::result::Result<T, CodecError>;

/// Unified error type for encode/decode operations
#[derive(Debug, Error)]
pub enum CodecError {
    // -------------------------------------------------------------------------
    // Schema Errors
    // -------------------------------------------------------------------------
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    // -------------------------------------------------------------------------
    // Decode Errors
    // -------------------------------------------------------------------------
    #[error("Truncated input: needed {needed} bytes, {remaining} remaining")]
    TruncatedInput { needed: usize, remaining: usize },

    /// Last key byte is not `CODEC_VERSION`. A key cut short at the tail
    /// also lands here, since whatever byte ends up last is read as the
    /// version.
    #[error("Unsupported codec version: 0x{0:02x}")]
    UnsupportedCodecVersion(u8),

    /// A reserved trailer byte is not zero. `offset` counts back from the
    /// last key byte.
    #[error("Invalid key trailer: reserved byte {offset} from the end is 0x{byte:02x}")]
    InvalidTrailer { offset: usize, byte: u8 },

    #[error("Schema version mismatch: expected {expected}, found {found}")]
    SchemaVersionMismatch { expected: i32, found: i32 },

    #[error("Common id mismatch: expected {expected}, found {found}")]
    CommonIdMismatch { expected: i64, found: i64 },

    #[error("Invalid UTF-8 in string column: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    // -------------------------------------------------------------------------
    // Encode Errors
    // -------------------------------------------------------------------------
    /// The common id has no byte-level successor for an upper scan bound:
    /// `i64::MAX`, and `-1` whose big-endian bytes are all `0xFF`.
    #[error("Overflow: common id {0} has no successor")]
    Overflow(i64),

    #[error("Invalid text value {text:?} for {column_type} column: {reason}")]
    InvalidTextValue {
        column_type: String,
        text: String,
        reason: String,
    },

    // -------------------------------------------------------------------------
    // Catalog Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CodecError {
    pub(crate) fn truncated(needed: usize, remaining: usize) -> Self {
        CodecError::TruncatedInput { needed, remaining }
    }
}

impl From<bincode::Error> for CodecError {
    fn from(err: bincode::Error) -> Self {
        CodecError::Serialization(err.to_string())
    }
}
