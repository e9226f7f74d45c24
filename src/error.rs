//! Error types for ntwire
//!
//! Provides a unified error type for all codec operations.

use std::io;

use thiserror::Error;

use crate::value::EntryType;

/// Result type alias using WireError
pub type Result<T> = std::result::Result<T, WireError>;

/// Unified error type for decoding, encoding and updating entry values
#[derive(Debug, Error)]
pub enum WireError {
    // -------------------------------------------------------------------------
    // Stream Errors
    // -------------------------------------------------------------------------
    /// The stream ended before a complete value was read
    #[error("stream truncated: {0}")]
    Truncated(#[source] io::Error),

    #[error("IO error: {0}")]
    Io(#[source] io::Error),

    // -------------------------------------------------------------------------
    // Payload Errors
    // -------------------------------------------------------------------------
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("uleb128 value does not fit in 32 bits")]
    Uleb128Overflow,

    #[error("payload too large: {len} bytes (max {max})")]
    PayloadTooLarge { len: u64, max: u64 },

    // -------------------------------------------------------------------------
    // Tag Errors
    // -------------------------------------------------------------------------
    #[error("no such entry type: 0x{0:02x}")]
    NoSuchType(u8),

    #[error("no such entry flag: 0x{0:02x}")]
    NoSuchFlag(u8),

    // -------------------------------------------------------------------------
    // Array Errors
    // -------------------------------------------------------------------------
    #[error("not an array value: {0:?}")]
    NotAnArray(EntryType),

    #[error("type mismatch: expected {expected:?}, found {found:?}")]
    TypeMismatch { expected: EntryType, found: EntryType },

    #[error("index {index} out of bounds (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("capacity exceeded: {attempted} elements (max {capacity})")]
    CapacityExceeded { capacity: usize, attempted: usize },
}

impl From<io::Error> for WireError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            WireError::Truncated(err)
        } else {
            WireError::Io(err)
        }
    }
}

impl WireError {
    /// True when the error came from the stream running dry mid-value
    pub fn is_truncated(&self) -> bool {
        matches!(self, WireError::Truncated(_))
    }
}
