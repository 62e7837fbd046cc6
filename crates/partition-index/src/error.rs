//! Error types shared by the containers, cursors and marshallers.
//!
//! Absent keys are never errors: lookups return `None`. The variants here
//! cover misuse of a cursor, positional access out of range and malformed
//! snapshots. A failing call leaves the container untouched.

use partition_buffers::BufferError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// The cursor is on a boundary, not on an element.
    #[error("cursor is not positioned on an element")]
    InvalidPosition,
    /// The cursor was closed.
    #[error("cursor is closed")]
    ClosedResource,
    #[error("position {position} out of range for size {size}")]
    OutOfRange { position: usize, size: usize },
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

/// Reasons a serialized index is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("truncated input")]
    Truncated,
    #[error("{0} trailing bytes after last key")]
    TrailingBytes(usize),
    #[error("node count {count} exceeds limit {max}")]
    CountTooLarge { count: u32, max: u32 },
    #[error("duplicate key")]
    DuplicateKey,
    #[error("keys out of order")]
    UnorderedKey,
    #[error("recorded tree is not height balanced")]
    Unbalanced,
    #[error("key codec: {0}")]
    Buffer(BufferError),
}

impl From<BufferError> for DecodeError {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::EndOfBuffer => DecodeError::Truncated,
            other => DecodeError::Buffer(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, IndexError>;
