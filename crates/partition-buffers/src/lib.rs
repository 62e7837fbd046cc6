//! Byte buffers for index snapshots.
//!
//! [`Writer`] appends big-endian integers and raw bytes to a growable
//! buffer; [`Reader`] consumes them again with bounds checks, so a
//! truncated snapshot surfaces as [`BufferError::EndOfBuffer`] instead of
//! a panic.
//!
//! # Example
//!
//! ```
//! use partition_buffers::{Reader, Writer};
//!
//! let mut writer = Writer::new();
//! writer.u32(7);
//! writer.utf8("cn");
//! let data = writer.flush();
//!
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.try_u32().unwrap(), 7);
//! assert_eq!(reader.try_utf8(2).unwrap(), "cn");
//! assert!(reader.try_u32().is_err());
//! ```

use thiserror::Error;

pub mod reader;
pub mod writer;

pub use reader::Reader;
pub use writer::Writer;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("unexpected end of buffer")]
    EndOfBuffer,
    #[error("invalid UTF-8")]
    InvalidUtf8,
}
