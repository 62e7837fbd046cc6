//! Byte snapshots of the ordered containers.
//!
//! Layout: a 4-byte big-endian node count, then every key as written by
//! the caller's [`KeyCodec`]. No length prefix is added around keys.

pub mod array;
pub mod avl;
pub mod codec;

pub use array::ArrayTreeMarshaller;
pub use avl::AvlTreeMarshaller;
pub use codec::{BytesCodec, I32Codec, I64Codec, KeyCodec, StringCodec, U64Codec};
