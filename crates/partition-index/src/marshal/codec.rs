//! Key codecs used by the marshallers.
//!
//! The marshallers write only the node count; each key's bytes and framing
//! belong to the codec.

use partition_buffers::{BufferError, Reader, Writer};

/// Encodes and decodes single keys.
pub trait KeyCodec<K> {
    fn encode(&self, key: &K, writer: &mut Writer);
    fn decode(&self, reader: &mut Reader<'_>) -> Result<K, BufferError>;
}

/// Fixed four bytes, big-endian.
#[derive(Debug, Clone, Copy, Default)]
pub struct I32Codec;

impl KeyCodec<i32> for I32Codec {
    fn encode(&self, key: &i32, writer: &mut Writer) {
        writer.i32(*key);
    }

    fn decode(&self, reader: &mut Reader<'_>) -> Result<i32, BufferError> {
        reader.try_i32()
    }
}

/// Fixed eight bytes, big-endian.
#[derive(Debug, Clone, Copy, Default)]
pub struct I64Codec;

impl KeyCodec<i64> for I64Codec {
    fn encode(&self, key: &i64, writer: &mut Writer) {
        writer.i64(*key);
    }

    fn decode(&self, reader: &mut Reader<'_>) -> Result<i64, BufferError> {
        reader.try_i64()
    }
}

/// Fixed eight bytes, big-endian.
#[derive(Debug, Clone, Copy, Default)]
pub struct U64Codec;

impl KeyCodec<u64> for U64Codec {
    fn encode(&self, key: &u64, writer: &mut Writer) {
        writer.u64(*key);
    }

    fn decode(&self, reader: &mut Reader<'_>) -> Result<u64, BufferError> {
        reader.try_u64()
    }
}

/// `u32` byte length followed by UTF-8 bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringCodec;

impl KeyCodec<String> for StringCodec {
    fn encode(&self, key: &String, writer: &mut Writer) {
        writer.u32(key.len() as u32);
        writer.utf8(key);
    }

    fn decode(&self, reader: &mut Reader<'_>) -> Result<String, BufferError> {
        let len = reader.try_u32()? as usize;
        Ok(reader.try_utf8(len)?.to_owned())
    }
}

/// `u32` byte length followed by the raw bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct BytesCodec;

impl KeyCodec<Vec<u8>> for BytesCodec {
    fn encode(&self, key: &Vec<u8>, writer: &mut Writer) {
        writer.u32(key.len() as u32);
        writer.buf(key);
    }

    fn decode(&self, reader: &mut Reader<'_>) -> Result<Vec<u8>, BufferError> {
        let len = reader.try_u32()? as usize;
        Ok(reader.try_buf(len)?.to_vec())
    }
}
