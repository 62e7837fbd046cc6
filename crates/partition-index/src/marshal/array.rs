use std::marker::PhantomData;

use partition_buffers::{Reader, Writer};

use super::codec::KeyCodec;
use crate::array::ArrayTree;
use crate::config::MarshalConfig;
use crate::error::{DecodeError, Result};
use crate::types::default_comparator;

/// Snapshots an [`ArrayTree`] as `[u32 count][key]*` with keys ascending.
pub struct ArrayTreeMarshaller<K, KC, C = fn(&K, &K) -> i32>
where
    KC: KeyCodec<K>,
    C: Fn(&K, &K) -> i32 + Clone,
{
    codec: KC,
    comparator: C,
    config: MarshalConfig,
    _key: PhantomData<fn() -> K>,
}

impl<K, KC> ArrayTreeMarshaller<K, KC>
where
    K: PartialOrd,
    KC: KeyCodec<K>,
{
    pub fn new(codec: KC) -> Self {
        Self::with_comparator(codec, default_comparator::<K>)
    }
}

impl<K, KC, C> ArrayTreeMarshaller<K, KC, C>
where
    KC: KeyCodec<K>,
    C: Fn(&K, &K) -> i32 + Clone,
{
    pub fn with_comparator(codec: KC, comparator: C) -> Self {
        Self::with_config(codec, comparator, MarshalConfig::default())
    }

    pub fn with_config(codec: KC, comparator: C, config: MarshalConfig) -> Self {
        Self {
            codec,
            comparator,
            config,
            _key: PhantomData,
        }
    }

    pub fn codec(&self) -> &KC {
        &self.codec
    }

    pub fn serialize(&self, tree: &ArrayTree<K, C>) -> Vec<u8> {
        let mut writer = Writer::with_capacity(4 + tree.size() * 8);
        writer.u32(tree.size() as u32);
        for key in tree.iter() {
            self.codec.encode(key, &mut writer);
        }
        tracing::debug!(keys = tree.size(), bytes = writer.x(), "serialized array tree");
        writer.flush()
    }

    /// Restores a tree written by [`serialize`](Self::serialize). Empty
    /// input is an empty tree.
    ///
    /// # Errors
    ///
    /// [`IndexError::Decode`](crate::IndexError::Decode) when the input is
    /// truncated, has bytes past the last key, declares more keys than
    /// allowed, or its keys are not strictly ascending.
    pub fn deserialize(&self, bytes: &[u8]) -> Result<ArrayTree<K, C>> {
        let mut tree = ArrayTree::with_comparator(self.comparator.clone());
        if bytes.is_empty() {
            return Ok(tree);
        }
        if let Err(err) = self.rebuild(&mut tree, bytes) {
            tracing::warn!(%err, len = bytes.len(), "rejected array tree snapshot");
            return Err(err.into());
        }
        tracing::debug!(keys = tree.size(), "deserialized array tree");
        Ok(tree)
    }

    fn rebuild(
        &self,
        tree: &mut ArrayTree<K, C>,
        bytes: &[u8],
    ) -> std::result::Result<(), DecodeError> {
        let mut reader = Reader::new(bytes);
        let count = reader.try_u32()?;
        if count > self.config.max_node_count {
            return Err(DecodeError::CountTooLarge {
                count,
                max: self.config.max_node_count,
            });
        }
        for _ in 0..count {
            let key = self.codec.decode(&mut reader)?;
            if let Some(last) = tree.last() {
                match (self.comparator)(last, &key) {
                    0 => return Err(DecodeError::DuplicateKey),
                    c if c > 0 => return Err(DecodeError::UnorderedKey),
                    _ => {}
                }
            }
            tree.push_sorted(key);
        }
        if !reader.is_empty() {
            return Err(DecodeError::TrailingBytes(reader.size()));
        }
        Ok(())
    }
}
