use std::marker::PhantomData;

use partition_buffers::{Reader, Writer};

use super::codec::KeyCodec;
use crate::avl::AvlTree;
use crate::config::MarshalConfig;
use crate::error::{DecodeError, Result};
use crate::types::default_comparator;

/// Snapshots an [`AvlTree`] as `[u32 count][key]*` with keys in preorder.
///
/// Decoding rebuilds the recorded shape node for node, so the restored
/// tree has the same root and the same future rotations as the original.
///
/// # Example
///
/// ```
/// use partition_index::{AvlTree, AvlTreeMarshaller, I32Codec};
///
/// let tree: AvlTree<i32> = (1..=7).collect();
/// let marshaller = AvlTreeMarshaller::new(I32Codec);
/// let bytes = marshaller.serialize(&tree);
/// assert_eq!(&bytes[..4], &[0, 0, 0, 7]);
///
/// let restored = marshaller.deserialize(&bytes).unwrap();
/// assert_eq!(restored.root(), tree.root());
/// assert_eq!(restored.keys(), tree.keys());
/// ```
pub struct AvlTreeMarshaller<K, KC, C = fn(&K, &K) -> i32>
where
    KC: KeyCodec<K>,
    C: Fn(&K, &K) -> i32 + Clone,
{
    codec: KC,
    comparator: C,
    config: MarshalConfig,
    _key: PhantomData<fn() -> K>,
}

impl<K, KC> AvlTreeMarshaller<K, KC>
where
    K: PartialOrd,
    KC: KeyCodec<K>,
{
    pub fn new(codec: KC) -> Self {
        Self::with_comparator(codec, default_comparator::<K>)
    }
}

impl<K, KC, C> AvlTreeMarshaller<K, KC, C>
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

    pub fn serialize(&self, tree: &AvlTree<K, C>) -> Vec<u8> {
        let mut writer = Writer::with_capacity(4 + tree.size() * 8);
        writer.u32(tree.size() as u32);
        for key in tree.preorder() {
            self.codec.encode(key, &mut writer);
        }
        tracing::debug!(nodes = tree.size(), bytes = writer.x(), "serialized avl tree");
        writer.flush()
    }

    /// Restores a tree written by [`serialize`](Self::serialize). Empty
    /// input is an empty tree.
    ///
    /// # Errors
    ///
    /// [`IndexError::Decode`](crate::IndexError::Decode) when the input is
    /// truncated, has bytes past the last key, declares more nodes than
    /// allowed, repeats a key or records an unbalanced shape.
    pub fn deserialize(&self, bytes: &[u8]) -> Result<AvlTree<K, C>> {
        let mut tree = AvlTree::with_comparator(self.comparator.clone());
        if bytes.is_empty() {
            return Ok(tree);
        }
        if let Err(err) = self.rebuild(&mut tree, bytes) {
            tracing::warn!(%err, len = bytes.len(), "rejected avl tree snapshot");
            return Err(err.into());
        }
        tracing::debug!(nodes = tree.size(), "deserialized avl tree");
        Ok(tree)
    }

    fn rebuild(
        &self,
        tree: &mut AvlTree<K, C>,
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
        let map = tree.map_mut();
        for _ in 0..count {
            let key = self.codec.decode(&mut reader)?;
            map.attach_unbalanced(key, ())?;
        }
        if !reader.is_empty() {
            return Err(DecodeError::TrailingBytes(reader.size()));
        }
        map.seal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IndexError;
    use crate::marshal::codec::{I32Codec, StringCodec};

    fn marshaller() -> AvlTreeMarshaller<i32, I32Codec> {
        AvlTreeMarshaller::new(I32Codec)
    }

    #[test]
    fn writes_preorder() {
        let tree: AvlTree<i32> = [2, 1, 3].into_iter().collect();
        let bytes = marshaller().serialize(&tree);
        assert_eq!(bytes, [0, 0, 0, 3, 0, 0, 0, 2, 0, 0, 0, 1, 0, 0, 0, 3]);
    }

    #[test]
    fn keeps_shape_that_reinsertion_would_lose() {
        let mut tree: AvlTree<i32> = [3, 2, 4, 1].into_iter().collect();
        assert_eq!(tree.root(), Some(&3));
        let restored = marshaller().deserialize(&marshaller().serialize(&tree)).unwrap();
        assert_eq!(restored.root(), Some(&3));
        assert_eq!(restored.preorder(), tree.preorder());
        assert_eq!(restored.height(), tree.height());
        restored.assert_valid().unwrap();
        tree.remove(&4);
        assert_eq!(tree.root(), Some(&2));
    }

    #[test]
    fn empty_input_is_empty_tree() {
        let tree = marshaller().deserialize(&[]).unwrap();
        assert!(tree.is_empty());
        let bytes = marshaller().serialize(&tree);
        assert_eq!(bytes, [0, 0, 0, 0]);
        assert!(marshaller().deserialize(&bytes).unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_input() {
        let m = marshaller();
        assert_eq!(
            m.deserialize(&[0, 0]).unwrap_err(),
            IndexError::Decode(DecodeError::Truncated)
        );
        assert_eq!(
            m.deserialize(&[0, 0, 0, 2, 0, 0, 0, 1]).unwrap_err(),
            IndexError::Decode(DecodeError::Truncated)
        );
        assert_eq!(
            m.deserialize(&[0, 0, 0, 1, 0, 0, 0, 1, 9]).unwrap_err(),
            IndexError::Decode(DecodeError::TrailingBytes(1))
        );
        assert_eq!(
            m.deserialize(&[0, 0, 0, 2, 0, 0, 0, 1, 0, 0, 0, 1]).unwrap_err(),
            IndexError::Decode(DecodeError::DuplicateKey)
        );
        // 1 -> 2 -> 3 is a chain, not an AVL tree.
        assert_eq!(
            m.deserialize(&[0, 0, 0, 3, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 3]).unwrap_err(),
            IndexError::Decode(DecodeError::Unbalanced)
        );
    }

    #[test]
    fn count_limit() {
        let m = AvlTreeMarshaller::with_config(
            I32Codec,
            default_comparator::<i32>,
            MarshalConfig { max_node_count: 2 },
        );
        let tree: AvlTree<i32> = (0..3).collect();
        let bytes = marshaller().serialize(&tree);
        assert_eq!(
            m.deserialize(&bytes).unwrap_err(),
            IndexError::Decode(DecodeError::CountTooLarge { count: 3, max: 2 })
        );
    }

    #[test]
    fn string_keys() {
        let m = AvlTreeMarshaller::new(StringCodec);
        let tree: AvlTree<String> =
            ["ou", "cn", "dc", "uid"].into_iter().map(String::from).collect();
        let restored = m.deserialize(&m.serialize(&tree)).unwrap();
        assert_eq!(restored.in_order_string(), "cn,dc,ou,uid");
        assert_eq!(restored.root(), tree.root());
    }
}
