//! In-memory ordered indexes for directory partitions.
//!
//! Two interchangeable ordered containers, a cursor protocol over both, a
//! duplicate-key map and byte snapshots. Containers are single-owner: no
//! internal locking, and a live cursor borrows its container.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`avl`] | [`AvlMap`] arena AVL tree with a `prev`/`next` chain, [`AvlTree`] set on top |
//! [`array`] | [`ArrayTree`], sorted `Vec` with rank access |
//! [`container`] | [`OrderedContainer`] contract shared by both |
//! [`cursor`] | [`Cursor`] boundary/element state machine over any [`CursorSource`] |
//! [`multimap`] | [`MultiValueMap`] with [`SingletonOrOrderedSet`] entries and its cursors |
//! [`marshal`] | Preorder/ascending snapshots with pluggable [`KeyCodec`]s |
//! [`config`] | Serde-loadable tuning structs |
//! [`error`] | [`IndexError`], [`DecodeError`] |
//! [`types`] | [`Node`] links and comparator helpers |
//! [`util`] | Tree-link walks over any [`Node`] arena |
//!
//! # Example
//!
//! ```
//! use partition_index::{AvlTree, Cursor};
//!
//! let mut tree = AvlTree::new();
//! for k in [37, 39, 27, 38, 21, 26, 43] {
//!     tree.insert(k);
//! }
//! for k in [26, 43, 39] {
//!     tree.remove(&k);
//! }
//! assert_eq!(tree.in_order_string(), "21,27,37,38");
//! assert_eq!(tree.root(), Some(&37));
//!
//! let mut cursor = Cursor::new(&tree);
//! cursor.after_last().unwrap();
//! assert!(cursor.previous().unwrap());
//! assert_eq!(cursor.get().unwrap(), &38);
//! ```

pub mod array;
pub mod avl;
pub mod config;
pub mod container;
pub mod cursor;
pub mod error;
pub mod marshal;
pub mod multimap;
pub mod types;
pub mod util;

pub use array::ArrayTree;
pub use avl::{AvlMap, AvlTree};
pub use config::{ArrayTreeConfig, IndexConfig, MarshalConfig, MultiMapConfig};
pub use container::OrderedContainer;
pub use cursor::{Cursor, CursorSource, Position};
pub use error::{DecodeError, IndexError, Result};
pub use marshal::{
    ArrayTreeMarshaller, AvlTreeMarshaller, BytesCodec, I32Codec, I64Codec, KeyCodec, StringCodec,
    U64Codec,
};
pub use multimap::{KeyTupleCursor, MultiMapCursor, MultiValueMap, SingletonOrOrderedSet, Tuple};
pub use types::{default_comparator, Node};
