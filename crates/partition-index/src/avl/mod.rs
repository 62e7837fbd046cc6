//! AVL tree index.
//!
//! [`AvlMap`] is the keyed core; [`AvlTree`] is the key-only set built on
//! it. Rotations live in [`util`] and work on any [`AvlNodeLike`] arena.

pub mod avl_map;
pub mod avl_tree;
pub mod types;
pub mod util;

pub use avl_map::{AvlMap, Iter};
pub use avl_tree::AvlTree;
pub use types::{AvlNode, AvlNodeLike};
