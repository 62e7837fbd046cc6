//! Array-backed ordered index with positional access.

pub mod array_tree;

pub use array_tree::ArrayTree;
