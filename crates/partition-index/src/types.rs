//! Node traits and comparator helpers.
//!
//! Tree nodes live in a `Vec`-backed arena and refer to each other by
//! `u32` index. The owning shape of the tree (`l`, `r`) and the parent
//! back-reference (`p`) are exposed through [`Node`]; the ascending
//! traversal chain is kept as separate fields on the concrete node type.

use std::cmp::Ordering;

/// Tree links (`p`, `l`, `r`).
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// Comparator used by the `new()` constructors.
///
/// Comparators return a negative number, zero or a positive number when
/// `a` sorts before, equal to or after `b`.
pub fn default_comparator<K: PartialOrd>(a: &K, b: &K) -> i32 {
    if a == b {
        0
    } else if a < b {
        -1
    } else {
        1
    }
}

#[inline]
pub(crate) fn to_ordering(cmp: i32) -> Ordering {
    cmp.cmp(&0)
}
