//! Traversal helpers over the tree links of any [`Node`] arena.
//!
//! These walk `p`/`l`/`r` only. Containers normally answer neighbor
//! queries from their threaded chain; these are used to cross-check it.

use crate::types::Node;

#[inline]
fn get_p<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].p()
}
#[inline]
fn get_l<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].l()
}
#[inline]
fn get_r<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].r()
}

/// Leftmost node under `root`.
pub fn first<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(l) = get_l(arena, curr) {
        curr = l;
    }
    Some(curr)
}

/// In-order successor following tree links.
pub fn next<N: Node>(arena: &[N], node: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, node) {
        return first(arena, Some(r));
    }
    let mut curr = node;
    let mut p = get_p(arena, node);
    while let Some(pi) = p {
        if get_r(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// Node indices in preorder (node, left subtree, right subtree).
pub fn preorder<N: Node>(arena: &[N], root: Option<u32>) -> Vec<u32> {
    let mut out = Vec::with_capacity(arena.len());
    let mut stack: Vec<u32> = root.into_iter().collect();
    while let Some(i) = stack.pop() {
        out.push(i);
        if let Some(r) = get_r(arena, i) {
            stack.push(r);
        }
        if let Some(l) = get_l(arena, i) {
            stack.push(l);
        }
    }
    out
}

/// Returns mutable references to two distinct slots.
pub(crate) fn pair_mut<T>(slice: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(a, b);
    if a < b {
        let (lo, hi) = slice.split_at_mut(b);
        (&mut lo[a], &mut hi[0])
    } else {
        let (lo, hi) = slice.split_at_mut(a);
        (&mut hi[0], &mut lo[b])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Link {
        p: Option<u32>,
        l: Option<u32>,
        r: Option<u32>,
    }

    impl Node for Link {
        fn p(&self) -> Option<u32> {
            self.p
        }
        fn l(&self) -> Option<u32> {
            self.l
        }
        fn r(&self) -> Option<u32> {
            self.r
        }
        fn set_p(&mut self, v: Option<u32>) {
            self.p = v;
        }
        fn set_l(&mut self, v: Option<u32>) {
            self.l = v;
        }
        fn set_r(&mut self, v: Option<u32>) {
            self.r = v;
        }
    }

    //     0
    //    / \
    //   1   2
    //        \
    //         3
    fn sample() -> Vec<Link> {
        let mut arena: Vec<Link> = (0..4).map(|_| Link::default()).collect();
        arena[0].l = Some(1);
        arena[0].r = Some(2);
        arena[1].p = Some(0);
        arena[2].p = Some(0);
        arena[2].r = Some(3);
        arena[3].p = Some(2);
        arena
    }

    #[test]
    fn walks_in_order() {
        let arena = sample();
        assert_eq!(first(&arena, Some(0)), Some(1));
        assert_eq!(next(&arena, 1), Some(0));
        assert_eq!(next(&arena, 0), Some(2));
        assert_eq!(next(&arena, 3), None);
        assert_eq!(first::<Link>(&arena, None), None);
    }

    #[test]
    fn preorder_visits_node_then_children() {
        let arena = sample();
        assert_eq!(preorder(&arena, Some(0)), vec![0, 1, 2, 3]);
        assert!(preorder(&arena, None).is_empty());
    }

    #[test]
    fn pair_mut_both_orders() {
        let mut v = vec![1, 2, 3];
        let (a, b) = pair_mut(&mut v, 2, 0);
        std::mem::swap(a, b);
        assert_eq!(v, vec![3, 2, 1]);
    }
}
