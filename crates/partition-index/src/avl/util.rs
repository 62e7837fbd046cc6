//! Rotations and rebalancing over an arena of [`AvlNodeLike`] nodes.
//!
//! All functions take the arena plus node indices and return the index of
//! whatever node ends up at the top of the touched subtree (or the new
//! root). Parent links are kept in sync so callers can keep walking up.

use super::types::AvlNodeLike;

#[inline]
fn height<N: AvlNodeLike>(arena: &[N], i: Option<u32>) -> i32 {
    i.map_or(0, |i| arena[i as usize].height())
}

#[inline]
pub fn update_height<N: AvlNodeLike>(arena: &mut [N], n: u32) {
    let node = &arena[n as usize];
    let h = 1 + height(arena, node.l()).max(height(arena, node.r()));
    arena[n as usize].set_height(h);
}

/// `height(left) - height(right)`.
#[inline]
pub fn balance_factor<N: AvlNodeLike>(arena: &[N], n: u32) -> i32 {
    let node = &arena[n as usize];
    height(arena, node.l()) - height(arena, node.r())
}

#[inline]
fn replace_child<N: AvlNodeLike>(arena: &mut [N], p: Option<u32>, old: u32, new: u32) {
    if let Some(p) = p {
        if arena[p as usize].l() == Some(old) {
            arena[p as usize].set_l(Some(new));
        } else {
            arena[p as usize].set_r(Some(new));
        }
    }
}

/// Lifts the left child of `n` above it. Returns the new subtree top.
pub fn rotate_right<N: AvlNodeLike>(arena: &mut [N], n: u32) -> u32 {
    let Some(l) = arena[n as usize].l() else {
        return n;
    };
    tracing::trace!(node = n, pivot = l, "rotate right");
    let p = arena[n as usize].p();
    let lr = arena[l as usize].r();

    arena[n as usize].set_l(lr);
    if let Some(lr) = lr {
        arena[lr as usize].set_p(Some(n));
    }
    arena[l as usize].set_r(Some(n));
    arena[n as usize].set_p(Some(l));
    arena[l as usize].set_p(p);
    replace_child(arena, p, n, l);

    update_height(arena, n);
    update_height(arena, l);
    l
}

/// Lifts the right child of `n` above it. Returns the new subtree top.
pub fn rotate_left<N: AvlNodeLike>(arena: &mut [N], n: u32) -> u32 {
    let Some(r) = arena[n as usize].r() else {
        return n;
    };
    tracing::trace!(node = n, pivot = r, "rotate left");
    let p = arena[n as usize].p();
    let rl = arena[r as usize].l();

    arena[n as usize].set_r(rl);
    if let Some(rl) = rl {
        arena[rl as usize].set_p(Some(n));
    }
    arena[r as usize].set_l(Some(n));
    arena[n as usize].set_p(Some(r));
    arena[r as usize].set_p(p);
    replace_child(arena, p, n, r);

    update_height(arena, n);
    update_height(arena, r);
    r
}

/// Restores balance at `n` if its balance factor reached ±2.
///
/// Left-left and right-right get a single rotation; left-right and
/// right-left rotate the child first. Returns the subtree top.
pub fn rebalance<N: AvlNodeLike>(arena: &mut [N], n: u32) -> u32 {
    let bf = balance_factor(arena, n);
    if bf > 1 {
        if let Some(l) = arena[n as usize].l() {
            if balance_factor(arena, l) < 0 {
                rotate_left(arena, l);
            }
        }
        rotate_right(arena, n)
    } else if bf < -1 {
        if let Some(r) = arena[n as usize].r() {
            if balance_factor(arena, r) > 0 {
                rotate_right(arena, r);
            }
        }
        rotate_left(arena, n)
    } else {
        n
    }
}

/// Walks up from the parent of a freshly attached leaf.
///
/// Stops at the first rotation (the subtree regains its old height) or as
/// soon as a height does not change. Returns the root.
pub fn insert_rebalance<N: AvlNodeLike>(arena: &mut [N], root: u32, start: Option<u32>) -> u32 {
    let mut curr = start;
    while let Some(n) = curr {
        let before = arena[n as usize].height();
        update_height(arena, n);
        let bf = balance_factor(arena, n);
        if !(-1..=1).contains(&bf) {
            let top = rebalance(arena, n);
            return if arena[top as usize].p().is_none() {
                top
            } else {
                root
            };
        }
        if arena[n as usize].height() == before {
            return root;
        }
        curr = arena[n as usize].p();
    }
    root
}

/// Walks from `start` all the way to the root, rotating wherever needed.
///
/// A removal can unbalance several ancestors, so this never stops early.
/// Returns the root.
pub fn remove_rebalance<N: AvlNodeLike>(arena: &mut [N], root: u32, start: Option<u32>) -> u32 {
    let mut root = root;
    let mut curr = start;
    while let Some(n) = curr {
        update_height(arena, n);
        let top = rebalance(arena, n);
        let p = arena[top as usize].p();
        if p.is_none() {
            root = top;
        }
        curr = p;
    }
    root
}

/// Checks parent links, stored heights and the AVL balance condition.
pub fn assert_avl_tree<N: AvlNodeLike>(arena: &[N], root: Option<u32>) -> Result<(), String> {
    let Some(root) = root else {
        return Ok(());
    };
    if arena[root as usize].p().is_some() {
        return Err("Root has parent".to_string());
    }

    fn validate<N: AvlNodeLike>(arena: &[N], node: u32) -> Result<i32, String> {
        let l = arena[node as usize].l();
        let r = arena[node as usize].r();
        let mut lh = 0;
        let mut rh = 0;
        if let Some(l) = l {
            if arena[l as usize].p() != Some(node) {
                return Err(format!("Broken parent link on left child of {node}"));
            }
            lh = validate(arena, l)?;
        }
        if let Some(r) = r {
            if arena[r as usize].p() != Some(node) {
                return Err(format!("Broken parent link on right child of {node}"));
            }
            rh = validate(arena, r)?;
        }
        let expected = 1 + lh.max(rh);
        let actual = arena[node as usize].height();
        if actual != expected {
            return Err(format!(
                "Height mismatch at {node}: expected {expected}, got {actual}"
            ));
        }
        if (lh - rh).abs() > 1 {
            return Err(format!("AVL balance violated at {node}"));
        }
        Ok(expected)
    }

    validate(arena, root).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::super::types::AvlNode;
    use super::*;
    use crate::types::Node;

    fn chain(keys: &[i32]) -> Vec<AvlNode<i32, ()>> {
        // Left-leaning path: keys[0] at the top, each next one its left child.
        let mut arena: Vec<AvlNode<i32, ()>> = keys.iter().map(|k| AvlNode::new(*k, ())).collect();
        for i in 1..arena.len() {
            arena[i - 1].set_l(Some(i as u32));
            arena[i].set_p(Some((i - 1) as u32));
        }
        for i in (0..arena.len()).rev() {
            update_height(&mut arena, i as u32);
        }
        arena
    }

    #[test]
    fn single_right_rotation() {
        let mut arena = chain(&[3, 2, 1]);
        assert_eq!(balance_factor(&arena, 0), 2);
        let top = rebalance(&mut arena, 0);
        assert_eq!(arena[top as usize].k, 2);
        assert_eq!(arena[top as usize].height, 2);
        assert_eq!(arena[top as usize].p, None);
        assert_avl_tree(&arena, Some(top)).unwrap();
    }

    #[test]
    fn double_rotation_left_right() {
        // 3 with left child 1 whose right child is 2.
        let mut arena: Vec<AvlNode<i32, ()>> =
            [3, 1, 2].iter().map(|k| AvlNode::new(*k, ())).collect();
        arena[0].l = Some(1);
        arena[1].p = Some(0);
        arena[1].r = Some(2);
        arena[2].p = Some(1);
        for i in [2, 1, 0] {
            update_height(&mut arena, i);
        }
        let top = rebalance(&mut arena, 0);
        assert_eq!(arena[top as usize].k, 2);
        assert_eq!(arena[top as usize].l, Some(1));
        assert_eq!(arena[top as usize].r, Some(0));
        assert_avl_tree(&arena, Some(top)).unwrap();
    }

    #[test]
    fn detects_bad_height() {
        let mut arena = chain(&[2, 1]);
        arena[0].height = 5;
        assert!(assert_avl_tree(&arena, Some(0)).is_err());
    }
}
