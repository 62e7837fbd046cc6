use crate::types::Node;

/// Arena node of an AVL tree.
///
/// `l`/`r` own the subtrees and `p` points back at the owner. `prev` and
/// `next` thread all nodes into an ascending chain; they never take part
/// in rotations.
#[derive(Clone, Debug)]
pub struct AvlNode<K, V> {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub prev: Option<u32>,
    pub next: Option<u32>,
    pub k: K,
    pub v: V,
    /// Leaf = 1.
    pub height: i32,
}

impl<K, V> AvlNode<K, V> {
    pub fn new(k: K, v: V) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            prev: None,
            next: None,
            k,
            v,
            height: 1,
        }
    }
}

impl<K, V> Node for AvlNode<K, V> {
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

/// Height bookkeeping used by the rotation helpers.
pub trait AvlNodeLike: Node {
    fn height(&self) -> i32;
    fn set_height(&mut self, height: i32);
}

impl<K, V> AvlNodeLike for AvlNode<K, V> {
    fn height(&self) -> i32 {
        self.height
    }

    fn set_height(&mut self, height: i32) {
        self.height = height;
    }
}
