use std::fmt::{Debug, Display};
use std::iter::FusedIterator;

use super::types::AvlNode;
use super::util::{
    assert_avl_tree, balance_factor, insert_rebalance, remove_rebalance, update_height,
};
use crate::cursor::CursorSource;
use crate::error::DecodeError;
use crate::types::default_comparator;
use crate::util::{first, next, pair_mut, preorder};

/// Outcome of a single descent from the root.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Locate {
    Found(u32),
    /// Where the key would be attached, plus its in-order neighbors.
    Vacant {
        parent: Option<u32>,
        left: bool,
        pred: Option<u32>,
        succ: Option<u32>,
    },
}

/// AVL tree map over an arena, threaded with an ascending `prev`/`next`
/// chain.
///
/// Inserting an existing key is a no-op that hands back the stored entry.
/// After a lookup, neighbors are one chain hop away. Node slots stay
/// dense: removing a node moves the last arena slot into its place.
pub struct AvlMap<K, V, C = fn(&K, &K) -> i32>
where
    C: Fn(&K, &K) -> i32,
{
    arena: Vec<AvlNode<K, V>>,
    root: Option<u32>,
    /// Head of the chain.
    min: Option<u32>,
    /// Tail of the chain.
    max: Option<u32>,
    comparator: C,
}

impl<K, V> AvlMap<K, V, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }
}

impl<K, V> Default for AvlMap<K, V, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> AvlMap<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            arena: Vec::new(),
            root: None,
            min: None,
            max: None,
            comparator,
        }
    }

    #[inline]
    fn compare(&self, a: &K, b: &K) -> i32 {
        (self.comparator)(a, b)
    }

    #[inline]
    fn node(&self, i: u32) -> &AvlNode<K, V> {
        &self.arena[i as usize]
    }

    #[inline]
    fn node_mut(&mut self, i: u32) -> &mut AvlNode<K, V> {
        &mut self.arena[i as usize]
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    pub fn size(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.min = None;
        self.max = None;
    }

    /// Height of the tree; 0 when empty.
    pub fn height(&self) -> i32 {
        self.root.map_or(0, |r| self.node(r).height)
    }

    fn locate(&self, key: &K) -> Locate {
        let mut parent = None;
        let mut left = false;
        let mut pred = None;
        let mut succ = None;
        let mut curr = self.root;
        while let Some(i) = curr {
            let cmp = self.compare(key, &self.node(i).k);
            if cmp == 0 {
                return Locate::Found(i);
            }
            parent = Some(i);
            if cmp < 0 {
                succ = Some(i);
                left = true;
                curr = self.node(i).l;
            } else {
                pred = Some(i);
                left = false;
                curr = self.node(i).r;
            }
        }
        Locate::Vacant {
            parent,
            left,
            pred,
            succ,
        }
    }

    /// Pushes a new leaf and splices it into the tree and the chain.
    fn attach(
        &mut self,
        key: K,
        value: V,
        parent: Option<u32>,
        left: bool,
        pred: Option<u32>,
        succ: Option<u32>,
    ) -> u32 {
        let idx = self.arena.len() as u32;
        let mut node = AvlNode::new(key, value);
        node.p = parent;
        node.prev = pred;
        node.next = succ;
        self.arena.push(node);

        match parent {
            Some(p) if left => self.node_mut(p).l = Some(idx),
            Some(p) => self.node_mut(p).r = Some(idx),
            None => self.root = Some(idx),
        }
        match pred {
            Some(pr) => self.node_mut(pr).next = Some(idx),
            None => self.min = Some(idx),
        }
        match succ {
            Some(s) => self.node_mut(s).prev = Some(idx),
            None => self.max = Some(idx),
        }
        tracing::trace!(node = idx, ?pred, ?succ, "spliced into chain");
        idx
    }

    /// Inserts `key` unless an equal key is already stored.
    ///
    /// Returns the stored entry when the key exists; the arguments are
    /// dropped and the tree is left unchanged.
    pub fn insert(&mut self, key: K, value: V) -> Option<(&K, &V)> {
        match self.locate(&key) {
            Locate::Found(i) => {
                let n = self.node(i);
                Some((&n.k, &n.v))
            }
            Locate::Vacant {
                parent,
                left,
                pred,
                succ,
            } => {
                let idx = self.attach(key, value, parent, left, pred, succ);
                let root = self.root.unwrap_or(idx);
                self.root = Some(insert_rebalance(&mut self.arena, root, parent));
                None
            }
        }
    }

    /// Removes `key`, returning the stored entry.
    pub fn remove(&mut self, key: &K) -> Option<(K, V)> {
        match self.locate(key) {
            Locate::Found(i) => Some(self.remove_slot(i)),
            Locate::Vacant { .. } => None,
        }
    }

    pub(crate) fn remove_slot(&mut self, i: u32) -> (K, V) {
        let mut target = i;
        let node = self.node(i);
        if let (Some(_), Some(_), Some(succ)) = (node.l, node.r, node.next) {
            // The in-order successor has no left child; its entry moves up
            // into `i` and its own slot is unlinked instead.
            let (a, b) = pair_mut(&mut self.arena, i as usize, succ as usize);
            std::mem::swap(&mut a.k, &mut b.k);
            std::mem::swap(&mut a.v, &mut b.v);
            target = succ;
        }

        let AvlNode {
            p, l, r, prev, next, ..
        } = *self.node(target);
        let child = l.or(r);
        if let Some(c) = child {
            self.node_mut(c).p = p;
        }
        match p {
            Some(p) if self.node(p).l == Some(target) => self.node_mut(p).l = child,
            Some(p) => self.node_mut(p).r = child,
            None => self.root = child,
        }
        match prev {
            Some(pr) => self.node_mut(pr).next = next,
            None => self.min = next,
        }
        match next {
            Some(nx) => self.node_mut(nx).prev = prev,
            None => self.max = prev,
        }

        if let Some(root) = self.root {
            self.root = Some(remove_rebalance(&mut self.arena, root, p));
        }

        let node = self.release(target);
        (node.k, node.v)
    }

    /// Takes an unlinked node out of the arena, moving the last slot into
    /// its place and re-pointing every link to the moved node.
    fn release(&mut self, i: u32) -> AvlNode<K, V> {
        let last = (self.arena.len() - 1) as u32;
        if i != last {
            let AvlNode {
                p, l, r, prev, next, ..
            } = *self.node(last);
            match p {
                Some(p) if self.node(p).l == Some(last) => self.node_mut(p).l = Some(i),
                Some(p) => self.node_mut(p).r = Some(i),
                None => self.root = Some(i),
            }
            if let Some(l) = l {
                self.node_mut(l).p = Some(i);
            }
            if let Some(r) = r {
                self.node_mut(r).p = Some(i);
            }
            match prev {
                Some(pr) => self.node_mut(pr).next = Some(i),
                None => self.min = Some(i),
            }
            match next {
                Some(nx) => self.node_mut(nx).prev = Some(i),
                None => self.max = Some(i),
            }
        }
        self.arena.swap_remove(i as usize)
    }

    pub fn find_slot(&self, key: &K) -> Option<u32> {
        match self.locate(key) {
            Locate::Found(i) => Some(i),
            Locate::Vacant { .. } => None,
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.find_slot(key).map(|i| &self.node(i).v)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let i = self.find_slot(key)?;
        Some(&mut self.node_mut(i).v)
    }

    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.find_slot(key).map(|i| self.entry(i))
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find_slot(key).is_some()
    }

    #[inline]
    pub fn entry(&self, slot: u32) -> (&K, &V) {
        let n = self.node(slot);
        (&n.k, &n.v)
    }

    #[inline]
    pub fn key_at(&self, slot: u32) -> &K {
        &self.node(slot).k
    }

    #[inline]
    pub fn value_at(&self, slot: u32) -> &V {
        &self.node(slot).v
    }

    #[inline]
    pub fn value_at_mut(&mut self, slot: u32) -> &mut V {
        &mut self.node_mut(slot).v
    }

    pub fn first_slot(&self) -> Option<u32> {
        self.min
    }

    pub fn last_slot(&self) -> Option<u32> {
        self.max
    }

    /// Chain successor of `slot`.
    pub fn next_slot(&self, slot: u32) -> Option<u32> {
        self.node(slot).next
    }

    /// Chain predecessor of `slot`.
    pub fn prev_slot(&self, slot: u32) -> Option<u32> {
        self.node(slot).prev
    }

    /// First slot whose key is `>= key`.
    pub fn lower_bound_slot(&self, key: &K) -> Option<u32> {
        match self.locate(key) {
            Locate::Found(i) => Some(i),
            Locate::Vacant { succ, .. } => succ,
        }
    }

    /// First slot whose key is `> key`.
    pub fn upper_bound_slot(&self, key: &K) -> Option<u32> {
        match self.locate(key) {
            Locate::Found(i) => self.node(i).next,
            Locate::Vacant { succ, .. } => succ,
        }
    }

    /// Last slot whose key is `< key`.
    pub fn lower_slot(&self, key: &K) -> Option<u32> {
        match self.locate(key) {
            Locate::Found(i) => self.node(i).prev,
            Locate::Vacant { pred, .. } => pred,
        }
    }

    /// Last slot whose key is `<= key`.
    pub fn floor_slot(&self, key: &K) -> Option<u32> {
        match self.locate(key) {
            Locate::Found(i) => Some(i),
            Locate::Vacant { pred, .. } => pred,
        }
    }

    pub fn first(&self) -> Option<(&K, &V)> {
        self.min.map(|i| self.entry(i))
    }

    pub fn last(&self) -> Option<(&K, &V)> {
        self.max.map(|i| self.entry(i))
    }

    pub fn find_greater(&self, key: &K) -> Option<(&K, &V)> {
        self.upper_bound_slot(key).map(|i| self.entry(i))
    }

    pub fn find_greater_or_equal(&self, key: &K) -> Option<(&K, &V)> {
        self.lower_bound_slot(key).map(|i| self.entry(i))
    }

    pub fn find_less(&self, key: &K) -> Option<(&K, &V)> {
        self.lower_slot(key).map(|i| self.entry(i))
    }

    pub fn find_less_or_equal(&self, key: &K) -> Option<(&K, &V)> {
        self.floor_slot(key).map(|i| self.entry(i))
    }

    /// Removes and returns the smallest entry.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let i = self.min?;
        Some(self.remove_slot(i))
    }

    pub fn root_key(&self) -> Option<&K> {
        self.root.map(|i| &self.node(i).k)
    }

    pub fn iter(&self) -> Iter<'_, K, V, C> {
        Iter {
            map: self,
            front: self.min,
            back: self.max,
            remaining: self.size(),
        }
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    /// Keys in preorder: node, left subtree, right subtree.
    pub fn preorder(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        preorder(&self.arena, self.root)
            .into_iter()
            .map(move |i| self.entry(i))
    }

    /// Comma separated keys in ascending order, e.g. `"1,2,3"`.
    pub fn in_order_string(&self) -> String
    where
        K: Display,
    {
        self.keys()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Tree diagram with heights, for debugging.
    pub fn print_tree(&self) -> String
    where
        K: Debug,
    {
        fn node<K: Debug, V>(
            arena: &[AvlNode<K, V>],
            i: Option<u32>,
            tab: &str,
            out: &mut String,
        ) {
            let Some(i) = i else {
                out.push('∅');
                return;
            };
            let n = &arena[i as usize];
            out.push_str(&format!("{:?} [h={}]", n.k, n.height));
            if n.l.is_none() && n.r.is_none() {
                return;
            }
            for (child, is_last) in [(n.l, false), (n.r, true)] {
                out.push('\n');
                out.push_str(tab);
                out.push_str(if is_last { "└─ " } else { "├─ " });
                let child_tab = format!("{tab}{}  ", if is_last { " " } else { "│" });
                node(arena, child, &child_tab, out);
            }
        }
        let mut out = String::from("AvlTree");
        if self.root.is_none() {
            out.push_str(" ∅");
            return out;
        }
        out.push_str("\n└─ ");
        node(&self.arena, self.root, "   ", &mut out);
        out
    }

    /// Verifies links, heights, balance, strict order and that the chain
    /// matches an in-order walk of the tree links.
    pub fn assert_valid(&self) -> Result<(), String> {
        assert_avl_tree(&self.arena, self.root)?;

        let mut by_links = first(&self.arena, self.root);
        let mut by_chain = self.min;
        let mut prev: Option<u32> = None;
        let mut count = 0usize;
        while let Some(i) = by_links {
            if by_chain != Some(i) {
                return Err(format!("Chain diverges from tree at node {i}"));
            }
            if self.node(i).prev != prev {
                return Err(format!("Broken prev link at node {i}"));
            }
            if let Some(pr) = prev {
                if self.compare(&self.node(pr).k, &self.node(i).k) >= 0 {
                    return Err("Node order violated".to_string());
                }
            }
            count += 1;
            prev = Some(i);
            by_links = next(&self.arena, i);
            by_chain = self.node(i).next;
        }
        if by_chain.is_some() {
            return Err("Chain longer than tree".to_string());
        }
        if self.max != prev {
            return Err("Chain tail mismatch".to_string());
        }
        if count != self.arena.len() {
            return Err(format!(
                "Unreachable nodes: {} in arena, {count} in tree",
                self.arena.len()
            ));
        }
        Ok(())
    }

    /// Attaches `key` where a plain binary search puts it, without
    /// rebalancing. Used to rebuild a recorded shape from its preorder.
    pub(crate) fn attach_unbalanced(&mut self, key: K, value: V) -> Result<(), DecodeError> {
        match self.locate(&key) {
            Locate::Found(_) => Err(DecodeError::DuplicateKey),
            Locate::Vacant {
                parent,
                left,
                pred,
                succ,
            } => {
                self.attach(key, value, parent, left, pred, succ);
                Ok(())
            }
        }
    }

    /// Finishes a run of [`attach_unbalanced`](Self::attach_unbalanced):
    /// computes heights and rejects shapes that are not AVL balanced.
    pub(crate) fn seal(&mut self) -> Result<(), DecodeError> {
        // Preorder attachment puts children after their parents.
        for i in (0..self.arena.len() as u32).rev() {
            update_height(&mut self.arena, i);
            if balance_factor(&self.arena, i).abs() > 1 {
                return Err(DecodeError::Unbalanced);
            }
        }
        Ok(())
    }
}

/// Ascending iterator walking the chain from both ends.
pub struct Iter<'a, K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    map: &'a AvlMap<K, V, C>,
    front: Option<u32>,
    back: Option<u32>,
    remaining: usize,
}

impl<'a, K, V, C> Iterator for Iter<'a, K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let i = self.front?;
        self.remaining -= 1;
        self.front = self.map.next_slot(i);
        Some(self.map.entry(i))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, C> DoubleEndedIterator for Iter<'_, K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let i = self.back?;
        self.remaining -= 1;
        self.back = self.map.prev_slot(i);
        Some(self.map.entry(i))
    }
}

impl<K, V, C> ExactSizeIterator for Iter<'_, K, V, C> where C: Fn(&K, &K) -> i32 {}

impl<K, V, C> FusedIterator for Iter<'_, K, V, C> where C: Fn(&K, &K) -> i32 {}

impl<K: Debug, V, C> Debug for AvlMap<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.keys()).finish()
    }
}

impl<K, V, C> CursorSource for AvlMap<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    type Key = K;
    type Slot = u32;

    fn first_slot(&self) -> Option<u32> {
        self.min
    }

    fn last_slot(&self) -> Option<u32> {
        self.max
    }

    fn next_slot(&self, slot: u32) -> Option<u32> {
        AvlMap::next_slot(self, slot)
    }

    fn prev_slot(&self, slot: u32) -> Option<u32> {
        AvlMap::prev_slot(self, slot)
    }

    fn lower_bound_slot(&self, key: &K) -> Option<u32> {
        AvlMap::lower_bound_slot(self, key)
    }

    fn upper_bound_slot(&self, key: &K) -> Option<u32> {
        AvlMap::upper_bound_slot(self, key)
    }

    fn key_at(&self, slot: u32) -> &K {
        AvlMap::key_at(self, slot)
    }
}
