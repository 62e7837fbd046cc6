use std::fmt::{Debug, Display};

use super::avl_map::AvlMap;
use crate::container::OrderedContainer;
use crate::cursor::CursorSource;
use crate::types::default_comparator;

/// Balanced ordered set backed by [`AvlMap<K, ()>`].
///
/// # Example
///
/// ```
/// use partition_index::AvlTree;
///
/// let mut tree = AvlTree::new();
/// for k in [3, 2, 1] {
///     tree.insert(k);
/// }
/// assert_eq!(tree.in_order_string(), "1,2,3");
/// assert_eq!(tree.root(), Some(&2));
/// assert_eq!(tree.find_greater(&2), Some(&3));
/// ```
pub struct AvlTree<K, C = fn(&K, &K) -> i32>
where
    C: Fn(&K, &K) -> i32,
{
    inner: AvlMap<K, (), C>,
}

impl<K> AvlTree<K, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }
}

impl<K> Default for AvlTree<K, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C> AvlTree<K, C>
where
    C: Fn(&K, &K) -> i32,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            inner: AvlMap::with_comparator(comparator),
        }
    }

    pub(crate) fn map(&self) -> &AvlMap<K, (), C> {
        &self.inner
    }

    pub(crate) fn map_mut(&mut self) -> &mut AvlMap<K, (), C> {
        &mut self.inner
    }

    pub fn comparator(&self) -> &C {
        self.inner.comparator()
    }

    /// Adds `key`. When an equal key is present it is returned and the
    /// tree is left as it was.
    pub fn insert(&mut self, key: K) -> Option<&K> {
        self.inner.insert(key, ()).map(|(k, _)| k)
    }

    pub fn remove(&mut self, key: &K) -> Option<K> {
        self.inner.remove(key).map(|(k, _)| k)
    }

    pub fn find(&self, key: &K) -> Option<&K> {
        self.inner.get_key_value(key).map(|(k, _)| k)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }

    pub fn size(&self) -> usize {
        self.inner.size()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn first(&self) -> Option<&K> {
        self.inner.first().map(|(k, _)| k)
    }

    pub fn last(&self) -> Option<&K> {
        self.inner.last().map(|(k, _)| k)
    }

    pub fn find_greater(&self, key: &K) -> Option<&K> {
        self.inner.find_greater(key).map(|(k, _)| k)
    }

    pub fn find_greater_or_equal(&self, key: &K) -> Option<&K> {
        self.inner.find_greater_or_equal(key).map(|(k, _)| k)
    }

    pub fn find_less(&self, key: &K) -> Option<&K> {
        self.inner.find_less(key).map(|(k, _)| k)
    }

    pub fn find_less_or_equal(&self, key: &K) -> Option<&K> {
        self.inner.find_less_or_equal(key).map(|(k, _)| k)
    }

    pub fn pop_first(&mut self) -> Option<K> {
        self.inner.pop_first().map(|(k, _)| k)
    }

    /// Key stored at the root node.
    pub fn root(&self) -> Option<&K> {
        self.inner.root_key()
    }

    pub fn height(&self) -> i32 {
        self.inner.height()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator + '_ {
        self.inner.iter().map(|(k, _)| k)
    }

    pub fn keys(&self) -> Vec<&K> {
        self.iter().collect()
    }

    pub fn preorder(&self) -> Vec<&K> {
        self.inner.preorder().map(|(k, _)| k).collect()
    }

    pub fn in_order_string(&self) -> String
    where
        K: Display,
    {
        self.inner.in_order_string()
    }

    pub fn print_tree(&self) -> String
    where
        K: Debug,
    {
        self.inner.print_tree()
    }

    pub fn assert_valid(&self) -> Result<(), String> {
        self.inner.assert_valid()
    }
}

impl<K: Debug, C> Debug for AvlTree<K, C>
where
    C: Fn(&K, &K) -> i32,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K, C> Clone for AvlTree<K, C>
where
    K: Clone,
    C: Fn(&K, &K) -> i32 + Clone,
{
    /// Rebuilds the same set; the shape may differ from `self`.
    fn clone(&self) -> Self {
        let mut out = Self::with_comparator(self.comparator().clone());
        for k in self.iter() {
            out.insert(k.clone());
        }
        out
    }
}

impl<K: PartialOrd> FromIterator<K> for AvlTree<K, fn(&K, &K) -> i32> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        for k in iter {
            tree.insert(k);
        }
        tree
    }
}

impl<K, C> CursorSource for AvlTree<K, C>
where
    C: Fn(&K, &K) -> i32,
{
    type Key = K;
    type Slot = u32;

    fn first_slot(&self) -> Option<u32> {
        self.inner.first_slot()
    }

    fn last_slot(&self) -> Option<u32> {
        self.inner.last_slot()
    }

    fn next_slot(&self, slot: u32) -> Option<u32> {
        self.inner.next_slot(slot)
    }

    fn prev_slot(&self, slot: u32) -> Option<u32> {
        self.inner.prev_slot(slot)
    }

    fn lower_bound_slot(&self, key: &K) -> Option<u32> {
        self.inner.lower_bound_slot(key)
    }

    fn upper_bound_slot(&self, key: &K) -> Option<u32> {
        self.inner.upper_bound_slot(key)
    }

    fn key_at(&self, slot: u32) -> &K {
        self.inner.key_at(slot)
    }
}

impl<K, C> OrderedContainer<K> for AvlTree<K, C>
where
    C: Fn(&K, &K) -> i32,
{
    fn insert(&mut self, key: K) -> Option<&K> {
        AvlTree::insert(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<K> {
        AvlTree::remove(self, key)
    }

    fn find(&self, key: &K) -> Option<&K> {
        AvlTree::find(self, key)
    }

    fn first(&self) -> Option<&K> {
        AvlTree::first(self)
    }

    fn last(&self) -> Option<&K> {
        AvlTree::last(self)
    }

    fn find_greater(&self, key: &K) -> Option<&K> {
        AvlTree::find_greater(self, key)
    }

    fn find_greater_or_equal(&self, key: &K) -> Option<&K> {
        AvlTree::find_greater_or_equal(self, key)
    }

    fn find_less(&self, key: &K) -> Option<&K> {
        AvlTree::find_less(self, key)
    }

    fn find_less_or_equal(&self, key: &K) -> Option<&K> {
        AvlTree::find_less_or_equal(self, key)
    }

    fn size(&self) -> usize {
        AvlTree::size(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_comparator_reverses_order() {
        let mut tree = AvlTree::with_comparator(|a: &i32, b: &i32| b.cmp(a) as i32);
        for k in 1..=5 {
            tree.insert(k);
        }
        assert_eq!(tree.in_order_string(), "5,4,3,2,1");
        assert_eq!(tree.first(), Some(&5));
        assert_eq!(tree.find_greater(&3), Some(&2));
        tree.assert_valid().unwrap();
    }

    #[test]
    fn pop_first_drains_in_order() {
        let mut tree: AvlTree<i32> = [4, 2, 6, 1].into_iter().collect();
        assert_eq!(tree.pop_first(), Some(1));
        assert_eq!(tree.pop_first(), Some(2));
        assert_eq!(tree.size(), 2);
        tree.assert_valid().unwrap();
    }

    #[test]
    fn clone_keeps_keys() {
        let tree: AvlTree<i32> = (0..20).collect();
        let copy = tree.clone();
        assert_eq!(copy.keys(), tree.keys());
        copy.assert_valid().unwrap();
    }
}
