use std::fmt::{Debug, Display};

use crate::config::ArrayTreeConfig;
use crate::container::OrderedContainer;
use crate::cursor::CursorSource;
use crate::error::{IndexError, Result};
use crate::types::{default_comparator, to_ordering};

/// Sorted, duplicate-free sequence of keys with rank access.
///
/// Keys sit in one flat `Vec`, so `get(position)` is O(1) and searches
/// are binary. Insert and remove shift the tail.
///
/// # Example
///
/// ```
/// use partition_index::ArrayTree;
///
/// let tree: ArrayTree<i32> = [2, 4, 6, 8].into_iter().collect();
/// assert_eq!(tree.get_after_position(&5), Some(2));
/// assert_eq!(tree.get_before_position(&5), Some(1));
/// assert_eq!(tree.get(3), Ok(&8));
/// assert!(tree.get(4).is_err());
/// ```
pub struct ArrayTree<K, C = fn(&K, &K) -> i32>
where
    C: Fn(&K, &K) -> i32,
{
    array: Vec<K>,
    comparator: C,
}

impl<K> ArrayTree<K, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }
}

impl<K> Default for ArrayTree<K, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C> ArrayTree<K, C>
where
    C: Fn(&K, &K) -> i32,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_config(comparator, ArrayTreeConfig::default())
    }

    pub fn with_config(comparator: C, config: ArrayTreeConfig) -> Self {
        Self {
            array: Vec::with_capacity(config.initial_capacity),
            comparator,
        }
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// `Ok(position)` of an equal key or `Err(insertion point)`.
    #[inline]
    fn search(&self, key: &K) -> std::result::Result<usize, usize> {
        self.array
            .binary_search_by(|probe| to_ordering((self.comparator)(probe, key)))
    }

    /// First position whose key is `>= key`; `size()` when none.
    pub fn lower_bound(&self, key: &K) -> usize {
        self.array
            .partition_point(|probe| (self.comparator)(probe, key) < 0)
    }

    /// First position whose key is `> key`; `size()` when none.
    pub fn upper_bound(&self, key: &K) -> usize {
        self.array
            .partition_point(|probe| (self.comparator)(probe, key) <= 0)
    }

    /// Adds `key`. When an equal key is present it is returned and nothing
    /// changes.
    pub fn insert(&mut self, key: K) -> Option<&K> {
        match self.search(&key) {
            Ok(pos) => Some(&self.array[pos]),
            Err(pos) => {
                self.array.insert(pos, key);
                None
            }
        }
    }

    /// Stores `key`, overwriting an equal key. Returns the key it replaced.
    pub fn replace(&mut self, key: K) -> Option<K> {
        match self.search(&key) {
            Ok(pos) => Some(std::mem::replace(&mut self.array[pos], key)),
            Err(pos) => {
                self.array.insert(pos, key);
                None
            }
        }
    }

    pub fn remove(&mut self, key: &K) -> Option<K> {
        let pos = self.search(key).ok()?;
        Some(self.array.remove(pos))
    }

    pub fn find(&self, key: &K) -> Option<&K> {
        self.search(key).ok().map(|pos| &self.array[pos])
    }

    pub fn position_of(&self, key: &K) -> Option<usize> {
        self.search(key).ok()
    }

    /// Key at `position`.
    ///
    /// # Errors
    ///
    /// [`IndexError::OutOfRange`] when `position >= size()`.
    pub fn get(&self, position: usize) -> Result<&K> {
        self.array.get(position).ok_or(IndexError::OutOfRange {
            position,
            size: self.array.len(),
        })
    }

    /// Position of the first key strictly greater than `key`.
    pub fn get_after_position(&self, key: &K) -> Option<usize> {
        let pos = self.upper_bound(key);
        (pos < self.array.len()).then_some(pos)
    }

    /// Position of the last key strictly less than `key`.
    pub fn get_before_position(&self, key: &K) -> Option<usize> {
        self.lower_bound(key).checked_sub(1)
    }

    pub fn first(&self) -> Option<&K> {
        self.array.first()
    }

    pub fn last(&self) -> Option<&K> {
        self.array.last()
    }

    pub fn find_greater(&self, key: &K) -> Option<&K> {
        self.array.get(self.upper_bound(key))
    }

    pub fn find_greater_or_equal(&self, key: &K) -> Option<&K> {
        self.array.get(self.lower_bound(key))
    }

    pub fn find_less(&self, key: &K) -> Option<&K> {
        self.get_before_position(key).map(|pos| &self.array[pos])
    }

    pub fn find_less_or_equal(&self, key: &K) -> Option<&K> {
        self.upper_bound(key)
            .checked_sub(1)
            .map(|pos| &self.array[pos])
    }

    pub fn size(&self) -> usize {
        self.array.len()
    }

    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }

    pub fn clear(&mut self) {
        self.array.clear();
    }

    pub fn keys(&self) -> &[K] {
        &self.array
    }

    pub fn iter(&self) -> std::slice::Iter<'_, K> {
        self.array.iter()
    }

    pub fn in_order_string(&self) -> String
    where
        K: Display,
    {
        self.array
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Appends a key known to sort after every stored key.
    pub(crate) fn push_sorted(&mut self, key: K) {
        self.array.push(key);
    }
}

impl<K: Debug, C> Debug for ArrayTree<K, C>
where
    C: Fn(&K, &K) -> i32,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.array.iter()).finish()
    }
}

impl<K: PartialOrd> FromIterator<K> for ArrayTree<K, fn(&K, &K) -> i32> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        for k in iter {
            tree.insert(k);
        }
        tree
    }
}

impl<K, C> CursorSource for ArrayTree<K, C>
where
    C: Fn(&K, &K) -> i32,
{
    type Key = K;
    type Slot = usize;

    fn first_slot(&self) -> Option<usize> {
        (!self.array.is_empty()).then_some(0)
    }

    fn last_slot(&self) -> Option<usize> {
        self.array.len().checked_sub(1)
    }

    fn next_slot(&self, slot: usize) -> Option<usize> {
        (slot + 1 < self.array.len()).then_some(slot + 1)
    }

    fn prev_slot(&self, slot: usize) -> Option<usize> {
        slot.checked_sub(1)
    }

    fn lower_bound_slot(&self, key: &K) -> Option<usize> {
        let pos = self.lower_bound(key);
        (pos < self.array.len()).then_some(pos)
    }

    fn upper_bound_slot(&self, key: &K) -> Option<usize> {
        self.get_after_position(key)
    }

    fn key_at(&self, slot: usize) -> &K {
        &self.array[slot]
    }
}

impl<K, C> OrderedContainer<K> for ArrayTree<K, C>
where
    C: Fn(&K, &K) -> i32,
{
    fn insert(&mut self, key: K) -> Option<&K> {
        ArrayTree::insert(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<K> {
        ArrayTree::remove(self, key)
    }

    fn find(&self, key: &K) -> Option<&K> {
        ArrayTree::find(self, key)
    }

    fn first(&self) -> Option<&K> {
        ArrayTree::first(self)
    }

    fn last(&self) -> Option<&K> {
        ArrayTree::last(self)
    }

    fn find_greater(&self, key: &K) -> Option<&K> {
        ArrayTree::find_greater(self, key)
    }

    fn find_greater_or_equal(&self, key: &K) -> Option<&K> {
        ArrayTree::find_greater_or_equal(self, key)
    }

    fn find_less(&self, key: &K) -> Option<&K> {
        ArrayTree::find_less(self, key)
    }

    fn find_less_or_equal(&self, key: &K) -> Option<&K> {
        ArrayTree::find_less_or_equal(self, key)
    }

    fn size(&self) -> usize {
        ArrayTree::size(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ArrayTree<i32> {
        [8, 2, 6, 4].into_iter().collect()
    }

    #[test]
    fn keeps_sorted_unique() {
        let mut tree = sample();
        assert_eq!(tree.keys(), &[2, 4, 6, 8]);
        assert_eq!(tree.insert(4), Some(&4));
        assert_eq!(tree.size(), 4);
        assert_eq!(tree.insert(5), None);
        assert_eq!(tree.keys(), &[2, 4, 5, 6, 8]);
    }

    #[test]
    fn replace_overwrites_equal_key() {
        #[derive(Debug, PartialEq)]
        struct Entry(i32, &'static str);
        let mut tree = ArrayTree::with_comparator(|a: &Entry, b: &Entry| a.0 - b.0);
        assert!(tree.replace(Entry(1, "old")).is_none());
        assert_eq!(tree.replace(Entry(1, "new")), Some(Entry(1, "old")));
        assert_eq!(tree.get(0), Ok(&Entry(1, "new")));
    }

    #[test]
    fn positions() {
        let tree = sample();
        assert_eq!(tree.get_after_position(&5), Some(2));
        assert_eq!(tree.get_before_position(&5), Some(1));
        assert_eq!(tree.get_after_position(&4), Some(2));
        assert_eq!(tree.get_before_position(&4), Some(0));
        assert_eq!(tree.get_after_position(&8), None);
        assert_eq!(tree.get_before_position(&2), None);
        assert_eq!(tree.position_of(&6), Some(2));
        assert_eq!(tree.position_of(&7), None);
    }

    #[test]
    fn get_out_of_range() {
        let tree = sample();
        assert_eq!(
            tree.get(4),
            Err(IndexError::OutOfRange {
                position: 4,
                size: 4
            })
        );
        let empty = ArrayTree::<i32>::new();
        assert!(empty.get(0).is_err());
    }

    #[test]
    fn neighbors() {
        let tree = sample();
        assert_eq!(tree.find_greater(&4), Some(&6));
        assert_eq!(tree.find_greater_or_equal(&4), Some(&4));
        assert_eq!(tree.find_less(&4), Some(&2));
        assert_eq!(tree.find_less_or_equal(&5), Some(&4));
        assert_eq!(tree.find_less(&2), None);
        assert_eq!(tree.find_greater(&8), None);
    }

    #[test]
    fn with_config_reserves() {
        let tree = ArrayTree::with_config(
            default_comparator::<u8>,
            ArrayTreeConfig {
                initial_capacity: 64,
            },
        );
        assert!(tree.keys().is_empty());
        assert!(tree.array.capacity() >= 64);
    }
}
