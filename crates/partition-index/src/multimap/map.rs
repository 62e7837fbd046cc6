use std::fmt::Debug;

use super::cursor::{KeyTupleCursor, MultiMapCursor};
use super::value::SingletonOrOrderedSet;
use crate::avl::{AvlMap, AvlTree, Iter};
use crate::config::MultiMapConfig;
use crate::cursor::CursorSource;
use crate::types::default_comparator;

/// Ordered map where a key holds one value or an ordered set of values.
///
/// Keys are ordered by `C`, the values under one key by `VC`.
///
/// # Example
///
/// ```
/// use partition_index::MultiValueMap;
///
/// let mut map = MultiValueMap::<i32, i32>::new();
/// map.insert(3, 3);
/// map.insert(3, 7);
/// map.insert(3, 10);
/// assert_eq!(map.size(), 1);
/// let values = map.find(&3).unwrap();
/// assert!(values.is_ordered_set());
/// assert_eq!(values.values().copied().collect::<Vec<_>>(), vec![3, 7, 10]);
/// ```
pub struct MultiValueMap<K, V, C = fn(&K, &K) -> i32, VC = fn(&V, &V) -> i32>
where
    C: Fn(&K, &K) -> i32,
    VC: Fn(&V, &V) -> i32 + Clone,
{
    map: AvlMap<K, SingletonOrOrderedSet<V, VC>, C>,
    value_comparator: VC,
    allow_duplicates: bool,
}

impl<K, V> MultiValueMap<K, V>
where
    K: PartialOrd,
    V: PartialOrd,
{
    pub fn new() -> Self {
        Self::with_comparators(default_comparator::<K>, default_comparator::<V>)
    }
}

impl<K, V> Default for MultiValueMap<K, V>
where
    K: PartialOrd,
    V: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C, VC> MultiValueMap<K, V, C, VC>
where
    C: Fn(&K, &K) -> i32,
    VC: Fn(&V, &V) -> i32 + Clone,
{
    pub fn with_comparators(key_comparator: C, value_comparator: VC) -> Self {
        Self::with_config(key_comparator, value_comparator, MultiMapConfig::default())
    }

    pub fn with_config(key_comparator: C, value_comparator: VC, config: MultiMapConfig) -> Self {
        Self {
            map: AvlMap::with_comparator(key_comparator),
            value_comparator,
            allow_duplicates: config.allow_duplicates,
        }
    }

    pub fn allows_duplicates(&self) -> bool {
        self.allow_duplicates
    }

    pub fn key_comparator(&self) -> &C {
        self.map.comparator()
    }

    pub fn value_comparator(&self) -> &VC {
        &self.value_comparator
    }

    /// Adds `value` under `key`.
    ///
    /// Returns `Some` when `value` was not added as a new value:
    /// - the pair is already present: the argument is handed back and the
    ///   map is unchanged;
    /// - duplicates are disabled and `key` exists: the stored value is
    ///   replaced and the previous one returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let Some(slot) = self.map.find_slot(&key) else {
            self.map.insert(key, SingletonOrOrderedSet::Singleton(value));
            return None;
        };

        let cmp = &self.value_comparator;
        match self.map.value_at_mut(slot) {
            SingletonOrOrderedSet::OrderedSet(set) => {
                if set.contains(&value) {
                    return Some(value);
                }
                set.insert(value);
                None
            }
            SingletonOrOrderedSet::Singleton(existing) if cmp(&*existing, &value) == 0 => {
                Some(value)
            }
            SingletonOrOrderedSet::Singleton(existing) if !self.allow_duplicates => {
                Some(std::mem::replace(existing, value))
            }
            entry @ SingletonOrOrderedSet::Singleton(_) => {
                let set = AvlTree::with_comparator(cmp.clone());
                let old = std::mem::replace(entry, SingletonOrOrderedSet::OrderedSet(set));
                if let (
                    SingletonOrOrderedSet::Singleton(first),
                    SingletonOrOrderedSet::OrderedSet(set),
                ) = (old, entry)
                {
                    set.insert(first);
                    set.insert(value);
                }
                tracing::debug!(slot, "promoted key to ordered set");
                None
            }
        }
    }

    /// Removes `key` with all of its values.
    pub fn remove(&mut self, key: &K) -> Option<SingletonOrOrderedSet<V, VC>> {
        self.map.remove(key).map(|(_, values)| values)
    }

    /// Removes one value from under `key`.
    ///
    /// A set left with one value is demoted to a singleton; removing the
    /// last value removes the key.
    pub fn remove_value(&mut self, key: &K, value: &V) -> Option<V> {
        let slot = self.map.find_slot(key)?;
        let cmp = &self.value_comparator;
        let removed = match self.map.value_at_mut(slot) {
            SingletonOrOrderedSet::Singleton(existing) => {
                if cmp(&*existing, value) != 0 {
                    return None;
                }
                return match self.map.remove_slot(slot) {
                    (_, SingletonOrOrderedSet::Singleton(v)) => Some(v),
                    (_, SingletonOrOrderedSet::OrderedSet(_)) => None,
                };
            }
            SingletonOrOrderedSet::OrderedSet(set) => set.remove(value)?,
        };

        // Sets hold at least two values, so one removal leaves at least one.
        let entry = self.map.value_at_mut(slot);
        let last = match entry {
            SingletonOrOrderedSet::OrderedSet(set) if set.size() == 1 => set.pop_first(),
            _ => None,
        };
        if let Some(last) = last {
            *entry = SingletonOrOrderedSet::Singleton(last);
            tracing::debug!(slot, "demoted key to singleton");
        }
        Some(removed)
    }

    pub fn find(&self, key: &K) -> Option<&SingletonOrOrderedSet<V, VC>> {
        self.map.get(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Whether `value` is stored under `key`.
    pub fn contains(&self, key: &K, value: &V) -> bool {
        match self.map.get(key) {
            Some(SingletonOrOrderedSet::Singleton(v)) => (self.value_comparator)(v, value) == 0,
            Some(SingletonOrOrderedSet::OrderedSet(set)) => set.contains(value),
            None => false,
        }
    }

    /// Number of keys.
    pub fn size(&self) -> usize {
        self.map.size()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Number of values across all keys.
    pub fn value_count(&self) -> usize {
        self.map.iter().map(|(_, values)| values.len()).sum()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn first(&self) -> Option<(&K, &SingletonOrOrderedSet<V, VC>)> {
        self.map.first()
    }

    pub fn last(&self) -> Option<(&K, &SingletonOrOrderedSet<V, VC>)> {
        self.map.last()
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + '_ {
        self.map.keys()
    }

    pub fn iter(&self) -> Iter<'_, K, SingletonOrOrderedSet<V, VC>, C> {
        self.map.iter()
    }

    pub(crate) fn entry(&self, slot: u32) -> (&K, &SingletonOrOrderedSet<V, VC>) {
        self.map.entry(slot)
    }

    /// Cursor over `(key, values)` pairs. The map cannot be changed while
    /// the cursor is in use:
    ///
    /// ```compile_fail
    /// use partition_index::MultiValueMap;
    ///
    /// let mut map = MultiValueMap::<i32, i32>::new();
    /// map.insert(1, 1);
    /// let mut cursor = map.cursor();
    /// cursor.first().unwrap();
    /// map.insert(1, 2);
    /// cursor.get().unwrap();
    /// ```
    pub fn cursor(&self) -> MultiMapCursor<'_, K, V, C, VC> {
        MultiMapCursor::new(self)
    }

    /// Cursor over the `(key, value)` pairs stored under `key`. An absent
    /// key gives a cursor with nothing to visit.
    ///
    /// Like [`cursor`](Self::cursor), it keeps the map borrowed:
    ///
    /// ```compile_fail
    /// use partition_index::MultiValueMap;
    ///
    /// let mut map = MultiValueMap::<i32, i32>::new();
    /// map.insert(1, 1);
    /// map.insert(1, 2);
    /// let key = 1;
    /// let mut cursor = map.key_tuple_cursor(&key);
    /// map.remove_value(&1, &1);
    /// cursor.next().unwrap();
    /// ```
    pub fn key_tuple_cursor<'a>(&'a self, key: &'a K) -> KeyTupleCursor<'a, K, V, VC> {
        match self.map.get_key_value(key) {
            Some((stored, values)) => KeyTupleCursor::new(stored, values, &self.value_comparator),
            None => KeyTupleCursor::empty(key),
        }
    }
}

impl<K: Debug, V: Debug, C, VC> Debug for MultiValueMap<K, V, C, VC>
where
    C: Fn(&K, &K) -> i32,
    VC: Fn(&V, &V) -> i32 + Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.map.iter()).finish()
    }
}

impl<K, V, C, VC> CursorSource for MultiValueMap<K, V, C, VC>
where
    C: Fn(&K, &K) -> i32,
    VC: Fn(&V, &V) -> i32 + Clone,
{
    type Key = K;
    type Slot = u32;

    fn first_slot(&self) -> Option<u32> {
        self.map.first_slot()
    }

    fn last_slot(&self) -> Option<u32> {
        self.map.last_slot()
    }

    fn next_slot(&self, slot: u32) -> Option<u32> {
        self.map.next_slot(slot)
    }

    fn prev_slot(&self, slot: u32) -> Option<u32> {
        self.map.prev_slot(slot)
    }

    fn lower_bound_slot(&self, key: &K) -> Option<u32> {
        self.map.lower_bound_slot(key)
    }

    fn upper_bound_slot(&self, key: &K) -> Option<u32> {
        self.map.upper_bound_slot(key)
    }

    fn key_at(&self, slot: u32) -> &K {
        self.map.key_at(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<VC>(entry: &SingletonOrOrderedSet<i32, VC>) -> Vec<i32>
    where
        VC: Fn(&i32, &i32) -> i32,
    {
        entry.values().copied().collect()
    }

    #[test]
    fn promotes_on_second_distinct_value() {
        let mut map = MultiValueMap::<i32, i32>::new();
        assert_eq!(map.insert(3, 3), None);
        assert!(map.find(&3).unwrap().is_singleton());
        assert_eq!(map.insert(3, 7), None);
        assert_eq!(map.insert(3, 10), None);
        let entry = map.find(&3).unwrap();
        assert!(entry.is_ordered_set());
        assert_eq!(values(entry), vec![3, 7, 10]);
        assert_eq!(map.size(), 1);
        assert_eq!(map.value_count(), 3);
    }

    #[test]
    fn exact_duplicate_is_a_no_op() {
        let mut map = MultiValueMap::<i32, i32>::new();
        map.insert(1, 5);
        assert_eq!(map.insert(1, 5), Some(5));
        assert!(map.find(&1).unwrap().is_singleton());
        map.insert(1, 6);
        assert_eq!(map.insert(1, 6), Some(6));
        assert_eq!(map.value_count(), 2);
    }

    #[test]
    fn without_duplicates_replaces() {
        let mut map = MultiValueMap::with_config(
            default_comparator::<&str>,
            default_comparator::<i32>,
            MultiMapConfig {
                allow_duplicates: false,
            },
        );
        assert!(!map.allows_duplicates());
        assert_eq!(map.insert("cn", 1), None);
        assert_eq!(map.insert("cn", 2), Some(1));
        assert_eq!(map.find(&"cn").and_then(|e| e.singleton()), Some(&2));
    }

    #[test]
    fn remove_value_demotes_then_drops_key() {
        let mut map = MultiValueMap::<i32, i32>::new();
        for v in [1, 2, 3] {
            map.insert(9, v);
        }
        assert_eq!(map.remove_value(&9, &4), None);
        assert_eq!(map.remove_value(&9, &2), Some(2));
        assert!(map.find(&9).unwrap().is_ordered_set());
        assert_eq!(map.remove_value(&9, &1), Some(1));
        assert_eq!(map.find(&9).and_then(|e| e.singleton()), Some(&3));
        assert_eq!(map.remove_value(&9, &1), None);
        assert_eq!(map.remove_value(&9, &3), Some(3));
        assert!(map.find(&9).is_none());
        assert!(map.is_empty());
    }

    #[test]
    fn sets_keep_at_least_two_values() {
        let mut map = MultiValueMap::<i32, i32>::new();
        for v in 0..6 {
            map.insert(1, v);
        }
        for v in [4, 0, 5, 2, 1] {
            assert_eq!(map.remove_value(&1, &v), Some(v));
            let entry = map.find(&1).unwrap();
            assert!(entry.is_singleton() || entry.len() >= 2);
            assert!(!entry.is_empty());
        }
        assert_eq!(map.find(&1).and_then(|e| e.singleton()), Some(&3));
        assert_eq!(map.value_count(), 1);
    }

    #[test]
    fn remove_whole_key() {
        let mut map = MultiValueMap::<i32, i32>::new();
        map.insert(1, 1);
        map.insert(2, 1);
        map.insert(2, 2);
        let removed = map.remove(&2).unwrap();
        assert_eq!(values(&removed), vec![1, 2]);
        assert_eq!(map.remove(&2).map(|e| e.len()), None);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec![&1]);
    }

    #[test]
    fn contains_checks_values() {
        let mut map = MultiValueMap::<i32, i32>::new();
        map.insert(1, 10);
        map.insert(2, 20);
        map.insert(2, 21);
        assert!(map.contains(&1, &10));
        assert!(!map.contains(&1, &11));
        assert!(map.contains(&2, &21));
        assert!(!map.contains(&3, &21));
        assert_eq!(map.first().map(|(k, _)| *k), Some(1));
        assert_eq!(map.last().map(|(k, e)| (*k, e.len())), Some((2, 2)));
    }
}
