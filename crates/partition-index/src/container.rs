//! The contract every ordered container satisfies.

use std::fmt::Display;

use crate::cursor::{Cursor, CursorSource};

/// Key-sorted, duplicate-free container.
///
/// Implemented by [`AvlTree`](crate::AvlTree) and
/// [`ArrayTree`](crate::ArrayTree); code that only needs ordered storage
/// and iteration can take either.
pub trait OrderedContainer<K>: CursorSource<Key = K> {
    /// Adds `key`, or returns the stored equal key and changes nothing.
    fn insert(&mut self, key: K) -> Option<&K>;
    fn remove(&mut self, key: &K) -> Option<K>;
    fn find(&self, key: &K) -> Option<&K>;
    fn first(&self) -> Option<&K>;
    fn last(&self) -> Option<&K>;
    /// Smallest key `> key`.
    fn find_greater(&self, key: &K) -> Option<&K>;
    /// Smallest key `>= key`.
    fn find_greater_or_equal(&self, key: &K) -> Option<&K>;
    /// Largest key `< key`.
    fn find_less(&self, key: &K) -> Option<&K>;
    /// Largest key `<= key`.
    fn find_less_or_equal(&self, key: &K) -> Option<&K>;
    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Opens a cursor before the first element.
    fn cursor(&self) -> Cursor<'_, Self>
    where
        Self: Sized,
    {
        Cursor::new(self)
    }
}

/// Comma separated keys of any container, in cursor order.
pub fn join_keys<K, T>(container: &T) -> String
where
    K: Display,
    T: OrderedContainer<K>,
{
    let mut out = Vec::with_capacity(container.size());
    let mut slot = container.first_slot();
    while let Some(s) = slot {
        out.push(container.key_at(s).to_string());
        slot = container.next_slot(s);
    }
    out.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArrayTree, AvlTree};

    fn exercise<T: OrderedContainer<i32>>(mut container: T) -> T {
        for k in [50, 20, 80, 10, 30, 70, 90] {
            assert!(container.insert(k).is_none());
        }
        assert_eq!(container.insert(30), Some(&30));
        assert_eq!(container.size(), 7);
        assert_eq!(container.remove(&80), Some(80));
        assert_eq!(container.remove(&80), None);
        assert_eq!(container.find(&70), Some(&70));
        assert_eq!(container.first(), Some(&10));
        assert_eq!(container.last(), Some(&90));
        assert_eq!(container.find_greater(&70), Some(&90));
        assert_eq!(container.find_greater_or_equal(&75), Some(&90));
        assert_eq!(container.find_less(&20), Some(&10));
        assert_eq!(container.find_less_or_equal(&25), Some(&20));
        assert_eq!(container.find_less(&10), None);
        assert_eq!(join_keys(&container), "10,20,30,50,70,90");
        container
    }

    #[test]
    fn both_containers_agree() {
        let tree = exercise(AvlTree::<i32>::new());
        let array = exercise(ArrayTree::<i32>::new());
        assert_eq!(tree.keys(), array.keys().iter().collect::<Vec<_>>());
    }

    #[test]
    fn cursor_from_contract() {
        let array: ArrayTree<i32> = (1..=3).collect();
        let mut cursor = array.cursor();
        let mut seen = Vec::new();
        while cursor.next().unwrap() {
            seen.push(*cursor.get().unwrap());
        }
        assert_eq!(seen, vec![1, 2, 3]);
    }
}
