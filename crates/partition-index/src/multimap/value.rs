use std::fmt::Debug;
use std::iter::FusedIterator;

use crate::avl::{self, AvlTree};

/// Values stored under one key of a [`MultiValueMap`](super::MultiValueMap).
///
/// A key starts out as a `Singleton`. The second distinct value promotes
/// it to an `OrderedSet`; removing values down to one demotes it back.
pub enum SingletonOrOrderedSet<V, VC = fn(&V, &V) -> i32>
where
    VC: Fn(&V, &V) -> i32,
{
    Singleton(V),
    OrderedSet(AvlTree<V, VC>),
}

impl<V, VC> SingletonOrOrderedSet<V, VC>
where
    VC: Fn(&V, &V) -> i32,
{
    pub fn is_singleton(&self) -> bool {
        matches!(self, Self::Singleton(_))
    }

    pub fn is_ordered_set(&self) -> bool {
        matches!(self, Self::OrderedSet(_))
    }

    pub fn singleton(&self) -> Option<&V> {
        match self {
            Self::Singleton(v) => Some(v),
            Self::OrderedSet(_) => None,
        }
    }

    pub fn ordered_set(&self) -> Option<&AvlTree<V, VC>> {
        match self {
            Self::Singleton(_) => None,
            Self::OrderedSet(set) => Some(set),
        }
    }

    /// Number of values held.
    pub fn len(&self) -> usize {
        match self {
            Self::Singleton(_) => 1,
            Self::OrderedSet(set) => set.size(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Smallest value.
    pub fn first(&self) -> Option<&V> {
        match self {
            Self::Singleton(v) => Some(v),
            Self::OrderedSet(set) => set.first(),
        }
    }

    /// Values in ascending order.
    pub fn values(&self) -> Values<'_, V, VC> {
        match self {
            Self::Singleton(v) => Values::Single(Some(v)),
            Self::OrderedSet(set) => Values::Set(set.map().iter()),
        }
    }
}

impl<V: Debug, VC> Debug for SingletonOrOrderedSet<V, VC>
where
    VC: Fn(&V, &V) -> i32,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Singleton(v) => f.debug_tuple("Singleton").field(v).finish(),
            Self::OrderedSet(set) => f.debug_tuple("OrderedSet").field(set).finish(),
        }
    }
}

/// Iterator returned by [`SingletonOrOrderedSet::values`].
pub enum Values<'a, V, VC>
where
    VC: Fn(&V, &V) -> i32,
{
    Single(Option<&'a V>),
    Set(avl::Iter<'a, V, (), VC>),
}

impl<'a, V, VC> Iterator for Values<'a, V, VC>
where
    VC: Fn(&V, &V) -> i32,
{
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        match self {
            Values::Single(v) => v.take(),
            Values::Set(it) => it.next().map(|(v, _)| v),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Values::Single(v) => {
                let n = usize::from(v.is_some());
                (n, Some(n))
            }
            Values::Set(it) => it.size_hint(),
        }
    }
}

impl<V, VC> DoubleEndedIterator for Values<'_, V, VC>
where
    VC: Fn(&V, &V) -> i32,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        match self {
            Values::Single(v) => v.take(),
            Values::Set(it) => it.next_back().map(|(v, _)| v),
        }
    }
}

impl<V, VC> ExactSizeIterator for Values<'_, V, VC> where VC: Fn(&V, &V) -> i32 {}

impl<V, VC> FusedIterator for Values<'_, V, VC> where VC: Fn(&V, &V) -> i32 {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singleton_accessors() {
        let value: SingletonOrOrderedSet<i32> = SingletonOrOrderedSet::Singleton(7);
        assert!(value.is_singleton());
        assert_eq!(value.singleton(), Some(&7));
        assert!(value.ordered_set().is_none());
        assert_eq!(value.len(), 1);
        assert_eq!(value.values().collect::<Vec<_>>(), vec![&7]);
    }

    #[test]
    fn ordered_set_values_ascend() {
        let set: AvlTree<i32> = [10, 3, 7].into_iter().collect();
        let value = SingletonOrOrderedSet::OrderedSet(set);
        assert!(value.is_ordered_set());
        assert_eq!(value.len(), 3);
        assert_eq!(value.first(), Some(&3));
        assert_eq!(value.values().rev().collect::<Vec<_>>(), vec![&10, &7, &3]);
        assert_eq!(format!("{value:?}"), "OrderedSet({3, 7, 10})");
    }
}
