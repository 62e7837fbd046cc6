use super::map::MultiValueMap;
use super::value::SingletonOrOrderedSet;
use crate::avl::AvlTree;
use crate::cursor::{Cursor, CursorSource, CursorState, Position};
use crate::error::{IndexError, Result};

/// A key paired with one value, as yielded by the multi-value cursors.
#[derive(Debug, PartialEq, Eq)]
pub struct Tuple<'a, K, V> {
    pub key: &'a K,
    pub value: &'a V,
}

impl<K, V> Clone for Tuple<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Tuple<'_, K, V> {}

/// Cursor over the `(key, values)` entries of a [`MultiValueMap`].
///
/// Moves key by key. Positioning on a value inside an entry is not
/// possible at this level: `before_value`/`after_value` fail with
/// [`IndexError::UnsupportedOperation`]. Use
/// [`MultiValueMap::key_tuple_cursor`] to walk the values of one key.
pub struct MultiMapCursor<'a, K, V, C, VC>
where
    C: Fn(&K, &K) -> i32,
    VC: Fn(&V, &V) -> i32 + Clone,
{
    inner: Cursor<'a, MultiValueMap<K, V, C, VC>>,
}

impl<'a, K, V, C, VC> MultiMapCursor<'a, K, V, C, VC>
where
    C: Fn(&K, &K) -> i32,
    VC: Fn(&V, &V) -> i32 + Clone,
{
    pub fn new(map: &'a MultiValueMap<K, V, C, VC>) -> Self {
        Self {
            inner: Cursor::new(map),
        }
    }

    pub fn position(&self) -> Position<u32> {
        self.inner.position()
    }

    pub fn before_first(&mut self) -> Result<()> {
        self.inner.before_first()
    }

    pub fn after_last(&mut self) -> Result<()> {
        self.inner.after_last()
    }

    pub fn before(&mut self, key: &K) -> Result<()> {
        self.inner.before(key)
    }

    pub fn after(&mut self, key: &K) -> Result<()> {
        self.inner.after(key)
    }

    pub fn before_value(&mut self, _key: &K, _value: &V) -> Result<()> {
        self.unsupported("before_value")
    }

    pub fn after_value(&mut self, _key: &K, _value: &V) -> Result<()> {
        self.unsupported("after_value")
    }

    fn unsupported(&self, op: &'static str) -> Result<()> {
        if self.inner.is_closed() {
            return Err(IndexError::ClosedResource);
        }
        Err(IndexError::UnsupportedOperation(op))
    }

    pub fn first(&mut self) -> Result<bool> {
        self.inner.first()
    }

    pub fn last(&mut self) -> Result<bool> {
        self.inner.last()
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<bool> {
        self.inner.next()
    }

    pub fn previous(&mut self) -> Result<bool> {
        self.inner.previous()
    }

    pub fn available(&self) -> Result<bool> {
        self.inner.available()
    }

    pub fn get(&self) -> Result<Tuple<'a, K, SingletonOrOrderedSet<V, VC>>> {
        let slot = self.inner.current_slot()?;
        let (key, value) = self.inner.source().entry(slot);
        Ok(Tuple { key, value })
    }

    pub fn close(&mut self) {
        self.inner.close();
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }
}

/// The values under one key, seen as a cursor source.
enum ValueSource<'a, V, VC>
where
    VC: Fn(&V, &V) -> i32,
{
    Empty,
    Single { value: &'a V, comparator: &'a VC },
    Set(&'a AvlTree<V, VC>),
}

impl<V, VC> Clone for ValueSource<'_, V, VC>
where
    VC: Fn(&V, &V) -> i32,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<V, VC> Copy for ValueSource<'_, V, VC> where VC: Fn(&V, &V) -> i32 {}

impl<'a, V, VC> ValueSource<'a, V, VC>
where
    VC: Fn(&V, &V) -> i32,
{
    fn value_at(self, slot: u32) -> &'a V {
        match self {
            ValueSource::Single { value, .. } => value,
            ValueSource::Set(set) => set.key_at(slot),
            ValueSource::Empty => unreachable!("empty value source yields no slots"),
        }
    }
}

impl<V, VC> CursorSource for ValueSource<'_, V, VC>
where
    VC: Fn(&V, &V) -> i32,
{
    type Key = V;
    type Slot = u32;

    fn first_slot(&self) -> Option<u32> {
        match self {
            ValueSource::Empty => None,
            ValueSource::Single { .. } => Some(0),
            ValueSource::Set(set) => set.first_slot(),
        }
    }

    fn last_slot(&self) -> Option<u32> {
        match self {
            ValueSource::Empty => None,
            ValueSource::Single { .. } => Some(0),
            ValueSource::Set(set) => set.last_slot(),
        }
    }

    fn next_slot(&self, slot: u32) -> Option<u32> {
        match self {
            ValueSource::Set(set) => set.next_slot(slot),
            _ => None,
        }
    }

    fn prev_slot(&self, slot: u32) -> Option<u32> {
        match self {
            ValueSource::Set(set) => set.prev_slot(slot),
            _ => None,
        }
    }

    fn lower_bound_slot(&self, key: &V) -> Option<u32> {
        match *self {
            ValueSource::Empty => None,
            ValueSource::Single { value, comparator } => (comparator(value, key) >= 0).then_some(0),
            ValueSource::Set(set) => set.lower_bound_slot(key),
        }
    }

    fn upper_bound_slot(&self, key: &V) -> Option<u32> {
        match *self {
            ValueSource::Empty => None,
            ValueSource::Single { value, comparator } => (comparator(value, key) > 0).then_some(0),
            ValueSource::Set(set) => set.upper_bound_slot(key),
        }
    }

    fn key_at(&self, slot: u32) -> &V {
        self.value_at(slot)
    }
}

/// Cursor over the `(key, value)` tuples stored under a single key.
///
/// Unlike [`MultiMapCursor`] it can be positioned by value with
/// `before_value`/`after_value`.
///
/// # Example
///
/// ```
/// use partition_index::MultiValueMap;
///
/// let mut map = MultiValueMap::<&str, i32>::new();
/// for v in [30, 10, 20] {
///     map.insert("uid", v);
/// }
/// let mut cursor = map.key_tuple_cursor(&"uid");
/// cursor.after_value(&10).unwrap();
/// assert!(cursor.next().unwrap());
/// assert_eq!(*cursor.get().unwrap().value, 20);
/// ```
pub struct KeyTupleCursor<'a, K, V, VC>
where
    VC: Fn(&V, &V) -> i32,
{
    key: &'a K,
    source: ValueSource<'a, V, VC>,
    state: CursorState<u32>,
}

impl<'a, K, V, VC> KeyTupleCursor<'a, K, V, VC>
where
    VC: Fn(&V, &V) -> i32,
{
    pub(crate) fn new(
        key: &'a K,
        values: &'a SingletonOrOrderedSet<V, VC>,
        comparator: &'a VC,
    ) -> Self {
        let source = match values {
            SingletonOrOrderedSet::Singleton(value) => ValueSource::Single { value, comparator },
            SingletonOrOrderedSet::OrderedSet(set) => ValueSource::Set(set),
        };
        Self {
            key,
            source,
            state: CursorState::new(),
        }
    }

    pub(crate) fn empty(key: &'a K) -> Self {
        Self {
            key,
            source: ValueSource::Empty,
            state: CursorState::new(),
        }
    }

    pub fn key(&self) -> &'a K {
        self.key
    }

    pub fn position(&self) -> Position<u32> {
        self.state.position()
    }

    pub fn before_first(&mut self) -> Result<()> {
        self.state.before_first()
    }

    pub fn after_last(&mut self) -> Result<()> {
        self.state.after_last()
    }

    /// Moves to the boundary just before the first value `>= value`.
    pub fn before_value(&mut self, value: &V) -> Result<()> {
        self.state.before(&self.source, value)
    }

    /// Moves to the boundary just before the first value `> value`.
    pub fn after_value(&mut self, value: &V) -> Result<()> {
        self.state.after(&self.source, value)
    }

    pub fn first(&mut self) -> Result<bool> {
        self.state.first(&self.source)
    }

    pub fn last(&mut self) -> Result<bool> {
        self.state.last(&self.source)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<bool> {
        self.state.next(&self.source)
    }

    pub fn previous(&mut self) -> Result<bool> {
        self.state.previous(&self.source)
    }

    pub fn available(&self) -> Result<bool> {
        self.state.available()
    }

    pub fn get(&self) -> Result<Tuple<'a, K, V>> {
        let slot = self.state.current()?;
        Ok(Tuple {
            key: self.key,
            value: self.source.value_at(slot),
        })
    }

    pub fn close(&mut self) {
        self.state.close();
    }

    pub fn is_closed(&self) -> bool {
        self.state.is_closed()
    }
}
