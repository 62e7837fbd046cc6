//! Bidirectional cursors over ordered containers.
//!
//! A cursor is either on an element or on a boundary between two
//! elements (or off either end). `before(k)`/`after(k)` and
//! `before_first()`/`after_last()` land on boundaries; `next()`,
//! `previous()`, `first()` and `last()` land on elements. Only an element
//! position is `available()`.
//!
//! A cursor borrows its container, so the container cannot be mutated
//! while the cursor is alive.

mod state;

pub use state::Position;
pub(crate) use state::CursorState;

use crate::error::Result;

/// Navigation primitives a container exposes to [`Cursor`].
///
/// A slot identifies one stored element for as long as the container is
/// not mutated.
pub trait CursorSource {
    type Key;
    type Slot: Copy + PartialEq + std::fmt::Debug;

    fn first_slot(&self) -> Option<Self::Slot>;
    fn last_slot(&self) -> Option<Self::Slot>;
    fn next_slot(&self, slot: Self::Slot) -> Option<Self::Slot>;
    fn prev_slot(&self, slot: Self::Slot) -> Option<Self::Slot>;
    /// First slot whose key is `>= key`.
    fn lower_bound_slot(&self, key: &Self::Key) -> Option<Self::Slot>;
    /// First slot whose key is `> key`.
    fn upper_bound_slot(&self, key: &Self::Key) -> Option<Self::Slot>;
    fn key_at(&self, slot: Self::Slot) -> &Self::Key;
}

/// Cursor over any [`CursorSource`].
///
/// # Example
///
/// ```
/// use partition_index::{AvlTree, Cursor};
///
/// let tree: AvlTree<i32> = [10, 20, 30].into_iter().collect();
/// let mut cursor = Cursor::new(&tree);
/// cursor.after(&10).unwrap();
/// assert!(!cursor.available().unwrap());
/// assert!(cursor.next().unwrap());
/// assert_eq!(cursor.get().unwrap(), &20);
/// cursor.close();
/// assert!(cursor.get().is_err());
/// ```
///
/// The container stays borrowed while the cursor is in use:
///
/// ```compile_fail
/// use partition_index::{AvlTree, Cursor};
///
/// let mut tree: AvlTree<i32> = [1, 2, 3].into_iter().collect();
/// let mut cursor = Cursor::new(&tree);
/// cursor.first().unwrap();
/// tree.insert(4);
/// cursor.get().unwrap();
/// ```
///
/// ```compile_fail
/// use partition_index::{ArrayTree, Cursor};
///
/// let mut tree: ArrayTree<i32> = [1, 2, 3].into_iter().collect();
/// let mut cursor = Cursor::new(&tree);
/// cursor.first().unwrap();
/// tree.remove(&1);
/// cursor.next().unwrap();
/// ```
pub struct Cursor<'a, S: CursorSource> {
    source: &'a S,
    state: CursorState<S::Slot>,
}

impl<'a, S: CursorSource> Cursor<'a, S> {
    /// Opens a cursor positioned before the first element.
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            state: CursorState::new(),
        }
    }

    pub fn source(&self) -> &'a S {
        self.source
    }

    pub fn position(&self) -> Position<S::Slot> {
        self.state.position()
    }

    /// Slot under the cursor.
    pub(crate) fn current_slot(&self) -> Result<S::Slot> {
        self.state.current()
    }

    pub fn before_first(&mut self) -> Result<()> {
        self.state.before_first()
    }

    pub fn after_last(&mut self) -> Result<()> {
        self.state.after_last()
    }

    /// Moves to the boundary just before the first element `>= key`.
    pub fn before(&mut self, key: &S::Key) -> Result<()> {
        self.state.before(self.source, key)
    }

    /// Moves to the boundary just before the first element `> key`.
    pub fn after(&mut self, key: &S::Key) -> Result<()> {
        self.state.after(self.source, key)
    }

    pub fn first(&mut self) -> Result<bool> {
        self.state.first(self.source)
    }

    pub fn last(&mut self) -> Result<bool> {
        self.state.last(self.source)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<bool> {
        self.state.next(self.source)
    }

    pub fn previous(&mut self) -> Result<bool> {
        self.state.previous(self.source)
    }

    pub fn available(&self) -> Result<bool> {
        self.state.available()
    }

    /// Element under the cursor.
    ///
    /// # Errors
    ///
    /// [`IndexError::ClosedResource`](crate::IndexError::ClosedResource)
    /// after `close()`, [`IndexError::InvalidPosition`](crate::IndexError::InvalidPosition)
    /// when on a boundary.
    pub fn get(&self) -> Result<&'a S::Key> {
        let slot = self.state.current()?;
        Ok(self.source.key_at(slot))
    }

    pub fn close(&mut self) {
        self.state.close();
    }

    pub fn is_closed(&self) -> bool {
        self.state.is_closed()
    }
}

impl<S: CursorSource> std::fmt::Debug for Cursor<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.state.position())
            .field("closed", &self.state.is_closed())
            .finish()
    }
}
