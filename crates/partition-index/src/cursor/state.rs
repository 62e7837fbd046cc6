use super::CursorSource;
use crate::error::{IndexError, Result};

/// Where a cursor stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position<S> {
    /// Boundary before the first element.
    BeforeFirst,
    /// Boundary after the last element.
    AfterLast,
    /// Boundary immediately before the element in the slot.
    Before(S),
    /// On the element in the slot.
    On(S),
}

/// The boundary/element state machine, separate from the borrowed source
/// so cursors that build their source on the fly can reuse it.
#[derive(Clone, Debug)]
pub(crate) struct CursorState<S> {
    position: Position<S>,
    closed: bool,
}

impl<S: Copy> CursorState<S> {
    pub(crate) fn new() -> Self {
        Self {
            position: Position::BeforeFirst,
            closed: false,
        }
    }

    #[inline]
    fn check_open(&self) -> Result<()> {
        if self.closed {
            Err(IndexError::ClosedResource)
        } else {
            Ok(())
        }
    }

    pub(crate) fn position(&self) -> Position<S> {
        self.position
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed
    }

    pub(crate) fn close(&mut self) {
        if !self.closed {
            tracing::trace!("cursor closed");
        }
        self.closed = true;
    }

    pub(crate) fn available(&self) -> Result<bool> {
        self.check_open()?;
        Ok(matches!(self.position, Position::On(_)))
    }

    pub(crate) fn current(&self) -> Result<S> {
        self.check_open()?;
        match self.position {
            Position::On(slot) => Ok(slot),
            _ => Err(IndexError::InvalidPosition),
        }
    }

    pub(crate) fn before_first(&mut self) -> Result<()> {
        self.check_open()?;
        self.position = Position::BeforeFirst;
        Ok(())
    }

    pub(crate) fn after_last(&mut self) -> Result<()> {
        self.check_open()?;
        self.position = Position::AfterLast;
        Ok(())
    }

    pub(crate) fn before<C>(&mut self, source: &C, key: &C::Key) -> Result<()>
    where
        C: CursorSource<Slot = S>,
    {
        self.check_open()?;
        self.position = match source.lower_bound_slot(key) {
            Some(slot) => Position::Before(slot),
            None => Position::AfterLast,
        };
        Ok(())
    }

    pub(crate) fn after<C>(&mut self, source: &C, key: &C::Key) -> Result<()>
    where
        C: CursorSource<Slot = S>,
    {
        self.check_open()?;
        self.position = match source.upper_bound_slot(key) {
            Some(slot) => Position::Before(slot),
            None => Position::AfterLast,
        };
        Ok(())
    }

    pub(crate) fn first<C>(&mut self, source: &C) -> Result<bool>
    where
        C: CursorSource<Slot = S>,
    {
        self.check_open()?;
        match source.first_slot() {
            Some(slot) => {
                self.position = Position::On(slot);
                Ok(true)
            }
            None => {
                self.position = Position::BeforeFirst;
                Ok(false)
            }
        }
    }

    pub(crate) fn last<C>(&mut self, source: &C) -> Result<bool>
    where
        C: CursorSource<Slot = S>,
    {
        self.check_open()?;
        match source.last_slot() {
            Some(slot) => {
                self.position = Position::On(slot);
                Ok(true)
            }
            None => {
                self.position = Position::AfterLast;
                Ok(false)
            }
        }
    }

    pub(crate) fn next<C>(&mut self, source: &C) -> Result<bool>
    where
        C: CursorSource<Slot = S>,
    {
        self.check_open()?;
        let (position, moved) = match self.position {
            Position::BeforeFirst => match source.first_slot() {
                Some(slot) => (Position::On(slot), true),
                None => (Position::BeforeFirst, false),
            },
            Position::Before(slot) => (Position::On(slot), true),
            Position::On(slot) => match source.next_slot(slot) {
                Some(next) => (Position::On(next), true),
                None => (Position::AfterLast, false),
            },
            Position::AfterLast => (Position::AfterLast, false),
        };
        self.position = position;
        Ok(moved)
    }

    pub(crate) fn previous<C>(&mut self, source: &C) -> Result<bool>
    where
        C: CursorSource<Slot = S>,
    {
        self.check_open()?;
        let (position, moved) = match self.position {
            Position::AfterLast => match source.last_slot() {
                Some(slot) => (Position::On(slot), true),
                None => (Position::AfterLast, false),
            },
            Position::Before(slot) | Position::On(slot) => match source.prev_slot(slot) {
                Some(prev) => (Position::On(prev), true),
                None => (Position::BeforeFirst, false),
            },
            Position::BeforeFirst => (Position::BeforeFirst, false),
        };
        self.position = position;
        Ok(moved)
    }
}
