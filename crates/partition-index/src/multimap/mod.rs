//! Duplicate-key map: each key holds a singleton or an ordered set of
//! values.

pub mod cursor;
pub mod map;
pub mod value;

pub use cursor::{KeyTupleCursor, MultiMapCursor, Tuple};
pub use map::MultiValueMap;
pub use value::{SingletonOrOrderedSet, Values};
