//! Errors reported by the set, its views and its iterators.

use thiserror::Error;

/// A failed operation on an [`OrderedSet`](crate::OrderedSet), one of its views or one
/// of its iterators.
///
/// A failed operation never mutates the set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum SetError {
    /// `first` or `last` was called on an empty collection.
    #[error("the collection is empty")]
    Empty,

    /// The iterator has no more items.
    #[error("the iteration is exhausted")]
    Exhausted,

    /// `Iter::remove` was called before any item was produced, or twice for the same item.
    #[error("no item is pending removal")]
    InvalidState,

    /// An item was added through a view whose bounds exclude it.
    #[error("the item lies outside the view's bounds")]
    OutOfRange,

    /// The set backing a view or an iterator has been dropped.
    #[error("the backing set has been dropped")]
    Detached,
}

/// A `Result` whose error is a [`SetError`].
pub type Result<T> = ::std::result::Result<T, SetError>;
