//! An ordered set based on an unbalanced binary search tree.
//!
//! [`OrderedSet`] keeps its items unique and in ascending order. Besides
//! the usual set operations it offers:
//!
//! - an ascending iterator that can remove the item it produced last, and that stays consistent
//!   while the set changes underneath it;
//! - live range views, [`before`](OrderedSet::before),
//!   [`from`](OrderedSet::from) and
//!   [`between`](OrderedSet::between), that read and write through to the set.
//!
//! The tree is never rebalanced. Removing an item with two children splices its in-order
//! successor into its place, so removal never makes the tree taller.
//!
//! # Examples
//!
//! ```
//! use tree_set::{OrderedSet, SetError};
//!
//! let mut set: OrderedSet<_> = vec![5, 2, 8, 1, 3, 7, 9].into_iter().collect();
//! assert_eq!(set.first(), Ok(1));
//! assert_eq!(set.last(), Ok(9));
//!
//! let height = set.height();
//! assert!(set.remove(&5));
//! assert!(set.check_invariant());
//! assert!(set.height() <= height);
//! assert_eq!(set.to_vec(), [1, 2, 3, 7, 8, 9]);
//!
//! let view = set.between(2, 8);
//! assert_eq!(view.add(10), Err(SetError::OutOfRange));
//! assert_eq!(view.to_vec(), [2, 3, 7]);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod node;

#[cfg(feature = "ordered_iter")]
mod ordered_iter;

#[cfg(feature = "quickcheck")]
mod quickcheck;

pub mod error;
pub mod range;
pub mod set;

pub use error::{Result, SetError};
pub use range::RangeView;
pub use set::{Iter, OrderedSet};
