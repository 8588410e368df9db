//! Live views over a range of an ordered set.

use std::borrow;
use std::cell::RefCell;
use std::cmp::Ordering::*;
use std::fmt::{self, Debug};
use std::ops::Bound;
use std::rc::Weak;
use tracing::{debug, trace};
use super::error::{Result, SetError};
use super::node::{self, Dir, Left, Right, Tree};
use super::set::Iter;

/// An inclusive lower bound and an exclusive upper bound, either of which may be absent.
#[derive(Clone, Debug)]
pub(crate) struct Bounds<T> {
    lower: Option<T>,
    upper: Option<T>,
}

impl<T> Bounds<T> where T: Ord {
    pub fn new(lower: Option<T>, upper: Option<T>) -> Self {
        Bounds { lower: lower, upper: upper }
    }

    pub fn full() -> Self { Bounds::new(None, None) }

    pub fn lower(&self) -> Bound<&T> {
        self.lower.as_ref().map_or(Bound::Unbounded, Bound::Included)
    }

    pub fn upper(&self) -> Option<&T> { self.upper.as_ref() }

    pub fn contains<Q: ?Sized>(&self, item: &Q) -> bool where T: borrow::Borrow<Q>, Q: Ord {
        let above_lower = self.lower.as_ref()
            .map_or(true, |lower| item.cmp(borrow::Borrow::borrow(lower)) != Less);
        above_lower && self.is_below_upper(item)
    }

    pub fn is_below_upper<Q: ?Sized>(&self, item: &Q) -> bool
        where T: borrow::Borrow<Q>, Q: Ord {

        self.upper.as_ref().map_or(true, |upper| item.cmp(borrow::Borrow::borrow(upper)) == Less)
    }

    /// Intersects these bounds with the given ones.
    pub fn narrow(&self, lower: Option<T>, upper: Option<T>) -> Self where T: Clone {
        let lower = match (self.lower.clone(), lower) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };

        let upper = match (self.upper.clone(), upper) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };

        Bounds::new(lower, upper)
    }
}

/// A live view of the items of an [`OrderedSet`](crate::OrderedSet) that lie in a
/// half-open range `[lower, upper)`.
///
/// A view does not own or copy any items. Every operation is computed against the backing set
/// at the time of the call, so changes made directly on the set, or through other views, are
/// visible through the view, and changes made through the view are visible in the set.
///
/// The view holds a weak reference to the set. Once the set is dropped the view is *detached*:
/// it reads as empty, and mutations fail with
/// [`SetError::Detached`].
///
/// Acquire through [`OrderedSet::before`](crate::OrderedSet::before),
/// [`OrderedSet::from`](crate::OrderedSet::from),
/// [`OrderedSet::between`](crate::OrderedSet::between), or the same methods on
/// another view.
///
/// # Examples
///
/// ```
/// use tree_set::OrderedSet;
///
/// let mut set: OrderedSet<_> = [1, 3, 5, 7, 9].iter().cloned().collect();
/// let view = set.between(3, 7);
/// assert_eq!(view.to_vec(), [3, 5]);
///
/// set.add(4);
/// assert_eq!(view.to_vec(), [3, 4, 5]);
/// ```
pub struct RangeView<T> {
    tree: Weak<RefCell<Tree<T>>>,
    bounds: Bounds<T>,
}

impl<T> RangeView<T> where T: Ord {
    pub(crate) fn new(tree: Weak<RefCell<Tree<T>>>, bounds: Bounds<T>) -> Self {
        RangeView { tree: tree, bounds: bounds }
    }

    fn with<R, F>(&self, f: F) -> Option<R> where F: FnOnce(&Tree<T>) -> R {
        let tree = self.tree.upgrade()?;
        let result = f(&*tree.borrow());
        Some(result)
    }

    /// Checks if the set backing this view has been dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// let set = tree_set::OrderedSet::<i32>::new();
    /// let view = set.from(0);
    /// assert!(!view.is_detached());
    ///
    /// drop(set);
    /// assert!(view.is_detached());
    /// ```
    pub fn is_detached(&self) -> bool { self.tree.strong_count() == 0 }

    /// Checks if the view is empty.
    pub fn is_empty(&self) -> bool {
        self.with(|tree| node::Iter::range(tree, self.bounds.lower(), self.bounds.upper())
                         .next()
                         .is_none())
            .unwrap_or(true)
    }

    /// Returns the number of items of the backing set that lie in the view.
    ///
    /// This walks the range, so it takes time linear in the result.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set: tree_set::OrderedSet<_> = (0..10).collect();
    /// let view = set.before(4);
    /// assert_eq!(view.len(), 4);
    ///
    /// set.remove(&0);
    /// assert_eq!(view.len(), 3);
    /// ```
    pub fn len(&self) -> usize {
        self.with(|tree| node::Iter::range(tree, self.bounds.lower(), self.bounds.upper()).count())
            .unwrap_or(0)
    }

    /// Checks if the view contains the given item.
    ///
    /// Items outside the view's bounds are never contained, even if the backing set holds them.
    ///
    /// # Examples
    ///
    /// ```
    /// let set: tree_set::OrderedSet<_> = vec![1, 5, 9].into_iter().collect();
    /// let view = set.from(5);
    /// assert!(view.contains(&5));
    /// assert!(view.contains(&9));
    /// assert!(!view.contains(&1));
    /// ```
    pub fn contains<Q: ?Sized>(&self, item: &Q) -> bool where T: borrow::Borrow<Q>, Q: Ord {
        self.bounds.contains(item) && self.with(|tree| tree.get(item).is_some()).unwrap_or(false)
    }

    /// Inserts an item into the backing set through the view, returning `true` if the set did
    /// not already contain the item.
    ///
    /// Fails with `SetError::OutOfRange`, leaving the set untouched, if the item lies outside
    /// the view's bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree_set::{OrderedSet, SetError};
    ///
    /// let set: OrderedSet<_> = vec![1, 3, 5, 7, 9].into_iter().collect();
    /// let view = set.between(3, 7);
    ///
    /// assert_eq!(view.add(4), Ok(true));
    /// assert_eq!(view.add(4), Ok(false));
    /// assert_eq!(view.add(10), Err(SetError::OutOfRange));
    /// assert_eq!(set.to_vec(), [1, 3, 4, 5, 7, 9]);
    /// ```
    pub fn add(&self, item: T) -> Result<bool> {
        if !self.bounds.contains(&item) {
            debug!("rejected an item outside the view's bounds");
            return Err(SetError::OutOfRange);
        }

        match self.tree.upgrade() {
            Some(tree) => {
                let added = tree.borrow_mut().insert(item);
                trace!(added, "add through view");
                Ok(added)
            }
            None => {
                debug!("add through a detached view");
                Err(SetError::Detached)
            }
        }
    }

    /// Removes the given item from the backing set through the view, returning `true` if the
    /// view contained the item.
    ///
    /// Items outside the view's bounds are reported as absent and are not removed.
    ///
    /// # Examples
    ///
    /// ```
    /// let set: tree_set::OrderedSet<_> = vec![1, 3, 5].into_iter().collect();
    /// let view = set.before(4);
    ///
    /// assert!(view.remove(&3));
    /// assert!(!view.remove(&5));
    /// assert_eq!(set.to_vec(), [1, 5]);
    /// ```
    pub fn remove<Q: ?Sized>(&self, item: &Q) -> bool where T: borrow::Borrow<Q>, Q: Ord {
        if !self.bounds.contains(item) { return false; }

        match self.tree.upgrade() {
            Some(tree) => {
                let removed = tree.borrow_mut().remove(item).is_some();
                trace!(removed, "remove through view");
                removed
            }
            None => false,
        }
    }
}

impl<T> RangeView<T> where T: Ord + Clone {
    /// Returns the view's minimum item.
    ///
    /// Fails with `SetError::Empty` if the view is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree_set::{OrderedSet, SetError};
    ///
    /// let set: OrderedSet<_> = vec![2, 4, 6].into_iter().collect();
    /// assert_eq!(set.from(3).first(), Ok(4));
    /// assert_eq!(set.from(7).first(), Err(SetError::Empty));
    /// ```
    pub fn first(&self) -> Result<T> {
        self.with(|tree| {
            let link = match self.bounds.lower() {
                Bound::Included(lower) => Right::closest(tree, lower, true),
                _ => Left::extremum(tree, tree.root()),
            };

            link.map(|id| tree.value(id))
                .filter(|item| self.bounds.is_below_upper(*item))
                .cloned()
        }).and_then(|item| item).ok_or(SetError::Empty)
    }

    /// Returns the view's maximum item.
    ///
    /// Fails with `SetError::Empty` if the view is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree_set::{OrderedSet, SetError};
    ///
    /// let set: OrderedSet<_> = vec![2, 4, 6].into_iter().collect();
    /// assert_eq!(set.before(6).last(), Ok(4));
    /// assert_eq!(set.before(2).last(), Err(SetError::Empty));
    /// ```
    pub fn last(&self) -> Result<T> {
        self.with(|tree| {
            let link = match self.bounds.upper() {
                Some(upper) => Left::closest(tree, upper, false),
                None => Right::extremum(tree, tree.root()),
            };

            link.map(|id| tree.value(id))
                .filter(|item| self.bounds.contains(*item))
                .cloned()
        }).and_then(|item| item).ok_or(SetError::Empty)
    }

    /// Returns an iterator over the view.
    ///
    /// The iterator yields the view's items in ascending order. Removing an item through the
    /// iterator removes it from the backing set.
    ///
    /// # Examples
    ///
    /// ```
    /// let set: tree_set::OrderedSet<_> = (1..10).collect();
    /// let view = set.between(3, 6);
    ///
    /// let mut it = view.iter();
    /// assert_eq!(it.next(), Some(3));
    /// assert_eq!(it.next(), Some(4));
    /// it.remove().unwrap();
    /// assert_eq!(it.next(), Some(5));
    /// assert_eq!(it.next(), None);
    ///
    /// assert_eq!(view.to_vec(), [3, 5]);
    /// ```
    pub fn iter(&self) -> Iter<T> { Iter::new(self.tree.clone(), self.bounds.clone()) }

    /// Returns the view's items in ascending order.
    pub fn to_vec(&self) -> Vec<T> {
        self.with(|tree| {
            node::Iter::range(tree, self.bounds.lower(), self.bounds.upper()).cloned().collect()
        }).unwrap_or_default()
    }

    /// Removes every item of the backing set that lies in the view.
    ///
    /// # Examples
    ///
    /// ```
    /// let set: tree_set::OrderedSet<_> = (1..8).collect();
    /// set.between(2, 5).clear();
    /// assert_eq!(set.to_vec(), [1, 5, 6, 7]);
    /// ```
    pub fn clear(&self) {
        if let Some(tree) = self.tree.upgrade() {
            let mut tree = tree.borrow_mut();
            let doomed = node::Iter::range(&tree, self.bounds.lower(), self.bounds.upper())
                .cloned()
                .collect::<Vec<_>>();

            let removed = doomed.len();
            for item in doomed { tree.remove(&item); }
            trace!(removed, "clear through view");
        }
    }

    /// Returns a view of the items of this view that are strictly less than `upper`.
    ///
    /// # Examples
    ///
    /// ```
    /// let set: tree_set::OrderedSet<_> = (1..10).collect();
    /// let view = set.from(3).before(6);
    /// assert_eq!(view.to_vec(), [3, 4, 5]);
    /// ```
    pub fn before(&self, upper: T) -> RangeView<T> {
        RangeView::new(self.tree.clone(), self.bounds.narrow(None, Some(upper)))
    }

    /// Returns a view of the items of this view that are greater than or equal to `lower`.
    pub fn from(&self, lower: T) -> RangeView<T> {
        RangeView::new(self.tree.clone(), self.bounds.narrow(Some(lower), None))
    }

    /// Returns a view of the items of this view that lie in `[lower, upper)`.
    ///
    /// The resulting bounds are the intersection of the given bounds and this view's bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// let set: tree_set::OrderedSet<_> = (1..10).collect();
    /// let view = set.between(2, 6).between(4, 9);
    /// assert_eq!(view.to_vec(), [4, 5]);
    /// assert_eq!(view.add(7), Err(tree_set::SetError::OutOfRange));
    /// ```
    pub fn between(&self, lower: T, upper: T) -> RangeView<T> {
        RangeView::new(self.tree.clone(), self.bounds.narrow(Some(lower), Some(upper)))
    }
}

impl<T> Clone for RangeView<T> where T: Clone {
    fn clone(&self) -> Self {
        RangeView { tree: self.tree.clone(), bounds: self.bounds.clone() }
    }
}

impl<T> Debug for RangeView<T> where T: Ord + Debug {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut set = f.debug_set();

        if let Some(tree) = self.tree.upgrade() {
            let tree = tree.borrow();
            set.entries(node::Iter::range(&tree, self.bounds.lower(), self.bounds.upper()));
        }

        set.finish()
    }
}

impl<'a, T> IntoIterator for &'a RangeView<T> where T: Ord + Clone {
    type Item = T;
    type IntoIter = Iter<T>;
    fn into_iter(self) -> Iter<T> { self.iter() }
}
