//! An ordered set based on a binary search tree.

use std::borrow;
use std::cell::RefCell;
use std::fmt::{self, Debug};
use std::hash::{self, Hash};
use std::iter;
use std::ops::Bound;
use std::rc::{Rc, Weak};
use tracing::{debug, trace};
use super::error::{Result, SetError};
use super::node::{self, Dir, Left, Pending, Right, Tree};
use super::range::{Bounds, RangeView};

/// An ordered set based on an unbalanced binary search tree.
///
/// Items are ordered by their `Ord` implementation and are unique. The tree is not rebalanced,
/// so operations take time proportional to its height, which is linear in the worst case.
///
/// The set shares its storage with the views returned by [`before`](Self::before),
/// [`from`](Self::from) and [`between`](Self::between) and with its iterators, none of which
/// keep it alive. Cloning the set copies its items into an independent set.
///
/// The behavior of this set is undefined if an item's ordering relative to any other item changes
/// while the item is in the set. This is normally only possible through `Cell`, `RefCell`, or
/// unsafe code.
pub struct OrderedSet<T> {
    tree: Rc<RefCell<Tree<T>>>,
}

impl<T> OrderedSet<T> where T: Ord {
    /// Creates an empty set.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = tree_set::OrderedSet::new();
    ///
    /// set.add(2);
    /// set.add(1);
    /// set.add(3);
    ///
    /// let mut it = set.iter();
    /// assert_eq!(it.next(), Some(1));
    /// assert_eq!(it.next(), Some(2));
    /// assert_eq!(it.next(), Some(3));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn new() -> Self { OrderedSet { tree: Rc::new(RefCell::new(Tree::new())) } }

    fn downgrade(&self) -> Weak<RefCell<Tree<T>>> { Rc::downgrade(&self.tree) }

    /// Checks if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = tree_set::OrderedSet::new();
    /// assert!(set.is_empty());
    ///
    /// set.add(2);
    /// assert!(!set.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Returns the number of items in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = tree_set::OrderedSet::new();
    /// assert_eq!(set.len(), 0);
    ///
    /// set.add(2);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize { self.tree.borrow().len() }

    /// Returns the height of the set's tree: the number of items on its longest path from the
    /// root to a leaf.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = tree_set::OrderedSet::new();
    /// assert_eq!(set.height(), 0);
    ///
    /// set.add(2);
    /// set.add(1);
    /// set.add(3);
    /// assert_eq!(set.height(), 2);
    ///
    /// set.add(4);
    /// assert_eq!(set.height(), 3);
    /// ```
    pub fn height(&self) -> usize { self.tree.borrow().height() }

    /// Checks that every item is greater than all items in its left subtree and less than all
    /// items in its right subtree, and that the set's length matches its tree.
    pub fn check_invariant(&self) -> bool { self.tree.borrow().check_invariant() }

    /// Removes all items from the set.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = tree_set::OrderedSet::new();
    ///
    /// set.add(2);
    /// set.add(1);
    /// set.add(3);
    ///
    /// assert_eq!(set.len(), 3);
    /// set.clear();
    ///
    /// assert_eq!(set.len(), 0);
    /// assert_eq!(set.iter().next(), None);
    /// ```
    pub fn clear(&mut self) { self.tree.borrow_mut().clear(); }

    /// Inserts an item into the set, returning `true` if the set did not already contain the item.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = tree_set::OrderedSet::new();
    /// assert!(!set.contains(&1));
    /// assert!(set.add(1));
    /// assert!(set.contains(&1));
    /// assert!(!set.add(1));
    /// ```
    pub fn add(&mut self, item: T) -> bool {
        let added = self.tree.borrow_mut().insert(item);
        trace!(added, len = self.len(), "add");
        added
    }

    /// Removes the given item from the set, returning `true` if the set contained the item.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = tree_set::OrderedSet::new();
    ///
    /// set.add(2);
    /// set.add(1);
    /// set.add(3);
    ///
    /// assert_eq!(set.len(), 3);
    /// assert!(set.contains(&1));
    /// assert!(set.remove(&1));
    ///
    /// assert_eq!(set.len(), 2);
    /// assert!(!set.contains(&1));
    /// assert!(!set.remove(&1));
    /// ```
    pub fn remove<Q: ?Sized>(&mut self, item: &Q) -> bool where T: borrow::Borrow<Q>, Q: Ord {
        let removed = self.tree.borrow_mut().remove(item).is_some();
        trace!(removed, len = self.len(), "remove");
        removed
    }

    /// Checks if the set contains the given item.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = tree_set::OrderedSet::new();
    /// assert!(!set.contains(&1));
    /// set.add(1);
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains<Q: ?Sized>(&self, item: &Q) -> bool where T: borrow::Borrow<Q>, Q: Ord {
        self.tree.borrow().get(item).is_some()
    }

    /// Returns a view of the set's items that are strictly less than `upper`.
    ///
    /// # Examples
    ///
    /// ```
    /// let set: tree_set::OrderedSet<_> = vec![1, 3, 5].into_iter().collect();
    /// assert_eq!(set.before(5).to_vec(), [1, 3]);
    /// assert!(set.before(0).is_empty());
    /// ```
    pub fn before(&self, upper: T) -> RangeView<T> {
        RangeView::new(self.downgrade(), Bounds::new(None, Some(upper)))
    }

    /// Returns a view of the set's items that are greater than or equal to `lower`.
    ///
    /// # Examples
    ///
    /// ```
    /// let set: tree_set::OrderedSet<_> = vec![1, 3, 5].into_iter().collect();
    /// assert_eq!(set.from(3).to_vec(), [3, 5]);
    /// ```
    pub fn from(&self, lower: T) -> RangeView<T> {
        RangeView::new(self.downgrade(), Bounds::new(Some(lower), None))
    }

    /// Returns a view of the set's items that are greater than or equal to `lower` and strictly
    /// less than `upper`.
    ///
    /// If `lower` is not less than `upper`, the view is permanently empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let set: tree_set::OrderedSet<_> = vec![1, 3, 5, 7, 9].into_iter().collect();
    /// assert_eq!(set.between(3, 7).to_vec(), [3, 5]);
    /// assert!(set.between(5, 5).is_empty());
    /// ```
    pub fn between(&self, lower: T, upper: T) -> RangeView<T> {
        RangeView::new(self.downgrade(), Bounds::new(Some(lower), Some(upper)))
    }
}

impl<T> OrderedSet<T> where T: Ord + Clone {
    /// Returns the set's minimum item.
    ///
    /// Fails with `SetError::Empty` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree_set::{OrderedSet, SetError};
    ///
    /// let mut set = OrderedSet::new();
    /// assert_eq!(set.first(), Err(SetError::Empty));
    ///
    /// set.add(2);
    /// set.add(1);
    /// set.add(3);
    ///
    /// assert_eq!(set.first(), Ok(1));
    /// ```
    pub fn first(&self) -> Result<T> {
        let tree = self.tree.borrow();
        let first = Left::extremum(&tree, tree.root()).map(|id| tree.value(id).clone());
        first.ok_or(SetError::Empty)
    }

    /// Returns the set's maximum item.
    ///
    /// Fails with `SetError::Empty` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree_set::{OrderedSet, SetError};
    ///
    /// let mut set = OrderedSet::new();
    /// assert_eq!(set.last(), Err(SetError::Empty));
    ///
    /// set.add(2);
    /// set.add(1);
    /// set.add(3);
    ///
    /// assert_eq!(set.last(), Ok(3));
    /// ```
    pub fn last(&self) -> Result<T> {
        let tree = self.tree.borrow();
        let last = Right::extremum(&tree, tree.root()).map(|id| tree.value(id).clone());
        last.ok_or(SetError::Empty)
    }

    /// Returns the predecessor of the given item, or `None` if no such item is present in the
    /// set.
    ///
    /// If `inclusive` is `false`, this method finds the greatest item that is strictly less than
    /// the given item. If `inclusive` is `true`, this method finds the greatest item that is less
    /// than or equal to the given item.
    ///
    /// The given item need not itself be present in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// let set: tree_set::OrderedSet<_> = vec![2, 1, 3].into_iter().collect();
    ///
    /// assert_eq!(set.pred(&1, false), None);
    /// assert_eq!(set.pred(&2, false), Some(1));
    /// assert_eq!(set.pred(&4, false), Some(3));
    ///
    /// assert_eq!(set.pred(&0, true), None);
    /// assert_eq!(set.pred(&2, true), Some(2));
    /// ```
    pub fn pred<Q: ?Sized>(&self, item: &Q, inclusive: bool) -> Option<T>
        where T: borrow::Borrow<Q>, Q: Ord {

        let tree = self.tree.borrow();
        let pred = Left::closest(&tree, item, inclusive).map(|id| tree.value(id).clone());
        pred
    }

    /// Returns the successor of the given item, or `None` if no such item is present in the set.
    ///
    /// If `inclusive` is `false`, this method finds the smallest item that is strictly greater
    /// than the given item. If `inclusive` is `true`, this method finds the smallest item that is
    /// greater than or equal to the given item.
    ///
    /// The given item need not itself be present in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// let set: tree_set::OrderedSet<_> = vec![2, 1, 3].into_iter().collect();
    ///
    /// assert_eq!(set.succ(&0, false), Some(1));
    /// assert_eq!(set.succ(&2, false), Some(3));
    /// assert_eq!(set.succ(&3, false), None);
    ///
    /// assert_eq!(set.succ(&2, true), Some(2));
    /// assert_eq!(set.succ(&4, true), None);
    /// ```
    pub fn succ<Q: ?Sized>(&self, item: &Q, inclusive: bool) -> Option<T>
        where T: borrow::Borrow<Q>, Q: Ord {

        let tree = self.tree.borrow();
        let succ = Right::closest(&tree, item, inclusive).map(|id| tree.value(id).clone());
        succ
    }

    /// Returns an iterator over the set.
    ///
    /// The iterator yields the items in ascending order. It does not borrow the set, and it
    /// can remove the item it produced last; see [`Iter`].
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = tree_set::OrderedSet::new();
    ///
    /// set.add(2);
    /// set.add(1);
    /// set.add(3);
    ///
    /// let mut it = set.iter();
    /// assert_eq!(it.next(), Some(1));
    /// assert_eq!(it.next(), Some(2));
    /// assert_eq!(it.next(), Some(3));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<T> { Iter::new(self.downgrade(), Bounds::full()) }

    /// Returns the set's items in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// let set: tree_set::OrderedSet<_> = vec![3, 1, 2, 1].into_iter().collect();
    /// assert_eq!(set.to_vec(), [1, 2, 3]);
    /// ```
    pub fn to_vec(&self) -> Vec<T> {
        let tree = self.tree.borrow();
        let items = node::Iter::new(&tree).cloned().collect();
        items
    }
}

impl<T> Clone for OrderedSet<T> where T: Clone {
    fn clone(&self) -> Self {
        OrderedSet { tree: Rc::new(RefCell::new(self.tree.borrow().clone())) }
    }
}

impl<T> Debug for OrderedSet<T> where T: Ord + Debug {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let tree = self.tree.borrow();
        let result = f.debug_set().entries(node::Iter::new(&tree)).finish();
        result
    }
}

impl<T> Default for OrderedSet<T> where T: Ord {
    fn default() -> Self { OrderedSet::new() }
}

impl<T> Extend<T> for OrderedSet<T> where T: Ord {
    fn extend<I: IntoIterator<Item=T>>(&mut self, it: I) {
        for item in it { self.add(item); }
    }
}

impl<T> iter::FromIterator<T> for OrderedSet<T> where T: Ord {
    fn from_iter<I: IntoIterator<Item=T>>(it: I) -> Self {
        let mut set = OrderedSet::new();
        set.extend(it);
        set
    }
}

impl<T> Hash for OrderedSet<T> where T: Ord + Hash {
    fn hash<H: hash::Hasher>(&self, h: &mut H) {
        let tree = self.tree.borrow();
        tree.len().hash(h);
        for item in node::Iter::new(&tree) { item.hash(h); }
    }
}

impl<'a, T> IntoIterator for &'a OrderedSet<T> where T: Ord + Clone {
    type Item = T;
    type IntoIter = Iter<T>;
    fn into_iter(self) -> Iter<T> { self.iter() }
}

impl<T> PartialEq for OrderedSet<T> where T: Ord {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (self.tree.borrow(), other.tree.borrow());
        let equal = a.len() == b.len() && node::Iter::new(&a).eq(node::Iter::new(&b));
        equal
    }
}

impl<T> Eq for OrderedSet<T> where T: Ord {}

/// An iterator over a set or a view.
///
/// The iterator yields the items in ascending order. It keeps an explicit stack of the tree
/// nodes it has yet to visit, and holds only a weak reference to the set, so the set stays free
/// to change while the iterator is alive:
///
/// - [`remove`](Self::remove) removes the item produced last from the set;
/// - after any change to the set, the iterator resumes at the smallest item greater than the
///   item it produced last. It never produces an item twice and never skips an item that is
///   still present.
///
/// Once the iterator reports the end it stays there, even if larger items are added later.
///
/// # Examples
///
/// Acquire through [`OrderedSet::iter`] or the
/// `IntoIterator` trait:
///
/// ```
/// let set: tree_set::OrderedSet<_> = (1..7).collect();
///
/// let mut it = set.iter();
/// while let Some(item) = it.next() {
///     if item % 2 == 0 { it.remove().unwrap(); }
/// }
///
/// assert_eq!(set.to_vec(), [1, 3, 5]);
///
/// for item in &set {
///     println!("{:?}", item);
/// }
/// ```
pub struct Iter<T> {
    tree: Weak<RefCell<Tree<T>>>,
    bounds: Bounds<T>,
    pending: Pending,
    version: Option<u64>,
    last: Option<T>,
    removable: bool,
    exhausted: bool,
}

impl<T> Iter<T> where T: Ord {
    pub(crate) fn new(tree: Weak<RefCell<Tree<T>>>, bounds: Bounds<T>) -> Self {
        Iter {
            tree: tree,
            bounds: bounds,
            pending: Pending::default(),
            version: None,
            last: None,
            removable: false,
            exhausted: false,
        }
    }

    // Rebuilds the pending stack if the tree changed since the iterator last walked it.
    fn sync(&mut self, tree: &Tree<T>) {
        if self.version == Some(tree.version()) { return; }

        self.pending = match self.last {
            Some(ref last) => Pending::seek(tree, Bound::Excluded(last)),
            None => Pending::seek(tree, self.bounds.lower()),
        };
        self.version = Some(tree.version());
    }

    /// Checks if the iterator has more items.
    ///
    /// # Examples
    ///
    /// ```
    /// let set: tree_set::OrderedSet<_> = vec![1].into_iter().collect();
    /// let mut it = set.iter();
    ///
    /// assert!(it.has_next());
    /// it.next();
    /// assert!(!it.has_next());
    /// ```
    pub fn has_next(&mut self) -> bool {
        if self.exhausted { return false; }

        let tree = match self.tree.upgrade() {
            Some(tree) => tree,
            None => return false,
        };

        let tree = tree.borrow();
        self.sync(&tree);
        self.pending.peek().map_or(false, |id| self.bounds.is_below_upper(tree.value(id)))
    }

    /// Removes the item produced last from the set.
    ///
    /// Fails with `SetError::InvalidState` if no item has been produced yet or if the item has
    /// already been removed through this method, and with `SetError::Detached` if the set has
    /// been dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree_set::SetError;
    ///
    /// let set: tree_set::OrderedSet<_> = vec![1, 2, 3].into_iter().collect();
    /// let mut it = set.iter();
    /// assert_eq!(it.remove(), Err(SetError::InvalidState));
    ///
    /// assert_eq!(it.next(), Some(1));
    /// assert_eq!(it.remove(), Ok(()));
    /// assert_eq!(it.remove(), Err(SetError::InvalidState));
    ///
    /// assert_eq!(it.next(), Some(2));
    /// assert_eq!(set.to_vec(), [2, 3]);
    /// ```
    pub fn remove(&mut self) -> Result<()> {
        if !self.removable { return Err(SetError::InvalidState); }

        let last = self.last.as_ref().ok_or(SetError::InvalidState)?;
        let tree = match self.tree.upgrade() {
            Some(tree) => tree,
            None => {
                debug!("remove through an iterator whose set was dropped");
                return Err(SetError::Detached);
            }
        };

        let removed = tree.borrow_mut().remove(last).is_some();
        trace!(removed, "remove through iterator");
        self.removable = false;
        Ok(())
    }
}

impl<T> Iter<T> where T: Ord + Clone {
    /// Produces the next item.
    ///
    /// Fails with `SetError::Exhausted` if there are no more items.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree_set::SetError;
    ///
    /// let set: tree_set::OrderedSet<_> = vec![1].into_iter().collect();
    /// let mut it = set.iter();
    ///
    /// assert_eq!(it.try_next(), Ok(1));
    /// assert_eq!(it.try_next(), Err(SetError::Exhausted));
    /// ```
    pub fn try_next(&mut self) -> Result<T> {
        if self.exhausted { return Err(SetError::Exhausted); }

        let tree = match self.tree.upgrade() {
            Some(tree) => tree,
            None => {
                self.exhausted = true;
                return Err(SetError::Exhausted);
            }
        };

        let tree = tree.borrow();
        self.sync(&tree);

        let item = match self.pending.pop(&tree) {
            Some(id) if self.bounds.is_below_upper(tree.value(id)) => tree.value(id).clone(),
            _ => {
                self.pending.clear();
                self.exhausted = true;
                return Err(SetError::Exhausted);
            }
        };

        self.last = Some(item.clone());
        self.removable = true;
        Ok(item)
    }
}

impl<T> Iterator for Iter<T> where T: Ord + Clone {
    type Item = T;
    fn next(&mut self) -> Option<T> { self.try_next().ok() }
}

impl<T> iter::FusedIterator for Iter<T> where T: Ord + Clone {}
