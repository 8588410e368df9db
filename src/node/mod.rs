mod iter;


use slab::Slab;
use std::borrow::Borrow;
use std::cmp::Ordering::{self, *};
use tracing::trace;

pub use self::iter::{Iter, Pending};

/// An index into the tree's node arena, or nothing.
pub type Link = Option<usize>;

#[derive(Clone, Debug)]
pub struct Node<T> {
    left: Link,
    right: Link,
    value: T,
}

impl<T> Node<T> {
    fn new(value: T) -> Self { Node { left: None, right: None, value: value } }

    pub fn value(&self) -> &T { &self.value }

    pub fn left(&self) -> Link { self.left }

    pub fn right(&self) -> Link { self.right }
}

/// The link that owns a node: the root, or one side of a parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Place {
    Root,
    Left(usize),
    Right(usize),
}

/// An unbalanced binary search tree whose nodes live in a slab.
///
/// Every node is owned by exactly one link. `version` changes whenever the tree's structure
/// does, which lets detached cursors notice that their pending nodes may be stale.
#[derive(Clone, Debug)]
pub struct Tree<T> {
    nodes: Slab<Node<T>>,
    root: Link,
    len: usize,
    version: u64,
}

impl<T> Tree<T> {
    pub fn new() -> Self { Tree { nodes: Slab::new(), root: None, len: 0, version: 0 } }

    pub fn root(&self) -> Link { self.root }

    pub fn len(&self) -> usize { self.len }

    pub fn version(&self) -> u64 { self.version }

    pub fn node(&self, id: usize) -> &Node<T> { &self.nodes[id] }

    pub fn value(&self, id: usize) -> &T { &self.nodes[id].value }

    fn link(&self, place: Place) -> Link {
        match place {
            Place::Root => self.root,
            Place::Left(id) => self.nodes[id].left,
            Place::Right(id) => self.nodes[id].right,
        }
    }

    fn link_mut(&mut self, place: Place) -> &mut Link {
        match place {
            Place::Root => &mut self.root,
            Place::Left(id) => &mut self.nodes[id].left,
            Place::Right(id) => &mut self.nodes[id].right,
        }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
        self.version += 1;
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(usize, usize)> = self.root.into_iter().map(|id| (id, 1)).collect();

        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[id];
            stack.extend(node.left.into_iter().chain(node.right).map(|child| (child, depth + 1)));
        }

        height
    }
}

impl<T> Tree<T> where T: Ord {
    // Descends toward `value`, stopping at the link that holds it or at the empty link where it
    // would be attached.
    fn locate<Q: ?Sized>(&self, value: &Q) -> Place where T: Borrow<Q>, Q: Ord {
        let mut place = Place::Root;

        while let Some(id) = self.link(place) {
            place = match value.cmp(self.nodes[id].value.borrow()) {
                Equal => return place,
                Less => Place::Left(id),
                Greater => Place::Right(id),
            };
        }

        place
    }

    pub fn get<Q: ?Sized>(&self, value: &Q) -> Link where T: Borrow<Q>, Q: Ord {
        self.link(self.locate(value))
    }

    /// Inserts `value`, returning `false` without touching the tree if an equal value exists.
    pub fn insert(&mut self, value: T) -> bool {
        let place = self.locate(&value);
        if self.link(place).is_some() { return false; }

        let id = self.nodes.insert(Node::new(value));
        *self.link_mut(place) = Some(id);
        self.len += 1;
        self.version += 1;
        true
    }

    /// Removes and returns the value equal to `value`, if any.
    ///
    /// A node with two children is replaced by its in-order successor, which is taken from the
    /// node's own right subtree, so the tree's height never grows.
    pub fn remove<Q: ?Sized>(&mut self, value: &Q) -> Option<T> where T: Borrow<Q>, Q: Ord {
        let place = self.locate(value);
        let id = self.link(place)?;

        let heir = match (self.nodes[id].left, self.nodes[id].right) {
            (None, None) => None,
            (Some(child), None) | (None, Some(child)) => Some(child),
            (Some(left), Some(right)) => Some(self.adopt_successor(left, right)),
        };

        *self.link_mut(place) = heir;
        self.len -= 1;
        self.version += 1;
        Some(self.nodes.remove(id).value)
    }

    // Unlinks the leftmost node under `right` and hands it both subtrees of the node it replaces.
    fn adopt_successor(&mut self, left: usize, right: usize) -> usize {
        let mut parent = None;
        let successor = Left::extremum_f(self, right, |id| parent = Some(id));

        if let Some(parent) = parent {
            let orphan = self.nodes[successor].right;
            self.nodes[parent].left = orphan;
            self.nodes[successor].right = Some(right);
        }

        self.nodes[successor].left = Some(left);
        trace!(successor, "spliced in-order successor");
        successor
    }

    /// Checks the ordering of every node against all of its ancestors and that the count matches
    /// the reachable nodes.
    pub fn check_invariant(&self) -> bool {
        let mut reachable = 0;
        let mut stack: Vec<(usize, Option<&T>, Option<&T>)> =
            self.root.into_iter().map(|id| (id, None, None)).collect();

        while let Some((id, lower, upper)) = stack.pop() {
            reachable += 1;
            if reachable > self.nodes.len() { return false; }

            let node = &self.nodes[id];
            if lower.map_or(false, |lower| node.value <= *lower) ||
               upper.map_or(false, |upper| node.value >= *upper) {
                return false;
            }

            if let Some(left) = node.left { stack.push((left, lower, Some(&node.value))); }
            if let Some(right) = node.right { stack.push((right, Some(&node.value), upper)); }
        }

        reachable == self.len && reachable == self.nodes.len()
    }
}

pub trait Dir: Sized {
    type Opposite: Dir<Opposite=Self>;

    fn forward<T>(node: &Node<T>) -> Link;

    /// Checks if a node compared against a key with the given ordering lies in this direction.
    fn beyond(order: Ordering) -> bool;

    fn extremum<T>(tree: &Tree<T>, link: Link) -> Link {
        link.map(|id| Self::extremum_f(tree, id, |_| ()))
    }

    fn extremum_f<T, F>(tree: &Tree<T>, mut id: usize, mut f: F) -> usize where F: FnMut(usize) {
        while let Some(child) = Self::forward(tree.node(id)) {
            f(id);
            id = child;
        }

        id
    }

    /// Finds the node closest to `key` in this direction, or the node equal to it if
    /// `inclusive`.
    fn closest<T, Q: ?Sized>(tree: &Tree<T>, key: &Q, inclusive: bool) -> Link
        where T: Borrow<Q>, Q: Ord {

        let mut link = tree.root();
        let mut closest = None;

        while let Some(id) = link {
            let node = tree.node(id);
            link = match key.cmp(node.value.borrow()) {
                Equal if inclusive => return link,
                order if Self::beyond(order) => {
                    closest = link;
                    Self::Opposite::forward(node)
                }
                _ => Self::forward(node),
            };
        }

        closest
    }
}

pub enum Left {}

impl Dir for Left {
    type Opposite = Right;

    fn forward<T>(node: &Node<T>) -> Link { node.left }

    fn beyond(order: Ordering) -> bool { order == Greater }
}

pub enum Right {}

impl Dir for Right {
    type Opposite = Left;

    fn forward<T>(node: &Node<T>) -> Link { node.right }

    fn beyond(order: Ordering) -> bool { order == Less }
}
