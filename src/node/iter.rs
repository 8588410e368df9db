use std::borrow::Borrow;
use std::cmp::Ordering::*;
use std::ops::Bound;
use super::Tree;

/// The nodes of an in-order walk that have not been produced yet, the next one on top.
///
/// Holding arena indices rather than references lets a walk outlive a borrow of the tree. A
/// caller that mutates the tree between steps must rebuild the stack with `seek`.
#[derive(Clone, Debug, Default)]
pub struct Pending(Vec<usize>);

impl Pending {
    /// Builds the stack for a walk starting at the smallest value that satisfies `lower`.
    ///
    /// With no lower bound this is the left spine of the tree.
    pub fn seek<T, Q: ?Sized>(tree: &Tree<T>, lower: Bound<&Q>) -> Pending
        where T: Borrow<Q>, Q: Ord {

        let mut stack = vec![];
        let mut link = tree.root();

        while let Some(id) = link {
            let node = tree.node(id);
            let satisfies = match lower {
                Bound::Unbounded => true,
                Bound::Included(lower) => lower.cmp(node.value().borrow()) != Greater,
                Bound::Excluded(lower) => lower.cmp(node.value().borrow()) == Less,
            };

            if satisfies {
                stack.push(id);
                link = node.left();
            } else {
                link = node.right();
            }
        }

        Pending(stack)
    }

    pub fn clear(&mut self) { self.0.clear(); }

    pub fn peek(&self) -> Option<usize> { self.0.last().cloned() }

    /// Pops the next node, then pushes the left spine of its right subtree.
    pub fn pop<T>(&mut self, tree: &Tree<T>) -> Option<usize> {
        let id = self.0.pop()?;
        let mut link = tree.node(id).right();

        while let Some(child) = link {
            self.0.push(child);
            link = tree.node(child).left();
        }

        Some(id)
    }
}

/// A borrowing in-order iterator over the values in `[lower, upper)`.
#[derive(Clone)]
pub struct Iter<'a, T: 'a> {
    tree: &'a Tree<T>,
    pending: Pending,
    upper: Option<&'a T>,
}

impl<'a, T> Iter<'a, T> where T: Ord {
    pub fn new(tree: &'a Tree<T>) -> Self { Iter::range(tree, Bound::Unbounded, None) }

    pub fn range(tree: &'a Tree<T>, lower: Bound<&T>, upper: Option<&'a T>) -> Self {
        Iter { tree: tree, pending: Pending::seek(tree, lower), upper: upper }
    }
}

impl<'a, T> Iterator for Iter<'a, T> where T: Ord {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let value = self.tree.value(self.pending.pop(self.tree)?);

        if self.upper.map_or(false, |upper| value >= upper) {
            self.pending.clear();
            return None;
        }

        Some(value)
    }
}
