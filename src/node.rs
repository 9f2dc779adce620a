use std::{borrow::Borrow, cmp::Ordering, mem};

use crate::error::{Direction, InvariantViolation};

/// A single key/value entry of an [`AvlTree`], and the root of the subtree
/// beneath it.
///
/// Exposed read-only through [`AvlTree::root()`] for inspecting the tree
/// shape.
///
/// [`AvlTree`]: crate::AvlTree
/// [`AvlTree::root()`]: crate::AvlTree::root
#[derive(Debug, Clone)]
pub struct Node<K, V> {
    /// Child nodes pointers.
    left: Option<Box<Node<K, V>>>,
    right: Option<Box<Node<K, V>>>,

    /// The node's AVL height.
    ///
    /// A leaf has a height of 0.
    ///
    /// A u8 holds a maximum value of 255, meaning it can represent the height
    /// of a balanced tree of up to 5.78*10⁷⁶ entries.
    height: u8,

    /// The number of nodes in the subtree rooted at this [`Node`], including
    /// itself.
    weight: usize,

    key: K,
    value: V,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(key: K, value: V) -> Self {
        Self {
            left: None,
            right: None,
            height: 0,
            weight: 1,
            key,
            value,
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    /// The cached height of the subtree rooted at this node, 0 for a leaf.
    pub fn height(&self) -> u8 {
        self.height
    }

    /// The cached number of nodes in the subtree rooted at this node.
    pub fn weight(&self) -> usize {
        self.weight
    }

    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Remove the left child, if any.
    pub(crate) fn take_left(&mut self) -> Option<Box<Self>> {
        self.left.take()
    }

    /// Remove the right child, if any.
    pub(crate) fn take_right(&mut self) -> Option<Box<Self>> {
        self.right.take()
    }

    /// Height of the left subtree, or -1 if there is no left child.
    pub fn left_height(&self) -> i16 {
        self.left().map(|v| v.height as i16).unwrap_or(-1)
    }

    /// Height of the right subtree, or -1 if there is no right child.
    pub fn right_height(&self) -> i16 {
        self.right().map(|v| v.height as i16).unwrap_or(-1)
    }

    /// Number of nodes in the left subtree.
    pub fn left_weight(&self) -> usize {
        self.left().map(|v| v.weight).unwrap_or_default()
    }

    /// Number of nodes in the right subtree.
    pub fn right_weight(&self) -> usize {
        self.right().map(|v| v.weight).unwrap_or_default()
    }

    /// Compute the "balance factor" of the subtree rooted at this node.
    ///
    /// Returns the subtree height skew / magnitude, which is a positive number
    /// when left heavy, and a negative number when right heavy.
    pub fn balance_factor(&self) -> i16 {
        self.left_height() - self.right_height()
    }

    pub(crate) fn update_height(&mut self) {
        // Correctness: the larger child height is at least -1, so the result
        // is never negative.
        self.height = (self.left_height().max(self.right_height()) + 1) as u8;
    }

    pub(crate) fn update_weight(&mut self) {
        self.weight = 1 + self.left_weight() + self.right_weight();
    }

    /// Explode this [`Node`] into the key and value it contains.
    pub(crate) fn into_tuple(self) -> (K, V) {
        (self.key, self.value)
    }

    /// Right rotate the subtree rooted at `self` around the pivot point `P`,
    /// returning `P` as the new subtree root.
    ///
    /// ```text
    ///          y
    ///         / \                           P
    ///        P   4     Rotate Right       /   \
    ///       / \      --------------->    x     y
    ///      x   3                        / \   / \
    ///     / \                          1   2 3   4
    ///    1   2
    /// ```
    ///
    /// Only `y` and `P` have their height and weight recomputed; every other
    /// subtree keeps its members.
    ///
    /// # Panics
    ///
    /// Panics if `self` has no left pointer (cannot be rotated).
    pub(crate) fn rotate_right(mut self: Box<Self>) -> Box<Self> {
        let Some(mut pivot) = self.left.take() else {
            panic!(
                "{}",
                InvariantViolation::MissingPivot(Direction::Right, Direction::Left)
            );
        };

        // Children before parent: the pivot's height and weight depend on
        // the updated values of `self`.
        self.left = pivot.right.take();
        self.update_height();
        self.update_weight();

        pivot.right = Some(self);
        pivot.update_height();
        pivot.update_weight();

        trace_log!(height = pivot.height, weight = pivot.weight, "rotate right");

        pivot
    }

    /// Left rotate the subtree rooted at `self` around the pivot point `P`,
    /// returning `P` as the new subtree root.
    ///
    /// ```text
    ///
    ///      x
    ///     / \                               P
    ///    1   P         Rotate Left        /   \
    ///       / \      --------------->    x     y
    ///      2   y                        / \   / \
    ///         / \                      1   2 3   4
    ///        3   4
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `self` has no right pointer (cannot be rotated).
    pub(crate) fn rotate_left(mut self: Box<Self>) -> Box<Self> {
        let Some(mut pivot) = self.right.take() else {
            panic!(
                "{}",
                InvariantViolation::MissingPivot(Direction::Left, Direction::Right)
            );
        };

        self.right = pivot.left.take();
        self.update_height();
        self.update_weight();

        pivot.left = Some(self);
        pivot.update_height();
        pivot.update_weight();

        trace_log!(height = pivot.height, weight = pivot.weight, "rotate left");

        pivot
    }

    /// Recompute the height and weight of `self` from its children, then
    /// rotate if the absolute difference in height between branches is > 1.
    ///
    /// Both children must already be balanced with exact caches. Returns the
    /// (possibly new) subtree root, which must be linked into the parent in
    /// place of `self`.
    pub(crate) fn rebalance(mut self: Box<Self>) -> Box<Self> {
        self.update_height();
        self.update_weight();

        let root = match self.balance_factor() {
            // Left-heavy
            2.. => {
                if self.left().is_some_and(|l| l.balance_factor() < 0) {
                    // Left-right: straighten the left subtree first.
                    self.left = self.left.take().map(Self::rotate_left);
                }
                self.rotate_right()
            }
            // Right-heavy
            ..=-2 => {
                if self.right().is_some_and(|r| r.balance_factor() > 0) {
                    // Right-left
                    self.right = self.right.take().map(Self::rotate_right);
                }
                self.rotate_left()
            }
            -1..=1 => self, // balanced
        };

        // Invariant: the absolute difference between tree heights ("balance
        // factor") cannot exceed 1.
        debug_assert!(root.balance_factor().abs() <= 1);

        root
    }

    /// Insert `key` into the subtree rooted at `self`, returning the new
    /// subtree root and the value previously mapped to `key`, if any.
    ///
    /// Replacing the value of an existing key does not modify the tree
    /// structure.
    pub(crate) fn insert(mut self: Box<Self>, key: K, value: V) -> (Box<Self>, Option<V>)
    where
        K: Ord,
    {
        let child = match key.cmp(&self.key) {
            Ordering::Less => &mut self.left,
            Ordering::Equal => {
                let old = mem::replace(&mut self.value, value);
                return (self, Some(old));
            }
            Ordering::Greater => &mut self.right,
        };

        let replaced = match child.take() {
            Some(v) => {
                let (v, replaced) = v.insert(key, value);
                *child = Some(v);
                replaced
            }
            None => {
                // Insert the value as a new immediate descendent of self.
                *child = Some(Box::new(Self::new(key, value)));
                None
            }
        };

        if replaced.is_some() {
            // The tree structure has not been modified, so it does not require
            // rebalancing.
            return (self, replaced);
        }

        (self.rebalance(), None)
    }

    /// Remove `key` from the subtree rooted at `self`.
    ///
    /// Returns the new subtree root (or [`None`] if the subtree is now empty)
    /// and the removed value. If `key` is not found the subtree is returned
    /// unmodified.
    pub(crate) fn remove<Q>(mut self: Box<Self>, key: &Q) -> (Option<Box<Self>>, Option<V>)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let child = match key.cmp(self.key.borrow()) {
            Ordering::Less => &mut self.left,
            Ordering::Greater => &mut self.right,
            Ordering::Equal => {
                let (replacement, old) = self.unlink();
                return (replacement, Some(old.value));
            }
        };

        let Some(v) = child.take() else {
            return (Some(self), None);
        };

        let (subtree, removed) = v.remove(key);
        *child = subtree;

        match removed {
            // Removal may shorten the subtree by one level at any depth, so
            // every ancestor on the path is rebalanced.
            Some(v) => (Some(self.rebalance()), Some(v)),
            None => (Some(self), None),
        }
    }

    /// Detach `self` from its children, returning the subtree that replaces
    /// it and the detached node.
    ///
    /// This node may have 0, 1 or 2 child node(s):
    ///
    /// ```text
    ///                          +----------+
    ///                          |  parent  |
    ///                          +----------+
    ///                                |
    ///                                v
    ///                          +----------+
    ///                     +----|   self   |----+
    ///                     |    +----------+    |
    ///                     |                    |
    ///                     v                    v
    ///               +-----------+       +------------+
    ///               | self.left |       | self.right |
    ///               +-----------+       +------------+
    /// ```
    ///
    /// With no children the replacement is empty, and with a single child the
    /// child is promoted as-is. With two children the in-order successor (the
    /// minimum node of "self.right") is extracted from the right subtree and
    /// takes the place of "self", adopting both remaining subtrees.
    fn unlink(mut self: Box<Self>) -> (Option<Box<Self>>, Box<Self>) {
        let replacement = match (self.left.take(), self.right.take()) {
            (None, None) => None,
            (Some(child), None) | (None, Some(child)) => Some(child),
            (Some(left), Some(right)) => {
                let (rest, mut successor) = right.take_min();

                // Invariant: the minimum node of a subtree has no left child,
                // and its right subtree was relinked in its place.
                debug_assert!(successor.left.is_none());
                debug_assert!(successor.right.is_none());

                successor.left = Some(left);
                successor.right = rest;
                Some(successor.rebalance())
            }
        };

        (replacement, self)
    }

    /// Extract the node holding the minimum key of the subtree rooted at
    /// `self`, linking the right subtree of the extracted node in its place.
    ///
    /// Returns the rebalanced remainder of the subtree (if any) and the
    /// detached minimum node.
    pub(crate) fn take_min(mut self: Box<Self>) -> (Option<Box<Self>>, Box<Self>) {
        match self.left.take() {
            Some(left) => {
                let (rest, min) = left.take_min();
                self.left = rest;
                (Some(self.rebalance()), min)
            }
            None => {
                // This node is the end of the left edge.
                let rest = self.right.take();
                (rest, self)
            }
        }
    }

    /// Mirror of [`Node::take_min()`], extracting the maximum key.
    pub(crate) fn take_max(mut self: Box<Self>) -> (Option<Box<Self>>, Box<Self>) {
        match self.right.take() {
            Some(right) => {
                let (rest, max) = right.take_max();
                self.right = rest;
                (Some(self.rebalance()), max)
            }
            None => {
                let rest = self.left.take();
                (rest, self)
            }
        }
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&Self>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut ptr = Some(self);
        while let Some(n) = ptr {
            ptr = match key.cmp(n.key.borrow()) {
                Ordering::Less => n.left(),
                Ordering::Equal => return Some(n),
                Ordering::Greater => n.right(),
            };
        }
        None
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match key.cmp(self.key.borrow()) {
            Ordering::Less => self.left.as_deref_mut()?.get_mut(key),
            Ordering::Equal => Some(&mut self.value),
            Ordering::Greater => self.right.as_deref_mut()?.get_mut(key),
        }
    }

    pub(crate) fn min(&self) -> &Self {
        let mut n = self;
        while let Some(v) = n.left() {
            n = v;
        }
        n
    }

    pub(crate) fn max(&self) -> &Self {
        let mut n = self;
        while let Some(v) = n.right() {
            n = v;
        }
        n
    }

    /// Return the 1-based position of `key` in the sorted order of the
    /// subtree rooted at `self`.
    ///
    /// Every time the descent moves right, the current node and its entire
    /// left subtree precede `key`.
    pub(crate) fn rank<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut preceding = 0;
        let mut ptr = Some(self);
        while let Some(n) = ptr {
            ptr = match key.cmp(n.key.borrow()) {
                Ordering::Less => n.left(),
                Ordering::Equal => return Some(preceding + n.left_weight() + 1),
                Ordering::Greater => {
                    preceding += n.left_weight() + 1;
                    n.right()
                }
            };
        }
        None
    }

    /// Return the node holding the `rank`-th smallest key (1-based) in the
    /// subtree rooted at `self`.
    pub(crate) fn select(&self, mut rank: usize) -> Option<&Self> {
        let mut ptr = Some(self);
        while let Some(n) = ptr {
            let here = n.left_weight() + 1;
            ptr = match rank.cmp(&here) {
                Ordering::Less => n.left(),
                Ordering::Equal => return Some(n),
                Ordering::Greater => {
                    rank -= here;
                    n.right()
                }
            };
        }
        None
    }

    /// Walk the subtree rooted at `self`, asserting the BST order, AVL balance
    /// and exact height / weight caches of every node.
    pub(crate) fn validate(&self) -> Result<(), InvariantViolation>
    where
        K: Ord,
    {
        // Pre-order traversal, carrying the exclusive key bounds every node
        // must fall within.
        let mut stack: Vec<(&Self, usize, Option<&K>, Option<&K>)> = vec![(self, 0, None, None)];

        while let Some((n, depth, lower, upper)) = stack.pop() {
            if lower.is_some_and(|v| *v >= n.key) || upper.is_some_and(|v| *v <= n.key) {
                return Err(InvariantViolation::Unordered { depth });
            }

            let computed = n.left_height().max(n.right_height()) + 1;
            if computed != n.height as i16 {
                return Err(InvariantViolation::StaleHeight {
                    depth,
                    cached: n.height,
                    computed,
                });
            }

            let computed = 1 + n.left_weight() + n.right_weight();
            if computed != n.weight {
                return Err(InvariantViolation::StaleWeight {
                    depth,
                    cached: n.weight,
                    computed,
                });
            }

            let balance = n.balance_factor();
            if balance.abs() > 1 {
                return Err(InvariantViolation::Unbalanced { depth, balance });
            }

            if let Some(v) = n.left() {
                stack.push((v, depth + 1, lower, Some(&n.key)));
            }
            if let Some(v) = n.right() {
                stack.push((v, depth + 1, Some(&n.key), upper));
            }
        }

        Ok(())
    }
}
