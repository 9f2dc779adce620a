use std::borrow::Borrow;

use crate::{
    entry::Entry,
    error::{Error, InvariantViolation},
    iter::{Iter, OwnedIter},
    node::Node,
};

/// An ordered map backed by an AVL tree, augmented with subtree weights for
/// O(log n) rank and select queries.
#[derive(Debug, Clone)]
pub struct AvlTree<K, V>(Option<Box<Node<K, V>>>);

impl<K, V> Default for AvlTree<K, V> {
    fn default() -> Self {
        Self(Default::default())
    }
}

impl<K, V> AvlTree<K, V> {
    /// Construct an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of entries in the tree.
    ///
    /// O(1), read from the weight of the root node.
    pub fn len(&self) -> usize {
        self.0.as_ref().map(|v| v.weight()).unwrap_or_default()
    }

    /// Returns true if the tree contains no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// The height of the tree, or [`None`] if it is empty.
    ///
    /// A tree with a single entry has a height of 0.
    pub fn height(&self) -> Option<u8> {
        self.0.as_ref().map(|v| v.height())
    }

    /// The root [`Node`] of the tree, if any.
    pub fn root(&self) -> Option<&Node<K, V>> {
        self.0.as_deref()
    }

    /// Remove all entries from the tree.
    pub fn clear(&mut self) {
        self.0 = None;
    }

    /// Iterate over all `(key, value)` tuples in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.root())
    }

    /// Iterate over all keys in ascending order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> {
        self.iter().map(|(k, _v)| k)
    }

    /// Iterate over all values in ascending key order.
    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> {
        self.iter().map(|(_k, v)| v)
    }

    /// Return the entry with the minimum key, if any.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.root()
            .map(|v| v.min())
            .map(|v| (v.key(), v.value()))
    }

    /// Return the entry with the maximum key, if any.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.root()
            .map(|v| v.max())
            .map(|v| (v.key(), v.value()))
    }

    /// Remove and return the entry with the minimum key, if any.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let (root, min) = self.0.take()?.take_min();
        self.0 = root;
        Some(min.into_tuple())
    }

    /// Remove and return the entry with the maximum key, if any.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let (root, max) = self.0.take()?.take_max();
        self.0 = root;
        Some(max.into_tuple())
    }

    /// Return the entry holding the `rank`-th smallest key, counting from 1.
    ///
    /// ```
    /// use weightavl::{AvlTree, Error};
    ///
    /// let t = AvlTree::from_iter([(30, "c"), (10, "a"), (20, "b")]);
    ///
    /// assert_eq!(t.select(1), Ok((&10, &"a")));
    /// assert_eq!(t.select(3), Ok((&30, &"c")));
    /// assert_eq!(t.select(4), Err(Error::RankOutOfBounds { rank: 4, len: 3 }));
    /// ```
    pub fn select(&self, rank: usize) -> Result<(&K, &V), Error> {
        self.root()
            .and_then(|v| v.select(rank))
            .map(|v| (v.key(), v.value()))
            .ok_or(Error::RankOutOfBounds {
                rank,
                len: self.len(),
            })
    }
}

impl<K, V> AvlTree<K, V>
where
    K: Ord,
{
    /// Insert `value` for `key`, returning the value it replaced, if any.
    ///
    /// Replacing the value of an existing key leaves the tree structure
    /// untouched.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let (root, replaced) = match self.0.take() {
            Some(v) => v.insert(key, value),
            None => (Box::new(Node::new(key, value)), None),
        };

        self.0 = Some(root);
        replaced
    }

    /// Remove `key` from the tree, returning its value.
    ///
    /// Removing a key that does not exist is a no-op that returns [`None`].
    /// A removed node with two children is replaced by its in-order
    /// successor.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (root, removed) = self.0.take()?.remove(key);
        self.0 = root;

        if removed.is_none() {
            debug_log!(len = self.len(), "remove of absent key");
        }

        removed
    }

    /// Return a reference to the value for `key`, if any.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_key_value(key).map(|(_k, v)| v)
    }

    /// Return the stored key and value for `key`, if any.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.root()
            .and_then(|v| v.get(key))
            .map(|v| (v.key(), v.value()))
    }

    /// Return a mutable reference to the value for `key`, if any.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.0.as_deref_mut().and_then(|v| v.get_mut(key))
    }

    /// Returns true if the tree contains an entry for `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_key_value(key).is_some()
    }

    /// Return the position of `key` in ascending key order, counting from 1.
    ///
    /// ```
    /// use weightavl::{AvlTree, Error};
    ///
    /// let t = AvlTree::from_iter((1..=7).map(|k| (k, ())));
    ///
    /// assert_eq!(t.rank(&4), Ok(4));
    /// assert_eq!(t.rank(&42), Err(Error::KeyNotFound));
    /// ```
    pub fn rank<Q>(&self, key: &Q) -> Result<usize, Error>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.root().and_then(|v| v.rank(key)).ok_or_else(|| {
            debug_log!(len = self.len(), "rank of absent key");
            Error::KeyNotFound
        })
    }

    /// Gets the given key's corresponding entry in the tree for in-place
    /// manipulation.
    ///
    /// ```
    /// use weightavl::AvlTree;
    ///
    /// let mut t = AvlTree::new();
    ///
    /// *t.entry("bananas").or_insert(0) += 1;
    /// *t.entry("bananas").or_insert(0) += 1;
    ///
    /// assert_eq!(t.get("bananas"), Some(&2));
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V>
    where
        K: Clone,
    {
        Entry::new(key, self)
    }

    /// Validate the BST order, AVL balance and the cached height / weight of
    /// every node in the tree.
    ///
    /// All public operations maintain these invariants, so an error indicates
    /// a bug in this crate (or a key type with an inconsistent [`Ord`] impl).
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        self.root().map(|v| v.validate()).unwrap_or(Ok(()))
    }
}

impl<K, V> IntoIterator for AvlTree<K, V> {
    type Item = (K, V);
    type IntoIter = OwnedIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        OwnedIter::new(self.0)
    }
}

impl<'a, K, V> IntoIterator for &'a AvlTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for AvlTree<K, V>
where
    K: Ord,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut t = Self::default();
        t.extend(iter);
        t
    }
}

impl<K, V> Extend<(K, V)> for AvlTree<K, V>
where
    K: Ord,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}
