use crate::AvlTree;

/// A view into a single key of an [`AvlTree`], which may either be vacant or
/// occupied.
///
/// Constructed by [`AvlTree::entry()`].
#[derive(Debug)]
pub enum Entry<'a, K, V>
where
    K: Ord + Clone,
{
    Vacant(VacantEntry<'a, K, V>),
    Occupied(OccupiedEntry<'a, K, V>),
}

/// A key absent from an [`AvlTree`].
#[derive(Debug)]
pub struct VacantEntry<'a, K, V>
where
    K: Ord + Clone,
{
    key: K,
    tree: &'a mut AvlTree<K, V>,
}

/// A key present in an [`AvlTree`].
#[derive(Debug)]
pub struct OccupiedEntry<'a, K, V>
where
    K: Ord + Clone,
{
    key: K,
    tree: &'a mut AvlTree<K, V>,
}

// The entry views re-resolve their key on every access. The key presence
// checked when the view was built cannot change while the view holds the
// exclusive borrow of the tree.
const PRESENT: &str = "occupied entry key must exist in the tree";

impl<'a, K, V> VacantEntry<'a, K, V>
where
    K: Ord + Clone,
{
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Take ownership of the key.
    #[inline]
    pub fn into_key(self) -> K {
        self.key
    }

    /// Insert `value` for the vacant key, returning a mutable reference to
    /// it.
    #[inline]
    pub fn insert(self, value: V) -> &'a mut V {
        self.into_occupied(value).into_mut()
    }

    fn into_occupied(self, value: V) -> OccupiedEntry<'a, K, V> {
        let replaced = self.tree.insert(self.key.clone(), value);
        debug_assert!(replaced.is_none());

        OccupiedEntry {
            key: self.key,
            tree: self.tree,
        }
    }
}

impl<'a, K, V> OccupiedEntry<'a, K, V>
where
    K: Ord + Clone,
{
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub fn get(&self) -> &V {
        self.tree.get(&self.key).expect(PRESENT)
    }

    #[inline]
    pub fn get_mut(&mut self) -> &mut V {
        self.tree.get_mut(&self.key).expect(PRESENT)
    }

    /// Converts the entry into a mutable reference to its value, bound to the
    /// lifetime of the tree borrow.
    #[inline]
    pub fn into_mut(self) -> &'a mut V {
        self.tree.get_mut(&self.key).expect(PRESENT)
    }

    /// The 1-based position of this entry's key in ascending key order.
    #[inline]
    pub fn rank(&self) -> usize {
        self.tree.rank(&self.key).expect(PRESENT)
    }

    /// Replace the value of the entry, returning the old value.
    #[inline]
    pub fn insert(&mut self, value: V) -> V {
        self.tree.insert(self.key.clone(), value).expect(PRESENT)
    }

    /// Remove the entry from the tree, returning its value.
    #[inline]
    pub fn remove(self) -> V {
        self.tree.remove(&self.key).expect(PRESENT)
    }
}

impl<'a, K, V> Entry<'a, K, V>
where
    K: Ord + Clone,
{
    pub(crate) fn new(key: K, tree: &'a mut AvlTree<K, V>) -> Self {
        if tree.contains_key(&key) {
            Entry::Occupied(OccupiedEntry { key, tree })
        } else {
            Entry::Vacant(VacantEntry { key, tree })
        }
    }

    /// ```
    /// use weightavl::AvlTree;
    ///
    /// let mut tree: AvlTree<&str, u32> = AvlTree::default();
    /// assert_eq!(tree.entry("platanos").key(), &"platanos");
    /// ```
    #[inline]
    pub fn key(&self) -> &K {
        match self {
            Entry::Vacant(entry) => entry.key(),
            Entry::Occupied(entry) => entry.key(),
        }
    }

    /// Ensures a value is in the entry by inserting `default` if empty, and
    /// returns a mutable reference to the value in the entry.
    ///
    /// ```
    /// use weightavl::AvlTree;
    ///
    /// let mut tree = AvlTree::default();
    ///
    /// tree.entry(7).or_insert(42);
    /// assert_eq!(tree.get(&7), Some(&42));
    ///
    /// *tree.entry(7).or_insert(100) += 1;
    /// assert_eq!(tree.get(&7), Some(&43));
    /// ```
    #[inline]
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// As [`Entry::or_insert()`], lazily evaluating `default` only if the
    /// entry is vacant.
    #[inline]
    pub fn or_insert_with<F: FnOnce() -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// As [`Entry::or_insert_with()`], passing the key to `default`.
    ///
    /// ```
    /// use weightavl::AvlTree;
    ///
    /// let mut tree = AvlTree::default();
    ///
    /// tree.entry(21).or_insert_with_key(|key| key * 2);
    ///
    /// assert_eq!(tree.get(&21), Some(&42));
    /// ```
    #[inline]
    pub fn or_insert_with_key<F: FnOnce(&K) -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let value = default(entry.key());
                entry.insert(value)
            }
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts into the tree.
    ///
    /// ```
    /// use weightavl::AvlTree;
    ///
    /// let mut tree = AvlTree::default();
    ///
    /// tree.entry("bananas").and_modify(|v| *v += 1).or_insert(1);
    /// tree.entry("bananas").and_modify(|v| *v += 1).or_insert(1);
    ///
    /// assert_eq!(tree.get("bananas"), Some(&2));
    /// ```
    #[inline]
    pub fn and_modify<F: FnOnce(&mut V)>(mut self, f: F) -> Self {
        if let Entry::Occupied(entry) = &mut self {
            f(entry.get_mut());
        }
        self
    }

    /// Sets the value of the entry, and returns an [`OccupiedEntry`].
    #[inline]
    pub fn insert_entry(self, value: V) -> OccupiedEntry<'a, K, V> {
        match self {
            Entry::Occupied(mut entry) => {
                entry.insert(value);
                entry
            }
            Entry::Vacant(entry) => entry.into_occupied(value),
        }
    }
}

impl<'a, K, V> Entry<'a, K, V>
where
    K: Ord + Clone,
    V: Default,
{
    /// Ensures a value is in the entry by inserting the default value if
    /// empty, and returns a mutable reference to the value in the entry.
    #[inline]
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(V::default)
    }
}
