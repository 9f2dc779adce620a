use std::iter::FusedIterator;

use crate::node::Node;

/// An iterator of owned `(K, V)` tuples as the underlying tree `into_iter()`
/// impl, yielded in key order.
#[derive(Debug)]
pub struct OwnedIter<K, V> {
    stack: Vec<Box<Node<K, V>>>,
    remaining: usize,
}

impl<K, V> OwnedIter<K, V> {
    pub(crate) fn new(root: Option<Box<Node<K, V>>>) -> Self {
        let mut this = Self {
            stack: vec![],
            remaining: root.as_ref().map(|v| v.weight()).unwrap_or_default(),
        };

        // Descend down the left side of the tree.
        if let Some(root) = root {
            this.push_subtree(root);
        }

        this
    }

    fn push_subtree(&mut self, subtree_root: Box<Node<K, V>>) {
        let mut ptr = Some(subtree_root);

        while let Some(mut v) = ptr {
            ptr = v.take_left();
            self.stack.push(v);
        }
    }
}

impl<K, V> Iterator for OwnedIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let mut v = self.stack.pop()?;

        // Descend down the left side of the right hand child of this node, if
        // any.
        if let Some(right) = v.take_right() {
            self.push_subtree(right);
        }

        self.remaining -= 1;
        Some(v.into_tuple())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for OwnedIter<K, V> {}
impl<K, V> FusedIterator for OwnedIter<K, V> {}
