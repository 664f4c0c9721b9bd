use std::iter::FusedIterator;

use super::{AvlTreeMap, Branch, Node};

impl<K: Ord, V> IntoIterator for AvlTreeMap<K, V> {
    type Item = (K, V);

    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

/// An owned iterator over the entries of an [`AvlTreeMap`], in ascending key order.
pub struct IntoIter<K: Ord, V>(AvlTreeMap<K, V>);

impl<K: Ord, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        // Takes log2 n every time (and rebalances), but keeps the map valid while it drains.
        self.0.take_first_entry()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }
}

impl<K: Ord, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.take_last_entry()
    }
}

impl<K: Ord, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K: Ord, V> FusedIterator for IntoIter<K, V> {}

impl<'a, K: Ord, V> IntoIterator for &'a AvlTreeMap<K, V> {
    type Item = (&'a K, &'a V);

    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: self.len(),
        };
        iter.descend(&self.root);
        iter
    }
}

/// A borrowed iterator over the entries of an [`AvlTreeMap`], in ascending key order.
///
/// The iterator keeps the path of nodes that still need visiting, which is never longer than the
/// height of the tree.
pub struct Iter<'a, K: Ord, V> {
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K: Ord, V> Iter<'a, K, V> {
    /// Pushes the left spine of `branch`, so that its smallest node ends up on top.
    fn descend(&mut self, mut branch: &'a Branch<K, V>) {
        while let Some(node) = &branch.0 {
            self.stack.push(node);
            branch = &node.left;
        }
    }
}

impl<'a, K: Ord, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.descend(&node.right);
        self.remaining -= 1;
        Some(node.tuple())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K: Ord, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K: Ord, V> FusedIterator for Iter<'a, K, V> {}

impl<'a, K: Ord, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Iter {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

/// A borrowed iterator over the keys of an [`AvlTreeMap`], in ascending order.
pub struct Keys<'a, K: Ord, V>(pub(crate) Iter<'a, K, V>);

impl<'a, K: Ord, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| e.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a, K: Ord, V> ExactSizeIterator for Keys<'a, K, V> {}

impl<'a, K: Ord, V> FusedIterator for Keys<'a, K, V> {}

/// A borrowed iterator over the values of an [`AvlTreeMap`], ordered by their keys.
pub struct Values<'a, K: Ord, V>(pub(crate) Iter<'a, K, V>);

impl<'a, K: Ord, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| e.1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a, K: Ord, V> ExactSizeIterator for Values<'a, K, V> {}

impl<'a, K: Ord, V> FusedIterator for Values<'a, K, V> {}
