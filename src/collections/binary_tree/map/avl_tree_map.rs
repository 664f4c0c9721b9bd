use std::borrow::Borrow;
use std::fmt::{self, Debug, Display, Formatter};

use log::warn;

use super::{Audit, Branch, InvalidTree, Iter, Keys, Values, Violation};

/// An ordered map based on an AVL tree, a binary search tree that keeps the heights of the two
/// subtrees of every node within one of each other.
///
/// Because of that balance, the height of the tree stays below roughly `1.44 * log2(n)`, so
/// looking up, inserting and removing a key all take `O(log n)` time.
///
/// Keys are unique. Inserting a key that is already present replaces its value and leaves the
/// structure of the tree untouched.
///
/// # Examples
/// ```
/// use balanced_map::collections::binary_tree::AvlTreeMap;
///
/// let mut map = AvlTreeMap::new();
/// for key in 1..=7 {
///     map.insert(key, key * 10);
/// }
///
/// assert_eq!(map.get(&4), Some(&40));
/// assert_eq!(map.height(), Some(2));
/// assert!(map.validate().is_ok());
/// ```
#[derive(Clone)]
pub struct AvlTreeMap<K: Ord, V> {
    pub(crate) root: Branch<K, V>,
    pub(crate) len: usize,
}

impl<K: Ord, V> AvlTreeMap<K, V> {
    pub const fn new() -> AvlTreeMap<K, V> {
        AvlTreeMap {
            root: Branch(None),
            len: 0,
        }
    }

    /// Returns the number of entries in the map. This is tracked as entries are added and removed,
    /// so it doesn't need to walk the tree.
    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the height of the tree, the number of edges on the longest path from the root to a
    /// leaf, or [`None`] if the map is empty.
    pub fn height(&self) -> Option<usize> {
        self.root.0.as_ref().map(|node| node.height)
    }

    pub fn clear(&mut self) {
        self.root = Branch(None);
        self.len = 0;
    }

    /// Inserts `value` under `key`, returning the value it replaced, if any. A return value of
    /// [`None`] means that a new entry was created.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let old = self.root.insert(key, value);
        if old.is_none() {
            self.len += 1;
        }
        old
    }

    /// Removes `key` from the map, returning the stored key and value. Removing a key that isn't
    /// present leaves the map untouched and returns [`None`].
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let result = self.root.remove_entry(key);
        if result.is_some() {
            self.len -= 1;
        }
        result
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).map(|e| e.1)
    }

    pub fn get_entry<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.root.get_entry(key)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_entry(key).map(|e| e.1)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.root.get_mut(key)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.root.contains(key)
    }

    pub fn first_entry(&self) -> Option<(&K, &V)> {
        self.root.first_entry()
    }

    pub fn first(&self) -> Option<&V> {
        self.first_entry().map(|e| e.1)
    }

    pub fn last_entry(&self) -> Option<(&K, &V)> {
        self.root.last_entry()
    }

    pub fn last(&self) -> Option<&V> {
        self.last_entry().map(|e| e.1)
    }

    /// Removes and returns the entry with the smallest key.
    pub fn take_first_entry(&mut self) -> Option<(K, V)> {
        let result = self.root.take_first_entry();
        if result.is_some() {
            self.len -= 1;
        }
        result
    }

    pub fn take_first(&mut self) -> Option<V> {
        self.take_first_entry().map(|e| e.1)
    }

    /// Removes and returns the entry with the largest key.
    pub fn take_last_entry(&mut self) -> Option<(K, V)> {
        let result = self.root.take_last_entry();
        if result.is_some() {
            self.len -= 1;
        }
        result
    }

    pub fn take_last(&mut self) -> Option<V> {
        self.take_last_entry().map(|e| e.1)
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        self.into_iter()
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(self.iter())
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values(self.iter())
    }

    /// Checks every invariant of the tree:
    /// - each key is strictly between the keys of the ancestors it sits under,
    /// - each cached height matches the heights of the node's children,
    /// - the subtrees of each node differ in height by at most one,
    /// - the tracked length matches the number of reachable nodes.
    ///
    /// Every violation found is logged as a warning, and the walk carries on so that they can all
    /// be reported together.
    ///
    /// # Errors
    /// Returns an [`InvalidTree`] listing each violation, if there were any.
    pub fn validate(&self) -> Result<(), InvalidTree> {
        let mut state = Audit::default();
        self.root.audit(None, None, 0, &mut state);

        if state.visited != self.len {
            state.violations.push(Violation::Size {
                tracked: self.len,
                counted: state.visited,
            });
        }

        if state.violations.is_empty() {
            return Ok(());
        }

        for violation in &state.violations {
            warn!("{}", violation);
        }
        Err(InvalidTree {
            violations: state.violations,
        })
    }
}

impl<K: Ord, V> Default for AvlTreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V: PartialEq> PartialEq for AvlTreeMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Ord, V: Eq> Eq for AvlTreeMap<K, V> {}

impl<K: Ord, V> FromIterator<(K, V)> for AvlTreeMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = AvlTreeMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for AvlTreeMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for AvlTreeMap<K, V> {
    fn from(value: [(K, V); N]) -> Self {
        value.into_iter().collect()
    }
}

impl<K: Ord + Debug, V: Debug> Debug for AvlTreeMap<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvlTreeMap")
            .field("nodes", &Nodes(&self.root))
            .field("len", &self.len)
            .finish()
    }
}

/// Nests the multi-line tree dump of a [`Branch`] inside `debug_struct` output.
struct Nodes<'a, K: Ord, V>(&'a Branch<K, V>);

impl<K: Ord + Debug, V: Debug> Debug for Nodes<'_, K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "\n{:?}\n", self.0)
    }
}

impl<K: Ord + Debug, V: Debug> Display for AvlTreeMap<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
