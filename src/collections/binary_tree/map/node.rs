use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt::{self, Debug, Formatter};
use std::mem;
use std::ops::{Deref, DerefMut};

use log::debug;

use super::Violation;

/// An owning child slot. Every recursive operation is called on a slot rather than a node, so an
/// empty position is always handled before anything else happens.
#[derive(Clone)]
pub(crate) struct Branch<K: Ord, V>(pub Option<Box<Node<K, V>>>);

#[derive(Clone)]
pub(crate) struct Node<K: Ord, V> {
    pub left: Branch<K, V>,
    pub right: Branch<K, V>,
    pub key: K,
    pub value: V,
    /// The number of edges on the longest path down to a leaf. Leaves have a height of 0.
    pub height: usize,
}

/// The kind of structural change that lead to a rebalance.
///
/// A removal can leave the taller child of an unbalanced node perfectly balanced itself, which a
/// single rotation fixes. An insertion can never produce that shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Change {
    Insert,
    Remove,
}

impl<K: Ord, V> Node<K, V> {
    pub const fn leaf(key: K, value: V) -> Node<K, V> {
        Node {
            left: Branch(None),
            right: Branch(None),
            key,
            value,
            height: 0,
        }
    }

    pub fn into_tuple(self) -> (K, V) {
        (self.key, self.value)
    }

    pub const fn tuple(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }

    pub fn update_height(&mut self) {
        self.height = self.left.span().max(self.right.span());
    }

    /// Positive when the left subtree is taller, negative when the right one is.
    pub fn balance_factor(&self) -> isize {
        self.left.span() as isize - self.right.span() as isize
    }

    /// Promotes the right child to the root of this subtree, returning the new root. This node
    /// becomes its left child and takes over its old left subtree as a right child.
    ///
    /// # Panics
    /// Panics if this node has no right child to promote.
    pub fn rotate_left(mut self: Box<Self>) -> Box<Self> {
        match self.right.0.take() {
            Some(mut pivot) => {
                self.right.0 = pivot.left.0.take();
                self.update_height();
                pivot.left.0 = Some(self);
                pivot.update_height();
                pivot
            },
            None => panic!("Can't rotate an AVL node left without a right child!"),
        }
    }

    /// The mirror image of [`rotate_left`](Node::rotate_left).
    ///
    /// # Panics
    /// Panics if this node has no left child to promote.
    pub fn rotate_right(mut self: Box<Self>) -> Box<Self> {
        match self.left.0.take() {
            Some(mut pivot) => {
                self.left.0 = pivot.right.0.take();
                self.update_height();
                pivot.right.0 = Some(self);
                pivot.update_height();
                pivot
            },
            None => panic!("Can't rotate an AVL node right without a left child!"),
        }
    }
}

impl<K: Ord, V> Branch<K, V> {
    /// The height of the subtree plus the edge leading into it, or 0 for an empty slot.
    pub fn span(&self) -> usize {
        self.0.as_ref().map_or(0, |node| node.height + 1)
    }

    pub fn balance_factor(&self) -> isize {
        self.0.as_ref().map_or(0, |node| node.balance_factor())
    }

    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match &mut self.0 {
            Some(node) => {
                let old = match key.cmp(&node.key) {
                    Ordering::Less => node.left.insert(key, value),
                    Ordering::Greater => node.right.insert(key, value),
                    Ordering::Equal => return Some(mem::replace(&mut node.value, value)),
                };
                // Overwrites leave the shape of the tree alone.
                if old.is_none() {
                    self.restore(Change::Insert);
                }
                old
            },
            None => {
                self.0 = Some(Box::new(Node::leaf(key, value)));
                None
            },
        }
    }

    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = self.0.as_mut()?;
        let removed = match key.cmp(node.key.borrow()) {
            Ordering::Less => node.left.remove_entry(key),
            Ordering::Greater => node.right.remove_entry(key),
            Ordering::Equal => return self.unlink(),
        };
        if removed.is_some() {
            self.restore(Change::Remove);
        }
        removed
    }

    /// Removes the node held directly in this slot, returning its entry.
    fn unlink(&mut self) -> Option<(K, V)> {
        let node = self.0.as_mut()?;
        if node.left.0.is_some() && node.right.0.is_some() {
            // Replace this entry with its in-order successor, the leftmost entry on the right.
            // Taking the successor out is a removal in its own right and rebalances on the way up.
            let (key, value) = node.right.take_first_entry()?;
            let entry = (
                mem::replace(&mut node.key, key),
                mem::replace(&mut node.value, value),
            );
            self.restore(Change::Remove);
            Some(entry)
        } else {
            let mut node = self.0.take()?;
            self.0 = node.left.0.take().or_else(|| node.right.0.take());
            Some(node.into_tuple())
        }
    }

    pub fn get_entry<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match &self.0 {
            Some(node) => match key.cmp(node.key.borrow()) {
                Ordering::Less => node.left.get_entry(key),
                Ordering::Greater => node.right.get_entry(key),
                Ordering::Equal => Some(node.tuple()),
            },
            None => None,
        }
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match &mut self.0 {
            Some(node) => match key.cmp(node.key.borrow()) {
                Ordering::Less => node.left.get_mut(key),
                Ordering::Greater => node.right.get_mut(key),
                Ordering::Equal => Some(&mut node.value),
            },
            None => None,
        }
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_entry(key).is_some()
    }

    pub fn first_entry(&self) -> Option<(&K, &V)> {
        let node = self.0.as_ref()?;
        node.left.first_entry().or(Some(node.tuple()))
    }

    pub fn last_entry(&self) -> Option<(&K, &V)> {
        let node = self.0.as_ref()?;
        node.right.last_entry().or(Some(node.tuple()))
    }

    pub fn take_first_entry(&mut self) -> Option<(K, V)> {
        let node = self.0.as_mut()?;
        if node.left.0.is_some() {
            let entry = node.left.take_first_entry();
            self.restore(Change::Remove);
            entry
        } else {
            self.unlink()
        }
    }

    pub fn take_last_entry(&mut self) -> Option<(K, V)> {
        let node = self.0.as_mut()?;
        if node.right.0.is_some() {
            let entry = node.right.take_last_entry();
            self.restore(Change::Remove);
            entry
        } else {
            self.unlink()
        }
    }

    /// Recomputes the height of the node in this slot from its children, then rebalances it.
    fn restore(&mut self, change: Change) {
        if let Some(node) = &mut self.0 {
            node.update_height();
        }
        self.rebalance(change);
    }

    pub fn rotate_left(&mut self) {
        self.0 = self.0.take().map(Node::rotate_left);
    }

    pub fn rotate_right(&mut self) {
        self.0 = self.0.take().map(Node::rotate_right);
    }

    /// Restores the AVL balance of the node in this slot, assuming both of its subtrees are
    /// already balanced and its height is up to date.
    ///
    /// # Panics
    /// Panics if the node was more than two levels out of balance beforehand, or is still out of
    /// balance afterwards. Either means the tree was already corrupted.
    pub fn rebalance(&mut self, change: Change) {
        let factor = self.balance_factor();
        assert!(
            (-2..=2).contains(&factor),
            "AVL node found with a balance factor of {factor} before rebalancing!"
        );

        let Some(node) = &mut self.0 else {
            return;
        };

        match factor {
            -2 => {
                match (node.right.balance_factor(), change) {
                    (-1, _) | (0, Change::Remove) => debug!("single left rotation"),
                    (1, _) => {
                        debug!("right-left double rotation");
                        node.right.rotate_right();
                    },
                    (child, _) => panic!(
                        "Right heavy AVL node has a right child with balance factor {child} \
                        after {change:?}!"
                    ),
                }
                self.rotate_left();
            },
            2 => {
                match (node.left.balance_factor(), change) {
                    (1, _) | (0, Change::Remove) => debug!("single right rotation"),
                    (-1, _) => {
                        debug!("left-right double rotation");
                        node.left.rotate_left();
                    },
                    (child, _) => panic!(
                        "Left heavy AVL node has a left child with balance factor {child} \
                        after {change:?}!"
                    ),
                }
                self.rotate_right();
            },
            _ => return,
        }

        let factor = self.balance_factor();
        assert!(
            (-1..=1).contains(&factor),
            "AVL node still has a balance factor of {factor} after rotating!"
        );
    }

    /// Walks the subtree in order, checking each node against the bounds set by its ancestors, its
    /// cached height and its balance. Keys are strictly bounded by `lower` and `upper`.
    pub fn audit<'a>(
        &'a self,
        lower: Option<&'a K>,
        upper: Option<&'a K>,
        depth: usize,
        state: &mut Audit,
    ) {
        let Some(node) = &self.0 else {
            return;
        };

        node.left.audit(lower, Some(&node.key), depth + 1, state);

        let index = state.visited;
        state.visited += 1;

        let above = lower.is_none_or(|lower| *lower < node.key);
        let below = upper.is_none_or(|upper| node.key < *upper);
        if !(above && below) {
            state.violations.push(Violation::Unordered { index, depth });
        }

        let actual = node.left.span().max(node.right.span());
        if node.height != actual {
            state.violations.push(Violation::Height {
                index,
                depth,
                cached: node.height,
                actual,
            });
        }

        let factor = node.balance_factor();
        if !(-1..=1).contains(&factor) {
            state.violations.push(Violation::Unbalanced { index, depth, factor });
        }

        node.right.audit(Some(&node.key), upper, depth + 1, state);
    }
}

/// The running state of a validation walk.
#[derive(Debug, Default)]
pub(crate) struct Audit {
    pub visited: usize,
    pub violations: Vec<Violation>,
}

impl<K: Ord, V> Deref for Branch<K, V> {
    type Target = Option<Box<Node<K, V>>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<K: Ord, V> DerefMut for Branch<K, V> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<K: Ord, V> From<Option<Box<Node<K, V>>>> for Branch<K, V> {
    fn from(value: Option<Box<Node<K, V>>>) -> Self {
        Branch(value)
    }
}

impl<K: Ord + Debug, V: Debug> Debug for Branch<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(node) => write!(
                f,
                "{}\n({:?}: {:?}) h{}\n{}",
                format!("{:?}", node.left)
                    .lines()
                    .map(|l| String::from("┌    ") + l)
                    .collect::<Vec<_>>()
                    .join("\n"),
                node.key,
                node.value,
                node.height,
                format!("{:?}", node.right)
                    .lines()
                    .map(|l| String::from("└    ") + l)
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
            None => write!(f, "-"),
        }
    }
}
