use std::error::Error;
use std::fmt::{self, Display, Formatter};

use derive_more::{Display, Error, IsVariant};

/// A single broken invariant found while validating an [`AvlTreeMap`](super::AvlTreeMap).
///
/// Nodes are identified by their in-order `index` (the position their key would have in an
/// ordered iteration) and their `depth` below the root, because keys aren't required to implement
/// [`Debug`](std::fmt::Debug).
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, IsVariant)]
pub enum Violation {
    #[display("Entry {index} (depth {depth}) is out of order with one of its ancestors!")]
    Unordered { index: usize, depth: usize },
    #[display("Entry {index} (depth {depth}) caches a height of {cached}, expected {actual}!")]
    Height {
        index: usize,
        depth: usize,
        cached: usize,
        actual: usize,
    },
    #[display("Entry {index} (depth {depth}) has a balance factor of {factor}!")]
    Unbalanced {
        index: usize,
        depth: usize,
        factor: isize,
    },
    #[display("Map tracks {tracked} entries but {counted} are reachable from the root!")]
    Size { tracked: usize, counted: usize },
}

/// Every violation found by a single call to
/// [`AvlTreeMap::validate`](super::AvlTreeMap::validate). Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTree {
    pub violations: Vec<Violation>,
}

impl Display for InvalidTree {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Found {} broken invariant(s) in AVL tree:", self.violations.len())?;
        for violation in &self.violations {
            write!(f, "\n  {}", violation)?;
        }
        Ok(())
    }
}

impl Error for InvalidTree {}
