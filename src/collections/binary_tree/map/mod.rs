//! A module containing [`AvlTreeMap`] and associated types.
//!
//! Alongside the map itself, this module provides owned and borrowed iteration over entries, keys
//! or values in order, and the error types returned when a tree fails validation.

mod avl_tree_map;
mod error;
mod iter;
mod node;

pub use avl_tree_map::*;
pub use error::*;
pub use iter::*;
pub(crate) use node::*;
