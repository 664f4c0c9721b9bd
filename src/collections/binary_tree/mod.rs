//! Binary search tree based collections.
//!
//! At the moment this only contains [`AvlTreeMap`], a map that keeps itself height balanced after
//! every insertion and removal. It is re-exported here from the [`map`] module.

pub mod map;

pub use map::AvlTreeMap;
