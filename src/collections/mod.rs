//! Ordered collection types.
//!
//! # Purpose
//! I wrote these types to learn about balanced trees themselves, but also about ownership of
//! recursive structures, iterators and how to check invariants on a structure you can't see.

#[cfg(feature = "binary_tree")]
pub mod binary_tree;
