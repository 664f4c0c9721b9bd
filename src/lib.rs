//! This crate is my attempt at writing a self-balancing ordered map, the AVL tree.
//!
//! # Purpose
//! This repo / crate is a project that I'm working on as a learning experience, with no expectation
//! for it to be used in production. A plain binary search tree is easy enough, but keeping one
//! balanced means getting rotations and the deletion edge cases right, which is exactly the kind of
//! thing I wanted to understand properly.
//!
//! # Method
//! The tree is built from owning child slots ([`Option<Box<_>>`]) rather than raw pointers. Every
//! recursive operation is invoked on a slot, so an empty position is checked explicitly before
//! anything else happens, and rotations take a subtree out of its slot and put the new root back
//! in its place. No `unsafe` is needed for any of it.
//!
//! # Error Handling
//! There are two kinds of failure here. A broken invariant detected while rebalancing means the
//! algorithm itself is wrong, so it panics straight away instead of carrying on with a corrupted
//! structure. Checking a whole tree with
//! [`AvlTreeMap::validate`](collections::binary_tree::AvlTreeMap::validate) is different: every
//! violation is collected and logged, then returned together as a strongly typed error, so that a
//! test run can report more than one problem at once.
//!
//! Removing a key that isn't present is never an error, it just returns [`None`].
//!
//! # Dependencies
//! This crate depends on some derive macros for its error types and on the `log` facade for
//! reporting rotations and validation failures. It doesn't install a logger itself.
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

#[cfg(feature = "collections")]
pub mod collections;

pub(crate) mod util;
