//! Height-balanced ordered collections for Rust.
//!
//! This crate provides [`AvlTreeMap`], an ordered map backed by an AVL tree, together with
//! [`ComparatorTree`], a plain binary search tree whose ordering is supplied at construction
//! time.
//!
//! - [`get_or_insert_with`](AvlTreeMap::get_or_insert_with) - Find an entry or create it in a
//!   single descent, returning a reference to its value
//! - [`remove`](AvlTreeMap::remove) - Delete an entry and restore balance on the way back up
//! - [`cursor`](AvlTreeMap::cursor) - Walk the entries in key order with an explicit, resumable
//!   [`Cursor`](avl_tree_map::Cursor)
//!
//! # Example
//!
//! ```
//! use hbal_tree::AvlTreeMap;
//!
//! let mut counts = AvlTreeMap::new();
//! for word in "the quick fox jumps over the lazy dog the end".split(' ') {
//!     *counts.get_or_insert_default(word) += 1;
//! }
//!
//! assert_eq!(counts[&"the"], 3);
//! assert_eq!(counts.first_key_value(), Some((&"dog", &1)));
//!
//! // Keys come back in sorted order.
//! let words: Vec<_> = counts.keys().copied().collect();
//! assert_eq!(words, ["dog", "end", "fox", "jumps", "lazy", "over", "quick", "the"]);
//!
//! // The tree stays within the AVL height bound even for sorted input.
//! let ladder: hbal_tree::AvlTreeMap<u32, ()> = (0..1024).map(|k| (k, ())).collect();
//! assert!(ladder.height() <= 11);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - The collections only require `alloc`
//! - **`std`** (default) - Enables the [`lines`] module, which loads, sorts and writes
//!   newline-delimited byte records
//!
//! # Implementation
//!
//! Nodes own their children through `Option<Box<_>>` links and store their own height.
//! Insertion and removal recurse down the tree and rebalance each node on the way back up,
//! so no parent pointers are needed and the crate contains no `unsafe` code.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod raw;

pub mod avl_tree_map;
pub mod comparator_tree;
#[cfg(feature = "std")]
pub mod lines;

pub use avl_tree_map::AvlTreeMap;
pub use comparator_tree::ComparatorTree;
#[cfg(feature = "std")]
pub use lines::{LinesError, LoadedFile};
