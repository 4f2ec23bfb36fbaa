//! # I/O Module
//!
//! Loading molecule-set trees from disk.
//!
//! - [`tree`] - TOML tree files: nested sets, their labels, and the atoms and bonds of
//!   each molecule. Building a tree stamps molecules in document order.

pub mod tree;
