//! # molset Core Library
//!
//! Hierarchical containers for molecular data: a tree of molecule collections whose
//! molecules are stamped with unique identifiers at creation time, and whose atom,
//! bond and molecule totals can be aggregated over any subtree.
//!
//! ## Layout
//!
//! - **[`core::models`]** holds the data model: the identifier sequence, the
//!   [`Molecule`](core::models::molecule::Molecule) capability trait with its concrete
//!   `MolecularStructure`, and the [`MoleculeSet`](core::models::set::MoleculeSet) tree.
//!
//! - **[`core::io`]** reads TOML tree files describing a whole molecule-set hierarchy
//!   and turns them into a populated `MoleculeSet`.

pub mod core;
