//! # Core Models Module
//!
//! This module contains the data structures used to represent hierarchical
//! collections of molecules.
//!
//! ## Key Components
//!
//! - [`ids`] - Identifier types for molecules and atoms
//! - [`sequence`] - The monotonic generator that stamps molecule identifiers
//! - [`atom`] - Minimal atom record held by a molecular structure
//! - [`topology`] - Bonds and bond orders
//! - [`molecule`] - The `Molecule` capability trait and the concrete `MolecularStructure`
//! - [`set`] - `MoleculeSet`, a tree node grouping molecules and nested sets
//!
//! ## Usage
//!
//! ```ignore
//! use molset::core::models::{atom::Atom, sequence::IdSequence, set::MoleculeSet};
//! use std::sync::Arc;
//!
//! let mut root: MoleculeSet = MoleculeSet::with_sequence(Arc::new(IdSequence::new()));
//! let water = root.create_molecule();
//! let o = water.molecule_mut().add_atom(Atom::new("O", "O"));
//!
//! let counts = root.counts();
//! ```

pub mod atom;
pub mod ids;
pub mod molecule;
pub mod sequence;
pub mod set;
pub mod topology;
