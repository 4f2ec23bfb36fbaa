//! # Core Module
//!
//! Data model and I/O for molecule-set trees.
//!
//! - **Molecular Representation** ([`models`]) - Identifiers, molecules, and the set tree
//! - **File I/O** ([`io`]) - Loading set trees from TOML descriptions

pub mod io;
pub mod models;
