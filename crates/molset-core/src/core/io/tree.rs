use crate::core::models::atom::Atom;
use crate::core::models::ids::AtomId;
use crate::core::models::molecule::MolecularStructure;
use crate::core::models::sequence::IdSequence;
use crate::core::models::set::MoleculeSet;
use crate::core::models::topology::{BondOrder, ParseBondOrderError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("File I/O error for '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Molecule '{molecule}' has a bond to atom {index}, but only {atom_count} atoms")]
    AtomIndexOutOfRange {
        molecule: String,
        index: usize,
        atom_count: usize,
    },
    #[error("Molecule '{molecule}' bonds atom {index} to itself")]
    SelfBond { molecule: String, index: usize },
    #[error("Molecule '{molecule}' lists {orders} bond orders for {bonds} bonds")]
    OrderCountMismatch {
        molecule: String,
        bonds: usize,
        orders: usize,
    },
    #[error(
        "Molecule '{molecule}' bonds atoms {first}-{second} twice, as {existing} and as {repeated}"
    )]
    ConflictingBondOrder {
        molecule: String,
        first: usize,
        second: usize,
        existing: BondOrder,
        repeated: BondOrder,
    },
    #[error("Molecule '{molecule}': {source}")]
    BondOrder {
        molecule: String,
        source: ParseBondOrderError,
    },
}

/// A molecule as written in a tree file.
///
/// Bonds refer to atoms by their zero-based position in `atoms`. When present, `orders`
/// runs parallel to `bonds`; missing orders default to single bonds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MoleculeSpec {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub atoms: Vec<String>,
    #[serde(default)]
    pub bonds: Vec<[usize; 2]>,
    #[serde(default)]
    pub orders: Option<Vec<String>>,
}

/// A molecule set as written in a tree file, including its nested children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetSpec {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub molecules: Vec<MoleculeSpec>,
    #[serde(default)]
    pub children: Vec<SetSpec>,
}

/// TOML description of a whole molecule-set tree; the document root is the root set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeFile {
    pub root: SetSpec,
}

impl FromStr for TreeFile {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let root: SetSpec = toml::from_str(s)?;
        Ok(Self { root })
    }
}

impl TreeFile {
    /// Reads and parses a tree file.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Io`] if the file cannot be read and [`TreeError::Toml`] if it
    /// is not a valid tree description.
    pub fn read_from_path(path: &Path) -> Result<Self, TreeError> {
        debug!("Reading molecule-set tree from {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|source| TreeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        content.parse()
    }

    /// Builds the described tree, stamping molecules from `sequence`.
    ///
    /// Molecules are created in document order (depth-first, parents before children),
    /// so their identifiers follow the order in which they appear in the file. Every
    /// set in the tree shares `sequence`.
    ///
    /// # Errors
    ///
    /// Returns an error if a bond refers to a missing atom, bonds an atom to itself,
    /// carries an unparseable order, or repeats an earlier bond with a different order,
    /// or if `orders` and `bonds` differ in length. A repeat with the same order is
    /// dropped with a warning.
    /// On error, identifiers already handed out are not returned to the sequence.
    pub fn build(&self, sequence: Arc<IdSequence>) -> Result<MoleculeSet, TreeError> {
        let mut root = MoleculeSet::with_sequence(sequence);
        populate(&mut root, &self.root)?;

        let counts = root.counts();
        debug!(
            molecules = counts.molecules,
            atoms = counts.atoms,
            bonds = counts.bonds,
            "Built molecule-set tree"
        );
        Ok(root)
    }
}

fn populate(set: &mut MoleculeSet, spec: &SetSpec) -> Result<(), TreeError> {
    set.set_label(spec.label.clone());
    for molecule in &spec.molecules {
        set.create_molecule_with(build_molecule(molecule)?);
    }
    for child_spec in &spec.children {
        populate(set.new_child(), child_spec)?;
    }
    Ok(())
}

fn build_molecule(spec: &MoleculeSpec) -> Result<MolecularStructure, TreeError> {
    let display_name = || spec.name.clone().unwrap_or_else(|| "<unnamed>".to_string());

    let orders = match &spec.orders {
        Some(orders) => {
            if orders.len() != spec.bonds.len() {
                return Err(TreeError::OrderCountMismatch {
                    molecule: display_name(),
                    bonds: spec.bonds.len(),
                    orders: orders.len(),
                });
            }
            orders
                .iter()
                .map(|o| o.parse::<BondOrder>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|source| TreeError::BondOrder {
                    molecule: display_name(),
                    source,
                })?
        }
        None => vec![BondOrder::Single; spec.bonds.len()],
    };

    let mut molecule = MolecularStructure::new();
    let atom_ids: Vec<AtomId> = spec
        .atoms
        .iter()
        .map(|element| molecule.add_atom(Atom::from_element(element)))
        .collect();

    for (&[i, j], order) in spec.bonds.iter().zip(orders) {
        for index in [i, j] {
            if index >= atom_ids.len() {
                return Err(TreeError::AtomIndexOutOfRange {
                    molecule: display_name(),
                    index,
                    atom_count: atom_ids.len(),
                });
            }
        }
        if i == j {
            return Err(TreeError::SelfBond {
                molecule: display_name(),
                index: i,
            });
        }
        if let Some(existing) = molecule.bond_between(atom_ids[i], atom_ids[j]) {
            if existing.order != order {
                return Err(TreeError::ConflictingBondOrder {
                    molecule: display_name(),
                    first: i,
                    second: j,
                    existing: existing.order,
                    repeated: order,
                });
            }
            warn!(
                "Duplicate bond {}-{} in molecule '{}' ignored",
                i,
                j,
                display_name()
            );
            continue;
        }
        molecule.add_bond(atom_ids[i], atom_ids[j], order);
    }

    Ok(molecule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ids::MoleculeId;
    use crate::core::models::molecule::Molecule;
    use crate::core::models::set::Counts;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SOLVATED: &str = r#"
label = "system"

[[molecules]]
name = "methanol"
atoms = ["C", "O", "H", "H", "H", "H"]
bonds = [[0, 1], [0, 2], [0, 3], [0, 4], [1, 5]]

[[children]]
label = "solvent"

[[children.molecules]]
name = "water"
atoms = ["O", "H", "H"]
bonds = [[0, 1], [0, 2]]

[[children.molecules]]
name = "water"
atoms = ["O", "H", "H"]
bonds = [[0, 1], [0, 2]]

[[children.children]]
label = "ions"

[[children.children.molecules]]
atoms = ["Na"]

[[children]]
label = "ligand"

[[children.molecules]]
name = "carbon monoxide"
atoms = ["C", "O"]
bonds = [[0, 1]]
orders = ["triple"]
"#;

    fn fresh() -> Arc<IdSequence> {
        Arc::new(IdSequence::new())
    }

    #[test]
    fn parses_and_builds_nested_tree() {
        let tree: TreeFile = SOLVATED.parse().unwrap();
        let root = tree.build(fresh()).unwrap();

        assert_eq!(root.label(), Some("system"));
        assert_eq!(root.child_count(), 2);
        assert_eq!(root.children()[0].label(), Some("solvent"));
        assert_eq!(root.children()[0].children()[0].label(), Some("ions"));
        assert_eq!(root.counts(), Counts::new(5, 15, 10));
    }

    #[test]
    fn ids_follow_document_order() {
        let tree: TreeFile = SOLVATED.parse().unwrap();
        let sequence = Arc::new(IdSequence::starting_at(100));
        let root = tree.build(sequence.clone()).unwrap();

        let ids: Vec<MoleculeId> = root
            .walk()
            .flat_map(|(_, set)| set.molecules().iter().map(|m| m.id()))
            .collect();
        assert_eq!(ids, (100..105).map(MoleculeId).collect::<Vec<_>>());
        assert_eq!(sequence.peek(), MoleculeId(105));
    }

    #[test]
    fn explicit_orders_are_applied() {
        let tree: TreeFile = SOLVATED.parse().unwrap();
        let root = tree.build(fresh()).unwrap();
        let co = root.children()[1].molecules()[0].molecule();
        assert_eq!(co.bonds()[0].order, BondOrder::Triple);
    }

    #[test]
    fn empty_document_builds_empty_root() {
        let tree: TreeFile = "".parse().unwrap();
        let root = tree.build(fresh()).unwrap();
        assert!(root.is_empty());
        assert!(root.label().is_none());
        assert_eq!(root.counts(), Counts::default());
    }

    #[test]
    fn rejects_out_of_range_atom_index() {
        let tree: TreeFile = "[[molecules]]\nname = \"bad\"\natoms = [\"C\"]\nbonds = [[0, 3]]\n"
            .parse()
            .unwrap();
        let err = tree.build(fresh()).unwrap_err();
        assert!(matches!(
            err,
            TreeError::AtomIndexOutOfRange {
                index: 3,
                atom_count: 1,
                ..
            }
        ));
    }

    #[test]
    fn rejects_self_bonds() {
        let tree: TreeFile = "[[molecules]]\natoms = [\"C\", \"C\"]\nbonds = [[1, 1]]\n"
            .parse()
            .unwrap();
        let err = tree.build(fresh()).unwrap_err();
        assert!(matches!(err, TreeError::SelfBond { index: 1, .. }));
        assert!(err.to_string().contains("<unnamed>"));
    }

    #[test]
    fn rejects_mismatched_order_list() {
        let tree: TreeFile =
            "[[molecules]]\natoms = [\"C\", \"C\"]\nbonds = [[0, 1]]\norders = [\"single\", \"double\"]\n"
                .parse()
                .unwrap();
        let err = tree.build(fresh()).unwrap_err();
        assert!(matches!(
            err,
            TreeError::OrderCountMismatch {
                bonds: 1,
                orders: 2,
                ..
            }
        ));
    }

    #[test]
    fn rejects_invalid_bond_order() {
        let tree: TreeFile =
            "[[molecules]]\nname = \"x\"\natoms = [\"C\", \"C\"]\nbonds = [[0, 1]]\norders = [\"quintuple\"]\n"
                .parse()
                .unwrap();
        let err = tree.build(fresh()).unwrap_err();
        assert!(matches!(err, TreeError::BondOrder { .. }));
        assert!(err.to_string().contains("quintuple"));
    }

    #[test]
    fn duplicate_bonds_are_collapsed() {
        let tree: TreeFile = "[[molecules]]\natoms = [\"H\", \"H\"]\nbonds = [[0, 1], [1, 0]]\n"
            .parse()
            .unwrap();
        let root = tree.build(fresh()).unwrap();
        assert_eq!(root.molecules()[0].molecule().bond_count(), 1);
    }

    #[test]
    fn rejects_repeated_bond_with_different_order() {
        let tree: TreeFile = "[[molecules]]\nname = \"co\"\natoms = [\"C\", \"O\"]\nbonds = [[0, 1], [1, 0]]\norders = [\"double\", \"triple\"]\n"
            .parse()
            .unwrap();
        let err = tree.build(fresh()).unwrap_err();
        assert!(matches!(
            err,
            TreeError::ConflictingBondOrder {
                first: 1,
                second: 0,
                existing: BondOrder::Double,
                repeated: BondOrder::Triple,
                ..
            }
        ));
        assert!(err.to_string().contains("as double and as triple"));
    }

    #[test]
    fn rejects_unknown_fields() {
        let result = "colour = \"blue\"\n".parse::<TreeFile>();
        assert!(matches!(result, Err(TreeError::Toml(_))));
    }

    #[test]
    fn reads_tree_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", SOLVATED).unwrap();

        let tree = TreeFile::read_from_path(file.path()).unwrap();
        assert_eq!(tree.root.children.len(), 2);
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = TreeFile::read_from_path(&path).unwrap_err();
        assert!(matches!(err, TreeError::Io { .. }));
        assert!(err.to_string().contains("absent.toml"));
    }
}
