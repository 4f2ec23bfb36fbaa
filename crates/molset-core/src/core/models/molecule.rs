use super::atom::Atom;
use super::ids::AtomId;
use super::topology::{Bond, BondOrder};
use slotmap::{SecondaryMap, SlotMap};

/// The capability a molecule must offer to be grouped in a [`MoleculeSet`](super::set::MoleculeSet).
///
/// Sets only ever ask a molecule how large it is; the representation behind these
/// counts (graph, coordinates, file-backed handle, ...) stays opaque to them.
pub trait Molecule {
    /// Number of atoms in the molecule.
    fn atom_count(&self) -> usize;

    /// Number of bonds in the molecule.
    fn bond_count(&self) -> usize;
}

impl<M: Molecule + ?Sized> Molecule for Box<M> {
    fn atom_count(&self) -> usize {
        (**self).atom_count()
    }

    fn bond_count(&self) -> usize {
        (**self).bond_count()
    }
}

/// A minimal molecular graph: atoms connected by bonds.
///
/// This is the default molecule type used by [`MoleculeSet`](super::set::MoleculeSet).
/// Atoms are stored in a slot map so that their IDs stay stable, and a bond adjacency
/// cache is maintained alongside the bond list.
#[derive(Debug, Clone, Default)]
pub struct MolecularStructure {
    /// Primary storage for atoms using a slot map for stable ID management.
    atoms: SlotMap<AtomId, Atom>,
    /// List of all bonds in the molecule.
    bonds: Vec<Bond>,
    /// Cached adjacency list for bond connectivity, indexed by atom ID.
    bond_adjacency: SecondaryMap<AtomId, Vec<AtomId>>,
}

impl MolecularStructure {
    /// Creates a new, empty molecular structure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieves an immutable reference to an atom by its ID.
    ///
    /// # Arguments
    ///
    /// * `id` - The atom ID to look up.
    ///
    /// # Return
    ///
    /// Returns `Some(&Atom)` if the atom exists, otherwise `None`.
    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    /// Returns an iterator over all atoms, yielding `(AtomId, &Atom)` pairs.
    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter()
    }

    /// Returns a slice of all bonds in the molecule.
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Adds an atom and returns its ID.
    pub fn add_atom(&mut self, atom: Atom) -> AtomId {
        let atom_id = self.atoms.insert(atom);
        self.bond_adjacency.insert(atom_id, Vec::new());
        atom_id
    }

    /// Adds a bond between two atoms.
    ///
    /// This method is idempotent; adding an existing bond succeeds without creating
    /// a duplicate and leaves the original bond order untouched.
    ///
    /// # Arguments
    ///
    /// * `atom1_id` - ID of the first atom.
    /// * `atom2_id` - ID of the second atom.
    /// * `order` - The order of the bond.
    ///
    /// # Return
    ///
    /// Returns `Some(())` if successful, otherwise `None` (if either atom does not
    /// exist, or both IDs name the same atom).
    pub fn add_bond(&mut self, atom1_id: AtomId, atom2_id: AtomId, order: BondOrder) -> Option<()> {
        if atom1_id == atom2_id
            || !self.atoms.contains_key(atom1_id)
            || !self.atoms.contains_key(atom2_id)
        {
            return None;
        }

        if self.has_bond(atom1_id, atom2_id) {
            return Some(());
        }

        self.bonds.push(Bond::new(atom1_id, atom2_id, order));
        self.bond_adjacency[atom1_id].push(atom2_id);
        self.bond_adjacency[atom2_id].push(atom1_id);
        Some(())
    }

    /// Whether a bond between the two atoms already exists, in either direction.
    pub fn has_bond(&self, atom1_id: AtomId, atom2_id: AtomId) -> bool {
        self.bond_adjacency
            .get(atom1_id)
            .is_some_and(|neighbors| neighbors.contains(&atom2_id))
    }

    /// The bond connecting two atoms, if there is one.
    pub fn bond_between(&self, atom1_id: AtomId, atom2_id: AtomId) -> Option<&Bond> {
        if !self.has_bond(atom1_id, atom2_id) {
            return None;
        }
        self.bonds.iter().find(|bond| bond.joins(atom1_id, atom2_id))
    }

    /// Retrieves the bonded neighbors of an atom.
    ///
    /// Returns `Some(&[AtomId])` if the atom exists, otherwise `None`.
    pub fn bonded_neighbors(&self, atom_id: AtomId) -> Option<&[AtomId]> {
        self.bond_adjacency.get(atom_id).map(|v| v.as_slice())
    }
}

impl Molecule for MolecularStructure {
    fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    fn bond_count(&self) -> usize {
        self.bonds.len()
    }
}
