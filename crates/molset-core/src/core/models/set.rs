use super::ids::MoleculeId;
use super::molecule::{MolecularStructure, Molecule};
use super::sequence::IdSequence;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::sync::Arc;
use tracing::{debug, trace};

/// Aggregate totals over the molecules of a set tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Counts {
    pub molecules: usize,
    pub atoms: usize,
    pub bonds: usize,
}

impl Counts {
    pub fn new(molecules: usize, atoms: usize, bonds: usize) -> Self {
        Self {
            molecules,
            atoms,
            bonds,
        }
    }
}

impl Add for Counts {
    type Output = Counts;

    fn add(self, rhs: Counts) -> Counts {
        Counts {
            molecules: self.molecules + rhs.molecules,
            atoms: self.atoms + rhs.atoms,
            bonds: self.bonds + rhs.bonds,
        }
    }
}

impl AddAssign for Counts {
    fn add_assign(&mut self, rhs: Counts) {
        *self = *self + rhs;
    }
}

impl Sum for Counts {
    fn sum<I: Iterator<Item = Counts>>(iter: I) -> Self {
        iter.fold(Counts::default(), Add::add)
    }
}

impl fmt::Display for Counts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} molecules, {} atoms, {} bonds",
            self.molecules, self.atoms, self.bonds
        )
    }
}

/// A molecule together with the identifier its set stamped on it at creation time.
///
/// The identifier is attached alongside the molecule rather than stored inside it, so any
/// [`Molecule`] implementation can be grouped without knowing about identifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct StampedMolecule<M> {
    id: MoleculeId,
    molecule: M,
}

impl<M> StampedMolecule<M> {
    pub fn id(&self) -> MoleculeId {
        self.id
    }

    pub fn molecule(&self) -> &M {
        &self.molecule
    }

    pub fn molecule_mut(&mut self) -> &mut M {
        &mut self.molecule
    }
}

/// A node in a tree of molecule collections.
///
/// Each set owns an ordered list of molecules and an ordered list of child sets. Ownership
/// is exclusive: a child belongs to exactly one parent, and dropping a set releases its
/// whole subtree together with every molecule in it. Molecules created through a set are
/// stamped with the next value of the set's [`IdSequence`].
#[derive(Debug)]
pub struct MoleculeSet<M = MolecularStructure> {
    /// Optional human-readable name, used when reporting.
    label: Option<String>,
    /// Molecules owned directly by this set, in creation order.
    molecules: Vec<StampedMolecule<M>>,
    /// Child sets, in insertion order.
    children: Vec<MoleculeSet<M>>,
    /// Generator shared with every set created through [`new_child`](Self::new_child).
    sequence: Arc<IdSequence>,
}

impl<M: Molecule> Default for MoleculeSet<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Molecule> MoleculeSet<M> {
    /// Creates an empty set drawing identifiers from the process-wide [`IdSequence::global`].
    pub fn new() -> Self {
        Self::with_sequence(IdSequence::global())
    }

    /// Creates an empty set drawing identifiers from `sequence`.
    ///
    /// Sets that must not share identifier state with the rest of the process (tests,
    /// independent documents) should be built this way.
    pub fn with_sequence(sequence: Arc<IdSequence>) -> Self {
        Self {
            label: None,
            molecules: Vec::new(),
            children: Vec::new(),
            sequence,
        }
    }

    /// Sets the label, builder-style.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn set_label(&mut self, label: Option<String>) {
        self.label = label;
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn sequence(&self) -> &Arc<IdSequence> {
        &self.sequence
    }

    /// Creates a default molecule, stamps it and appends it to this set.
    ///
    /// The molecule receives the sequence's current value, after which the sequence
    /// advances by one. Ownership stays with the set; the returned reference is a handle
    /// for populating the new molecule.
    pub fn create_molecule(&mut self) -> &mut StampedMolecule<M>
    where
        M: Default,
    {
        self.create_molecule_with(M::default())
    }

    /// Stamps an already-built molecule and appends it to this set.
    pub fn create_molecule_with(&mut self, molecule: M) -> &mut StampedMolecule<M> {
        let id = self.sequence.next_id();
        trace!(molecule_id = %id, "Stamped new molecule");

        let index = self.molecules.len();
        self.molecules.push(StampedMolecule { id, molecule });
        &mut self.molecules[index]
    }

    /// Number of molecules owned directly by this set (descendants excluded).
    pub fn molecule_count(&self) -> usize {
        self.molecules.len()
    }

    pub fn molecules(&self) -> &[StampedMolecule<M>] {
        &self.molecules
    }

    /// Looks up a molecule owned directly by this set.
    pub fn molecule(&self, id: MoleculeId) -> Option<&StampedMolecule<M>> {
        self.molecules.iter().find(|m| m.id == id)
    }

    pub fn molecule_mut(&mut self, id: MoleculeId) -> Option<&mut StampedMolecule<M>> {
        self.molecules.iter_mut().find(|m| m.id == id)
    }

    /// Looks up a molecule anywhere in this subtree, in [`walk`](Self::walk) order.
    pub fn find_molecule(&self, id: MoleculeId) -> Option<&StampedMolecule<M>> {
        self.walk().find_map(|(_, set)| set.molecule(id))
    }

    pub fn children(&self) -> &[MoleculeSet<M>] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [MoleculeSet<M>] {
        &mut self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Attaches `child` as the last child of this set and returns a handle to it.
    ///
    /// The child keeps its own identifier sequence.
    pub fn add_child(&mut self, child: MoleculeSet<M>) -> &mut MoleculeSet<M> {
        let index = self.children.len();
        self.children.push(child);
        &mut self.children[index]
    }

    /// Creates an empty child sharing this set's identifier sequence.
    pub fn new_child(&mut self) -> &mut MoleculeSet<M> {
        let child = MoleculeSet::with_sequence(Arc::clone(&self.sequence));
        self.add_child(child)
    }

    /// Detaches the child at `index`, handing its subtree to the caller.
    ///
    /// Returns `None` if `index` is out of bounds.
    pub fn remove_child(&mut self, index: usize) -> Option<MoleculeSet<M>> {
        if index >= self.children.len() {
            return None;
        }
        let child = self.children.remove(index);
        debug!(
            index,
            label = child.label().unwrap_or_default(),
            "Detached child set"
        );
        Some(child)
    }

    /// Whether this set has neither molecules nor children.
    pub fn is_empty(&self) -> bool {
        self.molecules.is_empty() && self.children.is_empty()
    }

    /// Totals over the molecules owned directly by this set.
    pub fn local_counts(&self) -> Counts {
        self.molecules.iter().fold(
            Counts::new(self.molecules.len(), 0, 0),
            |mut acc, stamped| {
                acc.atoms += stamped.molecule.atom_count();
                acc.bonds += stamped.molecule.bond_count();
                acc
            },
        )
    }

    /// Totals over this set and all of its descendants.
    ///
    /// Visits the subtree depth-first in pre-order, children in insertion order, adding
    /// each node's molecule count and the atom and bond counts of its molecules. An empty
    /// tree yields all zeros.
    pub fn counts(&self) -> Counts {
        self.walk().map(|(_, set)| set.local_counts()).sum()
    }

    /// Depth-first pre-order iterator over this subtree, yielding `(depth, set)` pairs.
    ///
    /// The set the walk starts from has depth `0`; children are visited in insertion
    /// order. Uses an explicit stack, so arbitrarily deep trees are fine.
    pub fn walk(&self) -> Walk<'_, M> {
        Walk {
            stack: vec![(0, self)],
        }
    }

    /// Same order as [`walk`](Self::walk), with each set's subtree totals attached.
    ///
    /// All totals come from a single bottom-up pass over the walk, so every molecule is
    /// counted once regardless of tree depth.
    pub fn walk_with_counts(&self) -> Vec<(usize, &MoleculeSet<M>, Counts)> {
        let visited: Vec<(usize, &MoleculeSet<M>)> = self.walk().collect();
        let mut totals = vec![Counts::default(); visited.len()];
        // (depth, total) of subtrees already folded, in reverse pre-order.
        let mut folded: Vec<(usize, Counts)> = Vec::new();

        for (index, &(depth, set)) in visited.iter().enumerate().rev() {
            let mut total = set.local_counts();
            while let Some(&(child_depth, child_total)) = folded.last() {
                if child_depth != depth + 1 {
                    break;
                }
                total += child_total;
                folded.pop();
            }
            folded.push((depth, total));
            totals[index] = total;
        }

        visited
            .into_iter()
            .zip(totals)
            .map(|((depth, set), total)| (depth, set, total))
            .collect()
    }
}

impl<M> Drop for MoleculeSet<M> {
    fn drop(&mut self) {
        // Flatten the subtree so that dropping a deep chain does not recurse.
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut set) = pending.pop() {
            pending.append(&mut set.children);
        }
    }
}

/// Iterator returned by [`MoleculeSet::walk`].
pub struct Walk<'a, M> {
    stack: Vec<(usize, &'a MoleculeSet<M>)>,
}

impl<'a, M> Iterator for Walk<'a, M> {
    type Item = (usize, &'a MoleculeSet<M>);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, set) = self.stack.pop()?;
        self.stack
            .extend(set.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, set))
    }
}
