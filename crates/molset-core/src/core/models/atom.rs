/// Represents an atom held by a [`MolecularStructure`](super::molecule::MolecularStructure).
///
/// Only identity is tracked here. Coordinates, charges and force-field data belong to
/// whatever chemistry layer hosts the molecule set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Atom {
    /// The name of the atom (e.g., "O1", "CA").
    pub name: String,
    /// The element symbol (e.g., "O", "C").
    pub element: String,
}

impl Atom {
    /// Creates a new `Atom`.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the atom.
    /// * `element` - The element symbol of the atom.
    pub fn new(name: &str, element: &str) -> Self {
        Self {
            name: name.to_string(),
            element: element.to_string(),
        }
    }

    /// Creates an atom named after its element symbol.
    pub fn from_element(element: &str) -> Self {
        Self::new(element, element)
    }
}
