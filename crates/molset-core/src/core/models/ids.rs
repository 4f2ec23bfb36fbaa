use slotmap::new_key_type;
use std::fmt;

new_key_type! {
    pub struct AtomId;
}

/// Identifier stamped on a molecule when a [`MoleculeSet`](super::set::MoleculeSet) creates it.
///
/// Values come from an [`IdSequence`](super::sequence::IdSequence) and are never reused
/// within the lifetime of that sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct MoleculeId(pub u64);

impl MoleculeId {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for MoleculeId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for MoleculeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
