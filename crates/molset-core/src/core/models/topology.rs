use super::ids::AtomId;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Bond order as written in tree files (`orders = ["single", "double", ...]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondOrder {
    /// The spelling tree files use for this order.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
            Self::Triple => "triple",
            Self::Aromatic => "aromatic",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown bond order '{0}' (expected single, double, triple or aromatic)")]
pub struct ParseBondOrderError(pub String);

impl FromStr for BondOrder {
    type Err = ParseBondOrderError;

    /// Accepts the full names and the numeric shorthands `1`, `2`, `3`, `ar`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "1" => Ok(Self::Single),
            "double" | "2" => Ok(Self::Double),
            "triple" | "3" => Ok(Self::Triple),
            "aromatic" | "ar" => Ok(Self::Aromatic),
            _ => Err(ParseBondOrderError(s.to_string())),
        }
    }
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An undirected bond. The endpoint pair is stored in canonical (sorted) order, so
/// `Bond::new(a, b, ..)` and `Bond::new(b, a, ..)` compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    atoms: [AtomId; 2],
    pub order: BondOrder,
}

impl Bond {
    pub fn new(a: AtomId, b: AtomId, order: BondOrder) -> Self {
        let atoms = if a <= b { [a, b] } else { [b, a] };
        Self { atoms, order }
    }

    pub fn atoms(&self) -> [AtomId; 2] {
        self.atoms
    }

    /// Whether this bond connects `a` and `b`, in either direction.
    pub fn joins(&self, a: AtomId, b: AtomId) -> bool {
        self.atoms == Bond::new(a, b, self.order).atoms
    }
}
