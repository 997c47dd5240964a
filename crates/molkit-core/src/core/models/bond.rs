use super::ids::AtomId;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The order of a covalent bond.
///
/// Aromatic bonds are a distinct order rather than a flag on single or
/// double bonds; for valence arithmetic they count as 1.5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum BondOrder {
    #[default]
    Single = 1,
    Double = 2,
    Triple = 3,
    Aromatic = 4,
}

impl BondOrder {
    /// Numeric contribution of this bond to an atom's valence.
    pub fn as_f64(&self) -> f64 {
        match self {
            BondOrder::Single => 1.0,
            BondOrder::Double => 2.0,
            BondOrder::Triple => 3.0,
            BondOrder::Aromatic => 1.5,
        }
    }

    /// The integer encoding used by connection-table style formats
    /// (1-3 for fixed orders, 4 for aromatic).
    pub fn encoding(&self) -> u8 {
        *self as u8
    }

    pub fn from_encoding(value: u8) -> Option<Self> {
        match value {
            1 => Some(BondOrder::Single),
            2 => Some(BondOrder::Double),
            3 => Some(BondOrder::Triple),
            4 => Some(BondOrder::Aromatic),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid bond order string")]
pub struct ParseBondOrderError;

impl FromStr for BondOrder {
    type Err = ParseBondOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1" | "s" | "single" => Ok(Self::Single),
            "2" | "d" | "double" => Ok(Self::Double),
            "3" | "t" | "triple" => Ok(Self::Triple),
            "4" | "ar" | "aromatic" => Ok(Self::Aromatic),
            _ => Err(ParseBondOrderError),
        }
    }
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Single => "Single",
                Self::Double => "Double",
                Self::Triple => "Triple",
                Self::Aromatic => "Aromatic",
            }
        )
    }
}

/// A bond between two atoms of the same molecule.
///
/// The endpoint pair is unordered; `other` resolves the partner of either
/// endpoint. Bonds never duplicate atom data, they only reference ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub atom1_id: AtomId,
    pub atom2_id: AtomId,
    pub order: BondOrder,
}

impl Bond {
    pub fn new(atom1_id: AtomId, atom2_id: AtomId, order: BondOrder) -> Self {
        Self {
            atom1_id,
            atom2_id,
            order,
        }
    }

    pub fn contains(&self, atom_id: AtomId) -> bool {
        self.atom1_id == atom_id || self.atom2_id == atom_id
    }

    /// Returns the endpoint opposite to `atom_id`, or `None` if `atom_id`
    /// is not an endpoint of this bond.
    pub fn other(&self, atom_id: AtomId) -> Option<AtomId> {
        if atom_id == self.atom1_id {
            Some(self.atom2_id)
        } else if atom_id == self.atom2_id {
            Some(self.atom1_id)
        } else {
            None
        }
    }

    pub fn is_aromatic(&self) -> bool {
        self.order == BondOrder::Aromatic
    }
}
