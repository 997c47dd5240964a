use super::element::Element;
use super::ids::ResidueId;
use nalgebra::Point3;
use std::str::FromStr;

/// Tetrahedral chirality label for an atom.
///
/// `Unspecified` is the default for freshly created atoms; `None` marks an
/// atom that is known to be achiral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Chirality {
    R,
    S,
    None,
    #[default]
    Unspecified,
}

impl Chirality {
    pub fn is_chiral(&self) -> bool {
        matches!(self, Chirality::R | Chirality::S)
    }
}

impl FromStr for Chirality {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "r" => Ok(Chirality::R),
            "s" => Ok(Chirality::S),
            "none" | "achiral" => Ok(Chirality::None),
            "unspecified" | "unknown" => Ok(Chirality::Unspecified),
            _ => Err(()),
        }
    }
}

/// An atom in a molecular graph.
///
/// Atoms are owned exclusively by a [`Molecule`](super::molecule::Molecule);
/// connectivity lives on the molecule, not here. Formal charge and fragment
/// membership are derived through molecule queries rather than stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The chemical element of this atom.
    pub element: Element,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// The partial atomic charge in elementary charge units.
    pub partial_charge: f64,
    /// The chirality label, if assigned.
    pub chirality: Chirality,
    /// The residue grouping this atom belongs to, if any.
    pub residue_id: Option<ResidueId>,
}

impl Atom {
    /// Creates a new atom of the given element at the origin, with zero
    /// charges and unspecified chirality.
    pub fn new(element: Element) -> Self {
        Self {
            element,
            position: Point3::origin(),
            partial_charge: 0.0,
            chirality: Chirality::default(),
            residue_id: None,
        }
    }

    pub fn is_hydrogen(&self) -> bool {
        self.element.is_hydrogen()
    }
}
