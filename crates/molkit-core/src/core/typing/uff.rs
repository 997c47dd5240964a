use super::rules::TypingRules;
use super::{AtomTyper, TypingError};
use crate::core::graph::rings;
use crate::core::models::bond::BondOrder;
use crate::core::models::ids::AtomId;
use crate::core::models::molecule::Molecule;
use phf::{Map, phf_map};
use slotmap::SecondaryMap;

/// Labels for elements whose UFF type does not depend on coordination.
static FIXED_TYPES: Map<&'static str, &'static str> = phf_map! {
    "F" => "F_", "Cl" => "Cl", "Br" => "Br", "I" => "I_",
    "Li" => "Li", "Na" => "Na", "K" => "K_", "Rb" => "Rb",
    "Mg" => "Mg3+2", "Ca" => "Ca6+2", "Zn" => "Zn3+2",
    "Al" => "Al3", "Si" => "Si3", "Ga" => "Ga3+3", "Ge" => "Ge3",
    "As" => "As3+3", "Se" => "Se3+2",
    "Fe" => "Fe3+2", "Ni" => "Ni4+2", "Cu" => "Cu3+1",
    "He" => "He4+4", "Ne" => "Ne4+4", "Ar" => "Ar4+4",
    "Kr" => "Kr4+4", "Xe" => "Xe4+4",
};

/// Summary of an atom's bonding environment, gathered once per atom.
struct BondProfile {
    doubles: usize,
    triples: usize,
    has_aromatic: bool,
}

/// UFF-style atom typer.
///
/// Labels follow the Universal Force Field convention: element symbol plus
/// a hybridization digit ("C_3", "N_2") or "R" for resonant/aromatic ring
/// members, with oxidation suffixes where the force field distinguishes
/// them ("S_3+6"). Hybridization is inferred from bond orders, neighbor
/// counts, and perceived ring aromaticity; no geometry is consulted.
#[derive(Debug, Default)]
pub struct UffAtomTyper {
    overrides: Option<TypingRules>,
    types: SecondaryMap<AtomId, String>,
    assigned: bool,
}

impl UffAtomTyper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a typer that consults the given override rules before the
    /// built-in assignment logic.
    pub fn with_rules(overrides: TypingRules) -> Self {
        Self {
            overrides: Some(overrides),
            ..Self::default()
        }
    }

    fn bond_profile(molecule: &Molecule, atom_id: AtomId) -> BondProfile {
        let mut profile = BondProfile {
            doubles: 0,
            triples: 0,
            has_aromatic: false,
        };
        for bond_id in molecule.bonds_of(atom_id) {
            match molecule.bond(bond_id).map(|b| b.order) {
                Some(BondOrder::Double) => profile.doubles += 1,
                Some(BondOrder::Triple) => profile.triples += 1,
                Some(BondOrder::Aromatic) => profile.has_aromatic = true,
                _ => {}
            }
        }
        profile
    }

    fn atom_type(
        &self,
        molecule: &Molecule,
        atom_id: AtomId,
        aromatic: bool,
    ) -> Result<String, TypingError> {
        let symbol = molecule
            .atom(atom_id)
            .map(|a| a.element.symbol())
            .ok_or(TypingError::AtomNotFound(atom_id))?;
        let neighbors = molecule.neighbor_count(atom_id);

        if let Some(overrides) = &self.overrides {
            if let Some(label) = overrides.match_label(symbol, neighbors, aromatic) {
                return Ok(label.to_string());
            }
        }

        if let Some(&label) = FIXED_TYPES.get(symbol) {
            return Ok(label.to_string());
        }

        let profile = Self::bond_profile(molecule, atom_id);
        let resonant = aromatic || profile.has_aromatic;
        let label = match symbol {
            "H" => {
                let boron_neighbors = molecule
                    .neighbors(atom_id)
                    .filter(|&n| {
                        molecule
                            .atom(n)
                            .is_some_and(|a| a.element.symbol() == "B")
                    })
                    .count();
                if boron_neighbors >= 2 { "H_b" } else { "H_" }
            }
            "B" => {
                if neighbors >= 4 {
                    "B_3"
                } else {
                    "B_2"
                }
            }
            "C" => {
                if resonant {
                    "C_R"
                } else if profile.triples >= 1 || profile.doubles >= 2 {
                    "C_1"
                } else if profile.doubles == 1 {
                    "C_2"
                } else {
                    "C_3"
                }
            }
            "N" => {
                if resonant {
                    "N_R"
                } else if profile.triples >= 1 {
                    "N_1"
                } else if profile.doubles >= 1 {
                    "N_2"
                } else {
                    "N_3"
                }
            }
            "O" => {
                if resonant {
                    "O_R"
                } else if profile.doubles >= 1 {
                    "O_2"
                } else {
                    "O_3"
                }
            }
            "P" => {
                if neighbors >= 4 || profile.doubles >= 1 {
                    "P_3+5"
                } else {
                    "P_3+3"
                }
            }
            "S" => {
                if resonant {
                    "S_R"
                } else if profile.doubles >= 2 {
                    "S_3+6"
                } else if profile.doubles == 1 {
                    if neighbors >= 3 { "S_3+4" } else { "S_2" }
                } else {
                    "S_3+2"
                }
            }
            _ => return Err(TypingError::UnsupportedElement(symbol.to_string())),
        };
        Ok(label.to_string())
    }
}

impl AtomTyper for UffAtomTyper {
    fn name(&self) -> &'static str {
        "uff"
    }

    fn assign(&mut self, molecule: &Molecule) -> Result<(), TypingError> {
        let mut aromatic: SecondaryMap<AtomId, ()> = SecondaryMap::new();
        for ring in rings::perceive_sssr(molecule) {
            if ring.is_aromatic() {
                for &atom_id in ring.atoms() {
                    aromatic.insert(atom_id, ());
                }
            }
        }

        let mut types = SecondaryMap::new();
        for (atom_id, _) in molecule.atoms_iter() {
            let label = self.atom_type(molecule, atom_id, aromatic.contains_key(atom_id))?;
            types.insert(atom_id, label);
        }

        // Commit only after every atom classified.
        self.types = types;
        self.assigned = true;
        Ok(())
    }

    fn type_of(&self, atom_id: AtomId) -> Result<&str, TypingError> {
        if !self.assigned {
            return Err(TypingError::NotAssigned);
        }
        self.types
            .get(atom_id)
            .map(String::as_str)
            .ok_or(TypingError::AtomNotFound(atom_id))
    }
}
