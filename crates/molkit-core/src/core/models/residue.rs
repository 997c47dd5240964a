use super::ids::AtomId;

/// A named grouping of atoms within a molecule (e.g. an amino acid in a
/// polymer, or a ligand in a complex).
///
/// Residues are bookkeeping only: they do not own atoms and carry no
/// topology. Membership is mirrored on each atom's `residue_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    /// Residue sequence number from the source data.
    pub number: isize,
    /// Name of the residue (e.g. "ALA", "HOH", "LIG").
    pub name: String,
    pub(crate) atoms: Vec<AtomId>,
}

impl Residue {
    pub(crate) fn new(number: isize, name: &str) -> Self {
        Self {
            number,
            name: name.to_string(),
            atoms: Vec::new(),
        }
    }

    /// The atoms assigned to this residue, in assignment order.
    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    pub fn contains(&self, atom_id: AtomId) -> bool {
        self.atoms.contains(&atom_id)
    }
}
