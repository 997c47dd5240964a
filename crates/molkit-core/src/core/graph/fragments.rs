use crate::core::models::ids::AtomId;
use crate::core::models::molecule::Molecule;
use slotmap::SecondaryMap;
use std::collections::VecDeque;

/// A maximal connected subgraph of a molecule.
///
/// Fragments are derived values: they hold atom ids, not atoms, and become
/// stale once the molecule's topology changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    atoms: Vec<AtomId>,
}

impl Fragment {
    /// The member atoms, in breadth-first discovery order from the
    /// fragment's first-inserted atom.
    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn contains(&self, atom_id: AtomId) -> bool {
        self.atoms.contains(&atom_id)
    }
}

/// Partitions the molecule into connected components via flood fill.
///
/// Every atom lands in exactly one fragment; atoms with no bonds form
/// singleton fragments. Fragments are ordered by their earliest-inserted
/// atom, so the partition is deterministic for a given molecule.
pub fn connected_components(molecule: &Molecule) -> Vec<Fragment> {
    let mut visited: SecondaryMap<AtomId, ()> = SecondaryMap::new();
    let mut fragments = Vec::new();

    for &start in molecule.atom_ids() {
        if visited.contains_key(start) {
            continue;
        }

        let mut atoms = Vec::new();
        let mut queue = VecDeque::new();
        visited.insert(start, ());
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            atoms.push(current);
            for neighbor in molecule.neighbors(current) {
                if !visited.contains_key(neighbor) {
                    visited.insert(neighbor, ());
                    queue.push_back(neighbor);
                }
            }
        }

        fragments.push(Fragment { atoms });
    }

    fragments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::bond::BondOrder;
    use crate::core::models::element::Element;

    fn carbon() -> Element {
        Element::from_symbol("C").unwrap()
    }

    fn sodium() -> Element {
        Element::from_symbol("Na").unwrap()
    }

    #[test]
    fn empty_molecule_has_no_fragments() {
        let molecule = Molecule::new();
        assert!(connected_components(&molecule).is_empty());
    }

    #[test]
    fn connected_chain_is_one_fragment() {
        let mut molecule = Molecule::new();
        let atoms: Vec<AtomId> = (0..4).map(|_| molecule.add_atom(carbon())).collect();
        for pair in atoms.windows(2) {
            molecule.add_bond(pair[0], pair[1], BondOrder::Single).unwrap();
        }

        let fragments = connected_components(&molecule);
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].atom_count(), 4);
    }

    #[test]
    fn salt_and_counter_ion_are_separate_fragments() {
        let mut molecule = Molecule::new();
        let c1 = molecule.add_atom(carbon());
        let c2 = molecule.add_atom(carbon());
        molecule.add_bond(c1, c2, BondOrder::Single).unwrap();
        let na = molecule.add_atom(sodium());

        let fragments = connected_components(&molecule);
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].atoms(), &[c1, c2]);
        assert_eq!(fragments[1].atoms(), &[na]);
    }

    #[test]
    fn every_atom_belongs_to_exactly_one_fragment() {
        let mut molecule = Molecule::new();
        let a = molecule.add_atom(carbon());
        let b = molecule.add_atom(carbon());
        let c = molecule.add_atom(carbon());
        let d = molecule.add_atom(carbon());
        molecule.add_bond(a, b, BondOrder::Single).unwrap();
        molecule.add_bond(c, d, BondOrder::Single).unwrap();

        let fragments = connected_components(&molecule);
        let mut seen = 0;
        for &atom_id in molecule.atom_ids() {
            let containing = fragments.iter().filter(|f| f.contains(atom_id)).count();
            assert_eq!(containing, 1);
            seen += 1;
        }
        assert_eq!(seen, 4);
    }

    #[test]
    fn bondless_atoms_form_singletons() {
        let mut molecule = Molecule::new();
        for _ in 0..3 {
            molecule.add_atom(sodium());
        }
        let fragments = connected_components(&molecule);
        assert_eq!(fragments.len(), 3);
        assert!(fragments.iter().all(|f| f.atom_count() == 1));
    }
}
