use crate::core::models::ids::{AtomId, BondId};
use crate::core::models::molecule::Molecule;
use slotmap::SecondaryMap;
use std::collections::VecDeque;

/// One step of a reconstructed path: the atom reached and the bond used to
/// reach it (`None` for the starting atom).
type Step = (AtomId, Option<BondId>);

/// Breadth-first shortest path between two atoms, bounded by `max_depth`
/// bonds when given.
///
/// Ties are broken by traversal order, which follows the molecule's bond
/// insertion order and is therefore deterministic. Returns `None` when
/// either id is unknown or no path exists within the bound; disconnected
/// fragments are an expected graph state, not an error.
fn shortest_path(
    molecule: &Molecule,
    from: AtomId,
    to: AtomId,
    max_depth: Option<usize>,
) -> Option<Vec<Step>> {
    if !molecule.contains_atom(from) || !molecule.contains_atom(to) {
        return None;
    }
    if from == to {
        return Some(vec![(from, None)]);
    }

    let mut parent: SecondaryMap<AtomId, (AtomId, BondId)> = SecondaryMap::new();
    let mut depth: SecondaryMap<AtomId, usize> = SecondaryMap::new();
    let mut queue = VecDeque::new();
    depth.insert(from, 0);
    queue.push_back(from);

    while let Some(current) = queue.pop_front() {
        let current_depth = depth[current];
        if max_depth.is_some_and(|max| current_depth >= max) {
            continue;
        }
        for &(neighbor, bond_id) in molecule.adjacency(current).unwrap_or(&[]) {
            if depth.contains_key(neighbor) {
                continue;
            }
            depth.insert(neighbor, current_depth + 1);
            parent.insert(neighbor, (current, bond_id));
            if neighbor == to {
                let mut steps: Vec<Step> = Vec::new();
                let mut node = to;
                while node != from {
                    let (previous, via) = parent[node];
                    steps.push((node, Some(via)));
                    node = previous;
                }
                steps.push((from, None));
                steps.reverse();
                return Some(steps);
            }
            queue.push_back(neighbor);
        }
    }

    None
}

/// Shortest path as an atom sequence, both endpoints included.
pub fn atom_path(molecule: &Molecule, from: AtomId, to: AtomId) -> Option<Vec<AtomId>> {
    shortest_path(molecule, from, to, None)
        .map(|steps| steps.into_iter().map(|(atom, _)| atom).collect())
}

/// Shortest path as the sequence of traversed bonds.
pub fn bond_path(molecule: &Molecule, from: AtomId, to: AtomId) -> Option<Vec<BondId>> {
    shortest_path(molecule, from, to, None)
        .map(|steps| steps.into_iter().filter_map(|(_, bond)| bond).collect())
}

/// Number of atoms on the shortest path (endpoints included), searching at
/// most `max_depth` bonds deep when given.
pub fn atom_count(
    molecule: &Molecule,
    from: AtomId,
    to: AtomId,
    max_depth: Option<usize>,
) -> Option<usize> {
    shortest_path(molecule, from, to, max_depth).map(|steps| steps.len())
}

/// Number of bonds on the shortest path, searching at most `max_depth`
/// bonds deep when given.
pub fn bond_count(
    molecule: &Molecule,
    from: AtomId,
    to: AtomId,
    max_depth: Option<usize>,
) -> Option<usize> {
    shortest_path(molecule, from, to, max_depth).map(|steps| steps.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::bond::BondOrder;
    use crate::core::models::element::Element;

    fn carbon() -> Element {
        Element::from_symbol("C").unwrap()
    }

    fn chain(length: usize) -> (Molecule, Vec<AtomId>) {
        let mut molecule = Molecule::new();
        let atoms: Vec<AtomId> = (0..length).map(|_| molecule.add_atom(carbon())).collect();
        for pair in atoms.windows(2) {
            molecule.add_bond(pair[0], pair[1], BondOrder::Single).unwrap();
        }
        (molecule, atoms)
    }

    #[test]
    fn path_along_a_chain() {
        let (molecule, atoms) = chain(3);
        let path = atom_path(&molecule, atoms[0], atoms[2]).unwrap();
        assert_eq!(path, vec![atoms[0], atoms[1], atoms[2]]);

        let bonds = bond_path(&molecule, atoms[0], atoms[2]).unwrap();
        assert_eq!(bonds.len(), 2);
        assert_eq!(
            bonds[0],
            molecule.bond_between(atoms[0], atoms[1]).unwrap()
        );
        assert_eq!(
            bonds[1],
            molecule.bond_between(atoms[1], atoms[2]).unwrap()
        );
    }

    #[test]
    fn path_to_self_is_a_single_atom() {
        let (molecule, atoms) = chain(2);
        assert_eq!(atom_path(&molecule, atoms[0], atoms[0]), Some(vec![atoms[0]]));
        assert_eq!(bond_path(&molecule, atoms[0], atoms[0]), Some(Vec::new()));
        assert_eq!(bond_count(&molecule, atoms[0], atoms[0], None), Some(0));
        assert_eq!(atom_count(&molecule, atoms[0], atoms[0], None), Some(1));
    }

    #[test]
    fn unreachable_targets_yield_none_not_errors() {
        let mut molecule = Molecule::new();
        let a = molecule.add_atom(carbon());
        let b = molecule.add_atom(carbon());

        assert_eq!(atom_path(&molecule, a, b), None);
        assert_eq!(bond_path(&molecule, a, b), None);
        assert_eq!(bond_count(&molecule, a, b, None), None);
    }

    #[test]
    fn unknown_ids_yield_none() {
        let mut molecule = Molecule::new();
        let a = molecule.add_atom(carbon());
        let stale = molecule.add_atom(carbon());
        molecule.remove_atom(stale).unwrap();

        assert_eq!(atom_path(&molecule, a, stale), None);
        assert_eq!(atom_path(&molecule, stale, a), None);
    }

    #[test]
    fn depth_bound_cuts_off_long_paths() {
        let (molecule, atoms) = chain(5);
        assert_eq!(bond_count(&molecule, atoms[0], atoms[4], None), Some(4));
        assert_eq!(bond_count(&molecule, atoms[0], atoms[4], Some(4)), Some(4));
        assert_eq!(bond_count(&molecule, atoms[0], atoms[4], Some(3)), None);
        assert_eq!(atom_count(&molecule, atoms[0], atoms[4], Some(2)), None);
    }

    #[test]
    fn ring_paths_take_the_shorter_arc() {
        let mut molecule = Molecule::new();
        let atoms: Vec<AtomId> = (0..6).map(|_| molecule.add_atom(carbon())).collect();
        for i in 0..6 {
            molecule
                .add_bond(atoms[i], atoms[(i + 1) % 6], BondOrder::Single)
                .unwrap();
        }

        assert_eq!(bond_count(&molecule, atoms[0], atoms[2], None), Some(2));
        assert_eq!(bond_count(&molecule, atoms[0], atoms[5], None), Some(1));
        assert_eq!(bond_count(&molecule, atoms[0], atoms[3], None), Some(3));
    }

    #[test]
    fn branched_paths_are_deterministic() {
        // Diamond: a-b-d and a-c-d are both length 2; BFS must pick the
        // branch through the earlier-inserted bond every time.
        let mut molecule = Molecule::new();
        let a = molecule.add_atom(carbon());
        let b = molecule.add_atom(carbon());
        let c = molecule.add_atom(carbon());
        let d = molecule.add_atom(carbon());
        molecule.add_bond(a, b, BondOrder::Single).unwrap();
        molecule.add_bond(a, c, BondOrder::Single).unwrap();
        molecule.add_bond(b, d, BondOrder::Single).unwrap();
        molecule.add_bond(c, d, BondOrder::Single).unwrap();

        let first = atom_path(&molecule, a, d).unwrap();
        for _ in 0..5 {
            assert_eq!(atom_path(&molecule, a, d).unwrap(), first);
        }
        assert_eq!(first, vec![a, b, d]);
    }
}
