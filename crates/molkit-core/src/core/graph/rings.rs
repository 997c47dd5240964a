use crate::core::models::bond::BondOrder;
use crate::core::models::ids::{AtomId, BondId};
use crate::core::models::molecule::Molecule;
use slotmap::SecondaryMap;
use std::collections::VecDeque;

/// An elementary cycle of a molecule, produced by SSSR perception.
///
/// `atoms` is the cycle in traversal order starting at the member with the
/// lowest insertion index; `bonds[i]` connects `atoms[i]` to
/// `atoms[(i + 1) % size]`. Rings are derived values and become stale once
/// the molecule's topology changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ring {
    atoms: Vec<AtomId>,
    bonds: Vec<BondId>,
    aromatic: bool,
}

impl Ring {
    pub fn size(&self) -> usize {
        self.atoms.len()
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    pub fn bonds(&self) -> &[BondId] {
        &self.bonds
    }

    pub fn contains_atom(&self, atom_id: AtomId) -> bool {
        self.atoms.contains(&atom_id)
    }

    pub fn contains_bond(&self, bond_id: BondId) -> bool {
        self.bonds.contains(&bond_id)
    }

    /// Whether the ring was perceived as aromatic (see
    /// [`perceive_sssr`] for the criteria).
    pub fn is_aromatic(&self) -> bool {
        self.aromatic
    }
}

/// A dense snapshot of the molecule graph, indexed by insertion order.
/// Ring perception works on plain indices and maps back to ids at the end.
struct DenseGraph {
    atom_ids: Vec<AtomId>,
    adjacency: Vec<Vec<(usize, usize)>>,
    endpoints: Vec<(usize, usize)>,
}

impl DenseGraph {
    fn build(molecule: &Molecule) -> Self {
        let atom_ids: Vec<AtomId> = molecule.atom_ids().to_vec();
        let mut index: SecondaryMap<AtomId, usize> = SecondaryMap::new();
        for (i, &atom_id) in atom_ids.iter().enumerate() {
            index.insert(atom_id, i);
        }

        let mut adjacency = vec![Vec::new(); atom_ids.len()];
        let mut endpoints = Vec::with_capacity(molecule.bond_count());
        for (b, (_, bond)) in molecule.bonds_iter().enumerate() {
            let i = index[bond.atom1_id];
            let j = index[bond.atom2_id];
            endpoints.push((i, j));
            adjacency[i].push((j, b));
            adjacency[j].push((i, b));
        }

        Self {
            atom_ids,
            adjacency,
            endpoints,
        }
    }

    fn component_count(&self) -> usize {
        let n = self.atom_ids.len();
        let mut visited = vec![false; n];
        let mut components = 0;
        for start in 0..n {
            if visited[start] {
                continue;
            }
            components += 1;
            let mut queue = VecDeque::new();
            visited[start] = true;
            queue.push_back(start);
            while let Some(current) = queue.pop_front() {
                for &(neighbor, _) in &self.adjacency[current] {
                    if !visited[neighbor] {
                        visited[neighbor] = true;
                        queue.push_back(neighbor);
                    }
                }
            }
        }
        components
    }

    /// Marks atoms that can be part of a cycle by iteratively pruning
    /// terminal (degree <= 1) atoms.
    fn ring_atoms(&self) -> Vec<bool> {
        let n = self.atom_ids.len();
        let mut degree: Vec<usize> = (0..n).map(|i| self.adjacency[i].len()).collect();
        let mut removed = vec![false; n];
        let mut queue: VecDeque<usize> = (0..n).filter(|&i| degree[i] <= 1).collect();

        while let Some(atom) = queue.pop_front() {
            if removed[atom] {
                continue;
            }
            removed[atom] = true;
            for &(neighbor, _) in &self.adjacency[atom] {
                if !removed[neighbor] {
                    degree[neighbor] -= 1;
                    if degree[neighbor] <= 1 {
                        queue.push_back(neighbor);
                    }
                }
            }
        }

        removed.iter().map(|&r| !r).collect()
    }

    /// BFS shortest path between the endpoints of an excluded bond,
    /// restricted to ring atoms. The returned path closed through the
    /// excluded bond is the smallest cycle containing it.
    fn shortest_cycle_through(&self, excluded_bond: usize, ring_atoms: &[bool]) -> Option<Vec<usize>> {
        let (start, end) = self.endpoints[excluded_bond];
        let n = self.atom_ids.len();
        let mut parent = vec![usize::MAX; n];
        let mut visited = vec![false; n];
        let mut queue = VecDeque::new();
        visited[start] = true;
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            if current == end {
                let mut path = Vec::new();
                let mut node = end;
                while node != start {
                    path.push(node);
                    node = parent[node];
                }
                path.push(start);
                path.reverse();
                return Some(path);
            }
            for &(neighbor, bond) in &self.adjacency[current] {
                if bond == excluded_bond || visited[neighbor] || !ring_atoms[neighbor] {
                    continue;
                }
                visited[neighbor] = true;
                parent[neighbor] = current;
                queue.push_back(neighbor);
            }
        }

        None
    }

    fn bond_index_between(&self, a: usize, b: usize) -> Option<usize> {
        self.adjacency[a]
            .iter()
            .find_map(|&(neighbor, bond)| if neighbor == b { Some(bond) } else { None })
    }
}

/// Rotates a cycle so its lowest index comes first, then orients it so the
/// index sequence is lexicographically smallest. Isomorphic cycles found
/// from different bonds collapse to the same representation.
fn canonicalize_cycle(cycle: &mut Vec<usize>) {
    if cycle.is_empty() {
        return;
    }
    let min_position = cycle
        .iter()
        .enumerate()
        .min_by_key(|&(_, &v)| v)
        .map(|(i, _)| i)
        .unwrap_or(0);
    cycle.rotate_left(min_position);
    if cycle.len() > 2 && cycle[cycle.len() - 1] < cycle[1] {
        cycle[1..].reverse();
    }
}

fn highest_bit(words: &[u64]) -> Option<usize> {
    for (i, &word) in words.iter().enumerate().rev() {
        if word != 0 {
            return Some(i * 64 + 63 - word.leading_zeros() as usize);
        }
    }
    None
}

fn xor_assign(target: &mut [u64], source: &[u64]) {
    for (t, s) in target.iter_mut().zip(source) {
        *t ^= s;
    }
}

/// Reduces `vector` against the accumulated GF(2) basis of ring bond sets.
/// Returns `true` (and extends the basis) when the vector is linearly
/// independent, i.e. the candidate ring is not implied by accepted rings.
fn insert_if_independent(mut vector: Vec<u64>, basis: &mut Vec<(usize, Vec<u64>)>) -> bool {
    loop {
        let Some(pivot) = highest_bit(&vector) else {
            return false;
        };
        if let Some(position) = basis.iter().position(|&(p, _)| p == pivot) {
            let (_, basis_vector) = &basis[position];
            xor_assign(&mut vector, basis_vector);
        } else {
            basis.push((pivot, vector));
            return true;
        }
    }
}

/// Decides ring aromaticity from bond orders and elements.
///
/// A ring whose bonds are all marked aromatic qualifies directly. Otherwise
/// a Hueckel-style count runs over the cycle: an atom with a double or
/// aromatic ring bond contributes one pi electron, an in-ring heteroatom
/// with only single ring bonds contributes its lone pair (two), and a
/// carbon with only single bonds in and out of the ring breaks conjugation.
/// The ring is aromatic when the total satisfies 4n + 2.
fn ring_is_aromatic(molecule: &Molecule, atoms: &[AtomId], bonds: &[BondId]) -> bool {
    let order_of = |bond_id: BondId| molecule.bond(bond_id).map(|b| b.order);

    if bonds
        .iter()
        .all(|&b| order_of(b) == Some(BondOrder::Aromatic))
    {
        return true;
    }

    let size = atoms.len();
    let mut pi_electrons = 0usize;
    for (i, &atom_id) in atoms.iter().enumerate() {
        let entering = bonds[(i + size - 1) % size];
        let leaving = bonds[i];
        let has_ring_pi = [entering, leaving].into_iter().any(|b| {
            matches!(
                order_of(b),
                Some(BondOrder::Double) | Some(BondOrder::Aromatic)
            )
        });

        if has_ring_pi {
            pi_electrons += 1;
            continue;
        }

        let Some(atom) = molecule.atom(atom_id) else {
            return false;
        };
        if atom.element.is_heteroatom() {
            pi_electrons += 2;
            continue;
        }

        // Carbon with only single ring bonds: an exocyclic multiple bond
        // keeps it sp2 (contributing nothing), otherwise the ring is broken.
        let has_exocyclic_pi = molecule.bonds_of(atom_id).any(|b| {
            !bonds.contains(&b)
                && matches!(
                    order_of(b),
                    Some(BondOrder::Double) | Some(BondOrder::Triple) | Some(BondOrder::Aromatic)
                )
        });
        if !has_exocyclic_pi {
            return false;
        }
    }

    pi_electrons >= 2 && pi_electrons % 4 == 2
}

/// Computes the Smallest Set of Smallest Rings of the molecule.
///
/// The cyclomatic number `bonds - atoms + components` fixes the target ring
/// count. Candidate cycles come from a breadth-first search per ring bond
/// (shortest cycle through that bond), are canonicalized and sorted
/// smallest-first, and are accepted only while linearly independent of the
/// already accepted set over GF(2). The result is therefore deterministic
/// for a given molecule and never double counts shared bonds of fused
/// systems.
///
/// Total over any valid molecule: the empty and acyclic cases yield an
/// empty set.
pub fn perceive_sssr(molecule: &Molecule) -> Vec<Ring> {
    if molecule.atom_count() == 0 || molecule.bond_count() == 0 {
        return Vec::new();
    }

    let graph = DenseGraph::build(molecule);
    let components = graph.component_count();
    let expected =
        molecule.bond_count() as isize - molecule.atom_count() as isize + components as isize;
    if expected <= 0 {
        return Vec::new();
    }
    let expected = expected as usize;

    let ring_atoms = graph.ring_atoms();
    let mut candidates: Vec<Vec<usize>> = Vec::new();
    for bond in 0..graph.endpoints.len() {
        let (i, j) = graph.endpoints[bond];
        if !ring_atoms[i] || !ring_atoms[j] {
            continue;
        }
        if let Some(mut cycle) = graph.shortest_cycle_through(bond, &ring_atoms) {
            canonicalize_cycle(&mut cycle);
            if !candidates.contains(&cycle) {
                candidates.push(cycle);
            }
        }
    }
    candidates.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

    let word_count = graph.endpoints.len().div_ceil(64);
    let mut basis: Vec<(usize, Vec<u64>)> = Vec::new();
    let mut rings = Vec::new();

    for cycle in candidates {
        if rings.len() == expected {
            break;
        }

        let size = cycle.len();
        let cycle_bonds: Vec<usize> = (0..size)
            .filter_map(|i| graph.bond_index_between(cycle[i], cycle[(i + 1) % size]))
            .collect();
        if cycle_bonds.len() != size {
            continue;
        }

        let mut vector = vec![0u64; word_count];
        for &b in &cycle_bonds {
            vector[b / 64] |= 1 << (b % 64);
        }
        if !insert_if_independent(vector, &mut basis) {
            continue;
        }

        let atoms: Vec<AtomId> = cycle.iter().map(|&i| graph.atom_ids[i]).collect();
        let bonds: Vec<BondId> = (0..size)
            .map(|i| {
                molecule
                    .bond_between(atoms[i], atoms[(i + 1) % size])
                    .unwrap()
            })
            .collect();
        let aromatic = ring_is_aromatic(molecule, &atoms, &bonds);
        rings.push(Ring {
            atoms,
            bonds,
            aromatic,
        });
    }

    rings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::element::Element;
    use std::collections::HashSet;

    fn carbon() -> Element {
        Element::from_symbol("C").unwrap()
    }

    fn element(symbol: &str) -> Element {
        Element::from_symbol(symbol).unwrap()
    }

    fn carbon_cycle(order: BondOrder, size: usize) -> (Molecule, Vec<AtomId>) {
        let mut molecule = Molecule::new();
        let atoms: Vec<AtomId> = (0..size).map(|_| molecule.add_atom(carbon())).collect();
        for i in 0..size {
            molecule
                .add_bond(atoms[i], atoms[(i + 1) % size], order)
                .unwrap();
        }
        (molecule, atoms)
    }

    mod perception {
        use super::*;

        #[test]
        fn empty_molecule_has_no_rings() {
            assert!(perceive_sssr(&Molecule::new()).is_empty());
        }

        #[test]
        fn acyclic_chain_has_no_rings() {
            let mut molecule = Molecule::new();
            let atoms: Vec<AtomId> = (0..5).map(|_| molecule.add_atom(carbon())).collect();
            for pair in atoms.windows(2) {
                molecule.add_bond(pair[0], pair[1], BondOrder::Single).unwrap();
            }
            assert!(perceive_sssr(&molecule).is_empty());
        }

        #[test]
        fn benzene_yields_one_six_ring() {
            let (molecule, atoms) = carbon_cycle(BondOrder::Aromatic, 6);
            let rings = perceive_sssr(&molecule);
            assert_eq!(rings.len(), 1);
            assert_eq!(rings[0].size(), 6);
            for &atom_id in &atoms {
                assert!(rings[0].contains_atom(atom_id));
            }
        }

        #[test]
        fn naphthalene_yields_two_six_rings_sharing_one_bond() {
            // Two fused six-rings: atoms 0-5 and 4,5,6,7,8,9 sharing the
            // 4-5 bond.
            let mut molecule = Molecule::new();
            let atoms: Vec<AtomId> = (0..10).map(|_| molecule.add_atom(carbon())).collect();
            for i in 0..6 {
                molecule
                    .add_bond(atoms[i], atoms[(i + 1) % 6], BondOrder::Aromatic)
                    .unwrap();
            }
            let second = [atoms[4], atoms[6], atoms[7], atoms[8], atoms[9], atoms[5]];
            for i in 0..5 {
                molecule
                    .add_bond(second[i], second[i + 1], BondOrder::Aromatic)
                    .unwrap();
            }

            let rings = perceive_sssr(&molecule);
            assert_eq!(rings.len(), 2);
            assert!(rings.iter().all(|r| r.size() == 6));

            let shared: Vec<BondId> = rings[0]
                .bonds()
                .iter()
                .filter(|&&b| rings[1].contains_bond(b))
                .copied()
                .collect();
            assert_eq!(shared.len(), 1);
            assert_eq!(
                shared[0],
                molecule.bond_between(atoms[4], atoms[5]).unwrap()
            );
        }

        #[test]
        fn fused_three_and_four_ring_prefers_smallest() {
            // Bicyclic: triangle 0-1-2 fused to square 1-2-3-4 on bond 1-2.
            let mut molecule = Molecule::new();
            let atoms: Vec<AtomId> = (0..5).map(|_| molecule.add_atom(carbon())).collect();
            for (a, b) in [(0, 1), (1, 2), (2, 0), (1, 3), (3, 4), (4, 2)] {
                molecule
                    .add_bond(atoms[a], atoms[b], BondOrder::Single)
                    .unwrap();
            }

            let rings = perceive_sssr(&molecule);
            let sizes: Vec<usize> = rings.iter().map(Ring::size).collect();
            assert_eq!(sizes, vec![3, 4]);
        }

        #[test]
        fn disconnected_rings_are_both_found() {
            let mut molecule = Molecule::new();
            let first: Vec<AtomId> = (0..3).map(|_| molecule.add_atom(carbon())).collect();
            for i in 0..3 {
                molecule
                    .add_bond(first[i], first[(i + 1) % 3], BondOrder::Single)
                    .unwrap();
            }
            let second: Vec<AtomId> = (0..5).map(|_| molecule.add_atom(carbon())).collect();
            for i in 0..5 {
                molecule
                    .add_bond(second[i], second[(i + 1) % 5], BondOrder::Single)
                    .unwrap();
            }

            let sizes: Vec<usize> = perceive_sssr(&molecule).iter().map(Ring::size).collect();
            assert_eq!(sizes, vec![3, 5]);
        }

        #[test]
        fn ring_bond_list_matches_atom_cycle() {
            let (molecule, _) = carbon_cycle(BondOrder::Single, 5);
            let rings = perceive_sssr(&molecule);
            let ring = &rings[0];
            for i in 0..ring.size() {
                let a = ring.atoms()[i];
                let b = ring.atoms()[(i + 1) % ring.size()];
                assert_eq!(molecule.bond_between(a, b), Some(ring.bonds()[i]));
            }
        }

        #[test]
        fn perception_is_insertion_order_independent() {
            // Same hexagon, bonds added in a scrambled order.
            let (reference, _) = carbon_cycle(BondOrder::Single, 6);

            let mut scrambled = Molecule::new();
            let atoms: Vec<AtomId> = (0..6).map(|_| scrambled.add_atom(carbon())).collect();
            for (a, b) in [(3, 4), (0, 1), (5, 0), (2, 3), (4, 5), (1, 2)] {
                scrambled
                    .add_bond(atoms[a], atoms[b], BondOrder::Single)
                    .unwrap();
            }

            let reference_sizes: HashSet<usize> =
                perceive_sssr(&reference).iter().map(Ring::size).collect();
            let scrambled_sizes: HashSet<usize> =
                perceive_sssr(&scrambled).iter().map(Ring::size).collect();
            assert_eq!(reference_sizes, scrambled_sizes);
        }
    }

    mod aromaticity {
        use super::*;

        #[test]
        fn all_aromatic_bonds_make_an_aromatic_ring() {
            let (molecule, _) = carbon_cycle(BondOrder::Aromatic, 6);
            assert!(perceive_sssr(&molecule)[0].is_aromatic());
        }

        #[test]
        fn kekule_benzene_is_aromatic() {
            let mut molecule = Molecule::new();
            let atoms: Vec<AtomId> = (0..6).map(|_| molecule.add_atom(carbon())).collect();
            for i in 0..6 {
                let order = if i % 2 == 0 {
                    BondOrder::Double
                } else {
                    BondOrder::Single
                };
                molecule
                    .add_bond(atoms[i], atoms[(i + 1) % 6], order)
                    .unwrap();
            }
            assert!(perceive_sssr(&molecule)[0].is_aromatic());
        }

        #[test]
        fn cyclohexane_is_not_aromatic() {
            let (molecule, _) = carbon_cycle(BondOrder::Single, 6);
            assert!(!perceive_sssr(&molecule)[0].is_aromatic());
        }

        #[test]
        fn cyclobutadiene_fails_the_electron_count() {
            let mut molecule = Molecule::new();
            let atoms: Vec<AtomId> = (0..4).map(|_| molecule.add_atom(carbon())).collect();
            for i in 0..4 {
                let order = if i % 2 == 0 {
                    BondOrder::Double
                } else {
                    BondOrder::Single
                };
                molecule
                    .add_bond(atoms[i], atoms[(i + 1) % 4], order)
                    .unwrap();
            }
            assert!(!perceive_sssr(&molecule)[0].is_aromatic());
        }

        #[test]
        fn furan_counts_the_oxygen_lone_pair() {
            // O at position 0, then four carbons with alternating doubles:
            // O-C1=C2-C3=C4-O.
            let mut molecule = Molecule::new();
            let o = molecule.add_atom(element("O"));
            let carbons: Vec<AtomId> = (0..4).map(|_| molecule.add_atom(carbon())).collect();
            molecule.add_bond(o, carbons[0], BondOrder::Single).unwrap();
            molecule
                .add_bond(carbons[0], carbons[1], BondOrder::Double)
                .unwrap();
            molecule
                .add_bond(carbons[1], carbons[2], BondOrder::Single)
                .unwrap();
            molecule
                .add_bond(carbons[2], carbons[3], BondOrder::Double)
                .unwrap();
            molecule.add_bond(carbons[3], o, BondOrder::Single).unwrap();

            assert!(perceive_sssr(&molecule)[0].is_aromatic());
        }

        #[test]
        fn pyridine_is_aromatic() {
            let mut molecule = Molecule::new();
            let n = molecule.add_atom(element("N"));
            let carbons: Vec<AtomId> = (0..5).map(|_| molecule.add_atom(carbon())).collect();
            let cycle = [n, carbons[0], carbons[1], carbons[2], carbons[3], carbons[4]];
            for i in 0..6 {
                let order = if i % 2 == 0 {
                    BondOrder::Double
                } else {
                    BondOrder::Single
                };
                molecule
                    .add_bond(cycle[i], cycle[(i + 1) % 6], order)
                    .unwrap();
            }
            assert!(perceive_sssr(&molecule)[0].is_aromatic());
        }
    }
}
