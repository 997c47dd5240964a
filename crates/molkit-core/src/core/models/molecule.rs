use super::atom::{Atom, Chirality};
use super::bond::{Bond, BondOrder};
use super::element::Element;
use super::ids::{AtomId, BondId, ResidueId};
use super::residue::Residue;
use crate::core::graph::fragments::{self, Fragment};
use crate::core::graph::paths;
use crate::core::graph::rings::{self, Ring};
use nalgebra::{Point3, Vector3};
use slotmap::{SecondaryMap, SlotMap};
use thiserror::Error;

/// Errors raised at the molecule's mutation boundary.
///
/// Every graph-consistency check runs before any state is touched, so a
/// failed operation never leaves the molecule partially mutated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoleculeError {
    #[error("atom {0:?} is not part of this molecule")]
    AtomNotFound(AtomId),

    #[error("bond {0:?} is not part of this molecule")]
    BondNotFound(BondId),

    #[error("residue {0:?} is not part of this molecule")]
    ResidueNotFound(ResidueId),

    #[error("atom {0:?} cannot be bonded to itself")]
    SelfBond(AtomId),

    #[error("atoms {0:?} and {1:?} are already bonded")]
    DuplicateBond(AtomId, AtomId),
}

/// A derived value tagged with the topology generation it was computed at.
///
/// All cached derived data goes through this holder so the invariant
/// "stale data is never returned" is enforced in one place.
#[derive(Debug, Clone)]
struct Cached<T> {
    value: Option<T>,
    generation: u64,
}

impl<T> Default for Cached<T> {
    fn default() -> Self {
        Self {
            value: None,
            generation: 0,
        }
    }
}

impl<T> Cached<T> {
    fn is_fresh(&self, generation: u64) -> bool {
        self.value.is_some() && self.generation == generation
    }

    fn store(&mut self, generation: u64, value: T) {
        self.generation = generation;
        self.value = Some(value);
    }
}

/// An in-memory molecular graph: atoms as nodes, bonds as edges.
///
/// The molecule is the sole owner and mutator of its atom and bond storage.
/// Atoms and bonds live in slot maps, so ids stay stable for the lifetime
/// of the entity and dangling ids resolve to `None` instead of aliasing a
/// newer entity. Insertion order is tracked separately and is the iteration
/// order of every query, which keeps derived computations deterministic.
///
/// Topology mutations bump a generation counter; ring and fragment caches
/// are tagged with the generation they were computed at and recomputed on
/// the next query after a mutation. Position, charge, and chirality edits
/// do not touch topology and leave the caches valid.
#[derive(Debug, Clone, Default)]
pub struct Molecule {
    name: String,
    atoms: SlotMap<AtomId, Atom>,
    bonds: SlotMap<BondId, Bond>,
    residues: SlotMap<ResidueId, Residue>,
    atom_order: Vec<AtomId>,
    bond_order: Vec<BondId>,
    adjacency: SecondaryMap<AtomId, Vec<(AtomId, BondId)>>,
    generation: u64,
    ring_cache: Cached<Vec<Ring>>,
    fragment_cache: Cached<Vec<Fragment>>,
}

impl Molecule {
    /// Creates a new, empty molecule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty molecule with the given name.
    pub fn with_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// The current topology generation. Bumped by every structural
    /// mutation; useful for callers that hold derived values externally.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    // --- Structural mutation -------------------------------------------

    /// Appends a new atom of `element` at the origin with zero charges and
    /// unspecified chirality, returning its stable id.
    pub fn add_atom(&mut self, element: Element) -> AtomId {
        let atom_id = self.atoms.insert(Atom::new(element));
        self.atom_order.push(atom_id);
        self.adjacency.insert(atom_id, Vec::new());
        self.generation += 1;
        atom_id
    }

    /// Removes an atom, cascading removal of every bond that touches it.
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError::AtomNotFound`] if the id is stale or
    /// belongs to another molecule.
    pub fn remove_atom(&mut self, atom_id: AtomId) -> Result<Atom, MoleculeError> {
        let atom = self
            .atoms
            .remove(atom_id)
            .ok_or(MoleculeError::AtomNotFound(atom_id))?;

        let touching = self.adjacency.remove(atom_id).unwrap_or_default();
        for (neighbor_id, bond_id) in touching {
            self.bonds.remove(bond_id);
            self.bond_order.retain(|&id| id != bond_id);
            if let Some(adjacency) = self.adjacency.get_mut(neighbor_id) {
                adjacency.retain(|&(_, id)| id != bond_id);
            }
        }
        self.atom_order.retain(|&id| id != atom_id);

        if let Some(residue_id) = atom.residue_id {
            if let Some(residue) = self.residues.get_mut(residue_id) {
                residue.atoms.retain(|&id| id != atom_id);
            }
        }

        self.generation += 1;
        Ok(atom)
    }

    /// Creates a bond between two existing atoms.
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError::AtomNotFound`] for a dangling endpoint,
    /// [`MoleculeError::SelfBond`] when both endpoints are the same atom,
    /// and [`MoleculeError::DuplicateBond`] when the unordered pair is
    /// already bonded. Nothing is mutated on failure.
    pub fn add_bond(
        &mut self,
        atom1_id: AtomId,
        atom2_id: AtomId,
        order: BondOrder,
    ) -> Result<BondId, MoleculeError> {
        if !self.atoms.contains_key(atom1_id) {
            return Err(MoleculeError::AtomNotFound(atom1_id));
        }
        if !self.atoms.contains_key(atom2_id) {
            return Err(MoleculeError::AtomNotFound(atom2_id));
        }
        if atom1_id == atom2_id {
            return Err(MoleculeError::SelfBond(atom1_id));
        }
        if self.bond_between(atom1_id, atom2_id).is_some() {
            return Err(MoleculeError::DuplicateBond(atom1_id, atom2_id));
        }

        let bond_id = self.bonds.insert(Bond::new(atom1_id, atom2_id, order));
        self.bond_order.push(bond_id);
        self.adjacency[atom1_id].push((atom2_id, bond_id));
        self.adjacency[atom2_id].push((atom1_id, bond_id));
        self.generation += 1;
        Ok(bond_id)
    }

    /// Removes a bond.
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError::BondNotFound`] if the id is stale.
    pub fn remove_bond(&mut self, bond_id: BondId) -> Result<Bond, MoleculeError> {
        let bond = self
            .bonds
            .remove(bond_id)
            .ok_or(MoleculeError::BondNotFound(bond_id))?;

        self.bond_order.retain(|&id| id != bond_id);
        for endpoint in [bond.atom1_id, bond.atom2_id] {
            if let Some(adjacency) = self.adjacency.get_mut(endpoint) {
                adjacency.retain(|&(_, id)| id != bond_id);
            }
        }

        self.generation += 1;
        Ok(bond)
    }

    /// Changes the order of an existing bond. Counts as a topology change
    /// because ring aromaticity is derived from bond orders.
    pub fn set_bond_order(
        &mut self,
        bond_id: BondId,
        order: BondOrder,
    ) -> Result<(), MoleculeError> {
        let bond = self
            .bonds
            .get_mut(bond_id)
            .ok_or(MoleculeError::BondNotFound(bond_id))?;
        bond.order = order;
        self.generation += 1;
        Ok(())
    }

    /// Replaces the element of an existing atom. Counts as a topology
    /// change because aromaticity perception is element-aware.
    pub fn set_element(&mut self, atom_id: AtomId, element: Element) -> Result<(), MoleculeError> {
        let atom = self
            .atoms
            .get_mut(atom_id)
            .ok_or(MoleculeError::AtomNotFound(atom_id))?;
        atom.element = element;
        self.generation += 1;
        Ok(())
    }

    // --- Non-structural edits ------------------------------------------

    pub fn set_position(
        &mut self,
        atom_id: AtomId,
        position: Point3<f64>,
    ) -> Result<(), MoleculeError> {
        let atom = self
            .atoms
            .get_mut(atom_id)
            .ok_or(MoleculeError::AtomNotFound(atom_id))?;
        atom.position = position;
        Ok(())
    }

    /// Moves an atom by the given displacement.
    pub fn translate(
        &mut self,
        atom_id: AtomId,
        displacement: Vector3<f64>,
    ) -> Result<(), MoleculeError> {
        let atom = self
            .atoms
            .get_mut(atom_id)
            .ok_or(MoleculeError::AtomNotFound(atom_id))?;
        atom.position += displacement;
        Ok(())
    }

    pub fn set_partial_charge(
        &mut self,
        atom_id: AtomId,
        charge: f64,
    ) -> Result<(), MoleculeError> {
        let atom = self
            .atoms
            .get_mut(atom_id)
            .ok_or(MoleculeError::AtomNotFound(atom_id))?;
        atom.partial_charge = charge;
        Ok(())
    }

    pub fn set_chirality(
        &mut self,
        atom_id: AtomId,
        chirality: Chirality,
    ) -> Result<(), MoleculeError> {
        let atom = self
            .atoms
            .get_mut(atom_id)
            .ok_or(MoleculeError::AtomNotFound(atom_id))?;
        atom.chirality = chirality;
        Ok(())
    }

    // --- Access and adjacency ------------------------------------------

    pub fn atom(&self, atom_id: AtomId) -> Option<&Atom> {
        self.atoms.get(atom_id)
    }

    pub fn bond(&self, bond_id: BondId) -> Option<&Bond> {
        self.bonds.get(bond_id)
    }

    pub fn contains_atom(&self, atom_id: AtomId) -> bool {
        self.atoms.contains_key(atom_id)
    }

    pub fn contains_bond(&self, bond_id: BondId) -> bool {
        self.bonds.contains_key(bond_id)
    }

    pub fn atom_count(&self) -> usize {
        self.atom_order.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bond_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atom_order.is_empty()
    }

    /// Atom ids in insertion order.
    pub fn atom_ids(&self) -> &[AtomId] {
        &self.atom_order
    }

    /// Bond ids in insertion order.
    pub fn bond_ids(&self) -> &[BondId] {
        &self.bond_order
    }

    /// Iterates over atoms in insertion order.
    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atom_order.iter().map(|&id| (id, &self.atoms[id]))
    }

    /// Iterates over bonds in insertion order.
    pub fn bonds_iter(&self) -> impl Iterator<Item = (BondId, &Bond)> {
        self.bond_order.iter().map(|&id| (id, &self.bonds[id]))
    }

    /// The `(neighbor, bond)` pairs of an atom, in bond insertion order.
    pub fn adjacency(&self, atom_id: AtomId) -> Option<&[(AtomId, BondId)]> {
        self.adjacency.get(atom_id).map(|v| v.as_slice())
    }

    /// Atoms directly bonded to `atom_id`, in bond insertion order.
    /// Empty for an unknown id.
    pub fn neighbors(&self, atom_id: AtomId) -> impl Iterator<Item = AtomId> {
        self.adjacency
            .get(atom_id)
            .into_iter()
            .flatten()
            .map(|&(neighbor, _)| neighbor)
    }

    /// Bonds touching `atom_id`, in insertion order. Empty for an unknown id.
    pub fn bonds_of(&self, atom_id: AtomId) -> impl Iterator<Item = BondId> {
        self.adjacency
            .get(atom_id)
            .into_iter()
            .flatten()
            .map(|&(_, bond_id)| bond_id)
    }

    pub fn neighbor_count(&self, atom_id: AtomId) -> usize {
        self.adjacency.get(atom_id).map_or(0, Vec::len)
    }

    /// Finds the bond connecting two atoms by scanning the first atom's
    /// bond list. Molecular degrees are small, so the linear scan is the
    /// right trade-off over a hash index.
    pub fn bond_between(&self, atom1_id: AtomId, atom2_id: AtomId) -> Option<BondId> {
        self.adjacency.get(atom1_id)?.iter().find_map(
            |&(neighbor, bond_id)| {
                if neighbor == atom2_id { Some(bond_id) } else { None }
            },
        )
    }

    pub fn is_bonded(&self, atom1_id: AtomId, atom2_id: AtomId) -> bool {
        self.bond_between(atom1_id, atom2_id).is_some()
    }

    // --- Derived per-atom quantities -----------------------------------

    /// Sum of bond orders at an atom, with aromatic bonds counting 1.5.
    pub fn valence(&self, atom_id: AtomId) -> Option<f64> {
        let adjacency = self.adjacency.get(atom_id)?;
        Some(
            adjacency
                .iter()
                .map(|&(_, bond_id)| self.bonds[bond_id].order.as_f64())
                .sum(),
        )
    }

    /// Valence rounded half-up to an integer. Two aromatic bonds and one
    /// single bond round to 4, the convention the atom typers expect.
    pub fn rounded_valence(&self, atom_id: AtomId) -> Option<u8> {
        self.valence(atom_id).map(|v| v.round() as u8)
    }

    /// Formal charge derived as rounded valence minus the element's
    /// expected valence (+1 for ammonium nitrogen, -1 for alkoxide oxygen).
    pub fn formal_charge(&self, atom_id: AtomId) -> Option<i8> {
        let expected = self.atom(atom_id)?.element.expected_valence();
        let rounded = self.rounded_valence(atom_id)?;
        Some(rounded as i8 - expected as i8)
    }

    /// Euclidean distance between two atoms in Angstroms.
    pub fn distance(&self, atom1_id: AtomId, atom2_id: AtomId) -> Option<f64> {
        let a = self.atom(atom1_id)?;
        let b = self.atom(atom2_id)?;
        Some((a.position - b.position).norm())
    }

    // --- Residue grouping ----------------------------------------------

    pub fn add_residue(&mut self, number: isize, name: &str) -> ResidueId {
        self.residues.insert(Residue::new(number, name))
    }

    pub fn residue(&self, residue_id: ResidueId) -> Option<&Residue> {
        self.residues.get(residue_id)
    }

    pub fn residues_iter(&self) -> impl Iterator<Item = (ResidueId, &Residue)> {
        self.residues.iter()
    }

    /// Assigns an atom to a residue, detaching it from its previous
    /// residue if it had one.
    pub fn assign_residue(
        &mut self,
        atom_id: AtomId,
        residue_id: ResidueId,
    ) -> Result<(), MoleculeError> {
        if !self.residues.contains_key(residue_id) {
            return Err(MoleculeError::ResidueNotFound(residue_id));
        }
        let previous = {
            let atom = self
                .atoms
                .get_mut(atom_id)
                .ok_or(MoleculeError::AtomNotFound(atom_id))?;
            atom.residue_id.replace(residue_id)
        };
        if let Some(previous_id) = previous {
            if let Some(residue) = self.residues.get_mut(previous_id) {
                residue.atoms.retain(|&id| id != atom_id);
            }
        }
        self.residues[residue_id].atoms.push(atom_id);
        Ok(())
    }

    // --- Derived structures (cached) -----------------------------------

    /// The connected components of the graph, recomputed lazily after a
    /// topology change. Every atom belongs to exactly one fragment.
    pub fn fragments(&mut self) -> &[Fragment] {
        if !self.fragment_cache.is_fresh(self.generation) {
            let value = fragments::connected_components(self);
            self.fragment_cache.store(self.generation, value);
        }
        self.fragment_cache.value.as_deref().unwrap()
    }

    pub fn fragment_count(&mut self) -> usize {
        self.fragments().len()
    }

    /// The fragment containing `atom_id`, or `None` for an unknown id.
    pub fn fragment_of(&mut self, atom_id: AtomId) -> Option<&Fragment> {
        if !self.contains_atom(atom_id) {
            return None;
        }
        self.fragments().iter().find(|f| f.contains(atom_id))
    }

    /// The smallest set of smallest rings, recomputed lazily after a
    /// topology change. Sorted by ring size, smallest first.
    pub fn rings(&mut self) -> &[Ring] {
        if !self.ring_cache.is_fresh(self.generation) {
            let value = rings::perceive_sssr(self);
            self.ring_cache.store(self.generation, value);
        }
        self.ring_cache.value.as_deref().unwrap()
    }

    pub fn ring_count(&mut self) -> usize {
        self.rings().len()
    }

    pub fn is_in_ring(&mut self, atom_id: AtomId) -> bool {
        self.rings().iter().any(|r| r.contains_atom(atom_id))
    }

    pub fn is_in_ring_of_size(&mut self, atom_id: AtomId, size: usize) -> bool {
        self.rings()
            .iter()
            .any(|r| r.size() == size && r.contains_atom(atom_id))
    }

    /// The smallest perceived ring containing `atom_id`, or `None` if the
    /// atom is not in any ring.
    pub fn smallest_ring(&mut self, atom_id: AtomId) -> Option<&Ring> {
        self.rings().iter().find(|r| r.contains_atom(atom_id))
    }

    pub fn is_aromatic_atom(&mut self, atom_id: AtomId) -> bool {
        self.rings()
            .iter()
            .any(|r| r.is_aromatic() && r.contains_atom(atom_id))
    }

    // --- Path queries ---------------------------------------------------

    /// Shortest path between two atoms as an atom sequence including both
    /// endpoints, or `None` when no path exists. Disconnection is an
    /// expected graph state, not an error.
    pub fn atom_path_to(&self, from: AtomId, to: AtomId) -> Option<Vec<AtomId>> {
        paths::atom_path(self, from, to)
    }

    /// Shortest path between two atoms as the sequence of traversed bonds.
    pub fn bond_path_to(&self, from: AtomId, to: AtomId) -> Option<Vec<BondId>> {
        paths::bond_path(self, from, to)
    }

    /// Number of atoms on the shortest path (endpoints included), with an
    /// optional search depth bound in bonds.
    pub fn atom_count_to(
        &self,
        from: AtomId,
        to: AtomId,
        max_depth: Option<usize>,
    ) -> Option<usize> {
        paths::atom_count(self, from, to, max_depth)
    }

    /// Number of bonds on the shortest path, with an optional search depth
    /// bound in bonds.
    pub fn bond_count_to(
        &self,
        from: AtomId,
        to: AtomId,
        max_depth: Option<usize>,
    ) -> Option<usize> {
        paths::bond_count(self, from, to, max_depth)
    }
}
