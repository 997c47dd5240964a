use super::Fingerprint;
use super::bitvec::FixedBitVec;
use crate::core::graph::rings;
use crate::core::models::ids::AtomId;
use crate::core::models::molecule::Molecule;
use slotmap::SecondaryMap;

/// Width of FP2 vectors in bits.
pub const FP2_BIT_COUNT: usize = 1024;

/// Longest enumerated path in bonds.
const MAX_PATH_BONDS: usize = 7;

const FNV_OFFSET: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

/// Path-based 1024-bit fingerprint.
///
/// Every simple path of one to seven bonds between non-hydrogen atoms is
/// enumerated, described canonically (element and aromaticity per atom,
/// order per bond, direction chosen by the lexicographically smaller
/// encoding), hashed with FNV-1a, and XOR-folded to a bit index. Hydrogens
/// carry no information here, so methane maps to the all-zero vector.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fp2Fingerprint;

impl Fp2Fingerprint {
    pub fn new() -> Self {
        Self
    }
}

impl Fingerprint for Fp2Fingerprint {
    fn name(&self) -> &'static str {
        "fp2"
    }

    fn bit_count(&self) -> usize {
        FP2_BIT_COUNT
    }

    fn compute(&self, molecule: &Molecule) -> FixedBitVec {
        let mut bits = FixedBitVec::zeros(FP2_BIT_COUNT);
        let aromatic = aromatic_atoms(molecule);

        for (atom_id, atom) in molecule.atoms_iter() {
            if atom.is_hydrogen() {
                continue;
            }
            let mut path = vec![atom_id];
            extend_paths(molecule, &aromatic, &mut path, &mut bits);
        }

        bits
    }
}

/// Atoms that belong to at least one aromatic perceived ring.
fn aromatic_atoms(molecule: &Molecule) -> SecondaryMap<AtomId, ()> {
    let mut set = SecondaryMap::new();
    for ring in rings::perceive_sssr(molecule) {
        if ring.is_aromatic() {
            for &atom_id in ring.atoms() {
                set.insert(atom_id, ());
            }
        }
    }
    set
}

/// Depth-first enumeration of simple heavy-atom paths rooted at the last
/// atom of `path`. Each extension sets the bit of the grown path before
/// recursing.
fn extend_paths(
    molecule: &Molecule,
    aromatic: &SecondaryMap<AtomId, ()>,
    path: &mut Vec<AtomId>,
    bits: &mut FixedBitVec,
) {
    let last = *path.last().unwrap();
    for neighbor in molecule.neighbors(last) {
        if path.contains(&neighbor) {
            continue;
        }
        if molecule.atom(neighbor).is_none_or(|a| a.is_hydrogen()) {
            continue;
        }
        path.push(neighbor);
        bits.set(path_bit(molecule, aromatic, path));
        if path.len() <= MAX_PATH_BONDS {
            extend_paths(molecule, aromatic, path, bits);
        }
        path.pop();
    }
}

/// Canonical bit index for a path: the smaller of the forward and reverse
/// encodings is hashed, so the index depends only on the path's content,
/// never on which end the enumeration started from.
fn path_bit(
    molecule: &Molecule,
    aromatic: &SecondaryMap<AtomId, ()>,
    path: &[AtomId],
) -> usize {
    let forward = encode_path(molecule, aromatic, path.iter().copied());
    let reverse = encode_path(molecule, aromatic, path.iter().rev().copied());
    let canonical = forward.min(reverse);
    fold_to_bit(fnv1a(&canonical))
}

fn encode_path(
    molecule: &Molecule,
    aromatic: &SecondaryMap<AtomId, ()>,
    path: impl Iterator<Item = AtomId>,
) -> Vec<u8> {
    let mut bytes = Vec::new();
    let mut previous: Option<AtomId> = None;
    for atom_id in path {
        if let Some(previous_id) = previous {
            let bond_id = molecule.bond_between(previous_id, atom_id).unwrap();
            bytes.push(molecule.bond(bond_id).unwrap().order.encoding());
        }
        let atom = molecule.atom(atom_id).unwrap();
        bytes.push(atom.element.atomic_number());
        bytes.push(u8::from(aromatic.contains_key(atom_id)));
        previous = Some(atom_id);
    }
    bytes
}

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET;
    for &byte in bytes {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// XOR-folds a 64-bit hash down to a valid bit index.
fn fold_to_bit(hash: u64) -> usize {
    let mut folded = hash;
    while folded >= FP2_BIT_COUNT as u64 {
        folded = (folded >> 10) ^ (folded & 0x3ff);
    }
    folded as usize
}
