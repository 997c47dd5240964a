use super::Fingerprint;
use super::bitvec::FixedBitVec;
use crate::core::models::molecule::Molecule;

/// Tanimoto coefficient between two equal-length bit vectors:
/// `|a AND b| / |a OR b|`, in `[0, 1]`.
///
/// Two all-zero vectors score `0.0` (the union is empty, so there is no
/// shared substructure evidence to speak of).
///
/// # Panics
///
/// Panics if the vectors differ in length.
pub fn tanimoto_coefficient(a: &FixedBitVec, b: &FixedBitVec) -> f64 {
    let union = a.union_count(b);
    if union == 0 {
        return 0.0;
    }
    a.intersection_count(b) as f64 / union as f64
}

/// A similarity descriptor: one reference molecule plus a fingerprint
/// algorithm, scoring other molecules against the reference.
///
/// The reference fingerprint is computed lazily on the first query and
/// cached until the reference molecule or the algorithm changes.
pub struct SimilarityDescriptor {
    molecule: Molecule,
    fingerprint: Box<dyn Fingerprint>,
    reference: Option<FixedBitVec>,
}

impl SimilarityDescriptor {
    pub fn new(molecule: Molecule, fingerprint: Box<dyn Fingerprint>) -> Self {
        Self {
            molecule,
            fingerprint,
            reference: None,
        }
    }

    pub fn molecule(&self) -> &Molecule {
        &self.molecule
    }

    /// Replaces the reference molecule, dropping the cached fingerprint.
    pub fn set_molecule(&mut self, molecule: Molecule) {
        self.molecule = molecule;
        self.reference = None;
    }

    /// The name of the fingerprint algorithm in use.
    pub fn fingerprint_name(&self) -> &'static str {
        self.fingerprint.name()
    }

    /// Replaces the fingerprint algorithm, dropping the cached fingerprint.
    pub fn set_fingerprint(&mut self, fingerprint: Box<dyn Fingerprint>) {
        self.fingerprint = fingerprint;
        self.reference = None;
    }

    /// Tanimoto similarity between the reference molecule and `other`.
    pub fn similarity_to(&mut self, other: &Molecule) -> f64 {
        if self.reference.is_none() {
            self.reference = Some(self.fingerprint.compute(&self.molecule));
        }
        let reference = self.reference.as_ref().unwrap();
        tanimoto_coefficient(reference, &self.fingerprint.compute(other))
    }
}
