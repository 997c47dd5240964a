//! # Fingerprint Module
//!
//! Binary substructure fingerprints and similarity scoring:
//!
//! - [`bitvec`] - The fixed-length bit vector and its hex persistence form
//! - [`fp2`] - The path-based 1024-bit fingerprint
//! - [`similarity`] - Tanimoto scoring and the caching similarity descriptor
//!
//! Fingerprint generation is a total, deterministic function of the
//! molecular graph: identical graphs yield bit-identical vectors regardless
//! of the order atoms and bonds were added, and the empty molecule yields
//! the all-zero vector.

pub mod bitvec;
pub mod fp2;
pub mod similarity;

use crate::core::models::molecule::Molecule;
use bitvec::FixedBitVec;

/// A fingerprint algorithm: a named, fixed-width bit vector generator.
///
/// Implementations are registered by name (see
/// [`registry`](crate::core::registry)) so hosts can select one at runtime.
pub trait Fingerprint {
    /// The registry name of this algorithm (e.g. `"fp2"`).
    fn name(&self) -> &'static str;

    /// Width of the produced vectors in bits.
    fn bit_count(&self) -> usize;

    /// Computes the fingerprint of a molecule. Total over any valid
    /// molecule; an empty molecule maps to the all-zero vector.
    fn compute(&self, molecule: &Molecule) -> FixedBitVec;
}
