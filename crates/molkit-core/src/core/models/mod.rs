//! # Core Models Module
//!
//! Fundamental data structures for representing molecular graphs: elements,
//! atoms, bonds, residue groupings, and the owning [`molecule::Molecule`].
//!
//! ## Key Components
//!
//! - [`element`] - Immutable periodic table lookup backed by an embedded data table
//! - [`atom`] - Graph nodes with position, charges, and chirality
//! - [`bond`] - Graph edges with an order, referencing endpoint atoms by id
//! - [`residue`] - Optional named atom groupings
//! - [`molecule`] - The arena-backed graph owning atoms and bonds, the sole
//!   topology mutator, and the hub for all derived-structure queries
//! - [`ids`] - Stable identifier types for atoms, bonds, and residues
//!
//! Atoms and bonds are owned exclusively by their molecule; everything else
//! refers to them through the id types, which stay valid for the lifetime of
//! the entity and are never reused while it lives.

pub mod atom;
pub mod bond;
pub mod element;
pub mod ids;
pub mod molecule;
pub mod residue;
