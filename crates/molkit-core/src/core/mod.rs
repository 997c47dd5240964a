//! # Core Module
//!
//! The in-memory molecular graph model and the derived-structure algorithms
//! built on it.
//!
//! ## Overview
//!
//! The core module owns the mutable molecular graph and every computation
//! derived from it: connectivity analysis, ring perception, shortest-path
//! queries, substructure fingerprints, and force-field atom classification.
//! It has no I/O surface of its own; file formats, rendering, and plugin
//! loading are host concerns layered on top of the public queries.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Elements, atoms, bonds,
//!   residue groupings, and the owning molecule
//! - **Graph Algorithms** ([`graph`]) - Fragments, SSSR ring perception,
//!   and shortest paths as pure functions over a molecule snapshot
//! - **Fingerprints** ([`fingerprint`]) - Fixed-width substructure bit
//!   vectors and Tanimoto similarity
//! - **Atom Typing** ([`typing`]) - Force-field type label assignment
//! - **Plugin Contract** ([`registry`]) - Name-to-factory lookup for
//!   fingerprint and typer implementations
//!
//! ## Consistency Model
//!
//! A molecule is mutated from a single thread; read-only queries on an
//! unmutated molecule are pure and safe to run in parallel. Cached derived
//! data (rings, fragments) is tagged with the molecule's topology
//! generation and recomputed on the first query after a mutation, so stale
//! results are never returned.

pub mod fingerprint;
pub mod graph;
pub mod models;
pub mod registry;
pub mod typing;
