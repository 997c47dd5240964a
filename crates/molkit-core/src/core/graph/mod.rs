//! # Graph Algorithms Module
//!
//! Derived-structure computations over a molecule's bond graph:
//!
//! - [`fragments`] - Connected-component analysis (a molecule may hold
//!   several disconnected fragments, e.g. a salt and its counter-ion)
//! - [`rings`] - Smallest Set of Smallest Rings perception and ring
//!   aromaticity
//! - [`paths`] - Shortest-path queries with optional depth bounds
//!
//! Everything in this module is a pure function of the molecule snapshot it
//! is handed: no interior mutability, no hidden caches. The cached variants
//! of these queries live on [`Molecule`](crate::core::models::molecule::Molecule),
//! which tags results with its topology generation.

pub mod fragments;
pub mod paths;
pub mod rings;
