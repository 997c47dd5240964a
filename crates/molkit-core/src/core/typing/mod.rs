//! # Atom Typing Module
//!
//! Force-field atom classification: mapping every atom of a molecule to a
//! structural type label derived from its element, bond orders, neighbor
//! count, and ring environment. Only the classification step lives here;
//! the numerical force-field math that consumes the labels is a separate
//! concern.
//!
//! - [`uff`] - A UFF-style typer ("C_3", "N_R", "O_2", ...)
//! - [`rules`] - Optional TOML-defined label overrides consulted before the
//!   built-in assignment rules

pub mod rules;
pub mod uff;

use crate::core::models::ids::AtomId;
use crate::core::models::molecule::Molecule;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypingError {
    #[error("atom {0:?} has no type in this assignment")]
    AtomNotFound(AtomId),

    #[error("atom types have not been assigned yet")]
    NotAssigned,

    #[error("element {0} is not covered by this force field")]
    UnsupportedElement(String),
}

/// An atom typer: a named classifier assigning each atom of a molecule a
/// force-field type label.
///
/// Implementations are registered by name (see
/// [`registry`](crate::core::registry)). Assignment must be idempotent:
/// running it twice over an unmodified molecule yields identical labels.
pub trait AtomTyper {
    /// The registry name of this typer (e.g. `"uff"`).
    fn name(&self) -> &'static str;

    /// Classifies every atom of `molecule`, replacing any previous
    /// assignment. Either all atoms are typed or the previous assignment
    /// is left untouched.
    fn assign(&mut self, molecule: &Molecule) -> Result<(), TypingError>;

    /// The label assigned to `atom_id`.
    ///
    /// # Errors
    ///
    /// [`TypingError::NotAssigned`] before the first successful
    /// [`assign`](Self::assign); [`TypingError::AtomNotFound`] for an atom
    /// outside the classified molecule.
    fn type_of(&self, atom_id: AtomId) -> Result<&str, TypingError>;
}
