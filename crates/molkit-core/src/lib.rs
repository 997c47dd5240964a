//! # molkit Core Library
//!
//! An in-memory molecular graph library: a mutable atom/bond graph with
//! ring perception, connectivity and shortest-path analysis, binary
//! substructure fingerprints, and force-field atom typing.
//!
//! ## Architectural Philosophy
//!
//! Everything revolves around [`core::models::molecule::Molecule`], the
//! exclusive owner of atom and bond storage and the only place topology
//! can change. All derived structures - fragments, rings, paths,
//! fingerprints, atom types - are computed from the molecule's current
//! graph, either as pure functions (safe to parallelize across readers) or
//! as generation-checked caches on the molecule itself.
//!
//! The library is consumed by outer layers (file I/O, rendering, plugin
//! hosts) purely through the molecule's public construction calls and
//! queries; no file format or rendering knowledge lives here.
//!
//! ## Example
//!
//! ```
//! use molkit::core::models::bond::BondOrder;
//! use molkit::core::models::element::Element;
//! use molkit::core::models::molecule::Molecule;
//!
//! let mut molecule = Molecule::with_name("cyclopropane");
//! let carbon = Element::from_symbol("C").unwrap();
//! let atoms: Vec<_> = (0..3).map(|_| molecule.add_atom(carbon)).collect();
//! for i in 0..3 {
//!     molecule.add_bond(atoms[i], atoms[(i + 1) % 3], BondOrder::Single)?;
//! }
//!
//! assert_eq!(molecule.ring_count(), 1);
//! assert_eq!(molecule.rings()[0].size(), 3);
//! assert_eq!(molecule.fragment_count(), 1);
//! # Ok::<(), molkit::core::models::molecule::MoleculeError>(())
//! ```

pub mod core;
