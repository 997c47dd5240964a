use crate::core::fingerprint::Fingerprint;
use crate::core::fingerprint::fp2::Fp2Fingerprint;
use crate::core::typing::AtomTyper;
use crate::core::typing::uff::UffAtomTyper;
use std::collections::HashMap;
use std::fmt;

type Factory<T> = Box<dyn Fn() -> Box<T> + Send + Sync>;

/// A name-to-factory registry for pluggable algorithm implementations.
///
/// The core ships with the built-in entries (see [`fingerprint_registry`]
/// and [`typer_registry`]); hosts may register additional implementations
/// under their own names. How a host discovers and loads those
/// implementations is outside the core's concern.
pub struct Registry<T: ?Sized> {
    factories: HashMap<String, Factory<T>>,
}

impl<T: ?Sized> Registry<T> {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registers a factory under `name`, replacing any previous entry.
    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn() -> Box<T> + Send + Sync + 'static,
    {
        self.factories.insert(name.to_string(), Box::new(factory));
    }

    /// Creates a fresh instance by name, or `None` for an unknown name.
    pub fn create(&self, name: &str) -> Option<Box<T>> {
        self.factories.get(name).map(|factory| factory())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted for stable presentation.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<T: ?Sized> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("names", &self.names())
            .finish()
    }
}

/// The fingerprint registry with the built-in algorithms ("fp2").
pub fn fingerprint_registry() -> Registry<dyn Fingerprint> {
    let mut registry = Registry::new();
    registry.register("fp2", || Box::new(Fp2Fingerprint::new()) as Box<dyn Fingerprint>);
    registry
}

/// The atom typer registry with the built-in typers ("uff").
pub fn typer_registry() -> Registry<dyn AtomTyper> {
    let mut registry = Registry::new();
    registry.register("uff", || Box::new(UffAtomTyper::new()) as Box<dyn AtomTyper>);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::element::Element;
    use crate::core::models::molecule::Molecule;

    #[test]
    fn built_in_fingerprints_are_registered() {
        let registry = fingerprint_registry();
        assert!(registry.contains("fp2"));
        assert_eq!(registry.names(), vec!["fp2"]);

        let fingerprint = registry.create("fp2").unwrap();
        assert_eq!(fingerprint.name(), "fp2");
        assert_eq!(fingerprint.bit_count(), 1024);
    }

    #[test]
    fn built_in_typers_are_registered() {
        let registry = typer_registry();
        let mut typer = registry.create("uff").unwrap();
        assert_eq!(typer.name(), "uff");

        let mut molecule = Molecule::new();
        let c = molecule.add_atom(Element::from_symbol("C").unwrap());
        typer.assign(&molecule).unwrap();
        assert_eq!(typer.type_of(c).unwrap(), "C_3");
    }

    #[test]
    fn unknown_names_create_nothing() {
        assert!(fingerprint_registry().create("maccs").is_none());
        assert!(typer_registry().create("mmff").is_none());
    }

    #[test]
    fn hosts_can_register_their_own_entries() {
        let mut registry = typer_registry();
        registry.register("uff-custom", || {
            Box::new(UffAtomTyper::new()) as Box<dyn AtomTyper>
        });
        assert_eq!(registry.names(), vec!["uff", "uff-custom"]);
        assert!(registry.create("uff-custom").is_some());
    }

    #[test]
    fn debug_lists_registered_names() {
        let rendered = format!("{:?}", fingerprint_registry());
        assert!(rendered.contains("fp2"));
    }
}
