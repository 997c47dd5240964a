use phf::{Map, phf_map};
use serde::Deserialize;
use std::fmt;
use std::sync::OnceLock;

/// Highest atomic number covered by the built-in property table (Xenon).
pub const MAX_ATOMIC_NUMBER: u8 = 54;

const ELEMENT_TABLE_CSV: &str = include_str!("../../../data/elements.csv");

/// One row of the embedded element property table.
#[derive(Debug, Clone, Deserialize, PartialEq)]
struct ElementRecord {
    atomic_number: u8,
    symbol: String,
    name: String,
    mass: f64,
    covalent_radius: f64,
    van_der_waals_radius: f64,
    electronegativity: f64,
    expected_valence: u8,
}

static SYMBOL_TO_NUMBER: Map<&'static str, u8> = phf_map! {
    "H" => 1, "He" => 2, "Li" => 3, "Be" => 4, "B" => 5, "C" => 6,
    "N" => 7, "O" => 8, "F" => 9, "Ne" => 10, "Na" => 11, "Mg" => 12,
    "Al" => 13, "Si" => 14, "P" => 15, "S" => 16, "Cl" => 17, "Ar" => 18,
    "K" => 19, "Ca" => 20, "Sc" => 21, "Ti" => 22, "V" => 23, "Cr" => 24,
    "Mn" => 25, "Fe" => 26, "Co" => 27, "Ni" => 28, "Cu" => 29, "Zn" => 30,
    "Ga" => 31, "Ge" => 32, "As" => 33, "Se" => 34, "Br" => 35, "Kr" => 36,
    "Rb" => 37, "Sr" => 38, "Y" => 39, "Zr" => 40, "Nb" => 41, "Mo" => 42,
    "Tc" => 43, "Ru" => 44, "Rh" => 45, "Pd" => 46, "Ag" => 47, "Cd" => 48,
    "In" => 49, "Sn" => 50, "Sb" => 51, "Te" => 52, "I" => 53, "Xe" => 54,
};

fn table() -> &'static [ElementRecord] {
    static TABLE: OnceLock<Vec<ElementRecord>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut reader = csv::Reader::from_reader(ELEMENT_TABLE_CSV.as_bytes());
        reader
            .deserialize::<ElementRecord>()
            .collect::<Result<Vec<_>, _>>()
            .expect("embedded element table is well-formed")
    })
}

/// A chemical element, identified by its atomic number.
///
/// `Element` is a lightweight `Copy` handle; all physical properties are
/// resolved against a static table loaded once from the embedded CSV data.
/// The table is never mutated after load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Element(u8);

impl Element {
    /// Looks up an element by atomic number.
    ///
    /// Returns `None` for numbers outside `1..=MAX_ATOMIC_NUMBER`.
    pub fn from_atomic_number(atomic_number: u8) -> Option<Self> {
        if (1..=MAX_ATOMIC_NUMBER).contains(&atomic_number) {
            Some(Self(atomic_number))
        } else {
            None
        }
    }

    /// Looks up an element by its symbol (e.g. `"C"`, `"Cl"`).
    ///
    /// Symbols are matched exactly, with the conventional capitalization.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        SYMBOL_TO_NUMBER.get(symbol).map(|&n| Self(n))
    }

    fn record(&self) -> &'static ElementRecord {
        &table()[self.0 as usize - 1]
    }

    pub fn atomic_number(&self) -> u8 {
        self.0
    }

    pub fn symbol(&self) -> &'static str {
        &self.record().symbol
    }

    pub fn name(&self) -> &'static str {
        &self.record().name
    }

    /// Atomic mass in unified atomic mass units.
    pub fn mass(&self) -> f64 {
        self.record().mass
    }

    /// Covalent radius in Angstroms.
    pub fn covalent_radius(&self) -> f64 {
        self.record().covalent_radius
    }

    /// Van der Waals radius in Angstroms.
    pub fn van_der_waals_radius(&self) -> f64 {
        self.record().van_der_waals_radius
    }

    /// Pauling electronegativity (0.0 for elements with none assigned).
    pub fn electronegativity(&self) -> f64 {
        self.record().electronegativity
    }

    /// The valence this element is expected to have when neutral
    /// (e.g. 4 for carbon, 3 for nitrogen).
    pub fn expected_valence(&self) -> u8 {
        self.record().expected_valence
    }

    pub fn is_hydrogen(&self) -> bool {
        self.0 == 1
    }

    /// Returns `true` for atoms other than carbon and hydrogen.
    pub fn is_heteroatom(&self) -> bool {
        self.0 != 1 && self.0 != 6
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
