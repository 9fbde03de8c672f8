/// A chemical element as used in material compositions.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub symbol: String,
    pub atomic_number: u32,
    /// Molar mass in g/mol
    pub molar_mass: f64,
}

impl Element {
    pub fn new(symbol: impl Into<String>, atomic_number: u32, molar_mass: f64) -> Self {
        Element {
            symbol: symbol.into(),
            atomic_number,
            molar_mass,
        }
    }

    /// Look an element up in the bundled element table.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        crate::data::ELEMENTS
            .get(symbol)
            .map(|&(z, molar_mass)| Element::new(symbol, z, molar_mass))
    }
}
