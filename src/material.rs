use crate::element::Element;
use crate::optical::MaterialPropertiesTable;
use std::collections::BTreeMap;
use std::sync::Arc;

/// How a material is composed.
#[derive(Debug, Clone, PartialEq)]
pub enum Composition {
    /// Elements with mass fractions (normalised on construction).
    MassFractions(Vec<(Arc<Element>, f64)>),
    /// Elements with atom counts per formula unit (a chemical compound).
    AtomCounts(Vec<(Arc<Element>, u32)>),
    /// Fractional (by mass) blend of other materials.
    Blend(Vec<(Arc<Material>, f64)>),
}

/// A named bulk material: composition, density and, for materials that take
/// part in optical transport, a property table.
///
/// Materials are built once by the [`crate::materials::MaterialCatalog`] and
/// shared immutably (behind `Arc`) by every volume that references them.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    /// Density in g/cm3
    pub density: f64,
    pub composition: Composition,
    optical: Option<MaterialPropertiesTable>,
}

impl Material {
    pub fn new(name: impl Into<String>, density: f64, composition: Composition) -> Self {
        let composition = match composition {
            Composition::MassFractions(parts) => Composition::MassFractions(normalise(parts)),
            Composition::Blend(parts) => Composition::Blend(normalise(parts)),
            counts => counts,
        };
        Material {
            name: name.into(),
            density,
            composition,
            optical: None,
        }
    }

    pub fn properties_table(&self) -> Option<&MaterialPropertiesTable> {
        self.optical.as_ref()
    }

    pub fn set_properties_table(&mut self, table: MaterialPropertiesTable) {
        self.optical = Some(table);
    }

    pub fn is_optical(&self) -> bool {
        self.optical.is_some()
    }

    /// Mass fraction of every element in the material, flattening blends.
    pub fn element_mass_fractions(&self) -> BTreeMap<String, f64> {
        let mut fractions = BTreeMap::new();
        self.accumulate_mass_fractions(1.0, &mut fractions);
        fractions
    }

    fn accumulate_mass_fractions(&self, weight: f64, out: &mut BTreeMap<String, f64>) {
        match &self.composition {
            Composition::MassFractions(parts) => {
                for (element, fraction) in parts {
                    *out.entry(element.symbol.clone()).or_insert(0.0) += weight * fraction;
                }
            }
            Composition::AtomCounts(parts) => {
                let formula_mass: f64 = parts
                    .iter()
                    .map(|(element, count)| element.molar_mass * f64::from(*count))
                    .sum();
                for (element, count) in parts {
                    let fraction = element.molar_mass * f64::from(*count) / formula_mass;
                    *out.entry(element.symbol.clone()).or_insert(0.0) += weight * fraction;
                }
            }
            Composition::Blend(parts) => {
                for (material, fraction) in parts {
                    material.accumulate_mass_fractions(weight * fraction, out);
                }
            }
        }
    }
}

fn normalise<T>(parts: Vec<(T, f64)>) -> Vec<(T, f64)> {
    let total: f64 = parts.iter().map(|(_, f)| f).sum();
    if total <= 0.0 {
        return parts;
    }
    parts.into_iter().map(|(item, f)| (item, f / total)).collect()
}
