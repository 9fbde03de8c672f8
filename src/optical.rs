use crate::error::ConfigurationError;
use crate::utilities::interpolate_linear;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Energy-indexed optical properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PropertyKey {
    RefractiveIndex,
    AbsorptionLength,
    ScintillationComponent1,
    Efficiency,
}

/// Scalar optical constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConstPropertyKey {
    ScintillationYield,
    ScintillationTimeConstant1,
    ResolutionScale,
    BirksConstant,
}

/// A property tabulated against photon energy, evaluated by clamped linear
/// interpolation.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyVector {
    energies: Vec<f64>,
    values: Vec<f64>,
}

impl PropertyVector {
    /// Build a property vector, checking that both columns have the same,
    /// non-zero length and that energies are strictly ascending.
    pub fn new(
        name: &str,
        energies: &[f64],
        values: &[f64],
    ) -> Result<Self, ConfigurationError> {
        let invalid = |reason: &str| ConfigurationError::InvalidPropertyTable {
            name: name.to_string(),
            reason: reason.to_string(),
        };
        if energies.is_empty() {
            return Err(invalid("no entries"));
        }
        if energies.len() != values.len() {
            return Err(invalid("energy and value columns differ in length"));
        }
        if energies.windows(2).any(|w| w[0] >= w[1]) {
            return Err(invalid("energies are not strictly ascending"));
        }
        Ok(PropertyVector {
            energies: energies.to_vec(),
            values: values.to_vec(),
        })
    }

    /// Same value at every tabulated energy.
    pub fn flat(name: &str, energies: &[f64], value: f64) -> Result<Self, ConfigurationError> {
        let values = vec![value; energies.len()];
        Self::new(name, energies, &values)
    }

    /// Value at `energy`. Energies outside the table take the nearest endpoint value.
    pub fn value(&self, energy: f64) -> f64 {
        interpolate_linear(&self.energies, &self.values, energy)
    }

    pub fn energies(&self) -> &[f64] {
        &self.energies
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.energies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }
}

/// Collection of optical properties attached to a material or a surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialPropertiesTable {
    properties: BTreeMap<PropertyKey, Arc<PropertyVector>>,
    constants: BTreeMap<ConstPropertyKey, f64>,
}

impl MaterialPropertiesTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_property(&mut self, key: PropertyKey, vector: PropertyVector) -> &mut Self {
        self.properties.insert(key, Arc::new(vector));
        self
    }

    pub fn add_const_property(&mut self, key: ConstPropertyKey, value: f64) -> &mut Self {
        self.constants.insert(key, value);
        self
    }

    pub fn property(&self, key: PropertyKey) -> Option<&Arc<PropertyVector>> {
        self.properties.get(&key)
    }

    pub fn const_property(&self, key: ConstPropertyKey) -> Option<f64> {
        self.constants.get(&key).copied()
    }

    pub fn has_property(&self, key: PropertyKey) -> bool {
        self.properties.contains_key(&key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceType {
    DielectricMetal,
    DielectricDielectric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceModel {
    Glisur,
    Unified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceFinish {
    Polished,
    Ground,
}

/// Optical boundary surface wrapped around ("skin" of) a logical volume.
#[derive(Debug, Clone, PartialEq)]
pub struct OpticalSurface {
    pub name: String,
    pub surface_type: SurfaceType,
    pub model: SurfaceModel,
    pub finish: SurfaceFinish,
    pub properties: MaterialPropertiesTable,
}

impl OpticalSurface {
    pub fn new(
        name: impl Into<String>,
        surface_type: SurfaceType,
        model: SurfaceModel,
        finish: SurfaceFinish,
    ) -> Self {
        OpticalSurface {
            name: name.into(),
            surface_type,
            model,
            finish,
            properties: MaterialPropertiesTable::new(),
        }
    }

    /// The detection efficiency curve, if this surface defines one.
    pub fn efficiency(&self) -> Option<&Arc<PropertyVector>> {
        self.properties.property(PropertyKey::Efficiency)
    }
}
