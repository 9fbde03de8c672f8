use crate::data::{self, Recipe, BASE_ELEMENTS, MATERIAL_RECIPES};
use crate::element::Element;
use crate::error::ConfigurationError;
use crate::material::{Composition, Material};
use crate::optical::{ConstPropertyKey, MaterialPropertiesTable, PropertyKey, PropertyVector};
use log::{debug, info};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

/// The materials the detector needs, one binding each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MaterialRole {
    Air,
    Vacuum,
    Source,
    Glass,
    Scintillator,
    PmtBody,
    Coupling,
    Epoxy,
}

impl MaterialRole {
    pub const ALL: [MaterialRole; 8] = [
        MaterialRole::Air,
        MaterialRole::Vacuum,
        MaterialRole::Source,
        MaterialRole::Glass,
        MaterialRole::Scintillator,
        MaterialRole::PmtBody,
        MaterialRole::Coupling,
        MaterialRole::Epoxy,
    ];

    /// Name of the material resolved for this role.
    pub fn material_name(&self) -> &'static str {
        match self {
            MaterialRole::Air => "G4_AIR",
            MaterialRole::Vacuum => "G4_Galactic",
            MaterialRole::Source => "G4_Co",
            MaterialRole::Glass => "G4_Pyrex_Glass",
            MaterialRole::Scintillator => "LS",
            MaterialRole::PmtBody => "G4_STAINLESS-STEEL",
            MaterialRole::Coupling => "G4_SILICON_DIOXIDE",
            MaterialRole::Epoxy => "Epoxy",
        }
    }
}

/// Registry that resolves element symbols and material names to shared
/// instances, building each material from its recipe on first request.
///
/// The standard database knows every entry in [`crate::data`]; entries can
/// be withheld to model an installation without them.
#[derive(Debug, Clone)]
pub struct MaterialDatabase {
    withheld_elements: HashSet<String>,
    withheld_materials: HashSet<String>,
    elements: HashMap<String, Arc<Element>>,
    materials: HashMap<String, Arc<Material>>,
}

impl MaterialDatabase {
    pub fn standard() -> Self {
        MaterialDatabase {
            withheld_elements: HashSet::new(),
            withheld_materials: HashSet::new(),
            elements: HashMap::new(),
            materials: HashMap::new(),
        }
    }

    /// Copy of this database that cannot resolve `symbol`.
    pub fn without_element(mut self, symbol: &str) -> Self {
        self.withheld_elements.insert(symbol.to_string());
        self.elements.remove(symbol);
        self
    }

    /// Copy of this database that cannot resolve the material `name`.
    pub fn without_material(mut self, name: &str) -> Self {
        self.withheld_materials.insert(name.to_string());
        self.materials.remove(name);
        self
    }

    pub fn find_or_build_element(&mut self, symbol: &str) -> Option<Arc<Element>> {
        if self.withheld_elements.contains(symbol) {
            return None;
        }
        if let Some(element) = self.elements.get(symbol) {
            return Some(Arc::clone(element));
        }
        let element = Arc::new(Element::from_symbol(symbol)?);
        self.elements.insert(symbol.to_string(), Arc::clone(&element));
        Some(element)
    }

    /// Resolve a material by name. Returns `None` if the name is unknown or
    /// withheld, or if any constituent cannot be resolved.
    pub fn find_or_build_material(&mut self, name: &str) -> Option<Arc<Material>> {
        if self.withheld_materials.contains(name) {
            return None;
        }
        if let Some(material) = self.materials.get(name) {
            return Some(Arc::clone(material));
        }
        let (density, recipe) = *MATERIAL_RECIPES.get(name)?;
        let composition = match recipe {
            Recipe::MassFractions(parts) => Composition::MassFractions(
                parts
                    .iter()
                    .map(|&(symbol, f)| self.find_or_build_element(symbol).map(|e| (e, f)))
                    .collect::<Option<Vec<_>>>()?,
            ),
            Recipe::AtomCounts(parts) => Composition::AtomCounts(
                parts
                    .iter()
                    .map(|&(symbol, n)| self.find_or_build_element(symbol).map(|e| (e, n)))
                    .collect::<Option<Vec<_>>>()?,
            ),
            Recipe::Blend(parts) => Composition::Blend(
                parts
                    .iter()
                    .map(|&(sub, f)| self.find_or_build_material(sub).map(|m| (m, f)))
                    .collect::<Option<Vec<_>>>()?,
            ),
        };
        let material = Arc::new(Material::new(name, density, composition));
        self.materials.insert(name.to_string(), Arc::clone(&material));
        Some(material)
    }
}

impl Default for MaterialDatabase {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CatalogState {
    Empty,
    Defined,
    Validated,
    Complete,
}

/// The fixed set of materials used by the detector geometry.
///
/// Initialisation runs strictly in order, once:
/// [`define_materials`](Self::define_materials) →
/// [`validate_materials`](Self::validate_materials) →
/// [`define_optical_properties`](Self::define_optical_properties).
/// [`MaterialCatalog::initialize`] performs all three.
#[derive(Debug, Clone)]
pub struct MaterialCatalog {
    database: MaterialDatabase,
    bindings: BTreeMap<MaterialRole, Option<Arc<Material>>>,
    state: CatalogState,
}

impl MaterialCatalog {
    pub fn new(database: MaterialDatabase) -> Self {
        MaterialCatalog {
            database,
            bindings: BTreeMap::new(),
            state: CatalogState::Empty,
        }
    }

    /// Build a complete catalog (materials, validation, optics).
    pub fn initialize(database: MaterialDatabase) -> Result<Self, ConfigurationError> {
        let mut catalog = Self::new(database);
        catalog.define_materials()?;
        catalog.validate_materials()?;
        catalog.define_optical_properties()?;
        Ok(catalog)
    }

    /// Resolve every base element and every role's material.
    ///
    /// Missing base elements fail here, all reported together. A material
    /// that cannot be resolved leaves an empty binding for
    /// [`validate_materials`](Self::validate_materials) to report.
    pub fn define_materials(&mut self) -> Result<(), ConfigurationError> {
        let missing_elements: Vec<String> = BASE_ELEMENTS
            .iter()
            .filter(|symbol| self.database.find_or_build_element(symbol).is_none())
            .map(|symbol| symbol.to_string())
            .collect();
        if !missing_elements.is_empty() {
            return Err(ConfigurationError::MissingElements(missing_elements));
        }

        for role in MaterialRole::ALL {
            let material = self.database.find_or_build_material(role.material_name());
            self.bindings.insert(role, material);
        }
        self.state = CatalogState::Defined;
        info!("defined {} detector materials", self.bindings.len());
        Ok(())
    }

    /// Read-only check that every role has a material; reports all missing
    /// materials in a single error.
    pub fn validate_materials(&mut self) -> Result<(), ConfigurationError> {
        let missing: Vec<String> = MaterialRole::ALL
            .iter()
            .filter(|role| !matches!(self.bindings.get(*role), Some(Some(_))))
            .map(|role| role.material_name().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigurationError::MissingMaterials(missing));
        }
        self.state = CatalogState::Validated;
        Ok(())
    }

    /// Attach optical property tables to air, vacuum, glass, coupling and
    /// scintillator. Requires a validated catalog.
    pub fn define_optical_properties(&mut self) -> Result<(), ConfigurationError> {
        if self.state != CatalogState::Validated {
            return Err(ConfigurationError::OpticsBeforeValidation);
        }
        let energies = &data::PHOTON_ENERGIES;

        let rindex_only = |value: f64| -> Result<MaterialPropertiesTable, ConfigurationError> {
            let mut table = MaterialPropertiesTable::new();
            table.add_property(
                PropertyKey::RefractiveIndex,
                PropertyVector::flat("RINDEX", energies, value)?,
            );
            Ok(table)
        };

        let mut scintillator = rindex_only(data::RINDEX_SCINTILLATOR)?;
        scintillator
            .add_property(
                PropertyKey::AbsorptionLength,
                PropertyVector::new("ABSLENGTH", energies, &data::ABSORPTION_LENGTH_SCINTILLATOR)?,
            )
            .add_property(
                PropertyKey::ScintillationComponent1,
                PropertyVector::new(
                    "SCINTILLATIONCOMPONENT1",
                    energies,
                    &data::EMISSION_SCINTILLATOR,
                )?,
            )
            .add_const_property(ConstPropertyKey::ScintillationYield, data::SCINTILLATION_YIELD)
            .add_const_property(
                ConstPropertyKey::ScintillationTimeConstant1,
                data::SCINTILLATION_DECAY_TIME,
            )
            .add_const_property(ConstPropertyKey::ResolutionScale, data::RESOLUTION_SCALE)
            .add_const_property(ConstPropertyKey::BirksConstant, data::BIRKS_CONSTANT);

        let tables = [
            (MaterialRole::Air, rindex_only(data::RINDEX_AIR)?),
            (MaterialRole::Vacuum, rindex_only(data::RINDEX_AIR)?),
            (MaterialRole::Glass, rindex_only(data::RINDEX_GLASS)?),
            (MaterialRole::Coupling, rindex_only(data::RINDEX_COUPLING)?),
            (MaterialRole::Scintillator, scintillator),
        ];
        for (role, table) in tables {
            let binding = self
                .bindings
                .get_mut(&role)
                .and_then(Option::as_mut)
                .ok_or_else(|| ConfigurationError::UnboundMaterial(role.material_name().into()))?;
            Arc::make_mut(binding).set_properties_table(table);
            debug!("attached optical properties to {}", role.material_name());
        }
        self.state = CatalogState::Complete;
        Ok(())
    }

    /// Material bound to `role`, if resolved.
    pub fn material(&self, role: MaterialRole) -> Option<&Arc<Material>> {
        self.bindings.get(&role).and_then(Option::as_ref)
    }

    /// Material bound to `role`, or a fatal error naming it.
    pub fn require(&self, role: MaterialRole) -> Result<Arc<Material>, ConfigurationError> {
        self.material(role)
            .cloned()
            .ok_or_else(|| ConfigurationError::UnboundMaterial(role.material_name().into()))
    }

    /// True once all three initialisation steps have succeeded.
    pub fn is_complete(&self) -> bool {
        self.state == CatalogState::Complete
    }
}
