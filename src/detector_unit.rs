use crate::data::{QE_ENERGIES, QE_VALUES};
use crate::dimensions::DetectorDimensions;
use crate::error::ConfigurationError;
use crate::material::Material;
use crate::materials::{MaterialCatalog, MaterialRole};
use crate::optical::{
    OpticalSurface, PropertyKey, PropertyVector, SurfaceFinish, SurfaceModel, SurfaceType,
};
use crate::solid::Solid;
use crate::volume::{VolumeId, VolumeStore};
use nalgebra::Isometry3;
use std::sync::Arc;

pub const ENVELOPE_NAME: &str = "DetectorUnit";
pub const BOTTLE_NAME: &str = "BottleBody";
pub const SCINTILLATOR_NAME: &str = "LS";
pub const COUPLING_NAME: &str = "Coupling";
pub const PMT_NAME: &str = "PMT";
pub const PMT_WINDOW_NAME: &str = "PmtWindow";
pub const PMT_BODY_NAME: &str = "PmtBody";
pub const PHOTOCATHODE_NAME: &str = "Photocathode";
pub const PHOTOCATHODE_SURFACE_NAME: &str = "Photocathode_OpSurface";

/// Materials a detector unit is made of, resolved from the catalog up front
/// so that building never starts with an unbound material.
#[derive(Debug, Clone)]
pub struct UnitMaterials {
    pub air: Arc<Material>,
    pub vacuum: Arc<Material>,
    pub glass: Arc<Material>,
    pub scintillator: Arc<Material>,
    pub coupling: Arc<Material>,
    pub pmt_body: Arc<Material>,
}

impl UnitMaterials {
    pub fn from_catalog(catalog: &MaterialCatalog) -> Result<Self, ConfigurationError> {
        Ok(UnitMaterials {
            air: catalog.require(MaterialRole::Air)?,
            vacuum: catalog.require(MaterialRole::Vacuum)?,
            glass: catalog.require(MaterialRole::Glass)?,
            scintillator: catalog.require(MaterialRole::Scintillator)?,
            coupling: catalog.require(MaterialRole::Coupling)?,
            pmt_body: catalog.require(MaterialRole::PmtBody)?,
        })
    }
}

/// Volumes of one freshly built detector unit.
///
/// `scintillator` and `photocathode` are kept for sensitive-region binding.
/// A handle left empty means the region is simply not bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectorUnitHandles {
    pub envelope: VolumeId,
    pub scintillator: Option<VolumeId>,
    pub photocathode: Option<VolumeId>,
}

/// Build one detector unit (not yet placed) in `store`.
///
/// Stacked along local z, front to back: the glass bottle with its
/// scintillator fill, the optical coupling layer and the PMT sub-assembly.
/// Each call creates new volumes; the two units of a world differ only by
/// their placement.
pub fn build_detector_unit(
    store: &mut VolumeStore,
    materials: &UnitMaterials,
    dims: &DetectorDimensions,
) -> Result<DetectorUnitHandles, ConfigurationError> {
    let envelope = store.add_logical(
        ENVELOPE_NAME,
        Solid::cylinder(dims.assembly_radius(), dims.assembly_half_length()),
        Arc::clone(&materials.air),
    );

    let front = Isometry3::translation(0.0, 0.0, dims.center_offset());

    let bottle = store.add_logical(
        BOTTLE_NAME,
        Solid::tube(
            dims.bottle_inner_radius(),
            dims.bottle_outer_radius,
            dims.scintillator_half_length,
        ),
        Arc::clone(&materials.glass),
    );
    store.place(BOTTLE_NAME, bottle, Some(envelope), front, 0);

    let scintillator = store.add_logical(
        SCINTILLATOR_NAME,
        Solid::cylinder(dims.bottle_inner_radius(), dims.scintillator_half_length),
        Arc::clone(&materials.scintillator),
    );
    store.place(SCINTILLATOR_NAME, scintillator, Some(envelope), front, 0);

    let coupling = store.add_logical(
        COUPLING_NAME,
        Solid::cylinder(dims.bottle_outer_radius, dims.coupling_half_thickness),
        Arc::clone(&materials.coupling),
    );
    store.place(
        COUPLING_NAME,
        coupling,
        Some(envelope),
        Isometry3::translation(0.0, 0.0, dims.coupling_z()),
        0,
    );

    let (pmt, photocathode) = build_pmt(store, materials, dims)?;
    store.place(
        PMT_NAME,
        pmt,
        Some(envelope),
        Isometry3::translation(0.0, 0.0, dims.pmt_z()),
        0,
    );

    Ok(DetectorUnitHandles {
        envelope,
        scintillator: Some(scintillator),
        photocathode: Some(photocathode),
    })
}

/// Build the PMT sub-assembly: a vacuum envelope holding the window at its
/// front end, the metal body behind it and the photocathode disk flush
/// under the window.
///
/// Returns the sub-assembly and its photocathode.
pub fn build_pmt(
    store: &mut VolumeStore,
    materials: &UnitMaterials,
    dims: &DetectorDimensions,
) -> Result<(VolumeId, VolumeId), ConfigurationError> {
    let pmt = store.add_logical(
        PMT_NAME,
        Solid::cylinder(dims.pmt_radius, dims.pmt_half_length),
        Arc::clone(&materials.vacuum),
    );

    let window = store.add_logical(
        PMT_WINDOW_NAME,
        Solid::cylinder(dims.pmt_window_radius, dims.pmt_window_half_thickness),
        Arc::clone(&materials.glass),
    );
    store.place(
        PMT_WINDOW_NAME,
        window,
        Some(pmt),
        Isometry3::translation(0.0, 0.0, dims.pmt_window_z()),
        0,
    );

    let body = store.add_logical(
        PMT_BODY_NAME,
        Solid::tube(
            dims.pmt_body_inner_radius(),
            dims.pmt_body_radius,
            dims.pmt_body_half_length(),
        ),
        Arc::clone(&materials.pmt_body),
    );
    store.place(
        PMT_BODY_NAME,
        body,
        Some(pmt),
        Isometry3::translation(0.0, 0.0, dims.pmt_body_z()),
        0,
    );

    let photocathode = store.add_logical(
        PHOTOCATHODE_NAME,
        Solid::cylinder(dims.photocathode_radius(), dims.photocathode_half_thickness),
        Arc::clone(&materials.pmt_body),
    );
    store.place(
        PHOTOCATHODE_NAME,
        photocathode,
        Some(pmt),
        Isometry3::translation(0.0, 0.0, dims.photocathode_z()),
        0,
    );
    store.set_skin_surface(photocathode, photocathode_surface()?);

    Ok((pmt, photocathode))
}

/// Metal-reflection boundary carrying the quantum-efficiency curve.
pub fn photocathode_surface() -> Result<OpticalSurface, ConfigurationError> {
    let mut surface = OpticalSurface::new(
        PHOTOCATHODE_SURFACE_NAME,
        SurfaceType::DielectricMetal,
        SurfaceModel::Unified,
        SurfaceFinish::Polished,
    );
    surface.properties.add_property(
        PropertyKey::Efficiency,
        PropertyVector::new("EFFICIENCY", &QE_ENERGIES, &QE_VALUES)?,
    );
    Ok(surface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::MaterialDatabase;
    use crate::units::EV;
    use nalgebra::Point3;

    fn materials() -> UnitMaterials {
        let catalog = MaterialCatalog::initialize(MaterialDatabase::standard()).unwrap();
        UnitMaterials::from_catalog(&catalog).unwrap()
    }

    fn build() -> (VolumeStore, DetectorUnitHandles) {
        let mut store = VolumeStore::new(0);
        let handles =
            build_detector_unit(&mut store, &materials(), &DetectorDimensions::STANDARD).unwrap();
        (store, handles)
    }

    fn placement_z(store: &VolumeStore, name: &str) -> f64 {
        let id = store.find_placement(name).unwrap();
        store.placement(id).transform.translation.vector.z
    }

    #[test]
    fn test_envelope_sized_to_assembly() {
        let (store, handles) = build();
        let d = DetectorDimensions::STANDARD;
        assert_eq!(
            store.logical(handles.envelope).solid,
            Solid::cylinder(d.assembly_radius(), d.assembly_half_length())
        );
        assert_eq!(store.logical(handles.envelope).daughters.len(), 4);
    }

    #[test]
    fn test_stack_offsets() {
        let (store, _) = build();
        assert_eq!(placement_z(&store, BOTTLE_NAME), 108.0);
        assert_eq!(placement_z(&store, SCINTILLATOR_NAME), 108.0);
        assert_eq!(placement_z(&store, COUPLING_NAME), 67.5);
        assert_eq!(placement_z(&store, PMT_NAME), -40.5);
        assert_eq!(placement_z(&store, PMT_WINDOW_NAME), 105.0);
        assert!((placement_z(&store, PHOTOCATHODE_NAME) - 102.45).abs() < 1e-12);
    }

    #[test]
    fn test_scintillator_enclosed_by_bottle() {
        let (store, handles) = build();
        let ls = store.logical(handles.scintillator.unwrap());
        let bottle = store.logical(store.find_logical(BOTTLE_NAME)[0]);
        match (&ls.solid, &bottle.solid) {
            (
                Solid::Tube {
                    outer_radius: ls_r,
                    half_z: ls_hz,
                    ..
                },
                Solid::Tube {
                    inner_radius: bottle_r,
                    half_z: bottle_hz,
                    ..
                },
            ) => {
                assert_eq!(ls_r, bottle_r);
                assert_eq!(ls_hz, bottle_hz);
            }
            other => panic!("unexpected solids {:?}", other),
        }
        assert_eq!(ls.material.name, "LS");
    }

    #[test]
    fn test_photocathode_matches_window_and_carries_qe() {
        let (store, handles) = build();
        let cathode = store.logical(handles.photocathode.unwrap());
        let d = DetectorDimensions::STANDARD;
        assert_eq!(
            cathode.solid,
            Solid::cylinder(d.pmt_window_radius, d.photocathode_half_thickness)
        );
        let surface = cathode.skin_surface.as_ref().unwrap();
        assert_eq!(surface.surface_type, SurfaceType::DielectricMetal);
        assert_eq!(surface.efficiency().unwrap().value(2.9 * EV), 0.28);

        // The photocathode sits in the vacuum, clear of the window glass
        let window = store.find_placement(PMT_WINDOW_NAME).unwrap();
        let window_solid = &store.logical(store.placement(window).logical).solid;
        let local = store.placement(window).transform.inverse()
            * Point3::new(0.0, 0.0, d.photocathode_z());
        assert!(!window_solid.contains(&local, 0.0));
    }

    #[test]
    fn test_each_build_creates_new_volumes() {
        let materials = materials();
        let mut store = VolumeStore::new(0);
        let a = build_detector_unit(&mut store, &materials, &DetectorDimensions::STANDARD).unwrap();
        let b = build_detector_unit(&mut store, &materials, &DetectorDimensions::STANDARD).unwrap();
        assert_ne!(a.envelope, b.envelope);
        assert_ne!(a.photocathode, b.photocathode);
        assert_eq!(store.logical(a.envelope).solid, store.logical(b.envelope).solid);
    }
}
