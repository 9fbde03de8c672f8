use ls_detector::optical::PropertyKey;
use ls_detector::{
    Config, ConfigurationError, DetectorDimensions, DetectorSession, GeometryParameters,
    MaterialCatalog, MaterialDatabase, MaterialRole, WorldAssembler,
};

#[test]
fn test_standard_catalog_binds_every_role() {
    let catalog = MaterialCatalog::initialize(MaterialDatabase::standard()).unwrap();
    assert!(catalog.is_complete());
    for role in MaterialRole::ALL {
        let material = catalog.require(role).unwrap();
        assert_eq!(material.name, role.material_name());
        assert!(material.density > 0.0);
    }

    let ls = catalog.require(MaterialRole::Scintillator).unwrap();
    assert!(ls.is_optical());
    let table = ls.properties_table().unwrap();
    assert!(table.has_property(PropertyKey::RefractiveIndex));
    assert!(table.has_property(PropertyKey::AbsorptionLength));
    let total: f64 = ls.element_mass_fractions().values().sum();
    assert!((total - 1.0).abs() < 1e-9);

    // Structural materials carry no optics
    assert!(!catalog.require(MaterialRole::Source).unwrap().is_optical());
    assert!(!catalog.require(MaterialRole::Epoxy).unwrap().is_optical());
}

#[test]
fn test_all_missing_materials_named_in_one_error() {
    let db = MaterialDatabase::standard()
        .without_material("Epoxy")
        .without_material("G4_Co");
    let err = MaterialCatalog::initialize(db).unwrap_err();
    assert_eq!(err.to_string(), "missing materials: G4_Co, Epoxy");
}

#[test]
fn test_missing_constituent_fails_the_material() {
    // Stainless steel needs iron; nothing else does
    let err = MaterialCatalog::initialize(MaterialDatabase::standard().without_element("Fe"))
        .unwrap_err();
    match err {
        ConfigurationError::MissingMaterials(names) => assert_eq!(names, ["G4_STAINLESS-STEEL"]),
        other => panic!("unexpected error {:?}", other),
    }

    // A blend fails with any of its components
    let err = MaterialCatalog::initialize(MaterialDatabase::standard().without_material("PPO"))
        .unwrap_err();
    assert_eq!(err.to_string(), "missing materials: LS");
}

#[test]
fn test_missing_base_elements_reported_together() {
    let db = MaterialDatabase::standard()
        .without_element("N")
        .without_element("H");
    let err = MaterialCatalog::initialize(db).unwrap_err();
    assert_eq!(err.to_string(), "missing base elements: H, N");
}

#[test]
fn test_optics_require_validation() {
    let mut catalog = MaterialCatalog::new(MaterialDatabase::standard());
    catalog.define_materials().unwrap();
    assert!(matches!(
        catalog.define_optical_properties(),
        Err(ConfigurationError::OpticsBeforeValidation)
    ));
    catalog.validate_materials().unwrap();
    catalog.define_optical_properties().unwrap();
    assert!(catalog.is_complete());
}

#[test]
fn test_incomplete_catalog_cannot_build_geometry() {
    let mut catalog = MaterialCatalog::new(MaterialDatabase::standard().without_material("Epoxy"));
    catalog.define_materials().unwrap();
    assert!(catalog.validate_materials().is_err());

    let err = WorldAssembler::new(DetectorDimensions::STANDARD)
        .construct(&catalog, &GeometryParameters::default(), 0)
        .unwrap_err();
    assert!(matches!(err, ConfigurationError::UnboundMaterial(name) if name == "Epoxy"));

    let err = DetectorSession::with_database(
        Config::default(),
        MaterialDatabase::standard().without_material("G4_Galactic"),
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "missing materials: G4_Galactic");
}
