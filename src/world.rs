use crate::detector_unit::{build_detector_unit, DetectorUnitHandles, UnitMaterials};
use crate::dimensions::DetectorDimensions;
use crate::error::ConfigurationError;
use crate::materials::{MaterialCatalog, MaterialRole};
use crate::parameters::GeometryParameters;
use crate::solid::Solid;
use crate::transform;
use crate::volume::{PlacementId, VolumeId, VolumeStore};
use log::{info, warn};
use nalgebra::{Isometry3, Point3, Vector3};
use std::sync::Arc;

pub const WORLD_NAME: &str = "World";
pub const SOURCE_DISK_NAME: &str = "SourceDisk";
pub const SOURCE_NAME: &str = "Source";
pub const FIXED_UNIT_NAME: &str = "DetectorUnit_Fixed";
pub const MOVABLE_UNIT_NAME: &str = "DetectorUnit_Movable";

/// Points within this distance of a surface count as touching, not overlapping.
const OVERLAP_TOLERANCE: f64 = 1e-6;

/// A surface point of one placed volume that is outside its mother or
/// inside a sibling.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlap {
    pub volume: String,
    /// Sibling the point intrudes into; `None` when the volume sticks out
    /// of its mother.
    pub other: Option<String>,
    pub mother: String,
    /// Offending point in world coordinates
    pub point: Point3<f64>,
    /// How far past the surface the point lies
    pub depth: f64,
}

/// World position and boresight of one placement.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementSummary {
    pub name: String,
    pub copy_number: i32,
    pub position: Point3<f64>,
    pub boresight: Vector3<f64>,
}

/// One complete geometry generation: the world volume, the source and both
/// detector units.
#[derive(Debug, Clone)]
pub struct World {
    store: VolumeStore,
    root: VolumeId,
    units: [DetectorUnitHandles; 2],
    unit_placements: [PlacementId; 2],
    distance: f64,
    angle: f64,
    overlaps: Vec<Overlap>,
}

impl World {
    pub fn generation(&self) -> u64 {
        self.store.generation()
    }

    pub fn store(&self) -> &VolumeStore {
        &self.store
    }

    pub fn root(&self) -> VolumeId {
        self.root
    }

    /// Handles of the fixed (copy 0) and movable (copy 1) units.
    pub fn detector_units(&self) -> &[DetectorUnitHandles; 2] {
        &self.units
    }

    /// Placement of the unit with the given copy index.
    pub fn unit_placement(&self, copy_index: usize) -> Option<PlacementId> {
        self.unit_placements.get(copy_index).copied()
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn overlaps(&self) -> &[Overlap] {
        &self.overlaps
    }

    /// Every placement with its world position and boresight, in build order.
    pub fn placements(&self) -> Vec<PlacementSummary> {
        self.store
            .placement_ids()
            .map(|id| {
                let placement = self.store.placement(id);
                let global = self.store.global_transform(id);
                PlacementSummary {
                    name: placement.name.clone(),
                    copy_number: placement.copy_number,
                    position: transform::origin(&global),
                    boresight: transform::boresight(&global).into_inner(),
                }
            })
            .collect()
    }

    /// Placement names are not unique across the two units; this returns
    /// the first in build order.
    pub fn find_placement(&self, name: &str) -> Option<PlacementId> {
        self.store.find_placement(name)
    }

    pub fn find_volumes(&self, name: &str) -> Vec<VolumeId> {
        self.store.find_logical(name)
    }

    /// Copy index of the detector unit enclosing `volume`, if any.
    pub fn unit_copy_index(&self, volume: VolumeId) -> Option<i32> {
        self.units
            .iter()
            .position(|unit| {
                unit.envelope == volume
                    || unit.scintillator == Some(volume)
                    || unit.photocathode == Some(volume)
                    || self.is_descendant(volume, unit.envelope)
            })
            .map(|index| index as i32)
    }

    fn is_descendant(&self, volume: VolumeId, ancestor: VolumeId) -> bool {
        let mut current = self.store.placement_of(volume);
        while let Some(id) = current {
            match self.store.placement(id).mother {
                Some(mother) if mother == ancestor => return true,
                Some(mother) => current = self.store.placement_of(mother),
                None => return false,
            }
        }
        false
    }
}

/// Builds a world from scratch for a given parameter state.
#[derive(Debug, Clone)]
pub struct WorldAssembler {
    dims: DetectorDimensions,
    /// Surface samples per placed volume; `None` disables the overlap check.
    overlap_resolution: Option<usize>,
}

impl WorldAssembler {
    pub fn new(dims: DetectorDimensions) -> Self {
        WorldAssembler {
            dims,
            overlap_resolution: Some(1000),
        }
    }

    pub fn with_overlap_check(mut self, resolution: Option<usize>) -> Self {
        self.overlap_resolution = resolution;
        self
    }

    pub fn dimensions(&self) -> &DetectorDimensions {
        &self.dims
    }

    /// Build the full world: world box, source, then the fixed and movable
    /// detector units. Nothing is reused from any earlier generation.
    ///
    /// Both units sit `distance + center_offset` from the origin, so the
    /// scintillator centre is `distance` from the source. The movable unit
    /// is swept by `angle` about z and keeps facing the source.
    pub fn construct(
        &self,
        catalog: &MaterialCatalog,
        params: &GeometryParameters,
        generation: u64,
    ) -> Result<World, ConfigurationError> {
        let dims = &self.dims;
        let unit_materials = UnitMaterials::from_catalog(catalog)?;
        let epoxy = catalog.require(MaterialRole::Epoxy)?;
        let cobalt = catalog.require(MaterialRole::Source)?;

        let mut store = VolumeStore::new(generation);

        let root = store.add_logical(
            WORLD_NAME,
            Solid::cube(dims.world_half_extent),
            Arc::clone(&unit_materials.air),
        );
        store.place(WORLD_NAME, root, None, Isometry3::identity(), 0);

        let disk = store.add_logical(
            SOURCE_DISK_NAME,
            Solid::cylinder(dims.source_disk_radius, dims.source_disk_half_thickness),
            epoxy,
        );
        store.place(
            SOURCE_DISK_NAME,
            disk,
            Some(root),
            transform::source_placement(),
            0,
        );
        let source = store.add_logical(
            SOURCE_NAME,
            Solid::cylinder(dims.source_radius, dims.source_half_thickness),
            cobalt,
        );
        store.place(SOURCE_NAME, source, Some(disk), Isometry3::identity(), 0);

        let center_distance = params.distance() + dims.center_offset();
        let mut units = Vec::with_capacity(2);
        let mut unit_placements = Vec::with_capacity(2);
        let poses = [(FIXED_UNIT_NAME, 0.0), (MOVABLE_UNIT_NAME, params.angle())];
        for (copy_number, (name, angle)) in poses.into_iter().enumerate() {
            let unit = build_detector_unit(&mut store, &unit_materials, dims)?;
            let placement = store.place(
                name,
                unit.envelope,
                Some(root),
                transform::unit_placement(center_distance, angle),
                copy_number as i32,
            );
            units.push(unit);
            unit_placements.push(placement);
        }

        info!(
            "built geometry generation {}: distance {} mm, angle {} deg, {} volumes",
            generation,
            params.distance(),
            params.angle().to_degrees(),
            store.logical_count()
        );

        let overlaps = match self.overlap_resolution {
            Some(resolution) => check_overlaps(&store, resolution),
            None => Vec::new(),
        };
        for overlap in &overlaps {
            warn!(
                "overlap: {} {} (in {}) by {:.4} mm at ({:.3}, {:.3}, {:.3})",
                overlap.volume,
                match &overlap.other {
                    Some(other) => format!("intrudes into {}", other),
                    None => "protrudes from its mother".to_string(),
                },
                overlap.mother,
                overlap.depth,
                overlap.point.x,
                overlap.point.y,
                overlap.point.z
            );
        }

        Ok(World {
            store,
            root,
            units: [units[0], units[1]],
            unit_placements: [unit_placements[0], unit_placements[1]],
            distance: params.distance(),
            angle: params.angle(),
            overlaps,
        })
    }
}

/// Sample `resolution` surface points of every placed daughter and report
/// each point that leaves the mother or enters a sibling. The daughter's
/// interior point is also checked against each sibling. Only the first
/// offending point per pair is reported.
pub fn check_overlaps(store: &VolumeStore, resolution: usize) -> Vec<Overlap> {
    let mut overlaps = Vec::new();
    for id in store.placement_ids() {
        let placement = store.placement(id);
        let Some(mother_id) = placement.mother else {
            continue;
        };
        let mother = store.logical(mother_id);
        let volume = store.logical(placement.logical);
        let mother_to_world = store
            .placement_of(mother_id)
            .map(|m| store.global_transform(m))
            .unwrap_or_else(Isometry3::identity);

        // Surface points in the mother's frame
        let points: Vec<Point3<f64>> = volume
            .solid
            .surface_points(resolution)
            .into_iter()
            .map(|p| placement.transform * p)
            .collect();

        if let Some(p) = points
            .iter()
            .find(|p| !mother.solid.contains(p, OVERLAP_TOLERANCE))
        {
            overlaps.push(Overlap {
                volume: placement.name.clone(),
                other: None,
                mother: mother.name.clone(),
                point: mother_to_world * p,
                depth: -mother.solid.signed_depth(p),
            });
        }

        let bounds = volume.solid.bounding_box().transformed(&placement.transform);
        let interior = placement.transform * volume.solid.interior_point();
        for &sibling_id in &mother.daughters {
            if sibling_id == id {
                continue;
            }
            let sibling = store.placement(sibling_id);
            let sibling_solid = &store.logical(sibling.logical).solid;
            let sibling_bounds = sibling_solid.bounding_box().transformed(&sibling.transform);
            if !bounds.intersects(&sibling_bounds, OVERLAP_TOLERANCE) {
                continue;
            }
            let to_sibling = sibling.transform.inverse();
            // Surface samples miss a sibling placed exactly on top of this
            // volume, so its interior point is tested as well.
            let intrusion = points
                .iter()
                .chain(std::iter::once(&interior))
                .find_map(|p| {
                    let local = to_sibling * p;
                    sibling_solid
                        .contains_strictly(&local, OVERLAP_TOLERANCE)
                        .then(|| (p, sibling_solid.signed_depth(&local)))
                });
            if let Some((p, depth)) = intrusion {
                overlaps.push(Overlap {
                    volume: placement.name.clone(),
                    other: Some(sibling.name.clone()),
                    mother: mother.name.clone(),
                    point: mother_to_world * p,
                    depth,
                });
            }
        }
    }
    overlaps
}
