use crate::material::Material;
use crate::optical::OpticalSurface;
use crate::solid::Solid;
use nalgebra::Isometry3;
use std::sync::Arc;

/// Index of a logical volume within one geometry generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VolumeId {
    generation: u64,
    index: usize,
}

impl VolumeId {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Index of a placement within one geometry generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlacementId {
    generation: u64,
    index: usize,
}

/// A shape filled with a material, plus the placements of its daughters.
#[derive(Debug, Clone)]
pub struct LogicalVolume {
    pub name: String,
    pub solid: Solid,
    pub material: Arc<Material>,
    pub daughters: Vec<PlacementId>,
    pub skin_surface: Option<Arc<OpticalSurface>>,
}

/// A logical volume positioned inside a mother volume.
///
/// `transform` is active: it maps a point in the daughter's local frame into
/// the mother's frame.
#[derive(Debug, Clone)]
pub struct Placement {
    pub name: String,
    pub logical: VolumeId,
    pub mother: Option<VolumeId>,
    pub transform: Isometry3<f64>,
    pub copy_number: i32,
}

/// Arena owning every volume of one geometry generation.
///
/// Ids carry the generation they were issued for; presenting an id from an
/// older generation is a programming error and panics. Replacing the store
/// on rebuild therefore invalidates all outstanding ids at once.
#[derive(Debug, Clone)]
pub struct VolumeStore {
    generation: u64,
    logical: Vec<LogicalVolume>,
    placements: Vec<Placement>,
}

impl VolumeStore {
    pub fn new(generation: u64) -> Self {
        VolumeStore {
            generation,
            logical: Vec::new(),
            placements: Vec::new(),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn add_logical(
        &mut self,
        name: impl Into<String>,
        solid: Solid,
        material: Arc<Material>,
    ) -> VolumeId {
        self.logical.push(LogicalVolume {
            name: name.into(),
            solid,
            material,
            daughters: Vec::new(),
            skin_surface: None,
        });
        VolumeId {
            generation: self.generation,
            index: self.logical.len() - 1,
        }
    }

    /// Place `logical` inside `mother` (or as the world root when `mother` is `None`).
    pub fn place(
        &mut self,
        name: impl Into<String>,
        logical: VolumeId,
        mother: Option<VolumeId>,
        transform: Isometry3<f64>,
        copy_number: i32,
    ) -> PlacementId {
        self.check(logical.generation);
        self.placements.push(Placement {
            name: name.into(),
            logical,
            mother,
            transform,
            copy_number,
        });
        let id = PlacementId {
            generation: self.generation,
            index: self.placements.len() - 1,
        };
        if let Some(mother) = mother {
            self.logical_mut(mother).daughters.push(id);
        }
        id
    }

    pub fn set_skin_surface(&mut self, volume: VolumeId, surface: OpticalSurface) {
        self.logical_mut(volume).skin_surface = Some(Arc::new(surface));
    }

    pub fn logical(&self, id: VolumeId) -> &LogicalVolume {
        self.check(id.generation);
        &self.logical[id.index]
    }

    fn logical_mut(&mut self, id: VolumeId) -> &mut LogicalVolume {
        self.check(id.generation);
        &mut self.logical[id.index]
    }

    pub fn placement(&self, id: PlacementId) -> &Placement {
        self.check(id.generation);
        &self.placements[id.index]
    }

    pub fn placement_ids(&self) -> impl Iterator<Item = PlacementId> + '_ {
        (0..self.placements.len()).map(move |index| PlacementId {
            generation: self.generation,
            index,
        })
    }

    pub fn logical_count(&self) -> usize {
        self.logical.len()
    }

    pub fn placement_count(&self) -> usize {
        self.placements.len()
    }

    /// First placement with the given name.
    pub fn find_placement(&self, name: &str) -> Option<PlacementId> {
        self.placement_ids()
            .find(|&id| self.placement(id).name == name)
    }

    /// Every logical volume with the given name.
    pub fn find_logical(&self, name: &str) -> Vec<VolumeId> {
        (0..self.logical.len())
            .filter(|&index| self.logical[index].name == name)
            .map(|index| VolumeId {
                generation: self.generation,
                index,
            })
            .collect()
    }

    /// Transform from the placement's local frame to the world frame,
    /// composed through every ancestor placement.
    pub fn global_transform(&self, id: PlacementId) -> Isometry3<f64> {
        let mut transform = self.placement(id).transform;
        let mut mother = self.placement(id).mother;
        while let Some(volume) = mother {
            match self.placement_of(volume) {
                Some(parent) => {
                    let parent = self.placement(parent);
                    transform = parent.transform * transform;
                    mother = parent.mother;
                }
                None => break,
            }
        }
        transform
    }

    /// The (unique) placement of a logical volume, if it has been placed.
    pub fn placement_of(&self, volume: VolumeId) -> Option<PlacementId> {
        self.check(volume.generation);
        self.placement_ids()
            .find(|&id| self.placement(id).logical == volume)
    }

    /// Copy numbers from the placement of `volume` up to the world root,
    /// innermost first.
    pub fn copy_number_path(&self, volume: VolumeId) -> Vec<i32> {
        let mut path = Vec::new();
        let mut current = self.placement_of(volume);
        while let Some(id) = current {
            let placement = self.placement(id);
            path.push(placement.copy_number);
            current = placement.mother.and_then(|m| self.placement_of(m));
        }
        path
    }

    fn check(&self, generation: u64) {
        assert_eq!(
            generation, self.generation,
            "volume id from geometry generation {} used with generation {}",
            generation, self.generation
        );
    }
}
