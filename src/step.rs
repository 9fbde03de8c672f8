// Read-only view of one transport step, as handed over by the external
// transport kernel to the sensitive detectors.

use crate::volume::{VolumeId, VolumeStore};
use nalgebra::Point3;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    OpticalPhoton,
    Gamma,
    Electron,
    Positron,
    Other(String),
}

impl ParticleKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "opticalphoton" => ParticleKind::OpticalPhoton,
            "gamma" => ParticleKind::Gamma,
            "e-" => ParticleKind::Electron,
            "e+" => ParticleKind::Positron,
            other => ParticleKind::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ParticleKind::OpticalPhoton => "opticalphoton",
            ParticleKind::Gamma => "gamma",
            ParticleKind::Electron => "e-",
            ParticleKind::Positron => "e+",
            ParticleKind::Other(name) => name,
        }
    }

    pub fn is_optical_photon(&self) -> bool {
        matches!(self, ParticleKind::OpticalPhoton)
    }
}

impl fmt::Display for ParticleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What limited the step at a step point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    WorldBoundary,
    /// The point lies on a boundary between two volumes
    GeomBoundary,
    AtRest,
    AlongStep,
    PostStep,
    Undefined,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepPoint {
    pub position: Point3<f64>,
    pub global_time: f64,
    pub kinetic_energy: f64,
    pub status: StepStatus,
    pub volume: Option<VolumeId>,
    pub volume_name: String,
    /// Copy numbers of the touchable history, innermost first
    pub copy_numbers: Vec<i32>,
}

impl StepPoint {
    /// A point outside every volume; use [`StepPoint::located_in`] to place it.
    pub fn new(position: Point3<f64>, global_time: f64, kinetic_energy: f64, status: StepStatus) -> Self {
        StepPoint {
            position,
            global_time,
            kinetic_energy,
            status,
            volume: None,
            volume_name: String::new(),
            copy_numbers: Vec::new(),
        }
    }

    /// Attach the point to `volume`, filling in its name and touchable history.
    pub fn located_in(mut self, store: &VolumeStore, volume: VolumeId) -> Self {
        self.volume = Some(volume);
        self.volume_name = store.logical(volume).name.clone();
        self.copy_numbers = store.copy_number_path(volume);
        self
    }

    /// Copy number `depth` levels above the point's volume (0 is the volume
    /// itself). Levels past the world root read as 0.
    pub fn copy_number(&self, depth: usize) -> i32 {
        self.copy_numbers.get(depth).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackInfo {
    pub track_id: i32,
    pub parent_id: i32, // 0 for primaries
    pub particle: ParticleKind,
    pub creator_process: Option<String>, // None for primaries
}

impl TrackInfo {
    pub fn primary(track_id: i32, particle: ParticleKind) -> Self {
        TrackInfo {
            track_id,
            parent_id: 0,
            particle,
            creator_process: None,
        }
    }

    pub fn secondary(track_id: i32, parent_id: i32, particle: ParticleKind, process: &str) -> Self {
        TrackInfo {
            track_id,
            parent_id,
            particle,
            creator_process: Some(process.to_string()),
        }
    }

    pub fn process_name(&self) -> &str {
        self.creator_process.as_deref().unwrap_or("primary")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub track: TrackInfo,
    pub pre: StepPoint,
    pub post: StepPoint,
    pub energy_deposit: f64,
    pub is_first_step: bool,
}

impl Step {
    /// The track's kinetic energy after the step.
    pub fn kinetic_energy(&self) -> f64 {
        self.post.kinetic_energy
    }

    /// Volume the step was taken in.
    pub fn volume(&self) -> Option<VolumeId> {
        self.pre.volume
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_names_round_trip() {
        for name in ["opticalphoton", "gamma", "e-", "e+", "alpha"] {
            assert_eq!(ParticleKind::from_name(name).name(), name);
        }
        assert!(ParticleKind::from_name("opticalphoton").is_optical_photon());
        assert!(!ParticleKind::Gamma.is_optical_photon());
    }

    #[test]
    fn test_copy_number_past_root_is_zero() {
        let mut point = StepPoint::new(Point3::origin(), 0.0, 0.0, StepStatus::GeomBoundary);
        point.copy_numbers = vec![0, 0, 1, 0];
        assert_eq!(point.copy_number(2), 1);
        assert_eq!(point.copy_number(9), 0);
    }

    #[test]
    fn test_process_name_for_primary() {
        assert_eq!(TrackInfo::primary(1, ParticleKind::Gamma).process_name(), "primary");
        let secondary = TrackInfo::secondary(2, 1, ParticleKind::Electron, "compt");
        assert_eq!(secondary.process_name(), "compt");
    }
}
