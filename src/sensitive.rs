use crate::detector_unit::DetectorUnitHandles;
use crate::fast_rng::FastRng;
use crate::hits::HitsCollection;
use crate::photon_detection::PhotocathodeDetector;
use crate::scintillator_sd::ScintillatorDetector;
use crate::step::Step;
use crate::volume::{VolumeId, VolumeStore};
use log::debug;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// What a sensitive detector did with a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionOutcome {
    /// Not handled; transport continues as usual
    Ignored,
    /// A scintillator hit was recorded; the track continues
    Recorded,
    /// Photon absorbed without a hit
    Rejected,
    /// Photon absorbed and a photocathode hit emitted
    Detected,
}

impl DetectionOutcome {
    /// The transport kernel must stop and kill the track.
    pub fn kills_track(&self) -> bool {
        matches!(self, DetectionOutcome::Rejected | DetectionOutcome::Detected)
    }

    pub fn emitted_hit(&self) -> bool {
        matches!(self, DetectionOutcome::Recorded | DetectionOutcome::Detected)
    }
}

/// Per-step state a detector may touch: the worker's random stream and the
/// current event's hits. Both belong to exactly one worker.
pub struct EventContext<'a> {
    pub rng: &'a mut FastRng,
    pub hits: &'a mut HitsCollection,
}

/// Detection behaviour attached to a volume. Handlers are shared read-only
/// between workers; all mutable state arrives through [`EventContext`].
pub trait SensitiveDetector: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Called for every step taken inside the bound volume.
    fn on_volume_entry(&self, step: &Step, ctx: &mut EventContext<'_>) -> DetectionOutcome;
}

/// Mapping from volume to detection behaviour for one geometry generation.
#[derive(Debug, Default, Clone)]
pub struct SensitiveRegistry {
    handlers: HashMap<VolumeId, Arc<dyn SensitiveDetector>>,
}

impl SensitiveRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, volume: VolumeId, detector: Arc<dyn SensitiveDetector>) {
        self.handlers.insert(volume, detector);
    }

    pub fn handler(&self, volume: VolumeId) -> Option<&Arc<dyn SensitiveDetector>> {
        self.handlers.get(&volume)
    }

    pub fn is_sensitive(&self, volume: VolumeId) -> bool {
        self.handlers.contains_key(&volume)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Hand the step to the detector bound to the volume it was taken in.
    pub fn dispatch(&self, step: &Step, ctx: &mut EventContext<'_>) -> DetectionOutcome {
        match step.volume().and_then(|volume| self.handlers.get(&volume)) {
            Some(detector) => detector.on_volume_entry(step, ctx),
            None => DetectionOutcome::Ignored,
        }
    }
}

/// Bind the scintillator and photocathode behaviours to every detector
/// unit's freshly built volumes.
///
/// A unit without a scintillator or photocathode handle is skipped for that
/// region; this is not an error.
pub fn bind_sensitive_regions(
    store: &VolumeStore,
    units: &[DetectorUnitHandles],
) -> SensitiveRegistry {
    let mut registry = SensitiveRegistry::new();
    let scintillator: Arc<dyn SensitiveDetector> = Arc::new(ScintillatorDetector::new("LSSD"));

    for (copy_index, unit) in units.iter().enumerate() {
        match unit.scintillator {
            Some(volume) => registry.register(volume, Arc::clone(&scintillator)),
            None => debug!("unit {} has no scintillator volume; not bound", copy_index),
        }
        match unit.photocathode {
            Some(volume) => {
                let efficiency = store
                    .logical(volume)
                    .skin_surface
                    .as_ref()
                    .and_then(|surface| surface.efficiency().cloned());
                registry.register(volume, Arc::new(PhotocathodeDetector::new("PMTSD", efficiency)));
            }
            None => debug!("unit {} has no photocathode volume; not bound", copy_index),
        }
    }
    registry
}
