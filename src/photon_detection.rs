// Photocathode response: one Bernoulli trial per optical photon entering
// the photocathode, with the quantum efficiency at the photon's energy as
// the success probability. Accepted or not, the photon is absorbed.

use crate::fast_rng::FastRng;
use crate::hits::PhotocathodeHit;
use crate::optical::PropertyVector;
use crate::sensitive::{DetectionOutcome, EventContext, SensitiveDetector};
use crate::step::{Step, StepStatus};
use crate::units::NS;
use std::sync::Arc;

/// Touchable depth of the detector unit above the photocathode
/// (photocathode → PMT sub-assembly → unit).
pub const UNIT_DEPTH: usize = 2;

/// Accept with probability `efficiency`: a sample above it rejects.
#[inline]
pub fn sample_detection(efficiency: f64, rng: &mut FastRng) -> bool {
    rng.random() <= efficiency
}

#[derive(Debug, Clone)]
pub struct PhotocathodeDetector {
    name: String,
    efficiency: Option<Arc<PropertyVector>>,
}

impl PhotocathodeDetector {
    pub fn new(name: impl Into<String>, efficiency: Option<Arc<PropertyVector>>) -> Self {
        PhotocathodeDetector {
            name: name.into(),
            efficiency,
        }
    }

    /// Quantum efficiency at `energy`, if the photocathode carries a curve.
    pub fn quantum_efficiency(&self, energy: f64) -> Option<f64> {
        self.efficiency.as_ref().map(|curve| curve.value(energy))
    }
}

impl SensitiveDetector for PhotocathodeDetector {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_volume_entry(&self, step: &Step, ctx: &mut EventContext<'_>) -> DetectionOutcome {
        // Only photons that have just crossed into the photocathode
        if !step.track.particle.is_optical_photon() || step.pre.status != StepStatus::GeomBoundary {
            return DetectionOutcome::Ignored;
        }
        let Some(efficiency) = self.quantum_efficiency(step.kinetic_energy()) else {
            return DetectionOutcome::Ignored;
        };

        if !sample_detection(efficiency, ctx.rng) {
            return DetectionOutcome::Rejected;
        }
        ctx.hits.photocathode.push(PhotocathodeHit {
            copy_index: step.pre.copy_number(UNIT_DEPTH),
            time_ns: step.post.global_time / NS,
        });
        DetectionOutcome::Detected
    }
}
