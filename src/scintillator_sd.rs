use crate::hits::ScintillatorHit;
use crate::sensitive::{DetectionOutcome, EventContext, SensitiveDetector};
use crate::step::Step;

/// Records charged-particle and gamma steps inside a scintillator fill.
///
/// A step is recorded when it deposits energy or when it is the first step
/// of a track (a track produced inside the fill). Optical photons produced
/// by the scintillator are not recorded; they are counted at the
/// photocathode instead.
#[derive(Debug, Clone)]
pub struct ScintillatorDetector {
    name: String,
}

impl ScintillatorDetector {
    pub fn new(name: impl Into<String>) -> Self {
        ScintillatorDetector { name: name.into() }
    }
}

impl SensitiveDetector for ScintillatorDetector {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_volume_entry(&self, step: &Step, ctx: &mut EventContext<'_>) -> DetectionOutcome {
        if step.track.particle.is_optical_photon() {
            return DetectionOutcome::Ignored;
        }
        if step.energy_deposit <= 0.0 && !step.is_first_step {
            return DetectionOutcome::Ignored;
        }
        ctx.hits.scintillator.push(ScintillatorHit {
            track_id: step.track.track_id,
            parent_id: step.track.parent_id,
            particle_name: step.track.particle.name().to_string(),
            process_name: step.track.process_name().to_string(),
            volume_name: step.pre.volume_name.clone(),
            position: step.post.position,
            time: step.post.global_time,
            kinetic_energy: step.kinetic_energy(),
            energy_deposit: step.energy_deposit,
        });
        DetectionOutcome::Recorded
    }
}
