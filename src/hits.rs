use nalgebra::Point3;

/// One step recorded inside a scintillator fill.
#[derive(Debug, Clone, PartialEq)]
pub struct ScintillatorHit {
    pub track_id: i32,
    pub parent_id: i32,           // 0 for primaries
    pub particle_name: String,
    pub process_name: String,     // Creator process, "primary" for primaries
    pub volume_name: String,
    pub position: Point3<f64>,    // mm, world frame
    pub time: f64,                // ns
    pub kinetic_energy: f64,      // MeV
    pub energy_deposit: f64,      // MeV
}

/// One optical photon accepted by a photocathode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotocathodeHit {
    pub copy_index: i32, // Detector unit: 0 fixed, 1 movable
    pub time_ns: f64,
}

/// Hits of a single event. Owned by the worker processing the event and
/// handed to the reporting layer at end of event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitsCollection {
    pub scintillator: Vec<ScintillatorHit>,
    pub photocathode: Vec<PhotocathodeHit>,
}

impl HitsCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.scintillator.is_empty() && self.photocathode.is_empty()
    }

    /// Detected photons per detector unit copy index.
    pub fn photocathode_counts(&self) -> [usize; 2] {
        let mut counts = [0; 2];
        for hit in &self.photocathode {
            if let Some(count) = counts.get_mut(hit.copy_index as usize) {
                *count += 1;
            }
        }
        counts
    }

    pub fn total_energy_deposit(&self) -> f64 {
        self.scintillator.iter().map(|hit| hit.energy_deposit).sum()
    }

    pub fn clear(&mut self) {
        self.scintillator.clear();
        self.photocathode.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photocathode_counts_per_unit() {
        let mut hits = HitsCollection::new();
        assert!(hits.is_empty());
        for copy_index in [0, 1, 1, 1, 0] {
            hits.photocathode.push(PhotocathodeHit {
                copy_index,
                time_ns: 3.0,
            });
        }
        assert_eq!(hits.photocathode_counts(), [2, 3]);
        hits.clear();
        assert!(hits.is_empty());
    }
}
