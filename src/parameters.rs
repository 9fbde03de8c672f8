use crate::units::{CM, DEG};
use log::{debug, warn};

pub const DEFAULT_DISTANCE: f64 = 20.0 * CM;
pub const DEFAULT_ANGLE: f64 = 45.0 * DEG;

/// Run-time geometry state: source-to-scintillator distance and the angle
/// of the movable detector unit about the polar (z) axis.
///
/// Every setter marks the geometry dirty; the owning session rebuilds the
/// world before the next run and then clears the flag. Values are accepted
/// as given. Non-positive or non-finite values are logged but kept, and show
/// up as overlap findings when the world is rebuilt.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryParameters {
    distance: f64,
    angle: f64,
    dirty: bool,
}

impl GeometryParameters {
    /// New parameters start dirty: no world has been built for them yet.
    pub fn new(distance: f64, angle: f64) -> Self {
        GeometryParameters {
            distance,
            angle,
            dirty: true,
        }
    }

    pub fn set_angle(&mut self, value: f64) {
        if !value.is_finite() {
            warn!("movable unit angle set to non-finite value {}", value);
        }
        debug!("movable unit angle -> {} deg", value / DEG);
        self.angle = value;
        self.dirty = true;
    }

    pub fn set_distance(&mut self, value: f64) {
        if !(value.is_finite() && value > 0.0) {
            warn!("detector distance set to {} mm; expect overlaps", value);
        }
        debug!("detector distance -> {} mm", value);
        self.distance = value;
        self.dirty = true;
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

impl Default for GeometryParameters {
    fn default() -> Self {
        Self::new(DEFAULT_DISTANCE, DEFAULT_ANGLE)
    }
}
