use crate::units::{M, MM};

/// Fixed dimensions of the world, the source and one detector unit.
///
/// Only primitive dimensions are stored. Everything that follows from them
/// (inner radii, assembly length, the scintillator's offset from the unit
/// centre) is computed by the methods below, so the stacked volumes always
/// meet flush no matter which primitive is changed.
///
/// Lengths are half-extents where the name says so, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorDimensions {
    pub world_half_extent: f64,

    /// Active Co-60 capsule
    pub source_radius: f64,
    pub source_half_thickness: f64,
    /// Epoxy disk the capsule is sealed in
    pub source_disk_radius: f64,
    pub source_disk_half_thickness: f64,

    pub bottle_outer_radius: f64,
    pub bottle_wall_thickness: f64,
    pub scintillator_half_length: f64,

    pub coupling_half_thickness: f64,

    pub pmt_radius: f64,
    pub pmt_half_length: f64,
    pub pmt_window_radius: f64,
    pub pmt_window_half_thickness: f64,
    pub photocathode_half_thickness: f64,
    pub pmt_body_radius: f64,
    pub pmt_body_wall_thickness: f64,
}

impl DetectorDimensions {
    pub const STANDARD: DetectorDimensions = DetectorDimensions {
        world_half_extent: 0.5 * M,
        source_radius: 2.5 * MM,
        source_half_thickness: 0.5 * MM,
        source_disk_radius: 12.7 * MM,
        source_disk_half_thickness: 3.0 * MM,
        bottle_outer_radius: 28.0 * MM,
        bottle_wall_thickness: 2.0 * MM,
        scintillator_half_length: 40.0 * MM,
        coupling_half_thickness: 0.5 * MM,
        pmt_radius: 30.0 * MM,
        pmt_half_length: 107.5 * MM,
        pmt_window_radius: 26.5 * MM,
        pmt_window_half_thickness: 2.5 * MM,
        photocathode_half_thickness: 0.05 * MM,
        pmt_body_radius: 29.5 * MM,
        pmt_body_wall_thickness: 1.5 * MM,
    };

    pub fn bottle_inner_radius(&self) -> f64 {
        self.bottle_outer_radius - self.bottle_wall_thickness
    }

    /// Half-length of the detector-unit envelope: scintillator, coupling
    /// layer and PMT stacked end to end.
    pub fn assembly_half_length(&self) -> f64 {
        self.scintillator_half_length + self.coupling_half_thickness + self.pmt_half_length
    }

    pub fn assembly_radius(&self) -> f64 {
        self.bottle_outer_radius.max(self.pmt_radius)
    }

    /// Axial offset of the scintillator centre from the unit centre (towards
    /// the unit's front face).
    pub fn center_offset(&self) -> f64 {
        self.assembly_half_length() - self.scintillator_half_length
    }

    /// Local z of the coupling layer centre inside the unit.
    pub fn coupling_z(&self) -> f64 {
        self.center_offset() - self.scintillator_half_length - self.coupling_half_thickness
    }

    /// Local z of the PMT sub-assembly centre inside the unit.
    pub fn pmt_z(&self) -> f64 {
        self.coupling_z() - self.coupling_half_thickness - self.pmt_half_length
    }

    /// Local z of the window centre inside the PMT sub-assembly.
    pub fn pmt_window_z(&self) -> f64 {
        self.pmt_half_length - self.pmt_window_half_thickness
    }

    /// The body runs from the window down to the back of the sub-assembly.
    pub fn pmt_body_half_length(&self) -> f64 {
        self.pmt_half_length - self.pmt_window_half_thickness
    }

    pub fn pmt_body_z(&self) -> f64 {
        -self.pmt_window_half_thickness
    }

    pub fn pmt_body_inner_radius(&self) -> f64 {
        self.pmt_body_radius - self.pmt_body_wall_thickness
    }

    /// Local z of the photocathode disk, flush under the window.
    pub fn photocathode_z(&self) -> f64 {
        self.pmt_window_z() - self.pmt_window_half_thickness - self.photocathode_half_thickness
    }

    /// The photocathode covers the full window.
    pub fn photocathode_radius(&self) -> f64 {
        self.pmt_window_radius
    }
}

impl Default for DetectorDimensions {
    fn default() -> Self {
        Self::STANDARD
    }
}
