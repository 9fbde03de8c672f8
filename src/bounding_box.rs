use nalgebra::{Isometry3, Point3};

/// Axis-aligned box, used to cheaply reject sibling pairs before the
/// point-sampling overlap test.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    pub lower_left: [f64; 3],
    pub upper_right: [f64; 3],
}

impl BoundingBox {
    pub fn new(lower_left: [f64; 3], upper_right: [f64; 3]) -> Self {
        BoundingBox {
            lower_left,
            upper_right,
        }
    }

    /// Box symmetric about the origin.
    pub fn from_half_extents(half: [f64; 3]) -> Self {
        Self::new([-half[0], -half[1], -half[2]], half)
    }

    /// Axis-aligned box enclosing this box after a rigid transform.
    pub fn transformed(&self, transform: &Isometry3<f64>) -> Self {
        let mut lower = [f64::INFINITY; 3];
        let mut upper = [f64::NEG_INFINITY; 3];
        for corner in 0..8 {
            let local = Point3::new(
                if corner & 1 == 0 { self.lower_left[0] } else { self.upper_right[0] },
                if corner & 2 == 0 { self.lower_left[1] } else { self.upper_right[1] },
                if corner & 4 == 0 { self.lower_left[2] } else { self.upper_right[2] },
            );
            let p = transform * local;
            for axis in 0..3 {
                lower[axis] = lower[axis].min(p[axis]);
                upper[axis] = upper[axis].max(p[axis]);
            }
        }
        Self::new(lower, upper)
    }

    /// True if the boxes share interior volume (touching faces do not count).
    pub fn intersects(&self, other: &BoundingBox, tolerance: f64) -> bool {
        (0..3).all(|axis| {
            self.lower_left[axis] < other.upper_right[axis] - tolerance
                && other.lower_left[axis] < self.upper_right[axis] - tolerance
        })
    }
}
