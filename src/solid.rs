use crate::bounding_box::BoundingBox;
use nalgebra::Point3;
use std::f64::consts::TAU;

/// Low-discrepancy step used to spread surface samples (inverse golden ratio).
const GOLDEN: f64 = 0.618_033_988_749_894_9;
/// Second generator of the R2 sequence.
const PLASTIC: f64 = 0.754_877_666_246_692_7;

/// Shapes used by the detector, defined in their own local frame centred
/// on the origin with z as the symmetry axis.
#[derive(Debug, Clone, PartialEq)]
pub enum Solid {
    Box {
        half_x: f64,
        half_y: f64,
        half_z: f64,
    },
    /// Full-turn cylindrical shell (a solid cylinder when `inner_radius` is 0).
    Tube {
        inner_radius: f64,
        outer_radius: f64,
        half_z: f64,
    },
}

impl Solid {
    pub fn cube(half: f64) -> Self {
        Solid::Box {
            half_x: half,
            half_y: half,
            half_z: half,
        }
    }

    pub fn tube(inner_radius: f64, outer_radius: f64, half_z: f64) -> Self {
        Solid::Tube {
            inner_radius,
            outer_radius,
            half_z,
        }
    }

    pub fn cylinder(radius: f64, half_z: f64) -> Self {
        Self::tube(0.0, radius, half_z)
    }

    /// Point lies inside the solid or within `tolerance` of its surface.
    pub fn contains(&self, p: &Point3<f64>, tolerance: f64) -> bool {
        self.signed_depth(p) >= -tolerance
    }

    /// Point lies inside the solid by more than `tolerance`.
    pub fn contains_strictly(&self, p: &Point3<f64>, tolerance: f64) -> bool {
        self.signed_depth(p) > tolerance
    }

    /// Distance from the point to the nearest surface, positive inside and
    /// negative outside (along the limiting coordinate).
    pub fn signed_depth(&self, p: &Point3<f64>) -> f64 {
        match *self {
            Solid::Box {
                half_x,
                half_y,
                half_z,
            } => (half_x - p.x.abs())
                .min(half_y - p.y.abs())
                .min(half_z - p.z.abs()),
            Solid::Tube {
                inner_radius,
                outer_radius,
                half_z,
            } => {
                let r = p.x.hypot(p.y);
                let radial = if inner_radius > 0.0 {
                    (outer_radius - r).min(r - inner_radius)
                } else {
                    outer_radius - r
                };
                radial.min(half_z - p.z.abs())
            }
        }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        match *self {
            Solid::Box {
                half_x,
                half_y,
                half_z,
            } => BoundingBox::from_half_extents([half_x, half_y, half_z]),
            Solid::Tube {
                outer_radius,
                half_z,
                ..
            } => BoundingBox::from_half_extents([outer_radius, outer_radius, half_z]),
        }
    }

    /// A point well inside the solid: the centre, or mid-wall for a shell.
    pub fn interior_point(&self) -> Point3<f64> {
        match *self {
            Solid::Box { .. } => Point3::origin(),
            Solid::Tube {
                inner_radius,
                outer_radius,
                ..
            } if inner_radius > 0.0 => Point3::new(0.5 * (inner_radius + outer_radius), 0.0, 0.0),
            Solid::Tube { .. } => Point3::origin(),
        }
    }

    /// `count` points on the surface, spread over every face. The sequence
    /// is deterministic so repeated checks of the same geometry agree.
    pub fn surface_points(&self, count: usize) -> Vec<Point3<f64>> {
        (0..count)
            .map(|i| {
                let u = ((i as f64 + 0.5) * GOLDEN).fract();
                let v = ((i as f64 + 0.5) * PLASTIC).fract();
                self.surface_point(i, u, v)
            })
            .collect()
    }

    fn surface_point(&self, i: usize, u: f64, v: f64) -> Point3<f64> {
        match *self {
            Solid::Box {
                half_x,
                half_y,
                half_z,
            } => {
                let a = 2.0 * u - 1.0;
                let b = 2.0 * v - 1.0;
                match i % 6 {
                    0 => Point3::new(half_x, a * half_y, b * half_z),
                    1 => Point3::new(-half_x, a * half_y, b * half_z),
                    2 => Point3::new(a * half_x, half_y, b * half_z),
                    3 => Point3::new(a * half_x, -half_y, b * half_z),
                    4 => Point3::new(a * half_x, b * half_y, half_z),
                    _ => Point3::new(a * half_x, b * half_y, -half_z),
                }
            }
            Solid::Tube {
                inner_radius,
                outer_radius,
                half_z,
            } => {
                let phi = TAU * v;
                let (sin, cos) = phi.sin_cos();
                let face = if inner_radius > 0.0 { i % 4 } else { i % 3 };
                match face {
                    0 => Point3::new(
                        outer_radius * cos,
                        outer_radius * sin,
                        -half_z + 2.0 * half_z * u,
                    ),
                    1 | 2 => {
                        let r2 = inner_radius * inner_radius
                            + u * (outer_radius * outer_radius - inner_radius * inner_radius);
                        let r = r2.sqrt();
                        let z = if face == 1 { half_z } else { -half_z };
                        Point3::new(r * cos, r * sin, z)
                    }
                    _ => Point3::new(
                        inner_radius * cos,
                        inner_radius * sin,
                        -half_z + 2.0 * half_z * u,
                    ),
                }
            }
        }
    }
}
