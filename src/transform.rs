// Placement transforms for the source and the two detector units.
//
// Convention: rotations are active and right-handed. A placement maps a
// point from the daughter's local frame into the mother frame,
// x_mother = R * x_local + t. A detector unit's local +z axis is its
// boresight (the scintillator end). The units lie in the x-y plane; the
// movable unit is swept about the polar z axis.

use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion, Unit, Vector3};
use std::f64::consts::FRAC_PI_2;

/// Rotation turning a unit's local +z (boresight) towards -x, i.e. from a
/// position on the +x axis back at the origin.
pub fn facing_rotation() -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::y_axis(), -FRAC_PI_2)
}

/// Rotation by `angle` about the polar axis.
pub fn polar_rotation(angle: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angle)
}

/// Placement of a detector unit whose centre sits `center_distance` from the
/// origin at polar angle `angle`, boresighted on the origin.
///
/// Position and orientation are rotated together, so the unit stays aimed
/// at the source for every angle. At `angle = 0` this is the fixed unit.
pub fn unit_placement(center_distance: f64, angle: f64) -> Isometry3<f64> {
    let sweep = polar_rotation(angle);
    let position = sweep * Vector3::new(center_distance, 0.0, 0.0);
    Isometry3::from_parts(Translation3::from(position), sweep * facing_rotation())
}

/// Source disk at the origin with its symmetry axis along the placement (x) axis.
pub fn source_placement() -> Isometry3<f64> {
    Isometry3::from_parts(
        Translation3::identity(),
        UnitQuaternion::from_axis_angle(&Vector3::y_axis(), FRAC_PI_2),
    )
}

/// World-frame direction of a placed volume's local +z axis.
pub fn boresight(transform: &Isometry3<f64>) -> Unit<Vector3<f64>> {
    Unit::new_normalize(transform.rotation * Vector3::z())
}

/// World-frame position of a placed volume's local origin.
pub fn origin(transform: &Isometry3<f64>) -> Point3<f64> {
    transform * Point3::origin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_fixed_unit_faces_source() {
        let t = unit_placement(308.0, 0.0);
        let pos = origin(&t);
        assert!((pos - Point3::new(308.0, 0.0, 0.0)).norm() < EPS);
        let dir = boresight(&t);
        assert!((dir.into_inner() - Vector3::new(-1.0, 0.0, 0.0)).norm() < EPS);
    }

    #[test]
    fn test_quarter_turn() {
        let t = unit_placement(100.0, PI / 2.0);
        assert!((origin(&t) - Point3::new(0.0, 100.0, 0.0)).norm() < 1e-10);
        assert!((boresight(&t).into_inner() - Vector3::new(0.0, -1.0, 0.0)).norm() < EPS);
    }

    #[test]
    fn test_boresight_antiparallel_to_position() {
        for step in 0..72 {
            let angle = step as f64 * 5.0_f64.to_radians();
            let t = unit_placement(250.0, angle);
            let radial = origin(&t).coords.normalize();
            let dot = radial.dot(&boresight(&t));
            assert!((dot + 1.0).abs() < 1e-12, "angle {} dot {}", angle, dot);
            assert!((origin(&t).coords.norm() - 250.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_source_axis_along_x() {
        let dir = boresight(&source_placement());
        assert!((dir.into_inner() - Vector3::new(1.0, 0.0, 0.0)).norm() < EPS);
    }
}
