pub mod consts;

pub mod tuple;
pub mod matrix;
pub mod ray;

pub mod color;
pub mod pattern;
pub mod material;
pub mod light;

pub mod geometry;
pub mod shape;
pub mod intersect;

pub mod world;
pub mod camera;
pub mod parallel;
pub mod canvas;

pub mod obj;
pub mod scene;

use consts::FEQ_EPSILON;

/// Approximate floating point equality, used by every `PartialEq` in the
/// crate that compares computed geometry. Equal infinities compare equal.
pub fn feq(left: f64, right: f64) -> bool {
    left == right || (left - right).abs() < FEQ_EPSILON
}

#[test]
fn feq_tolerates_rounding() {
    assert!(feq(0.1 + 0.2, 0.3));
    assert!(feq(f64::INFINITY, f64::INFINITY));
    assert!(!feq(1.0, 1.001));
}
