use crate::matrix::Matrix4;
use crate::tuple::Tuple;

/// A half-line with an origin point and a direction vector.
///
/// The direction is not normalized; intersection `t` values are measured in
/// multiples of its length.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Ray {
    pub origin: Tuple,
    pub direction: Tuple,
}

impl Ray {
    /// Creates a ray, coercing `origin` to a point and `direction` to a
    /// vector.
    pub fn new(origin: Tuple, direction: Tuple) -> Ray {
        Ray {
            origin: origin.as_point(),
            direction: direction.as_vector(),
        }
    }

    pub fn position(&self, t: f64) -> Tuple {
        self.origin + self.direction * t
    }

    pub fn transform(&self, m: &Matrix4) -> Ray {
        Ray {
            origin: *m * self.origin,
            direction: *m * self.direction,
        }
    }
}

#[test]
fn computing_points_along_a_ray() {
    let r = Ray::new(Tuple::point(2.0, 3.0, 4.0), Tuple::vector(1.0, 0.0, 0.0));

    assert_eq!(r.position(0.0), Tuple::point(2.0, 3.0, 4.0));
    assert_eq!(r.position(1.0), Tuple::point(3.0, 3.0, 4.0));
    assert_eq!(r.position(-1.0), Tuple::point(1.0, 3.0, 4.0));
    assert_eq!(r.position(2.5), Tuple::point(4.5, 3.0, 4.0));
}

#[test]
fn translating_a_ray() {
    let r = Ray::new(Tuple::point(1.0, 2.0, 3.0), Tuple::vector(0.0, 1.0, 0.0));
    let t = r.transform(&Matrix4::translation(3.0, 4.0, 5.0));

    assert_eq!(t.origin, Tuple::point(4.0, 6.0, 8.0));
    assert_eq!(t.direction, Tuple::vector(0.0, 1.0, 0.0));
}

#[test]
fn scaling_a_ray() {
    let r = Ray::new(Tuple::point(1.0, 2.0, 3.0), Tuple::vector(0.0, 1.0, 0.0));
    let t = r.transform(&Matrix4::scaling(2.0, 3.0, 4.0));

    assert_eq!(t.origin, Tuple::point(2.0, 6.0, 12.0));
    assert_eq!(t.direction, Tuple::vector(0.0, 3.0, 0.0));
}
