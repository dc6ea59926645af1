use std::ops::{ Add, Sub, Neg, Mul, Div };

use crate::feq;

/// A homogeneous 4-component tuple.
///
/// Points carry `w == 1.0` and vectors carry `w == 0.0`. Keeping `w` around
/// lets the usual arithmetic stay honest: subtracting two points yields a
/// vector, adding a vector to a point yields a point, and translation
/// matrices leave vectors untouched.
///
/// # Examples
///
/// ```
/// use rtc::tuple::Tuple;
///
/// let from = Tuple::point(1.0, 2.0, 3.0);
/// let to = Tuple::point(4.0, 6.0, 3.0);
/// let v = to - from;
///
/// assert!(v.is_vector());
/// assert_eq!(v.magnitude(), 5.0);
/// ```
#[derive(Debug, Default, Copy, Clone)]
pub struct Tuple {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

/// Tuples compare component-wise within `FEQ_EPSILON`.
impl PartialEq for Tuple {
    fn eq(&self, other: &Tuple) -> bool {
        feq(self.x, other.x)
            && feq(self.y, other.y)
            && feq(self.z, other.z)
            && feq(self.w, other.w)
    }
}

impl Tuple {
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Tuple {
        Tuple { x, y, z, w }
    }

    pub fn point(x: f64, y: f64, z: f64) -> Tuple {
        Tuple { x, y, z, w: 1.0 }
    }

    pub fn vector(x: f64, y: f64, z: f64) -> Tuple {
        Tuple { x, y, z, w: 0.0 }
    }

    /// The point at the origin.
    pub fn origin() -> Tuple {
        Tuple::point(0.0, 0.0, 0.0)
    }

    pub fn is_point(&self) -> bool {
        self.w == 1.0
    }

    pub fn is_vector(&self) -> bool {
        self.w == 0.0
    }

    /// Returns a copy of this tuple with `w` forced to `0.0`.
    pub fn as_vector(&self) -> Tuple {
        Tuple { w: 0.0, ..*self }
    }

    /// Returns a copy of this tuple with `w` forced to `1.0`.
    pub fn as_point(&self) -> Tuple {
        Tuple { w: 1.0, ..*self }
    }

    pub fn magnitude(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Scales the tuple to unit length.
    ///
    /// A zero-length tuple is returned unchanged rather than filled with NaN.
    pub fn normalize(&self) -> Tuple {
        let mag = self.magnitude();
        if mag == 0.0 {
            return *self;
        }

        *self / mag
    }

    pub fn dot(&self, other: &Tuple) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// The cross product of two vectors. Only `x`, `y` and `z` participate;
    /// the result is always a vector.
    pub fn cross(&self, other: &Tuple) -> Tuple {
        Tuple::vector(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Reflects this vector around `normal`.
    ///
    /// `normal` is expected to be unit length.
    pub fn reflect(&self, normal: &Tuple) -> Tuple {
        *self - *normal * (2.0 * self.dot(normal))
    }
}

impl Add for Tuple {
    type Output = Tuple;

    fn add(self, other: Tuple) -> Tuple {
        Tuple::new(
            self.x + other.x,
            self.y + other.y,
            self.z + other.z,
            self.w + other.w,
        )
    }
}

impl Sub for Tuple {
    type Output = Tuple;

    fn sub(self, other: Tuple) -> Tuple {
        Tuple::new(
            self.x - other.x,
            self.y - other.y,
            self.z - other.z,
            self.w - other.w,
        )
    }
}

impl Neg for Tuple {
    type Output = Tuple;

    fn neg(self) -> Tuple {
        Tuple::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl Mul<f64> for Tuple {
    type Output = Tuple;

    fn mul(self, s: f64) -> Tuple {
        Tuple::new(self.x * s, self.y * s, self.z * s, self.w * s)
    }
}

impl Mul<Tuple> for f64 {
    type Output = Tuple;

    fn mul(self, t: Tuple) -> Tuple {
        t * self
    }
}

impl Div<f64> for Tuple {
    type Output = Tuple;

    fn div(self, s: f64) -> Tuple {
        Tuple::new(self.x / s, self.y / s, self.z / s, self.w / s)
    }
}

/// Builds a tuple from a slice of up to four numbers; missing components are
/// zero. Used by the scene loader, which stores coordinates as JSON arrays.
impl From<&[f64]> for Tuple {
    fn from(v: &[f64]) -> Tuple {
        let at = |i: usize| v.get(i).copied().unwrap_or(0.0);
        Tuple::new(at(0), at(1), at(2), at(3))
    }
}

#[test]
fn point_has_w_of_one() {
    let p = Tuple::new(4.3, -4.2, 3.1, 1.0);

    assert!(p.is_point());
    assert!(!p.is_vector());
    assert_eq!(p, Tuple::point(4.3, -4.2, 3.1));
}

#[test]
fn vector_has_w_of_zero() {
    let v = Tuple::new(4.3, -4.2, 3.1, 0.0);

    assert!(v.is_vector());
    assert!(!v.is_point());
    assert_eq!(v, Tuple::vector(4.3, -4.2, 3.1));
}

#[test]
fn adding_vector_to_point_gives_point() {
    let p = Tuple::point(3.0, -2.0, 5.0);
    let v = Tuple::vector(-2.0, 3.0, 1.0);

    assert_eq!(p + v, Tuple::point(1.0, 1.0, 6.0));
}

#[test]
fn subtracting_two_points_gives_vector() {
    let p1 = Tuple::point(3.0, 2.0, 1.0);
    let p2 = Tuple::point(5.0, 6.0, 7.0);

    assert_eq!(p1 - p2, Tuple::vector(-2.0, -4.0, -6.0));
}

#[test]
fn subtracting_vector_from_point_gives_point() {
    let p = Tuple::point(3.0, 2.0, 1.0);
    let v = Tuple::vector(5.0, 6.0, 7.0);

    assert_eq!(p - v, Tuple::point(-2.0, -4.0, -6.0));
}

#[test]
fn negating_a_tuple() {
    let a = Tuple::new(1.0, -2.0, 3.0, -4.0);

    assert_eq!(-a, Tuple::new(-1.0, 2.0, -3.0, 4.0));
}

#[test]
fn scaling_and_dividing() {
    let a = Tuple::new(1.0, -2.0, 3.0, -4.0);

    assert_eq!(a * 3.5, Tuple::new(3.5, -7.0, 10.5, -14.0));
    assert_eq!(0.5 * a, Tuple::new(0.5, -1.0, 1.5, -2.0));
    assert_eq!(a / 2.0, Tuple::new(0.5, -1.0, 1.5, -2.0));
}

#[test]
fn magnitude_and_normalization() {
    let v = Tuple::vector(1.0, 2.0, 3.0);
    let n = v.normalize();

    assert_eq!(v.magnitude(), 14.0f64.sqrt());
    assert_eq!(n, Tuple::vector(
        1.0 / 14.0f64.sqrt(), 2.0 / 14.0f64.sqrt(), 3.0 / 14.0f64.sqrt()
    ));
    assert!(feq(n.magnitude(), 1.0));
    assert_eq!(Tuple::vector(4.0, 0.0, 0.0).normalize(),
        Tuple::vector(1.0, 0.0, 0.0));
}

#[test]
fn normalizing_zero_vector_is_harmless() {
    let zero = Tuple::vector(0.0, 0.0, 0.0);

    assert_eq!(zero.normalize(), zero);
}

#[test]
fn dot_and_cross_products() {
    let a = Tuple::vector(1.0, 2.0, 3.0);
    let b = Tuple::vector(2.0, 3.0, 4.0);

    assert_eq!(a.dot(&b), 20.0);
    assert_eq!(a.cross(&b), Tuple::vector(-1.0, 2.0, -1.0));
    assert_eq!(b.cross(&a), Tuple::vector(1.0, -2.0, 1.0));
}

#[test]
fn reflecting_off_slanted_surface() {
    let v = Tuple::vector(0.0, -1.0, 0.0);
    let half = 2.0f64.sqrt() / 2.0;
    let n = Tuple::vector(half, half, 0.0);

    assert_eq!(v.reflect(&n), Tuple::vector(1.0, 0.0, 0.0));
}

#[test]
fn reflecting_at_45_degrees() {
    let v = Tuple::vector(1.0, -1.0, 0.0);
    let n = Tuple::vector(0.0, 1.0, 0.0);

    assert_eq!(v.reflect(&n), Tuple::vector(1.0, 1.0, 0.0));
}
