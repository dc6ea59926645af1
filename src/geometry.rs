use crate::consts::FEQ_EPSILON;
use crate::matrix::Matrix4;
use crate::ray::Ray;
use crate::tuple::Tuple;

/// An axis-aligned bounding box.
///
/// An *empty* box has its minimum at positive infinity and its maximum at
/// negative infinity, so that adding any point to it yields a box around just
/// that point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub minimum: Tuple,
    pub maximum: Tuple,
}

impl Default for Bounds {
    fn default() -> Bounds {
        Bounds::empty()
    }
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, min_z: f64,
        max_x: f64, max_y: f64, max_z: f64) -> Bounds {
        Bounds {
            minimum: Tuple::point(min_x, min_y, min_z),
            maximum: Tuple::point(max_x, max_y, max_z),
        }
    }

    pub fn empty() -> Bounds {
        let inf = f64::INFINITY;
        Bounds::new(inf, inf, inf, -inf, -inf, -inf)
    }

    /// A box covering all of space.
    pub fn infinite() -> Bounds {
        let inf = f64::INFINITY;
        Bounds::new(-inf, -inf, -inf, inf, inf, inf)
    }

    /// The smallest box containing every point in `points`.
    pub fn around(points: &[Tuple]) -> Bounds {
        let mut b = Bounds::empty();
        for p in points {
            b.add_point(*p);
        }

        b
    }

    pub fn is_empty(&self) -> bool {
        self.minimum.x > self.maximum.x
            || self.minimum.y > self.maximum.y
            || self.minimum.z > self.maximum.z
    }

    fn is_finite(&self) -> bool {
        [self.minimum, self.maximum].iter()
            .all(|p| p.x.is_finite() && p.y.is_finite() && p.z.is_finite())
    }

    pub fn add_point(&mut self, p: Tuple) {
        self.minimum.x = self.minimum.x.min(p.x);
        self.minimum.y = self.minimum.y.min(p.y);
        self.minimum.z = self.minimum.z.min(p.z);
        self.maximum.x = self.maximum.x.max(p.x);
        self.maximum.y = self.maximum.y.max(p.y);
        self.maximum.z = self.maximum.z.max(p.z);
    }

    /// Grows this box to also contain `other`.
    pub fn merge(&mut self, other: &Bounds) {
        if other.is_empty() {
            return;
        }

        self.add_point(other.minimum);
        self.add_point(other.maximum);
    }

    pub fn contains_point(&self, p: Tuple) -> bool {
        (self.minimum.x..=self.maximum.x).contains(&p.x)
            && (self.minimum.y..=self.maximum.y).contains(&p.y)
            && (self.minimum.z..=self.maximum.z).contains(&p.z)
    }

    /// The eight corners of the box.
    pub fn corners(&self) -> [Tuple; 8] {
        let (lo, hi) = (self.minimum, self.maximum);
        [
            Tuple::point(lo.x, lo.y, lo.z),
            Tuple::point(lo.x, lo.y, hi.z),
            Tuple::point(lo.x, hi.y, lo.z),
            Tuple::point(lo.x, hi.y, hi.z),
            Tuple::point(hi.x, lo.y, lo.z),
            Tuple::point(hi.x, lo.y, hi.z),
            Tuple::point(hi.x, hi.y, lo.z),
            Tuple::point(hi.x, hi.y, hi.z),
        ]
    }

    /// Transforms the box by `m` and returns the axis-aligned box around the
    /// eight transformed corners.
    ///
    /// An empty box stays empty. A box with an infinite extent becomes the
    /// infinite box, since rotating an infinite slab can spill into any axis.
    pub fn transform(&self, m: &Matrix4) -> Bounds {
        if self.is_empty() {
            return Bounds::empty();
        }

        if !self.is_finite() {
            return Bounds::infinite();
        }

        let moved: Vec<Tuple> = self.corners().iter()
            .map(|c| *m * *c)
            .collect();

        Bounds::around(&moved)
    }

    /// Finds where a ray enters and leaves the slab `[min, max]` along one
    /// axis. The smaller `t` is returned first.
    ///
    /// Near-zero directions divide into infinity instead of branching, which
    /// keeps the sign of the numerator.
    pub fn check_axis(min: f64, max: f64, origin: f64, direction: f64)
        -> (f64, f64) {
        let tmin_numerator = min - origin;
        let tmax_numerator = max - origin;

        let (tmin, tmax) = if direction.abs() >= FEQ_EPSILON {
            (tmin_numerator / direction, tmax_numerator / direction)
        } else {
            (tmin_numerator * f64::INFINITY, tmax_numerator * f64::INFINITY)
        };

        if tmin > tmax { (tmax, tmin) } else { (tmin, tmax) }
    }

    /// Slab test. Returns the entry and exit `t` of the ray, or `None` when
    /// it misses.
    pub fn intersect(&self, ray: &Ray) -> Option<(f64, f64)> {
        if self.is_empty() {
            return None;
        }

        let (xtmin, xtmax) = Bounds::check_axis(
            self.minimum.x, self.maximum.x, ray.origin.x, ray.direction.x);
        let (ytmin, ytmax) = Bounds::check_axis(
            self.minimum.y, self.maximum.y, ray.origin.y, ray.direction.y);
        let (ztmin, ztmax) = Bounds::check_axis(
            self.minimum.z, self.maximum.z, ray.origin.z, ray.direction.z);

        let tmin = xtmin.max(ytmin).max(ztmin);
        let tmax = xtmax.min(ytmax).min(ztmax);

        if tmin > tmax {
            None
        } else {
            Some((tmin, tmax))
        }
    }

    pub fn hits(&self, ray: &Ray) -> bool {
        self.intersect(ray).is_some()
    }
}

/// Precomputed data for a flat triangle: its corners, two edge vectors
/// and the face normal.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TriangleInfo {
    pub p1: Tuple,
    pub p2: Tuple,
    pub p3: Tuple,
    pub e1: Tuple,
    pub e2: Tuple,
    pub normal: Tuple,
}

impl TriangleInfo {
    pub fn new(p1: Tuple, p2: Tuple, p3: Tuple) -> TriangleInfo {
        let (p1, p2, p3) = (p1.as_point(), p2.as_point(), p3.as_point());
        let e1 = p2 - p1;
        let e2 = p3 - p1;
        let normal = e2.cross(&e1).normalize();

        TriangleInfo { p1, p2, p3, e1, e2, normal }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::around(&[self.p1, self.p2, self.p3])
    }

    /// Möller-Trumbore. Returns `(t, u, v)` for a hit, `None` for a miss or a
    /// ray parallel to the triangle's plane.
    pub fn intersect(&self, ray: &Ray) -> Option<(f64, f64, f64)> {
        let dir_cross_e2 = ray.direction.cross(&self.e2);
        let det = self.e1.dot(&dir_cross_e2);
        if det.abs() < FEQ_EPSILON {
            return None;
        }

        let f = 1.0 / det;
        let p1_to_origin = ray.origin - self.p1;
        let u = f * p1_to_origin.dot(&dir_cross_e2);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let origin_cross_e1 = p1_to_origin.cross(&self.e1);
        let v = f * ray.direction.dot(&origin_cross_e1);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * self.e2.dot(&origin_cross_e1);
        Some((t, u, v))
    }
}

/// A triangle with a normal at each vertex, interpolated across the face.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SmoothTriangleInfo {
    pub tri: TriangleInfo,
    pub n1: Tuple,
    pub n2: Tuple,
    pub n3: Tuple,
}

impl SmoothTriangleInfo {
    pub fn new(p1: Tuple, p2: Tuple, p3: Tuple,
        n1: Tuple, n2: Tuple, n3: Tuple) -> SmoothTriangleInfo {
        SmoothTriangleInfo {
            tri: TriangleInfo::new(p1, p2, p3),
            n1: n1.as_vector(),
            n2: n2.as_vector(),
            n3: n3.as_vector(),
        }
    }

    pub fn normal_at(&self, u: f64, v: f64) -> Tuple {
        self.n2 * u + self.n3 * v + self.n1 * (1.0 - u - v)
    }
}

#[test]
fn empty_bounds_absorb_points() {
    let mut b = Bounds::empty();
    assert!(b.is_empty());

    b.add_point(Tuple::point(-5.0, 2.0, 0.0));
    b.add_point(Tuple::point(7.0, 0.0, -3.0));

    assert!(!b.is_empty());
    assert_eq!(b, Bounds::new(-5.0, 0.0, -3.0, 7.0, 2.0, 0.0));
}

#[test]
fn merging_bounds() {
    let mut a = Bounds::new(-5.0, -2.0, 0.0, 7.0, 4.0, 4.0);
    let b = Bounds::new(8.0, -7.0, -2.0, 14.0, 2.0, 8.0);
    a.merge(&b);
    a.merge(&Bounds::empty());

    assert_eq!(a, Bounds::new(-5.0, -7.0, -2.0, 14.0, 4.0, 8.0));
}

#[test]
fn bounds_contain_points() {
    let b = Bounds::new(5.0, -2.0, 0.0, 11.0, 4.0, 7.0);

    assert!(b.contains_point(Tuple::point(5.0, -2.0, 0.0)));
    assert!(b.contains_point(Tuple::point(8.0, 1.0, 3.0)));
    assert!(!b.contains_point(Tuple::point(3.0, 0.0, 3.0)));
    assert!(!b.contains_point(Tuple::point(8.0, 1.0, 8.0)));
}

#[test]
fn transforming_bounds() {
    use std::f64::consts::FRAC_PI_4;

    let b = Bounds::new(-1.0, -1.0, -1.0, 1.0, 1.0, 1.0);
    let m = Matrix4::rotation_x(FRAC_PI_4) * Matrix4::rotation_y(FRAC_PI_4);
    let t = b.transform(&m);

    assert_eq!(t.minimum, Tuple::point(-1.4142, -1.7071, -1.7071));
    assert_eq!(t.maximum, Tuple::point(1.4142, 1.7071, 1.7071));
}

#[test]
fn transforming_infinite_and_empty_bounds() {
    let plane = Bounds::new(f64::NEG_INFINITY, 0.0, f64::NEG_INFINITY,
        f64::INFINITY, 0.0, f64::INFINITY);
    let m = Matrix4::rotation_z(1.0);

    assert_eq!(plane.transform(&m), Bounds::infinite());
    assert!(Bounds::empty().transform(&m).is_empty());
}

#[test]
fn ray_against_bounds() {
    let b = Bounds::new(5.0, -2.0, 0.0, 11.0, 4.0, 7.0);
    let hit = Ray::new(Tuple::point(15.0, 1.0, 2.0), Tuple::vector(-1.0, 0.0, 0.0));
    let miss = Ray::new(Tuple::point(15.0, 20.0, 2.0), Tuple::vector(-1.0, 0.0, 0.0));
    let inside = Ray::new(Tuple::point(8.0, 1.0, 3.0), Tuple::vector(0.0, 0.0, 1.0));

    assert_eq!(b.intersect(&hit), Some((4.0, 10.0)));
    assert!(!b.hits(&miss));
    assert!(b.hits(&inside));
    assert!(!Bounds::empty().hits(&hit));
}

#[test]
fn triangle_precomputes_edges_and_normal() {
    let t = TriangleInfo::new(
        Tuple::point(0.0, 1.0, 0.0),
        Tuple::point(-1.0, 0.0, 0.0),
        Tuple::point(1.0, 0.0, 0.0));

    assert_eq!(t.e1, Tuple::vector(-1.0, -1.0, 0.0));
    assert_eq!(t.e2, Tuple::vector(1.0, -1.0, 0.0));
    assert_eq!(t.normal, Tuple::vector(0.0, 0.0, -1.0));
    assert_eq!(t.bounds(), Bounds::new(-1.0, 0.0, 0.0, 1.0, 1.0, 0.0));
}
