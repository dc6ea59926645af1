use std::cmp::Ordering;
use std::ops::Deref;

use crate::consts::{ FEQ_EPSILON, VACUUM_RI };
use crate::ray::Ray;
use crate::shape::{ CsgOp, Shape };
use crate::tuple::Tuple;

/// A point where a ray crosses the surface of a shape.
///
/// `t` is the distance along the ray in multiples of its direction.
/// `object` is the primitive that was hit, never a group or CSG node. Smooth
/// triangles also record the barycentric `(u, v)` of the hit.
#[derive(Copy, Clone, Debug)]
pub struct Intersection<'a> {
    pub t: f64,
    pub object: &'a Shape,
    pub uv: Option<(f64, f64)>,
}

/// Two intersections are equal when their `t` values match exactly and they
/// refer to the *same* shape (pointer equality).
impl<'a> PartialEq for Intersection<'a> {
    fn eq(&self, other: &Intersection<'a>) -> bool {
        self.t == other.t && std::ptr::eq(self.object, other.object)
    }
}

impl<'a> Intersection<'a> {
    pub fn new(t: f64, object: &'a Shape) -> Intersection<'a> {
        Intersection { t, object, uv: None }
    }

    pub fn with_uv(t: f64, object: &'a Shape, u: f64, v: f64)
        -> Intersection<'a> {
        Intersection { t, object, uv: Some((u, v)) }
    }
}

/// A list of intersections.
///
/// Dereferences to a slice, so it can be indexed and iterated directly.
#[derive(Clone, Debug, Default)]
pub struct Intersections<'a> {
    pub intersections: Vec<Intersection<'a>>,
}

impl<'a> Deref for Intersections<'a> {
    type Target = [Intersection<'a>];

    fn deref(&self) -> &[Intersection<'a>] {
        &self.intersections
    }
}

impl<'a> From<Vec<Intersection<'a>>> for Intersections<'a> {
    fn from(intersections: Vec<Intersection<'a>>) -> Intersections<'a> {
        Intersections { intersections }
    }
}

impl<'a> IntoIterator for Intersections<'a> {
    type Item = Intersection<'a>;
    type IntoIter = std::vec::IntoIter<Intersection<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.intersections.into_iter()
    }
}

impl<'a> Intersections<'a> {
    pub fn new() -> Intersections<'a> {
        Intersections { intersections: Vec::new() }
    }

    pub fn push(&mut self, i: Intersection<'a>) {
        self.intersections.push(i);
    }

    /// Concatenates several lists, in order. The result is not sorted.
    pub fn aggregate<I>(lists: I) -> Intersections<'a>
        where I: IntoIterator<Item = Intersections<'a>> {
        let mut all = Intersections::new();
        for list in lists {
            all.intersections.extend(list.intersections);
        }

        all
    }

    /// Stable ascending sort by `t`. Intersections sharing a `t` keep their
    /// relative order.
    pub fn sort(&mut self) {
        self.intersections.sort_by(|a, b|
            a.t.partial_cmp(&b.t).unwrap_or(Ordering::Equal)
        );
    }

    /// The visible hit: the intersection with the lowest positive `t`.
    ///
    /// Works whether or not the list is sorted. Returns `None` when every
    /// intersection is behind the ray origin.
    pub fn hit(&self) -> Option<&Intersection<'a>> {
        self.intersections.iter()
            .filter(|i| i.t > 0.0)
            .min_by(|a, b| a.t.partial_cmp(&b.t).unwrap_or(Ordering::Equal))
    }
}

/// Whether an intersection survives a CSG operation.
///
/// `lhit` is set when the intersection belongs to the left operand, `inl`
/// and `inr` say whether the ray is currently inside the left and right
/// operands.
pub fn intersection_allowed(op: CsgOp, lhit: bool, inl: bool, inr: bool)
    -> bool {
    match op {
        CsgOp::Union => (lhit && !inr) || (!lhit && !inl),
        CsgOp::Intersection => (lhit && inr) || (!lhit && inl),
        CsgOp::Difference => (lhit && !inr) || (!lhit && inl),
    }
}

/// Keeps only the intersections of a sorted list that lie on the surface of
/// the combined CSG solid.
///
/// Every intersection not belonging to `left` is assumed to belong to the
/// right operand.
pub fn filter_intersections<'a>(op: CsgOp, left: &Shape, xs: Intersections<'a>)
    -> Intersections<'a> {
    let mut inl = false;
    let mut inr = false;
    let mut kept = Intersections::new();

    for i in xs {
        let lhit = left.includes(i.object);

        if intersection_allowed(op, lhit, inl, inr) {
            kept.push(i);
        }

        if lhit {
            inl = !inl;
        } else {
            inr = !inr;
        }
    }

    kept
}

/// Everything the shader needs to know about a single hit.
#[derive(Clone, Debug)]
pub struct Computations<'a> {
    pub t: f64,
    pub object: &'a Shape,

    pub point: Tuple,
    /// `point` nudged out along the normal, used as the origin of shadow and
    /// reflection rays so a surface can't occlude itself.
    pub over_point: Tuple,
    /// `point` nudged in along the normal, used as the origin of refracted
    /// rays.
    pub under_point: Tuple,

    pub eyev: Tuple,
    pub normalv: Tuple,
    pub reflectv: Tuple,
    /// Set when the hit is on the inside of the surface; `normalv` has been
    /// flipped to face the eye.
    pub inside: bool,

    /// Refractive index of the medium being left.
    pub n1: f64,
    /// Refractive index of the medium being entered.
    pub n2: f64,
}

impl<'a> Computations<'a> {
    /// Prepares the shading data for `hit`, one of the intersections in
    /// `xs`.
    ///
    /// `xs` must be sorted. It is walked up to `hit` to find which objects
    /// the ray is inside, which determines `n1` and `n2`.
    pub fn prepare(hit: &Intersection<'a>, ray: &Ray, xs: &[Intersection<'a>])
        -> Computations<'a> {
        let point = ray.position(hit.t);
        let eyev = -ray.direction;
        let mut normalv = hit.object.normal_at(point, hit);

        let inside = normalv.dot(&eyev) < 0.0;
        if inside {
            normalv = -normalv;
        }

        let reflectv = ray.direction.reflect(&normalv);
        let (n1, n2) = Computations::refractive_indices(hit, xs);

        Computations {
            t: hit.t,
            object: hit.object,
            point,
            over_point: point + normalv * FEQ_EPSILON,
            under_point: point - normalv * FEQ_EPSILON,
            eyev,
            normalv,
            reflectv,
            inside,
            n1,
            n2,
        }
    }

    fn refractive_indices(hit: &Intersection<'a>, xs: &[Intersection<'a>])
        -> (f64, f64) {
        // Objects the ray has entered but not yet left.
        let mut containers: Vec<&'a Shape> = Vec::new();
        let mut n1 = VACUUM_RI;

        for i in xs {
            let is_hit = i == hit;
            if is_hit {
                n1 = index_of(&containers);
            }

            match containers.iter().position(|c| std::ptr::eq(*c, i.object)) {
                Some(j) => { containers.remove(j); },
                None => containers.push(i.object),
            }

            if is_hit {
                return (n1, index_of(&containers));
            }
        }

        (n1, VACUUM_RI)
    }

    /// Schlick's approximation of the Fresnel reflectance, the fraction of
    /// light reflected rather than refracted at this hit.
    pub fn schlick(&self) -> f64 {
        let mut cos = self.eyev.dot(&self.normalv);

        // Total internal reflection is only possible going into a less dense
        // medium.
        if self.n1 > self.n2 {
            let n = self.n1 / self.n2;
            let sin2_t = n.powi(2) * (1.0 - cos.powi(2));
            if sin2_t > 1.0 {
                return 1.0;
            }

            cos = (1.0 - sin2_t).sqrt();
        }

        let r0 = ((self.n1 - self.n2) / (self.n1 + self.n2)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cos).powi(5)
    }
}

/// Refractive index of the innermost object the ray is inside.
fn index_of(containers: &[&Shape]) -> f64 {
    match containers.last() {
        Some(s) => s.material().refractive_index,
        None => VACUUM_RI,
    }
}

/// Shorthand for `Computations::prepare`.
pub fn prepare_computations<'a>(hit: &Intersection<'a>, ray: &Ray,
    xs: &[Intersection<'a>]) -> Computations<'a> {
    Computations::prepare(hit, ray, xs)
}

#[cfg(test)]
use crate::matrix::Matrix4;

#[cfg(test)]
fn z_ray(z: f64) -> Ray {
    Ray::new(Tuple::point(0.0, 0.0, z), Tuple::vector(0.0, 0.0, 1.0))
}

#[test]
fn hit_with_positive_and_negative_t() {
    let s = Shape::sphere();

    let xs = Intersections::from(vec![
        Intersection::new(1.0, &s), Intersection::new(2.0, &s)]);
    assert_eq!(xs.hit(), Some(&xs[0]));

    let xs = Intersections::from(vec![
        Intersection::new(-1.0, &s), Intersection::new(1.0, &s)]);
    assert_eq!(xs.hit(), Some(&xs[1]));

    let xs = Intersections::from(vec![
        Intersection::new(-2.0, &s), Intersection::new(-1.0, &s)]);
    assert_eq!(xs.hit(), None);

    assert_eq!(Intersections::new().hit(), None);
}

#[test]
fn hit_is_lowest_positive_in_unsorted_list() {
    let s = Shape::sphere();
    let xs = Intersections::from(vec![
        Intersection::new(5.0, &s),
        Intersection::new(7.0, &s),
        Intersection::new(-3.0, &s),
        Intersection::new(2.0, &s),
    ]);

    assert_eq!(xs.hit(), Some(&xs[3]));
}

#[test]
fn sort_is_stable_for_equal_t() {
    let a = Shape::sphere();
    let b = Shape::sphere();
    let mut xs = Intersections::from(vec![
        Intersection::new(2.0, &a),
        Intersection::new(1.0, &a),
        Intersection::new(2.0, &b),
    ]);
    xs.sort();

    assert_eq!(xs[0].t, 1.0);
    assert!(std::ptr::eq(xs[1].object, &a));
    assert!(std::ptr::eq(xs[2].object, &b));
}

#[test]
fn csg_truth_table() {
    use CsgOp::*;

    let table = [
        (Union, [false, true, false, true, false, false, true, true]),
        (Intersection, [true, false, true, false, true, true, false, false]),
        (Difference, [false, true, false, true, true, true, false, false]),
    ];

    for (op, expected) in table.iter() {
        for (k, want) in expected.iter().enumerate() {
            // Rows count down from (lhit, inl, inr) = (true, true, true).
            let lhit = k < 4;
            let inl = (k / 2) % 2 == 0;
            let inr = k % 2 == 0;
            assert_eq!(intersection_allowed(*op, lhit, inl, inr), *want,
                "{:?} lhit={} inl={} inr={}", op, lhit, inl, inr);
        }
    }
}

#[test]
fn filtering_a_list_of_intersections() {
    let left = Shape::sphere();
    let right = Shape::cube();
    let all = || Intersections::from(vec![
        Intersection::new(1.0, &left),
        Intersection::new(2.0, &right),
        Intersection::new(3.0, &left),
        Intersection::new(4.0, &right),
    ]);
    let ts = |xs: Intersections| xs.iter().map(|i| i.t).collect::<Vec<_>>();

    assert_eq!(ts(filter_intersections(CsgOp::Union, &left, all())),
        vec![1.0, 4.0]);
    assert_eq!(ts(filter_intersections(CsgOp::Intersection, &left, all())),
        vec![2.0, 3.0]);
    assert_eq!(ts(filter_intersections(CsgOp::Difference, &left, all())),
        vec![1.0, 2.0]);
}

#[test]
fn hit_from_outside() {
    let s = Shape::sphere();
    let r = z_ray(-5.0);
    let i = Intersection::new(4.0, &s);
    let comps = Computations::prepare(&i, &r, &[i]);

    assert_eq!(comps.t, 4.0);
    assert!(std::ptr::eq(comps.object, &s));
    assert_eq!(comps.point, Tuple::point(0.0, 0.0, -1.0));
    assert_eq!(comps.eyev, Tuple::vector(0.0, 0.0, -1.0));
    assert_eq!(comps.normalv, Tuple::vector(0.0, 0.0, -1.0));
    assert!(!comps.inside);
}

#[test]
fn hit_from_inside_flips_normal() {
    let s = Shape::sphere();
    let r = z_ray(0.0);
    let i = Intersection::new(1.0, &s);
    let comps = Computations::prepare(&i, &r, &[i]);

    assert_eq!(comps.point, Tuple::point(0.0, 0.0, 1.0));
    assert_eq!(comps.eyev, Tuple::vector(0.0, 0.0, -1.0));
    assert_eq!(comps.normalv, Tuple::vector(0.0, 0.0, -1.0));
    assert!(comps.inside);
}

#[test]
fn over_and_under_points_straddle_surface() {
    let s = Shape::glass_sphere()
        .with_transform(Matrix4::translation(0.0, 0.0, 1.0));
    let r = z_ray(-5.0);
    let i = Intersection::new(5.0, &s);
    let comps = Computations::prepare(&i, &r, &[i]);

    assert!(comps.over_point.z < -FEQ_EPSILON / 2.0);
    assert!(comps.point.z > comps.over_point.z);
    assert!(comps.under_point.z > FEQ_EPSILON / 2.0);
    assert!(comps.point.z < comps.under_point.z);
}

#[test]
fn reflection_vector() {
    let p = Shape::plane();
    let half = 2.0f64.sqrt() / 2.0;
    let r = Ray::new(Tuple::point(0.0, 1.0, -1.0), Tuple::vector(0.0, -half, half));
    let i = Intersection::new(2.0f64.sqrt(), &p);
    let comps = Computations::prepare(&i, &r, &[i]);

    assert_eq!(comps.reflectv, Tuple::vector(0.0, half, half));
}

#[test]
fn refractive_indices_at_each_boundary() {
    use crate::material::Material;

    let a = Shape::sphere()
        .with_transform(Matrix4::scaling(2.0, 2.0, 2.0))
        .with_material(Material::glass(1.5));
    let b = Shape::sphere()
        .with_transform(Matrix4::translation(0.0, 0.0, -0.25))
        .with_material(Material::glass(2.0));
    let c = Shape::sphere()
        .with_transform(Matrix4::translation(0.0, 0.0, 0.25))
        .with_material(Material::glass(2.5));

    let r = z_ray(-4.0);
    let xs = Intersections::from(vec![
        Intersection::new(2.0, &a),
        Intersection::new(2.75, &b),
        Intersection::new(3.25, &c),
        Intersection::new(4.75, &b),
        Intersection::new(5.25, &c),
        Intersection::new(6.0, &a),
    ]);
    let expected = [
        (1.0, 1.5), (1.5, 2.0), (2.0, 2.5), (2.5, 2.5), (2.5, 1.5), (1.5, 1.0),
    ];

    for (i, (n1, n2)) in expected.iter().enumerate() {
        let comps = prepare_computations(&xs[i], &r, &xs);
        assert_eq!(comps.n1, *n1, "n1 at index {}", i);
        assert_eq!(comps.n2, *n2, "n2 at index {}", i);
    }
}

#[test]
fn schlick_under_total_internal_reflection() {
    let s = Shape::glass_sphere();
    let half = 2.0f64.sqrt() / 2.0;
    let r = Ray::new(Tuple::point(0.0, 0.0, half), Tuple::vector(0.0, 1.0, 0.0));
    let xs = [Intersection::new(-half, &s), Intersection::new(half, &s)];
    let comps = Computations::prepare(&xs[1], &r, &xs);

    assert_eq!(comps.schlick(), 1.0);
}

#[test]
fn schlick_perpendicular_and_grazing() {
    let s = Shape::glass_sphere();

    let r = Ray::new(Tuple::origin(), Tuple::vector(0.0, 1.0, 0.0));
    let xs = [Intersection::new(-1.0, &s), Intersection::new(1.0, &s)];
    let comps = Computations::prepare(&xs[1], &r, &xs);
    assert!(crate::feq(comps.schlick(), 0.04));

    let r = Ray::new(Tuple::point(0.0, 0.99, -2.0), Tuple::vector(0.0, 0.0, 1.0));
    let xs = [Intersection::new(1.8589, &s)];
    let comps = Computations::prepare(&xs[0], &r, &xs);
    assert!(crate::feq(comps.schlick(), 0.48873));
}
