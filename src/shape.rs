use thiserror::Error;

use crate::consts::FEQ_EPSILON;
use crate::geometry::{ Bounds, SmoothTriangleInfo, TriangleInfo };
use crate::intersect::{ filter_intersections, Intersection, Intersections };
use crate::material::Material;
use crate::matrix::Matrix4;
use crate::ray::Ray;
use crate::tuple::Tuple;

/// The boolean operation combining the two operands of a CSG shape.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CsgOp {
    Union,
    Intersection,
    Difference,
}

#[derive(Clone, Debug)]
pub enum ShapeKind {
    /// A unit sphere centered at the object-space origin.
    Sphere,

    /// The X-Z plane through the origin, normal pointing up +Y.
    Plane,

    /// An axis-aligned cube spanning `[-1, 1]` on every axis.
    Cube,

    /// A unit-radius cylinder around the Y axis, cut at `minimum` and
    /// `maximum` (exclusive) and optionally capped.
    Cylinder { minimum: f64, maximum: f64, closed: bool },

    /// A double-napped cone around the Y axis with its apex at the origin.
    /// The radius at height `y` is `|y|`.
    Cone { minimum: f64, maximum: f64, closed: bool },

    Triangle(TriangleInfo),
    SmoothTriangle(SmoothTriangleInfo),

    /// An ordered collection of shapes, transformed as a unit.
    Group(Vec<Shape>),

    /// A boolean combination of a left and a right operand.
    Csg(CsgOp, Box<Shape>, Box<Shape>),
}

/// A transform that, on its own or combined with a shape's ancestors,
/// cannot be inverted.
#[derive(Error, Debug, Clone, Copy)]
#[error("transform is not invertible:\n{0}")]
pub struct SingularTransform(pub Matrix4);

/// A renderable object.
///
/// Every shape stores its geometry in object space together with a transform
/// into its parent's space. Shapes placed in a group or CSG node are *moved*
/// into it, so the container owns its children outright. The link back up
/// the tree is kept as `parent_transform`, the product of every ancestor's
/// transform, which is all a child ever needs from its parents.
///
/// Inverse matrices and bounds are computed when a transform is set or a
/// child is attached, never on first use, so a finished scene is read-only
/// and can be shared between render threads.
///
/// A container's bounds are fixed when each child is attached. Changing a
/// child's transform afterwards does not resize its parent's box; give each
/// child its final transform before adding it.
///
/// # Examples
///
/// ```
/// use rtc::matrix::Matrix4;
/// use rtc::ray::Ray;
/// use rtc::shape::Shape;
/// use rtc::tuple::Tuple;
///
/// let s = Shape::sphere().with_transform(Matrix4::scaling(2.0, 2.0, 2.0));
/// let r = Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));
/// let xs = s.intersect(&r);
///
/// assert_eq!(xs.len(), 2);
/// assert_eq!(xs[0].t, 3.0);
/// assert_eq!(xs[1].t, 7.0);
/// ```
#[derive(Clone, Debug)]
pub struct Shape {
    kind: ShapeKind,
    material: Material,

    transform: Matrix4,
    inverse: Matrix4,

    parent_transform: Matrix4,
    world_inverse: Matrix4,
    world_normal: Matrix4,

    bounds: Bounds,
}

impl Shape {
    fn from_kind(kind: ShapeKind) -> Shape {
        let mut shape = Shape {
            kind,
            material: Material::default(),
            transform: Matrix4::identity(),
            inverse: Matrix4::identity(),
            parent_transform: Matrix4::identity(),
            world_inverse: Matrix4::identity(),
            world_normal: Matrix4::identity(),
            bounds: Bounds::empty(),
        };

        shape.bounds = shape.local_bounds();
        shape
    }

    pub fn sphere() -> Shape {
        Shape::from_kind(ShapeKind::Sphere)
    }

    /// A sphere made of clear glass with refractive index 1.5.
    pub fn glass_sphere() -> Shape {
        Shape::sphere().with_material(Material::glass(crate::consts::GLASS_RI))
    }

    pub fn plane() -> Shape {
        Shape::from_kind(ShapeKind::Plane)
    }

    pub fn cube() -> Shape {
        Shape::from_kind(ShapeKind::Cube)
    }

    /// An infinitely long, open cylinder.
    pub fn cylinder() -> Shape {
        Shape::truncated_cylinder(f64::NEG_INFINITY, f64::INFINITY, false)
    }

    pub fn truncated_cylinder(minimum: f64, maximum: f64, closed: bool) -> Shape {
        Shape::from_kind(ShapeKind::Cylinder { minimum, maximum, closed })
    }

    /// An infinite, open double cone.
    pub fn cone() -> Shape {
        Shape::truncated_cone(f64::NEG_INFINITY, f64::INFINITY, false)
    }

    pub fn truncated_cone(minimum: f64, maximum: f64, closed: bool) -> Shape {
        Shape::from_kind(ShapeKind::Cone { minimum, maximum, closed })
    }

    pub fn triangle(p1: Tuple, p2: Tuple, p3: Tuple) -> Shape {
        Shape::from_kind(ShapeKind::Triangle(TriangleInfo::new(p1, p2, p3)))
    }

    pub fn smooth_triangle(p1: Tuple, p2: Tuple, p3: Tuple,
        n1: Tuple, n2: Tuple, n3: Tuple) -> Shape {
        Shape::from_kind(ShapeKind::SmoothTriangle(
            SmoothTriangleInfo::new(p1, p2, p3, n1, n2, n3)
        ))
    }

    /// An empty group.
    pub fn group() -> Shape {
        Shape::from_kind(ShapeKind::Group(Vec::new()))
    }

    /// A group holding `children`, in order.
    pub fn group_of(children: Vec<Shape>) -> Shape {
        let mut g = Shape::group();
        for child in children {
            g.add_child(child);
        }

        g
    }

    /// Combines `left` and `right` with `op`. Both operands become children
    /// of the new shape.
    pub fn csg(op: CsgOp, mut left: Shape, mut right: Shape) -> Shape {
        left.propagate_parent_transform(Matrix4::identity());
        right.propagate_parent_transform(Matrix4::identity());

        Shape::from_kind(ShapeKind::Csg(op, Box::new(left), Box::new(right)))
    }

    /// Appends `child` to this group and grows the group's bounds to hold
    /// the child's transformed box.
    ///
    /// # Panics
    ///
    /// Panics if `self` is not a group.
    pub fn add_child(&mut self, child: Shape) {
        if let Err(e) = self.try_add_child(child) {
            panic!("cannot attach child: {}", e);
        }
    }

    /// Like `add_child`, but fails instead of panicking when a world
    /// transform in the child's subtree would become singular under this
    /// group. On failure the group is unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `self` is not a group.
    pub fn try_add_child(&mut self, mut child: Shape) -> Result<(), SingularTransform> {
        let to_world = self.parent_transform * self.transform;
        let children = match self.kind {
            ShapeKind::Group(ref mut c) => c,
            _ => panic!("cannot add a child to a non-group shape"),
        };

        if let Some(m) = child.find_singular(to_world, child.transform) {
            return Err(SingularTransform(m));
        }

        child.propagate_parent_transform(to_world);
        self.bounds.merge(&child.bounds.transform(&child.transform));
        children.push(child);
        Ok(())
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    /// The children of a group, or `None` for any other shape.
    pub fn children(&self) -> Option<&[Shape]> {
        match self.kind {
            ShapeKind::Group(ref c) => Some(c),
            _ => None,
        }
    }

    /// The left operand of a CSG shape.
    ///
    /// # Panics
    ///
    /// Panics if `self` is not a CSG shape.
    pub fn csg_left(&self) -> &Shape {
        match self.kind {
            ShapeKind::Csg(_, ref l, _) => l,
            _ => panic!("csg_left called on a non-CSG shape"),
        }
    }

    /// The right operand of a CSG shape.
    ///
    /// # Panics
    ///
    /// Panics if `self` is not a CSG shape.
    pub fn csg_right(&self) -> &Shape {
        match self.kind {
            ShapeKind::Csg(_, _, ref r) => r,
            _ => panic!("csg_right called on a non-CSG shape"),
        }
    }

    /// True if `other` is this very shape, or lives somewhere inside it.
    /// Identity is by address, not by value.
    pub fn includes(&self, other: &Shape) -> bool {
        match self.kind {
            ShapeKind::Group(ref children)
                => children.iter().any(|c| c.includes(other)),
            ShapeKind::Csg(_, ref left, ref right)
                => left.includes(other) || right.includes(other),
            _ => std::ptr::eq(self, other),
        }
    }

    /// The object-space bounding box.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// This shape's bounds in its parent's space.
    pub fn parent_space_bounds(&self) -> Bounds {
        self.bounds.transform(&self.transform)
    }

    fn local_bounds(&self) -> Bounds {
        let inf = f64::INFINITY;
        match self.kind {
            ShapeKind::Sphere | ShapeKind::Cube
                => Bounds::new(-1.0, -1.0, -1.0, 1.0, 1.0, 1.0),
            ShapeKind::Plane => Bounds::new(-inf, 0.0, -inf, inf, 0.0, inf),
            ShapeKind::Cylinder { minimum, maximum, .. }
                => Bounds::new(-1.0, minimum, -1.0, 1.0, maximum, 1.0),
            ShapeKind::Cone { minimum, maximum, .. } => {
                let limit = minimum.abs().max(maximum.abs());
                Bounds::new(-limit, minimum, -limit, limit, maximum, limit)
            },
            ShapeKind::Triangle(ref t) => t.bounds(),
            ShapeKind::SmoothTriangle(ref st) => st.tri.bounds(),
            ShapeKind::Group(ref children) => {
                let mut b = Bounds::empty();
                for child in children {
                    b.merge(&child.parent_space_bounds());
                }

                b
            },
            ShapeKind::Csg(_, ref l, ref r) => {
                let mut b = l.parent_space_bounds();
                b.merge(&r.parent_space_bounds());
                b
            },
        }
    }

    pub fn transform(&self) -> &Matrix4 {
        &self.transform
    }

    /// Sets this shape's transform and caches the matrices derived from it.
    ///
    /// If this shape is a container, the new transform is pushed down to
    /// every descendant's `parent_transform`.
    ///
    /// # Panics
    ///
    /// Panics if `transform` is not invertible.
    pub fn set_transform(&mut self, transform: Matrix4) {
        if let Err(e) = self.try_set_transform(transform) {
            panic!("shape {}", e);
        }
    }

    /// Like `set_transform`, but fails instead of panicking when
    /// `transform`, or the world transform of any shape below this one,
    /// would be singular. On failure the shape is unchanged.
    pub fn try_set_transform(&mut self, transform: Matrix4) -> Result<(), SingularTransform> {
        let inverse = transform.inverse().ok_or(SingularTransform(transform))?;
        if let Some(m) = self.find_singular(self.parent_transform, transform) {
            return Err(SingularTransform(m));
        }

        self.inverse = inverse;
        self.transform = transform;
        self.propagate_parent_transform(self.parent_transform);
        Ok(())
    }

    pub fn with_transform(mut self, transform: Matrix4) -> Shape {
        self.set_transform(transform);
        self
    }

    /// The first world transform in this subtree that cannot be inverted,
    /// assuming this shape sits under `parent_transform` with `transform`.
    /// Products are formed exactly as `propagate_parent_transform` forms them.
    fn find_singular(&self, parent_transform: Matrix4, transform: Matrix4) -> Option<Matrix4> {
        let to_world = parent_transform * transform;
        if !to_world.is_invertible() {
            return Some(to_world);
        }

        match self.kind {
            ShapeKind::Group(ref children) => children.iter()
                .find_map(|c| c.find_singular(to_world, c.transform)),
            ShapeKind::Csg(_, ref left, ref right) => left
                .find_singular(to_world, left.transform)
                .or_else(|| right.find_singular(to_world, right.transform)),
            _ => None,
        }
    }

    /// Records the product of all ancestor transforms and recomputes the
    /// world-space matrices, recursively for any children.
    ///
    /// For a cube with transform `C` in a group `B` in a group `A`, the cube's
    /// `parent_transform` is `AB` and its world transform is `ABC`.
    fn propagate_parent_transform(&mut self, parent_transform: Matrix4) {
        self.parent_transform = parent_transform;

        let to_world = parent_transform * self.transform;
        self.world_inverse = match to_world.inverse() {
            Some(inv) => inv,
            None => panic!("world transform is not invertible:\n{}", to_world),
        };
        self.world_normal = self.world_inverse.transpose();

        match self.kind {
            ShapeKind::Group(ref mut children) => {
                for child in children.iter_mut() {
                    child.propagate_parent_transform(to_world);
                }
            },
            ShapeKind::Csg(_, ref mut left, ref mut right) => {
                left.propagate_parent_transform(to_world);
                right.propagate_parent_transform(to_world);
            },
            _ => (),
        }
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn material_mut(&mut self) -> &mut Material {
        &mut self.material
    }

    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    pub fn with_material(mut self, material: Material) -> Shape {
        self.material = material;
        self
    }

    /// Sets the material of this shape and of every shape below it.
    pub fn set_material_deep(&mut self, material: Material) {
        self.material = material;
        match self.kind {
            ShapeKind::Group(ref mut children) => {
                for child in children.iter_mut() {
                    child.set_material_deep(material);
                }
            },
            ShapeKind::Csg(_, ref mut left, ref mut right) => {
                left.set_material_deep(material);
                right.set_material_deep(material);
            },
            _ => (),
        }
    }

    /// Converts a world-space point into this shape's object space, passing
    /// through every enclosing group.
    pub fn world_to_object(&self, point: Tuple) -> Tuple {
        self.world_inverse * point
    }

    /// Converts an object-space normal to a normalized world-space vector.
    pub fn normal_to_world(&self, normal: Tuple) -> Tuple {
        (self.world_normal * normal).as_vector().normalize()
    }

    /// Intersects a world-space (or parent-space, for children) ray with this
    /// shape.
    pub fn intersect(&self, ray: &Ray) -> Intersections<'_> {
        self.local_intersect(&ray.transform(&self.inverse))
    }

    /// The world-space surface normal at `world_point`. `hit` supplies the
    /// barycentric coordinates smooth triangles interpolate with.
    ///
    /// # Panics
    ///
    /// Panics on a group or CSG shape; only primitives have surfaces.
    pub fn normal_at(&self, world_point: Tuple, hit: &Intersection) -> Tuple {
        let local_point = self.world_to_object(world_point);
        let local_normal = self.local_normal_at(local_point, hit);
        self.normal_to_world(local_normal)
    }

    /// Intersects a ray already in object space.
    pub fn local_intersect(&self, ray: &Ray) -> Intersections<'_> {
        match self.kind {
            ShapeKind::Sphere => self.intersect_sphere(ray),
            ShapeKind::Plane => self.intersect_plane(ray),
            ShapeKind::Cube => self.intersect_cube(ray),
            ShapeKind::Cylinder { minimum, maximum, closed }
                => self.intersect_cylinder(ray, minimum, maximum, closed),
            ShapeKind::Cone { minimum, maximum, closed }
                => self.intersect_cone(ray, minimum, maximum, closed),
            ShapeKind::Triangle(ref tri) => match tri.intersect(ray) {
                Some((t, _, _)) => Intersections::from(vec![
                    Intersection::new(t, self)
                ]),
                None => Intersections::new(),
            },
            ShapeKind::SmoothTriangle(ref st) => match st.tri.intersect(ray) {
                Some((t, u, v)) => Intersections::from(vec![
                    Intersection::with_uv(t, self, u, v)
                ]),
                None => Intersections::new(),
            },
            ShapeKind::Group(ref children) => self.intersect_group(ray, children),
            ShapeKind::Csg(op, ref left, ref right)
                => self.intersect_csg(ray, op, left, right),
        }
    }

    /// The normal at an object-space point.
    ///
    /// # Panics
    ///
    /// Panics on a group or CSG shape.
    pub fn local_normal_at(&self, p: Tuple, hit: &Intersection) -> Tuple {
        match self.kind {
            ShapeKind::Sphere => p.as_vector(),
            ShapeKind::Plane => Tuple::vector(0.0, 1.0, 0.0),
            ShapeKind::Cube => Shape::normal_at_cube(p),
            ShapeKind::Cylinder { minimum, maximum, .. } => {
                let dist = p.x.powi(2) + p.z.powi(2);
                if dist < 1.0 && p.y >= maximum - FEQ_EPSILON {
                    Tuple::vector(0.0, 1.0, 0.0)
                } else if dist < 1.0 && p.y <= minimum + FEQ_EPSILON {
                    Tuple::vector(0.0, -1.0, 0.0)
                } else {
                    Tuple::vector(p.x, 0.0, p.z)
                }
            },
            ShapeKind::Cone { minimum, maximum, .. } => {
                let dist = p.x.powi(2) + p.z.powi(2);
                if dist < maximum.powi(2) && p.y >= maximum - FEQ_EPSILON {
                    Tuple::vector(0.0, 1.0, 0.0)
                } else if dist < minimum.powi(2) && p.y <= minimum + FEQ_EPSILON {
                    Tuple::vector(0.0, -1.0, 0.0)
                } else {
                    let y = if p.y > 0.0 { -dist.sqrt() } else { dist.sqrt() };
                    Tuple::vector(p.x, y, p.z)
                }
            },
            ShapeKind::Triangle(ref t) => t.normal,
            ShapeKind::SmoothTriangle(ref st) => match hit.uv {
                Some((u, v)) => st.normal_at(u, v),
                None => st.tri.normal,
            },
            ShapeKind::Group(_)
                => panic!("normal_at is not defined on a group"),
            ShapeKind::Csg(..)
                => panic!("normal_at is not defined on a CSG shape"),
        }
    }

    fn intersect_sphere(&self, ray: &Ray) -> Intersections<'_> {
        let sphere_to_ray = ray.origin - Tuple::origin();

        let a = ray.direction.dot(&ray.direction);
        let b = 2.0 * ray.direction.dot(&sphere_to_ray);
        let c = sphere_to_ray.dot(&sphere_to_ray) - 1.0;

        let disc = b.powi(2) - 4.0 * a * c;
        if disc < 0.0 {
            return Intersections::new();
        }

        let t1 = (-b - disc.sqrt()) / (2.0 * a);
        let t2 = (-b + disc.sqrt()) / (2.0 * a);

        Intersections::from(vec![
            Intersection::new(t1, self),
            Intersection::new(t2, self),
        ])
    }

    /// Rays parallel to the plane miss it, including rays lying in it.
    fn intersect_plane(&self, ray: &Ray) -> Intersections<'_> {
        if ray.direction.y.abs() < FEQ_EPSILON {
            return Intersections::new();
        }

        let t = -ray.origin.y / ray.direction.y;
        Intersections::from(vec![Intersection::new(t, self)])
    }

    fn intersect_cube(&self, ray: &Ray) -> Intersections<'_> {
        let unit = Bounds::new(-1.0, -1.0, -1.0, 1.0, 1.0, 1.0);
        match unit.intersect(ray) {
            Some((tmin, tmax)) => Intersections::from(vec![
                Intersection::new(tmin, self),
                Intersection::new(tmax, self),
            ]),
            None => Intersections::new(),
        }
    }

    fn normal_at_cube(p: Tuple) -> Tuple {
        let (xa, ya, za) = (p.x.abs(), p.y.abs(), p.z.abs());
        let max_component = xa.max(ya).max(za);

        if max_component == xa {
            Tuple::vector(p.x, 0.0, 0.0)
        } else if max_component == ya {
            Tuple::vector(0.0, p.y, 0.0)
        } else {
            Tuple::vector(0.0, 0.0, p.z)
        }
    }

    fn intersect_cylinder(&self, ray: &Ray, minimum: f64, maximum: f64,
        closed: bool) -> Intersections<'_> {
        let mut xs = Intersections::new();
        let a = ray.direction.x.powi(2) + ray.direction.z.powi(2);

        // Parallel to the Y axis: only the caps can be hit.
        if a >= FEQ_EPSILON {
            let b = 2.0 * ray.origin.x * ray.direction.x
                  + 2.0 * ray.origin.z * ray.direction.z;
            let c = ray.origin.x.powi(2) + ray.origin.z.powi(2) - 1.0;

            let disc = b.powi(2) - 4.0 * a * c;
            if disc < 0.0 {
                return xs;
            }

            let t0 = (-b - disc.sqrt()) / (2.0 * a);
            let t1 = (-b + disc.sqrt()) / (2.0 * a);
            self.push_within(&mut xs, ray, t0.min(t1), minimum, maximum);
            self.push_within(&mut xs, ray, t0.max(t1), minimum, maximum);
        }

        if closed {
            self.intersect_caps(&mut xs, ray, minimum, maximum, |_| 1.0);
        }

        xs
    }

    fn intersect_cone(&self, ray: &Ray, minimum: f64, maximum: f64,
        closed: bool) -> Intersections<'_> {
        let mut xs = Intersections::new();
        let (o, d) = (ray.origin, ray.direction);

        let a = d.x.powi(2) - d.y.powi(2) + d.z.powi(2);
        let b = 2.0 * o.x * d.x - 2.0 * o.y * d.y + 2.0 * o.z * d.z;
        let c = o.x.powi(2) - o.y.powi(2) + o.z.powi(2);

        if a.abs() < FEQ_EPSILON {
            // Parallel to one nappe: at most one lateral hit, none if b is
            // also zero.
            if b.abs() >= FEQ_EPSILON {
                self.push_within(&mut xs, ray, -c / (2.0 * b), minimum, maximum);
            }
        } else {
            let disc = b.powi(2) - 4.0 * a * c;
            if disc < 0.0 {
                return xs;
            }

            let t0 = (-b - disc.sqrt()) / (2.0 * a);
            let t1 = (-b + disc.sqrt()) / (2.0 * a);
            self.push_within(&mut xs, ray, t0.min(t1), minimum, maximum);
            self.push_within(&mut xs, ray, t0.max(t1), minimum, maximum);
        }

        if closed {
            self.intersect_caps(&mut xs, ray, minimum, maximum, f64::abs);
        }

        xs
    }

    /// Keeps a lateral-surface hit only if it falls strictly between the
    /// truncation planes.
    fn push_within<'a>(&'a self, xs: &mut Intersections<'a>, ray: &Ray,
        t: f64, minimum: f64, maximum: f64) {
        let y = ray.origin.y + t * ray.direction.y;
        if minimum < y && y < maximum {
            xs.push(Intersection::new(t, self));
        }
    }

    /// Tests the end caps at `y = minimum` and `y = maximum`. `radius` maps
    /// a cap height to that cap's radius.
    fn intersect_caps<'a, F>(&'a self, xs: &mut Intersections<'a>, ray: &Ray,
        minimum: f64, maximum: f64, radius: F)
        where F: Fn(f64) -> f64 {
        if ray.direction.y.abs() < FEQ_EPSILON {
            return;
        }

        for y in [minimum, maximum] {
            let t = (y - ray.origin.y) / ray.direction.y;
            let x = ray.origin.x + t * ray.direction.x;
            let z = ray.origin.z + t * ray.direction.z;

            if x.powi(2) + z.powi(2) <= radius(y).powi(2) {
                xs.push(Intersection::new(t, self));
            }
        }
    }

    fn intersect_group<'a>(&'a self, ray: &Ray, children: &'a [Shape])
        -> Intersections<'a> {
        if children.is_empty() || !self.bounds.hits(ray) {
            return Intersections::new();
        }

        let mut xs = Intersections::aggregate(
            children.iter().map(|child| child.intersect(ray))
        );
        xs.sort();
        xs
    }

    fn intersect_csg<'a>(&'a self, ray: &Ray, op: CsgOp, left: &'a Shape,
        right: &'a Shape) -> Intersections<'a> {
        if !self.bounds.hits(ray) {
            return Intersections::new();
        }

        let mut xs = Intersections::aggregate(
            vec![left.intersect(ray), right.intersect(ray)]
        );
        xs.sort();

        filter_intersections(op, left, xs)
    }
}

/// Intersects `ray` with `s`. Same as `Shape::intersect`.
pub fn intersect<'a>(s: &'a Shape, ray: &Ray) -> Intersections<'a> {
    s.intersect(ray)
}

/// World-space normal of `s` at `world_point`. Same as `Shape::normal_at`.
pub fn normal_at(s: &Shape, world_point: Tuple, hit: &Intersection) -> Tuple {
    s.normal_at(world_point, hit)
}

#[cfg(test)]
fn ray(origin: (f64, f64, f64), direction: (f64, f64, f64)) -> Ray {
    Ray::new(
        Tuple::point(origin.0, origin.1, origin.2),
        Tuple::vector(direction.0, direction.1, direction.2),
    )
}

#[cfg(test)]
fn ts(xs: &Intersections) -> Vec<f64> {
    xs.iter().map(|i| i.t).collect()
}

#[cfg(test)]
fn assert_ts(xs: &Intersections, expected: &[f64]) {
    let actual = ts(xs);
    assert_eq!(actual.len(), expected.len(), "{:?} vs {:?}", actual, expected);
    for (a, e) in actual.iter().zip(expected) {
        assert!(crate::feq(*a, *e), "{:?} vs {:?}", actual, expected);
    }
}

#[cfg(test)]
fn local_normal(s: &Shape, p: Tuple) -> Tuple {
    s.local_normal_at(p, &Intersection::new(0.0, s))
}

#[test]
fn ray_through_sphere_center() {
    let s = Shape::sphere();
    let xs = s.intersect(&ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0)));

    assert_eq!(ts(&xs), vec![4.0, 6.0]);
    assert!(std::ptr::eq(xs[0].object, &s));
}

#[test]
fn ray_tangent_to_sphere() {
    let s = Shape::sphere();
    let xs = s.intersect(&ray((0.0, 1.0, -5.0), (0.0, 0.0, 1.0)));

    assert_eq!(ts(&xs), vec![5.0, 5.0]);
}

#[test]
fn ray_misses_sphere() {
    let s = Shape::sphere();
    let xs = s.intersect(&ray((0.0, 2.0, -5.0), (0.0, 0.0, 1.0)));

    assert!(xs.is_empty());
}

#[test]
fn ray_inside_and_ahead_of_sphere() {
    let s = Shape::sphere();

    assert_eq!(ts(&s.intersect(&ray((0.0, 0.0, 0.0), (0.0, 0.0, 1.0)))),
        vec![-1.0, 1.0]);
    assert_eq!(ts(&s.intersect(&ray((0.0, 0.0, 5.0), (0.0, 0.0, 1.0)))),
        vec![-6.0, -4.0]);
}

#[test]
fn intersecting_transformed_spheres() {
    let r = ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0));

    let scaled = Shape::sphere().with_transform(Matrix4::scaling(2.0, 2.0, 2.0));
    assert_eq!(ts(&scaled.intersect(&r)), vec![3.0, 7.0]);

    let moved = Shape::sphere()
        .with_transform(Matrix4::translation(5.0, 0.0, 0.0));
    assert!(moved.intersect(&r).is_empty());
}

#[test]
#[should_panic]
fn singular_transform_panics() {
    Shape::sphere().set_transform(Matrix4::scaling(0.0, 1.0, 1.0));
}

#[test]
fn sphere_normals() {
    let s = Shape::sphere();
    let k = 3.0f64.sqrt() / 3.0;
    let hit = Intersection::new(0.0, &s);

    assert_eq!(s.normal_at(Tuple::point(1.0, 0.0, 0.0), &hit),
        Tuple::vector(1.0, 0.0, 0.0));
    assert_eq!(s.normal_at(Tuple::point(0.0, 0.0, 1.0), &hit),
        Tuple::vector(0.0, 0.0, 1.0));
    assert_eq!(s.normal_at(Tuple::point(k, k, k), &hit),
        Tuple::vector(k, k, k));
}

#[test]
fn normal_on_transformed_spheres() {
    use std::f64::consts::PI;

    let moved = Shape::sphere()
        .with_transform(Matrix4::translation(0.0, 1.0, 0.0));
    let hit = Intersection::new(0.0, &moved);
    assert_eq!(moved.normal_at(Tuple::point(0.0, 1.70711, -0.70711), &hit),
        Tuple::vector(0.0, 0.70711, -0.70711));

    let squashed = Shape::sphere().with_transform(
        Matrix4::scaling(1.0, 0.5, 1.0) * Matrix4::rotation_z(PI / 5.0));
    let hit = Intersection::new(0.0, &squashed);
    let half = 2.0f64.sqrt() / 2.0;
    assert_eq!(squashed.normal_at(Tuple::point(0.0, half, -half), &hit),
        Tuple::vector(0.0, 0.97014, -0.24254));
}

#[test]
fn plane_is_flat_and_hit_from_either_side() {
    let p = Shape::plane();

    assert_eq!(local_normal(&p, Tuple::point(10.0, 0.0, -10.0)),
        Tuple::vector(0.0, 1.0, 0.0));
    assert!(p.local_intersect(&ray((0.0, 10.0, 0.0), (0.0, 0.0, 1.0))).is_empty());
    assert!(p.local_intersect(&ray((0.0, 0.0, 0.0), (0.0, 0.0, 1.0))).is_empty());
    assert_eq!(ts(&p.local_intersect(&ray((0.0, 1.0, 0.0), (0.0, -1.0, 0.0)))),
        vec![1.0]);
    assert_eq!(ts(&p.local_intersect(&ray((0.0, -1.0, 0.0), (0.0, 1.0, 0.0)))),
        vec![1.0]);
}

#[test]
fn rays_hitting_cube_faces() {
    let c = Shape::cube();
    let cases = [
        ((5.0, 0.5, 0.0), (-1.0, 0.0, 0.0), 4.0, 6.0),
        ((-5.0, 0.5, 0.0), (1.0, 0.0, 0.0), 4.0, 6.0),
        ((0.5, 5.0, 0.0), (0.0, -1.0, 0.0), 4.0, 6.0),
        ((0.5, -5.0, 0.0), (0.0, 1.0, 0.0), 4.0, 6.0),
        ((0.5, 0.0, 5.0), (0.0, 0.0, -1.0), 4.0, 6.0),
        ((0.5, 0.0, -5.0), (0.0, 0.0, 1.0), 4.0, 6.0),
        ((0.0, 0.5, 0.0), (0.0, 0.0, 1.0), -1.0, 1.0),
    ];

    for (origin, direction, t1, t2) in cases.iter() {
        let xs = c.local_intersect(&ray(*origin, *direction));
        assert_eq!(ts(&xs), vec![*t1, *t2]);
    }
}

#[test]
fn rays_missing_cube() {
    let c = Shape::cube();
    let cases = [
        ((-2.0, 0.0, 0.0), (0.2673, 0.5345, 0.8018)),
        ((0.0, -2.0, 0.0), (0.8018, 0.2673, 0.5345)),
        ((0.0, 0.0, -2.0), (0.5345, 0.8018, 0.2673)),
        ((2.0, 0.0, 2.0), (0.0, 0.0, -1.0)),
        ((0.0, 2.0, 2.0), (0.0, -1.0, 0.0)),
        ((2.0, 2.0, 0.0), (-1.0, 0.0, 0.0)),
    ];

    for (origin, direction) in cases.iter() {
        assert!(c.local_intersect(&ray(*origin, *direction)).is_empty());
    }
}

#[test]
fn cube_normals() {
    let c = Shape::cube();

    assert_eq!(local_normal(&c, Tuple::point(1.0, 0.5, -0.8)),
        Tuple::vector(1.0, 0.0, 0.0));
    assert_eq!(local_normal(&c, Tuple::point(-0.4, 0.3, -1.0)),
        Tuple::vector(0.0, 0.0, -1.0));
    assert_eq!(local_normal(&c, Tuple::point(0.3, -1.0, -0.7)),
        Tuple::vector(0.0, -1.0, 0.0));
    assert_eq!(local_normal(&c, Tuple::point(1.0, 1.0, 1.0)),
        Tuple::vector(1.0, 0.0, 0.0));
}

#[test]
fn rays_against_infinite_cylinder() {
    let cyl = Shape::cylinder();

    assert!(cyl.local_intersect(&ray((1.0, 0.0, 0.0), (0.0, 1.0, 0.0))).is_empty());
    assert!(cyl.local_intersect(&ray((0.0, 0.0, -5.0), (1.0, 1.0, 1.0))).is_empty());

    assert_eq!(ts(&cyl.local_intersect(&ray((1.0, 0.0, -5.0), (0.0, 0.0, 1.0)))),
        vec![5.0, 5.0]);
    assert_eq!(ts(&cyl.local_intersect(&ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0)))),
        vec![4.0, 6.0]);

    let d = Tuple::vector(0.1, 1.0, 1.0).normalize();
    let xs = cyl.local_intersect(&ray((0.5, 0.0, -5.0), (d.x, d.y, d.z)));
    assert_ts(&xs, &[6.80798, 7.08872]);
}

#[test]
fn truncated_cylinder_excludes_ends() {
    let cyl = Shape::truncated_cylinder(1.0, 2.0, false);
    let cases = [
        ((0.0, 1.5, 0.0), (0.1, 1.0, 0.0), 0),
        ((0.0, 3.0, -5.0), (0.0, 0.0, 1.0), 0),
        ((0.0, 0.0, -5.0), (0.0, 0.0, 1.0), 0),
        ((0.0, 2.0, -5.0), (0.0, 0.0, 1.0), 0),
        ((0.0, 1.0, -5.0), (0.0, 0.0, 1.0), 0),
        ((0.0, 1.5, -2.0), (0.0, 0.0, 1.0), 2),
    ];

    for (origin, direction, count) in cases.iter() {
        let d = Tuple::vector(direction.0, direction.1, direction.2).normalize();
        let xs = cyl.local_intersect(&ray(*origin, (d.x, d.y, d.z)));
        assert_eq!(xs.len(), *count);
    }
}

#[test]
fn capped_cylinder_hits_caps() {
    let cyl = Shape::truncated_cylinder(1.0, 2.0, true);
    let cases = [
        ((0.0, 3.0, 0.0), (0.0, -1.0, 0.0)),
        ((0.0, 3.0, -2.0), (0.0, -1.0, 2.0)),
        ((0.0, 4.0, -2.0), (0.0, -1.0, 1.0)),
        ((0.0, 0.0, -2.0), (0.0, 1.0, 2.0)),
        ((0.0, -1.0, -2.0), (0.0, 1.0, 1.0)),
    ];

    for (origin, direction) in cases.iter() {
        let d = Tuple::vector(direction.0, direction.1, direction.2).normalize();
        let xs = cyl.local_intersect(&ray(*origin, (d.x, d.y, d.z)));
        assert_eq!(xs.len(), 2);
    }
}

#[test]
fn cylinder_normals() {
    let cyl = Shape::cylinder();
    assert_eq!(local_normal(&cyl, Tuple::point(1.0, 0.0, 0.0)),
        Tuple::vector(1.0, 0.0, 0.0));
    assert_eq!(local_normal(&cyl, Tuple::point(0.0, -2.0, 1.0)),
        Tuple::vector(0.0, 0.0, 1.0));

    let capped = Shape::truncated_cylinder(1.0, 2.0, true);
    assert_eq!(local_normal(&capped, Tuple::point(0.0, 1.0, 0.0)),
        Tuple::vector(0.0, -1.0, 0.0));
    assert_eq!(local_normal(&capped, Tuple::point(0.5, 1.0, 0.0)),
        Tuple::vector(0.0, -1.0, 0.0));
    assert_eq!(local_normal(&capped, Tuple::point(0.0, 2.0, 0.5)),
        Tuple::vector(0.0, 1.0, 0.0));
}

#[test]
fn rays_against_cone() {
    let cone = Shape::cone();
    let cases = [
        ((0.0, 0.0, -5.0), (0.0, 0.0, 1.0), 5.0, 5.0),
        ((0.0, 0.0, -5.0), (1.0, 1.0, 1.0), 8.66025, 8.66025),
        ((1.0, 1.0, -5.0), (-0.5, -1.0, 1.0), 4.55006, 49.44994),
    ];

    for (origin, direction, t0, t1) in cases.iter() {
        let d = Tuple::vector(direction.0, direction.1, direction.2).normalize();
        let xs = cone.local_intersect(&ray(*origin, (d.x, d.y, d.z)));
        assert_ts(&xs, &[*t0, *t1]);
    }
}

#[test]
fn ray_parallel_to_one_nappe() {
    let cone = Shape::cone();
    let d = Tuple::vector(0.0, 1.0, 1.0).normalize();
    let xs = cone.local_intersect(&ray((0.0, 0.0, -1.0), (d.x, d.y, d.z)));

    assert_ts(&xs, &[0.35355]);
}

#[test]
fn capped_cone_hits_caps() {
    let cone = Shape::truncated_cone(-0.5, 0.5, true);
    let cases = [
        ((0.0, 0.0, -5.0), (0.0, 1.0, 0.0), 0),
        ((0.0, 0.0, -0.25), (0.0, 1.0, 1.0), 2),
        ((0.0, 0.0, -0.25), (0.0, 1.0, 0.0), 4),
    ];

    for (origin, direction, count) in cases.iter() {
        let d = Tuple::vector(direction.0, direction.1, direction.2).normalize();
        let xs = cone.local_intersect(&ray(*origin, (d.x, d.y, d.z)));
        assert_eq!(xs.len(), *count);
    }
}

#[test]
fn cone_normals() {
    let cone = Shape::cone();

    assert_eq!(local_normal(&cone, Tuple::point(0.0, 0.0, 0.0)),
        Tuple::vector(0.0, 0.0, 0.0));
    assert_eq!(local_normal(&cone, Tuple::point(1.0, 1.0, 1.0)),
        Tuple::vector(1.0, -(2.0f64.sqrt()), 1.0));
    assert_eq!(local_normal(&cone, Tuple::point(-1.0, -1.0, 0.0)),
        Tuple::vector(-1.0, 1.0, 0.0));
}

#[cfg(test)]
fn test_triangle() -> Shape {
    Shape::triangle(
        Tuple::point(0.0, 1.0, 0.0),
        Tuple::point(-1.0, 0.0, 0.0),
        Tuple::point(1.0, 0.0, 0.0))
}

#[test]
fn triangle_normal_is_constant() {
    let t = test_triangle();
    let n = Tuple::vector(0.0, 0.0, -1.0);

    assert_eq!(local_normal(&t, Tuple::point(0.0, 0.5, 0.0)), n);
    assert_eq!(local_normal(&t, Tuple::point(-0.5, 0.75, 0.0)), n);
    assert_eq!(local_normal(&t, Tuple::point(0.5, 0.25, 0.0)), n);
}

#[test]
fn rays_missing_triangle() {
    let t = test_triangle();

    assert!(t.local_intersect(&ray((0.0, -1.0, -2.0), (0.0, 1.0, 0.0))).is_empty());
    assert!(t.local_intersect(&ray((1.0, 1.0, -2.0), (0.0, 0.0, 1.0))).is_empty());
    assert!(t.local_intersect(&ray((-1.0, 1.0, -2.0), (0.0, 0.0, 1.0))).is_empty());
    assert!(t.local_intersect(&ray((0.0, -1.0, -2.0), (0.0, 0.0, 1.0))).is_empty());
}

#[test]
fn ray_strikes_triangle() {
    let t = test_triangle();
    let xs = t.local_intersect(&ray((0.0, 0.5, -2.0), (0.0, 0.0, 1.0)));

    assert_eq!(ts(&xs), vec![2.0]);
    assert!(xs[0].uv.is_none());
}

#[cfg(test)]
fn test_smooth_triangle() -> Shape {
    Shape::smooth_triangle(
        Tuple::point(0.0, 1.0, 0.0),
        Tuple::point(-1.0, 0.0, 0.0),
        Tuple::point(1.0, 0.0, 0.0),
        Tuple::vector(0.0, 1.0, 0.0),
        Tuple::vector(-1.0, 0.0, 0.0),
        Tuple::vector(1.0, 0.0, 0.0))
}

#[test]
fn smooth_triangle_stores_uv() {
    let tri = test_smooth_triangle();
    let xs = tri.local_intersect(&ray((-0.2, 0.3, -2.0), (0.0, 0.0, 1.0)));
    let (u, v) = xs[0].uv.unwrap();

    assert!(crate::feq(u, 0.45));
    assert!(crate::feq(v, 0.25));
}

#[test]
fn smooth_triangle_interpolates_normal() {
    let tri = test_smooth_triangle();
    let hit = Intersection::with_uv(1.0, &tri, 0.45, 0.25);

    assert_eq!(tri.normal_at(Tuple::origin(), &hit),
        Tuple::vector(-0.5547, 0.83205, 0.0));
}

#[test]
fn empty_group_is_never_hit() {
    let g = Shape::group();

    assert!(g.children().unwrap().is_empty());
    assert!(g.intersect(&ray((0.0, 0.0, 0.0), (0.0, 0.0, 1.0))).is_empty());
}

#[test]
fn group_hits_children_in_order() {
    let g = Shape::group_of(vec![
        Shape::sphere(),
        Shape::sphere().with_transform(Matrix4::translation(0.0, 0.0, -3.0)),
        Shape::sphere().with_transform(Matrix4::translation(5.0, 0.0, 0.0)),
    ]);
    let children = g.children().unwrap();
    let xs = g.intersect(&ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0)));

    assert_eq!(xs.len(), 4);
    assert!(std::ptr::eq(xs[0].object, &children[1]));
    assert!(std::ptr::eq(xs[1].object, &children[1]));
    assert!(std::ptr::eq(xs[2].object, &children[0]));
    assert!(std::ptr::eq(xs[3].object, &children[0]));
}

#[test]
fn group_and_child_transforms_compose() {
    let mut g = Shape::group()
        .with_transform(Matrix4::scaling(2.0, 2.0, 2.0));
    g.add_child(Shape::sphere()
        .with_transform(Matrix4::translation(5.0, 0.0, 0.0)));
    let xs = g.intersect(&ray((10.0, 0.0, -10.0), (0.0, 0.0, 1.0)));

    assert_eq!(xs.len(), 2);
}

#[test]
fn group_bounding_box_culls_rays() {
    let g = Shape::group_of(vec![
        Shape::sphere().with_transform(Matrix4::translation(0.0, 0.0, -3.0)),
    ]);

    assert_eq!(g.bounds(), Bounds::new(-1.0, -1.0, -4.0, 1.0, 1.0, -2.0));
    assert!(g.intersect(&ray((0.0, 5.0, -5.0), (0.0, 0.0, 1.0))).is_empty());
}

#[test]
fn group_bounds_cover_transformed_children() {
    let s = Shape::sphere().with_transform(
        Matrix4::translation(2.0, 5.0, -3.0) * Matrix4::scaling(2.0, 2.0, 2.0));
    let c = Shape::truncated_cylinder(-2.0, 2.0, false).with_transform(
        Matrix4::translation(-4.0, -1.0, 4.0) * Matrix4::scaling(0.5, 1.0, 0.5));
    let g = Shape::group_of(vec![s, c]);

    assert_eq!(g.bounds(), Bounds::new(-4.5, -3.0, -5.0, 4.0, 7.0, 4.5));
}

#[test]
fn primitive_bounds() {
    assert_eq!(Shape::truncated_cone(-5.0, 3.0, false).bounds(),
        Bounds::new(-5.0, -5.0, -5.0, 5.0, 3.0, 5.0));
    assert_eq!(Shape::truncated_cylinder(-5.0, 3.0, false).bounds(),
        Bounds::new(-1.0, -5.0, -1.0, 1.0, 3.0, 1.0));
    assert_eq!(Shape::plane().bounds(), Bounds::new(
        f64::NEG_INFINITY, 0.0, f64::NEG_INFINITY,
        f64::INFINITY, 0.0, f64::INFINITY));
}

#[cfg(test)]
fn nested_groups(g2_scale: (f64, f64, f64)) -> Shape {
    use std::f64::consts::FRAC_PI_2;

    let (sx, sy, sz) = g2_scale;
    let mut g2 = Shape::group().with_transform(Matrix4::scaling(sx, sy, sz));
    g2.add_child(Shape::sphere()
        .with_transform(Matrix4::translation(5.0, 0.0, 0.0)));

    let mut g1 = Shape::group().with_transform(Matrix4::rotation_y(FRAC_PI_2));
    g1.add_child(g2);
    g1
}

#[test]
fn world_to_object_through_groups() {
    let g1 = nested_groups((2.0, 2.0, 2.0));
    let s = &g1.children().unwrap()[0].children().unwrap()[0];

    assert_eq!(s.world_to_object(Tuple::point(-2.0, 0.0, -10.0)),
        Tuple::point(0.0, 0.0, -1.0));
}

#[test]
fn normal_to_world_through_groups() {
    let g1 = nested_groups((1.0, 2.0, 3.0));
    let s = &g1.children().unwrap()[0].children().unwrap()[0];
    let k = 3.0f64.sqrt() / 3.0;

    assert_eq!(s.normal_to_world(Tuple::vector(k, k, k)),
        Tuple::vector(0.2857, 0.4286, -0.8571));
    assert_eq!(s.normal_at(Tuple::point(1.7321, 1.1547, -5.5774),
        &Intersection::new(0.0, s)),
        Tuple::vector(0.2857, 0.4286, -0.8571));
}

#[test]
fn transform_set_after_attach_reaches_children() {
    let mut g = Shape::group();
    g.add_child(Shape::sphere());
    g.set_transform(Matrix4::translation(0.0, 0.0, 10.0));
    let s = &g.children().unwrap()[0];

    assert_eq!(s.world_to_object(Tuple::point(0.0, 0.0, 10.0)), Tuple::origin());
}

#[test]
#[should_panic]
fn group_has_no_normal() {
    let g = Shape::group();
    g.normal_at(Tuple::origin(), &Intersection::new(0.0, &g));
}

#[test]
#[should_panic]
fn adding_child_to_primitive_panics() {
    Shape::sphere().add_child(Shape::cube());
}

#[test]
fn includes_searches_subtrees() {
    let g = Shape::group_of(vec![Shape::sphere(), Shape::cube()]);
    let csg = Shape::csg(CsgOp::Union, g, Shape::sphere());
    let left = csg.csg_left();
    let cube = &left.children().unwrap()[1];
    let stranger = Shape::cube();

    assert!(left.includes(cube));
    assert!(csg.includes(cube));
    assert!(csg.includes(csg.csg_right()));
    assert!(!csg.includes(&stranger));
    assert!(!csg.csg_right().includes(cube));
}

#[test]
fn csg_ray_misses() {
    let c = Shape::csg(CsgOp::Union, Shape::sphere(), Shape::cube());

    assert!(c.intersect(&ray((0.0, 2.0, -5.0), (0.0, 0.0, 1.0))).is_empty());
}

#[test]
fn csg_union_keeps_outer_surfaces() {
    let c = Shape::csg(CsgOp::Union, Shape::sphere(),
        Shape::sphere().with_transform(Matrix4::translation(0.0, 0.0, 0.5)));
    let xs = c.intersect(&ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0)));

    assert_eq!(ts(&xs), vec![4.0, 6.5]);
    assert!(std::ptr::eq(xs[0].object, c.csg_left()));
    assert!(std::ptr::eq(xs[1].object, c.csg_right()));
}

#[test]
fn csg_intersection_and_difference() {
    let left = || Shape::sphere();
    let right = || Shape::sphere()
        .with_transform(Matrix4::translation(0.0, 0.0, 0.5));
    let r = ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0));

    let both = Shape::csg(CsgOp::Intersection, left(), right());
    assert_eq!(ts(&both.intersect(&r)), vec![4.5, 6.0]);

    let diff = Shape::csg(CsgOp::Difference, left(), right());
    assert_eq!(ts(&diff.intersect(&r)), vec![4.0, 4.5]);
}

#[test]
fn csg_bounds_cover_both_operands() {
    let c = Shape::csg(CsgOp::Difference, Shape::sphere(),
        Shape::sphere().with_transform(Matrix4::translation(2.0, 3.0, 4.0)));

    assert_eq!(c.bounds(), Bounds::new(-1.0, -1.0, -1.0, 3.0, 4.0, 5.0));
}

#[test]
fn deep_material_reaches_every_leaf() {
    let mut g = Shape::group_of(vec![
        Shape::sphere(),
        Shape::csg(CsgOp::Union, Shape::cube(), Shape::sphere()),
    ]);
    let m = Material { ambient: 1.0, ..Default::default() };
    g.set_material_deep(m);

    let children = g.children().unwrap();
    assert_eq!(children[0].material(), &m);
    assert_eq!(children[1].csg_left().material(), &m);
    assert_eq!(children[1].csg_right().material(), &m);
}

#[test]
fn singular_transform_is_rejected() {
    let mut s = Shape::sphere();
    let huge = Matrix4::scaling(1e120, 1e120, 1e120);

    assert!(s.try_set_transform(huge).is_err());
    assert_eq!(s.transform(), &Matrix4::identity());
}

#[test]
fn transform_singular_only_with_descendants_is_rejected() {
    let tiny = Matrix4::scaling(1e-60, 1e-60, 1e-60);
    let mut g = Shape::group_of(vec![Shape::sphere().with_transform(tiny)]);

    // Each scale inverts alone; their product's determinant underflows.
    assert!(g.try_set_transform(tiny).is_err());
    assert_eq!(g.transform(), &Matrix4::identity());

    let mut g = Shape::group().with_transform(tiny);
    assert!(g.try_add_child(Shape::sphere().with_transform(tiny)).is_err());
    assert!(g.children().unwrap().is_empty());
}
