use crate::color::Color;
use crate::matrix::Matrix4;
use crate::shape::Shape;
use crate::tuple::Tuple;

/// The procedural function a `Pattern` evaluates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PatternKind {
    /// Alternates between two colors on each unit step along X.
    Stripe(Color, Color),
    /// Linear blend from the first color at `x = 0` to the second at `x = 1`,
    /// repeating every unit.
    Gradient(Color, Color),
    /// Concentric rings in the X-Z plane.
    Ring(Color, Color),
    /// Three dimensional checkerboard of unit cubes.
    Checker(Color, Color),
    /// Gradient over the distance from the Y axis, repeating every unit.
    RadialGradient(Color, Color),
    Solid(Color),
    /// Returns the pattern-space point as a color. Used to check that object
    /// and pattern transforms are applied correctly.
    Test,
}

/// A procedural color function with its own transform.
///
/// Patterns are evaluated in *pattern space*: the world point is first taken
/// into the owning object's space, then through the inverse of the pattern
/// transform.
///
/// # Examples
///
/// ```
/// use rtc::color::Color;
/// use rtc::pattern::Pattern;
/// use rtc::tuple::Tuple;
///
/// let p = Pattern::stripe(Color::white(), Color::black());
/// assert_eq!(p.pattern_at(Tuple::point(0.5, 0.0, 0.0)), Color::white());
/// assert_eq!(p.pattern_at(Tuple::point(1.5, 0.0, 0.0)), Color::black());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pattern {
    pub kind: PatternKind,
    transform: Matrix4,
    inverse: Matrix4,
}

impl Pattern {
    pub fn new(kind: PatternKind) -> Pattern {
        Pattern {
            kind,
            transform: Matrix4::identity(),
            inverse: Matrix4::identity(),
        }
    }

    pub fn stripe(a: Color, b: Color) -> Pattern {
        Pattern::new(PatternKind::Stripe(a, b))
    }

    pub fn gradient(a: Color, b: Color) -> Pattern {
        Pattern::new(PatternKind::Gradient(a, b))
    }

    pub fn ring(a: Color, b: Color) -> Pattern {
        Pattern::new(PatternKind::Ring(a, b))
    }

    pub fn checker(a: Color, b: Color) -> Pattern {
        Pattern::new(PatternKind::Checker(a, b))
    }

    pub fn radial_gradient(a: Color, b: Color) -> Pattern {
        Pattern::new(PatternKind::RadialGradient(a, b))
    }

    pub fn solid(c: Color) -> Pattern {
        Pattern::new(PatternKind::Solid(c))
    }

    pub fn test() -> Pattern {
        Pattern::new(PatternKind::Test)
    }

    pub fn transform(&self) -> &Matrix4 {
        &self.transform
    }

    /// Sets the pattern transform and caches its inverse.
    ///
    /// # Panics
    ///
    /// Panics if `m` is not invertible.
    pub fn set_transform(&mut self, m: Matrix4) {
        self.inverse = match m.inverse() {
            Some(inv) => inv,
            None => panic!("pattern transform is not invertible:\n{}", m),
        };
        self.transform = m;
    }

    pub fn with_transform(mut self, m: Matrix4) -> Pattern {
        self.set_transform(m);
        self
    }

    /// Evaluates the pattern at a point already in pattern space.
    pub fn pattern_at(&self, p: Tuple) -> Color {
        match self.kind {
            PatternKind::Stripe(a, b) => {
                if p.x.floor().rem_euclid(2.0) == 0.0 { a } else { b }
            },
            PatternKind::Gradient(a, b) => {
                a + (b - a) * (p.x - p.x.floor())
            },
            PatternKind::Ring(a, b) => {
                let d = (p.x * p.x + p.z * p.z).sqrt();
                if d.floor().rem_euclid(2.0) == 0.0 { a } else { b }
            },
            PatternKind::Checker(a, b) => {
                let sum = p.x.floor() + p.y.floor() + p.z.floor();
                if sum.rem_euclid(2.0) == 0.0 { a } else { b }
            },
            PatternKind::RadialGradient(a, b) => {
                let d = (p.x * p.x + p.z * p.z).sqrt();
                a + (b - a) * (d - d.floor())
            },
            PatternKind::Solid(c) => c,
            PatternKind::Test => Color::rgb(p.x, p.y, p.z),
        }
    }

    /// Evaluates the pattern at a world-space point on `object`.
    pub fn pattern_at_shape(&self, object: &Shape, world_point: Tuple) -> Color {
        let object_point = object.world_to_object(world_point);
        self.pattern_at(self.inverse * object_point)
    }
}

#[test]
fn stripes_alternate_only_along_x() {
    let p = Pattern::stripe(Color::white(), Color::black());

    assert_eq!(p.pattern_at(Tuple::point(0.0, 1.0, 0.0)), Color::white());
    assert_eq!(p.pattern_at(Tuple::point(0.0, 2.0, 0.0)), Color::white());
    assert_eq!(p.pattern_at(Tuple::point(0.0, 0.0, 2.0)), Color::white());
    assert_eq!(p.pattern_at(Tuple::point(0.9, 0.0, 0.0)), Color::white());
    assert_eq!(p.pattern_at(Tuple::point(1.0, 0.0, 0.0)), Color::black());
    assert_eq!(p.pattern_at(Tuple::point(-0.1, 0.0, 0.0)), Color::black());
    assert_eq!(p.pattern_at(Tuple::point(-1.0, 0.0, 0.0)), Color::black());
    assert_eq!(p.pattern_at(Tuple::point(-1.1, 0.0, 0.0)), Color::white());
}

#[test]
fn gradient_interpolates() {
    let p = Pattern::gradient(Color::white(), Color::black());

    assert_eq!(p.pattern_at(Tuple::point(0.25, 0.0, 0.0)),
        Color::rgb(0.75, 0.75, 0.75));
    assert_eq!(p.pattern_at(Tuple::point(0.75, 0.0, 0.0)),
        Color::rgb(0.25, 0.25, 0.25));
}

#[test]
fn rings_extend_in_x_and_z() {
    let p = Pattern::ring(Color::white(), Color::black());

    assert_eq!(p.pattern_at(Tuple::origin()), Color::white());
    assert_eq!(p.pattern_at(Tuple::point(1.0, 0.0, 0.0)), Color::black());
    assert_eq!(p.pattern_at(Tuple::point(0.0, 0.0, 1.0)), Color::black());
    assert_eq!(p.pattern_at(Tuple::point(0.708, 0.0, 0.708)), Color::black());
}

#[test]
fn checkers_repeat_in_every_dimension() {
    let p = Pattern::checker(Color::white(), Color::black());

    assert_eq!(p.pattern_at(Tuple::point(0.99, 0.0, 0.0)), Color::white());
    assert_eq!(p.pattern_at(Tuple::point(1.01, 0.0, 0.0)), Color::black());
    assert_eq!(p.pattern_at(Tuple::point(0.0, 1.01, 0.0)), Color::black());
    assert_eq!(p.pattern_at(Tuple::point(0.0, 0.0, 1.01)), Color::black());
}

#[test]
fn pattern_with_object_transform() {
    let s = Shape::sphere().with_transform(Matrix4::scaling(2.0, 2.0, 2.0));
    let p = Pattern::test();

    assert_eq!(p.pattern_at_shape(&s, Tuple::point(2.0, 3.0, 4.0)),
        Color::rgb(1.0, 1.5, 2.0));
}

#[test]
fn pattern_with_pattern_transform() {
    let s = Shape::sphere();
    let p = Pattern::test().with_transform(Matrix4::scaling(2.0, 2.0, 2.0));

    assert_eq!(p.pattern_at_shape(&s, Tuple::point(2.0, 3.0, 4.0)),
        Color::rgb(1.0, 1.5, 2.0));
}

#[test]
fn pattern_with_both_transforms() {
    let s = Shape::sphere().with_transform(Matrix4::scaling(2.0, 2.0, 2.0));
    let p = Pattern::test().with_transform(Matrix4::translation(0.5, 1.0, 1.5));

    assert_eq!(p.pattern_at_shape(&s, Tuple::point(2.5, 3.0, 3.5)),
        Color::rgb(0.75, 0.5, 0.25));
}
