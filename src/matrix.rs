use std::fmt;
use std::ops::{ Index, IndexMut, Mul };

use crate::feq;
use crate::tuple::Tuple;

/// A 4x4 affine transformation matrix, stored row-major.
///
/// Transforms compose right-to-left: in `a * b * c`, `c` is applied first to
/// an object-space point and `a` last.
///
/// # Examples
///
/// Chaining transforms:
///
/// ```
/// use rtc::matrix::Matrix4;
/// use rtc::tuple::Tuple;
///
/// let m = Matrix4::translation(10.0, 5.0, 7.0)
///     * Matrix4::scaling(5.0, 5.0, 5.0)
///     * Matrix4::rotation_x(std::f64::consts::FRAC_PI_2);
///
/// assert_eq!(m * Tuple::point(1.0, 0.0, 1.0), Tuple::point(15.0, 0.0, 7.0));
/// ```
#[derive(Copy, Clone, Debug)]
pub struct Matrix4 {
    rows: [[f64; 4]; 4],
}

impl Default for Matrix4 {
    fn default() -> Matrix4 {
        Matrix4::identity()
    }
}

/// Element-wise comparison within `FEQ_EPSILON`.
impl PartialEq for Matrix4 {
    fn eq(&self, other: &Matrix4) -> bool {
        self.rows.iter().flatten()
            .zip(other.rows.iter().flatten())
            .all(|(a, b)| feq(*a, *b))
    }
}

impl From<[f64; 16]> for Matrix4 {
    fn from(data: [f64; 16]) -> Matrix4 {
        let mut m = Matrix4::zero();
        for (i, value) in data.iter().enumerate() {
            m.rows[i / 4][i % 4] = *value;
        }

        m
    }
}

impl From<[[f64; 4]; 4]> for Matrix4 {
    fn from(rows: [[f64; 4]; 4]) -> Matrix4 {
        Matrix4 { rows }
    }
}

impl Index<(usize, usize)> for Matrix4 {
    type Output = f64;

    fn index(&self, (r, c): (usize, usize)) -> &f64 {
        &self.rows[r][c]
    }
}

impl IndexMut<(usize, usize)> for Matrix4 {
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut f64 {
        &mut self.rows[r][c]
    }
}

impl Matrix4 {
    pub fn zero() -> Matrix4 {
        Matrix4 { rows: [[0.0; 4]; 4] }
    }

    pub fn identity() -> Matrix4 {
        let mut m = Matrix4::zero();
        for i in 0..4 {
            m.rows[i][i] = 1.0;
        }

        m
    }

    pub fn translation(x: f64, y: f64, z: f64) -> Matrix4 {
        let mut m = Matrix4::identity();
        m[(0, 3)] = x;
        m[(1, 3)] = y;
        m[(2, 3)] = z;
        m
    }

    pub fn scaling(x: f64, y: f64, z: f64) -> Matrix4 {
        let mut m = Matrix4::identity();
        m[(0, 0)] = x;
        m[(1, 1)] = y;
        m[(2, 2)] = z;
        m
    }

    /// Rotation about the X axis by `r` radians (left-handed).
    pub fn rotation_x(r: f64) -> Matrix4 {
        let (sin, cos) = r.sin_cos();
        let mut m = Matrix4::identity();
        m[(1, 1)] = cos;
        m[(1, 2)] = -sin;
        m[(2, 1)] = sin;
        m[(2, 2)] = cos;
        m
    }

    /// Rotation about the Y axis by `r` radians (left-handed).
    pub fn rotation_y(r: f64) -> Matrix4 {
        let (sin, cos) = r.sin_cos();
        let mut m = Matrix4::identity();
        m[(0, 0)] = cos;
        m[(0, 2)] = sin;
        m[(2, 0)] = -sin;
        m[(2, 2)] = cos;
        m
    }

    /// Rotation about the Z axis by `r` radians (left-handed).
    pub fn rotation_z(r: f64) -> Matrix4 {
        let (sin, cos) = r.sin_cos();
        let mut m = Matrix4::identity();
        m[(0, 0)] = cos;
        m[(0, 1)] = -sin;
        m[(1, 0)] = sin;
        m[(1, 1)] = cos;
        m
    }

    /// A shear. Each parameter moves one component in proportion to another,
    /// e.g. `xy` moves `x` in proportion to `y`.
    pub fn shearing(xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64)
        -> Matrix4 {
        let mut m = Matrix4::identity();
        m[(0, 1)] = xy;
        m[(0, 2)] = xz;
        m[(1, 0)] = yx;
        m[(1, 2)] = yz;
        m[(2, 0)] = zx;
        m[(2, 1)] = zy;
        m
    }

    /// Builds a look-at transform for an eye at `from` looking toward `to`.
    ///
    /// The result moves the *world* so that the eye sits at the origin
    /// looking down -Z with `up` roughly along +Y.
    pub fn view_transform(from: Tuple, to: Tuple, up: Tuple) -> Matrix4 {
        let forward = (to - from).normalize();
        let left = forward.cross(&up.normalize());
        let true_up = left.cross(&forward);

        let orientation: Matrix4 = [
            [ left.x,     left.y,     left.z,     0.0],
            [ true_up.x,  true_up.y,  true_up.z,  0.0],
            [-forward.x, -forward.y, -forward.z,  0.0],
            [ 0.0,        0.0,        0.0,        1.0],
        ].into();

        orientation * Matrix4::translation(-from.x, -from.y, -from.z)
    }

    pub fn transpose(&self) -> Matrix4 {
        let mut t = Matrix4::zero();
        for r in 0..4 {
            for c in 0..4 {
                t.rows[c][r] = self.rows[r][c];
            }
        }

        t
    }

    /// The determinant, by Laplace expansion over pairs of 2x2 minors.
    pub fn determinant(&self) -> f64 {
        let (s, c) = self.pair_minors();
        s[0] * c[5] - s[1] * c[4] + s[2] * c[3]
            + s[3] * c[2] - s[4] * c[1] + s[5] * c[0]
    }

    /// True if `inverse` would succeed: the determinant is non-zero and
    /// finite.
    pub fn is_invertible(&self) -> bool {
        let det = self.determinant();
        det != 0.0 && det.is_finite()
    }

    /// Computes the inverse, or `None` if the matrix is singular.
    pub fn inverse(&self) -> Option<Matrix4> {
        let m = &self.rows;
        let (s, c) = self.pair_minors();

        let det = s[0] * c[5] - s[1] * c[4] + s[2] * c[3]
            + s[3] * c[2] - s[4] * c[1] + s[5] * c[0];
        if det == 0.0 || !det.is_finite() {
            return None;
        }

        let inv = 1.0 / det;
        let rows = [
            [
                ( m[1][1] * c[5] - m[1][2] * c[4] + m[1][3] * c[3]) * inv,
                (-m[0][1] * c[5] + m[0][2] * c[4] - m[0][3] * c[3]) * inv,
                ( m[3][1] * s[5] - m[3][2] * s[4] + m[3][3] * s[3]) * inv,
                (-m[2][1] * s[5] + m[2][2] * s[4] - m[2][3] * s[3]) * inv,
            ],
            [
                (-m[1][0] * c[5] + m[1][2] * c[2] - m[1][3] * c[1]) * inv,
                ( m[0][0] * c[5] - m[0][2] * c[2] + m[0][3] * c[1]) * inv,
                (-m[3][0] * s[5] + m[3][2] * s[2] - m[3][3] * s[1]) * inv,
                ( m[2][0] * s[5] - m[2][2] * s[2] + m[2][3] * s[1]) * inv,
            ],
            [
                ( m[1][0] * c[4] - m[1][1] * c[2] + m[1][3] * c[0]) * inv,
                (-m[0][0] * c[4] + m[0][1] * c[2] - m[0][3] * c[0]) * inv,
                ( m[3][0] * s[4] - m[3][1] * s[2] + m[3][3] * s[0]) * inv,
                (-m[2][0] * s[4] + m[2][1] * s[2] - m[2][3] * s[0]) * inv,
            ],
            [
                (-m[1][0] * c[3] + m[1][1] * c[1] - m[1][2] * c[0]) * inv,
                ( m[0][0] * c[3] - m[0][1] * c[1] + m[0][2] * c[0]) * inv,
                (-m[3][0] * s[3] + m[3][1] * s[1] - m[3][2] * s[0]) * inv,
                ( m[2][0] * s[3] - m[2][1] * s[1] + m[2][2] * s[0]) * inv,
            ],
        ];

        Some(Matrix4 { rows })
    }

    /// 2x2 minors of the top two rows (`s`) and bottom two rows (`c`),
    /// indexed by column pairs (01, 02, 03, 12, 13, 23).
    fn pair_minors(&self) -> ([f64; 6], [f64; 6]) {
        let m = &self.rows;
        let minor = |a: usize, b: usize, i: usize, j: usize| {
            m[a][i] * m[b][j] - m[b][i] * m[a][j]
        };

        let pairs = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];
        let mut s = [0.0; 6];
        let mut c = [0.0; 6];
        for (k, &(i, j)) in pairs.iter().enumerate() {
            s[k] = minor(0, 1, i, j);
            c[k] = minor(2, 3, i, j);
        }

        (s, c)
    }
}

impl Mul<Matrix4> for Matrix4 {
    type Output = Matrix4;

    fn mul(self, other: Matrix4) -> Matrix4 {
        let mut res = Matrix4::zero();
        for r in 0..4 {
            for c in 0..4 {
                res.rows[r][c] = (0..4)
                    .map(|k| self.rows[r][k] * other.rows[k][c])
                    .sum();
            }
        }

        res
    }
}

impl Mul<Tuple> for Matrix4 {
    type Output = Tuple;

    fn mul(self, t: Tuple) -> Tuple {
        let row = |r: usize| {
            let m = &self.rows[r];
            m[0] * t.x + m[1] * t.y + m[2] * t.z + m[3] * t.w
        };

        Tuple::new(row(0), row(1), row(2), row(3))
    }
}

impl fmt::Display for Matrix4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            write!(f, "|")?;
            for value in row.iter() {
                write!(f, " {:>9.5} |", value)?;
            }

            if i != 3 {
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

#[test]
fn multiplying_by_identity_is_a_no_op() {
    let a: Matrix4 = [ 0.0, 1.0,  2.0,  4.0,
                       1.0, 2.0,  4.0,  8.0,
                       2.0, 4.0,  8.0, 16.0,
                       4.0, 8.0, 16.0, 32.0 ].into();

    assert_eq!(Matrix4::identity() * a, a);
    assert_eq!(a * Matrix4::identity(), a);
}

#[test]
fn multiplying_two_matrices() {
    let a: Matrix4 = [ 1.0, 2.0, 3.0, 4.0,
                       5.0, 6.0, 7.0, 8.0,
                       9.0, 8.0, 7.0, 6.0,
                       5.0, 4.0, 3.0, 2.0 ].into();
    let b: Matrix4 = [ -2.0, 1.0, 2.0,  3.0,
                        3.0, 2.0, 1.0, -1.0,
                        4.0, 3.0, 6.0,  5.0,
                        1.0, 2.0, 7.0,  8.0 ].into();
    let ab: Matrix4 = [ 20.0, 22.0,  50.0,  48.0,
                        44.0, 54.0, 114.0, 108.0,
                        40.0, 58.0, 110.0, 102.0,
                        16.0, 26.0,  46.0,  42.0 ].into();

    assert_eq!(a * b, ab);
}

#[test]
fn transposing() {
    let a: Matrix4 = [ 0.0, 9.0, 3.0, 0.0,
                       9.0, 8.0, 0.0, 8.0,
                       1.0, 8.0, 5.0, 3.0,
                       0.0, 0.0, 5.0, 8.0 ].into();
    let t: Matrix4 = [ 0.0, 9.0, 1.0, 0.0,
                       9.0, 8.0, 8.0, 0.0,
                       3.0, 0.0, 5.0, 5.0,
                       0.0, 8.0, 3.0, 8.0 ].into();

    assert_eq!(a.transpose(), t);
    assert_eq!(Matrix4::identity().transpose(), Matrix4::identity());
}

#[test]
fn determinant_of_4x4() {
    let a: Matrix4 = [ -2.0, -8.0,  3.0,  5.0,
                       -3.0,  1.0,  7.0,  3.0,
                        1.0,  2.0, -9.0,  6.0,
                       -6.0,  7.0,  7.0, -9.0 ].into();

    assert!(feq(a.determinant(), -4071.0));
}

#[test]
fn singular_matrix_has_no_inverse() {
    let a: Matrix4 = [ -4.0,  2.0, -2.0, -3.0,
                        9.0,  6.0,  2.0,  6.0,
                        0.0, -5.0,  1.0, -5.0,
                        0.0,  0.0,  0.0,  0.0 ].into();

    assert!(!a.is_invertible());
    assert_eq!(a.inverse(), None);
}

#[test]
fn inverting_a_matrix() {
    let a: Matrix4 = [ -5.0,  2.0,  6.0, -8.0,
                        1.0, -5.0,  1.0,  8.0,
                        7.0,  7.0, -6.0, -7.0,
                        1.0, -3.0,  7.0,  4.0 ].into();
    let expected: Matrix4 = [
         0.21805,  0.45113,  0.24060, -0.04511,
        -0.80827, -1.45677, -0.44361,  0.52068,
        -0.07895, -0.22368, -0.05263,  0.19737,
        -0.52256, -0.81391, -0.30075,  0.30639,
    ].into();

    let inv = a.inverse().unwrap();
    assert!(feq(a.determinant(), 532.0));
    assert_eq!(inv, expected);
}

#[test]
fn inverse_properties() {
    let a: Matrix4 = [  3.0, -9.0,  7.0,  3.0,
                        3.0, -8.0,  2.0, -9.0,
                       -4.0,  4.0,  4.0,  1.0,
                       -6.0,  5.0, -1.0,  1.0 ].into();
    let b: Matrix4 = [ 8.0,  2.0, 2.0, 2.0,
                       3.0, -1.0, 7.0, 0.0,
                       7.0,  0.0, 5.0, 4.0,
                       6.0, -2.0, 0.0, 5.0 ].into();

    let inv = a.inverse().unwrap();
    assert_eq!(a * inv, Matrix4::identity());
    assert_eq!(inv.inverse().unwrap(), a);
    assert_eq!((a * b) * b.inverse().unwrap(), a);
}

#[test]
fn translation_moves_points_not_vectors() {
    let t = Matrix4::translation(5.0, -3.0, 2.0);

    assert_eq!(t * Tuple::point(-3.0, 4.0, 5.0), Tuple::point(2.0, 1.0, 7.0));
    assert_eq!(t.inverse().unwrap() * Tuple::point(-3.0, 4.0, 5.0),
        Tuple::point(-8.0, 7.0, 3.0));
    assert_eq!(t * Tuple::vector(-3.0, 4.0, 5.0), Tuple::vector(-3.0, 4.0, 5.0));
}

#[test]
fn scaling_and_reflection() {
    let s = Matrix4::scaling(2.0, 3.0, 4.0);

    assert_eq!(s * Tuple::point(-4.0, 6.0, 8.0), Tuple::point(-8.0, 18.0, 32.0));
    assert_eq!(s.inverse().unwrap() * Tuple::vector(-4.0, 6.0, 8.0),
        Tuple::vector(-2.0, 2.0, 2.0));
    assert_eq!(Matrix4::scaling(-1.0, 1.0, 1.0) * Tuple::point(2.0, 3.0, 4.0),
        Tuple::point(-2.0, 3.0, 4.0));
}

#[test]
fn rotations() {
    use std::f64::consts::{ FRAC_PI_2, FRAC_PI_4 };
    let half = 2.0f64.sqrt() / 2.0;

    assert_eq!(Matrix4::rotation_x(FRAC_PI_4) * Tuple::point(0.0, 1.0, 0.0),
        Tuple::point(0.0, half, half));
    assert_eq!(Matrix4::rotation_x(FRAC_PI_2) * Tuple::point(0.0, 1.0, 0.0),
        Tuple::point(0.0, 0.0, 1.0));
    assert_eq!(Matrix4::rotation_y(FRAC_PI_4) * Tuple::point(0.0, 0.0, 1.0),
        Tuple::point(half, 0.0, half));
    assert_eq!(Matrix4::rotation_z(FRAC_PI_2) * Tuple::point(0.0, 1.0, 0.0),
        Tuple::point(-1.0, 0.0, 0.0));
}

#[test]
fn shearing_each_component() {
    let p = Tuple::point(2.0, 3.0, 4.0);

    assert_eq!(Matrix4::shearing(1.0, 0.0, 0.0, 0.0, 0.0, 0.0) * p,
        Tuple::point(5.0, 3.0, 4.0));
    assert_eq!(Matrix4::shearing(0.0, 1.0, 0.0, 0.0, 0.0, 0.0) * p,
        Tuple::point(6.0, 3.0, 4.0));
    assert_eq!(Matrix4::shearing(0.0, 0.0, 1.0, 0.0, 0.0, 0.0) * p,
        Tuple::point(2.0, 5.0, 4.0));
    assert_eq!(Matrix4::shearing(0.0, 0.0, 0.0, 1.0, 0.0, 0.0) * p,
        Tuple::point(2.0, 7.0, 4.0));
    assert_eq!(Matrix4::shearing(0.0, 0.0, 0.0, 0.0, 1.0, 0.0) * p,
        Tuple::point(2.0, 3.0, 6.0));
    assert_eq!(Matrix4::shearing(0.0, 0.0, 0.0, 0.0, 0.0, 1.0) * p,
        Tuple::point(2.0, 3.0, 7.0));
}

#[test]
fn view_transform_defaults_and_moves() {
    let up = Tuple::vector(0.0, 1.0, 0.0);

    assert_eq!(Matrix4::view_transform(
        Tuple::origin(), Tuple::point(0.0, 0.0, -1.0), up),
        Matrix4::identity());
    assert_eq!(Matrix4::view_transform(
        Tuple::origin(), Tuple::point(0.0, 0.0, 1.0), up),
        Matrix4::scaling(-1.0, 1.0, -1.0));
    assert_eq!(Matrix4::view_transform(
        Tuple::point(0.0, 0.0, 8.0), Tuple::origin(), up),
        Matrix4::translation(0.0, 0.0, -8.0));
}

#[test]
fn arbitrary_view_transform() {
    let from = Tuple::point(1.0, 3.0, 2.0);
    let to = Tuple::point(4.0, -2.0, 8.0);
    let up = Tuple::vector(1.0, 1.0, 0.0);
    let expected: Matrix4 = [ -0.50709, 0.50709,  0.67612, -2.36643,
                               0.76772, 0.60609,  0.12122, -2.82843,
                              -0.35857, 0.59761, -0.71714,  0.00000,
                               0.00000, 0.00000,  0.00000,  1.00000 ].into();

    assert_eq!(Matrix4::view_transform(from, to, up), expected);
}

#[test]
fn overflowing_determinant_is_not_invertible() {
    let m = Matrix4::scaling(1e120, 1e120, 1e120);

    assert!(!m.is_invertible());
    assert!(m.inverse().is_none());
    assert!(Matrix4::scaling(2.0, 2.0, 2.0).is_invertible());
}
