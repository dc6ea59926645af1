use std::ops::{ Add, Sub, Mul };

use crate::feq;

/// A color with red, green and blue components.
///
/// Components are nominally in `[0.0, 1.0]` but are not clamped; lighting
/// routinely overshoots and the image encoder clamps on output.
///
/// # Examples
///
/// ```
/// use rtc::color::Color;
///
/// let yellow = Color::rgb(1.0, 1.0, 0.0);
/// let purple = Color::rgb(1.0, 0.0, 1.0);
/// assert_eq!(yellow * purple, Color::rgb(1.0, 0.0, 0.0));
/// ```
#[derive(Copy, Clone, Debug, Default)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Colors compare component-wise within `FEQ_EPSILON`.
impl PartialEq for Color {
    fn eq(&self, other: &Color) -> bool {
        feq(self.r, other.r)
            && feq(self.g, other.g)
            && feq(self.b, other.b)
    }
}

/// Takes up to the first three numbers of a slice; missing channels are zero.
impl From<&[f64]> for Color {
    fn from(v: &[f64]) -> Color {
        let at = |i: usize| v.get(i).copied().unwrap_or(0.0);
        Color::rgb(at(0), at(1), at(2))
    }
}

impl Color {
    pub fn rgb(r: f64, g: f64, b: f64) -> Color {
        Color { r, g, b }
    }

    pub fn black() -> Color {
        Color::rgb(0.0, 0.0, 0.0)
    }

    pub fn white() -> Color {
        Color::rgb(1.0, 1.0, 1.0)
    }

    /// Scales each channel to `0..=max`, clamping out-of-range values.
    pub fn to_bytes(&self, max: u32) -> [u32; 3] {
        let scale = |c: f64| (c * max as f64).round().clamp(0.0, max as f64) as u32;
        [scale(self.r), scale(self.g), scale(self.b)]
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, other: Color) -> Color {
        Color::rgb(self.r + other.r, self.g + other.g, self.b + other.b)
    }
}

impl Sub for Color {
    type Output = Color;

    fn sub(self, other: Color) -> Color {
        Color::rgb(self.r - other.r, self.g - other.g, self.b - other.b)
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, s: f64) -> Color {
        Color::rgb(self.r * s, self.g * s, self.b * s)
    }
}

/// The Hadamard (component-wise) product.
impl Mul<Color> for Color {
    type Output = Color;

    fn mul(self, other: Color) -> Color {
        Color::rgb(self.r * other.r, self.g * other.g, self.b * other.b)
    }
}

impl std::iter::Sum for Color {
    fn sum<I: Iterator<Item = Color>>(iter: I) -> Color {
        iter.fold(Color::black(), |acc, c| acc + c)
    }
}

#[test]
fn adding_and_subtracting_colors() {
    let c1 = Color::rgb(0.9, 0.6, 0.75);
    let c2 = Color::rgb(0.7, 0.1, 0.25);

    assert_eq!(c1 + c2, Color::rgb(1.6, 0.7, 1.0));
    assert_eq!(c1 - c2, Color::rgb(0.2, 0.5, 0.5));
}

#[test]
fn scaling_a_color() {
    assert_eq!(Color::rgb(0.2, 0.3, 0.4) * 2.0, Color::rgb(0.4, 0.6, 0.8));
}

#[test]
fn hadamard_product() {
    let c1 = Color::rgb(1.0, 0.2, 0.4);
    let c2 = Color::rgb(0.9, 1.0, 0.1);

    assert_eq!(c1 * c2, Color::rgb(0.9, 0.2, 0.04));
}

#[test]
fn bytes_are_clamped() {
    assert_eq!(Color::rgb(1.5, 0.5, -0.5).to_bytes(255), [255, 128, 0]);
}

#[test]
fn summing_colors() {
    let total: Color = vec![Color::rgb(0.1, 0.2, 0.3); 3].into_iter().sum();

    assert_eq!(total, Color::rgb(0.3, 0.6, 0.9));
}
