use std::fs::File;
use std::io::{ self, BufWriter, Write };
use std::path::Path;

use crate::color::Color;

/// Longest line a PPM file may contain.
const PPM_LINE_WIDTH: usize = 70;

/// A grid of pixels, stored row-major.
///
/// Colors are kept as raw floats; clamping happens only when the canvas is
/// encoded.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Canvas {
    /// Creates a black canvas.
    pub fn new(width: usize, height: usize) -> Canvas {
        Canvas {
            width,
            height,
            pixels: vec![Color::black(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Writes a color at column `x`, row `y`. Out-of-bounds writes are
    /// ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use rtc::canvas::Canvas;
    /// use rtc::color::Color;
    ///
    /// let red = Color::rgb(1.0, 0.0, 0.0);
    /// let mut canvas = Canvas::new(10, 20);
    /// canvas.write_pixel(2, 3, red);
    /// assert_eq!(canvas.pixel_at(2, 3), red);
    /// ```
    pub fn write_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }

        self.pixels[y * self.width + x] = color;
    }

    /// The color at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the canvas.
    pub fn pixel_at(&self, x: usize, y: usize) -> Color {
        assert!(x < self.width && y < self.height,
            "pixel ({}, {}) is outside a {}x{} canvas", x, y,
            self.width, self.height);
        self.pixels[y * self.width + x]
    }

    /// Like `pixel_at`, but returns `None` out of bounds.
    pub fn read_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }

        Some(self.pixels[y * self.width + x])
    }

    /// The raw pixel buffer, one row after another. Renderers split this
    /// into rows and fill them independently.
    pub fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Encodes the canvas as a plain (P3) PPM image.
    ///
    /// Every row starts on a new line, no line is longer than 70 characters
    /// and the output ends with a newline.
    pub fn to_ppm(&self) -> String {
        let mut out = format!("P3\n{} {}\n255\n", self.width, self.height);

        if self.width == 0 {
            return out;
        }

        for row in self.pixels.chunks(self.width) {
            let mut line = String::new();
            for value in row.iter().flat_map(|c| c.to_bytes(255)) {
                let value = value.to_string();
                if !line.is_empty() && line.len() + 1 + value.len() > PPM_LINE_WIDTH {
                    out.push_str(&line);
                    out.push('\n');
                    line.clear();
                }

                if !line.is_empty() {
                    line.push(' ');
                }
                line.push_str(&value);
            }

            out.push_str(&line);
            out.push('\n');
        }

        out
    }

    /// Writes the canvas to `path` as a PPM image.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        out.write_all(self.to_ppm().as_bytes())?;
        out.flush()
    }
}

#[test]
fn new_canvas_is_black() {
    let c = Canvas::new(10, 20);

    assert_eq!(c.width(), 10);
    assert_eq!(c.height(), 20);
    assert!(c.pixels().iter().all(|p| *p == Color::black()));
}

#[test]
fn out_of_bounds_writes_are_ignored() {
    let mut c = Canvas::new(2, 2);
    c.write_pixel(2, 0, Color::white());
    c.write_pixel(0, 5, Color::white());

    assert!(c.pixels().iter().all(|p| *p == Color::black()));
    assert_eq!(c.read_pixel(2, 0), None);
}

#[test]
fn ppm_header() {
    let ppm = Canvas::new(5, 3).to_ppm();
    let lines: Vec<&str> = ppm.lines().take(3).collect();

    assert_eq!(lines, vec!["P3", "5 3", "255"]);
}

#[test]
fn ppm_pixel_data_is_clamped() {
    let mut c = Canvas::new(5, 3);
    c.write_pixel(0, 0, Color::rgb(1.5, 0.0, 0.0));
    c.write_pixel(2, 1, Color::rgb(0.0, 0.5, 0.0));
    c.write_pixel(4, 2, Color::rgb(-0.5, 0.0, 1.0));
    let ppm = c.to_ppm();
    let lines: Vec<&str> = ppm.lines().skip(3).collect();

    assert_eq!(lines, vec![
        "255 0 0 0 0 0 0 0 0 0 0 0 0 0 0",
        "0 0 0 0 0 0 0 128 0 0 0 0 0 0 0",
        "0 0 0 0 0 0 0 0 0 0 0 0 0 0 255",
    ]);
}

#[test]
fn ppm_splits_long_lines() {
    let mut c = Canvas::new(10, 2);
    for p in c.pixels_mut() {
        *p = Color::rgb(1.0, 0.8, 0.6);
    }
    let ppm = c.to_ppm();
    let lines: Vec<&str> = ppm.lines().skip(3).collect();

    assert_eq!(lines, vec![
        "255 204 153 255 204 153 255 204 153 255 204 153 255 204 153 255 204",
        "153 255 204 153 255 204 153 255 204 153 255 204 153",
        "255 204 153 255 204 153 255 204 153 255 204 153 255 204 153 255 204",
        "153 255 204 153 255 204 153 255 204 153 255 204 153",
    ]);
    assert!(ppm.lines().all(|l| l.len() <= 70));
}

#[test]
fn ppm_ends_with_newline() {
    assert!(Canvas::new(5, 3).to_ppm().ends_with('\n'));
}
