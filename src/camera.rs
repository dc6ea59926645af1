use log::{ debug, info };

use crate::canvas::Canvas;
use crate::color::Color;
use crate::consts::DEFAULT_RECURSION_DEPTH;
use crate::matrix::Matrix4;
use crate::ray::Ray;
use crate::tuple::Tuple;
use crate::world::World;

/// A pinhole camera mapping a `hsize` by `vsize` pixel grid onto the world.
///
/// In camera space the eye sits at the origin looking down -Z at a canvas
/// one unit away. The inverse of the view transform, and the eye position
/// it implies, are computed whenever the transform is set, so
/// `ray_for_pixel` only reads and is safe to call from many threads.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    hsize: usize,
    vsize: usize,
    field_of_view: f64,

    half_width: f64,
    half_height: f64,
    pixel_size: f64,

    transform: Matrix4,
    inverse: Matrix4,
    origin: Tuple,
}

impl Camera {
    /// Creates a camera with an identity view transform. `field_of_view` is
    /// the horizontal (or vertical, for tall images) angle in radians.
    pub fn new(hsize: usize, vsize: usize, field_of_view: f64) -> Camera {
        let half_view = (field_of_view / 2.0).tan();
        let aspect = hsize as f64 / vsize.max(1) as f64;

        let (half_width, half_height) = if aspect >= 1.0 {
            (half_view, half_view / aspect)
        } else {
            (half_view * aspect, half_view)
        };

        Camera {
            hsize,
            vsize,
            field_of_view,
            half_width,
            half_height,
            pixel_size: half_width * 2.0 / hsize.max(1) as f64,
            transform: Matrix4::identity(),
            inverse: Matrix4::identity(),
            origin: Tuple::origin(),
        }
    }

    pub fn hsize(&self) -> usize {
        self.hsize
    }

    pub fn vsize(&self) -> usize {
        self.vsize
    }

    pub fn field_of_view(&self) -> f64 {
        self.field_of_view
    }

    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    pub fn transform(&self) -> &Matrix4 {
        &self.transform
    }

    /// Sets the view transform and caches its inverse and the eye position.
    ///
    /// # Panics
    ///
    /// Panics if `transform` is not invertible.
    pub fn set_transform(&mut self, transform: Matrix4) {
        self.inverse = match transform.inverse() {
            Some(inv) => inv,
            None => panic!("camera transform is not invertible:\n{}", transform),
        };
        self.transform = transform;
        self.origin = self.inverse * Tuple::origin();
    }

    pub fn with_transform(mut self, transform: Matrix4) -> Camera {
        self.set_transform(transform);
        self
    }

    /// The world-space ray from the eye through the center of pixel
    /// `(px, py)`.
    pub fn ray_for_pixel(&self, px: usize, py: usize) -> Ray {
        let xoffset = (px as f64 + 0.5) * self.pixel_size;
        let yoffset = (py as f64 + 0.5) * self.pixel_size;

        // +X points to the camera's left.
        let world_x = self.half_width - xoffset;
        let world_y = self.half_height - yoffset;

        let pixel = self.inverse * Tuple::point(world_x, world_y, -1.0);
        let direction = (pixel - self.origin).normalize();

        Ray::new(self.origin, direction)
    }

    /// Traces the primary ray of a single pixel.
    pub fn color_for_pixel(&self, world: &World, px: usize, py: usize,
        max_depth: usize) -> Color {
        world.color_at(&self.ray_for_pixel(px, py), max_depth)
    }

    /// Renders `world` on the calling thread with the default bounce budget.
    pub fn render(&self, world: &World) -> Canvas {
        self.render_to_depth(world, DEFAULT_RECURSION_DEPTH)
    }

    /// Renders `world` on the calling thread, allowing `max_depth` bounces
    /// of reflection and refraction.
    pub fn render_to_depth(&self, world: &World, max_depth: usize) -> Canvas {
        info!("rendering {}x{} on one thread, depth {}",
            self.hsize, self.vsize, max_depth);

        let mut image = Canvas::new(self.hsize, self.vsize);
        for y in 0..self.vsize {
            for x in 0..self.hsize {
                image.write_pixel(x, y, self.color_for_pixel(world, x, y, max_depth));
            }

            debug!("finished row {}/{}", y + 1, self.vsize);
        }

        image
    }
}

#[test]
fn pixel_size_for_wide_and_tall_canvases() {
    use std::f64::consts::FRAC_PI_2;

    assert!(crate::feq(Camera::new(200, 125, FRAC_PI_2).pixel_size(), 0.01));
    assert!(crate::feq(Camera::new(125, 200, FRAC_PI_2).pixel_size(), 0.01));
}

#[test]
fn new_camera_has_identity_transform() {
    let c = Camera::new(160, 120, std::f64::consts::FRAC_PI_2);

    assert_eq!(c.hsize(), 160);
    assert_eq!(c.vsize(), 120);
    assert_eq!(c.transform(), &Matrix4::identity());
}

#[test]
fn ray_through_center_and_corner() {
    let c = Camera::new(201, 101, std::f64::consts::FRAC_PI_2);

    let r = c.ray_for_pixel(100, 50);
    assert_eq!(r.origin, Tuple::origin());
    assert_eq!(r.direction, Tuple::vector(0.0, 0.0, -1.0));

    let r = c.ray_for_pixel(0, 0);
    assert_eq!(r.origin, Tuple::origin());
    assert_eq!(r.direction, Tuple::vector(0.66519, 0.33259, -0.66851));
}

#[test]
fn ray_when_camera_is_transformed() {
    use std::f64::consts::FRAC_PI_4;

    let c = Camera::new(201, 101, std::f64::consts::FRAC_PI_2).with_transform(
        Matrix4::rotation_y(FRAC_PI_4) * Matrix4::translation(0.0, -2.0, 5.0));
    let r = c.ray_for_pixel(100, 50);
    let half = 2.0f64.sqrt() / 2.0;

    assert_eq!(r.origin, Tuple::point(0.0, 2.0, -5.0));
    assert_eq!(r.direction, Tuple::vector(half, 0.0, -half));
}

#[test]
fn rendering_default_world() {
    let w = World::default_world();
    let c = Camera::new(11, 11, std::f64::consts::FRAC_PI_2)
        .with_transform(Matrix4::view_transform(
            Tuple::point(0.0, 0.0, -5.0),
            Tuple::origin(),
            Tuple::vector(0.0, 1.0, 0.0),
        ));
    let image = c.render(&w);

    assert_eq!(image.pixel_at(5, 5), Color::rgb(0.38066, 0.47583, 0.2855));
}
