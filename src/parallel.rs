use std::time::Instant;

use log::{ debug, info };
use rayon::prelude::*;
use rayon::{ ThreadPoolBuildError, ThreadPoolBuilder };

use crate::camera::Camera;
use crate::canvas::Canvas;
use crate::consts::{ DEFAULT_RECURSION_DEPTH, DEFAULT_WORKERS };
use crate::world::World;

/// Settings for a render.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    /// Bounces allowed for reflection and refraction.
    pub max_depth: usize,
    /// Upper bound on threads tracing pixels at once. Zero means one.
    pub workers: usize,
}

impl Default for RenderConfig {
    fn default() -> RenderConfig {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(DEFAULT_WORKERS);

        RenderConfig {
            max_depth: DEFAULT_RECURSION_DEPTH,
            workers,
        }
    }
}

impl RenderConfig {
    pub fn with_workers(mut self, workers: usize) -> RenderConfig {
        self.workers = workers;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> RenderConfig {
        self.max_depth = max_depth;
        self
    }
}

/// Renders `world` through `camera` on a dedicated pool of
/// `config.workers` threads.
///
/// Rows are handed out to workers; each row of the canvas is written by
/// exactly one worker, and the scene is only read. The result is identical
/// to `Camera::render_to_depth` with the same depth.
pub fn parallel_render(camera: &Camera, world: &World, config: &RenderConfig)
    -> Result<Canvas, ThreadPoolBuildError> {
    let workers = config.workers.max(1);
    let pool = ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("rtc-render-{}", i))
        .build()?;

    let (width, height) = (camera.hsize(), camera.vsize());
    info!("rendering {}x{} on {} workers, depth {}",
        width, height, workers, config.max_depth);

    let started = Instant::now();
    let mut image = Canvas::new(width, height);

    if width > 0 {
        pool.install(|| {
            image.pixels_mut()
                .par_chunks_mut(width)
                .enumerate()
                .for_each(|(y, row)| {
                    for (x, pixel) in row.iter_mut().enumerate() {
                        *pixel = camera.color_for_pixel(world, x, y, config.max_depth);
                    }
                    debug!("finished row {}/{}", y + 1, height);
                });
        });
    }

    info!("render finished in {:.2?}", started.elapsed());
    Ok(image)
}

#[cfg(test)]
fn test_camera() -> Camera {
    use crate::matrix::Matrix4;
    use crate::tuple::Tuple;

    Camera::new(11, 11, std::f64::consts::FRAC_PI_2)
        .with_transform(Matrix4::view_transform(
            Tuple::point(0.0, 0.0, -5.0),
            Tuple::origin(),
            Tuple::vector(0.0, 1.0, 0.0),
        ))
}

#[test]
fn default_config_uses_book_depth() {
    let config = RenderConfig::default();

    assert_eq!(config.max_depth, DEFAULT_RECURSION_DEPTH);
    assert!(config.workers >= 1);
}

#[test]
fn parallel_render_of_default_world() {
    use crate::color::Color;

    let config = RenderConfig::default().with_workers(3);
    let image = parallel_render(&test_camera(), &World::default_world(), &config)
        .expect("pool should build");

    assert_eq!(image.pixel_at(5, 5), Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn parallel_matches_sequential_exactly() {
    let camera = test_camera();
    let world = World::default_world();
    let sequential = camera.render_to_depth(&world, 2);

    for workers in [0, 1, 4] {
        let config = RenderConfig { max_depth: 2, workers };
        let parallel = parallel_render(&camera, &world, &config)
            .expect("pool should build");

        for (a, b) in sequential.pixels().iter().zip(parallel.pixels()) {
            assert_eq!(a.r.to_bits(), b.r.to_bits());
            assert_eq!(a.g.to_bits(), b.g.to_bits());
            assert_eq!(a.b.to_bits(), b.b.to_bits());
        }
    }
}

#[test]
fn empty_camera_renders_empty_canvas() {
    let camera = Camera::new(0, 0, std::f64::consts::FRAC_PI_2);
    let image = parallel_render(&camera, &World::default_world(), &RenderConfig::default())
        .expect("pool should build");

    assert_eq!(image.width(), 0);
    assert!(image.pixels().is_empty());
}
