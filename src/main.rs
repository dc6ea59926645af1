use std::f64::consts::PI;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{ Context, Result };
use clap::Parser;
use log::{ info, LevelFilter };

use rtc::camera::Camera;
use rtc::color::Color;
use rtc::consts::{ DEFAULT_RECURSION_DEPTH, OUT_FILE };
use rtc::light::PointLight;
use rtc::material::Material;
use rtc::matrix::Matrix4;
use rtc::parallel::{ parallel_render, RenderConfig };
use rtc::pattern::Pattern;
use rtc::scene::Scene;
use rtc::shape::Shape;
use rtc::tuple::Tuple;
use rtc::world::World;

const DEMO_WIDTH: usize = 960;
const DEMO_HEIGHT: usize = 540;

/// Renders a JSON scene description to a PPM image.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Scene description to render
    scene: Option<PathBuf>,

    /// Render the built-in demo scene (the default when no scene is given)
    #[clap(long, conflicts_with = "scene")]
    demo: bool,

    /// Where to write the image
    #[clap(short, long, default_value = OUT_FILE)]
    output: PathBuf,

    /// Worker threads [default: available cores]
    #[clap(short = 'j', long)]
    threads: Option<usize>,

    /// Reflection and refraction bounces
    #[clap(short, long, default_value_t = DEFAULT_RECURSION_DEPTH)]
    depth: usize,

    /// Override the camera's image width
    #[clap(long)]
    width: Option<usize>,

    /// Override the camera's image height
    #[clap(long)]
    height: Option<usize>,

    /// Logging level; RUST_LOG takes precedence
    #[clap(long, default_value = "info")]
    log_level: LevelFilter,

    /// Render on the calling thread only
    #[clap(long)]
    sequential: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level)
        .parse_default_env()
        .init();

    let Scene { world, mut camera } = match args.scene {
        Some(ref path) if !args.demo => Scene::load(path)
            .with_context(|| format!("failed to load scene {}", path.display()))?,
        _ => {
            info!("rendering the demo scene");
            demo_scene()
        },
    };

    if args.width.is_some() || args.height.is_some() {
        let width = args.width.unwrap_or_else(|| camera.hsize());
        let height = args.height.unwrap_or_else(|| camera.vsize());
        camera = Camera::new(width, height, camera.field_of_view())
            .with_transform(*camera.transform());
    }

    let started = Instant::now();
    let canvas = if args.sequential {
        camera.render_to_depth(&world, args.depth)
    } else {
        let mut config = RenderConfig::default().with_max_depth(args.depth);
        if let Some(threads) = args.threads {
            config = config.with_workers(threads);
        }
        parallel_render(&camera, &world, &config)
            .context("failed to start render workers")?
    };
    info!("rendered {}x{} in {:.2?}", canvas.width(), canvas.height(), started.elapsed());

    canvas.save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!("saved {}", args.output.display());

    Ok(())
}

/// A reflective checkered floor with a glassy sphere, a capped cone and a
/// tilted translucent cube.
fn demo_scene() -> Scene {
    let floor = Shape::plane().with_material(Material {
        color: Color::rgb(0.5, 0.5, 0.5),
        pattern: Some(Pattern::checker(Color::white(), Color::black())
            .with_transform(Matrix4::scaling(0.5, 0.5, 0.5))),
        specular: 0.0,
        reflective: 0.5,
        ..Default::default()
    });

    let middle = Shape::sphere()
        .with_transform(Matrix4::translation(-0.5, 1.0, 2.0))
        .with_material(Material {
            color: Color::rgb(1.0, 0.4666, 0.2666),
            diffuse: 0.7,
            specular: 0.3,
            transparency: 0.5,
            reflective: 0.5,
            refractive_index: 1.5,
            ..Default::default()
        });

    let right = Shape::truncated_cone(0.0, 3.0, true)
        .with_transform(Matrix4::translation(1.5, 0.0, -0.5)
            * Matrix4::scaling(0.25, 0.25, 0.25)
            * Matrix4::rotation_y(PI / 8.0))
        .with_material(Material {
            color: Color::rgb(1.0, 0.6666, 0.2666),
            diffuse: 0.7,
            specular: 0.3,
            reflective: 0.3,
            ..Default::default()
        });

    let left = Shape::cube()
        .with_transform(Matrix4::translation(-1.5, 1.0, -0.75)
            * Matrix4::scaling(0.33, 0.33, 0.33)
            * Matrix4::rotation_x(PI / 4.0)
            * Matrix4::rotation_y(PI / 4.0)
            * Matrix4::rotation_z(PI / 4.0))
        .with_material(Material {
            color: Color::rgb(0.8666, 0.2, 0.2),
            diffuse: 0.7,
            specular: 0.3,
            transparency: 0.5,
            refractive_index: 1.1,
            ..Default::default()
        });

    let world = World::new(
        vec![floor, middle, right, left],
        vec![PointLight::new(Tuple::point(-10.0, 10.0, -10.0), Color::white())],
    );

    let camera = Camera::new(DEMO_WIDTH, DEMO_HEIGHT, PI / 3.0)
        .with_transform(Matrix4::view_transform(
            Tuple::point(0.0, 1.5, -5.0),
            Tuple::point(0.0, 1.0, 0.0),
            Tuple::vector(0.0, 1.0, 0.0),
        ));

    Scene { world, camera }
}
