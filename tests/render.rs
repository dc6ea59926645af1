use std::f64::consts::{ FRAC_PI_2, PI };

use rtc::camera::Camera;
use rtc::color::Color;
use rtc::light::PointLight;
use rtc::material::Material;
use rtc::matrix::Matrix4;
use rtc::parallel::{ parallel_render, RenderConfig };
use rtc::ray::Ray;
use rtc::shape::{ CsgOp, Shape };
use rtc::tuple::Tuple;
use rtc::world::World;

fn look_at_origin(hsize: usize, vsize: usize) -> Camera {
    Camera::new(hsize, vsize, FRAC_PI_2).with_transform(Matrix4::view_transform(
        Tuple::point(0.0, 0.0, -5.0),
        Tuple::origin(),
        Tuple::vector(0.0, 1.0, 0.0),
    ))
}

/// A world that exercises every shape kind along with reflection and
/// refraction.
fn busy_world() -> World {
    let floor = Shape::plane()
        .with_transform(Matrix4::translation(0.0, -1.0, 0.0))
        .with_material(Material { reflective: 0.4, ..Default::default() });

    let glass = Shape::glass_sphere()
        .with_transform(Matrix4::translation(-1.0, 0.0, 0.0) * Matrix4::scaling(0.6, 0.6, 0.6));

    let group = Shape::group_of(vec![
        Shape::truncated_cylinder(0.0, 1.0, true),
        Shape::truncated_cone(-1.0, 0.0, true)
            .with_transform(Matrix4::translation(0.0, 0.5, 0.0)),
        Shape::triangle(
            Tuple::point(0.0, 1.0, 0.0),
            Tuple::point(-1.0, 0.0, 0.0),
            Tuple::point(1.0, 0.0, 0.0),
        ),
    ]).with_transform(Matrix4::translation(1.0, -0.5, 1.0) * Matrix4::rotation_y(PI / 6.0));

    let carved = Shape::csg(CsgOp::Difference,
        Shape::cube(),
        Shape::sphere().with_transform(Matrix4::scaling(1.3, 1.3, 1.3)))
        .with_transform(Matrix4::translation(0.0, 0.5, 3.0) * Matrix4::scaling(0.5, 0.5, 0.5));

    World::new(
        vec![floor, glass, group, carved],
        vec![
            PointLight::new(Tuple::point(-10.0, 10.0, -10.0), Color::white()),
            PointLight::new(Tuple::point(5.0, 3.0, -5.0), Color::rgb(0.3, 0.3, 0.3)),
        ],
    )
}

#[test]
fn default_world_center_pixel() {
    let image = look_at_origin(11, 11).render(&World::default_world());

    assert_eq!(image.pixel_at(5, 5), Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn ray_missing_everything_is_black() {
    let w = World::default_world();
    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 1.0, 0.0));

    assert_eq!(w.color_at(&r, 4), Color::black());
}

#[test]
fn parallel_render_is_identical_to_sequential() {
    let world = busy_world();
    let camera = look_at_origin(32, 24);

    let sequential = camera.render_to_depth(&world, 5);
    let config = RenderConfig { max_depth: 5, workers: 4 };
    let parallel = parallel_render(&camera, &world, &config).unwrap();

    assert_eq!(sequential.width(), parallel.width());
    assert_eq!(sequential.height(), parallel.height());
    for (a, b) in sequential.pixels().iter().zip(parallel.pixels()) {
        assert_eq!((a.r.to_bits(), a.g.to_bits(), a.b.to_bits()),
            (b.r.to_bits(), b.g.to_bits(), b.b.to_bits()));
    }
}

#[test]
fn mutually_reflective_mirrors_terminate() {
    let mirror = Material { reflective: 1.0, ..Default::default() };
    let world = World::new(
        vec![
            Shape::plane()
                .with_transform(Matrix4::translation(0.0, -1.0, 0.0))
                .with_material(mirror),
            Shape::plane()
                .with_transform(Matrix4::translation(0.0, 1.0, 0.0))
                .with_material(mirror),
        ],
        vec![PointLight::new(Tuple::origin(), Color::white())],
    );
    let r = Ray::new(Tuple::origin(), Tuple::vector(0.0, 1.0, 0.0));

    let c = world.color_at(&r, 16);
    assert!(c.r.is_finite() && c.g.is_finite() && c.b.is_finite(), "{:?}", c);
}

#[test]
fn ppm_output_of_a_render() {
    let image = look_at_origin(4, 3).render(&World::default_world());
    let ppm = image.to_ppm();

    assert!(ppm.starts_with("P3\n4 3\n255\n"));
    assert_eq!(ppm.lines().count(), 3 + 3);
}
