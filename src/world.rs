use crate::color::Color;
use crate::intersect::{ Computations, Intersections };
use crate::light::{ lighting, PointLight };
use crate::material::Material;
use crate::matrix::Matrix4;
use crate::ray::Ray;
use crate::shape::Shape;
use crate::tuple::Tuple;

/// A scene: a set of top-level objects lit by a set of point lights.
///
/// A world is built once and then only read while rendering, so a single
/// `&World` can be shared by every render thread.
#[derive(Clone, Debug, Default)]
pub struct World {
    pub objects: Vec<Shape>,
    pub lights: Vec<PointLight>,
}

impl World {
    pub fn new(objects: Vec<Shape>, lights: Vec<PointLight>) -> World {
        World { objects, lights }
    }

    /// The two-sphere world used throughout the tests: an outer unit sphere
    /// in a soft green, an inner sphere of radius 0.5, and one white light
    /// at `(-10, 10, -10)`.
    pub fn default_world() -> World {
        let light = PointLight::new(
            Tuple::point(-10.0, 10.0, -10.0),
            Color::white(),
        );

        let outer = Shape::sphere().with_material(Material {
            color: Color::rgb(0.8, 1.0, 0.6),
            diffuse: 0.7,
            specular: 0.2,
            ..Default::default()
        });
        let inner = Shape::sphere()
            .with_transform(Matrix4::scaling(0.5, 0.5, 0.5));

        World::new(vec![outer, inner], vec![light])
    }

    pub fn add_object(&mut self, object: Shape) {
        self.objects.push(object);
    }

    pub fn add_light(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    /// Intersects a ray with every object, sorted by `t`.
    pub fn intersect(&self, ray: &Ray) -> Intersections<'_> {
        let mut xs = Intersections::aggregate(
            self.objects.iter().map(|obj| obj.intersect(ray))
        );
        xs.sort();
        xs
    }

    /// True if something sits between `point` and `light`.
    ///
    /// Objects beyond the light, or exactly at it, cast no shadow.
    pub fn is_shadowed(&self, point: Tuple, light: &PointLight) -> bool {
        let v = light.position - point;
        let distance = v.magnitude();
        let r = Ray::new(point, v.normalize());

        match self.intersect(&r).hit() {
            Some(h) => h.t < distance,
            None => false,
        }
    }

    /// The color at a prepared hit: direct light from every light, plus
    /// reflection and refraction with `remaining` bounces left.
    ///
    /// For surfaces that both reflect and refract, the two are blended with
    /// the Schlick reflectance.
    pub fn shade_hit(&self, comps: &Computations, remaining: usize) -> Color {
        let material = comps.object.material();

        let surface: Color = self.lights.iter()
            .map(|light| lighting(
                material, comps.object, light,
                comps.over_point, comps.eyev, comps.normalv,
                self.is_shadowed(comps.over_point, light),
            ))
            .sum();

        let reflected = self.reflected_color(comps, remaining);
        let refracted = self.refracted_color(comps, remaining);

        if material.reflective > 0.0 && material.transparency > 0.0 {
            let reflectance = comps.schlick();
            surface + reflected * reflectance + refracted * (1.0 - reflectance)
        } else {
            surface + reflected + refracted
        }
    }

    /// Traces `ray` into the world. Misses are black.
    pub fn color_at(&self, ray: &Ray, remaining: usize) -> Color {
        let xs = self.intersect(ray);

        match xs.hit() {
            Some(hit) => {
                let comps = Computations::prepare(hit, ray, &xs);
                self.shade_hit(&comps, remaining)
            },
            None => Color::black(),
        }
    }

    pub fn reflected_color(&self, comps: &Computations, remaining: usize)
        -> Color {
        let reflective = comps.object.material().reflective;
        if remaining < 1 || reflective == 0.0 {
            return Color::black();
        }

        let r = Ray::new(comps.over_point, comps.reflectv);
        self.color_at(&r, remaining - 1) * reflective
    }

    pub fn refracted_color(&self, comps: &Computations, remaining: usize)
        -> Color {
        let transparency = comps.object.material().transparency;
        if remaining < 1 || transparency == 0.0 {
            return Color::black();
        }

        // Snell's law, solved for the angle of the refracted ray.
        let n_ratio = comps.n1 / comps.n2;
        let cos_i = comps.eyev.dot(&comps.normalv);
        let sin2_t = n_ratio.powi(2) * (1.0 - cos_i.powi(2));

        // Total internal reflection.
        if sin2_t > 1.0 {
            return Color::black();
        }

        let cos_t = (1.0 - sin2_t).sqrt();
        let direction = comps.normalv * (n_ratio * cos_i - cos_t)
            - comps.eyev * n_ratio;

        let r = Ray::new(comps.under_point, direction);
        self.color_at(&r, remaining - 1) * transparency
    }
}

#[cfg(test)]
use crate::intersect::Intersection;

#[cfg(test)]
fn z_ray(z: f64) -> Ray {
    Ray::new(Tuple::point(0.0, 0.0, z), Tuple::vector(0.0, 0.0, 1.0))
}

#[cfg(test)]
fn diagonal_down_ray() -> Ray {
    let half = 2.0f64.sqrt() / 2.0;
    Ray::new(Tuple::point(0.0, 0.0, -3.0), Tuple::vector(0.0, -half, half))
}

#[test]
fn intersecting_default_world() {
    let w = World::default_world();
    let xs = w.intersect(&z_ray(-5.0));
    let ts: Vec<f64> = xs.iter().map(|i| i.t).collect();

    assert_eq!(ts, vec![4.0, 4.5, 5.5, 6.0]);
}

#[test]
fn shading_from_outside() {
    let w = World::default_world();
    let r = z_ray(-5.0);
    let i = Intersection::new(4.0, &w.objects[0]);
    let comps = Computations::prepare(&i, &r, &[i]);

    assert_eq!(w.shade_hit(&comps, 4), Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn shading_from_inside() {
    let mut w = World::default_world();
    w.lights = vec![PointLight::new(Tuple::point(0.0, 0.25, 0.0), Color::white())];
    let r = z_ray(0.0);
    let i = Intersection::new(0.5, &w.objects[1]);
    let comps = Computations::prepare(&i, &r, &[i]);

    assert_eq!(w.shade_hit(&comps, 4), Color::rgb(0.90498, 0.90498, 0.90498));
}

#[test]
fn shading_a_point_in_shadow() {
    let w = World::new(
        vec![
            Shape::sphere(),
            Shape::sphere().with_transform(Matrix4::translation(0.0, 0.0, 10.0)),
        ],
        vec![PointLight::new(Tuple::point(0.0, 0.0, -10.0), Color::white())],
    );
    let r = z_ray(5.0);
    let i = Intersection::new(4.0, &w.objects[1]);
    let comps = Computations::prepare(&i, &r, &[i]);

    assert_eq!(w.shade_hit(&comps, 4), Color::rgb(0.1, 0.1, 0.1));
}

#[test]
fn each_light_contributes() {
    let mut w = World::default_world();
    let single = w.color_at(&z_ray(-5.0), 4);
    let light = w.lights[0];
    w.add_light(light);

    assert_eq!(w.color_at(&z_ray(-5.0), 4), single * 2.0);
}

#[test]
fn color_when_ray_misses_or_hits() {
    let w = World::default_world();
    let up = Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 1.0, 0.0));

    assert_eq!(w.color_at(&up, 4), Color::black());
    assert_eq!(w.color_at(&z_ray(-5.0), 4), Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn color_with_intersection_behind_ray() {
    let mut w = World::default_world();
    w.objects[0].material_mut().ambient = 1.0;
    w.objects[1].material_mut().ambient = 1.0;
    let r = Ray::new(Tuple::point(0.0, 0.0, 0.75), Tuple::vector(0.0, 0.0, -1.0));

    assert_eq!(w.color_at(&r, 4), w.objects[1].material().color);
}

#[test]
fn shadows_need_an_occluder_between_point_and_light() {
    let w = World::default_world();
    let light = &w.lights[0];

    assert!(!w.is_shadowed(Tuple::point(0.0, 10.0, 0.0), light));
    assert!(w.is_shadowed(Tuple::point(10.0, -10.0, 10.0), light));
    assert!(!w.is_shadowed(Tuple::point(-20.0, 20.0, -20.0), light));
    assert!(!w.is_shadowed(Tuple::point(-2.0, 2.0, -2.0), light));
}

#[test]
fn nonreflective_surface_reflects_nothing() {
    let mut w = World::default_world();
    w.objects[1].material_mut().ambient = 1.0;
    let r = z_ray(0.0);
    let i = Intersection::new(1.0, &w.objects[1]);
    let comps = Computations::prepare(&i, &r, &[i]);

    assert_eq!(w.reflected_color(&comps, 4), Color::black());
}

#[cfg(test)]
fn world_with_mirror_floor() -> World {
    let mut w = World::default_world();
    w.add_object(Shape::plane()
        .with_transform(Matrix4::translation(0.0, -1.0, 0.0))
        .with_material(Material { reflective: 0.5, ..Default::default() }));
    w
}

#[test]
fn reflective_surface() {
    let w = world_with_mirror_floor();
    let r = diagonal_down_ray();
    let i = Intersection::new(2.0f64.sqrt(), &w.objects[2]);
    let comps = Computations::prepare(&i, &r, &[i]);

    assert_eq!(w.reflected_color(&comps, 4),
        Color::rgb(0.19032, 0.2379, 0.14274));
    assert_eq!(w.shade_hit(&comps, 4),
        Color::rgb(0.87677, 0.92436, 0.82918));
}

#[test]
fn reflection_budget_exhausted() {
    let w = world_with_mirror_floor();
    let r = diagonal_down_ray();
    let i = Intersection::new(2.0f64.sqrt(), &w.objects[2]);
    let comps = Computations::prepare(&i, &r, &[i]);

    assert_eq!(w.reflected_color(&comps, 0), Color::black());
}

#[test]
fn mutually_reflective_surfaces_terminate() {
    let mirror = Material { reflective: 1.0, ..Default::default() };
    let w = World::new(
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

    let c = w.color_at(&r, 4);
    assert!(c.r.is_finite() && c.r > 0.0);
}

#[test]
fn opaque_surface_refracts_nothing() {
    let w = World::default_world();
    let r = z_ray(-5.0);
    let s = &w.objects[0];
    let xs = [Intersection::new(4.0, s), Intersection::new(6.0, s)];
    let comps = Computations::prepare(&xs[0], &r, &xs);

    assert_eq!(w.refracted_color(&comps, 5), Color::black());
}

#[test]
fn refraction_budget_exhausted() {
    let mut w = World::default_world();
    *w.objects[0].material_mut() = Material::glass(1.5);
    let r = z_ray(-5.0);
    let s = &w.objects[0];
    let xs = [Intersection::new(4.0, s), Intersection::new(6.0, s)];
    let comps = Computations::prepare(&xs[0], &r, &xs);

    assert_eq!(w.refracted_color(&comps, 0), Color::black());
}

#[test]
fn total_internal_reflection_is_black() {
    let mut w = World::default_world();
    *w.objects[0].material_mut() = Material::glass(1.5);
    let half = 2.0f64.sqrt() / 2.0;
    let r = Ray::new(Tuple::point(0.0, 0.0, half), Tuple::vector(0.0, 1.0, 0.0));
    let s = &w.objects[0];
    let xs = [Intersection::new(-half, s), Intersection::new(half, s)];
    let comps = Computations::prepare(&xs[1], &r, &xs);

    assert_eq!(w.refracted_color(&comps, 5), Color::black());
}

#[test]
fn refracted_ray_color() {
    use crate::pattern::Pattern;

    let mut w = World::default_world();
    w.objects[0].material_mut().ambient = 1.0;
    w.objects[0].material_mut().pattern = Some(Pattern::test());
    *w.objects[1].material_mut() = Material::glass(1.5);

    let r = Ray::new(Tuple::point(0.0, 0.0, 0.1), Tuple::vector(0.0, 1.0, 0.0));
    let (a, b) = (&w.objects[0], &w.objects[1]);
    let xs = [
        Intersection::new(-0.9899, a),
        Intersection::new(-0.4899, b),
        Intersection::new(0.4899, b),
        Intersection::new(0.9899, a),
    ];
    let comps = Computations::prepare(&xs[2], &r, &xs);

    assert_eq!(w.refracted_color(&comps, 5), Color::rgb(0.0, 0.99888, 0.04725));
}

#[cfg(test)]
fn world_with_glass_floor(reflective: f64) -> World {
    let mut w = World::default_world();
    w.add_object(Shape::plane()
        .with_transform(Matrix4::translation(0.0, -1.0, 0.0))
        .with_material(Material {
            transparency: 0.5,
            refractive_index: 1.5,
            reflective,
            ..Default::default()
        }));
    w.add_object(Shape::sphere()
        .with_transform(Matrix4::translation(0.0, -3.5, -0.5))
        .with_material(Material {
            color: Color::rgb(1.0, 0.0, 0.0),
            ambient: 0.5,
            ..Default::default()
        }));
    w
}

#[test]
fn shading_transparent_material() {
    let w = world_with_glass_floor(0.0);
    let r = diagonal_down_ray();
    let xs = [Intersection::new(2.0f64.sqrt(), &w.objects[2])];
    let comps = Computations::prepare(&xs[0], &r, &xs);

    assert_eq!(w.shade_hit(&comps, 5), Color::rgb(0.93642, 0.68642, 0.68642));
}

#[test]
fn shading_reflective_transparent_material() {
    let w = world_with_glass_floor(0.5);
    let r = diagonal_down_ray();
    let xs = [Intersection::new(2.0f64.sqrt(), &w.objects[2])];
    let comps = Computations::prepare(&xs[0], &r, &xs);

    assert_eq!(w.shade_hit(&comps, 5), Color::rgb(0.93391, 0.69643, 0.69243));
}
