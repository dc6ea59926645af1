use crate::color::Color;
use crate::material::Material;
use crate::shape::Shape;
use crate::tuple::Tuple;

/// A point light source with no size and no distance falloff.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointLight {
    pub position: Tuple,
    pub intensity: Color,
}

impl PointLight {
    /// Creates a point light. `position` is coerced to a point.
    pub fn new(position: Tuple, intensity: Color) -> PointLight {
        PointLight { position: position.as_point(), intensity }
    }
}

/// Phong shading of `point` on `object` as seen along `eyev`.
///
/// When `in_shadow` is set only the ambient term contributes. The surface
/// color comes from the material's pattern, evaluated in pattern space, when
/// one is present.
pub fn lighting(m: &Material, object: &Shape, light: &PointLight,
    point: Tuple, eyev: Tuple, normalv: Tuple, in_shadow: bool) -> Color {
    let color = match m.pattern {
        Some(ref pattern) => pattern.pattern_at_shape(object, point),
        None => m.color,
    };

    let effective_color = color * light.intensity;
    let ambient = effective_color * m.ambient;
    if in_shadow {
        return ambient;
    }

    let lightv = (light.position - point).normalize();
    let light_dot_normal = lightv.dot(&normalv);

    // Light on the other side of the surface.
    if light_dot_normal < 0.0 {
        return ambient;
    }

    let diffuse = effective_color * m.diffuse * light_dot_normal;

    let reflect_dot_eye = (-lightv).reflect(&normalv).dot(&eyev);
    let specular = if reflect_dot_eye <= 0.0 {
        Color::black()
    } else {
        light.intensity * m.specular * reflect_dot_eye.powf(m.shininess)
    };

    ambient + diffuse + specular
}

#[cfg(test)]
fn lit(eyev: Tuple, light_at: Tuple, in_shadow: bool) -> Color {
    let m = Material::default();
    let s = Shape::sphere();
    let light = PointLight::new(light_at, Color::white());

    lighting(&m, &s, &light, Tuple::origin(), eyev,
        Tuple::vector(0.0, 0.0, -1.0), in_shadow)
}

#[test]
fn eye_between_light_and_surface() {
    let res = lit(Tuple::vector(0.0, 0.0, -1.0),
        Tuple::point(0.0, 0.0, -10.0), false);

    assert_eq!(res, Color::rgb(1.9, 1.9, 1.9));
}

#[test]
fn eye_offset_45_degrees() {
    let half = 2.0f64.sqrt() / 2.0;
    let res = lit(Tuple::vector(0.0, half, -half),
        Tuple::point(0.0, 0.0, -10.0), false);

    assert_eq!(res, Color::white());
}

#[test]
fn light_offset_45_degrees() {
    let res = lit(Tuple::vector(0.0, 0.0, -1.0),
        Tuple::point(0.0, 10.0, -10.0), false);

    assert_eq!(res, Color::rgb(0.7364, 0.7364, 0.7364));
}

#[test]
fn eye_in_path_of_reflection() {
    let half = 2.0f64.sqrt() / 2.0;
    let res = lit(Tuple::vector(0.0, -half, -half),
        Tuple::point(0.0, 10.0, -10.0), false);

    assert_eq!(res, Color::rgb(1.6364, 1.6364, 1.6364));
}

#[test]
fn light_behind_surface() {
    let res = lit(Tuple::vector(0.0, 0.0, -1.0),
        Tuple::point(0.0, 0.0, 10.0), false);

    assert_eq!(res, Color::rgb(0.1, 0.1, 0.1));
}

#[test]
fn surface_in_shadow() {
    let res = lit(Tuple::vector(0.0, 0.0, -1.0),
        Tuple::point(0.0, 0.0, -10.0), true);

    assert_eq!(res, Color::rgb(0.1, 0.1, 0.1));
}

#[test]
fn lighting_with_a_pattern() {
    use crate::pattern::Pattern;

    let m = Material {
        pattern: Some(Pattern::stripe(Color::white(), Color::black())),
        ambient: 1.0,
        diffuse: 0.0,
        specular: 0.0,
        ..Default::default()
    };
    let s = Shape::sphere();
    let eyev = Tuple::vector(0.0, 0.0, -1.0);
    let normalv = Tuple::vector(0.0, 0.0, -1.0);
    let light = PointLight::new(Tuple::point(0.0, 0.0, -10.0), Color::white());

    assert_eq!(lighting(&m, &s, &light, Tuple::point(0.9, 0.0, 0.0),
        eyev, normalv, false), Color::white());
    assert_eq!(lighting(&m, &s, &light, Tuple::point(1.1, 0.0, 0.0),
        eyev, normalv, false), Color::black());
}
