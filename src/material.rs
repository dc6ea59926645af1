use crate::color::Color;
use crate::consts::VACUUM_RI;
use crate::pattern::Pattern;

/// Surface appearance parameters for the Phong model, plus the reflection
/// and refraction terms used by the recursive shader.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    pub color: Color,
    /// When set, takes precedence over `color`.
    pub pattern: Option<Pattern>,

    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub shininess: f64,

    pub reflective: f64,
    pub transparency: f64,
    pub refractive_index: f64,
}

impl Default for Material {
    fn default() -> Material {
        Material {
            color: Color::white(),
            pattern: None,

            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.0,

            reflective: 0.0,
            transparency: 0.0,
            refractive_index: VACUUM_RI,
        }
    }
}

impl Material {
    /// A clear, fully transparent material with the given refractive index.
    pub fn glass(refractive_index: f64) -> Material {
        Material {
            transparency: 1.0,
            refractive_index,
            ..Default::default()
        }
    }
}

#[test]
fn default_material() {
    let m = Material::default();

    assert_eq!(m.color, Color::white());
    assert_eq!(m.ambient, 0.1);
    assert_eq!(m.diffuse, 0.9);
    assert_eq!(m.specular, 0.9);
    assert_eq!(m.shininess, 200.0);
    assert_eq!(m.reflective, 0.0);
    assert_eq!(m.transparency, 0.0);
    assert_eq!(m.refractive_index, 1.0);
    assert!(m.pattern.is_none());
}

#[test]
fn glass_material() {
    let m = Material::glass(1.5);

    assert_eq!(m.transparency, 1.0);
    assert_eq!(m.refractive_index, 1.5);
}
