//! JSON scene descriptions.
//!
//! A scene file is a JSON array of records. `define` records name a material
//! or a transform list for later reuse; `add` records place a camera, a light
//! or a shape.
//!
//! ```json
//! [
//!   { "add": "camera", "width": 100, "height": 50, "field-of-view": 1.0472,
//!     "from": [0, 1.5, -5], "to": [0, 1, 0], "up": [0, 1, 0] },
//!   { "add": "light", "at": [-10, 10, -10], "intensity": [1, 1, 1] },
//!   { "define": "red", "value": { "color": [1, 0, 0], "specular": 0.3 } },
//!   { "define": "shiny-red", "extend": "red", "value": { "reflective": 0.5 } },
//!   { "define": "unit-up", "value": [["translate", 1, 1, 1], ["scale", 0.5, 0.5, 0.5]] },
//!   { "add": "sphere", "material": "shiny-red", "transform": ["unit-up", ["translate", 0, 1, 0]] }
//! ]
//! ```
//!
//! Transform lists apply first to last. Shapes inside `group` and `csg`
//! records are fully built before they are attached, and inherit their
//! parent's material when they do not name their own.

use std::collections::HashMap;
use std::fs;
use std::path::{ Path, PathBuf };

use log::{ debug, info, warn };
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::camera::Camera;
use crate::color::Color;
use crate::light::PointLight;
use crate::material::Material;
use crate::matrix::Matrix4;
use crate::obj::{ ObjError, ObjParser };
use crate::pattern::Pattern;
use crate::shape::{ CsgOp, Shape };
use crate::tuple::Tuple;
use crate::world::World;

/// Errors raised while loading a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid scene JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("record {0} has neither an \"add\" nor a \"define\" key")]
    UnknownRecord(usize),

    #[error("unknown shape type {0:?}")]
    UnknownShape(String),

    #[error("unknown definition {0:?}")]
    UnknownDefinition(String),

    #[error("definition {name:?} is not a {expected}")]
    WrongDefinition { name: String, expected: &'static str },

    #[error("malformed transform: {0}")]
    BadTransform(String),

    #[error("unknown pattern type {0:?}")]
    UnknownPattern(String),

    #[error("pattern {kind:?} takes {expected} color(s), got {found}")]
    PatternColors { kind: String, expected: usize, found: usize },

    #[error("unknown CSG operation {0:?}")]
    UnknownOperation(String),

    #[error("{shape} is missing field {field:?}")]
    MissingField { shape: String, field: &'static str },

    #[error("scene has no camera")]
    MissingCamera,

    #[error("OBJ file {path:?}: {source}")]
    Obj { path: PathBuf, #[source] source: ObjError },
}

pub type SceneResult<T> = Result<T, SceneError>;

/// A fully built world and the camera to view it through.
#[derive(Clone, Debug)]
pub struct Scene {
    pub world: World,
    pub camera: Camera,
}

impl Scene {
    /// Builds a scene from JSON text. `obj` files are resolved relative to
    /// `base_dir`.
    pub fn from_json_str(source: &str, base_dir: &Path) -> SceneResult<Scene> {
        let records: Vec<Value> = serde_json::from_str(source)?;
        SceneBuilder::new(base_dir).build(records)
    }

    /// Reads and builds the scene file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> SceneResult<Scene> {
        let path = path.as_ref();
        info!("loading scene {}", path.display());

        let source = fs::read_to_string(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Scene::from_json_str(&source, base_dir)
    }
}

type Triple = [f64; 3];

fn point(v: Triple) -> Tuple {
    Tuple::point(v[0], v[1], v[2])
}

fn vector(v: Triple) -> Tuple {
    Tuple::vector(v[0], v[1], v[2])
}

fn color(v: Triple) -> Color {
    Color::rgb(v[0], v[1], v[2])
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct CameraSpec {
    width: usize,
    height: usize,
    field_of_view: f64,
    from: Triple,
    to: Triple,
    up: Triple,
}

#[derive(Clone, Debug, Deserialize)]
struct LightSpec {
    at: Triple,
    intensity: Triple,
}

/// A transform list entry: the name of a transform definition, or an
/// operation such as `["translate", 1, 2, 3]`.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
enum TransformItem {
    Named(String),
    Op(Vec<Value>),
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PatternSpec {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    colors: Vec<Triple>,
    #[serde(default)]
    transform: Vec<TransformItem>,
}

/// Material fields as written in a scene. Unset fields fall back to a base
/// definition, then to `Material::default()`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct MaterialSpec {
    color: Option<Triple>,
    pattern: Option<PatternSpec>,
    ambient: Option<f64>,
    diffuse: Option<f64>,
    specular: Option<f64>,
    shininess: Option<f64>,
    reflective: Option<f64>,
    transparency: Option<f64>,
    refractive_index: Option<f64>,
}

impl MaterialSpec {
    /// Fills every field left unset here from `base`.
    fn extend(self, base: &MaterialSpec) -> MaterialSpec {
        MaterialSpec {
            color: self.color.or(base.color),
            pattern: self.pattern.or_else(|| base.pattern.clone()),
            ambient: self.ambient.or(base.ambient),
            diffuse: self.diffuse.or(base.diffuse),
            specular: self.specular.or(base.specular),
            shininess: self.shininess.or(base.shininess),
            reflective: self.reflective.or(base.reflective),
            transparency: self.transparency.or(base.transparency),
            refractive_index: self.refractive_index.or(base.refractive_index),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
enum MaterialRef {
    Named(String),
    Inline(MaterialSpec),
}

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
enum DefinitionValue {
    Transform(Vec<TransformItem>),
    Material(MaterialSpec),
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DefineRecord {
    define: String,
    extend: Option<String>,
    value: DefinitionValue,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct ShapeSpec {
    add: String,
    material: Option<MaterialRef>,
    #[serde(default)]
    transform: Vec<TransformItem>,

    // cylinder, cone
    min: Option<f64>,
    max: Option<f64>,
    #[serde(default)]
    closed: bool,

    // triangle, smooth-triangle
    p1: Option<Triple>,
    p2: Option<Triple>,
    p3: Option<Triple>,
    n1: Option<Triple>,
    n2: Option<Triple>,
    n3: Option<Triple>,

    // group
    #[serde(default)]
    children: Vec<ShapeSpec>,

    // csg
    operation: Option<String>,
    left: Option<Box<ShapeSpec>>,
    right: Option<Box<ShapeSpec>>,

    // obj
    file: Option<String>,
}

impl ShapeSpec {
    fn require<T: Copy>(&self, value: Option<T>, field: &'static str) -> SceneResult<T> {
        value.ok_or_else(|| SceneError::MissingField { shape: self.add.clone(), field })
    }

    fn require_shape<'a>(&self, value: &'a Option<Box<ShapeSpec>>, field: &'static str)
        -> SceneResult<&'a ShapeSpec> {
        value.as_deref()
            .ok_or_else(|| SceneError::MissingField { shape: self.add.clone(), field })
    }
}

#[derive(Clone, Debug)]
enum Definition {
    Material(MaterialSpec),
    Transform(Matrix4),
}

/// Resolves records into a world, keeping track of named definitions.
struct SceneBuilder {
    base_dir: PathBuf,
    definitions: HashMap<String, Definition>,
    world: World,
    camera: Option<Camera>,
}

impl SceneBuilder {
    fn new(base_dir: &Path) -> SceneBuilder {
        SceneBuilder {
            base_dir: base_dir.to_path_buf(),
            definitions: HashMap::new(),
            world: World::default(),
            camera: None,
        }
    }

    fn build(mut self, records: Vec<Value>) -> SceneResult<Scene> {
        for (i, record) in records.into_iter().enumerate() {
            if record.get("define").is_some() {
                self.define(serde_json::from_value(record)?)?;
                continue;
            }

            let kind = match record.get("add").and_then(Value::as_str) {
                Some(kind) => kind.to_string(),
                None => return Err(SceneError::UnknownRecord(i)),
            };

            match kind.as_str() {
                "camera" => {
                    let spec: CameraSpec = serde_json::from_value(record)?;
                    if self.camera.is_some() {
                        warn!("scene has more than one camera; using the last");
                    }
                    self.camera = Some(self.camera(&spec)?);
                },
                "light" => {
                    let spec: LightSpec = serde_json::from_value(record)?;
                    self.world.add_light(PointLight::new(point(spec.at), color(spec.intensity)));
                },
                _ => {
                    let spec: ShapeSpec = serde_json::from_value(record)?;
                    let shape = self.shape(&spec, None)?;
                    self.world.add_object(shape);
                },
            }
        }

        let camera = self.camera.ok_or(SceneError::MissingCamera)?;
        info!("scene has {} objects, {} lights and {} definitions",
            self.world.objects.len(), self.world.lights.len(), self.definitions.len());

        Ok(Scene { world: self.world, camera })
    }

    fn define(&mut self, record: DefineRecord) -> SceneResult<()> {
        let base = match record.extend {
            Some(ref name) => Some(self.lookup(name)?.clone()),
            None => None,
        };

        let definition = match (record.value, base) {
            (DefinitionValue::Material(spec), None) => Definition::Material(spec),
            (DefinitionValue::Material(spec), Some(Definition::Material(base)))
                => Definition::Material(spec.extend(&base)),
            (DefinitionValue::Transform(items), None)
                => Definition::Transform(self.transform(&items)?),
            (DefinitionValue::Transform(items), Some(Definition::Transform(base)))
                => Definition::Transform(self.transform(&items)? * base),
            (DefinitionValue::Material(_), Some(_)) => {
                return Err(SceneError::WrongDefinition {
                    name: record.extend.unwrap_or_default(),
                    expected: "material",
                });
            },
            (DefinitionValue::Transform(_), Some(_)) => {
                return Err(SceneError::WrongDefinition {
                    name: record.extend.unwrap_or_default(),
                    expected: "transform",
                });
            },
        };

        debug!("defined {:?}", record.define);
        self.definitions.insert(record.define, definition);
        Ok(())
    }

    fn lookup(&self, name: &str) -> SceneResult<&Definition> {
        self.definitions.get(name)
            .ok_or_else(|| SceneError::UnknownDefinition(name.to_string()))
    }

    fn camera(&self, spec: &CameraSpec) -> SceneResult<Camera> {
        let view = Matrix4::view_transform(point(spec.from), point(spec.to), vector(spec.up));
        if !view.is_invertible() {
            return Err(SceneError::BadTransform(
                "camera \"up\" is parallel to its line of sight".to_string()));
        }

        Ok(Camera::new(spec.width, spec.height, spec.field_of_view).with_transform(view))
    }

    /// Composes a transform list. Later items apply after earlier ones.
    fn transform(&self, items: &[TransformItem]) -> SceneResult<Matrix4> {
        let mut m = Matrix4::identity();
        for item in items {
            let step = match item {
                TransformItem::Named(name) => match self.lookup(name)? {
                    Definition::Transform(t) => *t,
                    Definition::Material(_) => return Err(SceneError::WrongDefinition {
                        name: name.clone(),
                        expected: "transform",
                    }),
                },
                TransformItem::Op(op) => transform_op(op)?,
            };
            m = step * m;
        }

        if !m.is_invertible() {
            return Err(SceneError::BadTransform(format!("{:?} is not invertible", items)));
        }

        Ok(m)
    }

    fn material(&self, reference: &MaterialRef) -> SceneResult<Material> {
        let spec = match reference {
            MaterialRef::Inline(spec) => spec,
            MaterialRef::Named(name) => match self.lookup(name)? {
                Definition::Material(spec) => spec,
                Definition::Transform(_) => return Err(SceneError::WrongDefinition {
                    name: name.clone(),
                    expected: "material",
                }),
            },
        };

        let defaults = Material::default();
        let pattern = match spec.pattern {
            Some(ref p) => Some(self.pattern(p)?),
            None => None,
        };

        Ok(Material {
            color: spec.color.map(color).unwrap_or(defaults.color),
            pattern,
            ambient: spec.ambient.unwrap_or(defaults.ambient),
            diffuse: spec.diffuse.unwrap_or(defaults.diffuse),
            specular: spec.specular.unwrap_or(defaults.specular),
            shininess: spec.shininess.unwrap_or(defaults.shininess),
            reflective: spec.reflective.unwrap_or(defaults.reflective),
            transparency: spec.transparency.unwrap_or(defaults.transparency),
            refractive_index: spec.refractive_index.unwrap_or(defaults.refractive_index),
        })
    }

    fn pattern(&self, spec: &PatternSpec) -> SceneResult<Pattern> {
        let colors: Vec<Color> = spec.colors.iter().copied().map(color).collect();
        let expect = |n: usize| {
            if colors.len() == n {
                Ok(())
            } else {
                Err(SceneError::PatternColors {
                    kind: spec.kind.clone(),
                    expected: n,
                    found: colors.len(),
                })
            }
        };

        let pattern = match spec.kind.as_str() {
            "test" => Pattern::test(),
            "solid" => {
                expect(1)?;
                Pattern::solid(colors[0])
            },
            two_color => {
                let make: fn(Color, Color) -> Pattern = match two_color {
                    "stripes" | "stripe" => Pattern::stripe,
                    "gradient" => Pattern::gradient,
                    "rings" | "ring" => Pattern::ring,
                    "checkers" | "checker" => Pattern::checker,
                    "radial-gradient" => Pattern::radial_gradient,
                    other => return Err(SceneError::UnknownPattern(other.to_string())),
                };
                expect(2)?;
                make(colors[0], colors[1])
            },
        };

        Ok(pattern.with_transform(self.transform(&spec.transform)?))
    }

    /// Builds a shape record. `inherited` is the enclosing container's
    /// material, used when the record does not set one.
    fn shape(&self, spec: &ShapeSpec, inherited: Option<&Material>) -> SceneResult<Shape> {
        let material = match spec.material {
            Some(ref reference) => Some(self.material(reference)?),
            None => inherited.copied(),
        };

        let range = || (spec.min.unwrap_or(f64::NEG_INFINITY),
            spec.max.unwrap_or(f64::INFINITY));

        let mut shape = match spec.add.as_str() {
            "sphere" => Shape::sphere(),
            "plane" => Shape::plane(),
            "cube" => Shape::cube(),
            "cylinder" => {
                let (min, max) = range();
                Shape::truncated_cylinder(min, max, spec.closed)
            },
            "cone" => {
                let (min, max) = range();
                Shape::truncated_cone(min, max, spec.closed)
            },
            "triangle" => Shape::triangle(
                point(spec.require(spec.p1, "p1")?),
                point(spec.require(spec.p2, "p2")?),
                point(spec.require(spec.p3, "p3")?),
            ),
            "smooth-triangle" => Shape::smooth_triangle(
                point(spec.require(spec.p1, "p1")?),
                point(spec.require(spec.p2, "p2")?),
                point(spec.require(spec.p3, "p3")?),
                vector(spec.require(spec.n1, "n1")?),
                vector(spec.require(spec.n2, "n2")?),
                vector(spec.require(spec.n3, "n3")?),
            ),
            "group" => {
                let mut group = Shape::group();
                for child in spec.children.iter() {
                    group.try_add_child(self.shape(child, material.as_ref())?)
                        .map_err(|e| SceneError::BadTransform(e.to_string()))?;
                }
                group
            },
            "csg" => {
                let op = match spec.operation.as_deref() {
                    Some("union") => CsgOp::Union,
                    Some("intersection") => CsgOp::Intersection,
                    Some("difference") => CsgOp::Difference,
                    Some(other) => return Err(SceneError::UnknownOperation(other.to_string())),
                    None => return Err(SceneError::MissingField {
                        shape: spec.add.clone(),
                        field: "operation",
                    }),
                };
                let left = self.shape(spec.require_shape(&spec.left, "left")?, material.as_ref())?;
                let right = self.shape(spec.require_shape(&spec.right, "right")?, material.as_ref())?;
                Shape::csg(op, left, right)
            },
            "obj" => {
                let file = spec.file.as_ref().ok_or_else(|| SceneError::MissingField {
                    shape: spec.add.clone(),
                    field: "file",
                })?;
                let path = self.base_dir.join(file);
                let mut mesh = ObjParser::from_file(&path)
                    .map_err(|source| SceneError::Obj { path: path.clone(), source })?
                    .into_group();
                if let Some(m) = material {
                    mesh.set_material_deep(m);
                }
                mesh
            },
            other => return Err(SceneError::UnknownShape(other.to_string())),
        };

        if let Some(m) = material {
            shape.set_material(m);
        }
        shape.try_set_transform(self.transform(&spec.transform)?)
            .map_err(|e| SceneError::BadTransform(e.to_string()))?;

        Ok(shape)
    }
}

/// Turns `["name", numbers...]` into a matrix.
fn transform_op(op: &[Value]) -> SceneResult<Matrix4> {
    let bad = || SceneError::BadTransform(format!("{:?}", op));

    let (name, args) = match op.split_first() {
        Some((Value::String(name), args)) => (name.as_str(), args),
        _ => return Err(bad()),
    };
    let args = args.iter()
        .map(|a| a.as_f64().ok_or_else(bad))
        .collect::<SceneResult<Vec<f64>>>()?;

    let m = match (name, args.as_slice()) {
        ("translate", &[x, y, z]) => Matrix4::translation(x, y, z),
        ("scale", &[x, y, z]) => Matrix4::scaling(x, y, z),
        ("rotate-x", &[r]) => Matrix4::rotation_x(r),
        ("rotate-y", &[r]) => Matrix4::rotation_y(r),
        ("rotate-z", &[r]) => Matrix4::rotation_z(r),
        ("shear", &[xy, xz, yx, yz, zx, zy]) => Matrix4::shearing(xy, xz, yx, yz, zx, zy),
        _ => return Err(bad()),
    };

    Ok(m)
}

#[cfg(test)]
const CAMERA: &str = r#"{ "add": "camera", "width": 100, "height": 50,
    "field-of-view": 0.785, "from": [-6, 6, -10], "to": [6, 0, 6], "up": [-0.45, 1, 0] }"#;

#[cfg(test)]
fn parse(records: &str) -> SceneResult<Scene> {
    Scene::from_json_str(&format!("[{}, {}]", CAMERA, records), Path::new("."))
}

#[test]
fn camera_and_light_records() {
    let scene = parse(r#"{ "add": "light", "at": [50, 100, -50], "intensity": [1, 1, 1] }"#)
        .unwrap();

    assert_eq!(scene.camera.hsize(), 100);
    assert_eq!(scene.camera.vsize(), 50);
    assert_eq!(scene.camera.field_of_view(), 0.785);
    assert_eq!(scene.world.lights,
        vec![PointLight::new(Tuple::point(50.0, 100.0, -50.0), Color::white())]);
}

#[test]
fn shape_with_inline_material_and_transform() {
    let scene = parse(r#"{ "add": "sphere",
        "material": { "color": [1, 0.2, 1], "diffuse": 0.7, "reflective": 0.3 },
        "transform": [["scale", 2, 2, 2], ["translate", 0, 1, 0]] }"#).unwrap();
    let s = &scene.world.objects[0];

    assert_eq!(s.material().color, Color::rgb(1.0, 0.2, 1.0));
    assert_eq!(s.material().diffuse, 0.7);
    assert_eq!(s.material().reflective, 0.3);
    assert_eq!(s.material().specular, 0.9);
    assert_eq!(s.transform(),
        &(Matrix4::translation(0.0, 1.0, 0.0) * Matrix4::scaling(2.0, 2.0, 2.0)));
}

#[test]
fn definitions_extend_their_base() {
    let scene = parse(r#"
        { "define": "white-material", "value": { "color": [1, 1, 1], "ambient": 0.1 } },
        { "define": "blue-material", "extend": "white-material",
          "value": { "color": [0.537, 0.831, 0.914] } },
        { "define": "standard-transform", "value": [["translate", 1, -1, 1], ["scale", 0.5, 0.5, 0.5]] },
        { "define": "large-object", "extend": "standard-transform", "value": [["scale", 3.5, 3.5, 3.5]] },
        { "add": "cube", "material": "blue-material", "transform": ["large-object"] }"#)
        .unwrap();
    let cube = &scene.world.objects[0];

    assert_eq!(cube.material().color, Color::rgb(0.537, 0.831, 0.914));
    assert_eq!(cube.material().ambient, 0.1);
    assert_eq!(cube.transform(), &(Matrix4::scaling(3.5, 3.5, 3.5)
        * Matrix4::scaling(0.5, 0.5, 0.5)
        * Matrix4::translation(1.0, -1.0, 1.0)));
}

#[test]
fn patterns_in_materials() {
    use crate::pattern::PatternKind;

    let scene = parse(r#"{ "add": "plane", "material": { "pattern": {
        "type": "checkers", "colors": [[1, 1, 1], [0, 0, 0]],
        "transform": [["scale", 0.25, 0.25, 0.25]] } } }"#).unwrap();
    let pattern = scene.world.objects[0].material().pattern.unwrap();

    assert_eq!(pattern.kind, PatternKind::Checker(Color::white(), Color::black()));
    assert_eq!(pattern.transform(), &Matrix4::scaling(0.25, 0.25, 0.25));
}

#[test]
fn groups_pass_material_to_children() {
    let scene = parse(r#"{ "add": "group", "material": { "ambient": 0.5 },
        "transform": [["translate", 0, 2, 0]],
        "children": [
            { "add": "sphere" },
            { "add": "cylinder", "min": 0, "max": 1, "closed": true, "material": { "ambient": 0.2 } }
        ] }"#).unwrap();
    let children = scene.world.objects[0].children().unwrap();

    assert_eq!(children.len(), 2);
    assert_eq!(children[0].material().ambient, 0.5);
    assert_eq!(children[1].material().ambient, 0.2);
}

#[test]
fn csg_records() {
    let scene = parse(r#"{ "add": "csg", "operation": "difference",
        "left": { "add": "cube" },
        "right": { "add": "sphere", "transform": [["scale", 1.3, 1.3, 1.3]] } }"#).unwrap();
    let csg = &scene.world.objects[0];

    assert!(matches!(csg.kind(), crate::shape::ShapeKind::Csg(CsgOp::Difference, _, _)));
    assert_eq!(csg.csg_right().transform(), &Matrix4::scaling(1.3, 1.3, 1.3));
}

#[test]
fn missing_camera_is_an_error() {
    let err = Scene::from_json_str(r#"[{ "add": "sphere" }]"#, Path::new(".")).unwrap_err();
    assert!(matches!(err, SceneError::MissingCamera));
}

#[test]
fn unknown_names_are_errors() {
    assert!(matches!(parse(r#"{ "add": "torus" }"#),
        Err(SceneError::UnknownShape(ref s)) if s == "torus"));
    assert!(matches!(parse(r#"{ "add": "cube", "material": "nope" }"#),
        Err(SceneError::UnknownDefinition(ref s)) if s == "nope"));
    assert!(matches!(parse(r#"{ "add": "csg", "operation": "xor",
            "left": { "add": "cube" }, "right": { "add": "cube" } }"#),
        Err(SceneError::UnknownOperation(_))));
    assert!(matches!(parse(r#"{ "add": "cube", "material": { "pattern": { "type": "marble",
            "colors": [[1, 1, 1], [0, 0, 0]] } } }"#),
        Err(SceneError::UnknownPattern(_))));
}

#[test]
fn malformed_records_are_errors() {
    assert!(matches!(parse(r#"{ "add": "cube", "transform": [["translate", 1, 2]] }"#),
        Err(SceneError::BadTransform(_))));
    assert!(matches!(parse(r#"{ "add": "cube", "transform": [["scale", 0, 1, 1]] }"#),
        Err(SceneError::BadTransform(_))));
    assert!(matches!(parse(r#"{ "add": "triangle", "p1": [0, 1, 0], "p2": [1, 0, 0] }"#),
        Err(SceneError::MissingField { field: "p3", .. })));
    assert!(matches!(parse(r#"{ "color": [1, 0, 0] }"#),
        Err(SceneError::UnknownRecord(1))));
    assert!(matches!(Scene::from_json_str("{", Path::new(".")),
        Err(SceneError::Json(_))));
}

#[test]
fn transforms_that_overflow_are_errors() {
    assert!(matches!(parse(r#"{ "add": "sphere",
            "transform": [["scale", 1e120, 1e120, 1e120]] }"#),
        Err(SceneError::BadTransform(_))));

    // Both scales invert alone; the group's world transform for the sphere
    // does not.
    assert!(matches!(parse(r#"{ "add": "group",
            "transform": [["scale", 1e-60, 1e-60, 1e-60]],
            "children": [{ "add": "sphere", "transform": [["scale", 1e-60, 1e-60, 1e-60]] }] }"#),
        Err(SceneError::BadTransform(_))));
}

#[test]
fn missing_obj_file_is_an_error() {
    let err = parse(r#"{ "add": "obj", "file": "does-not-exist.obj" }"#).unwrap_err();
    assert!(matches!(err, SceneError::Obj { source: ObjError::Io(_), .. }));
}
