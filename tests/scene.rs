use std::fs;
use std::path::{ Path, PathBuf };

use rtc::color::Color;
use rtc::consts::GLASS_RI;
use rtc::obj::ObjParser;
use rtc::parallel::{ parallel_render, RenderConfig };
use rtc::scene::{ Scene, SceneError };
use rtc::shape::ShapeKind;

const TEAPOT_LID: &str = "\
# a square with smooth corners and a stray triangle
v -1 0 -1
v 1 0 -1
v 1 0 1
v -1 0 1
vn 0 1 0
vt 0.5 0.5

g lid
f 1//1 2//1 3//1 4//1
g knob
f 1 2 3
";

/// A scratch directory removed on drop.
struct ScratchDir(PathBuf);

impl ScratchDir {
    fn new(name: &str) -> ScratchDir {
        let dir = std::env::temp_dir()
            .join(format!("rtc-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        ScratchDir(dir)
    }

    fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

#[test]
fn obj_meshes_become_grouped_triangles() {
    let obj = ObjParser::parse_str(TEAPOT_LID).unwrap();
    assert_eq!(obj.ignored_lines, 2);
    assert_eq!(obj.triangle_count(), 3);

    let mesh = obj.into_group();
    let groups = mesh.children().unwrap();
    assert_eq!(groups.len(), 2);

    // Groups keep file order: "lid" then "knob".
    let lid = groups[0].children().unwrap();
    let knob = groups[1].children().unwrap();
    assert!(matches!(knob[0].kind(), ShapeKind::Triangle(_)));
    assert!(lid.iter().all(|t| matches!(t.kind(), ShapeKind::SmoothTriangle(_))));
}

#[test]
fn loading_a_scene_file_with_a_mesh() {
    let dir = ScratchDir::new("scene");
    fs::write(dir.path().join("lid.obj"), TEAPOT_LID).unwrap();
    fs::write(dir.path().join("scene.json"), r#"[
        { "add": "camera", "width": 8, "height": 6, "field-of-view": 1.0472,
          "from": [0, 3, -5], "to": [0, 0, 0], "up": [0, 1, 0] },
        { "add": "light", "at": [-10, 10, -10], "intensity": [1, 1, 1] },
        { "define": "glass", "value": { "color": [0.1, 0.1, 0.1],
          "transparency": 0.9, "reflective": 0.9, "refractive-index": 1.5 } },
        { "add": "obj", "file": "lid.obj", "material": "glass",
          "transform": [["scale", 2, 2, 2]] },
        { "add": "plane", "transform": [["translate", 0, -1, 0]] }
    ]"#).unwrap();

    let scene = Scene::load(dir.path().join("scene.json")).unwrap();
    assert_eq!(scene.world.objects.len(), 2);
    assert_eq!(scene.world.lights.len(), 1);

    let lid = &scene.world.objects[0].children().unwrap()[0].children().unwrap()[0];
    assert_eq!(lid.material().refractive_index, GLASS_RI);
    assert_eq!(lid.material().color, Color::rgb(0.1, 0.1, 0.1));

    let image = parallel_render(&scene.camera, &scene.world, &RenderConfig::default())
        .unwrap();
    assert_eq!((image.width(), image.height()), (8, 6));
}

#[test]
fn missing_scene_file_is_an_io_error() {
    let err = Scene::load("/definitely/not/here.json").unwrap_err();

    assert!(matches!(err, SceneError::Io(_)));
}
