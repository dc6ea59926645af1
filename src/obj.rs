use std::fs;
use std::path::Path;

use log::{ debug, info };
use thiserror::Error;

use crate::shape::Shape;
use crate::tuple::Tuple;

/// Group that collects faces appearing before any `g` statement.
pub const DEFAULT_GROUP: &str = "default";

/// Errors raised while reading a Wavefront OBJ file.
#[derive(Error, Debug)]
pub enum ObjError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: invalid number {token:?}")]
    InvalidNumber { line: usize, token: String },

    #[error("line {line}: vertex index {index} out of range (have {count})")]
    VertexOutOfRange { line: usize, index: i64, count: usize },

    #[error("line {line}: normal index {index} out of range (have {count})")]
    NormalOutOfRange { line: usize, index: i64, count: usize },
}

pub type ObjResult<T> = Result<T, ObjError>;

/// One corner of a face: a vertex index and an optional normal index, both
/// zero-based.
#[derive(Copy, Clone, Debug)]
struct FaceVertex {
    vertex: usize,
    normal: Option<usize>,
}

/// A parsed OBJ mesh.
///
/// Supported statements are `v`, `vn`, `f` and `g`. Faces may be written as
/// `f 1 2 3`, `f 1/2/3 ...` or `f 1//3 ...`; texture indices are read past
/// and dropped. Polygons are fan triangulated, and a face with a normal on
/// every corner becomes a set of smooth triangles. Anything else is counted
/// in `ignored_lines`.
///
/// Groups are kept in the order the file first names them, starting with
/// `"default"`.
///
/// # Examples
///
/// ```
/// use rtc::obj::ObjParser;
///
/// let obj = ObjParser::parse_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
/// assert_eq!(obj.vertices.len(), 3);
/// assert_eq!(obj.triangle_count(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct ObjParser {
    pub ignored_lines: usize,

    pub vertices: Vec<Tuple>,
    pub normals: Vec<Tuple>,
    pub groups: Vec<(String, Shape)>,

    /// Index into `groups` that faces are added to.
    current_group: usize,
}

impl Default for ObjParser {
    fn default() -> ObjParser {
        ObjParser {
            ignored_lines: 0,
            vertices: Vec::new(),
            normals: Vec::new(),
            groups: vec![(DEFAULT_GROUP.to_string(), Shape::group())],
            current_group: 0,
        }
    }
}

impl ObjParser {
    /// Parses OBJ text held in memory.
    pub fn parse_str(source: &str) -> ObjResult<ObjParser> {
        let mut parser = ObjParser::default();
        for (i, line) in source.lines().enumerate() {
            parser.handle_line(i + 1, line)?;
        }

        info!("parsed OBJ: {} vertices, {} normals, {} triangles in {} groups",
            parser.vertices.len(), parser.normals.len(),
            parser.triangle_count(), parser.groups.len());
        if parser.ignored_lines > 0 {
            debug!("ignored {} OBJ lines", parser.ignored_lines);
        }

        Ok(parser)
    }

    /// Reads and parses the OBJ file at `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ObjResult<ObjParser> {
        let path = path.as_ref();
        info!("loading OBJ file {}", path.display());
        ObjParser::parse_str(&fs::read_to_string(path)?)
    }

    /// The named group, if the file declared it (or `"default"`).
    pub fn group(&self, name: &str) -> Option<&Shape> {
        self.groups.iter()
            .find(|(n, _)| n == name)
            .map(|(_, g)| g)
    }

    /// Total number of triangles across all groups.
    pub fn triangle_count(&self) -> usize {
        self.groups.iter()
            .map(|(_, g)| g.children().map_or(0, |c| c.len()))
            .sum()
    }

    /// Consumes the parser, returning one group holding every non-empty
    /// named group.
    pub fn into_group(self) -> Shape {
        let children = self.groups.into_iter()
            .map(|(_, g)| g)
            .filter(|g| g.children().map_or(false, |c| !c.is_empty()))
            .collect();

        Shape::group_of(children)
    }

    fn handle_line(&mut self, line_no: usize, line: &str) -> ObjResult<()> {
        let mut params = line.split_whitespace();
        let command = match params.next() {
            Some(c) => c,
            None => return Ok(()),
        };
        let args: Vec<&str> = params.collect();

        match command {
            "v" if args.len() >= 3 => {
                let [x, y, z] = parse_xyz(line_no, &args)?;
                self.vertices.push(Tuple::point(x, y, z));
            },
            "vn" if args.len() >= 3 => {
                let [x, y, z] = parse_xyz(line_no, &args)?;
                self.normals.push(Tuple::vector(x, y, z));
            },
            "f" if args.len() >= 3 => {
                let face = args.iter()
                    .map(|a| self.parse_face_vertex(line_no, a))
                    .collect::<ObjResult<Vec<_>>>()?;
                let triangles = self.fan_triangulation(&face);

                let group = &mut self.groups[self.current_group].1;
                for triangle in triangles {
                    group.add_child(triangle);
                }
            },
            "g" if !args.is_empty() => {
                let name = args.join(" ");
                self.current_group = match self.groups.iter().position(|(n, _)| *n == name) {
                    Some(i) => i,
                    None => {
                        self.groups.push((name, Shape::group()));
                        self.groups.len() - 1
                    },
                };
            },
            _ => self.ignored_lines += 1,
        }

        Ok(())
    }

    /// Parses `v`, `v/vt`, `v/vt/vn` or `v//vn`.
    fn parse_face_vertex(&self, line_no: usize, token: &str) -> ObjResult<FaceVertex> {
        let mut parts = token.split('/');

        let vertex = parse_index(line_no, parts.next().unwrap_or(""))?;
        let vertex = resolve(vertex, self.vertices.len()).ok_or(
            ObjError::VertexOutOfRange {
                line: line_no,
                index: vertex,
                count: self.vertices.len(),
            })?;

        // Texture coordinates are skipped.
        let normal = match parts.nth(1) {
            Some(n) if !n.is_empty() => {
                let index = parse_index(line_no, n)?;
                let resolved = resolve(index, self.normals.len()).ok_or(
                    ObjError::NormalOutOfRange {
                        line: line_no,
                        index,
                        count: self.normals.len(),
                    })?;
                Some(resolved)
            },
            _ => None,
        };

        Ok(FaceVertex { vertex, normal })
    }

    /// Splits a convex polygon into triangles sharing its first corner:
    /// `(0, 1, 2)`, `(0, 2, 3)` and so on.
    fn fan_triangulation(&self, face: &[FaceVertex]) -> Vec<Shape> {
        let mut triangles = Vec::with_capacity(face.len().saturating_sub(2));

        for i in 1..face.len() - 1 {
            let (a, b, c) = (face[0], face[i], face[i + 1]);
            let (p1, p2, p3) = (self.vertices[a.vertex],
                self.vertices[b.vertex], self.vertices[c.vertex]);

            let triangle = match (a.normal, b.normal, c.normal) {
                (Some(n1), Some(n2), Some(n3)) => Shape::smooth_triangle(
                    p1, p2, p3,
                    self.normals[n1], self.normals[n2], self.normals[n3]),
                _ => Shape::triangle(p1, p2, p3),
            };
            triangles.push(triangle);
        }

        triangles
    }
}

fn parse_number(line: usize, token: &str) -> ObjResult<f64> {
    token.parse().map_err(|_| ObjError::InvalidNumber {
        line,
        token: token.to_string(),
    })
}

fn parse_xyz(line: usize, args: &[&str]) -> ObjResult<[f64; 3]> {
    Ok([
        parse_number(line, args[0])?,
        parse_number(line, args[1])?,
        parse_number(line, args[2])?,
    ])
}

fn parse_index(line: usize, token: &str) -> ObjResult<i64> {
    token.parse().map_err(|_| ObjError::InvalidNumber {
        line,
        token: token.to_string(),
    })
}

/// Maps a one-based (or negative, counted from the end) OBJ index onto a
/// zero-based one.
fn resolve(index: i64, count: usize) -> Option<usize> {
    let resolved = if index > 0 {
        index - 1
    } else if index < 0 {
        count as i64 + index
    } else {
        return None;
    };

    if resolved >= 0 && (resolved as usize) < count {
        Some(resolved as usize)
    } else {
        None
    }
}

#[cfg(test)]
fn triangle_at(obj: &ObjParser, group: &str, i: usize) -> crate::geometry::TriangleInfo {
    use crate::shape::ShapeKind;

    match obj.group(group).unwrap().children().unwrap()[i].kind() {
        ShapeKind::Triangle(t) => *t,
        ShapeKind::SmoothTriangle(s) => s.tri,
        other => panic!("expected a triangle, got {:?}", other),
    }
}

#[test]
fn ignoring_unrecognized_lines() {
    let gibberish = "There was a young lady named Bright\n\
        who traveled much faster than light.\n\
        She set out one day\n\
        in a relative way,\n\
        and came back the previous night.\n";
    let obj = ObjParser::parse_str(gibberish).unwrap();

    assert_eq!(obj.ignored_lines, 5);
    assert!(obj.vertices.is_empty());
}

#[test]
fn vertex_records() {
    let obj = ObjParser::parse_str("v -1 1 0\nv -1.0000 0.5000 0.0000\nv 1 0 0\nv 1 1 0\n")
        .unwrap();

    assert_eq!(obj.vertices, vec![
        Tuple::point(-1.0, 1.0, 0.0),
        Tuple::point(-1.0, 0.5, 0.0),
        Tuple::point(1.0, 0.0, 0.0),
        Tuple::point(1.0, 1.0, 0.0),
    ]);
}

#[test]
fn parsing_triangle_faces() {
    let source = "v -1 1 0\nv -1 0 0\nv 1 0 0\nv 1 1 0\n\nf 1 2 3\nf 1 3 4\n";
    let obj = ObjParser::parse_str(source).unwrap();
    let v = &obj.vertices;

    let t1 = triangle_at(&obj, DEFAULT_GROUP, 0);
    let t2 = triangle_at(&obj, DEFAULT_GROUP, 1);
    assert_eq!((t1.p1, t1.p2, t1.p3), (v[0], v[1], v[2]));
    assert_eq!((t2.p1, t2.p2, t2.p3), (v[0], v[2], v[3]));
}

#[test]
fn triangulating_polygons() {
    let source = "v -1 1 0\nv -1 0 0\nv 1 0 0\nv 1 1 0\nv 0 2 0\n\nf 1 2 3 4 5\n";
    let obj = ObjParser::parse_str(source).unwrap();
    let v = &obj.vertices;

    assert_eq!(obj.triangle_count(), 3);
    let t3 = triangle_at(&obj, DEFAULT_GROUP, 2);
    assert_eq!((t3.p1, t3.p2, t3.p3), (v[0], v[3], v[4]));
}

#[test]
fn triangles_in_groups() {
    let source = "v -1 1 0\nv -1 0 0\nv 1 0 0\nv 1 1 0\n\
        g FirstGroup\nf 1 2 3\ng SecondGroup\nf 1 3 4\n";
    let obj = ObjParser::parse_str(source).unwrap();
    let v = &obj.vertices;

    let t1 = triangle_at(&obj, "FirstGroup", 0);
    let t2 = triangle_at(&obj, "SecondGroup", 0);
    assert_eq!((t1.p1, t1.p2, t1.p3), (v[0], v[1], v[2]));
    assert_eq!((t2.p1, t2.p2, t2.p3), (v[0], v[2], v[3]));
}

#[test]
fn converting_to_a_group_drops_empty_groups() {
    let source = "v -1 1 0\nv -1 0 0\nv 1 0 0\nv 1 1 0\n\
        g FirstGroup\nf 1 2 3\ng SecondGroup\nf 1 3 4\n";
    let g = ObjParser::parse_str(source).unwrap().into_group();

    // The unused default group is not included.
    assert_eq!(g.children().unwrap().len(), 2);
}

#[test]
fn groups_keep_file_order() {
    let source = "v -1 1 0\nv -1 0 0\nv 1 0 0\nv 1 1 0\n\
        g Zebra\nf 1 2 3\ng Apple\nf 1 3 4\nf 1 2 4\ng Zebra\nf 2 3 4\n";
    let obj = ObjParser::parse_str(source).unwrap();

    let names: Vec<&str> = obj.groups.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec![DEFAULT_GROUP, "Zebra", "Apple"]);

    // Reopening a group appends to it rather than adding another.
    let g = obj.into_group();
    let sizes: Vec<usize> = g.children().unwrap().iter()
        .map(|c| c.children().unwrap().len())
        .collect();
    assert_eq!(sizes, vec![2, 2]);
}

#[test]
fn vertex_normal_records() {
    let obj = ObjParser::parse_str("vn 0 0 1\nvn 0.707 0 -0.707\nvn 1 2 3\n").unwrap();

    assert_eq!(obj.normals, vec![
        Tuple::vector(0.0, 0.0, 1.0),
        Tuple::vector(0.707, 0.0, -0.707),
        Tuple::vector(1.0, 2.0, 3.0),
    ]);
}

#[test]
fn faces_with_normals() {
    use crate::shape::ShapeKind;

    let source = "v 0 1 0\nv -1 0 0\nv 1 0 0\n\
        vn -1 0 0\nvn 1 0 0\nvn 0 1 0\n\
        f 1//3 2//1 3//2\nf 1/0/3 2/102/1 3/14/2\n";
    let obj = ObjParser::parse_str(source).unwrap();
    let children = obj.group(DEFAULT_GROUP).unwrap().children().unwrap();

    let smooth = |i: usize| match children[i].kind() {
        ShapeKind::SmoothTriangle(s) => *s,
        other => panic!("expected a smooth triangle, got {:?}", other),
    };
    let (t1, t2) = (smooth(0), smooth(1));

    assert_eq!(t1.tri.p1, obj.vertices[0]);
    assert_eq!(t1.tri.p2, obj.vertices[1]);
    assert_eq!(t1.tri.p3, obj.vertices[2]);
    assert_eq!(t1.n1, obj.normals[2]);
    assert_eq!(t1.n2, obj.normals[0]);
    assert_eq!(t1.n3, obj.normals[1]);
    assert_eq!(t1, t2);
}

#[test]
fn negative_indices_count_from_the_end() {
    let obj = ObjParser::parse_str("v 0 1 0\nv -1 0 0\nv 1 0 0\nf -3 -2 -1\n").unwrap();
    let t = triangle_at(&obj, DEFAULT_GROUP, 0);

    assert_eq!(t.p1, obj.vertices[0]);
    assert_eq!(t.p3, obj.vertices[2]);
}

#[test]
fn malformed_numbers_are_errors() {
    let err = ObjParser::parse_str("v 0 0 0\nv 1 zero 0\n").unwrap_err();

    match err {
        ObjError::InvalidNumber { line, token } => {
            assert_eq!(line, 2);
            assert_eq!(token, "zero");
        },
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn out_of_range_indices_are_errors() {
    let err = ObjParser::parse_str("v 0 0 0\nv 1 0 0\nf 1 2 3\n").unwrap_err();
    assert!(matches!(err, ObjError::VertexOutOfRange { line: 3, index: 3, count: 2 }));

    let err = ObjParser::parse_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1//1 2//1 3//1\n")
        .unwrap_err();
    assert!(matches!(err, ObjError::NormalOutOfRange { line: 4, .. }));
}
