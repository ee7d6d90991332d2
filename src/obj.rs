//! This module reads a WaveFront OBJ file into a polygon soup: flat vertex
//! attribute lists, polygons referring to them by index, and named spans of
//! polygons for groups, objects and material assignments.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::Range;
use std::path::Path;

use crate::lexer::{parse_f32, Lexer, ParseError, Statement};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub coords: [f32; 3],
    pub weight: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexCoord {
    pub u: f32,
    pub v: f32,
    pub w: Option<f32>,
}

/// One corner of a face. All indices are 0-based and resolved against the
/// lists as they were when the face was read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PolygonVertex {
    pub position: u32,
    pub tex_coord: Option<u32>,
    pub normal: Option<u32>,
}

impl PolygonVertex {
    pub fn new(position: u32, tex_coord: Option<u32>, normal: Option<u32>) -> Self {
        Self {
            position,
            tex_coord,
            normal,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<PolygonVertex>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineVertex {
    pub position: u32,
    pub tex_coord: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineSegments {
    pub vertices: Vec<LineVertex>,
}

/// Running element counts; spans are expressed against these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counter {
    pub points: usize,
    pub lines: usize,
    pub polygons: usize,
}

/// The half-open ranges covered by one name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Spans {
    pub points: Vec<Range<usize>>,
    pub lines: Vec<Range<usize>>,
    pub polygons: Vec<Range<usize>>,
}

impl Spans {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.lines.is_empty() && self.polygons.is_empty()
    }

    fn close(&mut self, opened: Counter, closed: Counter) {
        push_range(&mut self.points, opened.points..closed.points);
        push_range(&mut self.lines, opened.lines..closed.lines);
        push_range(&mut self.polygons, opened.polygons..closed.polygons);
    }
}

fn push_range(ranges: &mut Vec<Range<usize>>, range: Range<usize>) {
    if !range.is_empty() {
        ranges.push(range);
    }
}

/// Name to spans, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanMap {
    entries: Vec<(String, Spans)>,
}

impl SpanMap {
    pub fn get(&self, name: &str) -> Option<&Spans> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, spans)| spans)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Spans)> {
        self.entries.iter().map(|(n, spans)| (n.as_str(), spans))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Accumulates spans for one kind of name (`g`, `o` or `usemtl`) over a single
/// parse. Starting a different name closes the current span; restarting the
/// same name is a no-op.
#[derive(Debug)]
pub struct SpanBuilder {
    entries: Vec<(String, Spans)>,
    lookup: HashMap<String, usize>,
    current: Option<(usize, Counter)>,
}

impl SpanBuilder {
    pub fn new(initial: &str, counter: Counter) -> Self {
        let mut builder = Self {
            entries: Vec::new(),
            lookup: HashMap::new(),
            current: None,
        };
        builder.start(initial, counter);
        builder
    }

    pub fn start(&mut self, name: &str, counter: Counter) {
        if let Some((ix, _)) = self.current {
            if self.entries[ix].0 == name {
                return;
            }
        }
        self.close(counter);

        let ix = match self.lookup.get(name) {
            Some(&ix) => ix,
            None => {
                let ix = self.entries.len();
                self.entries.push((name.to_string(), Spans::default()));
                self.lookup.insert(name.to_string(), ix);
                ix
            }
        };
        self.current = Some((ix, counter));
    }

    fn close(&mut self, counter: Counter) {
        if let Some((ix, opened)) = self.current.take() {
            self.entries[ix].1.close(opened, counter);
        }
    }

    /// Close any open span and drop names that never covered anything.
    pub fn finish(mut self, counter: Counter) -> SpanMap {
        self.close(counter);
        self.entries.retain(|(_, spans)| !spans.is_empty());
        SpanMap {
            entries: self.entries,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ObjModel {
    /// Name of the first `o` statement.
    pub name: Option<String>,
    pub material_libraries: Vec<String>,
    pub positions: Vec<Position>,
    pub tex_coords: Vec<TexCoord>,
    pub normals: Vec<[f32; 3]>,
    /// `p` statements, as position indices.
    pub points: Vec<u32>,
    pub lines: Vec<LineSegments>,
    pub polygons: Vec<Polygon>,
    pub groups: SpanMap,
    pub objects: SpanMap,
    /// `usemtl` spans keyed by material name; `""` covers faces with no material.
    pub materials: SpanMap,
}

impl ObjModel {
    pub fn counter(&self) -> Counter {
        Counter {
            points: self.points.len(),
            lines: self.lines.len(),
            polygons: self.polygons.len(),
        }
    }
}

/// Read an OBJ file from disk.
pub fn load_obj(path: &Path) -> Result<ObjModel, ParseError> {
    parse_obj(BufReader::new(File::open(path)?))
}

/// Parse OBJ text into an [`ObjModel`].
pub fn parse_obj<R: BufRead>(reader: R) -> Result<ObjModel, ParseError> {
    let mut model = ObjModel::default();
    let mut groups = SpanBuilder::new("default", model.counter());
    let mut objects = SpanBuilder::new("default", model.counter());
    let mut materials = SpanBuilder::new("", model.counter());

    for statement in Lexer::new(reader) {
        let statement = statement?;
        let args = statement.args();
        match statement.directive.as_str() {
            "mtllib" => {
                if statement.tail.is_empty() {
                    return Err(statement.missing_argument());
                }
                model.material_libraries.push(statement.tail.clone());
            }
            "v" => model.positions.push(parse_position(&statement, &args)?),
            "vt" => model.tex_coords.push(parse_tex_coord(&statement, &args)?),
            "vn" => model.normals.push(parse_normal(&statement, &args)?),
            "vp" => {}
            "p" => {
                for arg in &args {
                    let index = resolve_index(arg, model.positions.len(), "positions", &statement)?;
                    model.points.push(index);
                }
            }
            "l" => {
                if let Some(segments) = parse_line(&model, &statement, &args)? {
                    model.lines.push(segments);
                }
            }
            "f" | "fo" => {
                if let Some(polygon) = parse_face(&model, &statement, &args)? {
                    model.polygons.push(polygon);
                }
            }
            "g" => groups.start(args.first().copied().unwrap_or("default"), model.counter()),
            "o" => {
                let name = args.first().copied().unwrap_or("default");
                objects.start(name, model.counter());
                if model.name.is_none() {
                    model.name = Some(name.to_string());
                }
            }
            "usemtl" => materials.start(&statement.tail, model.counter()),
            _ => {}
        }
    }

    let counter = model.counter();
    model.groups = groups.finish(counter);
    model.objects = objects.finish(counter);
    model.materials = materials.finish(counter);
    Ok(model)
}

fn parse_floats(statement: &Statement, args: &[&str]) -> Result<Vec<f32>, ParseError> {
    args.iter()
        .map(|arg| parse_f32(arg, statement.line))
        .collect()
}

fn parse_position(statement: &Statement, args: &[&str]) -> Result<Position, ParseError> {
    match parse_floats(statement, args)?.as_slice() {
        &[x, y, z] => Ok(Position {
            coords: [x, y, z],
            weight: None,
        }),
        &[x, y, z, w] => Ok(Position {
            coords: [x, y, z],
            weight: Some(w),
        }),
        other => Err(statement.arity("3 or 4", other.len())),
    }
}

fn parse_tex_coord(statement: &Statement, args: &[&str]) -> Result<TexCoord, ParseError> {
    match parse_floats(statement, args)?.as_slice() {
        &[u] => Ok(TexCoord { u, v: 0.0, w: None }),
        &[u, v] => Ok(TexCoord { u, v, w: None }),
        &[u, v, w] => Ok(TexCoord { u, v, w: Some(w) }),
        other => Err(statement.arity("1, 2 or 3", other.len())),
    }
}

fn parse_normal(statement: &Statement, args: &[&str]) -> Result<[f32; 3], ParseError> {
    match parse_floats(statement, args)?.as_slice() {
        &[x, y, z] => Ok([x, y, z]),
        other => Err(statement.arity("3", other.len())),
    }
}

/// Resolve a 1-based or negative (relative to the end) OBJ index into a
/// 0-based one.
fn resolve_index(
    raw: &str,
    len: usize,
    kind: &'static str,
    statement: &Statement,
) -> Result<u32, ParseError> {
    let index: i64 = raw.parse().map_err(|_| ParseError::InvalidNumber {
        line: statement.line,
        value: raw.to_string(),
    })?;
    let resolved = if index < 0 {
        len as i64 + index
    } else {
        index - 1
    };
    if index == 0 || resolved < 0 || resolved >= len as i64 {
        return Err(ParseError::IndexOutOfRange {
            line: statement.line,
            index,
            len,
            kind,
        });
    }
    Ok(resolved as u32)
}

fn resolve_optional(
    raw: Option<&str>,
    len: usize,
    kind: &'static str,
    statement: &Statement,
) -> Result<Option<u32>, ParseError> {
    match raw {
        Some(raw) if !raw.is_empty() => resolve_index(raw, len, kind, statement).map(Some),
        _ => Ok(None),
    }
}

fn parse_face(
    model: &ObjModel,
    statement: &Statement,
    args: &[&str],
) -> Result<Option<Polygon>, ParseError> {
    // Fewer than three corners cannot enclose anything.
    if args.len() <= 2 {
        return Ok(None);
    }
    let mut polygon = Polygon::default();
    for arg in args {
        let mut parts = arg.split('/');
        let position = match parts.next() {
            Some(raw) if !raw.is_empty() => {
                resolve_index(raw, model.positions.len(), "positions", statement)?
            }
            _ => return Err(statement.missing_argument()),
        };
        let tex_coord =
            resolve_optional(parts.next(), model.tex_coords.len(), "texture coordinates", statement)?;
        let normal = resolve_optional(parts.next(), model.normals.len(), "normals", statement)?;
        polygon
            .vertices
            .push(PolygonVertex::new(position, tex_coord, normal));
    }
    Ok(Some(polygon))
}

fn parse_line(
    model: &ObjModel,
    statement: &Statement,
    args: &[&str],
) -> Result<Option<LineSegments>, ParseError> {
    if args.len() < 2 {
        return Ok(None);
    }
    let mut segments = LineSegments::default();
    for arg in args {
        let mut parts = arg.split('/');
        let position = match parts.next() {
            Some(raw) if !raw.is_empty() => {
                resolve_index(raw, model.positions.len(), "positions", statement)?
            }
            _ => return Err(statement.missing_argument()),
        };
        let tex_coord =
            resolve_optional(parts.next(), model.tex_coords.len(), "texture coordinates", statement)?;
        segments.vertices.push(LineVertex {
            position,
            tex_coord,
        });
    }
    Ok(Some(segments))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUBE_FACES: &str = "\
mtllib cube.mtl
o Cube
v -1 -1 1
v 1 -1 1
v 1 1 1
v -1 1 1
vt 0 0
vt 1 0
vt 1 1
vn 0 0 1
g front
usemtl red
f 1/1/1 2/2/1 3/3/1
f 1/1/1 3/3/1 4//1
usemtl blue
f -4 -3 -2 -1
g back
f 1 2 3
";

    fn parse(text: &str) -> ObjModel {
        parse_obj(text.as_bytes()).unwrap()
    }

    #[test]
    fn reads_vertex_attributes() {
        let model = parse(CUBE_FACES);
        assert_eq!(model.positions.len(), 4);
        assert_eq!(model.tex_coords.len(), 3);
        assert_eq!(model.normals.len(), 1);
        assert_eq!(model.polygons.len(), 4);
        assert_eq!(model.material_libraries, vec!["cube.mtl".to_string()]);
        assert_eq!(model.name.as_deref(), Some("Cube"));
    }

    #[test]
    fn resolves_slash_forms_and_negative_indices() {
        let model = parse(CUBE_FACES);
        assert_eq!(
            model.polygons[0].vertices[1],
            PolygonVertex::new(1, Some(1), Some(0))
        );
        assert_eq!(
            model.polygons[1].vertices[2],
            PolygonVertex::new(3, None, Some(0))
        );
        let relative: Vec<u32> = model.polygons[2]
            .vertices
            .iter()
            .map(|v| v.position)
            .collect();
        assert_eq!(relative, vec![0, 1, 2, 3]);
    }

    #[test]
    fn tracks_group_and_material_spans() {
        let model = parse(CUBE_FACES);
        let names: Vec<&str> = model.groups.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["front", "back"]);
        assert_eq!(model.groups.get("front").unwrap().polygons, vec![0..3]);
        assert_eq!(model.groups.get("back").unwrap().polygons, vec![3..4]);

        assert_eq!(model.materials.get("red").unwrap().polygons, vec![0..2]);
        assert_eq!(model.materials.get("blue").unwrap().polygons, vec![2..4]);
        // Nothing was drawn before the first usemtl.
        assert!(model.materials.get("").is_none());
        assert!(model.groups.get("default").is_none());
    }

    #[test]
    fn repeated_name_continues_span() {
        let model = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\ng a\nf 1 2 3\ng a\nf 1 2 3\ng b\nf 1 2 3\ng a\nf 1 2 3\n");
        assert_eq!(model.groups.get("a").unwrap().polygons, vec![0..2, 3..4]);
        assert_eq!(model.groups.get("b").unwrap().polygons, vec![2..3]);
    }

    #[test]
    fn faces_before_any_group_land_in_default() {
        let model = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        assert_eq!(model.groups.get("default").unwrap().polygons, vec![0..1]);
        assert_eq!(model.materials.get("").unwrap().polygons, vec![0..1]);
    }

    #[test]
    fn drops_degenerate_faces() {
        let model = parse("v 0 0 0\nv 1 0 0\nf 1 2\nf 1\n");
        assert!(model.polygons.is_empty());
    }

    #[test]
    fn reads_points_and_lines() {
        let model = parse("v 0 0 0\nv 1 0 0\nvt 0 0\np 1 2\nl 1/1 2/1\nl 1\n");
        assert_eq!(model.points, vec![0, 1]);
        assert_eq!(model.lines.len(), 1);
        assert_eq!(model.lines[0].vertices[0].tex_coord, Some(0));
        assert_eq!(model.groups.get("default").unwrap().points, vec![0..2]);
        assert_eq!(model.groups.get("default").unwrap().lines, vec![0..1]);
    }

    #[test]
    fn optional_components() {
        let model = parse("v 1 2 3 0.5\nvt 0.25\nvt 0.5 0.5 1\n");
        assert_eq!(model.positions[0].weight, Some(0.5));
        assert_eq!(
            model.tex_coords[0],
            TexCoord {
                u: 0.25,
                v: 0.0,
                w: None
            }
        );
        assert_eq!(model.tex_coords[1].w, Some(1.0));
    }

    #[test]
    fn out_of_range_index_is_fatal() {
        let err = parse_obj("v 0 0 0\nf 1 2 3\n".as_bytes()).unwrap_err();
        match err {
            ParseError::IndexOutOfRange { line, index, len, .. } => {
                assert_eq!((line, index, len), (2, 2, 1));
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert!(matches!(
            parse_obj("v 0 0 0\nv 0 0 0\nv 0 0 0\nf -4 1 2\n".as_bytes()),
            Err(ParseError::IndexOutOfRange { index: -4, .. })
        ));
    }

    #[test]
    fn malformed_numbers_are_fatal() {
        assert!(matches!(
            parse_obj("v 1 two 3\n".as_bytes()),
            Err(ParseError::InvalidNumber { line: 1, .. })
        ));
        assert!(matches!(
            parse_obj("vn 1 0\n".as_bytes()),
            Err(ParseError::Arity { found: 2, .. })
        ));
    }

    /// Every face uses one index form throughout, which obj-rs requires.
    const QUAD_STRIP: &str = "\
o Strip
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
v 2 0 0
v 2 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
g left
f 1/1/1 2/2/1 3/3/1 4/4/1
g right
f 2//1 5//1 6//1
f 2/2 6/3 3/4
f 5 6 3
";

    #[test]
    fn counts_match_obj_rs() {
        let raw = ::obj::raw::parse_obj(QUAD_STRIP.as_bytes()).unwrap();
        let model = parse(QUAD_STRIP);
        assert_eq!(model.polygons.len(), 4);
        assert_eq!(model.positions.len(), raw.positions.len());
        assert_eq!(model.tex_coords.len(), raw.tex_coords.len());
        assert_eq!(model.normals.len(), raw.normals.len());
        assert_eq!(model.polygons.len(), raw.polygons.len());
    }
}
