//! This module splits OBJ polygons into triangles of polygon vertices.

use itertools::Itertools;
use nalgebra::Vector3;

use crate::{
    earcut::earcut,
    geometry::{is_degenerate, newell_normal, triangle_normal, vector, OrthonormalBasis2D},
    obj::{ObjModel, Polygon, PolygonVertex},
};

pub type Triangle = [PolygonVertex; 3];

/// Triangulate one polygon. Triangles and quads are fanned directly; anything
/// larger is flattened onto its plane and ear-clipped. Triangles keep the
/// winding of the source polygon.
pub fn triangulate(model: &ObjModel, polygon: &Polygon) -> Vec<Triangle> {
    let v = &polygon.vertices;
    match v.len() {
        0..=2 => Vec::new(),
        3 => vec![[v[0], v[1], v[2]]],
        4 => vec![[v[0], v[1], v[2]], [v[0], v[2], v[3]]],
        _ => triangulate_planar(model, polygon),
    }
}

fn triangulate_planar(model: &ObjModel, polygon: &Polygon) -> Vec<Triangle> {
    let points: Vec<Vector3<f64>> = polygon
        .vertices
        .iter()
        .map(|x| vector(model.positions[x.position as usize].coords))
        .collect();
    let normal = estimate_normal(model, polygon, &points);
    if is_degenerate(&normal) {
        return Vec::new();
    }

    let basis = OrthonormalBasis2D::from_normal(&normal);
    let polygon2d: Vec<f64> = points
        .iter()
        .flat_map(|x| {
            let p = basis.transform(x);
            [p.x, p.y]
        })
        .collect();

    earcut(&polygon2d, 2)
        .into_iter()
        .tuples()
        .map(|(a, b, c)| {
            // Ear clipping normalizes the ring orientation, so restore ours.
            if triangle_normal(&points[a], &points[b], &points[c]).dot(&normal) < 0.0 {
                [polygon.vertices[a], polygon.vertices[c], polygon.vertices[b]]
            } else {
                [polygon.vertices[a], polygon.vertices[b], polygon.vertices[c]]
            }
        })
        .collect()
}

/// Average of the supplied vertex normals, else the first corner's cross
/// product, else Newell's normal when the first corner is collinear.
pub fn estimate_normal(model: &ObjModel, polygon: &Polygon, points: &[Vector3<f64>]) -> Vector3<f64> {
    let supplied: Vec<Vector3<f64>> = polygon
        .vertices
        .iter()
        .filter_map(|x| x.normal)
        .map(|ix| vector(model.normals[ix as usize]))
        .collect();
    if !supplied.is_empty() {
        let average = supplied.iter().sum::<Vector3<f64>>() / supplied.len() as f64;
        if !is_degenerate(&average) {
            return average.normalize();
        }
    }

    let cross = triangle_normal(&points[0], &points[1], &points[2]);
    if !is_degenerate(&cross) {
        return cross.normalize();
    }
    let newell = newell_normal(points);
    if is_degenerate(&newell) {
        newell
    } else {
        newell.normalize()
    }
}
