//! This module reduces a primitive's triangles into an indexed vertex list,
//! accumulating the attribute streams and their bounds as it goes.

use std::collections::hash_map::Entry::{Occupied, Vacant};
use std::collections::HashMap;

use crate::geometry::{triangle_normal, vector};
use crate::obj::{ObjModel, PolygonVertex};
use crate::triangulation::Triangle;

/// Running per-component minimum and maximum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<const N: usize> {
    pub min: [f32; N],
    pub max: [f32; N],
}

impl<const N: usize> Default for Bounds<N> {
    fn default() -> Self {
        Self {
            min: [f32::MAX; N],
            max: [f32::MIN; N],
        }
    }
}

impl<const N: usize> Bounds<N> {
    pub fn extend(&mut self, value: &[f32; N]) {
        for i in 0..N {
            self.min[i] = self.min[i].min(value[i]);
            self.max[i] = self.max[i].max(value[i]);
        }
    }

    pub fn is_empty(&self) -> bool {
        (0..N).any(|i| self.min[i] > self.max[i])
    }
}

/// Maps each distinct polygon vertex to the index it was first emitted at.
#[derive(Debug, Default)]
pub struct VertexCache {
    map: HashMap<PolygonVertex, u32>,
    vertices: Vec<PolygonVertex>,
}

impl VertexCache {
    /// Returns the vertex index and whether it was newly allocated.
    pub fn get_ix(&mut self, vertex: PolygonVertex) -> (u32, bool) {
        match self.map.entry(vertex) {
            Occupied(e) => (*e.get(), false),
            Vacant(e) => {
                let ix = self.vertices.len() as u32;
                e.insert(ix);
                self.vertices.push(vertex);
                (ix, true)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// The vertex streams of one output primitive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrimitiveGeometry {
    pub positions: Vec<[f32; 3]>,
    /// Empty unless every vertex carried a normal.
    pub normals: Vec<[f32; 3]>,
    /// Empty unless every vertex carried a texture coordinate.
    pub tex_coords: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
    pub position_bounds: Bounds<3>,
    pub normal_bounds: Bounds<3>,
    pub tex_coord_bounds: Bounds<2>,
}

impl PrimitiveGeometry {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    pub fn has_tex_coords(&self) -> bool {
        !self.tex_coords.is_empty()
    }
}

/// Builds a [`PrimitiveGeometry`] triangle by triangle.
pub struct GeometryBuilder<'a> {
    model: &'a ObjModel,
    cache: VertexCache,
    geometry: PrimitiveGeometry,
    all_normals: bool,
    all_tex_coords: bool,
}

impl<'a> GeometryBuilder<'a> {
    pub fn new(model: &'a ObjModel) -> Self {
        Self {
            model,
            cache: VertexCache::default(),
            geometry: PrimitiveGeometry::default(),
            all_normals: true,
            all_tex_coords: true,
        }
    }

    pub fn push_triangle(&mut self, triangle: &Triangle) {
        let mut ixs = [0u32; 3];
        for (ix, vertex) in ixs.iter_mut().zip(triangle.iter()) {
            *ix = self.push_vertex(*vertex);
        }
        if self.is_flipped(triangle) {
            ixs.swap(1, 2);
        }
        self.geometry.indices.extend_from_slice(&ixs);
    }

    /// A triangle whose face normal opposes its first vertex's normal is
    /// emitted in reverse.
    fn is_flipped(&self, triangle: &Triangle) -> bool {
        let normal = match triangle[0].normal {
            Some(ix) => vector(self.model.normals[ix as usize]),
            None => return false,
        };
        let [a, b, c] =
            (*triangle).map(|v| vector(self.model.positions[v.position as usize].coords));
        triangle_normal(&a, &b, &c).dot(&normal) < 0.0
    }

    fn push_vertex(&mut self, vertex: PolygonVertex) -> u32 {
        let (ix, new) = self.cache.get_ix(vertex);
        if !new {
            return ix;
        }

        let position = self.model.positions[vertex.position as usize].coords;
        self.geometry.position_bounds.extend(&position);
        self.geometry.positions.push(position);

        match vertex.normal {
            Some(n) if self.all_normals => {
                let normal = self.model.normals[n as usize];
                self.geometry.normal_bounds.extend(&normal);
                self.geometry.normals.push(normal);
            }
            Some(_) => {}
            None => self.all_normals = false,
        }

        match vertex.tex_coord {
            Some(t) if self.all_tex_coords => {
                let tex_coord = self.model.tex_coords[t as usize];
                // glTF puts the UV origin at the top left.
                let uv = [tex_coord.u, 1.0 - tex_coord.v];
                self.geometry.tex_coord_bounds.extend(&uv);
                self.geometry.tex_coords.push(uv);
            }
            Some(_) => {}
            None => self.all_tex_coords = false,
        }
        ix
    }

    pub fn vertex_count(&self) -> usize {
        self.cache.len()
    }

    pub fn finish(mut self) -> PrimitiveGeometry {
        if !self.all_normals {
            self.geometry.normals.clear();
            self.geometry.normal_bounds = Bounds::default();
        }
        if !self.all_tex_coords {
            self.geometry.tex_coords.clear();
            self.geometry.tex_coord_bounds = Bounds::default();
        }
        self.geometry
    }
}
