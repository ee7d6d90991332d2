//! Packs primitive geometry into one binary buffer.
//!
//! Each attribute stream (positions, normals, texture coordinates, indices)
//! gets a single buffer view shared by every primitive; a primitive's
//! accessors address their slice of the view through `byteOffset`. Embedded
//! images follow, one view each.

use tracing::debug;

use crate::dedup::PrimitiveGeometry;
use crate::json::{
    Accessor, Buffer, BufferView, Checked, ComponentType, Index, Root, Target, Type,
};
use crate::textures::EmbeddedImage;

/// The largest vertex count whose indices all fit in a `u16`.
pub const U16_VERTEX_LIMIT: usize = 65535;

/// Accessors created for one primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimitiveAccessors {
    pub positions: Index<Accessor>,
    pub normals: Option<Index<Accessor>>,
    pub tex_coords: Option<Index<Accessor>>,
    pub indices: Index<Accessor>,
}

/// Pad to a 4-byte boundary with zeroes.
pub fn align_buffer(buffer: &mut Vec<u8>) {
    while buffer.len() % 4 != 0 {
        buffer.push(0);
    }
}

/// One component type for every index accessor in the document.
pub fn index_component_type(geometries: &[PrimitiveGeometry]) -> ComponentType {
    if geometries
        .iter()
        .any(|geometry| geometry.vertex_count() > U16_VERTEX_LIMIT)
    {
        ComponentType::U32
    } else {
        ComponentType::U16
    }
}

#[derive(Default)]
struct Stream {
    bytes: Vec<u8>,
    offsets: Vec<usize>,
}

impl Stream {
    fn push(&mut self, data: &[u8]) {
        self.offsets.push(self.bytes.len());
        self.bytes.extend_from_slice(data);
    }
}

/// Appends the stream views and accessors for `geometries`, and a view for
/// each embedded image, to `root`. Returns the accessors in the order of
/// `geometries` (empty if none of them has a triangle) and the buffer
/// contents. The new buffer describes the blob but carries no URI.
pub fn pack(
    root: &mut Root,
    geometries: &[PrimitiveGeometry],
    images: &[EmbeddedImage],
) -> (Vec<PrimitiveAccessors>, Vec<u8>) {
    let index_type = index_component_type(geometries);
    debug!("packing {} primitives with {:?} indices", geometries.len(), index_type);

    let mut position_stream = Stream::default();
    let mut normal_stream = Stream::default();
    let mut tex_coord_stream = Stream::default();
    let mut index_stream = Stream::default();
    for geometry in geometries {
        position_stream.push(bytemuck::cast_slice(geometry.positions.as_slice()));
        normal_stream.push(bytemuck::cast_slice(geometry.normals.as_slice()));
        tex_coord_stream.push(bytemuck::cast_slice(geometry.tex_coords.as_slice()));
        match index_type {
            ComponentType::U32 => index_stream.push(bytemuck::cast_slice(geometry.indices.as_slice())),
            _ => {
                let narrow: Vec<u16> = geometry.indices.iter().map(|&ix| ix as u16).collect();
                index_stream.push(bytemuck::cast_slice(narrow.as_slice()));
            }
        }
    }

    let buffer = Index::new(root.buffers.len() as u32);
    let mut blob = Vec::new();
    let mut add_view = |root: &mut Root, data: &[u8], stride: Option<usize>, target: Option<Target>| {
        if data.is_empty() {
            return None;
        }
        let mut view = BufferView::new(buffer, blob.len(), data.len());
        view.byte_stride = stride;
        view.target = target.map(Checked::Valid);
        blob.extend_from_slice(data);
        align_buffer(&mut blob);
        Some(Index::push(&mut root.buffer_views, view))
    };

    let position_view = add_view(root, &position_stream.bytes, Some(12), Some(Target::ArrayBuffer));
    let normal_view = add_view(root, &normal_stream.bytes, Some(12), Some(Target::ArrayBuffer));
    let tex_coord_view = add_view(root, &tex_coord_stream.bytes, Some(8), Some(Target::ArrayBuffer));
    let index_view = add_view(root, &index_stream.bytes, None, Some(Target::ElementArrayBuffer));
    for image in images {
        let view = add_view(root, &image.bytes, None, None);
        if let Some(slot) = root.images.get_mut(image.image.value()) {
            slot.buffer_view = view;
        }
    }

    let mut accessors = Vec::with_capacity(geometries.len());
    if let (Some(position_view), Some(index_view)) = (position_view, index_view) {
        for (i, geometry) in geometries.iter().enumerate() {
            let count = geometry.vertex_count();
            let positions = Index::push(
                &mut root.accessors,
                Accessor::new(position_view, position_stream.offsets[i], ComponentType::F32, Type::Vec3, count)
                    .with_bounds(&geometry.position_bounds.min, &geometry.position_bounds.max),
            );
            let normals = match normal_view {
                Some(view) if geometry.has_normals() => Some(Index::push(
                    &mut root.accessors,
                    Accessor::new(view, normal_stream.offsets[i], ComponentType::F32, Type::Vec3, count)
                        .with_bounds(&geometry.normal_bounds.min, &geometry.normal_bounds.max),
                )),
                _ => None,
            };
            let tex_coords = match tex_coord_view {
                Some(view) if geometry.has_tex_coords() => Some(Index::push(
                    &mut root.accessors,
                    Accessor::new(view, tex_coord_stream.offsets[i], ComponentType::F32, Type::Vec2, count)
                        .with_bounds(&geometry.tex_coord_bounds.min, &geometry.tex_coord_bounds.max),
                )),
                _ => None,
            };
            let indices = Index::push(
                &mut root.accessors,
                Accessor::new(index_view, index_stream.offsets[i], index_type, Type::Scalar, geometry.indices.len()),
            );
            accessors.push(PrimitiveAccessors {
                positions,
                normals,
                tex_coords,
                indices,
            });
        }
    }

    if !blob.is_empty() {
        root.buffers.push(Buffer {
            byte_length: blob.len(),
            uri: None,
            name: None,
        });
    }
    (accessors, blob)
}
