//! Cross-reference and enum validation of a [`Root`].
//!
//! Validation never fails and never stops early: every violation found is
//! reported with a flat path naming the offending field, such as
//! `mesh_2_primitive_0_material`.

use std::fmt;

use crate::json::{Checked, Index, Root, WireEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// A reference points past the end of its target array.
    IndexOutOfBounds,
    /// An unknown enum value, a `null` in a reference list, or a range that
    /// does not fit its container.
    Invalid,
    /// A required value is absent.
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    pub path: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.path)
    }
}

#[derive(Default)]
struct Validator {
    errors: Vec<ValidationError>,
}

impl Validator {
    fn push(&mut self, kind: ValidationErrorKind, path: String) {
        self.errors.push(ValidationError { kind, path });
    }

    fn index<T>(&mut self, index: Index<T>, len: usize, path: impl FnOnce() -> String) {
        if index.value() >= len {
            self.push(ValidationErrorKind::IndexOutOfBounds, path());
        }
    }

    fn optional<T>(&mut self, index: Option<Index<T>>, len: usize, path: impl FnOnce() -> String) {
        if let Some(index) = index {
            self.index(index, len, path);
        }
    }

    /// Entries of a reference list; `null` entries are invalid.
    fn list<T>(&mut self, items: &[Option<Index<T>>], len: usize, path: impl Fn(usize) -> String) {
        for (j, item) in items.iter().enumerate() {
            match item {
                Some(index) => self.index(*index, len, || path(j)),
                None => self.push(ValidationErrorKind::Invalid, path(j)),
            }
        }
    }

    fn checked<T: WireEnum>(&mut self, value: &Checked<T>, path: impl FnOnce() -> String) {
        if !value.is_valid() {
            self.push(ValidationErrorKind::Invalid, path());
        }
    }

    fn checked_opt<T: WireEnum>(&mut self, value: &Option<Checked<T>>, path: impl FnOnce() -> String) {
        if let Some(value) = value {
            self.checked(value, path);
        }
    }
}

pub fn validate(root: &Root) -> Vec<ValidationError> {
    let mut v = Validator::default();
    validate_buffer_views(root, &mut v);
    validate_accessors(root, &mut v);
    validate_meshes(root, &mut v);
    validate_nodes(root, &mut v);
    validate_skins(root, &mut v);
    validate_scenes(root, &mut v);
    validate_materials(root, &mut v);
    validate_textures(root, &mut v);
    validate_images(root, &mut v);
    validate_animations(root, &mut v);
    validate_cameras(root, &mut v);
    v.errors
}

fn validate_buffer_views(root: &Root, v: &mut Validator) {
    for (i, view) in root.buffer_views.iter().enumerate() {
        v.index(view.buffer, root.buffers.len(), || format!("bufferView_{}_buffer", i));
        if let Some(buffer) = view.buffer.get(&root.buffers) {
            let end = view.offset().checked_add(view.byte_length);
            if end.map_or(true, |end| end > buffer.byte_length) {
                v.push(ValidationErrorKind::Invalid, format!("bufferView_{}_byteLength", i));
            }
        }
        v.checked_opt(&view.target, || format!("bufferView_{}_target", i));
    }
}

fn validate_accessors(root: &Root, v: &mut Validator) {
    let views = root.buffer_views.len();
    for (i, accessor) in root.accessors.iter().enumerate() {
        v.optional(accessor.buffer_view, views, || format!("accessor_{}_bufferview", i));
        v.checked(&accessor.component_type, || format!("accessor_{}_componentType", i));
        v.checked(&accessor.type_, || format!("accessor_{}_type", i));

        let view = accessor.buffer_view.and_then(|ix| ix.get(&root.buffer_views));
        if let (Some(view), Some(size)) = (view, accessor.element_size()) {
            let unstrided = view.byte_stride.map_or(true, |stride| stride == 0);
            let offset = accessor.byte_offset.unwrap_or(0);
            let end = accessor
                .count
                .checked_mul(size)
                .and_then(|len| len.checked_add(offset));
            if unstrided && end.map_or(true, |end| end > view.byte_length) {
                v.push(ValidationErrorKind::Invalid, format!("accessor_{}_count", i));
            }
        }

        if let Some(sparse) = &accessor.sparse {
            v.index(sparse.indices.buffer_view, views, || {
                format!("accessor_{}_sparse_index_bufferview", i)
            });
            v.checked(&sparse.indices.component_type, || {
                format!("accessor_{}_sparse_index_componentType", i)
            });
            v.index(sparse.values.buffer_view, views, || {
                format!("accessor_{}_sparse_value_bufferview", i)
            });
        }
    }
}

fn validate_meshes(root: &Root, v: &mut Validator) {
    let accessors = root.accessors.len();
    for (i, mesh) in root.meshes.iter().enumerate() {
        for (j, primitive) in mesh.primitives.iter().enumerate() {
            for (semantic, accessor) in &primitive.attributes {
                let name = semantic.wire();
                v.checked(semantic, || format!("mesh_{}_primitive_{}_attribute_{}", i, j, name));
                v.index(*accessor, accessors, || {
                    format!("mesh_{}_primitive_{}_attribute_{}", i, j, name)
                });
            }
            v.optional(primitive.indices, accessors, || {
                format!("mesh_{}_primitive_{}_accessor", i, j)
            });
            v.optional(primitive.material, root.materials.len(), || {
                format!("mesh_{}_primitive_{}_material", i, j)
            });
            v.checked(&primitive.mode, || format!("mesh_{}_primitive_{}_mode", i, j));
            for (k, target) in primitive.targets.iter().enumerate() {
                for (semantic, accessor) in target {
                    let name = semantic.wire();
                    v.checked(semantic, || {
                        format!("mesh_{}_primitive_{}_target_{}_{}", i, j, k, name)
                    });
                    v.index(*accessor, accessors, || {
                        format!("mesh_{}_primitive_{}_target_{}_{}", i, j, k, name)
                    });
                }
            }
        }
    }
}

fn validate_nodes(root: &Root, v: &mut Validator) {
    for (i, node) in root.nodes.iter().enumerate() {
        v.list(&node.children, root.nodes.len(), |j| format!("node_{}_children_{}", i, j));
        v.optional(node.mesh, root.meshes.len(), || format!("node_{}_mesh", i));
        v.optional(node.skin, root.skins.len(), || format!("node_{}_skin", i));
        v.optional(node.camera, root.cameras.len(), || format!("node_{}_camera", i));
    }
}

fn validate_skins(root: &Root, v: &mut Validator) {
    for (i, skin) in root.skins.iter().enumerate() {
        v.optional(skin.inverse_bind_matrices, root.accessors.len(), || {
            format!("skin_{}_accessor", i)
        });
        v.list(&skin.joints, root.nodes.len(), |j| format!("skin_{}_joint_{}", i, j));
        v.optional(skin.skeleton, root.nodes.len(), || format!("skin_{}_skeleton", i));
    }
}

fn validate_scenes(root: &Root, v: &mut Validator) {
    for (i, scene) in root.scenes.iter().enumerate() {
        v.list(&scene.nodes, root.nodes.len(), |j| format!("scene_{}_node_{}", i, j));
    }
    v.optional(root.scene, root.scenes.len(), || "scene".to_string());
}

fn validate_materials(root: &Root, v: &mut Validator) {
    let textures = root.textures.len();
    for (i, material) in root.materials.iter().enumerate() {
        if let Some(pbr) = &material.pbr_metallic_roughness {
            if let Some(info) = &pbr.base_color_texture {
                v.index(info.index, textures, || format!("material_{}_basecolor_texture", i));
            }
            if let Some(info) = &pbr.metallic_roughness_texture {
                v.index(info.index, textures, || {
                    format!("material_{}_metallicroughness_texture", i)
                });
            }
        }
        if let Some(info) = &material.normal_texture {
            v.index(info.index, textures, || format!("material_{}_normal_texture", i));
        }
        if let Some(info) = &material.occlusion_texture {
            v.index(info.index, textures, || format!("material_{}_occlusion_texture", i));
        }
        if let Some(info) = &material.emissive_texture {
            v.index(info.index, textures, || format!("material_{}_emissive_texture", i));
        }
        v.checked_opt(&material.alpha_mode, || format!("material_{}_alphaMode", i));
    }
}

fn validate_textures(root: &Root, v: &mut Validator) {
    for (i, texture) in root.textures.iter().enumerate() {
        v.optional(texture.sampler, root.samplers.len(), || format!("texture_{}_sampler", i));
        v.optional(texture.source, root.images.len(), || format!("texture_{}_image", i));
    }
    for (i, sampler) in root.samplers.iter().enumerate() {
        v.checked_opt(&sampler.mag_filter, || format!("sampler_{}_magFilter", i));
        v.checked_opt(&sampler.min_filter, || format!("sampler_{}_minFilter", i));
        v.checked_opt(&sampler.wrap_s, || format!("sampler_{}_wrapS", i));
        v.checked_opt(&sampler.wrap_t, || format!("sampler_{}_wrapT", i));
    }
}

fn validate_images(root: &Root, v: &mut Validator) {
    for (i, image) in root.images.iter().enumerate() {
        v.optional(image.buffer_view, root.buffer_views.len(), || {
            format!("image_{}_bufferview", i)
        });
    }
}

fn validate_animations(root: &Root, v: &mut Validator) {
    for (i, animation) in root.animations.iter().enumerate() {
        for (j, channel) in animation.channels.iter().enumerate() {
            v.index(channel.sampler, animation.samplers.len(), || {
                format!("animation_{}_channel_{}_sampler", i, j)
            });
            v.optional(channel.target.node, root.nodes.len(), || {
                format!("animation_{}_channel_{}_target_node", i, j)
            });
            v.checked(&channel.target.path, || {
                format!("animation_{}_channel_{}_target_path", i, j)
            });
        }
        for (j, sampler) in animation.samplers.iter().enumerate() {
            v.index(sampler.input, root.accessors.len(), || {
                format!("animation_{}_sampler_{}_input_accessor", i, j)
            });
            v.index(sampler.output, root.accessors.len(), || {
                format!("animation_{}_sampler_{}_output_accessor", i, j)
            });
            v.checked(&sampler.interpolation, || {
                format!("animation_{}_sampler_{}_interpolation", i, j)
            });
        }
    }
}

fn validate_cameras(root: &Root, v: &mut Validator) {
    for (i, camera) in root.cameras.iter().enumerate() {
        v.checked(&camera.type_, || format!("camera_{}_type", i));
    }
}
