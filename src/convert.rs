//! The OBJ to glTF pipeline.
//!
//! Every group becomes one mesh, and each run of polygons sharing a material
//! inside a group becomes one primitive of that mesh. Primitive geometry is
//! built in parallel and then packed into a single buffer.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::dedup::{GeometryBuilder, PrimitiveGeometry};
use crate::document;
use crate::error::{Error, Result};
use crate::json::mesh::Attributes;
use crate::json::{
    Checked, Index, Material, Mesh, Node, Primitive, Root, Scene, Semantic, ValidationError,
};
use crate::lexer::ParseError;
use crate::material::{convert_material, without_base_color_texture};
use crate::mtl::{load_mtl, MtlLibrary};
use crate::obj::{load_obj, ObjModel};
use crate::options::ConverterOptions;
use crate::packing;
use crate::textures::TextureResolver;
use crate::triangulation::triangulate;

/// A converted document and the contents of its first buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub root: Root,
    pub blob: Vec<u8>,
}

/// The polygons of one group that share a material.
struct PrimitiveJob {
    group: usize,
    material: Option<Index<Material>>,
    polygons: Vec<usize>,
}

fn build_geometry(model: &ObjModel, polygons: &[usize]) -> PrimitiveGeometry {
    let mut builder = GeometryBuilder::new(model);
    for &p in polygons {
        for triangle in triangulate(model, &model.polygons[p]) {
            builder.push_triangle(&triangle);
        }
    }
    builder.finish()
}

/// Build the document for `model`. Texture maps named by `libraries` go
/// through `textures`.
pub fn convert_model(
    model: &ObjModel,
    libraries: &[MtlLibrary],
    textures: &mut TextureResolver,
    options: &ConverterOptions,
) -> Result<Conversion> {
    let mut root = Root::default();
    root.asset.generator = options.generator.clone();
    root.asset.copyright = options.copyright.clone();

    let mut materials: HashMap<&str, Index<Material>> = HashMap::new();
    for library in libraries {
        for (name, mtl) in &library.materials {
            let material = convert_material(name, mtl, |file| textures.resolve(&mut root, file))?;
            materials.insert(name.as_str(), Index::push(&mut root.materials, material));
        }
    }
    info!(
        "{} materials, {} textures",
        root.materials.len(),
        root.textures.len()
    );

    let mut polygon_materials: Vec<Option<Index<Material>>> = vec![None; model.polygons.len()];
    for (name, spans) in model.materials.iter() {
        if name.is_empty() {
            continue;
        }
        let material = materials.get(name).copied();
        if material.is_none() {
            warn!("material `{}` is not defined by any material library", name);
        }
        for range in &spans.polygons {
            for slot in &mut polygon_materials[range.clone()] {
                *slot = material;
            }
        }
    }

    if !model.points.is_empty() || !model.lines.is_empty() {
        warn!(
            "skipping {} points and {} lines, only faces are converted",
            model.points.len(),
            model.lines.len()
        );
    }

    let mut jobs = Vec::new();
    for (group, (_, spans)) in model.groups.iter().enumerate() {
        let mut parts: Vec<(Option<Index<Material>>, Vec<usize>)> = Vec::new();
        for p in spans.polygons.iter().cloned().flatten() {
            let material = polygon_materials[p];
            match parts.iter_mut().find(|(m, _)| *m == material) {
                Some((_, polygons)) => polygons.push(p),
                None => parts.push((material, vec![p])),
            }
        }
        jobs.extend(parts.into_iter().map(|(material, polygons)| PrimitiveJob {
            group,
            material,
            polygons,
        }));
    }

    let geometries: Vec<PrimitiveGeometry> = jobs
        .par_iter()
        .map(|job| build_geometry(model, &job.polygons))
        .collect();
    let (jobs, geometries): (Vec<_>, Vec<_>) = jobs
        .into_iter()
        .zip(geometries)
        .filter(|(_, geometry)| !geometry.indices.is_empty())
        .unzip();

    let embedded = textures.take_embedded();
    let (accessors, blob) = packing::pack(&mut root, &geometries, &embedded);

    let group_names: Vec<&str> = model.groups.iter().map(|(name, _)| name).collect();
    let mut meshes: Vec<Option<Index<Mesh>>> = vec![None; group_names.len()];
    let mut untextured = HashMap::new();
    for ((job, geometry), accessors) in jobs.iter().zip(&geometries).zip(&accessors) {
        let mut attributes = Attributes::new();
        attributes.insert(Checked::Valid(Semantic::Positions), accessors.positions);
        if let Some(normals) = accessors.normals {
            attributes.insert(Checked::Valid(Semantic::Normals), normals);
        }
        if let Some(tex_coords) = accessors.tex_coords {
            attributes.insert(Checked::Valid(Semantic::TexCoords(0)), tex_coords);
        }

        let mut primitive = Primitive::new(attributes);
        primitive.indices = Some(accessors.indices);
        primitive.material = match job.material {
            Some(material) if accessors.tex_coords.is_none() => {
                Some(untextured_material(&mut root, &mut untextured, material))
            }
            material => material,
        };

        let mesh = match meshes[job.group] {
            Some(mesh) => mesh,
            None => {
                let mesh = Index::push(
                    &mut root.meshes,
                    Mesh {
                        name: Some(group_names[job.group].to_string()),
                        ..Mesh::default()
                    },
                );
                meshes[job.group] = Some(mesh);
                mesh
            }
        };
        debug!(
            "{}: {} vertices, {} triangles",
            group_names[job.group],
            geometry.vertex_count(),
            geometry.indices.len() / 3
        );
        root.meshes[mesh.value()].primitives.push(primitive);
    }

    let mut scene = Scene::default();
    for (i, mesh) in root.meshes.iter().enumerate() {
        let node = Node {
            mesh: Some(Index::new(i as u32)),
            name: mesh.name.clone(),
            ..Node::default()
        };
        scene.nodes.push(Some(Index::push(&mut root.nodes, node)));
    }
    root.scene = Some(Index::push(&mut root.scenes, scene));

    info!(
        "{} meshes, {} primitives, {} byte buffer",
        root.meshes.len(),
        accessors.len(),
        blob.len()
    );
    Ok(Conversion { root, blob })
}

/// Primitives without texture coordinates cannot sample a base-colour
/// texture; they get a copy of their material without one.
fn untextured_material(
    root: &mut Root,
    cache: &mut HashMap<Index<Material>, Index<Material>>,
    material: Index<Material>,
) -> Index<Material> {
    if let Some(&stripped) = cache.get(&material) {
        return stripped;
    }
    let stripped = match material
        .get(&root.materials)
        .and_then(without_base_color_texture)
    {
        Some(stripped) => stripped,
        None => return material,
    };
    let stripped = Index::push(&mut root.materials, stripped);
    cache.insert(material, stripped);
    stripped
}

/// Converts one OBJ file for one output path. Textures are resolved
/// relative to the OBJ and copied beside the output.
pub struct Converter {
    input: PathBuf,
    output: PathBuf,
    options: ConverterOptions,
}

fn parent_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new(""))
}

impl Converter {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, options: ConverterOptions) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            options: options.normalized(),
        }
    }

    pub fn options(&self) -> &ConverterOptions {
        &self.options
    }

    pub fn run(&self) -> Result<Conversion> {
        let model = load_obj(&self.input)?;
        info!(
            "read {}: {} positions, {} polygons, {} groups",
            self.input.display(),
            model.positions.len(),
            model.polygons.len(),
            model.groups.len()
        );

        let source_dir = parent_dir(&self.input);
        let mut libraries = Vec::with_capacity(model.material_libraries.len());
        for name in &model.material_libraries {
            let path = source_dir.join(name);
            match load_mtl(&path) {
                Ok(library) => libraries.push(library),
                Err(ParseError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                    return Err(Error::Uri(path.display().to_string()));
                }
                Err(e) => return Err(e.into()),
            }
        }

        let mut textures = if self.options.separate_textures {
            TextureResolver::copying(source_dir, parent_dir(&self.output))
        } else {
            TextureResolver::embedding(source_dir)
        };
        convert_model(&model, &libraries, &mut textures, &self.options)
    }

    pub fn write(&self, conversion: &Conversion) -> Result<()> {
        if self.options.glb {
            document::write_glb(&self.output, &conversion.root, &conversion.blob)
        } else {
            document::write_gltf(
                &self.output,
                &conversion.root,
                &conversion.blob,
                self.options.separate_binary,
            )
        }
    }
}

/// Convert `input` and write the result to `output`. Validation problems do
/// not stop the output from being written; they are returned instead.
pub fn convert_file(
    input: &Path,
    output: &Path,
    options: ConverterOptions,
) -> anyhow::Result<Vec<ValidationError>> {
    let converter = Converter::new(input, output, options);
    let conversion = converter
        .run()
        .with_context(|| format!("failed to convert {}", input.display()))?;
    converter
        .write(&conversion)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!("wrote {}", output.display());
    Ok(conversion.root.validate())
}
