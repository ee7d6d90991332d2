//! Texture maps named by a material library, turned into glTF images.
//!
//! A map is either copied beside the output file and referenced by name, or
//! read into memory so its bytes can be packed into the binary buffer.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::Result;
use crate::json::texture::{MagFilter, MinFilter, WrappingMode};
use crate::json::{Checked, Image, Index, Root, Sampler, Texture};

/// Image bytes waiting for a buffer view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedImage {
    pub image: Index<Image>,
    pub bytes: Vec<u8>,
}

pub fn mime_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("png") => "image/png",
        _ => "image/jpeg",
    }
}

pub fn default_sampler() -> Sampler {
    Sampler {
        mag_filter: Some(Checked::Valid(MagFilter::Linear)),
        min_filter: Some(Checked::Valid(MinFilter::NearestMipmapLinear)),
        wrap_s: Some(Checked::Valid(WrappingMode::Repeat)),
        wrap_t: Some(Checked::Valid(WrappingMode::Repeat)),
        name: None,
    }
}

pub struct TextureResolver {
    source_dir: PathBuf,
    /// Where maps are copied to; `None` embeds them.
    output_dir: Option<PathBuf>,
    sampler: Option<Index<Sampler>>,
    by_path: HashMap<PathBuf, Index<Texture>>,
    copied: HashMap<String, PathBuf>,
    embedded: Vec<EmbeddedImage>,
}

impl TextureResolver {
    pub fn copying(source_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self::new(source_dir.into(), Some(output_dir.into()))
    }

    pub fn embedding(source_dir: impl Into<PathBuf>) -> Self {
        Self::new(source_dir.into(), None)
    }

    fn new(source_dir: PathBuf, output_dir: Option<PathBuf>) -> Self {
        Self {
            source_dir,
            output_dir,
            sampler: None,
            by_path: HashMap::new(),
            copied: HashMap::new(),
            embedded: Vec::new(),
        }
    }

    pub fn source_path(&self, file: &str) -> PathBuf {
        let path = Path::new(file);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.source_dir.join(path)
        }
    }

    /// Returns the texture for `file`, creating it on first use. A map whose
    /// file does not exist yields `None`.
    pub fn resolve(&mut self, root: &mut Root, file: &str) -> Result<Option<Index<Texture>>> {
        let path = self.source_path(file);
        if let Some(&texture) = self.by_path.get(&path) {
            return Ok(Some(texture));
        }
        if !path.is_file() {
            warn!("texture {} not found, skipping", path.display());
            return Ok(None);
        }

        let sampler = match self.sampler {
            Some(sampler) => sampler,
            None => {
                let sampler = Index::push(&mut root.samplers, default_sampler());
                self.sampler = Some(sampler);
                sampler
            }
        };

        let mut image = Image {
            mime_type: Some(mime_type(&path).to_string()),
            name: path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned()),
            ..Image::default()
        };
        let index = match self.output_dir.clone() {
            Some(output_dir) => {
                image.uri = Some(self.copy(&path, &output_dir)?);
                Index::push(&mut root.images, image)
            }
            None => {
                let bytes = fs::read(&path)?;
                debug!("embedding {} ({} bytes)", path.display(), bytes.len());
                let index = Index::push(&mut root.images, image);
                self.embedded.push(EmbeddedImage { image: index, bytes });
                index
            }
        };
        Ok(Some(self.add_texture(root, path, sampler, index)))
    }

    fn add_texture(
        &mut self,
        root: &mut Root,
        path: PathBuf,
        sampler: Index<Sampler>,
        image: Index<Image>,
    ) -> Index<Texture> {
        let texture = Index::push(
            &mut root.textures,
            Texture {
                sampler: Some(sampler),
                source: Some(image),
                name: None,
            },
        );
        self.by_path.insert(path, texture);
        texture
    }

    /// Copy `path` into `output_dir`, returning the relative URI. Distinct
    /// sources sharing a file name get a numeric suffix.
    fn copy(&mut self, path: &Path, output_dir: &Path) -> Result<String> {
        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "texture".to_string());
        let extension = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        let mut name = format!("{}{}", stem, extension);
        let mut n = 1;
        while let Some(existing) = self.copied.get(&name) {
            if existing == path {
                return Ok(name);
            }
            name = format!("{}_{}{}", stem, n, extension);
            n += 1;
        }

        let destination = output_dir.join(&name);
        if !same_file(path, &destination) {
            fs::create_dir_all(output_dir)?;
            fs::copy(path, &destination)?;
            debug!("copied {} to {}", path.display(), destination.display());
        }
        self.copied.insert(name.clone(), path.to_path_buf());
        Ok(name)
    }

    /// Image bytes read so far, in image order.
    pub fn take_embedded(&mut self) -> Vec<EmbeddedImage> {
        std::mem::take(&mut self.embedded)
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_types() {
        assert_eq!(mime_type(Path::new("a.png")), "image/png");
        assert_eq!(mime_type(Path::new("a.PNG")), "image/png");
        assert_eq!(mime_type(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(mime_type(Path::new("a.tga")), "image/jpeg");
        assert_eq!(mime_type(Path::new("a")), "image/jpeg");
    }

    #[test]
    fn missing_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let mut root = Root::default();
        let mut textures = TextureResolver::embedding(dir.path());
        assert_eq!(textures.resolve(&mut root, "nope.png").unwrap(), None);
        assert!(root.samplers.is_empty());
        assert!(root.textures.is_empty());
    }

    #[test]
    fn embeds_and_dedups() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("wood.png"), [1, 2, 3]).unwrap();
        fs::write(dir.path().join("rock.jpg"), [4, 5]).unwrap();

        let mut root = Root::default();
        let mut textures = TextureResolver::embedding(dir.path());
        let wood = textures.resolve(&mut root, "wood.png").unwrap();
        let rock = textures.resolve(&mut root, "rock.jpg").unwrap();
        let again = textures.resolve(&mut root, "wood.png").unwrap();

        assert_eq!(wood, Some(Index::new(0)));
        assert_eq!(rock, Some(Index::new(1)));
        assert_eq!(again, wood);
        assert_eq!(root.samplers, vec![default_sampler()]);
        assert_eq!(root.textures.len(), 2);
        assert_eq!(root.images[0].mime_type.as_deref(), Some("image/png"));
        assert_eq!(root.images[1].name.as_deref(), Some("rock"));
        assert!(root.images.iter().all(|image| image.uri.is_none()));

        let embedded = textures.take_embedded();
        assert_eq!(embedded.len(), 2);
        assert_eq!(embedded[0].bytes, vec![1, 2, 3]);
        assert_eq!(embedded[1].image, Index::new(1));
    }

    #[test]
    fn copies_beside_output() {
        let source = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        fs::create_dir(source.path().join("a")).unwrap();
        fs::create_dir(source.path().join("b")).unwrap();
        fs::write(source.path().join("a/skin.png"), [1]).unwrap();
        fs::write(source.path().join("b/skin.png"), [2]).unwrap();

        let mut root = Root::default();
        let mut textures = TextureResolver::copying(source.path(), output.path());
        textures.resolve(&mut root, "a/skin.png").unwrap();
        textures.resolve(&mut root, "b/skin.png").unwrap();

        assert_eq!(root.images[0].uri.as_deref(), Some("skin.png"));
        assert_eq!(root.images[1].uri.as_deref(), Some("skin_1.png"));
        assert_eq!(fs::read(output.path().join("skin.png")).unwrap(), vec![1]);
        assert_eq!(fs::read(output.path().join("skin_1.png")).unwrap(), vec![2]);
        assert!(textures.take_embedded().is_empty());
    }
}
