use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Knobs for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterOptions {
    /// Write a single binary `.glb` container.
    pub glb: bool,
    /// Write the binary buffer to a `.bin` file beside the `.gltf`.
    pub separate_binary: bool,
    /// Copy textures beside the output instead of embedding them.
    pub separate_textures: bool,
    pub generator: Option<String>,
    pub copyright: Option<String>,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            glb: false,
            separate_binary: false,
            separate_textures: true,
            generator: Some(concat!("obj2gltf ", env!("CARGO_PKG_VERSION")).to_string()),
            copyright: None,
        }
    }
}

impl ConverterOptions {
    /// A GLB carries everything in one file, so nothing is separated.
    pub fn normalized(mut self) -> Self {
        if self.glb {
            self.separate_binary = false;
            self.separate_textures = false;
        }
        self
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let options: Self = serde_yaml::from_str(yaml).context("failed to parse converter options")?;
        Ok(options.normalized())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_yaml_str(&contents).with_context(|| format!("in {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = ConverterOptions::default();
        assert!(!options.glb);
        assert!(!options.separate_binary);
        assert!(options.separate_textures);
        assert!(options.generator.unwrap().starts_with("obj2gltf"));
    }

    #[test]
    fn glb_forces_everything_inline() {
        let options = ConverterOptions {
            glb: true,
            separate_binary: true,
            ..ConverterOptions::default()
        }
        .normalized();
        assert!(!options.separate_binary);
        assert!(!options.separate_textures);
    }

    #[test]
    fn reads_yaml() {
        let options = ConverterOptions::from_yaml_str("separate_binary: true\ncopyright: me\n").unwrap();
        assert!(options.separate_binary);
        assert!(options.separate_textures);
        assert_eq!(options.copyright.as_deref(), Some("me"));

        let options = ConverterOptions::from_yaml_str("glb: true\nseparate_textures: true\n").unwrap();
        assert!(!options.separate_textures);

        assert!(ConverterOptions::from_yaml_str("glb: [1, 2]\n").is_err());
    }
}
