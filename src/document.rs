//! Reading and writing whole documents: `.gltf` (with an inline or sidecar
//! buffer) and `.glb`.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::glb::{self, Glb};
use crate::json::Root;
use crate::uri::{self, UriKind, OCTET_STREAM};

pub fn to_string(root: &Root) -> Result<String> {
    Ok(root.to_string_pretty()?)
}

pub fn from_str(text: &str) -> Result<Root> {
    Ok(text.parse()?)
}

/// Parse either container, picked by the leading magic.
pub fn from_slice(bytes: &[u8]) -> Result<Root> {
    if glb::is_glb(bytes) {
        Glb::from_slice(bytes)?.into_root()
    } else {
        Ok(Root::from_slice(bytes)?)
    }
}

pub fn read(path: &Path) -> Result<Root> {
    from_slice(&fs::read(path)?)
}

/// Write `root` as JSON. `blob` is the content of the first buffer; it is
/// inlined as a `data:` URI or, with `separate_binary`, written beside the
/// document as `<stem>.bin`.
pub fn write_gltf(path: &Path, root: &Root, blob: &[u8], separate_binary: bool) -> Result<()> {
    let mut root = root.clone();
    if let Some(buffer) = root.buffers.first_mut() {
        if !blob.is_empty() {
            buffer.uri = Some(if separate_binary {
                let name = bin_file_name(path);
                let bin_path = path.with_file_name(&name);
                fs::write(&bin_path, blob)?;
                debug!("wrote {} ({} bytes)", bin_path.display(), blob.len());
                name
            } else {
                uri::encode_data_uri(OCTET_STREAM, blob)
            });
        }
    }
    fs::write(path, to_string(&root)?)?;
    Ok(())
}

fn bin_file_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "buffer".to_string());
    format!("{}.bin", stem)
}

/// Write `root` and `blob` as one binary container.
pub fn write_glb(path: &Path, root: &Root, blob: &[u8]) -> Result<()> {
    let mut root = root.clone();
    let bin = if blob.is_empty() {
        None
    } else {
        if let Some(buffer) = root.buffers.first_mut() {
            buffer.uri = None;
        }
        Some(blob.to_vec())
    };
    fs::write(path, Glb::from_root(&root, bin)?.to_vec())?;
    Ok(())
}

/// The bytes of every buffer. Relative URIs resolve against `base_dir`.
pub fn load_buffers(root: &Root, base_dir: &Path) -> Result<Vec<Vec<u8>>> {
    root.buffers
        .iter()
        .map(|buffer| {
            let uri = buffer.uri.as_deref().ok_or(Error::MissingBlob)?;
            match uri::classify(uri) {
                UriKind::Data { .. } => uri::decode_data_uri(uri),
                UriKind::Relative(_) => Ok(fs::read(uri::join(base_dir, uri)?)?),
                UriKind::Absolute(_) => Err(Error::Uri(uri.to_string())),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::json::Buffer;

    fn root_with_buffer(len: usize) -> Root {
        let mut root = Root::default();
        root.buffers.push(Buffer {
            byte_length: len,
            ..Buffer::default()
        });
        root
    }

    #[test]
    fn gltf_with_inline_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.gltf");
        write_gltf(&path, &root_with_buffer(3), &[1, 2, 3], false).unwrap();

        let root = read(&path).unwrap();
        assert!(root.buffers[0].uri.as_deref().unwrap().starts_with("data:"));
        assert_eq!(load_buffers(&root, dir.path()).unwrap(), vec![vec![1, 2, 3]]);
    }

    #[test]
    fn gltf_with_sidecar_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.gltf");
        write_gltf(&path, &root_with_buffer(3), &[1, 2, 3], true).unwrap();

        let root = read(&path).unwrap();
        assert_eq!(root.buffers[0].uri.as_deref(), Some("model.bin"));
        assert_eq!(fs::read(dir.path().join("model.bin")).unwrap(), vec![1, 2, 3]);
        assert_eq!(load_buffers(&root, dir.path()).unwrap(), vec![vec![1, 2, 3]]);
    }

    #[test]
    fn glb_is_sniffed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.gltf");
        write_glb(&path, &root_with_buffer(5), &[1, 2, 3, 4, 5]).unwrap();

        let root = read(&path).unwrap();
        assert_eq!(load_buffers(&root, dir.path()).unwrap(), vec![vec![1, 2, 3, 4, 5]]);
    }

    #[test]
    fn unresolvable_buffers() {
        let mut root = root_with_buffer(1);
        assert_eq!(
            load_buffers(&root, Path::new(".")).unwrap_err().kind(),
            ErrorKind::MissingBlob
        );
        root.buffers[0].uri = Some("https://example.com/a.bin".to_string());
        assert_eq!(load_buffers(&root, Path::new(".")).unwrap_err().kind(), ErrorKind::Uri);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(from_str("{").unwrap_err().kind(), ErrorKind::Parse);
        assert_eq!(from_slice(b"glTF\x01").unwrap_err().kind(), ErrorKind::Glb);
    }
}
