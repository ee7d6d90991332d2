//! The binary glTF container: a 12-byte header, a JSON chunk and an
//! optional BIN chunk, all little-endian and 4-byte aligned.

use crate::error::{Error, ErrorRecord, Result};
use crate::json::Root;
use crate::uri::{self, OCTET_STREAM};

pub const MAGIC: u32 = 0x4654_6C67; // "glTF"
pub const VERSION: u32 = 2;
pub const CHUNK_JSON: u32 = 0x4E4F_534A; // "JSON"
pub const CHUNK_BIN: u32 = 0x004E_4942; // "BIN\0"

const HEADER_LEN: usize = 12;
const CHUNK_HEADER_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub magic: u32,
    pub version: u32,
    pub length: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glb {
    pub header: Header,
    pub json: Vec<u8>,
    pub bin: Option<Vec<u8>>,
}

fn padding(len: usize) -> usize {
    (4 - len % 4) % 4
}

/// Whether `bytes` start with the GLB magic.
pub fn is_glb(bytes: &[u8]) -> bool {
    read_u32(bytes, 0) == Some(MAGIC)
}

fn read_u32(bytes: &[u8], offset: usize) -> Option<u32> {
    let word = bytes.get(offset..offset + 4)?;
    Some(u32::from_le_bytes([word[0], word[1], word[2], word[3]]))
}

fn truncated() -> Error {
    Error::glb("Unexpected end of data")
}

impl Glb {
    pub fn new(json: Vec<u8>, bin: Option<Vec<u8>>) -> Self {
        let json_len = json.len() + padding(json.len());
        let bin_len = bin
            .as_ref()
            .map(|bin| CHUNK_HEADER_LEN + bin.len() + padding(bin.len()))
            .unwrap_or(0);
        Self {
            header: Header {
                magic: MAGIC,
                version: VERSION,
                length: (HEADER_LEN + CHUNK_HEADER_LEN + json_len + bin_len) as u32,
            },
            json,
            bin,
        }
    }

    /// Frame `root`, with `bin` as the payload of its first buffer.
    pub fn from_root(root: &Root, bin: Option<Vec<u8>>) -> Result<Self> {
        Ok(Self::new(root.to_vec()?, bin))
    }

    pub fn to_vec(&self) -> Vec<u8> {
        let mut glb = Vec::with_capacity(self.header.length as usize);

        glb.extend_from_slice(&self.header.magic.to_le_bytes());
        glb.extend_from_slice(&self.header.version.to_le_bytes());
        glb.extend_from_slice(&self.header.length.to_le_bytes());

        let json_padding = padding(self.json.len());
        glb.extend_from_slice(&((self.json.len() + json_padding) as u32).to_le_bytes());
        glb.extend_from_slice(&CHUNK_JSON.to_le_bytes());
        glb.extend_from_slice(&self.json);
        glb.resize(glb.len() + json_padding, b' ');

        if let Some(bin) = &self.bin {
            let bin_padding = padding(bin.len());
            glb.extend_from_slice(&((bin.len() + bin_padding) as u32).to_le_bytes());
            glb.extend_from_slice(&CHUNK_BIN.to_le_bytes());
            glb.extend_from_slice(bin);
            glb.resize(glb.len() + bin_padding, 0);
        }

        glb
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let header = Header {
            magic: read_u32(bytes, 0).ok_or_else(truncated)?,
            version: read_u32(bytes, 4).ok_or_else(truncated)?,
            length: read_u32(bytes, 8).ok_or_else(truncated)?,
        };

        let mut errors = Vec::new();
        if header.magic != MAGIC {
            errors.push(ErrorRecord::glb("Magic number not match"));
        }
        if header.version != VERSION {
            errors.push(ErrorRecord::glb("Version not match"));
        }
        if header.length == 0 {
            errors.push(ErrorRecord::glb("buffer length is zero"));
        }
        if !errors.is_empty() {
            return Err(Error::Glb(errors));
        }

        let length = header.length as usize;
        if length > bytes.len() {
            return Err(Error::glb(format!(
                "declared length {} exceeds the {} bytes available",
                length,
                bytes.len()
            )));
        }
        let bytes = &bytes[..length];

        let (json_type, json) = read_chunk(bytes, HEADER_LEN)?;
        if json_type != CHUNK_JSON {
            return Err(Error::glb("Missing Json Chunk"));
        }
        let json = json.to_vec();

        let mut bin = None;
        let offset = HEADER_LEN + CHUNK_HEADER_LEN + json.len();
        if offset < length {
            let (bin_type, data) = read_chunk(bytes, offset)?;
            if bin_type != CHUNK_BIN {
                return Err(Error::glb("Must be Bin Chunk after Json Chunk"));
            }
            bin = Some(data.to_vec());
        }

        Ok(Self { header, json, bin })
    }

    /// Decode the JSON chunk. The BIN chunk, if any, becomes an inline
    /// `data:` URI on the first buffer.
    pub fn into_root(self) -> Result<Root> {
        let mut root = Root::from_slice(&self.json)?;
        match (self.bin, root.buffers.first_mut()) {
            (Some(bin), Some(buffer)) if !bin.is_empty() => {
                let len = buffer.byte_length.min(bin.len());
                buffer.uri = Some(uri::encode_data_uri(OCTET_STREAM, &bin[..len]));
            }
            (_, Some(buffer)) if buffer.uri.is_none() => return Err(Error::MissingBlob),
            _ => {}
        }
        Ok(root)
    }
}

fn read_chunk(bytes: &[u8], offset: usize) -> Result<(u32, &[u8])> {
    let len = read_u32(bytes, offset).ok_or_else(truncated)? as usize;
    let kind = read_u32(bytes, offset + 4).ok_or_else(truncated)?;
    let start = offset + CHUNK_HEADER_LEN;
    let data = bytes.get(start..start + len).ok_or_else(truncated)?;
    Ok((kind, data))
}
