use serde::{Deserialize, Serialize};

use crate::json::{Checked, Index};

wire_enum! {
    /// GPU binding hint of a buffer view.
    pub enum Target: u32 {
        ArrayBuffer = 34962,
        ElementArrayBuffer = 34963,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buffer {
    pub byte_length: usize,
    /// Absent for the binary chunk of a GLB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferView {
    pub buffer: Index<Buffer>,
    pub byte_length: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byte_offset: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byte_stride: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Checked<Target>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl BufferView {
    pub fn new(buffer: Index<Buffer>, byte_offset: usize, byte_length: usize) -> Self {
        Self {
            buffer,
            byte_length,
            byte_offset: Some(byte_offset),
            byte_stride: None,
            target: None,
            name: None,
        }
    }

    pub fn offset(&self) -> usize {
        self.byte_offset.unwrap_or(0)
    }
}
