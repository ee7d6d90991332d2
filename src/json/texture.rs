use serde::{Deserialize, Serialize};

use crate::json::{BufferView, Checked, Index};

wire_enum! {
    pub enum MagFilter: u32 {
        Nearest = 9728,
        Linear = 9729,
    }
}

wire_enum! {
    pub enum MinFilter: u32 {
        Nearest = 9728,
        Linear = 9729,
        NearestMipmapNearest = 9984,
        LinearMipmapNearest = 9985,
        NearestMipmapLinear = 9986,
        LinearMipmapLinear = 9987,
    }
}

wire_enum! {
    pub enum WrappingMode: u32 {
        ClampToEdge = 33071,
        MirroredRepeat = 33648,
        Repeat = 10497,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sampler {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mag_filter: Option<Checked<MagFilter>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_filter: Option<Checked<MinFilter>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrap_s: Option<Checked<WrappingMode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrap_t: Option<Checked<WrappingMode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Texture {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampler: Option<Index<Sampler>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Index<Image>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Image data, either behind a URI or inside a buffer view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer_view: Option<Index<BufferView>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
