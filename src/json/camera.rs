use serde::{Deserialize, Serialize};

use crate::json::Checked;

wire_enum! {
    pub enum CameraType: str {
        Perspective = "perspective",
        Orthographic = "orthographic",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    #[serde(rename = "type")]
    pub type_: Checked<CameraType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perspective: Option<Perspective>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orthographic: Option<Orthographic>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Perspective {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<f32>,
    pub yfov: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zfar: Option<f32>,
    pub znear: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Orthographic {
    pub xmag: f32,
    pub ymag: f32,
    pub zfar: f32,
    pub znear: f32,
}
