use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::json::{Accessor, Checked, Index, Material, WireEnum};

wire_enum! {
    /// Topology of a primitive.
    pub enum Mode: u32 {
        Points = 0,
        Lines = 1,
        LineLoop = 2,
        LineStrip = 3,
        Triangles = 4,
        TriangleStrip = 5,
        TriangleFan = 6,
    }
}

/// Vertex attribute names. Application-specific names start with `_`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Semantic {
    Positions,
    Normals,
    Tangents,
    Colors(u32),
    TexCoords(u32),
    Joints(u32),
    Weights(u32),
    Extras(String),
}

impl WireEnum for Semantic {
    type Wire = String;

    fn from_wire(wire: &String) -> Option<Self> {
        let set = |prefix: &str| -> Option<u32> { wire.strip_prefix(prefix)?.parse().ok() };
        match wire.as_str() {
            "POSITION" => Some(Semantic::Positions),
            "NORMAL" => Some(Semantic::Normals),
            "TANGENT" => Some(Semantic::Tangents),
            s if s.starts_with('_') => Some(Semantic::Extras(s[1..].to_string())),
            _ => set("COLOR_")
                .map(Semantic::Colors)
                .or_else(|| set("TEXCOORD_").map(Semantic::TexCoords))
                .or_else(|| set("JOINTS_").map(Semantic::Joints))
                .or_else(|| set("WEIGHTS_").map(Semantic::Weights)),
        }
    }

    fn to_wire(&self) -> String {
        match self {
            Semantic::Positions => "POSITION".to_string(),
            Semantic::Normals => "NORMAL".to_string(),
            Semantic::Tangents => "TANGENT".to_string(),
            Semantic::Colors(n) => format!("COLOR_{}", n),
            Semantic::TexCoords(n) => format!("TEXCOORD_{}", n),
            Semantic::Joints(n) => format!("JOINTS_{}", n),
            Semantic::Weights(n) => format!("WEIGHTS_{}", n),
            Semantic::Extras(name) => format!("_{}", name),
        }
    }
}

pub type Attributes = BTreeMap<Checked<Semantic>, Index<Accessor>>;

fn default_mode() -> Checked<Mode> {
    Checked::Valid(Mode::Triangles)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    pub attributes: Attributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indices: Option<Index<Accessor>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<Index<Material>>,
    #[serde(default = "default_mode")]
    pub mode: Checked<Mode>,
    /// Morph targets.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<Attributes>,
}

impl Primitive {
    pub fn new(attributes: Attributes) -> Self {
        Self {
            attributes,
            indices: None,
            material: None,
            mode: default_mode(),
            targets: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub primitives: Vec<Primitive>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weights: Vec<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semantic_names() {
        for name in ["POSITION", "NORMAL", "TEXCOORD_0", "TEXCOORD_12", "COLOR_1", "_BATCHID"] {
            let semantic = Checked::<Semantic>::from_wire(name.to_string());
            assert!(semantic.is_valid(), "{}", name);
            assert_eq!(semantic.wire(), name);
        }
        assert_eq!(
            Checked::<Semantic>::from_wire("TEXCOORD_0".to_string()),
            Checked::Valid(Semantic::TexCoords(0))
        );
        assert!(!Checked::<Semantic>::from_wire("TEXCOORD_X".to_string()).is_valid());
        assert!(!Checked::<Semantic>::from_wire("BOGUS".to_string()).is_valid());
    }

    #[test]
    fn primitive_json() {
        let mut attributes = Attributes::new();
        attributes.insert(Checked::Valid(Semantic::Positions), Index::new(0));
        attributes.insert(Checked::Valid(Semantic::TexCoords(0)), Index::new(1));
        let mut primitive = Primitive::new(attributes);
        primitive.indices = Some(Index::new(2));
        let json = serde_json::to_string(&primitive).unwrap();
        assert_eq!(
            json,
            r#"{"attributes":{"POSITION":0,"TEXCOORD_0":1},"indices":2,"mode":4}"#
        );
    }

    #[test]
    fn unknown_mode_is_preserved() {
        let primitive: Primitive =
            serde_json::from_str(r#"{"attributes":{"POSITION":0},"mode":99}"#).unwrap();
        assert_eq!(primitive.mode, Checked::Invalid(99));
        let json = serde_json::to_string(&primitive).unwrap();
        assert!(json.contains("\"mode\":99"));
    }

    #[test]
    fn missing_mode_defaults_to_triangles() {
        let primitive: Primitive = serde_json::from_str(r#"{"attributes":{}}"#).unwrap();
        assert_eq!(primitive.mode, Checked::Valid(Mode::Triangles));
    }
}
