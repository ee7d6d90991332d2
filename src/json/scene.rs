use serde::{Deserialize, Serialize};

use crate::json::{Camera, Index, Mesh, Skin};

/// A scene-graph node. Reference lists hold `None` where the document has a
/// `null`, which validation reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<Index<Camera>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Option<Index<Node>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin: Option<Index<Skin>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrix: Option<[f32; 16]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh: Option<Index<Mesh>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<[f32; 4]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<[f32; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<[f32; 3]>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weights: Vec<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<Option<Index<Node>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_children_survive() {
        let node: Node = serde_json::from_str(r#"{"children":[1,null,3],"mesh":0}"#).unwrap();
        assert_eq!(node.children, vec![Some(Index::new(1)), None, Some(Index::new(3))]);
        assert_eq!(
            serde_json::to_string(&node).unwrap(),
            r#"{"children":[1,null,3],"mesh":0}"#
        );
    }

    #[test]
    fn empty_lists_are_omitted() {
        let scene = Scene::default();
        assert_eq!(serde_json::to_string(&scene).unwrap(), "{}");
    }
}
