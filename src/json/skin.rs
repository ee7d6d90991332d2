use serde::{Deserialize, Serialize};

use crate::json::{Accessor, Index, Node};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skin {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inverse_bind_matrices: Option<Index<Accessor>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub joints: Vec<Option<Index<Node>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skeleton: Option<Index<Node>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
