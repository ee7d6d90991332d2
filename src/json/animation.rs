use serde::{Deserialize, Serialize};

use crate::json::{Accessor, Checked, Index, Node};

wire_enum! {
    /// Node property an animation channel drives.
    pub enum Property: str {
        Translation = "translation",
        Rotation = "rotation",
        Scale = "scale",
        MorphTargetWeights = "weights",
    }
}

wire_enum! {
    pub enum Interpolation: str {
        Linear = "LINEAR",
        Step = "STEP",
        CubicSpline = "CUBICSPLINE",
    }
}

fn default_interpolation() -> Checked<Interpolation> {
    Checked::Valid(Interpolation::Linear)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub channels: Vec<Channel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub samplers: Vec<Sampler>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    /// Index into the owning animation's samplers.
    pub sampler: Index<Sampler>,
    pub target: Target,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<Index<Node>>,
    pub path: Checked<Property>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sampler {
    pub input: Index<Accessor>,
    #[serde(default = "default_interpolation")]
    pub interpolation: Checked<Interpolation>,
    pub output: Index<Accessor>,
}
