use serde::{Deserialize, Serialize, Serializer};

use crate::json::{BufferView, Checked, Index};

wire_enum! {
    pub enum ComponentType: u32 {
        I8 = 5120,
        U8 = 5121,
        I16 = 5122,
        U16 = 5123,
        U32 = 5125,
        F32 = 5126,
    }
}

impl ComponentType {
    pub fn size(&self) -> usize {
        match self {
            ComponentType::I8 | ComponentType::U8 => 1,
            ComponentType::I16 | ComponentType::U16 => 2,
            ComponentType::U32 | ComponentType::F32 => 4,
        }
    }
}

wire_enum! {
    /// Shape of one accessor element.
    pub enum Type: str {
        Scalar = "SCALAR",
        Vec2 = "VEC2",
        Vec3 = "VEC3",
        Vec4 = "VEC4",
        Mat2 = "MAT2",
        Mat3 = "MAT3",
        Mat4 = "MAT4",
    }
}

impl Type {
    pub fn multiplicity(&self) -> usize {
        match self {
            Type::Scalar => 1,
            Type::Vec2 => 2,
            Type::Vec3 => 3,
            Type::Vec4 | Type::Mat2 => 4,
            Type::Mat3 => 9,
            Type::Mat4 => 16,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accessor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer_view: Option<Index<BufferView>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byte_offset: Option<usize>,
    pub component_type: Checked<ComponentType>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub normalized: bool,
    pub count: usize,
    #[serde(rename = "type")]
    pub type_: Checked<Type>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_compact"
    )]
    pub min: Option<Vec<f32>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_compact"
    )]
    pub max: Option<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sparse: Option<Sparse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Accessor {
    pub fn new(
        buffer_view: Index<BufferView>,
        byte_offset: usize,
        component_type: ComponentType,
        type_: Type,
        count: usize,
    ) -> Self {
        Self {
            buffer_view: Some(buffer_view),
            byte_offset: Some(byte_offset),
            component_type: Checked::Valid(component_type),
            normalized: false,
            count,
            type_: Checked::Valid(type_),
            min: None,
            max: None,
            sparse: None,
            name: None,
        }
    }

    pub fn with_bounds(mut self, min: &[f32], max: &[f32]) -> Self {
        self.min = Some(min.to_vec());
        self.max = Some(max.to_vec());
        self
    }

    /// Bytes per element, if both the component type and shape are known.
    pub fn element_size(&self) -> Option<usize> {
        let component_type = self.component_type.valid()?;
        let type_ = self.type_.valid()?;
        Some(component_type.size() * type_.multiplicity())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sparse {
    pub count: usize,
    pub indices: SparseIndices,
    pub values: SparseValues,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SparseIndices {
    pub buffer_view: Index<BufferView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byte_offset: Option<usize>,
    pub component_type: Checked<ComponentType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SparseValues {
    pub buffer_view: Index<BufferView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byte_offset: Option<usize>,
}

/// Write whole-number floats as JSON integers (`[0,1.5]`).
fn serialize_compact<S: Serializer>(values: &Option<Vec<f32>>, serializer: S) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeSeq;

    let values = match values {
        Some(values) => values,
        None => return serializer.serialize_none(),
    };
    let mut seq = serializer.serialize_seq(Some(values.len()))?;
    for &value in values {
        if value.fract() == 0.0 && value.abs() < 1e15 {
            seq.serialize_element(&(value as i64))?;
        } else {
            seq.serialize_element(&value)?;
        }
    }
    seq.end()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_written_compactly() {
        let accessor = Accessor::new(Index::new(0), 0, ComponentType::F32, Type::Vec3, 3)
            .with_bounds(&[0.0, -1.0, 0.5], &[1.0, 2.0, 1.5]);
        let json = serde_json::to_string(&accessor).unwrap();
        assert!(json.contains("\"min\":[0,-1,0.5]"), "{}", json);
        assert!(json.contains("\"max\":[1,2,1.5]"), "{}", json);
        assert!(json.contains("\"type\":\"VEC3\""));
        assert!(json.contains("\"componentType\":5126"));
        assert!(!json.contains("normalized"));

        let back: Accessor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, accessor);
    }

    #[test]
    fn element_size() {
        let accessor = Accessor::new(Index::new(0), 0, ComponentType::U16, Type::Scalar, 3);
        assert_eq!(accessor.element_size(), Some(2));
        let accessor = Accessor::new(Index::new(0), 0, ComponentType::F32, Type::Mat4, 1);
        assert_eq!(accessor.element_size(), Some(64));
    }
}
