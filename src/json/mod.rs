//! The glTF 2.0 document model.
//!
//! Every cross reference is an [`Index`] tagged with the array it points
//! into, and every enumerated field is a [`Checked`] value so that unknown
//! values survive a read/write cycle. Nothing is validated on construction;
//! see [`validation`].

#[macro_use]
pub mod checked;

pub mod accessor;
pub mod animation;
pub mod buffer;
pub mod camera;
pub mod index;
pub mod material;
pub mod mesh;
pub mod root;
pub mod scene;
pub mod skin;
pub mod texture;
pub mod validation;

pub use accessor::{Accessor, ComponentType, Type};
pub use animation::Animation;
pub use buffer::{Buffer, BufferView, Target};
pub use camera::Camera;
pub use checked::{Checked, WireEnum};
pub use index::Index;
pub use material::{AlphaMode, Material, PbrMetallicRoughness, TextureInfo};
pub use mesh::{Mesh, Mode, Primitive, Semantic};
pub use root::{Asset, Root};
pub use scene::{Node, Scene};
pub use skin::Skin;
pub use texture::{Image, Sampler, Texture};
pub use validation::{ValidationError, ValidationErrorKind};
