//! Convert WaveFront OBJ/MTL models to glTF 2.0, as `.gltf` or `.glb`.

pub mod convert;
pub mod dedup;
pub mod document;
pub mod earcut;
pub mod error;
pub mod geometry;
pub mod glb;
pub mod json;
pub mod lexer;
pub mod material;
pub mod mtl;
pub mod obj;
pub mod options;
pub mod packing;
pub mod textures;
pub mod triangulation;
pub mod uri;

pub use convert::{convert_file, Conversion, Converter};
pub use error::{Error, ErrorKind, Result};
pub use options::ConverterOptions;
