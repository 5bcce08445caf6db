//! Everything the scene loads or generates before the first frame: texture
//! files, material presets and the primitive shape meshes.

pub mod material;
pub mod mesh;
pub mod texture;

pub use material::{Material, MaterialRegistry};
pub use mesh::{MeshData, MeshKind, ShapeMeshes};
pub use texture::{DecodedImage, TextureError, TextureRegistry, TextureUploader};
