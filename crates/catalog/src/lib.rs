mod builtin;
mod controls;
mod definition;
mod glsl;
mod manifest;
mod pack;
mod registry;

pub use builtin::DEFAULT_SHADER_ID;
pub use controls::ControlPanel;
pub use definition::ShaderDefinition;
pub use glsl::{declared_uniforms, glsl_type_for, DeclaredUniform};
pub use manifest::{ShaderPackManifest, UniformEntry};
pub use pack::{discover_packs, LocalPack, PackError, MANIFEST_FILE};
pub use registry::{builtin_registry, CatalogError, RegistryBuilder, ShaderEntry, ShaderRegistry};
