//! The gallery catalog: an ordered, read-only mapping from shader id to
//! `ShaderDefinition`. Registration happens once through `RegistryBuilder`
//! (built-ins first, then shader packs in the order their roots are given);
//! the built `ShaderRegistry` exposes lookups only, so no entry is replaced or
//! removed after start-up.
//!
//! Types:
//!
//! - `CatalogError` covers unknown ids, duplicate registration, pack failures,
//!   and control edits against a definition.
//! - `ShaderEntry` is one `(id, definition)` row in display order.
//! - `RegistryBuilder` accumulates entries and rejects id clashes.
//! - `ShaderRegistry` answers `get`, `list`, and fallback lookups.
//!
//! Functions:
//!
//! - `builtin_registry` returns the process-wide registry of shipped shaders,
//!   constructed on first use.
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use thiserror::Error;
use tracing::{debug, warn};
use uniforms::BindError;

use crate::builtin::builtin_shaders;
use crate::definition::ShaderDefinition;
use crate::pack::{discover_packs, LocalPack, PackError};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown shader id '{0}'")]
    UnknownShaderId(String),

    #[error("shader id '{0}' is already registered")]
    DuplicateShaderId(String),

    #[error("shader '{shader}' has no uniform '{key}'")]
    UnknownUniform { shader: String, key: String },

    #[error("failed to load shader pack at {path}: {source}")]
    Pack {
        path: PathBuf,
        #[source]
        source: PackError,
    },

    #[error(transparent)]
    Bind(#[from] BindError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShaderEntry {
    pub id: String,
    pub definition: ShaderDefinition,
}

#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: Vec<ShaderEntry>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins(mut self) -> Self {
        for (id, definition) in builtin_shaders() {
            self.entries.push(ShaderEntry {
                id: id.to_string(),
                definition,
            });
        }
        self
    }

    pub fn register(
        &mut self,
        id: impl Into<String>,
        definition: ShaderDefinition,
    ) -> Result<&mut Self, CatalogError> {
        let id = id.into();
        if self.entries.iter().any(|entry| entry.id == id) {
            return Err(CatalogError::DuplicateShaderId(id));
        }
        debug!(shader = %id, uniforms = definition.len(), "registering shader");
        self.entries.push(ShaderEntry { id, definition });
        Ok(self)
    }

    pub fn load_pack(&mut self, path: &Path) -> Result<&mut Self, CatalogError> {
        let pack = LocalPack::load(path).map_err(|source| CatalogError::Pack {
            path: path.to_path_buf(),
            source,
        })?;
        self.register(pack.id(), pack.to_definition())
    }

    /// Registers every pack found directly under `root`, in sorted order.
    pub fn load_pack_root(&mut self, root: &Path) -> Result<&mut Self, CatalogError> {
        let packs = discover_packs(root).map_err(|source| CatalogError::Pack {
            path: root.to_path_buf(),
            source,
        })?;
        for path in packs {
            self.load_pack(&path)?;
        }
        Ok(self)
    }

    pub fn build(self) -> ShaderRegistry {
        ShaderRegistry {
            entries: self.entries,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShaderRegistry {
    entries: Vec<ShaderEntry>,
}

impl ShaderRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn with_builtins() -> Self {
        RegistryBuilder::new().with_builtins().build()
    }

    pub fn get(&self, id: &str) -> Result<&ShaderDefinition, CatalogError> {
        self.entry(id).map(|entry| &entry.definition)
    }

    /// Entries in registration order, which is also the gallery display order.
    pub fn list(&self) -> &[ShaderEntry] {
        &self.entries
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up `requested`, falling back to `fallback` when it is absent or
    /// unknown. Fails only when the fallback itself is not registered.
    pub fn get_or_fallback(
        &self,
        requested: Option<&str>,
        fallback: &str,
    ) -> Result<&ShaderEntry, CatalogError> {
        if let Some(id) = requested {
            match self.entry(id) {
                Ok(entry) => return Ok(entry),
                Err(err) => warn!(error = %err, fallback, "falling back to default shader"),
            }
        }
        self.entry(fallback)
    }

    fn entry(&self, id: &str) -> Result<&ShaderEntry, CatalogError> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .ok_or_else(|| CatalogError::UnknownShaderId(id.to_string()))
    }

    /// Content issues per shader id; shaders without issues are omitted.
    pub fn validate(&self) -> Vec<(String, Vec<String>)> {
        self.entries
            .iter()
            .filter_map(|entry| {
                let issues = entry.definition.validate();
                (!issues.is_empty()).then(|| (entry.id.clone(), issues))
            })
            .collect()
    }
}

pub fn builtin_registry() -> &'static ShaderRegistry {
    static REGISTRY: OnceLock<ShaderRegistry> = OnceLock::new();
    REGISTRY.get_or_init(ShaderRegistry::with_builtins)
}
