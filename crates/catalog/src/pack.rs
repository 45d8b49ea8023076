//! Wraps a shader pack directory so the registry can load a manifest, read the
//! entry GLSL, and turn both into a `ShaderDefinition`. Filesystem validation
//! stays here; the registry only decides registration order and id clashes.
//!
//! Types:
//!
//! - `PackError` classifies manifest parsing, validation, and I/O failures.
//! - `LocalPack` stores the resolved root directory, parsed
//!   `ShaderPackManifest`, and the entry source text.
//!
//! Functions:
//!
//! - `LocalPack::load` reads `shader.toml`, validates it, and reads the entry
//!   GLSL file.
//! - `LocalPack::id` derives the catalog id from the manifest or the directory
//!   name.
//! - `discover_packs` lists pack directories under a search root in a stable
//!   (sorted) order.
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::definition::ShaderDefinition;
use crate::manifest::{is_kebab_case, ShaderPackManifest};

pub const MANIFEST_FILE: &str = "shader.toml";

#[derive(Debug, Error)]
pub enum PackError {
    #[error("manifest not found at {0}")]
    ManifestMissing(PathBuf),

    #[error("failed to parse manifest: {0}")]
    ManifestParse(#[from] toml::de::Error),

    #[error("manifest validation failed: {0:?}")]
    ManifestValidation(Vec<String>),

    #[error("entry shader source missing at {0}")]
    SourceMissing(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct LocalPack {
    root: PathBuf,
    manifest: ShaderPackManifest,
    source: String,
}

impl LocalPack {
    pub fn load(root: impl AsRef<Path>) -> Result<Self, PackError> {
        let root = root.as_ref().to_path_buf();
        let manifest_path = root.join(MANIFEST_FILE);
        if !manifest_path.exists() {
            return Err(PackError::ManifestMissing(manifest_path));
        }

        let manifest_raw = fs::read_to_string(&manifest_path)?;
        let manifest: ShaderPackManifest = toml::from_str(&manifest_raw)?;
        let mut issues = manifest.validate();
        if manifest.id.is_none() && !is_kebab_case(&directory_name(&root)) {
            issues.push(format!(
                "directory name '{}' is not a kebab-case id; set `id` in {MANIFEST_FILE}",
                directory_name(&root)
            ));
        }
        if !issues.is_empty() {
            return Err(PackError::ManifestValidation(issues));
        }

        let source_path = root.join(&manifest.entry);
        if !source_path.exists() {
            return Err(PackError::SourceMissing(source_path));
        }
        let source = fs::read_to_string(&source_path)?;
        debug!(pack = %root.display(), entry = %source_path.display(), "loaded shader pack");

        Ok(Self {
            root,
            manifest,
            source,
        })
    }

    pub fn root(&self) -> &Path {
        self.root.as_path()
    }

    pub fn manifest(&self) -> &ShaderPackManifest {
        &self.manifest
    }

    pub fn id(&self) -> String {
        self.manifest
            .id
            .clone()
            .unwrap_or_else(|| directory_name(&self.root))
    }

    pub fn to_definition(&self) -> ShaderDefinition {
        let title = self.manifest.name.clone().unwrap_or_else(|| self.id());
        ShaderDefinition::new(
            title,
            self.source.clone(),
            self.manifest
                .uniforms
                .iter()
                .map(|entry| (entry.key.clone(), entry.spec.clone())),
        )
    }
}

fn directory_name(root: &Path) -> String {
    root.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Lists directories directly under `search_root` that hold a manifest,
/// sorted by path so registration order never depends on directory iteration.
pub fn discover_packs(search_root: &Path) -> Result<Vec<PathBuf>, PackError> {
    if !search_root.is_dir() {
        debug!(root = %search_root.display(), "shader pack root missing; skipping");
        return Ok(Vec::new());
    }
    let mut found = Vec::new();
    for entry in fs::read_dir(search_root)? {
        let path = entry?.path();
        if path.is_dir() && path.join(MANIFEST_FILE).exists() {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}
