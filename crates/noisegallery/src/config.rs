use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use catalog::DEFAULT_SHADER_ID;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GalleryConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    /// Shader shown when the location names none, or an unknown one.
    #[serde(default = "default_shader")]
    pub default_shader: String,
    /// Query key holding the selected shader id.
    #[serde(default = "default_shader_field")]
    pub shader_field: String,
    /// Extra shader pack roots, registered after the standard ones.
    #[serde(default)]
    pub pack_dirs: Vec<PathBuf>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            default_shader: default_shader(),
            shader_field: default_shader_field(),
            pack_dirs: Vec::new(),
        }
    }
}

fn default_version() -> u32 {
    1
}

fn default_shader() -> String {
    DEFAULT_SHADER_ID.to_string()
}

fn default_shader_field() -> String {
    "shader".to_string()
}

impl GalleryConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let raw: GalleryConfig = toml::from_str(input)?;
        raw.validate()?;
        Ok(raw)
    }

    /// Reads `path`, or returns defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no gallery config; using defaults");
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read gallery config at {}", path.display()))?;
        let config = Self::from_toml_str(&contents)
            .with_context(|| format!("failed to load gallery config at {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != 1 {
            return Err(ConfigError::Invalid(format!(
                "unsupported config version {}; expected 1",
                self.version
            )));
        }
        if self.default_shader.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "default_shader must not be empty".into(),
            ));
        }
        if self.shader_field.trim().is_empty() {
            return Err(ConfigError::Invalid("shader_field must not be empty".into()));
        }
        Ok(())
    }
}
