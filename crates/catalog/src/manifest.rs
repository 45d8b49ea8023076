//! Defines the `shader.toml` schema for on-disk shader packs, giving `pack`
//! predictable metadata to turn into a `ShaderDefinition` that the registry can
//! list next to the built-in shaders.
//!
//! Types:
//!
//! - `ShaderPackManifest` captures the catalog id, display title, entry GLSL
//!   file, and the ordered list of tunable uniforms.
//! - `UniformEntry` pairs a logical key with its tagged `UniformSpec`; the spec
//!   fields sit flat in the same TOML table as the key.
//!
//! Functions:
//!
//! - `ShaderPackManifest::validate` returns human-readable issues so pack
//!   loaders can surface misconfigurations without panicking.
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uniforms::UniformSpec;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ShaderPackManifest {
    #[serde(default)]
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_entry")]
    pub entry: PathBuf,
    #[serde(default)]
    pub uniforms: Vec<UniformEntry>,
}

fn default_entry() -> PathBuf {
    PathBuf::from("shader.frag.glsl")
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct UniformEntry {
    pub key: String,
    #[serde(flatten)]
    pub spec: UniformSpec,
}

impl ShaderPackManifest {
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if let Some(id) = &self.id {
            if !is_kebab_case(id) {
                issues.push(format!("id '{id}' must be lowercase kebab-case"));
            }
        }
        if self.entry.as_os_str().is_empty() {
            issues.push("entry must name a GLSL file".to_string());
        }
        for (index, entry) in self.uniforms.iter().enumerate() {
            if entry.key.trim().is_empty() {
                issues.push(format!("uniform #{index} has an empty key"));
            } else if !entry
                .key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
            {
                issues.push(format!(
                    "uniform key '{}' is not a valid GLSL identifier suffix",
                    entry.key
                ));
            }
        }
        issues
    }
}

pub(crate) fn is_kebab_case(id: &str) -> bool {
    !id.is_empty()
        && !id.starts_with('-')
        && !id.ends_with('-')
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use uniforms::UniformKind;

    #[test]
    fn parses_uniform_tables_in_order() {
        let raw = r#"
            id = "ridged"
            name = "Ridged"

            [[uniforms]]
            key = "scale"
            name = "Scale"
            kind = "float"
            default = 2.0

            [[uniforms]]
            key = "octaves"
            name = "Octaves"
            kind = "int"
            default = 5
            min = 1
            max = 8
        "#;
        let manifest: ShaderPackManifest = toml::from_str(raw).expect("parse manifest");
        assert_eq!(manifest.entry, PathBuf::from("shader.frag.glsl"));
        let keys: Vec<_> = manifest.uniforms.iter().map(|u| u.key.as_str()).collect();
        assert_eq!(keys, ["scale", "octaves"]);
        assert_eq!(manifest.uniforms[1].spec.kind(), UniformKind::Int);
        assert!(manifest.validate().is_empty());
    }

    #[test]
    fn rejects_bad_ids_and_keys() {
        let raw = r#"
            id = "Not Kebab"

            [[uniforms]]
            key = "bad-key"
            name = "Bad"
            kind = "float"
            default = 0.0
        "#;
        let manifest: ShaderPackManifest = toml::from_str(raw).expect("parse manifest");
        let issues = manifest.validate();
        assert_eq!(issues.len(), 2);
    }
}
