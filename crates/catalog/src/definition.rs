use uniforms::{uniform_identifier, UniformSpec};

use crate::glsl::{declared_uniforms, glsl_type_for};

/// A shader's literal source paired with its ordered, typed parameters.
///
/// Keys are logical names; the renderer-facing identifier is the key with the
/// `u_` prefix (see `uniforms::uniform_identifier`).
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderDefinition {
    title: String,
    source: String,
    uniforms: Vec<(String, UniformSpec)>,
}

impl ShaderDefinition {
    pub fn new<K: Into<String>>(
        title: impl Into<String>,
        source: impl Into<String>,
        uniforms: impl IntoIterator<Item = (K, UniformSpec)>,
    ) -> Self {
        Self {
            title: title.into(),
            source: source.into(),
            uniforms: uniforms
                .into_iter()
                .map(|(key, spec)| (key.into(), spec))
                .collect(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn uniforms(&self) -> impl Iterator<Item = (&str, &UniformSpec)> {
        self.uniforms.iter().map(|(key, spec)| (key.as_str(), spec))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.uniforms.iter().map(|(key, _)| key.as_str())
    }

    pub fn uniform(&self, key: &str) -> Option<&UniformSpec> {
        self.uniforms
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, spec)| spec)
    }

    pub fn len(&self) -> usize {
        self.uniforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uniforms.is_empty()
    }

    /// Lists content problems: per-spec issues, duplicate keys, and parameters
    /// the source does not declare with a matching GLSL type.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let declared = declared_uniforms(&self.source);
        for (index, (key, spec)) in self.uniforms.iter().enumerate() {
            if self.uniforms[..index].iter().any(|(earlier, _)| earlier == key) {
                issues.push(format!("uniform '{key}' is declared more than once"));
            }
            for issue in spec.issues() {
                issues.push(format!("uniform '{key}': {issue}"));
            }

            let identifier = uniform_identifier(key);
            let expected = glsl_type_for(spec.kind());
            match declared.iter().find(|d| d.identifier == identifier) {
                None => issues.push(format!(
                    "uniform '{key}' has no `uniform {expected} {identifier};` declaration in the source"
                )),
                Some(found) if found.glsl_type != expected => issues.push(format!(
                    "uniform '{key}' is a {} parameter but the source declares `{} {identifier}`",
                    spec.kind(),
                    found.glsl_type
                )),
                Some(_) => {}
            }
        }
        issues
    }
}
