//! Minimal scan of `uniform` declarations in fragment shader source, enough to
//! cross-check a definition's parameters against what the GLSL actually reads.
use uniforms::UniformKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredUniform {
    pub identifier: String,
    pub glsl_type: String,
}

const PRECISION_QUALIFIERS: [&str; 3] = ["lowp", "mediump", "highp"];

pub fn declared_uniforms(source: &str) -> Vec<DeclaredUniform> {
    let mut declared = Vec::new();
    for line in source.lines() {
        let line = line.split("//").next().unwrap_or_default().trim();
        let Some(rest) = line.strip_prefix("uniform ") else {
            continue;
        };
        let Some((declaration, _)) = rest.split_once(';') else {
            continue;
        };
        let mut tokens = declaration
            .split_whitespace()
            .filter(|token| !PRECISION_QUALIFIERS.contains(token));
        let Some(glsl_type) = tokens.next() else {
            continue;
        };
        let names = tokens.collect::<Vec<_>>().join(" ");
        for name in names.split(',') {
            let name = name.trim();
            if !name.is_empty() {
                declared.push(DeclaredUniform {
                    identifier: name.to_string(),
                    glsl_type: glsl_type.to_string(),
                });
            }
        }
    }
    declared
}

pub fn glsl_type_for(kind: UniformKind) -> &'static str {
    match kind {
        UniformKind::Float => "float",
        UniformKind::Int => "int",
        UniformKind::Vector2 => "vec2",
        UniformKind::Vector3 => "vec3",
    }
}
