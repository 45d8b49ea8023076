use std::fmt;

use serde::{Deserialize, Serialize};

use crate::spec::UniformKind;

/// Value as held by a UI control, before any divider is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Scalar(f64),
    Pair([f64; 2]),
    Triple([f64; 3]),
}

impl RawValue {
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Pair(_) => "pair",
            Self::Triple(_) => "triple",
        }
    }

    /// Parses the textual form written by `Display`: a number, or
    /// comma-separated components for vector kinds.
    pub fn parse(kind: UniformKind, input: &str) -> Option<Self> {
        let components = input
            .split(',')
            .map(|part| part.trim().parse::<f64>().ok().filter(|v| v.is_finite()))
            .collect::<Option<Vec<_>>>()?;
        match (kind, components.as_slice()) {
            (UniformKind::Float | UniformKind::Int, [value]) => Some(Self::Scalar(*value)),
            (UniformKind::Vector2, [x, y]) => Some(Self::Pair([*x, *y])),
            (UniformKind::Vector3, [x, y, z]) => Some(Self::Triple([*x, *y, *z])),
            _ => None,
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(value) => write!(f, "{value}"),
            Self::Pair([x, y]) => write!(f, "{x},{y}"),
            Self::Triple([x, y, z]) => write!(f, "{x},{y},{z}"),
        }
    }
}

/// Shader-ready value handed across the renderer boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum UniformValue {
    Float(f32),
    Int(i32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
}

impl UniformValue {
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Self::Float(value) => Some(*value),
            Self::Int(value) => Some(*value as f32),
            Self::Vec2(_) | Self::Vec3(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_by_kind() {
        assert_eq!(
            RawValue::parse(UniformKind::Float, "0.75"),
            Some(RawValue::Scalar(0.75))
        );
        assert_eq!(
            RawValue::parse(UniformKind::Vector2, "10, -4.5"),
            Some(RawValue::Pair([10.0, -4.5]))
        );
        assert_eq!(RawValue::parse(UniformKind::Vector2, "10"), None);
        assert_eq!(RawValue::parse(UniformKind::Int, "abc"), None);
        assert_eq!(RawValue::parse(UniformKind::Float, "NaN"), None);
    }

    #[test]
    fn display_matches_parse_format() {
        let value = RawValue::Triple([1.0, 2.5, -3.0]);
        assert_eq!(value.to_string(), "1,2.5,-3");
        assert_eq!(
            RawValue::parse(UniformKind::Vector3, &value.to_string()),
            Some(value)
        );
    }

    #[test]
    fn uniform_values_serialize_flat() {
        let json = serde_json::to_string(&UniformValue::Vec2([1.0, 2.0])).unwrap();
        assert_eq!(json, "[1.0,2.0]");
        let json = serde_json::to_string(&UniformValue::Int(4)).unwrap();
        assert_eq!(json, "4");
    }
}
