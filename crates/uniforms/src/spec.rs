//! Declarative descriptors for the tunable parameters a noise shader exposes.
//!
//! Types:
//!
//! - `UniformKind` is the closed set of value shapes a parameter can take.
//! - `ScalarParams` carries the default, bounds, slider step, and divider shared
//!   by `Float` and `Int` parameters.
//! - `UniformParams` is the tagged payload selected by kind; manifests spell the
//!   tag as `kind = "float"` and friends.
//! - `UniformSpec` pairs a human-readable label with its `UniformParams`.
//!
//! Functions:
//!
//! - `UniformSpec::issues` reports content problems (inverted bounds, defaults
//!   outside their range, fractional integers) without rejecting the spec, so
//!   catalog validation can list every problem at once.
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UniformKind {
    Float,
    Int,
    Vector2,
    Vector3,
}

impl UniformKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Int => "int",
            Self::Vector2 => "vector2",
            Self::Vector3 => "vector3",
        }
    }
}

impl fmt::Display for UniformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarParams {
    pub default: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub divider: Option<f64>,
}

impl ScalarParams {
    pub fn new(default: f64) -> Self {
        Self {
            default,
            step: None,
            min: None,
            max: None,
            divider: None,
        }
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn with_range(self, min: f64, max: f64) -> Self {
        self.with_min(min).with_max(max)
    }

    pub fn with_divider(mut self, divider: f64) -> Self {
        self.divider = Some(divider);
        self
    }

    /// Divider applied on the way into the renderer. A zero divider is a
    /// content bug reported by `issues`; it is treated as 1 here.
    pub fn effective_divider(&self) -> f64 {
        match self.divider {
            Some(divider) if divider != 0.0 && divider.is_finite() => divider,
            _ => 1.0,
        }
    }

    fn issues(&self, integral: bool) -> Vec<String> {
        let mut issues = Vec::new();
        if !self.default.is_finite() {
            issues.push(format!("default {} is not finite", self.default));
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                issues.push(format!("min {min} exceeds max {max}"));
            } else if self.default < min || self.default > max {
                issues.push(format!(
                    "default {} lies outside [{min}, {max}]",
                    self.default
                ));
            }
        }
        if let Some(step) = self.step {
            if step <= 0.0 || !step.is_finite() {
                issues.push(format!("step {step} must be positive"));
            }
        }
        if let Some(divider) = self.divider {
            if divider == 0.0 || !divider.is_finite() {
                issues.push(format!("divider {divider} must be finite and non-zero"));
            }
        }
        if integral {
            let fields = [
                ("default", Some(self.default)),
                ("step", self.step),
                ("min", self.min),
                ("max", self.max),
            ];
            for (field, value) in fields {
                if let Some(value) = value {
                    if value.fract() != 0.0 {
                        issues.push(format!("{field} {value} is not integral"));
                    }
                }
            }
        }
        issues
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum UniformParams {
    Float(ScalarParams),
    Int(ScalarParams),
    Vector2 { default: [f64; 2] },
    Vector3 { default: [f64; 3] },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniformSpec {
    pub name: String,
    #[serde(flatten)]
    pub params: UniformParams,
}

impl UniformSpec {
    pub fn float(name: impl Into<String>, params: ScalarParams) -> Self {
        Self {
            name: name.into(),
            params: UniformParams::Float(params),
        }
    }

    pub fn int(name: impl Into<String>, params: ScalarParams) -> Self {
        Self {
            name: name.into(),
            params: UniformParams::Int(params),
        }
    }

    pub fn vector2(name: impl Into<String>, default: [f64; 2]) -> Self {
        Self {
            name: name.into(),
            params: UniformParams::Vector2 { default },
        }
    }

    pub fn vector3(name: impl Into<String>, default: [f64; 3]) -> Self {
        Self {
            name: name.into(),
            params: UniformParams::Vector3 { default },
        }
    }

    pub fn kind(&self) -> UniformKind {
        match &self.params {
            UniformParams::Float(_) => UniformKind::Float,
            UniformParams::Int(_) => UniformKind::Int,
            UniformParams::Vector2 { .. } => UniformKind::Vector2,
            UniformParams::Vector3 { .. } => UniformKind::Vector3,
        }
    }

    /// Scalar payload for `Float` and `Int` parameters.
    pub fn scalar(&self) -> Option<&ScalarParams> {
        match &self.params {
            UniformParams::Float(params) | UniformParams::Int(params) => Some(params),
            UniformParams::Vector2 { .. } | UniformParams::Vector3 { .. } => None,
        }
    }

    pub fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if self.name.trim().is_empty() {
            issues.push("name must not be empty".to_string());
        }
        match &self.params {
            UniformParams::Float(params) => issues.extend(params.issues(false)),
            UniformParams::Int(params) => issues.extend(params.issues(true)),
            UniformParams::Vector2 { default } => {
                if default.iter().any(|value| !value.is_finite()) {
                    issues.push(format!("default {default:?} is not finite"));
                }
            }
            UniformParams::Vector3 { default } => {
                if default.iter().any(|value| !value.is_finite()) {
                    issues.push(format!("default {default:?} is not finite"));
                }
            }
        }
        issues
    }
}
