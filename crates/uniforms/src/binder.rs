//! Bridges a `UniformSpec` to the UI control that edits it and to the value the
//! renderer receives.
//!
//! The divider only applies on the way into the renderer. Controls always show
//! and store the raw value, so `default_raw_value` never divides.
use serde::Serialize;
use thiserror::Error;

use crate::spec::{ScalarParams, UniformKind, UniformParams, UniformSpec};
use crate::value::{RawValue, UniformValue};

/// Step used for `Float` controls and vector components when none is declared.
pub const DEFAULT_FLOAT_STEP: f64 = 0.01;
/// Step used for `Int` controls when none is declared.
pub const DEFAULT_INT_STEP: f64 = 1.0;

#[derive(Debug, Error, PartialEq)]
pub enum BindError {
    #[error("uniform '{name}' expects a {expected} value but received a {received}")]
    InvalidValueKind {
        name: String,
        expected: UniformKind,
        received: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub step: f64,
    pub integral: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "control", rename_all = "lowercase")]
pub enum ControlShape {
    /// Bounded scalar; rendered as a slider.
    Slider(NumericInput),
    /// Scalar with at least one open bound; rendered as a number input.
    Input(NumericInput),
    /// One unbounded input per vector component.
    Group { components: Vec<NumericInput> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlDescriptor {
    pub label: String,
    pub kind: UniformKind,
    #[serde(flatten)]
    pub shape: ControlShape,
}

pub fn describe_control(spec: &UniformSpec) -> ControlDescriptor {
    let shape = match &spec.params {
        UniformParams::Float(params) => scalar_shape(params, false),
        UniformParams::Int(params) => scalar_shape(params, true),
        UniformParams::Vector2 { .. } => vector_shape(2),
        UniformParams::Vector3 { .. } => vector_shape(3),
    };
    ControlDescriptor {
        label: spec.name.clone(),
        kind: spec.kind(),
        shape,
    }
}

fn scalar_shape(params: &ScalarParams, integral: bool) -> ControlShape {
    let fallback = if integral {
        DEFAULT_INT_STEP
    } else {
        DEFAULT_FLOAT_STEP
    };
    let input = NumericInput {
        min: params.min,
        max: params.max,
        step: params.step.unwrap_or(fallback),
        integral,
    };
    if input.min.is_some() && input.max.is_some() {
        ControlShape::Slider(input)
    } else {
        ControlShape::Input(input)
    }
}

fn vector_shape(arity: usize) -> ControlShape {
    let component = NumericInput {
        min: None,
        max: None,
        step: DEFAULT_FLOAT_STEP,
        integral: false,
    };
    ControlShape::Group {
        components: vec![component; arity],
    }
}

pub fn default_raw_value(spec: &UniformSpec) -> RawValue {
    match &spec.params {
        UniformParams::Float(params) | UniformParams::Int(params) => {
            RawValue::Scalar(params.default)
        }
        UniformParams::Vector2 { default } => RawValue::Pair(*default),
        UniformParams::Vector3 { default } => RawValue::Triple(*default),
    }
}

/// Converts a control's raw value into the value sent to the renderer.
///
/// Scalars are divided by the spec's divider; `Int` results are rounded to the
/// nearest integer. Vector components pass through unchanged.
pub fn to_uniform(spec: &UniformSpec, raw: RawValue) -> Result<UniformValue, BindError> {
    match (&spec.params, raw) {
        (UniformParams::Float(params), RawValue::Scalar(value)) => {
            Ok(UniformValue::Float((value / params.effective_divider()) as f32))
        }
        (UniformParams::Int(params), RawValue::Scalar(value)) => {
            let scaled = (value / params.effective_divider()).round();
            Ok(UniformValue::Int(scaled as i32))
        }
        (UniformParams::Vector2 { .. }, RawValue::Pair([x, y])) => {
            Ok(UniformValue::Vec2([x as f32, y as f32]))
        }
        (UniformParams::Vector3 { .. }, RawValue::Triple([x, y, z])) => {
            Ok(UniformValue::Vec3([x as f32, y as f32, z as f32]))
        }
        (_, raw) => Err(BindError::InvalidValueKind {
            name: spec.name.clone(),
            expected: spec.kind(),
            received: raw.shape(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amplitude() -> UniformSpec {
        UniformSpec::float(
            "Amplitude",
            ScalarParams::new(50.0)
                .with_range(-100.0, 100.0)
                .with_step(1.0)
                .with_divider(100.0),
        )
    }

    #[test]
    fn bounded_float_becomes_slider() {
        let descriptor = describe_control(&amplitude());
        assert_eq!(descriptor.label, "Amplitude");
        match descriptor.shape {
            ControlShape::Slider(input) => {
                assert_eq!(input.min, Some(-100.0));
                assert_eq!(input.max, Some(100.0));
                assert_eq!(input.step, 1.0);
                assert!(!input.integral);
            }
            other => panic!("expected slider, got {other:?}"),
        }
    }

    #[test]
    fn missing_steps_fall_back_per_kind() {
        let scale = UniformSpec::float("Scale", ScalarParams::new(1.0));
        let octaves = UniformSpec::int("Octaves", ScalarParams::new(4.0).with_min(1.0));
        assert!(matches!(
            describe_control(&scale).shape,
            ControlShape::Input(NumericInput { step, .. }) if step == DEFAULT_FLOAT_STEP
        ));
        assert!(matches!(
            describe_control(&octaves).shape,
            ControlShape::Input(NumericInput { step, integral: true, .. }) if step == DEFAULT_INT_STEP
        ));
    }

    #[test]
    fn vectors_become_fixed_arity_groups() {
        let position = UniformSpec::vector3("Offset", [0.0, 0.0, 0.0]);
        match describe_control(&position).shape {
            ControlShape::Group { components } => {
                assert_eq!(components.len(), 3);
                assert!(components.iter().all(|c| c.min.is_none() && c.max.is_none()));
            }
            other => panic!("expected group, got {other:?}"),
        }
    }

    #[test]
    fn default_raw_value_is_not_divided() {
        assert_eq!(default_raw_value(&amplitude()), RawValue::Scalar(50.0));
    }

    #[test]
    fn divider_scales_and_reverses() {
        let spec = amplitude();
        let raw = default_raw_value(&spec);
        let value = to_uniform(&spec, raw).unwrap().as_f32().unwrap();
        assert!((value - 0.5).abs() < 1e-6);
        assert!((f64::from(value) * 100.0 - 50.0).abs() < 1e-4);
    }

    #[test]
    fn int_results_are_rounded() {
        let spec = UniformSpec::int("Octaves", ScalarParams::new(4.0).with_range(1.0, 7.0));
        for step in 0..=60 {
            let raw = 1.0 + f64::from(step) * 0.1;
            match to_uniform(&spec, RawValue::Scalar(raw)).unwrap() {
                UniformValue::Int(value) => assert_eq!(value, raw.round() as i32),
                other => panic!("expected int, got {other:?}"),
            }
        }
        let halved = UniformSpec::int("Mode", ScalarParams::new(0.0).with_divider(2.0));
        assert_eq!(
            to_uniform(&halved, RawValue::Scalar(7.0)).unwrap(),
            UniformValue::Int(4)
        );
    }

    #[test]
    fn vectors_pass_through() {
        let spec = UniformSpec::vector2("Position", [0.0, 0.0]);
        assert_eq!(
            to_uniform(&spec, RawValue::Pair([12.0, -3.5])).unwrap(),
            UniformValue::Vec2([12.0, -3.5])
        );
    }

    #[test]
    fn mismatched_shapes_are_rejected() {
        let spec = UniformSpec::vector2("Position", [0.0, 0.0]);
        let err = to_uniform(&spec, RawValue::Scalar(1.0)).unwrap_err();
        assert_eq!(
            err,
            BindError::InvalidValueKind {
                name: "Position".into(),
                expected: UniformKind::Vector2,
                received: "scalar",
            }
        );
        assert!(to_uniform(&amplitude(), RawValue::Triple([0.0; 3])).is_err());
    }
}
