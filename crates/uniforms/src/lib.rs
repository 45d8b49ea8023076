mod binder;
mod frame;
mod spec;
mod value;

pub use binder::{
    default_raw_value, describe_control, to_uniform, BindError, ControlDescriptor, ControlShape,
    NumericInput, DEFAULT_FLOAT_STEP, DEFAULT_INT_STEP,
};
pub use frame::{uniform_identifier, HostInputs, UniformFrame, UniformSink, UNIFORM_PREFIX};
pub use spec::{ScalarParams, UniformKind, UniformParams, UniformSpec};
pub use value::{RawValue, UniformValue};
