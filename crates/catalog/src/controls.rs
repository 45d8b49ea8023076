use uniforms::{
    default_raw_value, describe_control, to_uniform, uniform_identifier, ControlDescriptor,
    HostInputs, RawValue, UniformFrame,
};

use crate::definition::ShaderDefinition;
use crate::registry::CatalogError;

/// Live control state for one shader: the raw value behind each UI control.
#[derive(Debug, Clone)]
pub struct ControlPanel<'a> {
    shader: &'a str,
    definition: &'a ShaderDefinition,
    values: Vec<RawValue>,
}

impl<'a> ControlPanel<'a> {
    pub fn new(shader: &'a str, definition: &'a ShaderDefinition) -> Self {
        let values = definition
            .uniforms()
            .map(|(_, spec)| default_raw_value(spec))
            .collect();
        Self {
            shader,
            definition,
            values,
        }
    }

    pub fn shader(&self) -> &'a str {
        self.shader
    }

    pub fn definition(&self) -> &'a ShaderDefinition {
        self.definition
    }

    pub fn descriptors(&self) -> Vec<(&'a str, ControlDescriptor)> {
        self.definition
            .uniforms()
            .map(|(key, spec)| (key, describe_control(spec)))
            .collect()
    }

    pub fn raw(&self, key: &str) -> Option<RawValue> {
        self.position(key).map(|index| self.values[index])
    }

    pub fn values(&self) -> impl Iterator<Item = (&'a str, RawValue)> + '_ {
        self.definition.keys().zip(self.values.iter().copied())
    }

    /// Replaces the raw value for `key`. The value is checked against the
    /// spec's kind before it is stored.
    pub fn edit(&mut self, key: &str, raw: RawValue) -> Result<(), CatalogError> {
        let (index, spec) = self
            .definition
            .uniforms()
            .enumerate()
            .find_map(|(index, (candidate, spec))| (candidate == key).then_some((index, spec)))
            .ok_or_else(|| CatalogError::UnknownUniform {
                shader: self.shader.to_string(),
                key: key.to_string(),
            })?;
        to_uniform(spec, raw)?;
        self.values[index] = raw;
        Ok(())
    }

    pub fn reset(&mut self) {
        for ((_, spec), slot) in self.definition.uniforms().zip(self.values.iter_mut()) {
            *slot = default_raw_value(spec);
        }
    }

    /// Builds the flat uniform map for the renderer, host inputs first.
    pub fn frame(&self, host: Option<&HostInputs>) -> Result<UniformFrame, CatalogError> {
        let mut frame = UniformFrame::new();
        if let Some(host) = host {
            host.write_to(&mut frame);
        }
        for ((key, spec), raw) in self.definition.uniforms().zip(self.values.iter()) {
            frame.insert(uniform_identifier(key), to_uniform(spec, *raw)?);
        }
        Ok(frame)
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.definition.keys().position(|candidate| candidate == key)
    }
}
