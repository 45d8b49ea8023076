use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::value::UniformValue;

/// Prefix joining a logical parameter key to the identifier declared in GLSL.
pub const UNIFORM_PREFIX: &str = "u_";

pub fn uniform_identifier(key: &str) -> String {
    format!("{UNIFORM_PREFIX}{key}")
}

/// Implemented by the host renderer; receives one call per uniform.
pub trait UniformSink {
    fn set_uniform(&mut self, identifier: &str, value: UniformValue);
}

/// Flat identifier -> value mapping handed to the renderer, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UniformFrame {
    entries: Vec<(String, UniformValue)>,
}

impl UniformFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the value for `identifier`, keeping its original
    /// position when replacing.
    pub fn insert(&mut self, identifier: impl Into<String>, value: UniformValue) {
        let identifier = identifier.into();
        match self.entries.iter_mut().find(|(name, _)| *name == identifier) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((identifier, value)),
        }
    }

    pub fn get(&self, identifier: &str) -> Option<UniformValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == identifier)
            .map(|(_, value)| *value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, UniformValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn apply(&self, sink: &mut dyn UniformSink) {
        for (identifier, value) in &self.entries {
            sink.set_uniform(identifier, *value);
        }
    }
}

impl Serialize for UniformFrame {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (identifier, value) in &self.entries {
            map.serialize_entry(identifier, value)?;
        }
        map.end()
    }
}

/// Per-frame inputs every gallery shader declares alongside its own parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostInputs {
    pub resolution: [f32; 2],
    pub mouse: [f32; 2],
    pub time: f32,
}

impl HostInputs {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            resolution: [width, height],
            mouse: [0.0, 0.0],
            time: 0.0,
        }
    }

    pub fn write_to(&self, frame: &mut UniformFrame) {
        frame.insert(uniform_identifier("resolution"), UniformValue::Vec2(self.resolution));
        frame.insert(uniform_identifier("mouse"), UniformValue::Vec2(self.mouse));
        frame.insert(uniform_identifier("time"), UniformValue::Float(self.time));
    }
}
