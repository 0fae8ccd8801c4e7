//! Named vector-parameter store for wave configuration.
//!
//! Hosts keep the live wave vector here under a parameter name. The name is
//! resolved once into a [`WaveParamHandle`]; per-tick reads go through the
//! handle and never touch the string again.

use std::collections::HashMap;

use super::params::WavesPacked;

/// Error returned when a wave parameter cannot be resolved.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Wave material has no vector parameter named \"{0}\"")]
pub struct MissingWaveParameter(pub String);

/// Resolved index of a vector parameter inside a [`WaveMaterial`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WaveParamHandle(usize);

impl WaveParamHandle {
    /// Look up `name` once. Fails if the material has no such parameter.
    pub fn resolve(material: &WaveMaterial, name: &str) -> Result<Self, MissingWaveParameter> {
        material
            .index
            .get(name)
            .copied()
            .map(WaveParamHandle)
            .ok_or_else(|| MissingWaveParameter(name.to_string()))
    }
}

/// Vector parameters the wave shader and the sampler both read.
#[derive(Debug, Clone, Default)]
pub struct WaveMaterial {
    values: Vec<WavesPacked>,
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl WaveMaterial {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`WaveMaterial::set_vector`].
    pub fn with_vector(mut self, name: &str, value: WavesPacked) -> Self {
        self.set_vector(name, value);
        self
    }

    /// Insert or overwrite a named parameter and return its handle.
    pub fn set_vector(&mut self, name: &str, value: WavesPacked) -> WaveParamHandle {
        if let Some(&i) = self.index.get(name) {
            self.values[i] = value;
            return WaveParamHandle(i);
        }
        let i = self.values.len();
        self.values.push(value);
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), i);
        WaveParamHandle(i)
    }

    pub fn has_vector(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Read a parameter through a previously resolved handle.
    pub fn waves(&self, handle: WaveParamHandle) -> WavesPacked {
        self.values[handle.0]
    }

    /// Overwrite a parameter through a previously resolved handle.
    pub fn set_waves(&mut self, handle: WaveParamHandle, value: WavesPacked) {
        self.values[handle.0] = value;
    }

    pub fn name_of(&self, handle: WaveParamHandle) -> &str {
        &self.names[handle.0]
    }
}
