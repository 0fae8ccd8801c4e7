//! Per-call wave parameters handed to an evaluator.
//!
//! Both structs are laid out as plain `vec4<f32>` so they can be written
//! straight into the sampling shader's uniform block.

use serde::{Deserialize, Serialize};

/// Packed wave configuration.
///
/// The sampler treats it as opaque. Evaluators read it as
/// `(amplitude, wavelength, direction in radians, speed)`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, bytemuck::Pod, bytemuck::Zeroable)]
#[serde(transparent)]
pub struct WavesPacked(pub [f32; 4]);

impl WavesPacked {
    pub const CALM: Self = Self([0.0, 1.0, 0.0, 1.0]);

    pub fn new(amplitude: f32, wavelength: f32, direction: f32, speed: f32) -> Self {
        Self([amplitude, wavelength, direction, speed])
    }

    pub fn amplitude(&self) -> f32 {
        self.0[0]
    }

    pub fn wavelength(&self) -> f32 {
        self.0[1]
    }

    /// Travel direction around world Y, in radians from +X toward +Z.
    pub fn direction(&self) -> f32 {
        self.0[2]
    }

    pub fn speed(&self) -> f32 {
        self.0[3]
    }
}

impl Default for WavesPacked {
    fn default() -> Self {
        Self::new(0.5, 12.0, 0.0, 1.0)
    }
}

impl From<[f32; 4]> for WavesPacked {
    fn from(v: [f32; 4]) -> Self {
        Self(v)
    }
}

/// Shader-style time vector: `(t / 20, t, 2t, 3t)`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShaderTime(pub [f32; 4]);

impl ShaderTime {
    pub fn from_seconds(t: f32) -> Self {
        Self([t / 20.0, t, t * 2.0, t * 3.0])
    }

    pub fn slow(&self) -> f32 {
        self.0[0]
    }

    pub fn seconds(&self) -> f32 {
        self.0[1]
    }

    pub fn double(&self) -> f32 {
        self.0[2]
    }

    pub fn triple(&self) -> f32 {
        self.0[3]
    }
}

/// Ambient inputs of one sample call.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WaveContext {
    pub waves: WavesPacked,
    pub time: ShaderTime,
}

impl WaveContext {
    pub fn new(waves: WavesPacked, seconds: f32) -> Self {
        Self {
            waves,
            time: ShaderTime::from_seconds(seconds),
        }
    }
}
