//! Wave configuration and wave-height evaluators.
//!
//! This module provides:
//! - Packed wave parameters and the shader-style time vector
//! - A named parameter store with handles resolved once at setup
//! - The evaluator trait shared by the CPU reference and the GPU kernel

pub mod cpu;
pub mod evaluator;
pub mod material;
pub mod params;

pub use cpu::{wave_displacement, CpuBatch, CpuWaveEvaluator};
pub use evaluator::{
    BatchResource, DynamicBatch, DynamicEvaluator, EvaluatorError, WaveHeightEvaluate,
};
pub use material::{MissingWaveParameter, WaveMaterial, WaveParamHandle};
pub use params::{ShaderTime, WaveContext, WavesPacked};
