//! Water System Core
//!
//! Wave-field sampling and buoyancy integration for floating bodies.
//!
//! # Features
//!
//! - Projection of world points onto a still-water plane
//! - Batched wave-height sampling with a single synchronous round-trip per call
//! - GPU evaluation via a wgpu compute shader, with a CPU reference fallback
//! - Point and three-anchor surface buoyancy with exponential pose smoothing
//! - JSON scene configuration and an explicit per-tick simulation driver

pub mod buoyancy;
pub mod geometry;
pub mod gpu;
pub mod sampler;
pub mod simulation;
pub mod waves;

// Re-export commonly used types
pub use buoyancy::{BuoyModel, BuoyType, BuoyancyConfig, BuoyancyError, BuoyancyIntegrator};
pub use geometry::{PlaneError, Pose, StillWaterPlane};
pub use gpu::{GpuContext, GpuError, GpuWaveEvaluator};
pub use sampler::{PlanarContext, SamplerError, SamplerStats, WaveFieldSampler};
pub use simulation::{
    BodyConfig, EvaluatorKind, SimulationConfig, SimulationError, TickContext, WaterSimulation,
};
pub use waves::{
    BatchResource, CpuWaveEvaluator, DynamicEvaluator, EvaluatorError, ShaderTime, WaveContext,
    WaveHeightEvaluate, WaveMaterial, WaveParamHandle, WavesPacked,
};
