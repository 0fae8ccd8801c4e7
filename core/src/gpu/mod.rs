//! GPU compute using wgpu.
//!
//! Provides a headless device context and the compute-shader
//! implementation of the wave-height evaluator.

pub mod compute;
pub mod context;

pub use compute::{GpuSampleBatch, GpuWaveEvaluator};
pub use context::{GpuContext, GpuError};
