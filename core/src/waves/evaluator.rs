//! Wave-height evaluator trait for CPU and GPU implementations.
//!
//! An evaluator takes a batch of points lying on the still-water plane and
//! replaces their Y with the displaced surface height. X and Z must come back
//! untouched. Every call is synchronous: when `evaluate` returns, the points
//! hold the final results.

use glam::Vec3;
use std::sync::Arc;
use wgpu::{Device, Queue};

use super::cpu::{CpuBatch, CpuWaveEvaluator};
use super::params::WaveContext;
use crate::gpu::compute::{GpuSampleBatch, GpuWaveEvaluator};

/// Errors that can occur while evaluating a batch.
#[derive(Debug, thiserror::Error)]
pub enum EvaluatorError {
    #[error("Batch capacity is {capacity} but {requested} points were submitted")]
    CapacityMismatch { capacity: usize, requested: usize },
    #[error("Cannot allocate or evaluate an empty batch")]
    EmptyBatch,
    #[error("Batch was allocated by a different evaluator backend")]
    BackendMismatch,
    #[error("GPU buffer mapping failed: {0}")]
    BufferMapFailed(String),
    #[error("GPU device poll failed: {0}")]
    DevicePoll(String),
}

/// A capacity-sized resource that backs one batch of samples.
///
/// Dropping it releases whatever it holds.
pub trait BatchResource {
    /// Number of points this resource was allocated for.
    fn capacity(&self) -> usize;

    /// Whether the resource can still be dispatched into.
    fn is_valid(&self) -> bool {
        true
    }
}

/// Trait for batched wave-height functions.
pub trait WaveHeightEvaluate {
    type Batch: BatchResource;

    /// Short backend name used in logs.
    fn name(&self) -> &'static str;

    /// Allocate a resource able to hold exactly `capacity` points.
    fn create_batch(&mut self, capacity: usize) -> Result<Self::Batch, EvaluatorError>;

    /// Displace `points` in place. `points.len()` must equal the batch capacity.
    fn evaluate(
        &mut self,
        batch: &mut Self::Batch,
        points: &mut [Vec3],
        ctx: &WaveContext,
    ) -> Result<(), EvaluatorError>;
}

/// Batch resource of a [`DynamicEvaluator`].
pub enum DynamicBatch {
    Cpu(CpuBatch),
    Gpu(GpuSampleBatch),
}

impl BatchResource for DynamicBatch {
    fn capacity(&self) -> usize {
        match self {
            DynamicBatch::Cpu(b) => b.capacity(),
            DynamicBatch::Gpu(b) => b.capacity(),
        }
    }

    fn is_valid(&self) -> bool {
        match self {
            DynamicBatch::Cpu(b) => b.is_valid(),
            DynamicBatch::Gpu(b) => b.is_valid(),
        }
    }
}

/// Enum to hold either CPU or GPU evaluator for runtime selection.
pub enum DynamicEvaluator {
    Cpu(CpuWaveEvaluator),
    Gpu(Box<GpuWaveEvaluator>),
}

impl DynamicEvaluator {
    /// Create a CPU-based evaluator.
    pub fn cpu() -> Self {
        DynamicEvaluator::Cpu(CpuWaveEvaluator::new())
    }

    /// Create a GPU-based evaluator.
    pub fn gpu(device: Arc<Device>, queue: Arc<Queue>) -> Self {
        DynamicEvaluator::Gpu(Box::new(GpuWaveEvaluator::new(device, queue)))
    }

    /// Use the GPU when a device is available, otherwise fall back to CPU.
    pub fn gpu_with_fallback(device: Option<Arc<Device>>, queue: Option<Arc<Queue>>) -> Self {
        match (device, queue) {
            (Some(device), Some(queue)) => Self::gpu(device, queue),
            _ => {
                log::info!("No GPU device available, evaluating waves on the CPU");
                Self::cpu()
            }
        }
    }

    /// Check if this evaluator is using the GPU.
    pub fn is_gpu(&self) -> bool {
        matches!(self, DynamicEvaluator::Gpu(_))
    }
}

impl WaveHeightEvaluate for DynamicEvaluator {
    type Batch = DynamicBatch;

    fn name(&self) -> &'static str {
        match self {
            DynamicEvaluator::Cpu(e) => e.name(),
            DynamicEvaluator::Gpu(e) => e.name(),
        }
    }

    fn create_batch(&mut self, capacity: usize) -> Result<DynamicBatch, EvaluatorError> {
        match self {
            DynamicEvaluator::Cpu(e) => e.create_batch(capacity).map(DynamicBatch::Cpu),
            DynamicEvaluator::Gpu(e) => e.create_batch(capacity).map(DynamicBatch::Gpu),
        }
    }

    fn evaluate(
        &mut self,
        batch: &mut DynamicBatch,
        points: &mut [Vec3],
        ctx: &WaveContext,
    ) -> Result<(), EvaluatorError> {
        match (self, batch) {
            (DynamicEvaluator::Cpu(e), DynamicBatch::Cpu(b)) => e.evaluate(b, points, ctx),
            (DynamicEvaluator::Gpu(e), DynamicBatch::Gpu(b)) => e.evaluate(b, points, ctx),
            _ => Err(EvaluatorError::BackendMismatch),
        }
    }
}
