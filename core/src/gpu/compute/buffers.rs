//! GPU buffer management for wave sampling.

use wgpu::{Buffer, BufferUsages, Device};

use super::params::{GpuSamplePoint, SampleParams};
use crate::waves::BatchResource;

/// Storage and readback buffers sized for one batch of sample points.
///
/// The buffers are destroyed when the batch is dropped, so a batch that has
/// been replaced can never be dispatched into again.
pub struct GpuSampleBatch {
    pub samples: Buffer,
    pub staging: Buffer,
    capacity: usize,
}

impl GpuSampleBatch {
    /// Create the buffers for exactly `capacity` points.
    pub fn new(device: &Device, capacity: usize) -> Self {
        let size = Self::byte_size(capacity);

        let samples = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("wave_samples_buffer"),
            size,
            usage: BufferUsages::STORAGE | BufferUsages::COPY_SRC | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let staging = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("wave_samples_staging"),
            size,
            usage: BufferUsages::MAP_READ | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            samples,
            staging,
            capacity,
        }
    }

    pub fn byte_size(capacity: usize) -> u64 {
        (capacity * std::mem::size_of::<GpuSamplePoint>()) as u64
    }
}

impl BatchResource for GpuSampleBatch {
    fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Drop for GpuSampleBatch {
    fn drop(&mut self) {
        log::debug!("Releasing GPU sample batch of capacity {}", self.capacity);
        self.samples.destroy();
        self.staging.destroy();
    }
}

/// Uniform parameter buffer for the sampling shader.
pub fn create_params_buffer(device: &Device) -> Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("wave_sample_params"),
        size: std::mem::size_of::<SampleParams>() as u64,
        usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
