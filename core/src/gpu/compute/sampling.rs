//! GPU wave-height evaluation using a wgpu compute shader.

use glam::Vec3;
use std::sync::Arc;
use wgpu::{Device, Queue};

use super::buffers::{create_params_buffer, GpuSampleBatch};
use super::params::{GpuSamplePoint, SampleParams};
use super::pipelines::SamplePipeline;
use crate::waves::{BatchResource, EvaluatorError, WaveContext, WaveHeightEvaluate};

const WORKGROUP_SIZE: u32 = 64;

/// Evaluates wave heights with a compute dispatch and a blocking readback.
pub struct GpuWaveEvaluator {
    device: Arc<Device>,
    queue: Arc<Queue>,
    pipeline: SamplePipeline,
    params: wgpu::Buffer,
    upload: Vec<GpuSamplePoint>,
}

impl GpuWaveEvaluator {
    /// Compile the sampling shader and build its pipeline.
    pub fn new(device: Arc<Device>, queue: Arc<Queue>) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sample_waves_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/sample_waves.wgsl").into()),
        });

        let pipeline = SamplePipeline::new(&device, &shader);
        let params = create_params_buffer(&device);

        log::info!("Using GPU compute for wave sampling");

        Self {
            device,
            queue,
            pipeline,
            params,
            upload: Vec::new(),
        }
    }

    // --- Private helpers ---

    fn upload_points(&mut self, batch: &GpuSampleBatch, points: &[Vec3]) {
        self.upload.clear();
        self.upload.extend(points.iter().copied().map(GpuSamplePoint::from));
        self.queue
            .write_buffer(&batch.samples, 0, bytemuck::cast_slice(&self.upload));
    }

    fn encode_sample(&self, encoder: &mut wgpu::CommandEncoder, batch: &GpuSampleBatch) {
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("wave_sample_bind_group"),
            layout: &self.pipeline.layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: batch.samples.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: self.params.as_entire_binding(),
                },
            ],
        });

        let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
            label: Some("wave_sample_pass"),
            timestamp_writes: None,
        });
        pass.set_pipeline(&self.pipeline.pipeline);
        pass.set_bind_group(0, &bind_group, &[]);
        pass.dispatch_workgroups(self.workgroups(batch.capacity()), 1, 1);
    }

    /// Map the staging buffer and wait for the GPU. This is the sync point.
    fn read_staging(&self, batch: &GpuSampleBatch, points: &mut [Vec3]) -> Result<(), EvaluatorError> {
        let slice = batch.staging.slice(..GpuSampleBatch::byte_size(points.len()));

        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |r| {
            let _ = tx.send(r);
        });
        self.device
            .poll(wgpu::PollType::wait_indefinitely())
            .map_err(|e| EvaluatorError::DevicePoll(e.to_string()))?;

        rx.recv()
            .map_err(|e| EvaluatorError::BufferMapFailed(e.to_string()))?
            .map_err(|e| EvaluatorError::BufferMapFailed(format!("{:?}", e)))?;

        {
            let data = slice.get_mapped_range();
            let samples: &[GpuSamplePoint] = bytemuck::cast_slice(&data);
            for (point, sample) in points.iter_mut().zip(samples) {
                *point = Vec3::from(*sample);
            }
        }
        batch.staging.unmap();

        Ok(())
    }

    fn workgroups(&self, elements: usize) -> u32 {
        (elements as u32).div_ceil(WORKGROUP_SIZE)
    }
}

impl WaveHeightEvaluate for GpuWaveEvaluator {
    type Batch = GpuSampleBatch;

    fn name(&self) -> &'static str {
        "gpu"
    }

    fn create_batch(&mut self, capacity: usize) -> Result<GpuSampleBatch, EvaluatorError> {
        if capacity == 0 {
            return Err(EvaluatorError::EmptyBatch);
        }
        Ok(GpuSampleBatch::new(&self.device, capacity))
    }

    fn evaluate(
        &mut self,
        batch: &mut GpuSampleBatch,
        points: &mut [Vec3],
        ctx: &WaveContext,
    ) -> Result<(), EvaluatorError> {
        if points.len() != batch.capacity() {
            return Err(EvaluatorError::CapacityMismatch {
                capacity: batch.capacity(),
                requested: points.len(),
            });
        }

        self.upload_points(batch, points);
        let params = SampleParams::new(ctx, points.len());
        self.queue
            .write_buffer(&self.params, 0, bytemuck::bytes_of(&params));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("wave_sample_encoder"),
            });
        self.encode_sample(&mut encoder, batch);
        encoder.copy_buffer_to_buffer(
            &batch.samples,
            0,
            &batch.staging,
            0,
            GpuSampleBatch::byte_size(points.len()),
        );
        self.queue.submit(Some(encoder.finish()));

        log::trace!("Dispatched {} wave samples", points.len());

        self.read_staging(batch, points)
    }
}
