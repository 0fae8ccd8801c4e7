//! Compute pipeline creation for wave sampling.

use wgpu::{BindGroupLayout, ComputePipeline, Device, ShaderModule};

/// Shader entry point of the sampling kernel.
pub const SAMPLE_ENTRY_POINT: &str = "sample_wave_points";

/// Bind group layout and pipeline of the sampling kernel, built once.
pub struct SamplePipeline {
    pub layout: BindGroupLayout,
    pub pipeline: ComputePipeline,
}

impl SamplePipeline {
    pub fn new(device: &Device, shader: &ShaderModule) -> Self {
        let layout = Self::create_layout(device);
        let pipeline = Self::create_pipeline(device, shader, &layout, SAMPLE_ENTRY_POINT);
        Self { layout, pipeline }
    }

    /// Read-write sample storage at binding 0, uniform params at binding 1.
    fn create_layout(device: &Device) -> BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("wave_sample_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: false },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        })
    }

    fn create_pipeline(
        device: &Device,
        shader: &ShaderModule,
        layout: &BindGroupLayout,
        entry_point: &str,
    ) -> ComputePipeline {
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{}_pipeline_layout", entry_point)),
            bind_group_layouts: &[layout],
            immediate_size: 0,
        });

        device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some(&format!("{}_pipeline", entry_point)),
            layout: Some(&pipeline_layout),
            module: shader,
            entry_point: Some(entry_point),
            compilation_options: Default::default(),
            cache: None,
        })
    }
}
