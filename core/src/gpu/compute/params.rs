//! Uniform and storage layouts for the sampling shader.
//!
//! These structs must match the WGSL shader definitions exactly,
//! including alignment requirements.

use glam::Vec3;

use crate::waves::WaveContext;

/// Sampling parameters.
/// WGSL: struct SampleParams { waves: vec4<f32>, time: vec4<f32>, count: u32 }
/// The trailing u32 is padded up to the 16-byte struct alignment, 48 bytes total.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SampleParams {
    pub waves: [f32; 4],
    pub time: [f32; 4],
    pub count: u32,
    pub _pad: [u32; 3],
}

impl SampleParams {
    pub fn new(ctx: &WaveContext, count: usize) -> Self {
        Self {
            waves: ctx.waves.0,
            time: ctx.time.0,
            count: count as u32,
            _pad: [0; 3],
        }
    }
}

/// One sample point as stored on the GPU.
/// `array<vec3<f32>>` has a 16-byte stride in storage buffers, so the
/// point is widened to a vec4 with an unused W.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuSamplePoint {
    pub position: [f32; 3],
    pub _pad: f32,
}

impl From<Vec3> for GpuSamplePoint {
    fn from(v: Vec3) -> Self {
        Self {
            position: v.to_array(),
            _pad: 0.0,
        }
    }
}

impl From<GpuSamplePoint> for Vec3 {
    fn from(p: GpuSamplePoint) -> Self {
        Vec3::from_array(p.position)
    }
}
