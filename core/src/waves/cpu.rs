//! CPU reference wave-height evaluator.
//!
//! Evaluates the same height function as `gpu/shaders/sample_waves.wgsl`.
//! The two must stay in sync.

use glam::{Vec2, Vec3};
use std::f32::consts::PI;

use super::evaluator::{BatchResource, EvaluatorError, WaveHeightEvaluate};
use super::params::{ShaderTime, WaveContext, WavesPacked};

/// Gravity used by the deep-water dispersion relation (m/s²).
pub const GRAVITY: f32 = 9.8;

/// Amplitude of the cross chop relative to the primary swell.
pub const CHOP_AMPLITUDE: f32 = 0.25;

/// Vertical displacement of the water surface at `(x, z)`.
pub fn wave_displacement(x: f32, z: f32, waves: &WavesPacked, time: &ShaderTime) -> f32 {
    let wavelength = waves.wavelength();
    if wavelength <= 0.0 {
        return 0.0;
    }

    let k = 2.0 * PI / wavelength;
    let c = (GRAVITY / k).sqrt() * waves.speed();
    let (sin_dir, cos_dir) = waves.direction().sin_cos();
    let dir = Vec2::new(cos_dir, sin_dir);
    let perp = dir.perp();
    let pos = Vec2::new(x, z);

    let primary = waves.amplitude() * (k * dir.dot(pos) - c * time.seconds()).sin();
    let chop = CHOP_AMPLITUDE
        * waves.amplitude()
        * (2.0 * k * perp.dot(pos) - c * time.double()).sin();

    primary + chop
}

/// Bookkeeping-only batch; the CPU path needs no device memory.
#[derive(Debug)]
pub struct CpuBatch {
    capacity: usize,
}

impl BatchResource for CpuBatch {
    fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Evaluates wave heights on the calling thread.
#[derive(Debug, Default, Clone)]
pub struct CpuWaveEvaluator;

impl CpuWaveEvaluator {
    pub fn new() -> Self {
        Self
    }
}

impl WaveHeightEvaluate for CpuWaveEvaluator {
    type Batch = CpuBatch;

    fn name(&self) -> &'static str {
        "cpu"
    }

    fn create_batch(&mut self, capacity: usize) -> Result<CpuBatch, EvaluatorError> {
        if capacity == 0 {
            return Err(EvaluatorError::EmptyBatch);
        }
        Ok(CpuBatch { capacity })
    }

    fn evaluate(
        &mut self,
        batch: &mut CpuBatch,
        points: &mut [Vec3],
        ctx: &WaveContext,
    ) -> Result<(), EvaluatorError> {
        if points.len() != batch.capacity {
            return Err(EvaluatorError::CapacityMismatch {
                capacity: batch.capacity,
                requested: points.len(),
            });
        }

        for p in points.iter_mut() {
            p.y += wave_displacement(p.x, p.z, &ctx.waves, &ctx.time);
        }
        Ok(())
    }
}
