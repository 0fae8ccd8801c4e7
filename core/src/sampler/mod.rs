//! Wave-field sampling against the still-water plane.
//!
//! [`WaveFieldSampler`] projects world points onto its still-water plane and
//! sends them to a [`WaveHeightEvaluate`] implementation as one batch. The
//! batch resource is allocated lazily, reused while the point count stays the
//! same, and replaced (old one dropped first) when the count changes.

use glam::{Vec2, Vec3};

use crate::geometry::{triangle_normal, StillWaterPlane};
use crate::waves::{
    BatchResource, EvaluatorError, MissingWaveParameter, WaveContext, WaveHeightEvaluate,
};

/// Errors that can occur while sampling the wave field.
#[derive(Debug, thiserror::Error)]
pub enum SamplerError {
    #[error("Evaluator error: {0}")]
    Evaluator(#[from] EvaluatorError),
    #[error("Evaluator moved sample {index} horizontally")]
    ShapeMismatch { index: usize },
    #[error(transparent)]
    MissingWaveParameter(#[from] MissingWaveParameter),
}

/// Counters describing how the batch resource has been used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SamplerStats {
    pub allocations: usize,
    pub releases: usize,
    pub dispatches: usize,
}

/// Three displaced samples and the normal of the triangle they span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarContext {
    pub samples: [Vec3; 3],
    pub normal: Vec3,
}

impl PlanarContext {
    /// Mean height of the three samples.
    pub fn mean_height(&self) -> f32 {
        self.samples.iter().map(|s| s.y).sum::<f32>() / 3.0
    }
}

/// Samples wave-displaced positions for arbitrary world points.
pub struct WaveFieldSampler<E: WaveHeightEvaluate> {
    plane: StillWaterPlane,
    evaluator: E,
    batch: Option<E::Batch>,
    horizontal: Vec<Vec2>,
    stats: SamplerStats,
}

impl<E: WaveHeightEvaluate> WaveFieldSampler<E> {
    pub fn new(plane: StillWaterPlane, evaluator: E) -> Self {
        Self {
            plane,
            evaluator,
            batch: None,
            horizontal: Vec::with_capacity(3),
            stats: SamplerStats::default(),
        }
    }

    pub fn plane(&self) -> &StillWaterPlane {
        &self.plane
    }

    /// Move the still-water plane, e.g. when its reference transform moved.
    pub fn set_plane(&mut self, plane: StillWaterPlane) {
        self.plane = plane;
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    pub fn evaluator_mut(&mut self) -> &mut E {
        &mut self.evaluator
    }

    pub fn stats(&self) -> SamplerStats {
        self.stats
    }

    /// Capacity of the currently allocated batch resource, if any.
    pub fn batch_capacity(&self) -> Option<usize> {
        self.batch.as_ref().map(|b| b.capacity())
    }

    /// Project a world point onto the still-water plane. No GPU work.
    pub fn project_point(&self, point: Vec3) -> Vec3 {
        self.plane.project(point)
    }

    /// Wave-displaced position of a single world point.
    pub fn sample_position(&mut self, point: Vec3, ctx: &WaveContext) -> Result<Vec3, SamplerError> {
        let mut points = [point];
        self.sample_batch(&mut points, ctx)?;
        Ok(points[0])
    }

    /// Sample three points in one batch and derive the surface normal there.
    ///
    /// # Panics
    ///
    /// Panics if the projected points are collinear, since the normal is then
    /// undefined. Callers must supply a non-degenerate triangle.
    pub fn sample_planar_context(
        &mut self,
        p1: Vec3,
        p2: Vec3,
        p3: Vec3,
        ctx: &WaveContext,
    ) -> Result<PlanarContext, SamplerError> {
        let mut points = [p1, p2, p3].map(|p| self.plane.project(p));
        assert!(
            triangle_normal(points[0], points[1], points[2]).is_some(),
            "Planar context points are collinear after projection: {:?}",
            points
        );

        self.dispatch(&mut points, ctx)?;

        // Horizontal positions are preserved, so the displaced triangle
        // projects onto the same non-degenerate footprint.
        let normal = triangle_normal(points[0], points[1], points[2]).unwrap_or(self.plane.normal());

        Ok(PlanarContext {
            samples: points,
            normal,
        })
    }

    /// Project every point onto the plane and displace them in one batch.
    pub fn sample_batch(&mut self, points: &mut [Vec3], ctx: &WaveContext) -> Result<(), SamplerError> {
        for p in points.iter_mut() {
            *p = self.plane.project(*p);
        }
        self.dispatch(points, ctx)
    }

    /// Drop the batch resource now instead of waiting for the sampler to drop.
    pub fn release_batch(&mut self) {
        if let Some(batch) = self.batch.take() {
            log::debug!("Releasing sample batch of capacity {}", batch.capacity());
            drop(batch);
            self.stats.releases += 1;
        }
    }

    fn dispatch(&mut self, points: &mut [Vec3], ctx: &WaveContext) -> Result<(), SamplerError> {
        if points.is_empty() {
            return Err(EvaluatorError::EmptyBatch.into());
        }

        let mut batch = self.acquire_batch(points.len())?;

        self.horizontal.clear();
        self.horizontal.extend(points.iter().map(|p| Vec2::new(p.x, p.z)));

        let result = self.evaluator.evaluate(&mut batch, points, ctx);
        self.batch = Some(batch);
        result?;
        self.stats.dispatches += 1;

        for (index, (p, xz)) in points.iter().zip(&self.horizontal).enumerate() {
            if p.x != xz.x || p.z != xz.y {
                return Err(SamplerError::ShapeMismatch { index });
            }
        }
        Ok(())
    }

    /// Reuse the current batch if it fits, otherwise release it and allocate anew.
    fn acquire_batch(&mut self, count: usize) -> Result<E::Batch, SamplerError> {
        match self.batch.take() {
            Some(batch) if batch.capacity() == count && batch.is_valid() => Ok(batch),
            stale => {
                if let Some(old) = stale {
                    log::debug!(
                        "Resizing {} sample batch from {} to {} points",
                        self.evaluator.name(),
                        old.capacity(),
                        count
                    );
                    drop(old);
                    self.stats.releases += 1;
                }
                let batch = self.evaluator.create_batch(count)?;
                self.stats.allocations += 1;
                log::debug!(
                    "Allocated {} sample batch of capacity {}",
                    self.evaluator.name(),
                    count
                );
                Ok(batch)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waves::{wave_displacement, CpuWaveEvaluator, WavesPacked};

    fn calm() -> WaveContext {
        WaveContext::new(WavesPacked::CALM, 0.0)
    }

    #[test]
    fn test_project_point_is_pure() {
        let sampler = WaveFieldSampler::new(StillWaterPlane::horizontal(2.0), CpuWaveEvaluator::new());
        assert_eq!(sampler.project_point(Vec3::new(1.0, 9.0, 1.0)), Vec3::new(1.0, 2.0, 1.0));
        assert_eq!(sampler.stats(), SamplerStats::default());
        assert_eq!(sampler.batch_capacity(), None);
    }

    #[test]
    fn test_sample_position_projects_then_displaces() {
        let mut sampler =
            WaveFieldSampler::new(StillWaterPlane::horizontal(1.0), CpuWaveEvaluator::new());
        let ctx = WaveContext::new(WavesPacked::default(), 3.0);
        let sample = sampler.sample_position(Vec3::new(4.0, -10.0, 2.0), &ctx).unwrap();

        let expected = 1.0 + wave_displacement(4.0, 2.0, &ctx.waves, &ctx.time);
        assert_eq!(sample, Vec3::new(4.0, expected, 2.0));
    }

    #[test]
    fn test_batch_reused_for_same_size() {
        let mut sampler = WaveFieldSampler::new(StillWaterPlane::default(), CpuWaveEvaluator::new());
        for i in 0..5 {
            sampler.sample_position(Vec3::splat(i as f32), &calm()).unwrap();
        }
        let stats = sampler.stats();
        assert_eq!(stats.allocations, 1);
        assert_eq!(stats.releases, 0);
        assert_eq!(stats.dispatches, 5);
        assert_eq!(sampler.batch_capacity(), Some(1));
    }

    #[test]
    fn test_planar_context_flat_water() {
        let mut sampler = WaveFieldSampler::new(StillWaterPlane::default(), CpuWaveEvaluator::new());
        let ctx = calm();
        let context = sampler
            .sample_planar_context(
                Vec3::new(0.0, 5.0, 1.0),
                Vec3::new(0.866, 5.0, -0.5),
                Vec3::new(-0.866, 5.0, -0.5),
                &ctx,
            )
            .unwrap();
        assert!((context.normal - Vec3::Y).length() < 1e-6);
        assert_eq!(context.mean_height(), 0.0);
        assert_eq!(sampler.batch_capacity(), Some(3));
    }

    #[test]
    #[should_panic(expected = "collinear")]
    fn test_planar_context_collinear_panics() {
        let mut sampler = WaveFieldSampler::new(StillWaterPlane::default(), CpuWaveEvaluator::new());
        let _ = sampler.sample_planar_context(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 3.0, 0.0),
            Vec3::new(2.0, -1.0, 0.0),
            &calm(),
        );
    }

    #[test]
    fn test_empty_batch_rejected() {
        let mut sampler = WaveFieldSampler::new(StillWaterPlane::default(), CpuWaveEvaluator::new());
        let result = sampler.sample_batch(&mut [], &calm());
        assert!(matches!(
            result,
            Err(SamplerError::Evaluator(EvaluatorError::EmptyBatch))
        ));
    }

    #[test]
    fn test_release_batch() {
        let mut sampler = WaveFieldSampler::new(StillWaterPlane::default(), CpuWaveEvaluator::new());
        sampler.sample_position(Vec3::ZERO, &calm()).unwrap();
        sampler.release_batch();
        sampler.release_batch();
        assert_eq!(sampler.stats().releases, 1);
        assert_eq!(sampler.batch_capacity(), None);
    }
}
