//! Per-tick buoyancy integration.

use glam::{Quat, Vec3};

use super::config::{BuoyModel, BuoyancyConfig, BuoyancyError};
use crate::geometry::Pose;
use crate::sampler::{SamplerError, WaveFieldSampler};
use crate::waves::{WaveContext, WaveHeightEvaluate};

/// Orientation a surface buoy is steering toward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetOrientation {
    /// Sampled surface normal.
    pub normal: Vec3,
    /// Shortest-arc rotation from world up to `normal`.
    pub tilt: Quat,
    /// Twist about Y kept from the body's current orientation.
    pub yaw: Quat,
    /// `tilt * yaw`.
    pub rotation: Quat,
}

/// Pose a body is steering toward during one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuoyancyTarget {
    pub position: Vec3,
    /// `None` for point buoys, which never rotate.
    pub orientation: Option<TargetOrientation>,
}

/// Smooths a body's pose toward the sampled water surface.
///
/// Stateless between ticks; the only carried state is the body's own pose.
#[derive(Debug, Clone)]
pub struct BuoyancyIntegrator {
    config: BuoyancyConfig,
}

impl BuoyancyIntegrator {
    /// Validate `config` and build the integrator.
    pub fn new(config: BuoyancyConfig) -> Result<Self, BuoyancyError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BuoyancyConfig {
        &self.config
    }

    /// Sample the water under the body and compute where it should go.
    pub fn target<E: WaveHeightEvaluate>(
        &self,
        pose: &Pose,
        sampler: &mut WaveFieldSampler<E>,
        ctx: &WaveContext,
    ) -> Result<BuoyancyTarget, SamplerError> {
        let correction = self.config.sinking_correction;

        match &self.config.model {
            BuoyModel::Point { anchor } => {
                let sample = sampler.sample_position(pose.transform_point(*anchor), ctx)?;
                let mut position = pose.position;
                position.y = sample.y + correction;
                Ok(BuoyancyTarget {
                    position,
                    orientation: None,
                })
            }
            BuoyModel::Surface { anchors } => {
                let [p1, p2, p3] = anchors.map(|a| pose.transform_point(a));
                let context = sampler.sample_planar_context(p1, p2, p3, ctx)?;

                let mut position = pose.position;
                position.y = context.mean_height() + correction;

                let tilt = Quat::from_rotation_arc(Vec3::Y, context.normal);
                let yaw = pose.heading();

                Ok(BuoyancyTarget {
                    position,
                    orientation: Some(TargetOrientation {
                        normal: context.normal,
                        tilt,
                        yaw,
                        rotation: tilt * yaw,
                    }),
                })
            }
        }
    }

    /// Move `pose` one smoothing step toward `target`.
    pub fn apply(&self, pose: &mut Pose, target: &BuoyancyTarget) {
        let h_pos = self.config.position_hardness;

        match &target.orientation {
            None => {
                pose.position.y = lerp(pose.position.y, target.position.y, h_pos);
            }
            Some(orientation) => {
                pose.position = pose.position.lerp(target.position, h_pos);
                pose.rotation = pose
                    .rotation
                    .slerp(orientation.rotation, self.config.rotation_hardness)
                    .normalize();
            }
        }
    }

    /// Sample, then step the pose. Runs exactly one batch on `sampler`.
    pub fn tick<E: WaveHeightEvaluate>(
        &self,
        pose: &mut Pose,
        sampler: &mut WaveFieldSampler<E>,
        ctx: &WaveContext,
    ) -> Result<(), SamplerError> {
        let target = self.target(pose, sampler, ctx)?;
        self.apply(pose, &target);
        Ok(())
    }

    /// World-space line segments outlining the sample anchors.
    ///
    /// Point buoys draw a unit line along the body's up axis; surface buoys
    /// draw their closed anchor triangle.
    pub fn debug_outline(&self, pose: &Pose) -> Vec<(Vec3, Vec3)> {
        match &self.config.model {
            BuoyModel::Point { anchor } => {
                let start = pose.transform_point(*anchor);
                vec![(start, pose.transform_point(*anchor + Vec3::Y))]
            }
            BuoyModel::Surface { anchors } => {
                let [a, b, c] = anchors.map(|p| pose.transform_point(p));
                vec![(a, b), (b, c), (c, a)]
            }
        }
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
