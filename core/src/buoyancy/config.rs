//! Buoyancy model and per-body smoothing parameters.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::geometry::{triangle_normal, Pose};

/// Errors raised while validating a buoyancy configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuoyancyError {
    #[error("{name} hardness must be within 0.0..=1.0, got {value}")]
    HardnessOutOfRange { name: &'static str, value: f32 },
    #[error("Sinking correction must be finite, got {0}")]
    NonFiniteCorrection(f32),
    #[error("Surface anchors {0:?} do not span a triangle on the water plane")]
    DegenerateAnchors([Vec3; 3]),
    #[error("Unsupported buoy model \"{0}\"")]
    UnsupportedModel(String),
}

/// Names of the supported buoy models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuoyType {
    Point,
    Surface,
}

impl BuoyType {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, BuoyancyError> {
        match s.to_lowercase().as_str() {
            "point" => Ok(Self::Point),
            "surface" | "plane" => Ok(Self::Surface),
            _ => Err(BuoyancyError::UnsupportedModel(s.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::Surface => "surface",
        }
    }

    pub fn all() -> &'static [BuoyType] {
        &[Self::Point, Self::Surface]
    }

    /// Model of this type with default anchors.
    pub fn default_model(&self) -> BuoyModel {
        match self {
            Self::Point => BuoyModel::Point {
                anchor: Vec3::ZERO,
            },
            Self::Surface => BuoyModel::Surface {
                anchors: default_surface_anchors(),
            },
        }
    }
}

/// Three anchors on the unit circle, 120 degrees apart, wound so the
/// sampled normal points up.
pub fn default_surface_anchors() -> [Vec3; 3] {
    let step = TAU / 3.0;
    [0.0, step, 2.0 * step].map(|angle| Quat::from_rotation_y(angle) * Vec3::Z)
}

/// How a body's anchors are sampled. Anchors are body-local offsets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BuoyModel {
    /// One sample; only the height follows the water.
    Point {
        #[serde(default)]
        anchor: Vec3,
    },
    /// Three samples; height follows their mean and the body tilts to their normal.
    Surface {
        #[serde(default = "default_surface_anchors")]
        anchors: [Vec3; 3],
    },
}

impl BuoyModel {
    pub fn buoy_type(&self) -> BuoyType {
        match self {
            BuoyModel::Point { .. } => BuoyType::Point,
            BuoyModel::Surface { .. } => BuoyType::Surface,
        }
    }
}

impl Default for BuoyModel {
    fn default() -> Self {
        BuoyType::Point.default_model()
    }
}

/// Per-body buoyancy settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuoyancyConfig {
    pub model: BuoyModel,
    /// Constant offset added to the sampled height.
    pub sinking_correction: f32,
    /// Fraction of the height gap closed per tick.
    pub position_hardness: f32,
    /// Fraction of the orientation gap closed per tick.
    pub rotation_hardness: f32,
}

impl Default for BuoyancyConfig {
    fn default() -> Self {
        Self {
            model: BuoyModel::default(),
            sinking_correction: 0.0,
            position_hardness: 0.05,
            rotation_hardness: 0.1,
        }
    }
}

impl BuoyancyConfig {
    pub fn point() -> Self {
        Self::default()
    }

    pub fn surface() -> Self {
        Self {
            model: BuoyType::Surface.default_model(),
            ..Self::default()
        }
    }

    pub fn with_model(mut self, model: BuoyModel) -> Self {
        self.model = model;
        self
    }

    pub fn with_sinking_correction(mut self, correction: f32) -> Self {
        self.sinking_correction = correction;
        self
    }

    pub fn with_hardness(mut self, position: f32, rotation: f32) -> Self {
        self.position_hardness = position;
        self.rotation_hardness = rotation;
        self
    }

    /// Check every setting once, before the first tick.
    pub fn validate(&self) -> Result<(), BuoyancyError> {
        check_hardness("position", self.position_hardness)?;
        check_hardness("rotation", self.rotation_hardness)?;

        if !self.sinking_correction.is_finite() {
            return Err(BuoyancyError::NonFiniteCorrection(self.sinking_correction));
        }

        if let BuoyModel::Surface { anchors } = &self.model {
            let normal = footprint_normal(anchors, Quat::IDENTITY)?;
            if normal.y < 0.0 {
                log::warn!(
                    "Surface anchors {:?} are wound clockwise; sampled normals will point down",
                    anchors
                );
            }
        }

        Ok(())
    }

    /// Check that a body starting at `pose` can be sampled on its first tick.
    ///
    /// A surface body rolled far enough sees its anchors collapse to a line
    /// once they are projected onto the water.
    pub fn validate_pose(&self, pose: &Pose) -> Result<(), BuoyancyError> {
        if let BuoyModel::Surface { anchors } = &self.model {
            footprint_normal(anchors, pose.rotation)?;
        }
        Ok(())
    }
}

/// Normal of the anchor triangle's footprint on the horizontal plane, after
/// rotating the anchors. The sampler projects along Y, so only X and Z count.
fn footprint_normal(anchors: &[Vec3; 3], rotation: Quat) -> Result<Vec3, BuoyancyError> {
    let footprint = anchors.map(|a| {
        let world = rotation * a;
        Vec3::new(world.x, 0.0, world.z)
    });
    triangle_normal(footprint[0], footprint[1], footprint[2])
        .ok_or(BuoyancyError::DegenerateAnchors(*anchors))
}

fn check_hardness(name: &'static str, value: f32) -> Result<(), BuoyancyError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(BuoyancyError::HardnessOutOfRange { name, value })
    }
}
