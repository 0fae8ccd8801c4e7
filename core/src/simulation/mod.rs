//! Simulation loop driving buoyant bodies over a sampled wave field.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::buoyancy::{BuoyancyConfig, BuoyancyError, BuoyancyIntegrator};
use crate::geometry::{PlaneError, Pose, StillWaterPlane};
use crate::gpu::{GpuContext, GpuError};
use crate::sampler::{SamplerError, WaveFieldSampler};
use crate::waves::{
    DynamicEvaluator, ShaderTime, WaveContext, WaveHeightEvaluate, WaveMaterial, WaveParamHandle,
    WavesPacked,
};

/// Default name of the wave vector parameter, as used by the water shader.
pub const DEFAULT_WAVES_PARAM: &str = "_Waves";

/// Errors that can occur while setting up or running a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("Sampler error: {0}")]
    Sampler(#[from] SamplerError),
    #[error("Buoyancy error in body \"{body}\": {source}")]
    Buoyancy {
        body: String,
        #[source]
        source: BuoyancyError,
    },
    #[error("Plane error: {0}")]
    Plane(#[from] PlaneError),
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which wave-height evaluator backs the sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluatorKind {
    #[default]
    Cpu,
    Gpu,
}

/// Still-water plane settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaneConfig {
    pub origin: Vec3,
    pub up: Vec3,
}

impl Default for PlaneConfig {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            up: Vec3::Y,
        }
    }
}

impl PlaneConfig {
    pub fn to_plane(&self) -> Result<StillWaterPlane, PlaneError> {
        StillWaterPlane::new(self.origin, self.up)
    }
}

/// One buoyant body in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    pub name: String,
    pub pose: Pose,
    pub buoyancy: BuoyancyConfig,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            name: "body".to_string(),
            pose: Pose::default(),
            buoyancy: BuoyancyConfig::default(),
        }
    }
}

/// Scene configuration, typically loaded from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub plane: PlaneConfig,
    /// Name of the wave vector in the material.
    pub waves_param: String,
    /// Initial value of the wave vector.
    pub waves: WavesPacked,
    pub evaluator: EvaluatorKind,
    pub bodies: Vec<BodyConfig>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            plane: PlaneConfig::default(),
            waves_param: DEFAULT_WAVES_PARAM.to_string(),
            waves: WavesPacked::default(),
            evaluator: EvaluatorKind::Cpu,
            bodies: Vec::new(),
        }
    }
}

impl SimulationConfig {
    pub fn from_json_str(json: &str) -> Result<Self, SimulationError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SimulationError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Material holding the configured wave vector under `waves_param`.
    pub fn to_material(&self) -> WaveMaterial {
        WaveMaterial::new().with_vector(&self.waves_param, self.waves)
    }
}

/// Time step handed to [`WaterSimulation::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub delta_seconds: f32,
}

impl TickContext {
    pub fn new(delta_seconds: f32) -> Self {
        Self { delta_seconds }
    }
}

/// A body's integrator and its current pose.
#[derive(Debug, Clone)]
pub struct BuoyantBody {
    pub name: String,
    pub pose: Pose,
    integrator: BuoyancyIntegrator,
}

impl BuoyantBody {
    pub fn integrator(&self) -> &BuoyancyIntegrator {
        &self.integrator
    }
}

/// Owns one sampler and steps every body once per tick.
pub struct WaterSimulation<E: WaveHeightEvaluate> {
    sampler: WaveFieldSampler<E>,
    material: WaveMaterial,
    waves: WaveParamHandle,
    bodies: Vec<BuoyantBody>,
    elapsed: f32,
}

impl<E: WaveHeightEvaluate> WaterSimulation<E> {
    /// Build a simulation whose material comes from the config itself.
    pub fn from_config(config: &SimulationConfig, evaluator: E) -> Result<Self, SimulationError> {
        Self::with_material(config, config.to_material(), evaluator)
    }

    /// Build a simulation reading waves from a host-provided material.
    ///
    /// Fails if the material lacks the configured wave parameter or if any
    /// body's buoyancy settings are invalid.
    pub fn with_material(
        config: &SimulationConfig,
        material: WaveMaterial,
        evaluator: E,
    ) -> Result<Self, SimulationError> {
        let waves = WaveParamHandle::resolve(&material, &config.waves_param)
            .map_err(SamplerError::from)?;
        let plane = config.plane.to_plane()?;

        log::info!(
            "Starting water simulation with {} evaluator and {} bodies",
            evaluator.name(),
            config.bodies.len()
        );

        let mut simulation = Self {
            sampler: WaveFieldSampler::new(plane, evaluator),
            material,
            waves,
            bodies: Vec::with_capacity(config.bodies.len()),
            elapsed: 0.0,
        };
        for body in &config.bodies {
            simulation.add_body(&body.name, body.pose, body.buoyancy.clone())?;
        }
        Ok(simulation)
    }

    /// Add a body; returns its index.
    ///
    /// Fails if the buoyancy settings are invalid or if the starting pose
    /// leaves the surface anchors without a usable footprint.
    pub fn add_body(
        &mut self,
        name: &str,
        pose: Pose,
        buoyancy: BuoyancyConfig,
    ) -> Result<usize, SimulationError> {
        let invalid = |source: BuoyancyError| SimulationError::Buoyancy {
            body: name.to_string(),
            source,
        };
        buoyancy.validate_pose(&pose).map_err(invalid)?;
        let integrator = BuoyancyIntegrator::new(buoyancy).map_err(invalid)?;
        self.bodies.push(BuoyantBody {
            name: name.to_string(),
            pose,
            integrator,
        });
        Ok(self.bodies.len() - 1)
    }

    /// Advance time and run every body's buoyancy step once.
    pub fn tick(&mut self, tick: TickContext) -> Result<(), SimulationError> {
        self.elapsed += tick.delta_seconds;
        let ctx = self.wave_context();

        for body in &mut self.bodies {
            body.integrator
                .tick(&mut body.pose, &mut self.sampler, &ctx)?;
        }
        Ok(())
    }

    /// Wave inputs for the current time.
    pub fn wave_context(&self) -> WaveContext {
        WaveContext {
            waves: self.material.waves(self.waves),
            time: ShaderTime::from_seconds(self.elapsed),
        }
    }

    pub fn set_waves(&mut self, waves: WavesPacked) {
        self.material.set_waves(self.waves, waves);
    }

    pub fn material(&self) -> &WaveMaterial {
        &self.material
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn bodies(&self) -> &[BuoyantBody] {
        &self.bodies
    }

    pub fn body(&self, name: &str) -> Option<&BuoyantBody> {
        self.bodies.iter().find(|b| b.name == name)
    }

    pub fn body_mut(&mut self, name: &str) -> Option<&mut BuoyantBody> {
        self.bodies.iter_mut().find(|b| b.name == name)
    }

    pub fn sampler(&self) -> &WaveFieldSampler<E> {
        &self.sampler
    }

    pub fn sampler_mut(&mut self) -> &mut WaveFieldSampler<E> {
        &mut self.sampler
    }
}

impl WaterSimulation<DynamicEvaluator> {
    /// Build with the evaluator named in the config.
    ///
    /// A GPU request without a context falls back to the CPU evaluator.
    pub fn from_config_dynamic(
        config: &SimulationConfig,
        gpu: Option<&GpuContext>,
    ) -> Result<Self, SimulationError> {
        let evaluator = match config.evaluator {
            EvaluatorKind::Cpu => DynamicEvaluator::cpu(),
            EvaluatorKind::Gpu => DynamicEvaluator::gpu_with_fallback(
                gpu.map(|g| g.device.clone()),
                gpu.map(|g| g.queue.clone()),
            ),
        };
        Self::from_config(config, evaluator)
    }
}
