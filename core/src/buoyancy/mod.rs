//! Buoyancy models and the integrator that applies them.
//!
//! - Point: one anchor, only the height follows the water
//! - Surface: three anchors, height follows their mean and the body tilts to
//!   the sampled normal while keeping its heading

mod config;
mod integrator;

pub use config::{default_surface_anchors, BuoyModel, BuoyType, BuoyancyConfig, BuoyancyError};
pub use integrator::{BuoyancyIntegrator, BuoyancyTarget, TargetOrientation};
