//! Plane projection and pose math shared by the sampler and the integrator.

mod plane;
mod pose;

pub use plane::{
    triangle_normal, PlaneError, StillWaterPlane, COLLINEAR_EPSILON, VERTICAL_PLANE_EPSILON,
};
pub use pose::Pose;
