//! Still-water reference plane and projection onto it.

use glam::Vec3;

use super::Pose;

/// Below this absolute normal Y the plane is treated as vertical and
/// projection along Y is skipped.
pub const VERTICAL_PLANE_EPSILON: f32 = 1e-4;

/// Squared sine of the smallest corner angle under which three points count
/// as collinear. Relative to the edge lengths, so it holds at any scale.
pub const COLLINEAR_EPSILON: f32 = 1e-8;

/// Errors that can occur when building a plane.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlaneError {
    #[error("Plane normal must be non-zero and finite, got {0:?}")]
    ZeroNormal(Vec3),
}

/// The undisturbed water surface that sample points are projected onto
/// before the wave displacement is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StillWaterPlane {
    origin: Vec3,
    normal: Vec3,
    distance: f32,
}

impl StillWaterPlane {
    /// Create a plane through `origin` with the given up direction.
    ///
    /// The up direction is normalized; it only has to be non-zero.
    pub fn new(origin: Vec3, up: Vec3) -> Result<Self, PlaneError> {
        let normal = up.try_normalize().ok_or(PlaneError::ZeroNormal(up))?;
        Ok(Self {
            origin,
            normal,
            distance: -normal.dot(origin),
        })
    }

    /// Flat plane at the given height.
    pub fn horizontal(height: f32) -> Self {
        Self {
            origin: Vec3::new(0.0, height, 0.0),
            normal: Vec3::Y,
            distance: -height,
        }
    }

    /// Plane through a reference pose's position, oriented along its up-axis.
    pub fn from_pose(pose: &Pose) -> Result<Self, PlaneError> {
        Self::new(pose.position, pose.up())
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Unit-length plane normal.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Signed distance term of the plane equation `dot(n, p) + d = 0`.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Whether the plane is too close to vertical for projection along Y.
    pub fn is_near_vertical(&self) -> bool {
        self.normal.y.abs() < VERTICAL_PLANE_EPSILON
    }

    /// Move `point` along the world Y axis until it lies on the plane.
    ///
    /// X and Z are kept. For a nearly vertical plane the point is returned
    /// unchanged, since solving for Y would divide by almost zero.
    pub fn project(&self, point: Vec3) -> Vec3 {
        if self.is_near_vertical() {
            return point;
        }

        let n = self.normal;
        let y = (-n.x * point.x - n.z * point.z - self.distance) / n.y;
        Vec3::new(point.x, y, point.z)
    }
}

impl Default for StillWaterPlane {
    fn default() -> Self {
        Self::horizontal(0.0)
    }
}

/// Unit normal of the triangle `(a, b, c)` by the right-hand rule.
///
/// Returns `None` when the points are collinear or coincide.
pub fn triangle_normal(a: Vec3, b: Vec3, c: Vec3) -> Option<Vec3> {
    let (ab, ac) = (b - a, c - a);
    let cross = ab.cross(ac);
    let scale = ab.length_squared() * ac.length_squared();
    if !cross.is_finite() || cross.length_squared() <= COLLINEAR_EPSILON * scale {
        return None;
    }
    Some(cross.normalize())
}
