//! World-space rigid pose of a body.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// World position and orientation of a body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// Map a body-local offset to world space.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }

    /// The body's local Y axis in world space.
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Twist part of a swing-twist split of the rotation: `rotation = swing * heading`,
    /// where `heading` turns about Y and `swing` is the shortest arc from Y to
    /// the body's up-axis.
    ///
    /// Re-tilting the body with another shortest arc leaves this unchanged.
    pub fn heading(&self) -> Quat {
        let swing = Quat::from_rotation_arc(Vec3::Y, self.up());
        let twist = swing.inverse() * self.rotation;
        // Drop the residual X/Z left by rounding; the result is a pure Y turn.
        let len = (twist.y * twist.y + twist.w * twist.w).sqrt();
        if len <= f32::EPSILON {
            return Quat::IDENTITY;
        }
        let sign = if twist.w < 0.0 { -1.0 } else { 1.0 };
        Quat::from_xyzw(0.0, sign * twist.y / len, 0.0, sign * twist.w / len)
    }

    /// Heading angle around Y, in radians within `-PI..=PI`.
    pub fn yaw(&self) -> f32 {
        let heading = self.heading();
        2.0 * heading.y.atan2(heading.w)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}
