//! Transform seed values.
//!
//! [`TransformSeed`] is the position / rotation / scale triple a script passes
//! when it asks the host to materialise a prefab at a given placement. Rotation
//! is stored as Euler angles in radians (pitch, yaw, roll), matching what the
//! host's transform component exposes.

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Position, Euler rotation and per-axis scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TransformSeed {
    /// World-space position.
    pub position: Vec3,
    /// Euler rotation in radians: `x` = pitch, `y` = yaw, `z` = roll.
    pub rotation: Vec3,
    /// Per-axis scale factor.
    pub scale: Vec3,
}

impl TransformSeed {
    /// Origin, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    /// Create a seed from all three parts.
    #[must_use]
    pub fn new(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Create a seed at `position` with zero rotation and unit scale.
    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Create a seed with position and rotation, keeping unit scale.
    #[must_use]
    pub fn from_position_rotation(position: Vec3, rotation: Vec3) -> Self {
        Self {
            position,
            rotation,
            ..Self::IDENTITY
        }
    }

    /// The rotation as a quaternion (yaw, then pitch, then roll).
    #[must_use]
    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.rotation.y, self.rotation.x, self.rotation.z)
    }

    /// Compute the 4×4 model matrix for this seed.
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.position)
    }

    /// Unit vector the rotation faces.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        forward_from_euler(self.rotation)
    }
}

impl Default for TransformSeed {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Unit forward vector for an Euler rotation (pitch, yaw, roll).
///
/// Inverse of [`look_rotation`] for directions that are not vertical.
#[must_use]
pub fn forward_from_euler(rotation: Vec3) -> Vec3 {
    let (sin_pitch, cos_pitch) = rotation.x.sin_cos();
    let (sin_yaw, cos_yaw) = rotation.y.sin_cos();
    Vec3::new(sin_yaw * cos_pitch, -sin_pitch, cos_yaw * cos_pitch)
}

/// Euler rotation that faces from `from` towards `target`, with zero roll.
///
/// Returns `None` when the two points coincide.
#[must_use]
pub fn look_rotation(from: Vec3, target: Vec3) -> Option<Vec3> {
    let dir = (target - from).try_normalize()?;
    let pitch = (-dir.y).asin();
    let yaw = dir.x.atan2(dir.z);
    Some(Vec3::new(pitch, yaw, 0.0))
}
