//! # script_math
//!
//! Math value types that cross the script boundary. Re-exports [`glam`] for
//! linear algebra and defines the few spatial records scripts exchange with
//! the host: rays, ray hits and transform seeds.

pub mod approx;
pub mod ray;
pub mod transform;

// Re-export glam types for convenience.
pub use glam::{EulerRot, Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

pub use approx::{EPSILON, approximately_equal};
pub use ray::{Ray, RayHit};
pub use transform::{TransformSeed, forward_from_euler, look_rotation};
