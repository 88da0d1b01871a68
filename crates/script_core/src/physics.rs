//! Physics scene queries.

use script_math::{Ray, RayHit};

use crate::error::ScriptError;
use crate::host::PhysicsHost;

/// Cast `ray` into the scene and return the closest hit.
///
/// A ray with a non-positive length or a zero direction misses without a
/// host call.
///
/// # Errors
///
/// Returns [`ScriptError::Host`] if the host fails.
pub fn raycast(host: &(impl PhysicsHost + ?Sized), ray: &Ray) -> Result<Option<RayHit>, ScriptError> {
    if ray.length <= 0.0 || ray.direction.length_squared() == 0.0 {
        return Ok(None);
    }
    Ok(host.raycast(ray)?)
}

#[cfg(test)]
mod tests {
    use script_math::Vec3;

    use super::*;
    use crate::test_support::StubHost;

    #[test]
    fn test_degenerate_ray_skips_host() {
        let host = StubHost::new();
        let zero_length = Ray::new(Vec3::ZERO, Vec3::Z, 0.0);
        let zero_direction = Ray::new(Vec3::ZERO, Vec3::ZERO, 10.0);

        assert!(raycast(&host, &zero_length).unwrap().is_none());
        assert!(raycast(&host, &zero_direction).unwrap().is_none());
        assert_eq!(host.calls(), 0);
    }

    #[test]
    fn test_ray_forwarded() {
        let host = StubHost::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::Z, 10.0);
        let hit = raycast(&host, &ray).unwrap().unwrap();
        assert_eq!(hit.distance, 10.0);
        assert_eq!(host.calls(), 1);
    }
}
