//! Ray query records.
//!
//! A [`Ray`] is what a script hands to the host's physics query; a [`RayHit`]
//! is what comes back when something was struck.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A finite ray cast through the scene.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Ray {
    /// World-space start point.
    pub origin: Vec3,
    /// Direction of travel. Hosts normalise it before use.
    pub direction: Vec3,
    /// Maximum distance travelled along `direction`.
    pub length: f32,
}

impl Ray {
    /// Create a new ray.
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3, length: f32) -> Self {
        Self {
            origin,
            direction,
            length,
        }
    }

    /// Returns the point at `distance` along the normalised direction.
    #[must_use]
    pub fn point_at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction.normalize_or_zero() * distance
    }

    /// Distance to the first intersection with a sphere, within `length`.
    ///
    /// An origin inside the sphere hits the far side. A zero direction never
    /// hits.
    #[must_use]
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let direction = self.direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }

        let offset = self.origin - center;
        let b = offset.dot(direction);
        let c = offset.length_squared() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let root = discriminant.sqrt();
        let near = -b - root;
        let distance = if near >= 0.0 { near } else { -b + root };
        (distance >= 0.0 && distance <= self.length).then_some(distance)
    }
}

/// The closest intersection reported for a [`Ray`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RayHit {
    /// World-space contact point.
    pub position: Vec3,
    /// Surface normal at the contact point.
    pub normal: Vec3,
    /// Distance from the ray origin to `position`.
    pub distance: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_at_normalises_direction() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0), 100.0);
        assert_eq!(ray.point_at(2.0), Vec3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn test_point_at_zero_direction_stays_at_origin() {
        let ray = Ray::new(Vec3::ONE, Vec3::ZERO, 5.0);
        assert_eq!(ray.point_at(3.0), Vec3::ONE);
    }

    #[test]
    fn test_sphere_hit_front_face() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z, 100.0);
        let distance = ray.intersect_sphere(Vec3::new(0.0, 0.0, 10.0), 1.0).unwrap();
        assert!((distance - 9.0).abs() < 1e-5);
    }

    #[test]
    fn test_sphere_out_of_range_or_behind() {
        let short = Ray::new(Vec3::ZERO, Vec3::Z, 5.0);
        assert!(short.intersect_sphere(Vec3::new(0.0, 0.0, 10.0), 1.0).is_none());

        let backwards = Ray::new(Vec3::ZERO, -Vec3::Z, 100.0);
        assert!(backwards.intersect_sphere(Vec3::new(0.0, 0.0, 10.0), 1.0).is_none());

        let wide = Ray::new(Vec3::ZERO, Vec3::Z, 100.0);
        assert!(wide.intersect_sphere(Vec3::new(5.0, 0.0, 10.0), 1.0).is_none());
    }

    #[test]
    fn test_sphere_origin_inside_hits_far_side() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X, 10.0);
        let distance = ray.intersect_sphere(Vec3::ZERO, 2.0).unwrap();
        assert!((distance - 2.0).abs() < 1e-5);
    }
}
