//! Host configuration.

use serde::{Deserialize, Serialize};
use tracing::warn;

use script_math::Vec2;

/// Environment variable overriding the fixed frame delta, in seconds.
pub const FIXED_DELTA_ENV: &str = "SCRIPT_HOST_DT";

/// Fixed frame delta used when nothing overrides it.
pub const DEFAULT_FIXED_DELTA: f32 = 1.0 / 60.0;

/// Configuration for a [`SceneHost`](crate::SceneHost).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostConfig {
    /// Human-readable scene name (e.g. `"arena"`).
    pub scene_name: String,
    /// Seconds added to the clock by every frame.
    pub fixed_delta: f32,
    /// Extra kind names the host classifies as native.
    pub native_kinds: Vec<String>,
    /// Viewport size in pixels, used by camera projection.
    pub viewport: Vec2,
}

impl HostConfig {
    /// Create a config with the default delta and a 1280x720 viewport.
    #[must_use]
    pub fn new(scene_name: impl Into<String>) -> Self {
        Self {
            scene_name: scene_name.into(),
            fixed_delta: DEFAULT_FIXED_DELTA,
            native_kinds: Vec::new(),
            viewport: Vec2::new(1280.0, 720.0),
        }
    }

    /// Like [`HostConfig::new`], with the fixed delta read from
    /// [`FIXED_DELTA_ENV`] when it holds a positive number.
    #[must_use]
    pub fn from_env(scene_name: impl Into<String>) -> Self {
        let config = Self::new(scene_name);
        match std::env::var(FIXED_DELTA_ENV) {
            Ok(raw) => match parse_delta(&raw) {
                Some(dt) => config.with_fixed_delta(dt),
                None => {
                    warn!(var = FIXED_DELTA_ENV, value = raw, "ignoring invalid fixed delta");
                    config
                }
            },
            Err(_) => config,
        }
    }

    /// Override the fixed frame delta.
    #[must_use]
    pub fn with_fixed_delta(mut self, dt: f32) -> Self {
        self.fixed_delta = dt;
        self
    }

    /// Classify `name` as a native kind in addition to the built-in ones.
    #[must_use]
    pub fn with_native_kind(mut self, name: impl Into<String>) -> Self {
        self.native_kinds.push(name.into());
        self
    }

    /// Override the viewport size.
    #[must_use]
    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Vec2::new(width, height);
        self
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self::new("scene")
    }
}

fn parse_delta(raw: &str) -> Option<f32> {
    raw.trim()
        .parse::<f32>()
        .ok()
        .filter(|dt| dt.is_finite() && *dt > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HostConfig::new("arena");
        assert_eq!(config.scene_name, "arena");
        assert_eq!(config.fixed_delta, DEFAULT_FIXED_DELTA);
        assert!(config.native_kinds.is_empty());
        assert_eq!(config.viewport, Vec2::new(1280.0, 720.0));
    }

    #[test]
    fn test_builder() {
        let config = HostConfig::new("arena")
            .with_fixed_delta(0.5)
            .with_native_kind("ParticleSystem")
            .with_viewport(800.0, 600.0);
        assert_eq!(config.fixed_delta, 0.5);
        assert_eq!(config.native_kinds, vec!["ParticleSystem".to_string()]);
        assert_eq!(config.viewport, Vec2::new(800.0, 600.0));
    }

    #[test]
    fn test_parse_delta() {
        assert_eq!(parse_delta("0.02"), Some(0.02));
        assert_eq!(parse_delta(" 0.5 "), Some(0.5));
        assert_eq!(parse_delta("0"), None);
        assert_eq!(parse_delta("-1"), None);
        assert_eq!(parse_delta("NaN"), None);
        assert_eq!(parse_delta("fast"), None);
    }
}
