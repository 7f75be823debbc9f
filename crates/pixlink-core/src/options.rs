//! Configuration options for pixlink.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::camera_state::CameraState;
use crate::error::Result;

/// Session configuration for the viewer.
///
/// Lives in memory only; `from_json` / `to_json` let an embedding
/// application persist it however it likes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Camera state restored by a view reset.
    pub baseline: CameraState,

    /// Angle applied by one yaw/pitch/roll button press, in degrees.
    pub rotation_step_degrees: f32,

    /// Degrees of orbit per pixel of mouse drag.
    pub orbit_sensitivity: f32,

    /// Pan distance per pixel of drag, as a fraction of the eye-to-center distance.
    pub pan_speed: f32,

    /// Fraction of the eye-to-center distance moved per wheel step.
    pub zoom_rate: f32,

    /// Smallest distance moved per wheel step.
    pub zoom_min_step: f32,

    /// Vertical field of view in degrees.
    pub fov_degrees: f32,

    /// Near clipping plane.
    pub near: f32,

    /// Far clipping plane.
    pub far: f32,

    /// Offset of the distance label from its projected anchor, in pixels
    /// (x right, y down).
    pub label_offset: Vec2,

    /// Whether clouds without pixel coordinates still get a nearest match.
    pub fallback_without_pixel_map: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            baseline: CameraState::default(),
            rotation_step_degrees: 10.0,
            orbit_sensitivity: 0.2,
            pan_speed: 0.002,
            zoom_rate: 0.1,
            zoom_min_step: 1.0,
            fov_degrees: 45.0,
            near: 0.1,
            far: 10000.0,
            label_offset: Vec2::new(5.0, -5.0),
            fallback_without_pixel_map: false,
        }
    }
}

impl Options {
    /// Parses options from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes options to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert_eq!(options.rotation_step_degrees, 10.0);
        assert_eq!(options.fov_degrees, 45.0);
        assert!(!options.fallback_without_pixel_map);
        assert_eq!(options.baseline.up, Vec3::NEG_Y);
    }

    #[test]
    fn test_json_round_trip() {
        let mut options = Options::default();
        options.baseline.eye = Vec3::new(1.0, 2.0, 3.0);
        options.pan_speed = 0.01;

        let json = options.to_json().unwrap();
        let parsed = Options::from_json(&json).unwrap();
        assert_eq!(parsed, options);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let parsed = Options::from_json(r#"{ "fov_degrees": 60.0 }"#).unwrap();
        assert_eq!(parsed.fov_degrees, 60.0);
        assert_eq!(parsed.near, 0.1);
    }

    #[test]
    fn test_invalid_json() {
        assert!(Options::from_json("{ not json").is_err());
    }
}
