//! Camera eye/center/up state.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{PixlinkError, Result};

/// Below this length a view direction or up vector counts as zero.
pub const DEGENERATE_EPSILON: f32 = 1e-6;

/// Orbit camera basis: where the eye is, what it looks at, and which way is up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    /// Camera position.
    pub eye: Vec3,
    /// Look-at target.
    pub center: Vec3,
    /// Up vector, unit length.
    pub up: Vec3,
}

impl CameraState {
    /// Creates a validated camera state with a normalized up vector.
    ///
    /// Rejects `eye == center`, a zero up vector, and an up vector parallel
    /// to the view direction.
    pub fn new(eye: Vec3, center: Vec3, up: Vec3) -> Result<Self> {
        if !(eye.is_finite() && center.is_finite() && up.is_finite()) {
            return Err(PixlinkError::DegenerateCamera("non-finite component"));
        }
        let view = eye - center;
        if view.length() < DEGENERATE_EPSILON {
            return Err(PixlinkError::DegenerateCamera("eye and center coincide"));
        }
        if up.length() < DEGENERATE_EPSILON {
            return Err(PixlinkError::DegenerateCamera("up vector is zero"));
        }
        let up = up.normalize();
        if view.normalize().cross(up).length() < DEGENERATE_EPSILON {
            return Err(PixlinkError::DegenerateCamera(
                "up vector is parallel to the view direction",
            ));
        }
        Ok(Self { eye, center, up })
    }

    /// Distance from eye to center.
    pub fn distance(&self) -> f32 {
        self.eye.distance(self.center)
    }
}

impl Default for CameraState {
    /// The viewer's initial viewpoint: eye at the origin looking toward
    /// `(1, 1, 1)` with image-style `-Y` up.
    fn default() -> Self {
        Self {
            eye: Vec3::ZERO,
            center: Vec3::ONE,
            up: Vec3::NEG_Y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let d = CameraState::default();
        let validated = CameraState::new(d.eye, d.center, d.up).unwrap();
        assert_eq!(validated, d);
    }

    #[test]
    fn test_up_is_normalized() {
        let state = CameraState::new(Vec3::Z * 5.0, Vec3::ZERO, Vec3::Y * 3.0).unwrap();
        assert!((state.up.length() - 1.0).abs() < 1e-6);
        assert!((state.distance() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_degenerate() {
        assert!(CameraState::new(Vec3::ONE, Vec3::ONE, Vec3::Y).is_err());
        assert!(CameraState::new(Vec3::Z, Vec3::ZERO, Vec3::ZERO).is_err());
        assert!(CameraState::new(Vec3::Y, Vec3::ZERO, Vec3::Y).is_err());
        assert!(CameraState::new(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::ZERO, Vec3::Y).is_err());
    }
}
