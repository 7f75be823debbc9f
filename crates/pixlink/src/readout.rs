//! Text readouts for the presentation layer.

use std::fmt;

use glam::Vec3;
use pixlink_core::CameraState;

/// Formats a selected distance the way the status label shows it.
pub fn format_distance(distance: f32) -> String {
    format!("{distance:.2} m")
}

/// Current camera basis, formatted for an info overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraInfo {
    pub eye: Vec3,
    pub center: Vec3,
    pub up: Vec3,
}

impl CameraInfo {
    /// Single-line form, suitable for a window title.
    pub fn title(&self) -> String {
        format!(
            "Camera: {} | Center: {} | Up: {}",
            Triple(self.eye, 1),
            Triple(self.center, 1),
            Triple(self.up, 2)
        )
    }
}

impl From<CameraState> for CameraInfo {
    fn from(state: CameraState) -> Self {
        Self {
            eye: state.eye,
            center: state.center,
            up: state.up,
        }
    }
}

impl fmt::Display for CameraInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Position: {}", Triple(self.eye, 1))?;
        writeln!(f, "Center: {}", Triple(self.center, 1))?;
        write!(f, "Up: {}", Triple(self.up, 2))
    }
}

/// `(x, y, z)` with a fixed number of decimals.
struct Triple(Vec3, usize);

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Triple(v, p) = *self;
        write!(f, "({:.p$}, {:.p$}, {:.p$})", v.x, v.y, v.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(12.345), "12.35 m");
        assert_eq!(format_distance(0.0), "0.00 m");
    }

    #[test]
    fn test_camera_info_display() {
        let info = CameraInfo {
            eye: Vec3::new(1.0, 2.26, -3.0),
            center: Vec3::ONE,
            up: Vec3::NEG_Y,
        };
        assert_eq!(
            info.to_string(),
            "Position: (1.0, 2.3, -3.0)\nCenter: (1.0, 1.0, 1.0)\nUp: (0.00, -1.00, 0.00)"
        );
        assert_eq!(
            info.title(),
            "Camera: (1.0, 2.3, -3.0) | Center: (1.0, 1.0, 1.0) | Up: (0.00, -1.00, 0.00)"
        );
    }
}
