//! World-to-window projection for overlay placement.

use glam::{Mat4, Vec2, Vec4};

/// A window rectangle in pixels, origin at the bottom-left (GL convention).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// A viewport covering a whole `width` x `height` window.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    /// Width over height, or 1.0 for an empty viewport.
    pub fn aspect_ratio(&self) -> f32 {
        if self.width == 0 || self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    /// Returns true if the viewport has no area.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A projected point in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    /// Horizontal window coordinate.
    pub x: f32,
    /// Vertical window coordinate, measured up from the bottom edge.
    pub y: f32,
    /// Depth in `[0, 1]`.
    pub depth: f32,
}

impl ScreenPoint {
    /// Converts to a top-left-origin position as used by 2D painters.
    pub fn to_top_left(&self, viewport: &Viewport) -> Vec2 {
        Vec2::new(self.x, viewport.height as f32 - self.y)
    }
}

/// Maps world-space points to window coordinates.
pub struct ScreenProjector;

impl ScreenProjector {
    /// Projects `world` through `view`, then `projection`, then the viewport.
    ///
    /// Returns `None` if the point is behind the eye, outside the depth range,
    /// or the viewport is empty.
    pub fn project(
        world: glam::Vec3,
        view: &Mat4,
        projection: &Mat4,
        viewport: &Viewport,
    ) -> Option<ScreenPoint> {
        if viewport.is_empty() {
            return None;
        }

        let clip = *projection * *view * Vec4::from((world, 1.0));
        if !clip.is_finite() || clip.w <= f32::EPSILON {
            return None;
        }

        let ndc = clip.truncate() / clip.w;
        if !(-1.0..=1.0).contains(&ndc.z) {
            return None;
        }

        Some(ScreenPoint {
            x: viewport.x as f32 + viewport.width as f32 * (ndc.x + 1.0) * 0.5,
            y: viewport.y as f32 + viewport.height as f32 * (ndc.y + 1.0) * 0.5,
            depth: (ndc.z + 1.0) * 0.5,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::OrbitCamera;
    use glam::Vec3;
    use pixlink_core::CameraState;

    fn setup() -> (Mat4, Mat4, Viewport) {
        let camera =
            OrbitCamera::new(CameraState::new(Vec3::Z * 10.0, Vec3::ZERO, Vec3::Y).unwrap())
                .unwrap();
        let viewport = Viewport::new(800, 600);
        let projection =
            OrbitCamera::projection_matrix(viewport.aspect_ratio(), 45.0, 0.1, 1000.0);
        (camera.view_matrix(), projection, viewport)
    }

    #[test]
    fn test_center_projects_to_middle() {
        let (view, projection, viewport) = setup();
        let p = ScreenProjector::project(Vec3::ZERO, &view, &projection, &viewport).unwrap();
        assert!((p.x - 400.0).abs() < 1e-3);
        assert!((p.y - 300.0).abs() < 1e-3);
        assert!(p.depth > 0.0 && p.depth < 1.0);
    }

    #[test]
    fn test_up_is_up_on_screen() {
        let (view, projection, viewport) = setup();
        let p = ScreenProjector::project(Vec3::Y, &view, &projection, &viewport).unwrap();
        assert!(p.y > 300.0);
        let top_left = p.to_top_left(&viewport);
        assert!(top_left.y < 300.0);
    }

    #[test]
    fn test_behind_eye_is_rejected() {
        let (view, projection, viewport) = setup();
        assert!(
            ScreenProjector::project(Vec3::Z * 20.0, &view, &projection, &viewport).is_none()
        );
    }

    #[test]
    fn test_beyond_far_plane_is_rejected() {
        let (view, projection, viewport) = setup();
        assert!(
            ScreenProjector::project(Vec3::NEG_Z * 5000.0, &view, &projection, &viewport)
                .is_none()
        );
    }

    #[test]
    fn test_empty_viewport() {
        let (view, projection, _) = setup();
        let empty = Viewport::new(0, 600);
        assert!(ScreenProjector::project(Vec3::ZERO, &view, &projection, &empty).is_none());
        assert_eq!(empty.aspect_ratio(), 1.0);
    }

    #[test]
    fn test_viewport_offset() {
        let (view, projection, _) = setup();
        let viewport = Viewport {
            x: 100,
            y: 50,
            width: 800,
            height: 600,
        };
        let p = ScreenProjector::project(Vec3::ZERO, &view, &projection, &viewport).unwrap();
        assert!((p.x - 500.0).abs() < 1e-3);
        assert!((p.y - 350.0).abs() < 1e-3);
    }
}
