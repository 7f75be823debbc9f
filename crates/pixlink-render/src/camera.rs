//! Orbit camera and view management.

use glam::{Mat4, Quat, Vec3};
use pixlink_core::camera_state::DEGENERATE_EPSILON;
use pixlink_core::{CameraState, Result};

/// Closest the eye may be zoomed toward the center.
pub const MIN_DISTANCE: f32 = 1.0;

/// Farthest the eye may be zoomed away from the center. Well below the point
/// where squaring a coordinate overflows `f32`.
pub const MAX_DISTANCE: f32 = 1.0e18;

/// Offset along +Z added to the top view so the view direction is never
/// exactly vertical.
pub const TOP_VIEW_NUDGE: f32 = 0.01;

/// Fixed viewpoints around the current center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPreset {
    /// Looking down +Z with image-style -Y up.
    Front,
    /// Looking down -X from the +X side.
    Right,
    /// Looking down from +Y.
    Top,
}

impl ViewPreset {
    /// Returns display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ViewPreset::Front => "front",
            ViewPreset::Right => "right",
            ViewPreset::Top => "top",
        }
    }
}

/// Rotates `v` by `degrees` about the unit vector `axis`.
fn rotate(v: Vec3, axis: Vec3, degrees: f32) -> Vec3 {
    Quat::from_axis_angle(axis, degrees.to_radians()) * v
}

/// Normalizes `v`, or returns any unit vector perpendicular to `fallback_dir`
/// when `v` is too short to normalize.
fn normalize_or_perpendicular(v: Vec3, fallback_dir: Vec3) -> Vec3 {
    if v.length() < DEGENERATE_EPSILON {
        fallback_dir.any_orthonormal_vector()
    } else {
        v.normalize()
    }
}

/// A camera orbiting a look-at center.
///
/// Holds the live state driven by interaction and the baseline state that
/// [`OrbitCamera::reset`] restores. Every operation keeps `eye != center`
/// and a unit-length up vector.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    live: CameraState,
    baseline: CameraState,
    /// Fraction of the eye-to-center distance moved per zoom step.
    pub zoom_rate: f32,
    /// Smallest distance moved per zoom step.
    pub zoom_min_step: f32,
}

impl OrbitCamera {
    /// Creates a camera whose live and baseline state are `baseline`.
    pub fn new(baseline: CameraState) -> Result<Self> {
        let baseline = CameraState::new(baseline.eye, baseline.center, baseline.up)?;
        Ok(Self {
            live: baseline,
            baseline,
            zoom_rate: 0.1,
            zoom_min_step: 1.0,
        })
    }

    /// Returns the live state.
    #[must_use]
    pub fn state(&self) -> CameraState {
        self.live
    }

    /// Returns the baseline state.
    #[must_use]
    pub fn baseline(&self) -> CameraState {
        self.baseline
    }

    /// Camera position.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        self.live.eye
    }

    /// Look-at target.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.live.center
    }

    /// Up vector.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.live.up
    }

    /// Distance from eye to center.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.live.distance()
    }

    /// Unit direction from the eye toward the center.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.live.center - self.live.eye).normalize()
    }

    /// Screen-space right direction.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        let forward = self.forward();
        normalize_or_perpendicular(forward.cross(self.live.up), forward)
    }

    /// Up direction orthogonal to the view direction.
    fn view_up(&self) -> Vec3 {
        self.right().cross(self.forward()).normalize()
    }

    /// Axis used by pitch: `normalize(cross(normalize(eye - center), up))`.
    fn pitch_axis(&self) -> Vec3 {
        let back = (self.live.eye - self.live.center).normalize();
        normalize_or_perpendicular(back.cross(self.live.up), back)
    }

    /// Restores the live state to the baseline.
    pub fn reset(&mut self) {
        self.live = self.baseline;
        log::debug!("camera reset to baseline");
    }

    /// Replaces the baseline. The live state is untouched until the next
    /// [`reset`](Self::reset).
    ///
    /// A degenerate configuration is rejected and the previous baseline kept.
    pub fn set_baseline(&mut self, eye: Vec3, center: Vec3, up: Vec3) -> Result<()> {
        match CameraState::new(eye, center, up) {
            Ok(state) => {
                self.baseline = state;
                Ok(())
            }
            Err(err) => {
                log::warn!("rejected camera baseline: {err}");
                Err(err)
            }
        }
    }

    /// Jumps to a preset view, keeping the current center and distance.
    pub fn apply_preset(&mut self, preset: ViewPreset) {
        let distance = self.distance();
        let center = self.live.center;
        let (eye, up) = match preset {
            ViewPreset::Front => (center - Vec3::Z * distance, Vec3::NEG_Y),
            ViewPreset::Right => (center + Vec3::X * distance, Vec3::Y),
            ViewPreset::Top => (
                center + Vec3::Y * distance + Vec3::Z * TOP_VIEW_NUDGE,
                Vec3::NEG_Z,
            ),
        };
        self.live.eye = eye;
        self.live.up = up;
        log::debug!("camera preset: {}", preset.name());
    }

    /// Front view.
    pub fn preset_front(&mut self) {
        self.apply_preset(ViewPreset::Front);
    }

    /// Right-side view.
    pub fn preset_right(&mut self) {
        self.apply_preset(ViewPreset::Right);
    }

    /// Top view.
    pub fn preset_top(&mut self) {
        self.apply_preset(ViewPreset::Top);
    }

    /// Rotates the eye about the up axis through the center.
    pub fn yaw(&mut self, degrees: f32) {
        if !degrees.is_finite() {
            return;
        }
        let offset = self.live.eye - self.live.center;
        self.live.eye = self.live.center + rotate(offset, self.live.up, degrees);
    }

    /// Rotates the eye and up vector about the camera's right axis.
    ///
    /// Because up turns with the eye, repeated pitches pass over the poles
    /// without collapsing the basis.
    pub fn pitch(&mut self, degrees: f32) {
        if !degrees.is_finite() {
            return;
        }
        let axis = self.pitch_axis();
        let offset = self.live.eye - self.live.center;
        self.live.eye = self.live.center + rotate(offset, axis, degrees);
        self.live.up = rotate(self.live.up, axis, degrees).normalize();
    }

    /// Rotates the up vector about the view direction.
    pub fn roll(&mut self, degrees: f32) {
        if !degrees.is_finite() {
            return;
        }
        let axis = (self.live.eye - self.live.center).normalize();
        self.live.up = rotate(self.live.up, axis, degrees).normalize();
    }

    /// Drag-to-orbit: yaw by `-dx * sensitivity` then pitch by
    /// `-dy * sensitivity` degrees. Only the eye moves.
    pub fn orbit_drag(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        let yaw_degrees = -dx * sensitivity;
        let pitch_degrees = -dy * sensitivity;
        if !yaw_degrees.is_finite() || !pitch_degrees.is_finite() {
            return;
        }
        let yaw = Quat::from_axis_angle(self.live.up, yaw_degrees.to_radians());
        let pitch = Quat::from_axis_angle(self.pitch_axis(), pitch_degrees.to_radians());
        let offset = self.live.eye - self.live.center;
        self.live.eye = self.live.center + yaw * pitch * offset;
    }

    /// Translates eye and center together in the screen plane.
    ///
    /// The step scales with the eye-to-center distance so panning feels the
    /// same at any zoom level.
    pub fn pan(&mut self, dx: f32, dy: f32, speed_scale: f32) {
        let offset = self.pan_offset(dx, dy, speed_scale);
        let (eye, center) = (self.live.eye + offset, self.live.center + offset);
        if eye.is_finite() && center.is_finite() && eye.distance(center) >= DEGENERATE_EPSILON {
            self.live.eye = eye;
            self.live.center = center;
        }
    }

    /// Moves only the center in the screen plane.
    ///
    /// Ignored if the center would land on the eye.
    pub fn pan_target(&mut self, dx: f32, dy: f32, speed_scale: f32) {
        let center = self.live.center + self.pan_offset(dx, dy, speed_scale);
        if center.is_finite() && self.live.eye.distance(center) >= DEGENERATE_EPSILON {
            self.live.center = center;
        }
    }

    fn pan_offset(&self, dx: f32, dy: f32, speed_scale: f32) -> Vec3 {
        let speed = speed_scale * self.distance();
        let offset = -self.right() * dx * speed + self.view_up() * dy * speed;
        if offset.is_finite() {
            offset
        } else {
            Vec3::ZERO
        }
    }

    /// Moves the eye toward (positive `delta`) or away from the center.
    ///
    /// One unit of `delta` moves `max(zoom_min_step, zoom_rate * distance)`.
    /// The eye never gets closer than [`MIN_DISTANCE`] nor farther than
    /// [`MAX_DISTANCE`].
    pub fn zoom(&mut self, delta: f32) {
        let distance = self.distance();
        if !delta.is_finite() || !distance.is_finite() {
            return;
        }
        let step = delta * (self.zoom_rate * distance).max(self.zoom_min_step);
        let floor = MIN_DISTANCE.min(distance);
        let ceiling = MAX_DISTANCE.max(distance);
        let new_distance = (distance - step).max(floor).min(ceiling);
        let back = (self.live.eye - self.live.center).normalize_or_zero();
        if back == Vec3::ZERO {
            return;
        }
        let eye = self.live.center + back * new_distance;
        if eye.is_finite() && eye != self.live.center {
            self.live.eye = eye;
        }
    }

    /// Returns the view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.live.eye, self.live.center, self.view_up())
    }

    /// Returns a GL-style perspective matrix.
    ///
    /// A non-positive or non-finite aspect ratio falls back to 1.0 and a
    /// non-finite field of view to 45 degrees. `near` is kept positive and
    /// `far` beyond `near`.
    #[must_use]
    pub fn projection_matrix(aspect_ratio: f32, fov_degrees: f32, near: f32, far: f32) -> Mat4 {
        let aspect_ratio = if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
            aspect_ratio
        } else {
            1.0
        };
        let fov_degrees = if fov_degrees.is_finite() {
            fov_degrees.clamp(0.1, 179.0)
        } else {
            45.0
        };
        let fov = fov_degrees.to_radians();
        let near = near.max(1e-4);
        let far = far.max(near * 2.0);
        Mat4::perspective_rh_gl(fov, aspect_ratio, near, far)
    }
}
