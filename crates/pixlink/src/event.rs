//! Discrete input events delivered to a [`Viewer`](crate::Viewer).

use pixlink_core::CameraState;
use pixlink_render::ViewPreset;

/// Mouse button held during a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Orbits the eye around the center.
    Left,
    /// Pans eye and center together.
    Right,
    /// Pans the center only.
    Middle,
}

/// Relative camera rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationAxis {
    Yaw,
    Pitch,
    Roll,
}

/// Everything the surrounding application can ask the viewer to do.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerEvent {
    /// A click on the reference image, in native image pixels.
    ImageClick { u: u32, v: u32 },

    /// Mouse motion with a button held, in window pixels.
    Drag { button: MouseButton, dx: f32, dy: f32 },

    /// Wheel motion in notches; positive zooms in.
    Wheel { steps: f32 },

    /// Jump to a preset view.
    Preset(ViewPreset),

    /// Rotate by an explicit angle in degrees.
    Rotate { axis: RotationAxis, degrees: f32 },

    /// Rotate by the configured button step, reversed if `reverse`.
    RotateStep { axis: RotationAxis, reverse: bool },

    /// Restore the baseline view.
    Reset,

    /// Replace the baseline view and jump to it.
    SetBaseline(CameraState),

    /// The 3D view was resized.
    Resize { width: u32, height: u32 },
}
