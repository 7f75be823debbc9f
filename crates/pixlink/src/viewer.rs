//! The viewer session: one point store, one camera, one highlight.

use glam::{Mat4, Vec2};
use pixlink_core::{
    CameraState, Correspondence, CorrespondenceEngine, HighlightSegment, LoadSummary, Options,
    PointStore, Result, VertexSource,
};
use pixlink_render::{OrbitCamera, ScreenProjector, ViewPreset, Viewport};

use crate::event::{MouseButton, RotationAxis, ViewerEvent};
use crate::readout::{format_distance, CameraInfo};

/// A text label pinned to a projected world position.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Label position in window pixels, origin at the top-left.
    pub position: Vec2,
    /// Label text.
    pub text: String,
}

/// Everything needed to draw one frame of the 3D view.
#[derive(Debug, Clone)]
pub struct Frame {
    pub view: Mat4,
    pub projection: Mat4,
    pub viewport: Viewport,
    /// Segment to draw from the eye to the selected point.
    pub highlight: Option<HighlightSegment>,
    /// Distance label near the segment midpoint, when it is on screen.
    pub annotation: Option<Annotation>,
}

/// State of one viewing session.
///
/// Owns the loaded cloud, the camera, and the active highlight. The
/// surrounding application forwards its input as [`ViewerEvent`]s and asks
/// for a [`Frame`] whenever it redraws.
#[derive(Debug)]
pub struct Viewer {
    options: Options,
    store: PointStore,
    engine: CorrespondenceEngine,
    camera: OrbitCamera,
    highlight: Option<HighlightSegment>,
    last_match: Option<Correspondence>,
    viewport: Viewport,
}

impl Viewer {
    /// Creates a session whose camera starts at `options.baseline`.
    pub fn new(options: Options) -> Result<Self> {
        let mut camera = OrbitCamera::new(options.baseline)?;
        camera.zoom_rate = options.zoom_rate;
        camera.zoom_min_step = options.zoom_min_step;
        let engine =
            CorrespondenceEngine::new().with_unmapped_fallback(options.fallback_without_pixel_map);

        Ok(Self {
            options,
            store: PointStore::new(),
            engine,
            camera,
            highlight: None,
            last_match: None,
            viewport: Viewport::default(),
        })
    }

    /// Returns the session options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Returns the point store.
    pub fn store(&self) -> &PointStore {
        &self.store
    }

    /// Returns the camera.
    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    /// Returns the current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Returns the active highlight segment.
    pub fn highlight(&self) -> Option<HighlightSegment> {
        self.highlight
    }

    /// Returns the correspondence found by the last image click.
    pub fn last_match(&self) -> Option<Correspondence> {
        self.last_match
    }

    /// Replaces the loaded point cloud.
    ///
    /// A successful load clears the highlight. A failed load changes nothing.
    pub fn load(&mut self, source: &mut dyn VertexSource) -> Result<LoadSummary> {
        match self.store.load(source) {
            Ok(summary) => {
                self.highlight = None;
                self.last_match = None;
                Ok(summary)
            }
            Err(err) => {
                log::warn!("point cloud load failed, keeping previous cloud: {err}");
                Err(err)
            }
        }
    }

    /// Resolves an image pixel and updates the highlight.
    pub fn click_pixel(&mut self, u: u32, v: u32) -> Option<Correspondence> {
        let found = self.engine.query(&self.store, u, v);
        self.highlight = found.map(|c| HighlightSegment::new(self.camera.eye(), c.position));
        self.last_match = found;
        if let Some(segment) = self.highlight {
            log::info!("selected distance {}", format_distance(segment.length()));
        }
        found
    }

    /// Applies one input event.
    ///
    /// Only [`ViewerEvent::SetBaseline`] can fail; the session is unchanged
    /// when it does.
    pub fn handle(&mut self, event: ViewerEvent) -> Result<()> {
        match event {
            ViewerEvent::ImageClick { u, v } => {
                self.click_pixel(u, v);
            }
            ViewerEvent::Drag { button, dx, dy } => match button {
                MouseButton::Left => {
                    self.camera
                        .orbit_drag(dx, dy, self.options.orbit_sensitivity);
                }
                MouseButton::Right => self.camera.pan(dx, dy, self.options.pan_speed),
                MouseButton::Middle => self.camera.pan_target(dx, dy, self.options.pan_speed),
            },
            ViewerEvent::Wheel { steps } => self.camera.zoom(steps),
            ViewerEvent::Preset(preset) => self.camera.apply_preset(preset),
            ViewerEvent::Rotate { axis, degrees } => self.rotate(axis, degrees),
            ViewerEvent::RotateStep { axis, reverse } => {
                let step = self.options.rotation_step_degrees;
                self.rotate(axis, if reverse { -step } else { step });
            }
            ViewerEvent::Reset => self.camera.reset(),
            ViewerEvent::SetBaseline(state) => self.set_baseline(state)?,
            ViewerEvent::Resize { width, height } => self.resize(width, height),
        }
        Ok(())
    }

    fn rotate(&mut self, axis: RotationAxis, degrees: f32) {
        match axis {
            RotationAxis::Yaw => self.camera.yaw(degrees),
            RotationAxis::Pitch => self.camera.pitch(degrees),
            RotationAxis::Roll => self.camera.roll(degrees),
        }
    }

    /// Replaces the baseline view and jumps to it.
    pub fn set_baseline(&mut self, state: CameraState) -> Result<()> {
        self.camera.set_baseline(state.eye, state.center, state.up)?;
        self.options.baseline = self.camera.baseline();
        self.camera.reset();
        log::info!("camera baseline updated");
        Ok(())
    }

    /// Jumps to a preset view.
    pub fn preset(&mut self, preset: ViewPreset) {
        self.camera.apply_preset(preset);
    }

    /// Updates the size of the 3D view.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width, height);
    }

    /// Length of the active highlight, `None` when no segment is active.
    pub fn highlight_distance(&self) -> Option<f32> {
        self.highlight.map(|s| s.length())
    }

    /// Status label text, `None` when the label should be hidden.
    pub fn distance_label(&self) -> Option<String> {
        self.highlight_distance()
            .map(|d| format!("Selected distance: {}", format_distance(d)))
    }

    /// Current camera basis for an info overlay.
    pub fn camera_info(&self) -> CameraInfo {
        self.camera.state().into()
    }

    /// One-line camera readout for a window title.
    pub fn camera_title(&self) -> String {
        self.camera_info().title()
    }

    /// View matrix for the current camera.
    pub fn view_matrix(&self) -> Mat4 {
        self.camera.view_matrix()
    }

    /// Projection matrix for the current viewport and options.
    pub fn projection_matrix(&self) -> Mat4 {
        OrbitCamera::projection_matrix(
            self.viewport.aspect_ratio(),
            self.options.fov_degrees,
            self.options.near,
            self.options.far,
        )
    }

    /// Builds the per-frame draw state.
    pub fn frame(&self) -> Frame {
        let view = self.view_matrix();
        let projection = self.projection_matrix();
        let annotation = self.highlight.and_then(|segment| {
            let anchor =
                ScreenProjector::project(segment.midpoint(), &view, &projection, &self.viewport)?;
            Some(Annotation {
                position: anchor.to_top_left(&self.viewport) + self.options.label_offset,
                text: format_distance(segment.length()),
            })
        });

        Frame {
            view,
            projection,
            viewport: self.viewport,
            highlight: self.highlight,
            annotation,
        }
    }
}
