//! pixlink: correlate pixels of a reference image with points of a 3D point cloud.
//!
//! A point cloud whose vertices remember which image pixel they came from is
//! shown next to that image. Clicking a pixel finds the matching 3D point
//! (exactly, or the nearest one in pixel space), draws a segment from the
//! camera to it, and labels the segment with its length.
//!
//! # Quick Start
//!
//! ```no_run
//! use pixlink::*;
//!
//! fn main() -> Result<()> {
//!     let mut viewer = init(Options::default())?;
//!     viewer.resize(1280, 720);
//!
//!     let positions = vec![Vec3::new(0.0, 0.0, 5.0), Vec3::new(1.0, 0.0, 5.0)];
//!     let pixels = vec![UVec2::new(0, 0), UVec2::new(10, 10)];
//!     viewer.load(&mut VertexTable::new(positions).with_pixels(pixels))?;
//!
//!     viewer.handle(ViewerEvent::ImageClick { u: 9, v: 9 })?;
//!     if let Some(label) = viewer.distance_label() {
//!         println!("{label}");
//!     }
//!
//!     let frame = viewer.frame();
//!     if let Some(annotation) = frame.annotation {
//!         println!("draw '{}' at {}", annotation.text, annotation.position);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`PointStore`] owns the loaded points and the pixel index
//! - [`CorrespondenceEngine`] resolves pixels to points
//! - [`OrbitCamera`] holds the live and baseline camera
//! - [`ScreenProjector`] places labels on screen
//! - [`Viewer`] ties them together behind a single event entry point

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
// Widget and image sizes are converted between integer and float pixels
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]

mod event;
mod image_fit;
mod init;
mod readout;
mod viewer;

pub use event::{MouseButton, RotationAxis, ViewerEvent};
pub use image_fit::ImageFit;
pub use init::{init, init_logging};
pub use readout::{format_distance, CameraInfo};
pub use viewer::{Annotation, Frame, Viewer};

// Re-export core types
pub use pixlink_core::{
    camera_state::CameraState,
    correspondence::{Correspondence, CorrespondenceEngine},
    error::{PixlinkError, Result},
    highlight::HighlightSegment,
    options::Options,
    point::{Point, RawVertex, VertexSchema, VertexSource, VertexTable, DEFAULT_COLOR},
    store::{CloudSnapshot, LoadSummary, PixelIndex, PointStore},
    Mat4, UVec2, Vec2, Vec3, Vec4,
};

// Re-export render types
pub use pixlink_render::{
    OrbitCamera, ScreenPoint, ScreenProjector, ViewPreset, Viewport, MAX_DISTANCE, MIN_DISTANCE,
    TOP_VIEW_NUDGE,
};
