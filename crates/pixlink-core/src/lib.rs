//! Core abstractions for pixlink.
//!
//! This crate provides the data side of the image/point-cloud viewer:
//! - [`PointStore`] owning one generation of loaded points and their pixel index
//! - [`CorrespondenceEngine`] resolving image pixels to points
//! - [`HighlightSegment`] and [`CameraState`] value types
//! - Configuration [`Options`] and the [`PixlinkError`] taxonomy

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Point indices and pixel coordinates are converted to floats for tests and logging
#![allow(clippy::cast_precision_loss)]

pub mod camera_state;
pub mod correspondence;
pub mod error;
pub mod highlight;
pub mod options;
pub mod point;
pub mod store;

pub use camera_state::CameraState;
pub use correspondence::{Correspondence, CorrespondenceEngine};
pub use error::{PixlinkError, Result};
pub use highlight::HighlightSegment;
pub use options::Options;
pub use point::{Point, RawVertex, VertexSchema, VertexSource, VertexTable, DEFAULT_COLOR};
pub use store::{CloudSnapshot, LoadSummary, PixelIndex, PointStore};

// Re-export glam types for convenience
pub use glam::{Mat4, UVec2, Vec2, Vec3, Vec4};
