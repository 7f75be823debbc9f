//! View side of pixlink.
//!
//! This crate provides:
//! - [`OrbitCamera`]: eye/center/up camera with presets, rotations, pan and zoom
//! - [`ScreenProjector`]: world-to-window projection for overlay labels

// Graphics code intentionally uses casts for pixel sizes and coordinates
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod camera;
pub mod projector;

pub use camera::{OrbitCamera, ViewPreset, MAX_DISTANCE, MIN_DISTANCE, TOP_VIEW_NUDGE};
pub use projector::{ScreenPoint, ScreenProjector, Viewport};
