//! Error types for pixlink.

use thiserror::Error;

/// The main error type for pixlink operations.
#[derive(Error, Debug)]
pub enum PixlinkError {
    /// The vertex source could not be read at all.
    #[error("vertex source unreadable: {0}")]
    SourceUnreadable(String),

    /// A single vertex record could not be turned into a point.
    #[error("malformed vertex {index}: {reason}")]
    MalformedVertex { index: usize, reason: String },

    /// A per-vertex column does not line up with the position column.
    #[error("{column} column size mismatch: expected {expected}, got {actual}")]
    SizeMismatch {
        column: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A point index past the end of the current cloud.
    #[error("point index {index} out of range (cloud has {len} points)")]
    IndexOutOfRange { index: usize, len: usize },

    /// A camera configuration with no usable view direction.
    #[error("degenerate camera: {0}")]
    DegenerateCamera(&'static str),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl PixlinkError {
    /// Returns true for errors raised while loading a point cloud.
    ///
    /// A failed load never replaces the cloud that was loaded before it.
    #[must_use]
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Self::SourceUnreadable(_)
                | Self::MalformedVertex { .. }
                | Self::SizeMismatch { .. }
                | Self::IoError(_)
        )
    }
}

/// A specialized Result type for pixlink operations.
pub type Result<T> = std::result::Result<T, PixlinkError>;
