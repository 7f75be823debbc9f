//! The segment drawn from the eye to a selected point.

use glam::Vec3;

/// Line segment from the camera eye to a matched point.
///
/// Recomputed on each successful correspondence query and dropped whenever
/// the cloud is reloaded or a query finds nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightSegment {
    /// Eye position at the time of the query.
    pub start: Vec3,
    /// Position of the matched point.
    pub end: Vec3,
}

impl HighlightSegment {
    /// Creates a new segment.
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }

    /// Euclidean length of the segment.
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Midpoint of the segment, where the distance label is anchored.
    pub fn midpoint(&self) -> Vec3 {
        (self.start + self.end) * 0.5
    }
}
