//! Pixel-to-point correspondence.

use glam::{UVec2, Vec3};

use crate::store::PointStore;

/// Result of resolving an image pixel to a loaded point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correspondence {
    /// Index of the matched point in the current cloud.
    pub index: usize,

    /// Whether the pixel was found verbatim in the pixel index.
    pub exact: bool,

    /// The pixel coordinate stored on the matched point.
    pub pixel: UVec2,

    /// The world position of the matched point.
    pub position: Vec3,
}

/// Resolves queried pixels against a [`PointStore`].
///
/// Tries the pixel index first and falls back to a nearest-neighbor scan in
/// pixel space on a miss.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorrespondenceEngine {
    fallback_without_pixel_map: bool,
}

impl CorrespondenceEngine {
    /// Creates an engine that suppresses nearest-neighbor matches for clouds
    /// without a pixel mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether clouds without a pixel mapping still get a nearest match.
    ///
    /// Every point of such a cloud sits at pixel `(0, 0)`, so the match is
    /// always the first point.
    #[must_use]
    pub fn with_unmapped_fallback(mut self, enabled: bool) -> Self {
        self.fallback_without_pixel_map = enabled;
        self
    }

    /// Returns whether unmapped clouds still get a nearest match.
    pub fn unmapped_fallback(&self) -> bool {
        self.fallback_without_pixel_map
    }

    /// Resolves `(u, v)` to a point. Returns `None` if the store is empty.
    pub fn query(&self, store: &PointStore, u: u32, v: u32) -> Option<Correspondence> {
        if store.is_empty() {
            log::info!("no points loaded; nothing to match against ({u}, {v})");
            return None;
        }

        let (index, exact) = if let Some(index) = store.exact_lookup(u, v) {
            (index, true)
        } else if store.has_pixel_mapping() || self.fallback_without_pixel_map {
            log::debug!("no exact match for ({u}, {v}); searching for nearest point");
            (store.nearest_by_pixel(u, v)?, false)
        } else {
            log::debug!("cloud has no pixel mapping; skipping nearest search for ({u}, {v})");
            return None;
        };

        let point = store.points().get(index)?;
        if exact {
            log::debug!("point {index} found at ({u}, {v})");
        } else {
            log::debug!(
                "nearest point {index} found at ({}, {})",
                point.pixel.x,
                point.pixel.y
            );
        }

        Some(Correspondence {
            index,
            exact,
            pixel: point.pixel,
            position: point.position,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::VertexTable;

    fn store_with(pixels: Option<Vec<UVec2>>, n: usize) -> PointStore {
        let positions = (0..n).map(|i| Vec3::new(i as f32, 0.0, 1.0)).collect();
        let mut table = VertexTable::new(positions);
        if let Some(pixels) = pixels {
            table = table.with_pixels(pixels);
        }
        let mut store = PointStore::new();
        store.load(&mut table).unwrap();
        store
    }

    fn scenario_store() -> PointStore {
        store_with(
            Some(vec![
                UVec2::new(0, 0),
                UVec2::new(10, 10),
                UVec2::new(100, 100),
            ]),
            3,
        )
    }

    #[test]
    fn test_exact_match() {
        let store = scenario_store();
        let hit = CorrespondenceEngine::new().query(&store, 10, 10).unwrap();
        assert_eq!(hit.index, 1);
        assert!(hit.exact);
        assert_eq!(hit.position, Vec3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn test_nearest_match() {
        let store = scenario_store();
        let hit = CorrespondenceEngine::new().query(&store, 50, 50).unwrap();
        assert_eq!(hit.index, 1);
        assert!(!hit.exact);
        assert_eq!(hit.pixel, UVec2::new(10, 10));
    }

    #[test]
    fn test_empty_store() {
        let store = PointStore::new();
        assert!(CorrespondenceEngine::new().query(&store, 3, 4).is_none());
        assert!(CorrespondenceEngine::new()
            .with_unmapped_fallback(true)
            .query(&store, 3, 4)
            .is_none());
    }

    #[test]
    fn test_unmapped_cloud_suppresses_fallback() {
        let store = store_with(None, 4);
        assert!(CorrespondenceEngine::new().query(&store, 20, 20).is_none());
    }

    #[test]
    fn test_unmapped_cloud_fallback_opt_in() {
        let store = store_with(None, 4);
        let engine = CorrespondenceEngine::new().with_unmapped_fallback(true);
        assert!(engine.unmapped_fallback());

        let hit = engine.query(&store, 20, 20).unwrap();
        assert_eq!(hit.index, 0);
        assert!(!hit.exact);
    }
}
