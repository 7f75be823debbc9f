//! Point storage and pixel-coordinate lookup.
//!
//! A [`PointStore`] holds exactly one generation of loaded data: the ordered
//! point list and, when the dataset maps points to image pixels, a
//! [`PixelIndex`]. Loading builds a complete new generation first and only
//! then swaps it in, so readers holding a [`CloudSnapshot`] never see a
//! half-built index.

use std::collections::HashMap;
use std::sync::Arc;

use glam::UVec2;

use crate::error::{PixlinkError, Result};
use crate::point::{Point, VertexSchema, VertexSource, DEFAULT_COLOR};

/// Map from pixel coordinate to point index.
#[derive(Debug, Clone, Default)]
pub struct PixelIndex {
    map: HashMap<(u32, u32), usize>,
}

impl PixelIndex {
    /// Builds an index over `points`. Later points overwrite earlier points
    /// that share a pixel coordinate.
    ///
    /// Returns the index and the number of overwritten entries.
    pub fn build(points: &[Point]) -> (Self, usize) {
        let mut map = HashMap::with_capacity(points.len());
        let mut duplicates = 0;
        for (i, p) in points.iter().enumerate() {
            if map.insert((p.pixel.x, p.pixel.y), i).is_some() {
                duplicates += 1;
            }
        }
        (Self { map }, duplicates)
    }

    /// Looks up the point index stored for a pixel.
    pub fn get(&self, u: u32, v: u32) -> Option<usize> {
        self.map.get(&(u, v)).copied()
    }

    /// Returns the number of distinct pixel keys.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if no pixel is indexed.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// One consistent generation of loaded data.
#[derive(Debug, Default)]
pub struct CloudSnapshot {
    points: Vec<Point>,
    pixel_index: Option<PixelIndex>,
    schema: VertexSchema,
    generation: u64,
}

impl CloudSnapshot {
    /// Returns the points in load order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Returns the pixel index, if the dataset carries pixel coordinates.
    pub fn pixel_index(&self) -> Option<&PixelIndex> {
        self.pixel_index.as_ref()
    }

    /// Returns the attribute flags of the dataset.
    pub fn schema(&self) -> VertexSchema {
        self.schema
    }

    /// Returns the load counter this snapshot was created by.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Outcome of a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    /// Number of points in the new cloud.
    pub point_count: usize,
    /// Attribute flags of the new cloud.
    pub schema: VertexSchema,
    /// Pixel-index entries overwritten by later points with the same `(u, v)`.
    pub duplicate_pixels: usize,
    /// Load counter of the new generation.
    pub generation: u64,
}

impl LoadSummary {
    /// Returns true if the load produced an empty cloud.
    ///
    /// This is a valid state, not an error; queries simply find nothing.
    pub fn is_empty(&self) -> bool {
        self.point_count == 0
    }
}

/// Owner of the loaded point cloud and its pixel index.
#[derive(Debug, Default)]
pub struct PointStore {
    current: Arc<CloudSnapshot>,
}

impl PointStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a new point cloud, replacing the current one.
    ///
    /// On error the previously loaded cloud is kept untouched.
    pub fn load(&mut self, source: &mut dyn VertexSource) -> Result<LoadSummary> {
        let schema = source.schema();
        let raw = source.read_vertices()?;

        let mut points = Vec::with_capacity(raw.len());
        for (index, vertex) in raw.into_iter().enumerate() {
            if !vertex.position.is_finite() {
                return Err(PixlinkError::MalformedVertex {
                    index,
                    reason: format!("non-finite position {}", vertex.position),
                });
            }
            let color = if schema.has_color {
                vertex.color
            } else {
                DEFAULT_COLOR
            };
            let pixel = if schema.has_pixel_coords {
                vertex.pixel
            } else {
                UVec2::ZERO
            };
            points.push(Point::new(vertex.position, color, pixel));
        }

        let (pixel_index, duplicate_pixels) = if schema.has_pixel_coords {
            let (index, duplicates) = PixelIndex::build(&points);
            (Some(index), duplicates)
        } else {
            (None, 0)
        };

        let generation = self.current.generation + 1;
        let snapshot = CloudSnapshot {
            points,
            pixel_index,
            schema,
            generation,
        };
        let summary = LoadSummary {
            point_count: snapshot.points.len(),
            schema,
            duplicate_pixels,
            generation,
        };

        self.current = Arc::new(snapshot);

        if duplicate_pixels > 0 {
            log::warn!(
                "{duplicate_pixels} points share a pixel coordinate with a later point; the later point wins"
            );
        }
        if summary.is_empty() {
            log::info!("loaded empty point cloud (generation {generation})");
        } else {
            log::info!(
                "loaded {} points (color: {}, pixel coords: {}, generation {generation})",
                summary.point_count,
                schema.has_color,
                schema.has_pixel_coords
            );
        }

        Ok(summary)
    }

    /// Drops the current cloud.
    pub fn clear(&mut self) {
        let generation = self.current.generation + 1;
        self.current = Arc::new(CloudSnapshot {
            generation,
            ..CloudSnapshot::default()
        });
    }

    /// Returns a handle to the current generation.
    pub fn snapshot(&self) -> Arc<CloudSnapshot> {
        Arc::clone(&self.current)
    }

    /// Returns true if no points are loaded.
    pub fn is_empty(&self) -> bool {
        self.current.points.is_empty()
    }

    /// Returns the number of loaded points.
    pub fn len(&self) -> usize {
        self.current.points.len()
    }

    /// Returns the attribute flags of the current cloud.
    pub fn schema(&self) -> VertexSchema {
        self.current.schema
    }

    /// Returns the load counter of the current cloud.
    pub fn generation(&self) -> u64 {
        self.current.generation
    }

    /// Returns true if the current cloud maps points to image pixels.
    pub fn has_pixel_mapping(&self) -> bool {
        self.current.pixel_index.is_some()
    }

    /// Returns the points in load order.
    pub fn points(&self) -> &[Point] {
        &self.current.points
    }

    /// Returns the point at `index`.
    pub fn point_at(&self, index: usize) -> Result<&Point> {
        let len = self.current.points.len();
        self.current
            .points
            .get(index)
            .ok_or(PixlinkError::IndexOutOfRange { index, len })
    }

    /// Looks up the point stored at exactly `(u, v)`.
    pub fn exact_lookup(&self, u: u32, v: u32) -> Option<usize> {
        self.current.pixel_index.as_ref()?.get(u, v)
    }

    /// Finds the point whose pixel coordinate is closest to `(u, v)`.
    ///
    /// Brute-force scan. Ties go to the lowest index. `None` only when the
    /// cloud is empty.
    pub fn nearest_by_pixel(&self, u: u32, v: u32) -> Option<usize> {
        let mut best: Option<(usize, u128)> = None;
        for (i, p) in self.current.points.iter().enumerate() {
            let d = pixel_distance_sq(p.pixel, u, v);
            if best.map_or(true, |(_, best_d)| d < best_d) {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| i)
    }
}

/// Squared Euclidean distance between two pixel coordinates, exact.
pub fn pixel_distance_sq(pixel: UVec2, u: u32, v: u32) -> u128 {
    let du = u128::from(pixel.x.abs_diff(u));
    let dv = u128::from(pixel.y.abs_diff(v));
    du * du + dv * dv
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use proptest::prelude::*;

    use super::*;
    use crate::point::{RawVertex, VertexTable};

    fn mapped_store(pixels: &[(u32, u32)]) -> PointStore {
        let positions = (0..pixels.len()).map(|i| Vec3::splat(i as f32)).collect();
        let pixels = pixels.iter().map(|&(u, v)| UVec2::new(u, v)).collect();
        let mut store = PointStore::new();
        store
            .load(&mut VertexTable::new(positions).with_pixels(pixels))
            .unwrap();
        store
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = PointStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert_eq!(store.nearest_by_pixel(0, 0), None);
        assert_eq!(store.exact_lookup(0, 0), None);
    }

    #[test]
    fn test_load_three_points() {
        let store = mapped_store(&[(0, 0), (10, 10), (100, 100)]);
        assert_eq!(store.len(), 3);
        assert_eq!(store.exact_lookup(10, 10), Some(1));
        assert_eq!(store.exact_lookup(50, 50), None);
        assert_eq!(store.nearest_by_pixel(50, 50), Some(1));
    }

    #[test]
    fn test_duplicate_pixels_last_write_wins() {
        let mut store = PointStore::new();
        let mut table = VertexTable::new(vec![Vec3::X, Vec3::Y, Vec3::Z]).with_pixels(vec![
            UVec2::new(5, 5),
            UVec2::new(1, 1),
            UVec2::new(5, 5),
        ]);
        let summary = store.load(&mut table).unwrap();
        assert_eq!(summary.duplicate_pixels, 1);
        assert_eq!(store.exact_lookup(5, 5), Some(2));
    }

    #[test]
    fn test_missing_attributes_use_defaults() {
        let mut store = PointStore::new();
        let schema = VertexSchema::default();
        let raw = vec![RawVertex::at(Vec3::ONE).with_color([1, 2, 3]).with_pixel(7, 8)];
        store.load(&mut (schema, raw)).unwrap();

        let p = store.point_at(0).unwrap();
        assert_eq!(p.color, DEFAULT_COLOR);
        assert_eq!(p.pixel, UVec2::ZERO);
        assert!(!store.has_pixel_mapping());
        assert_eq!(store.exact_lookup(0, 0), None);
    }

    #[test]
    fn test_point_at_out_of_range() {
        let store = mapped_store(&[(0, 0)]);
        assert!(store.point_at(0).is_ok());
        assert!(matches!(
            store.point_at(1),
            Err(PixlinkError::IndexOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn test_failed_load_keeps_previous_cloud() {
        let mut store = mapped_store(&[(1, 2), (3, 4)]);
        let generation = store.generation();

        let mut bad = VertexTable::new(vec![Vec3::ZERO, Vec3::new(f32::NAN, 0.0, 0.0)]);
        let err = store.load(&mut bad).unwrap_err();
        assert!(err.is_load_error());
        assert!(matches!(err, PixlinkError::MalformedVertex { index: 1, .. }));

        assert_eq!(store.len(), 2);
        assert_eq!(store.generation(), generation);
        assert_eq!(store.exact_lookup(3, 4), Some(1));
    }

    #[test]
    fn test_empty_load_is_not_an_error() {
        let mut store = mapped_store(&[(1, 2)]);
        let summary = store
            .load(&mut VertexTable::new(Vec::new()).with_pixels(Vec::new()))
            .unwrap();
        assert!(summary.is_empty());
        assert!(store.is_empty());
        assert_eq!(store.nearest_by_pixel(1, 2), None);
    }

    #[test]
    fn test_snapshot_survives_reload() {
        let mut store = mapped_store(&[(1, 1)]);
        let old = store.snapshot();

        store
            .load(&mut VertexTable::new(vec![Vec3::X, Vec3::Y]).with_pixels(vec![
                UVec2::new(2, 2),
                UVec2::new(3, 3),
            ]))
            .unwrap();

        assert_eq!(old.points().len(), 1);
        assert_eq!(old.pixel_index().and_then(|i| i.get(1, 1)), Some(0));
        assert_eq!(store.len(), 2);
        assert!(store.generation() > old.generation());
    }

    #[test]
    fn test_clear() {
        let mut store = mapped_store(&[(1, 1)]);
        store.clear();
        assert!(store.is_empty());
        assert!(!store.has_pixel_mapping());
    }

    #[test]
    fn test_pixel_distance_does_not_overflow() {
        let d = pixel_distance_sq(UVec2::new(u32::MAX, u32::MAX), 0, 0);
        assert_eq!(d, 2 * u128::from(u32::MAX) * u128::from(u32::MAX));
    }

    proptest! {
        #[test]
        fn prop_exact_and_nearest_agree(
            pixels in prop::collection::hash_set((0u32..500, 0u32..500), 1..40),
            pick in any::<prop::sample::Index>(),
        ) {
            let pixels: Vec<_> = pixels.into_iter().collect();
            let store = mapped_store(&pixels);
            let (u, v) = pixels[pick.index(pixels.len())];
            let exact = store.exact_lookup(u, v);
            prop_assert!(exact.is_some());
            prop_assert_eq!(exact, store.nearest_by_pixel(u, v));
        }

        #[test]
        fn prop_nearest_is_some_for_non_empty(
            pixels in prop::collection::vec((0u32..1000, 0u32..1000), 0..30),
            u in 0u32..2000,
            v in 0u32..2000,
        ) {
            let store = mapped_store(&pixels);
            prop_assert_eq!(store.nearest_by_pixel(u, v).is_some(), !pixels.is_empty());
        }

        #[test]
        fn prop_nearest_tie_prefers_lowest_index(
            center in (100u32..1000, 100u32..1000),
            offset in 1u32..100,
        ) {
            let (cu, cv) = center;
            // Both points are `offset` away from the query.
            let store = mapped_store(&[(cu + offset, cv), (cu - offset, cv), (cu, cv + offset)]);
            for _ in 0..3 {
                prop_assert_eq!(store.nearest_by_pixel(cu, cv), Some(0));
            }
        }

        #[test]
        fn prop_nearest_is_minimal(
            pixels in prop::collection::vec((0u32..300, 0u32..300), 1..30),
            u in 0u32..300,
            v in 0u32..300,
        ) {
            let store = mapped_store(&pixels);
            let i = store.nearest_by_pixel(u, v).unwrap();
            let best = pixel_distance_sq(store.point_at(i).unwrap().pixel, u, v);
            for (j, p) in store.points().iter().enumerate() {
                let d = pixel_distance_sq(p.pixel, u, v);
                prop_assert!(d >= best);
                if d == best {
                    prop_assert!(j >= i);
                }
            }
        }
    }
}
