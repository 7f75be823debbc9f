//! Point records and the vertex-source seam used to load them.
//!
//! The loader that parses point-cloud files lives outside this crate. It hands
//! over a [`VertexSchema`] describing which optional attributes the dataset
//! carries, followed by a flat list of [`RawVertex`] records.

use glam::{UVec2, Vec3};

use crate::error::{PixlinkError, Result};

/// Color used for points whose dataset carries no color attribute.
pub const DEFAULT_COLOR: [u8; 3] = [255, 255, 255];

/// A single loaded point. Immutable for the lifetime of a load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// World-space position.
    pub position: Vec3,
    /// 8-bit RGB color.
    pub color: [u8; 3],
    /// Pixel coordinate in the reference image, `(0, 0)` when unmapped.
    pub pixel: UVec2,
}

impl Point {
    /// Creates a new point.
    pub fn new(position: Vec3, color: [u8; 3], pixel: UVec2) -> Self {
        Self {
            position,
            color,
            pixel,
        }
    }
}

/// Dataset-wide attribute flags reported by a vertex source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VertexSchema {
    /// Whether every vertex carries an RGB triple.
    pub has_color: bool,
    /// Whether every vertex carries a `(u, v)` pixel coordinate.
    pub has_pixel_coords: bool,
}

/// One vertex record as produced by the loading collaborator.
///
/// Attributes the schema does not declare are ignored by the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawVertex {
    pub position: Vec3,
    pub color: [u8; 3],
    pub pixel: UVec2,
}

impl RawVertex {
    /// A vertex with only a position.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            color: DEFAULT_COLOR,
            pixel: UVec2::ZERO,
        }
    }

    /// Sets the color of this vertex.
    #[must_use]
    pub fn with_color(mut self, color: [u8; 3]) -> Self {
        self.color = color;
        self
    }

    /// Sets the pixel coordinate of this vertex.
    #[must_use]
    pub fn with_pixel(mut self, u: u32, v: u32) -> Self {
        self.pixel = UVec2::new(u, v);
        self
    }
}

/// Anything that can hand a flat list of vertices to the point store.
///
/// `schema` is queried before `read_vertices` so optional attributes are
/// decided up front instead of by probing for them.
pub trait VertexSource {
    /// Returns which optional attributes this source provides.
    fn schema(&self) -> VertexSchema;

    /// Reads all vertex records in file order.
    fn read_vertices(&mut self) -> Result<Vec<RawVertex>>;
}

/// Columnar in-memory vertex source.
///
/// Mirrors how point-cloud formats store properties: one position column plus
/// optional per-attribute columns of the same length.
#[derive(Debug, Clone, Default)]
pub struct VertexTable {
    positions: Vec<Vec3>,
    colors: Option<Vec<[u8; 3]>>,
    pixels: Option<Vec<UVec2>>,
}

impl VertexTable {
    /// Creates a table with only positions.
    pub fn new(positions: Vec<Vec3>) -> Self {
        Self {
            positions,
            colors: None,
            pixels: None,
        }
    }

    /// Adds a color column.
    #[must_use]
    pub fn with_colors(mut self, colors: Vec<[u8; 3]>) -> Self {
        self.colors = Some(colors);
        self
    }

    /// Adds a pixel-coordinate column.
    #[must_use]
    pub fn with_pixels(mut self, pixels: Vec<UVec2>) -> Self {
        self.pixels = Some(pixels);
        self
    }

    /// Returns the number of rows in the position column.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    fn check_column(column: &'static str, expected: usize, actual: usize) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(PixlinkError::SizeMismatch {
                column,
                expected,
                actual,
            })
        }
    }
}

impl VertexSource for VertexTable {
    fn schema(&self) -> VertexSchema {
        VertexSchema {
            has_color: self.colors.is_some(),
            has_pixel_coords: self.pixels.is_some(),
        }
    }

    fn read_vertices(&mut self) -> Result<Vec<RawVertex>> {
        let n = self.positions.len();
        if let Some(colors) = &self.colors {
            Self::check_column("color", n, colors.len())?;
        }
        if let Some(pixels) = &self.pixels {
            Self::check_column("pixel", n, pixels.len())?;
        }

        Ok(self
            .positions
            .iter()
            .enumerate()
            .map(|(i, &position)| RawVertex {
                position,
                color: self.colors.as_ref().map_or(DEFAULT_COLOR, |c| c[i]),
                pixel: self.pixels.as_ref().map_or(UVec2::ZERO, |p| p[i]),
            })
            .collect())
    }
}

impl VertexSource for (VertexSchema, Vec<RawVertex>) {
    fn schema(&self) -> VertexSchema {
        self.0
    }

    fn read_vertices(&mut self) -> Result<Vec<RawVertex>> {
        Ok(std::mem::take(&mut self.1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_schema_reflects_columns() {
        let table = VertexTable::new(vec![Vec3::ZERO]);
        assert_eq!(table.schema(), VertexSchema::default());

        let table = table
            .with_colors(vec![[1, 2, 3]])
            .with_pixels(vec![UVec2::new(4, 5)]);
        let schema = table.schema();
        assert!(schema.has_color);
        assert!(schema.has_pixel_coords);
    }

    #[test]
    fn test_table_defaults_missing_attributes() {
        let mut table = VertexTable::new(vec![Vec3::X, Vec3::Y]);
        let vertices = table.read_vertices().unwrap();
        assert_eq!(vertices.len(), 2);
        assert!(vertices.iter().all(|v| v.color == DEFAULT_COLOR));
        assert!(vertices.iter().all(|v| v.pixel == UVec2::ZERO));
    }

    #[test]
    fn test_table_rejects_short_column() {
        let mut table =
            VertexTable::new(vec![Vec3::X, Vec3::Y]).with_pixels(vec![UVec2::new(1, 1)]);
        let err = table.read_vertices().unwrap_err();
        assert!(matches!(
            err,
            PixlinkError::SizeMismatch {
                column: "pixel",
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_raw_vertex_builder() {
        let v = RawVertex::at(Vec3::Z).with_color([9, 8, 7]).with_pixel(3, 4);
        assert_eq!(v.position, Vec3::Z);
        assert_eq!(v.color, [9, 8, 7]);
        assert_eq!(v.pixel, UVec2::new(3, 4));
    }
}
