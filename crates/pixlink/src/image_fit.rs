//! Mapping between a widget showing the reference image and the image itself.
//!
//! The image is drawn scaled to fit the widget with its aspect ratio kept and
//! centered, leaving letterbox margins on two sides.

use glam::UVec2;

/// Aspect-preserving, centered placement of an image inside a widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageFit {
    image: UVec2,
    scale: f64,
    offset_x: i64,
    offset_y: i64,
    scaled_width: i64,
    scaled_height: i64,
}

impl ImageFit {
    /// Computes the placement. Returns `None` if either size has no area.
    pub fn new(
        image_width: u32,
        image_height: u32,
        widget_width: u32,
        widget_height: u32,
    ) -> Option<Self> {
        if image_width == 0 || image_height == 0 || widget_width == 0 || widget_height == 0 {
            return None;
        }

        let scale = (f64::from(widget_width) / f64::from(image_width))
            .min(f64::from(widget_height) / f64::from(image_height));
        let scaled_width = (f64::from(image_width) * scale) as i64;
        let scaled_height = (f64::from(image_height) * scale) as i64;

        Some(Self {
            image: UVec2::new(image_width, image_height),
            scale,
            offset_x: (i64::from(widget_width) - scaled_width) / 2,
            offset_y: (i64::from(widget_height) - scaled_height) / 2,
            scaled_width,
            scaled_height,
        })
    }

    /// Scale factor from image pixels to widget pixels.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Rectangle the image occupies in the widget: `(x, y, width, height)`.
    pub fn display_rect(&self) -> (i64, i64, i64, i64) {
        (
            self.offset_x,
            self.offset_y,
            self.scaled_width,
            self.scaled_height,
        )
    }

    /// Converts a widget click to a native image pixel.
    ///
    /// Returns `None` for clicks in the margins around the image.
    pub fn widget_to_image(&self, x: i32, y: i32) -> Option<UVec2> {
        let rel_x = i64::from(x) - self.offset_x;
        let rel_y = i64::from(y) - self.offset_y;
        if rel_x < 0 || rel_y < 0 || rel_x >= self.scaled_width || rel_y >= self.scaled_height {
            return None;
        }

        let u = ((rel_x as f64 / self.scale) as u32).min(self.image.x - 1);
        let v = ((rel_y as f64 / self.scale) as u32).min(self.image.y - 1);
        Some(UVec2::new(u, v))
    }
}
