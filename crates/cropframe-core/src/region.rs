//! The image being framed and the region selected on it.

use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::mapper::{to_display_rect, DisplayRect, ScaleFactors};
use serde::{Deserialize, Serialize};

/// A captured image as handed over by the capture collaborator.
///
/// Read-only to the editor. Dimensions are validated on construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    uri: String,
    width: f64,
    height: f64,
}

impl ImageDescriptor {
    /// Create a descriptor, rejecting zero, negative or non-finite dimensions.
    pub fn new(uri: impl Into<String>, width: f64, height: f64) -> Result<Self, EditorError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(EditorError::InvalidImage { width, height });
        }
        Ok(Self {
            uri: uri.into(),
            width,
            height,
        })
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

/// Saturating clamp that never panics.
///
/// When the range is inverted (`hi < lo`, i.e. the image is smaller than the
/// minimum region) the lower bound wins.
#[inline]
pub(crate) fn clamp_or_lo(value: f64, lo: f64, hi: f64) -> f64 {
    if hi < lo {
        return lo;
    }
    value.max(lo).min(hi)
}

/// Rectangular selection in image-space pixels.
///
/// After every editor update the region satisfies:
/// - `x >= 0`, `y >= 0`
/// - `x + width <= image width`, `y + height <= image height`
/// - `width >= min_size`, `height >= min_size`
///
/// If the image is smaller than `min_size` on an axis, the minimum size wins
/// and the region overhangs the image on that axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CropRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRegion {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Centered region covering the configured fraction of the image.
    pub fn seeded(image: &ImageDescriptor, config: &EditorConfig) -> Self {
        let width = image.width * config.seed_width_fraction;
        let height = image.height * config.seed_height_fraction;
        let seed = Self {
            x: (image.width - width) / 2.0,
            y: (image.height - height) / 2.0,
            width,
            height,
        };
        seed.constrained(image.width, image.height, config.min_size)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Pull the region back inside the image and up to the minimum size.
    ///
    /// Size is settled first, then the origin is clamped so the far edge stays
    /// inside the image. Both steps use [`clamp_or_lo`].
    pub fn constrained(self, image_width: f64, image_height: f64, min_size: f64) -> Self {
        let width = clamp_or_lo(self.width, min_size, image_width);
        let height = clamp_or_lo(self.height, min_size, image_height);
        Self {
            x: clamp_or_lo(self.x, 0.0, image_width - width),
            y: clamp_or_lo(self.y, 0.0, image_height - height),
            width,
            height,
        }
    }

    /// Whether the containment and minimum-size invariants hold.
    pub fn satisfies_invariants(&self, image_width: f64, image_height: f64, min_size: f64) -> bool {
        const EPS: f64 = 1e-9;
        self.x >= 0.0
            && self.y >= 0.0
            && self.right() <= image_width + EPS
            && self.bottom() <= image_height + EPS
            && self.width >= min_size
            && self.height >= min_size
    }

    /// Region as fractions (0.0 to 1.0) of the image dimensions.
    pub fn normalized(&self, image: &ImageDescriptor) -> CropRegion {
        CropRegion {
            x: self.x / image.width,
            y: self.y / image.height,
            width: self.width / image.width,
            height: self.height / image.height,
        }
    }

    /// Project into display space for rendering.
    pub fn to_display(&self, scale: ScaleFactors) -> DisplayRect {
        to_display_rect(self.x, self.y, self.width, self.height, scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(width: f64, height: f64) -> ImageDescriptor {
        ImageDescriptor::new("file:///capture.jpg", width, height).unwrap()
    }

    #[test]
    fn test_descriptor_rejects_zero() {
        assert!(ImageDescriptor::new("a", 0.0, 10.0).is_err());
        assert!(ImageDescriptor::new("a", 10.0, -1.0).is_err());
        assert!(ImageDescriptor::new("a", f64::NAN, 10.0).is_err());
        assert!(ImageDescriptor::new("a", 10.0, 10.0).is_ok());
    }

    #[test]
    fn test_seed_is_centered() {
        let region = CropRegion::seeded(&image(1000.0, 800.0), &EditorConfig::default());
        assert_eq!(region, CropRegion::new(200.0, 240.0, 600.0, 320.0));
    }

    #[test]
    fn test_seed_respects_min_size() {
        // 40% of 100 is 40, below the 50 minimum
        let region = CropRegion::seeded(&image(200.0, 100.0), &EditorConfig::default());
        assert_eq!(region.height, 50.0);
        assert!(region.satisfies_invariants(200.0, 100.0, 50.0));
    }

    #[test]
    fn test_seed_degenerate_image() {
        // Image smaller than the minimum on both axes: lower bound wins
        let region = CropRegion::seeded(&image(30.0, 20.0), &EditorConfig::default());
        assert_eq!(region.width, 50.0);
        assert_eq!(region.height, 50.0);
        assert_eq!(region.x, 0.0);
        assert_eq!(region.y, 0.0);
    }

    #[test]
    fn test_clamp_or_lo() {
        assert_eq!(clamp_or_lo(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp_or_lo(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp_or_lo(15.0, 0.0, 10.0), 10.0);
        // Inverted range falls back to the lower bound
        assert_eq!(clamp_or_lo(15.0, 50.0, 30.0), 50.0);
    }

    #[test]
    fn test_constrained_pulls_inside() {
        let region = CropRegion::new(-10.0, 900.0, 1100.0, 20.0).constrained(1000.0, 800.0, 50.0);
        assert_eq!(region, CropRegion::new(0.0, 750.0, 1000.0, 50.0));
    }

    #[test]
    fn test_normalized() {
        let img = image(1000.0, 800.0);
        let region = CropRegion::new(200.0, 240.0, 600.0, 320.0).normalized(&img);
        assert_eq!(region, CropRegion::new(0.2, 0.3, 0.6, 0.4));
    }
}
