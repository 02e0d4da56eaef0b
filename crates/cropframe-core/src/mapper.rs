//! Conversion between image space and display space.
//!
//! Image space is measured in the captured image's pixels. Display space is
//! measured in layout units after the image has been fitted into the viewport.
//! Every function here is pure; the editor recomputes scale factors whenever
//! the image or viewport changes and never stores display-space values.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner of the (displayed) image
//! - `scale_x = display_width / image_width`, likewise for y
//! - Image-space values flow into display space by multiplication and back
//!   by division

use serde::{Deserialize, Serialize};

/// A position in either coordinate space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Displacement from `origin` to `self`.
    pub fn delta_from(self, origin: Point) -> (f64, f64) {
        (self.x - origin.x, self.y - origin.y)
    }
}

/// Maximum area the displayed image may occupy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportBounds {
    pub max_width: f64,
    pub max_height: f64,
}

impl ViewportBounds {
    pub fn new(max_width: f64, max_height: f64) -> Self {
        Self {
            max_width,
            max_height,
        }
    }

    /// Full screen width, height capped at a fraction of the screen height.
    pub fn from_screen(screen_width: f64, screen_height: f64, max_height_fraction: f64) -> Self {
        Self {
            max_width: screen_width,
            max_height: screen_height * max_height_fraction.clamp(0.0, 1.0),
        }
    }
}

/// On-screen size of the fitted image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplaySize {
    pub width: f64,
    pub height: f64,
}

impl DisplaySize {
    pub const ZERO: DisplaySize = DisplaySize {
        width: 0.0,
        height: 0.0,
    };
}

/// Per-axis ratio of display units to image units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScaleFactors {
    pub scale_x: f64,
    pub scale_y: f64,
}

impl ScaleFactors {
    pub fn new(scale_x: f64, scale_y: f64) -> Self {
        Self { scale_x, scale_y }
    }

    /// Scale factors mapping an image of `image_width x image_height` onto `display`.
    ///
    /// Returns zero factors (which fail [`is_valid`](Self::is_valid)) when an
    /// image dimension is zero.
    pub fn between(image_width: f64, image_height: f64, display: DisplaySize) -> Self {
        if !is_positive(image_width) || !is_positive(image_height) {
            return Self::default();
        }
        Self {
            scale_x: display.width / image_width,
            scale_y: display.height / image_height,
        }
    }

    /// Both factors are finite and strictly positive, so division is safe.
    pub fn is_valid(&self) -> bool {
        is_positive(self.scale_x) && is_positive(self.scale_y)
    }
}

/// A displacement expressed in image-space units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageDelta {
    pub dx: f64,
    pub dy: f64,
}

impl ImageDelta {
    pub const ZERO: ImageDelta = ImageDelta { dx: 0.0, dy: 0.0 };

    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    pub fn is_finite(&self) -> bool {
        self.dx.is_finite() && self.dy.is_finite()
    }
}

/// A rectangle in display space, used only for rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplayRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Square of side `size` centered on `center`.
    pub fn centered_on(center: Point, size: f64) -> Self {
        let half = size / 2.0;
        Self::new(center.x - half, center.y - half, size, size)
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }
}

#[inline]
fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Fit an image into the viewport, preserving aspect ratio.
///
/// The image is first scaled to fill `max_width`. If the resulting height
/// overflows `max_height`, it is re-scaled to fill the height instead. The
/// result never exceeds either bound and touches at least one of them.
/// Images smaller than the viewport are scaled up; callers that want no
/// upscaling must cap the scale themselves.
///
/// Zero or non-finite inputs produce [`DisplaySize::ZERO`].
pub fn fit_to_viewport(
    image_width: f64,
    image_height: f64,
    max_width: f64,
    max_height: f64,
) -> DisplaySize {
    if !is_positive(image_width)
        || !is_positive(image_height)
        || !is_positive(max_width)
        || !is_positive(max_height)
    {
        return DisplaySize::ZERO;
    }

    // Width-first fit
    let scale = max_width / image_width;
    let height = image_height * scale;
    if height <= max_height {
        return DisplaySize {
            width: max_width,
            height,
        };
    }

    // Height overflowed: fit by height
    let scale = max_height / image_height;
    DisplaySize {
        width: (image_width * scale).min(max_width),
        height: max_height,
    }
}

/// Convert a display-space displacement into image-space units.
///
/// Returns `None` when either scale factor is zero or non-finite; callers
/// treat that as "skip this update".
pub fn to_image_delta(display_dx: f64, display_dy: f64, scale: ScaleFactors) -> Option<ImageDelta> {
    if !scale.is_valid() {
        return None;
    }
    Some(ImageDelta {
        dx: display_dx / scale.scale_x,
        dy: display_dy / scale.scale_y,
    })
}

/// Convert a display-space point into image space.
pub fn to_image_point(point: Point, scale: ScaleFactors) -> Option<Point> {
    to_image_delta(point.x, point.y, scale).map(|d| Point::new(d.dx, d.dy))
}

/// Project an image-space rectangle into display space.
pub fn to_display_rect(x: f64, y: f64, width: f64, height: f64, scale: ScaleFactors) -> DisplayRect {
    DisplayRect {
        x: x * scale.scale_x,
        y: y * scale.scale_y,
        width: width * scale.scale_x,
        height: height * scale.scale_y,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
