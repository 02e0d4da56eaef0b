//! Display-space overlay geometry derived from the current region.
//!
//! The host draws four dark masks over the area outside the selection, a
//! border around it, and eight handles. Nothing here feeds back into the
//! image-space region.

use crate::gesture::GestureKind;
use crate::mapper::{DisplayRect, DisplaySize, Point, ScaleFactors};
use crate::region::CropRegion;
use serde::{Deserialize, Serialize};

/// One resize handle as drawn and hit-tested.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandlePosition {
    pub kind: GestureKind,
    pub center: Point,
    /// Square hotspot around `center`
    pub hotspot: DisplayRect,
}

/// Everything the host needs to draw the crop overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayGeometry {
    /// Top, bottom, left, right masks
    pub masks: [DisplayRect; 4],
    pub border: DisplayRect,
    /// Corners first, then edge midpoints (same order as [`GestureKind::HANDLES`])
    pub handles: [HandlePosition; 8],
}

impl OverlayGeometry {
    /// Build the overlay for `region` on an image displayed at `display` size.
    ///
    /// The top and bottom masks span the full display width; the left and
    /// right masks span only the selection's height, so the four never overlap.
    pub fn compute(
        region: &CropRegion,
        scale: ScaleFactors,
        display: DisplaySize,
        handle_size: f64,
    ) -> Self {
        let border = region.to_display(scale);

        let top = DisplayRect::new(0.0, 0.0, display.width, border.y.max(0.0));
        let bottom_y = border.bottom().min(display.height);
        let bottom = DisplayRect::new(0.0, bottom_y, display.width, (display.height - bottom_y).max(0.0));
        let left = DisplayRect::new(0.0, border.y, border.x.max(0.0), border.height);
        let right_x = border.right().min(display.width);
        let right = DisplayRect::new(right_x, border.y, (display.width - right_x).max(0.0), border.height);

        let handles = GestureKind::HANDLES.map(|kind| {
            let (fx, fy) = kind.anchor();
            let center = Point::new(border.x + border.width * fx, border.y + border.height * fy);
            HandlePosition {
                kind,
                center,
                hotspot: DisplayRect::centered_on(center, handle_size),
            }
        });

        Self {
            masks: [top, bottom, left, right],
            border,
            handles,
        }
    }

    /// Gesture started by a pointer at `point`, if any.
    ///
    /// Corner handles win over edge handles, and handles win over the body.
    pub fn hit_test(&self, point: Point) -> Option<GestureKind> {
        // HANDLES order already puts corners before edges
        if let Some(handle) = self.handles.iter().find(|h| h.hotspot.contains(point)) {
            return Some(handle.kind);
        }
        if self.border.contains(point) {
            return Some(GestureKind::Move);
        }
        None
    }
}
