//! Gesture kinds and the per-kind region update rule.
//!
//! A single function, [`apply_gesture`], dispatches on [`GestureKind`]. Every
//! rule reads only from the gesture-start snapshot and the total displacement
//! since the gesture started, so repeated pointer moves never accumulate
//! rounding error and corner handles never see a half-updated region.

use crate::mapper::{ImageDelta, Point};
use crate::region::{clamp_or_lo, CropRegion};
use serde::{Deserialize, Serialize};

/// What the active gesture does to the region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GestureKind {
    Move,
    ResizeTopLeft,
    ResizeTopRight,
    ResizeBottomLeft,
    ResizeBottomRight,
    ResizeTop,
    ResizeBottom,
    ResizeLeft,
    ResizeRight,
}

impl GestureKind {
    /// The eight resize handles, corners first.
    pub const HANDLES: [GestureKind; 8] = [
        GestureKind::ResizeTopLeft,
        GestureKind::ResizeTopRight,
        GestureKind::ResizeBottomLeft,
        GestureKind::ResizeBottomRight,
        GestureKind::ResizeTop,
        GestureKind::ResizeBottom,
        GestureKind::ResizeLeft,
        GestureKind::ResizeRight,
    ];

    pub fn is_corner(self) -> bool {
        matches!(
            self,
            GestureKind::ResizeTopLeft
                | GestureKind::ResizeTopRight
                | GestureKind::ResizeBottomLeft
                | GestureKind::ResizeBottomRight
        )
    }

    pub fn is_resize(self) -> bool {
        self != GestureKind::Move
    }

    /// Stable name used in logs and at the JS boundary.
    pub fn as_str(self) -> &'static str {
        match self {
            GestureKind::Move => "move",
            GestureKind::ResizeTopLeft => "resize-top-left",
            GestureKind::ResizeTopRight => "resize-top-right",
            GestureKind::ResizeBottomLeft => "resize-bottom-left",
            GestureKind::ResizeBottomRight => "resize-bottom-right",
            GestureKind::ResizeTop => "resize-top",
            GestureKind::ResizeBottom => "resize-bottom",
            GestureKind::ResizeLeft => "resize-left",
            GestureKind::ResizeRight => "resize-right",
        }
    }

    /// Parse the name produced by [`as_str`](Self::as_str).
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "move" => GestureKind::Move,
            "resize-top-left" => GestureKind::ResizeTopLeft,
            "resize-top-right" => GestureKind::ResizeTopRight,
            "resize-bottom-left" => GestureKind::ResizeBottomLeft,
            "resize-bottom-right" => GestureKind::ResizeBottomRight,
            "resize-top" => GestureKind::ResizeTop,
            "resize-bottom" => GestureKind::ResizeBottom,
            "resize-left" => GestureKind::ResizeLeft,
            "resize-right" => GestureKind::ResizeRight,
            _ => return None,
        };
        Some(kind)
    }

    /// Where this handle sits on a rectangle, as fractions of its width/height.
    ///
    /// `Move` maps to the center.
    pub fn anchor(self) -> (f64, f64) {
        match self {
            GestureKind::Move => (0.5, 0.5),
            GestureKind::ResizeTopLeft => (0.0, 0.0),
            GestureKind::ResizeTopRight => (1.0, 0.0),
            GestureKind::ResizeBottomLeft => (0.0, 1.0),
            GestureKind::ResizeBottomRight => (1.0, 1.0),
            GestureKind::ResizeTop => (0.5, 0.0),
            GestureKind::ResizeBottom => (0.5, 1.0),
            GestureKind::ResizeLeft => (0.0, 0.5),
            GestureKind::ResizeRight => (1.0, 0.5),
        }
    }
}

/// State frozen when a gesture starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureSnapshot {
    /// Pointer position at gesture start, in display space
    pub origin: Point,
    /// Region before the gesture
    pub region: CropRegion,
}

/// Image bounds and minimum size the rule clamps against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub image_width: f64,
    pub image_height: f64,
    pub min_size: f64,
}

/// Compute the region for `kind` given the snapshot region and the total
/// image-space displacement since the gesture started.
///
/// The per-kind rule is followed by the invariant pass
/// ([`CropRegion::constrained`]). Zero displacement returns the snapshot
/// unchanged for any region that already satisfies the invariants.
pub fn apply_gesture(kind: GestureKind, s: &CropRegion, delta: ImageDelta, bounds: Bounds) -> CropRegion {
    let Bounds {
        image_width: w,
        image_height: h,
        min_size: min,
    } = bounds;
    let ImageDelta { dx, dy } = delta;

    // Edge helpers; each reads only from the snapshot.
    let top_y = || clamp_or_lo(s.y + dy, 0.0, h - min);
    let left_x = || clamp_or_lo(s.x + dx, 0.0, w - min);
    let grow_up = || min.max(s.height - dy);
    let grow_left = || min.max(s.width - dx);
    let grow_right = || clamp_or_lo(min.max(s.width + dx), min, w - s.x);
    let grow_down = || clamp_or_lo(min.max(s.height + dy), min, h - s.y);

    let candidate = match kind {
        GestureKind::Move => CropRegion {
            x: clamp_or_lo(s.x + dx, 0.0, w - s.width),
            y: clamp_or_lo(s.y + dy, 0.0, h - s.height),
            width: s.width,
            height: s.height,
        },
        GestureKind::ResizeTopLeft => CropRegion {
            x: left_x(),
            y: top_y(),
            width: grow_left(),
            height: grow_up(),
        },
        GestureKind::ResizeTopRight => CropRegion {
            x: s.x,
            y: top_y(),
            width: grow_right(),
            height: grow_up(),
        },
        GestureKind::ResizeBottomLeft => CropRegion {
            x: left_x(),
            y: s.y,
            width: grow_left(),
            height: grow_down(),
        },
        GestureKind::ResizeBottomRight => CropRegion {
            x: s.x,
            y: s.y,
            width: grow_right(),
            height: grow_down(),
        },
        GestureKind::ResizeTop => CropRegion {
            x: s.x,
            y: top_y(),
            width: s.width,
            height: grow_up(),
        },
        GestureKind::ResizeBottom => CropRegion {
            x: s.x,
            y: s.y,
            width: s.width,
            height: grow_down(),
        },
        GestureKind::ResizeLeft => CropRegion {
            x: left_x(),
            y: s.y,
            width: grow_left(),
            height: s.height,
        },
        GestureKind::ResizeRight => CropRegion {
            x: s.x,
            y: s.y,
            width: grow_right(),
            height: s.height,
        },
    };

    candidate.constrained(w, h, min)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn kind_strategy() -> impl Strategy<Value = GestureKind> {
        prop_oneof![
            Just(GestureKind::Move),
            Just(GestureKind::ResizeTopLeft),
            Just(GestureKind::ResizeTopRight),
            Just(GestureKind::ResizeBottomLeft),
            Just(GestureKind::ResizeBottomRight),
            Just(GestureKind::ResizeTop),
            Just(GestureKind::ResizeBottom),
            Just(GestureKind::ResizeLeft),
            Just(GestureKind::ResizeRight),
        ]
    }

    /// Image at least twice the minimum on both axes plus a valid
    /// whole-pixel region on it.
    fn image_and_region() -> impl Strategy<Value = (Bounds, CropRegion)> {
        (100u32..4_000, 100u32..4_000).prop_flat_map(|(w, h)| {
            (50u32..=w, 50u32..=h).prop_flat_map(move |(rw, rh)| {
                (0u32..=(w - rw), 0u32..=(h - rh)).prop_map(move |(x, y)| {
                    (
                        Bounds {
                            image_width: w as f64,
                            image_height: h as f64,
                            min_size: 50.0,
                        },
                        CropRegion::new(x as f64, y as f64, rw as f64, rh as f64),
                    )
                })
            })
        })
    }

    fn deltas() -> impl Strategy<Value = Vec<(f64, f64)>> {
        prop::collection::vec((-5_000.0f64..5_000.0, -5_000.0f64..5_000.0), 1..20)
    }

    proptest! {
        /// Property: Containment and min size hold after every intermediate update.
        #[test]
        fn prop_invariants_hold_every_step(
            kind in kind_strategy(),
            (bounds, region) in image_and_region(),
            steps in deltas(),
        ) {
            for (dx, dy) in steps {
                let next = apply_gesture(kind, &region, ImageDelta::new(dx, dy), bounds);
                prop_assert!(
                    next.satisfies_invariants(bounds.image_width, bounds.image_height, bounds.min_size),
                    "{:?} violated invariants after ({}, {}): {:?}",
                    kind, dx, dy, next
                );
            }
        }

        /// Property: Move never changes the region size.
        #[test]
        fn prop_move_preserves_size(
            (bounds, region) in image_and_region(),
            (dx, dy) in (-5_000.0f64..5_000.0, -5_000.0f64..5_000.0),
        ) {
            let next = apply_gesture(GestureKind::Move, &region, ImageDelta::new(dx, dy), bounds);
            prop_assert_eq!(next.width, region.width);
            prop_assert_eq!(next.height, region.height);
        }

        /// Property: Zero displacement is the identity for every kind.
        #[test]
        fn prop_zero_displacement_identity(
            kind in kind_strategy(),
            (bounds, region) in image_and_region(),
        ) {
            let next = apply_gesture(kind, &region, ImageDelta::ZERO, bounds);
            prop_assert_eq!(next, region);
        }

        /// Property: Bottom-right resize has no cross-talk between axes.
        #[test]
        fn prop_bottom_right_axes_independent(
            (bounds, region) in image_and_region(),
            (dx, dy) in (-5_000.0f64..5_000.0, -5_000.0f64..5_000.0),
        ) {
            let both = apply_gesture(GestureKind::ResizeBottomRight, &region, ImageDelta::new(dx, dy), bounds);
            let x_only = apply_gesture(GestureKind::ResizeBottomRight, &region, ImageDelta::new(dx, 0.0), bounds);
            let y_only = apply_gesture(GestureKind::ResizeBottomRight, &region, ImageDelta::new(0.0, dy), bounds);
            prop_assert_eq!(both.width, x_only.width);
            prop_assert_eq!(both.height, y_only.height);
            prop_assert_eq!(x_only.height, region.height);
            prop_assert_eq!(y_only.width, region.width);
        }
    }
}
