//! Region editor state machine.
//!
//! The editor owns the image-space [`CropRegion`] and at most one active
//! gesture. It has two states:
//!
//! - [`EditorState::Idle`]: no gesture; the region is durable state
//! - [`EditorState::Active`]: a gesture of one [`GestureKind`] is in progress,
//!   carrying the [`GestureSnapshot`] taken when it started
//!
//! A new gesture can only start from `Idle`. Each pointer move recomputes the
//! region from the snapshot and the total displacement since the gesture
//! started. Ending or cancelling returns to `Idle`.

use crate::config::{CancelPolicy, EditorConfig};
use crate::error::EditorError;
use crate::gesture::{apply_gesture, Bounds, GestureKind, GestureSnapshot};
use crate::mapper::{fit_to_viewport, to_image_delta, DisplaySize, Point, ScaleFactors, ViewportBounds};
use crate::overlay::OverlayGeometry;
use crate::pointer::{PointerEvent, PointerPhase};
use crate::region::{CropRegion, ImageDescriptor};

/// Gesture state of the editor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorState {
    Idle,
    Active {
        kind: GestureKind,
        snapshot: GestureSnapshot,
    },
}

/// Interactive crop region editor for one image.
#[derive(Debug, Clone)]
pub struct RegionEditor {
    image: ImageDescriptor,
    region: CropRegion,
    state: EditorState,
    viewport: ViewportBounds,
    display: DisplaySize,
    scale: ScaleFactors,
    config: EditorConfig,
}

impl RegionEditor {
    /// Create an editor for `image`, seeding the centered default region.
    pub fn new(image: ImageDescriptor, viewport: ViewportBounds, config: EditorConfig) -> Self {
        let region = CropRegion::seeded(&image, &config);
        let mut editor = Self {
            image,
            region,
            state: EditorState::Idle,
            viewport,
            display: DisplaySize::ZERO,
            scale: ScaleFactors::default(),
            config,
        };
        editor.recompute_scale();
        log::debug!(
            "editor opened for {} ({}x{}), region {:?}",
            editor.image.uri(),
            editor.image.width(),
            editor.image.height(),
            editor.region
        );
        editor
    }

    /// Convenience constructor validating raw capture output.
    pub fn from_capture(
        uri: &str,
        width: f64,
        height: f64,
        viewport: ViewportBounds,
        config: EditorConfig,
    ) -> Result<Self, EditorError> {
        let image = ImageDescriptor::new(uri, width, height)?;
        Ok(Self::new(image, viewport, config))
    }

    pub fn image(&self) -> &ImageDescriptor {
        &self.image
    }

    pub fn region(&self) -> CropRegion {
        self.region
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, EditorState::Active { .. })
    }

    pub fn active_kind(&self) -> Option<GestureKind> {
        match self.state {
            EditorState::Active { kind, .. } => Some(kind),
            EditorState::Idle => None,
        }
    }

    pub fn scale(&self) -> ScaleFactors {
        self.scale
    }

    pub fn display_size(&self) -> DisplaySize {
        self.display
    }

    fn bounds(&self) -> Bounds {
        Bounds {
            image_width: self.image.width(),
            image_height: self.image.height(),
            min_size: self.config.min_size,
        }
    }

    fn recompute_scale(&mut self) {
        self.display = fit_to_viewport(
            self.image.width(),
            self.image.height(),
            self.viewport.max_width,
            self.viewport.max_height,
        );
        self.scale = ScaleFactors::between(self.image.width(), self.image.height(), self.display);
        if !self.scale.is_valid() {
            log::warn!("viewport {:?} yields no usable scale; gestures disabled", self.viewport);
        }
    }

    /// Update the viewport (rotation, layout change). The region is untouched.
    pub fn set_viewport(&mut self, viewport: ViewportBounds) {
        self.viewport = viewport;
        self.recompute_scale();
    }

    /// Replace the image, discarding any gesture and re-seeding the region.
    pub fn replace_image(&mut self, image: ImageDescriptor) {
        log::debug!("editor image replaced by {}", image.uri());
        self.image = image;
        self.state = EditorState::Idle;
        self.region = CropRegion::seeded(&self.image, &self.config);
        self.recompute_scale();
    }

    /// Re-seed the region. Any active gesture is dropped.
    pub fn reset(&mut self) {
        self.state = EditorState::Idle;
        self.region = CropRegion::seeded(&self.image, &self.config);
    }

    /// Current overlay geometry in display space.
    pub fn overlay(&self) -> OverlayGeometry {
        OverlayGeometry::compute(&self.region, self.scale, self.display, self.config.handle_hit_size)
    }

    /// Which gesture a pointer landing at `point` (display space) would start.
    pub fn hit_test(&self, point: Point) -> Option<GestureKind> {
        self.overlay().hit_test(point)
    }

    /// Start a gesture of `kind` at display-space `origin`.
    ///
    /// Only valid from `Idle`; returns `false` (and changes nothing) if a
    /// gesture is already active.
    pub fn begin_gesture(&mut self, kind: GestureKind, origin: Point) -> bool {
        if self.is_active() {
            log::trace!("ignoring {} start: gesture already active", kind.as_str());
            return false;
        }
        self.state = EditorState::Active {
            kind,
            snapshot: GestureSnapshot {
                origin,
                region: self.region,
            },
        };
        log::debug!("gesture {} started at ({}, {})", kind.as_str(), origin.x, origin.y);
        true
    }

    /// Recompute the region for the pointer now at `position`.
    ///
    /// Returns `true` if the region was recomputed. Returns `false` when idle,
    /// when the scale factors are unusable, or when the position is not finite.
    pub fn update_gesture(&mut self, position: Point) -> bool {
        let EditorState::Active { kind, snapshot } = self.state else {
            return false;
        };

        let (dx, dy) = position.delta_from(snapshot.origin);
        let Some(delta) = to_image_delta(dx, dy, self.scale) else {
            log::warn!("skipping {} update: invalid scale {:?}", kind.as_str(), self.scale);
            return false;
        };
        if !delta.is_finite() {
            return false;
        }

        self.region = apply_gesture(kind, &snapshot.region, delta, self.bounds());
        log::trace!("{} -> {:?}", kind.as_str(), self.region);
        true
    }

    /// Finish the active gesture; the last computed region becomes durable.
    pub fn end_gesture(&mut self) {
        if let EditorState::Active { kind, .. } = self.state {
            log::debug!("gesture {} ended with {:?}", kind.as_str(), self.region);
        }
        self.state = EditorState::Idle;
    }

    /// Abort the active gesture according to the configured [`CancelPolicy`].
    pub fn cancel_gesture(&mut self) {
        if let EditorState::Active { kind, snapshot } = self.state {
            if self.config.cancel_policy == CancelPolicy::Rollback {
                self.region = snapshot.region;
            }
            log::debug!(
                "gesture {} cancelled ({:?}), region {:?}",
                kind.as_str(),
                self.config.cancel_policy,
                self.region
            );
        }
        self.state = EditorState::Idle;
    }

    /// Drive the editor from a normalized pointer event.
    ///
    /// A start event hit-tests against the overlay to pick the gesture kind; a
    /// start outside every hotspot is ignored. Returns `true` if the event
    /// changed the editor's state or region.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        match event.phase {
            PointerPhase::Start => match self.hit_test(event.position) {
                Some(kind) => self.begin_gesture(kind, event.position),
                None => false,
            },
            PointerPhase::Move => self.update_gesture(event.position),
            PointerPhase::End => {
                let was_active = self.is_active();
                self.end_gesture();
                was_active
            }
            PointerPhase::Cancel => {
                let was_active = self.is_active();
                self.cancel_gesture();
                was_active
            }
        }
    }

    /// The region to hand to collaborators when the user confirms the crop.
    ///
    /// An in-progress gesture is ended first.
    pub fn confirm(&mut self) -> CropRegion {
        self.end_gesture();
        log::debug!("crop confirmed: {:?}", self.region);
        self.region
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Every step of a move drag keeps the region inside the image.
        #[test]
        fn prop_move_stream_contained(
            (w, h) in (100u32..3_000, 100u32..3_000),
            path in prop::collection::vec((-2_000.0f64..2_000.0, -2_000.0f64..2_000.0), 1..30),
        ) {
            let image = ImageDescriptor::new("p", w as f64, h as f64).unwrap();
            let mut ed = RegionEditor::new(image, ViewportBounds::new(390.0, 500.0), EditorConfig::default());
            let start = ed.overlay().border;
            let origin = Point::new(start.x + start.width / 2.0, start.y + start.height / 2.0);
            prop_assert!(ed.begin_gesture(GestureKind::Move, origin));
            for (x, y) in path {
                ed.update_gesture(Point::new(x, y));
                let r = ed.region();
                prop_assert!(r.satisfies_invariants(w as f64, h as f64, 50.0), "{:?}", r);
            }
        }

        /// Property: Every step of a resize drag keeps the minimum size.
        #[test]
        fn prop_resize_stream_min_size(
            (w, h) in (100u32..3_000, 100u32..3_000),
            handle in 0usize..8,
            path in prop::collection::vec((-2_000.0f64..2_000.0, -2_000.0f64..2_000.0), 1..30),
        ) {
            let image = ImageDescriptor::new("p", w as f64, h as f64).unwrap();
            let mut ed = RegionEditor::new(image, ViewportBounds::new(390.0, 500.0), EditorConfig::default());
            prop_assert!(ed.begin_gesture(GestureKind::HANDLES[handle], Point::new(0.0, 0.0)));
            for (x, y) in path {
                ed.update_gesture(Point::new(x, y));
                let r = ed.region();
                prop_assert!(r.width >= 50.0 && r.height >= 50.0, "{:?}", r);
                prop_assert!(r.satisfies_invariants(w as f64, h as f64, 50.0), "{:?}", r);
            }
        }
    }
}
