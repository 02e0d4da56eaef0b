//! Swipe-down-to-dismiss handling for the subject sheet.
//!
//! The handler tracks one vertical drag on the sheet container. On release it
//! either asks the host to animate the sheet back to rest or to animate it
//! fully off screen. The host reports animation completion, at which point a
//! dismissal is signalled exactly once.
//!
//! ```text
//! Resting --begin--> Dragging --release--> Returning --finished--> Resting
//!                                     \--> Closing ---finished--> Dismissed
//! ```

use crate::config::DismissConfig;
use serde::{Deserialize, Serialize};

/// Sheet state. Offsets are downward display units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SheetPhase {
    Resting,
    Dragging { offset: f64 },
    /// Animating back to offset 0
    Returning { from: f64 },
    /// Animating to the full container height
    Closing { from: f64 },
    Dismissed,
}

/// Animation the host should run after a release.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SheetAnimation {
    pub from: f64,
    pub to: f64,
    /// Whether completing this animation dismisses the sheet
    pub dismisses: bool,
}

/// Emitted once when a closing animation completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DismissSignal;

#[derive(Debug, Clone)]
pub struct DismissGesture {
    phase: SheetPhase,
    config: DismissConfig,
}

impl DismissGesture {
    pub fn new(config: DismissConfig) -> Self {
        Self {
            phase: SheetPhase::Resting,
            config,
        }
    }

    pub fn phase(&self) -> SheetPhase {
        self.phase
    }

    pub fn config(&self) -> &DismissConfig {
        &self.config
    }

    /// Current sheet offset for rendering.
    pub fn offset(&self) -> f64 {
        match self.phase {
            SheetPhase::Resting => 0.0,
            SheetPhase::Dragging { offset } => offset,
            SheetPhase::Returning { from } | SheetPhase::Closing { from } => from,
            SheetPhase::Dismissed => self.config.container_height,
        }
    }

    /// Whether a drag starting with displacement `(dx, dy)` belongs to this
    /// handler: only predominantly vertical drags are claimed, leaving
    /// horizontal scrolling inside the sheet alone.
    pub fn claims(dx: f64, dy: f64) -> bool {
        dy.abs() > dx.abs()
    }

    /// Start tracking a drag whose first displacement is `(dx, dy)`.
    ///
    /// Returns `false` if the drag is not claimed or the sheet is not resting.
    pub fn begin(&mut self, dx: f64, dy: f64) -> bool {
        if self.phase != SheetPhase::Resting || !Self::claims(dx, dy) {
            return false;
        }
        self.phase = SheetPhase::Dragging { offset: dy.max(0.0) };
        true
    }

    /// Update with the total vertical displacement since the drag started.
    /// Upward displacement is ignored.
    pub fn drag(&mut self, dy: f64) {
        if let SheetPhase::Dragging { .. } = self.phase {
            let offset = if dy.is_finite() { dy.max(0.0) } else { 0.0 };
            self.phase = SheetPhase::Dragging { offset };
        }
    }

    /// Release the drag and return the animation the host should run.
    ///
    /// Returns `None` if no drag was in progress.
    pub fn release(&mut self) -> Option<SheetAnimation> {
        let SheetPhase::Dragging { offset } = self.phase else {
            return None;
        };
        if offset > self.config.threshold {
            log::debug!("sheet released at {offset}, closing");
            self.phase = SheetPhase::Closing { from: offset };
            Some(SheetAnimation {
                from: offset,
                to: self.config.container_height,
                dismisses: true,
            })
        } else {
            log::trace!("sheet released at {offset}, snapping back");
            self.phase = SheetPhase::Returning { from: offset };
            Some(SheetAnimation {
                from: offset,
                to: 0.0,
                dismisses: false,
            })
        }
    }

    /// Interrupt the drag; the sheet always snaps back.
    pub fn cancel(&mut self) -> Option<SheetAnimation> {
        let SheetPhase::Dragging { offset } = self.phase else {
            return None;
        };
        self.phase = SheetPhase::Returning { from: offset };
        Some(SheetAnimation {
            from: offset,
            to: 0.0,
            dismisses: false,
        })
    }

    /// The host finished the animation started by [`release`](Self::release).
    ///
    /// Returns the dismissal signal exactly once, when a closing animation
    /// completes.
    pub fn animation_finished(&mut self) -> Option<DismissSignal> {
        match self.phase {
            SheetPhase::Closing { .. } => {
                self.phase = SheetPhase::Dismissed;
                log::debug!("sheet dismissed");
                Some(DismissSignal)
            }
            SheetPhase::Returning { .. } => {
                self.phase = SheetPhase::Resting;
                None
            }
            _ => None,
        }
    }

    /// Put the sheet back at rest, e.g. when it is shown again.
    pub fn reset(&mut self) {
        self.phase = SheetPhase::Resting;
    }
}

impl Default for DismissGesture {
    fn default() -> Self {
        Self::new(DismissConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_drag_dismisses_once() {
        let mut sheet = DismissGesture::default();
        assert!(sheet.begin(2.0, 10.0));
        sheet.drag(150.0);
        assert_eq!(sheet.offset(), 150.0);

        let animation = sheet.release().unwrap();
        assert_eq!(animation.to, sheet.config().container_height);
        assert!(animation.dismisses);

        assert_eq!(sheet.animation_finished(), Some(DismissSignal));
        assert_eq!(sheet.animation_finished(), None);
        assert_eq!(sheet.phase(), SheetPhase::Dismissed);
    }

    #[test]
    fn test_short_drag_snaps_back() {
        let mut sheet = DismissGesture::default();
        assert!(sheet.begin(0.0, 5.0));
        sheet.drag(60.0);

        let animation = sheet.release().unwrap();
        assert_eq!(animation.to, 0.0);
        assert!(!animation.dismisses);

        assert_eq!(sheet.animation_finished(), None);
        assert_eq!(sheet.phase(), SheetPhase::Resting);
        assert_eq!(sheet.offset(), 0.0);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mut sheet = DismissGesture::default();
        sheet.begin(0.0, 1.0);
        sheet.drag(100.0);
        assert!(!sheet.release().unwrap().dismisses);
    }

    #[test]
    fn test_upward_drag_clamped() {
        let mut sheet = DismissGesture::default();
        assert!(sheet.begin(0.0, -8.0));
        assert_eq!(sheet.offset(), 0.0);
        sheet.drag(-40.0);
        assert_eq!(sheet.offset(), 0.0);
    }

    #[test]
    fn test_horizontal_drag_not_claimed() {
        let mut sheet = DismissGesture::default();
        assert!(!DismissGesture::claims(10.0, 3.0));
        assert!(!DismissGesture::claims(5.0, 5.0));
        assert!(!sheet.begin(10.0, 3.0));
        assert_eq!(sheet.phase(), SheetPhase::Resting);
        assert!(sheet.release().is_none());
    }

    #[test]
    fn test_cancel_returns_even_past_threshold() {
        let mut sheet = DismissGesture::default();
        sheet.begin(0.0, 1.0);
        sheet.drag(300.0);
        let animation = sheet.cancel().unwrap();
        assert!(!animation.dismisses);
        assert_eq!(sheet.animation_finished(), None);
        assert_eq!(sheet.phase(), SheetPhase::Resting);
    }

    #[test]
    fn test_reset_after_dismiss() {
        let mut sheet = DismissGesture::default();
        sheet.begin(0.0, 1.0);
        sheet.drag(150.0);
        sheet.release();
        sheet.animation_finished();
        sheet.reset();
        assert_eq!(sheet.phase(), SheetPhase::Resting);
        assert!(sheet.begin(0.0, 1.0));
    }
}
