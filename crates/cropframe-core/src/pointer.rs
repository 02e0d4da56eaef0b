//! Unified pointer events.
//!
//! Mouse and touch input arrive in different shapes. They are normalized here,
//! once, into a [`PointerEvent`] positioned relative to the displayed image's
//! top-left corner, so the editor never branches on input modality.

use crate::mapper::Point;
use serde::{Deserialize, Serialize};

/// Phase of a normalized pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    Start,
    Move,
    End,
    /// The gesture was interrupted (pointer left the area, second finger,
    /// system interruption)
    Cancel,
}

/// A pointer sample in display space, relative to the image origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub position: Point,
    pub phase: PointerPhase,
}

impl PointerEvent {
    pub fn new(x: f64, y: f64, phase: PointerPhase) -> Self {
        Self {
            position: Point::new(x, y),
            phase,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseEventKind {
    Down,
    Move,
    Up,
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchEventKind {
    Start,
    Move,
    End,
    Cancel,
}

/// One finger, in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub page_x: f64,
    pub page_y: f64,
}

/// Platform input before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum RawPointer {
    Mouse {
        kind: MouseEventKind,
        page_x: f64,
        page_y: f64,
    },
    Touch {
        kind: TouchEventKind,
        /// Fingers currently on the surface
        touches: Vec<TouchPoint>,
        /// Fingers that changed in this event (the lifted finger on end)
        changed: Vec<TouchPoint>,
    },
}

impl RawPointer {
    /// Normalize to a [`PointerEvent`] relative to `image_origin` (page coordinates
    /// of the displayed image's top-left corner).
    ///
    /// A touch event with more than one finger down becomes [`PointerPhase::Cancel`].
    /// Returns `None` for a touch start/move that carries no coordinates.
    pub fn normalize(&self, image_origin: Point) -> Option<PointerEvent> {
        let (page, phase) = match self {
            RawPointer::Mouse {
                kind,
                page_x,
                page_y,
            } => {
                let phase = match kind {
                    MouseEventKind::Down => PointerPhase::Start,
                    MouseEventKind::Move => PointerPhase::Move,
                    MouseEventKind::Up => PointerPhase::End,
                    MouseEventKind::Leave => PointerPhase::Cancel,
                };
                (Point::new(*page_x, *page_y), phase)
            }
            RawPointer::Touch {
                kind,
                touches,
                changed,
            } => {
                let phase = if touches.len() > 1 {
                    PointerPhase::Cancel
                } else {
                    match kind {
                        TouchEventKind::Start => PointerPhase::Start,
                        TouchEventKind::Move => PointerPhase::Move,
                        TouchEventKind::End => PointerPhase::End,
                        TouchEventKind::Cancel => PointerPhase::Cancel,
                    }
                };
                match touches.first().or_else(|| changed.first()) {
                    Some(touch) => (Point::new(touch.page_x, touch.page_y), phase),
                    // End and cancel don't need a position
                    None if matches!(phase, PointerPhase::End | PointerPhase::Cancel) => {
                        (image_origin, phase)
                    }
                    None => return None,
                }
            }
        };

        Some(PointerEvent {
            position: Point::new(page.x - image_origin.x, page.y - image_origin.y),
            phase,
        })
    }
}
