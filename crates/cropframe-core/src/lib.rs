//! Cropframe Core - crop region editing
//!
//! This crate provides the logic behind a touch-driven crop editor: fitting a
//! captured image into the viewport, mapping pointer input between display
//! space and image space, moving and resizing the selected region under its
//! constraints, and the swipe-to-dismiss subject sheet that follows.
//!
//! # Module Structure
//!
//! - `mapper` - Image/display coordinate conversion
//! - `region` - Image descriptor and the constrained crop region
//! - `gesture` - Gesture kinds and the per-kind update rule
//! - `editor` - Region editor state machine
//! - `overlay` - Display-space masks, border and handles
//! - `pointer` - Mouse/touch normalization
//! - `dismiss` - Subject sheet swipe-to-dismiss
//! - `session` - Capture → crop → subject flow
//! - `transform` - Extracting the region from pixel data

pub mod config;
pub mod dismiss;
pub mod editor;
pub mod error;
pub mod gesture;
pub mod mapper;
pub mod overlay;
pub mod pointer;
pub mod region;
pub mod session;
pub mod subject;
pub mod transform;
pub mod types;

pub use config::{CancelPolicy, DismissConfig, EditorConfig, DISMISS_THRESHOLD, MIN_SIZE};
pub use dismiss::{DismissGesture, DismissSignal, SheetAnimation, SheetPhase};
pub use editor::{EditorState, RegionEditor};
pub use error::EditorError;
pub use gesture::{apply_gesture, GestureKind, GestureSnapshot};
pub use mapper::{
    fit_to_viewport, to_display_rect, to_image_delta, DisplayRect, DisplaySize, ImageDelta, Point,
    ScaleFactors, ViewportBounds,
};
pub use overlay::{HandlePosition, OverlayGeometry};
pub use pointer::{PointerEvent, PointerPhase, RawPointer};
pub use region::{CropRegion, ImageDescriptor};
pub use session::{CaptureSession, Selection, SessionState};
pub use subject::{Subject, SUBJECTS};
pub use transform::extract_region;
pub use types::DecodedImage;
