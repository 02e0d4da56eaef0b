//! Pixel transforms applied once the region is confirmed.
//!
//! # Coordinate System
//!
//! - Regions are in the captured image's pixel space (see [`crate::region`])
//! - Pixel buffers may be at a different resolution; regions are normalized
//!   (0.0 to 1.0) before being mapped onto them
//! - Origin is top-left corner

mod crop;

pub use crop::extract_region;
