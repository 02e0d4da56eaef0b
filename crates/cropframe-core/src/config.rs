//! Tunable constants for the region editor and the subject sheet.
//!
//! Both structs deserialize with `#[serde(default)]`, so a host only needs to
//! send the fields it wants to override.

use serde::{Deserialize, Serialize};

/// Smallest allowed crop width/height, in image-space units.
pub const MIN_SIZE: f64 = 50.0;

/// Downward sheet displacement (display units) past which a release dismisses.
pub const DISMISS_THRESHOLD: f64 = 100.0;

/// What happens to the region when a gesture is interrupted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelPolicy {
    /// Keep the last computed region.
    #[default]
    KeepLast,
    /// Restore the region captured when the gesture started.
    Rollback,
}

/// Region editor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Minimum region width/height in image-space units
    pub min_size: f64,
    /// Seed region width as a fraction of image width
    pub seed_width_fraction: f64,
    /// Seed region height as a fraction of image height
    pub seed_height_fraction: f64,
    /// Side length of a handle hotspot in display units
    pub handle_hit_size: f64,
    /// Cap on display height as a fraction of the screen height
    pub max_height_fraction: f64,
    /// Region behavior on gesture cancellation
    pub cancel_policy: CancelPolicy,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_size: MIN_SIZE,
            seed_width_fraction: 0.6,
            seed_height_fraction: 0.4,
            handle_hit_size: 32.0,
            max_height_fraction: 0.6,
            cancel_policy: CancelPolicy::KeepLast,
        }
    }
}

/// Subject sheet dismiss configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DismissConfig {
    /// Release offset (display units) that must be exceeded to dismiss
    pub threshold: f64,
    /// Full height of the sheet container; the closing animation target
    pub container_height: f64,
}

impl Default for DismissConfig {
    fn default() -> Self {
        Self {
            threshold: DISMISS_THRESHOLD,
            container_height: 800.0,
        }
    }
}
