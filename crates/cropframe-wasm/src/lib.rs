//! Cropframe WASM - WebAssembly bindings for the crop region editor
//!
//! This crate exposes cropframe-core to JavaScript/TypeScript hosts.
//!
//! # Module Structure
//!
//! - `editor` - Region editor (gestures, overlay, pointer normalization)
//! - `dismiss` - Subject sheet swipe-to-dismiss
//! - `session` - Capture → crop → subject flow
//! - `mapper` - Coordinate helpers
//! - `transform` - Extracting the region from pixel data
//! - `types` - WASM-compatible wrapper types
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCaptureSession, set_log_level } from '@cropframe/wasm';
//!
//! await init();
//! set_log_level('debug');
//!
//! const session = new JsCaptureSession(screen.width, screen.height);
//! session.capture_succeeded(uri, 4032, 3024);
//! ```

use wasm_bindgen::prelude::*;

mod dismiss;
mod editor;
mod logging;
mod mapper;
mod session;
mod transform;
mod types;

// Re-export public types
pub use dismiss::JsDismissGesture;
pub use editor::JsRegionEditor;
pub use mapper::{fit_to_viewport, image_rect_to_display};
pub use session::{subjects, JsCaptureSession};
pub use transform::extract_region;
pub use types::JsDecodedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logging::install(log::LevelFilter::Warn);
}

/// Change console log verbosity: `off`, `error`, `warn`, `info`, `debug`, `trace`.
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = logging::parse_level(level)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown log level: {}", level)))?;
    logging::install(filter);
    Ok(())
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
