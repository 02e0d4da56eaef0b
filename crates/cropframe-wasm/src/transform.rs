//! WASM bindings for extracting the confirmed region from pixel data.

use crate::editor::JsRegionEditor;
use crate::types::{js_error, JsDecodedImage};
use cropframe_core::{extract_region as core_extract, EditorError};
use wasm_bindgen::prelude::*;

/// Copy the editor's current region out of `image`.
///
/// `image` may be a downscaled decode of the capture; the region is mapped
/// proportionally.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const preview = new JsDecodedImage(w, h, rgbBytes);
/// const cropped = extract_region(preview, editor);
/// ```
///
/// # Errors
/// Returns error if the pixel buffer length does not match its dimensions.
#[wasm_bindgen]
pub fn extract_region(image: &JsDecodedImage, editor: &JsRegionEditor) -> Result<JsDecodedImage, JsValue> {
    extract(image, editor).map_err(js_error)
}

fn extract(image: &JsDecodedImage, editor: &JsRegionEditor) -> Result<JsDecodedImage, EditorError> {
    let src = image.to_decoded()?;
    let result = core_extract(&src, &editor.inner().region(), editor.inner().image())?;
    Ok(JsDecodedImage::from_decoded(result))
}
