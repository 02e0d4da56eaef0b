//! WASM-compatible wrapper types and boundary conversions.
//!
//! Structured values (regions, overlay geometry, configuration) cross the
//! boundary as plain JavaScript objects through `serde-wasm-bindgen`. Pixel
//! data crosses as a [`JsDecodedImage`].

use cropframe_core::{DecodedImage, EditorError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// A decoded RGB image for JavaScript.
///
/// The pixel data is stored in WASM memory. `pixels()` copies it out to a
/// `Uint8Array`.
#[wasm_bindgen]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Create a new JsDecodedImage from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsDecodedImage {
        JsDecodedImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 3 for RGB)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array. Copies the buffer.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsDecodedImage {
    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    /// Convert to a core DecodedImage, validating the buffer length.
    pub(crate) fn to_decoded(&self) -> Result<DecodedImage, EditorError> {
        DecodedImage::new(self.width, self.height, self.pixels.clone())
    }
}

/// Convert a core error into a JavaScript `Error`-like string value.
pub(crate) fn js_error(err: EditorError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Serialize a value into a plain JavaScript object.
pub(crate) fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

/// Deserialize an optional JavaScript object; `undefined`/`null` yields the default.
pub(crate) fn from_js_or_default<T: DeserializeOwned + Default>(
    value: JsValue,
    what: &str,
) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid {}: {}", what, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_decoded_image_creation() {
        let img = JsDecodedImage::new(100, 50, vec![0u8; 100 * 50 * 3]);
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.byte_length(), 15000);
    }

    #[test]
    fn test_from_decoded() {
        let decoded = DecodedImage::new(200, 100, vec![0u8; 200 * 100 * 3]).unwrap();
        let js_img = JsDecodedImage::from_decoded(decoded);
        assert_eq!(js_img.width(), 200);
        assert_eq!(js_img.height(), 100);
        assert_eq!(js_img.byte_length(), 60000);
    }

    #[test]
    fn test_to_decoded_checks_length() {
        let js_img = JsDecodedImage::new(50, 25, vec![128u8; 50 * 25 * 3]);
        assert_eq!(js_img.to_decoded().unwrap().pixels.len(), 3750);

        let short = JsDecodedImage::new(50, 25, vec![0u8; 10]);
        assert!(matches!(
            short.to_decoded(),
            Err(EditorError::PixelBufferMismatch { .. })
        ));
    }
}
