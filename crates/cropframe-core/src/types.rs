//! RGB pixel data handed over by the host for region extraction.

use crate::error::EditorError;

/// A decoded image with RGB pixel data.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Create a DecodedImage, checking the buffer length against the dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, EditorError> {
        let expected = width as usize * height as usize * 3;
        if pixels.len() != expected {
            return Err(EditorError::PixelBufferMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a DecodedImage from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an image::RgbImage. Clones the pixel data.
    ///
    /// Returns `None` if the buffer length does not match the dimensions.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Check if this is an empty image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoded_image_creation() {
        let img = DecodedImage::new(100, 50, vec![0u8; 100 * 50 * 3]).unwrap();
        assert_eq!(img.width, 100);
        assert_eq!(img.height, 50);
        assert!(!img.is_empty());
    }

    #[test]
    fn test_decoded_image_length_mismatch() {
        let err = DecodedImage::new(10, 10, vec![0u8; 10]).unwrap_err();
        assert_eq!(
            err,
            EditorError::PixelBufferMismatch {
                expected: 300,
                actual: 10
            }
        );
    }

    #[test]
    fn test_rgb_image_round_trip() {
        let img = DecodedImage::new(4, 2, (0..24).collect()).unwrap();
        let rgb = img.to_rgb_image().unwrap();
        assert_eq!(rgb.dimensions(), (4, 2));
        let back = DecodedImage::from_rgb_image(rgb);
        assert_eq!(back.pixels, img.pixels);
    }
}
