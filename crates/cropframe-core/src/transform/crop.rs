//! Extracting the confirmed region from pixel data.
//!
//! The region lives in the descriptor's image space, but the pixel buffer the
//! host decodes may have different dimensions (a downscaled preview, for
//! example). The region is therefore normalized against the descriptor first
//! and then mapped onto the buffer.
//!
//! # Behavior
//!
//! - Coordinates are rounded to whole pixels and clamped to the buffer
//! - Minimum output dimension is 1x1 pixels
//! - A region covering the whole image returns a copy of the buffer

use crate::error::EditorError;
use crate::region::{CropRegion, ImageDescriptor};
use crate::types::DecodedImage;

/// Pixel rectangle `(left, top, width, height)` for `region` on `image`.
fn pixel_rect(image: &DecodedImage, region: &CropRegion, source: &ImageDescriptor) -> (u32, u32, u32, u32) {
    let n = region.normalized(source);
    let src_w = image.width as f64;
    let src_h = image.height as f64;

    let px_left = (n.x.clamp(0.0, 1.0) * src_w).round() as u32;
    let px_top = (n.y.clamp(0.0, 1.0) * src_h).round() as u32;
    let px_width = (n.width.clamp(0.0, 1.0) * src_w).round() as u32;
    let px_height = (n.height.clamp(0.0, 1.0) * src_h).round() as u32;

    let px_left = px_left.min(image.width.saturating_sub(1));
    let px_top = px_top.min(image.height.saturating_sub(1));
    let px_right = (px_left + px_width).min(image.width);
    let px_bottom = (px_top + px_height).min(image.height);

    (
        px_left,
        px_top,
        px_right.saturating_sub(px_left).max(1),
        px_bottom.saturating_sub(px_top).max(1),
    )
}

/// Copy the pixels under `region` out of `image`.
///
/// # Arguments
///
/// * `image` - Decoded RGB pixels of the captured image (any resolution)
/// * `region` - Confirmed region in `source` image space
/// * `source` - Descriptor the region was edited against
///
/// # Errors
///
/// Returns `EditorError::PixelBufferMismatch` if the buffer length does not
/// match the image dimensions.
pub fn extract_region(
    image: &DecodedImage,
    region: &CropRegion,
    source: &ImageDescriptor,
) -> Result<DecodedImage, EditorError> {
    let expected = image.width as usize * image.height as usize * 3;
    let rgb = image.to_rgb_image().ok_or(EditorError::PixelBufferMismatch {
        expected,
        actual: image.pixels.len(),
    })?;

    let (left, top, width, height) = pixel_rect(image, region, source);

    // Fast path: whole image
    if left == 0 && top == 0 && width == image.width && height == image.height {
        return Ok(image.clone());
    }

    let cropped = image::imageops::crop_imm(&rgb, left, top, width, height).to_image();
    log::debug!(
        "extracted {}x{} at ({}, {}) from {}x{}",
        width,
        height,
        left,
        top,
        image.width,
        image.height
    );
    Ok(DecodedImage::from_rgb_image(cropped))
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn create_test_image(width: u32, height: u32) -> DecodedImage {
        DecodedImage {
            width,
            height,
            pixels: vec![128u8; (width * height * 3) as usize],
        }
    }

    proptest! {
        /// Property: Output is non-empty, bounded by the input, and consistent.
        #[test]
        fn prop_output_bounded(
            (width, height) in (4u32..=100, 4u32..=100),
            (x, y, w, h) in (0.0f64..1.0, 0.0f64..1.0, 0.0f64..1.0, 0.0f64..1.0),
        ) {
            let img = create_test_image(width, height);
            let source = ImageDescriptor::new("p", 1.0, 1.0).unwrap();
            let result = extract_region(&img, &CropRegion::new(x, y, w, h), &source).unwrap();

            prop_assert!(result.width >= 1 && result.width <= width);
            prop_assert!(result.height >= 1 && result.height <= height);
            prop_assert_eq!(result.pixels.len(), (result.width * result.height * 3) as usize);
        }
    }
}
