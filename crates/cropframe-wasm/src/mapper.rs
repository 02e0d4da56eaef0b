//! Coordinate mapping helpers for hosts that lay out the image themselves.

use cropframe_core::mapper::{fit_to_viewport as core_fit, to_display_rect, ScaleFactors};
use wasm_bindgen::prelude::*;

/// Display size `[width, height]` of an image fitted into the viewport.
#[wasm_bindgen]
pub fn fit_to_viewport(image_width: f64, image_height: f64, max_width: f64, max_height: f64) -> Vec<f64> {
    let size = core_fit(image_width, image_height, max_width, max_height);
    vec![size.width, size.height]
}

/// Project an image-space rectangle onto the display: `[x, y, width, height]`.
#[wasm_bindgen]
pub fn image_rect_to_display(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    scale_x: f64,
    scale_y: f64,
) -> Vec<f64> {
    let rect = to_display_rect(x, y, width, height, ScaleFactors::new(scale_x, scale_y));
    vec![rect.x, rect.y, rect.width, rect.height]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_wide_image() {
        assert_eq!(fit_to_viewport(1000.0, 800.0, 500.0, 600.0), vec![500.0, 400.0]);
    }

    #[test]
    fn test_fit_tall_image() {
        assert_eq!(fit_to_viewport(1000.0, 2000.0, 500.0, 600.0), vec![300.0, 600.0]);
    }

    #[test]
    fn test_fit_degenerate() {
        assert_eq!(fit_to_viewport(0.0, 800.0, 500.0, 600.0), vec![0.0, 0.0]);
    }

    #[test]
    fn test_image_rect_to_display() {
        assert_eq!(
            image_rect_to_display(200.0, 240.0, 600.0, 320.0, 0.5, 0.5),
            vec![100.0, 120.0, 300.0, 160.0]
        );
    }
}
