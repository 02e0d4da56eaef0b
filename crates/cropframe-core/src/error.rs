//! Error types for the editor boundary.
//!
//! Geometry updates never fail; these errors only surface where the editor
//! meets its collaborators (capture results, subject selection, screen flow).

use thiserror::Error;

/// Errors raised when entering or driving the editing flow.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    /// The captured image has a zero or non-finite dimension.
    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidImage { width: f64, height: f64 },

    /// The capture collaborator reported a failure.
    #[error("Capture failed: {0}")]
    CaptureFailed(String),

    /// The requested subject id is not in the catalog.
    #[error("Unknown subject: {0}")]
    UnknownSubject(String),

    /// A pixel buffer's length does not match its declared dimensions.
    #[error("Pixel buffer holds {actual} bytes, expected {expected}")]
    PixelBufferMismatch { expected: usize, actual: usize },

    /// The requested action is not valid in the current session state.
    #[error("Cannot {action} while {from}")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EditorError::InvalidImage {
            width: 0.0,
            height: 600.0,
        };
        assert_eq!(err.to_string(), "Invalid image dimensions: 0x600");

        let err = EditorError::UnknownSubject("art".to_string());
        assert_eq!(err.to_string(), "Unknown subject: art");

        let err = EditorError::InvalidTransition {
            from: "awaiting capture",
            action: "confirm crop",
        };
        assert_eq!(err.to_string(), "Cannot confirm crop while awaiting capture");
    }
}
