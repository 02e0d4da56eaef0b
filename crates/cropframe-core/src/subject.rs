//! Subject categories offered after the crop is confirmed.

use crate::error::EditorError;
use serde::Serialize;

/// A selectable subject category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Subject {
    /// Identifier handed to collaborators
    pub id: &'static str,
    /// Display label
    pub label: &'static str,
}

/// Subjects in display order.
pub const SUBJECTS: [Subject; 6] = [
    Subject { id: "math", label: "Math" },
    Subject { id: "biology", label: "Biology" },
    Subject { id: "physics", label: "Physics" },
    Subject { id: "chemistry", label: "Chemistry" },
    Subject { id: "history", label: "History" },
    Subject { id: "geography", label: "Geography" },
];

/// Look up a subject by id.
pub fn find_subject(id: &str) -> Result<Subject, EditorError> {
    SUBJECTS
        .iter()
        .find(|s| s.id == id)
        .copied()
        .ok_or_else(|| EditorError::UnknownSubject(id.to_string()))
}
