//! Capture-to-subject flow around the region editor.
//!
//! ```text
//! AwaitingCapture --capture ok--> Editing --confirm--> ChoosingSubject --select--> Completed
//!       ^   \--capture failed--> CaptureFailed            |   ^
//!       |            \--retry--> AwaitingCapture           |   |
//!       \------------------back-- Editing <--back / swipe--/   |
//! ```
//!
//! The editor only exists once a valid image descriptor has arrived. Going back
//! from the subject sheet returns to the editor with the region intact.

use crate::config::{DismissConfig, EditorConfig};
use crate::dismiss::DismissGesture;
use crate::editor::RegionEditor;
use crate::error::EditorError;
use crate::mapper::ViewportBounds;
use crate::region::{CropRegion, ImageDescriptor};
use crate::subject::{find_subject, Subject};

/// Final output of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub image: ImageDescriptor,
    pub region: CropRegion,
    pub subject: Subject,
}

#[derive(Debug, Clone)]
pub enum SessionState {
    AwaitingCapture,
    CaptureFailed {
        reason: String,
        attempts: u32,
    },
    Editing(Box<RegionEditor>),
    ChoosingSubject {
        editor: Box<RegionEditor>,
        region: CropRegion,
        sheet: DismissGesture,
    },
    Completed(Selection),
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::AwaitingCapture => "awaiting capture",
            SessionState::CaptureFailed { .. } => "capture failed",
            SessionState::Editing(_) => "editing",
            SessionState::ChoosingSubject { .. } => "choosing subject",
            SessionState::Completed(_) => "completed",
        }
    }
}

/// Drives one capture → crop → subject flow.
#[derive(Debug, Clone)]
pub struct CaptureSession {
    state: SessionState,
    viewport: ViewportBounds,
    editor_config: EditorConfig,
    dismiss_config: DismissConfig,
    attempts: u32,
}

impl CaptureSession {
    pub fn new(viewport: ViewportBounds, editor_config: EditorConfig, dismiss_config: DismissConfig) -> Self {
        Self {
            state: SessionState::AwaitingCapture,
            viewport,
            editor_config,
            dismiss_config,
            attempts: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    fn invalid(&self, action: &'static str) -> EditorError {
        EditorError::InvalidTransition {
            from: self.state.name(),
            action,
        }
    }

    /// The capture collaborator produced an image.
    ///
    /// An invalid descriptor counts as a capture failure: the session moves to
    /// `CaptureFailed` and the error is returned.
    pub fn capture_succeeded(&mut self, uri: &str, width: f64, height: f64) -> Result<(), EditorError> {
        if !matches!(self.state, SessionState::AwaitingCapture) {
            return Err(self.invalid("accept a capture"));
        }
        match ImageDescriptor::new(uri, width, height) {
            Ok(image) => {
                let editor = RegionEditor::new(image, self.viewport, self.editor_config.clone());
                log::debug!("capture accepted: {uri}");
                self.state = SessionState::Editing(Box::new(editor));
                Ok(())
            }
            Err(err) => {
                self.capture_failed(&err.to_string())?;
                Err(err)
            }
        }
    }

    /// The capture collaborator reported a failure; the host shows a retry prompt.
    pub fn capture_failed(&mut self, reason: &str) -> Result<(), EditorError> {
        if !matches!(self.state, SessionState::AwaitingCapture) {
            return Err(self.invalid("record a capture failure"));
        }
        self.attempts += 1;
        log::warn!("capture failed (attempt {}): {reason}", self.attempts);
        self.state = SessionState::CaptureFailed {
            reason: reason.to_string(),
            attempts: self.attempts,
        };
        Ok(())
    }

    /// Leave the failure prompt and wait for another capture.
    pub fn retry(&mut self) -> Result<(), EditorError> {
        if !matches!(self.state, SessionState::CaptureFailed { .. }) {
            return Err(self.invalid("retry"));
        }
        self.state = SessionState::AwaitingCapture;
        Ok(())
    }

    pub fn editor(&self) -> Option<&RegionEditor> {
        match &self.state {
            SessionState::Editing(editor) => Some(editor.as_ref()),
            _ => None,
        }
    }

    pub fn editor_mut(&mut self) -> Option<&mut RegionEditor> {
        match &mut self.state {
            SessionState::Editing(editor) => Some(editor.as_mut()),
            _ => None,
        }
    }

    pub fn sheet(&self) -> Option<&DismissGesture> {
        match &self.state {
            SessionState::ChoosingSubject { sheet, .. } => Some(sheet),
            _ => None,
        }
    }

    pub fn sheet_mut(&mut self) -> Option<&mut DismissGesture> {
        match &mut self.state {
            SessionState::ChoosingSubject { sheet, .. } => Some(sheet),
            _ => None,
        }
    }

    pub fn selection(&self) -> Option<&Selection> {
        match &self.state {
            SessionState::Completed(selection) => Some(selection),
            _ => None,
        }
    }

    /// The last capture failure, if the session is showing the retry prompt.
    pub fn failure(&self) -> Option<EditorError> {
        match &self.state {
            SessionState::CaptureFailed { reason, .. } => Some(EditorError::CaptureFailed(reason.clone())),
            _ => None,
        }
    }

    /// Forward a layout change to the editor, if one is open.
    pub fn set_viewport(&mut self, viewport: ViewportBounds) {
        self.viewport = viewport;
        match &mut self.state {
            SessionState::Editing(editor) | SessionState::ChoosingSubject { editor, .. } => {
                editor.set_viewport(viewport)
            }
            _ => {}
        }
    }

    /// Confirm the crop and open the subject sheet.
    pub fn confirm_crop(&mut self) -> Result<CropRegion, EditorError> {
        let state = std::mem::replace(&mut self.state, SessionState::AwaitingCapture);
        match state {
            SessionState::Editing(mut editor) => {
                let region = editor.confirm();
                self.state = SessionState::ChoosingSubject {
                    editor,
                    region,
                    sheet: DismissGesture::new(self.dismiss_config.clone()),
                };
                Ok(region)
            }
            other => {
                self.state = other;
                Err(self.invalid("confirm crop"))
            }
        }
    }

    /// Pick a subject, completing the session.
    pub fn select_subject(&mut self, id: &str) -> Result<&Selection, EditorError> {
        if !matches!(self.state, SessionState::ChoosingSubject { .. }) {
            return Err(self.invalid("select a subject"));
        }
        let subject = find_subject(id)?;
        let state = std::mem::replace(&mut self.state, SessionState::AwaitingCapture);
        if let SessionState::ChoosingSubject { editor, region, .. } = state {
            log::debug!("subject {} chosen for {:?}", subject.id, region);
            self.state = SessionState::Completed(Selection {
                image: editor.image().clone(),
                region,
                subject,
            });
        }
        match &self.state {
            SessionState::Completed(selection) => Ok(selection),
            _ => Err(self.invalid("select a subject")),
        }
    }

    /// Return to the previous screen.
    ///
    /// From the subject sheet this reopens the editor with the confirmed
    /// region; from the editor it discards the image and waits for a new
    /// capture.
    pub fn back(&mut self) -> Result<(), EditorError> {
        let state = std::mem::replace(&mut self.state, SessionState::AwaitingCapture);
        match state {
            SessionState::ChoosingSubject { editor, .. } => {
                log::debug!("back to editor");
                self.state = SessionState::Editing(editor);
                Ok(())
            }
            SessionState::Editing(_) => {
                log::debug!("editor closed, awaiting capture");
                Ok(())
            }
            other => {
                self.state = other;
                Err(self.invalid("go back"))
            }
        }
    }

    /// The host finished a sheet animation. If it was the closing animation,
    /// the session goes back to the editor and `true` is returned.
    pub fn sheet_animation_finished(&mut self) -> Result<bool, EditorError> {
        let Some(sheet) = self.sheet_mut() else {
            return Err(self.invalid("finish a sheet animation"));
        };
        if sheet.animation_finished().is_some() {
            self.back()?;
            return Ok(true);
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::GestureKind;
    use crate::mapper::Point;

    fn session() -> CaptureSession {
        CaptureSession::new(
            ViewportBounds::new(500.0, 600.0),
            EditorConfig::default(),
            DismissConfig::default(),
        )
    }

    fn editing() -> CaptureSession {
        let mut s = session();
        s.capture_succeeded("file:///capture.jpg", 1000.0, 800.0).unwrap();
        s
    }

    #[test]
    fn test_full_flow() {
        let mut s = editing();
        let editor = s.editor_mut().unwrap();
        editor.begin_gesture(GestureKind::Move, Point::new(250.0, 200.0));
        editor.update_gesture(Point::new(260.0, 200.0));

        let region = s.confirm_crop().unwrap();
        assert_eq!(region, CropRegion::new(220.0, 240.0, 600.0, 320.0));

        let selection = s.select_subject("biology").unwrap();
        assert_eq!(selection.subject.id, "biology");
        assert_eq!(selection.region, region);
        assert_eq!(selection.image.uri(), "file:///capture.jpg");
        assert!(s.selection().is_some());
    }

    #[test]
    fn test_capture_failure_and_retry() {
        let mut s = session();
        s.capture_failed("camera unavailable").unwrap();
        assert!(matches!(
            s.state(),
            SessionState::CaptureFailed { attempts: 1, .. }
        ));
        assert!(s.editor().is_none());
        assert_eq!(
            s.failure(),
            Some(EditorError::CaptureFailed("camera unavailable".to_string()))
        );

        s.retry().unwrap();
        assert!(s.failure().is_none());
        s.capture_failed("still unavailable").unwrap();
        assert!(matches!(
            s.state(),
            SessionState::CaptureFailed { attempts: 2, .. }
        ));
    }

    #[test]
    fn test_invalid_descriptor_is_capture_failure() {
        let mut s = session();
        let err = s.capture_succeeded("file:///empty.jpg", 0.0, 0.0).unwrap_err();
        assert!(matches!(err, EditorError::InvalidImage { .. }));
        assert!(matches!(s.state(), SessionState::CaptureFailed { .. }));
    }

    #[test]
    fn test_confirm_requires_editor() {
        let mut s = session();
        let err = s.confirm_crop().unwrap_err();
        assert_eq!(
            err,
            EditorError::InvalidTransition {
                from: "awaiting capture",
                action: "confirm crop",
            }
        );
        assert!(matches!(s.state(), SessionState::AwaitingCapture));
    }

    #[test]
    fn test_unknown_subject_keeps_sheet_open() {
        let mut s = editing();
        s.confirm_crop().unwrap();
        assert!(s.select_subject("astrology").is_err());
        assert!(matches!(s.state(), SessionState::ChoosingSubject { .. }));
    }

    #[test]
    fn test_back_from_sheet_keeps_region() {
        let mut s = editing();
        let editor = s.editor_mut().unwrap();
        editor.begin_gesture(GestureKind::ResizeRight, Point::new(400.0, 200.0));
        editor.update_gesture(Point::new(410.0, 200.0));
        s.confirm_crop().unwrap();

        s.back().unwrap();
        assert_eq!(s.editor().unwrap().region().width, 620.0);

        s.back().unwrap();
        assert!(matches!(s.state(), SessionState::AwaitingCapture));
        assert!(s.back().is_err());
    }

    #[test]
    fn test_swipe_dismiss_returns_to_editor() {
        let mut s = editing();
        s.confirm_crop().unwrap();

        let sheet = s.sheet_mut().unwrap();
        assert!(sheet.begin(0.0, 4.0));
        sheet.drag(150.0);
        assert!(sheet.release().unwrap().dismisses);

        assert!(s.sheet_animation_finished().unwrap());
        assert!(s.editor().is_some());
    }

    #[test]
    fn test_short_swipe_stays_on_sheet() {
        let mut s = editing();
        s.confirm_crop().unwrap();

        let sheet = s.sheet_mut().unwrap();
        sheet.begin(0.0, 4.0);
        sheet.drag(60.0);
        sheet.release();

        assert!(!s.sheet_animation_finished().unwrap());
        assert!(matches!(s.state(), SessionState::ChoosingSubject { .. }));
    }
}
