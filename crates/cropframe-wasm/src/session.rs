//! Capture → crop → subject session bindings.
//!
//! Wraps the whole screen flow so a host only routes events and renders what
//! the current state asks for.

use crate::dismiss::phase_name;
use crate::editor::parse_phase;
use crate::types::{from_js_or_default, js_error, to_js};
use cropframe_core::{
    CaptureSession, DismissConfig, EditorConfig, EditorError, PointerEvent, ViewportBounds,
    SUBJECTS,
};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

/// Optional configuration accepted by the session constructor.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SessionOptions {
    editor: EditorConfig,
    dismiss: DismissConfig,
}

/// Subjects offered after the crop, as `[{ id, label }]`.
#[wasm_bindgen]
pub fn subjects() -> Result<JsValue, JsValue> {
    to_js(&SUBJECTS)
}

#[wasm_bindgen]
pub struct JsCaptureSession {
    inner: CaptureSession,
    max_height_fraction: f64,
}

#[wasm_bindgen]
impl JsCaptureSession {
    /// `options` is an optional `{ editor, dismiss }` object of partial configs.
    #[wasm_bindgen(constructor)]
    pub fn new(screen_width: f64, screen_height: f64, options: JsValue) -> Result<JsCaptureSession, JsValue> {
        let options: SessionOptions = from_js_or_default(options, "session options")?;
        Ok(Self::with_options(screen_width, screen_height, options.editor, options.dismiss))
    }

    /// Name of the current screen state, e.g. `"editing"`.
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        self.inner.state().name().to_string()
    }

    /// Failure message shown on the retry prompt.
    pub fn failure(&self) -> Option<String> {
        self.inner.failure().map(|e| e.to_string())
    }

    pub fn capture_succeeded(&mut self, uri: &str, width: f64, height: f64) -> Result<(), JsValue> {
        self.inner.capture_succeeded(uri, width, height).map_err(js_error)
    }

    pub fn capture_failed(&mut self, reason: &str) -> Result<(), JsValue> {
        self.inner.capture_failed(reason).map_err(js_error)
    }

    pub fn retry(&mut self) -> Result<(), JsValue> {
        self.inner.retry().map_err(js_error)
    }

    pub fn set_screen(&mut self, screen_width: f64, screen_height: f64) {
        self.inner.set_viewport(ViewportBounds::from_screen(
            screen_width,
            screen_height,
            self.max_height_fraction,
        ));
    }

    /// Forward a normalized pointer event to the editor. Ignored when the
    /// editor is not on screen.
    pub fn editor_event(&mut self, x: f64, y: f64, phase: &str) -> bool {
        match (self.inner.editor_mut(), parse_phase(phase)) {
            (Some(editor), Some(phase)) => editor.handle_pointer(PointerEvent::new(x, y, phase)),
            _ => false,
        }
    }

    /// Editor overlay geometry, or `undefined` when the editor is not on screen.
    pub fn overlay(&self) -> Result<JsValue, JsValue> {
        match self.inner.editor() {
            Some(editor) => to_js(&editor.overlay()),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    pub fn confirm_crop(&mut self) -> Result<JsValue, JsValue> {
        let region = self.inner.confirm_crop().map_err(js_error)?;
        to_js(&region)
    }

    /// Start a drag on the subject sheet.
    pub fn sheet_begin(&mut self, dx: f64, dy: f64) -> bool {
        self.inner.sheet_mut().is_some_and(|sheet| sheet.begin(dx, dy))
    }

    pub fn sheet_drag(&mut self, dy: f64) {
        if let Some(sheet) = self.inner.sheet_mut() {
            sheet.drag(dy);
        }
    }

    /// Animation `{ from, to, dismisses }`, or `undefined`.
    pub fn sheet_release(&mut self) -> Result<JsValue, JsValue> {
        match self.inner.sheet_mut().and_then(|sheet| sheet.release()) {
            Some(animation) => to_js(&animation),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    pub fn sheet_phase(&self) -> Option<String> {
        self.inner
            .sheet()
            .map(|sheet| phase_name(sheet.phase()).to_string())
    }

    /// Returns `true` if the sheet was dismissed and the editor is back.
    pub fn sheet_animation_finished(&mut self) -> Result<bool, JsValue> {
        self.inner.sheet_animation_finished().map_err(js_error)
    }

    /// Complete the session with a subject; returns `{ image, region, subject }`.
    pub fn select_subject(&mut self, id: &str) -> Result<JsValue, JsValue> {
        let selection = self.select(id).map_err(js_error)?;
        to_js(&selection)
    }

    pub fn back(&mut self) -> Result<(), JsValue> {
        self.inner.back().map_err(js_error)
    }
}

/// Serializable view of a completed selection.
#[derive(Debug, serde::Serialize)]
struct SelectionView {
    uri: String,
    image_width: f64,
    image_height: f64,
    region: cropframe_core::CropRegion,
    subject: cropframe_core::Subject,
}

impl JsCaptureSession {
    pub(crate) fn with_options(
        screen_width: f64,
        screen_height: f64,
        editor: EditorConfig,
        dismiss: DismissConfig,
    ) -> Self {
        let max_height_fraction = editor.max_height_fraction;
        let viewport = ViewportBounds::from_screen(screen_width, screen_height, max_height_fraction);
        Self {
            inner: CaptureSession::new(viewport, editor, dismiss),
            max_height_fraction,
        }
    }

    fn select(&mut self, id: &str) -> Result<SelectionView, EditorError> {
        let selection = self.inner.select_subject(id)?;
        Ok(SelectionView {
            uri: selection.image.uri().to_string(),
            image_width: selection.image.width(),
            image_height: selection.image.height(),
            region: selection.region,
            subject: selection.subject,
        })
    }
}
