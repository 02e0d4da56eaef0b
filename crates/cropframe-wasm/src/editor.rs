//! Region editor WASM bindings.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const editor = new JsRegionEditor(uri, 4032, 3024, screen.width, screen.height, {
//!   cancel_policy: 'rollback',
//! });
//!
//! canvas.addEventListener('touchmove', (e) => {
//!   const changed = editor.handle_pointer(toRawPointer(e), originX, originY);
//!   if (changed) draw(editor.overlay());
//! });
//!
//! const region = editor.confirm(); // { x, y, width, height } in image pixels
//! ```

use crate::types::{from_js_or_default, js_error, to_js};
use cropframe_core::{
    EditorConfig, GestureKind, ImageDescriptor, Point, PointerEvent, PointerPhase, RawPointer,
    RegionEditor, ViewportBounds,
};
use wasm_bindgen::prelude::*;

/// Parse a normalized pointer phase name.
pub(crate) fn parse_phase(name: &str) -> Option<PointerPhase> {
    match name {
        "start" => Some(PointerPhase::Start),
        "move" => Some(PointerPhase::Move),
        "end" => Some(PointerPhase::End),
        "cancel" => Some(PointerPhase::Cancel),
        _ => None,
    }
}

/// JavaScript-accessible crop region editor.
#[wasm_bindgen]
pub struct JsRegionEditor {
    inner: RegionEditor,
}

#[wasm_bindgen]
impl JsRegionEditor {
    /// Open an editor for a captured image.
    ///
    /// The viewport is derived from the screen size and the configured
    /// `max_height_fraction`. `config` is an optional partial `EditorConfig`.
    ///
    /// # Errors
    /// Returns error for non-positive image dimensions or a malformed config.
    #[wasm_bindgen(constructor)]
    pub fn new(
        uri: &str,
        image_width: f64,
        image_height: f64,
        screen_width: f64,
        screen_height: f64,
        config: JsValue,
    ) -> Result<JsRegionEditor, JsValue> {
        let config: EditorConfig = from_js_or_default(config, "editor config")?;
        Self::open(uri, image_width, image_height, screen_width, screen_height, config).map_err(js_error)
    }

    /// Layout changed (rotation, resize).
    pub fn set_screen(&mut self, screen_width: f64, screen_height: f64) {
        let fraction = self.inner.config().max_height_fraction;
        self.inner
            .set_viewport(ViewportBounds::from_screen(screen_width, screen_height, fraction));
    }

    /// Swap in a new capture, re-seeding the region.
    pub fn replace_image(&mut self, uri: &str, width: f64, height: f64) -> Result<(), JsValue> {
        let image = ImageDescriptor::new(uri, width, height).map_err(js_error)?;
        self.inner.replace_image(image);
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn display_width(&self) -> f64 {
        self.inner.display_size().width
    }

    #[wasm_bindgen(getter)]
    pub fn display_height(&self) -> f64 {
        self.inner.display_size().height
    }

    #[wasm_bindgen(getter)]
    pub fn is_active(&self) -> bool {
        self.inner.is_active()
    }

    /// Kind of the gesture in progress, e.g. `"resize-top-left"`.
    pub fn active_kind(&self) -> Option<String> {
        self.inner.active_kind().map(|k| k.as_str().to_string())
    }

    /// Current region `{ x, y, width, height }` in image space.
    pub fn region(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.region())
    }

    /// Masks, border and handles in display space.
    pub fn overlay(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.overlay())
    }

    /// Gesture kind a pointer at display `(x, y)` would start, if any.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<String> {
        self.inner
            .hit_test(Point::new(x, y))
            .map(|k| k.as_str().to_string())
    }

    /// Start a named gesture explicitly (for hosts that hit-test themselves).
    ///
    /// # Errors
    /// Returns error if `kind` is not a known gesture name.
    pub fn begin_gesture(&mut self, kind: &str, x: f64, y: f64) -> Result<bool, JsValue> {
        let kind = GestureKind::from_name(kind)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown gesture: {}", kind)))?;
        Ok(self.inner.begin_gesture(kind, Point::new(x, y)))
    }

    pub fn update_gesture(&mut self, x: f64, y: f64) -> bool {
        self.inner.update_gesture(Point::new(x, y))
    }

    pub fn end_gesture(&mut self) {
        self.inner.end_gesture();
    }

    pub fn cancel_gesture(&mut self) {
        self.inner.cancel_gesture();
    }

    /// Feed an already-normalized event. `phase` is one of
    /// `start`, `move`, `end`, `cancel`; other values are ignored.
    pub fn handle_event(&mut self, x: f64, y: f64, phase: &str) -> bool {
        match parse_phase(phase) {
            Some(phase) => self.inner.handle_pointer(PointerEvent::new(x, y, phase)),
            None => false,
        }
    }

    /// Feed a raw mouse/touch event.
    ///
    /// `raw` is `{ source: 'mouse', kind, page_x, page_y }` or
    /// `{ source: 'touch', kind, touches, changed }`; `(origin_x, origin_y)` is
    /// the page position of the displayed image's top-left corner.
    pub fn handle_pointer(&mut self, raw: JsValue, origin_x: f64, origin_y: f64) -> Result<bool, JsValue> {
        let raw: RawPointer = serde_wasm_bindgen::from_value(raw)
            .map_err(|e| JsValue::from_str(&format!("Invalid pointer event: {}", e)))?;
        Ok(self.handle_raw(&raw, Point::new(origin_x, origin_y)))
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Confirm and return the final image-space region.
    pub fn confirm(&mut self) -> Result<JsValue, JsValue> {
        let region = self.inner.confirm();
        to_js(&region)
    }
}

impl JsRegionEditor {
    pub(crate) fn open(
        uri: &str,
        image_width: f64,
        image_height: f64,
        screen_width: f64,
        screen_height: f64,
        config: EditorConfig,
    ) -> Result<Self, cropframe_core::EditorError> {
        let viewport = ViewportBounds::from_screen(screen_width, screen_height, config.max_height_fraction);
        let inner = RegionEditor::from_capture(uri, image_width, image_height, viewport, config)?;
        Ok(Self { inner })
    }

    pub(crate) fn handle_raw(&mut self, raw: &RawPointer, origin: Point) -> bool {
        match raw.normalize(origin) {
            Some(event) => self.inner.handle_pointer(event),
            None => false,
        }
    }

    pub(crate) fn inner(&self) -> &RegionEditor {
        &self.inner
    }
}
