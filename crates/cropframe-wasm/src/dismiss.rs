//! Subject sheet swipe-to-dismiss bindings.
//!
//! The host owns the animation; this side only decides where it goes and
//! reports the dismissal once the host says it has finished.

use crate::types::{from_js_or_default, to_js};
use cropframe_core::{DismissConfig, DismissGesture, SheetAnimation, SheetPhase};
use wasm_bindgen::prelude::*;

pub(crate) fn phase_name(phase: SheetPhase) -> &'static str {
    match phase {
        SheetPhase::Resting => "resting",
        SheetPhase::Dragging { .. } => "dragging",
        SheetPhase::Returning { .. } => "returning",
        SheetPhase::Closing { .. } => "closing",
        SheetPhase::Dismissed => "dismissed",
    }
}

/// JavaScript-accessible dismiss gesture handler.
///
/// # Example (TypeScript)
/// ```typescript
/// const sheet = new JsDismissGesture({ container_height: window.innerHeight });
/// sheet.begin(dx, dy);
/// sheet.drag(totalDy);
/// const anim = sheet.release(); // { from, to, dismisses } or undefined
/// animate(anim, () => sheet.animation_finished(() => router.back()));
/// ```
#[wasm_bindgen]
pub struct JsDismissGesture {
    inner: DismissGesture,
}

#[wasm_bindgen]
impl JsDismissGesture {
    /// `config` is an optional partial `{ threshold, container_height }`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsDismissGesture, JsValue> {
        let config: DismissConfig = from_js_or_default(config, "dismiss config")?;
        Ok(Self::with_config(config))
    }

    /// Whether a drag starting with `(dx, dy)` is vertical enough to claim.
    pub fn claims(dx: f64, dy: f64) -> bool {
        DismissGesture::claims(dx, dy)
    }

    #[wasm_bindgen(getter)]
    pub fn offset(&self) -> f64 {
        self.inner.offset()
    }

    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> String {
        phase_name(self.inner.phase()).to_string()
    }

    pub fn begin(&mut self, dx: f64, dy: f64) -> bool {
        self.inner.begin(dx, dy)
    }

    pub fn drag(&mut self, dy: f64) {
        self.inner.drag(dy);
    }

    /// Animation `{ from, to, dismisses }` to run, or `undefined` if no drag
    /// was in progress.
    pub fn release(&mut self) -> Result<JsValue, JsValue> {
        animation_to_js(self.inner.release())
    }

    pub fn cancel(&mut self) -> Result<JsValue, JsValue> {
        animation_to_js(self.inner.cancel())
    }

    /// Report animation completion. `on_dismiss` is invoked at most once, when
    /// a closing animation completes.
    pub fn animation_finished(&mut self, on_dismiss: Option<js_sys::Function>) -> Result<bool, JsValue> {
        if self.inner.animation_finished().is_none() {
            return Ok(false);
        }
        if let Some(callback) = on_dismiss {
            callback.call0(&JsValue::NULL)?;
        }
        Ok(true)
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }
}

impl JsDismissGesture {
    pub(crate) fn with_config(config: DismissConfig) -> Self {
        Self {
            inner: DismissGesture::new(config),
        }
    }
}

fn animation_to_js(animation: Option<SheetAnimation>) -> Result<JsValue, JsValue> {
    match animation {
        Some(animation) => to_js(&animation),
        None => Ok(JsValue::UNDEFINED),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_vertical_only() {
        assert!(JsDismissGesture::claims(2.0, 10.0));
        assert!(!JsDismissGesture::claims(10.0, 2.0));
    }

    #[test]
    fn test_long_swipe_dismisses_once() {
        let mut sheet = JsDismissGesture::with_config(DismissConfig::default());
        assert!(sheet.begin(0.0, 5.0));
        sheet.drag(140.0);
        assert_eq!(sheet.offset(), 140.0);
        assert_eq!(sheet.phase(), "dragging");

        sheet.inner.release();
        assert_eq!(sheet.phase(), "closing");
        assert_eq!(sheet.animation_finished(None), Ok(true));
        assert_eq!(sheet.phase(), "dismissed");
        assert_eq!(sheet.animation_finished(None), Ok(false));
    }

    #[test]
    fn test_short_swipe_returns() {
        let mut sheet = JsDismissGesture::with_config(DismissConfig::default());
        sheet.begin(0.0, 5.0);
        sheet.drag(100.0);
        sheet.inner.release();
        assert_eq!(sheet.phase(), "returning");
        assert_eq!(sheet.animation_finished(None), Ok(false));
        assert_eq!(sheet.phase(), "resting");
    }
}
