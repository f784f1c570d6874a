//! Platform abstraction layer
//!
//! Browser timer plumbing. The simulation runs off two repeating tasks (the
//! 60 Hz tick engine and the 10 s difficulty ramp); both are held as
//! [`Interval`] handles so they share one lifecycle and are cancelled
//! together on teardown, never mutating state after disposal.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// RAII handle for a `setInterval` registration. Dropping the handle clears
/// the interval, so a callback can never outlive its owner.
#[cfg(target_arch = "wasm32")]
pub struct Interval {
    id: i32,
    // Kept alive for as long as the browser may invoke it
    _closure: Closure<dyn FnMut()>,
}

#[cfg(target_arch = "wasm32")]
impl Interval {
    /// Register `f` to run every `period_ms` milliseconds.
    pub fn start<F>(period_ms: i32, f: F) -> Result<Self, JsValue>
    where
        F: FnMut() + 'static,
    {
        let closure = Closure::<dyn FnMut()>::new(f);
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            period_ms,
        )?;
        Ok(Self {
            id,
            _closure: closure,
        })
    }
}

#[cfg(target_arch = "wasm32")]
impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.id);
        }
    }
}
