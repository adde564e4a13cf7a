//! Scoped pointer capture for drag and resize gestures.
//!
//! A [`PointerCaptureGuard`] captures the pointer on the element that received `pointerdown`
//! so every subsequent move/up/cancel event for that pointer is routed back through it, even
//! when the cursor leaves the element. Capture is released when the guard is dropped.

/// Owns an active pointer capture; releases it on drop.
pub struct PointerCaptureGuard {
    #[cfg(target_arch = "wasm32")]
    element: web_sys::Element,
    #[cfg(target_arch = "wasm32")]
    pointer_id: i32,
}

impl PointerCaptureGuard {
    /// Captures the event's pointer on the event's current target.
    ///
    /// Returns `None` when the target is not an element or the browser refuses the capture
    /// (for example, the pointer is no longer active). Native builds never capture.
    pub fn acquire(ev: &web_sys::PointerEvent) -> Option<Self> {
        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;

            let element = ev.current_target()?.dyn_into::<web_sys::Element>().ok()?;
            let pointer_id = ev.pointer_id();
            element.set_pointer_capture(pointer_id).ok()?;
            Some(Self {
                element,
                pointer_id,
            })
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = ev;
            None
        }
    }
}

impl Drop for PointerCaptureGuard {
    fn drop(&mut self) {
        #[cfg(target_arch = "wasm32")]
        {
            // Released already when the pointer went up; the browser reports that as an error.
            let _ = self.element.release_pointer_capture(self.pointer_id);
        }
    }
}
