//! Scoped ownership of everything a pointer gesture acquires.
//!
//! A [`GestureGuard`] holds the pointer capture and any window-level listener registrations
//! for one drag or resize. Dropping it releases all of them, so ending the gesture, starting a
//! new one, or tearing down the component all clean up the same way.

use leptos::leptos_dom::helpers::WindowListenerHandle;
use platform_host_web::PointerCaptureGuard;

pub struct GestureGuard {
    capture: Option<PointerCaptureGuard>,
    releases: Vec<Box<dyn FnOnce()>>,
}

impl GestureGuard {
    /// Starts a gesture, capturing the pointer on the event's current target when possible.
    pub fn begin(ev: &web_sys::PointerEvent) -> Self {
        Self::with_capture(PointerCaptureGuard::acquire(ev))
    }

    pub fn with_capture(capture: Option<PointerCaptureGuard>) -> Self {
        Self {
            capture,
            releases: Vec::new(),
        }
    }

    /// Registers a window listener to be removed when the gesture ends.
    pub fn listen(self, handle: WindowListenerHandle) -> Self {
        self.on_release(move || handle.remove())
    }

    /// Registers arbitrary cleanup to run when the gesture ends.
    pub fn on_release(mut self, release: impl FnOnce() + 'static) -> Self {
        self.releases.push(Box::new(release));
        self
    }
}

impl Drop for GestureGuard {
    fn drop(&mut self) {
        for release in self.releases.drain(..).rev() {
            release();
        }
        self.capture = None;
    }
}

/// Holds at most one live gesture.
#[derive(Default)]
pub struct GestureSlot {
    active: Option<GestureGuard>,
}

impl GestureSlot {
    /// Installs `guard`, ending whatever gesture was active before.
    pub fn replace(&mut self, guard: GestureGuard) {
        self.active = None;
        self.active = Some(guard);
    }

    /// Ends the active gesture, if any. Returns whether one was active.
    pub fn end(&mut self) -> bool {
        self.active.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use pretty_assertions::assert_eq;

    use super::*;

    fn recording_guard(log: &Rc<RefCell<Vec<&'static str>>>, name: &'static str) -> GestureGuard {
        let log = log.clone();
        GestureGuard::with_capture(None).on_release(move || log.borrow_mut().push(name))
    }

    #[test]
    fn dropping_guard_runs_releases_in_reverse_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (first, second) = (log.clone(), log.clone());
        let guard = GestureGuard::with_capture(None)
            .on_release(move || first.borrow_mut().push("move"))
            .on_release(move || second.borrow_mut().push("up"));
        drop(guard);
        assert_eq!(*log.borrow(), vec!["up", "move"]);
    }

    #[test]
    fn replacing_ends_previous_gesture_first() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut slot = GestureSlot::default();
        slot.replace(recording_guard(&log, "drag"));
        slot.replace(recording_guard(&log, "resize"));
        assert_eq!(*log.borrow(), vec!["drag"]);

        assert!(slot.end());
        assert!(!slot.end());
        assert_eq!(*log.borrow(), vec!["drag", "resize"]);
    }

    #[test]
    fn dropping_slot_ends_active_gesture() {
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let mut slot = GestureSlot::default();
            slot.replace(recording_guard(&log, "drag"));
        }
        assert_eq!(*log.borrow(), vec!["drag"]);
    }
}
