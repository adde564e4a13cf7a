//! Typed publish/subscribe bus for window lifecycle changes.

use std::{cell::RefCell, rc::Rc};

use desktop_app_contract::ApplicationId;

use crate::model::WindowId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowLifecycleEvent {
    Opened {
        window_id: WindowId,
        app_id: ApplicationId,
    },
    Focused {
        window_id: WindowId,
        app_id: ApplicationId,
    },
    Minimized {
        window_id: WindowId,
        app_id: ApplicationId,
    },
    Restored {
        window_id: WindowId,
        app_id: ApplicationId,
    },
    Closed {
        window_id: WindowId,
        app_id: ApplicationId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Handler = Rc<dyn Fn(&WindowLifecycleEvent)>;

#[derive(Default)]
struct BusInner {
    next_id: u64,
    handlers: Vec<(SubscriptionId, Handler)>,
}

/// Cloneable handle to a shared list of lifecycle subscribers.
#[derive(Clone, Default)]
pub struct LifecycleBus {
    inner: Rc<RefCell<BusInner>>,
}

impl LifecycleBus {
    pub fn subscribe(&self, handler: impl Fn(&WindowLifecycleEvent) + 'static) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.handlers.push((id, Rc::new(handler)));
        id
    }

    /// Removes a subscriber. Returns whether it was still registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.handlers.len();
        inner.handlers.retain(|(sub, _)| *sub != id);
        inner.handlers.len() != before
    }

    /// Delivers `event` to every subscriber registered at the time of the call.
    ///
    /// Handlers may subscribe or unsubscribe while being called; changes apply to the next
    /// publish.
    pub fn publish(&self, event: &WindowLifecycleEvent) {
        let handlers: Vec<Handler> = self
            .inner
            .borrow()
            .handlers
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect();
        for handler in handlers {
            handler(event);
        }
    }
}
