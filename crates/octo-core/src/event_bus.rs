//! Queue between host event callbacks and the UI frame loop.
//!
//! Host listeners fire from JS callbacks; they only push here. The app drains
//! the queue once per frame and feeds the controller, so events are applied
//! in arrival order on the UI loop.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use octo_types::event::HostEvent;

/// Shared event bus: clone-cheap via Rc.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<RefCell<VecDeque<HostEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, event: HostEvent) {
        self.inner.borrow_mut().push_back(event);
    }

    /// Drain all pending events
    pub fn drain(&self) -> Vec<HostEvent> {
        self.inner.borrow_mut().drain(..).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.inner.borrow().is_empty()
    }
}
