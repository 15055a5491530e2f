//! Observable value cells.
//!
//! A cell holds one value and a list of subscribers. Every `set` is delivered
//! to every subscriber, in the order the sets happened, with no coalescing.
//! Single-threaded (WASM constraint): interior mutability via RefCell, shared
//! via Rc. A subscriber may set the same cell from inside its callback; the
//! nested value is queued and delivered after the current round.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

/// Identifies one subscription on one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<T> = (SubscriptionId, Box<dyn FnMut(&T)>);

struct Inner<T> {
    value: RefCell<T>,
    subscribers: RefCell<Vec<Subscriber<T>>>,
    /// Values set while a notification round is running
    pending: RefCell<VecDeque<T>>,
    /// Unsubscribed during a notification round
    cancelled: RefCell<Vec<SubscriptionId>>,
    notifying: Cell<bool>,
    next_id: Cell<u64>,
}

/// Shared observable cell: clone-cheap via Rc.
pub struct Observable<T> {
    inner: Rc<Inner<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(value),
                subscribers: RefCell::new(Vec::new()),
                pending: RefCell::new(VecDeque::new()),
                cancelled: RefCell::new(Vec::new()),
                notifying: Cell::new(false),
                next_id: Cell::new(1),
            }),
        }
    }

    /// Snapshot of the current value
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Read the current value without cloning it
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Replace the value and notify every subscriber
    pub fn set(&self, value: T) {
        *self.inner.value.borrow_mut() = value.clone();

        if self.inner.notifying.get() {
            self.inner.pending.borrow_mut().push_back(value);
            return;
        }

        self.inner.notifying.set(true);
        self.notify(&value);
        loop {
            let next = self.inner.pending.borrow_mut().pop_front();
            match next {
                Some(v) => self.notify(&v),
                None => break,
            }
        }
        self.inner.notifying.set(false);
    }

    /// Derive the next value from the current one
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut value = self.get();
        f(&mut value);
        self.set(value);
    }

    /// Register a subscriber. It is called with the current value right away,
    /// then with every later value.
    pub fn subscribe(&self, mut f: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);

        let current = self.get();
        f(&current);

        self.inner.subscribers.borrow_mut().push((id, Box::new(f)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        if self.inner.notifying.get() {
            self.inner.cancelled.borrow_mut().push(id);
        }
        if let Ok(mut subs) = self.inner.subscribers.try_borrow_mut() {
            subs.retain(|(sid, _)| *sid != id);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    fn notify(&self, value: &T) {
        // Take the list out so callbacks can subscribe without a double borrow
        let mut current = std::mem::take(&mut *self.inner.subscribers.borrow_mut());
        for (id, callback) in current.iter_mut() {
            if self.inner.cancelled.borrow().contains(id) {
                continue;
            }
            callback(value);
        }

        let mut subs = self.inner.subscribers.borrow_mut();
        let added = std::mem::take(&mut *subs);
        current.extend(added);
        let cancelled = std::mem::take(&mut *self.inner.cancelled.borrow_mut());
        current.retain(|(id, _)| !cancelled.contains(id));
        *subs = current;
    }
}

impl<T: Clone + Default + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
