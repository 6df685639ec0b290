#![forbid(unsafe_code)]

//! Ordered multi-subscriber listener registries.
//!
//! Notification order is registration order. Dispatch iterates a snapshot
//! taken when dispatch starts, so a callback may cancel any subscription
//! (its own included) or subscribe new listeners without disturbing the
//! iteration in progress.
//!
//! # Invariants
//!
//! 1. A cancelled listener is never called by a dispatch that *starts* after
//!    the cancellation.
//! 2. Listeners added during a dispatch first hear the next dispatch.
//! 3. Dropping a [`Subscription`] does not cancel it.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::state::StableState;

/// Called with each stable state the sheet comes to rest in.
pub type StateListener = dyn Fn(StableState);

/// Called with slide progress in `[-1, 1]` whenever the top moves.
pub type SlideListener = dyn Fn(f32);

/// Called when the activation flag flips.
pub type ActivationListener = dyn Fn(bool);

struct Entries<F: ?Sized> {
    next_id: u64,
    entries: Vec<(u64, Rc<F>)>,
}

trait Detach {
    fn detach(&self, id: u64) -> bool;
}

impl<F: ?Sized> Detach for RefCell<Entries<F>> {
    fn detach(&self, id: u64) -> bool {
        let mut inner = self.borrow_mut();
        let before = inner.entries.len();
        inner.entries.retain(|(entry_id, _)| *entry_id != id);
        inner.entries.len() != before
    }
}

/// Shared, ordered set of listeners.
pub struct ListenerRegistry<F: ?Sized> {
    inner: Rc<RefCell<Entries<F>>>,
}

impl<F: ?Sized> Default for ListenerRegistry<F> {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Entries {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }
}

impl<F: ?Sized> ListenerRegistry<F> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<F: ?Sized> fmt::Debug for ListenerRegistry<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("len", &self.len())
            .finish()
    }
}

impl<F: ?Sized + 'static> ListenerRegistry<F> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener. The returned handle cancels it.
    pub fn subscribe(&self, listener: Rc<F>) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.entries.push((id, listener));
            id
        };
        let registry: Weak<dyn Detach> = Rc::downgrade(&self.inner) as Weak<dyn Detach>;
        Subscription { id, registry }
    }

    /// Listeners in notification order, as of now.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Rc<F>> {
        self.inner
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect()
    }

    /// Remove every listener.
    pub fn clear(&self) {
        self.inner.borrow_mut().entries.clear();
    }
}

impl<T: Copy + 'static> ListenerRegistry<dyn Fn(T)> {
    /// Subscribe a closure.
    pub fn subscribe_fn(&self, listener: impl Fn(T) + 'static) -> Subscription {
        self.subscribe(Rc::new(listener))
    }

    /// Call every listener with `value`.
    pub fn notify(&self, value: T) {
        for listener in self.snapshot() {
            listener(value);
        }
    }
}

/// Handle to one registered listener.
pub struct Subscription {
    id: u64,
    registry: Weak<dyn Detach>,
}

impl Subscription {
    /// Remove the listener. Returns `false` if it was already gone or the
    /// registry no longer exists.
    pub fn cancel(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.detach(self.id))
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
