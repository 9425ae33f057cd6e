//! Scoped listener registration.
//!
//! [`IntentListeners`] keeps a list of handlers owned by one component. Each
//! [`IntentListeners::subscribe`] call returns a [`Subscription`] guard; the
//! handler stays registered exactly as long as the guard lives. Dropping the
//! listener list first is fine: outstanding guards then do nothing.
//!
//! Handlers may subscribe or cancel other handlers while an event is being
//! emitted. New handlers only see later events; cancelled handlers are
//! skipped for the rest of the current emit.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Handler<T> = Rc<dyn Fn(&T)>;

struct Slots<T> {
    next_id: u64,
    entries: Vec<(u64, Handler<T>)>,
}

impl<T> Slots<T> {
    fn remove(&mut self, id: u64) -> Option<Handler<T>> {
        let position = self.entries.iter().position(|(entry_id, _)| *entry_id == id)?;
        Some(self.entries.remove(position).1)
    }

    fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|(entry_id, _)| *entry_id == id)
    }
}

/// Handlers interested in events of type `T`.
pub struct IntentListeners<T> {
    slots: Rc<RefCell<Slots<T>>>,
}

impl<T> Default for IntentListeners<T> {
    fn default() -> Self {
        Self {
            slots: Rc::new(RefCell::new(Slots {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }
}

impl<T> fmt::Debug for IntentListeners<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntentListeners")
            .field("len", &self.len())
            .finish()
    }
}

impl<T: 'static> IntentListeners<T> {
    /// Create an empty listener list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` until the returned guard is dropped.
    #[must_use = "dropping the subscription unregisters the handler immediately"]
    pub fn subscribe(&self, handler: impl Fn(&T) + 'static) -> Subscription {
        let id = {
            let mut slots = self.slots.borrow_mut();
            let id = slots.next_id;
            slots.next_id = slots.next_id.wrapping_add(1);
            slots.entries.push((id, Rc::new(handler)));
            id
        };
        let slots: Rc<RefCell<dyn Unsubscribe>> = self.slots.clone();
        Subscription {
            id,
            slots: Some(Rc::downgrade(&slots)),
        }
    }

    /// Deliver `event` to every live handler, in subscription order.
    ///
    /// Returns how many handlers were called.
    #[must_use]
    pub fn emit(&self, event: &T) -> usize {
        let snapshot: Vec<(u64, Handler<T>)> = self
            .slots
            .borrow()
            .entries
            .iter()
            .map(|(id, handler)| (*id, Rc::clone(handler)))
            .collect();

        let mut delivered = 0;
        for (id, handler) in snapshot {
            if !self.slots.borrow().contains(id) {
                continue;
            }
            handler(event);
            delivered += 1;
        }
        delivered
    }
}

impl<T> IntentListeners<T> {
    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.borrow().entries.len()
    }

    /// Whether no handler is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// The removed handler is handed back so it is dropped after the borrow ends;
// its captures may own further subscriptions.
trait Unsubscribe {
    fn unsubscribe(&mut self, id: u64) -> Option<Box<dyn Any>>;
}

impl<T: 'static> Unsubscribe for Slots<T> {
    fn unsubscribe(&mut self, id: u64) -> Option<Box<dyn Any>> {
        self.remove(id)
            .map(|handler| Box::new(handler) as Box<dyn Any>)
    }
}

/// Guard that keeps one handler registered.
///
/// Dropping the guard unregisters the handler.
#[must_use = "dropping the subscription unregisters the handler immediately"]
pub struct Subscription {
    id: u64,
    slots: Option<Weak<RefCell<dyn Unsubscribe>>>,
}

impl Subscription {
    /// Unregister now. Returns `false` if the handler was already gone.
    pub fn cancel(mut self) -> bool {
        self.release()
    }

    /// Whether the handler is still registered.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.slots.as_ref().is_some_and(|slots| slots.strong_count() > 0)
    }

    fn release(&mut self) -> bool {
        let Some(slots) = self.slots.take().and_then(|weak| weak.upgrade()) else {
            return false;
        };
        let removed = slots.borrow_mut().unsubscribe(self.id);
        removed.is_some()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use rstest::rstest;

    #[rstest]
    fn emit_reaches_every_live_handler() {
        let listeners = IntentListeners::<u32>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let first_seen = Rc::clone(&seen);
        let _first = listeners.subscribe(move |value| first_seen.borrow_mut().push(("first", *value)));
        let second_seen = Rc::clone(&seen);
        let _second =
            listeners.subscribe(move |value| second_seen.borrow_mut().push(("second", *value)));

        assert_eq!(listeners.emit(&7), 2);
        assert_eq!(*seen.borrow(), vec![("first", 7), ("second", 7)]);
    }

    #[rstest]
    fn dropping_guard_unsubscribes() {
        let listeners = IntentListeners::<u32>::new();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let guard = listeners.subscribe(move |_| counter.set(counter.get() + 1));

        assert_eq!(listeners.emit(&1), 1);
        drop(guard);
        assert_eq!(listeners.emit(&2), 0);

        assert_eq!(calls.get(), 1);
        assert!(listeners.is_empty());
    }

    #[rstest]
    fn cancel_reports_whether_handler_was_registered() {
        let listeners = IntentListeners::<u32>::new();
        let guard = listeners.subscribe(|_| {});
        assert!(guard.is_active());
        assert!(guard.cancel());
        assert_eq!(listeners.len(), 0);
    }

    #[rstest]
    fn guard_outliving_listeners_is_inert() {
        let listeners = IntentListeners::<u32>::new();
        let guard = listeners.subscribe(|_| {});
        drop(listeners);

        assert!(!guard.is_active());
        assert!(!guard.cancel());
    }

    #[rstest]
    fn handler_may_cancel_a_later_handler_during_emit() {
        let listeners = IntentListeners::<u32>::new();
        let later: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let later_calls = Rc::new(Cell::new(0));

        let victim = Rc::clone(&later);
        let _canceller = listeners.subscribe(move |_| {
            if let Some(guard) = victim.borrow_mut().take() {
                guard.cancel();
            }
        });
        let counter = Rc::clone(&later_calls);
        *later.borrow_mut() = Some(listeners.subscribe(move |_| counter.set(counter.get() + 1)));

        assert_eq!(listeners.emit(&1), 1);
        assert_eq!(later_calls.get(), 0);
        assert_eq!(listeners.len(), 1);
    }
}
