//! Change notification for the view models.
//!
//! Components subscribe while mounted and drop the returned
//! [`Subscription`] on unmount.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Callback = Rc<dyn Fn()>;

/// A model whose changes can be watched
pub trait Observable {
    fn subscribe(&self, callback: impl Fn() + 'static) -> Subscription;
}

type Slots = RefCell<Vec<(usize, Callback)>>;

#[derive(Clone, Default)]
pub struct Listeners {
    slots: Rc<Slots>,
    next_id: Rc<Cell<usize>>,
}

impl Listeners {
    pub fn subscribe(&self, callback: impl Fn() + 'static) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.slots.borrow_mut().push((id, Rc::new(callback)));
        Subscription {
            id,
            slots: Rc::downgrade(&self.slots),
        }
    }

    /// Call every subscriber. Callbacks may subscribe or unsubscribe.
    pub fn notify(&self) {
        let callbacks: Vec<Callback> = self.slots.borrow().iter().map(|(_, cb)| cb.clone()).collect();
        for callback in callbacks {
            callback();
        }
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Unsubscribes on drop
pub struct Subscription {
    id: usize,
    slots: Weak<Slots>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(slots) = self.slots.upgrade() {
            slots.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}
