// ============================================================================
// REACTIVITY - Estado observable + señales con suscripciones cancelables
// ============================================================================

use std::cell::{Cell, Ref, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

type Listener<E> = Rc<dyn Fn(&E)>;

struct ListenerList<E> {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(u64, Listener<E>)>>,
}

impl<E> ListenerList<E> {
    fn new() -> Self {
        Self {
            next_id: Cell::new(0),
            entries: RefCell::new(Vec::new()),
        }
    }

    fn add(&self, listener: Listener<E>) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.entries.borrow_mut().push((id, listener));
        id
    }

    fn remove(&self, id: u64) {
        self.entries.borrow_mut().retain(|(entry_id, _)| *entry_id != id);
    }

    fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Listeners may subscribe or unsubscribe while being notified.
    fn notify(&self, event: &E) {
        let snapshot: Vec<Listener<E>> = self
            .entries
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in snapshot {
            listener(event);
        }
    }
}

/// Handle returned by every `subscribe`; dropping it unsubscribes.
#[must_use = "dropping a Subscription cancels it immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Subscription that owns nothing (e.g. a precondition was not met).
    pub fn noop() -> Self {
        Self { cancel: None }
    }

    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

fn subscription_for<E: 'static>(list: &Rc<ListenerList<E>>, id: u64) -> Subscription {
    let weak: Weak<ListenerList<E>> = Rc::downgrade(list);
    Subscription::new(move || {
        if let Some(list) = weak.upgrade() {
            list.remove(id);
        }
    })
}

/// Fire-and-forget event channel (no stored value).
pub struct Signal<E> {
    listeners: Rc<ListenerList<E>>,
}

impl<E: 'static> Signal<E> {
    pub fn new() -> Self {
        Self {
            listeners: Rc::new(ListenerList::new()),
        }
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&E) + 'static,
    {
        let id = self.listeners.add(Rc::new(callback));
        subscription_for(&self.listeners, id)
    }

    pub fn emit(&self, event: &E) {
        self.listeners.notify(event);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<E: 'static> Default for Signal<E> {
    fn default() -> Self {
        Self::new()
    }
}

type Updater<T> = Box<dyn FnOnce(&mut T)>;

/// Estado reactivo con sistema de notificaciones
pub struct ReactiveState<T> {
    value: RefCell<T>,
    changes: Signal<T>,
    /// Writes issued by subscribers while a notification is running.
    deferred: RefCell<VecDeque<Updater<T>>>,
}

impl<T: 'static> ReactiveState<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: RefCell::new(value),
            changes: Signal::new(),
            deferred: RefCell::new(VecDeque::new()),
        }
    }

    pub fn get(&self) -> Ref<'_, T> {
        self.value.borrow()
    }

    /// Establecer nuevo valor y notificar subscribers
    pub fn set(&self, new_value: T) {
        self.update(move |value| *value = new_value);
    }

    /// Actualizar valor usando closure y notificar.
    ///
    /// Called from a subscriber (or while a `get()` borrow is alive) the write is
    /// queued and applied once the running notification has finished.
    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut T) + 'static,
    {
        match self.value.try_borrow_mut() {
            Ok(mut value) => updater(&mut *value),
            Err(_) => {
                self.deferred.borrow_mut().push_back(Box::new(updater));
                return;
            }
        }
        self.notify();
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + 'static,
    {
        self.changes.subscribe(callback)
    }

    fn notify(&self) {
        self.emit_current();
        loop {
            let next = self.deferred.borrow_mut().pop_front();
            let Some(updater) = next else {
                break;
            };
            updater(&mut *self.value.borrow_mut());
            self.emit_current();
        }
    }

    fn emit_current(&self) {
        let value = self.value.borrow();
        self.changes.emit(&value);
    }
}

impl<T: Clone + 'static> ReactiveState<T> {
    pub fn snapshot(&self) -> T {
        self.value.borrow().clone()
    }
}
