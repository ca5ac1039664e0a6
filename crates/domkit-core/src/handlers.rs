//! Typed observer lists.
//!
//! A [`HandlerCollection`] keeps handlers in registration order. Handler
//! identity is the `Rc` allocation: registering the same `Rc` twice is a
//! no-op and removal drops every matching entry. Notification iterates a
//! snapshot, so handlers may add or remove handlers while being called.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A shared callback receiving a value of type `T`.
pub type Handler<T> = Rc<dyn Fn(T)>;

/// Wrap a closure as a [`Handler`].
pub fn handler<T, F>(f: F) -> Handler<T>
where
    F: Fn(T) + 'static,
{
    Rc::new(f)
}

/// An ordered set of handlers that can all be called with one value.
pub struct HandlerCollection<T> {
    handlers: RefCell<Vec<Handler<T>>>,
}

impl<T> Default for HandlerCollection<T> {
    fn default() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
        }
    }
}

impl<T> fmt::Debug for HandlerCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerCollection")
            .field("len", &self.len())
            .finish()
    }
}

impl<T: Clone> HandlerCollection<T> {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. Registering an already present handler does nothing.
    pub fn add(&self, handler: Handler<T>) {
        let mut handlers = self.handlers.borrow_mut();
        if handlers.iter().any(|h| Rc::ptr_eq(h, &handler)) {
            return;
        }
        handlers.push(handler);
    }

    /// Remove every registration of `handler`.
    pub fn remove(&self, handler: &Handler<T>) {
        self.handlers
            .borrow_mut()
            .retain(|h| !Rc::ptr_eq(h, handler));
    }

    /// Call every handler with `value`, in registration order.
    pub fn notify(&self, value: T) {
        let snapshot: Vec<Handler<T>> = self.handlers.borrow().clone();
        for h in snapshot {
            h(value.clone());
        }
    }

    /// Whether `handler` is registered.
    pub fn contains(&self, handler: &Handler<T>) -> bool {
        self.handlers.borrow().iter().any(|h| Rc::ptr_eq(h, handler))
    }

    /// Drop all handlers.
    pub fn clear(&self) {
        self.handlers.borrow_mut().clear();
    }
}

impl<T> HandlerCollection<T> {
    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Whether no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.borrow().is_empty()
    }
}
