//! Typed notification queues.
//!
//! Components never touch shared state. They post notifications into an
//! [`Outbox`] and the demo session drains it. Cloning an outbox yields
//! another sender for the same queue, which is how element event listeners
//! reach the session.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

struct Queue<T> {
    pending: RefCell<VecDeque<T>>,
    posted: Cell<usize>,
}

/// Single-threaded FIFO of outgoing notifications.
pub struct Outbox<T> {
    queue: Rc<Queue<T>>,
}

impl<T> Outbox<T> {
    pub fn new() -> Self {
        Self {
            queue: Rc::new(Queue {
                pending: RefCell::new(VecDeque::new()),
                posted: Cell::new(0),
            }),
        }
    }

    /// Enqueue a notification.
    #[inline]
    pub fn post(&self, notification: T) {
        self.queue.pending.borrow_mut().push_back(notification);
        self.queue.posted.set(self.queue.posted.get() + 1);
    }

    /// Take every pending notification in posting order.
    pub fn drain(&self) -> Vec<T> {
        self.queue.pending.borrow_mut().drain(..).collect()
    }

    /// Number of notifications waiting.
    #[inline]
    pub fn len(&self) -> usize {
        self.queue.pending.borrow().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.pending.borrow().is_empty()
    }

    /// Total notifications ever posted to this queue.
    #[inline]
    pub fn posted(&self) -> usize {
        self.queue.posted.get()
    }
}

impl<T> Clone for Outbox<T> {
    fn clone(&self) -> Self {
        Self {
            queue: Rc::clone(&self.queue),
        }
    }
}

impl<T> Default for Outbox<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Outbox<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Outbox")
            .field("pending", &self.len())
            .field("posted", &self.posted())
            .finish()
    }
}
