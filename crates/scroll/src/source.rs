//! Push-based progress source with scoped subscriptions.
//!
//! A `ProgressSource` remembers the latest progress and notifies listeners
//! synchronously on every publish. Each listener is owned by the
//! [`Subscription`] returned from [`ProgressSource::subscribe`]; dropping the
//! subscription removes the listener, so teardown cannot be forgotten.
//!
//! Everything here is single-threaded (`Rc`/`RefCell`). Cloning a source
//! yields another handle to the same listeners.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use pf_common::Progress;

use crate::range::ScrollRange;

type Listener = Rc<RefCell<dyn FnMut(Progress)>>;

#[derive(Default)]
struct Shared {
    current: Progress,
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Latest progress value plus the listeners interested in it.
#[derive(Clone, Default)]
pub struct ProgressSource {
    shared: Rc<RefCell<Shared>>,
}

impl ProgressSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last published progress (0 before the first publish).
    pub fn current(&self) -> Progress {
        self.shared.borrow().current
    }

    pub fn listener_count(&self) -> usize {
        self.shared.borrow().listeners.len()
    }

    /// Register `listener`. It runs on every subsequent publish until the
    /// returned subscription is dropped.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(Progress) + 'static,
    {
        let listener: Listener = Rc::new(RefCell::new(listener));
        let mut shared = self.shared.borrow_mut();
        let id = shared.next_id;
        shared.next_id += 1;
        shared.listeners.push((id, listener));
        tracing::debug!(id, listeners = shared.listeners.len(), "Progress listener subscribed");

        Subscription {
            shared: Rc::downgrade(&self.shared),
            id: Some(id),
        }
    }

    /// Store `value` (clamped to `[0, 1]`) and notify every listener in subscription order.
    ///
    /// Listeners may subscribe or unsubscribe while being notified. A listener
    /// removed mid-publish is not called; one added mid-publish waits for the
    /// next publish. A listener that publishes to its own source is not
    /// re-entered.
    pub fn publish(&self, value: f32) {
        let progress = Progress::new(value);
        let listeners: Vec<(u64, Listener)> = {
            let mut shared = self.shared.borrow_mut();
            shared.current = progress;
            shared.listeners.clone()
        };

        for (id, listener) in listeners {
            if !self.is_subscribed(id) {
                continue;
            }
            match listener.try_borrow_mut() {
                Ok(mut f) => (&mut *f)(progress),
                Err(_) => tracing::warn!(id, %progress, "Skipped re-entrant progress listener"),
            }
        }
    }

    /// Publish the progress `range` assigns to `scroll_y`.
    pub fn publish_scroll(&self, range: &ScrollRange, scroll_y: f32) {
        self.publish(range.progress(scroll_y).as_f32());
    }

    fn is_subscribed(&self, id: u64) -> bool {
        self.shared
            .borrow()
            .listeners
            .iter()
            .any(|(listener_id, _)| *listener_id == id)
    }
}

impl std::fmt::Debug for ProgressSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressSource")
            .field("current", &self.current())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Handle keeping one listener registered. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes its listener immediately"]
#[derive(Debug)]
pub struct Subscription {
    shared: Weak<RefCell<Shared>>,
    id: Option<u64>,
}

impl Subscription {
    /// Whether the listener is still registered with a live source.
    pub fn is_active(&self) -> bool {
        match (self.id, self.shared.upgrade()) {
            (Some(id), Some(shared)) => shared.borrow().listeners.iter().any(|(l, _)| *l == id),
            _ => false,
        }
    }

    /// Remove the listener now rather than at end of scope.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };
        let Some(shared) = self.shared.upgrade() else {
            return;
        };
        // Drop the removed closure only after the borrow ends; its captures
        // may hold handles to this same source.
        let removed: Vec<(u64, Listener)> = {
            let mut shared = shared.borrow_mut();
            let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut shared.listeners)
                .into_iter()
                .partition(|(listener_id, _)| *listener_id == id);
            shared.listeners = kept;
            removed
        };
        if !removed.is_empty() {
            tracing::debug!(id, "Progress listener unsubscribed");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}
