//! Externally ticked delayed events.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Debug, Clone)]
struct Deferred<K, E> {
    target: K,
    event: E,
    remaining: Duration,
}

/// Queue of events to deliver to a target after a delay.
///
/// Nothing here owns a timer: time only passes when the owner calls
/// [`advance`](Self::advance). Handles are cheap clones of the same queue,
/// so a transition action can schedule work for another machine.
#[derive(Debug)]
pub struct DeferredQueue<K, E> {
    entries: Arc<Mutex<Vec<Deferred<K, E>>>>,
}

impl<K, E> Clone for DeferredQueue<K, E> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<K, E> Default for DeferredQueue<K, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, E> DeferredQueue<K, E> {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn entries(&self) -> MutexGuard<'_, Vec<Deferred<K, E>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Deliver `event` to `target` once `delay` has passed.
    pub fn schedule(&self, target: K, event: E, delay: Duration) {
        self.entries().push(Deferred {
            target,
            event,
            remaining: delay,
        });
    }

    /// Let `delta` pass and take every entry that is now due, in the order
    /// the entries were scheduled.
    pub fn advance(&self, delta: Duration) -> Vec<(K, E)> {
        let mut entries = self.entries();
        let mut due = Vec::new();
        let mut pending = Vec::with_capacity(entries.len());
        for mut entry in entries.drain(..) {
            entry.remaining = entry.remaining.saturating_sub(delta);
            if entry.remaining.is_zero() {
                due.push((entry.target, entry.event));
            } else {
                pending.push(entry);
            }
        }
        *entries = pending;
        due
    }

    pub fn pending(&self) -> usize {
        self.entries().len()
    }

    /// Drop everything scheduled.
    pub fn clear(&self) {
        self.entries().clear();
    }
}
