//! Pending-count barrier for dispatcher tasks
//!
//! Every dispatched task holds a `PendingGuard`. Dropping the guard (normal
//! return, early return, or unwinding panic) decrements the count, and
//! `PendingTracker::wait` resolves once the count is zero.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

struct Inner {
    count: AtomicUsize,
    zero: Notify,
}

/// Counts in-flight tasks and lets one party wait for all of them
#[derive(Clone)]
pub struct PendingTracker {
    inner: Arc<Inner>,
}

impl PendingTracker {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                count: AtomicUsize::new(0),
                zero: Notify::new(),
            }),
        }
    }

    /// Registers one more pending task
    ///
    /// The count is incremented before the guard is returned, so a task
    /// registered before `wait` is called can never be missed.
    pub fn add(&self) -> PendingGuard {
        self.inner.count.fetch_add(1, Ordering::AcqRel);
        PendingGuard {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Number of guards still alive
    pub fn pending(&self) -> usize {
        self.inner.count.load(Ordering::Acquire)
    }

    /// Waits until every guard has been dropped
    pub async fn wait(&self) {
        loop {
            // Register interest before checking, so a notification sent
            // between the check and the await is not lost
            let notified = self.inner.zero.notified();
            if self.pending() == 0 {
                return;
            }
            notified.await;
        }
    }
}

impl Default for PendingTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Held by a pending task; releases its slot when dropped
#[must_use = "the task is counted as finished as soon as the guard is dropped"]
pub struct PendingGuard {
    inner: Arc<Inner>,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        if self.inner.count.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.inner.zero.notify_waiters();
        }
    }
}
