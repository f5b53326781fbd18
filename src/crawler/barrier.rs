//! Completion barrier shared by every traversal task of a crawl
//!
//! A task registers before it does any work and deregisters when its
//! `Registration` is dropped. `wait` returns once the count reaches zero,
//! including registrations made after the wait began.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Counts outstanding traversal tasks across the whole crawl
#[derive(Debug, Default)]
pub struct CompletionBarrier {
    outstanding: AtomicUsize,
    completion_notify: Notify,
}

impl CompletionBarrier {
    /// Creates a barrier with no outstanding tasks
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one outstanding task
    ///
    /// The returned guard deregisters the task when dropped, including when
    /// the task panics and its future is dropped during unwinding.
    pub fn register(self: &Arc<Self>) -> Registration {
        // SeqCst keeps the increment ordered before any completion check
        self.outstanding.fetch_add(1, Ordering::SeqCst);
        Registration {
            barrier: Arc::clone(self),
        }
    }

    /// Number of tasks registered and not yet finished
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::SeqCst)
    }

    /// Waits until every registered task has finished
    pub async fn wait(&self) {
        loop {
            // Created before the check so a notify_waiters between the
            // check and the await is not lost
            let notified = self.completion_notify.notified();
            if self.outstanding() == 0 {
                return;
            }
            notified.await;
        }
    }

    fn deregister(&self) {
        let remaining = self.outstanding.fetch_sub(1, Ordering::SeqCst);
        if remaining == 1 {
            self.completion_notify.notify_waiters();
        }
    }
}

/// Guard for one registered task; dropping it deregisters the task
#[derive(Debug)]
pub struct Registration {
    barrier: Arc<CompletionBarrier>,
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.barrier.deregister();
    }
}
