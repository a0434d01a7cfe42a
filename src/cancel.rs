//! A synchronous, thread-based cancellation primitive for blocking
//! generator operations, modeled after `tokio_util::sync::CancellationToken`
//! but built on [`std::sync::Condvar`] rather than an async waker.

use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

#[derive(Debug, Default)]
struct Inner {
    canceled: Mutex<bool>,
    condvar: Condvar,
}

/// A cloneable, shareable handle used to request early return from a
/// blocking call such as [`crate::Generator::try_emit`] or
/// [`crate::Generator::try_emit_batch`].
///
/// Canceling is one-way and idempotent: once [`CancelToken::cancel`] has
/// been called, [`CancelToken::is_canceled`] returns `true` for every clone
/// of the token, forever.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

impl CancelToken {
    /// Creates a fresh, uncanceled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation and wakes every thread currently parked in
    /// [`CancelToken::wait_timeout`].
    pub fn cancel(&self) {
        let mut canceled = self.inner.canceled.lock().unwrap_or_else(|e| e.into_inner());
        *canceled = true;
        self.inner.condvar.notify_all();
    }

    /// Returns whether [`CancelToken::cancel`] has been called on this token
    /// or any of its clones.
    pub fn is_canceled(&self) -> bool {
        *self.inner.canceled.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Blocks the current thread for up to `timeout`, waking early if
    /// canceled. Returns `true` if the wait ended because of cancellation,
    /// `false` if it timed out without being canceled.
    pub(crate) fn wait_timeout(&self, timeout: Duration) -> bool {
        let canceled = self.inner.canceled.lock().unwrap_or_else(|e| e.into_inner());
        if *canceled {
            return true;
        }
        let (canceled, _) = self
            .inner
            .condvar
            .wait_timeout(canceled, timeout)
            .unwrap_or_else(|e| e.into_inner());
        *canceled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn uncanceled_token_times_out() {
        let token = CancelToken::new();
        let start = Instant::now();
        let woke_for_cancel = token.wait_timeout(Duration::from_millis(20));
        assert!(!woke_for_cancel);
        assert!(start.elapsed() >= Duration::from_millis(15));
    }

    #[test]
    fn cancel_wakes_waiter_immediately() {
        let token = CancelToken::new();
        let waiter = token.clone();
        let handle = thread::spawn(move || waiter.wait_timeout(Duration::from_secs(10)));
        thread::sleep(Duration::from_millis(10));
        token.cancel();
        assert!(handle.join().unwrap());
    }

    #[test]
    fn cancel_is_idempotent_and_sticky() {
        let token = CancelToken::new();
        token.cancel();
        token.cancel();
        assert!(token.is_canceled());
        assert!(token.wait_timeout(Duration::from_millis(1)));
    }

    #[test]
    fn clones_observe_cancellation() {
        let token = CancelToken::new();
        let clone = token.clone();
        token.cancel();
        assert!(clone.is_canceled());
    }
}
