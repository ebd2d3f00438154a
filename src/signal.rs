//! Edge signals — one-shot wake conditions derived from interrupts.
//!
//! Each [`EdgeSignal`] is a single-producer single-consumer binary flag:
//! raising an already-raised signal coalesces (no backlog accumulates), and
//! the one authorized consumer observes each raise at most once.
//!
//! The ISR-facing half is a bare atomic store — no allocation, no logging,
//! no locks. Thread-context producers additionally notify a condvar so a
//! blocked waiter wakes immediately; a raise from interrupt context is
//! picked up within one poll granule of the waiter's timed re-check.

use core::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex};
use std::time::{Duration, Instant};

/// How often a blocked waiter re-checks the flag. Bounds the wake latency
/// for raises that cannot notify the condvar (interrupt context).
const WAIT_POLL: Duration = Duration::from_millis(20);

/// Binary edge-triggered signal with semaphore take/wait semantics.
pub struct EdgeSignal {
    raised: AtomicBool,
    lock: Mutex<()>,
    cond: Condvar,
}

/// Wakes the button consumer. Raised by the push-button falling-edge ISR.
pub static BUTTON_EDGE: EdgeSignal = EdgeSignal::new();

/// Wakes the proximity consumer. Raised by the detector's any-edge ISR.
pub static PROXIMITY_EDGE: EdgeSignal = EdgeSignal::new();

impl EdgeSignal {
    pub const fn new() -> Self {
        Self {
            raised: AtomicBool::new(false),
            lock: Mutex::new(()),
            cond: Condvar::new(),
        }
    }

    /// Raise the signal from interrupt context. Lock-free: a single atomic
    /// store and nothing else. Must not log or allocate.
    #[inline]
    pub fn raise_from_isr(&self) {
        self.raised.store(true, Ordering::Release);
    }

    /// Raise the signal from thread context (timer task, tests). Also
    /// notifies a blocked waiter so it wakes without the poll delay.
    pub fn raise(&self) {
        self.raised.store(true, Ordering::Release);
        let _guard = match self.lock.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        self.cond.notify_one();
    }

    /// Consume the signal if raised. Non-blocking; used by the button
    /// consumer's periodic poll.
    pub fn try_take(&self) -> bool {
        self.raised.swap(false, Ordering::Acquire)
    }

    /// Block until the signal is raised, then consume it.
    pub fn wait(&self) {
        loop {
            if self.try_take() {
                return;
            }
            let guard = match self.lock.lock() {
                Ok(g) => g,
                Err(poisoned) => poisoned.into_inner(),
            };
            // Re-check under the lock: a raise() between try_take and
            // lock() would otherwise be missed until the next poll.
            if self.try_take() {
                return;
            }
            let _unused = self
                .cond
                .wait_timeout(guard, WAIT_POLL)
                .map(|(g, _)| g)
                .map_err(std::sync::PoisonError::into_inner);
        }
    }

    /// Block up to `timeout` for a raise. Returns `true` if the signal was
    /// consumed, `false` on timeout.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            if self.try_take() {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            let guard = match self.lock.lock() {
                Ok(g) => g,
                Err(poisoned) => poisoned.into_inner(),
            };
            if self.try_take() {
                return true;
            }
            let slice = (deadline - now).min(WAIT_POLL);
            let _unused = self
                .cond
                .wait_timeout(guard, slice)
                .map(|(g, _)| g)
                .map_err(std::sync::PoisonError::into_inner);
        }
    }
}

impl Default for EdgeSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn take_consumes_exactly_once() {
        let s = EdgeSignal::new();
        assert!(!s.try_take());
        s.raise();
        assert!(s.try_take());
        assert!(!s.try_take());
    }

    #[test]
    fn repeated_raises_coalesce() {
        let s = EdgeSignal::new();
        s.raise();
        s.raise();
        s.raise_from_isr();
        assert!(s.try_take(), "burst collapses to a single pending raise");
        assert!(!s.try_take());
    }

    #[test]
    fn wait_timeout_expires_when_not_raised() {
        let s = EdgeSignal::new();
        assert!(!s.wait_timeout(Duration::from_millis(30)));
    }

    #[test]
    fn wait_observes_cross_thread_raise() {
        let s = Arc::new(EdgeSignal::new());
        let producer = Arc::clone(&s);
        let h = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            producer.raise();
        });
        s.wait();
        h.join().unwrap();
        assert!(!s.try_take(), "wait() already consumed the raise");
    }

    #[test]
    fn isr_raise_is_observed_within_poll_granule() {
        let s = Arc::new(EdgeSignal::new());
        let producer = Arc::clone(&s);
        let h = thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            producer.raise_from_isr();
        });
        assert!(s.wait_timeout(Duration::from_millis(500)));
        h.join().unwrap();
    }
}
