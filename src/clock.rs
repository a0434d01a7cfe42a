//! Time sources for [`crate::Generator`].
//!
//! [`MonotonicClock`] captures a monotonic [`Instant`] and its corresponding
//! wall-clock reading once, at construction. Every subsequent read is
//! `wall_clock_at_reference + monotonic_elapsed_since_reference` — the
//! process never calls [`SystemTime::now`] again after startup, so an NTP
//! step applied to the wall clock cannot retroactively regress what the
//! generator has already observed.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// A source of "now", expressed in milliseconds since the Unix epoch.
///
/// Implementors need not be monotonic themselves; [`crate::Generator`]
/// layers its own clock-regression tolerance on top of whatever a `Clock`
/// reports. [`ManualClock`] exists for deterministic tests that need to
/// control time directly.
pub trait Clock: Send + Sync {
    /// Returns the current time, in milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

/// The production clock: [`Instant`]-based elapsed time added to a
/// wall-clock reading captured once at construction.
#[derive(Debug)]
pub struct MonotonicClock {
    reference_instant: Instant,
    reference_wall_ms: i64,
}

impl MonotonicClock {
    /// Captures the current monotonic instant and wall-clock reading as the
    /// reference point for all future reads.
    pub fn new() -> Self {
        Self {
            reference_instant: Instant::now(),
            reference_wall_ms: wall_clock_now_ms(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_millis(&self) -> i64 {
        let elapsed = self.reference_instant.elapsed();
        self.reference_wall_ms + elapsed.as_millis() as i64
    }
}

fn wall_clock_now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is before the Unix epoch")
        .as_millis() as i64
}

/// A test clock whose reading is set explicitly via [`ManualClock::set`] or
/// advanced via [`ManualClock::advance`]. Never regresses on its own; tests
/// that need to exercise clock-regression handling call `set` with an
/// earlier value directly.
///
/// Cloning a `ManualClock` yields another handle to the same shared
/// counter — a clone passed to [`crate::Generator::with_clock`] and a
/// clone kept by the test driving it observe and mutate the same time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    millis: Arc<AtomicI64>,
}

impl ManualClock {
    /// Creates a clock starting at `millis`.
    pub fn new(millis: i64) -> Self {
        Self {
            millis: Arc::new(AtomicI64::new(millis)),
        }
    }

    /// Sets the clock to an arbitrary value, which may be earlier than the
    /// previous reading.
    pub fn set(&self, millis: i64) {
        self.millis.store(millis, Ordering::SeqCst);
    }

    /// Advances the clock by `delta_ms` and returns the new reading.
    pub fn advance(&self, delta_ms: i64) -> i64 {
        self.millis.fetch_add(delta_ms, Ordering::SeqCst) + delta_ms
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }
}
