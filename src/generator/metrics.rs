//! Atomic metric counters, updated outside the generator's critical
//! section so a reader never blocks on the emission lock.

use core::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Independently atomic counters tracked by a [`crate::Generator`].
///
/// Reads are each a single atomic load; a snapshot formed from several
/// reads is not a transactional view across counters, only a consistent
/// view of each counter individually.
#[derive(Debug, Default)]
pub struct Metrics {
    generated: AtomicU64,
    clock_backward: AtomicU64,
    clock_backward_err: AtomicU64,
    sequence_overflow: AtomicU64,
    wait_time_microseconds: AtomicU64,
}

impl Metrics {
    pub(crate) fn record_generated(&self, count: u64) {
        self.generated.fetch_add(count, Ordering::Relaxed);
    }

    pub(crate) fn record_clock_backward(&self) {
        self.clock_backward.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_clock_backward_err(&self) {
        self.clock_backward_err.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_sequence_overflow(&self) {
        self.sequence_overflow.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_wait_micros(&self, micros: u64) {
        self.wait_time_microseconds.fetch_add(micros, Ordering::Relaxed);
    }

    /// The total number of identifiers successfully emitted.
    pub fn generated(&self) -> u64 {
        self.generated.load(Ordering::Relaxed)
    }

    /// The number of times the reconciled clock was observed behind
    /// `last_time_unit`, whether or not it was within tolerance.
    pub fn clock_backward(&self) -> u64 {
        self.clock_backward.load(Ordering::Relaxed)
    }

    /// The number of times clock regression exceeded tolerance and was not
    /// self-healed.
    pub fn clock_backward_err(&self) -> u64 {
        self.clock_backward_err.load(Ordering::Relaxed)
    }

    /// The number of times the sequence field wrapped within a single time
    /// unit and emission had to wait for the next one.
    pub fn sequence_overflow(&self) -> u64 {
        self.sequence_overflow.load(Ordering::Relaxed)
    }

    /// Cumulative microseconds spent sleeping or yielding across every
    /// drift-recovery and sequence-overflow wait.
    pub fn wait_time_microseconds(&self) -> u64 {
        self.wait_time_microseconds.load(Ordering::Relaxed)
    }

    /// Takes a read-only copy of every counter.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            generated: self.generated(),
            clock_backward: self.clock_backward(),
            clock_backward_err: self.clock_backward_err(),
            sequence_overflow: self.sequence_overflow(),
            wait_time_microseconds: self.wait_time_microseconds(),
        }
    }
}

/// A point-in-time copy of a [`Metrics`] instance's counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub generated: u64,
    pub clock_backward: u64,
    pub clock_backward_err: u64,
    pub sequence_overflow: u64,
    pub wait_time_microseconds: u64,
}

impl fmt::Display for MetricsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "generated={} clock_backward={} clock_backward_err={} sequence_overflow={} wait_time_us={}",
            self.generated, self.clock_backward, self.clock_backward_err, self.sequence_overflow, self.wait_time_microseconds
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero() {
        let metrics = Metrics::default();
        assert_eq!(metrics.snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn counters_accumulate() {
        let metrics = Metrics::default();
        metrics.record_generated(3);
        metrics.record_clock_backward();
        metrics.record_clock_backward_err();
        metrics.record_sequence_overflow();
        metrics.record_wait_micros(150);
        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.generated, 3);
        assert_eq!(snapshot.clock_backward, 1);
        assert_eq!(snapshot.clock_backward_err, 1);
        assert_eq!(snapshot.sequence_overflow, 1);
        assert_eq!(snapshot.wait_time_microseconds, 150);
    }

    #[test]
    fn display_is_human_readable() {
        let snapshot = MetricsSnapshot {
            generated: 1,
            ..Default::default()
        };
        assert_eq!(
            snapshot.to_string(),
            "generated=1 clock_backward=0 clock_backward_err=0 sequence_overflow=0 wait_time_us=0"
        );
    }
}
