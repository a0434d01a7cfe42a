use core::time::Duration;
use std::thread;
use std::time::Instant;

use crate::cancel::CancelToken;
use crate::clock::{Clock, MonotonicClock};
use crate::error::Error;
use crate::generator::config::Config;
use crate::generator::metrics::Metrics;
use crate::generator::mutex::{self, Mutex, MutexGuard};
use crate::id::Identifier;
use crate::layout::{BitLayout, LayoutShifts};

/// The mutable fields a [`Generator`] serializes access to: the last
/// time unit an identifier was composed for, and the sequence counter
/// within it.
struct CriticalState {
    last_time_unit: i64,
    sequence: i64,
}

/// Emits a strictly monotonically increasing stream of 64-bit
/// [`Identifier`]s, safe to share across threads behind an `Arc`.
///
/// Parameterized over a [`Clock`] so tests can inject a
/// [`crate::clock::ManualClock`]; production code should use
/// [`Generator::new`], which wires up a [`MonotonicClock`].
pub struct Generator<C: Clock = MonotonicClock> {
    layout: BitLayout,
    shifts: LayoutShifts,
    time_unit_shift: Option<u32>,
    time_unit_ms: i64,
    worker_id: i64,
    epoch_ms: i64,
    custom_epoch_in_time_units: i64,
    max_clock_backward_units: i64,
    enable_metrics: bool,
    clock: C,
    state: Mutex<CriticalState>,
    metrics: Metrics,
}

impl Generator<MonotonicClock> {
    /// Builds a generator backed by the production [`MonotonicClock`].
    pub fn new(config: Config) -> Result<Self, Error> {
        Self::with_clock(config, MonotonicClock::new())
    }
}

impl<C: Clock> Generator<C> {
    /// Builds a generator backed by an arbitrary [`Clock`] implementation.
    ///
    /// Validates the (defaulted) layout and the worker id against it,
    /// rejects a negative epoch, and pre-computes every shift, mask, and
    /// time-unit constant the emission path needs.
    pub fn with_clock(config: Config, clock: C) -> Result<Self, Error> {
        let layout = config.layout.or_default();
        layout.validate()?;
        layout.validate_worker_id(config.worker_id)?;
        if config.epoch_ms < 0 {
            return Err(Error::Configuration {
                field: "epoch_ms",
                value: config.epoch_ms.to_string(),
                reason: "epoch must be non-negative".into(),
                constraint: ">= 0".into(),
            });
        }

        let shifts = layout.shifts();
        let time_unit_ms = layout.time_unit_ms();
        let time_unit_shift = layout.time_unit_shift();
        let custom_epoch_in_time_units = config.epoch_ms / time_unit_ms;
        let max_clock_backward_ms = config.max_clock_backward.as_millis() as i64;
        let max_clock_backward_units = max_clock_backward_ms / time_unit_ms;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            worker_id = config.worker_id,
            timestamp_bits = layout.timestamp_bits,
            worker_bits = layout.worker_bits,
            sequence_bits = layout.sequence_bits,
            time_unit_ms,
            epoch_ms = config.epoch_ms,
            "generator constructed"
        );

        Ok(Self {
            layout,
            shifts,
            time_unit_shift,
            time_unit_ms,
            worker_id: config.worker_id,
            epoch_ms: config.epoch_ms,
            custom_epoch_in_time_units,
            max_clock_backward_units,
            enable_metrics: config.enable_metrics,
            clock,
            state: Mutex::new(CriticalState {
                // Sentinel below any real `now_units()` reading so the very
                // first emission always takes the fresh-time-unit path
                // (state.rs's `else` branch) instead of being mistaken for
                // a same-time-unit sequence wrap.
                last_time_unit: i64::MIN,
                sequence: -1,
            }),
            metrics: Metrics::default(),
        })
    }

    /// The layout this generator was configured with (after defaulting).
    pub fn layout(&self) -> &BitLayout {
        &self.layout
    }

    /// The worker identity embedded in every emitted word.
    pub fn worker_id(&self) -> i64 {
        self.worker_id
    }

    /// The epoch, in milliseconds, the timestamp field is measured from.
    pub fn epoch_ms(&self) -> i64 {
        self.epoch_ms
    }

    /// This generator's atomic metric counters.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Emits one identifier, blocking on drift recovery or sequence
    /// overflow as needed, uncancelable.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), level = "trace"))]
    pub fn emit(&self) -> Result<Identifier, Error> {
        self.emit_inner(None)
    }

    /// Emits one identifier, aborting promptly with [`Error::Canceled`] if
    /// `cancel` fires during a wait.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, cancel), level = "trace"))]
    pub fn try_emit(&self, cancel: &CancelToken) -> Result<Identifier, Error> {
        self.emit_inner(Some(cancel))
    }

    /// Emits `n` identifiers under a single lock acquisition (re-acquired
    /// only around drift/overflow waits). On error after at least one
    /// success, returns the partial result alongside the error.
    pub fn emit_batch(&self, n: usize) -> (Vec<Identifier>, Option<Error>) {
        self.emit_batch_inner(n, None)
    }

    /// Cancelable variant of [`Generator::emit_batch`]. Polls `cancel`
    /// every 100 iterations in addition to checking it at every wait.
    pub fn try_emit_batch(&self, n: usize, cancel: &CancelToken) -> (Vec<Identifier>, Option<Error>) {
        self.emit_batch_inner(n, Some(cancel))
    }

    fn emit_inner(&self, cancel: Option<&CancelToken>) -> Result<Identifier, Error> {
        if is_canceled(cancel) {
            return Err(Error::Canceled);
        }
        let guard = mutex::lock(&self.state);
        let (guard, result) = self.emit_locked(guard, cancel);
        drop(guard);
        let word = result?;
        if self.enable_metrics {
            self.metrics.record_generated(1);
        }
        Ok(Identifier::from_i64(word))
    }

    fn emit_batch_inner(&self, n: usize, cancel: Option<&CancelToken>) -> (Vec<Identifier>, Option<Error>) {
        if is_canceled(cancel) {
            return (Vec::new(), Some(Error::Canceled));
        }
        let mut results = Vec::with_capacity(n);
        let mut guard = mutex::lock(&self.state);
        for i in 0..n {
            if i != 0 && i % 100 == 0 && is_canceled(cancel) {
                drop(guard);
                if self.enable_metrics {
                    self.metrics.record_generated(results.len() as u64);
                }
                return (results, Some(Error::Canceled));
            }
            let (next_guard, result) = self.emit_locked(guard, cancel);
            guard = next_guard;
            match result {
                Ok(word) => results.push(Identifier::from_i64(word)),
                Err(err) => {
                    drop(guard);
                    if self.enable_metrics {
                        self.metrics.record_generated(results.len() as u64);
                    }
                    return (results, Some(err));
                }
            }
        }
        drop(guard);
        if self.enable_metrics {
            self.metrics.record_generated(results.len() as u64);
        }
        (results, None)
    }

    /// Steps 1-7 of the emission algorithm under the held lock, returning
    /// the composed word without touching the `generated` metric — callers
    /// own that counter so batch emission can bump it once for the whole
    /// run.
    fn emit_locked<'a>(
        &'a self,
        mut guard: MutexGuard<'a, CriticalState>,
        cancel: Option<&CancelToken>,
    ) -> (MutexGuard<'a, CriticalState>, Result<i64, Error>) {
        loop {
            if is_canceled(cancel) {
                return (guard, Err(Error::Canceled));
            }

            let now_units = self.now_units();

            if now_units < guard.last_time_unit {
                if self.enable_metrics {
                    self.metrics.record_clock_backward();
                }
                let last_time_unit = guard.last_time_unit;
                let drift_units = last_time_unit - now_units;

                if drift_units <= self.max_clock_backward_units {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        worker_id = self.worker_id,
                        drift_ms = drift_units * self.time_unit_ms,
                        "clock regressed within tolerance, waiting for it to recover"
                    );
                    drop(guard);
                    let wait = Duration::from_millis((drift_units * self.time_unit_ms).max(0) as u64);
                    let started = Instant::now();
                    let canceled = self.sleep_cancelable(wait, cancel);
                    if self.enable_metrics {
                        self.metrics.record_wait_micros(started.elapsed().as_micros() as u64);
                    }
                    guard = mutex::lock(&self.state);
                    if canceled {
                        return (guard, Err(Error::Canceled));
                    }
                    continue;
                }

                return (guard, Err(self.clock_regressed(now_units, last_time_unit, drift_units)));
            }

            if now_units == guard.last_time_unit {
                let next_sequence = (guard.sequence + 1) & self.shifts.max_sequence_mask as i64;
                if next_sequence == 0 {
                    if self.enable_metrics {
                        self.metrics.record_sequence_overflow();
                    }
                    let target = guard.last_time_unit;
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        worker_id = self.worker_id,
                        time_unit = target,
                        "sequence exhausted, waiting for next time unit"
                    );
                    drop(guard);
                    let wait_result = self.wait_for_time_unit_advance(target, cancel);
                    guard = mutex::lock(&self.state);
                    if let Err(err) = wait_result {
                        return (guard, Err(err));
                    }
                    continue;
                }
                guard.sequence = next_sequence;
            } else {
                guard.sequence = 0;
            }

            guard.last_time_unit = now_units;
            let timestamp_part = now_units - self.custom_epoch_in_time_units;
            let word = (timestamp_part << self.shifts.timestamp_shift)
                | (self.worker_id << self.shifts.worker_shift)
                | guard.sequence;
            return (guard, Ok(word));
        }
    }

    #[cold]
    #[inline(never)]
    fn clock_regressed(&self, now_units: i64, last_time_unit: i64, drift_units: i64) -> Error {
        if self.enable_metrics {
            self.metrics.record_clock_backward_err();
        }
        let tolerance_ms = self.max_clock_backward_units * self.time_unit_ms;
        #[cfg(feature = "tracing")]
        tracing::warn!(
            worker_id = self.worker_id,
            drift_ms = drift_units * self.time_unit_ms,
            tolerance_ms,
            "clock regressed beyond tolerance"
        );
        Error::ClockRegressed {
            current_ms: now_units * self.time_unit_ms,
            last_ms: last_time_unit * self.time_unit_ms,
            drift_ms: drift_units * self.time_unit_ms,
            tolerance_ms,
            worker_id: self.worker_id,
            recovered: false,
        }
    }

    /// Hybrid wait for the clock to advance past `target_units`: sleeps
    /// for most of the remaining time unit (sleeping slightly short to
    /// absorb scheduler jitter), then yields cooperatively in a tight loop
    /// until the monotonic clock crosses the boundary.
    fn wait_for_time_unit_advance(&self, target_units: i64, cancel: Option<&CancelToken>) -> Result<(), Error> {
        let started = Instant::now();
        let next_boundary_ms = (target_units + 1) * self.time_unit_ms;
        let now_ms = self.current_millis();
        let remaining_ms = (next_boundary_ms - now_ms).max(0);

        if remaining_ms > 0 {
            let sleep_ms = remaining_ms.saturating_sub(1);
            let sleep_for = Duration::from_millis(sleep_ms as u64);
            if sleep_for > Duration::from_micros(100) {
                let canceled = self.sleep_cancelable(sleep_for, cancel);
                if canceled {
                    if self.enable_metrics {
                        self.metrics.record_wait_micros(started.elapsed().as_micros() as u64);
                    }
                    return Err(Error::Canceled);
                }
            }
        }

        loop {
            if is_canceled(cancel) {
                if self.enable_metrics {
                    self.metrics.record_wait_micros(started.elapsed().as_micros() as u64);
                }
                return Err(Error::Canceled);
            }
            if self.now_units() > target_units {
                break;
            }
            thread::yield_now();
        }

        if self.enable_metrics {
            self.metrics.record_wait_micros(started.elapsed().as_micros() as u64);
        }
        Ok(())
    }

    fn sleep_cancelable(&self, duration: Duration, cancel: Option<&CancelToken>) -> bool {
        match cancel {
            Some(token) => token.wait_timeout(duration),
            None => {
                thread::sleep(duration);
                false
            }
        }
    }

    fn current_millis(&self) -> i64 {
        self.clock.now_millis()
    }

    fn now_units(&self) -> i64 {
        let now_ms = self.current_millis();
        match self.time_unit_shift {
            Some(shift) => now_ms >> shift,
            None => now_ms / self.time_unit_ms,
        }
    }
}

fn is_canceled(cancel: Option<&CancelToken>) -> bool {
    cancel.map(CancelToken::is_canceled).unwrap_or(false)
}
