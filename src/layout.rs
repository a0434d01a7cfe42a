//! Parametric bit-layout engine: partitions the 63 usable bits of an
//! [`Identifier`](crate::Identifier) into timestamp, worker, and sequence
//! fields, and pre-computes every derived shift, mask, and capacity figure.

use core::time::Duration;

use crate::error::Error;

const TIMESTAMP_BITS_RANGE: core::ops::RangeInclusive<u8> = 38..=42;
const WORKER_BITS_RANGE: core::ops::RangeInclusive<u8> = 8..=18;
const SEQUENCE_BITS_RANGE: core::ops::RangeInclusive<u8> = 6..=14;
const USABLE_BITS: u8 = 63;

/// Describes how the 63 usable bits of an identifier word are partitioned.
///
/// `timestamp_bits + worker_bits + sequence_bits` must equal 63. See
/// [`BitLayout::validate`] for the full set of constraints, and the `L*`
/// associated constants for the eight presets this crate ships with.
///
/// Identifiers generated under one layout cannot be meaningfully decoded
/// under another: there is no self-describing envelope, by design.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitLayout {
    /// Width of the timestamp field, in `[38, 42]`.
    pub timestamp_bits: u8,
    /// Width of the worker field, in `[8, 18]`.
    pub worker_bits: u8,
    /// Width of the sequence field, in `[6, 14]`.
    pub sequence_bits: u8,
    /// The quantization of the timestamp field (typically 1ms or 10ms).
    pub time_unit: Duration,
}

/// Derived capacity figures projected from a [`BitLayout`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutCapacity {
    /// `2 ^ worker_bits`.
    pub max_workers: u64,
    /// `2 ^ sequence_bits`.
    pub max_sequence: u64,
    /// `2 ^ timestamp_bits`.
    pub max_timestamp: u64,
    /// `max_timestamp * time_unit`, saturating at `Duration::MAX`.
    pub lifespan: Duration,
    /// Maximum identifiers a single worker can emit per second.
    pub throughput_per_worker: f64,
    /// Echo of the layout's time unit.
    pub time_unit: Duration,
}

/// Pre-computed shift amounts and masks, cached by [`crate::Generator`] at
/// construction so the emission hot path never recomputes them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutShifts {
    /// `worker_bits + sequence_bits`.
    pub timestamp_shift: u32,
    /// `sequence_bits`.
    pub worker_shift: u32,
    /// `2 ^ worker_bits - 1`.
    pub max_worker_mask: u64,
    /// `2 ^ sequence_bits - 1`.
    pub max_sequence_mask: u64,
}

impl BitLayout {
    /// The default layout: 41 timestamp bits, 10 worker bits, 12 sequence
    /// bits, 1ms time unit. ~69 years of lifespan, 1024 workers, 4096
    /// ids/worker/ms.
    pub const L41_10_12_1MS: BitLayout = BitLayout {
        timestamp_bits: 41,
        worker_bits: 10,
        sequence_bits: 12,
        time_unit: Duration::from_millis(1),
    };

    /// 40 timestamp bits, 14 worker bits, 9 sequence bits, 1ms time unit.
    /// More workers, less per-worker throughput than the default.
    pub const L40_14_9_1MS: BitLayout = BitLayout {
        timestamp_bits: 40,
        worker_bits: 14,
        sequence_bits: 9,
        time_unit: Duration::from_millis(1),
    };

    /// 39 timestamp bits, 17 worker bits, 7 sequence bits, 1ms time unit.
    pub const L39_17_7_1MS: BitLayout = BitLayout {
        timestamp_bits: 39,
        worker_bits: 17,
        sequence_bits: 7,
        time_unit: Duration::from_millis(1),
    };

    /// 39 timestamp bits, 15 worker bits, 9 sequence bits, 1ms time unit.
    pub const L39_15_9_1MS: BitLayout = BitLayout {
        timestamp_bits: 39,
        worker_bits: 15,
        sequence_bits: 9,
        time_unit: Duration::from_millis(1),
    };

    /// 42 timestamp bits, 12 worker bits, 9 sequence bits, 1ms time unit.
    /// Longest 1ms-granularity lifespan of the presets.
    pub const L42_12_9_1MS: BitLayout = BitLayout {
        timestamp_bits: 42,
        worker_bits: 12,
        sequence_bits: 9,
        time_unit: Duration::from_millis(1),
    };

    /// 39 timestamp bits, 16 worker bits, 8 sequence bits, 10ms time unit.
    pub const L39_16_8_10MS: BitLayout = BitLayout {
        timestamp_bits: 39,
        worker_bits: 16,
        sequence_bits: 8,
        time_unit: Duration::from_millis(10),
    };

    /// 40 timestamp bits, 16 worker bits, 7 sequence bits, 10ms time unit.
    /// ~348 years of lifespan.
    pub const L40_16_7_10MS: BitLayout = BitLayout {
        timestamp_bits: 40,
        worker_bits: 16,
        sequence_bits: 7,
        time_unit: Duration::from_millis(10),
    };

    /// 40 timestamp bits, 17 worker bits, 6 sequence bits, 10ms time unit.
    pub const L40_17_6_10MS: BitLayout = BitLayout {
        timestamp_bits: 40,
        worker_bits: 17,
        sequence_bits: 6,
        time_unit: Duration::from_millis(10),
    };

    /// An all-zero layout, used by [`crate::Config`] to mean "use
    /// [`BitLayout::L41_10_12_1MS`]".
    pub(crate) const ZERO: BitLayout = BitLayout {
        timestamp_bits: 0,
        worker_bits: 0,
        sequence_bits: 0,
        time_unit: Duration::ZERO,
    };

    /// Returns `self` if non-zero, else [`BitLayout::L41_10_12_1MS`].
    pub(crate) fn or_default(self) -> BitLayout {
        if self == Self::ZERO {
            Self::L41_10_12_1MS
        } else {
            self
        }
    }

    /// Validates the layout's bit-partitioning rules: the three bit fields
    /// must sum to 63 and each must fall within its documented range; the
    /// time unit must be a positive, whole number of milliseconds.
    pub fn validate(&self) -> Result<(), Error> {
        let sum = self.timestamp_bits as u16 + self.worker_bits as u16 + self.sequence_bits as u16;
        if sum != USABLE_BITS as u16 {
            return Err(Error::Configuration {
                field: "timestamp_bits + worker_bits + sequence_bits",
                value: sum.to_string(),
                reason: "bit widths must sum to the 63 usable bits".into(),
                constraint: format!("== {USABLE_BITS}"),
            });
        }
        if !TIMESTAMP_BITS_RANGE.contains(&self.timestamp_bits) {
            return Err(Error::Configuration {
                field: "timestamp_bits",
                value: self.timestamp_bits.to_string(),
                reason: "out of documented range".into(),
                constraint: format!("{TIMESTAMP_BITS_RANGE:?}"),
            });
        }
        if !WORKER_BITS_RANGE.contains(&self.worker_bits) {
            return Err(Error::Configuration {
                field: "worker_bits",
                value: self.worker_bits.to_string(),
                reason: "out of documented range".into(),
                constraint: format!("{WORKER_BITS_RANGE:?}"),
            });
        }
        if !SEQUENCE_BITS_RANGE.contains(&self.sequence_bits) {
            return Err(Error::Configuration {
                field: "sequence_bits",
                value: self.sequence_bits.to_string(),
                reason: "out of documented range".into(),
                constraint: format!("{SEQUENCE_BITS_RANGE:?}"),
            });
        }
        if self.time_unit.is_zero() {
            return Err(Error::Configuration {
                field: "time_unit",
                value: format!("{:?}", self.time_unit),
                reason: "time unit must be positive".into(),
                constraint: "> 0".into(),
            });
        }
        if self.time_unit.as_millis() == 0 || self.time_unit.subsec_nanos() % 1_000_000 != 0 {
            return Err(Error::Configuration {
                field: "time_unit",
                value: format!("{:?}", self.time_unit),
                reason: "time unit must be a whole number of milliseconds".into(),
                constraint: "integral milliseconds".into(),
            });
        }
        Ok(())
    }

    /// Projects the layout's derived capacity figures.
    ///
    /// Lifespan is computed in floating-point seconds first (to avoid
    /// integer overflow for long-lived layouts), then clamped to
    /// `Duration::MAX` if the result would otherwise overflow.
    pub fn capacity(&self) -> LayoutCapacity {
        let max_workers = 1u64 << self.worker_bits;
        let max_sequence = 1u64 << self.sequence_bits;
        let max_timestamp = 1u64 << self.timestamp_bits;

        let lifespan_secs = max_timestamp as f64 * self.time_unit.as_secs_f64();
        let lifespan = if lifespan_secs.is_finite() && lifespan_secs < Duration::MAX.as_secs_f64() {
            Duration::from_secs_f64(lifespan_secs)
        } else {
            Duration::MAX
        };

        let throughput_per_worker = max_sequence as f64 / self.time_unit.as_secs_f64();

        LayoutCapacity {
            max_workers,
            max_sequence,
            max_timestamp,
            lifespan,
            throughput_per_worker,
            time_unit: self.time_unit,
        }
    }

    /// Projects the layout's pre-computed shifts and masks.
    pub fn shifts(&self) -> LayoutShifts {
        let timestamp_shift = self.worker_bits as u32 + self.sequence_bits as u32;
        let worker_shift = self.sequence_bits as u32;
        let max_worker_mask = (1u64 << self.worker_bits) - 1;
        let max_sequence_mask = (1u64 << self.sequence_bits) - 1;
        LayoutShifts {
            timestamp_shift,
            worker_shift,
            max_worker_mask,
            max_sequence_mask,
        }
    }

    /// Validates `worker_id` against this layout's `max_worker_mask`.
    pub fn validate_worker_id(&self, worker_id: i64) -> Result<(), Error> {
        let max_worker_mask = self.shifts().max_worker_mask;
        if worker_id < 0 || worker_id as u64 > max_worker_mask {
            return Err(Error::Configuration {
                field: "worker_id",
                value: worker_id.to_string(),
                reason: "worker id exceeds this layout's capacity".into(),
                constraint: format!("0..={max_worker_mask}"),
            });
        }
        Ok(())
    }

    /// Returns `Some(shift)` if `time_unit` is an exact power-of-two number
    /// of milliseconds (enabling a bitshift fast path), else `None`
    /// (callers fall back to integer division).
    pub fn time_unit_shift(&self) -> Option<u32> {
        let time_unit_ms = self.time_unit.as_millis() as u64;
        if time_unit_ms.is_power_of_two() {
            Some(time_unit_ms.trailing_zeros())
        } else {
            None
        }
    }

    /// The time unit expressed in whole milliseconds.
    pub(crate) fn time_unit_ms(&self) -> i64 {
        self.time_unit.as_millis() as i64
    }
}

impl Default for BitLayout {
    fn default() -> Self {
        Self::L41_10_12_1MS
    }
}
