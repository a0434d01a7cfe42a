//! Error taxonomy for layout validation, generator construction, emission,
//! and codec decoding.

use crate::codec::CodecError;

/// Result alias used throughout this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// All errors this crate can produce.
///
/// Configuration errors are fatal to construction. [`Error::ClockRegressed`]
/// and [`Error::Canceled`] are surfaced unconditionally by emission and never
/// leave the generator in an inconsistent state. Sequence overflow is
/// recovered internally and never appears here; see
/// [`Metrics::sequence_overflow`](crate::Metrics::sequence_overflow).
#[derive(Clone, Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A [`BitLayout`](crate::BitLayout) or [`Config`](crate::Config) field
    /// failed validation.
    #[error("configuration error: field `{field}` = `{value}` is invalid ({reason}); constraint: {constraint}")]
    Configuration {
        /// Name of the offending field.
        field: &'static str,
        /// The value that was rejected, rendered for diagnostics.
        value: String,
        /// Human-readable reason the value was rejected.
        reason: String,
        /// The constraint the value failed to satisfy.
        constraint: String,
    },

    /// The reconciled monotonic clock produced a timestamp behind
    /// `last_time_unit` and the drift exceeded the configured tolerance.
    #[error(
        "clock regressed: now={current_ms}ms last={last_ms}ms drift={drift_ms}ms \
         tolerance={tolerance_ms}ms worker={worker_id} recovered={recovered}"
    )]
    ClockRegressed {
        /// The reconciled "now" in milliseconds since the Unix epoch.
        current_ms: i64,
        /// The previous `last_time_unit`, projected back to milliseconds.
        last_ms: i64,
        /// `last_ms - current_ms`.
        drift_ms: i64,
        /// The configured `max_clock_backward`, in milliseconds.
        tolerance_ms: i64,
        /// The worker id of the generator that observed the regression.
        worker_id: i64,
        /// Always `false` when this variant is returned: a recovered
        /// regression never surfaces as an error.
        recovered: bool,
    },

    /// A cancellation signal fired while the caller was waiting.
    #[error("operation canceled")]
    Canceled,

    /// A codec failed to decode its input.
    #[error(transparent)]
    Codec(#[from] CodecError),
}
