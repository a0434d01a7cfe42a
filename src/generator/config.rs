//! Generator configuration and its builder.

use core::time::Duration;

use crate::layout::BitLayout;
use crate::time::DEFAULT_EPOCH_MS;

/// Default tolerance for a clock that has moved backward: 5 seconds.
pub const DEFAULT_MAX_CLOCK_BACKWARD: Duration = Duration::from_secs(5);

/// Parameters a [`crate::Generator`] is constructed from.
///
/// An all-zero `layout` means "use [`BitLayout::L41_10_12_1MS`]". Build one
/// with [`Config::builder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// The worker identity this generator embeds in every word.
    pub worker_id: i64,
    /// The epoch, in whole milliseconds since the Unix epoch, the
    /// timestamp field is measured from.
    pub epoch_ms: i64,
    /// The maximum backward clock movement tolerated before emission fails
    /// with [`crate::Error::ClockRegressed`].
    pub max_clock_backward: Duration,
    /// Whether atomic metric counters are updated. Defaults to `true`;
    /// disabling trades observability for a handful of avoided atomic
    /// operations per emission.
    pub enable_metrics: bool,
    /// The bit layout. An all-zero value means "use the default".
    pub layout: BitLayout,
}

impl Config {
    /// Starts building a [`Config`] for `worker_id`, with every other field
    /// at its default.
    pub fn builder(worker_id: i64) -> ConfigBuilder {
        ConfigBuilder {
            config: Config {
                worker_id,
                epoch_ms: DEFAULT_EPOCH_MS,
                max_clock_backward: DEFAULT_MAX_CLOCK_BACKWARD,
                enable_metrics: true,
                layout: BitLayout::ZERO,
            },
        }
    }
}

/// Builder for [`Config`].
#[derive(Clone, Copy, Debug)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Overrides the epoch. Default: 2025-01-01T00:00:00Z.
    pub fn epoch_ms(mut self, epoch_ms: i64) -> Self {
        self.config.epoch_ms = epoch_ms;
        self
    }

    /// Overrides the clock-backward tolerance. Default: 5 seconds.
    pub fn max_clock_backward(mut self, max_clock_backward: Duration) -> Self {
        self.config.max_clock_backward = max_clock_backward;
        self
    }

    /// Enables or disables metric updates. Default: enabled.
    pub fn enable_metrics(mut self, enable_metrics: bool) -> Self {
        self.config.enable_metrics = enable_metrics;
        self
    }

    /// Overrides the bit layout. Default: an all-zero layout, which
    /// [`crate::Generator::new`] resolves to
    /// [`BitLayout::L41_10_12_1MS`](crate::BitLayout::L41_10_12_1MS).
    pub fn layout(mut self, layout: BitLayout) -> Self {
        self.config.layout = layout;
        self
    }

    /// Finishes the builder.
    pub fn build(self) -> Config {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let config = Config::builder(3).build();
        assert_eq!(config.worker_id, 3);
        assert_eq!(config.epoch_ms, DEFAULT_EPOCH_MS);
        assert_eq!(config.max_clock_backward, DEFAULT_MAX_CLOCK_BACKWARD);
        assert!(config.enable_metrics);
        assert_eq!(config.layout, BitLayout::ZERO);
    }

    #[test]
    fn builder_overrides() {
        let config = Config::builder(9)
            .epoch_ms(0)
            .max_clock_backward(Duration::from_millis(100))
            .enable_metrics(false)
            .layout(BitLayout::L40_16_7_10MS)
            .build();
        assert_eq!(config.epoch_ms, 0);
        assert_eq!(config.max_clock_backward, Duration::from_millis(100));
        assert!(!config.enable_metrics);
        assert_eq!(config.layout, BitLayout::L40_16_7_10MS);
    }
}
