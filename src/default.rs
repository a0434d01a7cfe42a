//! A process-wide default generator, initialized lazily and exactly once.
//!
//! The worker identity is read from the `SNOWID_WORKER_ID` environment
//! variable at first access, defaulting to `0` if unset or unparsable.
//! Everything else uses [`Config`]'s defaults. Construction failure (an
//! out-of-range worker id, most likely) is cached and replayed on every
//! subsequent call — there is no retry, since the environment that caused
//! the failure is not expected to change within the process's lifetime.

use std::sync::OnceLock;

use crate::error::Error;
use crate::generator::{Config, Generator};

static DEFAULT_GENERATOR: OnceLock<Result<Generator, Error>> = OnceLock::new();

/// Returns the process-wide default [`Generator`], constructing it on first
/// call.
pub fn default_generator() -> Result<&'static Generator, &'static Error> {
    DEFAULT_GENERATOR
        .get_or_init(|| {
            let worker_id = std::env::var("SNOWID_WORKER_ID")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(0);
            Generator::new(Config::builder(worker_id).build())
        })
        .as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_generator_is_memoized() {
        let first = default_generator().map(|g| g as *const Generator);
        let second = default_generator().map(|g| g as *const Generator);
        assert_eq!(first, second);
    }
}
