//! A distributed 64-bit unique identifier generator in the Snowflake
//! family: each identifier packs a wall-clock-derived timestamp, a worker
//! identity, and a per-time-unit sequence number into a single signed
//! 64-bit word. Given a pre-assigned, globally unique worker identity, a
//! [`Generator`] produces a strictly monotonically increasing stream of
//! identifiers with no cross-node coordination required.
//!
//! ```
//! use snowid::{Config, Generator};
//!
//! let generator = Generator::new(Config::builder(1).build())?;
//! let id = generator.emit()?;
//! assert_eq!(id.worker_default(), 1);
//! # Ok::<(), snowid::Error>(())
//! ```
//!
//! Identifiers are intentionally predictable and time-ordered: this is not
//! a cryptographic primitive. Layouts carry a bounded lifespan by design,
//! and correctness under a duplicated worker identity is the caller's
//! responsibility — a violation silently collides.

mod cancel;
mod clock;
mod codec;
mod default;
mod error;
mod generator;
mod id;
mod layout;
mod time;

#[cfg(feature = "serde")]
mod serde_impl;

#[cfg(feature = "database")]
mod db;

pub use cancel::CancelToken;
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use codec::CodecError;
pub use default::default_generator;
pub use error::{Error, Result};
pub use generator::{Config, ConfigBuilder, Generator, Metrics, MetricsSnapshot, DEFAULT_MAX_CLOCK_BACKWARD};
pub use id::{Components, Identifier};
pub use layout::{BitLayout, LayoutCapacity, LayoutShifts};
pub use time::{DEFAULT_EPOCH_MS, DISCORD_EPOCH_MS, INSTAGRAM_EPOCH_MS, MASTODON_EPOCH_MS, TWITTER_EPOCH_MS, UNIX_EPOCH_MS};
