//! Epoch constants.
//!
//! A layout's timestamp field measures elapsed time units since an epoch,
//! not since the Unix epoch. Shifting the epoch forward trades historical
//! range for future range within the same bit width. These constants are
//! offsets from the Unix epoch, in milliseconds, matching the convention
//! used by several public Snowflake-style identifier schemes.

/// The Unix epoch itself: `0`.
pub const UNIX_EPOCH_MS: i64 = 0;

/// 2025-01-01T00:00:00Z. The default epoch for [`crate::Config`].
pub const DEFAULT_EPOCH_MS: i64 = 1_735_689_600_000;

/// 2010-11-04T01:42:54.657Z, Twitter's Snowflake epoch.
pub const TWITTER_EPOCH_MS: i64 = 1_288_834_974_657;

/// 2015-01-01T00:00:00Z, Discord's Snowflake epoch.
pub const DISCORD_EPOCH_MS: i64 = 1_420_070_400_000;

/// 2010-03-01T00:00:00Z, Instagram's identifier epoch.
pub const INSTAGRAM_EPOCH_MS: i64 = 1_267_401_600_000;

/// 2016-03-16T00:00:00Z, Mastodon's identifier epoch.
pub const MASTODON_EPOCH_MS: i64 = 1_458_086_400_000;
