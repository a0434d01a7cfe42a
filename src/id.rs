//! The [`Identifier`] value type: a thin, `Copy` wrapper around a signed
//! 64-bit word, with component extraction, validation, sharding helpers,
//! and the full set of textual/binary encodings.

use core::cmp::Ordering;
use core::time::Duration;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::codec::{self, CodecError};
use crate::layout::BitLayout;

// Shifts and masks for the default `L41_10_12_1MS` layout, used by the
// constant-folded extraction methods so the common case never touches a
// `BitLayout` value.
const DEFAULT_TIMESTAMP_SHIFT: u32 = 22; // worker_bits(10) + sequence_bits(12)
const DEFAULT_WORKER_SHIFT: u32 = 12; // sequence_bits
const DEFAULT_MAX_WORKER_MASK: i64 = (1 << 10) - 1;
const DEFAULT_MAX_SEQUENCE_MASK: i64 = (1 << 12) - 1;

/// The extracted fields of an identifier under a given [`BitLayout`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Components {
    /// Reconstructed wall-clock timestamp, in milliseconds since the Unix
    /// epoch: `((word >> timestamp_shift) * time_unit_ms) + epoch_ms`.
    pub timestamp_ms: i64,
    /// The worker identity embedded in the word.
    pub worker_id: i64,
    /// The sequence number embedded in the word.
    pub sequence: i64,
}

/// A distributed, time-ordered, signed 64-bit identifier.
///
/// The sign bit is always clear: every value is in `[0, i64::MAX]`. Two
/// identifiers from the same generator compare in emission order; two
/// identifiers from generators configured with different
/// [`BitLayout`](crate::BitLayout)s are not meaningfully comparable or
/// decodable against each other.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier(i64);

impl Identifier {
    /// Wraps a raw word. Does not validate; use [`Identifier::is_valid`] for
    /// that.
    pub const fn from_i64(word: i64) -> Self {
        Self(word)
    }

    /// The word as a signed 64-bit integer.
    pub const fn int64(self) -> i64 {
        self.0
    }

    /// The word as an unsigned 64-bit integer (equal to `int64` since the
    /// sign bit is always clear for a validly constructed identifier).
    pub const fn uint64(self) -> u64 {
        self.0 as u64
    }

    /// The word's fixed 8-byte big-endian representation.
    pub fn to_be_bytes(self) -> [u8; 8] {
        codec::binary::to_be_bytes(self.0)
    }

    /// Parses an 8-byte big-endian representation.
    pub fn from_be_bytes(bytes: [u8; 8]) -> Result<Self, CodecError> {
        codec::binary::from_be_bytes(bytes).map(Self)
    }

    /// The canonical decimal-string representation.
    pub fn to_decimal_string(self) -> String {
        codec::decimal::encode(self.0)
    }

    /// Parses a decimal string.
    pub fn from_decimal_string(input: &str) -> Result<Self, CodecError> {
        codec::decimal::decode(input).map(Self)
    }

    /// Encodes as plain binary digits (Base2).
    pub fn to_base2(self) -> String {
        codec::binary::encode(self.0)
    }

    /// Decodes a Base2 string.
    pub fn from_base2(input: &str) -> Result<Self, CodecError> {
        codec::binary::decode(input).map(Self)
    }

    /// Encodes as z-base-32.
    pub fn to_base32(self) -> String {
        codec::zbase32::encode(self.0)
    }

    /// Decodes a z-base-32 string.
    pub fn from_base32(input: &str) -> Result<Self, CodecError> {
        codec::zbase32::decode(input).map(Self)
    }

    /// Encodes as Base36 (lowercase).
    pub fn to_base36(self) -> String {
        codec::base36::encode(self.0)
    }

    /// Decodes a Base36 string.
    pub fn from_base36(input: &str) -> Result<Self, CodecError> {
        codec::base36::decode(input).map(Self)
    }

    /// Encodes as Base58 (Bitcoin alphabet).
    pub fn to_base58(self) -> String {
        codec::base58::encode(self.0)
    }

    /// Decodes a Base58 string.
    pub fn from_base58(input: &str) -> Result<Self, CodecError> {
        codec::base58::decode(input).map(Self)
    }

    /// Encodes as Base62 (URL-safe alphanumeric).
    pub fn to_base62(self) -> String {
        codec::base62::encode(self.0)
    }

    /// Decodes a Base62 string.
    pub fn from_base62(input: &str) -> Result<Self, CodecError> {
        codec::base62::decode(input).map(Self)
    }

    /// Encodes as standard Base64 (with padding), over the big-endian byte
    /// representation.
    pub fn to_base64(self) -> String {
        codec::base64::encode(self.0)
    }

    /// Decodes a standard Base64 string.
    pub fn from_base64(input: &str) -> Result<Self, CodecError> {
        codec::base64::decode(input).map(Self)
    }

    /// Encodes as URL-safe Base64 (with padding), over the big-endian byte
    /// representation.
    pub fn to_base64url(self) -> String {
        codec::base64::encode_url(self.0)
    }

    /// Decodes a URL-safe Base64 string.
    pub fn from_base64url(input: &str) -> Result<Self, CodecError> {
        codec::base64::decode_url(input).map(Self)
    }

    /// Encodes as lowercase hexadecimal.
    pub fn to_hex(self) -> String {
        codec::hex::encode(self.0)
    }

    /// Decodes a hexadecimal string, accepting either case.
    pub fn from_hex(input: &str) -> Result<Self, CodecError> {
        codec::hex::decode(input).map(Self)
    }

    /// Extracts the timestamp component under the default
    /// [`BitLayout::L41_10_12_1MS`](crate::BitLayout::L41_10_12_1MS), as a
    /// raw count of time units since the generator's configured epoch (not
    /// yet converted to milliseconds — use
    /// [`Identifier::components`](crate::Identifier::components) to
    /// reconstruct wall-clock milliseconds).
    pub const fn timestamp_units_default(self) -> i64 {
        self.0 >> DEFAULT_TIMESTAMP_SHIFT
    }

    /// Extracts the worker component under the default layout.
    pub const fn worker_default(self) -> i64 {
        (self.0 >> DEFAULT_WORKER_SHIFT) & DEFAULT_MAX_WORKER_MASK
    }

    /// Extracts the sequence component under the default layout.
    pub const fn sequence_default(self) -> i64 {
        self.0 & DEFAULT_MAX_SEQUENCE_MASK
    }

    /// Extracts all components under an explicit layout and epoch,
    /// reconstructing the timestamp in wall-clock milliseconds:
    /// `((word >> timestamp_shift) * time_unit_ms) + epoch_ms`.
    pub fn components(self, layout: &BitLayout, epoch_ms: i64) -> Components {
        let shifts = layout.shifts();
        let timestamp_units = self.0 >> shifts.timestamp_shift;
        let timestamp_ms = timestamp_units * layout.time_unit_ms() + epoch_ms;
        let worker_id = (self.0 >> shifts.worker_shift) & shifts.max_worker_mask as i64;
        let sequence = self.0 & shifts.max_sequence_mask as i64;
        Components {
            timestamp_ms,
            worker_id,
            sequence,
        }
    }

    /// Validates the word against a layout and the epoch it was generated
    /// under: positive, not more than a day in the future of the current
    /// wall clock, and with in-range worker/sequence components.
    pub fn is_valid(self, layout: &BitLayout, epoch_ms: i64) -> bool {
        if self.0 <= 0 {
            return false;
        }
        let components = self.components(layout, epoch_ms);
        if components.timestamp_ms <= epoch_ms {
            return false;
        }
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);
        const ONE_DAY_MS: i64 = 24 * 60 * 60 * 1000;
        if components.timestamp_ms > now_ms + ONE_DAY_MS {
            return false;
        }
        let shifts = layout.shifts();
        if components.worker_id < 0 || components.worker_id as u64 > shifts.max_worker_mask {
            return false;
        }
        if components.sequence < 0 || components.sequence as u64 > shifts.max_sequence_mask {
            return false;
        }
        true
    }

    /// `word mod n`, or `0` if `n <= 0`.
    pub fn shard(self, n: i64) -> i64 {
        if n <= 0 {
            0
        } else {
            self.0 % n
        }
    }

    /// `worker mod n` under the given layout, or `0` if `n <= 0`.
    pub fn shard_by_worker(self, layout: &BitLayout, epoch_ms: i64, n: i64) -> i64 {
        if n <= 0 {
            0
        } else {
            self.components(layout, epoch_ms).worker_id % n
        }
    }

    /// `floor(timestamp_seconds / bucket_seconds)`, or `0` if `bucket` is
    /// non-positive.
    pub fn shard_by_time(self, layout: &BitLayout, epoch_ms: i64, bucket: Duration) -> i64 {
        if bucket.is_zero() {
            return 0;
        }
        let timestamp_secs = self.components(layout, epoch_ms).timestamp_ms / 1000;
        let bucket_secs = bucket.as_secs() as i64;
        if bucket_secs <= 0 {
            0
        } else {
            timestamp_secs / bucket_secs
        }
    }

    /// `true` if `self` was emitted before `other` on the same generator.
    pub fn before(self, other: Self) -> bool {
        self.0 < other.0
    }

    /// `true` if `self` was emitted after `other` on the same generator.
    pub fn after(self, other: Self) -> bool {
        self.0 > other.0
    }

    /// `true` if the two words are identical.
    pub fn equal(self, other: Self) -> bool {
        self.0 == other.0
    }

    /// A three-valued comparison over the raw word.
    pub fn compare(self, other: Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl core::fmt::Debug for Identifier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Identifier").field(&self.0).finish()
    }
}

impl core::fmt::Display for Identifier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

impl From<Identifier> for i64 {
    fn from(id: Identifier) -> i64 {
        id.0
    }
}

impl From<i64> for Identifier {
    fn from(word: i64) -> Self {
        Self(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_component_roundtrip() {
        let worker = 7i64;
        let sequence = 99i64;
        let timestamp_units = 123_456i64;
        let word = (timestamp_units << DEFAULT_TIMESTAMP_SHIFT)
            | (worker << DEFAULT_WORKER_SHIFT)
            | sequence;
        let id = Identifier::from_i64(word);
        assert_eq!(id.worker_default(), worker);
        assert_eq!(id.sequence_default(), sequence);
        assert_eq!(id.timestamp_units_default(), timestamp_units);
    }

    #[test]
    fn parametric_components_reconstruct_wall_clock_ms() {
        let layout = BitLayout::L40_16_7_10MS;
        let shifts = layout.shifts();
        let epoch_ms = 1_700_000_000_000i64;
        let timestamp_units = 42i64;
        let worker = 65535i64;
        let sequence = 5i64;
        let word = (timestamp_units << shifts.timestamp_shift) | (worker << shifts.worker_shift) | sequence;
        let id = Identifier::from_i64(word);
        let components = id.components(&layout, epoch_ms);
        assert_eq!(components.timestamp_ms, epoch_ms + timestamp_units * 10);
        assert_eq!(components.worker_id, worker);
        assert_eq!(components.sequence, sequence);
    }

    #[test]
    fn shard_zero_n_is_zero() {
        let id = Identifier::from_i64(12345);
        assert_eq!(id.shard(0), 0);
        assert_eq!(id.shard(-1), 0);
        assert_eq!(id.shard(10), 12345 % 10);
    }

    #[test]
    fn codec_roundtrips() {
        let id = Identifier::from_i64(123_456_789);
        assert_eq!(Identifier::from_hex(&id.to_hex()).unwrap(), id);
        assert_eq!(Identifier::from_base2(&id.to_base2()).unwrap(), id);
        assert_eq!(Identifier::from_base32(&id.to_base32()).unwrap(), id);
        assert_eq!(Identifier::from_base36(&id.to_base36()).unwrap(), id);
        assert_eq!(Identifier::from_base58(&id.to_base58()).unwrap(), id);
        assert_eq!(Identifier::from_base62(&id.to_base62()).unwrap(), id);
        assert_eq!(Identifier::from_base64(&id.to_base64()).unwrap(), id);
        assert_eq!(Identifier::from_base64url(&id.to_base64url()).unwrap(), id);
        assert_eq!(Identifier::from_decimal_string(&id.to_decimal_string()).unwrap(), id);
        assert_eq!(Identifier::from_be_bytes(id.to_be_bytes()).unwrap(), id);
    }

    #[test]
    fn ordering_helpers() {
        let a = Identifier::from_i64(1);
        let b = Identifier::from_i64(2);
        assert!(a.before(b));
        assert!(b.after(a));
        assert!(a.equal(a));
        assert_eq!(a.compare(b), Ordering::Less);
    }

    #[test]
    fn display_matches_decimal_encoding() {
        let id = Identifier::from_i64(42);
        assert_eq!(id.to_string(), "42");
    }
}
