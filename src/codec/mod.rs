//! Alphanumeric and binary encodings for [`Identifier`](crate::Identifier)
//! words.
//!
//! Every decoder checks before it multiplies or shifts, so a value that
//! would exceed the signed 64-bit positive range is rejected with
//! [`CodecError::Overflow`] rather than silently wrapping.

pub(crate) mod base36;
pub(crate) mod base58;
pub(crate) mod base62;
pub(crate) mod base64;
pub(crate) mod binary;
pub(crate) mod decimal;
mod error;
pub(crate) mod hex;
mod positional;
pub(crate) mod zbase32;

pub use error::CodecError;
