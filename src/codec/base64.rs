//! Base64 (standard and URL-safe variants), operating on the 8-byte
//! big-endian representation with padding.

use base64::{engine::general_purpose, engine::GeneralPurpose, Engine};

use super::{binary, CodecError};

/// Encodes `word` as standard base64 (with padding) of its big-endian bytes.
pub fn encode(word: i64) -> String {
    general_purpose::STANDARD.encode(binary::to_be_bytes(word))
}

/// Decodes a standard base64 string back into an identifier word.
pub fn decode(input: &str) -> Result<i64, CodecError> {
    decode_with(&general_purpose::STANDARD, input)
}

/// Encodes `word` as URL-safe base64 (with padding) of its big-endian bytes.
pub fn encode_url(word: i64) -> String {
    general_purpose::URL_SAFE.encode(binary::to_be_bytes(word))
}

/// Decodes a URL-safe base64 string back into an identifier word.
pub fn decode_url(input: &str) -> Result<i64, CodecError> {
    decode_with(&general_purpose::URL_SAFE, input)
}

fn decode_with(engine: &GeneralPurpose, input: &str) -> Result<i64, CodecError> {
    let bytes = engine
        .decode(input)
        .map_err(|_| CodecError::invalid(input.bytes().next().unwrap_or(b'?'), 0))?;
    let array: [u8; 8] = bytes
        .try_into()
        .map_err(|v: Vec<u8>| CodecError::TooLong { len: v.len(), max: 8 })?;
    binary::from_be_bytes(array)
}
